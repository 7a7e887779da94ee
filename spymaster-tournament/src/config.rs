//! Configuration types for tournament play
//!
//! Level 4 - Utilities and configuration

use spymaster_core::HeuristicAgent;

/// How games against the reference are turned into fitness
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceScoring {
    /// Own score minus the reference's score, summed over games
    ScoreDifferential,
    /// 1 per win, 0.5 per draw, summed over games
    WinPoints,
}

impl Default for ReferenceScoring {
    fn default() -> Self {
        ReferenceScoring::ScoreDifferential
    }
}

/// Tournament format
#[derive(Clone, Debug, PartialEq)]
pub enum TournamentFormat {
    /// Every ordered pair of distinct agents plays once
    RoundRobin,
    /// Every agent plays `games_per_agent` games as White against `reference`
    VersusReference {
        reference: HeuristicAgent,
        games_per_agent: usize,
        scoring: ReferenceScoring,
    },
}

impl Default for TournamentFormat {
    fn default() -> Self {
        TournamentFormat::RoundRobin
    }
}

/// Tournament configuration
#[derive(Clone, Debug)]
pub struct TournamentConfig {
    /// Tournament format
    pub format: TournamentFormat,
    /// Whether to run games in parallel
    pub parallel: bool,
    /// Base seed; game k uses `seed + k`
    pub seed: u64,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            format: TournamentFormat::RoundRobin,
            parallel: true,
            seed: 42,
        }
    }
}

impl TournamentConfig {
    /// Round robin over the whole population
    pub fn round_robin() -> Self {
        Self::default()
    }

    /// Fixed number of games per agent against one reference strategy
    pub fn versus_reference(
        reference: HeuristicAgent,
        games_per_agent: usize,
        scoring: ReferenceScoring,
    ) -> Self {
        Self {
            format: TournamentFormat::VersusReference {
                reference,
                games_per_agent,
                scoring,
            },
            ..Default::default()
        }
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Run games on the calling thread only
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Games one tournament over `n` agents will play
    pub fn total_games(&self, n: usize) -> usize {
        match &self.format {
            TournamentFormat::RoundRobin => n * n.saturating_sub(1),
            TournamentFormat::VersusReference {
                games_per_agent, ..
            } => n * games_per_agent,
        }
    }
}
