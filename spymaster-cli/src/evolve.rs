//! Evolution command - train perceptron players by tournament selection
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build configs, run_evolution(), save_results()
//! - Level 3: create_fitness_fn(), progress reporting
//! - Level 4: file I/O, formatting utilities

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use spymaster_core::{Agent, HeuristicAgent, STRATEGY_NAMES};
use spymaster_evolve::{
    evolve_with_callback, summarize, EvolutionConfig, EvolutionResult, Genome, PerceptronAgent,
    Population,
};
use spymaster_tournament::{
    evaluate_population, run_tournament, ReferenceScoring, TournamentConfig,
};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    /// Every ordered pair of agents plays once
    RoundRobin,
    /// Every agent plays the reference strategy
    Reference,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ScoringArg {
    /// Own score minus the reference's score
    Differential,
    /// 1 per win, 0.5 per draw
    Wins,
}

#[derive(Args)]
pub struct EvolveArgs {
    /// Population size
    #[arg(long, default_value = "32")]
    pub population: usize,

    /// Number of generations to run
    #[arg(long, default_value = "100")]
    pub generations: usize,

    /// Agents replaced by offspring each generation
    #[arg(long, default_value = "8")]
    pub n_replace: usize,

    /// Standard deviation of the Gaussian mutation noise
    #[arg(long, default_value = "0.1")]
    pub mutation_rate: f32,

    /// Tournament format used for fitness
    #[arg(long, value_enum, default_value = "reference")]
    pub format: FormatArg,

    /// Reference strategy (russia, america, britain, france, china)
    #[arg(long, default_value = "russia")]
    pub reference: String,

    /// Games per agent against the reference
    #[arg(long, default_value = "30")]
    pub reference_games: usize,

    /// Scoring for reference games
    #[arg(long, value_enum, default_value = "differential")]
    pub scoring: ScoringArg,

    /// Output directory for results
    #[arg(long, default_value = "evolution_output")]
    pub output: PathBuf,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Best agent of a run, as written to `champion.json`
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct ChampionRecord {
    pub codename: String,
    pub fitness: f32,
    pub generations: usize,
    pub saved_at: DateTime<Utc>,
    pub genome: Genome,
}

/// Per-generation numbers beyond what the evolution loop records
#[derive(Default)]
struct RunLog {
    /// Population win points against the reference, one game per agent
    reference_points: Vec<f32>,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run evolution command
///
/// This function reads like a table of contents:
/// 1. Set up evolution and tournament configuration
/// 2. Create the initial population
/// 3. Run the evolution loop
/// 4. Save results
pub fn run(args: EvolveArgs, seed: Option<u64>) -> Result<()> {
    let config = build_evolution_config(&args);
    config.validate().context("Invalid evolution settings")?;

    let reference = resolve_reference(&args.reference)?;
    let mut rng = create_rng(seed);
    let tournament = build_tournament_config(&args, &reference, rng.gen());

    tracing::info!(
        "Starting evolution: pop={}, gen={}, replace={}, rate={}, format={:?}, reference={}",
        config.population_size,
        config.generations,
        config.n_replace,
        config.mutation_rate,
        args.format,
        reference.name
    );

    let population = Population::random(config.population_size, &mut rng);
    let (result, log) = run_evolution(
        population,
        &config,
        &tournament,
        &reference,
        &args,
        &mut rng,
    )?;

    save_results(&result, &log, &args)?;
    print_summary(&result, &log, &args);

    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Build evolution config from arguments
fn build_evolution_config(args: &EvolveArgs) -> EvolutionConfig {
    EvolutionConfig::default()
        .with_population_size(args.population)
        .with_generations(args.generations)
        .with_n_replace(args.n_replace)
        .with_mutation_rate(args.mutation_rate)
}

/// Build the per-generation tournament config
fn build_tournament_config(
    args: &EvolveArgs,
    reference: &HeuristicAgent,
    seed: u64,
) -> TournamentConfig {
    let config = match args.format {
        FormatArg::RoundRobin => TournamentConfig::round_robin(),
        FormatArg::Reference => {
            let scoring = match args.scoring {
                ScoringArg::Differential => ReferenceScoring::ScoreDifferential,
                ScoringArg::Wins => ReferenceScoring::WinPoints,
            };
            TournamentConfig::versus_reference(reference.clone(), args.reference_games, scoring)
        }
    };
    config.with_seed(seed)
}

/// Run the evolution loop with progress reporting
fn run_evolution(
    population: Population,
    config: &EvolutionConfig,
    tournament: &TournamentConfig,
    reference: &HeuristicAgent,
    args: &EvolveArgs,
    rng: &mut ChaCha8Rng,
) -> Result<(EvolutionResult, RunLog)> {
    let progress = create_progress_bar(config.generations, args.json)?;
    let monitor_seed: u64 = rng.gen();
    let mut log = RunLog::default();

    let fitness_fn = create_fitness_fn(tournament.clone());

    let callback = |gen: usize, agents: &[PerceptronAgent], fitness: &[f32]| {
        let (best, avg) = summarize(fitness);
        let points =
            evaluate_population(agents, reference, generation_seed(monitor_seed, gen), true);
        log.reference_points.push(points);

        progress.suspend(|| {
            tracing::info!(
                "Generation {}: best={:.3}, avg={:.3}, vs {}={:.1}/{}",
                gen + 1,
                best,
                avg,
                reference.name,
                points,
                agents.len()
            );
        });
        progress.set_message(format!("best {:.1}", best));
        progress.inc(1);
    };

    let result = evolve_with_callback(population, config, fitness_fn, callback, rng)?;
    progress.finish_and_clear();

    Ok((result, log))
}

/// Save evolution results to output directory
fn save_results(result: &EvolutionResult, log: &RunLog, args: &EvolveArgs) -> Result<()> {
    create_output_directory(&args.output)?;
    save_champion(result, &args.output)?;
    save_champions(result, &args.output)?;
    save_fitness_history(result, log, &args.output)?;

    if args.json {
        print_json_results(result, log)?;
    }

    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// Create fitness function: one tournament per generation, fresh seeds each time
fn create_fitness_fn(tournament: TournamentConfig) -> impl FnMut(&[PerceptronAgent]) -> Vec<f32> {
    let base_seed = tournament.seed;
    let mut gen = 0;

    move |agents: &[PerceptronAgent]| {
        let config = tournament.clone().with_seed(generation_seed(base_seed, gen));
        gen += 1;

        let result = run_tournament(agents, &config);
        if !result.failed_games.is_empty() {
            tracing::warn!(
                "Generation {}: {} of {} games failed",
                gen,
                result.failed_games.len(),
                result.total_games()
            );
        }
        result.fitness
    }
}

/// Look up the reference strategy by name
fn resolve_reference(name: &str) -> Result<HeuristicAgent> {
    HeuristicAgent::named(name).with_context(|| {
        format!(
            "Unknown reference strategy '{}' (expected one of: {})",
            name,
            STRATEGY_NAMES.join(", ")
        )
    })
}

fn create_progress_bar(generations: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let bar = ProgressBar::new(generations as u64);
    bar.set_style(
        ProgressStyle::with_template("[{elapsed_precise}] {bar:40} {pos}/{len} generations {msg}")
            .context("Invalid progress bar template")?,
    );
    Ok(bar)
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

/// Create output directory
fn create_output_directory(output: &Path) -> Result<()> {
    std::fs::create_dir_all(output).context("Failed to create output directory")?;

    let champions_dir = output.join("champions");
    std::fs::create_dir_all(&champions_dir).context("Failed to create champions directory")?;

    Ok(())
}

/// Save the best agent with its fitness and a timestamp
fn save_champion(result: &EvolutionResult, output: &Path) -> Result<()> {
    let Some((champion, fitness)) = result.champion() else {
        return Ok(());
    };

    let record = ChampionRecord {
        codename: champion.name().to_string(),
        fitness,
        generations: result.best_fitness_history.len(),
        saved_at: Utc::now(),
        genome: champion.genome().clone(),
    };

    let path = output.join("champion.json");
    let json = serde_json::to_string_pretty(&record)?;
    std::fs::write(&path, json).context("Failed to write champion")?;
    tracing::info!("Saved champion {} to {}", record.codename, path.display());

    Ok(())
}

/// Save top genomes to output directory
fn save_champions(result: &EvolutionResult, output: &Path) -> Result<()> {
    let champions_dir = output.join("champions");
    let num_champions = std::cmp::min(5, result.population.len());

    for (i, agent) in result.population.iter().take(num_champions).enumerate() {
        let path = champions_dir.join(format!("champion_{}.json", i + 1));
        agent.genome().save(&path).context("Failed to save champion genome")?;
        tracing::debug!("Saved champion {} to {}", i + 1, path.display());
    }

    Ok(())
}

/// Save fitness history to CSV
fn save_fitness_history(result: &EvolutionResult, log: &RunLog, output: &Path) -> Result<()> {
    let path = output.join("fitness_history.csv");
    std::fs::write(&path, fitness_history_csv(result, log))
        .context("Failed to write fitness history")?;
    tracing::info!("Saved fitness history to {}", path.display());

    Ok(())
}

fn fitness_history_csv(result: &EvolutionResult, log: &RunLog) -> String {
    let mut content = String::from("generation,best_fitness,avg_fitness,reference_points\n");

    for (i, (best, avg)) in result
        .best_fitness_history
        .iter()
        .zip(&result.avg_fitness_history)
        .enumerate()
    {
        let points = log.reference_points.get(i).copied().unwrap_or(0.0);
        content.push_str(&format!("{},{:.4},{:.4},{:.1}\n", i + 1, best, avg, points));
    }

    content
}

/// Print JSON results to stdout
fn print_json_results(result: &EvolutionResult, log: &RunLog) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        best_fitness: f32,
        final_avg_fitness: f32,
        generations_run: usize,
        champion: Option<&'a str>,
        reference_points: Option<f32>,
    }

    let (_, final_avg) = summarize(&result.fitness);
    let output = JsonOutput {
        best_fitness: result.fitness.first().copied().unwrap_or(0.0),
        final_avg_fitness: final_avg,
        generations_run: result.best_fitness_history.len(),
        champion: result.population.first().map(|a| a.name()),
        reference_points: log.reference_points.last().copied(),
    };

    let json = serde_json::to_string_pretty(&output)?;
    println!("{}", json);

    Ok(())
}

/// Print summary to console
fn print_summary(result: &EvolutionResult, log: &RunLog, args: &EvolveArgs) {
    if args.json {
        return;
    }

    println!("\n=== Evolution Complete ===");
    println!("Generations: {}", result.best_fitness_history.len());
    println!(
        "Best fitness: {:.4}",
        result.fitness.first().copied().unwrap_or(0.0)
    );
    println!("Final avg fitness: {:.4}", summarize(&result.fitness).1);
    if let Some(points) = log.reference_points.last() {
        println!(
            "Final population vs {}: {:.1}/{}",
            args.reference,
            points,
            result.population.len()
        );
    }
    println!("Output directory: {}", args.output.display());

    if let Some(best) = result.population.first() {
        println!("Champion: {}", best.name());
    }
}

/// Seed for generation `gen`, spaced so tournaments never share game seeds
fn generation_seed(base: u64, gen: usize) -> u64 {
    base.wrapping_add((gen as u64) << 32)
}

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
