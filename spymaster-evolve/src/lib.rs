//! Spymaster Evolution - Evolutionary training of perceptron players
//!
//! This crate provides the evolutionary side of Spymaster:
//! - Genome (16x51 weight matrix) and its feature encoding
//! - Perceptron players and agents
//! - Gaussian mutation
//! - Rank-based mirror replacement
//! - The generational loop
//!
//! Fitness is supplied by the caller; in practice a tournament from
//! `spymaster-tournament`.

pub mod error;
pub mod genome;
pub mod mutation;
pub mod naming;
pub mod perceptron;
pub mod population;
pub mod selection;

pub use error::{EvolutionError, GenomeError};
pub use genome::{Genome, CARDS, FEATURES};
pub use mutation::mutate_genome;
pub use naming::agent_name;
pub use perceptron::{features, PerceptronAgent, PerceptronPlayer};
pub use population::Population;
pub use selection::{rank_ascending, replacement_plan, select_elite, Replacement};

use rand::Rng;

/// Evolution configuration
#[derive(Clone, Debug)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Agents replaced per generation
    pub n_replace: usize,
    /// Standard deviation of the mutation noise
    pub mutation_rate: f32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 32,
            generations: 100,
            n_replace: 8,
            mutation_rate: 0.1,
        }
    }
}

impl EvolutionConfig {
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.population_size = population_size;
        self
    }

    pub fn with_generations(mut self, generations: usize) -> Self {
        self.generations = generations;
        self
    }

    pub fn with_n_replace(mut self, n_replace: usize) -> Self {
        self.n_replace = n_replace;
        self
    }

    pub fn with_mutation_rate(mut self, mutation_rate: f32) -> Self {
        self.mutation_rate = mutation_rate;
        self
    }

    /// Reject settings the loop cannot run with. `n_replace` larger than
    /// the population is allowed and clamped.
    pub fn validate(&self) -> Result<(), EvolutionError> {
        if self.population_size == 0 {
            return Err(EvolutionError::EmptyPopulation);
        }
        if !self.mutation_rate.is_finite() || self.mutation_rate < 0.0 {
            return Err(GenomeError::InvalidMutationRate(self.mutation_rate).into());
        }
        Ok(())
    }
}

/// Outcome of a run
#[derive(Clone, Debug)]
pub struct EvolutionResult {
    /// Last evaluated generation, best first
    pub population: Vec<PerceptronAgent>,
    /// Fitness matching `population`
    pub fitness: Vec<f32>,
    pub best_fitness_history: Vec<f32>,
    pub avg_fitness_history: Vec<f32>,
}

impl EvolutionResult {
    pub fn champion(&self) -> Option<(&PerceptronAgent, f32)> {
        self.population.first().zip(self.fitness.first().copied())
    }
}

/// Evolve `population` for `config.generations` generations
pub fn evolve<F, R>(
    population: Population,
    config: &EvolutionConfig,
    fitness_fn: F,
    rng: &mut R,
) -> Result<EvolutionResult, EvolutionError>
where
    F: FnMut(&[PerceptronAgent]) -> Vec<f32>,
    R: Rng + ?Sized,
{
    evolve_with_callback(population, config, fitness_fn, |_, _, _| {}, rng)
}

/// Evolve with a per-generation callback.
///
/// Each generation: score every agent with `fitness_fn`, report through
/// `callback(generation, agents, fitness)`, then run exactly one
/// replacement pass. The final generation is reported without a trailing
/// replacement, since its offspring would never be scored.
pub fn evolve_with_callback<F, C, R>(
    mut population: Population,
    config: &EvolutionConfig,
    mut fitness_fn: F,
    mut callback: C,
    rng: &mut R,
) -> Result<EvolutionResult, EvolutionError>
where
    F: FnMut(&[PerceptronAgent]) -> Vec<f32>,
    C: FnMut(usize, &[PerceptronAgent], &[f32]),
    R: Rng + ?Sized,
{
    config.validate()?;
    if population.len() != config.population_size {
        return Err(EvolutionError::SizeMismatch {
            population: population.len(),
            configured: config.population_size,
        });
    }

    let mut best_fitness_history = Vec::with_capacity(config.generations);
    let mut avg_fitness_history = Vec::with_capacity(config.generations);

    for gen in 0..config.generations {
        let fitness = fitness_fn(population.agents());
        population.set_fitness(fitness)?;

        let (best, avg) = summarize(population.fitness());
        best_fitness_history.push(best);
        avg_fitness_history.push(avg);
        callback(gen, population.agents(), population.fitness());

        if gen + 1 < config.generations {
            population.replace(config.n_replace, config.mutation_rate, rng)?;
        }
    }

    let (population, fitness): (Vec<_>, Vec<_>) = population.ranked().into_iter().unzip();

    Ok(EvolutionResult {
        population,
        fitness,
        best_fitness_history,
        avg_fitness_history,
    })
}

/// (best, average) of a fitness vector
pub fn summarize(fitness: &[f32]) -> (f32, f32) {
    let best = fitness.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
    let avg = fitness.iter().sum::<f32>() / fitness.len().max(1) as f32;
    (best, avg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use spymaster_core::Agent;

    /// Fitness that rewards a large weight on (card 15, mission feature)
    fn toy_fitness(agents: &[PerceptronAgent]) -> Vec<f32> {
        agents.iter().map(|a| a.genome().row(15)[48]).collect()
    }

    #[test]
    fn test_config_validation() {
        assert!(EvolutionConfig::default().validate().is_ok());
        assert!(matches!(
            EvolutionConfig::default().with_population_size(0).validate(),
            Err(EvolutionError::EmptyPopulation)
        ));
        assert!(EvolutionConfig::default().with_mutation_rate(-0.5).validate().is_err());
        assert!(EvolutionConfig::default().with_n_replace(1000).validate().is_ok());
    }

    #[test]
    fn test_history_and_callback() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let config = EvolutionConfig::default()
            .with_population_size(8)
            .with_generations(5)
            .with_n_replace(2);
        let population = Population::random(8, &mut rng);

        let mut seen = Vec::new();
        let result = evolve_with_callback(
            population,
            &config,
            toy_fitness,
            |gen, agents, fitness| {
                assert_eq!(agents.len(), 8);
                assert_eq!(fitness.len(), 8);
                seen.push(gen);
            },
            &mut rng,
        )
        .unwrap();

        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.best_fitness_history.len(), 5);
        assert_eq!(result.avg_fitness_history.len(), 5);
        assert_eq!(result.population.len(), 8);
        assert!(result.fitness.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_elitism_never_loses_the_best() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_generations(20)
            .with_n_replace(3)
            .with_mutation_rate(0.2);
        let population = Population::random(10, &mut rng);

        let result = evolve(population, &config, toy_fitness, &mut rng).unwrap();

        // The top agent is never replaced, so best fitness cannot drop
        let history = &result.best_fitness_history;
        assert!(history.windows(2).all(|w| w[1] >= w[0]), "{:?}", history);
        assert!(history[19] > history[0]);

        let (champion, fitness) = result.champion().unwrap();
        assert_eq!(champion.genome().row(15)[48], fitness);
        assert!(!champion.name().is_empty());
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let config = EvolutionConfig::default().with_population_size(5);
        let population = Population::random(3, &mut rng);
        assert!(matches!(
            evolve(population, &config, toy_fitness, &mut rng),
            Err(EvolutionError::SizeMismatch { population: 3, configured: 5 })
        ));
    }

    #[test]
    fn test_bad_fitness_length_surfaces() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = EvolutionConfig::default().with_population_size(4).with_generations(1);
        let population = Population::random(4, &mut rng);
        let result = evolve(population, &config, |_| vec![1.0], &mut rng);
        assert!(matches!(result, Err(EvolutionError::FitnessLength { .. })));
    }

    #[test]
    fn test_summarize() {
        assert_eq!(summarize(&[1.0, 3.0, 2.0]), (3.0, 2.0));
    }
}
