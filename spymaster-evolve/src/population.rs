//! Population of evolved agents
//!
//! A fixed-size ordered list of agents plus the fitness from the most
//! recent tournament. Replacement swaps whole agents; genomes are never
//! edited in place.

use rand::Rng;
use spymaster_core::Agent;

use crate::error::{EvolutionError, GenomeError};
use crate::perceptron::PerceptronAgent;
use crate::selection::{replacement_plan, select_elite, Replacement};

#[derive(Clone, Debug)]
pub struct Population {
    agents: Vec<PerceptronAgent>,
    fitness: Vec<f32>,
}

impl Population {
    /// `size` agents with standard-normal genomes
    pub fn random<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        let agents = (0..size).map(|_| PerceptronAgent::random(rng)).collect();
        Self::from_agents(agents)
    }

    pub fn from_agents(agents: Vec<PerceptronAgent>) -> Self {
        let fitness = vec![0.0; agents.len()];
        Self { agents, fitness }
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn agents(&self) -> &[PerceptronAgent] {
        &self.agents
    }

    /// Fitness from the last `set_fitness`, zeros before that
    pub fn fitness(&self) -> &[f32] {
        &self.fitness
    }

    pub fn set_fitness(&mut self, fitness: Vec<f32>) -> Result<(), EvolutionError> {
        if fitness.len() != self.agents.len() {
            return Err(EvolutionError::FitnessLength {
                expected: self.agents.len(),
                got: fitness.len(),
            });
        }
        self.fitness = fitness;
        Ok(())
    }

    /// Agents with their fitness, best first
    pub fn ranked(&self) -> Vec<(PerceptronAgent, f32)> {
        select_elite(&self.fitness, self.agents.len())
            .into_iter()
            .map(|i| (self.agents[i].clone(), self.fitness[i]))
            .collect()
    }

    /// Overwrite the `n_replace` weakest agents with mutated offspring of
    /// the strongest, mirror-paired by rank.
    ///
    /// Every offspring is bred from the population as it stood before the
    /// call, so a parent replaced earlier in the same pass still breeds
    /// from its old genome. Replaced slots get fitness 0 until the next
    /// tournament.
    pub fn replace<R: Rng + ?Sized>(
        &mut self,
        n_replace: usize,
        mutation_rate: f32,
        rng: &mut R,
    ) -> Result<Vec<Replacement>, GenomeError> {
        let plan = replacement_plan(&self.fitness, n_replace);

        let offspring = plan
            .iter()
            .map(|r| self.agents[r.parent].create_offspring(mutation_rate, rng))
            .collect::<Result<Vec<_>, _>>()?;

        for (r, child) in plan.iter().zip(offspring) {
            tracing::debug!(
                replaced = %self.agents[r.replaced].name(),
                parent = %self.agents[r.parent].name(),
                child = %child.name(),
                "replacement"
            );
            self.agents[r.replaced] = child;
            self.fitness[r.replaced] = 0.0;
        }

        Ok(plan)
    }
}
