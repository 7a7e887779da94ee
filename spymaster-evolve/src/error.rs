//! Error types for genomes and the generational loop

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenomeError {
    #[error("invalid genome shape {rows}x{cols}, expected 16x51")]
    InvalidGenome { rows: usize, cols: usize },

    #[error("mutation rate must be finite and non-negative, got {0}")]
    InvalidMutationRate(f32),

    #[error("genome file: {0}")]
    Io(#[from] std::io::Error),

    #[error("genome json: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum EvolutionError {
    #[error("population must hold at least one agent")]
    EmptyPopulation,

    #[error("population has {population} agents but config expects {configured}")]
    SizeMismatch { population: usize, configured: usize },

    #[error("fitness vector has {got} entries for {expected} agents")]
    FitnessLength { expected: usize, got: usize },

    #[error(transparent)]
    Genome(#[from] GenomeError),
}
