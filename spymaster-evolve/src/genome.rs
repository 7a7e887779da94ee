//! Perceptron weight matrix
//!
//! One row per playable card (16), one column per input feature (51):
//!
//! | columns | feature                           |
//! |---------|-----------------------------------|
//! | 0..16   | own hand, one bit per card        |
//! | 16..32  | opponent hand, one bit per card   |
//! | 32..48  | remaining missions 1..=16         |
//! | 48      | current mission value             |
//! | 49      | own score                         |
//! | 50      | opponent score                    |
//!
//! The shape is checked whenever a genome is built from outside data and
//! never changes afterwards.

use std::fs;
use std::path::Path;

use rand::Rng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use spymaster_core::{Card, HAND_SIZE};

use crate::error::GenomeError;

/// Rows: one per card 0..=15
pub const CARDS: usize = HAND_SIZE;

/// Columns: 16 + 16 + 16 + 1 + 1 + 1
pub const FEATURES: usize = 51;

/// Column holding the current mission value
pub const MISSION_FEATURE: usize = 48;

/// Column holding the player's own score; the opponent's follows it
pub const SCORE_FEATURE: usize = 49;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f32>>", into = "Vec<Vec<f32>>")]
pub struct Genome {
    /// Row-major, `CARDS * FEATURES` entries
    weights: Vec<f32>,
}

impl Genome {
    /// Standard-normal weights
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let weights = (0..CARDS * FEATURES)
            .map(|_| rng.sample::<f32, _>(StandardNormal))
            .collect();
        Self { weights }
    }

    /// All-zero weights
    pub fn zeros() -> Self {
        Self {
            weights: vec![0.0; CARDS * FEATURES],
        }
    }

    /// Build from 16 rows of 51 weights
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Self, GenomeError> {
        if rows.len() != CARDS {
            let cols = rows.first().map_or(0, Vec::len);
            return Err(GenomeError::InvalidGenome {
                rows: rows.len(),
                cols,
            });
        }
        if let Some(bad) = rows.iter().find(|row| row.len() != FEATURES) {
            return Err(GenomeError::InvalidGenome {
                rows: rows.len(),
                cols: bad.len(),
            });
        }
        Ok(Self {
            weights: rows.into_iter().flatten().collect(),
        })
    }

    /// Build from a flat row-major slice
    pub fn from_flat(weights: Vec<f32>) -> Result<Self, GenomeError> {
        if weights.len() != CARDS * FEATURES {
            return Err(GenomeError::InvalidGenome {
                rows: weights.len() / FEATURES,
                cols: FEATURES,
            });
        }
        Ok(Self { weights })
    }

    /// Weights scoring `card`
    pub fn row(&self, card: Card) -> &[f32] {
        let start = card as usize * FEATURES;
        &self.weights[start..start + FEATURES]
    }

    /// Set a single weight
    pub fn set(&mut self, card: Card, feature: usize, value: f32) {
        self.weights[card as usize * FEATURES + feature] = value;
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    pub(crate) fn weights_mut(&mut self) -> &mut [f32] {
        &mut self.weights
    }

    pub fn to_rows(&self) -> Vec<Vec<f32>> {
        self.weights.chunks(FEATURES).map(<[f32]>::to_vec).collect()
    }

    /// Write as pretty JSON (16 arrays of 51 numbers)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), GenomeError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, GenomeError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl TryFrom<Vec<Vec<f32>>> for Genome {
    type Error = GenomeError;

    fn try_from(rows: Vec<Vec<f32>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<Genome> for Vec<Vec<f32>> {
    fn from(genome: Genome) -> Self {
        genome.to_rows()
    }
}
