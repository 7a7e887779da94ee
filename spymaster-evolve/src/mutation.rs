//! Mutation operators
//!
//! Reproduction is asexual: an offspring is its parent's genome plus
//! independent zero-mean Gaussian noise on every weight.

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::error::GenomeError;
use crate::genome::Genome;

/// Offspring of `parent` with N(0, rate) noise added element-wise.
///
/// A rate of zero yields an exact copy. Negative or non-finite rates are
/// rejected.
pub fn mutate_genome<R: Rng + ?Sized>(
    parent: &Genome,
    rate: f32,
    rng: &mut R,
) -> Result<Genome, GenomeError> {
    if !rate.is_finite() || rate < 0.0 {
        return Err(GenomeError::InvalidMutationRate(rate));
    }

    let mut child = parent.clone();
    if rate == 0.0 {
        return Ok(child);
    }

    let noise = Normal::new(0.0f32, rate).map_err(|_| GenomeError::InvalidMutationRate(rate))?;
    for weight in child.weights_mut() {
        *weight += noise.sample(rng);
    }
    Ok(child)
}
