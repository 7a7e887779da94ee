//! Selection operators for the generational loop
//!
//! Ranking is ascending by fitness with ties kept in population order.
//! Replacement overwrites the weakest agents with offspring of the
//! strongest, pairing rank i from the bottom with rank i from the top.

use std::cmp::Ordering;

/// Population indices ordered from worst to best fitness.
///
/// NaN fitness ranks below every number.
pub fn rank_ascending(fitness: &[f32]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| compare_fitness(fitness[a], fitness[b]));
    indices
}

/// Select the top N individuals by fitness (elitism).
///
/// Returns indices of the best individuals, sorted by fitness (descending).
/// Ties keep population order.
pub fn select_elite(fitness: &[f32], n: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..fitness.len()).collect();
    indices.sort_by(|&a, &b| compare_fitness(fitness[b], fitness[a]));
    indices.truncate(n);
    indices
}

/// One slot to overwrite and the agent whose offspring fills it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Replacement {
    pub replaced: usize,
    pub parent: usize,
}

/// Mirror-paired replacement plan for `n_replace` slots.
///
/// The i-th worst slot receives an offspring of the i-th best agent.
/// `n_replace` is clamped to the population size. Parents are always read
/// from the population as it was before any slot is overwritten.
pub fn replacement_plan(fitness: &[f32], n_replace: usize) -> Vec<Replacement> {
    let ranked = rank_ascending(fitness);
    let n = ranked.len();
    (0..n_replace.min(n))
        .map(|i| Replacement {
            replaced: ranked[i],
            parent: ranked[n - 1 - i],
        })
        .collect()
}

fn compare_fitness(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_ascending() {
        let fitness = vec![0.5, 0.9, 0.3, 0.7, 0.1];
        assert_eq!(rank_ascending(&fitness), vec![4, 2, 0, 3, 1]);
    }

    #[test]
    fn test_rank_ties_keep_order() {
        let fitness = vec![1.0, 0.0, 1.0, 0.0];
        assert_eq!(rank_ascending(&fitness), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_nan_ranks_last() {
        let fitness = vec![2.0, f32::NAN, -3.0];
        assert_eq!(rank_ascending(&fitness), vec![1, 2, 0]);
    }

    #[test]
    fn test_select_elite() {
        let fitness = vec![0.5, 0.9, 0.3, 0.7, 0.1];
        let elite = select_elite(&fitness, 3);

        assert_eq!(elite.len(), 3);
        assert_eq!(elite[0], 1); // 0.9
        assert_eq!(elite[1], 3); // 0.7
        assert_eq!(elite[2], 0); // 0.5
    }

    #[test]
    fn test_select_elite_handles_small_pop() {
        let fitness = vec![0.5, 0.9];
        let elite = select_elite(&fitness, 5);

        assert_eq!(elite.len(), 2); // Can't select more than population
    }

    #[test]
    fn test_mirror_pairing() {
        let fitness = vec![9.0, 1.0, 5.0, 3.0, 8.0, 2.0, 7.0, 0.0, 6.0, 4.0];
        let plan = replacement_plan(&fitness, 2);
        assert_eq!(
            plan,
            vec![
                Replacement { replaced: 7, parent: 0 }, // 0 <- 9
                Replacement { replaced: 1, parent: 4 }, // 1 <- 8
            ]
        );
    }

    #[test]
    fn test_plan_clamped_to_population() {
        let fitness = vec![1.0, 2.0, 3.0];
        let plan = replacement_plan(&fitness, 10);
        assert_eq!(plan.len(), 3);
        assert_eq!(plan[1], Replacement { replaced: 1, parent: 1 });
        assert!(replacement_plan(&fitness, 0).is_empty());
    }
}
