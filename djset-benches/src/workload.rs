//! Seeded random relation workloads.

use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::params::MergeBenchParams;

/// Draws `params.relation_count` random pairs over `0..params.element_count`.
///
/// The same `seed` always yields the same pairs. An empty universe yields no
/// pairs.
#[must_use]
pub fn random_relations(params: MergeBenchParams, seed: u64) -> Vec<(usize, usize)> {
    if params.element_count == 0 {
        return Vec::new();
    }
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..params.relation_count)
        .map(|_| {
            (
                rng.gen_range(0..params.element_count),
                rng.gen_range(0..params.element_count),
            )
        })
        .collect()
}
