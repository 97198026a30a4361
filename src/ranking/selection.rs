//! Parent selection over a ranked side table.
//!
//! # References
//!
//! - Deb et al. (2002), crowded-comparison operator
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::truncation::Ranked;
use rand::Rng;
use std::cmp::Ordering;

/// Crowded-comparison operator.
///
/// Lower rank wins; within the same rank the larger crowding distance wins.
/// `Less` means `a` is preferred.
pub fn crowded_compare(a: &Ranked, b: &Ranked) -> Ordering {
    a.rank
        .cmp(&b.rank)
        .then_with(|| b.crowding_distance.total_cmp(&a.crowding_distance))
}

/// Selection strategy for choosing parents from a ranked population.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
/// use u_moea::dominance::ParetoDominance;
/// use u_moea::ranking::{assign_rank_and_crowding, Selection};
///
/// let objs = vec![vec![1.0, 2.0], vec![2.0, 1.0], vec![3.0, 3.0]];
/// let ranked = assign_rank_and_crowding(&objs, &ParetoDominance);
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let parent = Selection::Tournament(2).select(&ranked, &mut rng);
/// assert!(parent < objs.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Pick `k` members uniformly at random, keep the best under
    /// [`crowded_compare`]. Binary tournament (`k = 2`) is the NSGA-II
    /// default.
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Uniform random choice, no selection pressure.
    Random,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(2)
    }
}

impl Selection {
    /// Select a parent from `ranked`, returning its `index` field (the
    /// position of the solution in the slice that was ranked).
    ///
    /// # Panics
    /// Panics if `ranked` is empty.
    pub fn select<R: Rng>(&self, ranked: &[Ranked], rng: &mut R) -> usize {
        assert!(!ranked.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(ranked, *k, rng),
            Selection::Random => ranked[rng.random_range(0..ranked.len())].index,
        }
    }
}

/// Tournament selection: pick k random rows, return the crowded-best.
fn tournament<R: Rng>(ranked: &[Ranked], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = ranked.len();

    let mut best = &ranked[rng.random_range(0..n)];
    for _ in 1..k {
        let challenger = &ranked[rng.random_range(0..n)];
        if crowded_compare(challenger, best) == Ordering::Less {
            best = challenger;
        }
    }
    best.index
}
