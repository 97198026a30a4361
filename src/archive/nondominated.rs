//! Unbounded non-dominated archive.

use super::types::{AddOutcome, Archive, ArchiveStats, Dimensions};
use crate::dominance::{AnyDominance, Dominance, DominanceComparator};
use crate::error::MoeaResult;
use crate::solution::{Evaluated, Solution};

/// Default Euclidean distance below which two objective vectors are treated
/// as the same point.
pub(crate) const DEFAULT_DUPLICATE_TOLERANCE: f64 = 1e-10;

/// Set of mutually non-dominated solutions under any [`AnyDominance`].
///
/// Unlike [`EpsilonBoxArchive`](super::EpsilonBoxArchive) the size is not
/// bounded; use it when the front is expected to stay small or when exact
/// dominance matters more than memory.
///
/// A candidate is rejected if a retained solution dominates it or lies within
/// `duplicate_tolerance` of it in objective space. Otherwise every retained
/// solution it dominates is evicted and the candidate is appended.
///
/// # Example
///
/// ```
/// use u_moea::archive::{Archive, NondominatedArchive};
/// use u_moea::solution::Solution;
///
/// let mut archive = NondominatedArchive::default();
/// archive.add(Solution::from_objectives([1.0, 3.0]));
/// archive.add(Solution::from_objectives([3.0, 1.0]));
/// archive.add(Solution::from_objectives([2.0, 2.0]));
/// archive.add(Solution::from_objectives([0.5, 0.5]));
/// assert_eq!(archive.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct NondominatedArchive {
    comparator: AnyDominance,
    duplicate_tolerance: f64,
    solutions: Vec<Solution>,
    dimensions: Dimensions,
    stats: ArchiveStats,
}

impl Default for NondominatedArchive {
    fn default() -> Self {
        Self::new(AnyDominance::default())
    }
}

impl NondominatedArchive {
    /// Creates an empty archive using `comparator` and the default duplicate
    /// tolerance.
    pub fn new(comparator: AnyDominance) -> Self {
        Self {
            comparator,
            duplicate_tolerance: DEFAULT_DUPLICATE_TOLERANCE,
            solutions: Vec::new(),
            dimensions: Dimensions::default(),
            stats: ArchiveStats::default(),
        }
    }

    /// Sets the duplicate tolerance. Zero keeps exact copies.
    pub fn with_duplicate_tolerance(mut self, tolerance: f64) -> Self {
        self.duplicate_tolerance = tolerance;
        self
    }

    /// The dominance relation in use.
    pub fn comparator(&self) -> &AnyDominance {
        &self.comparator
    }

    /// The duplicate tolerance in use.
    pub fn duplicate_tolerance(&self) -> f64 {
        self.duplicate_tolerance
    }

    /// Iterates over retained solutions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    fn is_duplicate(&self, a: &Solution, b: &Solution) -> bool {
        let dist_sq: f64 = a
            .objectives()
            .iter()
            .zip(b.objectives())
            .map(|(x, y)| (x - y) * (x - y))
            .sum();
        dist_sq.sqrt() < self.duplicate_tolerance
    }
}

impl Archive for NondominatedArchive {
    fn try_add(&mut self, candidate: Solution) -> MoeaResult<AddOutcome> {
        self.dimensions.check(&candidate)?;
        self.stats.offered += 1;

        let mut evicted = Vec::new();
        for (i, retained) in self.solutions.iter().enumerate() {
            match self.comparator.compare(&candidate, retained) {
                Dominance::Right => {
                    tracing::trace!(retained = i, "candidate dominated; rejected");
                    return Ok(AddOutcome::Rejected);
                }
                Dominance::Left => evicted.push(i),
                Dominance::Neither => {
                    if self.is_duplicate(&candidate, retained) {
                        tracing::trace!(retained = i, "candidate duplicates entry; rejected");
                        return Ok(AddOutcome::Rejected);
                    }
                }
            }
        }

        let replaced = evicted.len();
        if replaced > 0 {
            let mut k = 0;
            self.solutions.retain(|_| {
                let keep = evicted.binary_search(&k).is_err();
                k += 1;
                keep
            });
            tracing::debug!(replaced, size = self.solutions.len(), "archive entries evicted");
        }

        self.solutions.push(candidate);
        self.stats.improvements += 1;
        self.stats.dominating_improvements += 1;
        Ok(AddOutcome::Added { replaced })
    }

    fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    fn stats(&self) -> ArchiveStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a NondominatedArchive {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::{ConstrainedDominance, LexicographicDominance};
    use crate::error::MoeaError;

    fn sol(objs: &[f64]) -> Solution {
        Solution::from_objectives(objs.to_vec())
    }

    // ---- Pareto ----

    #[test]
    fn test_keeps_mutually_nondominated() {
        let mut a = NondominatedArchive::default();
        let accepted = a.add_all([
            sol(&[1.0, 4.0]),
            sol(&[2.0, 3.0]),
            sol(&[3.0, 2.0]),
            sol(&[4.0, 1.0]),
            sol(&[3.0, 3.0]),
        ]);
        assert_eq!(accepted, 4);
        assert_eq!(a.len(), 4);
        assert_eq!(a.stats().offered, 5);
    }

    #[test]
    fn test_dominating_candidate_evicts() {
        let mut a = NondominatedArchive::default();
        a.add(sol(&[2.0, 3.0]));
        a.add(sol(&[3.0, 2.0]));
        a.add(sol(&[0.0, 9.0]));
        assert_eq!(a.add(sol(&[1.0, 1.0])), AddOutcome::Added { replaced: 2 });
        assert_eq!(a.objectives_matrix(), vec![vec![0.0, 9.0], vec![1.0, 1.0]]);
    }

    // ---- Duplicates ----

    #[test]
    fn test_exact_duplicate_rejected() {
        let mut a = NondominatedArchive::default();
        a.add(sol(&[1.0, 2.0]));
        assert_eq!(a.add(sol(&[1.0, 2.0])), AddOutcome::Rejected);
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_near_duplicate_tolerance() {
        let mut a = NondominatedArchive::default().with_duplicate_tolerance(0.1);
        a.add(sol(&[1.0, 2.0]));
        assert_eq!(a.add(sol(&[1.05, 1.96])), AddOutcome::Rejected);
        assert!(a.add(sol(&[1.2, 1.7])).is_added());
    }

    #[test]
    fn test_zero_tolerance_keeps_exact_copies() {
        let mut a = NondominatedArchive::default().with_duplicate_tolerance(0.0);
        a.add(sol(&[1.0, 2.0]));
        assert!(a.add(sol(&[1.0, 2.0])).is_added());
        assert_eq!(a.len(), 2);
    }

    // ---- Other relations ----

    #[test]
    fn test_constrained_relation() {
        let mut a = NondominatedArchive::new(AnyDominance::Constrained(ConstrainedDominance));
        a.add(sol(&[0.0, 0.0]).with_constraints([1.0]));
        assert_eq!(
            a.add(sol(&[9.0, 9.0]).with_constraints([0.0])),
            AddOutcome::Added { replaced: 1 }
        );
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn test_lexicographic_relation_keeps_single_best() {
        let mut a = NondominatedArchive::new(AnyDominance::Lexicographic(LexicographicDominance));
        a.add(sol(&[1.0, 0.0]));
        a.add(sol(&[0.0, 1.0]));
        a.add(sol(&[0.0, 5.0]));
        assert_eq!(a.objectives_matrix(), vec![vec![0.0, 1.0]]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut a = NondominatedArchive::default();
        a.add(sol(&[1.0, 2.0]));
        assert_eq!(
            a.try_add(sol(&[1.0])),
            Err(MoeaError::ObjectiveCountMismatch {
                expected: 2,
                actual: 1
            })
        );
        assert_eq!((&a).into_iter().count(), 1);
    }
}
