//! Epsilon-box dominance archive.

use super::types::{AddOutcome, Archive, ArchiveStats, Dimensions};
use crate::dominance::{Dominance, EpsilonBoxDominance};
use crate::error::{MoeaError, MoeaResult};
use crate::solution::{Epsilons, Evaluated, Solution};

/// Bounded approximation set maintained with epsilon-box dominance.
///
/// Objective space is cut into boxes of width `eps_i` per objective.
/// The archive keeps at most one solution per box and never two solutions
/// whose boxes dominate one another, so for a bounded objective range its
/// size is bounded by the number of non-dominated boxes, independent of
/// how many solutions are offered.
///
/// # Adding a candidate
///
/// The candidate is compared with every retained solution:
///
/// 1. If a retained solution box-dominates it, it is rejected.
/// 2. If it shares a box with a retained solution, the one whose residual
///    (sum over objectives of `f_i / eps_i - floor(f_i / eps_i)`) is smaller
///    stays; on equal residuals the retained solution stays.
/// 3. Every retained solution the candidate box-dominates is evicted.
/// 4. Otherwise it simply joins the archive.
///
/// # Concurrency
///
/// `add` is a compare-then-mutate sequence and must not interleave. Wrap
/// the archive in a [`SharedArchive`](super::SharedArchive) when several
/// evaluators report results concurrently.
///
/// # Example
///
/// ```
/// use u_moea::archive::{AddOutcome, EpsilonBoxArchive};
/// use u_moea::solution::{Epsilons, Solution};
///
/// let mut archive = EpsilonBoxArchive::new(Epsilons::uniform(1.0).unwrap());
/// for objs in [[0.0, 10.0], [1.0, 9.0], [2.0, 8.0], [5.0, 5.0], [10.0, 0.0]] {
///     assert!(archive.add(Solution::from_objectives(objs)).is_added());
/// }
/// assert_eq!(archive.len(), 5);
///
/// // Same box as (0, 10) but farther from the box corner.
/// let outcome = archive.add(Solution::from_objectives([0.5, 10.5]));
/// assert_eq!(outcome, AddOutcome::Rejected);
/// assert_eq!(archive.len(), 5);
/// ```
#[derive(Debug, Clone)]
pub struct EpsilonBoxArchive {
    comparator: EpsilonBoxDominance,
    solutions: Vec<Solution>,
    dimensions: Dimensions,
    stats: ArchiveStats,
}

impl EpsilonBoxArchive {
    /// Creates an empty archive. Objective and constraint widths are fixed
    /// by the first solution offered.
    pub fn new(epsilons: Epsilons) -> Self {
        Self {
            comparator: EpsilonBoxDominance::new(epsilons),
            solutions: Vec::new(),
            dimensions: Dimensions::default(),
            stats: ArchiveStats::default(),
        }
    }

    /// Creates an empty archive with fixed objective and constraint widths.
    ///
    /// # Errors
    ///
    /// [`MoeaError::EpsilonWidthMismatch`] if `epsilons` has more values
    /// than `objectives`.
    pub fn with_dimensions(
        epsilons: Epsilons,
        objectives: usize,
        constraints: usize,
    ) -> MoeaResult<Self> {
        if !epsilons.fits(objectives) {
            return Err(MoeaError::EpsilonWidthMismatch {
                epsilons: epsilons.len(),
                objectives,
            });
        }
        let mut archive = Self::new(epsilons);
        archive.dimensions = Dimensions::fixed(objectives, constraints);
        Ok(archive)
    }

    /// The tolerances defining the boxes.
    pub fn epsilons(&self) -> &Epsilons {
        self.comparator.epsilons()
    }

    /// Established objective width, if any solution has been offered.
    pub fn objective_count(&self) -> Option<usize> {
        self.dimensions.objectives()
    }

    /// Number of retained solutions.
    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    /// Returns `true` if nothing is retained.
    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// Iterates over retained solutions in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Solution> {
        self.solutions.iter()
    }

    /// Lifetime counters.
    pub fn stats(&self) -> ArchiveStats {
        self.stats
    }

    /// Removes every retained solution. Established widths and counters
    /// are kept.
    pub fn clear(&mut self) {
        self.solutions.clear();
    }

    /// Offers `candidate` to the archive.
    ///
    /// # Panics
    ///
    /// Panics if the candidate's objective or constraint count differs from
    /// the established width, or if the epsilons are wider than its
    /// objective vector. See [`try_add`](Self::try_add).
    pub fn add(&mut self, candidate: Solution) -> AddOutcome {
        self.try_add(candidate).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Offers `candidate` to the archive.
    ///
    /// # Errors
    ///
    /// [`MoeaError::EpsilonWidthMismatch`],
    /// [`MoeaError::ObjectiveCountMismatch`] or
    /// [`MoeaError::ConstraintCountMismatch`]; the archive is unchanged.
    pub fn try_add(&mut self, candidate: Solution) -> MoeaResult<AddOutcome> {
        let m = candidate.objective_count();
        if !self.epsilons().fits(m) {
            return Err(MoeaError::EpsilonWidthMismatch {
                epsilons: self.epsilons().len(),
                objectives: m,
            });
        }
        self.dimensions.check(&candidate)?;
        self.stats.offered += 1;

        let mut evicted = Vec::new();
        let mut same_box_only = false;

        for (i, retained) in self.solutions.iter().enumerate() {
            let cmp = self.comparator.compare_boxes(&candidate, retained);
            match cmp.dominance {
                Dominance::Right => {
                    tracing::trace!(retained = i, "candidate box-dominated; rejected");
                    return Ok(AddOutcome::Rejected);
                }
                Dominance::Left => evicted.push(i),
                Dominance::Neither if cmp.same_box => {
                    let eps = self.comparator.epsilons();
                    if eps.residual(retained.objectives()) <= eps.residual(candidate.objectives())
                    {
                        tracing::trace!(retained = i, "candidate lost same-box tie; rejected");
                        return Ok(AddOutcome::Rejected);
                    }
                    evicted.push(i);
                    same_box_only = true;
                }
                Dominance::Neither => {}
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
        // A same-box replacement evicts exactly the box occupant.
        if !(same_box_only && replaced == 1) {
            self.stats.dominating_improvements += 1;
        }

        Ok(AddOutcome::Added { replaced })
    }
}

impl Archive for EpsilonBoxArchive {
    fn try_add(&mut self, solution: Solution) -> MoeaResult<AddOutcome> {
        EpsilonBoxArchive::try_add(self, solution)
    }

    fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    fn stats(&self) -> ArchiveStats {
        self.stats
    }
}

impl<'a> IntoIterator for &'a EpsilonBoxArchive {
    type Item = &'a Solution;
    type IntoIter = std::slice::Iter<'a, Solution>;

    fn into_iter(self) -> Self::IntoIter {
        self.solutions.iter()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dominance::{DominanceComparator, ParetoDominance};

    fn archive(eps: f64) -> EpsilonBoxArchive {
        EpsilonBoxArchive::new(Epsilons::uniform(eps).unwrap())
    }

    fn sol(objs: &[f64]) -> Solution {
        Solution::from_objectives(objs.to_vec())
    }

    fn contents(a: &EpsilonBoxArchive) -> Vec<Vec<f64>> {
        let mut m = a.objectives_matrix();
        m.sort_by(|x, y| x.partial_cmp(y).unwrap());
        m
    }

    // ---- Diagonal scenario ----

    #[test]
    fn test_diagonal_scenario() {
        let mut a = archive(1.0);
        for objs in [[0.0, 10.0], [1.0, 9.0], [2.0, 8.0], [5.0, 5.0], [10.0, 0.0]] {
            assert_eq!(a.add(sol(&objs)), AddOutcome::Added { replaced: 0 });
        }
        assert_eq!(a.len(), 5);

        assert_eq!(a.add(sol(&[0.5, 10.5])), AddOutcome::Rejected);
        assert_eq!(a.len(), 5);
    }

    // ---- Dominance ----

    #[test]
    fn test_box_dominated_candidate_rejected() {
        let mut a = archive(1.0);
        a.add(sol(&[1.0, 1.0]));
        assert_eq!(a.add(sol(&[2.5, 1.5])), AddOutcome::Rejected);
        assert_eq!(a.stats().offered, 2);
        assert_eq!(a.stats().improvements, 1);
    }

    #[test]
    fn test_dominating_candidate_replaces_all() {
        let mut a = archive(1.0);
        a.add(sol(&[2.0, 5.0]));
        a.add(sol(&[3.0, 3.0]));
        a.add(sol(&[5.0, 2.0]));
        a.add(sol(&[0.0, 9.0]));
        let outcome = a.add(sol(&[1.0, 1.0]));
        assert_eq!(outcome, AddOutcome::Added { replaced: 3 });
        assert_eq!(contents(&a), vec![vec![0.0, 9.0], vec![1.0, 1.0]]);
    }

    #[test]
    fn test_eviction_preserves_order_of_survivors() {
        let mut a = archive(1.0);
        a.add(sol(&[0.0, 9.0]));
        a.add(sol(&[3.0, 3.0]));
        a.add(sol(&[9.0, 0.0]));
        a.add(sol(&[2.0, 2.0]));
        let order: Vec<Vec<f64>> = a.iter().map(|s| s.objectives().to_vec()).collect();
        assert_eq!(order, vec![vec![0.0, 9.0], vec![9.0, 0.0], vec![2.0, 2.0]]);
    }

    // ---- Same-box ties ----

    #[test]
    fn test_same_box_closer_to_corner_wins() {
        let mut a = archive(1.0);
        a.add(sol(&[0.6, 0.6]));
        let outcome = a.add(sol(&[0.1, 0.2]));
        assert_eq!(outcome, AddOutcome::Added { replaced: 1 });
        assert_eq!(contents(&a), vec![vec![0.1, 0.2]]);
        assert_eq!(a.stats().improvements, 2);
        assert_eq!(a.stats().dominating_improvements, 1);
    }

    #[test]
    fn test_same_box_nondominated_tie_uses_residual() {
        // Neither Pareto-dominates the other; residuals 0.9+0.05 vs 0.3+0.3.
        let mut a = archive(1.0);
        a.add(sol(&[0.9, 0.05]));
        assert!(a.add(sol(&[0.3, 0.3])).is_added());
        assert_eq!(contents(&a), vec![vec![0.3, 0.3]]);
        assert_eq!(a.add(sol(&[0.05, 0.9])), AddOutcome::Rejected);
    }

    #[test]
    fn test_same_box_equal_residual_keeps_retained() {
        let mut a = archive(1.0);
        a.add(sol(&[0.25, 0.75]));
        assert_eq!(a.add(sol(&[0.75, 0.25])), AddOutcome::Rejected);
        assert_eq!(contents(&a), vec![vec![0.25, 0.75]]);
    }

    #[test]
    fn test_readding_is_idempotent() {
        let mut a = archive(0.5);
        let items = [[0.1, 3.3], [1.2, 1.9], [2.7, 0.4]];
        for objs in items {
            a.add(sol(&objs));
        }
        let before = contents(&a);
        for objs in items {
            assert_eq!(a.add(sol(&objs)), AddOutcome::Rejected);
        }
        assert_eq!(contents(&a), before);
    }

    // ---- Invariants ----

    #[test]
    fn test_retained_boxes_distinct_and_nondominated() {
        let mut a = archive(0.25);
        let mut x = 0.0f64;
        for i in 0..400 {
            x = (x + 0.6180339887) % 1.0;
            let y = ((i as f64) * 0.37).sin().abs();
            a.add(sol(&[x, 1.0 - x + 0.3 * y]));
        }
        let eps = a.epsilons().clone();
        let boxes: Vec<Vec<i64>> = a.iter().map(|s| eps.box_index(s.objectives())).collect();
        for i in 0..boxes.len() {
            for j in 0..boxes.len() {
                if i != j {
                    assert_ne!(boxes[i], boxes[j]);
                    assert!(!ParetoDominance.dominates(&boxes_f(&boxes[i]), &boxes_f(&boxes[j])));
                }
            }
        }
        // At most one box per column of a 0.25 grid over [0, 1).
        assert!(a.len() <= 8, "archive grew to {}", a.len());
    }

    fn boxes_f(b: &[i64]) -> Vec<f64> {
        b.iter().map(|&v| v as f64).collect()
    }

    #[test]
    fn test_constraint_tier_applies() {
        let mut a = archive(1.0);
        a.add(sol(&[0.0, 0.0]).with_constraints([0.5]));
        assert_eq!(
            a.add(sol(&[5.0, 5.0]).with_constraints([0.0])),
            AddOutcome::Added { replaced: 1 }
        );
        assert_eq!(
            a.add(sol(&[0.0, 0.0]).with_constraints([0.1])),
            AddOutcome::Rejected
        );
    }

    // ---- Dimensions ----

    #[test]
    fn test_try_add_dimension_mismatch() {
        let mut a = archive(1.0);
        a.add(sol(&[1.0, 2.0]));
        assert_eq!(
            a.try_add(sol(&[1.0, 2.0, 3.0])),
            Err(MoeaError::ObjectiveCountMismatch {
                expected: 2,
                actual: 3
            })
        );
        assert_eq!(a.len(), 1);
        assert_eq!(a.stats().offered, 1);
    }

    #[test]
    #[should_panic(expected = "objective count mismatch")]
    fn test_add_dimension_mismatch_panics() {
        let mut a = archive(1.0);
        a.add(sol(&[1.0, 2.0]));
        a.add(sol(&[1.0]));
    }

    #[test]
    fn test_epsilons_wider_than_objectives() {
        let mut a = EpsilonBoxArchive::new(Epsilons::new(vec![0.1, 0.1, 0.1]).unwrap());
        assert_eq!(
            a.try_add(sol(&[1.0, 2.0])),
            Err(MoeaError::EpsilonWidthMismatch {
                epsilons: 3,
                objectives: 2
            })
        );
        assert_eq!(a.objective_count(), None);
    }

    #[test]
    fn test_with_dimensions() {
        let eps = Epsilons::new(vec![0.1, 0.2]).unwrap();
        assert!(EpsilonBoxArchive::with_dimensions(eps.clone(), 1, 0).is_err());

        let mut a = EpsilonBoxArchive::with_dimensions(eps, 3, 1).unwrap();
        assert_eq!(a.objective_count(), Some(3));
        assert!(a.try_add(sol(&[1.0, 2.0, 3.0])).is_err());
        assert!(a.try_add(sol(&[1.0, 2.0, 3.0]).with_constraints([0.0])).is_ok());
    }

    // ---- Export ----

    #[test]
    fn test_export_and_clear() {
        let mut a = archive(1.0);
        a.add(sol(&[0.0, 1.0]));
        a.add(sol(&[1.0, 0.0]));
        let records = a.export();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].objectives, vec![0.0, 1.0]);
        assert_eq!((&a).into_iter().count(), 2);

        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.stats().improvements, 2);
    }
}
