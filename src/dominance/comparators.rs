//! Concrete dominance comparators.

use super::types::{pareto_dominance, Dominance, DominanceComparator};
use crate::solution::{Epsilons, Evaluated};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Plain Pareto dominance on raw objective values. Constraints are ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParetoDominance;

impl DominanceComparator for ParetoDominance {
    fn compare<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> Dominance {
        pareto_dominance(a.objectives(), b.objectives())
    }
}

/// Feasibility and total-violation tier shared by the constraint-aware
/// comparators. `None` means the tier is tied and objectives decide.
fn constraint_tier<S: Evaluated + ?Sized>(a: &S, b: &S) -> Option<Dominance> {
    match (a.is_feasible(), b.is_feasible()) {
        (true, true) => None,
        (true, false) => Some(Dominance::Left),
        (false, true) => Some(Dominance::Right),
        (false, false) => {
            let va = a.total_violation();
            let vb = b.total_violation();
            if va < vb {
                Some(Dominance::Left)
            } else if vb < va {
                Some(Dominance::Right)
            } else {
                None
            }
        }
    }
}

/// Constraint-aware Pareto dominance.
///
/// 1. A feasible solution beats an infeasible one outright.
/// 2. Between two infeasible solutions, the strictly smaller total
///    violation wins.
/// 3. Otherwise (both feasible, or equal violation) Pareto dominance on
///    objectives decides.
///
/// # Example
///
/// ```
/// use u_moea::dominance::{ConstrainedDominance, Dominance, DominanceComparator};
/// use u_moea::solution::Solution;
///
/// let a = Solution::from_objectives([5.0, 5.0]).with_constraints([0.0]);
/// let b = Solution::from_objectives([1.0, 1.0]).with_constraints([0.1]);
/// assert_eq!(ConstrainedDominance.compare(&a, &b), Dominance::Left);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConstrainedDominance;

impl DominanceComparator for ConstrainedDominance {
    fn compare<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> Dominance {
        constraint_tier(a, b).unwrap_or_else(|| pareto_dominance(a.objectives(), b.objectives()))
    }
}

/// Result of an epsilon-box comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxComparison {
    /// Dominance outcome over box coordinates (after the constraint tier).
    pub dominance: Dominance,
    /// Both solutions occupy the same box and the constraint tier is tied.
    pub same_box: bool,
}

/// Pareto dominance computed on epsilon-box coordinates
/// `floor(f_i / eps_i)` instead of raw objective values.
///
/// Solutions falling into the same box are mutually nondominated. The
/// constraint tier of [`ConstrainedDominance`] applies first; for feasible
/// inputs this is exactly box-level Pareto dominance.
///
/// # Panics
///
/// [`compare`](DominanceComparator::compare) debug-asserts that both
/// objective vectors have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct EpsilonBoxDominance {
    epsilons: Epsilons,
}

impl EpsilonBoxDominance {
    /// Creates a comparator over the given tolerances.
    pub fn new(epsilons: Epsilons) -> Self {
        Self { epsilons }
    }

    /// The tolerances used to form boxes.
    pub fn epsilons(&self) -> &Epsilons {
        &self.epsilons
    }

    /// Compares `a` against `b` and also reports whether they share a box.
    pub fn compare_boxes<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> BoxComparison {
        if let Some(dominance) = constraint_tier(a, b) {
            return BoxComparison {
                dominance,
                same_box: false,
            };
        }

        let (fa, fb) = (a.objectives(), b.objectives());
        debug_assert_eq!(fa.len(), fb.len(), "objective vectors must have equal length");

        let mut a_better_in_some = false;
        let mut b_better_in_some = false;

        for (i, (&va, &vb)) in fa.iter().zip(fb.iter()).enumerate() {
            let ba = self.epsilons.box_coordinate(i, va);
            let bb = self.epsilons.box_coordinate(i, vb);
            if ba < bb {
                a_better_in_some = true;
            } else if bb < ba {
                b_better_in_some = true;
            }
        }

        let dominance = match (a_better_in_some, b_better_in_some) {
            (true, false) => Dominance::Left,
            (false, true) => Dominance::Right,
            _ => Dominance::Neither,
        };

        BoxComparison {
            dominance,
            same_box: !a_better_in_some && !b_better_in_some,
        }
    }
}

impl DominanceComparator for EpsilonBoxDominance {
    fn compare<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> Dominance {
        self.compare_boxes(a, b).dominance
    }
}

/// Lexicographic ordering: objectives are compared in index order and the
/// first strict difference decides. Only meaningful when objectives carry a
/// strict priority order.
///
/// # Example
///
/// ```
/// use u_moea::dominance::{Dominance, DominanceComparator, LexicographicDominance};
///
/// let cmp = LexicographicDominance;
/// assert_eq!(cmp.compare(&[0.0, 1.0], &[1.0, 0.0]), Dominance::Left);
/// assert_eq!(cmp.compare(&[0.0, 0.0], &[0.0, 0.0]), Dominance::Neither);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexicographicDominance;

impl DominanceComparator for LexicographicDominance {
    fn compare<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> Dominance {
        for (&va, &vb) in a.objectives().iter().zip(b.objectives()) {
            if va < vb {
                return Dominance::Left;
            }
            if vb < va {
                return Dominance::Right;
            }
        }
        Dominance::Neither
    }
}

/// Configurable choice of dominance relation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DominanceKind {
    /// [`ParetoDominance`].
    Pareto,
    /// [`ConstrainedDominance`].
    Constrained,
    /// [`EpsilonBoxDominance`]; requires epsilons.
    EpsilonBox,
    /// [`LexicographicDominance`].
    Lexicographic,
}

impl DominanceKind {
    /// Default relation for a run: Pareto when unconstrained, constrained
    /// Pareto as soon as any constraint exists.
    pub fn default_for(constraint_count: usize) -> Self {
        if constraint_count == 0 {
            DominanceKind::Pareto
        } else {
            DominanceKind::Constrained
        }
    }
}

/// Static dispatch over every comparator in this module.
#[derive(Debug, Clone, PartialEq)]
pub enum AnyDominance {
    /// See [`ParetoDominance`].
    Pareto(ParetoDominance),
    /// See [`ConstrainedDominance`].
    Constrained(ConstrainedDominance),
    /// See [`EpsilonBoxDominance`].
    EpsilonBox(EpsilonBoxDominance),
    /// See [`LexicographicDominance`].
    Lexicographic(LexicographicDominance),
}

impl AnyDominance {
    /// Which relation this is.
    pub fn kind(&self) -> DominanceKind {
        match self {
            AnyDominance::Pareto(_) => DominanceKind::Pareto,
            AnyDominance::Constrained(_) => DominanceKind::Constrained,
            AnyDominance::EpsilonBox(_) => DominanceKind::EpsilonBox,
            AnyDominance::Lexicographic(_) => DominanceKind::Lexicographic,
        }
    }
}

impl Default for AnyDominance {
    fn default() -> Self {
        AnyDominance::Pareto(ParetoDominance)
    }
}

impl From<EpsilonBoxDominance> for AnyDominance {
    fn from(cmp: EpsilonBoxDominance) -> Self {
        AnyDominance::EpsilonBox(cmp)
    }
}

impl DominanceComparator for AnyDominance {
    fn compare<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> Dominance {
        match self {
            AnyDominance::Pareto(c) => c.compare(a, b),
            AnyDominance::Constrained(c) => c.compare(a, b),
            AnyDominance::EpsilonBox(c) => c.compare(a, b),
            AnyDominance::Lexicographic(c) => c.compare(a, b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solution::Solution;

    fn constrained(objectives: &[f64], constraints: &[f64]) -> Solution {
        Solution::from_objectives(objectives.to_vec()).with_constraints(constraints.to_vec())
    }

    // ---- Pareto ----

    #[test]
    fn test_pareto_scenario() {
        let a = [1.0, 2.0];
        assert_eq!(ParetoDominance.compare(&a, &[2.0, 3.0]).signum(), -1);
        assert_eq!(ParetoDominance.compare(&a, &[1.0, 3.0]).signum(), -1);
        assert_eq!(ParetoDominance.compare(&a, &[0.0, 3.0]).signum(), 0);
    }

    #[test]
    fn test_pareto_ignores_constraints() {
        let a = constrained(&[1.0, 1.0], &[5.0]);
        let b = constrained(&[2.0, 2.0], &[0.0]);
        assert_eq!(ParetoDominance.compare(&a, &b), Dominance::Left);
    }

    // ---- Constrained ----

    #[test]
    fn test_feasible_beats_infeasible() {
        let a = constrained(&[5.0, 5.0], &[0.0]);
        let b = constrained(&[1.0, 1.0], &[0.1]);
        assert_eq!(ConstrainedDominance.compare(&a, &b), Dominance::Left);
        assert_eq!(ConstrainedDominance.compare(&b, &a), Dominance::Right);
    }

    #[test]
    fn test_smaller_violation_wins() {
        let a = constrained(&[9.0, 9.0], &[0.2, 0.0]);
        let b = constrained(&[1.0, 1.0], &[0.1, 0.3]);
        assert_eq!(ConstrainedDominance.compare(&a, &b), Dominance::Left);
    }

    #[test]
    fn test_equal_violation_falls_back_to_pareto() {
        let a = constrained(&[1.0, 1.0], &[0.5]);
        let b = constrained(&[2.0, 2.0], &[-0.5]);
        assert_eq!(ConstrainedDominance.compare(&a, &b), Dominance::Left);

        let c = constrained(&[0.0, 3.0], &[0.5]);
        assert_eq!(ConstrainedDominance.compare(&a, &c), Dominance::Neither);
    }

    #[test]
    fn test_both_feasible_is_pareto() {
        let a = constrained(&[1.0, 2.0], &[0.0]);
        let b = constrained(&[2.0, 1.0], &[0.0]);
        assert_eq!(ConstrainedDominance.compare(&a, &b), Dominance::Neither);
    }

    // ---- Epsilon box ----

    #[test]
    fn test_epsilon_same_box_is_nondominated() {
        let cmp = EpsilonBoxDominance::new(Epsilons::uniform(1.0).unwrap());
        let result = cmp.compare_boxes(&[0.1, 0.9], &[0.8, 0.2]);
        assert_eq!(result.dominance, Dominance::Neither);
        assert!(result.same_box);

        // Pareto would say Left here, boxes say identical
        let result = cmp.compare_boxes(&[0.1, 0.1], &[0.2, 0.2]);
        assert_eq!(result.dominance, Dominance::Neither);
        assert!(result.same_box);
    }

    #[test]
    fn test_epsilon_box_dominance() {
        let cmp = EpsilonBoxDominance::new(Epsilons::uniform(1.0).unwrap());
        let result = cmp.compare_boxes(&[0.0, 10.0], &[0.5, 10.5]);
        assert!(result.same_box);

        let result = cmp.compare_boxes(&[0.0, 9.5], &[0.5, 10.5]);
        assert_eq!(result.dominance, Dominance::Left);
        assert!(!result.same_box);

        assert_eq!(cmp.compare(&[1.0, 9.0], &[2.0, 8.0]), Dominance::Neither);
    }

    #[test]
    fn test_epsilon_extension_across_objectives() {
        let cmp = EpsilonBoxDominance::new(Epsilons::new(vec![1.0, 10.0]).unwrap());
        // objective 2 reuses epsilon 10.0
        let result = cmp.compare_boxes(&[0.5, 5.0, 1.0], &[0.5, 5.0, 9.0]);
        assert!(result.same_box);
    }

    #[test]
    fn test_epsilon_applies_constraint_tier() {
        let cmp = EpsilonBoxDominance::new(Epsilons::uniform(1.0).unwrap());
        let a = constrained(&[0.5, 0.5], &[0.0]);
        let b = constrained(&[0.5, 0.5], &[1.0]);
        let result = cmp.compare_boxes(&a, &b);
        assert_eq!(result.dominance, Dominance::Left);
        assert!(!result.same_box);
    }

    // ---- Lexicographic ----

    #[test]
    fn test_lexicographic_dominance() {
        let cmp = LexicographicDominance;
        let s1 = [0.0, 0.0];
        let s2 = [0.0, 1.0];
        let s3 = [1.0, 0.0];
        assert!(cmp.compare(&s1, &s2).signum() < 0);
        assert!(cmp.compare(&s2, &s1).signum() > 0);
        assert!(cmp.compare(&s1, &s3).signum() < 0);
        assert!(cmp.compare(&s3, &s1).signum() > 0);
        assert!(cmp.compare(&s2, &s3).signum() < 0);
        assert!(cmp.compare(&s3, &s2).signum() > 0);
    }

    #[test]
    fn test_lexicographic_nondominance() {
        let cmp = LexicographicDominance;
        assert_eq!(cmp.compare(&[0.0, 0.0], &[0.0, 0.0]), Dominance::Neither);
    }

    // ---- Dispatch ----

    #[test]
    fn test_default_kind_for_constraints() {
        assert_eq!(DominanceKind::default_for(0), DominanceKind::Pareto);
        assert_eq!(DominanceKind::default_for(2), DominanceKind::Constrained);
    }

    #[test]
    fn test_any_dominance_dispatch() {
        let a = constrained(&[5.0, 5.0], &[0.0]);
        let b = constrained(&[1.0, 1.0], &[0.1]);
        let pareto = AnyDominance::default();
        let constrained_cmp = AnyDominance::Constrained(ConstrainedDominance);
        assert_eq!(pareto.kind(), DominanceKind::Pareto);
        assert_eq!(pareto.compare(&a, &b), Dominance::Right);
        assert_eq!(constrained_cmp.compare(&a, &b), Dominance::Left);
        assert!(constrained_cmp.dominates(&a, &b));
    }
}
