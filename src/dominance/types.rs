//! Dominance outcome and the comparator trait.

use crate::solution::Evaluated;
use std::cmp::Ordering;

/// Outcome of comparing two solutions `a` (left) and `b` (right).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dominance {
    /// `a` dominates `b`.
    Left,
    /// `b` dominates `a`.
    Right,
    /// Neither dominates the other. This is incomparability, not equality.
    Neither,
}

impl Dominance {
    /// `-1` if `a` is better, `+1` if `b` is better, `0` otherwise.
    pub fn signum(self) -> i32 {
        match self {
            Dominance::Left => -1,
            Dominance::Right => 1,
            Dominance::Neither => 0,
        }
    }

    /// Same outcome seen from `b`'s side.
    pub fn reverse(self) -> Self {
        match self {
            Dominance::Left => Dominance::Right,
            Dominance::Right => Dominance::Left,
            Dominance::Neither => Dominance::Neither,
        }
    }

    /// Maps `Less` to [`Left`](Self::Left), `Greater` to
    /// [`Right`](Self::Right), `Equal` to [`Neither`](Self::Neither).
    pub fn from_ordering(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Dominance::Left,
            Ordering::Greater => Dominance::Right,
            Ordering::Equal => Dominance::Neither,
        }
    }

    /// Inverse of [`from_ordering`](Self::from_ordering).
    pub fn to_ordering(self) -> Ordering {
        match self {
            Dominance::Left => Ordering::Less,
            Dominance::Right => Ordering::Greater,
            Dominance::Neither => Ordering::Equal,
        }
    }
}

/// A strategy computing the dominance outcome between two solutions.
///
/// Implementations must be pure and antisymmetric:
/// `compare(a, b) == compare(b, a).reverse()`.
pub trait DominanceComparator: Send + Sync {
    /// Compares `a` against `b`.
    fn compare<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> Dominance;

    /// Returns `true` if `a` dominates `b`.
    fn dominates<S: Evaluated + ?Sized>(&self, a: &S, b: &S) -> bool {
        self.compare(a, b) == Dominance::Left
    }
}

/// Pareto dominance over two objective vectors (minimization).
///
/// `a` dominates `b` iff every `a[i] <= b[i]` and at least one is strictly
/// smaller. Stops as soon as both sides have been better somewhere.
///
/// # Example
///
/// ```
/// use u_moea::dominance::{pareto_dominance, Dominance};
///
/// assert_eq!(pareto_dominance(&[1.0, 2.0], &[2.0, 3.0]), Dominance::Left);
/// assert_eq!(pareto_dominance(&[1.0, 2.0], &[1.0, 3.0]), Dominance::Left);
/// assert_eq!(pareto_dominance(&[1.0, 2.0], &[0.0, 3.0]), Dominance::Neither);
/// ```
pub fn pareto_dominance(a: &[f64], b: &[f64]) -> Dominance {
    debug_assert_eq!(a.len(), b.len(), "objective vectors must have equal length");

    let mut a_better_in_some = false;
    let mut b_better_in_some = false;

    for (&va, &vb) in a.iter().zip(b.iter()) {
        if va < vb {
            a_better_in_some = true;
        } else if vb < va {
            b_better_in_some = true;
        }
        if a_better_in_some && b_better_in_some {
            return Dominance::Neither;
        }
    }

    match (a_better_in_some, b_better_in_some) {
        (true, false) => Dominance::Left,
        (false, true) => Dominance::Right,
        _ => Dominance::Neither,
    }
}
