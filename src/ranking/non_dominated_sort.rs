//! Fast non-dominated sorting.

use crate::dominance::{Dominance, DominanceComparator};
use crate::error::{MoeaError, MoeaResult};
use crate::solution::Evaluated;
use tracing::instrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of non-dominated sorting.
///
/// Each element of `ranks` corresponds to the Pareto rank of the solution
/// at the same index. Rank 0 is the Pareto front (non-dominated solutions).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NondominatedSortResult {
    /// Pareto rank for each solution (0 = front).
    pub ranks: Vec<usize>,

    /// Indices grouped by front: `fronts[0]` contains rank-0 indices, etc.
    /// Each front lists its members in ascending index order.
    pub fronts: Vec<Vec<usize>>,
}

impl NondominatedSortResult {
    /// Number of fronts.
    pub fn front_count(&self) -> usize {
        self.fronts.len()
    }

    /// Member indices of the front with the given rank, or an empty slice.
    pub fn front(&self, rank: usize) -> &[usize] {
        self.fronts.get(rank).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns `true` if nothing was sorted.
    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }
}

/// Verifies that every solution has the same objective and constraint
/// count, returning `(objectives, constraints)` of the first solution.
///
/// An empty slice yields `(0, 0)`.
///
/// # Errors
///
/// [`MoeaError::ObjectiveCountMismatch`] or
/// [`MoeaError::ConstraintCountMismatch`] naming the first offender.
pub fn check_dimensions<S: Evaluated>(solutions: &[S]) -> MoeaResult<(usize, usize)> {
    let Some(first) = solutions.first() else {
        return Ok((0, 0));
    };
    let m = first.objectives().len();
    let c = first.constraints().len();

    for s in &solutions[1..] {
        if s.objectives().len() != m {
            return Err(MoeaError::ObjectiveCountMismatch {
                expected: m,
                actual: s.objectives().len(),
            });
        }
        if s.constraints().len() != c {
            return Err(MoeaError::ConstraintCountMismatch {
                expected: c,
                actual: s.constraints().len(),
            });
        }
    }
    Ok((m, c))
}

/// Fast non-dominated sorting.
///
/// Assigns a rank to each solution: front 0 holds solutions dominated by
/// no one, front 1 those dominated only by front 0, and so on. Solutions
/// with identical objectives are mutually nondominated and share a front.
///
/// # Algorithm (Deb et al., 2002)
///
/// 1. For each pair, record who dominates whom: a domination count per
///    solution and the list of solutions it dominates
/// 2. Solutions with count 0 form front 0
/// 3. Peeling a front decrements the count of everything it dominates;
///    solutions reaching 0 form the next front
///
/// If the comparator is not transitive (e.g. NaN objectives) the peeling
/// can stall; the unassigned remainder then becomes one final front so
/// every solution still gets exactly one rank.
///
/// # Complexity
///
/// O(m * n²) comparisons, O(n²) memory for the domination lists.
/// With the `parallel` feature the domination lists are built in parallel.
///
/// # Panics
///
/// Panics if solutions disagree on objective or constraint count
/// (see [`check_dimensions`]).
///
/// # Example
///
/// ```
/// use u_moea::dominance::ParetoDominance;
/// use u_moea::ranking::non_dominated_sort;
///
/// let objectives = vec![
///     vec![1.0, 5.0],  // Solution A
///     vec![3.0, 3.0],  // Solution B
///     vec![5.0, 1.0],  // Solution C
///     vec![4.0, 4.0],  // Solution D, dominated by B
/// ];
///
/// let result = non_dominated_sort(&objectives, &ParetoDominance);
///
/// assert_eq!(result.ranks, vec![0, 0, 0, 1]);
/// assert_eq!(result.fronts, vec![vec![0, 1, 2], vec![3]]);
/// ```
#[instrument(level = "debug", skip_all, fields(n = solutions.len()))]
pub fn non_dominated_sort<S, C>(solutions: &[S], comparator: &C) -> NondominatedSortResult
where
    S: Evaluated + Sync,
    C: DominanceComparator,
{
    if let Err(err) = check_dimensions(solutions) {
        panic!("{err}");
    }

    let n = solutions.len();
    if n == 0 {
        return NondominatedSortResult::default();
    }

    let (dominates, mut domination_count) = domination_graph(solutions, comparator);

    let mut ranks = vec![usize::MAX; n];
    let mut fronts: Vec<Vec<usize>> = Vec::new();
    let mut next_front: Vec<usize> = (0..n).filter(|&i| domination_count[i] == 0).collect();
    let mut assigned = 0;

    while assigned < n {
        if next_front.is_empty() {
            // Cyclic relation: nothing left is free of domination.
            next_front = (0..n).filter(|&i| ranks[i] == usize::MAX).collect();
            tracing::warn!(
                remaining = next_front.len(),
                "comparator is not transitive; forcing remaining solutions into a final front"
            );
        }

        next_front.sort_unstable();
        let rank = fronts.len();
        for &i in &next_front {
            ranks[i] = rank;
        }
        assigned += next_front.len();

        let mut following = Vec::new();
        for &i in &next_front {
            for &j in &dominates[i] {
                domination_count[j] -= 1;
                if domination_count[j] == 0 && ranks[j] == usize::MAX {
                    following.push(j);
                }
            }
        }
        fronts.push(std::mem::replace(&mut next_front, following));
    }

    tracing::debug!(fronts = fronts.len(), "non-dominated sort complete");

    NondominatedSortResult { ranks, fronts }
}

/// Domination lists (`dominates[i]` = indices `i` dominates) and
/// domination counts (how many solutions dominate `i`).
#[cfg(not(feature = "parallel"))]
fn domination_graph<S, C>(solutions: &[S], comparator: &C) -> (Vec<Vec<usize>>, Vec<usize>)
where
    S: Evaluated + Sync,
    C: DominanceComparator,
{
    let n = solutions.len();
    let mut dominates: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut domination_count = vec![0usize; n];

    for i in 0..n {
        for j in (i + 1)..n {
            match comparator.compare(&solutions[i], &solutions[j]) {
                Dominance::Left => {
                    dominates[i].push(j);
                    domination_count[j] += 1;
                }
                Dominance::Right => {
                    dominates[j].push(i);
                    domination_count[i] += 1;
                }
                Dominance::Neither => {}
            }
        }
    }

    (dominates, domination_count)
}

#[cfg(feature = "parallel")]
fn domination_graph<S, C>(solutions: &[S], comparator: &C) -> (Vec<Vec<usize>>, Vec<usize>)
where
    S: Evaluated + Sync,
    C: DominanceComparator,
{
    let n = solutions.len();
    (0..n)
        .into_par_iter()
        .map(|i| {
            let mut dominated = Vec::new();
            let mut count = 0usize;
            for j in 0..n {
                if i == j {
                    continue;
                }
                match comparator.compare(&solutions[i], &solutions[j]) {
                    Dominance::Left => dominated.push(j),
                    Dominance::Right => count += 1,
                    Dominance::Neither => {}
                }
            }
            (dominated, count)
        })
        .unzip()
}

// ============================================================================
// Tests
// ============================================================================
