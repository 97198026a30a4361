//! Rank-and-crowding survivor selection.

use super::crowding::front_crowding_distance;
use super::non_dominated_sort::{check_dimensions, non_dominated_sort};
use crate::dominance::DominanceComparator;
use crate::solution::Evaluated;
use tracing::instrument;

/// Side-table row produced by ranking: the rank and crowding distance of
/// the solution at `index` in the ranked slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    /// Position of the solution in the input slice.
    pub index: usize,
    /// Front rank (0 = non-dominated).
    pub rank: usize,
    /// Crowding distance within its front.
    pub crowding_distance: f64,
}

/// Ranks every solution and computes crowding distances front by front.
///
/// The result is aligned with `solutions`: `result[i].index == i`.
pub fn assign_rank_and_crowding<S, C>(solutions: &[S], comparator: &C) -> Vec<Ranked>
where
    S: Evaluated + Sync,
    C: DominanceComparator,
{
    let sorted = non_dominated_sort(solutions, comparator);
    let mut table: Vec<Ranked> = sorted
        .ranks
        .iter()
        .enumerate()
        .map(|(index, &rank)| Ranked {
            index,
            rank,
            crowding_distance: 0.0,
        })
        .collect();

    for front in &sorted.fronts {
        let distances = front_crowding_distance(solutions, front);
        for (&i, d) in front.iter().zip(distances) {
            table[i].crowding_distance = d;
        }
    }

    table
}

/// Selects `k` survivors from `solutions` by rank, then crowding distance.
///
/// Whole fronts are taken in rank order while they fit. The first front
/// that would overflow `k` is crowded on its own and its members with the
/// greatest crowding distance fill the remaining slots; equal distances
/// keep the lower input index. `k` larger than the pool returns everyone.
///
/// Survivors are returned in selection order: by rank, and within the
/// overflow front by decreasing crowding distance.
///
/// # Panics
///
/// If solutions disagree on objective or constraint counts, even when `k`
/// is 0. Use [`check_dimensions`](super::check_dimensions) to validate first.
///
/// # Example
///
/// ```
/// use u_moea::dominance::ParetoDominance;
/// use u_moea::ranking::truncate;
///
/// let pool = vec![
///     vec![0.0, 4.0],
///     vec![1.0, 3.0],
///     vec![2.0, 2.0],
///     vec![4.0, 0.0],
///     vec![5.0, 5.0],
/// ];
/// let survivors = truncate(&pool, 3, &ParetoDominance);
/// let mut kept: Vec<usize> = survivors.iter().map(|r| r.index).collect();
/// kept.sort();
/// // both extremes are kept
/// assert!(kept.contains(&0) && kept.contains(&3));
/// assert_eq!(kept.len(), 3);
/// ```
#[instrument(level = "debug", skip_all, fields(pool = solutions.len(), k = k))]
pub fn truncate<S, C>(solutions: &[S], k: usize, comparator: &C) -> Vec<Ranked>
where
    S: Evaluated + Sync,
    C: DominanceComparator,
{
    if let Err(err) = check_dimensions(solutions) {
        panic!("{err}");
    }

    // cannot select more solutions than we actually have
    let k = solutions.len().min(k);
    let mut survivors = Vec::with_capacity(k);
    if k == 0 {
        return survivors;
    }

    let sorted = non_dominated_sort(solutions, comparator);

    for (rank, front) in sorted.fronts.iter().enumerate() {
        let missing = k - survivors.len();
        let distances = front_crowding_distance(solutions, front);
        let mut rows: Vec<Ranked> = front
            .iter()
            .zip(distances)
            .map(|(&index, crowding_distance)| Ranked {
                index,
                rank,
                crowding_distance,
            })
            .collect();

        if rows.len() > missing {
            // stable: equal distances keep ascending index order
            rows.sort_by(|a, b| b.crowding_distance.total_cmp(&a.crowding_distance));
            rows.truncate(missing);
            tracing::debug!(rank, kept = missing, "truncated overflow front by crowding distance");
        }

        survivors.extend(rows);
        if survivors.len() == k {
            break;
        }
    }

    debug_assert_eq!(survivors.len(), k);
    survivors
}
