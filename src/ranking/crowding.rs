//! Crowding distance assignment.

use super::non_dominated_sort::check_dimensions;
use crate::solution::Evaluated;

/// Crowding distance assignment for diversity preservation.
///
/// Computes the crowding distance for each solution, measuring how
/// spread out the solutions are in objective space. Higher distance
/// means the solution is more isolated (more diverse).
///
/// Boundary solutions (min/max for any objective) receive `f64::INFINITY`.
///
/// # Algorithm (Deb et al., 2002)
///
/// For each objective:
/// 1. Sort solutions by objective value (stable, ties keep input order)
/// 2. Assign infinity to the boundary solutions (every member at the
///    minimum or maximum)
/// 3. For interior solutions, add `(next - prev) / (max - min)`, where
///    `next` and `prev` are the neighbouring distinct values; a zero-width
///    objective contributes nothing
///
/// # Complexity
///
/// O(m * n * log n) where m = number of objectives, n = number of solutions
///
/// # Example
///
/// ```
/// use u_moea::ranking::crowding_distance;
///
/// let objectives = vec![
///     vec![1.0, 5.0],
///     vec![3.0, 3.0],
///     vec![5.0, 1.0],
/// ];
///
/// let distances = crowding_distance(&objectives);
///
/// // Boundary solutions get infinity
/// assert!(distances[0].is_infinite());
/// assert!(distances[2].is_infinite());
/// // Interior solution gets finite distance
/// assert!(distances[1].is_finite());
/// ```
pub fn crowding_distance<S: Evaluated>(front: &[S]) -> Vec<f64> {
    let indices: Vec<usize> = (0..front.len()).collect();
    front_crowding_distance(front, &indices)
}

/// Crowding distance of the members `front` of `solutions`, without
/// copying them out.
///
/// The result is aligned with `front`: `result[k]` belongs to
/// `solutions[front[k]]`.
///
/// Members sharing an objective value are treated alike: every member at
/// the minimum or maximum of a dimension is a boundary, and tied interior
/// members span the same gap between the neighbouring distinct values. The
/// distances therefore do not depend on the order of `front`. A dimension
/// with zero range contributes nothing, boundaries included.
///
/// # Panics
///
/// Panics if an index in `front` is out of bounds, or if the members
/// disagree on objective or constraint count (see
/// [`check_dimensions`](super::check_dimensions)).
pub fn front_crowding_distance<S: Evaluated>(solutions: &[S], front: &[usize]) -> Vec<f64> {
    let members: Vec<&S> = front.iter().map(|&i| &solutions[i]).collect();
    let m = match check_dimensions(&members) {
        Ok((m, _)) => m,
        Err(err) => panic!("{err}"),
    };

    let n = members.len();
    if n <= 2 {
        return vec![f64::INFINITY; n];
    }

    let value = |k: usize, obj_idx: usize| members[k].objectives()[obj_idx];
    let mut distances = vec![0.0f64; n];

    for obj_idx in 0..m {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| value(a, obj_idx).total_cmp(&value(b, obj_idx)));

        let range = value(order[n - 1], obj_idx) - value(order[0], obj_idx);
        if range.is_nan() || range <= 0.0 {
            continue;
        }

        // walk runs of equal values
        let mut start = 0;
        while start < n {
            let v = value(order[start], obj_idx);
            let mut end = start + 1;
            while end < n && value(order[end], obj_idx).total_cmp(&v).is_eq() {
                end += 1;
            }

            let contribution = if start == 0 || end == n {
                f64::INFINITY
            } else {
                (value(order[end], obj_idx) - value(order[start - 1], obj_idx)) / range
            };
            for &k in &order[start..end] {
                distances[k] += contribution;
            }
            start = end;
        }
    }

    distances
}
