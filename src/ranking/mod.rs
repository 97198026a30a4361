//! Ranking utilities: non-dominated sorting, crowding distance, and
//! rank-and-crowding survivor selection (NSGA-II machinery).
//!
//! All functions take solutions by slice and return side tables indexed by
//! position in that slice. Solutions are never annotated in place.
//!
//! # Algorithms
//!
//! - [`non_dominated_sort`]: Fast non-dominated sorting (Deb et al., 2002)
//! - [`crowding_distance`] / [`front_crowding_distance`]: Density estimate
//!   for diversity preservation
//! - [`truncate`]: Elitist truncation by rank, then crowding distance
//! - [`Selection`]: Crowded tournament parent selection
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic Algorithm: NSGA-II"
//! - IEEE Transactions on Evolutionary Computation, 6(2), 182-197

mod crowding;
mod non_dominated_sort;
mod selection;
mod truncation;

pub use crowding::{crowding_distance, front_crowding_distance};
pub use non_dominated_sort::{check_dimensions, non_dominated_sort, NondominatedSortResult};
pub use selection::{crowded_compare, Selection};
pub use truncation::{assign_rank_and_crowding, truncate, Ranked};
