//! Long-lived approximation sets of the Pareto front.
//!
//! An archive absorbs every evaluated solution a search produces and keeps
//! only the ones worth reporting. Two flavors are provided:
//!
//! - [`EpsilonBoxArchive`]: epsilon-dominance archive. At most one solution
//!   per occupied epsilon box and no two boxes dominating each other, so
//!   the size stays bounded however long the search runs.
//! - [`NondominatedArchive`]: plain non-dominated set under any
//!   [`AnyDominance`](crate::dominance::AnyDominance), with near-duplicate
//!   rejection. Unbounded.
//!
//! Both implement [`Archive`]; [`SharedArchive`] wraps either one behind a
//! mutex so concurrent evaluators can report results safely.
//!
//! # References
//!
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multiobjective Optimization"
//! - Deb, Mohan & Mishra (2005), "Evaluating the epsilon-Domination Based
//!   Multi-Objective Evolutionary Algorithm for a Quick Computation of
//!   Pareto-Optimal Solutions"

mod epsilon_box;
mod nondominated;
mod shared;
mod types;

pub use epsilon_box::EpsilonBoxArchive;
pub use nondominated::NondominatedArchive;
pub use shared::SharedArchive;
pub use types::{AddOutcome, Archive, ArchiveRecord, ArchiveStats};
