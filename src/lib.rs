//! Domain-agnostic building blocks for multi-objective evolutionary
//! optimization.
//!
//! Provides the ranking and archiving machinery shared by NSGA-II style and
//! epsilon-dominance algorithms:
//!
//! - **Dominance**: Pareto, constrained, epsilon-box and lexicographic
//!   comparators behind one [`DominanceComparator`](dominance::DominanceComparator)
//!   trait.
//! - **Ranking**: fast non-dominated sorting, crowding distance, survivor
//!   truncation by rank and crowding, and crowded tournament selection.
//! - **Archives**: a bounded epsilon-box archive and an unbounded
//!   non-dominated archive, plus a mutex-guarded handle for concurrent
//!   evaluators.
//! - **Population**: an ordered solution container wired to the ranking
//!   operations.
//!
//! All objectives are **minimized**. Constraint values are violations:
//! zero means satisfied, any non-zero value is a violation.
//!
//! # Architecture
//!
//! The crate knows nothing about variation operators, problems or
//! termination. Algorithms built on top decide how offspring are produced
//! and feed evaluated [`Solution`](solution::Solution)s (or plain objective
//! vectors) into the ranking functions and archives here.
//!
//! # Features
//!
//! - `parallel`: builds the domination graph of the non-dominated sort with
//!   rayon. Results are identical to the serial build.
//! - `serde`: `Serialize`/`Deserialize` for solutions, epsilons, archive
//!   records and configuration.

pub mod archive;
pub mod config;
pub mod dominance;
pub mod error;
pub mod population;
pub mod ranking;
pub mod solution;

pub use error::{MoeaError, MoeaResult};
