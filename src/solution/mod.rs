//! Evaluated candidate solutions.
//!
//! The engine never interprets decision variables. It only reads a
//! solution's objective vector (minimized) and its constraint-violation
//! vector (0 = satisfied). Anything that can expose those two slices
//! implements [`Evaluated`] and can be sorted, crowded, or archived.
//!
//! # Key Types
//!
//! - [`Solution`]: Variables plus objective and constraint values, as
//!   produced by an external evaluator
//! - [`Variable`]: Tagged decision-variable value (real, integer,
//!   permutation, subset, binary)
//! - [`Epsilons`]: Per-objective tolerances that discretize objective
//!   space into boxes

mod epsilons;
mod types;

pub use epsilons::Epsilons;
pub use types::{Evaluated, Solution, Variable};
