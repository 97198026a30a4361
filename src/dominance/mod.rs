//! Dominance relations between evaluated solutions.
//!
//! A [`DominanceComparator`] answers "is `a` better than, worse than, or
//! incomparable to `b`?" as a [`Dominance`] value. All relations are strict
//! partial orders over minimized objectives and never allocate.
//!
//! # Variants
//!
//! - [`ParetoDominance`]: no worse in every objective, strictly better in one
//! - [`ConstrainedDominance`]: feasibility first, then total violation, then
//!   Pareto
//! - [`EpsilonBoxDominance`]: Pareto dominance over epsilon-box coordinates
//! - [`LexicographicDominance`]: first differing objective decides
//!
//! [`AnyDominance`] dispatches over the four without boxing and is what
//! [`EngineConfig`](crate::config::EngineConfig) hands out.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective GA: NSGA-II"
//! - Laumanns et al. (2002), "Combining Convergence and Diversity in
//!   Evolutionary Multiobjective Optimization"

mod comparators;
mod types;

pub use comparators::{
    AnyDominance, BoxComparison, ConstrainedDominance, DominanceKind, EpsilonBoxDominance,
    LexicographicDominance, ParetoDominance,
};
pub use types::{pareto_dominance, Dominance, DominanceComparator};
