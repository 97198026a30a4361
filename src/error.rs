//! Error types.
//!
//! Constructors and `try_*` entry points report failures through
//! [`MoeaError`]. Their panicking counterparts (e.g.
//! [`EpsilonBoxArchive::add`](crate::archive::EpsilonBoxArchive::add)) use the
//! same message text when they fail fast.

/// Errors raised by the dominance-and-diversity engine.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MoeaError {
    /// An [`Epsilons`](crate::solution::Epsilons) vector was built from no values.
    #[error("epsilons must contain at least one value")]
    EmptyEpsilons,

    /// An epsilon was zero, negative, infinite or NaN.
    #[error("epsilon at index {index} must be positive and finite, got {value}")]
    InvalidEpsilon { index: usize, value: f64 },

    /// A solution's objective count differs from the established width.
    #[error("objective count mismatch: expected {expected}, got {actual}")]
    ObjectiveCountMismatch { expected: usize, actual: usize },

    /// A solution's constraint count differs from the established width.
    #[error("constraint count mismatch: expected {expected}, got {actual}")]
    ConstraintCountMismatch { expected: usize, actual: usize },

    /// The epsilons vector is wider than the objective vector and cannot be
    /// extended down to it.
    #[error("epsilons of width {epsilons} cannot be applied to {objectives} objectives")]
    EpsilonWidthMismatch { epsilons: usize, objectives: usize },

    /// Engine configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A thread panicked while holding the shared archive lock.
    #[error("archive lock poisoned")]
    LockPoisoned,
}

/// Result alias used throughout the crate.
pub type MoeaResult<T> = Result<T, MoeaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = MoeaError::ObjectiveCountMismatch {
            expected: 2,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "objective count mismatch: expected 2, got 3"
        );

        let err = MoeaError::EpsilonWidthMismatch {
            epsilons: 3,
            objectives: 2,
        };
        assert!(err.to_string().contains("width 3"));
    }
}
