//! Engine configuration.
//!
//! [`EngineConfig`] collects the choices a multi-objective run has to make
//! up front: which dominance relation ranks solutions, which epsilons
//! discretize objective space, and how close two points must be to count as
//! duplicates. It also builds the matching comparator and archives.

use crate::archive::{EpsilonBoxArchive, NondominatedArchive};
use crate::dominance::{
    AnyDominance, ConstrainedDominance, DominanceKind, EpsilonBoxDominance,
    LexicographicDominance, ParetoDominance,
};
use crate::error::{MoeaError, MoeaResult};
use crate::solution::Epsilons;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for ranking and archiving.
///
/// # Defaults
///
/// ```
/// use u_moea::config::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert!(config.dominance.is_none());
/// assert!(config.epsilons.is_none());
/// assert_eq!(config.duplicate_tolerance, 1e-10);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_moea::archive::Archive;
/// use u_moea::config::EngineConfig;
/// use u_moea::dominance::DominanceKind;
/// use u_moea::solution::{Epsilons, Solution};
///
/// let config = EngineConfig::default()
///     .with_dominance(DominanceKind::EpsilonBox)
///     .with_epsilons(Epsilons::new(vec![0.01, 0.5]).unwrap());
/// config.validate().unwrap();
///
/// let mut archive = config.epsilon_archive().unwrap();
/// archive.add(Solution::from_objectives([0.3, 12.0]));
/// assert_eq!(archive.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct EngineConfig {
    /// Dominance relation used for sorting.
    ///
    /// `None` picks automatically: Pareto when the problem has no
    /// constraints, constrained Pareto otherwise.
    pub dominance: Option<DominanceKind>,

    /// Box tolerances. Required by [`DominanceKind::EpsilonBox`] and by
    /// [`epsilon_archive`](Self::epsilon_archive).
    pub epsilons: Option<Epsilons>,

    /// Euclidean objective-space distance under which
    /// [`NondominatedArchive`] treats two solutions as the same point.
    pub duplicate_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            dominance: None,
            epsilons: None,
            duplicate_tolerance: 1e-10,
        }
    }
}

impl EngineConfig {
    /// Sets the dominance relation.
    pub fn with_dominance(mut self, kind: DominanceKind) -> Self {
        self.dominance = Some(kind);
        self
    }

    /// Sets the epsilons.
    pub fn with_epsilons(mut self, epsilons: Epsilons) -> Self {
        self.epsilons = Some(epsilons);
        self
    }

    /// Sets the duplicate tolerance.
    pub fn with_duplicate_tolerance(mut self, tolerance: f64) -> Self {
        self.duplicate_tolerance = tolerance;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`MoeaError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> MoeaResult<()> {
        if self.dominance == Some(DominanceKind::EpsilonBox) && self.epsilons.is_none() {
            return Err(MoeaError::InvalidConfig(
                "epsilon-box dominance requires epsilons".into(),
            ));
        }
        if !self.duplicate_tolerance.is_finite() || self.duplicate_tolerance < 0.0 {
            return Err(MoeaError::InvalidConfig(format!(
                "duplicate_tolerance must be finite and non-negative, got {}",
                self.duplicate_tolerance
            )));
        }
        Ok(())
    }

    /// The dominance relation for a problem with `constraint_count`
    /// constraints.
    pub fn dominance_kind(&self, constraint_count: usize) -> DominanceKind {
        self.dominance
            .unwrap_or_else(|| DominanceKind::default_for(constraint_count))
    }

    /// Builds the configured comparator.
    ///
    /// # Errors
    ///
    /// Any [`validate`](Self::validate) error.
    pub fn comparator(&self, constraint_count: usize) -> MoeaResult<AnyDominance> {
        self.validate()?;
        let cmp = match self.dominance_kind(constraint_count) {
            DominanceKind::Pareto => AnyDominance::Pareto(ParetoDominance),
            DominanceKind::Constrained => AnyDominance::Constrained(ConstrainedDominance),
            DominanceKind::Lexicographic => AnyDominance::Lexicographic(LexicographicDominance),
            DominanceKind::EpsilonBox => {
                let epsilons = self.require_epsilons()?;
                AnyDominance::EpsilonBox(EpsilonBoxDominance::new(epsilons))
            }
        };
        Ok(cmp)
    }

    /// Builds an empty epsilon-box archive.
    ///
    /// # Errors
    ///
    /// [`MoeaError::InvalidConfig`] if no epsilons are set, or any
    /// [`validate`](Self::validate) error.
    pub fn epsilon_archive(&self) -> MoeaResult<EpsilonBoxArchive> {
        self.validate()?;
        Ok(EpsilonBoxArchive::new(self.require_epsilons()?))
    }

    /// Builds an empty non-dominated archive over the configured relation.
    ///
    /// # Errors
    ///
    /// Any [`comparator`](Self::comparator) error.
    pub fn nondominated_archive(&self, constraint_count: usize) -> MoeaResult<NondominatedArchive> {
        let cmp = self.comparator(constraint_count)?;
        Ok(NondominatedArchive::new(cmp).with_duplicate_tolerance(self.duplicate_tolerance))
    }

    fn require_epsilons(&self) -> MoeaResult<Epsilons> {
        self.epsilons
            .clone()
            .ok_or_else(|| MoeaError::InvalidConfig("epsilons are not set".into()))
    }
}
