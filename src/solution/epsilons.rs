//! Epsilon tolerances for box discretization.

use crate::error::{MoeaError, MoeaResult};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Per-objective tolerances that divide objective space into boxes.
///
/// An objective value `f_i` lies in box coordinate `floor(f_i / eps_i)`.
/// When fewer tolerances than objectives are supplied, the last tolerance
/// is reused for every remaining objective: [`get`](Self::get) clamps any
/// index, up to `usize::MAX`, to the last entry.
///
/// Equality and hashing compare the stored values exactly, so `[0.1]` and
/// `[0.1, 0.1]` are different vectors even though they discretize a
/// two-objective space identically.
///
/// # Example
///
/// ```
/// use u_moea::solution::Epsilons;
///
/// let eps = Epsilons::new(vec![0.1, 0.2]).unwrap();
/// assert_eq!(eps.get(0), 0.1);
/// assert_eq!(eps.get(1), 0.2);
/// assert_eq!(eps.get(7), 0.2);
/// assert_eq!(eps.box_index(&[0.25, 0.5, 0.9]), vec![2, 2, 4]);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<f64>", into = "Vec<f64>")
)]
pub struct Epsilons {
    values: Vec<f64>,
}

impl Epsilons {
    /// Creates an epsilons vector.
    ///
    /// # Errors
    ///
    /// Returns [`MoeaError::EmptyEpsilons`] for an empty vector and
    /// [`MoeaError::InvalidEpsilon`] for any value that is not strictly
    /// positive and finite.
    pub fn new(values: impl Into<Vec<f64>>) -> MoeaResult<Self> {
        let values = values.into();
        if values.is_empty() {
            return Err(MoeaError::EmptyEpsilons);
        }
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, v)| !(v.is_finite() && **v > 0.0))
        {
            return Err(MoeaError::InvalidEpsilon { index, value });
        }
        Ok(Self { values })
    }

    /// Creates a single-value vector applied to every objective.
    pub fn uniform(epsilon: f64) -> MoeaResult<Self> {
        Self::new(vec![epsilon])
    }

    /// Tolerance for objective `index`, extended with the last value.
    pub fn get(&self, index: usize) -> f64 {
        self.values[index.min(self.values.len() - 1)]
    }

    /// Number of stored tolerances (before extension).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; construction rejects empty vectors.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored tolerances.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Returns `true` if this vector can be applied to `objective_count`
    /// objectives, i.e. it is not wider than the objective vector.
    pub fn fits(&self, objective_count: usize) -> bool {
        self.values.len() <= objective_count
    }

    /// Box coordinate of `value` along objective `index`.
    ///
    /// Saturates at the `i64` range for values far outside any sensible
    /// box grid.
    #[inline]
    pub fn box_coordinate(&self, index: usize, value: f64) -> i64 {
        (value / self.get(index)).floor() as i64
    }

    /// Box index vector of an objective vector.
    pub fn box_index(&self, objectives: &[f64]) -> Vec<i64> {
        objectives
            .iter()
            .enumerate()
            .map(|(i, &v)| self.box_coordinate(i, v))
            .collect()
    }

    /// Sum over objectives of `f_i / eps_i - floor(f_i / eps_i)`: how far the
    /// point sits from the lower corner of its box, in box units.
    pub fn residual(&self, objectives: &[f64]) -> f64 {
        objectives
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let scaled = v / self.get(i);
                scaled - scaled.floor()
            })
            .sum()
    }
}

impl PartialEq for Epsilons {
    fn eq(&self, other: &Self) -> bool {
        self.values.len() == other.values.len()
            && self
                .values
                .iter()
                .zip(&other.values)
                .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Epsilons {}

impl Hash for Epsilons {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.len().hash(state);
        for v in &self.values {
            v.to_bits().hash(state);
        }
    }
}

impl TryFrom<Vec<f64>> for Epsilons {
    type Error = MoeaError;

    fn try_from(values: Vec<f64>) -> MoeaResult<Self> {
        Self::new(values)
    }
}

impl From<Epsilons> for Vec<f64> {
    fn from(epsilons: Epsilons) -> Self {
        epsilons.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(e: &Epsilons) -> u64 {
        let mut h = DefaultHasher::new();
        e.hash(&mut h);
        h.finish()
    }

    fn eps(values: &[f64]) -> Epsilons {
        Epsilons::new(values.to_vec()).unwrap()
    }

    // ---- Construction ----

    #[test]
    fn test_rejects_empty() {
        assert_eq!(Epsilons::new(Vec::new()), Err(MoeaError::EmptyEpsilons));
    }

    #[test]
    fn test_rejects_non_positive_and_non_finite() {
        assert!(matches!(
            Epsilons::new(vec![0.1, 0.0]),
            Err(MoeaError::InvalidEpsilon { index: 1, .. })
        ));
        assert!(Epsilons::new(vec![-0.1]).is_err());
        assert!(Epsilons::new(vec![f64::NAN]).is_err());
        assert!(Epsilons::new(vec![f64::INFINITY]).is_err());
    }

    // ---- Equality / hashing ----

    #[test]
    fn test_equality_by_contents() {
        assert_eq!(eps(&[0.1]), Epsilons::uniform(0.1).unwrap());
        assert_eq!(eps(&[0.1, 0.2]), eps(&[0.1, 0.2]));
        assert_ne!(eps(&[0.1]), eps(&[0.2]));
        assert_ne!(eps(&[0.1, 0.2]), eps(&[0.1, 0.1]));
        assert_ne!(eps(&[0.1, 0.2]), eps(&[0.1, 0.2, 0.2]));
    }

    #[test]
    fn test_hash_by_contents() {
        assert_eq!(hash_of(&eps(&[0.1])), hash_of(&eps(&[0.1])));
        assert_eq!(hash_of(&eps(&[0.1, 0.2])), hash_of(&eps(&[0.1, 0.2])));
        assert_ne!(hash_of(&eps(&[0.1])), hash_of(&eps(&[0.2])));
        assert_ne!(hash_of(&eps(&[0.1, 0.2])), hash_of(&eps(&[0.1, 0.2, 0.2])));
    }

    // ---- Extension ----

    #[test]
    fn test_size() {
        assert_eq!(eps(&[0.1]).len(), 1);
        assert_eq!(eps(&[0.1, 0.2]).len(), 2);
    }

    #[test]
    fn test_last_value_extension() {
        let e = eps(&[0.1, 0.2]);
        assert_eq!(e.get(0), 0.1);
        assert_eq!(e.get(1), 0.2);
        assert_eq!(e.get(2), 0.2);
        assert_eq!(e.get(usize::MAX), 0.2);
    }

    #[test]
    fn test_fits() {
        let e = eps(&[0.1, 0.2]);
        assert!(e.fits(2));
        assert!(e.fits(5));
        assert!(!e.fits(1));
    }

    // ---- Boxes ----

    #[test]
    fn test_box_index_floors() {
        let e = eps(&[1.0]);
        assert_eq!(e.box_index(&[0.5, 10.5]), vec![0, 10]);
        assert_eq!(e.box_index(&[-0.5, 2.0]), vec![-1, 2]);
    }

    #[test]
    fn test_residual() {
        let e = eps(&[1.0]);
        assert_eq!(e.residual(&[0.0, 10.0]), 0.0);
        assert!((e.residual(&[0.5, 10.5]) - 1.0).abs() < 1e-12);
        assert!((e.residual(&[-0.25, 3.0]) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_box_coordinate_saturates() {
        let e = eps(&[1e-300]);
        assert_eq!(e.box_coordinate(0, 1e300), i64::MAX);
        assert_eq!(e.box_coordinate(0, -1e300), i64::MIN);
    }
}
