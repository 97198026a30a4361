//! Solution representation and the [`Evaluated`] view.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Read-only view of an evaluated candidate.
///
/// All objectives are **minimized**. Constraint values are violation
/// magnitudes: a candidate is feasible iff every value is exactly zero.
///
/// Implemented for [`Solution`], plain objective vectors (`Vec<f64>`,
/// `[f64]`, `[f64; N]`) which are treated as unconstrained, and for
/// references to any implementor.
pub trait Evaluated {
    /// Objective values, one per objective.
    fn objectives(&self) -> &[f64];

    /// Constraint-violation magnitudes. Unconstrained by default.
    fn constraints(&self) -> &[f64] {
        &[]
    }

    /// Number of objectives.
    fn objective_count(&self) -> usize {
        self.objectives().len()
    }

    /// Returns `true` if every constraint value is exactly zero.
    fn is_feasible(&self) -> bool {
        self.constraints().iter().all(|&c| c == 0.0)
    }

    /// Sum of absolute constraint violations.
    fn total_violation(&self) -> f64 {
        self.constraints().iter().map(|c| c.abs()).sum()
    }
}

impl Evaluated for [f64] {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl Evaluated for Vec<f64> {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl<const N: usize> Evaluated for [f64; N] {
    fn objectives(&self) -> &[f64] {
        self
    }
}

impl<T: Evaluated + ?Sized> Evaluated for &T {
    fn objectives(&self) -> &[f64] {
        (**self).objectives()
    }

    fn constraints(&self) -> &[f64] {
        (**self).constraints()
    }
}

/// A single decision-variable value.
///
/// The engine carries variables through archives and exports but never
/// reads them; encodings and variation operators live with the caller.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Variable {
    /// Real value within `[lower, upper]`.
    Real { value: f64, lower: f64, upper: f64 },

    /// Integer value within `[lower, upper]`.
    Integer { value: i64, lower: i64, upper: i64 },

    /// Ordering of `0..n`.
    Permutation(Vec<usize>),

    /// Members chosen from `0..universe`, with `min_size..=max_size` members.
    /// A fixed-size subset has `min_size == max_size`.
    Subset {
        members: Vec<usize>,
        universe: usize,
        min_size: usize,
        max_size: usize,
    },

    /// Bit vector.
    Binary(Vec<bool>),
}

impl Variable {
    /// Short name of the encoding, for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Variable::Real { .. } => "real",
            Variable::Integer { .. } => "integer",
            Variable::Permutation(_) => "permutation",
            Variable::Subset { .. } => "subset",
            Variable::Binary(_) => "binary",
        }
    }
}

/// An evaluated candidate solution.
///
/// Created once per evaluation by the caller's evaluator. The objective and
/// constraint vectors are fixed at construction; clones are fully
/// independent, so archives can keep solutions across generations.
///
/// Per-algorithm annotations such as rank or crowding distance are not
/// stored here. They are returned as side tables by
/// [`ranking`](crate::ranking) functions.
///
/// # Example
///
/// ```
/// use u_moea::solution::{Evaluated, Solution, Variable};
///
/// let s = Solution::new(
///     vec![Variable::Real { value: 0.5, lower: 0.0, upper: 1.0 }],
///     vec![1.0, 2.0],
///     vec![0.0, 0.25],
/// );
/// assert_eq!(s.objective_count(), 2);
/// assert!(!s.is_feasible());
/// assert_eq!(s.total_violation(), 0.25);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    variables: Vec<Variable>,
    objectives: Vec<f64>,
    constraints: Vec<f64>,
}

impl Solution {
    /// Creates a solution from fully evaluated parts.
    pub fn new(variables: Vec<Variable>, objectives: Vec<f64>, constraints: Vec<f64>) -> Self {
        Self {
            variables,
            objectives,
            constraints,
        }
    }

    /// Creates an unconstrained solution with no variables.
    ///
    /// Mostly useful for tests and for archiving reference points.
    pub fn from_objectives(objectives: impl Into<Vec<f64>>) -> Self {
        Self::new(Vec::new(), objectives.into(), Vec::new())
    }

    /// Replaces the constraint vector. Intended for construction chains.
    pub fn with_constraints(mut self, constraints: impl Into<Vec<f64>>) -> Self {
        self.constraints = constraints.into();
        self
    }

    /// Replaces the variable vector. Intended for construction chains.
    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.variables = variables;
        self
    }

    /// Decision variables.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// Number of decision variables.
    pub fn variable_count(&self) -> usize {
        self.variables.len()
    }

    /// Number of constraints.
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }
}

impl Evaluated for Solution {
    fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    fn constraints(&self) -> &[f64] {
        &self.constraints
    }
}
