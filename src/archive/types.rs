//! Archive trait and shared result types.

use crate::error::{MoeaError, MoeaResult};
use crate::solution::{Evaluated, Solution, Variable};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of offering a solution to an archive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AddOutcome {
    /// The candidate was dominated or lost a tie; the archive is unchanged.
    Rejected,
    /// The candidate was stored after evicting `replaced` entries.
    Added { replaced: usize },
}

impl AddOutcome {
    /// Returns `true` if the candidate was stored.
    pub fn is_added(&self) -> bool {
        matches!(self, AddOutcome::Added { .. })
    }

    /// Number of evicted entries (0 when rejected).
    pub fn replaced(&self) -> usize {
        match self {
            AddOutcome::Added { replaced } => *replaced,
            AddOutcome::Rejected => 0,
        }
    }
}

/// Improvement counters maintained across the archive's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArchiveStats {
    /// Candidates offered.
    pub offered: u64,
    /// Candidates accepted.
    pub improvements: u64,
    /// Accepted candidates that opened a new box or dominated a retained
    /// entry, as opposed to only displacing a same-box occupant.
    pub dominating_improvements: u64,
}

/// One exported archive entry, detached from the archive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArchiveRecord {
    pub objectives: Vec<f64>,
    pub constraints: Vec<f64>,
    pub variables: Vec<Variable>,
}

impl From<&Solution> for ArchiveRecord {
    fn from(s: &Solution) -> Self {
        Self {
            objectives: s.objectives().to_vec(),
            constraints: s.constraints().to_vec(),
            variables: s.variables().to_vec(),
        }
    }
}

/// A mutable approximation set fed one solution at a time.
pub trait Archive: Send {
    /// Offers `solution`, returning whether it was kept.
    ///
    /// # Errors
    ///
    /// Dimension errors when `solution` does not match the archive's
    /// established objective or constraint width.
    fn try_add(&mut self, solution: Solution) -> MoeaResult<AddOutcome>;

    /// Retained solutions, in insertion order.
    fn solutions(&self) -> &[Solution];

    /// Lifetime counters.
    fn stats(&self) -> ArchiveStats;

    /// Offers `solution`, failing fast on a dimension mismatch.
    ///
    /// # Panics
    ///
    /// Panics with the [`MoeaError`] message if [`try_add`](Self::try_add)
    /// fails.
    fn add(&mut self, solution: Solution) -> AddOutcome {
        self.try_add(solution).unwrap_or_else(|err| panic!("{err}"))
    }

    /// Offers every solution in order; returns how many were accepted.
    fn add_all<I>(&mut self, solutions: I) -> usize
    where
        I: IntoIterator<Item = Solution>,
        Self: Sized,
    {
        solutions
            .into_iter()
            .map(|s| self.add(s))
            .filter(AddOutcome::is_added)
            .count()
    }

    /// Number of retained solutions.
    fn len(&self) -> usize {
        self.solutions().len()
    }

    /// Returns `true` if nothing is retained.
    fn is_empty(&self) -> bool {
        self.solutions().is_empty()
    }

    /// Detached copies of the retained entries.
    fn export(&self) -> Vec<ArchiveRecord> {
        self.solutions().iter().map(ArchiveRecord::from).collect()
    }

    /// Objective vectors of the retained entries.
    fn objectives_matrix(&self) -> Vec<Vec<f64>> {
        self.solutions()
            .iter()
            .map(|s| s.objectives().to_vec())
            .collect()
    }
}

/// Established widths of an archive; fixed by the first accepted call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Dimensions {
    width: Option<(usize, usize)>,
}

impl Dimensions {
    pub(crate) fn fixed(objectives: usize, constraints: usize) -> Self {
        Self {
            width: Some((objectives, constraints)),
        }
    }

    pub(crate) fn objectives(&self) -> Option<usize> {
        self.width.map(|(m, _)| m)
    }

    /// Checks `solution` against the established widths, establishing them
    /// on first use.
    pub(crate) fn check(&mut self, solution: &Solution) -> MoeaResult<()> {
        let actual = (solution.objective_count(), solution.constraint_count());
        match self.width {
            None => {
                self.width = Some(actual);
                Ok(())
            }
            Some((m, _)) if m != actual.0 => Err(MoeaError::ObjectiveCountMismatch {
                expected: m,
                actual: actual.0,
            }),
            Some((_, c)) if c != actual.1 => Err(MoeaError::ConstraintCountMismatch {
                expected: c,
                actual: actual.1,
            }),
            Some(_) => Ok(()),
        }
    }
}
