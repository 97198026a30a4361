//! Ordered solution container for generational algorithms.
//!
//! [`Population`] owns its members and exposes the ranking operations of
//! [`crate::ranking`] directly, so a generational loop can merge parents and
//! offspring, then cut back to size with a single [`Population::truncate`].

use crate::dominance::DominanceComparator;
use crate::ranking::{self, NondominatedSortResult, Ranked};
use crate::solution::{Evaluated, Solution};
use std::ops::Index;

/// An ordered collection of evaluated solutions.
///
/// # Example
///
/// ```
/// use u_moea::dominance::ParetoDominance;
/// use u_moea::population::Population;
/// use u_moea::solution::Solution;
///
/// let mut pop: Population = [[1.0, 4.0], [2.0, 2.0], [4.0, 1.0], [3.0, 3.0]]
///     .into_iter()
///     .map(Solution::from_objectives)
///     .collect();
///
/// let survivors = pop.truncate(3, &ParetoDominance);
/// assert_eq!(pop.len(), 3);
/// assert!(survivors.iter().all(|r| r.rank == 0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Population<S = Solution> {
    members: Vec<S>,
}

impl<S> Default for Population<S> {
    fn default() -> Self {
        Self {
            members: Vec::new(),
        }
    }
}

impl<S> Population<S> {
    /// Creates an empty population.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty population with room for `capacity` members.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: Vec::with_capacity(capacity),
        }
    }

    /// Appends a member.
    pub fn push(&mut self, solution: S) {
        self.members.push(solution);
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Iterates over members in order.
    pub fn iter(&self) -> std::slice::Iter<'_, S> {
        self.members.iter()
    }

    /// Members as a slice.
    pub fn as_slice(&self) -> &[S] {
        &self.members
    }

    /// Consumes the population, returning its members.
    pub fn into_vec(self) -> Vec<S> {
        self.members
    }
}

impl<S: Evaluated + Sync> Population<S> {
    /// Fast non-dominated sort of the current members.
    ///
    /// # Panics
    ///
    /// Panics if members disagree on objective or constraint width.
    pub fn non_dominated_sort<C: DominanceComparator>(&self, comparator: &C) -> NondominatedSortResult {
        ranking::non_dominated_sort(&self.members, comparator)
    }

    /// Rank and crowding distance of every member, aligned with the
    /// population order.
    pub fn rank_and_crowd<C: DominanceComparator>(&self, comparator: &C) -> Vec<Ranked> {
        ranking::assign_rank_and_crowding(&self.members, comparator)
    }

    /// Keeps the best `k` members by rank, then crowding distance.
    ///
    /// Members are reordered into survivor order (see
    /// [`ranking::truncate`]) and the returned rows are re-indexed so that
    /// `rows[i].index == i` refers to the new position.
    pub fn truncate<C: DominanceComparator>(&mut self, k: usize, comparator: &C) -> Vec<Ranked> {
        let mut survivors = ranking::truncate(&self.members, k, comparator);

        let mut slots: Vec<Option<S>> = std::mem::take(&mut self.members)
            .into_iter()
            .map(Some)
            .collect();
        self.members = survivors
            .iter()
            .filter_map(|row| slots[row.index].take())
            .collect();

        for (position, row) in survivors.iter_mut().enumerate() {
            row.index = position;
        }
        survivors
    }
}

impl<S> Extend<S> for Population<S> {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<S> FromIterator<S> for Population<S> {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<S> From<Vec<S>> for Population<S> {
    fn from(members: Vec<S>) -> Self {
        Self { members }
    }
}

impl<S> IntoIterator for Population<S> {
    type Item = S;
    type IntoIter = std::vec::IntoIter<S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, S> IntoIterator for &'a Population<S> {
    type Item = &'a S;
    type IntoIter = std::slice::Iter<'a, S>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl<S> Index<usize> for Population<S> {
    type Output = S;

    fn index(&self, index: usize) -> &S {
        &self.members[index]
    }
}
