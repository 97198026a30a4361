//! Mutex-guarded archive handle for concurrent evaluators.

use super::epsilon_box::EpsilonBoxArchive;
use super::types::{AddOutcome, Archive};
use crate::error::{MoeaError, MoeaResult};
use crate::solution::Solution;
use std::sync::{Arc, Mutex, MutexGuard};

/// Cloneable handle to an archive shared between threads.
///
/// Every operation takes the lock for its whole duration, so the
/// compare-then-mutate sequence of [`Archive::try_add`] never interleaves
/// with another add. Clones refer to the same archive.
///
/// # Example
///
/// ```
/// use u_moea::archive::{EpsilonBoxArchive, SharedArchive};
/// use u_moea::solution::{Epsilons, Solution};
///
/// let shared = SharedArchive::new(EpsilonBoxArchive::new(Epsilons::uniform(0.1).unwrap()));
/// std::thread::scope(|scope| {
///     for t in 0..4 {
///         let handle = shared.clone();
///         scope.spawn(move || {
///             let x = t as f64;
///             handle.add(Solution::from_objectives([x, 3.0 - x])).unwrap();
///         });
///     }
/// });
/// assert_eq!(shared.len().unwrap(), 4);
/// ```
#[derive(Debug)]
pub struct SharedArchive<A: Archive = EpsilonBoxArchive> {
    inner: Arc<Mutex<A>>,
}

impl<A: Archive> Clone for SharedArchive<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Archive> SharedArchive<A> {
    /// Wraps `archive`.
    pub fn new(archive: A) -> Self {
        Self {
            inner: Arc::new(Mutex::new(archive)),
        }
    }

    fn lock(&self) -> MoeaResult<MutexGuard<'_, A>> {
        self.inner.lock().map_err(|_| {
            tracing::error!("shared archive lock poisoned");
            MoeaError::LockPoisoned
        })
    }

    /// Offers `solution` under the lock.
    ///
    /// # Errors
    ///
    /// [`MoeaError::LockPoisoned`] if another thread panicked while holding
    /// the lock, or any error of the wrapped archive's `try_add`.
    pub fn add(&self, solution: Solution) -> MoeaResult<AddOutcome> {
        self.lock()?.try_add(solution)
    }

    /// Number of retained solutions.
    pub fn len(&self) -> MoeaResult<usize> {
        Ok(self.lock()?.len())
    }

    /// Returns `true` if nothing is retained.
    pub fn is_empty(&self) -> MoeaResult<bool> {
        Ok(self.lock()?.is_empty())
    }

    /// Copies the retained solutions out of the archive.
    pub fn snapshot(&self) -> MoeaResult<Vec<Solution>> {
        Ok(self.lock()?.solutions().to_vec())
    }

    /// Runs `f` with exclusive access to the archive.
    pub fn with<R>(&self, f: impl FnOnce(&mut A) -> R) -> MoeaResult<R> {
        let mut guard = self.lock()?;
        Ok(f(&mut guard))
    }

    /// Returns the archive if this is the last handle, otherwise gives the
    /// handle back as `Ok(Err(handle))`.
    ///
    /// # Errors
    ///
    /// [`MoeaError::LockPoisoned`] if this is the last handle but another
    /// thread panicked while holding the lock. The archive may be half
    /// updated and is dropped.
    pub fn try_unwrap(self) -> MoeaResult<Result<A, Self>> {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().map(Ok).map_err(|_| {
                tracing::error!("shared archive lock poisoned");
                MoeaError::LockPoisoned
            }),
            Err(inner) => Ok(Err(Self { inner })),
        }
    }
}
