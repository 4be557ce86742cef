//! Single-flight memoization.
//!
//! [`SingleFlight`] computes a value at most once, even when many tasks ask
//! for it at the same time: the first caller runs the initializer and the
//! others wait on the same in-flight computation.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::OnceCell;

/// Get-or-compute-once holder for a shared value.
///
/// A failed initialization leaves the holder empty, so the next caller
/// retries. [`SingleFlight::invalidate`] drops the value; callers already
/// waiting on an in-flight computation still receive its result.
#[derive(Debug)]
pub struct SingleFlight<T> {
    cell: Mutex<Arc<OnceCell<Arc<T>>>>,
}

impl<T> SingleFlight<T> {
    /// Creates an empty holder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cell: Mutex::new(Arc::new(OnceCell::new())),
        }
    }

    /// Returns the value, running `init` if no value is present and no
    /// computation is in flight.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `init`.
    pub async fn get_or_try_init<E, F, Fut>(&self, init: F) -> Result<Arc<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let cell = self.current();
        let value = cell
            .get_or_try_init(|| async move { init().await.map(Arc::new) })
            .await?;
        Ok(Arc::clone(value))
    }

    /// Returns the value if it has already been computed.
    #[must_use]
    pub fn get(&self) -> Option<Arc<T>> {
        self.current().get().cloned()
    }

    /// Drops the current value so the next access recomputes it.
    pub fn invalidate(&self) {
        let mut cell = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
        *cell = Arc::new(OnceCell::new());
    }

    fn current(&self) -> Arc<OnceCell<Arc<T>>> {
        Arc::clone(&self.cell.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl<T> Default for SingleFlight<T> {
    fn default() -> Self {
        Self::new()
    }
}
