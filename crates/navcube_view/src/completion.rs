use std::sync::Arc;

use parking_lot::Mutex;

use crate::MoveError;

/// Shared handle that is resolved exactly once when a move or drain finishes.
///
/// Clones observe the same result. Only the first resolution counts.
#[derive(Debug, Default, Clone)]
pub struct Completion(Arc<Mutex<Option<Result<(), MoveError>>>>);
impl Completion {
    /// Returns a new unresolved handle.
    pub fn new() -> Self {
        Self::default()
    }
    /// Returns a handle that is already resolved.
    pub fn resolved(result: Result<(), MoveError>) -> Self {
        Self(Arc::new(Mutex::new(Some(result))))
    }

    /// Resolves the handle if it has not been resolved yet.
    pub(crate) fn resolve(&self, result: Result<(), MoveError>) {
        let mut slot = self.0.lock();
        if slot.is_none() {
            *slot = Some(result);
        }
    }

    /// Returns whether the handle has been resolved.
    pub fn is_resolved(&self) -> bool {
        self.0.lock().is_some()
    }
    /// Returns the result, or `None` if the handle is still pending.
    pub fn result(&self) -> Option<Result<(), MoveError>> {
        self.0.lock().clone()
    }
    /// Returns whether both handles refer to the same signal.
    pub fn same_as(&self, other: &Completion) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}
