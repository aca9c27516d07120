//! Per-asset in-flight tracking.

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use medialib_core::error::AppError;
use medialib_core::result::AppResult;
use medialib_core::types::AssetId;

/// Rejects a mutation while another one on the same asset is running.
#[derive(Debug, Clone, Default)]
pub struct InFlightGuard {
    active: Arc<DashMap<AssetId, &'static str>>,
}

impl InFlightGuard {
    /// Create an empty guard.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `id` for `operation`, or fail with `Conflict`.
    ///
    /// The claim is released when the returned permit is dropped.
    pub fn acquire(&self, id: AssetId, operation: &'static str) -> AppResult<InFlightPermit> {
        match self.active.entry(id) {
            Entry::Occupied(running) => Err(AppError::conflict(format!(
                "Asset {id} is busy: {} already in progress",
                running.get()
            ))),
            Entry::Vacant(slot) => {
                slot.insert(operation);
                Ok(InFlightPermit {
                    id,
                    active: Arc::clone(&self.active),
                })
            }
        }
    }

    /// Whether any operation currently holds `id`.
    pub fn is_busy(&self, id: AssetId) -> bool {
        self.active.contains_key(&id)
    }
}

/// Releases an in-flight claim on drop.
#[derive(Debug)]
pub struct InFlightPermit {
    id: AssetId,
    active: Arc<DashMap<AssetId, &'static str>>,
}

impl Drop for InFlightPermit {
    fn drop(&mut self) {
        self.active.remove(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medialib_core::ErrorKind;

    #[test]
    fn test_second_claim_conflicts_until_release() {
        let guard = InFlightGuard::new();
        let id = AssetId::new();

        let permit = guard.acquire(id, "hard delete").unwrap();
        let err = guard.acquire(id, "rename").unwrap_err();
        assert!(err.is(ErrorKind::Conflict));
        assert!(err.message.contains("hard delete"));

        drop(permit);
        assert!(!guard.is_busy(id));
        assert!(guard.acquire(id, "rename").is_ok());
    }
}
