//! Guards a game session against applying the result of a request it has since abandoned

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one generation request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(u64);

/// Tracks which request is current. A result only applies if its request is still current
/// when the result arrives.
#[derive(Debug, Default)]
pub struct RequestTracker {
    next: AtomicU64,
    current: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a request, superseding any request in flight
    pub fn begin(&self) -> RequestId {
        let id = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        // racing begins keep the newest id current
        self.current.fetch_max(id, Ordering::SeqCst);
        RequestId(id)
    }

    /// Leaves no request current
    pub fn abandon(&self) {
        self.current.store(0, Ordering::SeqCst);
    }

    pub fn is_current(&self, id: RequestId) -> bool {
        self.current.load(Ordering::SeqCst) == id.0
    }

    /// Returns `value` if `id` is still current, or discards it
    pub fn commit<T>(&self, id: RequestId, value: T) -> Option<T> {
        if self.is_current(id) {
            Some(value)
        } else {
            debug!("Discarding result of stale request {}", id.0);
            None
        }
    }
}
