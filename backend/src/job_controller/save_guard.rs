//! Single-flight guard for matrix saves.
//!
//! The dashboard can fire a second save of the same matrix before the
//! first one resolves (double click, impatient retry). Overlapping saves
//! of one matrix race on the same row, so the save handler takes a slot
//! here first and releases it when the write finishes; a save that finds
//! the slot taken is rejected with `409 Conflict`.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct SaveGuard {
    in_flight: Arc<RwLock<HashSet<String>>>,
}

impl SaveGuard {
    pub fn new() -> SaveGuard {
        SaveGuard::default()
    }

    /// Claims the slot for `matrix_id`. Returns false when a save for
    /// that matrix is already in flight.
    pub async fn try_begin(&self, matrix_id: &str) -> bool {
        let mut in_flight = self.in_flight.write().await;
        in_flight.insert(matrix_id.to_string())
    }

    /// Releases the slot. Must be called on every exit path of the save,
    /// success or failure.
    pub async fn finish(&self, matrix_id: &str) {
        let mut in_flight = self.in_flight.write().await;
        in_flight.remove(matrix_id);
    }
}
