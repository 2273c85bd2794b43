use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::domain::BatchId;

/// Shared stop request for a running batch. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag(Arc<AtomicBool>);

impl CancellationFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Cancellation flags of batches that have not finished yet.
#[derive(Debug, Clone, Default)]
pub struct CancellationRegistry {
    flags: Arc<Mutex<HashMap<BatchId, CancellationFlag>>>,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, batch_id: BatchId) -> CancellationFlag {
        let flag = CancellationFlag::new();
        self.flags.lock().insert(batch_id, flag.clone());
        flag
    }

    /// Returns false when the batch is unknown or already finished.
    pub fn cancel(&self, batch_id: BatchId) -> bool {
        match self.flags.lock().get(&batch_id) {
            Some(flag) => {
                flag.cancel();
                true
            }
            None => false,
        }
    }

    pub fn release(&self, batch_id: BatchId) {
        self.flags.lock().remove(&batch_id);
    }
}
