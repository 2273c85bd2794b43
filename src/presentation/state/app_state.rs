use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::ports::BatchRepository;
use crate::application::services::{BatchMessage, CancellationRegistry};

/// Maximum number of files a single upload request is sized for.
pub const MAX_FILES_PER_REQUEST: usize = 16;

#[derive(Clone)]
pub struct AppState {
    pub batch_repository: Arc<dyn BatchRepository>,
    pub batch_sender: mpsc::Sender<BatchMessage>,
    pub cancellations: CancellationRegistry,
    pub max_file_size_mb: usize,
}

impl AppState {
    pub fn new(
        batch_repository: Arc<dyn BatchRepository>,
        batch_sender: mpsc::Sender<BatchMessage>,
        cancellations: CancellationRegistry,
        max_file_size_mb: usize,
    ) -> Self {
        Self {
            batch_repository,
            batch_sender,
            cancellations,
            max_file_size_mb,
        }
    }

    pub fn max_file_bytes(&self) -> usize {
        self.max_file_size_mb * 1024 * 1024
    }

    pub fn max_request_bytes(&self) -> usize {
        self.max_file_bytes() * MAX_FILES_PER_REQUEST
    }
}
