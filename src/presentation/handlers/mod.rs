mod batches;
mod error_response;
mod export;
mod health;

pub use batches::{
    batch_results_handler, batch_status_handler, cancel_batch_handler, create_batch_handler,
};
pub use error_response::ErrorResponse;
pub use export::{pages_csv_handler, projects_csv_handler};
pub use health::health_handler;
