mod app_state;

pub use app_state::{AppState, MAX_FILES_PER_REQUEST};
