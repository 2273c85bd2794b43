//! Turns raw completion text into typed records.
//!
//! Model output is loosely structured, so every parser here has an explicit default:
//! missing labeled fields become `N/A`, an unrecognized verdict stays `Unknown`, and
//! only tool-call replies can fail (no call made, or arguments that do not decode).

mod key_values;
mod project_lines;
mod tool_arguments;

pub use key_values::{parse_key_values, parse_labeled_classification};
pub use project_lines::{ProjectLineFilter, parse_project_lines};
pub use tool_arguments::{ParseError, parse_tool_arguments};

pub const SUMMARY_KEY: &str = "Summary";
pub const VERDICT_KEY: &str = "Include or Exclude";
pub const REASON_KEY: &str = "Reason";
