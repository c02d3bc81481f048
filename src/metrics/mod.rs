//! Outcome classification and result aggregation.
mod classify;
mod collector;
mod types;


pub use classify::{Classification, FAILURE_STATUS_THRESHOLD, classify};
pub use collector::setup_result_collector;
pub use types::{Outcome, RunSummary, TransportFailure};
