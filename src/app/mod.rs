//! Run orchestration and reporting.
mod runner;
mod summary;


pub use runner::run_load_test;
pub use summary::{print_summary, render_json, summary_lines};
