//! Request template, shared client, and the feeder/worker pipeline.
mod client;
mod execution;
mod sender;
mod template;

#[cfg(test)]
mod tests;

pub use client::{ClientSettings, build_client};
pub use sender::{HANDOFF_CAPACITY, RunContext, setup_request_sender};
pub use template::RequestSpec;
