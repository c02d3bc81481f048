//! Core library for the `overload` CLI.
//!
//! `overload` fires a fixed number of GET requests at one URL through a pool
//! of concurrent workers and reports how many succeeded, failed, or never got
//! a response, along with timing and throughput. The binary wires these
//! modules together; the library exposes them so a run can be driven and
//! inspected in-process.
pub mod app;
pub mod args;
pub mod error;
pub mod http;
pub mod logger;
pub mod metrics;
pub mod shutdown;
pub mod shutdown_handlers;
