//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;


pub use cli::LoadArgs;
pub use parsers::parse_header;
pub use types::{OutputFormat, PositiveUsize};

pub(crate) use defaults::DEFAULT_USER_AGENT;
