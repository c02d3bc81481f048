use clap::Parser;
use clap::builder::FalseyValueParser;
use std::time::Duration;

use super::parsers::{parse_duration_arg, parse_header, parse_positive_usize};
use super::types::{OutputFormat, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "overload",
    version,
    override_usage = "overload [OPTIONS] <URL>",
    about = "Fire a fixed number of GET requests at a URL across concurrent workers and report throughput and latency."
)]
pub struct LoadArgs {
    /// Number of requests to make
    #[arg(
        long = "num-requests",
        short = 'r',
        default_value_t = 1,
        env = "OVERLOAD_NUM_REQUESTS"
    )]
    pub num_requests: u64,

    /// Number of concurrent connections to make
    #[arg(
        long = "concurrent",
        short = 'c',
        default_value = "1",
        value_parser = parse_positive_usize,
        env = "OVERLOAD_CONCURRENT"
    )]
    pub concurrent: PositiveUsize,

    /// Use keep alive connection
    #[arg(
        long = "keep-alive",
        short = 'k',
        env = "OVERLOAD_KEEP_ALIVE",
        value_parser = FalseyValueParser::new()
    )]
    pub keep_alive: bool,

    /// Header to include in request, 'Name:Value' (can be used multiple times)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Disable gzip accept encoding
    #[arg(
        long = "no-gzip",
        env = "OVERLOAD_NO_GZIP",
        value_parser = FalseyValueParser::new()
    )]
    pub no_gzip: bool,

    /// Validate TLS certificates
    #[arg(
        long = "secure-tls",
        env = "OVERLOAD_SECURE_TLS",
        value_parser = FalseyValueParser::new()
    )]
    pub secure_tls: bool,

    /// Per-request deadline; a request exceeding it counts as unavailable (supports ms/s/m/h)
    #[arg(
        long = "timeout",
        default_value = "30s",
        value_parser = parse_duration_arg,
        env = "OVERLOAD_TIMEOUT"
    )]
    pub request_timeout: Duration,

    /// Timeout for establishing a new connection (supports ms/s/m/h)
    #[arg(
        long = "connect-timeout",
        default_value = "10s",
        value_parser = parse_duration_arg,
        env = "OVERLOAD_CONNECT_TIMEOUT"
    )]
    pub connect_timeout: Duration,

    /// Stop dispatching and abandon in-flight requests after this long (supports ms/s/m/h)
    #[arg(
        long = "max-duration",
        value_parser = parse_duration_arg,
        env = "OVERLOAD_MAX_DURATION"
    )]
    pub max_duration: Option<Duration>,

    /// Summary output format
    #[arg(
        long = "output-format",
        value_enum,
        default_value_t = OutputFormat::Text,
        env = "OVERLOAD_OUTPUT_FORMAT"
    )]
    pub output_format: OutputFormat,

    /// Enable verbose logging (sets log level to debug unless overridden by OVERLOAD_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable colored log output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Target URL
    #[arg(value_name = "URL")]
    pub url: String,
}
