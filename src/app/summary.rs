use std::io::Write;

use serde::Serialize;

use crate::{args::OutputFormat, error::AppResult, metrics::RunSummary};

/// Text report, one line per field.
#[must_use]
pub fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let mut lines = vec![
        format!("# Requests: {}", summary.total_requests),
        format!("# Successes: {}", summary.successes),
        format!("# Failures: {}", summary.failures),
        format!("# Unavailable: {}", summary.unavailable),
        format!("Duration: {:?}", summary.duration),
        format!("Average Request Duration: {:?}", summary.average_duration),
        format!("Requests Per Second: {}", summary.requests_per_second()),
        format!(
            "Bytes Received (excluding headers): {}",
            summary.bytes_received
        ),
    ];
    if summary.interrupted {
        lines.push(format!(
            "Interrupted: {} of {} requests recorded",
            summary.total_requests, summary.requested
        ));
    }
    lines
}

#[derive(Debug, Serialize)]
struct JsonSummary<'a> {
    requested: u64,
    requests: u64,
    successes: u64,
    failures: u64,
    unavailable: u64,
    duration_ms: u64,
    average_request_duration_ms: u64,
    requests_per_second: &'a str,
    bytes_received: u64,
    interrupted: bool,
}

fn millis(duration: std::time::Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Single-line JSON report.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(summary: &RunSummary) -> AppResult<String> {
    let rps = summary.requests_per_second();
    let payload = JsonSummary {
        requested: summary.requested,
        requests: summary.total_requests,
        successes: summary.successes,
        failures: summary.failures,
        unavailable: summary.unavailable,
        duration_ms: millis(summary.duration),
        average_request_duration_ms: millis(summary.average_duration),
        requests_per_second: &rps,
        bytes_received: summary.bytes_received,
        interrupted: summary.interrupted,
    };
    Ok(serde_json::to_string(&payload)?)
}

/// Writes the report to stdout.
///
/// # Errors
///
/// Returns an error if stdout cannot be written or JSON rendering fails.
pub fn print_summary(summary: &RunSummary, format: OutputFormat) -> AppResult<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Text => {
            for line in summary_lines(summary) {
                writeln!(out, "{}", line)?;
            }
        }
        OutputFormat::Json => writeln!(out, "{}", render_json(summary)?)?,
    }
    out.flush()?;
    Ok(())
}
