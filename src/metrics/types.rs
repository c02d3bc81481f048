use std::fmt;
use std::time::Duration;

/// Result of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A response arrived and its body was fully drained.
    Response {
        elapsed: Duration,
        status: u16,
        bytes: u64,
    },
    /// No usable response was obtained.
    Unavailable(TransportFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportFailure {
    Connect,
    Timeout,
    Body,
    Request,
    Cancelled,
    Other,
}

impl TransportFailure {
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_connect() {
            TransportFailure::Connect
        } else if err.is_body() || err.is_decode() {
            TransportFailure::Body
        } else if err.is_request() || err.is_builder() {
            TransportFailure::Request
        } else {
            TransportFailure::Other
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TransportFailure::Connect => "connect",
            TransportFailure::Timeout => "timeout",
            TransportFailure::Body => "body",
            TransportFailure::Request => "request",
            TransportFailure::Cancelled => "cancelled",
            TransportFailure::Other => "other",
        }
    }
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregate of a finished run.
///
/// `successes + failures + unavailable == total_requests` always holds, and
/// `total_requests == requested` unless the run was interrupted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: u64,
    pub total_requests: u64,
    pub successes: u64,
    pub failures: u64,
    pub unavailable: u64,
    /// Body bytes of successful responses only.
    pub bytes_received: u64,
    pub success_duration_total: Duration,
    pub average_duration: Duration,
    /// Wall-clock time from run start to the last recorded outcome.
    pub duration: Duration,
    /// Successful requests per second, in hundredths.
    pub requests_per_second_x100: u64,
    pub interrupted: bool,
}

impl RunSummary {
    /// Requests per second rendered with two decimals.
    #[must_use]
    pub fn requests_per_second(&self) -> String {
        format!(
            "{}.{:02}",
            self.requests_per_second_x100 / 100,
            self.requests_per_second_x100 % 100
        )
    }
}
