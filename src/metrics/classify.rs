use super::types::Outcome;

/// Lowest status code counted as a failure.
pub const FAILURE_STATUS_THRESHOLD: u16 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Success,
    Failure,
    Unavailable,
}

/// Buckets an outcome: transport errors are unavailable, statuses at or
/// above 400 are failures, anything else is a success.
#[must_use]
pub const fn classify(outcome: &Outcome) -> Classification {
    match outcome {
        Outcome::Unavailable(_) => Classification::Unavailable,
        Outcome::Response { status, .. } if *status >= FAILURE_STATUS_THRESHOLD => {
            Classification::Failure
        }
        Outcome::Response { .. } => Classification::Success,
    }
}
