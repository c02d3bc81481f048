use std::time::Duration;

use super::super::classify::{Classification, classify};
use super::super::types::{Outcome, RunSummary};

/// Running tallies for one load test. Only commutative updates, so outcomes
/// may be recorded in any order.
#[derive(Debug, Default)]
pub(crate) struct SummaryAccumulator {
    total: u64,
    successes: u64,
    failures: u64,
    unavailable: u64,
    bytes_received: u64,
    success_duration: Duration,
}

impl SummaryAccumulator {
    pub(crate) fn record(&mut self, outcome: &Outcome) -> Classification {
        let class = classify(outcome);
        self.total = self.total.saturating_add(1);
        match class {
            Classification::Success => {
                self.successes = self.successes.saturating_add(1);
                if let Outcome::Response { elapsed, bytes, .. } = outcome {
                    self.bytes_received = self.bytes_received.saturating_add(*bytes);
                    self.success_duration = self.success_duration.saturating_add(*elapsed);
                }
            }
            Classification::Failure => {
                self.failures = self.failures.saturating_add(1);
            }
            Classification::Unavailable => {
                self.unavailable = self.unavailable.saturating_add(1);
            }
        }
        class
    }

    pub(crate) const fn recorded(&self) -> u64 {
        self.total
    }

    pub(crate) fn finish(self, requested: u64, wall: Duration) -> RunSummary {
        RunSummary {
            requested,
            total_requests: self.total,
            successes: self.successes,
            failures: self.failures,
            unavailable: self.unavailable,
            bytes_received: self.bytes_received,
            success_duration_total: self.success_duration,
            average_duration: average_duration(self.success_duration, self.successes),
            duration: wall,
            requests_per_second_x100: requests_per_second_x100(self.successes, wall),
            interrupted: self.total < requested,
        }
    }
}

/// Zero when nothing succeeded.
pub(crate) fn average_duration(total: Duration, successes: u64) -> Duration {
    let nanos = total
        .as_nanos()
        .checked_div(u128::from(successes))
        .unwrap_or(0);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

/// Fixed-point successes per second. Wall time is clamped to 1µs so a run
/// that finishes instantly still yields a finite rate.
pub(crate) fn requests_per_second_x100(successes: u64, wall: Duration) -> u64 {
    if successes == 0 {
        return 0;
    }
    let micros = wall.as_micros().max(1);
    let scaled = u128::from(successes)
        .saturating_mul(100_000_000)
        .checked_div(micros)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
