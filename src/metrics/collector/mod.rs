mod state;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::{debug, info, warn};

use crate::shutdown::{ShutdownReceiver, is_shutdown, wait_for_shutdown};

use super::{Outcome, RunSummary};
pub(crate) use state::SummaryAccumulator;
#[cfg(test)]
pub(crate) use state::{average_duration, requests_per_second_x100};

/// Spawns the aggregator. It consumes outcomes until `requested` have been
/// recorded, or until every producer has gone away after a shutdown, and
/// resolves to the run summary.
#[must_use]
pub fn setup_result_collector(
    requested: u64,
    run_start: Instant,
    shutdown_rx: &ShutdownReceiver,
    mut results_rx: mpsc::Receiver<Outcome>,
) -> JoinHandle<RunSummary> {
    let mut shutdown_rx = shutdown_rx.clone();

    tokio::spawn(async move {
        let mut state = SummaryAccumulator::default();
        let mut draining = is_shutdown(&shutdown_rx);

        while state.recorded() < requested {
            tokio::select! {
                maybe_outcome = results_rx.recv() => {
                    let Some(outcome) = maybe_outcome else {
                        break;
                    };
                    let class = state.record(&outcome);
                    debug!("Recorded outcome {:?} as {:?}", outcome, class);
                }
                () = wait_for_shutdown(&mut shutdown_rx), if !draining => {
                    info!("Shutdown requested; collecting in-flight requests.");
                    draining = true;
                }
            }
        }

        let summary = state.finish(requested, run_start.elapsed());
        if summary.interrupted {
            warn!(
                "Run interrupted: recorded {} of {} requests.",
                summary.total_requests, summary.requested
            );
        }
        summary
    })
}
