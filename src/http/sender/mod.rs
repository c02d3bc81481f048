mod feeder;
mod worker;

use std::sync::Arc;

use reqwest::Client;
use tokio::{sync::mpsc, task::JoinHandle};
use tracing::warn;

use crate::{metrics::Outcome, shutdown::ShutdownReceiver};

use super::template::RequestSpec;
use feeder::spawn_feeder;
use worker::spawn_workers;

/// Buffer of the request and result hand-offs. One slot is the smallest tokio
/// allows, so a send waits until the previous item has been taken and at most
/// one ticket is queued beyond the ones workers are executing.
pub const HANDOFF_CAPACITY: usize = 1;

/// Everything the feeder and workers share for one run.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub client: Client,
    pub spec: Arc<RequestSpec>,
    pub shutdown_rx: ShutdownReceiver,
    pub concurrency: usize,
    pub requested: u64,
}

/// One unit of dispatch work.
#[derive(Debug)]
pub(crate) struct Ticket {
    pub(crate) seq: u64,
    pub(crate) spec: Arc<RequestSpec>,
}

/// Starts the feeder and the worker pool. The returned task resolves once
/// every ticket has been handed out and every worker has exited.
#[must_use]
pub fn setup_request_sender(
    context: &RunContext,
    results_tx: &mpsc::Sender<Outcome>,
) -> JoinHandle<()> {
    let (tickets_tx, tickets_rx) = mpsc::channel::<Ticket>(HANDOFF_CAPACITY);
    let feeder_handle = spawn_feeder(context, tickets_tx);
    let worker_handles = spawn_workers(context, tickets_rx, results_tx);

    tokio::spawn(async move {
        if let Err(err) = feeder_handle.await {
            warn!("Request feeder task failed: {}", err);
        }
        for handle in worker_handles {
            if let Err(err) = handle.await {
                warn!("Request worker task failed: {}", err);
            }
        }
    })
}
