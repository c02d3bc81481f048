use std::sync::Arc;

use reqwest::Client;
use tokio::{
    sync::{Mutex, mpsc},
    task::JoinHandle,
};
use tracing::{debug, trace};

use crate::{
    http::execution::execute_request,
    metrics::{Outcome, TransportFailure},
    shutdown::{ShutdownReceiver, is_shutdown, wait_for_shutdown},
};

use super::{RunContext, Ticket};

type SharedTickets = Arc<Mutex<mpsc::Receiver<Ticket>>>;

pub(super) fn spawn_workers(
    context: &RunContext,
    tickets_rx: mpsc::Receiver<Ticket>,
    results_tx: &mpsc::Sender<Outcome>,
) -> Vec<JoinHandle<()>> {
    let tickets: SharedTickets = Arc::new(Mutex::new(tickets_rx));
    (0..context.concurrency)
        .map(|worker_id| {
            tokio::spawn(run_worker(
                worker_id,
                context.client.clone(),
                Arc::clone(&tickets),
                results_tx.clone(),
                context.shutdown_rx.clone(),
            ))
        })
        .collect()
}

/// Pulls tickets until the channel is closed and drained, sending exactly one
/// outcome per ticket it attempts.
async fn run_worker(
    worker_id: usize,
    client: Client,
    tickets: SharedTickets,
    results_tx: mpsc::Sender<Outcome>,
    mut shutdown_rx: ShutdownReceiver,
) {
    loop {
        let next = tickets.lock().await.recv().await;
        let Some(ticket) = next else {
            break;
        };
        if is_shutdown(&shutdown_rx) {
            trace!("Worker {} skipping ticket {} after shutdown.", worker_id, ticket.seq);
            continue;
        }

        let outcome = tokio::select! {
            biased;
            () = wait_for_shutdown(&mut shutdown_rx) => {
                debug!("Worker {} abandoned ticket {}.", worker_id, ticket.seq);
                Outcome::Unavailable(TransportFailure::Cancelled)
            }
            outcome = execute_request(&client, &ticket.spec) => outcome,
        };
        trace!("Worker {} finished ticket {}: {:?}", worker_id, ticket.seq, outcome);

        if results_tx.send(outcome).await.is_err() {
            debug!("Result collector closed; worker {} exiting.", worker_id);
            break;
        }
    }
}
