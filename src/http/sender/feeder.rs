use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle};
use tracing::{debug, info};

use crate::shutdown::wait_for_shutdown;

use super::{RunContext, Ticket};

/// Pushes exactly `context.requested` tickets, then closes the channel by
/// dropping the sender. Stops early on shutdown.
pub(super) fn spawn_feeder(context: &RunContext, tickets_tx: mpsc::Sender<Ticket>) -> JoinHandle<()> {
    let requested = context.requested;
    let spec = Arc::clone(&context.spec);
    let mut shutdown_rx = context.shutdown_rx.clone();

    tokio::spawn(async move {
        for seq in 0..requested {
            let ticket = Ticket {
                seq,
                spec: Arc::clone(&spec),
            };
            tokio::select! {
                biased;
                () = wait_for_shutdown(&mut shutdown_rx) => {
                    info!("Stopped dispatching after {} of {} requests.", seq, requested);
                    return;
                }
                sent = tickets_tx.send(ticket) => {
                    if sent.is_err() {
                        debug!("All workers exited; stopping feeder.");
                        return;
                    }
                }
            }
        }
        debug!("Dispatched all {} requests.", requested);
    })
}
