use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::shutdown::{ShutdownReceiver, ShutdownSender, request_shutdown, wait_for_shutdown};

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit code used when the user aborts with a second Ctrl+C.
const ABORT_EXIT_CODE: i32 = 130;

/// First Ctrl+C/SIGTERM requests a graceful shutdown; a second Ctrl+C aborts
/// the process.
pub fn setup_signal_shutdown_handler(shutdown_tx: &ShutdownSender) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();

        #[cfg(unix)]
        let mut term_signal = match signal(SignalKind::terminate()) {
            Ok(signal) => Some(signal),
            Err(err) => {
                warn!("Failed to register SIGTERM handler: {}", err);
                None
            }
        };

        #[cfg(unix)]
        let signalled = tokio::select! {
            () = wait_for_shutdown(&mut shutdown_rx) => false,
            result = tokio::signal::ctrl_c() => result.is_ok(),
            () = async {
                if let Some(signal) = term_signal.as_mut() {
                    signal.recv().await;
                } else {
                    std::future::pending::<()>().await;
                }
            } => true,
        };

        #[cfg(not(unix))]
        let signalled = tokio::select! {
            () = wait_for_shutdown(&mut shutdown_rx) => false,
            result = tokio::signal::ctrl_c() => result.is_ok(),
        };

        if !signalled {
            return;
        }
        info!("Waiting for in-flight requests (Ctrl+C again to abort)...");
        request_shutdown(&shutdown_tx);

        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("User requested abort (Ctrl+C twice)");
            std::process::exit(ABORT_EXIT_CODE);
        }
    })
}

/// Requests shutdown once `limit` has elapsed.
pub fn setup_deadline(shutdown_tx: &ShutdownSender, limit: Duration) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        let mut shutdown_rx = shutdown_tx.subscribe();
        tokio::select! {
            () = wait_for_shutdown(&mut shutdown_rx) => {}
            () = tokio::time::sleep(limit) => {
                info!("Run deadline of {:?} reached; stopping.", limit);
                request_shutdown(&shutdown_tx);
            }
        }
    })
}

/// Mirrors an external shutdown signal onto the run's own channel.
pub fn forward_shutdown(
    mut external_rx: ShutdownReceiver,
    shutdown_tx: &ShutdownSender,
) -> JoinHandle<()> {
    let shutdown_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        wait_for_shutdown(&mut external_rx).await;
        request_shutdown(&shutdown_tx);
    })
}
