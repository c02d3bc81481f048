//! Run-wide cancellation signal.
use tokio::sync::watch;

pub type ShutdownSender = watch::Sender<bool>;
pub type ShutdownReceiver = watch::Receiver<bool>;

#[must_use]
pub fn shutdown_channel() -> (ShutdownSender, ShutdownReceiver) {
    watch::channel(false)
}

pub fn request_shutdown(shutdown_tx: &ShutdownSender) {
    shutdown_tx.send_replace(true);
}

#[must_use]
pub fn is_shutdown(shutdown_rx: &ShutdownReceiver) -> bool {
    *shutdown_rx.borrow()
}

/// Resolves once shutdown has been requested. Never resolves if the sender
/// is dropped without requesting it.
pub async fn wait_for_shutdown(shutdown_rx: &mut ShutdownReceiver) {
    let requested = shutdown_rx.wait_for(|stop| *stop).await.is_ok();
    if !requested {
        std::future::pending::<()>().await;
    }
}
