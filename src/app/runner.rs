use std::sync::Arc;

use tokio::{sync::mpsc, task::JoinHandle, time::Instant};
use tracing::{info, warn};

use crate::{
    args::LoadArgs,
    error::{AppError, AppResult, HttpError},
    http::{self, ClientSettings, HANDOFF_CAPACITY, RequestSpec, RunContext},
    metrics::{self, Outcome, RunSummary},
    shutdown::{ShutdownReceiver, shutdown_channel},
    shutdown_handlers::{forward_shutdown, setup_deadline},
};

/// Runs one complete load test and returns its summary.
///
/// Everything that can be rejected up front (URL, headers, client setup) is
/// checked before any request goes out. `external_shutdown` lets the caller
/// cancel the run; the summary then reports `interrupted`.
///
/// # Errors
///
/// Returns an error when the request template or client cannot be built, or
/// when a pipeline task panics.
pub async fn run_load_test(
    args: &LoadArgs,
    external_shutdown: Option<ShutdownReceiver>,
) -> AppResult<RunSummary> {
    let spec = RequestSpec::new(&args.url, &args.headers, !args.no_gzip)?;
    let client = http::build_client(&ClientSettings::from_args(args))?;
    spec.build_request(&client)
        .map_err(|source| AppError::http(HttpError::BuildRequestFailed { source }))?;

    let (shutdown_tx, shutdown_rx) = shutdown_channel();
    let mut helper_handles: Vec<JoinHandle<()>> = Vec::new();
    if let Some(external_rx) = external_shutdown {
        helper_handles.push(forward_shutdown(external_rx, &shutdown_tx));
    }
    if let Some(limit) = args.max_duration {
        helper_handles.push(setup_deadline(&shutdown_tx, limit));
    }

    let context = RunContext {
        client,
        spec: Arc::new(spec),
        shutdown_rx,
        concurrency: args.concurrent.get(),
        requested: args.num_requests,
    };
    info!(
        "Sending {} request(s) to {} with {} worker(s)",
        context.requested, args.url, context.concurrency
    );

    let run_start = Instant::now();
    let (results_tx, results_rx) = mpsc::channel::<Outcome>(HANDOFF_CAPACITY);
    let collector_handle = metrics::setup_result_collector(
        context.requested,
        run_start,
        &context.shutdown_rx,
        results_rx,
    );
    let sender_handle = http::setup_request_sender(&context, &results_tx);
    drop(results_tx);

    let summary = collector_handle.await;
    if let Err(err) = sender_handle.await {
        warn!("Request sender task failed: {}", err);
    }
    for handle in helper_handles {
        handle.abort();
    }
    drop(shutdown_tx);

    Ok(summary?)
}
