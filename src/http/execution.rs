use futures_util::StreamExt;
use reqwest::Client;
use tokio::time::Instant;
use tracing::debug;

use crate::metrics::{Outcome, TransportFailure};

use super::template::RequestSpec;

/// Performs one attempt and always yields exactly one outcome.
pub(crate) async fn execute_request(client: &Client, spec: &RequestSpec) -> Outcome {
    let request = match spec.build_request(client) {
        Ok(request) => request,
        Err(err) => {
            debug!("Failed to build request: {}", err);
            return Outcome::Unavailable(TransportFailure::from_reqwest(&err));
        }
    };

    let start = Instant::now();
    let response = match client.execute(request).await {
        Ok(response) => response,
        Err(err) => {
            debug!("Request failed: {}", err);
            return Outcome::Unavailable(TransportFailure::from_reqwest(&err));
        }
    };
    let status = response.status().as_u16();

    match drain_response_body(response).await {
        Ok(bytes) => Outcome::Response {
            elapsed: start.elapsed(),
            status,
            bytes,
        },
        Err(err) => {
            debug!("Failed to read response body: {}", err);
            Outcome::Unavailable(TransportFailure::from_reqwest(&err))
        }
    }
}

async fn drain_response_body(response: reqwest::Response) -> Result<u64, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut total_bytes: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let bytes = chunk?;
        total_bytes = total_bytes.saturating_add(u64::try_from(bytes.len()).unwrap_or(u64::MAX));
    }
    Ok(total_bytes)
}
