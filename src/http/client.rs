use std::time::Duration;

use reqwest::{
    Client,
    header::{CONNECTION, HeaderMap, HeaderValue},
};

use crate::{
    args::{DEFAULT_USER_AGENT, LoadArgs},
    error::{AppError, AppResult, HttpError},
};

/// Transport options shared by every worker for the whole run.
#[derive(Debug, Clone, Copy)]
pub struct ClientSettings {
    pub keep_alive: bool,
    pub secure_tls: bool,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl ClientSettings {
    #[must_use]
    pub const fn from_args(args: &LoadArgs) -> Self {
        Self {
            keep_alive: args.keep_alive,
            secure_tls: args.secure_tls,
            request_timeout: args.request_timeout,
            connect_timeout: args.connect_timeout,
        }
    }
}

/// Builds the pooled client all workers dispatch through. Responses are never
/// decompressed so byte counts reflect what went over the wire.
///
/// # Errors
///
/// Returns an error when the TLS backend or client cannot be initialised.
pub fn build_client(settings: &ClientSettings) -> AppResult<Client> {
    let mut client_builder = Client::builder()
        .user_agent(DEFAULT_USER_AGENT)
        .timeout(settings.request_timeout)
        .connect_timeout(settings.connect_timeout)
        .no_gzip()
        .no_brotli()
        .no_deflate();

    if !settings.keep_alive {
        let mut headers = HeaderMap::new();
        headers.insert(CONNECTION, HeaderValue::from_static("close"));
        client_builder = client_builder
            .default_headers(headers)
            .pool_max_idle_per_host(0)
            .pool_idle_timeout(Some(Duration::from_secs(0)));
    }

    if !settings.secure_tls {
        client_builder = client_builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }

    client_builder
        .build()
        .map_err(|source| AppError::http(HttpError::BuildClientFailed { source }))
}
