use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Unable to create HTTP request - invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unable to create HTTP request - unsupported scheme '{scheme}' in '{url}'")]
    UnsupportedScheme { url: String, scheme: String },
    #[error("Unable to create HTTP request - URL '{url}' is missing a host")]
    MissingHost { url: String },
    #[error("Invalid header name '{name}': {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{name}': {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClientFailed {
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to build request: {source}")]
    BuildRequestFailed {
        #[source]
        source: reqwest::Error,
    },
}
