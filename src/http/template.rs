use reqwest::{
    Client, Method, Request, Url,
    header::{ACCEPT_ENCODING, HeaderMap, HeaderName, HeaderValue},
};

use crate::error::{AppError, AppResult, HttpError};

/// Immutable description of the request every ticket performs.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    url: Url,
    headers: HeaderMap,
    accept_gzip: bool,
}

impl RequestSpec {
    /// Validates the target and headers.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL cannot be parsed, is not http(s), or a
    /// header name or value is not valid on the wire.
    pub fn new(target: &str, headers: &[(String, String)], accept_gzip: bool) -> AppResult<Self> {
        let url = Url::parse(target).map_err(|source| {
            AppError::http(HttpError::InvalidUrl {
                url: target.to_owned(),
                source,
            })
        })?;
        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(AppError::http(HttpError::UnsupportedScheme {
                    url: target.to_owned(),
                    scheme: other.to_owned(),
                }));
            }
        }
        if url.host_str().is_none_or(str::is_empty) {
            return Err(AppError::http(HttpError::MissingHost {
                url: target.to_owned(),
            }));
        }

        let mut header_map = HeaderMap::with_capacity(headers.len().saturating_add(1));
        if accept_gzip {
            header_map.append(ACCEPT_ENCODING, HeaderValue::from_static("gzip"));
        }
        for (name, value) in headers {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|source| {
                AppError::http(HttpError::InvalidHeaderName {
                    name: name.clone(),
                    source,
                })
            })?;
            let header_value = HeaderValue::from_str(value).map_err(|source| {
                AppError::http(HttpError::InvalidHeaderValue {
                    name: name.clone(),
                    source,
                })
            })?;
            header_map.append(header_name, header_value);
        }

        Ok(Self {
            method: Method::GET,
            url,
            headers: header_map,
            accept_gzip,
        })
    }

    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub const fn accepts_gzip(&self) -> bool {
        self.accept_gzip
    }

    /// Builds a fresh, independently owned request for one attempt.
    ///
    /// # Errors
    ///
    /// Returns the client's builder error if the request cannot be assembled.
    pub fn build_request(&self, client: &Client) -> Result<Request, reqwest::Error> {
        client
            .request(self.method.clone(), self.url.clone())
            .headers(self.headers.clone())
            .build()
    }
}
