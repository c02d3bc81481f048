use super::execution::execute_request;
use super::*;
use crate::error::{AppError, AppResult};
use crate::metrics::{Outcome, TransportFailure};
use reqwest::header::{ACCEPT_ENCODING, CONTENT_TYPE};
use std::future::Future;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener};
use std::time::Duration;

fn run_async_test<F>(future: F) -> AppResult<()>
where
    F: Future<Output = AppResult<()>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| AppError::validation(format!("Failed to build runtime: {}", err)))?;
    runtime.block_on(future)
}

const fn settings() -> ClientSettings {
    ClientSettings {
        keep_alive: false,
        secure_tls: false,
        request_timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    }
}

/// Serves a single canned response on a background thread.
fn serve_once(response: &'static [u8]) -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    std::thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buffer = [0u8; 2048];
            if stream.read(&mut buffer).is_err() {
                return;
            }
            if stream.write_all(response).is_err() {
                return;
            }
            drop(stream.flush());
            drop(stream.shutdown(Shutdown::Both));
        }
    });
    Ok(format!("http://{}/", addr))
}

fn closed_port_url() -> AppResult<String> {
    let listener = TcpListener::bind("127.0.0.1:0")?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}

#[test]
fn spec_adds_gzip_before_custom_headers() -> AppResult<()> {
    let spec = RequestSpec::new(
        "http://localhost:8080/path",
        &[("Content-Type".to_owned(), "application/json".to_owned())],
        true,
    )?;
    if *spec.method() != reqwest::Method::GET {
        return Err(AppError::validation("Expected GET"));
    }
    if spec.headers().get(ACCEPT_ENCODING).is_none() {
        return Err(AppError::validation("Expected Accept-Encoding: gzip"));
    }
    match spec.headers().get(CONTENT_TYPE) {
        Some(value) if value == "application/json" => Ok(()),
        other => Err(AppError::validation(format!(
            "Unexpected Content-Type: {:?}",
            other
        ))),
    }
}

#[test]
fn spec_without_gzip_omits_accept_encoding() -> AppResult<()> {
    let spec = RequestSpec::new("https://example.com/", &[], false)?;
    if spec.headers().get(ACCEPT_ENCODING).is_some() || spec.accepts_gzip() {
        return Err(AppError::validation("Unexpected Accept-Encoding"));
    }
    Ok(())
}

#[test]
fn spec_keeps_repeated_headers() -> AppResult<()> {
    let headers = vec![
        ("X-Trace".to_owned(), "a".to_owned()),
        ("X-Trace".to_owned(), "b".to_owned()),
    ];
    let spec = RequestSpec::new("http://localhost/", &headers, false)?;
    let values: Vec<_> = spec.headers().get_all("x-trace").iter().collect();
    if values.len() != 2 {
        return Err(AppError::validation(format!(
            "Expected two X-Trace values, got {}",
            values.len()
        )));
    }
    Ok(())
}

#[test]
fn spec_rejects_invalid_targets() -> AppResult<()> {
    for target in ["not a url", "http://", "ftp://example.com/", ""] {
        if RequestSpec::new(target, &[], true).is_ok() {
            return Err(AppError::validation(format!(
                "Expected Err for target '{}'",
                target
            )));
        }
    }
    Ok(())
}

#[test]
fn spec_rejects_invalid_header_names() -> AppResult<()> {
    let headers = vec![("Bad Name".to_owned(), "value".to_owned())];
    if RequestSpec::new("http://localhost/", &headers, false).is_ok() {
        return Err(AppError::validation("Expected Err for header name with space"));
    }
    Ok(())
}

#[test]
fn build_request_returns_independent_copies() -> AppResult<()> {
    let spec = RequestSpec::new("http://localhost/a", &[], true)?;
    let client = build_client(&settings())?;
    let build = |client: &reqwest::Client| {
        spec.build_request(client)
            .map_err(|source| AppError::http(crate::error::HttpError::BuildRequestFailed { source }))
    };
    let mut first = build(&client)?;
    let second = build(&client)?;
    first.headers_mut().clear();
    if second.headers().get(ACCEPT_ENCODING).is_none() {
        return Err(AppError::validation("Requests share header storage"));
    }
    if spec.headers().get(ACCEPT_ENCODING).is_none() {
        return Err(AppError::validation("Template was mutated"));
    }
    Ok(())
}

#[test]
fn execute_counts_body_bytes() -> AppResult<()> {
    run_async_test(async {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\nConnection: close\r\n\r\nhello",
        )?;
        let spec = RequestSpec::new(&url, &[], true)?;
        let client = build_client(&settings())?;
        match execute_request(&client, &spec).await {
            Outcome::Response { status, bytes, .. } if status == 200 && bytes == 5 => Ok(()),
            other => Err(AppError::validation(format!(
                "Unexpected outcome: {:?}",
                other
            ))),
        }
    })
}

#[test]
fn execute_reports_http_failure_status() -> AppResult<()> {
    run_async_test(async {
        let url = serve_once(
            b"HTTP/1.1 404 Not Found\r\nContent-Length: 3\r\nConnection: close\r\n\r\nnah",
        )?;
        let spec = RequestSpec::new(&url, &[], false)?;
        let client = build_client(&settings())?;
        match execute_request(&client, &spec).await {
            Outcome::Response { status: 404, .. } => Ok(()),
            other => Err(AppError::validation(format!(
                "Unexpected outcome: {:?}",
                other
            ))),
        }
    })
}

#[test]
fn execute_reports_refused_connection_as_unavailable() -> AppResult<()> {
    run_async_test(async {
        let url = closed_port_url()?;
        let spec = RequestSpec::new(&url, &[], false)?;
        let client = build_client(&settings())?;
        match execute_request(&client, &spec).await {
            Outcome::Unavailable(_) => Ok(()),
            other => Err(AppError::validation(format!(
                "Unexpected outcome: {:?}",
                other
            ))),
        }
    })
}

#[test]
fn execute_reports_truncated_body_as_unavailable() -> AppResult<()> {
    run_async_test(async {
        let url = serve_once(
            b"HTTP/1.1 200 OK\r\nContent-Length: 100\r\nConnection: close\r\n\r\nshort",
        )?;
        let spec = RequestSpec::new(&url, &[], false)?;
        let client = build_client(&settings())?;
        match execute_request(&client, &spec).await {
            Outcome::Unavailable(_) => Ok(()),
            other => Err(AppError::validation(format!(
                "Unexpected outcome: {:?}",
                other
            ))),
        }
    })
}

#[test]
fn execute_times_out_as_unavailable() -> AppResult<()> {
    run_async_test(async {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let addr = listener.local_addr()?;
        let hold = std::thread::spawn(move || {
            if let Ok((stream, _)) = listener.accept() {
                std::thread::sleep(Duration::from_millis(500));
                drop(stream);
            }
        });
        let spec = RequestSpec::new(&format!("http://{}/", addr), &[], false)?;
        let client = build_client(&ClientSettings {
            request_timeout: Duration::from_millis(100),
            ..settings()
        })?;
        let outcome = execute_request(&client, &spec).await;
        drop(hold.join());
        if outcome != Outcome::Unavailable(TransportFailure::Timeout) {
            return Err(AppError::validation(format!(
                "Expected timeout, got {:?}",
                outcome
            )));
        }
        Ok(())
    })
}
