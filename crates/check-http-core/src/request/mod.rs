//! Request executor: one HTTP GET with a deadline and a redirect policy.
//!
//! Uses the curl crate (libcurl). The body is streamed and only its length
//! is kept. Every failure before a complete response is in hand collapses
//! into a single [`TransportError`].

mod classify;

pub use classify::{classify_curl_error, TransportKind};

use std::time::{Duration, Instant};

/// libcurl's redirect limit when following is enabled.
pub const MAX_REDIRECTS: u32 = 10;

/// A complete HTTP response, reduced to what the evaluator needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Response {
    pub status_code: u32,
    pub body_bytes: u64,
}

/// Result of one request. Produced once per run, consumed once by the evaluator.
#[derive(Debug)]
pub enum RequestOutcome {
    Success(Response),
    TransportFailure(TransportError),
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("GET {url} failed ({kind}): {source}")]
    Curl {
        url: String,
        kind: TransportKind,
        #[source]
        source: curl::Error,
    },

    #[error("GET {url} completed without an HTTP status")]
    NoStatus { url: String },
}

impl TransportError {
    fn curl(url: &str, source: curl::Error) -> Self {
        TransportError::Curl {
            url: url.to_string(),
            kind: classify_curl_error(&source),
            source,
        }
    }

    pub fn kind(&self) -> TransportKind {
        match self {
            TransportError::InvalidUrl { .. } => TransportKind::InvalidUrl,
            TransportError::Curl { kind, .. } => *kind,
            TransportError::NoStatus { .. } => TransportKind::Other,
        }
    }
}

/// Performs a single GET against `url`.
///
/// `timeout` bounds connect, header exchange and full body read together; a
/// zero timeout disables the deadline. With `redirect_tolerant` false a 3xx
/// response is reported as-is; with it true redirects are followed and the
/// last response in the chain is reported.
///
/// Blocks the current thread. The curl handle (and its connection) is
/// released before this returns, on success and on failure.
pub fn execute(url: &str, timeout: Duration, redirect_tolerant: bool) -> RequestOutcome {
    match perform(url, timeout, redirect_tolerant) {
        Ok(response) => RequestOutcome::Success(response),
        Err(e) => {
            tracing::warn!(kind = %e.kind(), "request failed: {}", e);
            RequestOutcome::TransportFailure(e)
        }
    }
}

fn validate_url(url: &str) -> Result<(), TransportError> {
    let parsed = url::Url::parse(url).map_err(|e| TransportError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(TransportError::InvalidUrl {
            url: url.to_string(),
            reason: format!("unsupported scheme `{}`", other),
        }),
    }
}

fn perform(url: &str, timeout: Duration, redirect_tolerant: bool) -> Result<Response, TransportError> {
    validate_url(url)?;

    let fail = |source: curl::Error| TransportError::curl(url, source);
    let started = Instant::now();
    tracing::debug!(
        url,
        timeout_secs = timeout.as_secs(),
        redirect_tolerant,
        "issuing GET"
    );

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(fail)?;
    easy.get(true).map_err(fail)?;
    easy.follow_location(redirect_tolerant).map_err(fail)?;
    if redirect_tolerant {
        easy.max_redirections(MAX_REDIRECTS).map_err(fail)?;
    }
    easy.timeout(timeout).map_err(fail)?;
    easy.useragent(concat!("check-http/", env!("CARGO_PKG_VERSION")))
        .map_err(fail)?;

    let mut body_bytes: u64 = 0;
    {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| {
                body_bytes += data.len() as u64;
                Ok(data.len())
            })
            .map_err(fail)?;
        transfer.perform().map_err(fail)?;
    }

    let status_code = easy.response_code().map_err(fail)?;
    if status_code < 100 {
        return Err(TransportError::NoStatus {
            url: url.to_string(),
        });
    }

    let effective_url = easy
        .effective_url()
        .ok()
        .flatten()
        .unwrap_or(url)
        .to_string();
    tracing::debug!(
        status_code,
        body_bytes,
        effective_url = %effective_url,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "response received"
    );

    Ok(Response {
        status_code,
        body_bytes,
    })
}
