//! Verdict evaluation: map a request outcome onto a monitoring severity.
//!
//! Two independent checks run on a successful response. The byte-count
//! check either reports CRITICAL or has no opinion; the status-code check
//! always yields a verdict. A byte-count CRITICAL overrides the status
//! verdict, otherwise the status verdict stands. Transport failures skip
//! both checks and report UNKNOWN.

use crate::config::CheckConfig;
use crate::request::{RequestOutcome, Response};
use std::fmt;

/// Monitoring severity. Exit-code mapping is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// A severity with its one detail message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub severity: Severity,
    pub message: String,
}

impl Verdict {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Severity::Unknown, message)
    }
}

/// Evaluate one request outcome against the configured thresholds.
pub fn evaluate(outcome: &RequestOutcome, config: &CheckConfig) -> Verdict {
    match outcome {
        RequestOutcome::TransportFailure(e) => Verdict::unknown(e.to_string()),
        RequestOutcome::Success(response) => evaluate_response(response, config),
    }
}

/// Evaluate a complete response. Stateless; safe to call repeatedly.
pub fn evaluate_response(response: &Response, config: &CheckConfig) -> Verdict {
    check_bytes(response.body_bytes, config)
        .unwrap_or_else(|| check_status(response.status_code, config.redirect_tolerant))
}

/// Byte thresholds. Minimum is checked before required; the first violation wins.
fn check_bytes(body_bytes: u64, config: &CheckConfig) -> Option<Verdict> {
    if let Some(min) = config.min_bytes {
        if body_bytes < min {
            return Some(Verdict::new(
                Severity::Critical,
                format!(
                    "Response was {} bytes instead of minimum of {} bytes",
                    body_bytes, min
                ),
            ));
        }
    }
    if let Some(required) = config.require_bytes {
        if body_bytes != required {
            return Some(Verdict::new(
                Severity::Critical,
                format!(
                    "Response was {} bytes instead of required {} bytes",
                    body_bytes, required
                ),
            ));
        }
    }
    None
}

fn check_status(status_code: u32, redirect_tolerant: bool) -> Verdict {
    let severity = match status_code {
        400.. => Severity::Critical,
        300..=399 if redirect_tolerant => Severity::Ok,
        300..=399 => Severity::Warning,
        _ => Severity::Ok,
    };
    Verdict::new(severity, status_code.to_string())
}
