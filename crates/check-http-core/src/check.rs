//! Run one check: execute the request, then evaluate it.

use crate::config::CheckConfig;
use crate::request;
use crate::verdict::{self, Verdict};

/// Probe `config.url` once and return the verdict. Never retries.
pub fn run(config: &CheckConfig) -> Verdict {
    let outcome = request::execute(&config.url, config.timeout, config.redirect_tolerant);
    let verdict = verdict::evaluate(&outcome, config);
    tracing::info!(
        url = %config.url,
        severity = %verdict.severity,
        "check finished: {}",
        verdict.message
    );
    verdict
}
