//! Monitoring harness output: one result line and a severity exit code.

use check_http_core::verdict::{Severity, Verdict};

/// Check name printed in front of every result line.
pub const CHECK_NAME: &str = "CheckHTTP";

/// Conventional plugin exit codes.
pub fn exit_code(severity: Severity) -> i32 {
    match severity {
        Severity::Ok => 0,
        Severity::Warning => 1,
        Severity::Critical => 2,
        Severity::Unknown => 3,
    }
}

/// Render the result line, e.g. `CheckHTTP OK: 200`. Always a single line.
pub fn render(verdict: &Verdict) -> String {
    let message = verdict.message.split_whitespace().collect::<Vec<_>>().join(" ");
    format!("{} {}: {}", CHECK_NAME, verdict.severity, message)
}
