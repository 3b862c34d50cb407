//! Command-line surface for the check-http probe.

use anyhow::Result;
use check_http_core::check;
use check_http_core::config::{self, CheckConfig, CheckOptions, MAX_TIMEOUT_SECS};
use check_http_core::verdict::Verdict;
use clap::Parser;
use std::path::PathBuf;

/// Probe one URL and report OK / WARNING / CRITICAL / UNKNOWN.
#[derive(Debug, Parser)]
#[command(name = "check-http", version)]
#[command(about = "HTTP status and response size check for monitoring systems", long_about = None)]
pub struct Cli {
    /// URL to probe [default: http://localhost/].
    #[arg(short = 'u', long, value_name = "URL")]
    pub url: Option<String>,

    /// Follow redirects and treat 3xx responses as healthy; `--redirect=false` forces strict mode.
    #[arg(
        short = 'r',
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub redirect: Option<bool>,

    /// Request deadline in seconds, 0 for none [default: 15].
    #[arg(
        short = 't',
        long,
        value_name = "SECS",
        value_parser = clap::value_parser!(u64).range(..=MAX_TIMEOUT_SECS)
    )]
    pub timeout: Option<u64>,

    /// Minimum response body size in bytes; -1 disables.
    #[arg(short = 'g', long, value_name = "BYTES", allow_negative_numbers = true)]
    pub min_bytes: Option<i64>,

    /// Exact required response body size in bytes; -1 disables.
    #[arg(short = 'B', long, value_name = "BYTES", allow_negative_numbers = true)]
    pub require_bytes: Option<i64>,

    /// Read defaults from this file instead of ~/.config/check-http/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Options given explicitly on the command line.
    pub fn options(&self) -> CheckOptions {
        CheckOptions {
            url: self.url.clone(),
            redirect: self.redirect,
            timeout_secs: self.timeout,
            min_bytes: self.min_bytes,
            require_bytes: self.require_bytes,
        }
    }

    /// Layer command-line options over the defaults file.
    pub fn resolve(&self) -> Result<CheckConfig> {
        let file = match &self.config {
            Some(path) => config::load_from(path)?,
            None => config::load_default()?,
        };
        Ok(file.merge(self.options()).resolve())
    }
}

/// Parse arguments and run the check.
///
/// Usage and config errors come back as UNKNOWN so a monitoring system never
/// mistakes them for a CRITICAL result. `--help` and `--version` exit here.
pub fn run_from_args() -> Verdict {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => return usage_error(&err),
    };
    match cli.resolve() {
        Ok(cfg) => {
            tracing::debug!("resolved config: {:?}", cfg);
            check::run(&cfg)
        }
        Err(err) => Verdict::unknown(format!("{:#}", err)),
    }
}

fn usage_error(err: &clap::Error) -> Verdict {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or("invalid arguments");
    Verdict::unknown(first.trim_start_matches("error: ").to_string())
}
