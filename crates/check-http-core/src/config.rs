//! Check configuration.
//!
//! Values are layered: built-in defaults, then an optional `config.toml`,
//! then whatever was given on the command line. The result is a single
//! immutable [`CheckConfig`] handed to the executor and the evaluator.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_URL: &str = "http://localhost/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
/// Largest deadline libcurl accepts as milliseconds in a 32-bit `long`.
pub const MAX_TIMEOUT_SECS: u64 = i32::MAX as u64 / 1000;

/// Resolved inputs for one check run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckConfig {
    /// Target to probe.
    pub url: String,
    /// Deadline for the whole request (connect, headers and body). Zero means no deadline.
    pub timeout: Duration,
    /// Follow redirects and treat 3xx responses as healthy.
    pub redirect_tolerant: bool,
    /// Minimum acceptable body size in bytes (None = disabled).
    pub min_bytes: Option<u64>,
    /// Exact required body size in bytes (None = disabled).
    pub require_bytes: Option<u64>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        CheckOptions::default().resolve()
    }
}

/// Byte thresholds use -1 as the "disabled" sentinel; any negative value disables.
pub fn threshold(raw: i64) -> Option<u64> {
    u64::try_from(raw).ok()
}

/// One layer of optional settings. Used both for `config.toml` and for
/// command-line overrides; unset keys fall through to the layer below.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOptions {
    pub url: Option<String>,
    pub redirect: Option<bool>,
    pub timeout_secs: Option<u64>,
    pub min_bytes: Option<i64>,
    pub require_bytes: Option<i64>,
}

impl CheckOptions {
    /// Layer `over` on top of `self`; values set in `over` win.
    pub fn merge(self, over: CheckOptions) -> CheckOptions {
        CheckOptions {
            url: over.url.or(self.url),
            redirect: over.redirect.or(self.redirect),
            timeout_secs: over.timeout_secs.or(self.timeout_secs),
            min_bytes: over.min_bytes.or(self.min_bytes),
            require_bytes: over.require_bytes.or(self.require_bytes),
        }
    }

    /// Fill in built-in defaults and produce the immutable configuration.
    pub fn resolve(self) -> CheckConfig {
        CheckConfig {
            url: self.url.unwrap_or_else(|| DEFAULT_URL.to_string()),
            timeout: Duration::from_secs(
                self.timeout_secs
                    .unwrap_or(DEFAULT_TIMEOUT_SECS)
                    .min(MAX_TIMEOUT_SECS),
            ),
            redirect_tolerant: self.redirect.unwrap_or(false),
            min_bytes: self.min_bytes.and_then(threshold),
            require_bytes: self.require_bytes.and_then(threshold),
        }
    }
}

/// Location of the defaults file, if one exists under `$XDG_CONFIG_HOME/check-http/`.
pub fn config_path() -> Result<Option<PathBuf>> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("check-http")?;
    Ok(xdg_dirs.find_config_file("config.toml"))
}

/// Load settings from an explicit file.
pub fn load_from(path: &Path) -> Result<CheckOptions> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let opts: CheckOptions = toml::from_str(&data)
        .with_context(|| format!("invalid config {}", path.display()))?;
    Ok(opts)
}

/// Load the defaults file if present. A missing file, or no resolvable
/// XDG base directory, yields empty options; the file is never created.
pub fn load_default() -> Result<CheckOptions> {
    let path = match config_path() {
        Ok(Some(path)) => path,
        Ok(None) => return Ok(CheckOptions::default()),
        Err(e) => {
            tracing::debug!("no XDG config directory: {:#}", e);
            return Ok(CheckOptions::default());
        }
    };
    tracing::debug!("loading config from {}", path.display());
    load_from(&path)
}
