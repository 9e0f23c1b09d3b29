//! Provider configuration resolved from the environment.
//!
//! Every knob has a default that matches a stock macOS install. Resolution
//! goes through a lookup closure so tests can supply variables without
//! touching the process environment; CLI flags are applied on top by the
//! binary.

use anyhow::{Context, Result, bail};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_SDEF_DIR: &str = "SDEF_READER_DIR";
pub const ENV_APP_DIRS: &str = "SDEF_READER_APP_DIRS";
pub const ENV_SDEF_BIN: &str = "SDEF_READER_SDEF_BIN";
pub const ENV_TIMEOUT_SECS: &str = "SDEF_READER_TIMEOUT_SECS";

pub const DEFAULT_SDEF_PROGRAM: &str = "sdef";
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(30);
pub const LOCATE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Serve pre-extracted `<app>.sdef` files from here instead of the host.
    pub sdef_dir: Option<PathBuf>,
    /// Directories probed for `<app>.app` when Spotlight has no answer.
    pub app_dirs: Vec<PathBuf>,
    pub sdef_program: OsString,
    pub extract_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            sdef_dir: None,
            app_dirs: default_app_dirs(env::var_os("HOME")),
            sdef_program: OsString::from(DEFAULT_SDEF_PROGRAM),
            extract_timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    /// Resolve configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var_os(key))
    }

    /// Resolve configuration from an arbitrary variable source.
    ///
    /// Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let app_dirs = match get(ENV_APP_DIRS) {
            Some(raw) => env::split_paths(&raw).collect(),
            None => default_app_dirs(lookup("HOME")),
        };

        let extract_timeout = match get(ENV_TIMEOUT_SECS) {
            Some(raw) => {
                let raw = raw
                    .into_string()
                    .map_err(|_| anyhow::anyhow!("{ENV_TIMEOUT_SECS} is not valid UTF-8"))?;
                parse_timeout_secs(&raw).with_context(|| format!("invalid {ENV_TIMEOUT_SECS}"))?
            }
            None => DEFAULT_EXTRACT_TIMEOUT,
        };

        Ok(Self {
            sdef_dir: get(ENV_SDEF_DIR).map(PathBuf::from),
            app_dirs,
            sdef_program: get(ENV_SDEF_BIN).unwrap_or_else(|| OsString::from(DEFAULT_SDEF_PROGRAM)),
            extract_timeout,
        })
    }
}

/// Parse a whole, positive number of seconds.
pub fn parse_timeout_secs(raw: &str) -> Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a whole number of seconds"))?;
    if secs == 0 {
        bail!("timeout must be at least one second");
    }
    Ok(Duration::from_secs(secs))
}

/// `/Applications`, `/System/Applications`, then `~/Applications` when HOME
/// is known.
pub fn default_app_dirs(home: Option<OsString>) -> Vec<PathBuf> {
    let mut dirs = vec![
        PathBuf::from("/Applications"),
        PathBuf::from("/System/Applications"),
    ];
    if let Some(home) = home.filter(|h| !h.is_empty()) {
        dirs.push(PathBuf::from(home).join("Applications"));
    }
    dirs
}
