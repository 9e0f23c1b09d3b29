//! Sources of raw scripting dictionaries.
//!
//! A provider answers two questions for the cache: where does an application
//! live (`locate`), and what is its SDEF text (`fetch_document`). The host
//! provider shells out to Spotlight and `sdef`; the directory provider reads
//! pre-extracted `.sdef` files and backs tests and non-macOS hosts.

pub mod directory;
pub mod system;

pub use directory::DirectoryProvider;
pub use system::SystemProvider;

use crate::config::ProviderConfig;
use crate::error::DictionaryError;
use std::path::{Path, PathBuf};

/// Resolves application identifiers to raw SDEF text.
pub trait DocumentProvider: Send + Sync {
    /// Find the application (or dictionary file) for `app`.
    fn locate(&self, app: &str) -> Result<PathBuf, DictionaryError>;

    /// Produce the raw SDEF text for a located path.
    fn fetch_document(&self, path: &Path) -> Result<String, DictionaryError>;

    /// Names of the applications this provider can serve, sorted and unique.
    ///
    /// `search_dir` narrows the scan to one directory when given.
    fn scriptable_apps(&self, search_dir: Option<&Path>) -> Result<Vec<String>, DictionaryError>;
}

/// Pick the provider the configuration asks for.
pub fn provider_from_config(config: &ProviderConfig) -> Box<dyn DocumentProvider> {
    match &config.sdef_dir {
        Some(dir) => Box::new(DirectoryProvider::new(dir.clone())),
        None => Box::new(SystemProvider::new(config.clone())),
    }
}
