use crate::error::DictionaryError;
use crate::provider::DocumentProvider;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const SDEF_EXTENSION: &str = "sdef";

/// Serves `<app>.sdef` files from a single directory.
#[derive(Clone, Debug)]
pub struct DirectoryProvider {
    root: PathBuf,
}

impl DirectoryProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl DocumentProvider for DirectoryProvider {
    fn locate(&self, app: &str) -> Result<PathBuf, DictionaryError> {
        let not_found = || DictionaryError::AppNotFound {
            app: app.to_string(),
        };
        // Identifiers are file stems, never paths.
        if app.is_empty() || app.contains(['/', '\\']) || app == "." || app == ".." {
            return Err(not_found());
        }
        let candidate = self.root.join(format!("{app}.{SDEF_EXTENSION}"));
        if candidate.is_file() {
            debug!(path = %candidate.display(), "resolved dictionary file");
            Ok(candidate)
        } else {
            Err(not_found())
        }
    }

    fn fetch_document(&self, path: &Path) -> Result<String, DictionaryError> {
        fs::read_to_string(path)
            .map_err(|err| DictionaryError::io(format!("reading {}", path.display()), err))
    }

    fn scriptable_apps(&self, search_dir: Option<&Path>) -> Result<Vec<String>, DictionaryError> {
        let dir = search_dir.unwrap_or(self.root.as_path());
        let entries = fs::read_dir(dir)
            .map_err(|err| DictionaryError::io(format!("listing {}", dir.display()), err))?;

        let mut names = BTreeSet::new();
        for entry in entries {
            let path = entry
                .map_err(|err| DictionaryError::io(format!("listing {}", dir.display()), err))?
                .path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some(SDEF_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                names.insert(stem.to_string());
            }
        }
        Ok(names.into_iter().collect())
    }
}
