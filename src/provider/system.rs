//! Host-side provider: Spotlight and application folders to find a bundle,
//! the `sdef` utility to extract its dictionary.

use crate::config::{LOCATE_TIMEOUT, ProviderConfig};
use crate::error::DictionaryError;
use crate::provider::DocumentProvider;
use crate::runtime::{CommandOutcome, find_on_path, run_with_timeout};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

const APP_EXTENSION: &str = "app";
const PREFERRED_ROOTS: [&str; 2] = ["/Applications", "/System/Applications"];
const SCRIPTING_DEFINITION_KEY: &str = "OSAScriptingDefinition";
const APPLESCRIPT_ENABLED_KEY: &str = "NSAppleScriptEnabled";

#[derive(Clone, Debug)]
pub struct SystemProvider {
    config: ProviderConfig,
}

impl SystemProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Ask Spotlight for an application bundle with this display name.
    ///
    /// Any failure (no `mdfind`, timeout, non-zero exit) yields `None` so the
    /// caller can fall back to probing application folders.
    fn spotlight_lookup(&self, app: &str) -> Option<PathBuf> {
        let mdfind = find_on_path("mdfind")?;
        let mut command = Command::new(&mdfind);
        command.arg(spotlight_query(app));

        let output = match run_with_timeout(command, LOCATE_TIMEOUT) {
            Ok(CommandOutcome::Completed(output)) if output.status.success() => output,
            Ok(CommandOutcome::Completed(output)) => {
                warn!(status = ?output.status, "mdfind failed; probing app folders");
                return None;
            }
            Ok(CommandOutcome::TimedOut) => {
                warn!(timeout = ?LOCATE_TIMEOUT, "mdfind timed out; probing app folders");
                return None;
            }
            Err(err) => {
                warn!(error = %err, "unable to run mdfind; probing app folders");
                return None;
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let paths: Vec<&str> = stdout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        paths
            .iter()
            .find(|path| PREFERRED_ROOTS.iter().any(|root| path.starts_with(root)))
            .or_else(|| paths.first())
            .map(|path| PathBuf::from(*path))
    }

    fn probe_app_dirs(&self, app: &str) -> Option<PathBuf> {
        self.config
            .app_dirs
            .iter()
            .map(|dir| dir.join(format!("{app}.{APP_EXTENSION}")))
            .find(|candidate| candidate.exists())
    }
}

impl DocumentProvider for SystemProvider {
    fn locate(&self, app: &str) -> Result<PathBuf, DictionaryError> {
        let found = self
            .spotlight_lookup(app)
            .or_else(|| self.probe_app_dirs(app));
        match found {
            Some(path) => {
                debug!(app, path = %path.display(), "located application");
                Ok(path)
            }
            None => Err(DictionaryError::AppNotFound {
                app: app.to_string(),
            }),
        }
    }

    fn fetch_document(&self, path: &Path) -> Result<String, DictionaryError> {
        let program = &self.config.sdef_program;
        let extraction = |detail: String| DictionaryError::Extraction {
            path: path.to_path_buf(),
            detail,
        };

        let mut command = Command::new(program);
        command.arg(path);
        let outcome = run_with_timeout(command, self.config.extract_timeout).map_err(|err| {
            extraction(format!("failed to run {}: {err}", program.to_string_lossy()))
        })?;

        match outcome {
            CommandOutcome::TimedOut => Err(extraction(format!(
                "{} timed out after {}s",
                program.to_string_lossy(),
                self.config.extract_timeout.as_secs()
            ))),
            CommandOutcome::Completed(output) if !output.status.success() => {
                Err(extraction(format!(
                    "stderr: {}",
                    String::from_utf8_lossy(&output.stderr).trim()
                )))
            }
            CommandOutcome::Completed(output) => String::from_utf8(output.stdout)
                .map_err(|_| extraction("output is not valid UTF-8".to_string())),
        }
    }

    fn scriptable_apps(&self, search_dir: Option<&Path>) -> Result<Vec<String>, DictionaryError> {
        let roots: Vec<&Path> = match search_dir {
            Some(dir) => vec![dir],
            None => self.config.app_dirs.iter().map(PathBuf::as_path).collect(),
        };

        let mut bundles = Vec::new();
        for root in roots {
            collect_bundles(root, &mut bundles)?;
        }

        let names: BTreeSet<String> = bundles
            .iter()
            .filter(|bundle| is_scriptable(bundle))
            .filter_map(|bundle| bundle.file_stem().and_then(|s| s.to_str()))
            .map(str::to_string)
            .collect();
        Ok(names.into_iter().collect())
    }
}

fn spotlight_query(app: &str) -> String {
    let escaped = app.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "kMDItemDisplayName == '{escaped}' && kMDItemContentType == 'com.apple.application-bundle'"
    )
}

/// Collect `.app` bundles below `dir` without descending into bundles.
///
/// Missing roots are skipped; the default folder list is not expected to
/// exist on every host.
fn collect_bundles(dir: &Path, acc: &mut Vec<PathBuf>) -> Result<(), DictionaryError> {
    if !dir.is_dir() {
        return Ok(());
    }
    let entries = fs::read_dir(dir)
        .map_err(|err| DictionaryError::io(format!("listing {}", dir.display()), err))?;
    for entry in entries {
        let Ok(entry) = entry else {
            continue;
        };
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if path.extension().and_then(|ext| ext.to_str()) == Some(APP_EXTENSION) {
            acc.push(path);
        } else {
            collect_bundles(&path, acc)?;
        }
    }
    Ok(())
}

/// Whether the bundle's `Contents/Info.plist` declares a scripting
/// definition or enables AppleScript.
///
/// Bundles without a readable plist are skipped.
fn is_scriptable(bundle: &Path) -> bool {
    let info = bundle.join("Contents").join("Info.plist");
    let value = match plist::Value::from_file(&info) {
        Ok(value) => value,
        Err(err) => {
            debug!(
                path = %info.display(),
                error = %err,
                "skipping bundle with unreadable Info.plist"
            );
            return false;
        }
    };
    let Some(dict) = value.as_dictionary() else {
        return false;
    };
    dict.contains_key(SCRIPTING_DEFINITION_KEY)
        || dict.get(APPLESCRIPT_ENABLED_KEY).is_some_and(is_enabled)
}

/// `<true/>`, or the `YES` string some older bundles use.
fn is_enabled(value: &plist::Value) -> bool {
    match value {
        plist::Value::Boolean(flag) => *flag,
        plist::Value::String(text) => text.eq_ignore_ascii_case("yes"),
        _ => false,
    }
}
