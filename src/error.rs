use std::path::PathBuf;
use thiserror::Error;

/// Failures that make a dictionary unusable for the current request.
///
/// A name that does not exist inside a loaded dictionary is not an error; see
/// `dictionary::NotFound`, which renders as a normal response.
#[derive(Debug, Error)]
pub enum DictionaryError {
    #[error("App '{app}' not found. Use the apps listing to see available apps.")]
    AppNotFound { app: String },

    #[error(
        "Could not get SDEF for {}. The app may not be scriptable. {detail}",
        path.display()
    )]
    Extraction { path: PathBuf, detail: String },

    #[error("Malformed SDEF XML: {0}")]
    MalformedDocument(String),

    #[error("failed to serialize dictionary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl DictionaryError {
    pub(crate) fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        DictionaryError::Io {
            context: context.into(),
            source,
        }
    }
}
