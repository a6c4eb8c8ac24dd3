//! Localization error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from dictionary loading and language resolution.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The code is not a key of the dictionary.
    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    /// The dictionary document is malformed (including an entry without
    /// `languageName`).
    #[error("failed to parse language dictionary: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read language dictionary '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
