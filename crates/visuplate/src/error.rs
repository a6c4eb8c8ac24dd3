#![forbid(unsafe_code)]

//! Visuplate error model.
//!
//! Every crate owns a typed error for its own domain. This module folds them
//! into a single [`Error`] so hosts can use `?` across crate boundaries and
//! still ask what to do about a failure.
//!
//! | Source | Typical cause | [`Recovery`] |
//! |--------|---------------|--------------|
//! | [`CatalogError`] | malformed record, duplicate id, bad JSON | `Abort` |
//! | [`I18nError`] | unknown language | `KeepState` |
//! | [`I18nError`] | unreadable dictionary | `Abort` |
//! | [`SelectionError`] | no 3D model, nothing open | `KeepState` |
//! | [`ConfigError`] | unreadable or invalid config | `UseDefaults` |
//! | [`StoreError`] | rejected message | by inner cause |

use std::fmt;

use thiserror::Error;
use visuplate_catalog::CatalogError;
use visuplate_i18n::I18nError;
use visuplate_runtime::{ConfigError, SelectionError, StoreError};

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for Visuplate hosts.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    I18n(#[from] I18nError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Standard result type for Visuplate APIs.
pub type Result<T> = std::result::Result<T, Error>;

// ── Recovery ────────────────────────────────────────────────────────────

/// What a host should do after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The store rejected the input and is unchanged; carry on.
    KeepState,
    /// Configuration could not be used; start with `MenuConfig::default()`.
    UseDefaults,
    /// Required data is missing or malformed; the menu cannot be shown.
    Abort,
}

impl Error {
    /// Recovery action for this error.
    #[must_use]
    pub fn recovery(&self) -> Recovery {
        match self {
            Self::Catalog(_) => Recovery::Abort,
            Self::I18n(err) => i18n_recovery(err),
            Self::Selection(_) => Recovery::KeepState,
            Self::Config(_) => Recovery::UseDefaults,
            Self::Store(err) => match err {
                StoreError::UnknownItem(_) | StoreError::Selection(_) => Recovery::KeepState,
                StoreError::Language(err) => i18n_recovery(err),
                StoreError::Config(_) => Recovery::UseDefaults,
            },
        }
    }

    /// Error type label for logs.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Catalog(_) => "catalog",
            Self::I18n(_) => "i18n",
            Self::Selection(_) => "selection",
            Self::Config(_) => "config",
            Self::Store(_) => "store",
        }
    }

    /// Whether the host can keep running.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self.recovery(), Recovery::Abort)
    }
}

fn i18n_recovery(err: &I18nError) -> Recovery {
    match err {
        I18nError::UnknownLanguage(_) => Recovery::KeepState,
        I18nError::Json(_) | I18nError::Io { .. } => Recovery::Abort,
    }
}

impl fmt::Display for Recovery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepState => write!(f, "keep_state"),
            Self::UseDefaults => write!(f, "use_defaults"),
            Self::Abort => write!(f, "abort"),
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
