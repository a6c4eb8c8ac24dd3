//! Catalog error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or normalizing a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A record lacks a required field (`id` or `category`), or it is blank.
    #[error("catalog item #{index} is missing required field `{field}`")]
    MalformedItem { index: usize, field: &'static str },

    /// Two records share an identifier.
    #[error("duplicate item id '{id}' at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },

    /// The featured stride was zero.
    #[error("featured stride must be at least 1")]
    InvalidStride,

    /// The catalog document is not valid JSON for a list of items.
    #[error("failed to parse catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The catalog file could not be read.
    #[error("failed to read catalog '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A diet label that is not one of `All`, `Veg`, `Non-Veg`, `Vegan`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown diet filter '{0}' (expected All, Veg, Non-Veg or Vegan)")]
pub struct ParseDietError(pub String);
