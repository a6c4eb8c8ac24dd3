//! Menu configuration as data.
//!
//! Every tunable of the store lives in a single [`MenuConfig`]. With the
//! `config-files` feature it can be loaded from TOML or JSON at startup.
//!
//! ```toml
//! # visuplate.toml
//! default_language = "hi"
//! settle_delay_ms = 250
//! featured_stride = 4
//! ```
//!
//! ```rust,ignore
//! let config = MenuConfig::load("visuplate.toml")?;
//! let config = MenuConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field is optional; `MenuConfig::default()` reproduces the built-in
//! behavior (English, 300 ms settle, every fifth item featured, 100 ms
//! stagger, 10% reveal threshold).

#[cfg(feature = "config-files")]
use std::path::Path;
use std::path::PathBuf;

#[cfg(feature = "config-files")]
use serde::Deserialize;
use thiserror::Error;
use visuplate_catalog::{DEFAULT_FEATURED_STRIDE, NormalizeConfig};
use web_time::Duration;

use crate::language::DEFAULT_SETTLE_DELAY;
use crate::reveal::{DEFAULT_REVEAL_THRESHOLD, DEFAULT_STAGGER_STEP};

// ---------------------------------------------------------------------------
// MenuConfig
// ---------------------------------------------------------------------------

/// Tunables for the menu store.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-files", derive(Deserialize))]
#[cfg_attr(feature = "config-files", serde(default, deny_unknown_fields))]
pub struct MenuConfig {
    /// Language selected at startup. Default: `"en"`.
    pub default_language: String,
    /// Delay before a language switch settles (ms). Default: 300.
    pub settle_delay_ms: u64,
    /// Every Nth catalog position is featured. Default: 5.
    pub featured_stride: usize,
    /// Reveal animation delay per displayed index (ms). Default: 100.
    pub stagger_step_ms: u64,
    /// Visible fraction that counts as entering the viewport. Default: 0.1.
    pub reveal_threshold: f32,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            default_language: "en".into(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            featured_stride: DEFAULT_FEATURED_STRIDE,
            stagger_step_ms: DEFAULT_STAGGER_STEP.as_millis() as u64,
            reveal_threshold: DEFAULT_REVEAL_THRESHOLD,
        }
    }
}

impl MenuConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_str(&read(path.as_ref())?)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json_str(&read(path.as_ref())?)
    }

    /// Load a file by extension (`.json` is JSON, anything else TOML) and
    /// validate it.
    #[cfg(feature = "config-files")]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let config = if is_json {
            Self::from_json_file(path)?
        } else {
            Self::from_toml_file(path)?
        };
        config.validated()
    }

    /// Validate all parameters.
    ///
    /// Returns a list of violations. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.default_language.trim().is_empty() {
            errors.push("default_language must not be empty".into());
        }

        if self.featured_stride == 0 {
            errors.push("featured_stride must be > 0".into());
        }

        if !(self.reveal_threshold > 0.0 && self.reveal_threshold <= 1.0) {
            errors.push(format!(
                "reveal_threshold must be in (0, 1], got {}",
                self.reveal_threshold
            ));
        }

        errors
    }

    /// `self` if [`validate`](Self::validate) finds nothing.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    #[must_use]
    pub fn to_normalize_config(&self) -> NormalizeConfig {
        NormalizeConfig {
            featured_stride: self.featured_stride,
        }
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    #[must_use]
    pub fn stagger_step(&self) -> Duration {
        Duration::from_millis(self.stagger_step_ms)
    }
}

#[cfg(feature = "config-files")]
fn read(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "config-files")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[cfg(feature = "config-files")]
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
