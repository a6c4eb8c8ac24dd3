//! Store error type.

use thiserror::Error;
use visuplate_catalog::ItemId;
use visuplate_i18n::I18nError;

use crate::config::ConfigError;
use crate::selection::SelectionError;

/// A message the store rejected. The store state is unchanged.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The message names an item that is not in the catalog.
    #[error("unknown item '{0}'")]
    UnknownItem(ItemId),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Language(#[from] I18nError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
