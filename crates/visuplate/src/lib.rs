#![forbid(unsafe_code)]

//! Visuplate public facade crate.
//!
//! Re-exports the catalog, localization, and runtime types a host needs and
//! folds their errors into a single [`Error`]. Most hosts only need the
//! [`prelude`] and [`load_store`].

use std::path::Path;

pub mod error;

pub use error::{Error, Recovery, Result};

// --- Catalog re-exports ----------------------------------------------------

pub use visuplate_catalog::{
    Catalog, CategoryFilter, Diet, DietBadge, FilterState, ItemId, MenuItem, NormalizeConfig,
    RawItem,
};

// --- Localization re-exports -----------------------------------------------

pub use visuplate_i18n::{LanguageDictionary, LanguageEntry, StringKey, StringTable};

// --- Runtime re-exports ----------------------------------------------------

pub use visuplate_runtime::{
    DetailMode, DetailView, ManualTimers, MenuConfig, MenuStore, Msg, NoopWatcher,
    SelectionState, ThreadTimers, TimerHandle, Timers, VisibilityWatcher, WatchList,
};

// --- Loading ----------------------------------------------------------------

/// Load a catalog and a language dictionary from JSON files and build a
/// store over them.
///
/// The catalog is normalized with `config.featured_stride`.
pub fn load_store<W: VisibilityWatcher>(
    catalog: impl AsRef<Path>,
    languages: impl AsRef<Path>,
    config: &MenuConfig,
    watcher: W,
) -> Result<MenuStore<W>> {
    let catalog = Catalog::from_json_file(catalog, &config.to_normalize_config())?;
    let dictionary = LanguageDictionary::from_json_file(languages)?;
    Ok(MenuStore::with_watcher(catalog, dictionary, config, watcher)?)
}

// --- Prelude ---------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Catalog, CategoryFilter, DetailMode, Diet, Error, ItemId, LanguageDictionary, ManualTimers,
        MenuConfig, MenuStore, Msg, Result, SelectionState, StringKey, Timers, load_store,
    };

    pub use crate::{catalog, i18n, runtime};
}

pub use visuplate_catalog as catalog;
pub use visuplate_i18n as i18n;
pub use visuplate_runtime as runtime;
