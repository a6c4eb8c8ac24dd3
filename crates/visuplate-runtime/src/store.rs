//! The menu store: Elm-style state container for the whole menu screen.
//!
//! All mutation goes through [`MenuStore::update`], one [`Msg`] at a time,
//! processed to completion. Everything the presentation layer reads
//! (filtered list, strings, detail view) is derived from state on demand.
//!
//! # Invariants
//!
//! 1. **Rejected messages are inert**: when `update` returns `Err`, no state
//!    changed and no timer was scheduled or cancelled.
//! 2. **Watch set follows the list**: after every filter message the
//!    [`VisibilityWatcher`] observes exactly the displayed, unrevealed items.
//! 3. **Selection survives filtering**: an open detail view stays open even
//!    if its item is filtered out of the list.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown item | `View`/`ViewModel`/`ItemVisible` with a foreign id | `StoreError::UnknownItem` |
//! | No 3D asset | `ViewModel`/`SwitchToModel` on an image-only item | `SelectionError::MissingAsset` |
//! | Nothing open | `SwitchToModel`/`SwitchToImage` while closed | `SelectionError::NotOpen` |
//! | Unknown language | `RequestLanguage` with a code not in the dictionary | `I18nError::UnknownLanguage` |
//! | Stale settle | `LanguageSettled` from a superseded request | Ignored |

use std::fmt;

use visuplate_catalog::{Catalog, CategoryFilter, Diet, FilterState, ItemId, MenuItem};
use visuplate_i18n::{I18nError, LanguageDictionary, StringTable};
use web_time::Duration;

use crate::config::{ConfigError, MenuConfig};
use crate::error::StoreError;
use crate::language::LanguageSwitch;
use crate::reveal::{NoopWatcher, RevealTracker, VisibilityWatcher};
use crate::selection::SelectionState;
use crate::timer::Timers;
use crate::view::DetailView;

/// Everything that can happen to the menu screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    SetQuery(String),
    SetCategory(CategoryFilter),
    SetDiet(Diet),
    ClearAllFilters,
    /// Open an item's detail view showing its image.
    View(ItemId),
    /// Open an item's detail view showing its 3D model.
    ViewModel(ItemId),
    SwitchToModel,
    SwitchToImage,
    Dismiss,
    RequestLanguage(String),
    /// Delivered by the settle timer of a language request.
    LanguageSettled { generation: u64 },
    /// The host saw this item enter the viewport.
    ItemVisible(ItemId),
}

impl Msg {
    /// Short variant name for logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SetQuery(_) => "set_query",
            Self::SetCategory(_) => "set_category",
            Self::SetDiet(_) => "set_diet",
            Self::ClearAllFilters => "clear_all_filters",
            Self::View(_) => "view",
            Self::ViewModel(_) => "view_model",
            Self::SwitchToModel => "switch_to_model",
            Self::SwitchToImage => "switch_to_image",
            Self::Dismiss => "dismiss",
            Self::RequestLanguage(_) => "request_language",
            Self::LanguageSettled { .. } => "language_settled",
            Self::ItemVisible(_) => "item_visible",
        }
    }
}

/// State of the menu screen.
pub struct MenuStore<W = NoopWatcher> {
    catalog: Catalog,
    dictionary: LanguageDictionary,
    filters: FilterState,
    selection: SelectionState,
    language: LanguageSwitch,
    reveal: RevealTracker,
    watcher: W,
}

impl MenuStore<NoopWatcher> {
    /// Build a store whose host does not track visibility.
    pub fn new(
        catalog: Catalog,
        dictionary: LanguageDictionary,
        config: &MenuConfig,
    ) -> Result<Self, StoreError> {
        Self::with_watcher(catalog, dictionary, config, NoopWatcher)
    }
}

impl<W: VisibilityWatcher> MenuStore<W> {
    /// Build a store that reports displayed items to `watcher`.
    ///
    /// Fails if `config` is invalid or its default language is not in
    /// `dictionary`.
    pub fn with_watcher(
        catalog: Catalog,
        dictionary: LanguageDictionary,
        config: &MenuConfig,
        watcher: W,
    ) -> Result<Self, StoreError> {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors).into());
        }
        if !dictionary.contains(&config.default_language) {
            return Err(I18nError::UnknownLanguage(config.default_language.clone()).into());
        }

        let mut store = Self {
            catalog,
            dictionary,
            filters: FilterState::default(),
            selection: SelectionState::default(),
            language: LanguageSwitch::new(config.default_language.clone(), config.settle_delay()),
            reveal: RevealTracker::new(config.stagger_step(), config.reveal_threshold),
            watcher,
        };
        store.sync_watch();
        tracing::info!(
            target: "visuplate.store",
            items = store.catalog.len(),
            languages = store.dictionary.len(),
            language = %config.default_language,
            "menu store ready"
        );
        Ok(store)
    }

    /// Apply one message.
    ///
    /// Timers scheduled here deliver [`Msg::LanguageSettled`]; the host feeds
    /// those back into `update`.
    pub fn update(&mut self, msg: Msg, timers: &mut dyn Timers<Msg>) -> Result<(), StoreError> {
        let kind = msg.kind();
        tracing::debug!(target: "visuplate.store", msg = kind, "update");
        let result = self.apply(msg, timers);
        if let Err(error) = &result {
            tracing::warn!(
                target: "visuplate.store",
                msg = kind,
                %error,
                "message rejected"
            );
        }
        result
    }

    fn apply(&mut self, msg: Msg, timers: &mut dyn Timers<Msg>) -> Result<(), StoreError> {
        match msg {
            Msg::SetQuery(query) => {
                self.filters.query = query;
                self.sync_watch();
            }
            Msg::SetCategory(category) => {
                self.filters.category = category;
                self.sync_watch();
            }
            Msg::SetDiet(diet) => {
                self.filters.diet = diet;
                self.sync_watch();
            }
            Msg::ClearAllFilters => {
                self.filters.clear();
                self.sync_watch();
            }
            Msg::View(id) => {
                let item = self
                    .catalog
                    .get(id.as_str())
                    .ok_or_else(|| StoreError::UnknownItem(id.clone()))?;
                self.selection.view(item);
            }
            Msg::ViewModel(id) => {
                let item = self
                    .catalog
                    .get(id.as_str())
                    .ok_or_else(|| StoreError::UnknownItem(id.clone()))?;
                self.selection.view_model(item)?;
            }
            Msg::SwitchToModel => self.selection.switch_to_model(&self.catalog)?,
            Msg::SwitchToImage => self.selection.switch_to_image()?,
            Msg::Dismiss => self.selection.dismiss(),
            Msg::RequestLanguage(code) => {
                self.language.request(&code, &self.dictionary, timers, |generation| {
                    Msg::LanguageSettled { generation }
                })?;
            }
            Msg::LanguageSettled { generation } => {
                self.language.settle(generation);
            }
            Msg::ItemVisible(id) => {
                if !self.catalog.contains(id.as_str()) {
                    return Err(StoreError::UnknownItem(id));
                }
                self.reveal.mark_visible(&id, &mut self.watcher);
            }
        }
        Ok(())
    }

    fn sync_watch(&mut self) {
        let displayed = self.catalog.filter(&self.filters);
        self.reveal
            .sync(displayed.iter().map(|item| item.id()), &mut self.watcher);
    }

    // -- Derived views ------------------------------------------------------

    /// Displayed items in catalog order.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&MenuItem> {
        self.catalog.filter(&self.filters)
    }

    #[must_use]
    pub fn result_count(&self) -> usize {
        self.visible_items().len()
    }

    /// Category selector options, `"All"` first.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        self.catalog.categories()
    }

    #[must_use]
    pub fn diet_options(&self) -> &'static [Diet] {
        &Diet::ALL
    }

    /// `(code, languageName)` pairs for the language selector.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.dictionary.languages()
    }

    /// Strings for the requested language. Switches immediately on
    /// `RequestLanguage`; only the overlay waits for the settle.
    pub fn strings(&self) -> Result<StringTable<'_>, I18nError> {
        self.dictionary.resolve(self.language.active())
    }

    /// Strings of the language in place before the pending switch.
    pub fn settled_strings(&self) -> Result<StringTable<'_>, I18nError> {
        self.dictionary.resolve(self.language.settled())
    }

    /// Detail projection of the open item, if any.
    #[must_use]
    pub fn detail(&self) -> Option<DetailView<'_>> {
        let SelectionState::Detail { item, mode } = &self.selection else {
            return None;
        };
        let item = self.catalog.get(item.as_str())?;
        Some(DetailView::project(item, *mode, self.strings().ok()))
    }

    #[must_use]
    pub fn active_language(&self) -> &str {
        self.language.active()
    }

    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.language.is_transitioning()
    }

    #[must_use]
    pub fn has_active_filters(&self) -> bool {
        self.filters.is_active()
    }

    #[must_use]
    pub fn is_revealed(&self, id: &str) -> bool {
        self.reveal.is_revealed(id)
    }

    /// Reveal animation delay for the card at `index` of the displayed list.
    #[must_use]
    pub fn stagger_delay(&self, index: usize) -> Duration {
        self.reveal.stagger_delay(index)
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub fn dictionary(&self) -> &LanguageDictionary {
        &self.dictionary
    }

    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn language(&self) -> &LanguageSwitch {
        &self.language
    }

    #[must_use]
    pub fn reveal(&self) -> &RevealTracker {
        &self.reveal
    }

    #[must_use]
    pub fn watcher(&self) -> &W {
        &self.watcher
    }
}

impl<W> fmt::Debug for MenuStore<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuStore")
            .field("items", &self.catalog.len())
            .field("filters", &self.filters)
            .field("selection", &self.selection)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reveal::WatchList;
    use crate::selection::{DetailMode, SelectionError};
    use crate::timer::ManualTimers;
    use crate::view::Media;
    use visuplate_catalog::RawItem;
    use visuplate_i18n::{LanguageEntry, StringKey};

    fn raw(i: usize) -> RawItem {
        RawItem {
            id: Some(format!("item{i}")),
            name: format!("Dish {i}"),
            desc: String::new(),
            price: format!("{}", 100 + i),
            category: Some(if i < 4 { "Starters" } else { "Mains" }.into()),
            img: format!("dish{i}.png"),
            glb: (i % 2 == 1).then(|| format!("dish{i}.glb")),
            ..Default::default()
        }
    }

    fn dictionary() -> LanguageDictionary {
        let mut dictionary = LanguageDictionary::new();
        dictionary.insert("en", LanguageEntry::new("English").with("title", "Menu"));
        dictionary.insert("fr", LanguageEntry::new("Français").with("title", "Carte"));
        dictionary.insert("de", LanguageEntry::new("Deutsch").with("title", "Speisekarte"));
        dictionary
    }

    fn store() -> MenuStore<WatchList> {
        let raw: Vec<RawItem> = (0..8).map(raw).collect();
        MenuStore::with_watcher(
            Catalog::from_raw(&raw).unwrap(),
            dictionary(),
            &MenuConfig::default(),
            WatchList::new(),
        )
        .unwrap()
    }

    #[test]
    fn starts_unfiltered_and_watching_everything() {
        let store = store();
        assert_eq!(store.result_count(), 8);
        assert_eq!(store.watcher().len(), 8);
        assert!(!store.has_active_filters());
        assert_eq!(store.active_language(), "en");
        assert_eq!(store.categories(), ["All", "Starters", "Mains"]);
        assert_eq!(store.diet_options().len(), 4);
    }

    #[test]
    fn unknown_default_language_rejected() {
        let config = MenuConfig {
            default_language: "xx".into(),
            ..MenuConfig::default()
        };
        let err = MenuStore::new(Catalog::default(), dictionary(), &config).unwrap_err();
        assert!(matches!(err, StoreError::Language(I18nError::UnknownLanguage(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = MenuConfig {
            featured_stride: 0,
            ..MenuConfig::default()
        };
        let err = MenuStore::new(Catalog::default(), dictionary(), &config).unwrap_err();
        assert!(matches!(err, StoreError::Config(ConfigError::Validation(_))));
    }

    #[test]
    fn filters_update_watch_set() {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store
            .update(Msg::SetCategory(CategoryFilter::named("Mains")), &mut timers)
            .unwrap();
        assert_eq!(store.result_count(), 4);
        assert!(store.has_active_filters());
        assert!(!store.watcher().is_observed("item0"));
        assert!(store.watcher().is_observed("item4"));

        store.update(Msg::ClearAllFilters, &mut timers).unwrap();
        assert_eq!(store.result_count(), 8);
        assert_eq!(store.watcher().len(), 8);
    }

    #[test]
    fn view_then_view_model_other_item_goes_straight_to_model() {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store.update(Msg::View(ItemId::new("item5")), &mut timers).unwrap();
        assert_eq!(store.selection().mode(), Some(DetailMode::Image));
        store
            .update(Msg::ViewModel(ItemId::new("item7")), &mut timers)
            .unwrap();
        assert_eq!(
            store.selection(),
            &SelectionState::Detail {
                item: ItemId::new("item7"),
                mode: DetailMode::Model
            }
        );
        let detail = store.detail().unwrap();
        assert_eq!(detail.media, Media::Model("dish7.glb"));
    }

    #[test]
    fn rejected_messages_leave_state() {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store.update(Msg::View(ItemId::new("item2")), &mut timers).unwrap();

        let err = store.update(Msg::SwitchToModel, &mut timers).unwrap_err();
        assert!(matches!(
            err,
            StoreError::Selection(SelectionError::MissingAsset(_))
        ));
        assert_eq!(store.selection().mode(), Some(DetailMode::Image));

        let err = store
            .update(Msg::View(ItemId::new("nope")), &mut timers)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownItem(_)));
        assert_eq!(store.selection().item().map(ItemId::as_str), Some("item2"));

        store.update(Msg::Dismiss, &mut timers).unwrap();
        let err = store.update(Msg::SwitchToImage, &mut timers).unwrap_err();
        assert!(matches!(err, StoreError::Selection(SelectionError::NotOpen)));
        assert!(store.detail().is_none());
    }

    #[test]
    fn language_switch_uses_new_strings_under_overlay() {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store
            .update(Msg::RequestLanguage("fr".into()), &mut timers)
            .unwrap();
        assert!(store.is_transitioning());
        assert_eq!(store.active_language(), "fr");
        assert_eq!(store.strings().unwrap().lookup(StringKey::Title), "Carte");
        assert_eq!(
            store.settled_strings().unwrap().lookup(StringKey::Title),
            "Menu"
        );

        for msg in timers.advance(Duration::from_millis(300)) {
            store.update(msg, &mut timers).unwrap();
        }
        assert!(!store.is_transitioning());
        assert_eq!(store.strings().unwrap().lookup(StringKey::Title), "Carte");
        assert_eq!(
            store.settled_strings().unwrap().lookup(StringKey::Title),
            "Carte"
        );
    }

    #[test]
    fn unknown_language_rejected_without_timer() {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        let err = store
            .update(Msg::RequestLanguage("xx".into()), &mut timers)
            .unwrap_err();
        assert!(matches!(err, StoreError::Language(I18nError::UnknownLanguage(_))));
        assert!(!store.is_transitioning());
        assert_eq!(timers.pending(), 0);
    }

    #[test]
    fn item_visible_reveals_once() {
        let mut store = store();
        let mut timers = ManualTimers::<Msg>::new();
        store
            .update(Msg::ItemVisible(ItemId::new("item3")), &mut timers)
            .unwrap();
        assert!(store.is_revealed("item3"));
        assert!(!store.watcher().is_observed("item3"));
        assert_eq!(store.watcher().len(), 7);

        store
            .update(Msg::ItemVisible(ItemId::new("item3")), &mut timers)
            .unwrap();
        assert_eq!(store.reveal().revealed_count(), 1);

        let err = store
            .update(Msg::ItemVisible(ItemId::new("ghost")), &mut timers)
            .unwrap_err();
        assert!(matches!(err, StoreError::UnknownItem(_)));
    }

    #[test]
    fn stagger_uses_config_step() {
        let store = store();
        assert_eq!(store.stagger_delay(4), Duration::from_millis(400));
    }
}
