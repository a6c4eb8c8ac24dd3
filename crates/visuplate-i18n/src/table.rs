//! Resolved string table with per-key fallbacks.
//!
//! Well-known keys ([`StringKey`]) always produce text: a missing or empty
//! value falls back to the built-in English default. Any other key has no
//! fallback.

use std::fmt;

use crate::dictionary::LanguageEntry;

/// Keys the presentation layer always needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringKey {
    Title,
    SearchPlaceholder,
    Reset,
    Ingredients,
    Category,
}

impl StringKey {
    pub const ALL: [StringKey; 5] = [
        StringKey::Title,
        StringKey::SearchPlaceholder,
        StringKey::Reset,
        StringKey::Ingredients,
        StringKey::Category,
    ];

    /// Key name in the dictionary document.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::SearchPlaceholder => "searchPlaceholder",
            Self::Reset => "reset",
            Self::Ingredients => "ingredients",
            Self::Category => "category",
        }
    }

    /// Look up a well-known key by its document name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }

    /// English text used when a language lacks the key.
    #[must_use]
    pub const fn fallback(self) -> &'static str {
        match self {
            Self::Title => "Premium Menu",
            Self::SearchPlaceholder => "Search menu items...",
            Self::Reset => "Clear All",
            Self::Ingredients => "Ingredients",
            Self::Category => "Category",
        }
    }
}

impl fmt::Display for StringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strings of one resolved language.
#[derive(Debug, Clone, Copy)]
pub struct StringTable<'a> {
    code: &'a str,
    entry: &'a LanguageEntry,
}

impl<'a> StringTable<'a> {
    pub(crate) fn new(code: &'a str, entry: &'a LanguageEntry) -> Self {
        Self { code, entry }
    }

    #[must_use]
    pub fn code(&self) -> &'a str {
        self.code
    }

    #[must_use]
    pub fn language_name(&self) -> &'a str {
        &self.entry.language_name
    }

    /// Text for a well-known key, falling back to the English default.
    #[must_use]
    pub fn lookup(&self, key: StringKey) -> &'a str {
        match self.value(key.as_str()) {
            Some(text) => text,
            None => {
                tracing::debug!(
                    target: "visuplate.i18n",
                    language = self.code,
                    key = key.as_str(),
                    "string missing, using fallback"
                );
                key.fallback()
            }
        }
    }

    /// Text for any key. Well-known keys never return `None`.
    #[must_use]
    pub fn lookup_str(&self, key: &str) -> Option<&'a str> {
        match StringKey::from_name(key) {
            Some(known) => Some(self.lookup(known)),
            None => self.value(key),
        }
    }

    fn value(&self, key: &str) -> Option<&'a str> {
        self.entry.get(key).filter(|text| !text.is_empty())
    }
}
