//! Language dictionary: language code to localized strings.
//!
//! # Invariants
//!
//! 1. **Document order**: codes keep the order of the source document; it
//!    drives the language selector.
//! 2. **Named entries**: every entry carries a `languageName`.
//! 3. **Immutable after load**: `LanguageDictionary` is `Send + Sync` and
//!    shared by reference.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing `languageName` | Entry without the field | `I18nError::Json` |
//! | Non-string value | Nested or numeric entry value | `I18nError::Json` |
//! | Unknown code | Code not in the document | `I18nError::UnknownLanguage` |

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::I18nError;
use crate::table::StringTable;

/// Strings for a single language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageEntry {
    /// Native name shown in the selector.
    #[serde(rename = "languageName")]
    pub language_name: String,
    /// Every other key, verbatim.
    #[serde(flatten)]
    pub strings: BTreeMap<String, String>,
}

impl LanguageEntry {
    #[must_use]
    pub fn new(language_name: impl Into<String>) -> Self {
        Self {
            language_name: language_name.into(),
            strings: BTreeMap::new(),
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.strings.insert(key.into(), value.into());
        self
    }

    /// Raw value for `key`, empty strings included.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }
}

/// Ordered mapping from language code to [`LanguageEntry`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageDictionary {
    entries: Vec<(String, LanguageEntry)>,
    index: HashMap<String, usize>,
}

impl LanguageDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a language. A replaced code keeps its position.
    pub fn insert(&mut self, code: impl Into<String>, entry: LanguageEntry) {
        let code = code.into();
        if let Some(&slot) = self.index.get(&code) {
            self.entries[slot].1 = entry;
        } else {
            self.index.insert(code.clone(), self.entries.len());
            self.entries.push((code, entry));
        }
    }

    /// Parse a JSON object keyed by language code.
    pub fn from_json_str(json: &str) -> Result<Self, I18nError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON dictionary file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, I18nError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| I18nError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dictionary = Self::from_json_str(&content)?;
        tracing::info!(
            target: "visuplate.i18n",
            path = %path.display(),
            languages = dictionary.len(),
            "language dictionary loaded"
        );
        Ok(dictionary)
    }

    #[must_use]
    pub fn contains(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    #[must_use]
    pub fn get(&self, code: &str) -> Option<&LanguageEntry> {
        self.index.get(code).map(|&slot| &self.entries[slot].1)
    }

    /// Resolve a language code into its string table.
    pub fn resolve(&self, code: &str) -> Result<StringTable<'_>, I18nError> {
        match self.index.get(code) {
            Some(&slot) => {
                let (code, entry) = &self.entries[slot];
                Ok(StringTable::new(code, entry))
            }
            None => Err(I18nError::UnknownLanguage(code.to_owned())),
        }
    }

    /// `(code, languageName)` pairs in document order.
    pub fn languages(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(code, entry)| (code.as_str(), entry.language_name.as_str()))
    }

    /// Language codes in document order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(code, _)| code.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'de> Deserialize<'de> for LanguageDictionary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = LanguageDictionary;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by language code")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut dictionary = LanguageDictionary::new();
                while let Some((code, entry)) = map.next_entry::<String, LanguageEntry>()? {
                    dictionary.insert(code, entry);
                }
                Ok(dictionary)
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

impl Serialize for LanguageDictionary {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.entries.iter().map(|(code, entry)| (code, entry)))
    }
}
