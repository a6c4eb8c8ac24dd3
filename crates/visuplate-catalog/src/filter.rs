//! Filter engine.
//!
//! An item is displayed iff it passes all three predicates:
//!
//! - **Text**: the query is empty, or its lower-cased form is a substring of
//!   the lower-cased name or description.
//! - **Category**: [`CategoryFilter::All`], or an exact, case-sensitive match.
//! - **Diet**: see [`Diet::admits`]. `Vegan` only looks at the vegan flag and
//!   does not imply `veg`.
//!
//! # Invariants
//!
//! 1. Output is a subsequence of the input (catalog order preserved).
//! 2. Filtering is pure: the same inputs always give the same output.
//! 3. The default [`FilterState`] admits every item.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ParseDietError;
use crate::item::{MenuItem, RawItem};

/// Diet selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Diet {
    #[default]
    All,
    Veg,
    NonVeg,
    Vegan,
}

impl Diet {
    /// Selector options in presentation order.
    pub const ALL: [Diet; 4] = [Diet::All, Diet::Veg, Diet::NonVeg, Diet::Vegan];

    /// Display label, also the accepted text form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Veg => "Veg",
            Self::NonVeg => "Non-Veg",
            Self::Vegan => "Vegan",
        }
    }

    /// Selector glyph; `All` has none.
    #[must_use]
    pub const fn symbol(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Veg => Some("🟢"),
            Self::NonVeg => Some("🔴"),
            Self::Vegan => Some("🌱"),
        }
    }

    /// Whether an item passes this diet filter.
    #[must_use]
    pub fn admits(self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Veg => item.is_veg(),
            Self::NonVeg => !item.is_veg(),
            Self::Vegan => item.is_vegan(),
        }
    }
}

impl fmt::Display for Diet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Diet {
    type Err = ParseDietError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|diet| diet.label() == s)
            .ok_or_else(|| ParseDietError(s.to_owned()))
    }
}

/// Category selector: the `All` sentinel or one exact category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Label of the sentinel option.
    pub const ALL_LABEL: &'static str = "All";

    #[must_use]
    pub fn named(category: impl Into<String>) -> Self {
        Self::Named(category.into())
    }

    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::All => Self::ALL_LABEL,
            Self::Named(category) => category,
        }
    }

    /// Whether an item passes this category filter.
    #[must_use]
    pub fn admits(&self, item: &MenuItem) -> bool {
        match self {
            Self::All => true,
            Self::Named(category) => item.category() == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Selector labels map back to filters; `"All"` is the sentinel.
impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        if label == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Named(label.to_owned())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        if label == Self::ALL_LABEL {
            Self::All
        } else {
            Self::Named(label)
        }
    }
}

/// Live filter selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub query: String,
    pub category: CategoryFilter,
    pub diet: Diet,
}

impl FilterState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any filter differs from its default.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.category != CategoryFilter::All || self.diet != Diet::All
    }

    /// Reset query, category, and diet in one step.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether a single item passes all three predicates.
    #[must_use]
    pub fn matches(&self, item: &MenuItem) -> bool {
        matches_query(item, &self.query) && self.category.admits(item) && self.diet.admits(item)
    }
}

/// Case-insensitive substring match against name or description.
#[must_use]
pub fn matches_query(item: &MenuItem, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    contains_lowered(item, &query.to_lowercase())
}

fn contains_lowered(item: &MenuItem, needle: &str) -> bool {
    item.name().to_lowercase().contains(needle)
        || item.description().to_lowercase().contains(needle)
}

/// Items admitted by `state`, in catalog order.
#[must_use]
pub fn filter<'a>(items: &'a [MenuItem], state: &FilterState) -> Vec<&'a MenuItem> {
    let needle = state.query.to_lowercase();
    items
        .iter()
        .filter(|item| needle.is_empty() || contains_lowered(item, &needle))
        .filter(|item| state.category.admits(item))
        .filter(|item| state.diet.admits(item))
        .collect()
}

/// Category selector options: `"All"` followed by the distinct categories of
/// the raw catalog in first-occurrence order.
#[must_use]
pub fn category_options(raw: &[RawItem]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut options = vec![CategoryFilter::ALL_LABEL.to_owned()];
    for category in raw.iter().filter_map(|record| record.category.as_deref()) {
        if seen.insert(category) {
            options.push(category.to_owned());
        }
    }
    options
}
