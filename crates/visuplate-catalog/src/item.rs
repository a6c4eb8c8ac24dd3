//! Raw and normalized menu item types.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Deserializer};

/// Stable, unique identifier of a menu item.
///
/// Catalog documents use either strings or integers for ids; both are
/// carried as text so lookups are uniform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ItemId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// A catalog record as it appears in the source document.
///
/// Only `id` and `category` are validated; everything else is passed through
/// or defaulted by the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawItem {
    #[serde(default, deserialize_with = "optional_text")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default, deserialize_with = "text")]
    pub price: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub img: String,
    #[serde(default)]
    pub glb: Option<String>,
    #[serde(default)]
    pub ingredients: Option<String>,
    #[serde(default)]
    pub veg: Option<bool>,
    #[serde(default)]
    pub vegan: Option<bool>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl From<TextOrNumber> for String {
    fn from(value: TextOrNumber) -> Self {
        match value {
            TextOrNumber::Text(s) => s,
            TextOrNumber::Integer(n) => n.to_string(),
            TextOrNumber::Float(n) => n.to_string(),
        }
    }
}

fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    TextOrNumber::deserialize(deserializer).map(String::from)
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<TextOrNumber>::deserialize(deserializer).map(|value| value.map(String::from))
}

/// How an item's diet is shown on cards and in the detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DietBadge {
    Vegan,
    Vegetarian,
    NonVegetarian,
}

impl DietBadge {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vegan => "Vegan",
            Self::Vegetarian => "Vegetarian",
            Self::NonVegetarian => "Non-Vegetarian",
        }
    }

    /// Indicator glyph.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Vegan => "🌱",
            Self::Vegetarian => "🟢",
            Self::NonVegetarian => "🔴",
        }
    }
}

/// A normalized, immutable menu item.
///
/// Built only by the normalizer, which guarantees a non-empty `id` and
/// `category` and derives `veg` and `featured`.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub(crate) id: ItemId,
    pub(crate) position: usize,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) price: String,
    pub(crate) category: String,
    pub(crate) image: String,
    pub(crate) model: Option<String>,
    pub(crate) ingredients: Option<String>,
    pub(crate) veg: bool,
    pub(crate) vegan: bool,
    pub(crate) featured: bool,
}

impl MenuItem {
    #[must_use]
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Zero-based position in the source catalog.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price as display text; never parsed.
    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Image reference.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.image
    }

    /// 3D model reference, if the item ships one.
    #[must_use]
    pub fn model(&self) -> Option<&str> {
        self.model.as_deref()
    }

    #[must_use]
    pub fn ingredients(&self) -> Option<&str> {
        self.ingredients.as_deref()
    }

    #[must_use]
    pub fn is_veg(&self) -> bool {
        self.veg
    }

    #[must_use]
    pub fn is_vegan(&self) -> bool {
        self.vegan
    }

    #[must_use]
    pub fn is_featured(&self) -> bool {
        self.featured
    }

    /// Vegan wins over vegetarian; anything else is non-vegetarian.
    #[must_use]
    pub fn diet_badge(&self) -> DietBadge {
        if self.vegan {
            DietBadge::Vegan
        } else if self.veg {
            DietBadge::Vegetarian
        } else {
            DietBadge::NonVegetarian
        }
    }
}
