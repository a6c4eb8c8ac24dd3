//! Catalog normalizer.
//!
//! # Invariants
//!
//! 1. **Total and order-preserving**: every accepted record yields exactly one
//!    [`MenuItem`], in input order.
//! 2. **Featured by position**: `featured == (index % stride == 0)` where
//!    `index` is the position in the input sequence, independent of any
//!    filter.
//! 3. **Identity**: every item has a non-blank, unique `id` and a non-blank
//!    `category`; otherwise the whole call fails.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Missing `id`/`category` | Absent or blank field | `MalformedItem` |
//! | Repeated `id` | Two records share an id | `DuplicateId` |
//! | Zero stride | Bad config | `InvalidStride` |

use std::collections::HashMap;

use crate::error::CatalogError;
use crate::item::{ItemId, MenuItem, RawItem};

/// Every Nth catalog position is featured.
pub const DEFAULT_FEATURED_STRIDE: usize = 5;

/// Normalizer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Items at positions divisible by this stride are featured. Default: 5.
    pub featured_stride: usize,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            featured_stride: DEFAULT_FEATURED_STRIDE,
        }
    }
}

/// Normalize with the default configuration.
pub fn normalize(raw: &[RawItem]) -> Result<Vec<MenuItem>, CatalogError> {
    normalize_with(raw, &NormalizeConfig::default())
}

/// Normalize raw records into menu items.
pub fn normalize_with(
    raw: &[RawItem],
    config: &NormalizeConfig,
) -> Result<Vec<MenuItem>, CatalogError> {
    if config.featured_stride == 0 {
        return Err(CatalogError::InvalidStride);
    }

    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(raw.len());
    let mut items = Vec::with_capacity(raw.len());

    for (index, record) in raw.iter().enumerate() {
        let id = required(record.id.as_deref(), index, "id")?;
        let category = required(record.category.as_deref(), index, "category")?;

        if let Some(&first) = seen.get(id) {
            return Err(CatalogError::DuplicateId {
                id: id.to_owned(),
                first,
                second: index,
            });
        }
        seen.insert(id, index);

        let veg = record
            .veg
            .unwrap_or_else(|| !is_meat_dish(category, &record.name));

        items.push(MenuItem {
            id: ItemId::new(id),
            position: index,
            name: record.name.clone(),
            description: record.desc.clone(),
            price: record.price.clone(),
            category: category.to_owned(),
            image: record.img.clone(),
            model: non_blank(record.glb.as_deref()),
            ingredients: non_blank(record.ingredients.as_deref()),
            veg,
            vegan: record.vegan.unwrap_or(false),
            featured: is_featured(index, config.featured_stride),
        });
    }

    tracing::debug!(
        target: "visuplate.catalog",
        items = items.len(),
        featured = items.iter().filter(|item| item.featured).count(),
        "catalog normalized"
    );

    Ok(items)
}

/// The only built-in meat heuristic: a burger category or a burger name.
///
/// The category check is case-sensitive, the name check is not.
#[must_use]
pub fn is_meat_dish(category: &str, name: &str) -> bool {
    category.contains("Burger") || name.to_lowercase().contains("burger")
}

/// Whether the item at `position` is featured for the given stride.
#[must_use]
pub fn is_featured(position: usize, stride: usize) -> bool {
    stride != 0 && position % stride == 0
}

fn required<'a>(
    value: Option<&'a str>,
    index: usize,
    field: &'static str,
) -> Result<&'a str, CatalogError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(CatalogError::MalformedItem { index, field }),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_owned)
}
