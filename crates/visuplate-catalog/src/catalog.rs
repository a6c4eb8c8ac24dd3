//! Loaded catalog: normalized items plus derived category options.

use std::collections::HashMap;
use std::path::Path;

use crate::error::CatalogError;
use crate::filter::{FilterState, category_options, filter};
use crate::item::{ItemId, MenuItem, RawItem};
use crate::normalize::{NormalizeConfig, normalize_with};

/// Immutable, normalized catalog with an id index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    categories: Vec<String>,
    index: HashMap<ItemId, usize>,
}

impl Catalog {
    /// Normalize raw records with the default configuration.
    pub fn from_raw(raw: &[RawItem]) -> Result<Self, CatalogError> {
        Self::from_raw_with(raw, &NormalizeConfig::default())
    }

    pub fn from_raw_with(raw: &[RawItem], config: &NormalizeConfig) -> Result<Self, CatalogError> {
        let items = normalize_with(raw, config)?;
        let index = items
            .iter()
            .enumerate()
            .map(|(slot, item)| (item.id().clone(), slot))
            .collect();
        Ok(Self {
            items,
            categories: category_options(raw),
            index,
        })
    }

    /// Parse a JSON array of catalog records.
    pub fn from_json_str(json: &str, config: &NormalizeConfig) -> Result<Self, CatalogError> {
        let raw: Vec<RawItem> = serde_json::from_str(json)?;
        Self::from_raw_with(&raw, config)
    }

    /// Read and parse a JSON catalog file.
    pub fn from_json_file(
        path: impl AsRef<Path>,
        config: &NormalizeConfig,
    ) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let _span =
            tracing::debug_span!(target: "visuplate.catalog", "catalog_load", path = %path.display())
                .entered();
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_json_str(&content, config)?;
        tracing::info!(
            target: "visuplate.catalog",
            path = %path.display(),
            items = catalog.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// All items in catalog order.
    #[must_use]
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    /// Category selector options, `"All"` first.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MenuItem> {
        self.index.get(id).map(|&slot| &self.items[slot])
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items admitted by `state`, in catalog order.
    #[must_use]
    pub fn filter(&self, state: &FilterState) -> Vec<&MenuItem> {
        filter(&self.items, state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{CategoryFilter, Diet};
    use std::io::Write;

    const MENU: &str = r#"[
        {"id": "1", "name": "Paneer Tikka", "desc": "Char-grilled cottage cheese", "price": "₹280", "category": "Starters", "img": "tikka.png", "glb": "tikka.glb", "ingredients": "Paneer, yoghurt, spices"},
        {"id": 2, "name": "Chicken Biryani", "desc": "Fragrant rice", "price": 350, "category": "Mains", "img": "biryani.png", "veg": false},
        {"id": "3", "name": "Classic Burger", "desc": "Beef patty", "price": "₹320", "category": "Burgers", "img": "burger.png"},
        {"id": "4", "name": "Buddha Bowl", "desc": "Quinoa and greens", "price": "₹300", "category": "Mains", "img": "bowl.png", "vegan": true}
    ]"#;

    fn catalog() -> Catalog {
        Catalog::from_json_str(MENU, &NormalizeConfig::default()).unwrap()
    }

    #[test]
    fn parses_and_indexes() {
        let catalog = catalog();
        assert_eq!(catalog.len(), 4);
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get("2").map(MenuItem::name), Some("Chicken Biryani"));
        assert_eq!(catalog.get("2").map(MenuItem::price), Some("350"));
        assert!(catalog.contains("4"));
        assert!(catalog.get("99").is_none());
    }

    #[test]
    fn derives_categories() {
        assert_eq!(
            catalog().categories(),
            ["All", "Starters", "Mains", "Burgers"]
        );
    }

    #[test]
    fn heuristics_applied() {
        let catalog = catalog();
        assert!(catalog.get("1").unwrap().is_veg());
        assert!(!catalog.get("3").unwrap().is_veg());
        assert!(catalog.get("1").unwrap().is_featured());
        assert!(!catalog.get("2").unwrap().is_featured());
    }

    #[test]
    fn filter_delegates_to_engine() {
        let catalog = catalog();
        let state = FilterState {
            category: CategoryFilter::named("Mains"),
            diet: Diet::Vegan,
            ..Default::default()
        };
        let ids: Vec<&str> = catalog
            .filter(&state)
            .iter()
            .map(|item| item.id().as_str())
            .collect();
        assert_eq!(ids, vec!["4"]);
    }

    #[test]
    fn empty_catalog() {
        let catalog = Catalog::from_json_str("[]", &NormalizeConfig::default()).unwrap();
        assert!(catalog.is_empty());
        assert_eq!(catalog.categories(), ["All"]);
        assert!(catalog.filter(&FilterState::default()).is_empty());
    }

    #[test]
    fn invalid_json_is_reported() {
        let err = Catalog::from_json_str("{not json", &NormalizeConfig::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Json(_)));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MENU.as_bytes()).unwrap();
        let catalog = Catalog::from_json_file(file.path(), &NormalizeConfig::default()).unwrap();
        assert_eq!(catalog.len(), 4);
    }

    #[test]
    fn missing_file_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = Catalog::from_json_file(&path, &NormalizeConfig::default()).unwrap_err();
        match err {
            CatalogError::Io { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
