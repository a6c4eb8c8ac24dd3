//! Read-only projections handed to the presentation layer.

use visuplate_catalog::{DietBadge, ItemId, MenuItem};
use visuplate_i18n::{StringKey, StringTable};

use crate::selection::DetailMode;

/// Badge text for featured items.
pub const FEATURED_LABEL: &str = "Chef's Choice";

/// Media the detail view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Media<'a> {
    Image(&'a str),
    Model(&'a str),
}

/// A value with its localized heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labeled<'a> {
    pub label: &'a str,
    pub value: &'a str,
}

/// Everything the detail view renders for the selected item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailView<'a> {
    pub id: &'a ItemId,
    pub name: &'a str,
    pub price: &'a str,
    pub description: &'a str,
    pub badge: DietBadge,
    /// [`FEATURED_LABEL`] for featured items.
    pub featured: Option<&'static str>,
    /// Present only when the item lists ingredients.
    pub ingredients: Option<Labeled<'a>>,
    pub category: Labeled<'a>,
    pub media: Media<'a>,
}

impl<'a> DetailView<'a> {
    /// Project `item` in `mode`. Without a string table, headings use the
    /// English defaults.
    #[must_use]
    pub fn project(item: &'a MenuItem, mode: DetailMode, strings: Option<StringTable<'a>>) -> Self {
        let label = |key: StringKey| strings.map_or(key.fallback(), |table| table.lookup(key));

        let media = match (mode, item.model()) {
            (DetailMode::Model, Some(model)) => Media::Model(model),
            _ => Media::Image(item.image()),
        };

        Self {
            id: item.id(),
            name: item.name(),
            price: item.price(),
            description: item.description(),
            badge: item.diet_badge(),
            featured: item.is_featured().then_some(FEATURED_LABEL),
            ingredients: item.ingredients().map(|value| Labeled {
                label: label(StringKey::Ingredients),
                value,
            }),
            category: Labeled {
                label: label(StringKey::Category),
                value: item.category(),
            },
            media,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visuplate_catalog::{Catalog, RawItem};
    use visuplate_i18n::{LanguageDictionary, LanguageEntry};

    fn catalog() -> Catalog {
        Catalog::from_raw(&[
            RawItem {
                id: Some("tikka".into()),
                name: "Paneer Tikka".into(),
                price: "₹280".into(),
                category: Some("Starters".into()),
                img: "tikka.png".into(),
                glb: Some("tikka.glb".into()),
                ingredients: Some("Paneer, spices".into()),
                ..Default::default()
            },
            RawItem {
                id: Some("burger".into()),
                name: "Classic Burger".into(),
                category: Some("Burgers".into()),
                img: "burger.png".into(),
                ..Default::default()
            },
        ])
        .unwrap()
    }

    #[test]
    fn projects_featured_item_with_localized_labels() {
        let catalog = catalog();
        let mut dictionary = LanguageDictionary::new();
        dictionary.insert(
            "fr",
            LanguageEntry::new("Français")
                .with("ingredients", "Ingrédients")
                .with("category", "Catégorie"),
        );
        let strings = dictionary.resolve("fr").ok();
        let view = DetailView::project(catalog.get("tikka").unwrap(), DetailMode::Model, strings);

        assert_eq!(view.name, "Paneer Tikka");
        assert_eq!(view.price, "₹280");
        assert_eq!(view.featured, Some(FEATURED_LABEL));
        assert_eq!(view.badge, DietBadge::Vegetarian);
        assert_eq!(
            view.ingredients,
            Some(Labeled {
                label: "Ingrédients",
                value: "Paneer, spices"
            })
        );
        assert_eq!(view.category.label, "Catégorie");
        assert_eq!(view.category.value, "Starters");
        assert_eq!(view.media, Media::Model("tikka.glb"));
    }

    #[test]
    fn plain_item_without_strings() {
        let catalog = catalog();
        let view = DetailView::project(catalog.get("burger").unwrap(), DetailMode::Image, None);
        assert_eq!(view.featured, None);
        assert_eq!(view.ingredients, None);
        assert_eq!(view.badge, DietBadge::NonVegetarian);
        assert_eq!(view.category.label, "Category");
        assert_eq!(view.media, Media::Image("burger.png"));
    }
}
