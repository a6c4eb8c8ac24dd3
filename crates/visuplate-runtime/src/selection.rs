//! Selection state machine: which item is in the detail view, and how.
//!
//! ```text
//!   Closed           ── view(i) ─────────▶ Detail(i, Image)
//!   Closed           ── view_model(i) ───▶ Detail(i, Model)
//!   Detail(i, Image) ── switch_to_model ─▶ Detail(i, Model)
//!   Detail(i, Model) ── switch_to_image ─▶ Detail(i, Image)
//!   Detail(_, _)     ── dismiss ─────────▶ Closed
//! ```
//!
//! # Invariants
//!
//! 1. **Single slot**: at most one item is selected.
//! 2. **Model needs an asset**: `Model` mode is only ever entered for an item
//!    with a 3D model reference.
//! 3. **Atomic replacement**: selecting another item while open replaces the
//!    selection in one step, without passing through `Closed`.
//! 4. **Failed transitions are inert**: every `Err` leaves the state as it
//!    was.

use thiserror::Error;
use visuplate_catalog::{Catalog, ItemId, MenuItem};

/// What the detail view is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetailMode {
    #[default]
    Image,
    Model,
}

/// Rejected selection transitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// The item has no 3D model.
    #[error("item '{0}' has no 3D model")]
    MissingAsset(ItemId),

    /// A mode switch was requested with no item open.
    #[error("no item is open in the detail view")]
    NotOpen,
}

/// Current selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Closed,
    Detail { item: ItemId, mode: DetailMode },
}

impl SelectionState {
    #[must_use]
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Detail { .. })
    }

    #[must_use]
    pub fn item(&self) -> Option<&ItemId> {
        match self {
            Self::Closed => None,
            Self::Detail { item, .. } => Some(item),
        }
    }

    #[must_use]
    pub fn mode(&self) -> Option<DetailMode> {
        match self {
            Self::Closed => None,
            Self::Detail { mode, .. } => Some(*mode),
        }
    }

    /// Open `item` showing its image.
    pub fn view(&mut self, item: &MenuItem) {
        *self = Self::Detail {
            item: item.id().clone(),
            mode: DetailMode::Image,
        };
    }

    /// Open `item` showing its 3D model.
    pub fn view_model(&mut self, item: &MenuItem) -> Result<(), SelectionError> {
        if item.model().is_none() {
            return Err(SelectionError::MissingAsset(item.id().clone()));
        }
        *self = Self::Detail {
            item: item.id().clone(),
            mode: DetailMode::Model,
        };
        Ok(())
    }

    /// Switch the open item to its 3D model.
    ///
    /// The open item is looked up in `catalog` to check for a model.
    pub fn switch_to_model(&mut self, catalog: &Catalog) -> Result<(), SelectionError> {
        let Self::Detail { item, mode } = self else {
            return Err(SelectionError::NotOpen);
        };
        if catalog.get(item.as_str()).and_then(MenuItem::model).is_none() {
            return Err(SelectionError::MissingAsset(item.clone()));
        }
        *mode = DetailMode::Model;
        Ok(())
    }

    /// Switch the open item back to its image.
    pub fn switch_to_image(&mut self) -> Result<(), SelectionError> {
        match self {
            Self::Closed => Err(SelectionError::NotOpen),
            Self::Detail { mode, .. } => {
                *mode = DetailMode::Image;
                Ok(())
            }
        }
    }

    /// Close the detail view. No-op when already closed.
    pub fn dismiss(&mut self) {
        *self = Self::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visuplate_catalog::RawItem;

    fn catalog() -> Catalog {
        let raw: Vec<RawItem> = (0..8)
            .map(|i| RawItem {
                id: Some(format!("item{i}")),
                name: format!("Dish {i}"),
                category: Some("Mains".into()),
                glb: (i % 2 == 1).then(|| format!("dish{i}.glb")),
                ..Default::default()
            })
            .collect();
        Catalog::from_raw(&raw).unwrap()
    }

    fn open(id: &str, mode: DetailMode) -> SelectionState {
        SelectionState::Detail {
            item: ItemId::new(id),
            mode,
        }
    }

    #[test]
    fn view_opens_image() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        state.view(catalog.get("item2").unwrap());
        assert_eq!(state, open("item2", DetailMode::Image));
        assert!(state.is_open());
    }

    #[test]
    fn view_model_requires_asset() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        let err = state.view_model(catalog.get("item2").unwrap()).unwrap_err();
        assert_eq!(err, SelectionError::MissingAsset(ItemId::new("item2")));
        assert_eq!(state, SelectionState::Closed);

        state.view_model(catalog.get("item3").unwrap()).unwrap();
        assert_eq!(state, open("item3", DetailMode::Model));
    }

    #[test]
    fn switching_other_item_replaces_directly() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        state.view(catalog.get("item5").unwrap());
        state.view_model(catalog.get("item7").unwrap()).unwrap();
        assert_eq!(state, open("item7", DetailMode::Model));
    }

    #[test]
    fn toggle_between_image_and_model() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        state.view(catalog.get("item1").unwrap());
        state.switch_to_model(&catalog).unwrap();
        assert_eq!(state.mode(), Some(DetailMode::Model));
        state.switch_to_image().unwrap();
        assert_eq!(state, open("item1", DetailMode::Image));
    }

    #[test]
    fn switch_to_model_without_asset_is_inert() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        state.view(catalog.get("item4").unwrap());
        let before = state.clone();
        assert_eq!(
            state.switch_to_model(&catalog),
            Err(SelectionError::MissingAsset(ItemId::new("item4")))
        );
        assert_eq!(state, before);
    }

    #[test]
    fn switching_while_closed_is_rejected() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        assert_eq!(state.switch_to_model(&catalog), Err(SelectionError::NotOpen));
        assert_eq!(state.switch_to_image(), Err(SelectionError::NotOpen));
        assert_eq!(state, SelectionState::Closed);
    }

    #[test]
    fn dismiss_closes_and_is_idempotent() {
        let catalog = catalog();
        let mut state = SelectionState::default();
        state.view_model(catalog.get("item1").unwrap()).unwrap();
        state.dismiss();
        assert_eq!(state, SelectionState::Closed);
        state.dismiss();
        assert_eq!(state, SelectionState::Closed);
        assert_eq!(state.item(), None);
    }
}
