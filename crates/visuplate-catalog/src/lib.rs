#![forbid(unsafe_code)]

//! Catalog: menu item model, normalization, and filtering.
//!
//! # Role in Visuplate
//! `visuplate-catalog` is the data layer. It turns raw catalog records into
//! immutable [`MenuItem`]s and derives the displayed subset for a given
//! [`FilterState`].
//!
//! # Primary responsibilities
//! - **Normalizer**: fills in `veg` and `featured`, rejects malformed records.
//! - **Filter engine**: text, category, and diet predicates in catalog order.
//! - **Loading**: JSON catalog parsing into a [`Catalog`].
//!
//! # How it fits in the system
//! The runtime (`visuplate-runtime`) owns a [`Catalog`] and a [`FilterState`]
//! and re-derives the visible list whenever the filters change. Nothing in
//! this crate holds mutable state or performs I/O beyond explicit loading.

pub mod catalog;
pub mod error;
pub mod filter;
pub mod item;
pub mod normalize;

pub use catalog::Catalog;
pub use error::{CatalogError, ParseDietError};
pub use filter::{CategoryFilter, Diet, FilterState, category_options, filter, matches_query};
pub use item::{DietBadge, ItemId, MenuItem, RawItem};
pub use normalize::{
    DEFAULT_FEATURED_STRIDE, NormalizeConfig, is_featured, is_meat_dish, normalize, normalize_with,
};
