#![forbid(unsafe_code)]

//! Localization for Visuplate.
//!
//! Holds the language dictionary and resolves a language code into a
//! [`StringTable`] whose well-known keys always produce text.
//!
//! # Role in Visuplate
//! `visuplate-i18n` isolates localization so the runtime can switch
//! languages without knowing the dictionary format.
//!
//! # How it fits in the system
//! The runtime validates language requests against a [`LanguageDictionary`]
//! and resolves the settled language into a [`StringTable`] for display.
//! This crate does not depend on the catalog or the runtime.

pub mod dictionary;
pub mod error;
pub mod table;

pub use dictionary::{LanguageDictionary, LanguageEntry};
pub use error::I18nError;
pub use table::{StringKey, StringTable};
