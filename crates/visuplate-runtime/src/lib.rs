#![forbid(unsafe_code)]

//! Runtime for Visuplate: the menu store and its state machines.
//!
//! # Role in Visuplate
//! `visuplate-runtime` owns all mutable presentation state. Hosts feed it
//! [`Msg`]s and read derived views back out.
//!
//! # Primary responsibilities
//! - **MenuStore**: Elm-style `update(msg)` over filters, selection, language,
//!   and reveal state.
//! - **Selection**: list → detail → 3D state machine.
//! - **Language switch**: busy flag with a cancellable settle timer.
//! - **Timers**: deterministic [`ManualTimers`] and wall-clock
//!   [`ThreadTimers`].
//! - **Config**: [`MenuConfig`], loaded from TOML or JSON with the
//!   `config-files` feature.
//!
//! # How it fits in the system
//! The runtime sits on top of `visuplate-catalog` (items and filtering) and
//! `visuplate-i18n` (strings). It performs no rendering and no I/O beyond
//! config loading; timers are injected by the host.

pub mod config;
pub mod error;
pub mod language;
pub mod reveal;
pub mod selection;
pub mod store;
pub mod timer;
pub mod view;

pub use config::{ConfigError, MenuConfig};
pub use error::StoreError;
pub use language::{DEFAULT_SETTLE_DELAY, LanguageSwitch};
pub use reveal::{
    DEFAULT_REVEAL_THRESHOLD, DEFAULT_STAGGER_STEP, NoopWatcher, RevealTracker, VisibilityWatcher,
    WatchList,
};
pub use selection::{DetailMode, SelectionError, SelectionState};
pub use store::{MenuStore, Msg};
pub use timer::{ManualTimers, ThreadTimers, TimerHandle, Timers};
pub use view::{DetailView, FEATURED_LABEL, Labeled, Media};
