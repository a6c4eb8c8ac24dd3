#![forbid(unsafe_code)]

//! Headless Visuplate host.
//!
//! Loads a catalog and a language dictionary, then drives a
//! [`visuplate::MenuStore`] from a line-oriented command script, printing
//! the resulting state after every command. Timers run on a manual clock
//! advanced by `wait <ms>`.

pub mod cli;
pub mod error;
pub mod render;
pub mod script;
pub mod session;

pub use cli::run_from_env;
pub use error::{DemoError, Result};
