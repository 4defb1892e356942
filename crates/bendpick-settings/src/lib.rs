//! BendPick Settings Crate
//!
//! Loads, validates and saves the settings of a batch run.

pub mod config;
pub mod error;

pub use config::{OutputSettings, Settings, DEFAULT_OUTPUT_FOLDER};
pub use error::{SettingsError, SettingsResult};
