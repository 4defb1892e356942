//! Settings for BendPick batch runs
//!
//! Supports JSON and TOML settings files. Every section has defaults, so a
//! file only needs the values it changes.
//!
//! Settings are organized into sections:
//! - Pick placement (`pick`: radius and tolerances)
//! - Line classification (`classification`: bend marker, cut layers, color)
//! - Output (`output`: folder name, parallel processing)

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use bendpick_core::{ClassificationRules, PickConfig};

use crate::error::{SettingsError, SettingsResult};

/// Name of the folder, next to the input drawings, that receives the output.
pub const DEFAULT_OUTPUT_FOLDER: &str = "dxf com pick";

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output folder name, created inside the input folder
    pub folder_name: String,
    /// Process the drawings of a folder in parallel
    pub parallel: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            folder_name: DEFAULT_OUTPUT_FOLDER.to_string(),
            parallel: false,
        }
    }
}

/// Complete settings for a run
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pick size and tolerances
    pub pick: PickConfig,
    /// Bend and contour line rules
    pub classification: ClassificationRules,
    /// Output location and scheduling
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "json" => Ok(Format::Json),
        "toml" => Ok(Format::Toml),
        _ => Err(SettingsError::UnsupportedFormat(path.display().to_string())),
    }
}

impl Settings {
    /// Create settings with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with a pick mark of `diameter` drawing units
    pub fn with_pick_size(diameter: f64) -> Self {
        Self {
            pick: PickConfig::from_pick_size(diameter),
            ..Self::default()
        }
    }

    /// Load settings from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let settings: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        settings.validate()?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Save settings to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        std::fs::write(path, content)?;
        debug!("Saved settings to {}", path.display());
        Ok(())
    }

    /// Validate settings
    pub fn validate(&self) -> SettingsResult<()> {
        self.pick.validate()?;

        if self.classification.bend_layer_marker.trim().is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "classification.bend_layer_marker".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let folder = self.output.folder_name.trim();
        if folder.is_empty() {
            return Err(SettingsError::InvalidSetting {
                key: "output.folder_name".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if folder.contains(['/', '\\']) || folder == "." || folder == ".." {
            return Err(SettingsError::InvalidSetting {
                key: "output.folder_name".to_string(),
                reason: format!("'{}' is not a plain folder name", folder),
            });
        }

        Ok(())
    }
}
