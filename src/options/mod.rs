//! Runtime options with TOML preset support.
//!
//! Playback settings and shape-constant overrides live here. Options
//! serialize to/from TOML so presets can be stored alongside scenarios.

mod playback;

use std::path::Path;

pub use playback::{PlaybackOptions, MAX_SPEED_SLIDER};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::MetavisError;
use crate::kinematics::ShapeTable;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[playback]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[serde(default)]
pub struct Options {
    /// Playback speed and auto-animate.
    pub playback: PlaybackOptions,
    /// Shape constant overrides keyed by shape name.
    #[schemars(skip)]
    pub shapes: ShapeTable,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            playback: PlaybackOptions::default(),
            shapes: ShapeTable::empty(),
        }
    }
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    pub fn load(path: &Path) -> Result<Self, MetavisError> {
        let content = std::fs::read_to_string(path).map_err(MetavisError::Io)?;
        let options: Self = toml::from_str(&content)
            .map_err(|e| MetavisError::OptionsParse(e.to_string()))?;
        log::info!("loaded options from {}", path.display());
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    pub fn save(&self, path: &Path) -> Result<(), MetavisError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MetavisError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MetavisError::Io)?;
        }
        std::fs::write(path, content).map_err(MetavisError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }

    /// Built-in shape table with this file's overrides applied.
    #[must_use]
    pub fn shape_table(&self) -> ShapeTable {
        let mut table = ShapeTable::default();
        table.merge(&self.shapes);
        table
    }
}
