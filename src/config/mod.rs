//! Configuration for the polyfills loader
//!
//! This module contains data structures for:
//! - `entries` / `legacyEntries` - Application entry groups
//! - `polyfills` - Polyfill toggles and custom polyfills
//! - `minify` - Script and HTML minification
//! - `polyfillRegistry` - Where named polyfills are read from
//!
//! A [`LoaderConfig`] is built once per invocation, either in code or from a
//! `polyfills-loader.yaml` (or `.json`) file.

pub mod entries;
pub mod minify;
pub mod polyfills;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{self, Result};
use crate::polyfills::registry::{KnownPolyfill, PolyfillLocation};

// Re-export commonly used types
pub use entries::{AppEntries, EntryFormat};
pub use minify::{HtmlMinifyOptions, MinifySetting};
pub use polyfills::{CustomPolyfill, PolyfillsConfig, SystemJsConfig};

/// Default config filename, looked up next to the index.html
pub const CONFIG_FILE: &str = "polyfills-loader.yaml";

/// Where named polyfills are read from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistryConfig {
    /// Root of the installed npm packages
    pub node_modules: PathBuf,

    /// Per-polyfill locations, replacing the npm package layout
    pub overrides: BTreeMap<KnownPolyfill, PolyfillLocation>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            node_modules: PathBuf::from("node_modules"),
            overrides: BTreeMap::new(),
        }
    }
}

/// Polyfills loader configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoaderConfig {
    /// Modern entries, required for injection
    pub entries: Option<AppEntries>,

    /// Entries for browsers without native module support
    pub legacy_entries: Option<AppEntries>,

    pub polyfills: Option<PolyfillsConfig>,

    pub minify: MinifySetting,

    /// Extra files to preload in `<head>`
    pub preload_files: Vec<String>,

    pub polyfill_registry: RegistryConfig,
}

impl LoaderConfig {
    /// Create a config for the given entries with default settings
    pub fn new(entries: AppEntries) -> Self {
        Self {
            entries: Some(entries),
            ..Self::default()
        }
    }

    /// Parse configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, picking the format by extension
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(error::config::not_found(path.display().to_string()));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| error::config::read_failed(path.display().to_string(), e.to_string()))?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let parsed = if is_json {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        };

        // Attach the real path to parse errors
        parsed.map_err(|err| match err {
            error::LoaderError::ConfigParseFailed { reason, .. } => {
                error::config::parse_failed(path.display().to_string(), reason)
            }
            other => other,
        })
    }

    /// Validate the parts of the configuration that serde cannot express
    ///
    /// Missing entries are not checked here: `transform_index_html` fills
    /// the entry files from the document, so only injection requires them.
    pub fn validate(&self) -> Result<()> {
        if self.preload_files.iter().any(|file| file.trim().is_empty()) {
            return Err(error::config::invalid("preloadFiles must not contain empty paths"));
        }

        for group in [&self.entries, &self.legacy_entries].into_iter().flatten() {
            if group.files.iter().any(|file| file.trim().is_empty()) {
                return Err(error::config::invalid(format!(
                    "{} entries must not contain empty paths",
                    group.format
                )));
            }
        }

        Ok(())
    }

    /// Entry formats of the modern and legacy groups
    pub fn entry_formats(&self) -> impl Iterator<Item = EntryFormat> + '_ {
        [&self.entries, &self.legacy_entries]
            .into_iter()
            .flatten()
            .map(|group| group.format)
    }
}
