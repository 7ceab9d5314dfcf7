//! Polyfill toggles and custom polyfill declarations

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// SystemJS polyfill options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemJsConfig {
    /// Only load SystemJS on browsers without native module support
    #[serde(default)]
    pub nomodule: bool,
}

/// A polyfill supplied by the user
///
/// `name` and `path` are optional here so that a missing value is reported
/// as an invalid polyfill instead of a parse error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPolyfill {
    pub name: Option<String>,

    pub path: Option<PathBuf>,

    /// Expression which should evaluate to true to load the polyfill
    pub test: Option<String>,

    /// Load the polyfill as a module script
    #[serde(default)]
    pub module: bool,

    pub sourcemap_path: Option<PathBuf>,

    /// Never minify this polyfill
    #[serde(default)]
    pub no_minify: bool,
}

/// Which polyfills to load
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PolyfillsConfig {
    pub core_js: bool,
    pub regenerator_runtime: bool,
    pub webcomponents: bool,
    pub fetch: bool,
    pub intersection_observer: bool,
    pub dynamic_import: bool,
    pub system_js: Option<SystemJsConfig>,
    /// Full SystemJS build, including the import maps polyfill
    pub system_js_extended: Option<SystemJsConfig>,
    pub es_module_shims: bool,
    pub custom_polyfills: Vec<CustomPolyfill>,
}

impl PolyfillsConfig {
    /// Whether no polyfill is requested at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
