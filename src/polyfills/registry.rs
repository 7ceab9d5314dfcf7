//! Polyfill registry for the named polyfill toggles
//!
//! Maps every named polyfill to the file its payload is read from. By default
//! payloads come from the npm package layout under a `node_modules` root;
//! individual polyfills can be pointed elsewhere with overrides. The dynamic
//! import polyfill ships with this crate and needs no package.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::RegistryConfig;

/// Payload of the dynamic import polyfill bundled with the crate
pub const DYNAMIC_IMPORT_POLYFILL: &str = include_str!("../../resources/dynamic-import-polyfill.js");

/// A polyfill that can be enabled with a named toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum KnownPolyfill {
    #[serde(rename = "core-js")]
    CoreJs,
    #[serde(rename = "regenerator-runtime")]
    RegeneratorRuntime,
    #[serde(rename = "systemjs")]
    SystemJs,
    #[serde(rename = "systemjs-extended")]
    SystemJsExtended,
    #[serde(rename = "dynamic-import")]
    DynamicImport,
    #[serde(rename = "es-module-shims")]
    EsModuleShims,
    #[serde(rename = "fetch")]
    Fetch,
    #[serde(rename = "intersection-observer")]
    IntersectionObserver,
    #[serde(rename = "webcomponents")]
    Webcomponents,
    #[serde(rename = "custom-elements-es5-adapter")]
    CustomElementsEs5Adapter,
}

/// Where a polyfill lives inside its npm package
struct PackageLayout {
    package: &'static str,
    file: &'static str,
    sourcemap: Option<&'static str>,
}

impl KnownPolyfill {
    pub const ALL: [KnownPolyfill; 10] = [
        Self::CoreJs,
        Self::RegeneratorRuntime,
        Self::SystemJs,
        Self::SystemJsExtended,
        Self::DynamicImport,
        Self::EsModuleShims,
        Self::Fetch,
        Self::IntersectionObserver,
        Self::Webcomponents,
        Self::CustomElementsEs5Adapter,
    ];

    /// Name the resolved polyfill is emitted under
    pub fn polyfill_name(self) -> &'static str {
        match self {
            Self::CoreJs => "core-js",
            Self::RegeneratorRuntime => "regenerator-runtime",
            // Both SystemJS builds are emitted as `systemjs`
            Self::SystemJs | Self::SystemJsExtended => "systemjs",
            Self::DynamicImport => "dynamic-import",
            Self::EsModuleShims => "es-module-shims",
            Self::Fetch => "fetch",
            Self::IntersectionObserver => "intersection-observer",
            Self::Webcomponents => "webcomponents",
            Self::CustomElementsEs5Adapter => "custom-elements-es5-adapter",
        }
    }

    fn layout(self) -> Option<PackageLayout> {
        let layout = match self {
            Self::CoreJs => PackageLayout {
                package: "core-js-bundle",
                file: "minified.js",
                sourcemap: Some("minified.js.map"),
            },
            Self::RegeneratorRuntime => PackageLayout {
                package: "regenerator-runtime",
                file: "runtime.js",
                sourcemap: None,
            },
            Self::SystemJs => PackageLayout {
                package: "systemjs",
                file: "dist/s.min.js",
                sourcemap: Some("dist/s.min.js.map"),
            },
            Self::SystemJsExtended => PackageLayout {
                package: "systemjs",
                file: "dist/system.min.js",
                sourcemap: Some("dist/system.min.js.map"),
            },
            Self::DynamicImport => return None,
            Self::EsModuleShims => PackageLayout {
                package: "es-module-shims",
                file: "dist/es-module-shims.min.js",
                sourcemap: Some("dist/es-module-shims.min.js.map"),
            },
            Self::Fetch => PackageLayout {
                package: "whatwg-fetch",
                file: "dist/fetch.umd.js",
                sourcemap: None,
            },
            Self::IntersectionObserver => PackageLayout {
                package: "intersection-observer",
                file: "intersection-observer.js",
                sourcemap: None,
            },
            Self::Webcomponents => PackageLayout {
                package: "@webcomponents/webcomponentsjs",
                file: "webcomponents-bundle.js",
                sourcemap: Some("webcomponents-bundle.js.map"),
            },
            Self::CustomElementsEs5Adapter => PackageLayout {
                package: "@webcomponents/webcomponentsjs",
                file: "custom-elements-es5-adapter.js",
                sourcemap: None,
            },
        };
        Some(layout)
    }
}

impl fmt::Display for KnownPolyfill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.polyfill_name())
    }
}

/// File location of a polyfill payload and its optional source map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolyfillLocation {
    pub path: PathBuf,
    #[serde(default)]
    pub sourcemap_path: Option<PathBuf>,
}

impl PolyfillLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            sourcemap_path: None,
        }
    }

    #[must_use]
    pub fn with_sourcemap(mut self, sourcemap_path: impl Into<PathBuf>) -> Self {
        self.sourcemap_path = Some(sourcemap_path.into());
        self
    }
}

/// Where a polyfill payload is read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyfillSource {
    File(PolyfillLocation),
    Bundled(&'static str),
}

/// Registry of named polyfill payloads
#[derive(Debug, Clone)]
pub struct PolyfillRegistry {
    node_modules: PathBuf,
    overrides: BTreeMap<KnownPolyfill, PolyfillLocation>,
}

impl PolyfillRegistry {
    /// Create a registry reading packages from the given `node_modules` root
    pub fn new(node_modules: impl Into<PathBuf>) -> Self {
        Self {
            node_modules: node_modules.into(),
            overrides: BTreeMap::new(),
        }
    }

    /// Create a registry from configuration, resolving relative paths
    /// against `base_dir`
    pub fn from_config(config: &RegistryConfig, base_dir: &Path) -> Self {
        let overrides = config
            .overrides
            .iter()
            .map(|(kind, location)| {
                let location = PolyfillLocation {
                    path: base_dir.join(&location.path),
                    sourcemap_path: location.sourcemap_path.as_ref().map(|p| base_dir.join(p)),
                };
                (*kind, location)
            })
            .collect();

        Self {
            node_modules: base_dir.join(&config.node_modules),
            overrides,
        }
    }

    /// Point a polyfill to a different location
    #[must_use]
    pub fn with_override(mut self, kind: KnownPolyfill, location: PolyfillLocation) -> Self {
        self.overrides.insert(kind, location);
        self
    }

    pub fn node_modules(&self) -> &Path {
        &self.node_modules
    }

    /// Look up where the payload of a polyfill is read from
    pub fn source(&self, kind: KnownPolyfill) -> PolyfillSource {
        if let Some(location) = self.overrides.get(&kind) {
            return PolyfillSource::File(location.clone());
        }

        match kind.layout() {
            Some(layout) => {
                let package_dir = self.node_modules.join(layout.package);
                PolyfillSource::File(PolyfillLocation {
                    path: package_dir.join(layout.file),
                    sourcemap_path: layout.sourcemap.map(|map| package_dir.join(map)),
                })
            }
            None => PolyfillSource::Bundled(DYNAMIC_IMPORT_POLYFILL),
        }
    }

    /// npm package to suggest when the payload of a polyfill is missing
    ///
    /// Overridden polyfills get no suggestion, the user picked the file.
    pub fn package(&self, kind: KnownPolyfill) -> Option<&'static str> {
        if self.overrides.contains_key(&kind) {
            return None;
        }
        kind.layout().map(|layout| layout.package)
    }
}

impl Default for PolyfillRegistry {
    fn default() -> Self {
        Self::new("node_modules")
    }
}
