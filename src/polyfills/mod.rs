//! Polyfill resolution
//!
//! Turns the polyfill toggles and custom polyfills of a [`PolyfillsConfig`]
//! into [`ResolvedPolyfill`] records: code read from disk (or bundled),
//! optionally minified, with a content hash for the output file name.

pub mod registry;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::PolyfillsConfig;
use crate::error::{self, Result};
use crate::hash::content_hash;
use crate::minify::ScriptMinifier;

pub use registry::{
    DYNAMIC_IMPORT_POLYFILL, KnownPolyfill, PolyfillLocation, PolyfillRegistry, PolyfillSource,
};

/// Directory polyfill files are emitted to, relative to the HTML
pub const POLYFILLS_DIR: &str = "polyfills";

const NO_MODULE_TEST: &str = "!('noModule' in HTMLScriptElement.prototype)";
const MODULE_TEST: &str = "'noModule' in HTMLScriptElement.prototype";

/// Dynamic import is syntax, so it can only be detected by compiling a
/// function that uses it
const DYNAMIC_IMPORT_TEST: &str = "'noModule' in HTMLScriptElement.prototype && (function () { try { Function('window.importShim = s => import(s);').call(); return true; } catch (_) { return false } })()";

/// A polyfill to load, before its code is read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolyfillDeclaration {
    pub name: Option<String>,
    pub source: Option<PolyfillSource>,
    /// Runtime expression gating the load; always load when absent
    pub test: Option<String>,
    pub module: bool,
    pub no_minify: bool,
    /// npm package suggested when the payload is missing
    pub package: Option<&'static str>,
}

impl PolyfillDeclaration {
    fn known(registry: &PolyfillRegistry, kind: KnownPolyfill, test: Option<&str>) -> Self {
        Self {
            name: Some(kind.polyfill_name().to_string()),
            source: Some(registry.source(kind)),
            test: test.map(str::to_string),
            module: kind == KnownPolyfill::EsModuleShims,
            no_minify: false,
            package: registry.package(kind),
        }
    }
}

/// A polyfill ready to be written and loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolyfill {
    pub name: String,
    pub test: Option<String>,
    pub module: bool,
    pub code: String,
    /// Hash of `code`
    pub hash: String,
    pub sourcemap: Option<String>,
}

impl ResolvedPolyfill {
    /// `<name>.<hash>.js`
    pub fn file_name(&self) -> String {
        format!("{}.{}.js", self.name, self.hash)
    }

    /// Path of the code file relative to the HTML
    pub fn relative_path(&self) -> String {
        format!("{POLYFILLS_DIR}/{}", self.file_name())
    }
}

/// Resolves polyfill configuration against a registry
pub struct PolyfillResolver<'a> {
    registry: &'a PolyfillRegistry,
    base_dir: &'a Path,
    minifier: &'a dyn ScriptMinifier,
}

impl<'a> PolyfillResolver<'a> {
    /// Custom polyfill paths are resolved against `base_dir`
    pub fn new(
        registry: &'a PolyfillRegistry,
        base_dir: &'a Path,
        minifier: &'a dyn ScriptMinifier,
    ) -> Self {
        Self {
            registry,
            base_dir,
            minifier,
        }
    }

    /// List the requested polyfills in load order: custom polyfills first,
    /// then the named toggles
    pub fn declarations(&self, config: &PolyfillsConfig) -> Vec<PolyfillDeclaration> {
        let mut declarations: Vec<PolyfillDeclaration> = config
            .custom_polyfills
            .iter()
            .map(|custom| PolyfillDeclaration {
                name: custom.name.clone(),
                source: custom.path.as_ref().map(|path| {
                    PolyfillSource::File(PolyfillLocation {
                        path: self.base_dir.join(path),
                        sourcemap_path: custom
                            .sourcemap_path
                            .as_ref()
                            .map(|map| self.base_dir.join(map)),
                    })
                }),
                test: custom.test.clone(),
                module: custom.module,
                no_minify: custom.no_minify,
                package: None,
            })
            .collect();

        let mut known = |kind: KnownPolyfill, test: Option<&str>| {
            declarations.push(PolyfillDeclaration::known(self.registry, kind, test));
        };

        if config.core_js {
            known(KnownPolyfill::CoreJs, Some(NO_MODULE_TEST));
        }
        if config.regenerator_runtime {
            known(KnownPolyfill::RegeneratorRuntime, Some(NO_MODULE_TEST));
        }
        if let Some(system_js) = config.system_js {
            known(
                KnownPolyfill::SystemJs,
                system_js.nomodule.then_some(NO_MODULE_TEST),
            );
        }
        if let Some(system_js) = config.system_js_extended {
            known(
                KnownPolyfill::SystemJsExtended,
                system_js.nomodule.then_some(NO_MODULE_TEST),
            );
        }
        if config.dynamic_import {
            known(KnownPolyfill::DynamicImport, Some(DYNAMIC_IMPORT_TEST));
        }
        if config.es_module_shims {
            known(KnownPolyfill::EsModuleShims, Some(MODULE_TEST));
        }
        if config.fetch {
            known(KnownPolyfill::Fetch, Some("!('fetch' in window)"));
        }
        if config.intersection_observer {
            known(
                KnownPolyfill::IntersectionObserver,
                Some(
                    "!('IntersectionObserver' in window && 'IntersectionObserverEntry' in window && 'intersectionRatio' in window.IntersectionObserverEntry.prototype)",
                ),
            );
        }
        if config.webcomponents {
            known(
                KnownPolyfill::Webcomponents,
                Some("!('attachShadow' in Element.prototype) || !('getRootNode' in Element.prototype)"),
            );
            // Browsers with custom elements but without nomodule need the ES5 adapter
            known(
                KnownPolyfill::CustomElementsEs5Adapter,
                Some("!('noModule' in HTMLScriptElement.prototype) && 'getRootNode' in Element.prototype"),
            );
        }

        declarations
    }

    /// Read, optionally minify and hash every requested polyfill
    ///
    /// Polyfills that ship a source map are never minified.
    pub fn resolve(&self, config: &PolyfillsConfig, minify: bool) -> Result<Vec<ResolvedPolyfill>> {
        let declarations = self.declarations(config);

        let mut seen = HashSet::new();
        for name in declarations.iter().filter_map(|d| d.name.as_deref()) {
            if !seen.insert(name) {
                return Err(error::polyfill::duplicate(name.to_string()));
            }
        }

        let mut resolved = Vec::with_capacity(declarations.len());
        for declaration in declarations {
            let polyfill = self.resolve_one(declaration, minify)?;
            debug!(
                name = %polyfill.name,
                hash = %polyfill.hash,
                sourcemap = polyfill.sourcemap.is_some(),
                "Resolved polyfill"
            );
            resolved.push(polyfill);
        }

        Ok(resolved)
    }

    fn resolve_one(&self, declaration: PolyfillDeclaration, minify: bool) -> Result<ResolvedPolyfill> {
        let PolyfillDeclaration {
            name,
            source,
            test,
            module,
            no_minify,
            package,
        } = declaration;

        let name = name
            .filter(|name| !name.is_empty())
            .ok_or_else(|| error::polyfill::invalid("found a polyfill without a name"))?;
        let source =
            source.ok_or_else(|| error::polyfill::invalid(format!("{name} has no path")))?;

        let (code, sourcemap) = match source {
            PolyfillSource::File(location) => {
                let code = read_file(&location.path, package)?;
                let sourcemap = location
                    .sourcemap_path
                    .as_deref()
                    .map(|path| read_file(path, package))
                    .transpose()?;
                (code, sourcemap)
            }
            PolyfillSource::Bundled(code) => (code.to_string(), None),
        };

        let (code, sourcemap) = match sourcemap {
            Some(map) => (code, Some(map)),
            None if minify && !no_minify => {
                let minified = self.minifier.minify_script(&code, &format!("{name}.js"))?;
                (minified.code, minified.map)
            }
            None => (code, None),
        };

        let hash = content_hash(&code);
        Ok(ResolvedPolyfill {
            name,
            test,
            module,
            code,
            hash,
            sourcemap,
        })
    }
}

fn read_file(path: &Path, package: Option<&str>) -> Result<String> {
    if !path.is_file() {
        return Err(error::polyfill::file_not_found(
            path.display().to_string(),
            package,
        ));
    }
    fs::read_to_string(path)
        .map_err(|e| error::fs::read_failed(path.display().to_string(), e.to_string()))
}
