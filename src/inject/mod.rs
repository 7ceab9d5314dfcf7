//! Loader injection into an index.html
//!
//! [`inject_polyfills_loader`] adds the scripts needed to load the
//! application entries: plain script tags when the browser can load them
//! directly, or preload links plus an inline bootstrap script when polyfills,
//! SystemJS or legacy entries are involved.

mod import_maps;
mod transform;

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::{AppEntries, EntryFormat, LoaderConfig};
use crate::error::{self, Result};
use crate::html::{Document, NodeId};
use crate::loader::{bootstrap_script, clean_import_path, needs_loader};
use crate::minify::{DefaultMinifier, HtmlMinifier, ScriptMinifier};
use crate::polyfills::{POLYFILLS_DIR, PolyfillRegistry, PolyfillResolver, ResolvedPolyfill};

pub use import_maps::inject_polyfilled_import_maps;
pub use transform::transform_index_html;

/// Services used while injecting the loader
pub struct LoaderContext {
    registry: PolyfillRegistry,
    base_dir: PathBuf,
    script_minifier: Box<dyn ScriptMinifier>,
    html_minifier: Box<dyn HtmlMinifier>,
}

impl LoaderContext {
    /// Context resolving polyfills from `base_dir/node_modules`, minifying
    /// with [`DefaultMinifier`]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            registry: PolyfillRegistry::new(base_dir.join("node_modules")),
            base_dir,
            script_minifier: Box::new(DefaultMinifier),
            html_minifier: Box::new(DefaultMinifier),
        }
    }

    /// Context using the polyfill registry of a configuration
    pub fn from_config(config: &LoaderConfig, base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        let registry = PolyfillRegistry::from_config(&config.polyfill_registry, &base_dir);
        Self::new(base_dir).with_registry(registry)
    }

    #[must_use]
    pub fn with_registry(mut self, registry: PolyfillRegistry) -> Self {
        self.registry = registry;
        self
    }

    #[must_use]
    pub fn with_script_minifier(mut self, minifier: impl ScriptMinifier + 'static) -> Self {
        self.script_minifier = Box::new(minifier);
        self
    }

    #[must_use]
    pub fn with_html_minifier(mut self, minifier: impl HtmlMinifier + 'static) -> Self {
        self.html_minifier = Box::new(minifier);
        self
    }

    pub fn registry(&self) -> &PolyfillRegistry {
        &self.registry
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn script_minifier(&self) -> &dyn ScriptMinifier {
        self.script_minifier.as_ref()
    }

    fn resolver(&self) -> PolyfillResolver<'_> {
        PolyfillResolver::new(&self.registry, &self.base_dir, self.script_minifier.as_ref())
    }
}

impl fmt::Debug for LoaderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoaderContext")
            .field("registry", &self.registry)
            .field("base_dir", &self.base_dir)
            .finish_non_exhaustive()
    }
}

/// A file to write next to the output HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path relative to the HTML
    pub path: PathBuf,
    pub content: String,
}

/// Injected HTML and the files it references
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectResult {
    pub html: String,
    pub files: Vec<OutputFile>,
}

/// Inject the loader for the configured entries into a document
pub fn inject_polyfills_loader(
    document: impl Into<Document>,
    config: &LoaderConfig,
    ctx: &LoaderContext,
) -> Result<InjectResult> {
    let mut doc = document.into();

    let entries = config
        .entries
        .as_ref()
        .filter(|entries| !entries.is_empty())
        .ok_or_else(error::config::missing_entries)?;
    let legacy = config.legacy_entries.as_ref();

    let head = doc.query(|node| node.is_element_named("head"));
    let body = doc.query(|node| node.is_element_named("body"));
    let (Some(head), Some(body)) = (head, body) else {
        return Err(error::document::missing_head_or_body());
    };

    let minify = config.minify.is_enabled();
    let polyfills = match &config.polyfills {
        Some(polyfills) => ctx.resolver().resolve(polyfills, minify)?,
        None => Vec::new(),
    };

    if needs_loader(entries, legacy, &polyfills) {
        for file in &entries.files {
            append_preload_link(&mut doc, head, file, entries.format);
        }

        let minifier = minify.then(|| ctx.script_minifier());
        let code = bootstrap_script(entries, legacy, &polyfills, minifier)?;
        let script = doc.create_element("script", &[]);
        let text = doc.create_text(code);
        doc.append(script, text);
        doc.append(body, script);
        info!(polyfills = polyfills.len(), "Injected polyfills loader");
    } else {
        append_entry_scripts(&mut doc, body, entries);
        debug!(entries = entries.files.len(), "No loader needed, injected script tags");
    }

    for file in &config.preload_files {
        append_preload_link(&mut doc, head, file, entries.format);
    }

    let mut html = doc.serialize();
    if let Some(options) = config.minify.html_options() {
        html = ctx.html_minifier.minify_html(&html, options)?;
    }

    Ok(InjectResult {
        html,
        files: output_files(&polyfills),
    })
}

fn append_entry_scripts(doc: &mut Document, body: NodeId, entries: &AppEntries) {
    for file in &entries.files {
        let src = clean_import_path(file);
        let script = match entries.format {
            EntryFormat::Module => {
                doc.create_element("script", &[("type", "module"), ("src", src.as_str())])
            }
            EntryFormat::Script | EntryFormat::ModuleShim | EntryFormat::System => {
                doc.create_element("script", &[("src", src.as_str())])
            }
        };
        doc.append(body, script);
    }
}

/// Module preloads need CORS mode to match the module fetch
fn append_preload_link(doc: &mut Document, head: NodeId, href: &str, format: EntryFormat) {
    let link = if format == EntryFormat::Module {
        doc.create_element(
            "link",
            &[
                ("rel", "preload"),
                ("as", "script"),
                ("crossorigin", "anonymous"),
                ("href", href),
            ],
        )
    } else {
        doc.create_element("link", &[("rel", "preload"), ("as", "script"), ("href", href)])
    };
    doc.append(head, link);
}

fn output_files(polyfills: &[ResolvedPolyfill]) -> Vec<OutputFile> {
    let dir = Path::new(POLYFILLS_DIR);
    let mut files = Vec::new();
    for polyfill in polyfills {
        let file_name = polyfill.file_name();
        files.push(OutputFile {
            path: dir.join(&file_name),
            content: polyfill.code.clone(),
        });
        if let Some(sourcemap) = &polyfill.sourcemap {
            files.push(OutputFile {
                path: dir.join(format!("{file_name}.map")),
                content: sourcemap.clone(),
            });
        }
    }
    files
}
