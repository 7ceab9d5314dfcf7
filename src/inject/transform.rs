//! Document-level entry point

use tracing::warn;

use crate::config::{AppEntries, EntryFormat, LoaderConfig};
use crate::error::Result;
use crate::extract::{ExtractOptions, extract_scripts};
use crate::html::Document;

use super::{InjectResult, LoaderContext, inject_polyfilled_import_maps, inject_polyfills_loader};

/// Inject a polyfills loader for the module scripts of an index.html
///
/// The module scripts of the document become the entries: they are removed
/// and loaded by the injected loader instead. Classic scripts and import maps
/// stay in place, import maps gain the variants the entry formats need.
pub fn transform_index_html(
    html: &str,
    config: &LoaderConfig,
    ctx: &LoaderContext,
) -> Result<InjectResult> {
    let mut doc = Document::parse(html);

    let extracted = extract_scripts(
        &mut doc,
        ExtractOptions {
            remove_js_modules: true,
            remove_js_scripts: false,
            remove_import_maps: false,
        },
    );
    if !extracted.inline_js_modules.is_empty() {
        warn!(
            count = extracted.inline_js_modules.len(),
            "Inline module scripts are not supported by the polyfills loader and were removed"
        );
    }

    let mut config = config.clone();
    let format = config
        .entries
        .as_ref()
        .map_or(EntryFormat::Module, |entries| entries.format);
    config.entries = Some(AppEntries {
        format,
        files: extracted.js_modules,
    });

    inject_polyfilled_import_maps(&mut doc, &config);
    inject_polyfills_loader(doc, &config, ctx)
}
