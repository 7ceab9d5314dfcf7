//! Import map variants for module loaders

use tracing::debug;

use crate::config::{EntryFormat, LoaderConfig};
use crate::html::Document;

/// Add the import map types read by es-module-shims and SystemJS
///
/// Every `<script type="importmap">` gets a typed clone inserted right
/// before it for each loader in use. The original only stays when native
/// module entries read it.
pub fn inject_polyfilled_import_maps(doc: &mut Document, config: &LoaderConfig) {
    let import_maps = doc.query_all(|node| {
        node.as_element().is_some_and(|element| {
            element.name == "script" && element.attribute("type") == Some("importmap")
        })
    });
    if import_maps.is_empty() {
        return;
    }

    let formats: Vec<EntryFormat> = config.entry_formats().collect();
    let mut variants = Vec::new();
    if formats.contains(&EntryFormat::ModuleShim) {
        variants.push("importmap-shim");
    }
    if formats.contains(&EntryFormat::System) {
        variants.push("systemjs-importmap");
    }

    for import_map in &import_maps {
        let Some(parent) = doc.parent(*import_map) else {
            continue;
        };
        for variant in &variants {
            let clone = doc.clone_node(*import_map);
            doc.set_attribute(clone, "type", variant);
            doc.insert_before(parent, *import_map, clone);
        }
    }

    let keep_original = formats.contains(&EntryFormat::Module);
    if !keep_original {
        for import_map in &import_maps {
            doc.remove(*import_map);
        }
    }

    debug!(
        import_maps = import_maps.len(),
        variants = ?variants,
        keep_original,
        "Injected import map variants"
    );
}
