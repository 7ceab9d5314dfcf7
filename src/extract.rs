//! Script and import map extraction
//!
//! Collects the `<script>` elements of a document by kind and optionally
//! removes them. Scripts referencing an absolute URI are external resources
//! and are never collected nor removed.

use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::html::{Document, NodeId};

/// MIME types of classic scripts, besides an absent or empty `type`
const JS_SCRIPT_TYPES: [&str; 2] = ["application/javascript", "text/javascript"];

/// Which extracted elements to remove from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    pub remove_js_modules: bool,
    pub remove_js_scripts: bool,
    pub remove_import_maps: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            remove_js_modules: true,
            remove_js_scripts: true,
            remove_import_maps: true,
        }
    }
}

/// Scripts found in a document, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedScripts {
    /// Content of inline module scripts
    pub inline_js_modules: Vec<String>,
    /// `src` of module scripts
    pub js_modules: Vec<String>,
    pub inline_js_scripts: Vec<String>,
    pub js_scripts: Vec<String>,
    pub inline_import_maps: Vec<String>,
    pub import_maps: Vec<String>,
}

#[derive(Clone, Copy)]
enum ScriptKind {
    Module,
    Script,
    ImportMap,
}

fn classify(script_type: Option<&str>) -> Option<ScriptKind> {
    match script_type.map(str::trim) {
        None | Some("") => Some(ScriptKind::Script),
        Some(t) if JS_SCRIPT_TYPES.iter().any(|js| t.eq_ignore_ascii_case(js)) => {
            Some(ScriptKind::Script)
        }
        Some(t) if t.eq_ignore_ascii_case("module") => Some(ScriptKind::Module),
        Some(t) if t.eq_ignore_ascii_case("importmap") => Some(ScriptKind::ImportMap),
        Some(_) => None,
    }
}

/// Whether `src` has a URI scheme, such as `https://cdn.com/lib.js`
pub fn is_absolute_uri(src: &str) -> bool {
    Url::parse(src).is_ok()
}

/// Collect the scripts of a document, removing them as configured
pub fn extract_scripts(doc: &mut Document, options: ExtractOptions) -> ExtractedScripts {
    let mut result = ExtractedScripts::default();
    let scripts = doc.elements_by_tag_name("script");

    for script in scripts {
        let Some(kind) = classify(doc.attribute(script, "type")) else {
            continue;
        };
        let (inline, external, remove) = match kind {
            ScriptKind::Module => (
                &mut result.inline_js_modules,
                &mut result.js_modules,
                options.remove_js_modules,
            ),
            ScriptKind::Script => (
                &mut result.inline_js_scripts,
                &mut result.js_scripts,
                options.remove_js_scripts,
            ),
            ScriptKind::ImportMap => (
                &mut result.inline_import_maps,
                &mut result.import_maps,
                options.remove_import_maps,
            ),
        };

        if !collect(doc, script, inline, external) {
            continue;
        }
        if remove {
            doc.remove(script);
        }
    }

    debug!(
        js_modules = result.js_modules.len(),
        js_scripts = result.js_scripts.len(),
        import_maps = result.import_maps.len(),
        "Extracted scripts"
    );
    result
}

/// Returns false for scripts that must be left alone
fn collect(
    doc: &Document,
    script: NodeId,
    inline: &mut Vec<String>,
    external: &mut Vec<String>,
) -> bool {
    match doc.attribute(script, "src") {
        Some(src) if is_absolute_uri(src) => return false,
        Some(src) if !src.is_empty() => external.push(src.to_string()),
        _ => {
            if let Some(text) = doc.text_content(script) {
                inline.push(text.to_string());
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    const HTML: &str = r#"
  <html>
    <head>
      <script type="module" src="module-a.js"></script>
      <script src="script-a.js"></script>
      <script type="importmap">{ "imports": {} }</script>
      <script type="importmap" src="./importmap.json"></script>
    </head>
    <body>
      <script type="module" src="module-b.js"></script>
      <script src="script-b.js"></script>
      <script type="module">console.log('hello module');</script>
      <script>console.log('hello script');</script>
      <script type="module" src="module-c.js"></script>
      <script src="script-c.js"></script>
    </body>
  </html>
"#;

    #[test]
    fn test_returns_scripts_found() {
        let mut doc = Document::parse(HTML);
        let result = extract_scripts(&mut doc, ExtractOptions::default());
        assert_eq!(result.js_modules, ["module-a.js", "module-b.js", "module-c.js"]);
        assert_eq!(result.inline_js_modules, ["console.log('hello module');"]);
        assert_eq!(result.js_scripts, ["script-a.js", "script-b.js", "script-c.js"]);
        assert_eq!(result.inline_js_scripts, ["console.log('hello script');"]);
        assert_eq!(result.import_maps, ["./importmap.json"]);
        assert_eq!(result.inline_import_maps, [r#"{ "imports": {} }"#]);
    }

    #[test]
    fn test_removes_scripts() {
        let mut doc = Document::parse(HTML);
        extract_scripts(&mut doc, ExtractOptions::default());
        assert!(doc.elements_by_tag_name("script").is_empty());
    }

    #[test]
    fn test_keeps_scripts_when_configured() {
        let mut doc = Document::parse(HTML);
        let options = ExtractOptions {
            remove_js_modules: false,
            remove_js_scripts: false,
            remove_import_maps: false,
        };
        extract_scripts(&mut doc, options);
        assert_eq!(doc.elements_by_tag_name("script").len(), 10);
        assert_eq!(doc.serialize(), HTML);
    }

    #[test]
    fn test_removes_only_selected_kinds() {
        let mut doc = Document::parse(HTML);
        let options = ExtractOptions {
            remove_js_modules: true,
            remove_js_scripts: false,
            remove_import_maps: false,
        };
        let result = extract_scripts(&mut doc, options);
        assert_eq!(result.js_modules.len(), 3);
        assert_eq!(doc.elements_by_tag_name("script").len(), 6);
        assert!(doc.query(|node| node.as_element().is_some_and(|el| el.attribute("type") == Some("module"))).is_none());
    }

    #[test]
    fn test_leaves_external_resources_alone() {
        let mut doc = Document::parse(
            r#"
      <html>
        <body>
          <script type="module" src="./module.js"></script>
          <script type="module" src="https://cdn.com/my-module.js"></script>

          <script type="importmap" src="./importmap.json"></script>
          <script type="importmap" src="https://cdn.com/my-module.js"></script>

          <script src="./script.js"></script>
          <script src="https://cdn.com/my-module.js"></script>
        </body>
      </html>
    "#,
        );

        let result = extract_scripts(&mut doc, ExtractOptions::default());
        assert_eq!(result.js_modules, ["./module.js"]);
        assert_eq!(result.js_scripts, ["./script.js"]);
        assert_eq!(result.import_maps, ["./importmap.json"]);

        let remaining = doc.elements_by_tag_name("script");
        assert_eq!(remaining.len(), 3);
        for script in remaining {
            assert_eq!(doc.attribute(script, "src"), Some("https://cdn.com/my-module.js"));
        }
    }

    #[test]
    fn test_classic_mime_types_and_unknown_types() {
        let mut doc = Document::parse(
            r#"<script type="text/javascript" src="a.js"></script><script type="application/javascript">b()</script><script type="text/x-template"><p></p></script><script type="">c()</script>"#,
        );
        let result = extract_scripts(&mut doc, ExtractOptions::default());
        assert_eq!(result.js_scripts, ["a.js"]);
        assert_eq!(result.inline_js_scripts, ["b()", "c()"]);
        assert_eq!(doc.serialize(), r#"<script type="text/x-template"><p></p></script>"#);
    }

    #[test]
    fn test_is_absolute_uri() {
        assert!(is_absolute_uri("https://cdn.com/a.js"));
        assert!(is_absolute_uri("data:text/javascript,void 0"));
        assert!(!is_absolute_uri("./a.js"));
        assert!(!is_absolute_uri("/a.js"));
        assert!(!is_absolute_uri("a.js"));
        assert!(!is_absolute_uri("//cdn.com/a.js"));
    }
}
