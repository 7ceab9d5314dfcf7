//! Bootstrap loader code generation
//!
//! Pure functions that decide whether a document needs a loader script and
//! synthesize it. The generated script starts every polyfill load in
//! parallel and loads the application entries once all of them settled.

use tracing::debug;

use crate::config::{AppEntries, EntryFormat};
use crate::error::Result;
use crate::minify::ScriptMinifier;
use crate::polyfills::ResolvedPolyfill;

/// File name reported to the minifier for the loader script
const LOADER_FILE_NAME: &str = "polyfills-loader.js";

const LOAD_SCRIPT_FUNCTION: &str = r"
  function loadScript(src, module) {
    var loaded = false, thenCb, s = document.createElement('script');
    function resolve() {
      document.head.removeChild(s);
      thenCb ? thenCb() : loaded = true;
    }
    s.src = src; s.onload = resolve; if (module) s.type = 'module';
    s.onerror = function () {
      console.error('[polyfills-loader] failed to load script: ' + src + ' check the network tab for HTTP status.');
      resolve();
    }
    document.head.appendChild(s);
    return { then: function (cb) { loaded ? cb() : thenCb = cb; } };
  }

";

/// Whether the entries can't be loaded with plain script tags
///
/// A loader is needed to load polyfills, to load SystemJS modules and to
/// choose between modern and legacy entries.
pub fn needs_loader(
    entries: &AppEntries,
    legacy: Option<&AppEntries>,
    polyfills: &[ResolvedPolyfill],
) -> bool {
    !polyfills.is_empty()
        || entries.format == EntryFormat::System
        || legacy.is_some_and(|legacy| legacy.format == EntryFormat::System || !legacy.is_empty())
}

/// Make a path importable: bare paths become `./` relative
pub fn clean_import_path(path: &str) -> String {
    if path.starts_with('/') || path.starts_with("./") || path.starts_with("../") {
        path.to_string()
    } else {
        format!("./{path}")
    }
}

/// Quote a value as a single-quoted JavaScript string literal
fn js_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            // keeps `</script>` from closing the inline script
            '/' if quoted.ends_with('<') => quoted.push_str("\\/"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

/// Expression loading `files` in the given format
pub fn entry_load_expression(format: EntryFormat, files: &[String]) -> String {
    let load = match format {
        EntryFormat::Script => "loadScript",
        EntryFormat::Module | EntryFormat::ModuleShim => "window.importShim",
        EntryFormat::System => "System.import",
    };

    match files {
        [file] => format!("{load}({})", js_string(&clean_import_path(file))),
        _ => {
            let list = files
                .iter()
                .map(|file| js_string(&clean_import_path(file)))
                .collect::<Vec<_>>()
                .join(",");
            format!("[{list}].forEach(function (entry) {{ {load}(entry); }})")
        }
    }
}

/// Statement loading the entries, choosing legacy entries on browsers
/// without module support
pub fn entries_load_expression(entries: &AppEntries, legacy: Option<&AppEntries>) -> String {
    let load = entry_load_expression(entries.format, &entries.files);
    match legacy {
        Some(legacy) => {
            let load_legacy = entry_load_expression(legacy.format, &legacy.files);
            format!("'noModule' in HTMLScriptElement.prototype ? {load} : {load_legacy};")
        }
        None => format!("{load};"),
    }
}

fn polyfills_code(polyfills: &[ResolvedPolyfill]) -> String {
    if polyfills.is_empty() {
        return String::new();
    }

    let mut code = String::from("  var polyfills = [];\n");
    for polyfill in polyfills {
        let push = format!(
            "polyfills.push(loadScript({}, {}))",
            js_string(&polyfill.relative_path()),
            polyfill.module
        );
        match &polyfill.test {
            Some(test) => code.push_str(&format!("  if ({test}) {{ {push} }}\n")),
            None => code.push_str(&format!("  {push}\n")),
        }
    }
    code
}

fn entries_code(entries: &AppEntries, legacy: Option<&AppEntries>, has_polyfills: bool) -> String {
    let load = entries_load_expression(entries, legacy);
    if has_polyfills {
        format!(
            "\n  function loadEntries() {{\n    {load}\n  }}\n\n  polyfills.length ? Promise.all(polyfills).then(loadEntries) : loadEntries();\n"
        )
    } else {
        format!("{load}\n")
    }
}

/// Generate the bootstrap script
///
/// The script is minified when a minifier is given; a minifier failure is
/// returned as is.
pub fn bootstrap_script(
    entries: &AppEntries,
    legacy: Option<&AppEntries>,
    polyfills: &[ResolvedPolyfill],
    minifier: Option<&dyn ScriptMinifier>,
) -> Result<String> {
    let needs_load_script = !polyfills.is_empty()
        || entries.format == EntryFormat::Script
        || legacy.is_some_and(|legacy| legacy.format == EntryFormat::Script);

    let mut code = String::from("(function() {\n");
    if needs_load_script {
        code.push_str(LOAD_SCRIPT_FUNCTION);
    }
    code.push_str(&polyfills_code(polyfills));
    code.push_str(&entries_code(entries, legacy, !polyfills.is_empty()));
    code.push_str("})();\n");

    debug!(
        polyfills = polyfills.len(),
        legacy = legacy.is_some(),
        minify = minifier.is_some(),
        "Generated loader script"
    );

    match minifier {
        Some(minifier) => Ok(minifier.minify_script(&code, LOADER_FILE_NAME)?.code),
        None => Ok(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error;
    use crate::minify::{DefaultMinifier, MinifiedScript};

    fn polyfill(name: &str, test: Option<&str>) -> ResolvedPolyfill {
        ResolvedPolyfill {
            name: name.to_string(),
            test: test.map(str::to_string),
            module: false,
            code: String::new(),
            hash: "mockhash".to_string(),
            sourcemap: None,
        }
    }

    struct FailingMinifier;

    impl ScriptMinifier for FailingMinifier {
        fn minify_script(&self, _code: &str, file_name: &str) -> Result<MinifiedScript> {
            Err(error::minify::failed(file_name, "unexpected token"))
        }
    }

    #[test]
    fn test_clean_import_path() {
        assert_eq!(clean_import_path("app.js"), "./app.js");
        assert_eq!(clean_import_path("/app.js"), "/app.js");
        assert_eq!(clean_import_path("./app.js"), "./app.js");
        assert_eq!(clean_import_path("../app.js"), "../app.js");
        assert_eq!(clean_import_path("legacy/app.js"), "./legacy/app.js");
    }

    #[test]
    fn test_js_string_escapes() {
        assert_eq!(js_string("a.js"), "'a.js'");
        assert_eq!(js_string("it's.js"), "'it\\'s.js'");
        assert_eq!(js_string("a\\b"), "'a\\\\b'");
        assert_eq!(js_string("</script>"), "'<\\/script>'");
    }

    #[test]
    fn test_needs_loader() {
        let module = AppEntries::new(EntryFormat::Module, ["app.js"]);
        let system = AppEntries::new(EntryFormat::System, ["app.js"]);
        let empty_legacy = AppEntries::new(EntryFormat::Script, Vec::<String>::new());

        assert!(!needs_loader(&module, None, &[]));
        assert!(!needs_loader(&module, Some(&empty_legacy), &[]));
        assert!(needs_loader(&system, None, &[]));
        assert!(needs_loader(&module, Some(&system), &[]));
        assert!(needs_loader(&module, None, &[polyfill("fetch", None)]));
    }

    #[test]
    fn test_entry_load_expression() {
        let one = vec!["app.js".to_string()];
        let two = vec!["app.js".to_string(), "./shared.js".to_string()];

        assert_eq!(
            entry_load_expression(EntryFormat::Script, &one),
            "loadScript('./app.js')"
        );
        assert_eq!(
            entry_load_expression(EntryFormat::Module, &one),
            "window.importShim('./app.js')"
        );
        assert_eq!(
            entry_load_expression(EntryFormat::ModuleShim, &one),
            "window.importShim('./app.js')"
        );
        assert_eq!(
            entry_load_expression(EntryFormat::System, &two),
            "['./app.js','./shared.js'].forEach(function (entry) { System.import(entry); })"
        );
    }

    #[test]
    fn test_entries_load_expression() {
        let modern = AppEntries::new(EntryFormat::Module, ["app.js"]);
        let legacy = AppEntries::new(EntryFormat::System, ["legacy/app.js"]);

        assert_eq!(
            entries_load_expression(&modern, None),
            "window.importShim('./app.js');"
        );
        assert_eq!(
            entries_load_expression(&modern, Some(&legacy)),
            "'noModule' in HTMLScriptElement.prototype ? window.importShim('./app.js') : System.import('./legacy/app.js');"
        );
    }

    #[test]
    fn test_bootstrap_with_polyfills_and_legacy() {
        let entries = AppEntries::new(EntryFormat::Module, ["app.js", "shared.js"]);
        let legacy = AppEntries::new(EntryFormat::System, ["legacy/app.js", "legacy/shared.js"]);
        let polyfills = [
            polyfill("core-js", Some("!('noModule' in HTMLScriptElement.prototype)")),
            polyfill("fetch", Some("!('fetch' in window)")),
            polyfill("systemjs", None),
        ];

        let code = bootstrap_script(&entries, Some(&legacy), &polyfills, None).unwrap();
        let expected = r"(function() {

  function loadScript(src, module) {
    var loaded = false, thenCb, s = document.createElement('script');
    function resolve() {
      document.head.removeChild(s);
      thenCb ? thenCb() : loaded = true;
    }
    s.src = src; s.onload = resolve; if (module) s.type = 'module';
    s.onerror = function () {
      console.error('[polyfills-loader] failed to load script: ' + src + ' check the network tab for HTTP status.');
      resolve();
    }
    document.head.appendChild(s);
    return { then: function (cb) { loaded ? cb() : thenCb = cb; } };
  }

  var polyfills = [];
  if (!('noModule' in HTMLScriptElement.prototype)) { polyfills.push(loadScript('polyfills/core-js.mockhash.js', false)) }
  if (!('fetch' in window)) { polyfills.push(loadScript('polyfills/fetch.mockhash.js', false)) }
  polyfills.push(loadScript('polyfills/systemjs.mockhash.js', false))

  function loadEntries() {
    'noModule' in HTMLScriptElement.prototype ? ['./app.js','./shared.js'].forEach(function (entry) { window.importShim(entry); }) : ['./legacy/app.js','./legacy/shared.js'].forEach(function (entry) { System.import(entry); });
  }

  polyfills.length ? Promise.all(polyfills).then(loadEntries) : loadEntries();
})();
";
        assert_eq!(code, expected);
    }

    #[test]
    fn test_bootstrap_script_entries_without_polyfills() {
        let entries = AppEntries::new(EntryFormat::Script, ["app.js", "shared.js"]);
        let legacy = AppEntries::new(EntryFormat::Script, ["legacy/app.js", "legacy/shared.js"]);

        let code = bootstrap_script(&entries, Some(&legacy), &[], None).unwrap();
        assert!(code.starts_with("(function() {\n\n  function loadScript(src, module) {"));
        assert!(code.ends_with(
            "  }\n\n'noModule' in HTMLScriptElement.prototype ? ['./app.js','./shared.js'].forEach(function (entry) { loadScript(entry); }) : ['./legacy/app.js','./legacy/shared.js'].forEach(function (entry) { loadScript(entry); });\n})();\n"
        ));
        assert!(!code.contains("var polyfills"));
    }

    #[test]
    fn test_bootstrap_without_load_script_helper() {
        let entries = AppEntries::new(EntryFormat::System, ["app.js"]);
        let code = bootstrap_script(&entries, None, &[], None).unwrap();
        assert_eq!(code, "(function() {\nSystem.import('./app.js');\n})();\n");
    }

    #[test]
    fn test_bootstrap_module_polyfill_flag() {
        let entries = AppEntries::new(EntryFormat::ModuleShim, ["app.js"]);
        let mut shims = polyfill("es-module-shims", Some("'noModule' in HTMLScriptElement.prototype"));
        shims.module = true;

        let code = bootstrap_script(&entries, None, &[shims], None).unwrap();
        assert!(code.contains(
            "if ('noModule' in HTMLScriptElement.prototype) { polyfills.push(loadScript('polyfills/es-module-shims.mockhash.js', true)) }"
        ));
    }

    #[test]
    fn test_bootstrap_minified() {
        let entries = AppEntries::new(EntryFormat::Module, ["app.js"]);
        let polyfills = [polyfill("fetch", Some("!('fetch' in window)"))];

        let plain = bootstrap_script(&entries, None, &polyfills, None).unwrap();
        let minified = bootstrap_script(&entries, None, &polyfills, Some(&DefaultMinifier)).unwrap();
        assert!(minified.len() < plain.len());
        assert!(!minified.contains("\n  "));
        assert!(minified.contains("polyfills/fetch.mockhash.js"));
        assert!(minified.contains("document.createElement"));
    }

    #[test]
    fn test_bootstrap_minify_failure_propagates() {
        let entries = AppEntries::new(EntryFormat::Script, ["app.js"]);
        let err = bootstrap_script(&entries, None, &[], Some(&FailingMinifier)).unwrap_err();
        assert!(matches!(err, error::LoaderError::MinifyFailed { .. }));
        assert!(err.to_string().contains(LOADER_FILE_NAME));
    }
}
