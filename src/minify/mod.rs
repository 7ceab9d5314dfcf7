//! Script and HTML minification
//!
//! Minifiers are consumed through the [`ScriptMinifier`] and [`HtmlMinifier`]
//! traits so a build can plug in its own. [`DefaultMinifier`] parses scripts
//! with `minify-js` and prints them back compacted, and minifies HTML on the
//! document tree.

mod html;

use minify_js::{Session, TopLevelMode};

use crate::config::HtmlMinifyOptions;
use crate::error::{self, Result};

/// Output of a script minifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinifiedScript {
    pub code: String,
    /// Version 3 source map JSON, when the minifier produces one
    pub map: Option<String>,
}

/// Minifies JavaScript source
pub trait ScriptMinifier {
    /// Minify `code`; `file_name` identifies the script in errors and maps
    fn minify_script(&self, code: &str, file_name: &str) -> Result<MinifiedScript>;
}

/// Minifies an HTML document
pub trait HtmlMinifier {
    fn minify_html(&self, html: &str, options: &HtmlMinifyOptions) -> Result<String>;
}

/// Script and HTML minifier used unless a build supplies its own
///
/// Scripts are parsed as classic scripts, so top-level bindings keep their
/// names; a syntax error fails with `MinifyFailed`. No source map is
/// produced. HTML loses comments and redundant whitespace in text outside
/// `pre`, `textarea`, `script` and `style`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMinifier;

impl DefaultMinifier {
    pub fn new() -> Self {
        Self
    }
}

impl ScriptMinifier for DefaultMinifier {
    fn minify_script(&self, code: &str, file_name: &str) -> Result<MinifiedScript> {
        let session = Session::new();
        let mut out = Vec::with_capacity(code.len());
        minify_js::minify(&session, TopLevelMode::Global, code.as_bytes(), &mut out)
            .map_err(|err| error::minify::failed(file_name, format!("{err:?}")))?;

        let code = String::from_utf8(out)
            .map_err(|err| error::minify::failed(file_name, err.to_string()))?;
        Ok(MinifiedScript { code, map: None })
    }
}

impl HtmlMinifier for DefaultMinifier {
    fn minify_html(&self, html: &str, options: &HtmlMinifyOptions) -> Result<String> {
        Ok(html::minify(html, options))
    }
}
