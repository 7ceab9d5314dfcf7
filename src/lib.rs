//! Polyfills loader
//!
//! Prepares an index.html for browsers of varying capability. The
//! application entries are loaded with plain script tags when possible, or
//! through a generated bootstrap script that first loads the polyfills a
//! browser needs and then picks between modern and legacy entries.
//!
//! ```no_run
//! use polyfills_loader::config::{AppEntries, EntryFormat, LoaderConfig};
//! use polyfills_loader::inject::{LoaderContext, inject_polyfills_loader};
//!
//! let config = LoaderConfig::new(AppEntries::new(EntryFormat::Module, ["app.js"]));
//! let ctx = LoaderContext::new(".");
//! let result = inject_polyfills_loader("<html><head></head><body></body></html>", &config, &ctx)?;
//! println!("{}", result.html);
//! # Ok::<(), polyfills_loader::error::LoaderError>(())
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod hash;
pub mod html;
pub mod inject;
pub mod loader;
pub mod logging;
pub mod minify;
pub mod polyfills;

pub use config::{AppEntries, EntryFormat, LoaderConfig};
pub use error::{LoaderError, Result};
pub use extract::{ExtractOptions, ExtractedScripts, extract_scripts};
pub use html::Document;
pub use inject::{
    InjectResult, LoaderContext, OutputFile, inject_polyfilled_import_maps,
    inject_polyfills_loader, transform_index_html,
};
