//! Command implementations for the polyfills-loader CLI

pub mod completions;
pub mod extract;
pub mod inject;
pub mod version;
