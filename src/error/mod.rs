//! Error types and handling for polyfills-loader
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`document`]: Index HTML errors
//! - [`polyfill`]: Polyfill declaration errors
//! - [`minify`]: Minifier errors
//! - [`fs`]: File system errors

pub mod config;
pub mod document;
pub mod fs;
pub mod minify;
pub mod polyfill;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for polyfills-loader operations
#[derive(Error, Diagnostic, Debug)]
pub enum LoaderError {
    // Configuration errors
    #[error("Invalid config: missing config.entries")]
    #[diagnostic(
        code(polyfills_loader::config::missing_entries),
        help("Configure `entries` with a module type and at least one file")
    )]
    MissingEntries,

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(polyfills_loader::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Configuration file not found: {path}")]
    #[diagnostic(code(polyfills_loader::config::not_found))]
    ConfigNotFound { path: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(polyfills_loader::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Failed to read configuration file: {path}")]
    #[diagnostic(code(polyfills_loader::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    // Document errors
    #[error("Invalid index.html: {message}")]
    #[diagnostic(
        code(polyfills_loader::document::invalid),
        help("The index.html needs both a <head> and a <body> element")
    )]
    InvalidDocument { message: String },

    // Polyfill errors
    #[error("A polyfill should have a name and a path property: {message}")]
    #[diagnostic(code(polyfills_loader::polyfill::invalid))]
    InvalidPolyfill { message: String },

    #[error("Polyfill '{name}' is configured more than once")]
    #[diagnostic(
        code(polyfills_loader::polyfill::duplicate),
        help("Polyfill names are used as output file names and must be unique")
    )]
    DuplicatePolyfill { name: String },

    // Minify errors
    #[error("Failed to minify {target}: {message}")]
    #[diagnostic(code(polyfills_loader::minify::failed))]
    MinifyFailed { target: String, message: String },

    // File system errors
    #[error("Could not find a file at {path}")]
    #[diagnostic(code(polyfills_loader::fs::not_found))]
    FileNotFound {
        path: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to read file: {path}")]
    #[diagnostic(code(polyfills_loader::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(polyfills_loader::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(polyfills_loader::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for LoaderError {
    fn from(err: std::io::Error) -> Self {
        LoaderError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for LoaderError {
    fn from(err: serde_yaml::Error) -> Self {
        LoaderError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for LoaderError {
    fn from(err: serde_json::Error) -> Self {
        LoaderError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, LoaderError>;
