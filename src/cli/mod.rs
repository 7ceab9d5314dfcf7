//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - inject: Inject command arguments
//! - extract: Extract command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod extract;
pub mod inject;

pub use completions::CompletionsArgs;
pub use extract::ExtractArgs;
pub use inject::InjectArgs;

/// Polyfills loader
///
/// Inject a polyfills loader into an index.html for differential serving.
#[derive(Parser, Debug)]
#[command(
    name = "polyfills-loader",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Inject a polyfills loader into an index.html",
    long_about = "Loads the entries of an index.html through a generated bootstrap script \
                  that loads the polyfills a browser needs first, and picks between modern \
                  and legacy entries.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  polyfills-loader inject index.html                 \x1b[90m# Inject into dist/index.html\x1b[0m\n   \
                  polyfills-loader inject index.html -o build        \x1b[90m# Write to build/\x1b[0m\n   \
                  polyfills-loader inject index.html --no-minify     \x1b[90m# Keep output readable\x1b[0m\n   \
                  polyfills-loader extract index.html --json         \x1b[90m# List scripts as JSON\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Inject the polyfills loader into an index.html
    Inject(InjectArgs),

    /// List the scripts and import maps of an index.html
    Extract(ExtractArgs),

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
