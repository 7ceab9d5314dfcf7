//! Version command implementation

use polyfills_loader::error::Result;
use polyfills_loader::hash::HASH_LENGTH;

/// Run version command
pub fn run() -> Result<()> {
    println!("polyfills-loader {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Build info:");
    println!("  Rust version: {}", rustc_version());
    println!("  Profile: {}", build_profile());
    println!("  Content hash: blake3, {HASH_LENGTH} hex characters");

    Ok(())
}

fn rustc_version() -> &'static str {
    // Minimum supported rustc
    env!("CARGO_PKG_RUST_VERSION")
}

fn build_profile() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}
