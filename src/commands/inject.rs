//! Inject command implementation
//!
//! Reads the index.html and its config, injects the polyfills loader and
//! writes the HTML with the polyfill files to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use console::Style;
use tracing::debug;

use crate::cli::InjectArgs;
use polyfills_loader::config::{CONFIG_FILE, LoaderConfig, MinifySetting};
use polyfills_loader::error::{self, Result};
use polyfills_loader::inject::{
    InjectResult, LoaderContext, inject_polyfills_loader, transform_index_html,
};

/// Default output directory, next to the HTML
const DEFAULT_OUT_DIR: &str = "dist";

/// Run inject command
pub fn run(args: InjectArgs) -> Result<()> {
    let html_path = dunce::canonicalize(&args.html)
        .map_err(|_| error::fs::not_found(args.html.display().to_string()))?;
    let html_dir = html_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();

    let (mut config, base_dir) = load_config(args.config.as_deref(), &html_dir)?;
    if args.no_minify {
        config.minify = MinifySetting::Disabled;
    }

    let html = fs::read_to_string(&html_path)
        .map_err(|e| error::fs::read_failed(html_path.display().to_string(), e.to_string()))?;

    let ctx = LoaderContext::from_config(&config, base_dir);
    let result = if args.skip_extract {
        inject_polyfills_loader(&html, &config, &ctx)?
    } else {
        transform_index_html(&html, &config, &ctx)?
    };

    let out_dir = args.out_dir.unwrap_or_else(|| html_dir.join(DEFAULT_OUT_DIR));
    let file_name = html_path
        .file_name()
        .map_or_else(|| "index.html".into(), ToOwned::to_owned);
    let written = write_output(&out_dir, Path::new(&file_name), &result)?;

    print_summary(&out_dir, &written);
    Ok(())
}

/// Load the config and the directory its relative paths resolve against
///
/// Without an explicit path, `polyfills-loader.yaml` next to the HTML is used
/// when present.
fn load_config(path: Option<&Path>, html_dir: &Path) -> Result<(LoaderConfig, PathBuf)> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = html_dir.join(CONFIG_FILE);
            if !default.is_file() {
                debug!("No {} found, using defaults", CONFIG_FILE);
                return Ok((LoaderConfig::default(), html_dir.to_path_buf()));
            }
            default
        }
    };

    let config = LoaderConfig::from_path(&path)?;
    let config_dir = dunce::canonicalize(&path)
        .ok()
        .and_then(|path| path.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| html_dir.to_path_buf());
    debug!(path = %path.display(), "Loaded config");
    Ok((config, config_dir))
}

/// Write the HTML and polyfill files, returning the written paths
fn write_output(out_dir: &Path, html_name: &Path, result: &InjectResult) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(result.files.len() + 1);

    let html_path = out_dir.join(html_name);
    write_file(&html_path, &result.html)?;
    written.push(html_path);

    for file in &result.files {
        let path = out_dir.join(&file.path);
        write_file(&path, &file.content)?;
        written.push(path);
    }

    Ok(written)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| error::fs::write_failed(parent.display().to_string(), e.to_string()))?;
    }
    fs::write(path, content)
        .map_err(|e| error::fs::write_failed(path.display().to_string(), e.to_string()))
}

fn print_summary(out_dir: &Path, written: &[PathBuf]) {
    println!(
        "{} {}",
        Style::new().bold().green().apply_to("Injected polyfills loader into"),
        out_dir.display()
    );
    for path in written {
        let shown = path.strip_prefix(out_dir).unwrap_or(path);
        println!("  {}", Style::new().cyan().apply_to(shown.display()));
    }
}
