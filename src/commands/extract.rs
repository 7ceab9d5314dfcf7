//! Extract command implementation

use std::fs;

use console::Style;

use crate::cli::ExtractArgs;
use polyfills_loader::error::{self, Result};
use polyfills_loader::extract::{ExtractOptions, ExtractedScripts, extract_scripts};
use polyfills_loader::html::Document;

/// Run extract command
pub fn run(args: ExtractArgs) -> Result<()> {
    let html = fs::read_to_string(&args.html)
        .map_err(|e| error::fs::read_failed(args.html.display().to_string(), e.to_string()))?;

    let scripts = extract(&html);
    if args.json {
        let json = serde_json::to_string_pretty(&scripts)
            .map_err(|e| error::fs::io_error(e.to_string()))?;
        println!("{json}");
    } else {
        print_scripts(&scripts);
    }
    Ok(())
}

/// Collect the scripts without touching the document
fn extract(html: &str) -> ExtractedScripts {
    let mut doc = Document::parse(html);
    extract_scripts(
        &mut doc,
        ExtractOptions {
            remove_js_modules: false,
            remove_js_scripts: false,
            remove_import_maps: false,
        },
    )
}

fn print_scripts(scripts: &ExtractedScripts) {
    print_list("Modules", &scripts.js_modules);
    print_list("Inline modules", &scripts.inline_js_modules);
    print_list("Scripts", &scripts.js_scripts);
    print_list("Inline scripts", &scripts.inline_js_scripts);
    print_list("Import maps", &scripts.import_maps);
    print_list("Inline import maps", &scripts.inline_import_maps);
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!(
            "{} {}",
            Style::new().bold().apply_to(format!("{label}:")),
            Style::new().dim().apply_to("None")
        );
        return;
    }

    println!("{}", Style::new().bold().apply_to(format!("{label}:")));
    for item in items {
        println!("  - {}", Style::new().cyan().apply_to(item.trim()));
    }
}
