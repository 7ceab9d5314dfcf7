use clap::Parser;
use std::path::PathBuf;

/// Arguments for the inject command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Inject using polyfills-loader.yaml next to the HTML:\n    polyfills-loader inject index.html\n\n\
                   Inject with an explicit config and output directory:\n    polyfills-loader inject index.html -c loader.json -o build\n\n\
                   Use the configured entries instead of the module scripts of the HTML:\n    polyfills-loader inject index.html --skip-extract")]
pub struct InjectArgs {
    /// The index.html to transform
    pub html: PathBuf,

    /// Config file, YAML or JSON (defaults to polyfills-loader.yaml next to the HTML)
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output directory (defaults to dist next to the HTML)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Disable script and HTML minification
    #[arg(long)]
    pub no_minify: bool,

    /// Keep the module scripts of the HTML and load the configured entries
    #[arg(long)]
    pub skip_extract: bool,
}
