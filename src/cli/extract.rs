use clap::Parser;
use std::path::PathBuf;

/// Arguments for the extract command
#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// The index.html to read
    pub html: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}
