//! polyfills-loader - inject a polyfills loader into an index.html
//!
//! Command line front end for the `polyfills_loader` library.

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};
use polyfills_loader::logging::init_cli_logger;

fn main() {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    let result = match cli.command {
        Commands::Inject(args) => commands::inject::run(args),
        Commands::Extract(args) => commands::extract::run(args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        eprintln!("{:?}", miette::Report::new(e));
        std::process::exit(1);
    }
}
