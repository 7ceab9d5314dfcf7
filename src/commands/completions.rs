//! Shell completions command

use clap::CommandFactory;

use crate::cli::CompletionsArgs;
use polyfills_loader::error::Result;

/// Generate shell completions
pub fn run(args: CompletionsArgs) -> Result<()> {
    let mut cmd = <crate::cli::Cli as CommandFactory>::command();
    clap_complete::generate(
        args.shell,
        &mut cmd,
        "polyfills-loader",
        &mut std::io::stdout().lock(),
    );

    Ok(())
}
