use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    polyfills-loader completions bash > ~/.bash_completion.d/polyfills-loader\n\n\
                  Generate zsh completions:\n    polyfills-loader completions zsh > ~/.zfunc/_polyfills-loader\n\n\
                  Generate fish completions:\n    polyfills-loader completions fish > ~/.config/fish/completions/polyfills-loader.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    #[arg(value_enum, ignore_case = true)]
    pub shell: Shell,
}
