use clap::Parser;
use clap_complete::Shell;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    pim completions --shell bash > ~/.bash_completion.d/pim\n\n\
                  Generate zsh completions:\n    pim completions --shell zsh > ~/.zfunc/_pim\n\n\
                  Generate fish completions:\n    pim completions --shell fish > ~/.config/fish/completions/pim.fish")]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(long, short = 's', value_enum, ignore_case = true)]
    pub shell: Shell,
}
