//! CLI definitions using clap derive API
//!
//! Argument types for each command live in their own submodule:
//! - install: Install command arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};

pub mod completions;
pub mod install;

pub use completions::CompletionsArgs;
pub use install::InstallArgs;

/// pim - prompt instruction manager
///
/// Assemble AI prompt and instruction files from local and remote sources.
#[derive(Parser, Debug)]
#[command(
    name = "pim",
    author,
    version,
    color = clap::ColorChoice::Auto,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Prompt instruction manager",
    long_about = "pim reads pim.yaml, fetches the declared sources (local directories, git \
                  repositories, archives) and assembles each target from the files its include \
                  patterns select: flattened, with preserved paths, or concatenated into one file.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  pim install                 \x1b[90m# Install targets from ./pim.yaml\x1b[0m\n   \
                  pim install ../project      \x1b[90m# Install another project's targets\x1b[0m\n   \
                  pim install --yes           \x1b[90m# Overwrite foreign files without asking\x1b[0m\n\n\
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
    /// Install all targets declared in the config file
    Install(InstallArgs),

    /// Show version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
