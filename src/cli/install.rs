use clap::Parser;
use std::path::PathBuf;

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                   Install from the current directory:\n    pim install\n\n\
                   Install another project:\n    pim install ./path/to/project\n\n\
                   Use a specific config file:\n    pim install --config ci/pim.yaml\n\n\
                   Replace existing files without asking:\n    pim install --yes")]
pub struct InstallArgs {
    /// Project directory containing pim.yaml (defaults to the current directory)
    pub directory: Option<PathBuf>,

    /// Config file to use instead of looking for pim.yaml / .pim.yaml
    #[arg(long, short = 'c', value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Overwrite files not generated by pim without asking
    #[arg(long, short = 'y')]
    pub yes: bool,
}
