//! Install command implementation
//!
//! The installation process:
//! 1. Resolve the project directory
//! 2. Locate and load the config file
//! 3. Fetch sources and install every target

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cli::InstallArgs;
use crate::config::Config;
use crate::error::{Result, config};
use crate::installer::{AcceptAllPrompter, InstallSummary, Installer, InteractivePrompter, UserPrompter};
use crate::progress::ConsoleProgress;
use crate::source::DefaultFetcher;

/// Run install command
pub fn run(args: InstallArgs) -> Result<InstallSummary> {
    let root = project_dir(args.directory.as_deref())?;
    let config_path = match args.config {
        Some(path) => path,
        None => Config::find(&root)?,
    };
    debug!(root = %root.display(), config = %config_path.display(), "starting install");

    let config = Config::load(&config_path, &root)?;

    let prompter: &dyn UserPrompter = if args.yes {
        &AcceptAllPrompter
    } else {
        &InteractivePrompter
    };

    let mut progress = ConsoleProgress::new();
    Installer::new(&config, &root, &DefaultFetcher, prompter).install(&mut progress)
}

/// Canonical project directory; the current directory when none is given
fn project_dir(directory: Option<&Path>) -> Result<PathBuf> {
    let directory = directory.unwrap_or_else(|| Path::new("."));
    dunce::canonicalize(directory).map_err(|e| {
        config::not_found(format!("project directory {} ({e})", directory.display()))
    })
}
