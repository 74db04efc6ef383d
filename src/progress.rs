//! Progress reporting for installations

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::{Source, Target};

/// Observer of an installation run
///
/// The installer calls these in run order; implementations decide how (and
/// whether) to show them.
pub trait InstallProgress {
    fn fetch_started(&mut self, source: &Source);

    /// `local` is true when the source was used in place without fetching
    fn fetch_finished(&mut self, source: &Source, local: bool);

    fn fetch_failed(&mut self, source: &Source);

    fn target_started(&mut self, target: &Target, output: &Path);

    fn file_added(&mut self, target: &Target, relative: &Path);

    fn target_finished(&mut self, target: &Target, files: usize);

    fn install_finished(&mut self, targets: usize, files: usize);
}

/// Progress display on the terminal
pub struct ConsoleProgress {
    /// Spinner shown while a remote source is fetched
    spinner: Option<ProgressBar>,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self { spinner: None }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl InstallProgress for ConsoleProgress {
    fn fetch_started(&mut self, source: &Source) {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(Self::spinner_style());
        spinner.set_message(format!(
            "Fetching source '{}' from {}...",
            source.name, source.url
        ));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn fetch_finished(&mut self, source: &Source, local: bool) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        let how = if local { "using local directory" } else { "fetched" };
        println!(
            "{} source '{}' ({how} {})",
            style("✓").green(),
            style(&source.name).bold(),
            source.url
        );
    }

    fn fetch_failed(&mut self, _source: &Source) {
        if let Some(spinner) = self.spinner.take() {
            spinner.abandon();
        }
    }

    fn target_started(&mut self, target: &Target, output: &Path) {
        println!(
            "Installing target '{}' to {} ({})...",
            style(&target.name).bold(),
            output.display(),
            target.strategy
        );
    }

    fn file_added(&mut self, _target: &Target, relative: &Path) {
        println!("  {} {}", style("✓").green(), relative.display());
    }

    fn target_finished(&mut self, target: &Target, files: usize) {
        println!(
            "  {} target '{}': {files} file(s)",
            style("Done").dim(),
            target.name
        );
    }

    fn install_finished(&mut self, targets: usize, files: usize) {
        println!(
            "{} ({targets} target(s), {files} file(s))",
            style("Installation complete!").green().bold()
        );
    }
}
