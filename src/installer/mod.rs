//! Installation orchestration
//!
//! A run goes through these phases:
//! - resolve every source to a local directory ([`SourceCache`])
//! - for each target in order: expand every include pattern, then create its
//!   strategy, initialize it, feed it the matches and close it
//!
//! The first error aborts the run. Targets finished before it stay on disk;
//! later targets are never started. A pattern without matches fails before
//! its target's output is touched. A strategy that was initialized is always
//! closed, even when adding a file failed.

pub mod file_ops;
pub mod glob;
pub mod marker;
pub mod prompter;
pub mod strategy;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::cache::SourceCache;
use crate::config::{Config, Target};
use crate::error::{Result, config, install};
use crate::progress::InstallProgress;
use crate::source::SourceFetcher;
use glob::FileMatch;

pub use prompter::{AcceptAllPrompter, InteractivePrompter, UserPrompter};
pub use strategy::{OutputStrategy, create_strategy};

/// Totals of a successful run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstallSummary {
    pub targets: usize,
    pub files: usize,
}

/// Drives one installation run over a loaded config
pub struct Installer<'a> {
    config: &'a Config,

    /// Project directory; relative outputs and local sources resolve here
    root: &'a Path,

    fetcher: &'a dyn SourceFetcher,
    prompter: &'a dyn UserPrompter,
}

impl<'a> Installer<'a> {
    pub fn new(
        config: &'a Config,
        root: &'a Path,
        fetcher: &'a dyn SourceFetcher,
        prompter: &'a dyn UserPrompter,
    ) -> Self {
        Self {
            config,
            root,
            fetcher,
            prompter,
        }
    }

    /// Fetch all sources, then install every target in declaration order
    pub fn install(&self, progress: &mut dyn InstallProgress) -> Result<InstallSummary> {
        let cache = SourceCache::build(&self.config.sources, self.root, self.fetcher, progress)?;

        let mut summary = InstallSummary::default();
        for target in &self.config.targets {
            summary.files += self.install_target(target, &cache, progress)?;
            summary.targets += 1;
        }

        progress.install_finished(summary.targets, summary.files);
        Ok(summary)
    }

    fn install_target(
        &self,
        target: &Target,
        cache: &SourceCache,
        progress: &mut dyn InstallProgress,
    ) -> Result<usize> {
        let output = self.resolve_output(&target.output);
        debug!(target = %target.name, output = %output.display(), strategy = %target.strategy, "installing target");
        progress.target_started(target, &output);

        let files = expand_includes(target, cache, &output)?;

        let mut strategy = create_strategy(target.strategy, output);
        strategy.initialize(self.prompter)?;

        let added = add_files(target, &files, strategy.as_mut(), progress);
        let closed = strategy.close();
        let files = added?;
        closed?;

        progress.target_finished(target, files);
        Ok(files)
    }

    fn resolve_output(&self, output: &Path) -> PathBuf {
        if output.is_absolute() {
            output.to_path_buf()
        } else {
            self.root.join(output)
        }
    }
}

/// Expand every include of `target`, in declaration order.
///
/// Files inside `output` are skipped so a target never reads what it is
/// about to write.
fn expand_includes(
    target: &Target,
    cache: &SourceCache,
    output: &Path,
) -> Result<Vec<FileMatch>> {
    let output = dunce::canonicalize(output).ok();
    let mut files = Vec::new();

    for include in &target.includes {
        let source_dir = cache.dir(&include.source).ok_or_else(|| {
            config::invalid(format!(
                "target '{}' references unknown source: {}",
                target.name, include.source
            ))
        })?;

        let mut matches = glob::expand(source_dir, &include.pattern)?;
        if let Some(output) = &output {
            matches.retain(|file| {
                let inside = is_inside(&file.path, output);
                if inside {
                    debug!(
                        file = %file.path.display(),
                        target = %target.name,
                        "skipping file inside the target output"
                    );
                }
                !inside
            });
        }
        if matches.is_empty() {
            return Err(install::glob_no_matches(&include.pattern, &include.source));
        }
        files.extend(matches);
    }

    Ok(files)
}

fn is_inside(path: &Path, output: &Path) -> bool {
    dunce::canonicalize(path).is_ok_and(|path| path.starts_with(output))
}

/// Feed every expanded file to `strategy`, returning the file count
fn add_files(
    target: &Target,
    files: &[FileMatch],
    strategy: &mut dyn OutputStrategy,
    progress: &mut dyn InstallProgress,
) -> Result<usize> {
    for file in files {
        strategy.add_file(&file.path, &file.relative)?;
        progress.file_added(target, &file.relative);
    }
    Ok(files.len())
}
