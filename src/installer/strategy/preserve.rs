use std::path::{Path, PathBuf};

use super::OutputStrategy;
use crate::error::{Result, install};
use crate::installer::file_ops;
use crate::installer::prompter::UserPrompter;

/// Copies files into one directory keeping their path relative to the source root
#[derive(Debug)]
pub struct PreserveStrategy {
    output: PathBuf,
}

impl PreserveStrategy {
    pub fn new(output: PathBuf) -> Self {
        Self { output }
    }
}

impl OutputStrategy for PreserveStrategy {
    fn initialize(&mut self, _prompter: &dyn UserPrompter) -> Result<()> {
        file_ops::reset_dir(&self.output).map_err(|e| install::init_failed(&self.output, e))
    }

    fn add_file(&mut self, source: &Path, relative: &Path) -> Result<()> {
        file_ops::copy_file(source, &self.output.join(relative))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
