use std::path::{Path, PathBuf};

use super::OutputStrategy;
use crate::error::{Result, install};
use crate::installer::file_ops;
use crate::installer::prompter::UserPrompter;

/// Copies files into one directory by basename; a later file with the same
/// basename replaces an earlier one.
#[derive(Debug)]
pub struct FlattenStrategy {
    output: PathBuf,
}

impl FlattenStrategy {
    pub fn new(output: PathBuf) -> Self {
        Self { output }
    }
}

impl OutputStrategy for FlattenStrategy {
    fn initialize(&mut self, _prompter: &dyn UserPrompter) -> Result<()> {
        file_ops::reset_dir(&self.output).map_err(|e| install::init_failed(&self.output, e))
    }

    fn add_file(&mut self, source: &Path, relative: &Path) -> Result<()> {
        let name = relative
            .file_name()
            .ok_or_else(|| install::copy_failed(source, "path has no file name"))?;
        file_ops::copy_file(source, &self.output.join(name))
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
