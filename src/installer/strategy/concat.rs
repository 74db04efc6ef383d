use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::OutputStrategy;
use crate::error::{Result, install};
use crate::installer::prompter::UserPrompter;
use crate::installer::{file_ops, marker};

/// Appends every file into a single output behind the generation marker.
///
/// Each fragment is followed by one newline so fragments never run together.
#[derive(Debug)]
pub struct ConcatStrategy {
    output: PathBuf,
    writer: Option<BufWriter<File>>,
}

impl ConcatStrategy {
    pub fn new(output: PathBuf) -> Self {
        Self {
            output,
            writer: None,
        }
    }

    /// Make sure an existing output may be replaced
    fn check_overwrite(&self, prompter: &dyn UserPrompter) -> Result<()> {
        if !self.output.exists() {
            return Ok(());
        }

        let generated =
            marker::is_generated(&self.output).map_err(|e| install::init_failed(&self.output, e))?;
        if generated {
            debug!(output = %self.output.display(), "replacing previously generated output");
            return Ok(());
        }

        match prompter.confirm_overwrite(&self.output) {
            Ok(true) => Ok(()),
            Ok(false) => Err(install::overwrite_declined(&self.output)),
            Err(e) => {
                warn!(output = %self.output.display(), "overwrite confirmation failed: {e}");
                Err(install::overwrite_declined(&self.output))
            }
        }
    }

    fn create_output(&self) -> io::Result<BufWriter<File>> {
        file_ops::remove_file_if_exists(&self.output)?;
        file_ops::ensure_parent_dir(&self.output)?;
        let mut writer = BufWriter::new(File::create(&self.output)?);
        marker::write_marker(&mut writer)?;
        Ok(writer)
    }
}

impl OutputStrategy for ConcatStrategy {
    fn initialize(&mut self, prompter: &dyn UserPrompter) -> Result<()> {
        self.check_overwrite(prompter)?;
        let writer = self
            .create_output()
            .map_err(|e| install::init_failed(&self.output, e))?;
        self.writer = Some(writer);
        Ok(())
    }

    fn add_file(&mut self, source: &Path, _relative: &Path) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| install::copy_failed(&self.output, "output is not open"))?;

        let mut reader = File::open(source).map_err(|e| install::copy_failed(source, e))?;
        io::copy(&mut reader, writer).map_err(|e| install::copy_failed(source, e))?;
        writer
            .write_all(b"\n")
            .map_err(|e| install::copy_failed(&self.output, e))
    }

    fn close(&mut self) -> Result<()> {
        match self.writer.take() {
            Some(mut writer) => writer
                .flush()
                .map_err(|e| install::close_failed(&self.output, e)),
            None => Ok(()),
        }
    }
}
