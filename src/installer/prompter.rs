//! Overwrite confirmation
//!
//! Concat outputs that were not produced by pim are only replaced after the
//! user agrees. The question is asked through [`UserPrompter`] so that
//! non-interactive runs and tests can answer it without a terminal.

use std::path::Path;

use inquire::Confirm;

use crate::error::{PimError, Result};

pub trait UserPrompter {
    /// Ask whether the existing file at `path` may be overwritten
    fn confirm_overwrite(&self, path: &Path) -> Result<bool>;
}

/// Asks on the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct InteractivePrompter;

impl UserPrompter for InteractivePrompter {
    fn confirm_overwrite(&self, path: &Path) -> Result<bool> {
        Confirm::new(&format!(
            "File {} already exists and was not generated by pim. Overwrite?",
            path.display()
        ))
        .with_default(false)
        .with_help_message("Press 'y' to overwrite, Enter or 'n' to keep the file")
        .prompt()
        .map_err(PimError::from)
    }
}

/// Answers yes to everything (`pim install --yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAllPrompter;

impl UserPrompter for AcceptAllPrompter {
    fn confirm_overwrite(&self, _path: &Path) -> Result<bool> {
        Ok(true)
    }
}
