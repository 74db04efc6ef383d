//! Output strategies
//!
//! Every target is assembled by exactly one strategy, driven through the same
//! lifecycle: `initialize`, then any number of `add_file` calls, then `close`.
//!
//! - [`FlattenStrategy`]: copy each file to `output/<basename>`
//! - [`PreserveStrategy`]: copy each file to `output/<relative path>`
//! - [`ConcatStrategy`]: append each file to the single `output` file

mod concat;
mod flatten;
mod preserve;

use std::path::{Path, PathBuf};

use crate::config::StrategyKind;
use crate::error::Result;
use crate::installer::prompter::UserPrompter;

pub use concat::ConcatStrategy;
pub use flatten::FlattenStrategy;
pub use preserve::PreserveStrategy;

pub trait OutputStrategy {
    /// Prepare the output location. May ask `prompter` before replacing a file.
    fn initialize(&mut self, prompter: &dyn UserPrompter) -> Result<()>;

    /// Incorporate one matched file.
    ///
    /// `relative` is the file's path relative to its source root.
    fn add_file(&mut self, source: &Path, relative: &Path) -> Result<()>;

    /// Flush and release anything held open
    fn close(&mut self) -> Result<()>;
}

/// Build the strategy for a target's resolved strategy kind
pub fn create_strategy(kind: StrategyKind, output: PathBuf) -> Box<dyn OutputStrategy> {
    match kind {
        StrategyKind::Flatten => Box::new(FlattenStrategy::new(output)),
        StrategyKind::Preserve => Box::new(PreserveStrategy::new(output)),
        StrategyKind::Concat => Box::new(ConcatStrategy::new(output)),
    }
}
