//! Command implementations for pim CLI

pub mod completions;
pub mod install;
pub mod version;
