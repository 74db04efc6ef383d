//! Error types and handling for pim
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration loading and validation errors
//! - [`fetch`]: Source fetching errors (git, archives)
//! - [`install`]: Glob expansion and strategy errors

pub mod config;
pub mod fetch;
pub mod install;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pim operations
#[derive(Error, Diagnostic, Debug)]
pub enum PimError {
    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(pim::config::not_found),
        help("Create a pim.yaml (or .pim.yaml) in the project directory, or pass --config")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file '{path}': {reason}")]
    #[diagnostic(code(pim::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file '{path}': {reason}")]
    #[diagnostic(code(pim::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(code(pim::config::invalid))]
    ConfigInvalid { message: String },

    #[error("Invalid include format '{include}': {reason}")]
    #[diagnostic(
        code(pim::config::invalid_include),
        help("Use \"pattern1,pattern2\" or \"@source/pattern1,pattern2\"")
    )]
    InvalidInclude { include: String, reason: String },

    // Fetch errors
    #[error("Failed to fetch source '{source_name}' from {url}: {reason}")]
    #[diagnostic(
        code(pim::fetch::failed),
        help("Check that the source URL is correct and reachable")
    )]
    FetchFailed {
        source_name: String,
        url: String,
        reason: String,
    },

    #[error("Unsupported source URL: {url}")]
    #[diagnostic(
        code(pim::fetch::unsupported_url),
        help(
            "Valid forms: a local directory, a git URL (https://github.com/o/r, git@host:o/r.git, git::<url>), or an http(s) .tar.gz/.tgz/.tar/.zip archive"
        )
    )]
    UnsupportedSourceUrl { url: String },

    #[error("Failed to clone repository {url}: {reason}")]
    #[diagnostic(code(pim::git::clone_failed))]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to check out '{git_ref}': {reason}")]
    #[diagnostic(code(pim::git::checkout_failed))]
    GitCheckoutFailed { git_ref: String, reason: String },

    #[error("Failed to download archive {url}: {reason}")]
    #[diagnostic(code(pim::archive::download_failed))]
    ArchiveDownloadFailed { url: String, reason: String },

    #[error("Failed to extract archive {url}: {reason}")]
    #[diagnostic(code(pim::archive::extract_failed))]
    ArchiveExtractFailed { url: String, reason: String },

    // Install errors
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    #[diagnostic(code(pim::glob::invalid))]
    GlobInvalid { pattern: String, reason: String },

    #[error("Pattern '{pattern}' matched no files in source '{source_name}'")]
    #[diagnostic(
        code(pim::glob::no_matches),
        help("Check the include pattern for typos; empty includes are rejected")
    )]
    GlobNoMatches {
        pattern: String,
        source_name: String,
    },

    #[error("Failed to prepare output '{output}': {reason}")]
    #[diagnostic(code(pim::strategy::init_failed))]
    StrategyInitFailed { output: String, reason: String },

    #[error("User declined to overwrite '{path}'")]
    #[diagnostic(
        code(pim::strategy::overwrite_declined),
        help("Re-run with --yes to overwrite files not generated by pim")
    )]
    OverwriteDeclined { path: String },

    #[error("Failed to copy file '{path}': {reason}")]
    #[diagnostic(code(pim::strategy::copy_failed))]
    CopyFailed { path: String, reason: String },

    #[error("Failed to finalize output '{output}': {reason}")]
    #[diagnostic(code(pim::strategy::close_failed))]
    CloseFailed { output: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pim::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for PimError {
    fn from(err: std::io::Error) -> Self {
        PimError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for PimError {
    fn from(err: serde_yaml::Error) -> Self {
        PimError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<git2::Error> for PimError {
    fn from(err: git2::Error) -> Self {
        PimError::GitCloneFailed {
            url: "unknown".to_string(),
            reason: err.message().to_string(),
        }
    }
}

impl From<inquire::InquireError> for PimError {
    fn from(err: inquire::InquireError) -> Self {
        PimError::IoError {
            message: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PimError>;
