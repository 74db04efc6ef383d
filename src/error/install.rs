//! Installation errors: glob expansion and output strategies

use std::path::Path;

use super::PimError;

pub fn glob_invalid(pattern: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::GlobInvalid {
        pattern: pattern.into(),
        reason: reason.into(),
    }
}

pub fn glob_no_matches(pattern: impl Into<String>, source_name: impl Into<String>) -> PimError {
    PimError::GlobNoMatches {
        pattern: pattern.into(),
        source_name: source_name.into(),
    }
}

pub fn init_failed(output: &Path, reason: impl std::fmt::Display) -> PimError {
    PimError::StrategyInitFailed {
        output: output.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn overwrite_declined(path: &Path) -> PimError {
    PimError::OverwriteDeclined {
        path: path.display().to_string(),
    }
}

pub fn copy_failed(path: &Path, reason: impl std::fmt::Display) -> PimError {
    PimError::CopyFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

pub fn close_failed(output: &Path, reason: impl std::fmt::Display) -> PimError {
    PimError::CloseFailed {
        output: output.display().to_string(),
        reason: reason.to_string(),
    }
}
