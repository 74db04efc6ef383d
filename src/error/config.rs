//! Configuration errors

use super::PimError;

/// Creates a config not found error
pub fn not_found(path: impl Into<String>) -> PimError {
    PimError::ConfigNotFound { path: path.into() }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> PimError {
    PimError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates an invalid include error
pub fn invalid_include(include: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::InvalidInclude {
        include: include.into(),
        reason: reason.into(),
    }
}
