//! Source fetching errors

use super::PimError;

/// Wraps a transport error with the name of the source being fetched
pub fn failed(source_name: &str, url: &str, cause: &PimError) -> PimError {
    PimError::FetchFailed {
        source_name: source_name.to_string(),
        url: url.to_string(),
        reason: cause.to_string(),
    }
}

pub fn unsupported_url(url: impl Into<String>) -> PimError {
    PimError::UnsupportedSourceUrl { url: url.into() }
}

pub fn clone_failed(url: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::GitCloneFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

pub fn checkout_failed(git_ref: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::GitCheckoutFailed {
        git_ref: git_ref.into(),
        reason: reason.into(),
    }
}

pub fn download_failed(url: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::ArchiveDownloadFailed {
        url: url.into(),
        reason: reason.into(),
    }
}

pub fn extract_failed(url: impl Into<String>, reason: impl Into<String>) -> PimError {
    PimError::ArchiveExtractFailed {
        url: url.into(),
        reason: reason.into(),
    }
}
