//! Turning libgit2 errors into short, user-facing reasons

use git2::{Error, ErrorClass};

/// Interpret a git2 error as a readable reason
pub fn interpret_git_error(err: &Error) -> String {
    let message = err.message().to_lowercase();
    let has = |needles: &[&str]| needles.iter().any(|n| message.contains(n));

    if has(&["not found", "404", "does not exist", "too many redirects"]) {
        "Repository not found".to_string()
    } else if has(&["authentication", "credentials"]) {
        "Authentication failed".to_string()
    } else if has(&["permission denied", "access denied"]) {
        "Permission denied".to_string()
    } else if has(&["connection", "network", "timed out", "timeout"]) {
        "Network error".to_string()
    } else {
        match err.class() {
            ErrorClass::Http => format!("HTTP error: {}", err.message()),
            ErrorClass::Ssh => format!("SSH error: {}", err.message()),
            _ => err.message().to_string(),
        }
    }
}
