//! Repository cloning

use std::borrow::Cow;
use std::path::Path;

use git2::{FetchOptions, RemoteCallbacks, Repository, build::RepoBuilder};
use tracing::debug;

use super::auth::setup_auth_callbacks;
use super::error::interpret_git_error;
use crate::error::{Result, fetch};

/// Clone `url` into `target`.
///
/// `shallow` requests a depth-1 fetch; it is ignored for local repositories,
/// which libgit2 cannot clone shallowly.
pub fn clone(url: &str, target: &Path, shallow: bool) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);
    if shallow && !is_local(url) {
        fetch_options.depth(1);
    }

    let clone_url = normalize_file_url(&normalize_scp_url(url)).into_owned();
    debug!(url = %clone_url, target = %target.display(), shallow, "cloning repository");

    RepoBuilder::new()
        .fetch_options(fetch_options)
        .clone(&clone_url, target)
        .map_err(|e| fetch::clone_failed(url, interpret_git_error(&e)))
}

fn is_local(url: &str) -> bool {
    url.starts_with("file://") || Path::new(url).is_absolute()
}

/// Rewrite SCP-style `git@host:path` as `ssh://git@host/path`, which libgit2
/// parses more reliably.
fn normalize_scp_url(url: &str) -> Cow<'_, str> {
    if !url.starts_with("git@") {
        return Cow::Borrowed(url);
    }
    match url.split_once(':') {
        Some((host, path)) => {
            let path = path.strip_prefix('/').unwrap_or(path);
            Cow::Owned(format!("ssh://{host}/{path}"))
        }
        None => Cow::Borrowed(url),
    }
}

/// libgit2 wants `file:///abs/path`; accept `file://abs/path` and backslashes too
fn normalize_file_url(url: &str) -> Cow<'_, str> {
    let Some(path) = url.strip_prefix("file://") else {
        return Cow::Borrowed(url);
    };
    if path.starts_with('/') && !path.contains('\\') {
        return Cow::Borrowed(url);
    }
    let path = path.replace('\\', "/");
    Cow::Owned(format!("file:///{}", path.trim_start_matches('/')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_scp_url() {
        assert_eq!(
            normalize_scp_url("git@github.com:user/repo.git"),
            "ssh://git@github.com/user/repo.git"
        );
        assert_eq!(
            normalize_scp_url("git@github.com:/abs/repo.git"),
            "ssh://git@github.com/abs/repo.git"
        );
    }

    #[test]
    fn test_normalize_scp_url_leaves_others() {
        assert_eq!(
            normalize_scp_url("ssh://git@github.com/user/repo.git"),
            "ssh://git@github.com/user/repo.git"
        );
        assert_eq!(
            normalize_scp_url("https://github.com/user/repo.git"),
            "https://github.com/user/repo.git"
        );
    }

    #[test]
    fn test_normalize_file_url() {
        assert_eq!(normalize_file_url("file:///tmp/repo"), "file:///tmp/repo");
        assert_eq!(normalize_file_url("file://tmp/repo"), "file:///tmp/repo");
        assert_eq!(
            normalize_file_url("https://example.com/r.git"),
            "https://example.com/r.git"
        );
    }

    #[test]
    fn test_clone_missing_local_repo_fails() {
        let temp = TempDir::new().unwrap();
        let missing = format!("file://{}", temp.path().join("nope").display());
        let Err(err) = clone(&missing, &temp.path().join("dest"), true) else {
            panic!("clone of a missing repository succeeded");
        };
        assert!(err.to_string().contains("nope"));
    }
}
