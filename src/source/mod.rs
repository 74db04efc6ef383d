//! Source fetching
//!
//! A source URL that is not a local directory is fetched by a [`SourceFetcher`].
//! The stock [`DefaultFetcher`] picks a transport from the URL's shape:
//! - Git repositories: `git::<url>`, `git@host:owner/repo.git`, `ssh://...`,
//!   anything ending in `.git`, and `https://` URLs on well-known git hosts.
//!   `?ref=<branch|tag|sha>` selects what to check out.
//! - Archives: `http(s)://` URLs ending in `.tar.gz`, `.tgz`, `.tar` or `.zip`
//!
//! ## Module Organization
//!
//! - `git.rs`: GitSource parsing and cloning
//! - `archive.rs`: ArchiveSource download and extraction

pub mod archive;
pub mod git;

use std::path::Path;

use tracing::debug;

pub use archive::ArchiveSource;
pub use git::GitSource;

use crate::error::{Result, fetch};

/// Fetches a remote source into a local directory
pub trait SourceFetcher {
    /// Materialize `url` into `dest`, which does not exist yet
    fn fetch(&self, url: &str, dest: &Path) -> Result<()>;
}

/// A remote source classified by transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteSource {
    Git(GitSource),
    Archive(ArchiveSource),
}

impl RemoteSource {
    /// Classify a source URL
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();

        if let Some(archive) = ArchiveSource::parse(url) {
            return Ok(Self::Archive(archive));
        }
        if let Some(git) = GitSource::parse(url) {
            return Ok(Self::Git(git));
        }
        Err(fetch::unsupported_url(url))
    }
}

/// Fetcher supporting git repositories and HTTP archives
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultFetcher;

impl SourceFetcher for DefaultFetcher {
    fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
        let source = RemoteSource::parse(url)?;
        debug!(?source, dest = %dest.display(), "fetching source");

        match source {
            RemoteSource::Git(git) => git.fetch(dest),
            RemoteSource::Archive(archive) => archive.fetch(dest),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_archive_urls() {
        for url in [
            "https://example.com/prompts.tar.gz",
            "https://example.com/prompts.tgz",
            "http://example.com/prompts.tar",
            "https://example.com/prompts.zip",
        ] {
            assert!(
                matches!(RemoteSource::parse(url), Ok(RemoteSource::Archive(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn test_parse_git_urls() {
        for url in [
            "https://github.com/hubblew/prompts",
            "github.com/hubblew/prompts",
            "git@github.com:hubblew/prompts.git",
            "ssh://git@example.com/prompts.git",
            "https://example.com/prompts.git",
            "git::https://example.com/prompts",
        ] {
            assert!(
                matches!(RemoteSource::parse(url), Ok(RemoteSource::Git(_))),
                "{url}"
            );
        }
    }

    #[test]
    fn test_forced_git_wins_over_archive_extension() {
        let source = RemoteSource::parse("git::https://example.com/prompts.zip").unwrap();
        assert!(matches!(source, RemoteSource::Git(_)));
    }

    #[test]
    fn test_parse_unsupported() {
        for url in ["https://example.com/page", "ftp://example.com/x", "nonexistent/dir"] {
            let err = RemoteSource::parse(url).unwrap_err();
            assert!(err.to_string().contains("Unsupported source URL"), "{url}");
        }
    }

    #[test]
    fn test_default_fetcher_rejects_unsupported() {
        let temp = tempfile::TempDir::new().unwrap();
        let err = DefaultFetcher
            .fetch("not-a-source", &temp.path().join("dest"))
            .unwrap_err();
        assert!(err.to_string().contains("not-a-source"));
    }
}
