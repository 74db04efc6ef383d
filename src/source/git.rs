//! Git source handling
//!
//! This module provides the `GitSource` struct, URL classification for git
//! repositories, and fetching by clone + checkout.

use std::path::Path;

use crate::error::Result;

/// Prefix forcing the git transport regardless of URL shape
const FORCE_PREFIX: &str = "git::";

/// Hosts whose plain `https://` URLs are always git repositories
const KNOWN_HOSTS: &[&str] = &["github.com", "gitlab.com", "bitbucket.org"];

/// Git repository source details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitSource {
    /// Repository URL (HTTPS, SSH or file)
    pub url: String,

    /// Git ref (branch, tag, or SHA)
    pub git_ref: Option<String>,
}

impl GitSource {
    /// Parse a git source, returning `None` when the URL is not recognizably git
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let (forced, input) = match input.strip_prefix(FORCE_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (url, git_ref) = split_ref(input);
        if url.is_empty() {
            return None;
        }

        let url = if forced {
            url
        } else {
            Self::classify(&url)?
        };

        Some(Self { url, git_ref })
    }

    fn classify(url: &str) -> Option<String> {
        if url.starts_with("git@") && url.contains(':') {
            return Some(url.to_string());
        }
        if url.starts_with("ssh://") || url.ends_with(".git") {
            return Some(url.to_string());
        }

        let without_scheme = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url);
        let host = without_scheme.split('/').next().unwrap_or_default();
        let has_repo_path = without_scheme.split('/').filter(|s| !s.is_empty()).count() >= 3;

        if KNOWN_HOSTS.contains(&host) && has_repo_path {
            return Some(format!("https://{without_scheme}"));
        }
        None
    }

    /// Clone the repository into `dest` and check out the requested ref
    ///
    /// Without a ref the default branch is cloned shallowly.
    pub fn fetch(&self, dest: &Path) -> Result<()> {
        let repo = crate::git::clone(&self.url, dest, self.git_ref.is_none())?;
        if let Some(git_ref) = &self.git_ref {
            crate::git::checkout_ref(&repo, git_ref)?;
        }
        Ok(())
    }
}

/// Split a `?ref=` query parameter off a URL, keeping any other parameters
fn split_ref(input: &str) -> (String, Option<String>) {
    let Some((base, query)) = input.split_once('?') else {
        return (input.to_string(), None);
    };

    let mut git_ref = None;
    let mut rest = Vec::new();
    for param in query.split('&').filter(|p| !p.is_empty()) {
        match param.strip_prefix("ref=") {
            Some(value) if !value.is_empty() => git_ref = Some(value.to_string()),
            Some(_) => {}
            None => rest.push(param),
        }
    }

    let url = if rest.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", rest.join("&"))
    };
    (url, git_ref)
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_known_host() {
        let source = GitSource::parse("https://github.com/hubblew/prompts").unwrap();
        assert_eq!(source.url, "https://github.com/hubblew/prompts");
        assert_eq!(source.git_ref, None);
    }

    #[test]
    fn test_parse_bare_known_host() {
        let source = GitSource::parse("gitlab.com/group/prompts").unwrap();
        assert_eq!(source.url, "https://gitlab.com/group/prompts");
    }

    #[test]
    fn test_parse_plain_http_known_host() {
        let source = GitSource::parse("http://github.com/hubblew/prompts").unwrap();
        assert_eq!(source.url, "https://github.com/hubblew/prompts");
    }

    #[test]
    fn test_parse_host_without_repo_is_not_git() {
        assert_eq!(GitSource::parse("https://github.com/hubblew"), None);
    }

    #[test]
    fn test_parse_ref_query() {
        let source = GitSource::parse("git@github.com:hubblew/prompts.git?ref=v1.2.0").unwrap();
        assert_eq!(source.url, "git@github.com:hubblew/prompts.git");
        assert_eq!(source.git_ref.as_deref(), Some("v1.2.0"));
    }

    #[test]
    fn test_parse_keeps_other_query_params() {
        let source =
            GitSource::parse("git::https://example.com/repo?depth=1&ref=main").unwrap();
        assert_eq!(source.url, "https://example.com/repo?depth=1");
        assert_eq!(source.git_ref.as_deref(), Some("main"));
    }

    #[test]
    fn test_parse_forced_accepts_anything() {
        let source = GitSource::parse("git::file:///srv/repos/prompts").unwrap();
        assert_eq!(source.url, "file:///srv/repos/prompts");
    }

    #[test]
    fn test_parse_plain_http_page_is_not_git() {
        assert_eq!(GitSource::parse("https://example.com/docs"), None);
    }

    fn init_repo_with_tag(dir: &Path) {
        let repo = Repository::init(dir).unwrap();
        let sig = Signature::now("Test", "test@example.com").unwrap();

        let commit = |content: &str, message: &str| {
            fs::write(dir.join("rules.md"), content).unwrap();
            let mut index = repo.index().unwrap();
            index.add_path(Path::new("rules.md")).unwrap();
            index.write().unwrap();
            let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
            let parents: Vec<git2::Commit> = repo
                .head()
                .ok()
                .map(|h| h.peel_to_commit().unwrap())
                .into_iter()
                .collect();
            let parents: Vec<&git2::Commit> = parents.iter().collect();
            repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
                .unwrap()
        };

        let first = commit("# v1 rules\n", "first");
        let obj = repo.find_object(first, None).unwrap();
        repo.tag_lightweight("v1", &obj, false).unwrap();
        commit("# v2 rules\n", "second");
    }

    #[test]
    fn test_fetch_local_repository_default_branch() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_repo_with_tag(&origin);

        let source = GitSource::parse(&format!("git::file://{}", origin.display())).unwrap();
        let dest = temp.path().join("dest");
        source.fetch(&dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("rules.md")).unwrap(),
            "# v2 rules\n"
        );
    }

    #[test]
    fn test_fetch_local_repository_at_tag() {
        let temp = TempDir::new().unwrap();
        let origin = temp.path().join("origin");
        fs::create_dir(&origin).unwrap();
        init_repo_with_tag(&origin);

        let url = format!("git::file://{}?ref=v1", origin.display());
        let source = GitSource::parse(&url).unwrap();
        let dest = temp.path().join("dest");
        source.fetch(&dest).unwrap();

        assert_eq!(
            fs::read_to_string(dest.join("rules.md")).unwrap(),
            "# v1 rules\n"
        );
    }
}
