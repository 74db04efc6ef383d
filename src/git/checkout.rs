//! Checking out a branch, tag or commit in a cloned repository

use git2::{Object, Oid, Repository, build::CheckoutBuilder};
use tracing::debug;

use crate::error::{Result, fetch};

/// Resolve `git_ref` and check it out as a detached HEAD.
///
/// Branch names are looked up locally first, then as `origin/<branch>`, since
/// a fresh clone only has a local branch for the remote's default HEAD.
pub fn checkout_ref(repo: &Repository, git_ref: &str) -> Result<()> {
    let object = resolve(repo, git_ref)
        .ok_or_else(|| fetch::checkout_failed(git_ref, "no branch, tag or commit by that name"))?;

    let commit = object
        .peel_to_commit()
        .map_err(|e| fetch::checkout_failed(git_ref, e.message()))?;
    debug!(git_ref, commit = %commit.id(), "checking out");

    repo.set_head_detached(commit.id())
        .map_err(|e| fetch::checkout_failed(git_ref, e.message()))?;

    let mut builder = CheckoutBuilder::new();
    builder.force();
    repo.checkout_head(Some(&mut builder))
        .map_err(|e| fetch::checkout_failed(git_ref, e.message()))
}

fn resolve<'r>(repo: &'r Repository, git_ref: &str) -> Option<Object<'r>> {
    let candidates = [
        format!("refs/heads/{git_ref}"),
        format!("refs/tags/{git_ref}"),
        format!("refs/remotes/origin/{git_ref}"),
        git_ref.to_string(),
    ];

    candidates
        .iter()
        .find_map(|name| repo.find_reference(name).ok())
        .and_then(|reference| reference.peel(git2::ObjectType::Any).ok())
        .or_else(|| {
            Oid::from_str(git_ref)
                .ok()
                .and_then(|oid| repo.find_object(oid, None).ok())
        })
        .or_else(|| repo.revparse_single(git_ref).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn commit_file(repo: &Repository, name: &str, content: &str, message: &str) -> Oid {
        let workdir = repo.workdir().unwrap();
        fs::write(workdir.join(name), content).unwrap();

        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();

        let parents = match repo.head() {
            Ok(head) => vec![head.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parents: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_checkout_tag_and_commit() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let first = commit_file(&repo, "a.md", "one", "first");
        let obj = repo.find_object(first, None).unwrap();
        repo.tag_lightweight("v1", &obj, false).unwrap();
        commit_file(&repo, "a.md", "two", "second");

        checkout_ref(&repo, "v1").unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), "one");

        checkout_ref(&repo, "HEAD").unwrap();
        assert_eq!(fs::read_to_string(temp.path().join("a.md")).unwrap(), "one");

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.id(), first);
    }

    #[test]
    fn test_checkout_unknown_ref_fails() {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        commit_file(&repo, "a.md", "one", "first");

        let err = checkout_ref(&repo, "no-such-branch").unwrap_err();
        assert!(err.to_string().contains("no-such-branch"));
    }
}
