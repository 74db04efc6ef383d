//! Common test utilities for pim integration tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Marker header written at the top of concatenated outputs
pub const MARKER: &str = "---\ngeneratedBy: github.com/hubblew/pim-cli\n---\n\n";

/// A temporary project directory for integration tests
pub struct TestWorkspace {
    /// Temporary directory
    pub temp: TempDir,
    /// Path to project root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new, empty project
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = dunce::canonicalize(temp.path()).expect("Failed to canonicalize temp dir");
        Self { temp, path }
    }

    /// Write a file in the project
    pub fn write_file(&self, path: &str, content: &str) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Write `pim.yaml`
    pub fn write_config(&self, yaml: &str) {
        self.write_file("pim.yaml", yaml);
    }

    /// Read a file from the project
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in the project
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// Get path to pim binary
    pub fn pim_bin() -> PathBuf {
        PathBuf::from(env!("CARGO_BIN_EXE_pim"))
    }

    /// A pim command running in the project directory with a non-terminal stdin
    pub fn pim(&self) -> Command {
        let mut cmd = Command::new(Self::pim_bin());
        cmd.current_dir(&self.path).env_remove("RUST_LOG").write_stdin("");
        cmd
    }
}

/// Create a git repository at `dir` with one commit per `(path, content)` snapshot
///
/// Each snapshot is tagged `v<n>`, starting at `v1`.
pub fn init_git_repo(dir: &Path, snapshots: &[&[(&str, &str)]]) {
    let repo = git2::Repository::init(dir).expect("Failed to init repository");
    let sig = git2::Signature::now("Test", "test@example.com").expect("Failed to create signature");

    for (n, files) in snapshots.iter().enumerate() {
        let mut index = repo.index().expect("Failed to open index");
        for (path, content) in *files {
            let file_path = dir.join(path);
            std::fs::create_dir_all(file_path.parent().expect("no parent"))
                .expect("Failed to create directory");
            std::fs::write(&file_path, content).expect("Failed to write file");
            index.add_path(Path::new(path)).expect("Failed to stage file");
        }
        index.write().expect("Failed to write index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        let commit = repo
            .commit(Some("HEAD"), &sig, &sig, "snapshot", &tree, &parents)
            .expect("Failed to commit");

        let object = repo.find_object(commit, None).expect("Failed to find commit");
        repo.tag_lightweight(&format!("v{}", n + 1), &object, false)
            .expect("Failed to tag");
    }
}
