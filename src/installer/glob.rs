//! Include pattern expansion
//!
//! Patterns are matched with wax against `/`-separated paths relative to the
//! source root. Only the pattern's literal leading directory is walked, so
//! `docs/rules/*.md` never visits anything outside `docs/rules`.

use std::path::{Component, Path, PathBuf};

use walkdir::WalkDir;
use wax::{CandidatePath, Glob, Pattern};

use crate::error::{Result, install};

const GLOB_META: &[char] = &['*', '?', '[', ']', '{', '}', '<', '>', '!', '\\'];

/// A file selected by an include pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMatch {
    /// Absolute (or source-rooted) path to read from
    pub path: PathBuf,

    /// Path relative to the source root
    pub relative: PathBuf,
}

/// Expand `pattern` against `source_dir`.
///
/// Matches are regular files sorted lexically by relative path. An empty
/// result is not an error here; the caller decides.
pub fn expand(source_dir: &Path, pattern: &str) -> Result<Vec<FileMatch>> {
    let pattern = pattern.strip_prefix("./").unwrap_or(pattern);
    check_contained(pattern)?;

    let glob = Glob::new(pattern).map_err(|e| install::glob_invalid(pattern, e.to_string()))?;

    let walk_root = source_dir.join(literal_prefix(pattern));
    if !walk_root.exists() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    let walker = WalkDir::new(&walk_root)
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.path().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(source_dir) else {
            continue;
        };
        let candidate = to_forward_slashes(relative);
        if glob.is_match(CandidatePath::from(candidate.as_str())) {
            matches.push((
                candidate,
                FileMatch {
                    path: entry.path().to_path_buf(),
                    relative: relative.to_path_buf(),
                },
            ));
        }
    }

    matches.sort_by(|(a, _), (b, _)| a.cmp(b));
    Ok(matches.into_iter().map(|(_, m)| m).collect())
}

/// Reject patterns that could select files outside the source root
fn check_contained(pattern: &str) -> Result<()> {
    let path = Path::new(pattern);
    if path.has_root() || path.is_absolute() {
        return Err(install::glob_invalid(
            pattern,
            "pattern must be relative to the source",
        ));
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(install::glob_invalid(
            pattern,
            "pattern must not contain '..'",
        ));
    }
    Ok(())
}

/// Leading path components of `pattern` that contain no glob syntax
fn literal_prefix(pattern: &str) -> PathBuf {
    pattern
        .split('/')
        .take_while(|segment| !segment.contains(GLOB_META))
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect()
}

fn to_forward_slashes(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
