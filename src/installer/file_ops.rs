//! Basic file operations for target installation
//!
//! This module handles low-level file operations:
//! - Directory creation (`ensure_parent_dir`)
//! - Output directory reset (`reset_dir`)
//! - File copying with permission replication (`copy_file`)

use std::fs::{self, File};
use std::io;
use std::path::Path;

use crate::error::{Result, install};

/// Ensure parent directory exists for a path
pub fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Delete `dir` with everything below it, then recreate it empty
pub fn reset_dir(dir: &Path) -> io::Result<()> {
    match fs::remove_dir_all(dir) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e),
        _ => {}
    }
    fs::create_dir_all(dir)
}

/// Remove a file if it exists
pub fn remove_file_if_exists(path: &Path) -> io::Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Copy `source` to `target`, creating parent directories and carrying the
/// source's permission bits over to the copy.
///
/// An existing `target` is replaced.
pub fn copy_file(source: &Path, target: &Path) -> Result<()> {
    ensure_parent_dir(target).map_err(|e| install::copy_failed(target, e))?;

    let mut reader = File::open(source).map_err(|e| install::copy_failed(source, e))?;
    let permissions = reader
        .metadata()
        .map_err(|e| install::copy_failed(source, e))?
        .permissions();

    // A read-only copy left by an earlier file with the same name cannot be truncated
    remove_file_if_exists(target).map_err(|e| install::copy_failed(target, e))?;
    let mut writer = File::create(target).map_err(|e| install::copy_failed(target, e))?;
    io::copy(&mut reader, &mut writer).map_err(|e| install::copy_failed(source, e))?;
    drop(writer);

    fs::set_permissions(target, permissions).map_err(|e| install::copy_failed(target, e))
}
