//! Base directory for per-run scratch space
//!
//! `env::temp_dir()` honours `TMPDIR`, which may be relative (`TMPDIR=tmp`).
//! Scratch directories must never land inside the project being installed,
//! so a relative value falls back to the platform default.

use std::env;
use std::path::PathBuf;

/// Absolute directory under which scratch directories are created
pub fn temp_dir_base() -> PathBuf {
    let dir = env::temp_dir();
    if dir.is_absolute() {
        return dir;
    }

    #[cfg(windows)]
    {
        env::var("TEMP")
            .or_else(|_| env::var("TMP"))
            .map(PathBuf::from)
            .ok()
            .filter(|p| p.is_absolute())
            .unwrap_or_else(|| PathBuf::from("C:\\Windows\\Temp"))
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp")
    }
}
