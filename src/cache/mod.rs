//! Per-run source cache
//!
//! Resolves every configured source to a local directory exactly once:
//! - a URL naming an existing directory is used in place
//! - anything else is fetched into `<scratch>/<source name>`
//!
//! The scratch directory lives as long as the [`SourceCache`] and is removed
//! when it is dropped, whether the run succeeded or not. Nothing is reused
//! across runs.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::debug;

use crate::config::Source;
use crate::error::{Result, fetch};
use crate::progress::InstallProgress;
use crate::source::SourceFetcher;

/// Mapping from source name to a local directory holding its files
#[derive(Debug)]
pub struct SourceCache {
    /// Created on the first remote fetch
    scratch: Option<TempDir>,
    dirs: HashMap<String, PathBuf>,
}

impl SourceCache {
    /// Resolve all `sources` sequentially, failing on the first fetch error
    ///
    /// Relative local paths are taken relative to `root`.
    pub fn build(
        sources: &[Source],
        root: &Path,
        fetcher: &dyn SourceFetcher,
        progress: &mut dyn InstallProgress,
    ) -> Result<Self> {
        let mut cache = Self {
            scratch: None,
            dirs: HashMap::new(),
        };

        for source in sources {
            if cache.dirs.contains_key(&source.name) {
                continue;
            }

            if let Some(local) = local_dir(&source.url, root) {
                debug!(source = %source.name, dir = %local.display(), "using local source");
                progress.fetch_finished(source, true);
                cache.dirs.insert(source.name.clone(), local);
                continue;
            }

            progress.fetch_started(source);
            let dest = cache.scratch_dir()?.join(&source.name);
            if let Err(e) = fetcher.fetch(&source.url, &dest) {
                progress.fetch_failed(source);
                return Err(fetch::failed(&source.name, &source.url, &e));
            }
            progress.fetch_finished(source, false);
            cache.dirs.insert(source.name.clone(), dest);
        }

        Ok(cache)
    }

    /// Local directory of the named source
    pub fn dir(&self, name: &str) -> Option<&Path> {
        self.dirs.get(name).map(PathBuf::as_path)
    }

    fn scratch_dir(&mut self) -> Result<&Path> {
        let dir = match self.scratch.take() {
            Some(dir) => dir,
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("pim-")
                    .tempdir_in(crate::temp::temp_dir_base())?;
                debug!(dir = %dir.path().display(), "created scratch directory");
                dir
            }
        };
        Ok(self.scratch.insert(dir).path())
    }
}

/// The directory `url` names, if it is an existing one
fn local_dir(url: &str, root: &Path) -> Option<PathBuf> {
    let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
    let path = if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    };
    path.is_dir().then_some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Target;
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    /// Writes a marker file instead of fetching, and records every call
    #[derive(Default)]
    struct RecordingFetcher {
        calls: RefCell<Vec<String>>,
        fail: bool,
    }

    impl SourceFetcher for RecordingFetcher {
        fn fetch(&self, url: &str, dest: &Path) -> Result<()> {
            self.calls.borrow_mut().push(url.to_string());
            if self.fail {
                return Err(fetch::unsupported_url(url));
            }
            fs::create_dir_all(dest)?;
            fs::write(dest.join("fetched.md"), url)?;
            Ok(())
        }
    }

    #[derive(Default)]
    struct Events(Vec<String>);

    impl InstallProgress for Events {
        fn fetch_started(&mut self, source: &Source) {
            self.0.push(format!("start {}", source.name));
        }
        fn fetch_finished(&mut self, source: &Source, local: bool) {
            self.0.push(format!("done {} local={local}", source.name));
        }
        fn fetch_failed(&mut self, source: &Source) {
            self.0.push(format!("failed {}", source.name));
        }
        fn target_started(&mut self, _: &Target, _: &Path) {}
        fn file_added(&mut self, _: &Target, _: &Path) {}
        fn target_finished(&mut self, _: &Target, _: usize) {}
        fn install_finished(&mut self, _: usize, _: usize) {}
    }

    #[test]
    fn test_local_directories_are_used_in_place() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("shared")).unwrap();
        let sources = [
            Source::new("working_dir", temp.path().to_string_lossy()),
            Source::new("shared", "shared"),
            Source::new("file", format!("file://{}", temp.path().display())),
        ];
        let fetcher = RecordingFetcher::default();
        let mut events = Events::default();

        let cache = SourceCache::build(&sources, temp.path(), &fetcher, &mut events).unwrap();

        assert!(fetcher.calls.borrow().is_empty());
        assert_eq!(cache.dir("working_dir"), Some(temp.path()));
        assert_eq!(cache.dir("shared"), Some(temp.path().join("shared").as_path()));
        assert_eq!(cache.dir("file"), Some(temp.path()));
        assert!(cache.scratch.is_none());
    }

    #[test]
    fn test_remote_sources_fetched_once_into_scratch() {
        let temp = TempDir::new().unwrap();
        let sources = [Source::new("remote", "https://example.com/prompts.tar.gz")];
        let fetcher = RecordingFetcher::default();
        let mut events = Events::default();

        let cache = SourceCache::build(&sources, temp.path(), &fetcher, &mut events).unwrap();

        assert_eq!(fetcher.calls.borrow().len(), 1);
        let dir = cache.dir("remote").unwrap().to_path_buf();
        assert!(dir.ends_with("remote"));
        assert!(dir.join("fetched.md").is_file());
        assert_eq!(events.0, ["start remote", "done remote local=false"]);

        drop(cache);
        assert!(!dir.exists());
    }

    #[test]
    fn test_fetch_failure_names_source_and_stops() {
        let temp = TempDir::new().unwrap();
        let sources = [
            Source::new("first", "https://example.com/a.zip"),
            Source::new("second", "https://example.com/b.zip"),
        ];
        let fetcher = RecordingFetcher {
            fail: true,
            ..Default::default()
        };
        let mut events = Events::default();

        let err = SourceCache::build(&sources, temp.path(), &fetcher, &mut events).unwrap_err();

        let message = err.to_string();
        assert!(message.contains("'first'"));
        assert!(message.contains("https://example.com/a.zip"));
        assert_eq!(fetcher.calls.borrow().len(), 1);
        assert_eq!(events.0, ["start first", "failed first"]);
    }

    #[test]
    fn test_missing_local_path_goes_to_fetcher() {
        let temp = TempDir::new().unwrap();
        let sources = [Source::new("gone", "does/not/exist")];
        let fetcher = RecordingFetcher::default();
        let mut events = Events::default();

        SourceCache::build(&sources, temp.path(), &fetcher, &mut events).unwrap();

        assert_eq!(*fetcher.calls.borrow(), ["does/not/exist"]);
    }
}
