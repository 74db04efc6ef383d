//! HTTP archive sources
//!
//! The archive is downloaded into an anonymous temporary file and unpacked
//! into the destination directory. Entries that would land outside the
//! destination are rejected.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

use tracing::debug;

use crate::error::{Result, fetch};

/// Supported archive formats, detected from the URL's file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    TarGz,
    Tar,
    Zip,
}

impl ArchiveFormat {
    fn from_path(path: &str) -> Option<Self> {
        let path = path.to_ascii_lowercase();
        if path.ends_with(".tar.gz") || path.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if path.ends_with(".tar") {
            Some(Self::Tar)
        } else if path.ends_with(".zip") {
            Some(Self::Zip)
        } else {
            None
        }
    }
}

/// Archive downloaded over HTTP(S)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSource {
    pub url: String,
    pub format: ArchiveFormat,
}

impl ArchiveSource {
    /// Parse an archive URL, returning `None` for anything that is not one
    pub fn parse(url: &str) -> Option<Self> {
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return None;
        }
        let path = url.split(['?', '#']).next().unwrap_or(url);
        let format = ArchiveFormat::from_path(path)?;
        Some(Self {
            url: url.to_string(),
            format,
        })
    }

    /// Download and extract the archive into `dest`
    pub fn fetch(&self, dest: &Path) -> Result<()> {
        let archive = self.download()?;
        self.extract(archive, dest)
    }

    fn download(&self) -> Result<File> {
        debug!(url = %self.url, "downloading archive");
        let response = ureq::get(&self.url)
            .call()
            .map_err(|e| fetch::download_failed(&self.url, e.to_string()))?;

        let mut file = tempfile::tempfile_in(crate::temp::temp_dir_base())
            .map_err(|e| fetch::download_failed(&self.url, e.to_string()))?;
        let bytes = io::copy(&mut response.into_reader(), &mut file)
            .map_err(|e| fetch::download_failed(&self.url, e.to_string()))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|e| fetch::download_failed(&self.url, e.to_string()))?;

        debug!(url = %self.url, bytes, "archive downloaded");
        Ok(file)
    }

    /// Unpack an already downloaded archive into `dest`
    pub fn extract(&self, archive: File, dest: &Path) -> Result<()> {
        fs::create_dir_all(dest).map_err(|e| fetch::extract_failed(&self.url, e.to_string()))?;

        let result = match self.format {
            ArchiveFormat::TarGz => {
                extract_tar(flate2::read::GzDecoder::new(BufReader::new(archive)), dest)
            }
            ArchiveFormat::Tar => extract_tar(BufReader::new(archive), dest),
            ArchiveFormat::Zip => extract_zip(archive, dest),
        };
        result.map_err(|reason| fetch::extract_failed(&self.url, reason))
    }
}

fn extract_tar<R: Read>(reader: R, dest: &Path) -> std::result::Result<(), String> {
    let mut archive = tar::Archive::new(reader);
    let entries = archive
        .entries()
        .map_err(|e| format!("tar read error: {e}"))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| format!("tar entry error: {e}"))?;
        let path = entry
            .path()
            .map_err(|e| format!("tar entry error: {e}"))?
            .into_owned();

        let unpacked = entry
            .unpack_in(dest)
            .map_err(|e| format!("unpack error for {}: {e}", path.display()))?;
        if !unpacked {
            return Err(format!("entry '{}' escapes the archive root", path.display()));
        }
    }
    Ok(())
}

fn extract_zip<R: Read + Seek>(reader: R, dest: &Path) -> std::result::Result<(), String> {
    let mut archive = zip::ZipArchive::new(reader).map_err(|e| format!("zip read error: {e}"))?;

    for i in 0..archive.len() {
        let mut file = archive
            .by_index(i)
            .map_err(|e| format!("zip entry error: {e}"))?;

        let Some(relative) = file.enclosed_name() else {
            return Err(format!("entry '{}' escapes the archive root", file.name()));
        };
        let outpath = dest.join(relative);

        if file.is_dir() {
            fs::create_dir_all(&outpath)
                .map_err(|e| format!("cannot create directory {}: {e}", outpath.display()))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("cannot create directory {}: {e}", parent.display()))?;
        }
        let mut outfile = File::create(&outpath)
            .map_err(|e| format!("cannot create {}: {e}", outpath.display()))?;
        io::copy(&mut file, &mut outfile)
            .map_err(|e| format!("write error for {}: {e}", outpath.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode)).map_err(|e| {
                    format!("cannot set permissions on {}: {e}", outpath.display())
                })?;
            }
        }
    }
    Ok(())
}
