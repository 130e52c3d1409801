//! Archive extraction stage
//!
//! OOXML documents are ZIP containers. The extractor unpacks every entry into
//! a private temp directory (the staging area) so that translators can address
//! individual parts by their archive-relative path. Extraction either fully
//! succeeds or fully fails: a traversal attempt or a corrupt entry aborts the
//! whole operation and the temp directory is removed with it.

use log::{debug, warn};
use std::fs;
use std::io::{self, Cursor, Read};
use std::path::Path;
use tempfile::TempDir;
use thiserror::Error;
use zip::ZipArchive;

/// Why an extraction was aborted. No partial staging area survives any of
/// these; the temp directory is deleted before the error is returned.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The stream is not a ZIP container (or contains zero entries).
    #[error("input is not a zip container")]
    NotAnArchive,
    /// An entry path resolves outside the staging root (zip-slip).
    #[error("archive entry escapes the staging root: {0}")]
    PathTraversal(String),
    /// The container opened but an entry could not be read or decompressed.
    #[error("corrupt archive: {0}")]
    Corrupt(#[from] zip::result::ZipError),
    #[error("failed to stage archive contents: {0}")]
    Io(#[from] io::Error),
}

/// Extracted working copy of one archive, exclusively owned by a single
/// render session. The backing temp directory is deleted on drop, so a
/// cancelled load cleans up the same way a finished one does.
#[derive(Debug)]
pub struct StagingArea {
    dir: TempDir,
    entries: Vec<String>,
}

impl StagingArea {
    /// Read `source` to the end and unpack it as a ZIP container.
    ///
    /// The container format has no random access mid-stream, so the stream is
    /// buffered once and each entry is decompressed fully before the next one
    /// is touched.
    pub fn extract(mut source: impl Read) -> Result<Self, ExtractError> {
        let mut raw = Vec::new();
        source.read_to_end(&mut raw)?;

        let mut archive = match ZipArchive::new(Cursor::new(raw)) {
            Ok(archive) => archive,
            Err(err) => {
                debug!("stream did not open as a zip container: {}", err);
                return Err(ExtractError::NotAnArchive);
            }
        };

        // A container with zero entries is indistinguishable from garbage for
        // our purposes: there is nothing to translate.
        if archive.len() == 0 {
            return Err(ExtractError::NotAnArchive);
        }

        let dir = TempDir::new()?;
        let mut entries = Vec::with_capacity(archive.len());

        for i in 0..archive.len() {
            let mut entry = archive.by_index(i)?;
            let declared = entry.name().to_string();

            // Zip-slip guard: the resolved path must stay inside the staging
            // root. A traversal attempt fails the entire extraction.
            let relative = match entry.enclosed_name() {
                Some(path) => path.to_path_buf(),
                None => {
                    warn!("rejecting archive with traversal entry: {}", declared);
                    return Err(ExtractError::PathTraversal(declared));
                }
            };

            let dest = dir.path().join(&relative);
            if entry.is_dir() {
                fs::create_dir_all(&dest)?;
                entries.push(format!("{}/", relative.to_string_lossy()));
            } else {
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                let mut out = fs::File::create(&dest)?;
                io::copy(&mut entry, &mut out)?;
                entries.push(relative.to_string_lossy().into_owned());
            }
        }

        debug!("staged {} archive entries", entries.len());
        Ok(StagingArea { dir, entries })
    }

    /// Root directory of the staging area. Relative resource URLs in the
    /// rendered HTML resolve against this path until the area is dropped.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// All staged entry paths, forward-slash separated and archive-relative.
    /// Directory placeholders keep a trailing slash.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Contents of one staged part, or `None` if the part is absent.
    pub fn read(&self, path: &str) -> Option<Vec<u8>> {
        if !self.entries.iter().any(|e| e == path) {
            return None;
        }
        fs::read(self.dir.path().join(path)).ok()
    }
}
