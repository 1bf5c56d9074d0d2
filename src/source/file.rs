//! File-backed byte source.

use super::ByteFile;
use crate::model::SourceError;
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

/// A regular file on disk.
///
/// The size is captured when the file is selected. Each `read_range` opens
/// a fresh handle, so reads never share a cursor.
#[derive(Debug, Clone)]
pub struct LocalFile {
    path: PathBuf,
    name: String,
    len: u64,
}

impl LocalFile {
    /// Select the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::FileNotFound` if the file does not exist.
    /// Returns `SourceError::Io` if the path is not a regular file or its
    /// metadata cannot be read.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SourceError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let metadata =
            std::fs::metadata(path).map_err(|source| SourceError::Io { offset: 0, source })?;
        if !metadata.is_file() {
            return Err(SourceError::Io {
                offset: 0,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("{} is not a regular file", path.display()),
                ),
            });
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Ok(Self {
            path: path.to_path_buf(),
            name,
            len: metadata.len(),
        })
    }

    /// Path the file was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ByteFile for LocalFile {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn read_range(&self, offset: u64, size: usize) -> io::Result<Vec<u8>> {
        let mut file = File::open(&self.path)?;
        file.seek(SeekFrom::Start(offset))?;

        let expected = self.len.saturating_sub(offset).min(size as u64) as usize;
        let mut buffer = Vec::with_capacity(expected);
        file.take(size as u64).read_to_end(&mut buffer)?;
        Ok(buffer)
    }
}
