//! Byte-range input sources.
//!
//! This module provides the read side of the viewer:
//! - [`ByteFile`]: a file-like object exposing its size and a range read
//! - [`LocalFile`]: a file on disk, opened fresh for every read
//! - [`MemoryFile`]: an in-memory buffer (stdin input, tests)
//! - [`ByteSource`]: binds one file and serves asynchronous range reads

use crate::model::{ByteChunk, SourceError};
use std::fmt::Debug;
use std::io;
use std::path::Path;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use tracing::{debug, warn};

pub mod file;
pub mod memory;

pub use file::LocalFile;
pub use memory::MemoryFile;

/// A file-like object that can report its size and read byte ranges.
///
/// Implementations must tolerate concurrent `read_range` calls from
/// different threads; each call is independent.
pub trait ByteFile: Debug + Send + Sync {
    /// Display name (file name or `<stdin>`).
    fn name(&self) -> &str;

    /// Size in bytes at the time the file was selected.
    fn len(&self) -> u64;

    /// True for a zero-length file.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read up to `size` bytes starting at `offset`.
    ///
    /// Returns fewer bytes when the range crosses end-of-file and an empty
    /// vector when `offset` is at or past it.
    fn read_range(&self, offset: u64, size: usize) -> io::Result<Vec<u8>>;
}

/// Open a file selected by path. `-` reads all of stdin into memory.
///
/// # Errors
///
/// Returns `SourceError::FileNotFound` if the path does not exist.
/// Returns `SourceError::Io` for other I/O errors.
pub fn open_path(path: &Path) -> Result<Arc<dyn ByteFile>, SourceError> {
    if path == Path::new("-") {
        let file = MemoryFile::from_reader("<stdin>", io::stdin().lock())
            .map_err(|source| SourceError::Io { offset: 0, source })?;
        return Ok(Arc::new(file));
    }

    Ok(Arc::new(LocalFile::open(path)?))
}

/// Binds the currently selected file and serves byte-range reads.
///
/// Every read runs on its own worker thread with its own file handle, so any
/// number of reads may be outstanding at once without interfering.
#[derive(Debug, Default)]
pub struct ByteSource {
    file: Option<Arc<dyn ByteFile>>,
    retries: u32,
}

impl ByteSource {
    /// Create an unbound source with no I/O retries.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unbound source that retries failed reads up to `retries` times.
    pub fn with_retries(retries: u32) -> Self {
        Self {
            file: None,
            retries,
        }
    }

    /// Replace the bound file unconditionally.
    ///
    /// Reads already in flight keep their own handle to the previous file.
    pub fn bind(&mut self, file: Arc<dyn ByteFile>) {
        debug!(name = file.name(), len = file.len(), "Binding byte source");
        self.file = Some(file);
    }

    /// The currently bound file, if any.
    pub fn file(&self) -> Option<&Arc<dyn ByteFile>> {
        self.file.as_ref()
    }

    /// Start reading `[offset, offset + size)` from the bound file.
    ///
    /// Never blocks. Failures detectable up front (`NoFileBound`,
    /// `InvalidOffset`) are delivered through the returned handle, already resolved.
    pub fn read(&self, offset: u64, size: usize) -> PendingRead {
        let (tx, rx) = mpsc::channel();
        let pending = PendingRead::new(offset, size, rx);

        let Some(file) = self.file.clone() else {
            let _ = tx.send(Err(SourceError::NoFileBound));
            return pending;
        };

        if offset.checked_add(size as u64).is_none() {
            let _ = tx.send(Err(SourceError::InvalidOffset { offset, size }));
            return pending;
        }

        let retries = self.retries;
        let spawned = thread::Builder::new()
            .name("hexview-read".to_string())
            .spawn(move || {
                let result = read_with_retry(file.as_ref(), offset, size, retries);
                // Receiver is gone when the request was superseded.
                let _ = tx.send(result);
            });

        if let Err(error) = spawned {
            // The sender was dropped with the closure; the handle resolves as an I/O error.
            warn!(%error, offset, size, "Failed to spawn reader thread");
        }

        pending
    }
}

fn read_with_retry(
    file: &dyn ByteFile,
    offset: u64,
    size: usize,
    retries: u32,
) -> Result<ByteChunk, SourceError> {
    let mut attempt = 0;
    loop {
        match file.read_range(offset, size) {
            Ok(bytes) => return Ok(ByteChunk::new(offset, bytes)),
            Err(source) if attempt < retries => {
                attempt += 1;
                warn!(
                    name = file.name(),
                    offset,
                    attempt,
                    error = %source,
                    "Read failed, retrying"
                );
            }
            Err(source) => return Err(SourceError::Io { offset, source }),
        }
    }
}

/// Handle to a read started by [`ByteSource::read`].
///
/// Dropping the handle abandons the read; the worker finishes and its result
/// is thrown away.
#[derive(Debug)]
pub struct PendingRead {
    offset: u64,
    size: usize,
    rx: Receiver<Result<ByteChunk, SourceError>>,
    resolved: bool,
}

impl PendingRead {
    fn new(offset: u64, size: usize, rx: Receiver<Result<ByteChunk, SourceError>>) -> Self {
        Self {
            offset,
            size,
            rx,
            resolved: false,
        }
    }

    /// Requested start offset.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Requested size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Take the result if the read has finished.
    ///
    /// Returns `Some` exactly once; `None` while pending and after resolution.
    pub fn try_take(&mut self) -> Option<Result<ByteChunk, SourceError>> {
        if self.resolved {
            return None;
        }

        let result = match self.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(self.worker_gone()),
        };
        self.resolved = true;
        Some(result)
    }

    /// Block until the read finishes.
    pub fn wait(mut self) -> Result<ByteChunk, SourceError> {
        if let Some(result) = self.try_take() {
            return result;
        }
        match self.rx.recv() {
            Ok(result) => result,
            Err(_) => Err(self.worker_gone()),
        }
    }

    fn worker_gone(&self) -> SourceError {
        SourceError::Io {
            offset: self.offset,
            source: io::Error::other("reader thread exited without a result"),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing;
