//! Fake byte files for unit tests.

use super::ByteFile;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Fails the first `failures` reads, then serves `bytes`.
#[derive(Debug)]
pub(crate) struct FlakyFile {
    bytes: Vec<u8>,
    failures: usize,
    attempts: AtomicUsize,
}

impl FlakyFile {
    pub(crate) fn new(bytes: Vec<u8>, failures: usize) -> Self {
        Self {
            bytes,
            failures,
            attempts: AtomicUsize::new(0),
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ByteFile for FlakyFile {
    fn name(&self) -> &str {
        "flaky.bin"
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_range(&self, offset: u64, size: usize) -> io::Result<Vec<u8>> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(io::Error::other("simulated read failure"));
        }
        let start = (offset as usize).min(self.bytes.len());
        let end = start.saturating_add(size).min(self.bytes.len());
        Ok(self.bytes[start..end].to_vec())
    }
}

/// Counts reads and optionally stalls reads at chosen offsets.
#[derive(Debug, Default)]
pub(crate) struct SlowFile {
    bytes: Vec<u8>,
    delays: Vec<(u64, Duration)>,
    failures: Vec<(u64, usize)>,
    reads: Mutex<Vec<(u64, usize)>>,
}

impl SlowFile {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            ..Self::default()
        }
    }

    /// Stall any read starting at `offset` for `delay`.
    pub(crate) fn with_delay(mut self, offset: u64, delay: Duration) -> Self {
        self.delays.push((offset, delay));
        self
    }

    /// Fail every read of exactly `size` bytes at `offset`.
    pub(crate) fn with_failure(mut self, offset: u64, size: usize) -> Self {
        self.failures.push((offset, size));
        self
    }

    /// Every `(offset, size)` requested so far, in call order.
    pub(crate) fn reads(&self) -> Vec<(u64, usize)> {
        self.reads.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub(crate) fn read_count(&self) -> usize {
        self.reads().len()
    }
}

impl ByteFile for SlowFile {
    fn name(&self) -> &str {
        "slow.bin"
    }

    fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    fn read_range(&self, offset: u64, size: usize) -> io::Result<Vec<u8>> {
        if let Ok(mut reads) = self.reads.lock() {
            reads.push((offset, size));
        }
        if let Some((_, delay)) = self.delays.iter().find(|(at, _)| *at == offset) {
            std::thread::sleep(*delay);
        }
        if self.failures.contains(&(offset, size)) {
            return Err(io::Error::other("simulated read failure"));
        }
        let start = (offset as usize).min(self.bytes.len());
        let end = start.saturating_add(size).min(self.bytes.len());
        Ok(self.bytes[start..end].to_vec())
    }
}
