use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::Result;
use crate::types::{Locator, SourceKind};

mod in_memory;

pub use in_memory::InMemoryFileInputSource;

/// Randomly seekable byte source feeding a decoder.
///
/// `read` and `seek_to_offset` report failure through sentinels (`-1`,
/// `false`); only `open` and `close` return typed errors.
pub trait InputSource {
    fn locator(&self) -> &Locator;

    fn kind(&self) -> SourceKind;

    /// Acquire the underlying resource. Succeeds without doing anything if
    /// the source is already open.
    fn open(&mut self) -> Result<()>;

    /// Release the underlying resource. Succeeds without doing anything if
    /// the source is already closed.
    fn close(&mut self) -> Result<()>;

    fn is_open(&self) -> bool;

    /// Copy up to `buf.len()` bytes at the current position into `buf` and
    /// advance past them. Returns the number copied, `0` at end of data, or
    /// `-1` if the source is not open.
    fn read(&mut self, buf: &mut [u8]) -> i64;

    /// Move to `offset` bytes from the start. `false` leaves the position
    /// unchanged.
    fn seek_to_offset(&mut self, offset: u64) -> bool;

    /// Current position, `-1` if not open.
    fn offset(&self) -> i64;

    /// Total length in bytes, `-1` if not open.
    fn length(&self) -> i64;

    fn at_eof(&self) -> bool;

    fn supports_seeking(&self) -> bool;
}

/// Opens resources read-only on behalf of a backend.
pub trait ResourceOpener {
    type Handle: ResourceHandle;

    fn open(&self, path: &Path) -> io::Result<Self::Handle>;
}

/// An open OS-level resource. Lives only for the duration of a backend's
/// `open` call.
pub trait ResourceHandle {
    /// Byte length as reported by the metadata query.
    fn length(&self) -> io::Result<u64>;

    /// Same contract as [`std::io::Read::read`].
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    fn close(self) -> io::Result<()>;
}

/// [`ResourceOpener`] over `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdFs;

pub struct StdFile {
    file: File,
}

impl ResourceOpener for StdFs {
    type Handle = StdFile;

    fn open(&self, path: &Path) -> io::Result<StdFile> {
        let file = File::open(path)?;
        Ok(StdFile { file })
    }
}

impl ResourceHandle for StdFile {
    fn length(&self) -> io::Result<u64> {
        Ok(self.file.metadata()?.len())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }

    // std closes on drop and discards the result, so this cannot fail.
    fn close(self) -> io::Result<()> {
        drop(self.file);
        Ok(())
    }
}
