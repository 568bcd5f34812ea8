use std::io::{self, ErrorKind};
use std::path::Path;

use super::{InputSource, ResourceHandle, ResourceOpener, StdFs};
use crate::error::{os_code, InputSourceError, Result, EFBIG, EIO, ENOMEM};
use crate::logging::{LogFacade, Logger};
use crate::types::{InMemoryFileConfig, LoadStrategy, Locator, SourceKind};

const LOG_TARGET: &str = "memfile_source::input_source::in_memory";

/// Buffer and cursor of one open session. `cursor <= buffer.len()` always.
#[derive(Debug)]
struct LoadedFile {
    buffer: Vec<u8>,
    cursor: usize,
}

/// Input source that reads the whole resource into memory on `open` and
/// serves every later read and seek from that buffer.
///
/// No OS handle is held once `open` returns. Memory use equals the resource
/// length for as long as the source stays open. Not safe to share between
/// threads without external locking.
pub struct InMemoryFileInputSource<O: ResourceOpener = StdFs, L: Logger = LogFacade> {
    locator: Locator,
    config: InMemoryFileConfig,
    opener: O,
    logger: L,
    loaded: Option<LoadedFile>,
}

impl InMemoryFileInputSource {
    pub fn new<T: Into<Locator>>(locator: T) -> Self {
        Self::with_opener(locator, InMemoryFileConfig::default(), StdFs, LogFacade)
    }
}

impl<L: Logger> InMemoryFileInputSource<StdFs, L> {
    pub fn with_config<T: Into<Locator>>(locator: T, config: InMemoryFileConfig, logger: L) -> Self {
        Self::with_opener(locator, config, StdFs, logger)
    }
}

impl<O: ResourceOpener, L: Logger> InMemoryFileInputSource<O, L> {
    pub fn with_opener<T: Into<Locator>>(
        locator: T,
        config: InMemoryFileConfig,
        opener: O,
        logger: L,
    ) -> Self {
        Self {
            locator: locator.into(),
            config,
            opener,
            logger,
            loaded: None,
        }
    }

    pub fn config(&self) -> &InMemoryFileConfig {
        &self.config
    }

    /// The loaded bytes, while open.
    pub fn as_slice(&self) -> Option<&[u8]> {
        self.loaded.as_ref().map(|loaded| loaded.buffer.as_slice())
    }

    /// Close `handle` after a failure, logging (not returning) any close error
    /// so the caller still reports `err`.
    fn abandon(&self, handle: O::Handle, err: InputSourceError) -> InputSourceError {
        if let Err(close_err) = handle.close() {
            self.logger
                .warn(LOG_TARGET, &format!("Unable to close the file: {}", close_err));
        }
        err
    }

    fn checked_length(&self, length: u64) -> std::result::Result<usize, InputSourceError> {
        let too_big = InputSourceError::Allocation { requested: length, code: EFBIG };
        if matches!(self.config.max_length, Some(max) if length > max) {
            return Err(too_big);
        }
        usize::try_from(length).map_err(|_| too_big)
    }

    /// Metadata, allocate, fill and close. The handle is closed on every
    /// path before this returns.
    fn load(&self, path: &Path, mut handle: O::Handle) -> Result<Vec<u8>> {
        let length = match handle.length() {
            Ok(length) => length,
            Err(e) => {
                let err = InputSourceError::Metadata { path: path.to_path_buf(), code: os_code(&e) };
                return Err(self.abandon(handle, err));
            }
        };

        let length = match self.checked_length(length) {
            Ok(length) => length,
            Err(err) => return Err(self.abandon(handle, err)),
        };

        let mut buffer = match allocate(length) {
            Some(buffer) => buffer,
            None => {
                let err = InputSourceError::Allocation { requested: length as u64, code: ENOMEM };
                return Err(self.abandon(handle, err));
            }
        };

        let filled = match fill(&mut handle, &mut buffer, self.config.load_strategy) {
            Ok(filled) => filled,
            Err(e) => {
                let err = InputSourceError::Read { path: path.to_path_buf(), code: os_code(&e) };
                return Err(self.abandon(handle, err));
            }
        };

        if let Err(e) = handle.close() {
            self.logger
                .warn(LOG_TARGET, &format!("Unable to close the file: {}", e));
            return Err(InputSourceError::Close { path: path.to_path_buf(), code: os_code(&e) });
        }

        if filled < length {
            self.logger.warn(
                LOG_TARGET,
                &format!(
                    "Short read loading {}: expected {} bytes, got {}",
                    path.display(),
                    length,
                    filled
                ),
            );
            buffer.truncate(filled);
        }

        Ok(buffer)
    }
}

/// Allocate exactly `length` zeroed bytes, or `None` if the allocator refuses.
fn allocate(length: usize) -> Option<Vec<u8>> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(length).ok()?;
    buffer.resize(length, 0);
    Some(buffer)
}

fn fill<H: ResourceHandle>(handle: &mut H, buffer: &mut [u8], strategy: LoadStrategy) -> io::Result<usize> {
    match strategy {
        LoadStrategy::SingleRead => handle.read(buffer),
        LoadStrategy::Exhaustive => {
            let mut filled = 0;
            while filled < buffer.len() {
                match handle.read(&mut buffer[filled..]) {
                    Ok(0) => break,
                    Ok(n) => filled += n,
                    Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e),
                }
            }
            Ok(filled)
        }
    }
}

impl<O: ResourceOpener, L: Logger> InputSource for InMemoryFileInputSource<O, L> {
    fn locator(&self) -> &Locator {
        &self.locator
    }

    fn kind(&self) -> SourceKind {
        SourceKind::InMemoryFile
    }

    fn open(&mut self) -> Result<()> {
        if self.is_open() {
            self.logger.warn(
                LOG_TARGET,
                "open() called on an input source that is already open",
            );
            return Ok(());
        }

        let path = self
            .locator
            .to_file_path()
            .ok_or_else(|| InputSourceError::LocatorResolution {
                locator: self.locator.to_string(),
                code: EIO,
            })?;

        let handle = self
            .opener
            .open(&path)
            .map_err(|e| InputSourceError::Open { path: path.clone(), code: os_code(&e) })?;

        let buffer = self.load(&path, handle)?;
        self.loaded = Some(LoadedFile { buffer, cursor: 0 });
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.loaded.take().is_none() {
            self.logger.warn(
                LOG_TARGET,
                "close() called on an input source that hasn't been opened",
            );
        }
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.loaded.is_some()
    }

    fn read(&mut self, buf: &mut [u8]) -> i64 {
        let Some(loaded) = self.loaded.as_mut() else {
            return -1;
        };

        let remaining = loaded.buffer.len() - loaded.cursor;
        let count = buf.len().min(remaining);
        buf[..count].copy_from_slice(&loaded.buffer[loaded.cursor..loaded.cursor + count]);
        loaded.cursor += count;
        count as i64
    }

    fn seek_to_offset(&mut self, offset: u64) -> bool {
        let Some(loaded) = self.loaded.as_mut() else {
            return false;
        };

        match usize::try_from(offset) {
            Ok(offset) if offset <= loaded.buffer.len() => {
                loaded.cursor = offset;
                true
            }
            _ => false,
        }
    }

    fn offset(&self) -> i64 {
        self.loaded.as_ref().map_or(-1, |loaded| loaded.cursor as i64)
    }

    fn length(&self) -> i64 {
        self.loaded.as_ref().map_or(-1, |loaded| loaded.buffer.len() as i64)
    }

    fn at_eof(&self) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|loaded| loaded.cursor == loaded.buffer.len())
    }

    fn supports_seeking(&self) -> bool {
        true
    }
}

impl<O: ResourceOpener, L: Logger> Drop for InMemoryFileInputSource<O, L> {
    fn drop(&mut self) {
        if self.is_open() {
            let _ = self.close();
        }
    }
}
