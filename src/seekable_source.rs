use std::io::{self, Read, Result as IoResult, Seek, SeekFrom};

use crate::io::InputSource;

/// Wraps an open [`InputSource`] to provide `Read` + `Seek` for consumers
/// written against the std traits. Like the source it wraps, this is meant
/// for single-threaded use.
///
/// Unlike `std::fs::File`, seeking past the end is an error: the target must
/// lie within `0..=length`.
#[derive(Debug)]
pub struct SourceReader<S: InputSource> {
    source: S,
}

impl<S: InputSource> SourceReader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn get_ref(&self) -> &S {
        &self.source
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }
}

fn not_open() -> io::Error {
    io::Error::new(io::ErrorKind::NotConnected, "input source is not open")
}

impl<S: InputSource> Read for SourceReader<S> {
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        let n = self.source.read(buf);
        usize::try_from(n).map_err(|_| not_open())
    }
}

impl<S: InputSource> Seek for SourceReader<S> {
    fn seek(&mut self, how: SeekFrom) -> IoResult<u64> {
        if !self.source.is_open() {
            return Err(not_open());
        }

        let new = match how {
            SeekFrom::Start(off) => off as i128,
            SeekFrom::End(off) => (self.source.length() as i128) + (off as i128),
            SeekFrom::Current(off) => (self.source.offset() as i128) + (off as i128),
        };

        if new < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative position",
            ));
        }

        let target = u64::try_from(new).unwrap_or(u64::MAX);
        if !self.source.seek_to_offset(target) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek past the end of the input source",
            ));
        }
        Ok(target)
    }
}
