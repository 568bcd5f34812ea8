use std::io;
use std::path::PathBuf;

/// POSIX codes reported when the failing call carries no OS error of its own.
pub const EIO: i32 = 5;
pub const ENOMEM: i32 = 12;
pub const EFBIG: i32 = 27;

/// Category tag carried by every [`InputSourceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorDomain {
    Posix,
}

/// Errors surfaced by `open`/`close` on an input source.
///
/// Each variant keeps a platform-style numeric code so callers that bridge to
/// C or to an errno-based API can report it unchanged.
#[derive(Debug, thiserror::Error)]
pub enum InputSourceError {
    #[error("Locator Resolution Error: {locator} (code {code})")]
    LocatorResolution { locator: String, code: i32 },
    #[error("Open Error: {} (code {code})", path.display())]
    Open { path: PathBuf, code: i32 },
    #[error("Metadata Error: {} (code {code})", path.display())]
    Metadata { path: PathBuf, code: i32 },
    #[error("Allocation Error: {requested} bytes (code {code})")]
    Allocation { requested: u64, code: i32 },
    #[error("Read Error: {} (code {code})", path.display())]
    Read { path: PathBuf, code: i32 },
    #[error("Close Error: {} (code {code})", path.display())]
    Close { path: PathBuf, code: i32 },
}

impl InputSourceError {
    pub fn domain(&self) -> ErrorDomain {
        ErrorDomain::Posix
    }

    pub fn code(&self) -> i32 {
        match self {
            InputSourceError::LocatorResolution { code, .. }
            | InputSourceError::Open { code, .. }
            | InputSourceError::Metadata { code, .. }
            | InputSourceError::Allocation { code, .. }
            | InputSourceError::Read { code, .. }
            | InputSourceError::Close { code, .. } => *code,
        }
    }
}

/// OS error number of `err`, or `EIO` for errors synthesized in userspace.
pub(crate) fn os_code(err: &io::Error) -> i32 {
    err.raw_os_error().unwrap_or(EIO)
}

pub type Result<T> = std::result::Result<T, InputSourceError>;
