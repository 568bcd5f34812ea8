use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

/// The backend variants sharing the [`crate::io::InputSource`] contract.
/// Only `InMemoryFile` is implemented in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    InMemoryFile,
    Descriptor,
    MemoryMapped,
    Network,
}

/// Opaque resource identifier, resolved to a filesystem path at open time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locator(String);

impl Locator {
    pub fn new<S: Into<String>>(locator: S) -> Self {
        Locator(locator.into())
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Locator(path.as_ref().to_string_lossy().into_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolve to an absolute path.
    ///
    /// `file://` URLs go through `Url::to_file_path`, which rejects remote
    /// hosts. Anything else must already be an absolute path; relative paths
    /// and other schemes yield `None`.
    pub fn to_file_path(&self) -> Option<PathBuf> {
        if let Ok(url) = Url::parse(&self.0) {
            if url.scheme() == "file" {
                return url.to_file_path().ok();
            }
        }

        let path = Path::new(&self.0);
        if path.is_absolute() {
            Some(path.to_path_buf())
        } else {
            None
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locator {
    fn from(s: &str) -> Self {
        Locator::new(s)
    }
}

impl From<String> for Locator {
    fn from(s: String) -> Self {
        Locator(s)
    }
}

impl From<&Path> for Locator {
    fn from(p: &Path) -> Self {
        Locator::from_path(p)
    }
}

impl From<PathBuf> for Locator {
    fn from(p: PathBuf) -> Self {
        Locator::from_path(p)
    }
}

/// How the in-memory backend fills its buffer during `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStrategy {
    /// Keep reading until the buffer is full or the handle reports end of data.
    #[default]
    Exhaustive,
    /// Issue exactly one read sized to the whole resource. A short result
    /// shrinks the session to the bytes actually returned.
    SingleRead,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InMemoryFileConfig {
    pub load_strategy: LoadStrategy,
    /// Resources longer than this fail to open with `EFBIG`.
    pub max_length: Option<u64>,
}

impl InMemoryFileConfig {
    pub fn with_load_strategy(mut self, load_strategy: LoadStrategy) -> Self {
        self.load_strategy = load_strategy;
        self
    }

    pub fn with_max_length(mut self, max_length: u64) -> Self {
        self.max_length = Some(max_length);
        self
    }
}
