pub mod error;
pub mod io;
pub mod logging;
pub mod seekable_source;
pub mod types;

pub use error::{ErrorDomain, InputSourceError};
pub use io::{InMemoryFileInputSource, InputSource};
pub use seekable_source::SourceReader;
pub use types::{InMemoryFileConfig, LoadStrategy, Locator, SourceKind};
