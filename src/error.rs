//! Failure modes of the add-premis-objects stage.
//!
//! Every variant carries the path it failed on and keeps the native I/O error
//! text intact, since callers match on the rendered message. The I/O error is
//! rendered inline and not exposed as `source()`, so report chains print it
//! once.
use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    /// The SIP root could not be resolved to a directory.
    #[error("resolve SIP root {}: {error}", path.display())]
    Sip {
        path: PathBuf,
        error: io::Error,
    },

    /// The descriptive manifest is missing or unreadable.
    #[error("open manifest file: open {}: {error}", path.display())]
    Manifest {
        path: PathBuf,
        error: io::Error,
    },

    /// Walking the content subtree failed.
    #[error("read content {}: {error}", path.display())]
    Traversal {
        path: PathBuf,
        error: io::Error,
    },

    /// The inventory document could not be persisted.
    #[error("write premis file {}: {error}", path.display())]
    Write {
        path: PathBuf,
        error: io::Error,
    },

    /// The caller cancelled the run before the document was written.
    #[error("cancelled")]
    Cancelled,
}

pub type StageResult<T> = std::result::Result<T, StageError>;
