use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FqconvError>;

/// Fatal conditions of a conversion run.
#[derive(Debug, Error)]
pub enum FqconvError {
    #[error("{0}")]
    Configuration(String),

    #[error("cannot open {path}")]
    Open {
        path: String,
        #[source]
        source: io::Error,
    },

    /// One input ended before its mate, or in the middle of a record.
    #[error("{stream} is truncated")]
    Truncated { stream: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}
