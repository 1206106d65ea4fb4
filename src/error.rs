//! The error type of the library.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("the window must hold at least two outcomes, got {0}")]
    InvalidWindow(usize),

    #[error("the test fraction must be between 0 and 1, got {0}")]
    InvalidTestFraction(f64),

    #[error("the forest needs at least one tree")]
    InvalidTreeCount,

    #[error("unknown outcome '{0}' (expected player, banker or tie)")]
    UnknownOutcome(String),

    #[error("can't read the key file {}: {source}", path.display())]
    KeyFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed key digest on line {line} of {}", path.display())]
    KeyDigest { path: PathBuf, line: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
