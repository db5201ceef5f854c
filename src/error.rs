//! Error types for the rasterizer and the bitmap codec

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for canvas, shape and codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by drawing and file operations
#[derive(Error, Debug)]
pub enum Error {
    /// The target file could not be opened for reading or created for writing
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Read or write failed part way through a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Unsupported bitmap layout or an unknown gradient direction
    #[error("Unsupported format: {0}")]
    Format(String),

    /// Malformed hex string, out-of-range HSL component or too few gradient stops
    #[error("Invalid value: {0}")]
    Validation(String),

    /// Numeric field read from a header that was never populated
    #[error("{0} header is empty")]
    EmptyHeader(&'static str),

    /// `PixelBuffer::get` outside the buffer extents
    #[error("pixel ({x}, {y}) is outside the {width}x{height} buffer")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// Malformed scene description
    #[error("Scene error: {0}")]
    Scene(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn open(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Open {
            path: path.into(),
            source,
        }
    }
}
