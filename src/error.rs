//! Error types for geokd.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeoError>;

#[derive(Debug, Error)]
pub enum GeoError {
    /// The location source could not be opened or read.
    #[error("cannot read location source {}: {source}", path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single record could not be parsed into a location.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// Nearest-neighbor lookup against an index built from zero points.
    #[error("nearest-neighbor query on an empty index")]
    EmptyIndex,

    #[error("configuration error: {0}")]
    Config(String),
}

impl GeoError {
    pub(crate) fn malformed(line: u64, reason: impl Into<String>) -> Self {
        GeoError::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}
