//! Error types for I/O operations

use thiserror::Error;

/// Errors that can occur while reading or writing photodist files
#[derive(Error, Debug)]
pub enum IoError {
    #[error("Invalid file format: {format}")]
    InvalidFormat { format: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Unsupported session version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<IoError> for photodist_core::Error {
    fn from(err: IoError) -> Self {
        match err {
            IoError::Io(e) => photodist_core::Error::Io(e),
            IoError::InvalidFormat { format } => photodist_core::Error::UnsupportedFormat(format),
            IoError::ParseError { message } => photodist_core::Error::Serialization(message),
            other => photodist_core::Error::InvalidData(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for IoError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            IoError::Io(err.into())
        } else {
            IoError::ParseError {
                message: err.to_string(),
            }
        }
    }
}
