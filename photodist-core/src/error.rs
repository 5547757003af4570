//! Error types for photodist

use thiserror::Error;

use crate::{ImageDimensions, PointId};

/// Main error type for photodist operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("No path is currently open")]
    NoOpenPath,

    #[error("A path is already open; end it first")]
    PathOpen,

    #[error("A path needs at least 2 points, got {0}")]
    IncompletePath(usize),

    #[error("Unknown point: {0}")]
    UnknownPoint(PointId),

    #[error("Point {point} of path {path} has not been triangulated")]
    NotTriangulated { path: usize, point: usize },

    #[error("Left and right image dimensions are different: {left} vs {right}")]
    DimensionMismatch {
        left: ImageDimensions,
        right: ImageDimensions,
    },

    #[error("Invalid calibration: {0}")]
    InvalidCalibration(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for photodist operations
pub type Result<T> = std::result::Result<T, Error>;
