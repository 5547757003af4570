//! # photodist
//!
//! Recover approximate 3D coordinates from feature points matched by hand on
//! a pair of stereo photographs.
//!
//! This is the umbrella crate that provides convenient access to all photodist
//! functionality. You can use this crate to get everything in one place, or use
//! the individual crates for more granular control over dependencies.
//!
//! ## Features
//!
//! - **Core**: the annotation model (paths of point-pairs), focus search,
//!   calibration and stereo triangulation
//! - **I/O**: `x y z path` text, XYZ/CSV and PLY export, JSON sessions
//!
//! ## Quick Start
//!
//! ```rust
//! use photodist::prelude::*;
//!
//! let mut model = GeometryModel::new();
//!
//! // Click a feature in the left photograph, then correct it in the right one
//! let id = model.add_point(300, 200, ImageIndex::Left);
//! model.set_point_coordinate(id, ImageIndex::Right, 340, 200).unwrap();
//! let id = model.add_point(320, 260, ImageIndex::Left);
//! model.set_point_coordinate(id, ImageIndex::Right, 365, 260).unwrap();
//! model.end_path().unwrap();
//!
//! let report = model.triangulate(640, 480).unwrap();
//! assert!(report.is_clean());
//! ```
//!
//! ## Feature Flags
//!
//! - `default`: Enables io
//! - `io`: File export and session persistence
//! - `all`: Enables all features

// Re-export core functionality
pub use photodist_core::*;

// Re-export sub-crates
#[cfg(feature = "io")]
pub use photodist_io as io;

/// Convenient imports for common use cases
pub mod prelude {
    pub use photodist_core::{
        EndPathOutcome, Error, GeometryListener, GeometryModel, ImageDimensions, ImageIndex,
        NearestPointSearch, PixelPoint, Point3d, PointId, PointPair, Result, StereoCalibration,
        StereoRig, TriangulationReport, ViewportMapping, FOCUS_RADIUS,
    };

    #[cfg(feature = "io")]
    pub use photodist_io::{
        write_geometry, GeometryTextWriter, GeometryWriter, PlyWriter, Session, XyzCsvWriteOptions,
        XyzCsvWriter,
    };
}
