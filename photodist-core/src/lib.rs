//! Core data structures and algorithms for photodist
//!
//! This crate provides the annotation model for a pair of stereo photographs:
//! ordered paths of point-pairs, nearest-point focus for interactive editing,
//! and the pinhole stereo triangulation that turns pixel disparities into 3D
//! positions.

pub mod calibration;
pub mod error;
pub mod geometry;
pub mod listener;
pub mod pixel;
pub mod point;
pub mod stereo;
pub mod traits;
pub mod viewport;

pub use calibration::*;
pub use error::*;
pub use geometry::*;
pub use listener::*;
pub use pixel::*;
pub use point::*;
pub use stereo::*;
pub use traits::*;
pub use viewport::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::{Point2, Point3};
