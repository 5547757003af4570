//! Core traits for photodist

use crate::{ImageIndex, PixelPoint, PointId};

/// Proximity lookup of annotated point-pairs in one photograph
pub trait NearestPointSearch {
    /// Nearest pair strictly closer than `radius` to `query`, with its distance.
    /// Ties go to the pair encountered first.
    fn find_nearest(&self, query: &PixelPoint, image: ImageIndex, radius: f64) -> Option<(PointId, f64)>;

    /// All pairs strictly closer than `radius` to `query`, in iteration order
    fn find_radius_neighbors(&self, query: &PixelPoint, image: ImageIndex, radius: f64) -> Vec<(PointId, f64)>;
}
