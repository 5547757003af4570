//! Point-pair and path types

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::pixel::{ImageIndex, PixelPoint};

/// A triangulated 3D position (depth, lateral, vertical)
pub type Point3d = Point3<f64>;

/// Identifier of a point-pair, unique for the lifetime of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PointId(pub(crate) u64);

/// Identifier of a path, unique for the lifetime of a model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PathId(pub(crate) u64);

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

/// One feature as seen in both photographs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPair {
    id: PointId,
    pixels: [PixelPoint; 2],
    position: Option<Point3d>,
}

impl PointPair {
    pub(crate) fn new(id: PointId, pixels: [PixelPoint; 2]) -> Self {
        Self {
            id,
            pixels,
            position: None,
        }
    }

    /// Pair seeded with the same location in both photographs
    pub(crate) fn seeded(id: PointId, pixel: PixelPoint) -> Self {
        Self::new(id, [pixel, pixel])
    }

    pub fn id(&self) -> PointId {
        self.id
    }

    /// Pixel location in the given photograph
    pub fn pixel(&self, image: ImageIndex) -> PixelPoint {
        self.pixels[image.index()]
    }

    /// Both pixel locations, left first
    pub fn pixels(&self) -> &[PixelPoint; 2] {
        &self.pixels
    }

    /// Triangulated position, `None` until the model has been triangulated
    pub fn position(&self) -> Option<&Point3d> {
        self.position.as_ref()
    }

    pub(crate) fn set_pixel(&mut self, image: ImageIndex, pixel: PixelPoint) {
        self.pixels[image.index()] = pixel;
        self.position = None;
    }

    pub(crate) fn set_position(&mut self, position: Point3d) {
        self.position = Some(position);
    }
}

/// An ordered chain of point-pairs tracing one feature across both photographs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    id: PathId,
    points: Vec<PointPair>,
}

impl Path {
    /// Minimum number of pairs a closed path must hold
    pub const MIN_POINTS: usize = 2;

    pub(crate) fn new(id: PathId) -> Self {
        Self {
            id,
            points: Vec::new(),
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the path is long enough to be kept once closed
    pub fn is_complete(&self) -> bool {
        self.points.len() >= Self::MIN_POINTS
    }

    pub fn points(&self) -> &[PointPair] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PointPair> {
        self.points.iter()
    }

    pub fn first(&self) -> Option<&PointPair> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&PointPair> {
        self.points.last()
    }

    /// Position of the pair with the given id within this path
    pub fn position_of(&self, id: PointId) -> Option<usize> {
        self.points.iter().position(|pair| pair.id == id)
    }

    pub fn contains(&self, id: PointId) -> bool {
        self.position_of(id).is_some()
    }

    /// Consecutive segments of the polyline as pixel locations in one photograph
    pub fn segments(&self, image: ImageIndex) -> impl Iterator<Item = (PixelPoint, PixelPoint)> + '_ {
        self.points
            .windows(2)
            .map(move |w| (w[0].pixel(image), w[1].pixel(image)))
    }

    pub(crate) fn push(&mut self, pair: PointPair) {
        self.points.push(pair);
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut PointPair> {
        self.points.get_mut(index)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, PointPair> {
        self.points.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a PointPair;
    type IntoIter = std::slice::Iter<'a, PointPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
