//! The annotation model: paths of point-pairs plus calibration
//!
//! `GeometryModel` is the single owner of every annotated point-pair. The open
//! path and the focused point are held as identifiers and are cleared in the
//! same operation that removes what they refer to, so they can never dangle.

use log::{debug, trace, warn};

use crate::listener::{GeometryListener, ListenerId, ListenerList};
use crate::pixel::pixel_distance;
use crate::stereo::is_finite_position;
use crate::{
    Error, ImageDimensions, ImageIndex, NearestPointSearch, Path, PathId, PixelPoint, Point3d,
    PointId, PointPair, Result, StereoCalibration, StereoRig,
};

/// Pointer distance, in photograph pixels, within which a pair can take focus
pub const FOCUS_RADIUS: f64 = 50.0;

/// What `end_path` did with the open path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndPathOutcome {
    /// The path had enough points and stays in the model
    Closed(PathId),
    /// The path was too short and has been removed
    Discarded(PathId),
}

/// Summary of one triangulation pass
#[derive(Debug, Clone, PartialEq)]
pub struct TriangulationReport {
    pub dimensions: ImageDimensions,
    /// Number of pairs that received a position
    pub triangulated: usize,
    /// Pairs whose position came out infinite or NaN (zero disparity)
    pub non_finite: Vec<PointId>,
}

impl TriangulationReport {
    /// True when every pair received a finite position
    pub fn is_clean(&self) -> bool {
        self.non_finite.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct GeometryModel {
    paths: Vec<Path>,
    open_path: Option<PathId>,
    focused_point: Option<PointId>,
    calibration: StereoCalibration,
    listeners: ListenerList,
    next_path_id: u64,
    next_point_id: u64,
}

impl GeometryModel {
    /// Create an empty model with default calibration
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_calibration(calibration: StereoCalibration) -> Self {
        Self {
            calibration,
            ..Self::default()
        }
    }

    // Listeners

    /// Register a callback run after every change to the annotations
    pub fn subscribe<L>(&mut self, listener: L) -> ListenerId
    where
        L: GeometryListener + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    fn notify_listeners(&mut self) {
        self.listeners.notify();
    }

    // Queries

    pub fn paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.iter().find(|path| path.id() == id)
    }

    /// Position of a path in the collection, which is also its export index
    pub fn path_index(&self, id: PathId) -> Option<usize> {
        self.paths.iter().position(|path| path.id() == id)
    }

    /// The path under construction, if any
    pub fn open_path(&self) -> Option<&Path> {
        self.open_path.and_then(|id| self.path(id))
    }

    pub fn open_path_id(&self) -> Option<PathId> {
        self.open_path
    }

    /// Last pair of the open path, the anchor of the rubber-band line
    pub fn open_path_tail(&self) -> Option<&PointPair> {
        self.open_path().and_then(|path| path.last())
    }

    pub fn focused_point(&self) -> Option<&PointPair> {
        self.focused_point.and_then(|id| self.point(id))
    }

    pub fn focused_point_id(&self) -> Option<PointId> {
        self.focused_point
    }

    pub fn is_focused(&self, id: PointId) -> bool {
        self.focused_point == Some(id)
    }

    pub fn point(&self, id: PointId) -> Option<&PointPair> {
        self.locate(id)
            .map(|(path, point)| &self.paths[path].points()[point])
    }

    /// `(path index, point index)` of a pair
    pub fn locate(&self, id: PointId) -> Option<(usize, usize)> {
        self.paths
            .iter()
            .enumerate()
            .find_map(|(i, path)| path.position_of(id).map(|j| (i, j)))
    }

    /// Total number of point-pairs across every path
    pub fn point_count(&self) -> usize {
        self.paths.iter().map(Path::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Every pair with the index of its path, in export order
    pub fn point_cloud(&self) -> impl Iterator<Item = (usize, &PointPair)> + '_ {
        self.paths
            .iter()
            .enumerate()
            .flat_map(|(i, path)| path.iter().map(move |pair| (i, pair)))
    }

    /// Every triangulated position with the index of its path, in export order.
    ///
    /// Fails on the first pair that has no position yet.
    pub fn triangulated_points(&self) -> Result<Vec<(usize, Point3d)>> {
        let mut points = Vec::with_capacity(self.point_count());
        for (i, path) in self.paths.iter().enumerate() {
            for (j, pair) in path.iter().enumerate() {
                let position = pair
                    .position()
                    .ok_or(Error::NotTriangulated { path: i, point: j })?;
                points.push((i, *position));
            }
        }
        Ok(points)
    }

    // Calibration

    pub fn calibration(&self) -> &StereoCalibration {
        &self.calibration
    }

    pub fn set_calibration(&mut self, calibration: StereoCalibration) {
        self.calibration = calibration;
    }

    pub fn horizontal_fov(&self) -> f64 {
        self.calibration.horizontal_fov
    }

    pub fn set_horizontal_fov(&mut self, fov: f64) {
        self.calibration.horizontal_fov = fov;
    }

    pub fn vertical_fov(&self) -> f64 {
        self.calibration.vertical_fov
    }

    pub fn set_vertical_fov(&mut self, fov: f64) {
        self.calibration.vertical_fov = fov;
    }

    pub fn separation(&self) -> f64 {
        self.calibration.separation
    }

    pub fn set_separation(&mut self, separation: f64) {
        self.calibration.separation = separation;
    }

    // Path lifecycle

    fn allocate_point_id(&mut self) -> PointId {
        let id = PointId(self.next_point_id);
        self.next_point_id += 1;
        id
    }

    fn allocate_path_id(&mut self) -> PathId {
        let id = PathId(self.next_path_id);
        self.next_path_id += 1;
        id
    }

    /// Append a point to the open path, opening a new path first if needed.
    ///
    /// The clicked location seeds both photographs; the other one is corrected
    /// later with `set_point_coordinate`.
    pub fn add_point(&mut self, x: i32, y: i32, image: ImageIndex) -> PointId {
        let index = match self.open_path.and_then(|id| self.path_index(id)) {
            Some(index) => index,
            None => {
                let path_id = self.allocate_path_id();
                self.paths.push(Path::new(path_id));
                self.open_path = Some(path_id);
                debug!("opened {}", path_id);
                self.paths.len() - 1
            }
        };

        let id = self.allocate_point_id();
        self.paths[index].push(PointPair::seeded(id, PixelPoint::new(x, y)));
        debug!("added point {} at ({}, {}) in {} image", id, x, y, image);

        self.notify_listeners();
        id
    }

    /// Append a finished path given as `[left, right]` pixel pairs
    pub fn add_path<I>(&mut self, pairs: I) -> Result<PathId>
    where
        I: IntoIterator<Item = [PixelPoint; 2]>,
    {
        if self.open_path.is_some() {
            return Err(Error::PathOpen);
        }

        let pairs: Vec<[PixelPoint; 2]> = pairs.into_iter().collect();
        if pairs.len() < Path::MIN_POINTS {
            return Err(Error::IncompletePath(pairs.len()));
        }

        let path_id = self.allocate_path_id();
        let mut path = Path::new(path_id);
        for pixels in pairs {
            let id = self.allocate_point_id();
            path.push(PointPair::new(id, pixels));
        }
        debug!("added {} with {} points", path_id, path.len());
        self.paths.push(path);

        self.notify_listeners();
        Ok(path_id)
    }

    /// Close the open path, discarding it if it has fewer than 2 points
    pub fn end_path(&mut self) -> Result<EndPathOutcome> {
        let path_id = self.open_path.take().ok_or(Error::NoOpenPath)?;

        let outcome = match self.path_index(path_id) {
            Some(index) if !self.paths[index].is_complete() => {
                let removed = self.paths.remove(index);
                if self.focused_point.is_some_and(|id| removed.contains(id)) {
                    self.focused_point = None;
                }
                debug!("discarded {} with {} points", path_id, removed.len());
                EndPathOutcome::Discarded(path_id)
            }
            _ => {
                debug!("closed {}", path_id);
                EndPathOutcome::Closed(path_id)
            }
        };

        self.notify_listeners();
        Ok(outcome)
    }

    /// Remove every path, keeping the calibration
    pub fn reset(&mut self) {
        self.paths.clear();
        self.open_path = None;
        self.focused_point = None;
        debug!("geometry reset");
        self.notify_listeners();
    }

    /// Move one photograph's pixel of an existing pair.
    ///
    /// Any previous triangulated position of the pair is dropped.
    pub fn set_point_coordinate(&mut self, id: PointId, image: ImageIndex, x: i32, y: i32) -> Result<()> {
        let (i, j) = self.locate(id).ok_or(Error::UnknownPoint(id))?;
        self.paths[i]
            .get_mut(j)
            .ok_or(Error::UnknownPoint(id))?
            .set_pixel(image, PixelPoint::new(x, y));
        trace!("moved point {} to ({}, {}) in {} image", id, x, y, image);

        self.notify_listeners();
        Ok(())
    }

    /// Drag-correct the focused pair in one photograph.
    ///
    /// Ignored while a path is being built or when nothing has focus.
    pub fn move_focused_point(&mut self, image: ImageIndex, x: i32, y: i32) -> Result<bool> {
        if self.open_path.is_some() {
            return Ok(false);
        }
        match self.focused_point {
            Some(id) => {
                self.set_point_coordinate(id, image, x, y)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // Focus

    /// Give focus to the pair nearest the pointer, if within `FOCUS_RADIUS`.
    ///
    /// Returns whether the focused pair changed.
    pub fn update_focused_point(&mut self, x: i32, y: i32, image: ImageIndex) -> bool {
        let nearest = self
            .find_nearest(&PixelPoint::new(x, y), image, FOCUS_RADIUS)
            .map(|(id, _)| id);

        if nearest == self.focused_point {
            return false;
        }

        trace!("focus {:?} -> {:?}", self.focused_point, nearest);
        self.focused_point = nearest;
        self.notify_listeners();
        true
    }

    // Triangulation

    /// Compute a 3D position for every pair from the current calibration
    pub fn triangulate(&mut self, width: u32, height: u32) -> Result<TriangulationReport> {
        let rig = StereoRig::new(self.calibration, ImageDimensions::new(width, height))?;
        Ok(self.triangulate_with(&rig))
    }

    /// Compute a 3D position for every pair with an explicit rig
    pub fn triangulate_with(&mut self, rig: &StereoRig) -> TriangulationReport {
        let mut triangulated = 0;
        let mut non_finite = Vec::new();

        for pair in self.paths.iter_mut().flat_map(|path| path.iter_mut()) {
            let position = rig.triangulate(&pair.pixel(ImageIndex::Left), &pair.pixel(ImageIndex::Right));
            if !is_finite_position(&position) {
                warn!(
                    "point {} has zero disparity and no finite position (x = {})",
                    pair.id(),
                    pair.pixel(ImageIndex::Left).x
                );
                non_finite.push(pair.id());
            }
            pair.set_position(position);
            triangulated += 1;
        }

        debug!(
            "triangulated {} points against {} image ({} non-finite)",
            triangulated,
            rig.dimensions(),
            non_finite.len()
        );

        TriangulationReport {
            dimensions: rig.dimensions(),
            triangulated,
            non_finite,
        }
    }
}

impl NearestPointSearch for GeometryModel {
    fn find_nearest(&self, query: &PixelPoint, image: ImageIndex, radius: f64) -> Option<(PointId, f64)> {
        let mut nearest: Option<(PointId, f64)> = None;
        for pair in self.paths.iter().flat_map(|path| path.iter()) {
            let distance = pixel_distance(query, &pair.pixel(image));
            if distance < radius && nearest.map_or(true, |(_, best)| distance < best) {
                nearest = Some((pair.id(), distance));
            }
        }
        nearest
    }

    fn find_radius_neighbors(&self, query: &PixelPoint, image: ImageIndex, radius: f64) -> Vec<(PointId, f64)> {
        self.paths
            .iter()
            .flat_map(|path| path.iter())
            .filter_map(|pair| {
                let distance = pixel_distance(query, &pair.pixel(image));
                if distance < radius {
                    Some((pair.id(), distance))
                } else {
                    None
                }
            })
            .collect()
    }
}
