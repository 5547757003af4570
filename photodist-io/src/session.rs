//! JSON snapshots of an annotation session
//!
//! A session stores the calibration and every closed path as left/right pixel
//! pairs. Triangulated positions are derived data and are not stored; the
//! path under construction is not stored either.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};

use photodist_core::{GeometryModel, ImageIndex, PixelPoint, Result, StereoCalibration};

use crate::IoError;

/// Current on-disk session layout
pub const SESSION_VERSION: u32 = 1;

/// Pixel locations of one point-pair as `[x, y]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionPair {
    pub left: [i32; 2],
    pub right: [i32; 2],
}

impl SessionPair {
    fn pixels(&self) -> [PixelPoint; 2] {
        [
            PixelPoint::new(self.left[0], self.left[1]),
            PixelPoint::new(self.right[0], self.right[1]),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    pub calibration: StereoCalibration,
    pub paths: Vec<Vec<SessionPair>>,
}

impl Session {
    /// Snapshot the closed paths and calibration of a model
    pub fn from_model(model: &GeometryModel) -> Self {
        let open = model.open_path_id();
        let paths = model
            .paths()
            .iter()
            .filter(|path| Some(path.id()) != open)
            .map(|path| {
                path.iter()
                    .map(|pair| {
                        let left = pair.pixel(ImageIndex::Left);
                        let right = pair.pixel(ImageIndex::Right);
                        SessionPair {
                            left: [left.x, left.y],
                            right: [right.x, right.y],
                        }
                    })
                    .collect()
            })
            .collect::<Vec<Vec<SessionPair>>>();

        if open.is_some() {
            debug!("session snapshot skips the open path");
        }

        Self {
            version: SESSION_VERSION,
            calibration: *model.calibration(),
            paths,
        }
    }

    /// Rebuild a model, validating the calibration and every path
    pub fn into_model(self) -> Result<GeometryModel> {
        if self.version != SESSION_VERSION {
            return Err(IoError::UnsupportedVersion {
                found: self.version,
                expected: SESSION_VERSION,
            }
            .into());
        }
        self.calibration.validate()?;

        let mut model = GeometryModel::with_calibration(self.calibration);
        for path in &self.paths {
            model.add_path(path.iter().map(SessionPair::pixels))?;
        }
        debug!("loaded session with {} paths", model.paths().len());
        Ok(model)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let session = serde_json::from_reader(reader).map_err(IoError::from)?;
        Ok(session)
    }

    pub fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, self).map_err(IoError::from)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    pub fn load<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn save<P: AsRef<std::path::Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.to_writer(BufWriter::new(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use photodist_core::Error;

    #[test]
    fn test_snapshot_skips_open_path() {
        let mut model = GeometryModel::new();
        let a = model.add_point(10, 20, ImageIndex::Left);
        model.set_point_coordinate(a, ImageIndex::Right, 35, 20).unwrap();
        model.add_point(40, 50, ImageIndex::Left);
        model.end_path().unwrap();
        model.add_point(99, 99, ImageIndex::Left);

        let session = Session::from_model(&model);
        assert_eq!(session.paths.len(), 1);
        assert_eq!(session.paths[0][0], SessionPair { left: [10, 20], right: [35, 20] });
        assert_eq!(session.calibration, StereoCalibration::default());
    }

    #[test]
    fn test_json_round_trip_rebuilds_model() {
        let mut model = GeometryModel::with_calibration(StereoCalibration::new(20.0, 12.0, 0.5).unwrap());
        model.add_point(1, 2, ImageIndex::Left);
        model.add_point(3, 4, ImageIndex::Left);
        model.end_path().unwrap();

        let mut buffer = Vec::new();
        Session::from_model(&model).to_writer(&mut buffer).unwrap();
        let restored = Session::from_reader(buffer.as_slice()).unwrap().into_model().unwrap();

        assert_eq!(restored.calibration(), model.calibration());
        assert_eq!(restored.paths().len(), 1);
        let pixels: Vec<_> = restored.paths()[0].iter().map(|p| *p.pixels()).collect();
        let original: Vec<_> = model.paths()[0].iter().map(|p| *p.pixels()).collect();
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_rejects_bad_sessions() {
        let short = r#"{"version":1,"calibration":{"horizontal_fov":15.0,"vertical_fov":15.0,"separation":0.3},
            "paths":[[{"left":[0,0],"right":[1,0]}]]}"#;
        let result = Session::from_reader(short.as_bytes()).unwrap().into_model();
        assert!(matches!(result, Err(Error::IncompletePath(1))));

        let calibration = r#"{"version":1,"calibration":{"horizontal_fov":200.0,"vertical_fov":15.0,"separation":0.3},
            "paths":[]}"#;
        let result = Session::from_reader(calibration.as_bytes()).unwrap().into_model();
        assert!(matches!(result, Err(Error::InvalidCalibration(_))));

        let version = r#"{"version":9,"calibration":{"horizontal_fov":15.0,"vertical_fov":15.0,"separation":0.3},
            "paths":[]}"#;
        let result = Session::from_reader(version.as_bytes()).unwrap().into_model();
        assert!(matches!(result, Err(Error::InvalidData(_))));

        assert!(matches!(
            Session::from_reader("not json".as_bytes()),
            Err(Error::Serialization(_))
        ));
    }
}
