//! The plain-text `x y z path` geometry format
//!
//! One header line, then one line per point-pair in path order then point
//! order: its triangulated depth, lateral and vertical coordinates followed by
//! the 0-based index of its path.

use std::io::Write;

use photodist_core::{GeometryModel, Result};

use crate::format::format_general;
use crate::GeometryWriter;

/// Header line naming the four columns
pub const GEOMETRY_HEADER: &str = "x y z path";

pub struct GeometryTextWriter;

impl GeometryTextWriter {
    /// Render the whole export into a string
    pub fn to_string(model: &GeometryModel) -> Result<String> {
        let mut buffer = Vec::new();
        Self::write_geometry(model, &mut buffer)?;
        String::from_utf8(buffer)
            .map_err(|e| photodist_core::Error::InvalidData(e.to_string()))
    }
}

impl GeometryWriter for GeometryTextWriter {
    fn write_geometry<W: Write>(model: &GeometryModel, mut writer: W) -> Result<()> {
        // Collect first so nothing is written for an untriangulated model
        let points = model.triangulated_points()?;

        writeln!(writer, "{}", GEOMETRY_HEADER)?;
        for (path, position) in points {
            writeln!(
                writer,
                "{} {} {} {}",
                format_general(position.x),
                format_general(position.y),
                format_general(position.z),
                path
            )?;
        }

        writer.flush()?;
        Ok(())
    }
}
