//! XYZ/CSV export of the triangulated point cloud
//!
//! Writes one row per point-pair with its x, y, z coordinates and, optionally,
//! the index of its path. Values use Rust's shortest round-trip formatting so
//! the files can be read back without loss.

use std::io::Write;

use photodist_core::{GeometryModel, Point3d, Result};

use crate::GeometryWriter;

/// Supported delimiters for CSV/XYZ files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Comma,
    Space,
    Tab,
    Semicolon,
}

impl Delimiter {
    /// Get the character representation of the delimiter
    pub fn as_char(&self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
            Delimiter::Tab => '\t',
            Delimiter::Semicolon => ';',
        }
    }
}

/// Write options for XYZ/CSV files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XyzCsvWriteOptions {
    pub delimiter: Delimiter,
    pub include_header: bool,
    pub include_path: bool,
}

impl XyzCsvWriteOptions {
    /// Bare `x y z` rows, space separated, no header
    pub fn xyz() -> Self {
        Self {
            delimiter: Delimiter::Space,
            include_header: false,
            include_path: false,
        }
    }

    /// `x,y,z,path` with a header line
    pub fn csv_with_header() -> Self {
        Self {
            delimiter: Delimiter::Comma,
            include_header: true,
            include_path: true,
        }
    }

    fn header(&self) -> String {
        let mut columns = vec!["x", "y", "z"];
        if self.include_path {
            columns.push("path");
        }
        columns.join(&self.delimiter.as_char().to_string())
    }

    fn row(&self, path: usize, position: &Point3d) -> String {
        let mut values = vec![
            position.x.to_string(),
            position.y.to_string(),
            position.z.to_string(),
        ];
        if self.include_path {
            values.push(path.to_string());
        }
        values.join(&self.delimiter.as_char().to_string())
    }
}

impl Default for XyzCsvWriteOptions {
    fn default() -> Self {
        Self::xyz()
    }
}

/// XYZ/CSV writer implementation
pub struct XyzCsvWriter;

impl XyzCsvWriter {
    /// Write the triangulated cloud with explicit options
    pub fn write_with_options<W: Write>(
        model: &GeometryModel,
        mut writer: W,
        options: &XyzCsvWriteOptions,
    ) -> Result<()> {
        let points = model.triangulated_points()?;

        if options.include_header {
            writeln!(writer, "{}", options.header())?;
        }
        for (path, position) in &points {
            writeln!(writer, "{}", options.row(*path, position))?;
        }

        writer.flush()?;
        Ok(())
    }
}

impl GeometryWriter for XyzCsvWriter {
    fn write_geometry<W: Write>(model: &GeometryModel, writer: W) -> Result<()> {
        Self::write_with_options(model, writer, &XyzCsvWriteOptions::default())
    }
}
