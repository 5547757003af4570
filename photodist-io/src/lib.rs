//! I/O operations for photodist geometry
//!
//! This crate writes the triangulated point cloud of a `GeometryModel` in the
//! plain `x y z path` text format, as XYZ/CSV, or as ASCII PLY, and persists
//! annotation sessions as JSON.

pub mod error;
pub mod format;
pub mod geometry_text;
pub mod ply;
pub mod session;
pub mod xyz_csv;

#[cfg(test)]
mod tests;

pub use error::*;
pub use format::format_general;
pub use geometry_text::{GeometryTextWriter, GEOMETRY_HEADER};
pub use ply::PlyWriter;
pub use session::{Session, SessionPair, SESSION_VERSION};
pub use xyz_csv::{Delimiter, XyzCsvWriteOptions, XyzCsvWriter};

use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};

use photodist_core::{Error, GeometryModel, Result};

/// Trait for writing the triangulated point cloud of a model
pub trait GeometryWriter {
    /// Write to any byte sink; fails without writing if any pair lacks a position
    fn write_geometry<W: Write>(model: &GeometryModel, writer: W) -> Result<()>;

    /// Write to a newly created file
    fn write_geometry_file<P: AsRef<std::path::Path>>(model: &GeometryModel, path: P) -> Result<()> {
        // Validate before creating the file so a failed export leaves nothing behind
        model.triangulated_points()?;
        let file = File::create(path)?;
        Self::write_geometry(model, BufWriter::new(file))
    }
}

/// Auto-detect format from the extension and write the triangulated geometry
pub fn write_geometry<P: AsRef<std::path::Path>>(model: &GeometryModel, path: P) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .map(str::to_lowercase);

    debug!("writing geometry to {}", path.display());
    match extension.as_deref() {
        Some("txt") => GeometryTextWriter::write_geometry_file(model, path),
        Some("xyz") => XyzCsvWriter::write_geometry_file(model, path),
        Some("csv") => {
            model.triangulated_points()?;
            let file = File::create(path)?;
            XyzCsvWriter::write_with_options(model, BufWriter::new(file), &XyzCsvWriteOptions::csv_with_header())
        }
        Some("ply") => PlyWriter::write_geometry_file(model, path),
        _ => Err(Error::UnsupportedFormat(format!(
            "Unsupported geometry format: {:?}",
            path.extension()
        ))),
    }
}
