//! Triangulate a saved annotation session and export the point cloud
//!
//! ```text
//! triangulate_session session.json --width 4000 --height 3000 -o geometry.txt
//! ```
//!
//! The output format follows the extension: `.txt`, `.xyz`, `.csv` or `.ply`.

use anyhow::{bail, Context};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;

use photodist_core::{ImageDimensions, StereoCalibration};
use photodist_io::{write_geometry, Session};

#[derive(Parser, Debug)]
#[command(name = "triangulate_session", about = "Triangulate a photodist session")]
struct Args {
    /// Session file written by `Session::save`
    session: PathBuf,

    /// Width of the left photograph in pixels
    #[arg(long)]
    width: u32,

    /// Height of the left photograph in pixels
    #[arg(long)]
    height: u32,

    /// Width of the right photograph, if it differs from the left
    #[arg(long)]
    right_width: Option<u32>,

    /// Height of the right photograph, if it differs from the left
    #[arg(long)]
    right_height: Option<u32>,

    /// Override the session's horizontal field of view (degrees)
    #[arg(long)]
    hfov: Option<f64>,

    /// Override the session's vertical field of view (degrees)
    #[arg(long)]
    vfov: Option<f64>,

    /// Override the session's camera separation
    #[arg(long)]
    separation: Option<f64>,

    /// Output file
    #[arg(short, long, default_value = "geometry.txt")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let session = Session::load(&args.session)
        .with_context(|| format!("reading session {}", args.session.display()))?;
    let mut model = session.into_model()?;

    let current = *model.calibration();
    let calibration = StereoCalibration::new(
        args.hfov.unwrap_or(current.horizontal_fov),
        args.vfov.unwrap_or(current.vertical_fov),
        args.separation.unwrap_or(current.separation),
    )?;
    model.set_calibration(calibration);

    let left = ImageDimensions::new(args.width, args.height);
    let right = ImageDimensions::new(
        args.right_width.unwrap_or(args.width),
        args.right_height.unwrap_or(args.height),
    );
    let dimensions = ImageDimensions::common(left, right)?;

    if model.is_empty() {
        bail!("session {} has no complete paths", args.session.display());
    }

    let report = model.triangulate(dimensions.width, dimensions.height)?;
    for id in &report.non_finite {
        warn!("point {} could not be placed (zero disparity)", id);
    }

    write_geometry(&model, &args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    info!(
        "wrote {} points from {} paths to {}",
        report.triangulated,
        model.paths().len(),
        args.output.display()
    );

    Ok(())
}
