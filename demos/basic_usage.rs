//! Basic usage example for photodist
//!
//! This example walks through one annotation session:
//! - Clicking points in the left photograph
//! - Correcting the matching points in the right photograph
//! - Triangulating and printing the exported geometry

use photodist_core::{GeometryModel, ImageIndex};
use photodist_io::GeometryTextWriter;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("photodist Basic Usage Example");
    println!("=============================");

    let mut model = GeometryModel::new();
    model.subscribe(|| log::info!("geometry changed"));

    // Trace the top edge of a box: clicks in the left photograph...
    let clicks = [(210, 180), (300, 170), (390, 165)];
    // ...and where the same corners appear in the right photograph
    let matches = [(262, 180), (349, 170), (436, 165)];

    for ((lx, ly), (rx, ry)) in clicks.into_iter().zip(matches) {
        let id = model.add_point(lx, ly, ImageIndex::Left);
        model.set_point_coordinate(id, ImageIndex::Right, rx, ry)?;
    }
    model.end_path()?;

    println!("\nAnnotations:");
    println!("- {} path(s), {} point-pair(s)", model.paths().len(), model.point_count());
    println!(
        "- Calibration: hFOV {} deg, vFOV {} deg, separation {}",
        model.horizontal_fov(),
        model.vertical_fov(),
        model.separation()
    );

    let report = model.triangulate(640, 480)?;
    println!("\nTriangulated {} point(s)", report.triangulated);
    if !report.is_clean() {
        println!("- {} point(s) had zero disparity", report.non_finite.len());
    }

    println!("\nExported geometry:");
    print!("{}", GeometryTextWriter::to_string(&model)?);

    Ok(())
}
