//! ASCII PLY export of the triangulated point cloud

use std::io::Write;

use photodist_core::{GeometryModel, Result};
use ply_rs::{
    ply::{Addable, DefaultElement, ElementDef, Encoding, Ply, Property, PropertyDef, PropertyType, ScalarType},
    writer::Writer,
};

use crate::GeometryWriter;

pub struct PlyWriter;

impl PlyWriter {
    /// Build the in-memory PLY document: one `vertex` element per point-pair
    /// with `double x, y, z` and an `int path` property.
    pub fn build(model: &GeometryModel) -> Result<Ply<DefaultElement>> {
        let points = model.triangulated_points()?;

        let mut ply = Ply::<DefaultElement>::new();
        ply.header.encoding = Encoding::Ascii;
        ply.header.comments.push("photodist triangulated geometry".to_string());

        let mut vertex_element = ElementDef::new("vertex".to_string());
        vertex_element.count = points.len();
        for name in ["x", "y", "z"] {
            vertex_element.properties.add(PropertyDef::new(
                name.to_string(),
                PropertyType::Scalar(ScalarType::Double),
            ));
        }
        vertex_element.properties.add(PropertyDef::new(
            "path".to_string(),
            PropertyType::Scalar(ScalarType::Int),
        ));
        ply.header.elements.add(vertex_element);

        let mut vertices = Vec::with_capacity(points.len());
        for (path, position) in points {
            let path = i32::try_from(path).map_err(|_| {
                photodist_core::Error::InvalidData(format!("path index {} does not fit a PLY int", path))
            })?;
            let mut vertex = DefaultElement::new();
            vertex.insert("x".to_string(), Property::Double(position.x));
            vertex.insert("y".to_string(), Property::Double(position.y));
            vertex.insert("z".to_string(), Property::Double(position.z));
            vertex.insert("path".to_string(), Property::Int(path));
            vertices.push(vertex);
        }
        ply.payload.insert("vertex".to_string(), vertices);

        Ok(ply)
    }
}

impl GeometryWriter for PlyWriter {
    fn write_geometry<W: Write>(model: &GeometryModel, mut writer: W) -> Result<()> {
        let mut ply = Self::build(model)?;
        let writer_instance = Writer::new();
        writer_instance.write_ply(&mut writer, &mut ply)?;
        writer.flush()?;
        Ok(())
    }
}
