//! Wavefront OBJ format support.
//!
//! Faces keep their degree in both directions: quads load as quads and every
//! face is written as one `f` line. Vertex colors are read when the file has
//! them (`v x y z r g b`) but are not written.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{Color, Mesh};

/// Load a mesh from an OBJ file.
///
/// All objects and groups in the file are merged into one mesh.
///
/// # Example
///
/// ```no_run
/// use massing::io::obj;
///
/// let mesh = obj::load("site.obj").unwrap();
/// println!("{} faces", mesh.num_faces());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let options = tobj::LoadOptions {
        single_index: true,
        triangulate: false,
        ..Default::default()
    };
    let (models, _materials) = tobj::load_obj(path, &options).map_err(|e| MeshError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut colors: Vec<Color> = Vec::new();
    let mut faces: Vec<Vec<usize>> = Vec::new();
    let mut has_colors = true;

    for model in &models {
        let m = &model.mesh;
        let offset = vertices.len();

        vertices.extend(
            m.positions
                .chunks_exact(3)
                .map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
        );
        if m.vertex_color.len() == m.positions.len() {
            colors.extend(
                m.vertex_color
                    .chunks_exact(3)
                    .map(|c| Color::rgb(c[0] as f32, c[1] as f32, c[2] as f32)),
            );
        } else {
            has_colors = false;
        }

        // Empty arities mean the model is all triangles
        let mut start = 0;
        let mut push_face = |n: usize| {
            let face = m.indices[start..start + n]
                .iter()
                .map(|&i| i as usize + offset)
                .collect();
            faces.push(face);
            start += n;
        };
        if m.face_arities.is_empty() {
            for _ in 0..m.indices.len() / 3 {
                push_face(3);
            }
        } else {
            for &n in &m.face_arities {
                push_face(n as usize);
            }
        }
    }

    let colors = if has_colors && !models.is_empty() {
        Some(colors)
    } else {
        None
    };
    super::build_mesh(path, vertices, colors, faces)
}

/// Save a mesh to an OBJ file.
///
/// Writes one `v` line per vertex and one 1-based `f` line per face.
///
/// # Example
///
/// ```no_run
/// use massing::io::obj;
/// use massing::mesh::primitives::create_box;
///
/// let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
/// obj::save(&block, "block.obj").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Generated by massing")?;
    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for face in mesh.faces() {
        write!(writer, "f")?;
        for &v in face {
            write!(writer, " {}", v + 1)?;
        }
        writeln!(writer)?;
    }

    writer.flush()?;
    Ok(())
}
