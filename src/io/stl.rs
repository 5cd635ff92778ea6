//! STL (stereolithography) format support.
//!
//! STL only stores triangles. Saving fans every face into triangles; loading
//! welds the triangle soup back into shared vertices, but does not rebuild the
//! original polygons.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::geometry::triangle_normal;
use crate::mesh::Mesh;

/// Load a mesh from an STL file.
///
/// Automatically detects binary vs ASCII format. Triangles that collapse to
/// an edge or a point after welding are dropped.
///
/// # Example
///
/// ```no_run
/// use massing::io::stl;
///
/// let mesh = stl::load("print.stl").unwrap();
/// assert!(mesh.is_triangle_mesh());
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let stl = stl_io::read_stl(&mut file).map_err(|e| MeshError::LoadError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let vertices: Vec<Point3<f64>> = stl
        .vertices
        .iter()
        .map(|v| Point3::new(v[0] as f64, v[1] as f64, v[2] as f64))
        .collect();
    let faces: Vec<Vec<usize>> = stl.faces.iter().map(|tri| tri.vertices.to_vec()).collect();

    let mut mesh = super::build_mesh(path, vertices, None, faces)?;
    mesh.weld_vertices();

    let before = mesh.num_faces();
    let welded = mesh.copy_sub_mesh(|_, face| {
        face[0] != face[1] && face[1] != face[2] && face[0] != face[2]
    });
    if welded.num_faces() < before {
        log::warn!(
            "{}: dropped {} degenerate triangles",
            path.display(),
            before - welded.num_faces()
        );
    }
    if welded.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    Ok(welded)
}

/// Save a mesh to a binary STL file.
///
/// Each face `[v0, v1, ..., vn]` is written as the fan `[v0, vi, vi+1]`.
/// Faces with fewer than three vertices are skipped.
///
/// # Example
///
/// ```no_run
/// use massing::io::stl;
/// use massing::mesh::primitives::create_box;
///
/// let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
/// stl::save(&block, "block.stl").unwrap();
/// ```
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    if mesh.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    let vertex = |p: &Point3<f64>| stl_io::Vertex::new([p.x as f32, p.y as f32, p.z as f32]);

    let mut triangles: Vec<stl_io::Triangle> = Vec::new();
    for face in mesh.faces() {
        if face.len() < 3 {
            continue;
        }
        let p0 = mesh.position(face[0]);
        for i in 1..face.len().saturating_sub(1) {
            let p1 = mesh.position(face[i]);
            let p2 = mesh.position(face[i + 1]);
            let n = triangle_normal(p0, p1, p2);
            triangles.push(stl_io::Triangle {
                normal: stl_io::Normal::new([n.x as f32, n.y as f32, n.z as f32]),
                vertices: [vertex(p0), vertex(p1), vertex(p2)],
            });
        }
    }

    stl_io::write_stl(&mut writer, triangles.iter()).map_err(|e| MeshError::SaveError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}
