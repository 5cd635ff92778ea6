//! Box primitive.

use nalgebra::Point3;

use super::color::Color;
use super::polymesh::Mesh;

/// Create an axis-aligned box spanning two corners, with outward quads.
///
/// ```
/// use massing::mesh::primitives::create_box;
///
/// let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
/// assert_eq!(block.num_faces(), 6);
/// assert_eq!(block.num_vertices(), 8);
/// ```
pub fn create_box(x1: f64, y1: f64, z1: f64, x2: f64, y2: f64, z2: f64) -> Mesh {
    let mut mesh = Mesh::new();
    add_box(&mut mesh, [x1, y1, z1], [x2, y2, z2], Color::WHITE);
    mesh
}

/// Append a box with eight new vertices of `color` to `mesh`.
///
/// Vertices 0..4 run around the `min.z` ring starting at `min`, turning
/// towards `max.y` first; vertices 4..8 repeat the ring at `max.z`.
pub fn add_box(mesh: &mut Mesh, min: [f64; 3], max: [f64; 3], color: Color) {
    let [x1, y1, z1] = min;
    let [x2, y2, z2] = max;
    let corners = [
        Point3::new(x1, y1, z1),
        Point3::new(x1, y2, z1),
        Point3::new(x2, y2, z1),
        Point3::new(x2, y1, z1),
        Point3::new(x1, y1, z2),
        Point3::new(x1, y2, z2),
        Point3::new(x2, y2, z2),
        Point3::new(x2, y1, z2),
    ];
    let v: Vec<usize> = corners
        .iter()
        .map(|&p| mesh.add_vertex_with_color(p, color))
        .collect();

    mesh.add_quad(v[0], v[1], v[2], v[3]);
    mesh.add_quad(v[7], v[6], v[5], v[4]);
    for i0 in 0..4 {
        let i1 = (i0 + 1) % 4;
        mesh.add_quad(v[i0 + 4], v[i1 + 4], v[i1], v[i0]);
    }
}
