//! Flat subdivision.

use crate::mesh::Mesh;

use super::catmull_clark::refined_mesh;

/// Split every n-gon into n quads without moving anything.
///
/// Uses the same vertex layout and face order as
/// [`catmull_clark`](super::catmull_clark): face centers, then edge midpoints
/// in topology order, then the original vertices unchanged. The result covers
/// exactly the input surface.
pub fn flat_subdivide(mesh: &Mesh) -> Mesh {
    let topology = mesh.build_topology();

    let face_points = mesh.face_centers();
    let edge_points = topology
        .edges()
        .iter()
        .map(|edge| nalgebra::center(mesh.position(edge.v1), mesh.position(edge.v2)))
        .collect();
    let vertex_points = mesh.vertices().to_vec();

    let result = refined_mesh(mesh, &topology, face_points, edge_points, vertex_points);
    log::debug!(
        "flat_subdivide: {} faces -> {} faces",
        mesh.num_faces(),
        result.num_faces()
    );
    result
}
