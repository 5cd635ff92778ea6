//! Shell offset of whole meshes.
//!
//! [`offset_mesh`] turns a surface into a solid slab: every vertex is copied
//! along its vertex normal, the copy gets the faces in reverse, and open
//! borders are closed with quads.
//!
//! # Example
//!
//! ```
//! use massing::algo::offset::{offset_mesh, OffsetOptions};
//! use massing::mesh::Mesh;
//! use nalgebra::Point3;
//!
//! let mut plate = Mesh::new();
//! plate.add_face_from_points(
//!     &[
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(4.0, 0.0, 0.0),
//!         Point3::new(4.0, 4.0, 0.0),
//!         Point3::new(0.0, 4.0, 0.0),
//!     ],
//!     Default::default(),
//! );
//!
//! let slab = offset_mesh(&plate, &OffsetOptions::new(0.3)).unwrap();
//! assert_eq!(slab.num_faces(), 6);
//! assert_eq!(slab.build_topology().boundary_edges().count(), 0);
//! ```

use nalgebra::Vector3;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

/// Options for [`offset_mesh`].
#[derive(Debug, Clone)]
pub struct OffsetOptions {
    /// Distance along the vertex normals.
    pub distance: f64,

    /// Weld the input and close open borders with quads (default: true).
    pub close_borders: bool,

    /// Offset in the XY plane only, keeping every z coordinate (default: false).
    pub constrain_z: bool,
}

impl Default for OffsetOptions {
    fn default() -> Self {
        Self {
            distance: 1.0,
            close_borders: true,
            constrain_z: false,
        }
    }
}

impl OffsetOptions {
    /// Create options with the specified distance.
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }

    /// Set whether to close open borders.
    pub fn with_close_borders(mut self, close_borders: bool) -> Self {
        self.close_borders = close_borders;
        self
    }

    /// Set whether to keep the offset horizontal.
    pub fn with_constrain_z(mut self, constrain_z: bool) -> Self {
        self.constrain_z = constrain_z;
        self
    }
}

/// Offset a mesh into a closed shell.
///
/// # Arguments
///
/// * `mesh` - The surface to offset
/// * `options` - Offset parameters
///
/// # Algorithm
///
/// 1. Weld the vertices when closing borders, so neighboring faces share edges
/// 2. Compute vertex normals, flattened to XY when `constrain_z` is set
/// 3. Add `v + n * distance` for every vertex `v`
/// 4. Add every face again on the new vertices, in reverse order
/// 5. For each boundary edge of the input, add a quad joining it to its copy
/// 6. Reverse every face
///
/// The input faces come first in the result, followed by their offset copies
/// and then the border quads. With the input winding counter-clockwise seen
/// from outside, a positive distance grows the shell outward and the result
/// faces away from the enclosed slab.
///
/// # Errors
///
/// Returns [`MeshError::InvalidParameter`] if `distance` is not finite.
pub fn offset_mesh(mesh: &Mesh, options: &OffsetOptions) -> Result<Mesh> {
    if !options.distance.is_finite() {
        return Err(MeshError::invalid_param(
            "distance",
            options.distance,
            "must be finite",
        ));
    }

    let mut result = mesh.clone();
    if options.close_borders {
        result.weld_vertices();
    }

    let num_vertices = result.num_vertices();
    let num_faces = result.num_faces();

    let mut normals = result.vertex_normals();
    if options.constrain_z {
        for n in &mut normals {
            *n = Vector3::new(n.x, n.y, 0.0).normalize();
        }
    }

    for (v, n) in normals.iter().enumerate() {
        let p = result.position(v) + n * options.distance;
        result.add_vertex(p);
    }

    for f in 0..num_faces {
        let shifted: Vec<usize> = result
            .face(f)
            .iter()
            .rev()
            .map(|&v| v + num_vertices)
            .collect();
        result.add_face(shifted);
    }

    if options.close_borders {
        // Border edges of the input, before the copies were added
        let input = Mesh::from_parts(
            result.vertices()[..num_vertices].to_vec(),
            result.faces()[..num_faces].to_vec(),
        );
        let topology = input.build_topology();
        let mut closed = 0;
        for e in topology.boundary_edges() {
            let (a, b) = topology.edge(e).vertices();
            result.add_quad(a + num_vertices, b + num_vertices, b, a);
            closed += 1;
        }
        log::debug!("offset_mesh: closed {} border edges", closed);
    }

    result.flip_faces();
    log::debug!(
        "offset_mesh: {} faces -> {} faces",
        mesh.num_faces(),
        result.num_faces()
    );
    Ok(result)
}
