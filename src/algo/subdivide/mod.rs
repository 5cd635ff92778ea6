//! Mesh subdivision algorithms.
//!
//! This module provides the face-level subdivisions used to carve massing
//! models out of boxes, and the whole-mesh smoothing schemes.
//!
//! # Face Subdivision
//!
//! The functions in [`face`] take the positions of a single face and return
//! the faces that replace it, as lists of positions. [`MeshSubdivider`] maps
//! one of them over every face of a mesh and collects the pieces, in face
//! order, into a new mesh.
//!
//! # Catmull-Clark Subdivision
//!
//! Catmull-Clark subdivision (Catmull & Clark, 1978) is an approximating
//! subdivision scheme for polygon meshes. Each iteration:
//!
//! 1. Creates a face point at each face centroid
//! 2. Creates edge points as average of edge endpoints and adjacent face points
//! 3. Updates original vertices using weighted average of neighbors
//! 4. Connects to form one quad per face corner
//!
//! [`flat_subdivide`] builds the same quads without moving any vertex, and
//! [`split_relative`] cuts quads in two at random fractions.
//!
//! # Example
//!
//! ```
//! use massing::algo::subdivide::{catmull_clark, CatmullClarkOptions, MeshSubdivider};
//! use massing::mesh::primitives::create_box;
//!
//! let block = create_box(0.0, 0.0, 0.0, 10.0, 10.0, 4.0);
//!
//! let tower = MeshSubdivider::default().extrude(&block, 6.0, true).unwrap();
//! let smooth = catmull_clark(&tower, &CatmullClarkOptions::new(2)).unwrap();
//! assert_eq!(smooth.num_faces(), tower.num_faces() * 4 * 4);
//! ```
//!
//! # References
//!
//! - Catmull, E. & Clark, J. (1978). "Recursively generated B-spline surfaces
//!   on arbitrary topological meshes." Computer-Aided Design, 10(6), 350-355.

mod catmull_clark;
pub mod face;
mod flat;
mod mesh;
mod split;

use rayon::prelude::*;

pub use catmull_clark::{catmull_clark, catmull_clark_with_progress, CatmullClarkOptions, Extrusion};
pub use face::SplitDirection;
pub use flat::flat_subdivide;
pub use mesh::{FaceParam, MeshSubdivider, SubdivideOptions};
pub use split::split_relative;

/// Evaluate `f` for every index in `0..n`, in index order.
pub(crate) fn map_indices<T, F>(n: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if parallel {
        (0..n).into_par_iter().map(f).collect()
    } else {
        (0..n).map(f).collect()
    }
}
