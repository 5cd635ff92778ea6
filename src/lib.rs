//! # Massing
//!
//! An index-based polygon mesh kernel for procedural architectural massing.
//!
//! Massing models are built by repeatedly replacing faces: a box becomes a
//! grid of floors, each floor panel is framed, extruded or split, roofs are
//! raised on top, and the result can be smoothed with Catmull-Clark
//! subdivision.
//!
//! ## Features
//!
//! - **Polygon meshes**: faces of any degree over a shared vertex buffer, with
//!   per-vertex colors
//! - **Topology on demand**: an edge index with face adjacency, built from the
//!   face lists when needed
//! - **Face subdivision**: grids, linear splits, extrusions, offsets, frames and
//!   roofs, with optional parallel execution
//! - **Catmull-Clark**: smoothing subdivision with face-point extrusion
//! - **File formats**: OBJ, PLY, STL
//!
//! ## Quick Start
//!
//! ```no_run
//! use massing::prelude::*;
//!
//! // Load a site footprint
//! let site = massing::io::load("site.obj").unwrap();
//!
//! // Extrude it into a block and cut the walls into floors
//! let subdivider = MeshSubdivider::default();
//! let block = subdivider.extrude(&site, 12.0, true).unwrap();
//! let floors = subdivider.grid(&block, 1, 4).unwrap();
//!
//! // Save the mesh
//! massing::io::save(&floors, "block.ply").unwrap();
//! ```
//!
//! ## Building Meshes Programmatically
//!
//! ```
//! use massing::prelude::*;
//! use nalgebra::Point3;
//!
//! let mut mesh = Mesh::new();
//! mesh.add_face_from_points(
//!     &[
//!         Point3::new(0.0, 0.0, 0.0),
//!         Point3::new(10.0, 0.0, 0.0),
//!         Point3::new(10.0, 6.0, 0.0),
//!         Point3::new(0.0, 6.0, 0.0),
//!     ],
//!     Color::WHITE,
//! );
//!
//! let roofed = MeshSubdivider::default().roof(&mesh, 3.0, 0.25).unwrap();
//! assert_eq!(roofed.num_faces(), 4);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use massing::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::subdivide::{
        catmull_clark, flat_subdivide, CatmullClarkOptions, Extrusion, FaceParam,
        MeshSubdivider, SubdivideOptions,
    };
    pub use crate::algo::Progress;
    pub use crate::error::{MeshError, Result};
    pub use crate::mesh::primitives::create_box;
    pub use crate::mesh::{Color, Edge, Mesh, Topology};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
