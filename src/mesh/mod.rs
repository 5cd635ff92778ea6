//! Core mesh data structures.
//!
//! This module provides the index-based polygon mesh and the adjacency index
//! derived from it.
//!
//! # Overview
//!
//! The primary type is [`Mesh`]: a vertex buffer, a parallel per-vertex
//! [`Color`] buffer, and faces stored as ordered lists of vertex indices.
//! Faces may have any degree and wind counter-clockwise when seen from the
//! side their normal points to.
//!
//! Connectivity is not maintained by the mesh. Operations that need it build a
//! [`Topology`] snapshot, which lists every undirected [`Edge`] with the one or
//! two faces on it.
//!
//! # Construction
//!
//! ```
//! use massing::mesh::Mesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = Mesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(1.0, 1.0, 0.0));
//! let d = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//! mesh.add_quad(a, b, c, d);
//!
//! let topology = mesh.build_topology();
//! assert_eq!(topology.num_edges(), 4);
//! assert_eq!(topology.boundary_edges().count(), 4);
//! ```

mod color;
pub mod geometry;
mod polymesh;
pub mod primitives;
mod select;
mod topology;

pub use color::Color;
pub use polymesh::Mesh;
pub use topology::{Edge, Topology};
