//! Mesh processing algorithms.
//!
//! This module contains the operations used to grow massing models out of
//! simple meshes:
//!
//! - **Subdivision**: per-face grids, splits, extrusions, frames and roofs,
//!   plus Catmull-Clark and flat subdivision of whole meshes
//! - **Offset**: thickening a surface into a closed shell
//! - **Analysis**: per-face values, masks and false-color visualization

pub mod analysis;
pub mod offset;
mod progress;
pub mod subdivide;

pub use progress::Progress;
