//! Mesh file I/O.
//!
//! This module provides functions for loading and saving meshes in various formats.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save | Notes |
//! |--------|-----------|------|------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | Polygon faces preserved |
//! | PLY | `.ply` | ✓ | ✓ | Saved as ASCII with vertex colors |
//! | STL | `.stl` | ✓ | ✓ | Saved triangulated, loaded welded |
//!
//! # Usage
//!
//! The easiest way to load and save meshes is using the automatic format detection:
//!
//! ```no_run
//! use massing::io::{load, save};
//!
//! // Load with automatic format detection
//! let mesh = load("site.obj").unwrap();
//!
//! // Save with automatic format detection
//! save(&mesh, "site.ply").unwrap();
//! ```
//!
//! You can also use format-specific functions:
//!
//! ```no_run
//! use massing::io::obj;
//!
//! let mesh = obj::load("site.obj").unwrap();
//! obj::save(&mesh, "copy.obj").unwrap();
//! ```

pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::{Color, Mesh};

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Mesh> {
    let path = path.as_ref();
    let mesh = match detect(path)? {
        Format::Obj => obj::load(path)?,
        Format::Stl => stl::load(path)?,
        Format::Ply => ply::load(path)?,
    };
    log::debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Save a mesh to a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn save<P: AsRef<Path>>(mesh: &Mesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::save(mesh, path),
        Format::Stl => stl::save(mesh, path),
        Format::Ply => ply::save(mesh, path),
    }
}

/// Assemble a loaded mesh, rejecting out-of-range indices and empty files.
fn build_mesh(
    path: &Path,
    vertices: Vec<Point3<f64>>,
    colors: Option<Vec<Color>>,
    faces: Vec<Vec<usize>>,
) -> Result<Mesh> {
    if faces.is_empty() {
        return Err(MeshError::EmptyMesh);
    }
    let num_vertices = vertices.len();
    if let Some(&bad) = faces.iter().flatten().find(|&&v| v >= num_vertices) {
        return Err(MeshError::LoadError {
            path: path.to_path_buf(),
            message: format!(
                "vertex index {} out of range ({} vertices)",
                bad, num_vertices
            ),
        });
    }

    let mut mesh = Mesh::from_parts(vertices, faces);
    if let Some(colors) = colors {
        mesh.set_colors(colors)?;
    }
    Ok(mesh)
}
