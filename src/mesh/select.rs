//! Sub-mesh extraction.
//!
//! Every selection returns a new, compact [`Mesh`]: the chosen faces keep their
//! winding and vertex colors, unreferenced vertices are dropped and indices are
//! renumbered. Selections that take an `invert` flag return the complement
//! instead.

use crate::error::{MeshError, Result};

use super::polymesh::Mesh;

impl Mesh {
    /// Copy the faces for which `keep(face_index, face)` returns true.
    pub fn copy_sub_mesh<F>(&self, mut keep: F) -> Mesh
    where
        F: FnMut(usize, &[usize]) -> bool,
    {
        let mut sub = self.copy_vertices();
        for (f, face) in self.faces().iter().enumerate() {
            if keep(f, face) {
                sub.add_face(face.clone());
            }
        }
        sub.remove_unused_vertices();
        sub
    }

    /// Copy the listed faces, in list order. Repeated indices repeat faces.
    pub fn copy_sub_mesh_by_indices(&self, indices: &[usize]) -> Mesh {
        let mut sub = self.copy_vertices();
        for &f in indices {
            sub.add_face(self.face(f).to_vec());
        }
        sub.remove_unused_vertices();
        sub
    }

    /// Copy every face except the listed ones, in mesh order.
    pub fn copy_sub_mesh_excluding(&self, indices: &[usize]) -> Mesh {
        let mut keep = vec![true; self.num_faces()];
        for &f in indices {
            keep[f] = false;
        }
        self.copy_sub_mesh(|f, _| keep[f])
    }

    /// Copy the faces whose mask entry is true. The mask needs one entry per
    /// face.
    pub fn copy_sub_mesh_by_mask(&self, mask: &[bool]) -> Result<Mesh> {
        MeshError::check_count("mask", self.num_faces(), mask.len())?;
        Ok(self.copy_sub_mesh(|f, _| mask[f]))
    }

    /// Split into `(faces where mask is true, faces where mask is false)`.
    pub fn split_by_mask(&self, mask: &[bool]) -> Result<(Mesh, Mesh)> {
        MeshError::check_count("mask", self.num_faces(), mask.len())?;
        Ok((
            self.copy_sub_mesh(|f, _| mask[f]),
            self.copy_sub_mesh(|f, _| !mask[f]),
        ))
    }

    /// Copy faces whose index satisfies `index % modulo == remainder`.
    pub fn copy_sub_mesh_by_modulo(&self, remainder: usize, modulo: usize, invert: bool) -> Mesh {
        self.copy_sub_mesh(|f, _| (f % modulo == remainder) != invert)
    }

    /// Copy faces whose edge `edge` has a length in `[min, max]`.
    pub fn copy_sub_mesh_by_edge_length(
        &self,
        min: f64,
        max: f64,
        edge: usize,
        invert: bool,
    ) -> Mesh {
        self.copy_sub_mesh(|f, _| {
            let length = self.face_edge_length(f, edge);
            (length >= min && length <= max) != invert
        })
    }

    /// Copy faces lying entirely inside the box from `min` to `max`.
    pub fn copy_sub_mesh_by_bounding_box(
        &self,
        min: [f64; 3],
        max: [f64; 3],
        invert: bool,
    ) -> Mesh {
        self.copy_sub_mesh(|f, _| {
            let (lo, hi) = self.face_bounding_box(f);
            let inside = (0..3).all(|i| lo[i] >= min[i] && hi[i] <= max[i]);
            inside != invert
        })
    }

    /// Copy faces whose bounding box extent along each axis `i` lies in
    /// `[min[i], max[i]]`.
    pub fn copy_sub_mesh_by_dimension(
        &self,
        min: [f64; 3],
        max: [f64; 3],
        invert: bool,
    ) -> Mesh {
        self.copy_sub_mesh(|f, _| {
            let (lo, hi) = self.face_bounding_box(f);
            let size = hi - lo;
            let fits = (0..3).all(|i| size[i] >= min[i] && size[i] <= max[i]);
            fits != invert
        })
    }

    /// Copy faces with an area in `[min, max]`.
    pub fn copy_sub_mesh_by_area(&self, min: f64, max: f64, invert: bool) -> Mesh {
        self.copy_sub_mesh(|f, _| {
            let area = self.face_area(f);
            (area >= min && area <= max) != invert
        })
    }

    /// Copy faces whose normal component along `axis` (0 = x, 1 = y, 2 = z)
    /// lies in `[min, max]`, optionally comparing its absolute value.
    ///
    /// `copy_sub_mesh_by_normal(2, 0.9, 1.0, false, false)` picks up-facing
    /// faces such as roofs; `(2, -0.1, 0.1, false, false)` picks walls.
    pub fn copy_sub_mesh_by_normal(
        &self,
        axis: usize,
        min: f64,
        max: f64,
        abs: bool,
        invert: bool,
    ) -> Mesh {
        self.copy_sub_mesh(|f, _| {
            let mut c = self.face_normal(f)[axis];
            if abs {
                c = c.abs();
            }
            (c >= min && c <= max) != invert
        })
    }

    /// Copy faces with exactly `degree` vertices.
    pub fn copy_sub_mesh_by_degree(&self, degree: usize) -> Mesh {
        self.copy_sub_mesh(|_, face| face.len() == degree)
    }
}
