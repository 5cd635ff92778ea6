//! Per-face analysis.
//!
//! Each function returns one value per face, in face order, ready to be
//! thresholded into a mask for [`Mesh::copy_sub_mesh_by_mask`] or visualized
//! with [`color_by_values`].
//!
//! ```
//! use massing::algo::analysis::{face_areas, face_mask};
//! use massing::mesh::primitives::create_box;
//!
//! let block = create_box(0.0, 0.0, 0.0, 4.0, 2.0, 1.0);
//! let large = face_mask(&face_areas(&block), |&a| a > 5.0);
//! let (tops, rest) = block.split_by_mask(&large).unwrap();
//! assert_eq!(tops.num_faces(), 2);
//! assert_eq!(rest.num_faces(), 4);
//! ```

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::mesh::{Color, Mesh};

/// Hue of the largest value; the smallest is red at hue 0.
const MAX_HUE: f64 = 0.8;

/// Area of every face.
pub fn face_areas(mesh: &Mesh) -> Vec<f64> {
    (0..mesh.num_faces()).map(|f| mesh.face_area(f)).collect()
}

/// Compactness of every face.
pub fn face_compactness(mesh: &Mesh) -> Vec<f64> {
    (0..mesh.num_faces()).map(|f| mesh.face_compactness(f)).collect()
}

/// Perimeter of every face.
pub fn face_perimeters(mesh: &Mesh) -> Vec<f64> {
    (0..mesh.num_faces()).map(|f| mesh.face_perimeter(f)).collect()
}

/// Center of every face.
pub fn face_centers(mesh: &Mesh) -> Vec<Point3<f64>> {
    mesh.face_centers()
}

/// Unit normal of every face.
pub fn face_normals(mesh: &Mesh) -> Vec<Vector3<f64>> {
    mesh.face_normals()
}

/// `0, 1, ..., num_faces - 1`.
pub fn face_indices(mesh: &Mesh) -> Vec<usize> {
    (0..mesh.num_faces()).collect()
}

/// True for faces whose index satisfies `index % modulo == remainder`.
///
/// # Panics
///
/// Panics if `modulo` is zero.
pub fn face_modulo(mesh: &Mesh, modulo: usize, remainder: usize) -> Vec<bool> {
    (0..mesh.num_faces()).map(|f| f % modulo == remainder).collect()
}

/// Map per-face values to a mask.
pub fn face_mask<T, P>(values: &[T], predicate: P) -> Vec<bool>
where
    P: Fn(&T) -> bool,
{
    values.iter().map(predicate).collect()
}

/// Paint each face by its value.
///
/// Values are normalized from their minimum to their maximum and mapped onto
/// hue, from red for the smallest to purple for the largest, or onto black to
/// white when `grayscale` is set. If all values are equal, every face gets the
/// color of the smallest. Vertices shared between faces end up with the color
/// of the last face painted.
///
/// # Errors
///
/// Returns [`MeshError::ArgumentCountMismatch`] unless there is one value per
/// face.
pub fn color_by_values(mesh: &mut Mesh, values: &[f64], grayscale: bool) -> Result<()> {
    MeshError::check_count("values", mesh.num_faces(), values.len())?;

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    for (f, &value) in values.iter().enumerate() {
        let t = if range > 0.0 { (value - min) / range } else { 0.0 };
        let color = if grayscale {
            let g = t as f32;
            Color::rgb(g, g, g)
        } else {
            Color::from_hsv((t * MAX_HUE) as f32, 1.0, 1.0)
        };
        mesh.set_face_color(f, color);
    }
    Ok(())
}
