//! Index-based polygon mesh.
//!
//! A [`Mesh`] is three parallel-ish buffers: vertex positions, per-vertex
//! colors, and faces stored as ordered lists of vertex indices. There is no
//! connectivity beyond the face lists; adjacency is derived on demand with
//! [`Mesh::build_topology`].
//!
//! # Invariants
//!
//! - `colors().len() == vertices().len()` after every public operation.
//!   Vertices added without a color get [`Color::WHITE`].
//! - Face indices are not validated on insertion. Querying a face that points
//!   past the vertex buffer panics.
//! - Faces may have any degree. Subdivision operations expect triangles and
//!   quads.

use std::collections::HashMap;

use nalgebra::{Matrix4, Point3, Unit, UnitQuaternion, Vector3};

use super::color::Color;
use super::geometry;
use super::topology::Topology;
use crate::error::{MeshError, Result};

/// A polygon mesh with per-vertex colors.
///
/// Cloning produces an independent deep copy.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Point3<f64>>,
    colors: Vec<Color>,
    faces: Vec<Vec<usize>>,
}

impl Mesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from positions and faces. All vertices are white.
    pub fn from_parts(vertices: Vec<Point3<f64>>, faces: Vec<Vec<usize>>) -> Self {
        let colors = vec![Color::WHITE; vertices.len()];
        Self {
            vertices,
            colors,
            faces,
        }
    }

    // ==================== Accessors ====================

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// True if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vertex positions in index order.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Vertex colors, parallel to [`vertices`](Self::vertices).
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Faces as vertex index lists.
    #[inline]
    pub fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// The vertex indices of face `f`.
    #[inline]
    pub fn face(&self, f: usize) -> &[usize] {
        &self.faces[f]
    }

    /// Position of vertex `v`.
    #[inline]
    pub fn position(&self, v: usize) -> &Point3<f64> {
        &self.vertices[v]
    }

    /// Move vertex `v`.
    #[inline]
    pub fn set_position(&mut self, v: usize, position: Point3<f64>) {
        self.vertices[v] = position;
    }

    /// Positions of the vertices of face `f`, in face order.
    pub fn face_positions(&self, f: usize) -> Vec<Point3<f64>> {
        self.faces[f].iter().map(|&v| self.vertices[v]).collect()
    }

    /// True if every face is a triangle.
    pub fn is_triangle_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 3)
    }

    /// True if every face is a quad.
    pub fn is_quad_mesh(&self) -> bool {
        self.faces.iter().all(|f| f.len() == 4)
    }

    /// Build a fresh adjacency snapshot of the current faces.
    ///
    /// The snapshot does not track later mutation; rebuild after editing faces.
    pub fn build_topology(&self) -> Topology {
        Topology::new(self)
    }

    // ==================== Construction ====================

    /// Append a white vertex and return its index.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> usize {
        self.add_vertex_with_color(position, Color::WHITE)
    }

    /// Append a colored vertex and return its index.
    pub fn add_vertex_with_color(&mut self, position: Point3<f64>, color: Color) -> usize {
        self.vertices.push(position);
        self.colors.push(color);
        self.vertices.len() - 1
    }

    /// Append a face and return its index. Indices are not validated.
    pub fn add_face(&mut self, indices: impl Into<Vec<usize>>) -> usize {
        self.faces.push(indices.into());
        self.faces.len() - 1
    }

    /// Append a triangle by vertex index.
    pub fn add_triangle(&mut self, a: usize, b: usize, c: usize) -> usize {
        self.add_face(vec![a, b, c])
    }

    /// Append a quad by vertex index.
    pub fn add_quad(&mut self, a: usize, b: usize, c: usize, d: usize) -> usize {
        self.add_face(vec![a, b, c, d])
    }

    /// Remove face `f` and return its indices. Later faces shift down by one;
    /// vertices are kept.
    ///
    /// # Panics
    ///
    /// Panics if `f` is out of range.
    pub fn remove_face(&mut self, f: usize) -> Vec<usize> {
        self.faces.remove(f)
    }

    /// Remove the listed faces, keeping the others in order. Vertices are
    /// kept; call [`remove_unused_vertices`](Self::remove_unused_vertices) to
    /// drop the ones no longer referenced.
    pub fn remove_faces(&mut self, indices: &[usize]) {
        let mut keep = vec![true; self.faces.len()];
        for &f in indices {
            keep[f] = false;
        }
        let mut flags = keep.into_iter();
        self.faces.retain(|_| flags.next().unwrap_or(true));
    }

    /// Append a face made of new vertices at `points`, all with `color`.
    pub fn add_face_from_points(&mut self, points: &[Point3<f64>], color: Color) -> usize {
        let start = self.vertices.len();
        self.vertices.extend_from_slice(points);
        self.colors.resize(self.vertices.len(), color);
        self.add_face((start..self.vertices.len()).collect::<Vec<_>>())
    }

    /// Append several faces of new white vertices.
    pub fn add_faces_from_points<F>(&mut self, faces: &[F])
    where
        F: AsRef<[Point3<f64>]>,
    {
        for face in faces {
            self.add_face_from_points(face.as_ref(), Color::WHITE);
        }
    }

    /// Append all of `other`, shifting its face indices past our vertices.
    ///
    /// Nothing is welded: the two parts share no vertices afterwards.
    pub fn add_mesh(&mut self, other: &Mesh) {
        let offset = self.vertices.len();
        self.vertices.extend_from_slice(&other.vertices);
        self.colors.extend_from_slice(&other.colors);
        self.faces.extend(
            other
                .faces
                .iter()
                .map(|face| face.iter().map(|&v| v + offset).collect()),
        );
    }

    /// Concatenate meshes into a new one, in order.
    pub fn merge(meshes: &[Mesh]) -> Mesh {
        let mut merged = Mesh::new();
        for mesh in meshes {
            merged.add_mesh(mesh);
        }
        merged
    }

    /// A mesh with the same vertices and colors but no faces.
    pub fn copy_vertices(&self) -> Mesh {
        Mesh {
            vertices: self.vertices.clone(),
            colors: self.colors.clone(),
            faces: Vec::new(),
        }
    }

    // ==================== Cleanup ====================

    /// Merge vertices with bit-identical positions.
    ///
    /// Vertices are renumbered in the order faces first reference them, so
    /// unreferenced vertices are dropped. Colors are reset to white.
    /// `-0.0` and `0.0` count as equal.
    pub fn weld_vertices(&mut self) {
        self.weld_by_key(|p| {
            // Adding zero folds -0.0 into 0.0
            [
                (p.x + 0.0).to_bits(),
                (p.y + 0.0).to_bits(),
                (p.z + 0.0).to_bits(),
            ]
        });
    }

    /// Merge vertices whose positions round to the same cell of size
    /// `tolerance`. The first position seen in a cell is kept.
    ///
    /// Points straddling a cell boundary stay separate even when closer than
    /// `tolerance`.
    pub fn weld_vertices_with_tolerance(&mut self, tolerance: f64) -> Result<()> {
        if tolerance.is_nan() || tolerance <= 0.0 {
            return Err(MeshError::invalid_param(
                "tolerance",
                tolerance,
                "must be positive",
            ));
        }
        self.weld_by_key(|p| {
            [
                (p.x / tolerance).round() as i64 as u64,
                (p.y / tolerance).round() as i64 as u64,
                (p.z / tolerance).round() as i64 as u64,
            ]
        });
        Ok(())
    }

    fn weld_by_key<K>(&mut self, key: K)
    where
        K: Fn(&Point3<f64>) -> [u64; 3],
    {
        let mut index_of: HashMap<[u64; 3], usize> = HashMap::new();
        let mut welded: Vec<Point3<f64>> = Vec::new();

        for face in &mut self.faces {
            for v in face.iter_mut() {
                let p = self.vertices[*v];
                *v = *index_of.entry(key(&p)).or_insert_with(|| {
                    welded.push(p);
                    welded.len() - 1
                });
            }
        }

        self.colors = vec![Color::WHITE; welded.len()];
        self.vertices = welded;
    }

    /// Drop vertices no face references, renumbering in face traversal order.
    /// Colors travel with their vertices.
    pub fn remove_unused_vertices(&mut self) {
        let mut remap: Vec<Option<usize>> = vec![None; self.vertices.len()];
        let mut vertices = Vec::new();
        let mut colors = Vec::new();

        for face in &mut self.faces {
            for v in face.iter_mut() {
                let new_index = match remap[*v] {
                    Some(i) => i,
                    None => {
                        vertices.push(self.vertices[*v]);
                        colors.push(self.colors[*v]);
                        remap[*v] = Some(vertices.len() - 1);
                        vertices.len() - 1
                    }
                };
                *v = new_index;
            }
        }

        self.vertices = vertices;
        self.colors = colors;
    }

    // ==================== Face Rewriting ====================

    /// Reverse the winding of every face.
    pub fn flip_faces(&mut self) {
        for face in &mut self.faces {
            face.reverse();
        }
    }

    /// Split every quad into `[0, 1, 2]` and `[2, 3, 0]`. Other faces are kept.
    pub fn triangulate_quads(&mut self) {
        let mut faces = Vec::with_capacity(self.faces.len() * 2);
        for face in self.faces.drain(..) {
            if face.len() == 4 {
                faces.push(vec![face[0], face[1], face[2]]);
                faces.push(vec![face[2], face[3], face[0]]);
            } else {
                faces.push(face);
            }
        }
        self.faces = faces;
    }

    /// Give every face its own copy of its vertices.
    pub fn separate_vertices(&mut self) {
        let mut vertices = Vec::new();
        let mut colors = Vec::new();
        for face in &mut self.faces {
            for v in face.iter_mut() {
                vertices.push(self.vertices[*v]);
                colors.push(self.colors[*v]);
                *v = vertices.len() - 1;
            }
        }
        self.vertices = vertices;
        self.colors = colors;
    }

    // ==================== Transforms ====================

    /// Apply a homogeneous transformation to every vertex.
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for p in &mut self.vertices {
            *p = matrix.transform_point(p);
        }
    }

    /// Move every vertex by `offset`.
    pub fn translate(&mut self, offset: &Vector3<f64>) {
        for p in &mut self.vertices {
            *p += *offset;
        }
    }

    /// Scale about the origin, per axis.
    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) {
        for p in &mut self.vertices {
            p.x *= sx;
            p.y *= sy;
            p.z *= sz;
        }
    }

    /// Rotate about an axis through the origin, by `angle` radians.
    pub fn rotate(&mut self, axis: &Vector3<f64>, angle: f64) {
        let rotation = UnitQuaternion::from_axis_angle(&Unit::new_normalize(*axis), angle);
        for p in &mut self.vertices {
            *p = rotation * *p;
        }
    }

    /// Reflect through the plane at `origin` with `normal`, then flip faces so
    /// normals stay outward.
    pub fn mirror(&mut self, origin: &Point3<f64>, normal: &Vector3<f64>) {
        let n = normal.normalize();
        for p in &mut self.vertices {
            let d = (*p - origin).dot(&n);
            *p -= n * (2.0 * d);
        }
        self.flip_faces();
    }

    // ==================== Face Geometry ====================

    /// Area of face `f`.
    pub fn face_area(&self, f: usize) -> f64 {
        geometry::face_area(&self.face_positions(f))
    }

    /// Perimeter of face `f`.
    pub fn face_perimeter(&self, f: usize) -> f64 {
        geometry::face_perimeter(&self.face_positions(f))
    }

    /// Area over perimeter of face `f`.
    pub fn face_compactness(&self, f: usize) -> f64 {
        geometry::face_compactness(&self.face_positions(f))
    }

    /// Unit normal of face `f`.
    pub fn face_normal(&self, f: usize) -> Vector3<f64> {
        geometry::face_normal(&self.face_positions(f))
    }

    /// Mean of the vertices of face `f`.
    pub fn face_center(&self, f: usize) -> Point3<f64> {
        geometry::face_center(&self.face_positions(f))
    }

    /// Length of edge `edge` of face `f`.
    pub fn face_edge_length(&self, f: usize, edge: usize) -> f64 {
        geometry::face_edge_length(&self.face_positions(f), edge)
    }

    /// Longest over shortest edge of face `f`.
    pub fn face_proportion(&self, f: usize) -> f64 {
        geometry::face_proportion(&self.face_positions(f))
    }

    /// Normal inclination of face `f` against the XY plane.
    pub fn face_angle_vertical(&self, f: usize) -> f64 {
        geometry::face_angle_vertical(&self.face_positions(f))
    }

    /// Angle of the first edge of face `f` against the X axis.
    pub fn face_angle_horizontal(&self, f: usize) -> f64 {
        geometry::face_angle_horizontal(&self.face_positions(f))
    }

    /// Bounds of face `f`.
    pub fn face_bounding_box(&self, f: usize) -> (Point3<f64>, Point3<f64>) {
        geometry::face_bounding_box(&self.face_positions(f))
    }

    /// Evaluate `property` on every face's positions.
    pub fn face_properties<T, F>(&self, property: F) -> Vec<T>
    where
        F: Fn(&[Point3<f64>]) -> T,
    {
        (0..self.faces.len())
            .map(|f| property(&self.face_positions(f)))
            .collect()
    }

    /// Centers of all faces.
    pub fn face_centers(&self) -> Vec<Point3<f64>> {
        self.face_properties(geometry::face_center)
    }

    /// Normals of all faces.
    pub fn face_normals(&self) -> Vec<Vector3<f64>> {
        self.face_properties(geometry::face_normal)
    }

    /// Per-vertex normals: the normalized average of the corner normals of
    /// every face corner at the vertex. Unreferenced vertices get NaN.
    pub fn vertex_normals(&self) -> Vec<Vector3<f64>> {
        let mut sums = vec![Vector3::zeros(); self.vertices.len()];
        let mut counts = vec![0usize; self.vertices.len()];

        for face in &self.faces {
            let n = face.len();
            for j in 0..n {
                let v1 = face[j];
                let v2 = face[(j + 1) % n];
                let v3 = face[(j + 2) % n];
                let corner = (self.vertices[v2] - self.vertices[v1])
                    .cross(&(self.vertices[v3] - self.vertices[v1]))
                    .normalize();
                sums[v1] += corner;
                counts[v1] += 1;
            }
        }

        sums.into_iter()
            .zip(counts)
            .map(|(sum, count)| (sum / count as f64).normalize())
            .collect()
    }

    /// Axis-aligned bounds of all vertices, or `None` if there are none.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        if self.vertices.is_empty() {
            return None;
        }
        Some(geometry::face_bounding_box(&self.vertices))
    }

    /// Sum of all face areas.
    pub fn surface_area(&self) -> f64 {
        (0..self.faces.len()).map(|f| self.face_area(f)).sum()
    }

    // ==================== Colors ====================

    /// Paint every vertex.
    pub fn set_color_all(&mut self, color: Color) {
        self.colors.iter_mut().for_each(|c| *c = color);
    }

    /// Paint the vertices of face `f`.
    pub fn set_face_color(&mut self, f: usize, color: Color) {
        for &v in &self.faces[f] {
            self.colors[v] = color;
        }
    }

    /// Replace all colors. Fails unless there is one color per vertex.
    pub fn set_colors(&mut self, colors: Vec<Color>) -> Result<()> {
        MeshError::check_count("colors", self.vertices.len(), colors.len())?;
        self.colors = colors;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_quad() -> Mesh {
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3]],
        )
    }

    /// Two quads sharing an edge, each stored with its own vertices.
    fn split_strip() -> Mesh {
        let mut mesh = Mesh::new();
        mesh.add_face_from_points(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Color::RED,
        );
        mesh.add_face_from_points(
            &[
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
            ],
            Color::RED,
        );
        mesh
    }

    #[test]
    fn test_add_vertex_indices_are_sequential() {
        let mut mesh = Mesh::new();
        assert_eq!(mesh.add_vertex(Point3::origin()), 0);
        assert_eq!(mesh.add_vertex_with_color(Point3::origin(), Color::RED), 1);
        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(mesh.colors(), &[Color::WHITE, Color::RED]);
    }

    #[test]
    fn test_add_face_from_points_keeps_colors_parallel() {
        let mesh = split_strip();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.colors().len(), 8);
        assert_eq!(mesh.face(1), &[4, 5, 6, 7]);
    }

    #[test]
    fn test_merge_preserves_totals() {
        let a = unit_quad();
        let b = split_strip();
        let merged = Mesh::merge(&[a.clone(), b.clone()]);

        assert_eq!(merged.num_vertices(), a.num_vertices() + b.num_vertices());
        assert_eq!(merged.num_faces(), a.num_faces() + b.num_faces());
        assert_eq!(merged.colors().len(), merged.num_vertices());

        for (i, face) in b.faces().iter().enumerate() {
            let shifted: Vec<usize> = face.iter().map(|v| v + a.num_vertices()).collect();
            assert_eq!(merged.face(a.num_faces() + i), shifted.as_slice());
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let original = unit_quad();
        let mut copy = original.clone();
        assert_eq!(copy, original);

        copy.set_position(0, Point3::new(5.0, 5.0, 5.0));
        copy.add_triangle(0, 1, 2);
        assert_eq!(*original.position(0), Point3::origin());
        assert_eq!(original.num_faces(), 1);
    }

    #[test]
    fn test_weld_merges_shared_edge() {
        let mut mesh = split_strip();
        mesh.weld_vertices();

        assert_eq!(mesh.num_vertices(), 6);
        assert_eq!(mesh.face(0), &[0, 1, 2, 3]);
        assert_eq!(mesh.face(1), &[1, 4, 5, 2]);
        assert!(mesh.colors().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn test_weld_is_idempotent() {
        let mut mesh = split_strip();
        mesh.weld_vertices();
        let once = mesh.clone();
        mesh.weld_vertices();

        assert_eq!(mesh.num_vertices(), once.num_vertices());
        assert_eq!(mesh.faces(), once.faces());
    }

    #[test]
    fn test_weld_is_exact_by_default() {
        let mut mesh = Mesh::new();
        mesh.add_face_from_points(
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            Color::WHITE,
        );
        mesh.add_face_from_points(
            &[
                Point3::new(1.0 + 1e-9, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-0.0, 1.0, 0.0),
            ],
            Color::WHITE,
        );

        let mut exact = mesh.clone();
        exact.weld_vertices();
        // -0.0 matches 0.0, 1 + 1e-9 does not match 1
        assert_eq!(exact.num_vertices(), 5);

        let mut loose = mesh.clone();
        loose.weld_vertices_with_tolerance(1e-6).unwrap();
        assert_eq!(loose.num_vertices(), 4);

        assert!(mesh.weld_vertices_with_tolerance(0.0).is_err());
    }

    #[test]
    fn test_remove_faces() {
        let mut mesh = unit_quad();
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(2, 3, 0);

        assert_eq!(mesh.remove_face(0), vec![0, 1, 2, 3]);
        assert_eq!(mesh.faces(), &[vec![0, 1, 2], vec![2, 3, 0]]);

        mesh.remove_faces(&[0]);
        assert_eq!(mesh.faces(), &[vec![2, 3, 0]]);
        assert_eq!(mesh.num_vertices(), 4);
    }

    #[test]
    fn test_remove_unused_vertices() {
        let mut mesh = unit_quad();
        mesh.add_vertex_with_color(Point3::new(9.0, 9.0, 9.0), Color::RED);
        mesh.set_face_color(0, Color::BLACK);
        mesh.remove_unused_vertices();

        assert_eq!(mesh.num_vertices(), 4);
        assert!(mesh.colors().iter().all(|&c| c == Color::BLACK));
    }

    #[test]
    fn test_flip_and_triangulate() {
        let mut mesh = unit_quad();
        mesh.flip_faces();
        assert_eq!(mesh.face(0), &[3, 2, 1, 0]);
        assert!((mesh.face_normal(0) + Vector3::z()).norm() < 1e-10);

        let mut mesh = unit_quad();
        mesh.triangulate_quads();
        assert_eq!(mesh.faces(), &[vec![0, 1, 2], vec![2, 3, 0]]);
        assert!((mesh.surface_area() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_separate_vertices() {
        let mut mesh = split_strip();
        mesh.weld_vertices();
        mesh.separate_vertices();
        assert_eq!(mesh.num_vertices(), 8);
        assert_eq!(mesh.colors().len(), 8);
    }

    #[test]
    fn test_transforms() {
        let mut mesh = unit_quad();
        mesh.translate(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(*mesh.position(0), Point3::new(1.0, 2.0, 3.0));

        let mut mesh = unit_quad();
        mesh.scale(2.0, 3.0, 1.0);
        assert_eq!(*mesh.position(2), Point3::new(2.0, 3.0, 0.0));

        let mut mesh = unit_quad();
        mesh.rotate(&Vector3::z(), std::f64::consts::FRAC_PI_2);
        assert!((mesh.position(1) - Point3::new(0.0, 1.0, 0.0)).norm() < 1e-10);

        let mut mesh = unit_quad();
        mesh.transform(&Matrix4::new_translation(&Vector3::new(0.0, 0.0, 1.0)));
        assert!((mesh.position(3) - Point3::new(0.0, 1.0, 1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_mirror_keeps_normals_outward() {
        let mut mesh = unit_quad();
        mesh.mirror(&Point3::origin(), &Vector3::x());
        assert!((mesh.position(1) - Point3::new(-1.0, 0.0, 0.0)).norm() < 1e-10);
        // Reflection flips orientation, the face flip restores it
        assert!((mesh.face_normal(0) - Vector3::z()).norm() < 1e-10);
    }

    #[test]
    fn test_face_queries() {
        let mesh = unit_quad();
        assert!((mesh.face_area(0) - 1.0).abs() < 1e-10);
        assert!((mesh.face_perimeter(0) - 4.0).abs() < 1e-10);
        assert!((mesh.face_center(0) - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
        assert!((mesh.face_edge_length(0, 3) - 1.0).abs() < 1e-10);
        assert_eq!(mesh.face_centers().len(), 1);
        assert_eq!(mesh.face_normals()[0], mesh.face_normal(0));
    }

    #[test]
    fn test_vertex_normals_of_flat_quad() {
        let mesh = unit_quad();
        for n in mesh.vertex_normals() {
            assert!((n - Vector3::z()).norm() < 1e-10);
        }
    }

    #[test]
    fn test_set_colors_checks_count() {
        let mut mesh = unit_quad();
        assert!(mesh.set_colors(vec![Color::RED; 3]).is_err());
        assert!(mesh.set_colors(vec![Color::RED; 4]).is_ok());
        assert_eq!(mesh.colors()[3], Color::RED);
    }

    #[test]
    fn test_bounding_box() {
        assert!(Mesh::new().bounding_box().is_none());
        let (min, max) = split_strip().bounding_box().unwrap();
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(2.0, 1.0, 0.0));
    }
}
