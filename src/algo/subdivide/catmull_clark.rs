//! Catmull-Clark subdivision for polygon meshes.

use nalgebra::{Point3, Vector3};

use crate::algo::Progress;
use crate::error::{MeshError, Result};
use crate::mesh::{Mesh, Topology};

use super::map_indices;

/// Offset of the face points along the face normals.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Extrusion {
    /// Face points sit at the face centers.
    #[default]
    None,
    /// Every face point moves by the same distance, in every iteration.
    Uniform(f64),
    /// One distance per input face. Only the first iteration is extruded,
    /// since later iterations have different faces.
    PerFace(Vec<f64>),
}

impl Extrusion {
    #[inline]
    fn distance(&self, f: usize) -> Option<f64> {
        match self {
            Extrusion::None => None,
            Extrusion::Uniform(d) => Some(*d),
            Extrusion::PerFace(ds) => Some(ds[f]),
        }
    }
}

/// Options for [`catmull_clark`].
#[derive(Debug, Clone)]
pub struct CatmullClarkOptions {
    /// Number of subdivision iterations.
    pub iterations: usize,

    /// Face point offset along the face normals.
    pub extrusion: Extrusion,

    /// Whether to use parallel execution (default: false).
    pub parallel: bool,
}

impl Default for CatmullClarkOptions {
    fn default() -> Self {
        Self {
            iterations: 1,
            extrusion: Extrusion::None,
            parallel: false,
        }
    }
}

impl CatmullClarkOptions {
    /// Create options with the specified number of iterations.
    pub fn new(iterations: usize) -> Self {
        Self {
            iterations,
            ..Self::default()
        }
    }

    /// Set the face point extrusion.
    pub fn with_extrusion(mut self, extrusion: Extrusion) -> Self {
        self.extrusion = extrusion;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// Performs Catmull-Clark subdivision on a polygon mesh.
///
/// Each iteration replaces every n-gon with n quads, so the result is an
/// all-quad mesh whatever the input degrees. Closed meshes shrink toward a
/// smooth limit surface; open borders are smoothed along the border only.
///
/// # Arguments
///
/// * `mesh` - The mesh to subdivide
/// * `options` - Iterations, extrusion and parallelism
///
/// # Algorithm
///
/// For each iteration, with `F` faces, `E` edges and `V` vertices:
/// 1. Face points: the face center, plus the face normal times the extrusion
/// 2. Edge points: the average of both endpoints and both face points, or the
///    edge midpoint on a border edge
/// 3. Vertex points, for a vertex `P` with `n` faces:
///    - interior: `(F_avg + 2 R_avg + (n - 3) P) / n`, where `F_avg` averages
///      the adjacent face points and `R_avg` the midpoints of the incident
///      edges
///    - border: the midpoint of `P` and the average of the midpoints of its
///      border edges
/// 4. Each corner of each face becomes the quad
///    `(edge point before, vertex point, edge point after, face point)`
///
/// The output lists the `F` face points, then the `E` edge points in topology
/// order, then the `V` vertex points. Face corners are emitted starting with
/// the last corner of each face.
///
/// # Errors
///
/// [`MeshError::ArgumentCountMismatch`] if a per-face extrusion does not have
/// one entry per face.
///
/// # Example
///
/// ```
/// use massing::algo::subdivide::{catmull_clark, CatmullClarkOptions};
/// use massing::mesh::primitives::create_box;
///
/// let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
/// let smooth = catmull_clark(&block, &CatmullClarkOptions::new(2)).unwrap();
/// assert_eq!(smooth.num_faces(), 96);
/// ```
pub fn catmull_clark(mesh: &Mesh, options: &CatmullClarkOptions) -> Result<Mesh> {
    catmull_clark_with_progress(mesh, options, &Progress::none())
}

/// Catmull-Clark subdivision with progress reporting.
pub fn catmull_clark_with_progress(
    mesh: &Mesh,
    options: &CatmullClarkOptions,
    progress: &Progress,
) -> Result<Mesh> {
    if let Extrusion::PerFace(distances) = &options.extrusion {
        MeshError::check_count("extrusion", mesh.num_faces(), distances.len())?;
    }

    let flat = Extrusion::None;
    let mut current = mesh.clone();
    for iter in 0..options.iterations {
        progress.report(iter, options.iterations, "Catmull-Clark subdivision");
        let extrusion = match &options.extrusion {
            Extrusion::PerFace(_) if iter > 0 => &flat,
            extrusion => extrusion,
        };
        current = catmull_clark_once(&current, extrusion, options.parallel);
    }
    progress.report(options.iterations, options.iterations, "Catmull-Clark subdivision");

    log::debug!(
        "catmull_clark: {} iterations, {} faces -> {} faces",
        options.iterations,
        mesh.num_faces(),
        current.num_faces()
    );
    Ok(current)
}

/// Perform one iteration of Catmull-Clark subdivision.
fn catmull_clark_once(mesh: &Mesh, extrusion: &Extrusion, parallel: bool) -> Mesh {
    let topology = mesh.build_topology();

    // Step 1: Face points
    let face_points = map_indices(mesh.num_faces(), parallel, |f| {
        let center = mesh.face_center(f);
        match extrusion.distance(f) {
            Some(d) => center + mesh.face_normal(f) * d,
            None => center,
        }
    });

    // Step 2: Edge points
    let edge_points = map_indices(topology.num_edges(), parallel, |e| {
        let edge = topology.edge(e);
        let a = mesh.position(edge.v1);
        let b = mesh.position(edge.v2);
        match (edge.face1, edge.face2) {
            (Some(f1), Some(f2)) => Point3::from(
                (face_points[f1].coords + face_points[f2].coords + a.coords + b.coords) / 4.0,
            ),
            _ => nalgebra::center(a, b),
        }
    });

    // Step 3: Vertex points
    let vertex_points = map_indices(mesh.num_vertices(), parallel, |v| {
        vertex_point(mesh, &topology, &face_points, v)
    });

    let stranded = (0..mesh.num_vertices())
        .filter(|&v| {
            topology.vertex_faces(v).len() != topology.vertex_edges(v).len()
                && !topology.is_boundary_vertex(v)
        })
        .count();
    if stranded > 0 {
        log::warn!(
            "catmull_clark: {} non-manifold vertices without border edges, output contains NaN",
            stranded
        );
    }

    // Step 4: Faces
    refined_mesh(mesh, &topology, face_points, edge_points, vertex_points)
}

fn vertex_point(
    mesh: &Mesh,
    topology: &Topology,
    face_points: &[Point3<f64>],
    v: usize,
) -> Point3<f64> {
    let p = mesh.position(v);
    let faces = topology.vertex_faces(v);
    let edges = topology.vertex_edges(v);
    let midpoint = |e: usize| {
        let other = mesh.position(topology.edge(e).other(v));
        nalgebra::center(p, other).coords
    };

    if faces.len() != edges.len() {
        // Border vertex: only border edges contribute
        let border: Vec<Vector3<f64>> = edges
            .iter()
            .copied()
            .filter(|&e| topology.is_boundary_edge(e))
            .map(midpoint)
            .collect();
        let r = border.iter().sum::<Vector3<f64>>() / border.len() as f64;
        return Point3::from((r + p.coords) * 0.5);
    }

    let n = faces.len() as f64;
    let f_avg = faces
        .iter()
        .map(|&f| face_points[f].coords)
        .sum::<Vector3<f64>>()
        / n;
    let r = edges.iter().map(|&e| midpoint(e)).sum::<Vector3<f64>>() * (2.0 / edges.len() as f64);
    Point3::from((f_avg + r + p.coords * (n - 3.0)) / n)
}

/// Assemble the refined mesh: face points, then edge points, then vertex
/// points, with one quad per face corner.
pub(super) fn refined_mesh(
    mesh: &Mesh,
    topology: &Topology,
    face_points: Vec<Point3<f64>>,
    edge_points: Vec<Point3<f64>>,
    vertex_points: Vec<Point3<f64>>,
) -> Mesh {
    let edge_start = face_points.len();
    let vertex_start = edge_start + edge_points.len();

    let mut vertices = face_points;
    vertices.extend(edge_points);
    vertices.extend(vertex_points);

    let degree_sum = mesh.faces().iter().map(Vec::len).sum();
    let mut faces = Vec::with_capacity(degree_sum);

    for (f, face) in mesh.faces().iter().enumerate() {
        // ring[j] is the edge from corner j to corner j + 1
        let ring = topology.face_edges(f);
        let n = face.len();
        for k in 0..n {
            let j = (k + n - 1) % n;
            let before = ring[(j + n - 1) % n];
            let after = ring[j];
            faces.push(vec![
                edge_start + before,
                vertex_start + face[j],
                edge_start + after,
                f,
            ]);
        }
    }

    Mesh::from_parts(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::create_box;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn create_single_quad() -> Mesh {
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

    fn create_two_quads() -> Mesh {
        // Two quads sharing an edge
        Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
        )
    }

    fn create_quad_cube() -> Mesh {
        create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_catmull_clark_single_quad() {
        let mesh = create_single_quad();
        let result = catmull_clark(&mesh, &CatmullClarkOptions::default()).unwrap();

        // 1 quad -> 4 quads
        assert_eq!(result.num_faces(), 4);
        // 1 face point + 4 edge points + 4 vertex points
        assert_eq!(result.num_vertices(), 9);
        assert!(result.is_quad_mesh());

        // Face point first
        assert!((result.position(0) - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
        // Border edges use their midpoints
        assert!((result.position(1) - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-10);
        // Corner (0, 0) moves halfway to the average of its border midpoints
        assert!((result.position(5) - Point3::new(0.125, 0.125, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_catmull_clark_keeps_winding() {
        let mesh = create_single_quad();
        let result = catmull_clark(&mesh, &CatmullClarkOptions::default()).unwrap();

        // First quad belongs to the last corner of the input face
        assert_eq!(result.face(0), &[1 + 2, 5 + 3, 1 + 3, 0]);
        for f in 0..result.num_faces() {
            assert!((result.face_normal(f) - Vector3::z()).norm() < 1e-10);
        }
    }

    #[test]
    fn test_catmull_clark_two_quads() {
        let mesh = create_two_quads();
        let result = catmull_clark(&mesh, &CatmullClarkOptions::default()).unwrap();

        // 2 quads -> 8 quads
        assert_eq!(result.num_faces(), 8);
        // 2 face points + 7 edge points + 6 vertex points
        assert_eq!(result.num_vertices(), 15);

        // The shared edge averages its endpoints with both face points
        let shared = mesh.build_topology().edge_between(1, 2).unwrap();
        assert!((result.position(2 + shared) - Point3::new(1.0, 0.5, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_catmull_clark_cube() {
        let mesh = create_quad_cube();
        let result = catmull_clark(&mesh, &CatmullClarkOptions::default()).unwrap();

        assert_eq!(result.num_faces(), 24);
        assert_eq!(result.num_vertices(), 6 + 12 + 8);
        assert!(result.is_quad_mesh());
        assert_eq!(result.build_topology().boundary_edges().count(), 0);

        // Corner (0, 0, 0) has valence 3: (F + 2R + 0 P) / 3
        let corner = result.position(6 + 12);
        let expected = Point3::new(2.0 / 9.0, 2.0 / 9.0, 2.0 / 9.0);
        assert!((corner - expected).norm() < 1e-10);
    }

    #[test]
    fn test_catmull_clark_two_iterations() {
        let mesh = create_quad_cube();
        let result = catmull_clark(&mesh, &CatmullClarkOptions::new(2)).unwrap();

        // Each iteration quadruples: 4 * 4 = 16x
        assert_eq!(result.num_faces(), 6 * 16);
        assert!(result.is_quad_mesh());
    }

    #[test]
    fn test_catmull_clark_preserves_euler() {
        let mesh = create_quad_cube();
        let euler = |m: &Mesh| {
            m.num_vertices() as i64 - m.build_topology().num_edges() as i64 + m.num_faces() as i64
        };

        let result = catmull_clark(&mesh, &CatmullClarkOptions::default()).unwrap();
        assert_eq!(euler(&mesh), euler(&result), "Euler characteristic should be preserved");
    }

    #[test]
    fn test_catmull_clark_zero_iterations() {
        let mesh = create_quad_cube();
        let result = catmull_clark(&mesh, &CatmullClarkOptions::new(0)).unwrap();
        assert_eq!(result, mesh);
    }

    #[test]
    fn test_catmull_clark_triangles_become_quads() {
        let mesh = Mesh::from_parts(
            vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            vec![vec![0, 1, 2]],
        );
        let result = catmull_clark(&mesh, &CatmullClarkOptions::default()).unwrap();
        assert_eq!(result.num_faces(), 3);
        assert_eq!(result.num_vertices(), 1 + 3 + 3);
        assert!(result.is_quad_mesh());
    }

    #[test]
    fn test_catmull_clark_extrusion() {
        let mesh = create_single_quad();

        let options = CatmullClarkOptions::default().with_extrusion(Extrusion::Uniform(2.0));
        let result = catmull_clark(&mesh, &options).unwrap();
        assert!((result.position(0) - Point3::new(0.5, 0.5, 2.0)).norm() < 1e-10);

        let options = CatmullClarkOptions::default().with_extrusion(Extrusion::PerFace(vec![-1.0]));
        let result = catmull_clark(&mesh, &options).unwrap();
        assert!((result.position(0) - Point3::new(0.5, 0.5, -1.0)).norm() < 1e-10);
    }

    #[test]
    fn test_catmull_clark_per_face_extrusion_count() {
        let mesh = create_quad_cube();
        let options = CatmullClarkOptions::new(3).with_extrusion(Extrusion::PerFace(vec![0.1; 5]));
        let err = catmull_clark(&mesh, &options).unwrap_err();
        assert!(matches!(
            err,
            MeshError::ArgumentCountMismatch {
                expected: 6,
                actual: 5,
                ..
            }
        ));

        // Matching count is only applied to the first iteration
        let options = CatmullClarkOptions::new(2).with_extrusion(Extrusion::PerFace(vec![0.1; 6]));
        assert_eq!(catmull_clark(&mesh, &options).unwrap().num_faces(), 96);
    }

    #[test]
    fn test_catmull_clark_parallel_matches_sequential() {
        let mesh = create_two_quads();
        let sequential = catmull_clark(&mesh, &CatmullClarkOptions::new(2)).unwrap();
        let parallel =
            catmull_clark(&mesh, &CatmullClarkOptions::new(2).with_parallel(true)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_catmull_clark_reports_progress() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let progress = Progress::new(move |_, _, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mesh = create_quad_cube();
        catmull_clark_with_progress(&mesh, &CatmullClarkOptions::new(2), &progress).unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
