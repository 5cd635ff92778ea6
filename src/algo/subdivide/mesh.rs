//! Whole-mesh application of the face subdivisions.

use nalgebra::Point3;
use rand::Rng;
use rayon::prelude::*;

use crate::error::{MeshError, Result};
use crate::mesh::Mesh;

use super::face::{self, SplitDirection};

/// A parameter given either once for all faces or once per face.
///
/// Plain values convert into [`FaceParam::Uniform`] and vectors into
/// [`FaceParam::PerFace`], so most call sites pass `2.0` or `heights`
/// directly:
///
/// ```
/// use massing::algo::subdivide::FaceParam;
///
/// let uniform: FaceParam<f64> = 2.0.into();
/// let per_face: FaceParam<f64> = vec![1.0, 2.0, 3.0].into();
/// assert_eq!(*uniform.get(5), 2.0);
/// assert_eq!(*per_face.get(1), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum FaceParam<T> {
    /// The same value for every face.
    Uniform(T),
    /// One value per face, in face order.
    PerFace(Vec<T>),
}

impl<T> FaceParam<T> {
    /// The value for face `f`.
    ///
    /// # Panics
    ///
    /// Panics if a per-face list is shorter than `f + 1`.
    #[inline]
    pub fn get(&self, f: usize) -> &T {
        match self {
            FaceParam::Uniform(value) => value,
            FaceParam::PerFace(values) => &values[f],
        }
    }

    /// Fail unless a per-face list has exactly `num_faces` entries.
    pub fn check(&self, name: &'static str, num_faces: usize) -> Result<()> {
        match self {
            FaceParam::Uniform(_) => Ok(()),
            FaceParam::PerFace(values) => MeshError::check_count(name, num_faces, values.len()),
        }
    }
}

impl<T> From<Vec<T>> for FaceParam<T> {
    fn from(values: Vec<T>) -> Self {
        FaceParam::PerFace(values)
    }
}

impl From<f64> for FaceParam<f64> {
    fn from(value: f64) -> Self {
        FaceParam::Uniform(value)
    }
}

impl From<usize> for FaceParam<usize> {
    fn from(value: usize) -> Self {
        FaceParam::Uniform(value)
    }
}

impl From<bool> for FaceParam<bool> {
    fn from(value: bool) -> Self {
        FaceParam::Uniform(value)
    }
}

/// Options for [`MeshSubdivider`].
#[derive(Debug, Clone, Default)]
pub struct SubdivideOptions {
    /// Subdivide faces on the rayon thread pool (default: false).
    ///
    /// Output is identical to sequential execution.
    pub parallel: bool,
}

impl SubdivideOptions {
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

/// Applies a [`face`] subdivision to every face of a mesh.
///
/// Each method returns a new mesh holding the output faces of face 0, then
/// face 1, and so on. Output faces do not share vertices and every vertex is
/// white; weld the result if shared vertices are needed.
///
/// Parameters accepting [`FaceParam`] take a single value or one value per
/// face. Per-face lists are checked against the face count before any face is
/// processed.
///
/// # Example
///
/// ```
/// use massing::algo::subdivide::MeshSubdivider;
/// use massing::mesh::primitives::create_box;
///
/// let block = create_box(0.0, 0.0, 0.0, 4.0, 4.0, 3.0);
/// let subdivider = MeshSubdivider::default();
///
/// let floors = subdivider.grid(&block, 1, 3).unwrap();
/// assert_eq!(floors.num_faces(), 18);
///
/// let heights = vec![0.0, 1.0, 0.5, 0.5, 0.5, 0.5];
/// let extruded = subdivider.extrude(&block, heights, true).unwrap();
/// assert_eq!(extruded.num_faces(), 30);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MeshSubdivider {
    options: SubdivideOptions,
}

impl MeshSubdivider {
    /// Create a subdivider with the given options.
    pub fn new(options: SubdivideOptions) -> Self {
        Self { options }
    }

    /// The options in use.
    pub fn options(&self) -> &SubdivideOptions {
        &self.options
    }

    /// Run `op` on the positions of every face and collect the results into a
    /// new mesh, in face order.
    pub fn apply<F>(&self, mesh: &Mesh, op: F) -> Mesh
    where
        F: Fn(usize, &[Point3<f64>]) -> Vec<Vec<Point3<f64>>> + Sync,
    {
        let run = |f: usize| op(f, &mesh.face_positions(f));
        let pieces: Vec<Vec<Vec<Point3<f64>>>> = if self.options.parallel {
            (0..mesh.num_faces()).into_par_iter().map(run).collect()
        } else {
            (0..mesh.num_faces()).map(run).collect()
        };
        assemble(pieces)
    }

    /// [`apply`](Self::apply) for fallible face operations. The first error in
    /// face order is returned and no mesh is built.
    pub fn try_apply<F>(&self, mesh: &Mesh, op: F) -> Result<Mesh>
    where
        F: Fn(usize, &[Point3<f64>]) -> Result<Vec<Vec<Point3<f64>>>> + Sync,
    {
        let run = |f: usize| op(f, &mesh.face_positions(f));
        let pieces: Result<Vec<Vec<Vec<Point3<f64>>>>> = if self.options.parallel {
            (0..mesh.num_faces()).into_par_iter().map(run).collect()
        } else {
            (0..mesh.num_faces()).map(run).collect()
        };
        Ok(assemble(pieces?))
    }

    // ==================== Grid ====================

    /// Split every quad into `nu × nv` quads and every triangle into a fan
    /// plus quads. See [`face::grid`].
    pub fn grid(
        &self,
        mesh: &Mesh,
        nu: impl Into<FaceParam<usize>>,
        nv: impl Into<FaceParam<usize>>,
    ) -> Result<Mesh> {
        let (nu, nv) = (nu.into(), nv.into());
        nu.check("nu", mesh.num_faces())?;
        nv.check("nv", mesh.num_faces())?;
        check_all(&nu, "nu", |&n| n >= 1, "must be at least 1")?;
        check_all(&nv, "nv", |&n| n >= 1, "must be at least 1")?;

        let result = self.apply(mesh, |f, points| face::grid(points, *nu.get(f), *nv.get(f)));
        log_result("grid", mesh, &result);
        Ok(result)
    }

    /// Split every face into cells of roughly `x × y`. See [`face::grid_abs`].
    pub fn grid_abs(
        &self,
        mesh: &Mesh,
        x: impl Into<FaceParam<f64>>,
        y: impl Into<FaceParam<f64>>,
    ) -> Result<Mesh> {
        let (x, y) = (x.into(), y.into());
        x.check("x", mesh.num_faces())?;
        y.check("y", mesh.num_faces())?;
        let positive = |v: &f64| v.is_finite() && *v > 0.0;
        check_all(&x, "x", positive, "must be positive")?;
        check_all(&y, "y", positive, "must be positive")?;

        let result = self.apply(mesh, |f, points| face::grid_abs(points, *x.get(f), *y.get(f)));
        log_result("grid_abs", mesh, &result);
        Ok(result)
    }

    // ==================== Linear Splits ====================

    /// Cut every quad into strips of random width. See
    /// [`face::linear_split_quad`].
    ///
    /// Faces are always processed sequentially so a seeded `rng` reproduces
    /// the same result.
    pub fn linear_split_quad<R: Rng>(
        &self,
        mesh: &Mesh,
        min_width: f64,
        max_width: f64,
        direction: SplitDirection,
        rng: &mut R,
    ) -> Result<Mesh> {
        if min_width.is_nan() || min_width <= 0.0 {
            return Err(MeshError::invalid_param("min_width", min_width, "must be positive"));
        }
        if max_width < min_width {
            return Err(MeshError::invalid_param(
                "max_width",
                max_width,
                "must not be less than min_width",
            ));
        }

        let pieces = (0..mesh.num_faces())
            .map(|f| {
                let points = mesh.face_positions(f);
                face::linear_split_quad(&points, min_width, max_width, direction, rng)
            })
            .collect();
        let result = assemble(pieces);
        log_result("linear_split_quad", mesh, &result);
        Ok(result)
    }

    /// Cut every quad into equal strips no wider than `max_width`. See
    /// [`face::linear_split_quad_max_width`].
    pub fn linear_split_quad_max_width(
        &self,
        mesh: &Mesh,
        max_width: f64,
        direction: SplitDirection,
    ) -> Result<Mesh> {
        if max_width.is_nan() || max_width <= 0.0 {
            return Err(MeshError::invalid_param("max_width", max_width, "must be positive"));
        }

        let result = self.apply(mesh, |_, points| {
            face::linear_split_quad_max_width(points, max_width, direction)
        });
        log_result("linear_split_quad_max_width", mesh, &result);
        Ok(result)
    }

    /// Cut every quad into two borders and a middle strip. See
    /// [`face::linear_split_quad_border`].
    pub fn linear_split_quad_border(
        &self,
        mesh: &Mesh,
        border1: f64,
        border2: f64,
        direction: SplitDirection,
    ) -> Mesh {
        let result = self.apply(mesh, |_, points| {
            face::linear_split_quad_border(points, border1, border2, direction)
        });
        log_result("linear_split_quad_border", mesh, &result);
        result
    }

    // ==================== Extrusion ====================

    /// Extrude every face along its normal. See [`face::extrude`].
    pub fn extrude(
        &self,
        mesh: &Mesh,
        height: impl Into<FaceParam<f64>>,
        cap_top: impl Into<FaceParam<bool>>,
    ) -> Result<Mesh> {
        let (height, cap_top) = (height.into(), cap_top.into());
        height.check("height", mesh.num_faces())?;
        cap_top.check("cap_top", mesh.num_faces())?;

        let result = self.apply(mesh, |f, points| {
            face::extrude(points, *height.get(f), *cap_top.get(f))
        });
        log_result("extrude", mesh, &result);
        Ok(result)
    }

    /// Extrude every face with a tapered top. See [`face::extrude_tapered`].
    pub fn extrude_tapered(
        &self,
        mesh: &Mesh,
        height: impl Into<FaceParam<f64>>,
        fraction: impl Into<FaceParam<f64>>,
        cap_top: impl Into<FaceParam<bool>>,
    ) -> Result<Mesh> {
        let (height, fraction, cap_top) = (height.into(), fraction.into(), cap_top.into());
        height.check("height", mesh.num_faces())?;
        fraction.check("fraction", mesh.num_faces())?;
        cap_top.check("cap_top", mesh.num_faces())?;

        let result = self.apply(mesh, |f, points| {
            face::extrude_tapered(points, *height.get(f), *fraction.get(f), *cap_top.get(f))
        });
        log_result("extrude_tapered", mesh, &result);
        Ok(result)
    }

    /// Replace every face with a triangle fan to `apex`. See
    /// [`face::extrude_to_point`].
    pub fn extrude_to_point(&self, mesh: &Mesh, apex: &Point3<f64>) -> Mesh {
        let result = self.apply(mesh, |_, points| face::extrude_to_point(points, apex));
        log_result("extrude_to_point", mesh, &result);
        result
    }

    /// Replace every face with a pyramid over its center. See
    /// [`face::extrude_to_point_center`].
    pub fn extrude_to_point_center(
        &self,
        mesh: &Mesh,
        height: impl Into<FaceParam<f64>>,
    ) -> Result<Mesh> {
        let height = height.into();
        height.check("height", mesh.num_faces())?;

        let result = self.apply(mesh, |f, points| {
            face::extrude_to_point_center(points, *height.get(f))
        });
        log_result("extrude_to_point_center", mesh, &result);
        Ok(result)
    }

    // ==================== Offset and Frame ====================

    /// Inset every face by a distance. See [`face::offset`].
    pub fn offset(&self, mesh: &Mesh, distance: impl Into<FaceParam<f64>>) -> Result<Mesh> {
        let distance = distance.into();
        distance.check("distance", mesh.num_faces())?;

        let result = self.apply(mesh, |f, points| face::offset(points, *distance.get(f)));
        log_result("offset", mesh, &result);
        Ok(result)
    }

    /// Inset every face with one distance per edge. See
    /// [`face::offset_per_edge`].
    ///
    /// A uniform list is applied to every face; each list, uniform or per
    /// face, needs one entry per edge of the face it is used for.
    pub fn offset_per_edge(&self, mesh: &Mesh, distances: FaceParam<Vec<f64>>) -> Result<Mesh> {
        distances.check("distances", mesh.num_faces())?;
        for (f, face) in mesh.faces().iter().enumerate() {
            MeshError::check_count("distances", face.len(), distances.get(f).len())?;
        }

        let result = self.apply(mesh, |f, points| face::offset_per_edge(points, distances.get(f)));
        log_result("offset_per_edge", mesh, &result);
        Ok(result)
    }

    /// Split every face into a frame and an inner face. See [`face::frame`].
    pub fn frame(&self, mesh: &Mesh, width: impl Into<FaceParam<f64>>) -> Result<Mesh> {
        let width = width.into();
        width.check("width", mesh.num_faces())?;

        let result = self.apply(mesh, |f, points| face::frame(points, *width.get(f)));
        log_result("frame", mesh, &result);
        Ok(result)
    }

    // ==================== Roof ====================

    /// Put a pitched roof on every face. See [`face::roof`].
    ///
    /// # Errors
    ///
    /// Count mismatches, or [`MeshError::InvalidFaceDegree`] if any face is
    /// neither a quad nor a triangle.
    pub fn roof(
        &self,
        mesh: &Mesh,
        height: impl Into<FaceParam<f64>>,
        gable_inset: impl Into<FaceParam<f64>>,
    ) -> Result<Mesh> {
        let (height, gable_inset) = (height.into(), gable_inset.into());
        height.check("height", mesh.num_faces())?;
        gable_inset.check("gable_inset", mesh.num_faces())?;

        let result = self.try_apply(mesh, |f, points| {
            face::roof(points, *height.get(f), *gable_inset.get(f))
        })?;
        log_result("roof", mesh, &result);
        Ok(result)
    }
}

fn assemble(pieces: Vec<Vec<Vec<Point3<f64>>>>) -> Mesh {
    let mut result = Mesh::new();
    for faces in &pieces {
        result.add_faces_from_points(faces);
    }
    result
}

fn check_all<T, P>(
    param: &FaceParam<T>,
    name: &'static str,
    valid: P,
    reason: &'static str,
) -> Result<()>
where
    T: std::fmt::Display,
    P: Fn(&T) -> bool,
{
    let invalid = match param {
        FaceParam::Uniform(value) => Some(value).filter(|v| !valid(v)),
        FaceParam::PerFace(values) => values.iter().find(|v| !valid(v)),
    };
    match invalid {
        Some(value) => Err(MeshError::invalid_param(name, value, reason)),
        None => Ok(()),
    }
}

fn log_result(operation: &str, input: &Mesh, output: &Mesh) {
    log::debug!(
        "{}: {} faces -> {} faces, {} vertices",
        operation,
        input.num_faces(),
        output.num_faces(),
        output.num_vertices()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::create_box;
    use crate::mesh::Color;
    use nalgebra::Vector3;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

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

    #[test]
    fn test_face_param_conversions() {
        let p: FaceParam<f64> = 1.5.into();
        assert_eq!(p, FaceParam::Uniform(1.5));
        assert!(p.check("height", 100).is_ok());

        let p: FaceParam<usize> = vec![1, 2].into();
        assert!(p.check("nu", 2).is_ok());
        assert!(p.check("nu", 3).is_err());

        let p: FaceParam<bool> = false.into();
        assert!(!*p.get(3));
    }

    #[test]
    fn test_grid_counts() {
        let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let result = MeshSubdivider::default().grid(&block, 2, 3).unwrap();
        assert_eq!(result.num_faces(), 36);
        assert_eq!(result.num_vertices(), 36 * 4);
        assert!((result.surface_area() - 6.0).abs() < 1e-10);
    }

    #[test]
    fn test_grid_rejects_zero() {
        let err = MeshSubdivider::default().grid(&unit_quad(), 0, 1).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "nu", .. }));
    }

    #[test]
    fn test_grid_abs_rejects_non_positive_size() {
        let subdivider = MeshSubdivider::default();
        let err = subdivider.grid_abs(&unit_quad(), 0.0, 1.0).unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "x", .. }));

        let err = subdivider
            .grid_abs(&unit_quad(), 1.0, vec![f64::NAN])
            .unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "y", .. }));

        assert_eq!(subdivider.grid_abs(&unit_quad(), 0.5, 0.5).unwrap().num_faces(), 4);
    }

    #[test]
    fn test_per_face_count_checked_before_work() {
        let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let subdivider = MeshSubdivider::default();

        let err = subdivider.extrude(&block, vec![1.0; 5], true).unwrap_err();
        assert!(matches!(
            err,
            MeshError::ArgumentCountMismatch {
                name: "height",
                expected: 6,
                actual: 5
            }
        ));
        assert!(subdivider.extrude(&block, 1.0, vec![true; 7]).is_err());
    }

    #[test]
    fn test_extrude_per_face() {
        let mut mesh = unit_quad();
        mesh.add_face_from_points(
            &[
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(3.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            Color::RED,
        );

        let result = MeshSubdivider::default()
            .extrude(&mesh, vec![1.0, 2.0], vec![true, false])
            .unwrap();
        // 4 sides + cap, then 3 sides without cap
        assert_eq!(result.num_faces(), 8);
        let cap = result.face_positions(4);
        assert!(cap.iter().all(|p| (p.z - 1.0).abs() < 1e-10));
        let last_side = result.face_positions(7);
        assert!((last_side[2].z - 2.0).abs() < 1e-10);
        assert!(result.colors().iter().all(|&c| c == Color::WHITE));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let block = create_box(0.0, 0.0, 0.0, 2.0, 3.0, 4.0);
        let sequential = MeshSubdivider::default();
        let parallel = MeshSubdivider::new(SubdivideOptions::default().with_parallel(true));

        assert_eq!(
            sequential.frame(&block, 0.2).unwrap(),
            parallel.frame(&block, 0.2).unwrap()
        );
        assert_eq!(
            sequential.roof(&block, 1.0, 0.1).unwrap(),
            parallel.roof(&block, 1.0, 0.1).unwrap()
        );
    }

    #[test]
    fn test_roof_fails_on_pentagon() {
        let mut mesh = unit_quad();
        mesh.add_face_from_points(
            &[
                Point3::new(0.0, 0.0, 1.0),
                Point3::new(1.0, 0.0, 1.0),
                Point3::new(1.5, 1.0, 1.0),
                Point3::new(0.5, 1.5, 1.0),
                Point3::new(-0.5, 1.0, 1.0),
            ],
            Color::WHITE,
        );
        let err = MeshSubdivider::default().roof(&mesh, 1.0, 0.0).unwrap_err();
        assert!(matches!(err, MeshError::InvalidFaceDegree { degree: 5, .. }));
    }

    #[test]
    fn test_offset_per_edge_lengths() {
        let mesh = unit_quad();
        let subdivider = MeshSubdivider::default();

        let result = subdivider
            .offset_per_edge(&mesh, FaceParam::Uniform(vec![0.1, 0.0, 0.1, 0.0]))
            .unwrap();
        assert_eq!(result.num_faces(), 5);
        assert!((result.face_area(4) - 0.8).abs() < 1e-10);

        assert!(subdivider
            .offset_per_edge(&mesh, FaceParam::Uniform(vec![0.1; 3]))
            .is_err());
    }

    #[test]
    fn test_random_split_reproducible() {
        let mesh = create_box(0.0, 0.0, 0.0, 10.0, 10.0, 10.0);
        let subdivider = MeshSubdivider::default();

        let a = subdivider
            .linear_split_quad(&mesh, 1.0, 3.0, SplitDirection::V, &mut StdRng::seed_from_u64(3))
            .unwrap();
        let b = subdivider
            .linear_split_quad(&mesh, 1.0, 3.0, SplitDirection::V, &mut StdRng::seed_from_u64(3))
            .unwrap();
        assert_eq!(a, b);
        assert!(a.num_faces() > 6);
        assert!((a.surface_area() - 600.0).abs() < 1e-8);

        assert!(subdivider
            .linear_split_quad(&mesh, 0.0, 3.0, SplitDirection::V, &mut StdRng::seed_from_u64(3))
            .is_err());
    }

    #[test]
    fn test_extrude_to_point_center_normals() {
        let block = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let spiky = MeshSubdivider::default()
            .extrude_to_point_center(&block, 0.5)
            .unwrap();
        assert_eq!(spiky.num_faces(), 24);

        let center = Point3::new(0.5, 0.5, 0.5);
        for f in 0..spiky.num_faces() {
            let out: Vector3<f64> = spiky.face_center(f) - center;
            assert!(spiky.face_normal(f).dot(&out) > 0.0);
        }
    }
}
