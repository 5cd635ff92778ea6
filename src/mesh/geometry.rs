//! Face-local geometry.
//!
//! Pure functions over an ordered slice of face positions. None of these know
//! about meshes or indices, so face subdivision and mesh queries share them.
//!
//! Degenerate input (zero-length edges, collinear corners) is not detected and
//! yields NaN components rather than an error.

use nalgebra::{Point3, Vector3};

/// Unit normal of the triangle `(a, b, c)` by the right-hand rule.
#[inline]
pub fn triangle_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    (b - a).cross(&(c - a)).normalize()
}

/// Normal of a quad as the normalized average of the normals of triangles
/// `(a, b, c)` and `(c, d, a)`. Non-planar quads get an averaged normal.
#[inline]
pub fn quad_normal(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d: &Point3<f64>,
) -> Vector3<f64> {
    let n1 = triangle_normal(a, b, c);
    let n2 = triangle_normal(c, d, a);
    ((n1 + n2) * 0.5).normalize()
}

/// Face normal: [`quad_normal`] for quads, otherwise the normal of the first
/// three vertices.
pub fn face_normal(face: &[Point3<f64>]) -> Vector3<f64> {
    if face.len() == 4 {
        quad_normal(&face[0], &face[1], &face[2], &face[3])
    } else {
        triangle_normal(&face[0], &face[1], &face[2])
    }
}

/// Area of the triangle `(a, b, c)`.
#[inline]
pub fn triangle_area(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> f64 {
    (b - a).cross(&(c - a)).norm() * 0.5
}

/// Face area as the sum of a triangle fan around the first vertex.
pub fn face_area(face: &[Point3<f64>]) -> f64 {
    if face.len() < 3 {
        return 0.0;
    }
    (1..face.len() - 1)
        .map(|i| triangle_area(&face[0], &face[i], &face[i + 1]))
        .sum()
}

/// Sum of the edge lengths, including the closing edge.
pub fn face_perimeter(face: &[Point3<f64>]) -> f64 {
    edges(face).map(|(a, b)| (b - a).norm()).sum()
}

/// Area divided by perimeter.
pub fn face_compactness(face: &[Point3<f64>]) -> f64 {
    face_area(face) / face_perimeter(face)
}

/// Arithmetic mean of the vertices.
pub fn face_center(face: &[Point3<f64>]) -> Point3<f64> {
    let sum: Vector3<f64> = face.iter().map(|p| p.coords).sum();
    Point3::from(sum / face.len() as f64)
}

/// Length of edge `i`, running from vertex `i` to vertex `i + 1` (wrapping).
pub fn face_edge_length(face: &[Point3<f64>], i: usize) -> f64 {
    let a = &face[i % face.len()];
    let b = &face[(i + 1) % face.len()];
    (b - a).norm()
}

/// Ratio of the longest edge to the shortest edge.
pub fn face_proportion(face: &[Point3<f64>]) -> f64 {
    let (min, max) = edges(face)
        .map(|(a, b)| (b - a).norm())
        .fold((f64::INFINITY, 0.0_f64), |(lo, hi), d| (lo.min(d), hi.max(d)));
    max / min
}

/// Inclination of the face normal against the XY plane, in radians.
///
/// `π/2` for a face pointing straight up, `0` for a vertical wall.
pub fn face_angle_vertical(face: &[Point3<f64>]) -> f64 {
    face_normal(face).z.clamp(-1.0, 1.0).asin()
}

/// Angle in radians between the X axis and the first edge projected onto
/// the XY plane.
pub fn face_angle_horizontal(face: &[Point3<f64>]) -> f64 {
    let d = face[1] - face[0];
    Vector3::x().angle(&Vector3::new(d.x, d.y, 0.0))
}

/// Axis-aligned bounds of the face.
pub fn face_bounding_box(face: &[Point3<f64>]) -> (Point3<f64>, Point3<f64>) {
    let mut min = Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY);
    let mut max = Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in face {
        min = min.inf(p);
        max = max.sup(p);
    }
    (min, max)
}

/// Point at fraction `t` of the way from `a` to `b`.
#[inline]
pub fn vertex_between_rel(a: &Point3<f64>, b: &Point3<f64>, t: f64) -> Point3<f64> {
    a + (b - a) * t
}

/// Point at distance `d` from `a` towards `b`.
#[inline]
pub fn vertex_between_abs(a: &Point3<f64>, b: &Point3<f64>, d: f64) -> Point3<f64> {
    vertex_between_rel(a, b, d / (b - a).norm())
}

/// `n + 1` evenly spaced points from `a` to `b`, both ends included.
pub fn vertices_between(a: &Point3<f64>, b: &Point3<f64>, n: usize) -> Vec<Point3<f64>> {
    let step = (b - a) / n as f64;
    let mut row: Vec<Point3<f64>> = (0..n).map(|i| a + step * i as f64).collect();
    row.push(*b);
    row
}

/// Interior angle at `v` of the triangle `(prev, v, next)`, by the law of
/// cosines.
pub fn vertex_angle(prev: &Point3<f64>, v: &Point3<f64>, next: &Point3<f64>) -> f64 {
    let a = (next - v).norm();
    let b = (v - prev).norm();
    let c = (next - prev).norm();
    ((a * a + b * b - c * c) / (2.0 * a * b)).acos()
}

/// Inset a convex polygon by a distance per edge.
///
/// `offsets[i]` is the distance for the edge from vertex `i` to `i + 1`.
/// Positive distances move the edge inward, relative to the winding of the
/// corner it meets. Each new vertex is where the two shifted edge lines
/// around it intersect, so reflex corners and collinear edges give garbage.
pub fn offset_polygon(face: &[Point3<f64>], offsets: &[f64]) -> Vec<Point3<f64>> {
    let n = face.len();
    (0..n)
        .map(|i| {
            let prev = (i + n - 1) % n;
            let next = (i + 1) % n;
            offset_corner(&face[prev], &face[i], &face[next], offsets[prev], offsets[i])
        })
        .collect()
}

/// Intersection of edge `ab` shifted inward by `d_ab` with edge `bc` shifted
/// inward by `d_bc`, within the plane of `abc`.
fn offset_corner(
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
    d_ab: f64,
    d_bc: f64,
) -> Point3<f64> {
    let normal = (b - a).cross(&(c - a)).normalize();
    let dir_ab = (b - a).normalize();
    let dir_bc = (c - b).normalize();
    let in_ab = normal.cross(&dir_ab);
    let in_bc = normal.cross(&dir_bc);

    // Slide along the shifted ab line until it meets the shifted bc line.
    let s = (d_bc - d_ab * in_ab.dot(&in_bc)) / dir_ab.dot(&in_bc);
    b + in_ab * d_ab + dir_ab * s
}

/// Consecutive vertex pairs, including the closing pair.
fn edges(face: &[Point3<f64>]) -> impl Iterator<Item = (&Point3<f64>, &Point3<f64>)> {
    let n = face.len();
    (0..n).map(move |i| (&face[i], &face[(i + 1) % n]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point3<f64>> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn test_normal_follows_winding() {
        let mut face = unit_square();
        assert!((face_normal(&face) - Vector3::z()).norm() < 1e-10);

        face.reverse();
        assert!((face_normal(&face) + Vector3::z()).norm() < 1e-10);

        let tri = &unit_square()[..3];
        assert!((face_normal(tri) - Vector3::z()).norm() < 1e-10);
    }

    #[test]
    fn test_unit_square_measures() {
        let face = unit_square();
        assert!((face_area(&face) - 1.0).abs() < 1e-10);
        assert!((face_perimeter(&face) - 4.0).abs() < 1e-10);
        assert!((face_compactness(&face) - 0.25).abs() < 1e-10);
        assert!((face_center(&face) - Point3::new(0.5, 0.5, 0.0)).norm() < 1e-10);
        assert!((face_proportion(&face) - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_area_of_trapezoid() {
        // Fan triangulation must not double count on non-square quads
        let face = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(3.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        assert!((face_area(&face) - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_angles() {
        let face = unit_square();
        assert!((face_angle_vertical(&face) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
        assert!(face_angle_horizontal(&face).abs() < 1e-10);

        let wall = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        assert!(face_angle_vertical(&wall).abs() < 1e-10);
        assert!((face_angle_horizontal(&wall) - std::f64::consts::FRAC_PI_2).abs() < 1e-10);

        let right = vertex_angle(&face[3], &face[0], &face[1]);
        assert!((right - std::f64::consts::FRAC_PI_2).abs() < 1e-10);
    }

    #[test]
    fn test_vertices_between() {
        let a = Point3::new(0.0, 0.0, 0.0);
        let b = Point3::new(3.0, 0.0, 0.0);
        let row = vertices_between(&a, &b, 3);
        assert_eq!(row.len(), 4);
        assert!((row[1] - Point3::new(1.0, 0.0, 0.0)).norm() < 1e-10);
        assert_eq!(row[3], b);

        let p = vertex_between_abs(&a, &b, 0.5);
        assert!((p - Point3::new(0.5, 0.0, 0.0)).norm() < 1e-10);
    }

    #[test]
    fn test_offset_polygon_insets_square() {
        let face = unit_square();
        let inner = offset_polygon(&face, &[0.1; 4]);
        let expected = [
            Point3::new(0.1, 0.1, 0.0),
            Point3::new(0.9, 0.1, 0.0),
            Point3::new(0.9, 0.9, 0.0),
            Point3::new(0.1, 0.9, 0.0),
        ];
        for (p, e) in inner.iter().zip(expected.iter()) {
            assert!((p - e).norm() < 1e-10, "{:?} != {:?}", p, e);
        }
    }

    #[test]
    fn test_offset_polygon_per_edge() {
        let face = unit_square();
        // Only the bottom edge moves
        let inner = offset_polygon(&face, &[0.25, 0.0, 0.0, 0.0]);
        assert!((inner[0] - Point3::new(0.0, 0.25, 0.0)).norm() < 1e-10);
        assert!((inner[1] - Point3::new(1.0, 0.25, 0.0)).norm() < 1e-10);
        assert!((inner[2] - face[2]).norm() < 1e-10);
        assert!((inner[3] - face[3]).norm() < 1e-10);
    }

    #[test]
    fn test_bounding_box() {
        let (min, max) = face_bounding_box(&unit_square());
        assert_eq!(min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(max, Point3::new(1.0, 1.0, 0.0));
    }
}
