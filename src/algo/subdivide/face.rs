//! Single-face subdivision.
//!
//! Every function here takes the ordered positions of one face and returns the
//! faces that replace it, each as its own list of positions. Nothing is shared
//! between output faces; [`MeshSubdivider`](super::MeshSubdivider) turns the
//! lists back into a mesh.
//!
//! All outputs keep the winding of the input face, so normals of the new faces
//! agree with the input normal (or point outward, for extrusion sides).
//!
//! Only [`roof`] rejects input. The other functions accept any face and
//! produce distorted output for non-planar or non-convex faces.

use nalgebra::Point3;
use rand::Rng;

use crate::error::{MeshError, Result};
use crate::mesh::geometry::{
    face_center, face_normal, offset_polygon, vertex_angle, vertex_between_abs,
    vertex_between_rel, vertices_between,
};

/// Axis along which the linear splits cut a quad into strips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitDirection {
    /// Strips follow edge `v0 -> v1`; cuts run parallel to `v1 -> v2`.
    #[default]
    U,
    /// Strips follow edge `v0 -> v3`; cuts run parallel to `v0 -> v1`.
    V,
}

// ==================== Grid ====================

/// Split a quad into `nu × nv` quads, or a triangle into `nv` triangles at
/// vertex 0 followed by `(nu - 1) × nv` quads.
///
/// Quads are interpolated bilinearly: `nu` cuts along `v0 -> v1` and
/// `v3 -> v2`, `nv` cuts between them. Faces of any other degree produce no
/// output. `nu` and `nv` must be at least 1.
pub fn grid(face: &[Point3<f64>], nu: usize, nv: usize) -> Vec<Vec<Point3<f64>>> {
    match face.len() {
        4 => grid_quad(face, nu, nv),
        3 => grid_triangle(face, nu, nv),
        _ => Vec::new(),
    }
}

fn grid_quad(face: &[Point3<f64>], nu: usize, nv: usize) -> Vec<Vec<Point3<f64>>> {
    let bottom = vertices_between(&face[0], &face[1], nu);
    let top = vertices_between(&face[3], &face[2], nu);
    let columns: Vec<Vec<Point3<f64>>> = bottom
        .iter()
        .zip(&top)
        .map(|(a, b)| vertices_between(a, b, nv))
        .collect();

    let mut faces = Vec::with_capacity(nu * nv);
    for pair in columns.windows(2) {
        let (c1, c2) = (&pair[0], &pair[1]);
        for v in 0..nv {
            faces.push(vec![c1[v], c2[v], c2[v + 1], c1[v + 1]]);
        }
    }
    faces
}

fn grid_triangle(face: &[Point3<f64>], nu: usize, nv: usize) -> Vec<Vec<Point3<f64>>> {
    let side1 = vertices_between(&face[0], &face[1], nu);
    let side2 = vertices_between(&face[0], &face[2], nu);
    let rows: Vec<Vec<Point3<f64>>> = (1..=nu)
        .map(|u| vertices_between(&side1[u], &side2[u], nv))
        .collect();

    let mut faces = Vec::with_capacity(nu * nv);
    let first = &rows[0];
    for v in 0..nv {
        faces.push(vec![face[0], first[v], first[v + 1]]);
    }
    for pair in rows.windows(2) {
        let (r1, r2) = (&pair[0], &pair[1]);
        for v in 0..nv {
            faces.push(vec![r1[v], r2[v], r2[v + 1], r1[v + 1]]);
        }
    }
    faces
}

/// [`grid`] with cell sizes instead of counts.
///
/// `nu = floor(|v0 v1| / x)` and `nv = floor(|v1 v2| / y)`, each at least 1,
/// so cells are never smaller than the requested size.
pub fn grid_abs(face: &[Point3<f64>], x: f64, y: f64) -> Vec<Vec<Point3<f64>>> {
    let nu = ((face[1] - face[0]).norm() / x) as usize;
    let nv = ((face[2] - face[1]).norm() / y) as usize;
    grid(face, nu.max(1), nv.max(1))
}

// ==================== Linear Splits ====================
//
// The linear splits only cut quads. Other faces are returned unchanged.

/// Cut a quad into strips of random width in `[min_width, max_width)`.
///
/// Strips are laid out from `v0` until less than `min_width` remains; the last
/// strip absorbs the remainder, so it can be narrower than `min_width` only if
/// the whole quad is. A quad narrower than `min_width` comes back whole.
/// `min_width` must be positive.
pub fn linear_split_quad<R: Rng>(
    face: &[Point3<f64>],
    min_width: f64,
    max_width: f64,
    direction: SplitDirection,
    rng: &mut R,
) -> Vec<Vec<Point3<f64>>> {
    if face.len() != 4 {
        return vec![face.to_vec()];
    }
    let total = strip_length(face, direction);
    let mut starts = vec![0.0];
    let mut c = min_width + rng.gen::<f64>() * (max_width - min_width);
    while c < total - min_width {
        starts.push(c / total);
        c += min_width + rng.gen::<f64>() * (max_width - min_width);
    }
    strips(face, direction, &starts)
}

/// Cut a quad into `floor(len / max_width) + 1` equal strips, each narrower
/// than `max_width`. An edge that is an exact multiple of `max_width` gets one
/// strip more than needed.
pub fn linear_split_quad_max_width(
    face: &[Point3<f64>],
    max_width: f64,
    direction: SplitDirection,
) -> Vec<Vec<Point3<f64>>> {
    if face.len() != 4 {
        return vec![face.to_vec()];
    }
    let total = strip_length(face, direction);
    let n = (total / max_width) as usize + 1;
    let starts: Vec<f64> = (0..n).map(|i| i as f64 / n as f64).collect();
    strips(face, direction, &starts)
}

/// Cut a quad into three strips: a border of width `border1` at the start, a
/// border of width `border2` at the end, and the middle.
pub fn linear_split_quad_border(
    face: &[Point3<f64>],
    border1: f64,
    border2: f64,
    direction: SplitDirection,
) -> Vec<Vec<Point3<f64>>> {
    if face.len() != 4 {
        return vec![face.to_vec()];
    }
    let total = strip_length(face, direction);
    strips(
        face,
        direction,
        &[0.0, border1 / total, 1.0 - border2 / total],
    )
}

fn strip_length(face: &[Point3<f64>], direction: SplitDirection) -> f64 {
    match direction {
        SplitDirection::U => (face[1] - face[0]).norm(),
        SplitDirection::V => (face[3] - face[0]).norm(),
    }
}

/// Build one quad per strip. `starts` are the strip start fractions along
/// both rails; the rail end points close the last strip.
fn strips(
    face: &[Point3<f64>],
    direction: SplitDirection,
    starts: &[f64],
) -> Vec<Vec<Point3<f64>>> {
    let (a0, a1, b0, b1) = match direction {
        SplitDirection::U => (face[0], face[1], face[3], face[2]),
        SplitDirection::V => (face[0], face[3], face[1], face[2]),
    };

    let mut rail_a: Vec<Point3<f64>> = starts
        .iter()
        .map(|&t| vertex_between_rel(&a0, &a1, t))
        .collect();
    let mut rail_b: Vec<Point3<f64>> = starts
        .iter()
        .map(|&t| vertex_between_rel(&b0, &b1, t))
        .collect();
    rail_a.push(a1);
    rail_b.push(b1);

    (0..rail_a.len() - 1)
        .map(|i| match direction {
            SplitDirection::U => vec![rail_a[i], rail_a[i + 1], rail_b[i + 1], rail_b[i]],
            SplitDirection::V => vec![rail_a[i], rail_b[i], rail_b[i + 1], rail_a[i + 1]],
        })
        .collect()
}

// ==================== Extrusion ====================

/// Extrude a face along its normal.
///
/// Returns one side quad per edge, `{v[i], v[i+1], top[i+1], top[i]}`, followed
/// by the top face when `cap_top` is set.
pub fn extrude(face: &[Point3<f64>], height: f64, cap_top: bool) -> Vec<Vec<Point3<f64>>> {
    let offset = face_normal(face) * height;
    let top: Vec<Point3<f64>> = face.iter().map(|v| v + offset).collect();
    sides_and_cap(face, top, cap_top)
}

/// Extrude a face along its normal while pulling the top toward the face
/// center by `fraction` (0 keeps the size, 1 collapses to the center).
pub fn extrude_tapered(
    face: &[Point3<f64>],
    height: f64,
    fraction: f64,
    cap_top: bool,
) -> Vec<Vec<Point3<f64>>> {
    let center = face_center(face);
    let offset = face_normal(face) * height;
    let top: Vec<Point3<f64>> = face
        .iter()
        .map(|v| v + (center - v) * fraction + offset)
        .collect();
    sides_and_cap(face, top, cap_top)
}

/// One triangle per edge, `{v[i], v[i+1], apex}`.
pub fn extrude_to_point(face: &[Point3<f64>], apex: &Point3<f64>) -> Vec<Vec<Point3<f64>>> {
    let n = face.len();
    (0..n).map(|i| vec![face[i], face[(i + 1) % n], *apex]).collect()
}

/// [`extrude_to_point`] with the apex `height` above the face center.
pub fn extrude_to_point_center(face: &[Point3<f64>], height: f64) -> Vec<Vec<Point3<f64>>> {
    let apex = face_center(face) + face_normal(face) * height;
    extrude_to_point(face, &apex)
}

fn sides_and_cap(
    face: &[Point3<f64>],
    top: Vec<Point3<f64>>,
    cap: bool,
) -> Vec<Vec<Point3<f64>>> {
    let n = face.len();
    let mut faces: Vec<Vec<Point3<f64>>> = (0..n)
        .map(|i| {
            let j = (i + 1) % n;
            vec![face[i], face[j], top[j], top[i]]
        })
        .collect();
    if cap {
        faces.push(top);
    }
    faces
}

// ==================== Offset and Frame ====================

/// Inset a convex face by `distance` on every edge.
///
/// Returns one border quad per edge followed by the inner face.
pub fn offset(face: &[Point3<f64>], distance: f64) -> Vec<Vec<Point3<f64>>> {
    offset_per_edge(face, &vec![distance; face.len()])
}

/// Inset a convex face with a separate distance per edge; `distances[i]`
/// belongs to the edge from vertex `i` to `i + 1`.
///
/// # Panics
///
/// Panics if `distances` is shorter than the face.
pub fn offset_per_edge(face: &[Point3<f64>], distances: &[f64]) -> Vec<Vec<Point3<f64>>> {
    let inner = offset_polygon(face, distances);
    sides_and_cap(face, inner, true)
}

/// Split a convex face into a frame of constant width `width` around an inner
/// face.
///
/// Each corner contributes two quads: the corner square and the bar along the
/// following edge. The widths measured along the edges are corrected by
/// `1 / sin(angle)` so the bars keep their width at acute and obtuse corners.
/// The inner face comes last.
pub fn frame(face: &[Point3<f64>], width: f64) -> Vec<Vec<Point3<f64>>> {
    let n = face.len();
    let mut faces = Vec::with_capacity(2 * n + 1);
    let mut inner = Vec::with_capacity(n);

    for i in 0..n {
        let vp = face[(i + n - 1) % n];
        let v = face[i];
        let vn = face[(i + 1) % n];
        let vnn = face[(i + 2) % n];

        let w1 = width / vertex_angle(&vp, &v, &vn).sin();
        let w2 = width / vertex_angle(&v, &vn, &vnn).sin();

        let outer = frame_row(&v, &vn, w1, w2);
        let start = frame_row(&vp, &v, w1, w1)[2];
        let end = frame_row(&vn, &vnn, w2, w2)[1];
        let bar = frame_row(&start, &end, w1, w2);

        inner.push(bar[1]);
        faces.push(vec![outer[0], outer[1], bar[1], bar[0]]);
        faces.push(vec![outer[1], outer[2], bar[2], bar[1]]);
    }

    faces.push(inner);
    faces
}

/// `[a, a + w1 toward b, b + w2 toward a, b]`.
fn frame_row(a: &Point3<f64>, b: &Point3<f64>, w1: f64, w2: f64) -> [Point3<f64>; 4] {
    [
        *a,
        vertex_between_abs(a, b, w1),
        vertex_between_abs(b, a, w2),
        *b,
    ]
}

// ==================== Roof ====================

/// Build a pitched roof over a quad or triangle.
///
/// For a quad, the ridge runs from above the midpoint of edge `v0 v1` to above
/// the midpoint of edge `v2 v3`, `height` along the face normal. Each ridge end
/// is then pulled toward the other by `gable_inset` (a fraction of the ridge
/// length) to hip the gables. The result is the gable triangle over `v0 v1`,
/// the slope over `v1 v2`, the gable over `v2 v3` and the slope over `v3 v0`.
///
/// For a triangle, the ridge runs above the midpoints of `v0 v1` and `v1 v2`
/// and `gable_inset` is ignored.
///
/// # Errors
///
/// [`MeshError::InvalidFaceDegree`] for any other face.
pub fn roof(
    face: &[Point3<f64>],
    height: f64,
    gable_inset: f64,
) -> Result<Vec<Vec<Point3<f64>>>> {
    let lift = face_normal(face) * height;
    let mid = |a: usize, b: usize| Point3::from((face[a].coords + face[b].coords) * 0.5) + lift;

    match face.len() {
        4 => {
            let mut ridge1 = mid(0, 1);
            let mut ridge2 = mid(2, 3);
            let inset = (ridge2 - ridge1) * gable_inset;
            ridge1 += inset;
            ridge2 -= inset;
            Ok(vec![
                vec![face[0], face[1], ridge1],
                vec![face[1], face[2], ridge2, ridge1],
                vec![face[2], face[3], ridge2],
                vec![face[3], face[0], ridge1, ridge2],
            ])
        }
        3 => {
            let ridge1 = mid(0, 1);
            let ridge2 = mid(1, 2);
            Ok(vec![
                vec![face[0], face[1], ridge1],
                vec![face[1], ridge2, ridge1],
                vec![face[1], face[2], ridge2],
                vec![face[2], face[0], ridge1, ridge2],
            ])
        }
        degree => Err(MeshError::InvalidFaceDegree {
            operation: "roof",
            degree,
        }),
    }
}
