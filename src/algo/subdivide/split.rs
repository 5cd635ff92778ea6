//! Randomized relative split of quads.

use rand::Rng;

use crate::mesh::{Color, Mesh};

/// Cut every quad in two along a line between two opposite edges.
///
/// With the corners renamed `v0..v3` starting at corner `start`, the cut runs
/// from `s1` at fraction `t1` along `v0 -> v1` to `s2` at fraction `t2` along
/// `v2 -> v3`, with `t1` drawn from `[min1, max1)` and `t2` from
/// `[min2, max2)`. Each face becomes `{s2, s1, v1, v2}` followed by
/// `{s1, s2, v3, ..., v0}`.
///
/// Unlike the [`MeshSubdivider`](super::MeshSubdivider) operations, the
/// original vertices are shared by the output and only the two cut points are
/// added per face, so neighboring faces stay connected at their corners. All
/// colors are reset to white.
///
/// Triangles are cut from `v0 -> v1` to `v2 -> v0`.
pub fn split_relative<R: Rng>(
    mesh: &Mesh,
    start: usize,
    (min1, max1): (f64, f64),
    (min2, max2): (f64, f64),
    rng: &mut R,
) -> Mesh {
    let mut result = mesh.copy_vertices();

    for face in mesh.faces() {
        let n = face.len();
        let corner = |k: usize| face[(start + k) % n];
        let (v0, v1, v2, v3) = (corner(0), corner(1), corner(2), corner(3));

        let t1 = min1 + rng.gen::<f64>() * (max1 - min1);
        let t2 = min2 + rng.gen::<f64>() * (max2 - min2);
        let p1 = mesh.position(v0) + (mesh.position(v1) - mesh.position(v0)) * t1;
        let p2 = mesh.position(v2) + (mesh.position(v3) - mesh.position(v2)) * t2;
        let s1 = result.add_vertex(p1);
        let s2 = result.add_vertex(p2);

        result.add_quad(s2, s1, v1, v2);
        let mut rest = vec![s1, s2];
        rest.extend((3..n + 1).map(corner));
        result.add_face(rest);
    }

    result.set_color_all(Color::WHITE);
    log::debug!(
        "split_relative: {} faces -> {} faces",
        mesh.num_faces(),
        result.num_faces()
    );
    result
}
