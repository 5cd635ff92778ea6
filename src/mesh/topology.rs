//! Edge and adjacency index derived from a mesh's face lists.
//!
//! A [`Topology`] is an immutable snapshot built by [`Mesh::build_topology`].
//! It is not updated when the mesh changes; build a new one after editing
//! faces.
//!
//! # Edge Records
//!
//! Every unordered vertex pair that appears consecutively in some face becomes
//! one [`Edge`], numbered in the order faces first traverse it. The first
//! traversal fixes the edge's direction `v1 -> v2`. A face that walks the edge
//! in that direction is stored in `face1`; a face walking it backwards is
//! stored in `face2`.
//!
//! With consistently wound two-manifold input every interior edge ends up with
//! both slots filled. A third face on the same edge, or two faces walking it in
//! the same direction, overwrite a slot. Such meshes are not rejected; their
//! adjacency is simply incomplete.

use std::collections::HashMap;

use super::polymesh::Mesh;

/// An undirected edge with up to two incident faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Start vertex of the first traversal.
    pub v1: usize,
    /// End vertex of the first traversal.
    pub v2: usize,
    /// Face walking `v1 -> v2`.
    pub face1: Option<usize>,
    /// Face walking `v2 -> v1`.
    pub face2: Option<usize>,
}

impl Edge {
    /// True unless both face slots are filled.
    #[inline]
    pub fn is_boundary(&self) -> bool {
        self.face1.is_none() || self.face2.is_none()
    }

    /// The endpoint that is not `v`.
    #[inline]
    pub fn other(&self, v: usize) -> usize {
        if self.v1 == v {
            self.v2
        } else {
            self.v1
        }
    }

    /// The face that leaves `v` along this edge.
    #[inline]
    pub fn face_from(&self, v: usize) -> Option<usize> {
        if self.v1 == v {
            self.face1
        } else {
            self.face2
        }
    }

    /// Endpoints as `(v1, v2)`.
    #[inline]
    pub fn vertices(&self) -> (usize, usize) {
        (self.v1, self.v2)
    }
}

/// Adjacency snapshot of a [`Mesh`].
#[derive(Debug, Clone)]
pub struct Topology {
    edges: Vec<Edge>,
    vertex_edges: Vec<Vec<usize>>,
    face_edges: Vec<Vec<usize>>,
}

impl Topology {
    /// Scan all faces of `mesh` and build the edge index.
    ///
    /// Runs in time linear in the total face degree.
    pub fn new(mesh: &Mesh) -> Self {
        let mut edges: Vec<Edge> = Vec::new();
        let mut vertex_edges: Vec<Vec<usize>> = vec![Vec::new(); mesh.num_vertices()];
        let mut face_edges: Vec<Vec<usize>> = Vec::with_capacity(mesh.num_faces());
        let mut edge_map: HashMap<(usize, usize), usize> = HashMap::new();

        for (f, face) in mesh.faces().iter().enumerate() {
            let n = face.len();
            let mut ring = Vec::with_capacity(n);

            for j in 0..n {
                let a = face[j];
                let b = face[(j + 1) % n];
                let key = if a < b { (a, b) } else { (b, a) };

                let e = *edge_map.entry(key).or_insert_with(|| {
                    edges.push(Edge {
                        v1: a,
                        v2: b,
                        face1: None,
                        face2: None,
                    });
                    vertex_edges[a].push(edges.len() - 1);
                    if a != b {
                        vertex_edges[b].push(edges.len() - 1);
                    }
                    edges.len() - 1
                });

                let edge = &mut edges[e];
                if edge.v1 == a {
                    edge.face1 = Some(f);
                } else {
                    edge.face2 = Some(f);
                }
                ring.push(e);
            }

            face_edges.push(ring);
        }

        Self {
            edges,
            vertex_edges,
            face_edges,
        }
    }

    // ==================== Accessors ====================

    /// Number of edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// All edges, in creation order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Edge `e`.
    #[inline]
    pub fn edge(&self, e: usize) -> &Edge {
        &self.edges[e]
    }

    /// Edges touching vertex `v`, in creation order.
    #[inline]
    pub fn vertex_edges(&self, v: usize) -> &[usize] {
        &self.vertex_edges[v]
    }

    /// Edges of face `f`; entry `j` runs from face vertex `j` to `j + 1`.
    #[inline]
    pub fn face_edges(&self, f: usize) -> &[usize] {
        &self.face_edges[f]
    }

    // ==================== Topology Queries ====================

    /// The edge joining `a` and `b`, in either direction.
    pub fn edge_between(&self, a: usize, b: usize) -> Option<usize> {
        self.vertex_edges[a]
            .iter()
            .copied()
            .find(|&e| self.edges[e].other(a) == b)
    }

    /// The face that walks from `a` to `b`.
    pub fn face_on_edge(&self, a: usize, b: usize) -> Option<usize> {
        self.edge_between(a, b)
            .and_then(|e| self.edges[e].face_from(a))
    }

    /// Neighbors across each edge of face `f`, `None` on the boundary.
    pub fn face_neighbors(&self, f: usize) -> Vec<Option<usize>> {
        self.face_edges[f]
            .iter()
            .map(|&e| {
                let edge = &self.edges[e];
                if edge.face1 == Some(f) {
                    edge.face2
                } else {
                    edge.face1
                }
            })
            .collect()
    }

    /// Vertices sharing an edge with `v`.
    pub fn vertex_neighbors(&self, v: usize) -> Vec<usize> {
        self.vertex_edges[v]
            .iter()
            .map(|&e| self.edges[e].other(v))
            .collect()
    }

    /// Faces around `v`: for each incident edge, the face leaving `v` along it.
    ///
    /// On a boundary vertex of a consistently wound mesh this lists every face
    /// once but returns fewer faces than [`vertex_neighbors`](Self::vertex_neighbors)
    /// returns vertices.
    pub fn vertex_faces(&self, v: usize) -> Vec<usize> {
        self.vertex_edges[v]
            .iter()
            .filter_map(|&e| self.edges[e].face_from(v))
            .collect()
    }

    /// Edges sharing an endpoint with `e`, excluding `e` itself.
    pub fn edge_neighbors(&self, e: usize) -> Vec<usize> {
        let edge = &self.edges[e];
        self.vertex_edges[edge.v1]
            .iter()
            .chain(&self.vertex_edges[edge.v2])
            .copied()
            .filter(|&other| other != e)
            .collect()
    }

    /// True if edge `e` has fewer than two faces.
    #[inline]
    pub fn is_boundary_edge(&self, e: usize) -> bool {
        self.edges[e].is_boundary()
    }

    /// True if any edge at `v` is a boundary edge.
    pub fn is_boundary_vertex(&self, v: usize) -> bool {
        self.vertex_edges[v].iter().any(|&e| self.edges[e].is_boundary())
    }

    /// Indices of all boundary edges.
    pub fn boundary_edges(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.edges.len()).filter(move |&e| self.edges[e].is_boundary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::primitives::create_box;
    use nalgebra::Point3;

    fn create_two_quads() -> Mesh {
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

    #[test]
    fn test_edges_in_first_seen_order() {
        let topo = create_two_quads().build_topology();
        assert_eq!(topo.num_edges(), 7);

        let pairs: Vec<(usize, usize)> = topo.edges().iter().map(Edge::vertices).collect();
        assert_eq!(
            pairs,
            vec![(0, 1), (1, 2), (2, 3), (3, 0), (1, 4), (4, 5), (5, 2)]
        );
    }

    #[test]
    fn test_shared_edge_has_both_faces() {
        let topo = create_two_quads().build_topology();
        let shared = topo.edge_between(2, 1).unwrap();
        assert_eq!(shared, topo.edge_between(1, 2).unwrap());

        let edge = topo.edge(shared);
        assert_eq!(edge.face1, Some(0));
        assert_eq!(edge.face2, Some(1));
        assert!(!edge.is_boundary());

        assert_eq!(topo.face_on_edge(1, 2), Some(0));
        assert_eq!(topo.face_on_edge(2, 1), Some(1));
        assert_eq!(topo.boundary_edges().count(), 6);
    }

    #[test]
    fn test_face_neighbors() {
        let topo = create_two_quads().build_topology();
        assert_eq!(topo.face_neighbors(0), vec![None, Some(1), None, None]);
        assert_eq!(topo.face_neighbors(1), vec![None, None, None, Some(0)]);
    }

    #[test]
    fn test_vertex_queries() {
        let topo = create_two_quads().build_topology();

        let mut around_1 = topo.vertex_neighbors(1);
        around_1.sort_unstable();
        assert_eq!(around_1, vec![0, 2, 4]);

        let mut faces_1 = topo.vertex_faces(1);
        faces_1.sort_unstable();
        assert_eq!(faces_1, vec![0, 1]);

        assert!(topo.is_boundary_vertex(1));
        assert_eq!(topo.vertex_faces(4), vec![1]);
    }

    #[test]
    fn test_edge_neighbors_excludes_self() {
        let topo = create_two_quads().build_topology();
        let shared = topo.edge_between(1, 2).unwrap();
        let mut around = topo.edge_neighbors(shared);
        around.sort_unstable();

        // Edges at vertex 1: 0-1, 1-4. Edges at vertex 2: 2-3, 5-2.
        let mut expected = vec![
            topo.edge_between(0, 1).unwrap(),
            topo.edge_between(1, 4).unwrap(),
            topo.edge_between(2, 3).unwrap(),
            topo.edge_between(5, 2).unwrap(),
        ];
        expected.sort_unstable();
        assert_eq!(around, expected);
    }

    #[test]
    fn test_closed_box_is_manifold() {
        let mesh = create_box(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let topo = mesh.build_topology();

        assert_eq!(topo.num_edges(), 12);
        assert_eq!(topo.boundary_edges().count(), 0);
        for v in 0..mesh.num_vertices() {
            assert_eq!(topo.vertex_faces(v).len(), 3);
            assert_eq!(topo.vertex_neighbors(v).len(), 3);
            assert!(!topo.is_boundary_vertex(v));
        }
        for f in 0..mesh.num_faces() {
            assert!(topo.face_neighbors(f).iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_snapshot_is_not_updated() {
        let mut mesh = create_two_quads();
        let topo = mesh.build_topology();
        mesh.add_triangle(3, 2, 5);
        assert_eq!(topo.num_edges(), 7);
        assert_eq!(mesh.build_topology().num_edges(), 8);
    }
}
