// SPDX-License-Identifier: MIT
//
// Copyright (c) 2025 Alexandre Severino
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

use ahash::AHashMap;
use smallvec::SmallVec;
use tracing::warn;

use crate::{
    error::{HoleEditError, HoleEditResult},
    geometry::{Aabb, Point3, Vector3, quality::triangle_normal},
    impl_mesh,
    mesh::basic_types::*,
};

impl_mesh! {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn add_vertex(&mut self, position: Point3<T>) -> VertexId {
        let idx = self.vertices.len();
        self.vertices.push(Vertex::new(position));
        idx
    }

    /// Adds a triangle with all edges on the border. Call
    /// [`Mesh::build_adjacency`] once all triangles are in.
    pub fn add_triangle(&mut self, v0: VertexId, v1: VertexId, v2: VertexId) -> FaceId {
        let face_idx = self.faces.len();
        self.faces.push(Face::new(face_idx, [v0, v1, v2]));
        face_idx
    }

    /// Rebuild face-face adjacency of all live faces from scratch.
    ///
    /// Edges shared by exactly two faces are linked; edges with one incident
    /// face stay border. Edges with more than two incident faces are left as
    /// border on every side. Returns the number of such non-manifold edges.
    pub fn build_adjacency(&mut self) -> usize {
        let mut edge_map: AHashMap<(VertexId, VertexId), SmallVec<[(FaceId, usize); 2]>> =
            AHashMap::with_capacity(self.faces.len() * 3 / 2 + 1);

        for (f, face) in self.faces.iter_mut().enumerate() {
            face.adj_face = [f; 3];
            face.adj_edge = [0, 1, 2];
            if face.removed {
                continue;
            }
            for e in 0..3 {
                let a = face.vertices[e];
                let b = face.vertices[(e + 1) % 3];
                let key = if a < b { (a, b) } else { (b, a) };
                edge_map.entry(key).or_default().push((f, e));
            }
        }

        let mut non_manifold = 0usize;
        for incident in edge_map.values() {
            match incident.as_slice() {
                [(f, e), (g, h)] => self.set_adjacent(*f, *e, *g, *h),
                [_] => {}
                _ => non_manifold += 1,
            }
        }
        if non_manifold > 0 {
            warn!(non_manifold, "edges with more than two faces left as border");
        }
        non_manifold
    }

    /// Number of live faces.
    pub fn face_count(&self) -> usize {
        self.faces.iter().filter(|f| !f.removed).count()
    }

    pub fn face_vertices(&self, f: FaceId) -> [VertexId; 3] {
        self.faces[f].vertices
    }

    pub fn position(&self, v: VertexId) -> Point3<T> {
        self.vertices[v].position
    }

    pub fn triangle_points(&self, vs: &[VertexId; 3]) -> [Point3<T>; 3] {
        vs.map(|v| self.vertices[v].position)
    }

    pub fn face_points(&self, f: FaceId) -> [Point3<T>; 3] {
        self.triangle_points(&self.faces[f].vertices)
    }

    /// Unit normal of face `f` following its winding.
    pub fn face_normal(&self, f: FaceId) -> Vector3<T> {
        let [p0, p1, p2] = self.face_points(f);
        triangle_normal(&p0, &p1, &p2)
    }

    /// Compute the AABB of face `f`.
    pub fn face_aabb(&self, f: FaceId) -> Aabb<T> {
        Aabb::from_triangle(&self.face_points(f))
    }

    pub fn is_border_edge(&self, f: FaceId, e: usize) -> bool {
        self.faces[f].adj_face[e] == f
    }

    pub fn border_edge_count(&self, f: FaceId) -> usize {
        (0..3).filter(|&e| self.is_border_edge(f, e)).count()
    }

    pub fn adjacent_face(&self, f: FaceId, e: usize) -> FaceId {
        self.faces[f].adj_face[e]
    }

    /// Link edge `e` of `f` with edge `h` of `g`, both ways.
    pub fn set_adjacent(&mut self, f: FaceId, e: usize, g: FaceId, h: usize) {
        self.faces[f].adj_face[e] = g;
        self.faces[f].adj_edge[e] = h;
        self.faces[g].adj_face[h] = f;
        self.faces[g].adj_edge[h] = e;
    }

    /// Turn edge `e` of `f` into a border self-loop. The face on the other
    /// side is not touched.
    pub fn detach_edge(&mut self, f: FaceId, e: usize) {
        self.faces[f].adj_face[e] = f;
        self.faces[f].adj_edge[e] = e;
    }

    /// Make room for `count` faces in one allocation.
    ///
    /// On failure nothing was added and the mesh is unchanged.
    pub fn reserve_faces(&mut self, count: usize) -> HoleEditResult<()> {
        self.faces
            .try_reserve(count)
            .map_err(|_| HoleEditError::FaceAllocation { requested: count })
    }

    /// Delete face `f`: its neighbours' links back to it become border and the
    /// slot is flagged removed.
    pub fn delete_face(&mut self, f: FaceId) {
        for e in 0..3 {
            let g = self.faces[f].adj_face[e];
            if g != f && !self.faces[g].removed {
                let h = self.faces[f].adj_edge[e];
                if self.faces[g].adj_face[h] == f {
                    self.detach_edge(g, h);
                }
            }
        }
        self.faces[f].removed = true;
        self.faces[f].adj_face = [f; 3];
        self.faces[f].adj_edge = [0, 1, 2];
    }

    /// Check that every link of every live face is mirrored by its neighbour.
    pub fn check_ff_topology(&self) -> bool {
        for (f, face) in self.faces.iter().enumerate() {
            if face.removed {
                continue;
            }
            for e in 0..3 {
                let g = face.adj_face[e];
                let h = face.adj_edge[e];
                if g >= self.faces.len() || h > 2 {
                    return false;
                }
                if g == f {
                    if h != e {
                        return false;
                    }
                    continue;
                }
                let other = &self.faces[g];
                if other.removed || other.adj_face[h] != f || other.adj_edge[h] != e {
                    return false;
                }
                let a = face.vertices[e];
                let b = face.vertices[(e + 1) % 3];
                if !(other.has_vertex(a) && other.has_vertex(b)) {
                    return false;
                }
            }
        }
        true
    }
}
