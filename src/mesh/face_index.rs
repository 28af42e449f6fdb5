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

use crate::{
    geometry::{
        Aabb, AabbTree,
        tri_tri_intersect::{segment_triangle_intersect, tri_tri_overlap},
    },
    mesh::{
        basic_types::{FaceId, Mesh, VertexId},
        topology::shared_vertex_count,
    },
    numeric::scalar::Scalar,
};

/// Spatial index over mesh faces answering "does this triangle cut the mesh".
///
/// The index stores face ids only; positions are read from the mesh at query
/// time, and faces removed since the last build are ignored.
#[derive(Clone, Debug)]
pub struct FaceIndex<T: Scalar> {
    tree: Option<AabbTree<T, FaceId>>,
}

impl<T: Scalar> FaceIndex<T> {
    /// Index every live face of `mesh`.
    pub fn build(mesh: &Mesh<T>) -> Self {
        let items = mesh
            .faces
            .iter()
            .enumerate()
            .filter(|(_, f)| !f.removed)
            .map(|(i, _)| (mesh.face_aabb(i), i))
            .collect();
        FaceIndex {
            tree: AabbTree::build(items),
        }
    }

    pub fn insert(&mut self, mesh: &Mesh<T>, f: FaceId) {
        let aabb = mesh.face_aabb(f);
        self.tree = Some(match self.tree.take() {
            Some(tree) => tree.insert(aabb, f),
            None => AabbTree::Leaf { aabb, data: f },
        });
    }

    pub fn len(&self) -> usize {
        self.tree.as_ref().map_or(0, |t| t.size())
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_none()
    }

    /// Does the triangle on vertices `tri` intersect any live indexed face
    /// other than those in `skip`?
    pub fn triangle_intersects(&self, mesh: &Mesh<T>, tri: &[VertexId; 3], skip: &[FaceId]) -> bool {
        let Some(tree) = &self.tree else {
            return false;
        };
        let bb = Aabb::from_triangle(&mesh.triangle_points(tri));
        let mut hits = Vec::new();
        tree.query(&bb, &mut hits);
        hits.into_iter().any(|&g| {
            !mesh.faces[g].removed
                && !skip.contains(&g)
                && triangles_intersect(mesh, tri, &mesh.faces[g].vertices)
        })
    }

    /// Does live face `f` intersect any other indexed face?
    pub fn face_intersects(&self, mesh: &Mesh<T>, f: FaceId) -> bool {
        let tri = mesh.faces[f].vertices;
        self.triangle_intersects(mesh, &tri, &[f])
    }
}

/// Intersection test between two mesh triangles given by vertex ids.
///
/// Triangles sharing an edge never intersect. Triangles sharing one vertex
/// intersect only if the edge opposite the shared vertex of either one cuts
/// the other. Disjoint triangles get a full triangle-triangle test.
pub fn triangles_intersect<T: Scalar>(mesh: &Mesh<T>, a: &[VertexId; 3], b: &[VertexId; 3]) -> bool {
    match shared_vertex_count(a, b) {
        0 => tri_tri_overlap(&mesh.triangle_points(a), &mesh.triangle_points(b)),
        1 => {
            let pa = mesh.triangle_points(a);
            let pb = mesh.triangle_points(b);
            let Some(ia) = a.iter().position(|v| b.contains(v)) else {
                return false;
            };
            let Some(ib) = b.iter().position(|v| *v == a[ia]) else {
                return false;
            };
            let (a1, a2) = (pa[(ia + 1) % 3], pa[(ia + 2) % 3]);
            let (b1, b2) = (pb[(ib + 1) % 3], pb[(ib + 2) % 3]);
            segment_triangle_intersect(&a1, &a2, &pb) || segment_triangle_intersect(&b1, &b2, &pa)
        }
        _ => false,
    }
}
