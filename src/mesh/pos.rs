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
    mesh::basic_types::{FaceId, Mesh, VertexId},
    numeric::scalar::Scalar,
};

/// Half-edge cursor: face `f`, local edge `z` and the current endpoint `v`
/// of that edge.
///
/// Equality is structural. Walking a border loop with [`Pos::next_b`] keeps
/// `v` on the vertex reached last, so the loop visits its vertices in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    pub f: FaceId,
    pub z: usize,
    pub v: VertexId,
}

impl Pos {
    /// Cursor on edge `z` of `f`, with `v` at the edge's first vertex.
    pub fn new<T: Scalar>(mesh: &Mesh<T>, f: FaceId, z: usize) -> Self {
        Pos {
            f,
            z,
            v: mesh.faces[f].vertices[z],
        }
    }

    pub fn is_border<T: Scalar>(&self, mesh: &Mesh<T>) -> bool {
        mesh.is_border_edge(self.f, self.z)
    }

    /// First vertex of the edge in face winding order.
    pub fn v0<T: Scalar>(&self, mesh: &Mesh<T>) -> VertexId {
        mesh.faces[self.f].vertices[self.z]
    }

    /// Second vertex of the edge in face winding order.
    pub fn v1<T: Scalar>(&self, mesh: &Mesh<T>) -> VertexId {
        mesh.faces[self.f].vertices[(self.z + 1) % 3]
    }

    /// The endpoint of the edge that is not `v`.
    pub fn vflip<T: Scalar>(&self, mesh: &Mesh<T>) -> VertexId {
        let v0 = self.v0(mesh);
        if v0 == self.v { self.v1(mesh) } else { v0 }
    }

    /// Local index of `v` in the current face.
    pub fn v_ind<T: Scalar>(&self, mesh: &Mesh<T>) -> usize {
        if self.v0(mesh) == self.v {
            self.z
        } else {
            (self.z + 1) % 3
        }
    }

    /// Swap the current vertex with the other endpoint of the edge.
    pub fn flip_v<T: Scalar>(&mut self, mesh: &Mesh<T>) {
        self.v = self.vflip(mesh);
    }

    /// Move to the other edge of the face incident on `v`.
    pub fn flip_e<T: Scalar>(&mut self, mesh: &Mesh<T>) {
        self.z = if self.v1(mesh) == self.v {
            (self.z + 1) % 3
        } else {
            (self.z + 2) % 3
        };
    }

    /// Cross the current edge into the adjacent face. A border edge leads
    /// back to the same face and edge.
    pub fn flip_f<T: Scalar>(&mut self, mesh: &Mesh<T>) {
        let face = &mesh.faces[self.f];
        let (nf, nz) = (face.adj_face[self.z], face.adj_edge[self.z]);
        self.f = nf;
        self.z = nz;
    }

    /// Advance to the next border edge of the loop: rotate around `v` until
    /// the next border edge, then move `v` to that edge's far end.
    pub fn next_b<T: Scalar>(&mut self, mesh: &Mesh<T>) {
        debug_assert!(self.is_border(mesh), "next_b called on an interior edge");
        // a vertex never has more incident faces than the mesh itself
        let mut guard = mesh.faces.len() * 3 + 3;
        loop {
            self.flip_e(mesh);
            if self.is_border(mesh) {
                break;
            }
            self.flip_f(mesh);
            guard -= 1;
            if guard == 0 {
                break;
            }
        }
        self.flip_v(mesh);
    }

    /// Faces of the fan around `v`, from this border edge to the next one.
    pub fn fan_faces<T: Scalar>(&self, mesh: &Mesh<T>) -> Vec<FaceId> {
        let mut faces = vec![self.f];
        let mut p = *self;
        let mut guard = mesh.faces.len() * 3 + 3;
        loop {
            p.flip_e(mesh);
            if p.is_border(mesh) {
                break;
            }
            p.flip_f(mesh);
            faces.push(p.f);
            guard -= 1;
            if guard == 0 {
                break;
            }
        }
        faces
    }
}
