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

use crate::{geometry::Point3, numeric::scalar::Scalar};

pub type VertexId = usize;
pub type FaceId = usize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex<T: Scalar> {
    pub position: Point3<T>,
}

impl<T: Scalar> Vertex<T> {
    pub fn new(position: Point3<T>) -> Self {
        Self { position }
    }
}

/// Triangle with face-face adjacency.
///
/// Edge `e` runs from `vertices[e]` to `vertices[(e + 1) % 3]`. `adj_face[e]`
/// is the face across that edge and `adj_edge[e]` the matching edge index
/// there. A border edge is a self-loop: `adj_face[e]` is the face itself and
/// `adj_edge[e] == e`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    pub vertices: [VertexId; 3],
    pub adj_face: [FaceId; 3],
    pub adj_edge: [usize; 3],
    pub removed: bool,
}

impl Face {
    /// A face with all three edges on the border.
    pub fn new(id: FaceId, vertices: [VertexId; 3]) -> Self {
        Self {
            vertices,
            adj_face: [id; 3],
            adj_edge: [0, 1, 2],
            removed: false,
        }
    }

    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.vertices.contains(&v)
    }

    /// Local index of `v` in this face.
    pub fn vertex_index(&self, v: VertexId) -> Option<usize> {
        self.vertices.iter().position(|&x| x == v)
    }
}

/// Triangle mesh in an append-only arena.
///
/// Faces and vertices are addressed by index and never move: deleting a face
/// only flags it `removed`, so every stored `FaceId` stays valid while the
/// container grows.
#[derive(Debug, Clone, Default)]
pub struct Mesh<T: Scalar> {
    pub vertices: Vec<Vertex<T>>,
    pub faces: Vec<Face>,
}
