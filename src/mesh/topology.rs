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

use ahash::AHashSet;
use tracing::warn;

use crate::{
    impl_mesh,
    mesh::{
        basic_types::{FaceId, VertexId},
        pos::Pos,
    },
};

/// Number of vertices the two vertex triples have in common.
pub fn shared_vertex_count(a: &[VertexId; 3], b: &[VertexId; 3]) -> usize {
    a.iter().filter(|v| b.contains(v)).count()
}

impl_mesh! {
    /// One starting [`Pos`] per border loop, in face order.
    ///
    /// Each border half-edge belongs to exactly one loop, so loops through a
    /// non-manifold vertex are still reported once each.
    pub fn border_loops(&self) -> Vec<Pos> {
        let mut visited: AHashSet<(FaceId, usize)> = AHashSet::new();
        let mut loops = Vec::new();

        for (f, face) in self.faces.iter().enumerate() {
            if face.removed {
                continue;
            }
            for e in 0..3 {
                if !self.is_border_edge(f, e) || visited.contains(&(f, e)) {
                    continue;
                }
                let start = Pos::new(self, f, e);
                for p in self.walk_border(start) {
                    visited.insert((p.f, p.z));
                }
                loops.push(start);
            }
        }
        loops
    }

    /// Every border position of the loop through `start`, beginning with
    /// `start` itself.
    pub fn walk_border(&self, start: Pos) -> Vec<Pos> {
        let mut out = vec![start];
        let mut p = start;
        let budget = self.faces.len() * 3 + 1;
        loop {
            p.next_b(self);
            if p == start {
                break;
            }
            if out.len() > budget {
                warn!(face = start.f, edge = start.z, "border walk did not close");
                break;
            }
            out.push(p);
        }
        out
    }

    /// Do faces `f` and `g` share an edge?
    pub fn faces_share_edge(&self, f: FaceId, g: FaceId) -> bool {
        (0..3).any(|e| self.faces[f].adj_face[e] == g && g != f)
    }
}
