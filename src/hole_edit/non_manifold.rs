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
use tracing::{debug, info, info_span, warn};

use crate::{
    error::HoleEditResult,
    hole_edit::{
        bridge::Bridge,
        face_attr::FaceKind,
        hole::HoleId,
        manager::HoleSetManager,
    },
    mesh::{basic_types::VertexId, pos::Pos},
    numeric::scalar::Scalar,
};

impl<T: Scalar> HoleSetManager<T> {
    /// Split every selected non-manifold hole at the vertices its border
    /// passes more than once. Returns the number of faces inserted.
    pub fn close_non_manifold_holes(&mut self) -> HoleEditResult<usize> {
        let _span = info_span!("close_non_manifold_holes").entered();

        let targets: Vec<HoleId> = self
            .holes
            .iter()
            .filter(|h| h.is_selected() && h.is_non_manifold() && !h.is_filled())
            .map(|h| h.id())
            .collect();

        self.progress.begin(targets.len() as u64);
        let mut inserted = 0;
        for id in &targets {
            inserted += self.close_non_manifold_vertex(*id)?;
            self.progress.increment_by(1);
        }
        self.progress.finish();

        info!(holes = targets.len(), faces = inserted, "closed non-manifold holes");
        Ok(inserted)
    }

    /// Walk the border of hole `id`; every time a vertex comes up a second
    /// time, insert one face joining the two border edges that meet there.
    ///
    /// The face has the repeated vertex at index 0. When the loop cut off
    /// this way has three edges the face closes it entirely and its edge 1 is
    /// glued too; otherwise edge 1 stays on the border of a new hole.
    pub fn close_non_manifold_vertex(&mut self, id: HoleId) -> HoleEditResult<usize> {
        let Some(idx) = self.hole_index(id) else {
            return Ok(0);
        };
        let hole = &self.holes[idx];
        if hole.is_filled() {
            return Ok(0);
        }
        let start = hole.start_pos();
        let selected = hole.is_selected();

        let mut visited: AHashSet<VertexId> = AHashSet::new();
        let mut inserted = 0;
        let mut cur = start;
        let mut budget = self.mesh.faces.len() * 3 + 3;
        loop {
            let revisit = !visited.insert(cur.v);
            let p0 = cur;
            cur.next_b(&self.mesh);

            if revisit {
                // go back along the loop to the other edge at p0.v
                let mut p1 = p0;
                p1.flip_v(&self.mesh);
                let mut dist = 0;
                loop {
                    dist += 1;
                    visited.remove(&p1.v);
                    p1.next_b(&self.mesh);
                    if p1.v == p0.v || dist > budget {
                        break;
                    }
                }
                let mut p2 = p0;
                p2.flip_v(&self.mesh);
                p2.next_b(&self.mesh);

                let (x, w, z) = (p0.v, p0.vflip(&self.mesh), p1.vflip(&self.mesh));
                if w == z {
                    warn!(hole = id, vertex = x, "skipping two-edge loop at non-manifold vertex");
                } else {
                    self.mesh.reserve_faces(1)?;
                    let f = if p0.v_ind(&self.mesh) == p0.z {
                        let f = self.mesh.add_triangle(x, z, w);
                        self.mesh.set_adjacent(f, 0, p1.f, p1.z);
                        self.mesh.set_adjacent(f, 2, p0.f, p0.z);
                        f
                    } else {
                        let f = self.mesh.add_triangle(x, w, z);
                        self.mesh.set_adjacent(f, 0, p0.f, p0.z);
                        self.mesh.set_adjacent(f, 2, p1.f, p1.z);
                        f
                    };
                    self.attrs.set_border(p0.f, false);
                    self.attrs.set_border(p1.f, false);
                    self.bridges.push(Bridge::NonManifold { f });
                    inserted += 1;

                    if dist == 2 {
                        self.mesh.set_adjacent(f, 1, p2.f, p2.z);
                        self.attrs.set_border(p2.f, false);
                        self.attrs.set_kind(f, FaceKind::BridgeAndPatch);
                        debug!(hole = id, vertex = x, face = f, "closed three-edge loop");
                    } else {
                        self.attrs.set_kind(f, FaceKind::Bridge);
                        self.attrs.set_border(f, true);
                        let new_id = self.add_hole(Pos::new(&self.mesh, f, 1), selected, true);
                        debug!(hole = id, vertex = x, face = f, split = new_id, "split at non-manifold vertex");
                    }
                }
            }

            budget = budget.saturating_sub(1);
            if cur == start || budget == 0 {
                break;
            }
        }

        if let Some(idx) = self.hole_index(id) {
            let hole = &mut self.holes[idx];
            hole.set_start_pos(start, &self.mesh, &mut self.attrs);
            hole.set_bridged(true);
        }
        self.remark_borders();
        self.recount();
        Ok(inserted)
    }
}
