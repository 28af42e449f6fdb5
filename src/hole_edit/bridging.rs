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
    error::{HoleEditError, HoleEditResult},
    hole_edit::{
        bridge::{self, Abutment, Bridge, BridgeOption, compute_best_bridge_opt, test_abutment_distance},
        hole::HoleId,
        manager::HoleSetManager,
    },
    mesh::{FaceIndex, basic_types::FaceId, pos::Pos},
    numeric::scalar::Scalar,
};

/// Progress units per merge step of [`HoleSetManager::auto_multi_bridging`].
const MERGE_STEP_UNITS: u64 = 1000;

impl<T: Scalar> HoleSetManager<T> {
    /// Build a bridge between two border edges picked by the user.
    ///
    /// On the same hole the bridge splits it in two; across holes it merges
    /// them. Nothing is modified when the request is rejected.
    pub fn create_bridge(&mut self, a: Abutment, b: Abutment) -> HoleEditResult<()> {
        let ia = self.check_abutment(&a)?;
        let ib = self.check_abutment(&b)?;

        let non_manifold = self.holes[ia].is_non_manifold() || self.holes[ib].is_non_manifold();
        if !test_abutment_distance(&self.mesh, &a, &b, non_manifold) {
            return Err(HoleEditError::BridgeTooClose);
        }

        let index = FaceIndex::build(&self.mesh);
        let Some((opt, quality)) = compute_best_bridge_opt(&self.mesh, &a, &b, &index) else {
            warn!(a = ?a, b = ?b, "bridge rejected, both options hit the mesh");
            return Err(HoleEditError::BridgeCompenetrating);
        };

        self.build_bridge(a, b, opt)?;
        info!(?opt, quality = quality.as_f64(), holes = self.holes.len(), "bridge built");
        Ok(())
    }

    /// Give every large selected hole the one bridge that best splits it.
    ///
    /// Candidate pairs are border edges at least three steps apart along the
    /// loop, scored by bridge quality plus `distance_weight` times their
    /// distance. Returns the number of bridges built.
    pub fn auto_self_bridging(&mut self, distance_weight: T) -> HoleEditResult<usize> {
        let _span = info_span!("auto_self_bridging").entered();

        let candidates: Vec<HoleId> = self
            .holes
            .iter()
            .filter(|h| h.is_selected() && !h.is_filled() && h.size() >= self.opts.min_self_bridge_size)
            .map(|h| h.id())
            .collect();
        let total: u64 = candidates
            .iter()
            .filter_map(|&id| self.hole(id))
            .map(|h| (h.size() * (h.size() / 2).saturating_sub(2)) as u64)
            .sum();

        let mut index = FaceIndex::build(&self.mesh);
        self.progress.begin(total);
        let mut done = 0u64;
        let mut built = 0usize;

        for id in candidates.iter().copied() {
            let Some(hole) = self.hole(id) else {
                continue;
            };
            let border = hole.border().to_vec();
            let non_manifold = hole.is_non_manifold();
            let n = border.len();

            let mut best: Option<(Abutment, Abutment, BridgeOption, T)> = None;
            for i in 0..n {
                let a = Abutment::from_pos(&border[i], id);
                for j in 3..=n / 2 {
                    done += 1;
                    let b = Abutment::from_pos(&border[(i + j) % n], id);
                    if a.f == b.f
                        || self.mesh.faces_share_edge(a.f, b.f)
                        || !test_abutment_distance(&self.mesh, &a, &b, non_manifold)
                    {
                        continue;
                    }
                    let Some((opt, quality)) = compute_best_bridge_opt(&self.mesh, &a, &b, &index) else {
                        continue;
                    };
                    let score = quality + distance_weight * T::from_usize(j);
                    if best.is_none_or(|(.., s)| score > s) {
                        best = Some((a, b, opt, score));
                    }
                }
                self.progress.advance_to(done);
            }

            match best {
                Some((a, b, opt, score)) => {
                    let bridge = self.build_bridge(a, b, opt)?;
                    for f in bridge.faces() {
                        index.insert(&self.mesh, f);
                    }
                    built += 1;
                    debug!(hole = id, ?opt, score = score.as_f64(), "self bridge built");
                }
                None => debug!(hole = id, "no valid self bridge"),
            }
        }

        self.progress.finish();
        info!(holes = candidates.len(), bridges = built, "auto self bridging done");
        Ok(built)
    }

    /// Merge the selected open holes one bridge at a time, always building the
    /// best bridge between any two of them, until one is left. Returns the
    /// number of bridges built.
    pub fn auto_multi_bridging(&mut self) -> HoleEditResult<usize> {
        let _span = info_span!("auto_multi_bridging").entered();

        let mut selected = self.open_selected();
        if selected.len() < 2 {
            return Ok(0);
        }
        let steps = (selected.len() - 1) as u64;
        let mut index = FaceIndex::build(&self.mesh);
        self.progress.begin(steps * MERGE_STEP_UNITS);
        let mut built = 0usize;

        while selected.len() >= 2 {
            let borders: Vec<(HoleId, Vec<Pos>)> = selected
                .iter()
                .filter_map(|&id| self.hole(id).map(|h| (id, h.border().to_vec())))
                .collect();
            let mut cases = 0u64;
            for (k, (_, ba)) in borders.iter().enumerate() {
                for (_, bb) in &borders[k + 1..] {
                    cases += (ba.len() * bb.len()) as u64;
                }
            }
            let cases = cases.max(1);

            let mut viewed = 0u64;
            let mut best: Option<(Abutment, Abutment, BridgeOption, T)> = None;
            for (k, (ida, ba)) in borders.iter().enumerate() {
                for (idb, bb) in &borders[k + 1..] {
                    for pa in ba {
                        let a = Abutment::from_pos(pa, *ida);
                        for pb in bb {
                            let b = Abutment::from_pos(pb, *idb);
                            if let Some((opt, q)) = compute_best_bridge_opt(&self.mesh, &a, &b, &index) {
                                if best.is_none_or(|(.., s)| q > s) {
                                    best = Some((a, b, opt, q));
                                }
                            }
                        }
                        viewed += bb.len() as u64;
                        self.progress
                            .advance_to(built as u64 * MERGE_STEP_UNITS + viewed * MERGE_STEP_UNITS / cases);
                    }
                }
            }

            let Some((a, b, opt, quality)) = best else {
                warn!(holes = selected.len(), "no valid bridge left between selected holes");
                break;
            };
            let bridge = self.build_bridge(a, b, opt)?;
            for f in bridge.faces() {
                index.insert(&self.mesh, f);
            }
            built += 1;
            debug!(a = a.hole, b = b.hole, ?opt, quality = quality.as_f64(), "holes merged");
            selected = self.open_selected();
        }

        self.progress.finish();
        info!(bridges = built, selected = self.n_selected, "auto multi bridging done");
        Ok(built)
    }

    /// Delete every unconfirmed bridge and rebuild the holes around them.
    ///
    /// Filled holes that touch a bridge lose their patch first. A new hole is
    /// selected when any of the holes it was carved from was.
    pub fn discard_bridges(&mut self) {
        if self.bridges.is_empty() {
            return;
        }

        for hole in self.holes.iter_mut() {
            if hole.is_filled() && hole.is_bridged() {
                hole.restore(&mut self.mesh, &mut self.attrs);
            }
        }

        let abutments: Vec<Pos> = self
            .bridges
            .iter()
            .flat_map(|b| b.abutments(&self.mesh))
            .collect();

        let mut selected_faces: AHashSet<FaceId> = AHashSet::new();
        let attrs = &self.attrs;
        self.holes.retain(|h| {
            if !h.is_bridged() {
                return true;
            }
            if h.is_selected() {
                selected_faces.extend(h.border().iter().map(|p| p.f).filter(|&f| !attrs.is_bridge(f)));
            }
            false
        });

        let removed = self.bridges.len();
        for bridge in std::mem::take(&mut self.bridges) {
            bridge.delete_from_mesh(&mut self.mesh, &mut self.attrs);
        }

        let mut visited: AHashSet<(FaceId, usize)> = self
            .holes
            .iter()
            .filter(|h| !h.is_filled())
            .flat_map(|h| h.border().iter().map(|p| (p.f, p.z)))
            .collect();
        for p in abutments {
            if self.mesh.faces[p.f].removed || !p.is_border(&self.mesh) || visited.contains(&(p.f, p.z)) {
                continue;
            }
            let walk = self.mesh.walk_border(p);
            let selected = walk.iter().any(|q| selected_faces.contains(&q.f));
            visited.extend(walk.iter().map(|q| (q.f, q.z)));
            self.add_hole(p, selected, false);
        }

        self.remark_borders();
        self.recount();
        info!(bridges = removed, holes = self.holes.len(), "bridges discarded");
    }

    /// Turn every unconfirmed bridge into plain mesh geometry.
    pub fn confirm_bridges(&mut self) {
        let confirmed = self.bridges.len();
        for bridge in self.bridges.drain(..) {
            bridge.reset_flag(&mut self.attrs);
        }
        self.holes.iter_mut().for_each(|h| h.set_bridged(false));
        info!(bridges = confirmed, "bridges confirmed");
    }

    /// Index of the open hole `a` lies on, if `a` is one of its border edges.
    fn check_abutment(&self, a: &Abutment) -> HoleEditResult<usize> {
        let not_border = HoleEditError::NotABorderEdge { face: a.f, edge: a.z };
        let Some(idx) = self.hole_index(a.hole) else {
            return Err(not_border);
        };
        let hole = &self.holes[idx];
        if hole.is_filled() {
            return Err(HoleEditError::HoleIsFilled {
                name: hole.name().to_owned(),
            });
        }
        let on_border = a.f < self.mesh.faces.len()
            && a.z < 3
            && !self.mesh.faces[a.f].removed
            && self.mesh.is_border_edge(a.f, a.z)
            && hole.border().iter().any(|p| p.f == a.f && p.z == a.z);
        if on_border { Ok(idx) } else { Err(not_border) }
    }

    /// Build the bridge and split or merge the holes it touches.
    pub(crate) fn build_bridge(&mut self, a: Abutment, b: Abutment, opt: BridgeOption) -> HoleEditResult<Bridge> {
        let (Some(ia), Some(ib)) = (self.hole_index(a.hole), self.hole_index(b.hole)) else {
            return Err(HoleEditError::NotABorderEdge { face: a.f, edge: a.z });
        };

        let bridge = bridge::build(&mut self.mesh, &mut self.attrs, &a, &b, opt)?;
        self.bridges.push(bridge);
        let (Some(side_a), Some(side_b)) = (bridge.side_a(&self.mesh), bridge.side_b(&self.mesh)) else {
            return Ok(bridge);
        };

        if ia == ib {
            let hole = &mut self.holes[ia];
            hole.set_start_pos(side_a, &self.mesh, &mut self.attrs);
            hole.set_bridged(true);
            let selected = hole.is_selected();
            self.add_hole(side_b, selected, true);
        } else {
            let selected_b = self.holes[ib].is_selected();
            let hole = &mut self.holes[ia];
            hole.set_start_pos(side_a, &self.mesh, &mut self.attrs);
            if selected_b {
                hole.set_selected(true);
            }
            hole.set_bridged(true);
            self.holes.remove(ib);
        }

        self.remark_borders();
        self.recount();
        Ok(bridge)
    }
}
