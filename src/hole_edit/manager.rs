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

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    error::{HoleEditError, HoleEditResult},
    geometry::Point3,
    hole_edit::{
        bridge::{Abutment, Bridge},
        face_attr::{FaceAttr, FaceAttrMap},
        hole::{Hole, HoleId},
        progress::{AutoBridgingCallback, ProgressTracker},
    },
    mesh::{
        basic_types::{FaceId, Mesh},
        pos::Pos,
    },
    numeric::scalar::Scalar,
    operations::triangulation::{EarFillOpts, FillMode},
};

#[derive(Debug, Clone, Copy)]
pub struct HoleEditOpts<T: Scalar> {
    pub fill: EarFillOpts<T>,
    /// Holes with fewer border edges are skipped by automatic self bridging.
    pub min_self_bridge_size: usize,
    /// Minimum time between progress calls when the callback reports a zero
    /// offset.
    pub progress_interval: Duration,
}

impl<T: Scalar> Default for HoleEditOpts<T> {
    fn default() -> Self {
        Self {
            fill: EarFillOpts::default(),
            min_self_bridge_size: 6,
            progress_interval: Duration::from_millis(100),
        }
    }
}

/// Registry of the holes of one mesh and of the bridges built between them.
///
/// The manager owns the mesh for the whole editing session. Holes and
/// bridges refer to faces by [`FaceId`], which stays valid however much the
/// face arena grows; deleted faces are flagged, never compacted.
pub struct HoleSetManager<T: Scalar> {
    pub(crate) mesh: Mesh<T>,
    pub(crate) holes: Vec<Hole<T>>,
    pub(crate) bridges: Vec<Bridge>,
    pub(crate) attrs: FaceAttrMap,
    pub(crate) n_selected: usize,
    pub(crate) n_accepted: usize,
    next_hole_id: HoleId,
    pub(crate) opts: HoleEditOpts<T>,
    pub(crate) progress: ProgressTracker,
}

impl<T: Scalar> HoleSetManager<T> {
    /// Take ownership of `mesh` and register every border loop as a hole.
    pub fn new(mesh: Mesh<T>) -> Self {
        Self::with_opts(mesh, HoleEditOpts::default())
    }

    pub fn with_opts(mesh: Mesh<T>, opts: HoleEditOpts<T>) -> Self {
        let mut manager = Self {
            attrs: FaceAttrMap::new(mesh.faces.len()),
            mesh,
            holes: Vec::new(),
            bridges: Vec::new(),
            n_selected: 0,
            n_accepted: 0,
            next_hole_id: 0,
            progress: ProgressTracker::new(opts.progress_interval),
            opts,
        };
        manager.init();
        manager
    }

    /// Forget every hole and bridge and scan the mesh again.
    ///
    /// Unconfirmed patches and bridges become plain mesh geometry.
    pub fn init(&mut self) {
        self.holes.clear();
        self.bridges.clear();
        self.attrs = FaceAttrMap::new(self.mesh.faces.len());
        self.next_hole_id = 0;

        for p in self.mesh.border_loops() {
            self.add_hole(p, false, false);
        }
        self.recount();
        info!(holes = self.holes.len(), "scanned mesh for holes");
    }

    /// Register the loop through `p` as a new hole.
    pub(crate) fn add_hole(&mut self, p: Pos, selected: bool, bridged: bool) -> HoleId {
        let id = self.next_hole_id;
        self.next_hole_id += 1;
        let mut hole = Hole::new(id, p, &self.mesh, &mut self.attrs);
        hole.set_selected(selected);
        hole.set_bridged(bridged);
        debug!(hole = %hole.name(), size = hole.size(), non_manifold = hole.is_non_manifold(), "new hole");
        self.holes.push(hole);
        id
    }

    pub fn mesh(&self) -> &Mesh<T> {
        &self.mesh
    }

    /// Hand the mesh back, with whatever patches and bridges it holds.
    pub fn into_mesh(self) -> Mesh<T> {
        self.mesh
    }

    pub fn opts(&self) -> &HoleEditOpts<T> {
        &self.opts
    }

    pub fn holes(&self) -> &[Hole<T>] {
        &self.holes
    }

    pub fn bridges(&self) -> &[Bridge] {
        &self.bridges
    }

    pub fn holes_count(&self) -> usize {
        self.holes.len()
    }

    pub fn selection_count(&self) -> usize {
        self.n_selected
    }

    pub fn accepted_count(&self) -> usize {
        self.n_accepted
    }

    pub fn face_attr(&self, f: FaceId) -> FaceAttr {
        self.attrs.get(f)
    }

    pub fn hole_index(&self, id: HoleId) -> Option<usize> {
        self.holes.iter().position(|h| h.id() == id)
    }

    pub fn hole(&self, id: HoleId) -> Option<&Hole<T>> {
        self.holes.iter().find(|h| h.id() == id)
    }

    pub fn set_progress_callback(&mut self, callback: Option<Box<dyn AutoBridgingCallback>>) {
        self.progress.set_callback(callback);
    }

    pub fn set_progress_interval(&mut self, interval: Duration) {
        self.opts.progress_interval = interval;
        self.progress.set_fallback_interval(interval);
    }

    pub fn set_selected(&mut self, index: usize, val: bool) {
        self.holes[index].set_selected(val);
        self.recount();
    }

    pub fn set_accepted(&mut self, index: usize, val: bool) {
        self.holes[index].set_accepted(val);
        self.recount();
    }

    pub fn set_all_selected(&mut self, val: bool) {
        self.holes.iter_mut().for_each(|h| h.set_selected(val));
        self.recount();
    }

    /// Only filled holes carry an acceptance flag.
    pub fn set_all_accepted(&mut self, val: bool) {
        self.holes
            .iter_mut()
            .filter(|h| h.is_filled())
            .for_each(|h| h.set_accepted(val));
        self.recount();
    }

    /// Picking a face of an open hole toggles its selection, picking a patch
    /// face toggles acceptance of the fill. Returns the hole index, if any.
    pub fn toggle_by_face(&mut self, f: FaceId) -> Option<usize> {
        let idx = self.find_hole_from_face(f)?;
        let hole = &mut self.holes[idx];
        if hole.is_filled() {
            let val = !hole.is_accepted();
            hole.set_accepted(val);
        } else {
            let val = !hole.is_selected();
            hole.set_selected(val);
        }
        self.recount();
        Some(idx)
    }

    /// Fill every selected open hole. Returns the number of holes filled.
    ///
    /// Room for every patch is reserved before the first hole is touched.
    pub fn fill(&mut self, mode: FillMode) -> HoleEditResult<usize> {
        if self.n_selected == 0 {
            return Err(HoleEditError::NothingSelected);
        }

        let needed: usize = self
            .holes
            .iter()
            .filter(|h| h.is_selected() && !h.is_filled())
            .map(|h| h.size().saturating_sub(2))
            .sum();
        self.mesh.reserve_faces(needed)?;

        let before = self.mesh.faces.len();
        let mut filled = 0;
        let mut outcome = Ok(());
        for hole in self.holes.iter_mut() {
            if !hole.is_selected() || hole.is_filled() {
                continue;
            }
            if let Err(err) = hole.fill(mode, &mut self.mesh, &mut self.attrs, &self.opts.fill) {
                outcome = Err(err);
                break;
            }
            if hole.is_filled() {
                filled += 1;
            }
        }
        // holes filled before a failure keep their patch
        self.remark_borders();
        self.recount();
        outcome?;

        info!(
            ?mode,
            holes = filled,
            faces = self.mesh.faces.len() - before,
            "filled selected holes"
        );
        Ok(filled)
    }

    /// Settle every filled hole.
    ///
    /// A fill that is selected and accepted, with `accept` set, becomes
    /// permanent: the hole leaves the registry, taking along any bridge its
    /// patch touches. Every other fill is removed and its hole reopened.
    pub fn confirm_filling(&mut self, accept: bool) {
        let mut absorbed: Vec<FaceId> = Vec::new();
        let (mut kept, mut restored) = (0usize, 0usize);

        let mut i = 0;
        while i < self.holes.len() {
            let hole = &mut self.holes[i];
            if !hole.is_filled() {
                i += 1;
                continue;
            }
            if !accept || !hole.is_accepted() || !hole.is_selected() {
                hole.restore(&mut self.mesh, &mut self.attrs);
                hole.update_info(&self.mesh, &mut self.attrs);
                restored += 1;
                i += 1;
                continue;
            }

            if hole.is_bridged() {
                for &f in hole.patches() {
                    if self.attrs.is_bridge(f) {
                        absorbed.push(f);
                    }
                    for g in self.mesh.faces[f].adj_face {
                        if self.attrs.is_bridge(g) {
                            absorbed.push(g);
                        }
                    }
                }
            }
            hole.reset_flag(&self.mesh, &mut self.attrs);
            self.holes.remove(i);
            kept += 1;
        }

        let attrs = &mut self.attrs;
        self.bridges.retain(|b| {
            if b.faces().iter().any(|f| absorbed.contains(f)) {
                b.reset_flag(attrs);
                false
            } else {
                true
            }
        });

        for hole in self.holes.iter_mut() {
            hole.update_bridging_status(&self.mesh, &self.attrs);
        }
        self.remark_borders();
        self.recount();
        info!(kept, restored, bridges = self.bridges.len(), "confirmed filling");
    }

    /// Index of the hole `f` belongs to, as a patch face of a filled hole or
    /// as a border face of an open one.
    pub fn find_hole_from_face(&self, f: FaceId) -> Option<usize> {
        if f >= self.mesh.faces.len() || self.mesh.faces[f].removed {
            return None;
        }
        if self.attrs.is_patch(f) {
            if let Some(idx) = self
                .holes
                .iter()
                .position(|h| h.is_filled() && h.has_patch_face(f))
            {
                return Some(idx);
            }
        }
        if self.attrs.is_border(f) {
            return self
                .holes
                .iter()
                .position(|h| !h.is_filled() && h.has_border_face(f));
        }
        None
    }

    /// The border edge of `f` nearest to `pick`, as an abutment on its open
    /// hole.
    pub fn find_bridge_abutment(&self, f: FaceId, pick: &Point3<T>) -> Option<Abutment> {
        if f >= self.mesh.faces.len() || self.mesh.faces[f].removed {
            return None;
        }
        let points = self.mesh.face_points(f);
        let z = (0..3)
            .filter(|&e| self.mesh.is_border_edge(f, e))
            .map(|e| (e, point_segment_distance(pick, &points[e], &points[(e + 1) % 3])))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))?
            .0;
        self.holes
            .iter()
            .find(|h| !h.is_filled() && h.border().iter().any(|p| p.f == f && p.z == z))
            .map(|h| Abutment::new(f, z, h.id()))
    }

    /// Every face id held by a hole or a bridge.
    pub fn face_references(&self) -> Vec<FaceId> {
        let mut out = Vec::new();
        for hole in &self.holes {
            hole.face_references(&mut out);
        }
        for bridge in &self.bridges {
            out.extend(bridge.faces());
            out.extend(bridge.abutments(&self.mesh).iter().map(|p| p.f));
        }
        out
    }

    /// Give up on everything unconfirmed and forget all holes.
    pub fn clear(&mut self) {
        self.confirm_filling(false);
        self.discard_bridges();
        self.holes.clear();
        self.attrs.clear();
        self.recount();
    }

    /// Re-mark the border faces of every open hole.
    pub(crate) fn remark_borders(&mut self) {
        for hole in self.holes.iter().filter(|h| !h.is_filled()) {
            for p in hole.border() {
                self.attrs.set_border(p.f, true);
            }
        }
    }

    pub(crate) fn recount(&mut self) {
        self.n_selected = self.holes.iter().filter(|h| h.is_selected()).count();
        self.n_accepted = self
            .holes
            .iter()
            .filter(|h| h.is_filled() && h.is_accepted())
            .count();
    }

    /// Ids of the selected, still open holes.
    pub(crate) fn open_selected(&self) -> Vec<HoleId> {
        self.holes
            .iter()
            .filter(|h| h.is_selected() && !h.is_filled())
            .map(|h| h.id())
            .collect()
    }
}

fn point_segment_distance<T: Scalar>(p: &Point3<T>, a: &Point3<T>, b: &Point3<T>) -> T {
    let ab = *b - *a;
    let len2 = ab.squared_norm();
    if len2 <= T::tolerance() {
        return p.distance_to(a);
    }
    let t = ((*p - *a).dot(&ab) / len2).max(T::zero()).min(T::one());
    p.distance_to(&(*a + ab.scale(t)))
}
