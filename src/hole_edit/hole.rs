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
use tracing::debug;

use crate::{
    error::HoleEditResult,
    geometry::Aabb,
    hole_edit::face_attr::{FaceAttrMap, FaceKind},
    mesh::{
        FaceIndex,
        basic_types::{FaceId, Mesh, VertexId},
        pos::Pos,
    },
    numeric::scalar::Scalar,
    operations::triangulation::{EarFillOpts, FillMode, fill_hole_ear},
};

/// Stable identity of a hole inside one [`HoleSetManager`](super::HoleSetManager).
pub type HoleId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct HoleState {
    selected: bool,
    filled: bool,
    accepted: bool,
    compenetrating: bool,
    non_manifold: bool,
    bridged: bool,
}

/// One border loop of the mesh and what has been done to it.
///
/// While open, walking [`Pos::next_b`] from [`Hole::start_pos`] `size` times
/// comes back to the start and every face passed is marked border. Once
/// filled, the patch faces are the hole's representation until the fill is
/// confirmed or restored.
#[derive(Debug, Clone)]
pub struct Hole<T: Scalar> {
    id: HoleId,
    name: String,
    p: Pos,
    size: usize,
    perimeter: T,
    bbox: Aabb<T>,
    border: Vec<Pos>,
    border_vertices: Vec<VertexId>,
    patches: Vec<FaceId>,
    state: HoleState,
}

impl<T: Scalar> Hole<T> {
    pub(crate) fn new(id: HoleId, p: Pos, mesh: &Mesh<T>, attrs: &mut FaceAttrMap) -> Self {
        let mut hole = Hole {
            id,
            name: format!("Hole_{:03}", id),
            p,
            size: 0,
            perimeter: T::zero(),
            bbox: Aabb::empty(),
            border: Vec::new(),
            border_vertices: Vec::new(),
            patches: Vec::new(),
            state: HoleState::default(),
        };
        hole.update_info(mesh, attrs);
        hole
    }

    pub fn id(&self) -> HoleId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_pos(&self) -> Pos {
        self.p
    }

    /// Number of border edges.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn perimeter(&self) -> T {
        self.perimeter
    }

    pub fn bbox(&self) -> &Aabb<T> {
        &self.bbox
    }

    /// Border positions in walk order, starting at [`Hole::start_pos`].
    pub fn border(&self) -> &[Pos] {
        &self.border
    }

    pub fn border_vertices(&self) -> &[VertexId] {
        &self.border_vertices
    }

    pub fn patches(&self) -> &[FaceId] {
        &self.patches
    }

    pub fn is_selected(&self) -> bool {
        self.state.selected
    }

    pub fn is_filled(&self) -> bool {
        self.state.filled
    }

    pub fn is_accepted(&self) -> bool {
        self.state.accepted
    }

    pub fn is_compenetrating(&self) -> bool {
        self.state.compenetrating
    }

    pub fn is_non_manifold(&self) -> bool {
        self.state.non_manifold
    }

    pub fn is_bridged(&self) -> bool {
        self.state.bridged
    }

    pub fn has_border_face(&self, f: FaceId) -> bool {
        self.border.iter().any(|p| p.f == f)
    }

    pub fn has_patch_face(&self, f: FaceId) -> bool {
        self.patches.contains(&f)
    }

    pub(crate) fn set_selected(&mut self, val: bool) {
        self.state.selected = val;
    }

    pub(crate) fn set_accepted(&mut self, val: bool) {
        self.state.accepted = val;
    }

    pub(crate) fn set_bridged(&mut self, val: bool) {
        self.state.bridged = val;
    }

    /// Move the walk entry point and rescan the loop.
    pub(crate) fn set_start_pos(&mut self, p: Pos, mesh: &Mesh<T>, attrs: &mut FaceAttrMap) {
        self.p = p;
        self.update_info(mesh, attrs);
    }

    /// Walk the loop once: size, perimeter, bounding box, border list and
    /// the non-manifold flag. Every face passed gets its border mark.
    pub(crate) fn update_info(&mut self, mesh: &Mesh<T>, attrs: &mut FaceAttrMap) {
        assert!(!self.state.filled, "update_info on filled hole {}", self.name);
        debug_assert!(self.p.is_border(mesh), "hole start is not a border edge");

        self.border = mesh.walk_border(self.p);
        self.border_vertices.clear();
        self.perimeter = T::zero();
        self.bbox = Aabb::empty();
        self.state.non_manifold = false;

        let mut seen: AHashSet<VertexId> = AHashSet::with_capacity(self.border.len());
        for p in &self.border {
            attrs.set_border(p.f, true);
            let pv = mesh.position(p.v);
            self.bbox.add_point(&pv);
            self.perimeter = self.perimeter + pv.distance_to(&mesh.position(p.vflip(mesh)));
            if !seen.insert(p.v) {
                self.state.non_manifold = true;
            }
            self.border_vertices.push(p.v);
        }
        self.size = self.border.len();
    }

    /// Triangulate the loop and mark the new faces as patch.
    ///
    /// The border faces lose their border mark; the caller re-marks faces
    /// still bordering other holes. A loop too short to yield a face leaves
    /// the hole open.
    pub(crate) fn fill(
        &mut self,
        mode: FillMode,
        mesh: &mut Mesh<T>,
        attrs: &mut FaceAttrMap,
        opts: &EarFillOpts<T>,
    ) -> HoleEditResult<()> {
        assert!(!self.state.filled, "hole {} is already filled", self.name);

        let patches = fill_hole_ear(mesh, self.p, mode, opts)?;
        if patches.is_empty() {
            debug!(hole = %self.name, size = self.size, "nothing to fill, hole left open");
            return Ok(());
        }
        self.patches = patches;
        for p in &self.border {
            attrs.set_border(p.f, false);
        }
        for &f in &self.patches {
            attrs.set_kind(f, FaceKind::Patch { compenetrating: false });
        }

        self.state.filled = true;
        self.state.accepted = true;
        self.state.compenetrating = false;
        self.update_patch_state(mesh, attrs);

        debug!(
            hole = %self.name,
            faces = self.patches.len(),
            compenetrating = self.state.compenetrating,
            "hole filled"
        );
        Ok(())
    }

    /// Test every patch face against the whole mesh and flag the ones that
    /// cut through it.
    pub(crate) fn update_patch_state(&mut self, mesh: &Mesh<T>, attrs: &mut FaceAttrMap) {
        let index = FaceIndex::build(mesh);
        for &f in &self.patches {
            if index.face_intersects(mesh, f) {
                attrs.set_kind(f, FaceKind::Patch { compenetrating: true });
                self.state.compenetrating = true;
            }
        }
    }

    /// Delete the patch faces, giving the hole back its border.
    ///
    /// Bridge faces are never part of the patch and stay in place. Call
    /// [`Hole::update_info`] before using the hole again.
    pub(crate) fn restore(&mut self, mesh: &mut Mesh<T>, attrs: &mut FaceAttrMap) {
        assert!(self.state.filled, "hole {} is not filled", self.name);

        for &f in &self.patches {
            if attrs.is_bridge(f) || mesh.faces[f].removed {
                continue;
            }
            mesh.delete_face(f);
            attrs.set_kind(f, FaceKind::Plain);
            attrs.set_border(f, false);
        }
        self.patches.clear();
        self.state.filled = false;
        self.state.accepted = false;
        self.state.compenetrating = false;
    }

    /// Make an accepted patch permanent geometry: clear the patch marks and
    /// the border marks of the faces around it.
    pub(crate) fn reset_flag(&mut self, mesh: &Mesh<T>, attrs: &mut FaceAttrMap) {
        for &f in &self.patches {
            attrs.set_kind(f, FaceKind::Plain);
            attrs.set_border(f, false);
            for g in mesh.faces[f].adj_face {
                if !attrs.is_patch(g) {
                    attrs.set_border(g, false);
                }
            }
        }
    }

    /// Does the loop still touch a bridge face around any of its vertices?
    pub(crate) fn update_bridging_status(&mut self, mesh: &Mesh<T>, attrs: &FaceAttrMap) {
        if self.state.filled {
            return;
        }
        self.state.bridged = self
            .border
            .iter()
            .any(|p| p.fan_faces(mesh).iter().any(|&f| attrs.is_bridge(f)));
    }

    /// Every face id this hole holds.
    pub fn face_references(&self, out: &mut Vec<FaceId>) {
        out.push(self.p.f);
        out.extend(self.border.iter().map(|p| p.f));
        out.extend_from_slice(&self.patches);
    }
}
