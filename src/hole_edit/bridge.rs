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

use smallvec::{SmallVec, smallvec};

use crate::{
    error::HoleEditResult,
    geometry::quality::triangle_quality,
    hole_edit::{
        face_attr::{FaceAttrMap, FaceKind},
        hole::HoleId,
    },
    mesh::{
        FaceIndex,
        basic_types::{FaceId, Mesh, VertexId},
        pos::Pos,
    },
    numeric::scalar::Scalar,
};

/// One end of a bridge: a border edge and the hole it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Abutment {
    pub f: FaceId,
    pub z: usize,
    pub hole: HoleId,
}

impl Abutment {
    pub fn new(f: FaceId, z: usize, hole: HoleId) -> Self {
        Self { f, z, hole }
    }

    pub fn from_pos(p: &Pos, hole: HoleId) -> Self {
        Self::new(p.f, p.z, hole)
    }

    pub fn pos<T: Scalar>(&self, mesh: &Mesh<T>) -> Pos {
        Pos::new(mesh, self.f, self.z)
    }

    /// Edge endpoints in face winding order.
    pub fn vertices<T: Scalar>(&self, mesh: &Mesh<T>) -> (VertexId, VertexId) {
        let vs = mesh.faces[self.f].vertices;
        (vs[self.z], vs[(self.z + 1) % 3])
    }

    fn same_edge(&self, other: &Abutment) -> bool {
        self.f == other.f && self.z == other.z
    }
}

/// Which diagonal splits the quad between the two abutments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BridgeOption {
    /// Faces `(vA1, vA0, vB0)` and `(vB1, vB0, vA0)` sharing `vA0-vB0`.
    A,
    /// Faces `(vA1, vA0, vB1)` and `(vB1, vB0, vA1)` sharing `vA1-vB1`.
    B,
}

impl BridgeOption {
    /// Edge index shared by the two bridge faces.
    pub fn adj_edge(self) -> usize {
        match self {
            BridgeOption::A => 1,
            BridgeOption::B => 2,
        }
    }

    /// Edge index left on the border of each bridge face.
    pub fn side_edge(self) -> usize {
        match self {
            BridgeOption::A => 2,
            BridgeOption::B => 1,
        }
    }

    fn triangles<T: Scalar>(self, mesh: &Mesh<T>, a: &Abutment, b: &Abutment) -> [[VertexId; 3]; 2] {
        let (va0, va1) = a.vertices(mesh);
        let (vb0, vb1) = b.vertices(mesh);
        match self {
            BridgeOption::A => [[va1, va0, vb0], [vb1, vb0, va0]],
            BridgeOption::B => [[va1, va0, vb1], [vb1, vb0, va1]],
        }
    }
}

/// Faces inserted by the bridge builder and not yet confirmed or discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bridge {
    /// Two faces joining two border edges. Edge 0 of `f0` is glued to side
    /// A, edge 0 of `f1` to side B.
    Pair {
        f0: FaceId,
        f1: FaceId,
        opt: BridgeOption,
    },
    /// One face closing a non-manifold vertex; edges 0 and 2 are glued to
    /// the two border edges meeting there.
    NonManifold { f: FaceId },
}

impl Bridge {
    pub fn faces(&self) -> SmallVec<[FaceId; 2]> {
        match *self {
            Bridge::Pair { f0, f1, .. } => smallvec![f0, f1],
            Bridge::NonManifold { f } => smallvec![f],
        }
    }

    /// The mesh edges the bridge is glued to, seen from the mesh side.
    pub fn abutments<T: Scalar>(&self, mesh: &Mesh<T>) -> SmallVec<[Pos; 3]> {
        let across = |f: FaceId, e: usize| {
            let face = &mesh.faces[f];
            Pos::new(mesh, face.adj_face[e], face.adj_edge[e])
        };
        match *self {
            Bridge::Pair { f0, f1, .. } => smallvec![across(f0, 0), across(f1, 0)],
            // a closing face also has its third edge glued
            Bridge::NonManifold { f } => (0..3)
                .filter(|&e| !mesh.is_border_edge(f, e))
                .map(|e| across(f, e))
                .collect(),
        }
    }

    /// Border edge of the bridge on side A, if any.
    pub fn side_a<T: Scalar>(&self, mesh: &Mesh<T>) -> Option<Pos> {
        match *self {
            Bridge::Pair { f0, opt, .. } => Some(Pos::new(mesh, f0, opt.side_edge())),
            Bridge::NonManifold { .. } => None,
        }
    }

    /// Border edge of the bridge on side B, if any.
    pub fn side_b<T: Scalar>(&self, mesh: &Mesh<T>) -> Option<Pos> {
        match *self {
            Bridge::Pair { f1, opt, .. } => Some(Pos::new(mesh, f1, opt.side_edge())),
            Bridge::NonManifold { .. } => None,
        }
    }

    /// Turn the bridge faces into plain mesh faces.
    pub(crate) fn reset_flag(&self, attrs: &mut FaceAttrMap) {
        for f in self.faces() {
            attrs.set_kind(f, FaceKind::Plain);
        }
    }

    /// Delete the bridge faces; the edges they were glued to become border.
    pub(crate) fn delete_from_mesh<T: Scalar>(&self, mesh: &mut Mesh<T>, attrs: &mut FaceAttrMap) {
        for f in self.faces() {
            if !mesh.faces[f].removed {
                mesh.delete_face(f);
            }
            attrs.set_kind(f, FaceKind::Plain);
            attrs.set_border(f, false);
        }
    }
}

/// Best way to bridge `a` and `b` with its summed face quality, or `None`
/// when both options are degenerate or cut through the mesh.
pub fn compute_best_bridge_opt<T: Scalar>(
    mesh: &Mesh<T>,
    a: &Abutment,
    b: &Abutment,
    index: &FaceIndex<T>,
) -> Option<(BridgeOption, T)> {
    let min_quality = T::tolerance().sqrt();
    let mut best: Option<(BridgeOption, T)> = None;
    for opt in [BridgeOption::A, BridgeOption::B] {
        let tris = opt.triangles(mesh, a, b);
        let mut quality = T::zero();
        let mut valid = true;
        for tri in &tris {
            let [p0, p1, p2] = mesh.triangle_points(tri);
            let q = triangle_quality(&p0, &p1, &p2);
            if q <= min_quality || index.triangle_intersects(mesh, tri, &[]) {
                valid = false;
                break;
            }
            quality = quality + q;
        }
        if valid && best.is_none_or(|(_, q)| quality > q) {
            best = Some((opt, quality));
        }
    }
    best
}

/// Are the two abutments far enough apart along a shared loop?
///
/// Abutments on different holes always are. On a manifold loop the border
/// edges next to side A must not touch side B; on a non-manifold loop no
/// border edge may touch both sides.
pub fn test_abutment_distance<T: Scalar>(
    mesh: &Mesh<T>,
    a: &Abutment,
    b: &Abutment,
    non_manifold: bool,
) -> bool {
    if a.hole != b.hole {
        return true;
    }
    if a.same_edge(b) {
        return false;
    }
    let (vb0, vb1) = b.vertices(mesh);

    if !non_manifold {
        let mut pos = a.pos(mesh);
        pos.next_b(mesh);
        if pos.v == vb0 || pos.v == vb1 {
            return false;
        }
        let mut pos = a.pos(mesh);
        pos.flip_v(mesh);
        pos.next_b(mesh);
        if pos.v == vb0 || pos.v == vb1 {
            return false;
        }
        return true;
    }

    let (va0, va1) = a.vertices(mesh);
    mesh.walk_border(a.pos(mesh)).iter().all(|p| {
        let (c0, c1) = (p.v0(mesh), p.v1(mesh));
        let touches_a = c0 == va0 || c1 == va0 || c0 == va1 || c1 == va1;
        let touches_b = c0 == vb0 || c1 == vb0 || c0 == vb1 || c1 == vb1;
        !(touches_a && touches_b)
    })
}

/// Append the two bridge faces between `a` and `b` and wire them in.
///
/// Both new faces are marked bridge and border; the abutment faces lose
/// their border mark.
pub(crate) fn build<T: Scalar>(
    mesh: &mut Mesh<T>,
    attrs: &mut FaceAttrMap,
    a: &Abutment,
    b: &Abutment,
    opt: BridgeOption,
) -> HoleEditResult<Bridge> {
    mesh.reserve_faces(2)?;
    let [t0, t1] = opt.triangles(mesh, a, b);
    let f0 = mesh.add_triangle(t0[0], t0[1], t0[2]);
    let f1 = mesh.add_triangle(t1[0], t1[1], t1[2]);

    mesh.set_adjacent(f0, 0, a.f, a.z);
    mesh.set_adjacent(f1, 0, b.f, b.z);
    mesh.set_adjacent(f0, opt.adj_edge(), f1, opt.adj_edge());

    for f in [f0, f1] {
        attrs.set_kind(f, FaceKind::Bridge);
        attrs.set_border(f, true);
    }
    attrs.set_border(a.f, false);
    attrs.set_border(b.f, false);

    Ok(Bridge::Pair { f0, f1, opt })
}
