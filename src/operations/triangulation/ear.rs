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

use std::cmp::Ordering;

use tracing::{debug, warn};

use crate::{
    error::HoleEditResult,
    geometry::{
        Vector3,
        quality::{polygon_normal, triangle_quality},
    },
    mesh::{
        basic_types::{FaceId, Mesh, VertexId},
        face_index::triangles_intersect,
        pos::Pos,
    },
    numeric::scalar::Scalar,
};

/// Ear selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillMode {
    /// Clip the first valid ear of the loop; a fan from the start vertex.
    Trivial,
    /// Clip the ear with the best shape and dihedral continuity.
    MinimumWeight,
    /// As `MinimumWeight`, with ears cutting the faces around the border
    /// pushed to the back of the queue.
    SelfIntersection,
}

#[derive(Debug, Clone, Copy)]
pub struct EarFillOpts<T: Scalar> {
    /// Exponent applied to the dihedral term of an ear's weight.
    pub dihedral_weight: T,
}

impl<T: Scalar> Default for EarFillOpts<T> {
    fn default() -> Self {
        Self {
            dihedral_weight: T::from_num_den(1, 10),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct EarScore<T: Scalar> {
    intersects: bool,
    concave: bool,
    weight: T,
}

impl<T: Scalar> EarScore<T> {
    /// Lower is better.
    fn cmp(&self, other: &Self) -> Ordering {
        self.intersects
            .cmp(&other.intersects)
            .then(self.concave.cmp(&other.concave))
            .then(
                self.weight
                    .partial_cmp(&other.weight)
                    .unwrap_or(Ordering::Equal),
            )
    }
}

/// Ear-clipping state over one border loop.
struct EarFiller<'m, T: Scalar> {
    mesh: &'m mut Mesh<T>,
    /// Border positions in walk order; entry `i` runs from `vflip` to `v`.
    ring: Vec<Pos>,
    hole_normal: Vector3<T>,
    /// Faces around the loop an ear must not cut (`SelfIntersection` only).
    neighbourhood: Vec<FaceId>,
    mode: FillMode,
    opts: EarFillOpts<T>,
    created: Vec<FaceId>,
}

/// Triangulate the border loop through `start` in place.
///
/// All new faces are allocated up front, so an allocation failure leaves the
/// mesh untouched. A manifold loop of `n` edges yields `n - 2` faces. New
/// faces are wound consistently with the faces around the loop and their
/// adjacency is fully wired. Filling stops early, leaving the rest of the
/// loop open, when every remaining ear would break two-manifoldness.
/// Returns the ids of the new faces.
pub fn fill_hole_ear<T: Scalar>(
    mesh: &mut Mesh<T>,
    start: Pos,
    mode: FillMode,
    opts: &EarFillOpts<T>,
) -> HoleEditResult<Vec<FaceId>> {
    let ring = mesh.walk_border(start);
    if ring.len() < 3 {
        warn!(size = ring.len(), "border loop too short to fill");
        return Ok(Vec::new());
    }
    mesh.reserve_faces(ring.len() - 2)?;

    let points: Vec<_> = ring.iter().map(|p| mesh.position(p.v)).collect();
    let hole_normal = polygon_normal(&points);

    let mut neighbourhood = Vec::new();
    if mode == FillMode::SelfIntersection {
        for p in &ring {
            for f in p.fan_faces(mesh) {
                if !neighbourhood.contains(&f) {
                    neighbourhood.push(f);
                }
            }
        }
    }

    let size = ring.len();
    let mut filler = EarFiller {
        mesh,
        ring,
        hole_normal,
        neighbourhood,
        mode,
        opts: *opts,
        created: Vec::with_capacity(size - 2),
    };
    filler.run();

    debug!(?mode, size, faces = filler.created.len(), "filled border loop");
    Ok(filler.created)
}

impl<'m, T: Scalar> EarFiller<'m, T> {
    fn run(&mut self) {
        while self.ring.len() >= 3 {
            let Some(i) = self.select_ear() else {
                warn!(left = self.ring.len(), "no clippable ear left in loop");
                return;
            };
            self.clip(i);
        }
        if !self.ring.is_empty() {
            warn!(left = self.ring.len(), "residual border edges after filling");
        }
    }

    /// Vertices `(a, b, c)` of the ear made by entries `i` and `i + 1`.
    fn ear(&self, i: usize) -> (Pos, Pos, [VertexId; 3]) {
        let e0 = self.ring[i];
        let e1 = self.ring[(i + 1) % self.ring.len()];
        (e0, e1, [e0.vflip(self.mesh), e0.v, e1.v])
    }

    /// Would clipping ear `i` keep the mesh two-manifold?
    fn is_valid(&self, i: usize) -> bool {
        let (e0, e1, [a, _, c]) = self.ear(i);
        if self.ring.len() == 3 {
            return true;
        }
        if a == c || e0.f == e1.f {
            return false;
        }
        // an existing a-c edge would get a third face
        let mut around_a = e0;
        around_a.flip_v(self.mesh);
        !around_a
            .fan_faces(self.mesh)
            .iter()
            .any(|&f| self.mesh.faces[f].has_vertex(c))
    }

    fn select_ear(&self) -> Option<usize> {
        let n = self.ring.len();
        let mut candidates = (0..n).filter(|&i| self.is_valid(i));
        if self.mode == FillMode::Trivial {
            return candidates.next();
        }

        candidates
            .map(|i| (i, self.score(i)))
            .min_by(|(_, a), (_, b)| a.cmp(b))
            .map(|(i, _)| i)
    }

    fn score(&self, i: usize) -> EarScore<T> {
        let (e0, e1, tri) = self.ear(i);
        let [pa, pb, pc] = self.mesh.triangle_points(&tri);
        let n = (pb - pa).cross(&(pc - pa));

        let concave = n.dot(&self.hole_normal) < T::zero();
        let quality = triangle_quality(&pa, &pb, &pc);
        let dihedral = n
            .angle(&self.mesh.face_normal(e0.f))
            .max(n.angle(&self.mesh.face_normal(e1.f)));
        let weight = if quality > T::zero() {
            (T::one() + dihedral).powf(self.opts.dihedral_weight) / quality
        } else {
            T::infinity()
        };

        let intersects = self.mode == FillMode::SelfIntersection
            && self.neighbourhood.iter().any(|&f| {
                !self.mesh.faces[f].removed && triangles_intersect(self.mesh, &tri, &self.mesh.faces[f].vertices)
            });

        EarScore {
            intersects,
            concave,
            weight,
        }
    }

    /// Add the face for ear `i` and splice the loop around it.
    fn clip(&mut self, i: usize) {
        let (e0, e1, [a, b, c]) = self.ear(i);
        let f = self.mesh.add_triangle(a, b, c);
        self.mesh.set_adjacent(f, 0, e0.f, e0.z);
        self.mesh.set_adjacent(f, 1, e1.f, e1.z);
        self.created.push(f);
        if self.mode == FillMode::SelfIntersection {
            self.neighbourhood.push(f);
        }

        // edge 2 of the new face runs c -> a and replaces e0 and e1
        let new_pos = Pos { f, z: 2, v: c };
        let n = self.ring.len();
        let idx = if i + 1 < n {
            self.ring[i] = new_pos;
            self.ring.remove(i + 1);
            i
        } else {
            self.ring[i] = new_pos;
            self.ring.remove(0);
            i - 1
        };

        let n = self.ring.len();
        let next_i = (idx + 1) % n;
        let prev_i = (idx + n - 1) % n;
        let next = self.ring[next_i];
        let prev = self.ring[prev_i];
        if next_i != idx && next.v == a {
            self.mesh.set_adjacent(f, 2, next.f, next.z);
            self.remove_pair(idx, next_i);
        } else if prev_i != idx && prev.vflip(self.mesh) == c {
            self.mesh.set_adjacent(f, 2, prev.f, prev.z);
            self.remove_pair(idx, prev_i);
        }
    }

    fn remove_pair(&mut self, i: usize, j: usize) {
        let (lo, hi) = if i < j { (i, j) } else { (j, i) };
        self.ring.remove(hi);
        self.ring.remove(lo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point3;

    /// Two triangles glued along `2-0`, walked as a four-edge ring whose
    /// ears all either stay inside one face or close an existing edge.
    fn blocked_ring() -> (Mesh<f64>, Vec<Pos>) {
        let mut mesh = Mesh::new();
        for (x, y) in [(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (-1.0, 0.0)] {
            mesh.add_vertex(Point3::new(x, y, 0.0));
        }
        let f = mesh.add_triangle(0, 1, 2);
        let g = mesh.add_triangle(2, 0, 3);
        mesh.set_adjacent(f, 2, g, 0);
        let ring = vec![
            Pos { f, z: 0, v: 1 },
            Pos { f, z: 1, v: 2 },
            Pos { f: g, z: 0, v: 0 },
            Pos { f: g, z: 1, v: 3 },
        ];
        (mesh, ring)
    }

    #[test]
    fn no_ear_is_clipped_when_all_are_invalid() {
        for mode in [FillMode::Trivial, FillMode::MinimumWeight, FillMode::SelfIntersection] {
            let (mut mesh, ring) = blocked_ring();
            let faces = mesh.faces.len();
            let mut filler = EarFiller {
                mesh: &mut mesh,
                ring,
                hole_normal: Vector3::new(0.0, 0.0, 1.0),
                neighbourhood: Vec::new(),
                mode,
                opts: EarFillOpts::default(),
                created: Vec::new(),
            };
            assert!((0..4).all(|i| !filler.is_valid(i)));
            assert_eq!(filler.select_ear(), None);

            filler.run();
            assert!(filler.created.is_empty());
            assert_eq!(filler.ring.len(), 4);
            assert_eq!(mesh.faces.len(), faces, "{mode:?}");
        }
    }
}
