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

#![allow(dead_code)]

use std::collections::HashMap;

use holeset::{
    Abutment, HoleSetManager,
    geometry::Point3,
    hole_edit::Hole,
    mesh::{FaceId, Mesh, VertexId},
};

pub type T = f64;

/// Flat `n x n` grid in the z = 0 plane, two triangles per unit cell.
/// `remove(i, j, t)` drops triangle `t` (0 or 1) of cell `(i, j)`.
pub fn grid_mesh(n: usize, remove: impl Fn(usize, usize, usize) -> bool) -> Mesh<T> {
    let mut mesh = Mesh::new();
    for j in 0..=n {
        for i in 0..=n {
            mesh.add_vertex(Point3::new(i as T, j as T, 0.0));
        }
    }
    for j in 0..n {
        for i in 0..n {
            let p00 = grid_vertex(n, i, j);
            let p10 = grid_vertex(n, i + 1, j);
            let p11 = grid_vertex(n, i + 1, j + 1);
            let p01 = grid_vertex(n, i, j + 1);
            if !remove(i, j, 0) {
                mesh.add_triangle(p00, p10, p11);
            }
            if !remove(i, j, 1) {
                mesh.add_triangle(p00, p11, p01);
            }
        }
    }
    mesh.build_adjacency();
    mesh
}

pub fn grid_vertex(n: usize, i: usize, j: usize) -> VertexId {
    j * (n + 1) + i
}

/// 6 x 6 grid with the cells of `[1, 5]^2` removed: a 16-edge square hole
/// inside a 24-edge outer border.
pub fn grid_with_square_hole() -> Mesh<T> {
    grid_mesh(6, |i, j, _| (1..5).contains(&i) && (1..5).contains(&j))
}

/// Two unit square holes touching at the corner `(2, 2)`.
pub fn grid_with_corner_squares() -> Mesh<T> {
    grid_mesh(5, |i, j, _| (i, j) == (1, 1) || (i, j) == (2, 2))
}

/// Two triangular holes touching at `(2, 2)`.
pub fn grid_with_corner_triangles() -> Mesh<T> {
    grid_mesh(5, |i, j, t| (i, j, t) == (2, 1, 1) || (i, j, t) == (1, 2, 0))
}

/// Hexagonal pyramid with apex `(0, 0, 1)` and an open regular hexagon as
/// base.
pub fn hexagonal_pyramid() -> Mesh<T> {
    let mut mesh = Mesh::new();
    let base: Vec<VertexId> = (0..6)
        .map(|k| {
            let a = std::f64::consts::PI / 3.0 * k as f64;
            mesh.add_vertex(Point3::new(a.cos(), a.sin(), 0.0))
        })
        .collect();
    let apex = mesh.add_vertex(Point3::new(0.0, 0.0, 1.0));
    for k in 0..6 {
        mesh.add_triangle(base[k], base[(k + 1) % 6], apex);
    }
    mesh.build_adjacency();
    mesh
}

/// Surface of the cube `[0, 3]^3` with unit cells, outward oriented, and the
/// center cell of the top and bottom sides removed.
pub fn cube_with_two_holes() -> Mesh<T> {
    let mut mesh = Mesh::new();
    let mut ids: HashMap<[i32; 3], VertexId> = HashMap::new();
    let mut vid = |mesh: &mut Mesh<T>, p: [i32; 3]| {
        *ids.entry(p)
            .or_insert_with(|| mesh.add_vertex(Point3::new(p[0] as T, p[1] as T, p[2] as T)))
    };

    // (fixed axis, fixed value, u axis, v axis) with u x v pointing outward
    let sides = [
        (0, 3, 1, 2),
        (0, 0, 2, 1),
        (1, 3, 2, 0),
        (1, 0, 0, 2),
        (2, 3, 0, 1),
        (2, 0, 1, 0),
    ];
    for (axis, value, u, v) in sides {
        for a in 0..3 {
            for b in 0..3 {
                if axis == 2 && a == 1 && b == 1 {
                    continue;
                }
                let corner = |da: i32, db: i32| {
                    let mut p = [0; 3];
                    p[axis] = value;
                    p[u] = a + da;
                    p[v] = b + db;
                    p
                };
                let p00 = vid(&mut mesh, corner(0, 0));
                let p10 = vid(&mut mesh, corner(1, 0));
                let p11 = vid(&mut mesh, corner(1, 1));
                let p01 = vid(&mut mesh, corner(0, 1));
                mesh.add_triangle(p00, p10, p11);
                mesh.add_triangle(p00, p11, p01);
            }
        }
    }
    mesh.build_adjacency();
    mesh
}

/// Append a folded pair of triangles, far from everything else, whose only
/// border is a two-edge loop. Returns the two faces.
pub fn add_two_edge_loop(mesh: &mut Mesh<T>) -> [FaceId; 2] {
    let a = mesh.add_vertex(Point3::new(10.0, 0.0, 5.0));
    let b = mesh.add_vertex(Point3::new(11.0, 0.0, 5.0));
    let c = mesh.add_vertex(Point3::new(10.0, 1.0, 5.0));
    let f = mesh.add_triangle(a, b, c);
    let g = mesh.add_triangle(b, a, c);
    mesh.set_adjacent(f, 2, g, 1);
    mesh.set_adjacent(f, 1, g, 2);
    [f, g]
}

pub fn hole_with_size(manager: &HoleSetManager<T>, size: usize) -> usize {
    manager
        .holes()
        .iter()
        .position(|h| h.size() == size)
        .unwrap_or_else(|| panic!("no hole of size {size}"))
}

/// The border edge of `hole` joining `u` and `v`, as an abutment.
pub fn abutment_on(manager: &HoleSetManager<T>, hole: &Hole<T>, u: VertexId, v: VertexId) -> Abutment {
    let mesh = manager.mesh();
    let p = hole
        .border()
        .iter()
        .find(|p| {
            let (a, b) = (p.v0(mesh), p.v1(mesh));
            (a == u && b == v) || (a == v && b == u)
        })
        .unwrap_or_else(|| panic!("edge {u}-{v} is not on hole {}", hole.name()));
    Abutment::new(p.f, p.z, hole.id())
}

pub fn sorted_vertices(hole: &Hole<T>) -> Vec<VertexId> {
    let mut vs = hole.border_vertices().to_vec();
    vs.sort_unstable();
    vs
}

/// Border vertices in walk order, rotated to start at the smallest id.
/// Equal for two walks of the same loop in the same direction only.
pub fn cyclic_vertices(hole: &Hole<T>) -> Vec<VertexId> {
    let vs = hole.border_vertices();
    let start = (0..vs.len()).min_by_key(|&i| vs[i]).unwrap_or(0);
    vs[start..].iter().chain(&vs[..start]).copied().collect()
}
