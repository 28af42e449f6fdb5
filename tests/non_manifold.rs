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

mod common;

use common::*;
use holeset::{
    HoleEditError, HoleSetManager,
    hole_edit::{Bridge, FaceKind, bridge::test_abutment_distance},
};

fn sizes(manager: &HoleSetManager<T>) -> Vec<usize> {
    let mut sizes: Vec<usize> = manager.holes().iter().map(|h| h.size()).collect();
    sizes.sort_unstable();
    sizes
}

#[test]
fn corner_touching_holes_share_one_loop() {
    let manager = HoleSetManager::new(grid_with_corner_squares());
    assert_eq!(sizes(&manager), vec![8, 20]);
    let inner = &manager.holes()[hole_with_size(&manager, 8)];
    assert!(inner.is_non_manifold());
    assert_eq!(sorted_vertices(inner).len(), 8);

    let outer = &manager.holes()[hole_with_size(&manager, 20)];
    assert!(!outer.is_non_manifold());
}

#[test]
fn closing_square_corner_splits_hole() {
    let mut manager = HoleSetManager::new(grid_with_corner_squares());
    let idx = hole_with_size(&manager, 8);
    manager.set_selected(idx, true);
    let faces = manager.mesh().faces.len();

    assert_eq!(manager.close_non_manifold_holes().expect("close"), 1);
    assert_eq!(manager.mesh().faces.len(), faces + 1);
    assert!(manager.mesh().check_ff_topology());
    assert_eq!(sizes(&manager), vec![3, 4, 20]);
    assert!(manager.holes().iter().all(|h| !h.is_non_manifold()));

    let [Bridge::NonManifold { f }] = manager.bridges() else {
        panic!("expected one closing face");
    };
    assert_eq!(manager.face_attr(*f).kind, FaceKind::Bridge);
    assert!(manager.face_attr(*f).border);
    assert_eq!(manager.mesh().border_edge_count(*f), 1);

    // both halves stay selected and remember the bridge
    for size in [3, 4] {
        let hole = &manager.holes()[hole_with_size(&manager, size)];
        assert!(hole.is_selected());
        assert!(hole.is_bridged());
    }
    assert_eq!(manager.selection_count(), 2);
}

#[test]
fn closing_triangle_corner_patches_it() {
    let mut manager = HoleSetManager::new(grid_with_corner_triangles());
    assert_eq!(sizes(&manager), vec![6, 20]);
    let idx = hole_with_size(&manager, 6);
    assert!(manager.holes()[idx].is_non_manifold());
    manager.set_selected(idx, true);
    let faces = manager.mesh().faces.len();

    assert_eq!(manager.close_non_manifold_holes().expect("close"), 1);
    assert_eq!(manager.mesh().faces.len(), faces + 1);
    assert!(manager.mesh().check_ff_topology());
    assert_eq!(sizes(&manager), vec![3, 20]);

    let [Bridge::NonManifold { f }] = manager.bridges() else {
        panic!("expected one closing face");
    };
    let attr = manager.face_attr(*f);
    assert_eq!(attr.kind, FaceKind::BridgeAndPatch);
    assert!(attr.is_bridge() && attr.is_patch());
    assert!(!attr.border);
    assert_eq!(manager.mesh().border_edge_count(*f), 0);
}

#[test]
fn discard_reopens_non_manifold_loop() {
    for (mesh, size) in [(grid_with_corner_squares(), 8), (grid_with_corner_triangles(), 6)] {
        let mut manager = HoleSetManager::new(mesh);
        let idx = hole_with_size(&manager, size);
        let vertices = sorted_vertices(&manager.holes()[idx]);
        let live = manager.mesh().face_count();
        manager.set_selected(idx, true);
        manager.close_non_manifold_holes().expect("close");

        manager.discard_bridges();
        assert!(manager.bridges().is_empty());
        assert_eq!(manager.mesh().face_count(), live);
        assert_eq!(manager.holes_count(), 2);

        let hole = &manager.holes()[hole_with_size(&manager, size)];
        assert!(hole.is_non_manifold());
        assert!(hole.is_selected());
        assert_eq!(sorted_vertices(hole), vertices);
    }
}

#[test]
fn confirm_keeps_closing_face() {
    let mut manager = HoleSetManager::new(grid_with_corner_triangles());
    manager.set_all_selected(true);
    manager.close_non_manifold_holes().expect("close");
    let [Bridge::NonManifold { f }] = manager.bridges() else {
        panic!("expected one closing face");
    };
    let f = *f;

    manager.confirm_bridges();
    assert!(!manager.mesh().faces[f].removed);
    assert_eq!(manager.face_attr(f).kind, FaceKind::Plain);
    assert_eq!(sizes(&manager), vec![3, 20]);
}

#[test]
fn manifold_holes_are_left_alone() {
    let mut manager = HoleSetManager::new(hexagonal_pyramid());
    manager.set_all_selected(true);
    let faces = manager.mesh().faces.len();
    assert_eq!(manager.close_non_manifold_holes().expect("close"), 0);
    assert_eq!(manager.mesh().faces.len(), faces);
    assert!(manager.bridges().is_empty());

    // unknown ids are ignored
    assert_eq!(manager.close_non_manifold_vertex(99).expect("close"), 0);
}

#[test]
fn bridge_across_shared_corner_is_too_close() {
    let mut manager = HoleSetManager::new(grid_with_corner_squares());
    let idx = hole_with_size(&manager, 8);
    let inner = manager.holes()[idx].clone();
    assert!(inner.is_non_manifold());

    // one edge from each square, both ending on the shared corner
    let corner = grid_vertex(5, 2, 2);
    let a = abutment_on(&manager, &inner, grid_vertex(5, 1, 2), corner);
    let b = abutment_on(&manager, &inner, corner, grid_vertex(5, 3, 2));
    assert!(!test_abutment_distance(manager.mesh(), &a, &b, true));

    let faces = manager.mesh().faces.len();
    let err = manager.create_bridge(a, b).expect_err("bridge through the corner");
    assert!(matches!(err, HoleEditError::BridgeTooClose));
    assert_eq!(manager.mesh().faces.len(), faces);
    assert!(manager.bridges().is_empty());
    assert_eq!(sizes(&manager), vec![8, 20]);
    assert!(manager.holes()[idx].is_non_manifold());
}

#[test]
fn far_edges_of_non_manifold_loop_pass_distance_test() {
    let manager = HoleSetManager::new(grid_with_corner_squares());
    let inner = &manager.holes()[hole_with_size(&manager, 8)];

    let a = abutment_on(&manager, inner, grid_vertex(5, 1, 1), grid_vertex(5, 2, 1));
    let b = abutment_on(&manager, inner, grid_vertex(5, 2, 3), grid_vertex(5, 3, 3));
    assert!(test_abutment_distance(manager.mesh(), &a, &b, true));

    // a side edge of the lower square shares a vertex with `a`
    let c = abutment_on(&manager, inner, grid_vertex(5, 1, 1), grid_vertex(5, 1, 2));
    assert!(!test_abutment_distance(manager.mesh(), &a, &c, true));
}
