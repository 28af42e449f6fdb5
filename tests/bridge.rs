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
    Abutment, FillMode, HoleEditError, HoleSetManager,
    hole_edit::{Bridge, FaceKind},
};

fn square_hole_manager() -> (HoleSetManager<T>, usize) {
    let mut manager = HoleSetManager::new(grid_with_square_hole());
    let idx = hole_with_size(&manager, 16);
    manager.set_selected(idx, true);
    (manager, idx)
}

#[test]
fn bridge_inside_one_hole_splits_it() {
    let (mut manager, idx) = square_hole_manager();
    let hole = &manager.holes()[idx];
    let a = abutment_on(&manager, hole, grid_vertex(6, 2, 1), grid_vertex(6, 3, 1));
    let b = abutment_on(&manager, hole, grid_vertex(6, 2, 5), grid_vertex(6, 3, 5));
    let faces = manager.mesh().faces.len();

    manager.create_bridge(a, b).expect("bridge");

    assert_eq!(manager.holes_count(), 3);
    assert_eq!(manager.mesh().faces.len(), faces + 2);
    assert_eq!(manager.bridges().len(), 1);
    assert!(manager.mesh().check_ff_topology());

    let mut inner: Vec<usize> = manager
        .holes()
        .iter()
        .filter(|h| h.is_bridged())
        .map(|h| {
            assert!(h.is_selected());
            h.size()
        })
        .collect();
    inner.sort_unstable();
    assert_eq!(inner, vec![7, 9]);
    assert_eq!(manager.selection_count(), 2);

    let Bridge::Pair { f0, f1, .. } = manager.bridges()[0] else {
        panic!("expected a two-face bridge");
    };
    for f in [f0, f1] {
        assert_eq!(manager.face_attr(f).kind, FaceKind::Bridge);
        assert!(manager.face_attr(f).border);
        assert_eq!(manager.mesh().border_edge_count(f), 1);
    }
    assert!(!manager.face_attr(a.f).border);
    assert!(!manager.face_attr(b.f).border);
}

#[test]
fn close_sides_are_rejected() {
    let (mut manager, idx) = square_hole_manager();
    let hole = &manager.holes()[idx];
    let a = abutment_on(&manager, hole, grid_vertex(6, 2, 1), grid_vertex(6, 3, 1));
    let next = abutment_on(&manager, hole, grid_vertex(6, 3, 1), grid_vertex(6, 4, 1));
    let two_away = abutment_on(&manager, hole, grid_vertex(6, 4, 1), grid_vertex(6, 5, 1));
    let faces = manager.mesh().faces.len();

    for b in [a, next, two_away] {
        let err = manager.create_bridge(a, b).unwrap_err();
        assert!(matches!(err, HoleEditError::BridgeTooClose), "{err}");
        assert!(err.is_rejection());
    }
    assert_eq!(manager.mesh().faces.len(), faces);
    assert_eq!(manager.holes_count(), 2);
    assert!(manager.bridges().is_empty());
}

#[test]
fn degenerate_bridge_is_rejected() {
    let (mut manager, idx) = square_hole_manager();
    let hole = &manager.holes()[idx];
    // three edges apart but on the same straight side
    let a = abutment_on(&manager, hole, grid_vertex(6, 1, 1), grid_vertex(6, 2, 1));
    let b = abutment_on(&manager, hole, grid_vertex(6, 4, 1), grid_vertex(6, 5, 1));
    let err = manager.create_bridge(a, b).unwrap_err();
    assert!(matches!(err, HoleEditError::BridgeCompenetrating), "{err}");
    assert!(manager.bridges().is_empty());
}

#[test]
fn bridge_on_filled_hole_is_rejected() {
    let (mut manager, idx) = square_hole_manager();
    let hole = &manager.holes()[idx];
    let a = abutment_on(&manager, hole, grid_vertex(6, 2, 1), grid_vertex(6, 3, 1));
    let b = abutment_on(&manager, hole, grid_vertex(6, 2, 5), grid_vertex(6, 3, 5));
    manager.fill(FillMode::Trivial).expect("fill");
    assert!(matches!(
        manager.create_bridge(a, b),
        Err(HoleEditError::HoleIsFilled { .. })
    ));
}

#[test]
fn bridge_between_holes_merges_them() {
    let mut manager = HoleSetManager::new(cube_with_two_holes());
    assert_eq!(manager.holes_count(), 2);
    let (top, bottom) = (&manager.holes()[0], &manager.holes()[1]);
    assert_eq!((top.size(), bottom.size()), (4, 4));

    let a = top.border()[0];
    let b = bottom.border()[0];
    let a = Abutment::new(a.f, a.z, top.id());
    let b = Abutment::new(b.f, b.z, bottom.id());
    let faces = manager.mesh().faces.len();

    manager.create_bridge(a, b).expect("bridge");
    assert_eq!(manager.holes_count(), 1);
    assert_eq!(manager.mesh().faces.len(), faces + 2);
    assert_eq!(manager.holes()[0].size(), 8);
    assert!(manager.holes()[0].is_bridged());
    assert!(manager.mesh().check_ff_topology());
}

#[test]
fn auto_multi_bridging_merges_two_holes() {
    let mut manager = HoleSetManager::new(cube_with_two_holes());
    manager.set_all_selected(true);
    assert_eq!(manager.selection_count(), 2);
    let faces = manager.mesh().faces.len();

    assert_eq!(manager.auto_multi_bridging().expect("bridging"), 1);
    assert_eq!(manager.bridges().len(), 1);
    assert_eq!(manager.mesh().faces.len(), faces + 2);
    assert_eq!(manager.selection_count(), 1);
    assert_eq!(manager.holes_count(), 1);
    assert!(manager.mesh().check_ff_topology());

    // the merged hole can be filled like any other
    manager.fill(FillMode::MinimumWeight).expect("fill");
    assert_eq!(manager.mesh().faces.len(), faces + 2 + 6);
    manager.confirm_filling(true);
    assert_eq!(manager.holes_count(), 0);
    assert!(manager.bridges().is_empty());
    assert!(manager.mesh().border_loops().is_empty());
}

#[test]
fn auto_multi_bridging_needs_two_holes() {
    let mut manager = HoleSetManager::new(hexagonal_pyramid());
    manager.set_all_selected(true);
    assert_eq!(manager.auto_multi_bridging().expect("bridging"), 0);
    assert!(manager.bridges().is_empty());
}

#[test]
fn auto_self_bridging_splits_large_holes() {
    let (mut manager, _) = square_hole_manager();
    let faces = manager.mesh().faces.len();

    assert_eq!(manager.auto_self_bridging(0.0).expect("bridging"), 1);
    assert_eq!(manager.holes_count(), 3);
    assert_eq!(manager.mesh().faces.len(), faces + 2);
    assert!(manager.mesh().check_ff_topology());

    let split: usize = manager
        .holes()
        .iter()
        .filter(|h| h.is_bridged())
        .map(|h| h.size())
        .sum();
    assert_eq!(split, 16);
}

#[test]
fn auto_self_bridging_skips_small_holes() {
    let mut manager = HoleSetManager::new(cube_with_two_holes());
    manager.set_all_selected(true);
    assert_eq!(manager.auto_self_bridging(1.0).expect("bridging"), 0);
    assert_eq!(manager.holes_count(), 2);
}

#[test]
fn discard_bridges_restores_holes() {
    let (mut manager, idx) = square_hole_manager();
    let vertices = cyclic_vertices(&manager.holes()[idx]);
    let live = manager.mesh().face_count();
    let hole = &manager.holes()[idx];
    let a = abutment_on(&manager, hole, grid_vertex(6, 2, 1), grid_vertex(6, 3, 1));
    let b = abutment_on(&manager, hole, grid_vertex(6, 2, 5), grid_vertex(6, 3, 5));
    manager.create_bridge(a, b).expect("bridge");

    // fill one side, then throw everything away
    let small = hole_with_size(&manager, 7);
    manager.set_all_selected(false);
    manager.set_selected(small, true);
    manager.fill(FillMode::Trivial).expect("fill");

    manager.discard_bridges();
    assert!(manager.bridges().is_empty());
    assert_eq!(manager.holes_count(), 2);
    assert_eq!(manager.mesh().face_count(), live);
    assert!(manager.mesh().check_ff_topology());

    let restored = hole_with_size(&manager, 16);
    assert_eq!(cyclic_vertices(&manager.holes()[restored]), vertices);
    assert!(manager.holes()[restored].is_selected());
    assert!(!manager.holes()[restored].is_bridged());
    for f in 0..manager.mesh().faces.len() {
        assert!(!manager.face_attr(f).is_bridge());
        assert!(!manager.face_attr(f).is_patch());
    }
}

#[test]
fn confirm_bridges_keeps_faces() {
    let mut manager = HoleSetManager::new(cube_with_two_holes());
    manager.set_all_selected(true);
    manager.auto_multi_bridging().expect("bridging");
    let Bridge::Pair { f0, f1, .. } = manager.bridges()[0] else {
        panic!("expected a two-face bridge");
    };

    manager.confirm_bridges();
    assert!(manager.bridges().is_empty());
    assert!(!manager.holes()[0].is_bridged());
    for f in [f0, f1] {
        assert!(!manager.mesh().faces[f].removed);
        assert_eq!(manager.face_attr(f).kind, FaceKind::Plain);
    }

    // nothing left to discard
    let faces = manager.mesh().face_count();
    manager.discard_bridges();
    assert_eq!(manager.mesh().face_count(), faces);
    assert_eq!(manager.holes_count(), 1);
}

#[test]
fn confirming_fill_absorbs_touching_bridge() {
    let (mut manager, idx) = square_hole_manager();
    let hole = &manager.holes()[idx];
    let a = abutment_on(&manager, hole, grid_vertex(6, 2, 1), grid_vertex(6, 3, 1));
    let b = abutment_on(&manager, hole, grid_vertex(6, 2, 5), grid_vertex(6, 3, 5));
    manager.create_bridge(a, b).expect("bridge");

    let small = hole_with_size(&manager, 7);
    manager.set_all_selected(false);
    manager.set_selected(small, true);
    manager.fill(FillMode::MinimumWeight).expect("fill");
    manager.confirm_filling(true);

    assert!(manager.bridges().is_empty());
    assert_eq!(manager.holes_count(), 2);
    let other = hole_with_size(&manager, 9);
    assert!(!manager.holes()[other].is_bridged());
}
