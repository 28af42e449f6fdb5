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
    FillMode, HoleEditError, HoleSetManager,
    hole_edit::FaceKind,
    operations::triangulation::{EarFillOpts, fill_hole_ear},
};

#[test]
fn hexagon_fill_and_confirm() {
    let mut manager = HoleSetManager::new(hexagonal_pyramid());
    assert_eq!(manager.holes_count(), 1);
    assert_eq!(manager.holes()[0].size(), 6);
    assert!(!manager.holes()[0].is_non_manifold());

    manager.set_all_selected(true);
    let before = manager.mesh().faces.len();
    assert_eq!(manager.fill(FillMode::MinimumWeight).expect("fill"), 1);

    let hole = &manager.holes()[0];
    assert!(hole.is_filled());
    assert!(hole.is_accepted());
    assert!(!hole.is_compenetrating());
    assert_eq!(hole.patches().len(), 4);
    assert_eq!(manager.mesh().faces.len(), before + 4);
    for &f in hole.patches() {
        assert_eq!(manager.face_attr(f).kind, FaceKind::Patch { compenetrating: false });
    }
    assert!(manager.mesh().check_ff_topology());
    assert_eq!(manager.accepted_count(), 1);

    manager.confirm_filling(true);
    assert_eq!(manager.holes_count(), 0);
    assert!(manager.mesh().border_loops().is_empty());
    for f in 0..manager.mesh().faces.len() {
        assert_eq!(manager.face_attr(f).kind, FaceKind::Plain);
        assert!(!manager.face_attr(f).border);
    }
}

#[test]
fn every_mode_adds_n_minus_two_faces() {
    for mode in [FillMode::Trivial, FillMode::MinimumWeight, FillMode::SelfIntersection] {
        let mut manager = HoleSetManager::new(grid_with_square_hole());
        let idx = hole_with_size(&manager, 16);
        manager.set_selected(idx, true);

        let live = manager.mesh().face_count();
        manager.fill(mode).expect("fill");
        assert_eq!(manager.mesh().face_count(), live + 14, "{mode:?}");
        assert!(manager.mesh().check_ff_topology(), "{mode:?}");

        // the outer border is untouched and the inner one is gone
        let loops = manager.mesh().border_loops();
        assert_eq!(loops.len(), 1, "{mode:?}");
        assert_eq!(manager.mesh().walk_border(loops[0]).len(), 24);
        assert!(!manager.holes()[idx].is_compenetrating(), "{mode:?}");
    }
}

#[test]
fn fill_then_restore_round_trip() {
    let mut manager = HoleSetManager::new(grid_with_square_hole());
    let idx = hole_with_size(&manager, 16);
    manager.set_selected(idx, true);
    let vertices = cyclic_vertices(&manager.holes()[idx]);
    let live = manager.mesh().face_count();
    let border_faces: Vec<_> = manager.holes()[idx].border().iter().map(|p| p.f).collect();

    manager.fill(FillMode::Trivial).expect("fill");
    for &f in &border_faces {
        assert!(!manager.face_attr(f).border);
    }

    manager.confirm_filling(false);
    let hole = &manager.holes()[idx];
    assert!(!hole.is_filled());
    assert_eq!(hole.size(), 16);
    assert_eq!(cyclic_vertices(hole), vertices);
    assert_eq!(manager.mesh().face_count(), live);
    assert!(manager.mesh().check_ff_topology());
    for &f in &border_faces {
        assert!(manager.face_attr(f).border);
    }
}

#[test]
fn rejected_fill_is_restored_on_confirm() {
    let mut manager = HoleSetManager::new(hexagonal_pyramid());
    manager.set_all_selected(true);
    let live = manager.mesh().face_count();
    manager.fill(FillMode::Trivial).expect("fill");

    manager.set_accepted(0, false);
    assert_eq!(manager.accepted_count(), 0);
    manager.confirm_filling(true);
    assert_eq!(manager.holes_count(), 1);
    assert!(!manager.holes()[0].is_filled());
    assert_eq!(manager.mesh().face_count(), live);
}

#[test]
fn fill_without_selection_fails() {
    let mut manager = HoleSetManager::new(grid_with_square_hole());
    let faces = manager.mesh().faces.len();
    let err = manager.fill(FillMode::Trivial).unwrap_err();
    assert!(matches!(err, HoleEditError::NothingSelected));
    assert!(err.is_rejection());
    assert_eq!(manager.mesh().faces.len(), faces);
}

#[test]
fn filled_holes_are_skipped_on_refill() {
    let mut manager = HoleSetManager::new(hexagonal_pyramid());
    manager.set_all_selected(true);
    manager.fill(FillMode::Trivial).expect("fill");
    let faces = manager.mesh().faces.len();
    assert_eq!(manager.fill(FillMode::MinimumWeight).expect("refill"), 0);
    assert_eq!(manager.mesh().faces.len(), faces);
}

#[test]
fn filler_on_bare_mesh_orients_faces() {
    let mut mesh = hexagonal_pyramid();
    let start = mesh.border_loops()[0];
    let faces = fill_hole_ear(&mut mesh, start, FillMode::MinimumWeight, &EarFillOpts::default())
        .expect("fill");
    assert_eq!(faces.len(), 4);
    assert!(mesh.check_ff_topology());
    assert!(mesh.border_loops().is_empty());
    // the lateral faces point up and out, so the cap must point down
    for f in faces {
        assert!(mesh.face_normal(f).z < 0.0);
    }
}

#[test]
fn short_loop_stays_open_and_counters_follow() {
    let mut mesh = hexagonal_pyramid();
    let [f, g] = add_two_edge_loop(&mut mesh);
    let mut manager = HoleSetManager::new(mesh);
    assert_eq!(manager.holes_count(), 2);
    manager.set_all_selected(true);
    let short = hole_with_size(&manager, 2);

    assert_eq!(manager.fill(FillMode::MinimumWeight).expect("fill"), 1);
    assert!(!manager.holes()[short].is_filled());
    assert!(manager.holes()[short].patches().is_empty());
    assert!(manager.face_attr(f).border);
    assert!(manager.face_attr(g).border);

    let accepted = manager
        .holes()
        .iter()
        .filter(|h| h.is_filled() && h.is_accepted())
        .count();
    assert_eq!(accepted, 1);
    assert_eq!(manager.accepted_count(), accepted);
    assert_eq!(manager.selection_count(), 2);

    // only the real patch is kept; the short loop is still a hole
    manager.confirm_filling(true);
    assert_eq!(manager.holes_count(), 1);
    assert_eq!(manager.holes()[0].size(), 2);
    assert_eq!(manager.mesh().border_loops().len(), 1);
}
