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

use crate::mesh::basic_types::FaceId;

/// What the hole editor has done with a face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaceKind {
    /// Original or confirmed geometry.
    #[default]
    Plain,
    /// Face of an unconfirmed fill.
    Patch { compenetrating: bool },
    /// Face of an unconfirmed bridge.
    Bridge,
    /// Bridge face closing a three-edge loop at a non-manifold vertex. It
    /// belongs to no hole: restoring a fill keeps it, discarding bridges
    /// deletes it, confirming bridges turns it `Plain`.
    BridgeAndPatch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceAttr {
    /// The face has an edge on the border of an open hole.
    pub border: bool,
    pub kind: FaceKind,
}

impl FaceAttr {
    pub fn is_patch(&self) -> bool {
        matches!(self.kind, FaceKind::Patch { .. } | FaceKind::BridgeAndPatch)
    }

    pub fn is_bridge(&self) -> bool {
        matches!(self.kind, FaceKind::Bridge | FaceKind::BridgeAndPatch)
    }

    pub fn is_compenetrating(&self) -> bool {
        matches!(
            self.kind,
            FaceKind::Patch {
                compenetrating: true
            }
        )
    }
}

/// Per-face attributes keyed by [`FaceId`], growing with the mesh.
#[derive(Debug, Clone, Default)]
pub struct FaceAttrMap {
    attrs: Vec<FaceAttr>,
}

impl FaceAttrMap {
    pub fn new(face_count: usize) -> Self {
        Self {
            attrs: vec![FaceAttr::default(); face_count],
        }
    }

    /// Attributes of `f`; faces added since the last write read as default.
    pub fn get(&self, f: FaceId) -> FaceAttr {
        self.attrs.get(f).copied().unwrap_or_default()
    }

    pub fn get_mut(&mut self, f: FaceId) -> &mut FaceAttr {
        if f >= self.attrs.len() {
            self.attrs.resize(f + 1, FaceAttr::default());
        }
        &mut self.attrs[f]
    }

    pub fn set_border(&mut self, f: FaceId, border: bool) {
        self.get_mut(f).border = border;
    }

    pub fn set_kind(&mut self, f: FaceId, kind: FaceKind) {
        self.get_mut(f).kind = kind;
    }

    pub fn is_border(&self, f: FaceId) -> bool {
        self.get(f).border
    }

    pub fn is_patch(&self, f: FaceId) -> bool {
        self.get(f).is_patch()
    }

    pub fn is_bridge(&self, f: FaceId) -> bool {
        self.get(f).is_bridge()
    }

    pub fn is_compenetrating(&self, f: FaceId) -> bool {
        self.get(f).is_compenetrating()
    }

    /// Drop every mark.
    pub fn clear(&mut self) {
        self.attrs.iter_mut().for_each(|a| *a = FaceAttr::default());
    }
}
