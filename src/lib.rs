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

//! Hole filling and bridging for triangle meshes.
//!
//! A [`HoleSetManager`] owns a mesh, finds its border loops and edits them:
//! ear-clipping fills, bridges that split or merge holes, and closure of
//! border loops that pass twice through a vertex.

pub mod error;
pub mod geometry;
pub mod hole_edit;
pub mod io;
pub mod mesh;
pub mod numeric;
pub mod operations;

pub use error::{HoleEditError, HoleEditResult};
pub use hole_edit::{Abutment, AutoBridgingCallback, FnCallback, HoleEditOpts, HoleSetManager};
pub use mesh::{Mesh, Pos};
pub use operations::triangulation::FillMode;
