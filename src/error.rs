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

//! Error types for hole editing.
//!
//! Geometric rejections (a bridge that would compenetrate the mesh, abutments
//! that are too close) are ordinary outcomes reported through
//! [`HoleEditError`]; they never leave the mesh modified. Broken internal
//! invariants are not represented here and panic instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for hole editing operations.
pub type HoleEditResult<T> = Result<T, HoleEditError>;

#[derive(Debug, Error)]
pub enum HoleEditError {
    #[error("no hole is selected")]
    NothingSelected,

    #[error("edge {edge} of face {face} is not a border edge of an open hole")]
    NotABorderEdge { face: usize, edge: usize },

    #[error("hole {name} is already filled")]
    HoleIsFilled { name: String },

    #[error("both bridge triangulations intersect the mesh or are degenerate")]
    BridgeCompenetrating,

    #[error("bridge sides are too close along the border")]
    BridgeTooClose,

    #[error("failed to allocate {requested} faces")]
    FaceAllocation { requested: usize },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed OBJ at line {line}: {message}")]
    ObjParse { line: usize, message: String },
}

impl HoleEditError {
    /// True for outcomes the user resolves by picking different input.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            HoleEditError::NothingSelected
                | HoleEditError::NotABorderEdge { .. }
                | HoleEditError::HoleIsFilled { .. }
                | HoleEditError::BridgeCompenetrating
                | HoleEditError::BridgeTooClose
        )
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HoleEditError::Io {
            path: path.into(),
            source,
        }
    }
}
