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

use num_traits::{Float, FloatConst};

use std::fmt::Debug;

/// Floating point coordinate type used by meshes, geometry and the hole editor.
pub trait Scalar: Float + FloatConst + Debug + Default + Send + Sync + 'static {
    /// Absolute tolerance used by the geometric predicates.
    fn tolerance() -> Self;

    fn from_f64(v: f64) -> Self;

    fn from_num_den(num: i32, den: i32) -> Self {
        Self::from_f64(num as f64 / den as f64)
    }

    fn from_usize(v: usize) -> Self {
        Self::from_f64(v as f64)
    }

    fn as_f64(self) -> f64;
}

impl Scalar for f64 {
    fn tolerance() -> Self {
        1e-10
    }

    fn from_f64(v: f64) -> Self {
        v
    }

    fn as_f64(self) -> f64 {
        self
    }
}

impl Scalar for f32 {
    fn tolerance() -> Self {
        1e-5
    }

    fn from_f64(v: f64) -> Self {
        v as f32
    }

    fn as_f64(self) -> f64 {
        self as f64
    }
}
