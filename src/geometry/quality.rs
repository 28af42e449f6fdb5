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

use crate::{
    geometry::{Point3, Vector3},
    numeric::scalar::Scalar,
};

/// Shape quality of a triangle: twice its area over its longest squared edge.
///
/// Equilateral triangles score `sqrt(3)/2`, degenerate ones score zero.
pub fn triangle_quality<T: Scalar>(p0: &Point3<T>, p1: &Point3<T>, p2: &Point3<T>) -> T {
    let d10 = *p1 - *p0;
    let d20 = *p2 - *p0;
    let d12 = *p1 - *p2;
    let a = d10.cross(&d20).norm();
    if a <= T::zero() {
        return T::zero();
    }
    let b = d10
        .squared_norm()
        .max(d20.squared_norm())
        .max(d12.squared_norm());
    if b <= T::zero() {
        return T::zero();
    }
    a / b
}

/// Unit normal of the triangle `(p0, p1, p2)` following its winding.
pub fn triangle_normal<T: Scalar>(p0: &Point3<T>, p1: &Point3<T>, p2: &Point3<T>) -> Vector3<T> {
    (*p1 - *p0).cross(&(*p2 - *p0)).normalized()
}

/// Newell normal of a closed polygon, unnormalized.
pub fn polygon_normal<T: Scalar>(points: &[Point3<T>]) -> Vector3<T> {
    let mut n = Vector3::zero();
    for (i, cur) in points.iter().enumerate() {
        let next = &points[(i + 1) % points.len()];
        n.x = n.x + (cur.y - next.y) * (cur.z + next.z);
        n.y = n.y + (cur.z - next.z) * (cur.x + next.x);
        n.z = n.z + (cur.x - next.x) * (cur.y + next.y);
    }
    n
}
