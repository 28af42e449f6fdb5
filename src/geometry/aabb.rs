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

use crate::{geometry::Point3, numeric::scalar::Scalar};

/// An axis-aligned bounding box in 3D.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb<T: Scalar> {
    pub min: Point3<T>,
    pub max: Point3<T>,
}

impl<T: Scalar> Aabb<T> {
    pub fn new(min: Point3<T>, max: Point3<T>) -> Self {
        Aabb { min, max }
    }

    /// The inverted box that any `add_point` turns into a valid one.
    pub fn empty() -> Self {
        let inf = T::infinity();
        Aabb::new(Point3::new(inf, inf, inf), Point3::new(-inf, -inf, -inf))
    }

    pub fn is_empty(&self) -> bool {
        (0..3).any(|i| self.min[i] > self.max[i])
    }

    pub fn min(&self) -> &Point3<T> {
        &self.min
    }

    /// Access the maximum corner.
    pub fn max(&self) -> &Point3<T> {
        &self.max
    }

    /// Build the smallest AABB containing two points.
    pub fn from_points(a: &Point3<T>, b: &Point3<T>) -> Self {
        Aabb::new(
            Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        )
    }

    pub fn from_triangle(p: &[Point3<T>; 3]) -> Self {
        let mut bb = Aabb::from_points(&p[0], &p[1]);
        bb.add_point(&p[2]);
        bb
    }

    pub fn add_point(&mut self, p: &Point3<T>) {
        self.min = Point3::new(self.min.x.min(p.x), self.min.y.min(p.y), self.min.z.min(p.z));
        self.max = Point3::new(self.max.x.max(p.x), self.max.y.max(p.y), self.max.z.max(p.z));
    }

    pub fn union(&self, other: &Aabb<T>) -> Aabb<T> {
        let mut u = *self;
        u.add_point(&other.min);
        u.add_point(&other.max);
        u
    }

    /// Does this AABB intersect `other`? Touching boxes count.
    pub fn intersects(&self, other: &Aabb<T>) -> bool {
        for i in 0..3 {
            if self.max[i] < other.min[i] {
                return false;
            }
            if other.max[i] < self.min[i] {
                return false;
            }
        }
        true
    }

    /// Grow the box by `margin` on every side.
    pub fn inflated(&self, margin: T) -> Aabb<T> {
        Aabb::new(
            Point3::new(self.min.x - margin, self.min.y - margin, self.min.z - margin),
            Point3::new(self.max.x + margin, self.max.y + margin, self.max.z + margin),
        )
    }

    /// Center coordinate along axis `i`.
    pub fn center(&self, i: usize) -> T {
        (self.min[i] + self.max[i]) * T::from_num_den(1, 2)
    }

    /// Length along axis `i`.
    fn extent(&self, i: usize) -> T {
        (self.max[i] - self.min[i]).abs()
    }

    pub fn diagonal(&self) -> T {
        if self.is_empty() {
            return T::zero();
        }
        self.min.distance_to(&self.max)
    }

    /// Return the axis index with largest extent.
    pub fn longest_axis(&self) -> usize {
        let mut best_i = 0usize;
        let mut best = self.extent(0);
        for i in 1..3 {
            let e = self.extent(i);
            if e > best {
                best_i = i;
                best = e;
            }
        }
        best_i
    }
}
