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

use crate::{geometry::Vector3, numeric::scalar::Scalar};
use std::ops::{Add, Index, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3<T>
where
    T: Scalar,
{
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Point3<T>
where
    T: Scalar,
{
    pub fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    pub fn from_vals(v: [f64; 3]) -> Self {
        Self {
            x: T::from_f64(v[0]),
            y: T::from_f64(v[1]),
            z: T::from_f64(v[2]),
        }
    }

    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn coords(&self) -> [T; 3] {
        [self.x, self.y, self.z]
    }

    pub fn distance_to(&self, other: &Self) -> T {
        (*self - *other).norm()
    }

    pub fn squared_distance_to(&self, other: &Self) -> T {
        (*self - *other).squared_norm()
    }

    pub fn as_vector(&self) -> Vector3<T> {
        Vector3::new(self.x, self.y, self.z)
    }

    pub fn midpoint(&self, other: &Self) -> Self {
        let half = T::from_num_den(1, 2);
        Self::new(
            (self.x + other.x) * half,
            (self.y + other.y) * half,
            (self.z + other.z) * half,
        )
    }
}

impl<T: Scalar> Index<usize> for Point3<T> {
    type Output = T;

    fn index(&self, axis: usize) -> &T {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Invalid axis"),
        }
    }
}

impl<T: Scalar> Sub for Point3<T> {
    type Output = Vector3<T>;

    fn sub(self, rhs: Point3<T>) -> Vector3<T> {
        Vector3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Scalar> Add<Vector3<T>> for Point3<T> {
    type Output = Point3<T>;

    fn add(self, rhs: Vector3<T>) -> Point3<T> {
        Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}
