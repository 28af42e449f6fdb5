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

type Point2<T> = [T; 2];

/// Tolerances for one predicate call: `len` for distances, `area` for 2D orientations.
#[derive(Clone, Copy, Debug)]
struct Tolerance<T: Scalar> {
    len: T,
    area: T,
}

impl<T: Scalar> Tolerance<T> {
    fn for_points(points: &[Point3<T>]) -> Self {
        let mut scale = T::one();
        for (i, a) in points.iter().enumerate() {
            for b in &points[i + 1..] {
                scale = scale.max(a.distance_to(b));
            }
        }
        let len = T::tolerance() * scale;
        Tolerance {
            len,
            area: len * scale,
        }
    }
}

/// Do the closed triangles `p` and `q` overlap in more than a boundary contact?
///
/// Triangles that only touch along an edge or at a vertex are reported as
/// disjoint. Degenerate triangles never intersect anything.
pub fn tri_tri_overlap<T: Scalar>(p: &[Point3<T>; 3], q: &[Point3<T>; 3]) -> bool {
    let tol = Tolerance::for_points(&[p[0], p[1], p[2], q[0], q[1], q[2]]);
    let (Some(np), Some(nq)) = (unit_normal(p, &tol), unit_normal(q, &tol)) else {
        return false;
    };

    let dp = p.map(|v| nq.dot(&(v - q[0])));
    if all_same_side(&dp, tol.len) {
        return false;
    }
    let dq = q.map(|v| np.dot(&(v - p[0])));
    if all_same_side(&dq, tol.len) {
        return false;
    }

    if dp.iter().all(|d| d.abs() <= tol.len) {
        return coplanar_tri_tri(p, q, &nq, &tol);
    }

    // Non-coplanar: the intersection segment has its endpoints on the edges
    // of one triangle or the other.
    (0..3).any(|i| segment_crosses_triangle(&p[i], &p[(i + 1) % 3], q, &nq, &tol))
        || (0..3).any(|i| segment_crosses_triangle(&q[i], &q[(i + 1) % 3], p, &np, &tol))
}

/// Does segment `[a, b]` pass through the interior of triangle `tri`?
pub fn segment_triangle_intersect<T: Scalar>(
    a: &Point3<T>,
    b: &Point3<T>,
    tri: &[Point3<T>; 3],
) -> bool {
    let tol = Tolerance::for_points(&[*a, *b, tri[0], tri[1], tri[2]]);
    match unit_normal(tri, &tol) {
        Some(n) => segment_crosses_triangle(a, b, tri, &n, &tol),
        None => false,
    }
}

fn segment_crosses_triangle<T: Scalar>(
    a: &Point3<T>,
    b: &Point3<T>,
    tri: &[Point3<T>; 3],
    n: &Vector3<T>,
    tol: &Tolerance<T>,
) -> bool {
    let da = n.dot(&(*a - tri[0]));
    let db = n.dot(&(*b - tri[0]));
    if (da > tol.len && db > tol.len) || (da < -tol.len && db < -tol.len) {
        return false;
    }

    let (i0, i1) = coplanar_axes(n);
    let t2 = tri.map(|p| project_to_2d(&p, i0, i1));

    if da.abs() <= tol.len && db.abs() <= tol.len {
        let a2 = project_to_2d(a, i0, i1);
        let b2 = project_to_2d(b, i0, i1);
        return coplanar_segment_triangle(&a2, &b2, &t2, tol);
    }

    let x = if da.abs() <= tol.len {
        *a
    } else if db.abs() <= tol.len {
        *b
    } else {
        let t = da / (da - db);
        *a + (*b - *a).scale(t)
    };
    point_strictly_in_tri_2d(&project_to_2d(&x, i0, i1), &t2, tol)
}

fn coplanar_tri_tri<T: Scalar>(
    p: &[Point3<T>; 3],
    q: &[Point3<T>; 3],
    n: &Vector3<T>,
    tol: &Tolerance<T>,
) -> bool {
    let (i0, i1) = coplanar_axes(n);
    let p2 = p.map(|v| project_to_2d(&v, i0, i1));
    let q2 = q.map(|v| project_to_2d(&v, i0, i1));

    for i in 0..3 {
        let (a, b) = (&p2[i], &p2[(i + 1) % 3]);
        if coplanar_segment_triangle(a, b, &q2, tol) {
            return true;
        }
    }
    // nested or coincident triangles have no proper edge crossing
    point_strictly_in_tri_2d(&centroid_2d(&p2), &q2, tol)
        || point_strictly_in_tri_2d(&centroid_2d(&q2), &p2, tol)
}

fn coplanar_segment_triangle<T: Scalar>(
    a: &Point2<T>,
    b: &Point2<T>,
    tri: &[Point2<T>; 3],
    tol: &Tolerance<T>,
) -> bool {
    let mid = [
        (a[0] + b[0]) * T::from_num_den(1, 2),
        (a[1] + b[1]) * T::from_num_den(1, 2),
    ];
    if point_strictly_in_tri_2d(a, tri, tol)
        || point_strictly_in_tri_2d(b, tri, tol)
        || point_strictly_in_tri_2d(&mid, tri, tol)
    {
        return true;
    }
    (0..3).any(|i| segments_properly_cross_2d(a, b, &tri[i], &tri[(i + 1) % 3], tol))
}

/// Twice the signed area of `(a, b, c)`.
fn orient_2d<T: Scalar>(a: &Point2<T>, b: &Point2<T>, c: &Point2<T>) -> T {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Return true if 2D point `p` lies strictly inside the triangle `tri`,
/// at least the area tolerance away from each edge line.
fn point_strictly_in_tri_2d<T: Scalar>(p: &Point2<T>, tri: &[Point2<T>; 3], tol: &Tolerance<T>) -> bool {
    let area = orient_2d(&tri[0], &tri[1], &tri[2]);
    if area.abs() <= tol.area {
        return false;
    }
    let s = area.signum();
    (0..3).all(|i| s * orient_2d(&tri[i], &tri[(i + 1) % 3], p) > tol.area)
}

fn segments_properly_cross_2d<T: Scalar>(
    p1: &Point2<T>,
    p2: &Point2<T>,
    q1: &Point2<T>,
    q2: &Point2<T>,
    tol: &Tolerance<T>,
) -> bool {
    let d1 = orient_2d(q1, q2, p1);
    let d2 = orient_2d(q1, q2, p2);
    let d3 = orient_2d(p1, p2, q1);
    let d4 = orient_2d(p1, p2, q2);
    let e = tol.area;
    ((d1 > e && d2 < -e) || (d1 < -e && d2 > e)) && ((d3 > e && d4 < -e) || (d3 < -e && d4 > e))
}

fn centroid_2d<T: Scalar>(t: &[Point2<T>; 3]) -> Point2<T> {
    let third = T::from_num_den(1, 3);
    [
        (t[0][0] + t[1][0] + t[2][0]) * third,
        (t[0][1] + t[1][1] + t[2][1]) * third,
    ]
}

fn all_same_side<T: Scalar>(d: &[T; 3], eps: T) -> bool {
    d.iter().all(|x| *x > eps) || d.iter().all(|x| *x < -eps)
}

fn unit_normal<T: Scalar>(t: &[Point3<T>; 3], tol: &Tolerance<T>) -> Option<Vector3<T>> {
    let n = (t[1] - t[0]).cross(&(t[2] - t[0]));
    if n.norm() <= tol.area {
        return None;
    }
    Some(n.normalized())
}

/// Given a normal, return the indices of the two axes to keep (largest dropped).
fn coplanar_axes<T: Scalar>(n: &Vector3<T>) -> (usize, usize) {
    match n.dominant_axis() {
        0 => (1, 2),
        1 => (0, 2),
        _ => (0, 1),
    }
}

/// Project a 3D point onto a 2D plane using the provided axes.
fn project_to_2d<T: Scalar>(p: &Point3<T>, i0: usize, i1: usize) -> Point2<T> {
    [p[i0], p[i1]]
}
