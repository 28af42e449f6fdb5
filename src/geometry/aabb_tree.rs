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

use crate::{geometry::aabb::Aabb, numeric::scalar::Scalar};
use std::cmp::Ordering;

/// An AABB-tree over `(aabb, data)` pairs.
///
/// Built once by recursive median split along the longest axis, then grown
/// incrementally with [`AabbTree::insert`], which keeps the two children of
/// every node roughly the same size.
#[derive(Clone, Debug)]
pub enum AabbTree<T: Scalar, D> {
    Leaf {
        aabb: Aabb<T>,
        data: D,
    },
    Node {
        aabb: Aabb<T>,
        left: Box<AabbTree<T, D>>,
        right: Box<AabbTree<T, D>>,
        total_count: usize,
    },
}

impl<T: Scalar, D> AabbTree<T, D> {
    /// Build a tree over `items`; `None` when there is nothing to index.
    pub fn build(items: Vec<(Aabb<T>, D)>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self::build_binary_tree(items))
    }

    fn build_binary_tree(mut items: Vec<(Aabb<T>, D)>) -> Self {
        if items.len() == 1 {
            if let Some((aabb, data)) = items.pop() {
                return AabbTree::Leaf { aabb, data };
            }
        }

        let bounds = items
            .iter()
            .fold(Aabb::empty(), |acc, (bb, _)| acc.union(bb));
        let axis = bounds.longest_axis();
        items.sort_by(|(a, _), (b, _)| {
            a.center(axis)
                .partial_cmp(&b.center(axis))
                .unwrap_or(Ordering::Equal)
        });

        let mid = items.len() / 2;
        let right_items = items.split_off(mid); // items = left half

        let left_child = Box::new(Self::build_binary_tree(items));
        let right_child = Box::new(Self::build_binary_tree(right_items));

        let total_count = left_child.size() + right_child.size();

        AabbTree::Node {
            aabb: bounds,
            left: left_child,
            right: right_child,
            total_count,
        }
    }

    /// Get AABB of this node/leaf
    pub fn aabb(&self) -> &Aabb<T> {
        match self {
            AabbTree::Leaf { aabb, .. } => aabb,
            AabbTree::Node { aabb, .. } => aabb,
        }
    }

    /// Collect all `&D` whose AABB intersects `query`.
    pub fn query<'a>(&'a self, query: &Aabb<T>, out: &mut Vec<&'a D>) {
        match self {
            AabbTree::Leaf { aabb, data } => {
                if aabb.intersects(query) {
                    out.push(data);
                }
            }
            AabbTree::Node {
                aabb, left, right, ..
            } => {
                if aabb.intersects(query) {
                    left.query(query, out);
                    right.query(query, out);
                }
            }
        }
    }

    /// Add a new entry to an existing tree (O(log n)).
    pub fn insert(self, new_aabb: Aabb<T>, new_data: D) -> Self {
        match self {
            AabbTree::Leaf { aabb, data } => {
                let combined = aabb.union(&new_aabb);
                AabbTree::Node {
                    aabb: combined,
                    left: Box::new(AabbTree::Leaf { aabb, data }),
                    right: Box::new(AabbTree::Leaf {
                        aabb: new_aabb,
                        data: new_data,
                    }),
                    total_count: 2,
                }
            }
            AabbTree::Node {
                aabb,
                left,
                right,
                total_count,
            } => {
                let combined = aabb.union(&new_aabb);
                let (left, right) = if left.size() <= right.size() {
                    (Box::new(left.insert(new_aabb, new_data)), right)
                } else {
                    (left, Box::new(right.insert(new_aabb, new_data)))
                };
                AabbTree::Node {
                    aabb: combined,
                    left,
                    right,
                    total_count: total_count + 1,
                }
            }
        }
    }

    /// Number of entries below this node (O(1)).
    pub fn size(&self) -> usize {
        match self {
            AabbTree::Leaf { .. } => 1,
            AabbTree::Node { total_count, .. } => *total_count,
        }
    }
}
