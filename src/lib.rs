//! Ear-clipping triangulation of simple polygons with holes, for feeding 2D
//! shape fills to a renderer.
//!
//! The input is a flat coordinate array with a configurable stride plus a list
//! of hole start offsets; the output is a flat list of vertex indices, three
//! per triangle, pointing back into the input array. Large polygons are
//! accelerated with a z-order curve hash over the ring.

#![no_std]

extern crate alloc;

#[macro_use]
mod node;
mod ear;
mod geom;
mod hole;
mod zorder;

use alloc::vec::Vec;
use num_traits::float::Float;

use crate::ear::{earcut_linked, Pass};
use crate::geom::signed_area;
use crate::hole::{eliminate_hole, get_leftmost};
use crate::node::{insert_node, remove_node, Node, NodeIndex};

/// Index of a vertex
pub trait Index: Copy {
    fn into_usize(self) -> usize;
    fn from_usize(v: usize) -> Self;
}
impl Index for u32 {
    fn into_usize(self) -> usize {
        self as usize
    }
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}
impl Index for u16 {
    fn into_usize(self) -> usize {
        self as usize
    }
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}
impl Index for usize {
    fn into_usize(self) -> usize {
        self
    }
    fn from_usize(v: usize) -> Self {
        v as Self
    }
}

/// Instance of the ear-clipping triangulator.
///
/// All working state (the node arena, the hole queue, a copy of the input) is
/// owned by the instance, so independent instances can run on independent
/// threads; one instance can be reused across polygons to amortize
/// allocations.
pub struct Earclip<T: Float> {
    data: Vec<T>,
    dim: usize,
    nodes: Vec<Node<T>>,
    queue: Vec<NodeIndex>,
}

impl<T: Float> Default for Earclip<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Earclip<T> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            dim: 2,
            nodes: Vec::new(),
            queue: Vec::new(),
        }
    }

    fn reset(&mut self, capacity: usize) {
        self.nodes.clear();
        self.nodes.reserve(capacity);
        self.nodes.push(Node::new(0, T::infinity(), T::infinity())); // dummy node
    }

    /// Triangulates a polygon given as a flat coordinate array.
    ///
    /// `data` holds `dim`-tuples concatenated (`dim` must be at least 2; axes
    /// beyond the first two are ignored). The first `hole_indices[0]` vertices
    /// form the outer ring; each `hole_indices[k]` is the vertex offset where
    /// hole `k` starts. The result is written to `triangles_out` as vertex
    /// indices into `data`, three per triangle. Degenerate input produces an
    /// empty result; a hole with no visible bridge to the outer ring is
    /// dropped.
    pub fn triangulate<N: Index>(
        &mut self,
        data: &[T],
        hole_indices: &[N],
        dim: usize,
        triangles_out: &mut Vec<N>,
    ) {
        debug_assert!(dim >= 2);
        self.dim = dim;
        self.data.clear();
        self.data
            .extend_from_slice(&data[..data.len() - data.len() % dim]);
        triangles_out.clear();
        if self.data.len() < 3 * dim {
            return;
        }
        self.triangulate_impl(hole_indices, triangles_out);
    }

    fn triangulate_impl<N: Index>(&mut self, hole_indices: &[N], triangles_out: &mut Vec<N>) {
        let dim = self.dim;
        triangles_out.reserve(self.data.len() / dim + 1);
        self.reset(self.data.len() / dim * 3 / 2);

        let has_holes = !hole_indices.is_empty();
        let outer_len = if has_holes {
            hole_indices[0].into_usize() * dim
        } else {
            self.data.len()
        };

        // create nodes
        let Some(mut outer_node_i) = self.linked_list(0, outer_len, true) else {
            return;
        };
        let outer_node = node!(self.nodes, outer_node_i);
        if outer_node.next_i == outer_node.prev_i {
            return;
        }
        if has_holes {
            outer_node_i = self.eliminate_holes(hole_indices, outer_node_i);
        }

        let mut min_x = T::zero();
        let mut min_y = T::zero();
        let mut inv_size = T::zero();

        // if the shape is not too simple, we'll use a z-order curve hash later;
        // calculate the polygon bbox
        if self.data.len() > 80 * dim {
            min_x = self.data[0];
            min_y = self.data[1];
            let mut max_x = min_x;
            let mut max_y = min_y;
            let mut i = dim;
            while i < outer_len {
                let (x, y) = (self.data[i], self.data[i + 1]);
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
                i += dim;
            }
            // min_x, min_y and inv_size are later used to transform coords
            // into integers for z-order calculation
            inv_size = (max_x - min_x).max(max_y - min_y);
            if inv_size != T::zero() {
                inv_size = T::from(32767.0).unwrap() / inv_size;
            }
        }

        earcut_linked(
            &mut self.nodes,
            outer_node_i,
            triangles_out,
            dim,
            min_x,
            min_y,
            inv_size,
            Pass::P0,
        );
    }

    /// create a circular doubly linked list from a range of polygon points in
    /// the specified winding order
    fn linked_list(&mut self, start: usize, end: usize, clockwise: bool) -> Option<NodeIndex> {
        if end <= start {
            return None;
        }
        let dim = self.dim;
        let mut last_i: Option<NodeIndex> = None;

        if clockwise == (signed_area(&self.data, start, end, dim) > T::zero()) {
            let mut i = start;
            while i < end {
                let (x, y) = (self.data[i], self.data[i + 1]);
                last_i = Some(insert_node(&mut self.nodes, i as u32, x, y, last_i));
                i += dim;
            }
        } else {
            let mut i = end;
            while i > start {
                i -= dim;
                let (x, y) = (self.data[i], self.data[i + 1]);
                last_i = Some(insert_node(&mut self.nodes, i as u32, x, y, last_i));
            }
        }

        if let Some(li) = last_i {
            let last = node!(self.nodes, li);
            if geom::equals(last, node!(self.nodes, last.next_i)) {
                let (_, next_i) = remove_node(&mut self.nodes, li);
                last_i = Some(next_i);
            }
        }

        last_i
    }

    /// link every hole into the outer loop, producing a single-ring polygon
    /// without holes; holes are processed left to right
    fn eliminate_holes<N: Index>(
        &mut self,
        hole_indices: &[N],
        mut outer_node_i: NodeIndex,
    ) -> NodeIndex {
        let dim = self.dim;
        self.queue.clear();
        for (i, hi) in hole_indices.iter().enumerate() {
            let start = (*hi).into_usize() * dim;
            let end = if i < hole_indices.len() - 1 {
                hole_indices[i + 1].into_usize() * dim
            } else {
                self.data.len()
            };
            if let Some(list_i) = self.linked_list(start, end, false) {
                let list = node_mut!(self.nodes, list_i);
                if list_i == list.next_i {
                    list.steiner = true;
                }
                self.queue.push(get_leftmost(&self.nodes, list_i));
            }
        }

        self.queue.sort_unstable_by(|a, b| {
            let (a, b) = (node!(self.nodes, *a), node!(self.nodes, *b));
            a.x.partial_cmp(&b.x)
                .unwrap_or(core::cmp::Ordering::Equal)
                .then(a.y.partial_cmp(&b.y).unwrap_or(core::cmp::Ordering::Equal))
        });

        for &q in &self.queue {
            outer_node_i = eliminate_hole(&mut self.nodes, q, outer_node_i);
        }

        outer_node_i
    }
}

/// Returns the percentage difference between the polygon area and the area of
/// its triangulation; used to verify correctness of a triangulation.
pub fn deviation<T: Float, N: Index>(
    data: &[T],
    hole_indices: &[N],
    dim: usize,
    triangles: &[N],
) -> T {
    let has_holes = !hole_indices.is_empty();
    let outer_len = if has_holes {
        hole_indices[0].into_usize() * dim
    } else {
        data.len()
    };

    let polygon_area = if data.len() < 3 * dim {
        T::zero()
    } else {
        let mut polygon_area = signed_area(data, 0, outer_len, dim).abs();
        if has_holes {
            for i in 0..hole_indices.len() {
                let start = hole_indices[i].into_usize() * dim;
                let end = if i < hole_indices.len() - 1 {
                    hole_indices[i + 1].into_usize() * dim
                } else {
                    data.len()
                };
                if end - start >= 3 * dim {
                    polygon_area = polygon_area - signed_area(data, start, end, dim).abs();
                }
            }
        }
        polygon_area
    };

    let mut triangles_area = T::zero();
    for t in triangles.chunks_exact(3) {
        let a = t[0].into_usize() * dim;
        let b = t[1].into_usize() * dim;
        let c = t[2].into_usize() * dim;
        triangles_area = triangles_area
            + ((data[a] - data[c]) * (data[b + 1] - data[a + 1])
                - (data[a] - data[b]) * (data[c + 1] - data[a + 1]))
                .abs();
    }
    if polygon_area == T::zero() && triangles_area == T::zero() {
        T::zero()
    } else {
        ((polygon_area - triangles_area) / polygon_area).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    /// sawtooth strip: a straight bottom edge and a zigzag top, `n + 1`
    /// vertices, plenty of reflex corners
    fn comb(n: usize) -> Vec<f64> {
        let mut data = vec![0.0, 0.0, n as f64, 0.0];
        for x in (1..n).rev() {
            let y = if x % 2 == 0 { 5.0 } else { 8.0 };
            data.push(x as f64);
            data.push(y);
        }
        data
    }

    fn sorted_triples(triangles: &[u32]) -> Vec<[u32; 3]> {
        let mut out: Vec<[u32; 3]> = triangles
            .chunks_exact(3)
            .map(|t| [t[0], t[1], t[2]])
            .collect();
        out.sort_unstable();
        out
    }

    /// the z-order hash is a pruning structure only: on a polygon large enough
    /// to trigger it, the result must match the exhaustive scan
    #[test]
    fn hashed_path_matches_plain_path() {
        let data = comb(120);
        assert!(data.len() > 80 * 2);

        let mut hashed: Vec<u32> = vec![];
        let mut e = Earclip::new();
        e.triangulate(&data, &[] as &[u32], 2, &mut hashed);

        // same pipeline with the spatial index disabled
        let mut e2 = Earclip::<f64>::new();
        e2.dim = 2;
        e2.data.clear();
        e2.data.extend_from_slice(&data);
        e2.reset(data.len());
        let outer_i = e2.linked_list(0, data.len(), true).unwrap();
        let mut plain: Vec<u32> = vec![];
        earcut_linked(&mut e2.nodes, outer_i, &mut plain, 2, 0.0, 0.0, 0.0, Pass::P0);

        assert!(!hashed.is_empty());
        assert_eq!(sorted_triples(&hashed), sorted_triples(&plain));
    }

    #[test]
    fn comb_is_fully_triangulated() {
        let data = comb(120);
        let n = data.len() / 2;
        let mut triangles: Vec<u32> = vec![];
        Earclip::new().triangulate(&data, &[] as &[u32], 2, &mut triangles);
        assert_eq!(triangles.len(), 3 * (n - 2));
        assert!(triangles.iter().all(|&i| (i as usize) < n));
        assert!(deviation(&data, &[] as &[u32], 2, &triangles) < 1e-12);
    }
}
