//! The main ear slicing loop and its two fallback passes.

use alloc::vec::Vec;
use core::ptr;
use num_traits::float::Float;

use crate::geom::{area, equals, intersects, intersects_polygon, locally_inside, middle_inside, point_in_triangle};
use crate::node::{remove_node, split_polygon, Node, NodeIndex};
use crate::zorder::{index_curve, z_order};
use crate::Index;

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pass {
    P0 = 0,
    P1 = 1,
    P2 = 2,
}

/// main ear slicing loop which triangulates a polygon (given as a linked ring)
#[allow(clippy::too_many_arguments)]
pub(crate) fn earcut_linked<T: Float, N: Index>(
    nodes: &mut Vec<Node<T>>,
    ear_i: NodeIndex,
    triangles: &mut Vec<N>,
    dim: usize,
    min_x: T,
    min_y: T,
    inv_size: T,
    pass: Pass,
) {
    let mut ear_i = ear_i;

    // interlink polygon nodes in z-order
    if pass == Pass::P0 && inv_size != T::zero() {
        index_curve(nodes, ear_i, min_x, min_y, inv_size);
    }

    let mut stop_i = ear_i;

    // iterate through ears, slicing them one by one
    loop {
        let ear = node!(nodes, ear_i);
        if ear.prev_i == ear.next_i {
            break;
        }
        let pi = ear.prev_i;
        let ni = ear.next_i;

        let is_ear = if inv_size != T::zero() {
            is_ear_hashed(nodes, ear_i, min_x, min_y, inv_size)
        } else {
            is_ear(nodes, ear_i)
        };
        if is_ear {
            let next = node!(nodes, ni);
            let next_i = next.i;
            let next_next_i = next.next_i;

            // cut off the triangle
            triangles.push(N::from_usize(node!(nodes, pi).i as usize / dim));
            triangles.push(N::from_usize(ear.i as usize / dim));
            triangles.push(N::from_usize(next_i as usize / dim));

            remove_node(nodes, ear_i);

            // skipping the next vertex leads to fewer sliver triangles
            (ear_i, stop_i) = (next_next_i, next_next_i);

            continue;
        }

        ear_i = ni;

        // if we looped through the whole remaining polygon and can't find any more ears
        if ear_i == stop_i {
            match pass {
                Pass::P0 => {
                    // try filtering points and slicing again
                    ear_i = filter_points(nodes, ear_i, None);
                    earcut_linked(nodes, ear_i, triangles, dim, min_x, min_y, inv_size, Pass::P1);
                }
                Pass::P1 => {
                    // if this didn't work, try curing all small self-intersections locally
                    let filtered = filter_points(nodes, ear_i, None);
                    ear_i = cure_local_intersections(nodes, filtered, triangles, dim);
                    earcut_linked(nodes, ear_i, triangles, dim, min_x, min_y, inv_size, Pass::P2);
                }
                Pass::P2 => {
                    // as a last resort, try splitting the remaining polygon into two
                    split_earcut(nodes, ear_i, triangles, dim, min_x, min_y, inv_size);
                }
            }
            return;
        }
    }
}

/// check whether a polygon node forms a valid ear with its adjacent nodes
fn is_ear<T: Float>(nodes: &[Node<T>], ear_i: NodeIndex) -> bool {
    let b = node!(nodes, ear_i);
    let a = node!(nodes, b.prev_i);
    let c = node!(nodes, b.next_i);

    if area(a, b, c) >= T::zero() {
        // reflex, can't be an ear
        return false;
    }

    // now make sure we don't have other points inside the potential ear

    // triangle bbox
    let x0 = a.x.min(b.x.min(c.x));
    let y0 = a.y.min(b.y.min(c.y));
    let x1 = a.x.max(b.x.max(c.x));
    let y1 = a.y.max(b.y.max(c.y));

    let mut p = node!(nodes, c.next_i);
    let mut p_prev = node!(nodes, p.prev_i);
    while !ptr::eq(p, a) {
        let p_next = node!(nodes, p.next_i);
        if (p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1)
            && point_in_triangle(a.x, a.y, b.x, b.y, c.x, c.y, p.x, p.y)
            && area(p_prev, p, p_next) >= T::zero()
        {
            return false;
        }
        (p_prev, p) = (p, p_next);
    }
    true
}

/// the same ear test, but scanning only nodes in the z-order range of the
/// triangle bbox; must accept and reject exactly like `is_ear`
fn is_ear_hashed<T: Float>(
    nodes: &[Node<T>],
    ear_i: NodeIndex,
    min_x: T,
    min_y: T,
    inv_size: T,
) -> bool {
    let b = node!(nodes, ear_i);
    let a = node!(nodes, b.prev_i);
    let c = node!(nodes, b.next_i);

    if area(a, b, c) >= T::zero() {
        // reflex, can't be an ear
        return false;
    }

    // triangle bbox
    let x0 = a.x.min(b.x.min(c.x));
    let y0 = a.y.min(b.y.min(c.y));
    let x1 = a.x.max(b.x.max(c.x));
    let y1 = a.y.max(b.y.max(c.y));

    // z-order range for the current triangle bbox
    let min_z = z_order(x0, y0, min_x, min_y, inv_size);
    let max_z = z_order(x1, y1, min_x, min_y, inv_size);

    let ear = node!(nodes, ear_i);
    let mut o_p = ear.prev_z_i.map(|i| node!(nodes, i));
    let mut o_n = ear.next_z_i.map(|i| node!(nodes, i));

    // look for points inside the triangle in both directions
    loop {
        let Some(p) = o_p else { break };
        if p.z < min_z {
            break;
        };
        let Some(n) = o_n else { break };
        if n.z > max_z {
            break;
        };

        if (p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1)
            && (!ptr::eq(p, a) && !ptr::eq(p, c))
            && point_in_triangle(a.x, a.y, b.x, b.y, c.x, c.y, p.x, p.y)
            && area(node!(nodes, p.prev_i), p, node!(nodes, p.next_i)) >= T::zero()
        {
            return false;
        }
        o_p = p.prev_z_i.map(|i| node!(nodes, i));

        if (n.x >= x0 && n.x <= x1 && n.y >= y0 && n.y <= y1)
            && (!ptr::eq(n, a) && !ptr::eq(n, c))
            && point_in_triangle(a.x, a.y, b.x, b.y, c.x, c.y, n.x, n.y)
            && area(node!(nodes, n.prev_i), n, node!(nodes, n.next_i)) >= T::zero()
        {
            return false;
        }
        o_n = n.next_z_i.map(|i| node!(nodes, i));
    }

    // look for remaining points in decreasing z-order
    while let Some(p) = o_p {
        if p.z < min_z {
            break;
        };
        if (p.x >= x0 && p.x <= x1 && p.y >= y0 && p.y <= y1)
            && (!ptr::eq(p, a) && !ptr::eq(p, c))
            && point_in_triangle(a.x, a.y, b.x, b.y, c.x, c.y, p.x, p.y)
            && area(node!(nodes, p.prev_i), p, node!(nodes, p.next_i)) >= T::zero()
        {
            return false;
        }
        o_p = p.prev_z_i.map(|i| node!(nodes, i));
    }

    // look for remaining points in increasing z-order
    while let Some(n) = o_n {
        if n.z > max_z {
            break;
        };
        if (n.x >= x0 && n.x <= x1 && n.y >= y0 && n.y <= y1)
            && (!ptr::eq(n, a) && !ptr::eq(n, c))
            && point_in_triangle(a.x, a.y, b.x, b.y, c.x, c.y, n.x, n.y)
            && area(node!(nodes, n.prev_i), n, node!(nodes, n.next_i)) >= T::zero()
        {
            return false;
        }
        o_n = n.next_z_i.map(|i| node!(nodes, i));
    }

    true
}

/// go through all polygon nodes and cure small local self-intersections
fn cure_local_intersections<T: Float, N: Index>(
    nodes: &mut [Node<T>],
    mut start_i: NodeIndex,
    triangles: &mut Vec<N>,
    dim: usize,
) -> NodeIndex {
    let mut p_i = start_i;
    loop {
        let p = node!(nodes, p_i);
        let p_next_i = p.next_i;
        let p_next = node!(nodes, p_next_i);
        let b_i = p_next.next_i;
        let a = node!(nodes, p.prev_i);
        let b = node!(nodes, b_i);

        if !equals(a, b)
            && intersects(a, p, p_next, b)
            && locally_inside(nodes, a, b)
            && locally_inside(nodes, b, a)
        {
            triangles.extend([
                N::from_usize(a.i as usize / dim),
                N::from_usize(p.i as usize / dim),
                N::from_usize(b.i as usize / dim),
            ]);

            // remove the two nodes involved
            remove_node(nodes, p_i);
            remove_node(nodes, p_next_i);

            (p_i, start_i) = (b_i, b_i);
        }

        p_i = node!(nodes, p_i).next_i;
        if p_i == start_i {
            return filter_points(nodes, p_i, None);
        }
    }
}

/// try splitting the polygon into two and triangulate them independently
fn split_earcut<T: Float, N: Index>(
    nodes: &mut Vec<Node<T>>,
    start_i: NodeIndex,
    triangles: &mut Vec<N>,
    dim: usize,
    min_x: T,
    min_y: T,
    inv_size: T,
) {
    // look for a valid diagonal that divides the polygon into two
    let mut a_i = start_i;
    loop {
        let a = node!(nodes, a_i);
        let a_next_i = a.next_i;
        let a_prev_i = a.prev_i;
        let mut b_i = node!(nodes, a_next_i).next_i;

        while b_i != a_prev_i {
            let b = node!(nodes, b_i);
            let b_next_i = b.next_i;
            let a = node!(nodes, a_i);
            if a.i != b.i && is_valid_diagonal(nodes, a, b) {
                // split the polygon in two by the diagonal
                let mut c_i = split_polygon(nodes, a_i, b_i);

                // filter colinear points around the cuts
                let end_i = Some(node!(nodes, a_i).next_i);
                a_i = filter_points(nodes, a_i, end_i);
                let end_i = Some(node!(nodes, c_i).next_i);
                c_i = filter_points(nodes, c_i, end_i);

                // run earcut on each half
                earcut_linked(nodes, a_i, triangles, dim, min_x, min_y, inv_size, Pass::P0);
                earcut_linked(nodes, c_i, triangles, dim, min_x, min_y, inv_size, Pass::P0);
                return;
            }
            b_i = b_next_i;
        }

        a_i = a_next_i;
        if a_i == start_i {
            return;
        }
    }
}

/// check if a diagonal between two polygon nodes is valid (lies in the polygon
/// interior): endpoints not adjacent, crossing no edge, locally inside at both
/// ends, and with its midpoint inside the ring
fn is_valid_diagonal<T: Float>(nodes: &[Node<T>], a: &Node<T>, b: &Node<T>) -> bool {
    node!(nodes, a.next_i).i != b.i
        && node!(nodes, a.prev_i).i != b.i
        && !intersects_polygon(nodes, a, b)
        && locally_inside(nodes, a, b)
        && locally_inside(nodes, b, a)
        && middle_inside(nodes, a, b)
}

/// eliminate colinear or duplicate points; steiner nodes are kept because
/// removing one could break a hole bridge
pub(crate) fn filter_points<T: Float>(
    nodes: &mut [Node<T>],
    start_i: NodeIndex,
    end_i: Option<NodeIndex>,
) -> NodeIndex {
    let mut end_i = end_i.unwrap_or(start_i);

    let mut p_i = start_i;
    let mut p = node!(nodes, p_i);
    loop {
        let p_next = node!(nodes, p.next_i);
        if !p.steiner && (equals(p, p_next) || area(node!(nodes, p.prev_i), p, p_next) == T::zero())
        {
            let (prev_i, next_i) = remove_node(nodes, p_i);
            (p_i, end_i) = (prev_i, prev_i);
            if p_i == next_i {
                return end_i;
            }
            p = node!(nodes, p_i);
        } else {
            p_i = p.next_i;
            if p_i == end_i {
                return end_i;
            }
            p = p_next;
        };
    }
}
