//! Hole merging: each hole ring is spliced into the outer ring through a
//! bridge found with David Eberly's visibility search.

use alloc::vec::Vec;
use num_traits::float::Float;

use crate::ear::filter_points;
use crate::geom::{locally_inside, point_in_triangle};
use crate::node::{split_polygon, Node, NodeIndex};

/// find a bridge between the hole's leftmost vertex and the outer ring, and
/// link it; a hole with no visible bridge is left out of the result
pub(crate) fn eliminate_hole<T: Float>(
    nodes: &mut Vec<Node<T>>,
    hole_i: NodeIndex,
    outer_node_i: NodeIndex,
) -> NodeIndex {
    let Some(bridge_i) = find_hole_bridge(nodes, node!(nodes, hole_i), outer_node_i) else {
        return outer_node_i;
    };
    let bridge_reverse_i = split_polygon(nodes, bridge_i, hole_i);

    // filter collinear points around the cuts
    let end_i = Some(node!(nodes, bridge_reverse_i).next_i);
    filter_points(nodes, bridge_reverse_i, end_i);
    let end_i = Some(node!(nodes, bridge_i).next_i);
    filter_points(nodes, bridge_i, end_i)
}

/// David Eberly's algorithm for finding a bridge between a hole and the outer
/// polygon: a leftward horizontal ray from the hole's leftmost point, then an
/// angular scan among obstructing vertices. Equal tangents favor the candidate
/// with larger x.
fn find_hole_bridge<T: Float>(
    nodes: &[Node<T>],
    hole: &Node<T>,
    outer_node_i: NodeIndex,
) -> Option<NodeIndex> {
    let mut p_i = outer_node_i;
    let (hx, hy) = (hole.x, hole.y);
    let mut qx = T::neg_infinity();
    let mut m_i: Option<NodeIndex> = None;

    // find a segment intersected by a ray from the hole's leftmost point to the left;
    // segment's endpoint with lesser x will be the potential connection point
    let mut p = node!(nodes, p_i);
    loop {
        let p_next = node!(nodes, p.next_i);
        if hy <= p.y && hy >= p_next.y && p_next.y != p.y {
            let x = p.x + (hy - p.y) * (p_next.x - p.x) / (p_next.y - p.y);
            if x <= hx && x > qx {
                qx = x;
                if x == hx {
                    // hole touches an outer vertex at the same height
                    if hy == p.y {
                        return Some(p_i);
                    }
                    if hy == p_next.y {
                        return Some(p.next_i);
                    }
                }
                m_i = Some(if p.x < p_next.x { p_i } else { p.next_i });
            }
        }
        p_i = p.next_i;
        if p_i == outer_node_i {
            break;
        }
        p = p_next;
    }

    let mut m_i = m_i?;

    if hx == qx {
        // hole touches the outer segment; pick the lower endpoint
        return Some(node!(nodes, m_i).prev_i);
    }

    // look for points inside the triangle of hole point, segment intersection
    // and endpoint; if there are none, we have a valid connection; otherwise
    // choose the point of the minimum angle with the ray as the connection point

    let stop_i = m_i;
    let Node { x: mx, y: my, .. } = *node!(nodes, m_i); // must copy
    let mut tan_min = T::infinity();

    let mut m = node!(nodes, m_i);
    p_i = m.next_i;
    let mut p = node!(nodes, p_i);

    while p_i != stop_i {
        if (hx >= p.x && p.x >= mx && hx != p.x)
            && point_in_triangle(
                if hy < my { hx } else { qx },
                hy,
                mx,
                my,
                if hy < my { qx } else { hx },
                hy,
                p.x,
                p.y,
            )
        {
            let tan = (hy - p.y).abs() / (hx - p.x); // tangential
            if (tan < tan_min || (tan == tan_min && p.x > m.x))
                && locally_inside(nodes, p, hole)
            {
                (m_i, m) = (p_i, p);
                tan_min = tan;
            }
        }

        p_i = p.next_i;
        p = node!(nodes, p_i);
    }

    Some(m_i)
}

/// find the leftmost node of a polygon ring (lesser y breaks ties)
pub(crate) fn get_leftmost<T: Float>(nodes: &[Node<T>], start_i: NodeIndex) -> NodeIndex {
    let mut p_i = start_i;
    let mut p = node!(nodes, p_i);
    let mut leftmost_i = start_i;
    let mut leftmost = p;

    loop {
        if p.x < leftmost.x || (p.x == leftmost.x && p.y < leftmost.y) {
            (leftmost_i, leftmost) = (p_i, p);
        }
        p_i = p.next_i;
        if p_i == start_i {
            return leftmost_i;
        }
        p = node!(nodes, p_i);
    }
}
