//! Pure, stateless geometry predicates. All of them share one sign
//! convention (`area` of a clockwise triple is negative); ear and diagonal
//! decisions depend on every call site agreeing on it.

use num_traits::float::Float;

use crate::node::Node;

/// signed area of a triangle (doubled; only the sign is meaningful)
pub(crate) fn area<T: Float>(p: &Node<T>, q: &Node<T>, r: &Node<T>) -> T {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}

/// check if two points are equal
pub(crate) fn equals<T: Float>(p1: &Node<T>, p2: &Node<T>) -> bool {
    p1.x == p2.x && p1.y == p2.y
}

/// check if a point lies within a convex triangle (boundary inclusive)
#[allow(clippy::too_many_arguments)]
pub(crate) fn point_in_triangle<T: Float>(
    ax: T,
    ay: T,
    bx: T,
    by: T,
    cx: T,
    cy: T,
    px: T,
    py: T,
) -> bool {
    (cx - px) * (ay - py) >= (ax - px) * (cy - py)
        && (ax - px) * (by - py) >= (bx - px) * (ay - py)
        && (bx - px) * (cy - py) >= (cx - px) * (by - py)
}

/// check if two segments intersect; segments sharing both endpoints count as
/// intersecting
pub(crate) fn intersects<T: Float>(p1: &Node<T>, q1: &Node<T>, p2: &Node<T>, q2: &Node<T>) -> bool {
    if (equals(p1, q1) && equals(p2, q2)) || (equals(p1, q2) && equals(p2, q1)) {
        return true;
    }
    ((area(p1, q1, p2) > T::zero()) != (area(p1, q1, q2) > T::zero()))
        && ((area(p2, q2, p1) > T::zero()) != (area(p2, q2, q1) > T::zero()))
}

/// check if a polygon diagonal intersects any polygon segments
pub(crate) fn intersects_polygon<T: Float>(nodes: &[Node<T>], a: &Node<T>, b: &Node<T>) -> bool {
    let mut p = a;
    loop {
        let p_next = node!(nodes, p.next_i);
        if (p.i != a.i && p.i != b.i && p_next.i != a.i && p_next.i != b.i)
            && intersects(p, p_next, a, b)
        {
            return true;
        }
        p = p_next;
        if core::ptr::eq(p, a) {
            return false;
        }
    }
}

/// check if a polygon diagonal is locally inside the polygon (consistent with
/// the ring orientation at vertex `a`)
pub(crate) fn locally_inside<T: Float>(nodes: &[Node<T>], a: &Node<T>, b: &Node<T>) -> bool {
    let a_prev = node!(nodes, a.prev_i);
    let a_next = node!(nodes, a.next_i);
    if area(a_prev, a, a_next) < T::zero() {
        area(a, b, a_next) >= T::zero() && area(a, a_prev, b) >= T::zero()
    } else {
        area(a, b, a_prev) < T::zero() || area(a, a_next, b) < T::zero()
    }
}

/// check if the middle point of a polygon diagonal is inside the polygon
/// (ray-crossing parity)
pub(crate) fn middle_inside<T: Float>(nodes: &[Node<T>], a: &Node<T>, b: &Node<T>) -> bool {
    let mut p = a;
    let mut inside = false;
    let two = T::one() + T::one();
    let (px, py) = ((a.x + b.x) / two, (a.y + b.y) / two);
    loop {
        let p_next = node!(nodes, p.next_i);
        inside ^= (p.y > py) != (p_next.y > py)
            && p_next.y != p.y
            && (px < (p_next.x - p.x) * (py - p.y) / (p_next.y - p.y) + p.x);
        p = p_next;
        if core::ptr::eq(p, a) {
            return inside;
        }
    }
}

/// shoelace sum over a flat coordinate range with stride `dim` (doubled area;
/// positive for clockwise rings under the y-down convention)
pub(crate) fn signed_area<T: Float>(data: &[T], start: usize, end: usize, dim: usize) -> T {
    let mut sum = T::zero();
    if end <= start {
        return sum;
    }
    let mut j = end - dim;
    let mut i = start;
    while i < end {
        sum = sum + (data[j] - data[i]) * (data[i + 1] + data[j + 1]);
        j = i;
        i += dim;
    }
    sum
}
