use alloc::vec::Vec;
use core::num::NonZeroU32;
use num_traits::float::Float;

/// Handle into the node arena. Slot 0 holds a dummy node so the niche
/// optimization keeps `Option<NodeIndex>` pointer-sized.
pub(crate) type NodeIndex = NonZeroU32;

macro_rules! node {
    ($self:ident.$nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $self.$nodes.len() as u32);
            $self.$nodes.get_unchecked($index.get() as usize)
        }
    };
    ($nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $nodes.len() as u32);
            $nodes.get_unchecked($index.get() as usize)
        }
    };
}

macro_rules! node_mut {
    ($self:ident.$nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $self.$nodes.len() as u32);
            $self.$nodes.get_unchecked_mut($index.get() as usize)
        }
    };
    ($nodes:ident, $index:expr) => {
        unsafe {
            debug_assert!($index.get() < $nodes.len() as u32);
            $nodes.get_unchecked_mut($index.get() as usize)
        }
    };
}

pub(crate) struct Node<T: Float> {
    /// flat offset of this vertex in the input coordinate array
    pub i: u32,
    /// z-order curve key; 0 until the curve is indexed
    pub z: i32,
    pub x: T,
    pub y: T,
    /// previous vertex in the polygon ring
    pub prev_i: NodeIndex,
    /// next vertex in the polygon ring
    pub next_i: NodeIndex,
    /// previous node in z-order
    pub prev_z_i: Option<NodeIndex>,
    /// next node in z-order
    pub next_z_i: Option<NodeIndex>,
    /// whether this node was inserted to realize a hole bridge
    pub steiner: bool,
}

impl<T: Float> Node<T> {
    pub fn new(i: u32, x: T, y: T) -> Self {
        Self {
            i,
            x,
            y,
            prev_i: unsafe { NodeIndex::new_unchecked(1) },
            next_i: unsafe { NodeIndex::new_unchecked(1) },
            z: 0,
            prev_z_i: None,
            next_z_i: None,
            steiner: false,
        }
    }
}

/// create a node and optionally link it with the previous one (in a circular
/// doubly linked list)
pub(crate) fn insert_node<T: Float>(
    nodes: &mut Vec<Node<T>>,
    i: u32,
    x: T,
    y: T,
    last: Option<NodeIndex>,
) -> NodeIndex {
    let mut p = Node::new(i, x, y);
    let p_i = unsafe { NodeIndex::new_unchecked(nodes.len() as u32) };
    match last {
        Some(last_i) => {
            let last = node_mut!(nodes, last_i);
            let last_next_i = last.next_i;
            (p.next_i, last.next_i) = (last_next_i, p_i);
            p.prev_i = last_i;
            node_mut!(nodes, last_next_i).prev_i = p_i;
        }
        None => {
            (p.prev_i, p.next_i) = (p_i, p_i);
        }
    }
    nodes.push(p);
    p_i
}

/// unlink a node from the ring (and the z-order list if threaded); the slot
/// itself stays in the arena and keeps its outgoing links
pub(crate) fn remove_node<T: Float>(nodes: &mut [Node<T>], p_i: NodeIndex) -> (NodeIndex, NodeIndex) {
    let p = node!(nodes, p_i);
    let p_next_i = p.next_i;
    let p_prev_i = p.prev_i;
    let p_next_z_i = p.next_z_i;
    let p_prev_z_i = p.prev_z_i;

    node_mut!(nodes, p_next_i).prev_i = p_prev_i;
    node_mut!(nodes, p_prev_i).next_i = p_next_i;

    if let Some(prev_z_i) = p_prev_z_i {
        node_mut!(nodes, prev_z_i).next_z_i = p_next_z_i;
    }
    if let Some(next_z_i) = p_next_z_i {
        node_mut!(nodes, next_z_i).prev_z_i = p_prev_z_i;
    }
    (p_prev_i, p_next_i)
}

/// link two polygon vertices with a bridge; if the vertices belong to the same
/// ring, this splits the polygon into two; if one belongs to the outer ring and
/// the other to a hole, it merges the hole into a single ring. Adds two
/// duplicate nodes (same `i`, same coordinates) and redirects four pointers.
pub(crate) fn split_polygon<T: Float>(
    nodes: &mut Vec<Node<T>>,
    a_i: NodeIndex,
    b_i: NodeIndex,
) -> NodeIndex {
    debug_assert!(!nodes.is_empty());
    let a2_i = unsafe { NodeIndex::new_unchecked(nodes.len() as u32) };
    let b2_i = unsafe { NodeIndex::new_unchecked(nodes.len() as u32 + 1) };

    let a = node_mut!(nodes, a_i);
    let mut a2 = Node::new(a.i, a.x, a.y);
    let an_i = a.next_i;
    a.next_i = b_i;
    a2.prev_i = b2_i;
    a2.next_i = an_i;
    node_mut!(nodes, an_i).prev_i = a2_i;

    let b = node_mut!(nodes, b_i);
    let mut b2 = Node::new(b.i, b.x, b.y);
    let bp_i = b.prev_i;
    b.prev_i = a_i;
    b2.next_i = a2_i;
    b2.prev_i = bp_i;
    node_mut!(nodes, bp_i).next_i = b2_i;

    nodes.extend([a2, b2]);

    b2_i
}
