//! Core types for the treemap crate.
//!
//! This module defines the map container, the two node layouts, and the
//! fixed fan-out constants everything else is built around.

use crate::arena::Arena;
use crate::ordering::NaturalOrder;
use crate::search::SearchKind;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Minimum number of entries in a non-root node.
///
/// The root is exempt: a root leaf may hold any number of entries
/// (including zero), a root branch holds at least two children.
pub(crate) const MIN_ENTRIES: usize = 16;

/// Maximum number of entries in any node.
///
/// The fan-out is deliberately not configurable: with 32 entries per
/// node a linear scan outperforms binary search for naturally ordered
/// keys, and the node arrays fit a small number of cache lines.
pub(crate) const MAX_ENTRIES: usize = 2 * MIN_ENTRIES;

// ============================================================================
// TYPE DEFINITIONS
// ============================================================================

/// Node ID type for arena-based allocation.
pub(crate) type NodeId = u32;

/// Sentinel ID marking the absence of a node (no sibling, no such leaf).
pub(crate) const NULL_NODE: NodeId = u32::MAX;

/// Reference to a node in one of the two arenas.
///
/// The variant selects the arena; the payload is the slot index. Child
/// edges and leaf sibling links are plain indices, so they never form
/// ownership cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeRef {
    Leaf(NodeId),
    Branch(NodeId),
}

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// A sorted map backed by a B+ tree of fixed fan-out.
///
/// All key-value pairs live in leaf nodes; interior nodes only route.
/// Leaves are chained into a doubly-linked list in key order, so a
/// cursor positioned by one O(log n) descent steps to its neighbour in
/// O(1). Keys are unique: inserting an existing key replaces its value.
///
/// The ordering is supplied by a [`Comparator`](crate::Comparator);
/// [`TreeMap::new`] uses the natural order of `K: Ord`,
/// [`TreeMap::with_comparator`] accepts any comparison function.
///
/// # Examples
///
/// ```
/// use treemap::TreeMap;
///
/// let mut map = TreeMap::new();
/// map.insert(2, "two");
/// map.insert(1, "one");
/// map.insert(3, "three");
///
/// assert_eq!(map.get(&2), Some(&"two"));
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
/// ```
pub struct TreeMap<K, V, C = NaturalOrder> {
    /// The root node; a leaf until the first root split.
    pub(crate) root: NodeRef,
    /// First leaf in key order. Relation only; the leaf itself is owned
    /// by its parent chain.
    pub(crate) front: NodeId,
    /// Last leaf in key order. Relation only.
    pub(crate) back: NodeId,
    /// Number of key-value pairs stored in the map.
    pub(crate) len: usize,
    /// Total order over keys.
    pub(crate) comparator: C,
    /// Key-search strategy, fixed at construction.
    pub(crate) search: SearchKind,
    /// Arena storage for leaf nodes.
    pub(crate) leaves: Arena<LeafNode<K, V>>,
    /// Arena storage for branch nodes.
    pub(crate) branches: Arena<BranchNode<K>>,
}

/// Leaf node: parallel key/value arrays plus sibling links.
#[derive(Debug)]
pub(crate) struct LeafNode<K, V> {
    /// Sorted keys, strictly ascending under the map's comparator.
    pub(crate) keys: Vec<K>,
    /// Values in lock-step with `keys`.
    pub(crate) values: Vec<V>,
    /// Next leaf in key order, `NULL_NODE` for the back leaf.
    pub(crate) next: NodeId,
    /// Previous leaf in key order, `NULL_NODE` for the front leaf.
    pub(crate) prev: NodeId,
}

/// Branch node: one routing key per child.
///
/// `keys[i]` is the largest key reachable through `children[i]`, not a
/// separator between neighbouring children. The last routing key is the
/// maximum of the whole subtree and is rewritten on every insert of a
/// new global maximum.
#[derive(Debug)]
pub(crate) struct BranchNode<K> {
    /// Routing keys, strictly ascending, in lock-step with `children`.
    pub(crate) keys: Vec<K>,
    /// Child references, all leaves or all branches.
    pub(crate) children: Vec<NodeRef>,
}

impl<K, V> Default for LeafNode<K, V> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            values: Vec::new(),
            next: NULL_NODE,
            prev: NULL_NODE,
        }
    }
}

impl<K> Default for BranchNode<K> {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            children: Vec::new(),
        }
    }
}
