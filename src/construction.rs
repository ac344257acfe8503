//! Construction of maps and nodes.

use crate::arena::Arena;
use crate::ordering::{Comparator, NaturalOrder};
use crate::search::SearchKind;
use crate::types::{BranchNode, LeafNode, NodeRef, TreeMap, MAX_ENTRIES, NULL_NODE};

impl<K: Ord, V> TreeMap<K, V> {
    /// Creates an empty map ordered by the natural order of `K`.
    ///
    /// Keys with a built-in order are searched with an early-exit linear
    /// scan, which is the faster strategy at this fan-out. Use
    /// [`TreeMap::with_comparator`] to sort by anything else.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert("foo", 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self::with_parts(NaturalOrder, SearchKind::Linear)
    }
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`.
    ///
    /// Any `Fn(&K, &K) -> Ordering` closure works. Custom comparators
    /// are searched with binary search; prefer [`TreeMap::new`] for
    /// `Ord` keys in their natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// map.insert(1, "one");
    /// map.insert(2, "two");
    ///
    /// // Reverse order: 2 sorts first.
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [2, 1]);
    /// ```
    pub fn with_comparator(comparator: C) -> Self {
        Self::with_parts(comparator, SearchKind::Binary)
    }

    fn with_parts(comparator: C, search: SearchKind) -> Self {
        let mut leaves = Arena::new();
        let root = leaves.allocate(LeafNode::new());

        Self {
            root: NodeRef::Leaf(root),
            front: root,
            back: root,
            len: 0,
            comparator,
            search,
            leaves,
            branches: Arena::new(),
        }
    }
}

impl<K: Ord, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord + Clone, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Clone, V, C: Comparator<K>> Extend<(K, V)> for TreeMap<K, V, C> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V> LeafNode<K, V> {
    /// Creates an empty, unlinked leaf with room for a full node.
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::with_capacity(MAX_ENTRIES),
            values: Vec::with_capacity(MAX_ENTRIES),
            next: NULL_NODE,
            prev: NULL_NODE,
        }
    }
}

impl<K> BranchNode<K> {
    /// Creates an empty branch with room for a full node.
    pub(crate) fn new() -> Self {
        Self {
            keys: Vec::with_capacity(MAX_ENTRIES),
            children: Vec::with_capacity(MAX_ENTRIES),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_new_map_is_a_single_empty_leaf() {
        let map = TreeMap::<i32, i32>::new();

        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.root, NodeRef::Leaf(map.front));
        assert_eq!(map.front, map.back);
        assert_eq!(map.leaves.allocated(), 1);
        assert_eq!(map.branches.allocated(), 0);
    }

    #[test]
    fn factories_pick_their_search_strategy() {
        let natural = TreeMap::<i32, ()>::new();
        assert_eq!(natural.search, SearchKind::Linear);

        let custom = TreeMap::<i32, (), _>::with_comparator(|a: &i32, b: &i32| a.cmp(b));
        assert_eq!(custom.search, SearchKind::Binary);
    }

    #[test]
    fn from_iterator_collects_sorted() {
        let map: TreeMap<i32, i32> = [(3, 30), (1, 10), (2, 20)].into_iter().collect();

        assert_eq!(map.len(), 3);
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 2, 3]);
    }
}
