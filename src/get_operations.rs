//! Lookup operations: routed descent, point lookups, and lower bounds.

use crate::cursor::{Cursor, CursorMut};
use crate::ordering::Comparator;
use crate::types::{BranchNode, NodeId, NodeRef, TreeMap, NULL_NODE};

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    // ========================================================================
    // SEARCH HELPERS
    // ========================================================================

    /// Position `key` within a node's live key slice.
    pub(crate) fn locate(&self, keys: &[K], key: &K) -> (usize, bool) {
        self.search.locate(keys, key, &self.comparator)
    }

    /// Child index to descend into for `key`.
    ///
    /// Routing ignores the last routing key: it is the maximum of the
    /// whole subtree, so anything beyond the second-to-last key routes
    /// to the last child. Routing never fails.
    pub(crate) fn route(&self, branch: &BranchNode<K>, key: &K) -> usize {
        let boundary = branch.len() - 1;
        self.search.locate(&branch.keys[..boundary], key, &self.comparator).0
    }

    /// Leaf whose key range covers `key`.
    pub(crate) fn leaf_for(&self, key: &K) -> NodeId {
        let mut node = self.root;

        loop {
            match node {
                NodeRef::Leaf(id) => return id,
                NodeRef::Branch(id) => {
                    let branch = &self.branches[id];
                    node = branch.children[self.route(branch, key)];
                }
            }
        }
    }

    /// Entry count of the node behind `node`.
    pub(crate) fn node_len(&self, node: NodeRef) -> usize {
        match node {
            NodeRef::Leaf(id) => self.leaves[id].len(),
            NodeRef::Branch(id) => self.branches[id].len(),
        }
    }

    pub(crate) fn node_is_full(&self, node: NodeRef) -> bool {
        match node {
            NodeRef::Leaf(id) => self.leaves[id].is_full(),
            NodeRef::Branch(id) => self.branches[id].is_full(),
        }
    }

    /// Largest key in the subtree behind `node`.
    pub(crate) fn node_last_key(&self, node: NodeRef) -> &K {
        match node {
            NodeRef::Leaf(id) => self.leaves[id].last_key(),
            NodeRef::Branch(id) => self.branches[id].last_key(),
        }
    }

    /// Coordinates of the first position at or after `key`, hopping to
    /// the next leaf when `key` is greater than everything in its leaf.
    pub(crate) fn lower_bound_position(&self, key: &K) -> (NodeId, usize) {
        let id = self.leaf_for(key);
        let leaf = &self.leaves[id];

        let (index, _) = self.locate(&leaf.keys, key);
        if index == leaf.len() && leaf.next != NULL_NODE {
            (leaf.next, 0)
        } else {
            (id, index)
        }
    }

    // ========================================================================
    // PUBLIC LOOKUPS
    // ========================================================================

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "foo");
    ///
    /// assert_eq!(map.get(&1), Some(&"foo"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        let leaf = &self.leaves[self.leaf_for(key)];
        let (index, found) = self.locate(&leaf.keys, key);
        found.then(|| &leaf.values[index])
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.leaf_for(key);
        let (index, found) = {
            let leaf = &self.leaves[id];
            self.locate(&leaf.keys, key)
        };

        if found {
            Some(&mut self.leaves[id].values[index])
        } else {
            None
        }
    }

    /// Returns true if `key` is present.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Returns a cursor at the smallest key greater than or equal to
    /// `key`, or at [`end`](TreeMap::end) when every stored key is
    /// smaller.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// for key in [10, 20, 30] {
    ///     map.insert(key, ());
    /// }
    ///
    /// assert_eq!(*map.lower_bound(&15).key(), 20);
    /// assert_eq!(*map.lower_bound(&20).key(), 20);
    /// assert!(map.lower_bound(&31).is_end());
    /// ```
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K, V, C> {
        let (leaf, index) = self.lower_bound_position(key);
        Cursor::new(self, leaf, index)
    }

    /// Mutable-cursor variant of [`lower_bound`](TreeMap::lower_bound).
    pub fn lower_bound_mut(&mut self, key: &K) -> CursorMut<'_, K, V, C> {
        let (leaf, index) = self.lower_bound_position(key);
        CursorMut::new(self, leaf, index)
    }
}

#[cfg(test)]
mod tests {
    use crate::TreeMap;

    #[test]
    fn get_finds_only_stored_keys() {
        let mut map = TreeMap::new();
        map.insert(98, 1);
        map.insert(96, 2);
        map.insert(99, 3);

        assert_eq!(map.get(&96), Some(&2));
        assert_eq!(map.get(&98), Some(&1));
        assert_eq!(map.get(&99), Some(&3));
        assert_eq!(map.get(&95), None);
        assert_eq!(map.get(&97), None);
        assert_eq!(map.get(&100), None);
    }

    #[test]
    fn get_mut_updates_in_place() {
        let mut map = TreeMap::new();
        map.insert(1, 10);

        if let Some(value) = map.get_mut(&1) {
            *value = 20;
        }

        assert_eq!(map.get(&1), Some(&20));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn get_descends_through_branches() {
        let mut map = TreeMap::new();
        for i in 0..1000 {
            map.insert(i, i + 1);
        }

        assert_eq!(map.get(&111), Some(&112));
        assert_eq!(map.get(&1000), None);
    }

    #[test]
    fn lower_bound_lands_on_the_next_leaf() {
        let mut map = TreeMap::new();
        for i in 0..48 {
            map.insert(i, i);
        }
        map.remove(&15);
        map.remove(&23);

        let cursor = map.lower_bound(&23);
        assert_eq!(*cursor.key(), 24);
    }
}
