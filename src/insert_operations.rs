//! Insert path: top-down proactive splitting.
//!
//! Full nodes are split on the way down, so by the time the descent
//! reaches a node it always has room and no pass back up is needed. The
//! root is split before the descent starts (the only way the tree grows
//! in height), and a key greater than the current maximum takes the
//! right-spine path, rewriting the trailing routing key at every level.

use std::cmp::Ordering;
use std::mem;

use crate::cursor::CursorMut;
use crate::ordering::Comparator;
use crate::types::{BranchNode, NodeId, NodeRef, TreeMap, NULL_NODE};

impl<K: Clone, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Inserts `key`/`value`, replacing the value of an equal key.
    ///
    /// Returns a cursor at the stored pair and the previous value when
    /// the key was already present.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    ///
    /// let (cursor, old) = map.insert(1, "foo");
    /// assert_eq!(*cursor.key(), 1);
    /// assert_eq!(old, None);
    ///
    /// let (cursor, old) = map.insert(1, "bar");
    /// assert_eq!(*cursor.value(), "bar");
    /// assert_eq!(old, Some("foo"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> (CursorMut<'_, K, V, C>, Option<V>) {
        if self.node_is_full(self.root) {
            self.split_root();
        }

        let mut node = self.root;

        loop {
            let branch_id = match node {
                NodeRef::Leaf(id) => {
                    let (index, found) = {
                        let leaf = &self.leaves[id];
                        self.locate(&leaf.keys, &key)
                    };

                    let leaf = &mut self.leaves[id];
                    let replaced = if found {
                        Some(mem::replace(&mut leaf.values[index], value))
                    } else {
                        leaf.insert_at(index, key, value);
                        self.len += 1;
                        None
                    };

                    return (CursorMut::new(self, id, index), replaced);
                }
                NodeRef::Branch(id) => id,
            };

            // Inserts search the full routing array: landing past the
            // last key means `key` is a new maximum for this subtree.
            let (index, width) = {
                let branch = &self.branches[branch_id];
                (self.locate(&branch.keys, &key).0, branch.len())
            };

            if index == width {
                return self.insert_new_max(branch_id, key, value);
            }

            let child = self.branches[branch_id].children[index];
            node = if self.node_is_full(child) {
                self.split_child(branch_id, index);

                // The split shrank the routing key at `index`; the key
                // may now belong to the new right sibling.
                let branch = &self.branches[branch_id];
                if self.comparator.compare(&branch.keys[index], &key) == Ordering::Less {
                    branch.children[index + 1]
                } else {
                    branch.children[index]
                }
            } else {
                child
            };
        }
    }

    /// Insert a key greater than everything below `branch_id`.
    ///
    /// Walks the right spine, splitting full nodes and overwriting the
    /// trailing routing key with the new maximum at every level, then
    /// appends at the end of the back leaf. This path never replaces.
    fn insert_new_max(
        &mut self,
        mut branch_id: NodeId,
        key: K,
        value: V,
    ) -> (CursorMut<'_, K, V, C>, Option<V>) {
        loop {
            let mut child = self.branches[branch_id].last_child();
            if self.node_is_full(child) {
                let last = self.branches[branch_id].len() - 1;
                self.split_child(branch_id, last);
                child = self.branches[branch_id].last_child();
            }

            let branch = &mut self.branches[branch_id];
            let last = branch.len() - 1;
            branch.keys[last] = key.clone();

            match child {
                NodeRef::Branch(id) => branch_id = id,
                NodeRef::Leaf(id) => {
                    let leaf = &mut self.leaves[id];
                    let index = leaf.len();
                    leaf.insert_at(index, key, value);
                    self.len += 1;

                    return (CursorMut::new(self, id, index), None);
                }
            }
        }
    }

    // ========================================================================
    // SPLITTING
    // ========================================================================

    /// Replace a full root with a two-child branch over its halves.
    pub(crate) fn split_root(&mut self) {
        let left = self.root;
        let (right, left_key) = self.split_node(left);
        let right_key = self.node_last_key(right).clone();

        let mut root = BranchNode::new();
        root.keys.push(left_key);
        root.keys.push(right_key);
        root.children.push(left);
        root.children.push(right);

        self.root = NodeRef::Branch(self.branches.allocate(root));
    }

    /// Split the full child at `index` of `parent`, splicing the new
    /// right sibling in after it.
    pub(crate) fn split_child(&mut self, parent: NodeId, index: usize) {
        let child = self.branches[parent].children[index];
        let (sibling, split_key) = self.split_node(child);

        // The old routing key at `index` now describes the right half
        // and shifts over with the insertion.
        let parent = &mut self.branches[parent];
        parent.keys.insert(index, split_key);
        parent.children.insert(index + 1, sibling);
    }

    /// Split `node` in half, returning the new right sibling and the
    /// left half's new largest key.
    fn split_node(&mut self, node: NodeRef) -> (NodeRef, K) {
        match node {
            NodeRef::Leaf(id) => {
                let (right, key) = self.split_leaf(id);
                (NodeRef::Leaf(right), key)
            }
            NodeRef::Branch(id) => {
                let (right, key) = self.split_branch(id);
                (NodeRef::Branch(right), key)
            }
        }
    }

    fn split_leaf(&mut self, id: NodeId) -> (NodeId, K) {
        let left = &mut self.leaves[id];
        let old_next = left.next;

        let mut right = left.split_upper();
        right.next = old_next;
        right.prev = id;
        let split_key = left.last_key().clone();

        let right_id = self.leaves.allocate(right);
        self.leaves[id].next = right_id;

        if old_next != NULL_NODE {
            self.leaves[old_next].prev = right_id;
        } else {
            self.back = right_id;
        }

        (right_id, split_key)
    }

    fn split_branch(&mut self, id: NodeId) -> (NodeId, K) {
        let left = &mut self.branches[id];
        let right = left.split_upper();
        let split_key = left.last_key().clone();

        (self.branches.allocate(right), split_key)
    }
}

#[cfg(test)]
mod tests {
    use crate::types::{NodeRef, MAX_ENTRIES};
    use crate::TreeMap;

    #[test]
    fn replacing_a_value_reports_the_old_one() {
        let mut map = TreeMap::new();

        let (_, old) = map.insert("foo", 1);
        assert_eq!(old, None);

        let (cursor, old) = map.insert("foo", 100);
        assert_eq!(old, Some(1));
        assert_eq!(*cursor.value(), 100);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn filling_the_root_leaf_splits_it() {
        let mut map = TreeMap::new();

        for i in 0..MAX_ENTRIES {
            map.insert(i, i);
        }
        assert!(matches!(map.root, NodeRef::Leaf(_)));

        map.insert(MAX_ENTRIES, MAX_ENTRIES);
        assert!(matches!(map.root, NodeRef::Branch(_)));
        assert_eq!(map.len(), MAX_ENTRIES + 1);
        map.validate().unwrap();
    }

    #[test]
    fn descent_picks_the_right_half_after_a_split() {
        let mut map = TreeMap::new();
        for i in 0..48 {
            map.insert(i, i);
        }

        // 32 sorts into the upper half of the split child.
        let (cursor, _) = map.insert(32, 99);
        assert_eq!(*cursor.value(), 99);
        map.validate().unwrap();
    }

    #[test]
    fn ascending_inserts_take_the_right_spine() {
        let mut map = TreeMap::new();

        for i in 0..1000 {
            let (cursor, old) = map.insert(i, i + 1);
            assert_eq!(*cursor.key(), i);
            assert_eq!(*cursor.value(), i + 1);
            assert_eq!(old, None);
        }

        assert_eq!(map.len(), 1000);
        map.validate().unwrap();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), (0..1000).collect::<Vec<_>>());
    }

    #[test]
    fn out_of_order_inserts_survive_a_mid_tree_split() {
        let mut map = TreeMap::new();

        for i in 0..16 {
            map.insert(i, i);
        }
        for i in 32..64 {
            map.insert(i, i);
        }
        map.remove(&15);
        for i in 15..25 {
            map.insert(i, i);
        }

        let expected: Vec<i32> = (0..25).chain(32..64).collect();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), expected);
        map.validate().unwrap();
    }
}
