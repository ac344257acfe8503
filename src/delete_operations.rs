//! Remove path: top-down proactive rebalancing.
//!
//! Minimum-sized nodes are fixed on the way down, by borrowing from a
//! sibling with spare entries or by merging two minimum siblings, so
//! the leaf-level removal never underflows a node and no pass back up
//! is needed. Every interior node on the descent path is therefore
//! above minimum when its child is rebalanced.

use crate::node::balanced_share;
use crate::ordering::Comparator;
use crate::types::{NodeId, NodeRef, TreeMap, MIN_ENTRIES, NULL_NODE};

impl<K: Clone, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Removes `key`, returning the value stored under it.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(912, 1);
    /// map.insert(313, 2);
    ///
    /// assert_eq!(map.remove(&912), Some(1));
    /// assert_eq!(map.remove(&912), None);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.remove_positioned(key).1.map(|(_, value)| value)
    }

    /// Keyed removal that also reports the removed pair's successor
    /// position, which cursor-based removal resumes from. Reports the
    /// end position when `key` is absent.
    pub(crate) fn remove_positioned(&mut self, key: &K) -> ((NodeId, usize), Option<(K, V)>) {
        self.collapse_root();

        let mut node = self.root;

        loop {
            let branch_id = match node {
                NodeRef::Leaf(id) => {
                    let (index, found) = {
                        let leaf = &self.leaves[id];
                        self.locate(&leaf.keys, key)
                    };

                    if !found {
                        return (self.end_position(), None);
                    }

                    let leaf = &mut self.leaves[id];
                    let entry = leaf.remove_at(index);
                    self.len -= 1;

                    let position = if index == leaf.len() && leaf.next != NULL_NODE {
                        (leaf.next, 0)
                    } else {
                        (id, index)
                    };

                    return (position, Some(entry));
                }
                NodeRef::Branch(id) => id,
            };

            let (index, width) = {
                let branch = &self.branches[branch_id];
                (self.route(branch, key), branch.len())
            };
            let child = self.branches[branch_id].children[index];

            if self.node_len(child) > MIN_ENTRIES {
                node = child;
                continue;
            }

            if index + 1 < width
                && self.node_len(self.branches[branch_id].children[index + 1]) > MIN_ENTRIES
            {
                self.shift_left(branch_id, index + 1);
                node = child;
                continue;
            }

            if index > 0
                && self.node_len(self.branches[branch_id].children[index - 1]) > MIN_ENTRIES
            {
                self.shift_right(branch_id, index - 1);
                node = child;
                continue;
            }

            // Both neighbours (or the only neighbour) are at minimum:
            // merge and descend into the merged node.
            node = if index + 1 < width {
                self.merge_children(branch_id, index)
            } else {
                self.merge_children(branch_id, index - 1)
            };
        }
    }

    // ========================================================================
    // REBALANCING
    // ========================================================================

    /// Merge an interior root of exactly two minimum children into a
    /// single node; the only way the tree loses height.
    fn collapse_root(&mut self) {
        let NodeRef::Branch(id) = self.root else {
            return;
        };

        let branch = &self.branches[id];
        if branch.len() == 2
            && self.node_len(branch.children[0]) == MIN_ENTRIES
            && self.node_len(branch.children[1]) == MIN_ENTRIES
        {
            self.merge_children(id, 0);
        }
    }

    /// Merge `children[index + 1]` into `children[index]`, splicing the
    /// right sibling out of the parent (or replacing a two-child root
    /// with the merged node). Returns the merged node.
    fn merge_children(&mut self, parent_id: NodeId, index: usize) -> NodeRef {
        let (left, right) = {
            let parent = &self.branches[parent_id];
            (parent.children[index], parent.children[index + 1])
        };

        match (left, right) {
            (NodeRef::Leaf(a), NodeRef::Leaf(b)) => {
                let (left_leaf, right_leaf) = self.leaves.get2_mut(a, b);
                left_leaf.merge_from(right_leaf);
                let next = right_leaf.next;
                left_leaf.next = next;
                self.leaves.deallocate(b);

                if next != NULL_NODE {
                    self.leaves[next].prev = a;
                } else {
                    self.back = a;
                }
            }
            (NodeRef::Branch(a), NodeRef::Branch(b)) => {
                let (left_branch, right_branch) = self.branches.get2_mut(a, b);
                left_branch.merge_from(right_branch);
                self.branches.deallocate(b);
            }
            _ => unreachable!("siblings at one level share a node kind"),
        }

        if self.root == NodeRef::Branch(parent_id) && self.branches[parent_id].len() == 2 {
            self.root = left;
            self.branches.deallocate(parent_id);
        } else {
            let merged_last = self.node_last_key(left).clone();
            let parent = &mut self.branches[parent_id];
            parent.remove_at(index + 1);
            parent.keys[index] = merged_last;
        }

        left
    }

    /// Move entries from `children[index]` into its left sibling until
    /// the pair is balanced, then refresh the left routing key.
    fn shift_left(&mut self, parent_id: NodeId, index: usize) {
        let (left, right) = {
            let parent = &self.branches[parent_id];
            (parent.children[index - 1], parent.children[index])
        };

        let left_len = self.node_len(left);
        let count = balanced_share(left_len + self.node_len(right)) - left_len;

        match (left, right) {
            (NodeRef::Leaf(a), NodeRef::Leaf(b)) => {
                let (left_leaf, right_leaf) = self.leaves.get2_mut(a, b);
                left_leaf.take_from_right(right_leaf, count);
            }
            (NodeRef::Branch(a), NodeRef::Branch(b)) => {
                let (left_branch, right_branch) = self.branches.get2_mut(a, b);
                left_branch.take_from_right(right_branch, count);
            }
            _ => unreachable!("siblings at one level share a node kind"),
        }

        let new_last = self.node_last_key(left).clone();
        self.branches[parent_id].keys[index - 1] = new_last;
    }

    /// Move entries from `children[index]` into its right sibling until
    /// the pair is balanced, then refresh the left routing key.
    fn shift_right(&mut self, parent_id: NodeId, index: usize) {
        let (left, right) = {
            let parent = &self.branches[parent_id];
            (parent.children[index], parent.children[index + 1])
        };

        let right_len = self.node_len(right);
        let count = balanced_share(self.node_len(left) + right_len) - right_len;

        match (left, right) {
            (NodeRef::Leaf(a), NodeRef::Leaf(b)) => {
                let (left_leaf, right_leaf) = self.leaves.get2_mut(a, b);
                left_leaf.give_to_right(right_leaf, count);
            }
            (NodeRef::Branch(a), NodeRef::Branch(b)) => {
                let (left_branch, right_branch) = self.branches.get2_mut(a, b);
                left_branch.give_to_right(right_branch, count);
            }
            _ => unreachable!("siblings at one level share a node kind"),
        }

        let new_last = self.node_last_key(left).clone();
        self.branches[parent_id].keys[index] = new_last;
    }
}

#[cfg(test)]
mod tests {
    use crate::types::NodeRef;
    use crate::TreeMap;

    #[test]
    fn removing_from_an_empty_map_reports_absence() {
        let mut map = TreeMap::<i32, i32>::new();
        assert_eq!(map.remove(&0), None);
    }

    #[test]
    fn remove_rebalances_all_the_way_down() {
        let mut map = TreeMap::new();
        for i in 0..1000 {
            map.insert(i, i + 1);
        }

        for i in (0..1000).step_by(2) {
            assert_eq!(map.remove(&i), Some(i + 1));
            assert_eq!(map.len(), (999 - i / 2) as usize);
            map.validate().unwrap();
        }

        let odd: Vec<i32> = (1..1000).step_by(2).collect();
        assert_eq!(map.keys().copied().collect::<Vec<_>>(), odd);
    }

    #[test]
    fn the_root_collapses_back_to_a_leaf() {
        let mut map = TreeMap::new();
        for i in 0..48 {
            map.insert(i, i);
        }
        assert!(matches!(map.root, NodeRef::Branch(_)));

        for i in 0..48 {
            map.remove(&i);
            map.validate().unwrap();
        }

        assert!(matches!(map.root, NodeRef::Leaf(_)));
        assert_eq!(map.len(), 0);
        assert_eq!(map.leaves.allocated(), 1);
        assert_eq!(map.branches.allocated(), 0);
    }

    #[test]
    fn merged_nodes_are_returned_to_the_arena() {
        let mut map = TreeMap::new();
        for i in 0..1000 {
            map.insert(i, i);
        }

        for i in 0..1000 {
            map.remove(&i);
        }

        assert_eq!(map.leaves.allocated(), 1);
        assert_eq!(map.branches.allocated(), 0);
        map.validate().unwrap();
    }
}
