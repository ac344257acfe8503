//! Structural self-checks.
//!
//! [`TreeMap::validate`] re-derives every structural invariant from
//! scratch and reports the first violation. The test suite runs it
//! after batches of mutations; it is also handy when bisecting a
//! corruption report.

use std::cmp::Ordering;

use crate::error::{TreeError, TreeResult};
use crate::ordering::Comparator;
use crate::types::{NodeId, NodeRef, TreeMap, MAX_ENTRIES, MIN_ENTRIES, NULL_NODE};

/// Facts collected while walking the tree top-down.
struct WalkState {
    /// Leaf IDs in tree order; must match the leaf chain.
    leaf_ids: Vec<NodeId>,
    branch_count: usize,
    entry_count: usize,
    leaf_depth: Option<usize>,
}

impl<K, V, C: Comparator<K>> TreeMap<K, V, C> {
    /// Check every structural invariant of the map.
    ///
    /// Verifies, in order: node shape (parallel arrays in lock-step,
    /// entry counts within bounds, keys strictly ascending, routing
    /// keys equal to their subtree maxima, all leaves at one depth),
    /// the leaf chain (front to back via `next` matches the tree's
    /// leaf order, `prev` links mirror it, the endpoints are the map's
    /// front and back), the element count, and that the arenas hold
    /// exactly the nodes reachable from the root.
    pub fn validate(&self) -> TreeResult<()> {
        let mut state = WalkState {
            leaf_ids: Vec::new(),
            branch_count: 0,
            entry_count: 0,
            leaf_depth: None,
        };

        self.check_node(self.root, true, 0, &mut state)?;
        self.check_leaf_chain(&state.leaf_ids)?;

        if state.entry_count != self.len {
            return Err(TreeError::LengthMismatch(format!(
                "map reports {} entries, leaves hold {}",
                self.len, state.entry_count
            )));
        }

        if self.leaves.allocated() != state.leaf_ids.len() {
            return Err(TreeError::ArenaMismatch(format!(
                "{} leaves allocated, {} reachable",
                self.leaves.allocated(),
                state.leaf_ids.len()
            )));
        }

        if self.branches.allocated() != state.branch_count {
            return Err(TreeError::ArenaMismatch(format!(
                "{} branches allocated, {} reachable",
                self.branches.allocated(),
                state.branch_count
            )));
        }

        Ok(())
    }

    fn check_node(
        &self,
        node: NodeRef,
        is_root: bool,
        depth: usize,
        state: &mut WalkState,
    ) -> TreeResult<Option<&K>> {
        match node {
            NodeRef::Leaf(id) => {
                let leaf = &self.leaves[id];

                if leaf.keys.len() != leaf.values.len() {
                    return Err(TreeError::CapacityViolation(format!(
                        "leaf {id} holds {} keys but {} values",
                        leaf.keys.len(),
                        leaf.values.len()
                    )));
                }

                // Only a root leaf may be under-filled.
                let floor = if is_root { 0 } else { MIN_ENTRIES };
                if leaf.len() < floor || leaf.len() > MAX_ENTRIES {
                    return Err(TreeError::CapacityViolation(format!(
                        "leaf {id} holds {} entries",
                        leaf.len()
                    )));
                }

                if !self.is_strictly_ascending(&leaf.keys) {
                    return Err(TreeError::UnsortedKeys(format!("in leaf {id}")));
                }

                match state.leaf_depth {
                    Some(expected) if expected != depth => {
                        return Err(TreeError::UnevenLeafDepth(format!(
                            "leaf {id} at depth {depth}, expected {expected}"
                        )));
                    }
                    Some(_) => {}
                    None => state.leaf_depth = Some(depth),
                }

                state.leaf_ids.push(id);
                state.entry_count += leaf.len();

                Ok(leaf.keys.last())
            }
            NodeRef::Branch(id) => {
                let branch = &self.branches[id];
                state.branch_count += 1;

                if branch.keys.len() != branch.children.len() {
                    return Err(TreeError::CapacityViolation(format!(
                        "branch {id} holds {} keys but {} children",
                        branch.keys.len(),
                        branch.children.len()
                    )));
                }

                // An interior root routes at least two children.
                let floor = if is_root { 2 } else { MIN_ENTRIES };
                if branch.len() < floor || branch.len() > MAX_ENTRIES {
                    return Err(TreeError::CapacityViolation(format!(
                        "branch {id} holds {} children",
                        branch.len()
                    )));
                }

                if !self.is_strictly_ascending(&branch.keys) {
                    return Err(TreeError::UnsortedKeys(format!("in branch {id}")));
                }

                for (index, &child) in branch.children.iter().enumerate() {
                    let child_max = self.check_node(child, false, depth + 1, state)?;
                    let agrees = child_max.is_some_and(|max| {
                        self.comparator.compare(max, &branch.keys[index]) == Ordering::Equal
                    });

                    if !agrees {
                        return Err(TreeError::RoutingKeyMismatch(format!(
                            "branch {id} key {index} is not its child's maximum"
                        )));
                    }
                }

                Ok(branch.keys.last())
            }
        }
    }

    fn is_strictly_ascending(&self, keys: &[K]) -> bool {
        keys.windows(2)
            .all(|pair| self.comparator.compare(&pair[0], &pair[1]) == Ordering::Less)
    }

    /// The leaf chain must visit exactly the tree's leaves, in tree
    /// order, with mirrored `prev` links and the map's front and back
    /// at the ends.
    fn check_leaf_chain(&self, expected: &[NodeId]) -> TreeResult<()> {
        let mut id = self.front;
        let mut prev = NULL_NODE;

        for (position, &want) in expected.iter().enumerate() {
            if id == NULL_NODE {
                return Err(TreeError::BrokenLeafChain(format!(
                    "chain ends after {position} of {} leaves",
                    expected.len()
                )));
            }
            if id != want {
                return Err(TreeError::BrokenLeafChain(format!(
                    "chain visits leaf {id} where the tree has {want}"
                )));
            }
            if self.leaves[id].prev != prev {
                return Err(TreeError::BrokenLeafChain(format!(
                    "leaf {id} does not link back to its predecessor"
                )));
            }

            prev = id;
            id = self.leaves[id].next;
        }

        if id != NULL_NODE {
            return Err(TreeError::BrokenLeafChain(format!(
                "chain continues past the tree's {} leaves",
                expected.len()
            )));
        }

        if prev != self.back {
            return Err(TreeError::BrokenLeafChain(format!(
                "chain ends at leaf {prev}, back is {}",
                self.back
            )));
        }

        Ok(())
    }

    /// Entry counts of the leaves in key order, for tests and debugging.
    pub fn leaf_sizes(&self) -> Vec<usize> {
        let mut sizes = Vec::new();
        let mut id = self.front;

        while id != NULL_NODE {
            let leaf = &self.leaves[id];
            sizes.push(leaf.len());
            id = leaf.next;
        }

        sizes
    }

    /// Number of node levels, counting the root level as one.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut node = self.root;

        while let NodeRef::Branch(id) = node {
            depth += 1;
            node = self.branches[id].children[0];
        }

        depth
    }
}
