//! Cursors: positions inside the map.
//!
//! A cursor is a (leaf, index) pair. Stepping to a neighbour follows
//! the leaf sibling links, so it is O(1) once a descent has positioned
//! the cursor. [`Cursor`] borrows the map shared and is freely
//! copyable; [`CursorMut`] borrows it exclusively and can update values
//! and remove entries.
//!
//! A cursor one past the last entry is the *end* position; reading
//! through it, or stepping backwards from the first entry, is a caller
//! bug and panics. Because a cursor borrows the map, any mutation of
//! the map first requires every cursor to be dropped; the one sanctioned
//! way to mutate mid-iteration is [`CursorMut::remove`], which leaves
//! the same cursor parked on the removed entry's successor.

use crate::iteration::Iter;
use crate::ordering::{Comparator, NaturalOrder};
use crate::types::{NodeId, NodeRef, TreeMap, MIN_ENTRIES, NULL_NODE};

/// Read-only position in a [`TreeMap`].
///
/// Obtained from [`TreeMap::begin`], [`TreeMap::end`], or
/// [`TreeMap::lower_bound`]. The stepping methods consume and return
/// the cursor, so walks read naturally:
///
/// ```
/// use treemap::TreeMap;
///
/// let mut map = TreeMap::new();
/// for i in 0..100 {
///     map.insert(i, i + 1);
/// }
///
/// let mut cursor = map.begin();
/// while !cursor.is_end() {
///     assert_eq!(*cursor.value(), *cursor.key() + 1);
///     cursor = cursor.next();
/// }
/// ```
pub struct Cursor<'a, K, V, C = NaturalOrder> {
    tree: &'a TreeMap<K, V, C>,
    leaf: NodeId,
    index: usize,
}

impl<K, V, C> Clone for Cursor<'_, K, V, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V, C> Copy for Cursor<'_, K, V, C> {}

impl<'a, K, V, C> Cursor<'a, K, V, C> {
    pub(crate) fn new(tree: &'a TreeMap<K, V, C>, leaf: NodeId, index: usize) -> Self {
        Self { tree, leaf, index }
    }

    /// The key at this position. Must not be called at the end position.
    pub fn key(&self) -> &'a K {
        &self.tree.leaves[self.leaf].keys[self.index]
    }

    /// The value at this position. Must not be called at the end
    /// position.
    pub fn value(&self) -> &'a V {
        &self.tree.leaves[self.leaf].values[self.index]
    }

    /// True if this cursor is at the first entry. On an empty map the
    /// begin position and the end position coincide.
    pub fn is_begin(&self) -> bool {
        self.index == 0 && self.tree.leaves[self.leaf].prev == NULL_NODE
    }

    /// True if this cursor is one past the last entry.
    pub fn is_end(&self) -> bool {
        let leaf = &self.tree.leaves[self.leaf];
        self.index == leaf.len() && leaf.next == NULL_NODE
    }

    /// Cursor at the following entry. Must not be called at the end
    /// position.
    pub fn next(mut self) -> Self {
        self.index += 1;

        let leaf = &self.tree.leaves[self.leaf];
        if self.index == leaf.len() && leaf.next != NULL_NODE {
            self.leaf = leaf.next;
            self.index = 0;
        }

        self
    }

    /// Cursor at the preceding entry. Must not be called at the begin
    /// position.
    pub fn prev(mut self) -> Self {
        if self.index == 0 {
            self.leaf = self.tree.leaves[self.leaf].prev;
            self.index = self.tree.leaves[self.leaf].len() - 1;
        } else {
            self.index -= 1;
        }

        self
    }

    /// Iterator over the entries from this position to the end of the
    /// map.
    pub fn iter(&self) -> Iter<'a, K, V> {
        Iter::new(
            &self.tree.leaves,
            (self.leaf, self.index),
            self.tree.end_position(),
        )
    }
}

/// Mutable position in a [`TreeMap`].
///
/// Obtained from [`TreeMap::insert`], [`TreeMap::begin_mut`], or
/// [`TreeMap::lower_bound_mut`]. On top of the read operations it can
/// rewrite the value in place and remove the entry under the cursor.
pub struct CursorMut<'a, K, V, C = NaturalOrder> {
    tree: &'a mut TreeMap<K, V, C>,
    leaf: NodeId,
    index: usize,
}

impl<'a, K, V, C> CursorMut<'a, K, V, C> {
    pub(crate) fn new(tree: &'a mut TreeMap<K, V, C>, leaf: NodeId, index: usize) -> Self {
        Self { tree, leaf, index }
    }

    /// The key at this position. Must not be called at the end position.
    pub fn key(&self) -> &K {
        &self.tree.leaves[self.leaf].keys[self.index]
    }

    /// The value at this position. Must not be called at the end
    /// position.
    pub fn value(&self) -> &V {
        &self.tree.leaves[self.leaf].values[self.index]
    }

    /// Mutable access to the value at this position. Must not be called
    /// at the end position.
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.tree.leaves[self.leaf].values[self.index]
    }

    /// Replace the value at this position, returning the old value.
    /// Must not be called at the end position.
    pub fn set_value(&mut self, value: V) -> V {
        std::mem::replace(self.value_mut(), value)
    }

    /// True if this cursor is at the first entry.
    pub fn is_begin(&self) -> bool {
        self.index == 0 && self.tree.leaves[self.leaf].prev == NULL_NODE
    }

    /// True if this cursor is one past the last entry.
    pub fn is_end(&self) -> bool {
        let leaf = &self.tree.leaves[self.leaf];
        self.index == leaf.len() && leaf.next == NULL_NODE
    }

    /// Step to the following entry. Must not be called at the end
    /// position.
    pub fn move_next(&mut self) {
        self.index += 1;

        let leaf = &self.tree.leaves[self.leaf];
        if self.index == leaf.len() && leaf.next != NULL_NODE {
            self.leaf = leaf.next;
            self.index = 0;
        }
    }

    /// Step to the preceding entry. Must not be called at the begin
    /// position.
    pub fn move_prev(&mut self) {
        if self.index == 0 {
            self.leaf = self.tree.leaves[self.leaf].prev;
            self.index = self.tree.leaves[self.leaf].len() - 1;
        } else {
            self.index -= 1;
        }
    }

    /// Read-only view of this cursor's position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self.tree, self.leaf, self.index)
    }
}

impl<K: Clone, V, C: Comparator<K>> CursorMut<'_, K, V, C> {
    /// Remove the entry under the cursor and park the cursor on its
    /// successor (or the end position).
    ///
    /// Returns `None` — and stays put — at the end position. This is
    /// the one mutation a cursor survives: afterwards the same cursor
    /// continues the walk.
    ///
    /// # Examples
    ///
    /// ```
    /// use treemap::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// for i in 0..4 {
    ///     map.insert(i, ());
    /// }
    ///
    /// // Remove every other entry.
    /// let mut cursor = map.begin_mut();
    /// while !cursor.is_end() {
    ///     cursor.remove();
    ///     if !cursor.is_end() {
    ///         cursor.move_next();
    ///     }
    /// }
    /// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [1, 3]);
    /// ```
    pub fn remove(&mut self) -> Option<(K, V)> {
        if self.is_end() {
            return None;
        }

        // A minimum-sized non-root leaf needs rebalancing; re-descend
        // by key and pick up the successor position that reports.
        let leaf_id = self.leaf;
        if self.tree.root != NodeRef::Leaf(leaf_id)
            && self.tree.leaves[leaf_id].len() == MIN_ENTRIES
        {
            let key = self.key().clone();
            let (position, removed) = self.tree.remove_positioned(&key);
            (self.leaf, self.index) = position;
            return removed;
        }

        let leaf = &mut self.tree.leaves[leaf_id];
        let entry = leaf.remove_at(self.index);
        self.tree.len -= 1;

        if self.index == leaf.len() && leaf.next != NULL_NODE {
            self.leaf = leaf.next;
            self.index = 0;
        }

        Some(entry)
    }
}
