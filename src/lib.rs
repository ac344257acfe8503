//! Sorted key-value map backed by a B+ tree of fixed fan-out.
//!
//! All pairs live in leaf nodes; interior nodes hold one routing key
//! per child (the largest key reachable through it) and only steer the
//! descent. Leaves form a doubly-linked list in key order, so cursors
//! and iterators step between neighbours in O(1) after an O(log n)
//! positioning. Inserts split full nodes and removals rebalance
//! minimum ones proactively on the way down, so every mutation is a
//! single root-to-leaf pass.
//!
//! Keys are unique; inserting an existing key replaces its value. The
//! ordering comes from the natural order of `K: Ord`
//! ([`TreeMap::new`]) or from any comparison function
//! ([`TreeMap::with_comparator`]).
//!
//! ```
//! use treemap::TreeMap;
//!
//! let mut map = TreeMap::new();
//! map.insert(1, "foo");
//! map.insert(2, "bar");
//!
//! assert_eq!(map.get(&1), Some(&"foo"));
//! assert_eq!(map.to_string(), "Map[1:foo 2:bar]");
//!
//! // Walk backwards from the end.
//! let mut cursor = map.end();
//! while !cursor.is_begin() {
//!     cursor = cursor.prev();
//!     println!("{}: {}", cursor.key(), cursor.value());
//! }
//! ```

use std::fmt;

mod arena;
mod construction;
mod cursor;
mod delete_operations;
mod error;
mod get_operations;
mod insert_operations;
mod iteration;
mod node;
mod ordering;
mod search;
mod types;
mod validation;

pub use cursor::{Cursor, CursorMut};
pub use error::{TreeError, TreeResult};
pub use iteration::{Iter, Keys, Values};
pub use ordering::{Comparator, NaturalOrder};
pub use types::TreeMap;

use types::{LeafNode, NodeId, NodeRef};

impl<K, V, C> TreeMap<K, V, C> {
    /// Number of key-value pairs in the map. O(1).
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the map holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Cursor at the first entry. Equals [`end`](TreeMap::end) on an
    /// empty map.
    pub fn begin(&self) -> Cursor<'_, K, V, C> {
        Cursor::new(self, self.front, 0)
    }

    /// Cursor one past the last entry.
    pub fn end(&self) -> Cursor<'_, K, V, C> {
        let (leaf, index) = self.end_position();
        Cursor::new(self, leaf, index)
    }

    /// Mutable cursor at the first entry.
    pub fn begin_mut(&mut self) -> CursorMut<'_, K, V, C> {
        CursorMut::new(self, self.front, 0)
    }

    /// Mutable cursor one past the last entry.
    pub fn end_mut(&mut self) -> CursorMut<'_, K, V, C> {
        let (leaf, index) = self.end_position();
        CursorMut::new(self, leaf, index)
    }

    /// Coordinates of the position one past the last entry.
    pub(crate) fn end_position(&self) -> (NodeId, usize) {
        (self.back, self.leaves[self.back].len())
    }

    /// Iterator over `(&K, &V)` entries in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(&self.leaves, (self.front, 0), self.end_position())
    }

    /// Iterator over the keys in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys::new(self.iter())
    }

    /// Iterator over the values, in the sorted order of their keys.
    pub fn values(&self) -> Values<'_, K, V> {
        Values::new(self.iter())
    }

    /// The entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        (self.len > 0).then(|| {
            let leaf = &self.leaves[self.front];
            (&leaf.keys[0], &leaf.values[0])
        })
    }

    /// The entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        (self.len > 0).then(|| {
            let leaf = &self.leaves[self.back];
            (leaf.last_key(), &leaf.values[leaf.len() - 1])
        })
    }

    /// Drop every entry, leaving the map as a single empty leaf.
    /// A no-op on an empty map.
    pub fn clear(&mut self) {
        if self.len == 0 {
            return;
        }

        self.leaves.clear();
        self.branches.clear();

        let root = self.leaves.allocate(LeafNode::new());
        self.root = NodeRef::Leaf(root);
        self.front = root;
        self.back = root;
        self.len = 0;
    }
}

impl<'a, K, V, C> IntoIterator for &'a TreeMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K: fmt::Display, V: fmt::Display, C> fmt::Display for TreeMap<K, V, C> {
    /// Renders the map as `Map[k1:v1 k2:v2 …]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Map[")?;

        for (position, (key, value)) in self.iter().enumerate() {
            if position > 0 {
                write!(f, " ")?;
            }
            write!(f, "{key}:{value}")?;
        }

        write!(f, "]")
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for TreeMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_renders_space_separated_pairs() {
        let mut map = TreeMap::new();
        assert_eq!(map.to_string(), "Map[]");

        map.insert(1, "foo");
        map.insert(2, "bar");
        assert_eq!(map.to_string(), "Map[1:foo 2:bar]");
    }

    #[test]
    fn clear_resets_to_a_single_empty_leaf() {
        let mut map = TreeMap::new();
        for i in 0..1000 {
            map.insert(i, i);
        }

        map.clear();

        assert_eq!(map.len(), 0);
        assert!(map.iter().next().is_none());
        assert!(map.begin().is_end());
        map.validate().unwrap();

        // Clearing an empty map changes nothing.
        map.clear();
        map.validate().unwrap();

        map.insert(7, 7);
        assert_eq!(map.get(&7), Some(&7));
    }

    #[test]
    fn first_and_last_track_the_extremes() {
        let mut map = TreeMap::new();
        assert_eq!(map.first(), None);
        assert_eq!(map.last(), None);

        for i in 0..500 {
            map.insert(i, i * 2);
        }

        assert_eq!(map.first(), Some((&0, &0)));
        assert_eq!(map.last(), Some((&499, &998)));
    }

    #[test]
    fn debug_formats_as_a_map() {
        let mut map = TreeMap::new();
        map.insert(1, "a");
        assert_eq!(format!("{map:?}"), r#"{1: "a"}"#);
    }
}
