//! Key ordering for the map.
//!
//! The map never compares keys directly; every comparison goes through a
//! [`Comparator`]. [`NaturalOrder`] adapts `K: Ord`, and any
//! `Fn(&K, &K) -> Ordering` closure is a comparator as well, so callers
//! can sort by whatever total order they need.

use std::cmp::Ordering;

/// A total order over keys of type `K`.
///
/// The order must be consistent for the lifetime of the map: `compare`
/// returns `Less` iff `lhs` sorts before `rhs`, `Equal` iff the keys are
/// the same key, `Greater` otherwise. Supplying an inconsistent
/// comparator, or mutating keys in a way that changes their relative
/// order while they are stored, leaves the map in an unspecified state.
pub trait Comparator<K: ?Sized> {
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;
}

/// The natural order of `K: Ord`. This is the comparator used by
/// [`TreeMap::new`](crate::TreeMap::new).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> Comparator<K> for NaturalOrder {
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }
}

impl<K: ?Sized, F> Comparator<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        self(lhs, rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_order_matches_ord() {
        assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
        assert_eq!(NaturalOrder.compare(&2, &2), Ordering::Equal);
        assert_eq!(NaturalOrder.compare("b", "a"), Ordering::Greater);
    }

    #[test]
    fn closures_are_comparators() {
        let reverse = |a: &i32, b: &i32| b.cmp(a);
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
    }
}
