//! Key search within a single node.
//!
//! Both strategies return `(index, found)`: the smallest `index` with
//! `keys[index] >= target` under the comparator (which is `keys.len()`
//! when every key is smaller), and whether the key at that index equals
//! the target.
//!
//! With at most 32 keys per node, an early-exit linear scan beats binary
//! search for naturally ordered keys thanks to branch prediction and
//! cache behaviour; custom comparators may be arbitrarily expensive, so
//! they get binary search and its O(log n) comparison count.

use std::cmp::Ordering;

use crate::ordering::Comparator;

/// Search strategy, chosen once at map construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchKind {
    /// Early-exit linear scan; default for naturally ordered keys.
    Linear,
    /// Binary search; used with caller-supplied comparators.
    Binary,
}

impl SearchKind {
    pub(crate) fn locate<K, C>(self, keys: &[K], target: &K, comparator: &C) -> (usize, bool)
    where
        C: Comparator<K>,
    {
        match self {
            SearchKind::Linear => linear_search(keys, target, comparator),
            SearchKind::Binary => binary_search(keys, target, comparator),
        }
    }
}

fn linear_search<K, C>(keys: &[K], target: &K, comparator: &C) -> (usize, bool)
where
    C: Comparator<K>,
{
    for (index, key) in keys.iter().enumerate() {
        match comparator.compare(key, target) {
            Ordering::Equal => return (index, true),
            Ordering::Greater => return (index, false),
            Ordering::Less => {}
        }
    }

    (keys.len(), false)
}

fn binary_search<K, C>(keys: &[K], target: &K, comparator: &C) -> (usize, bool)
where
    C: Comparator<K>,
{
    match keys.binary_search_by(|key| comparator.compare(key, target)) {
        Ok(index) => (index, true),
        Err(index) => (index, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::NaturalOrder;

    fn check(kind: SearchKind) {
        let keys = [10, 20, 30, 40];

        assert_eq!(kind.locate(&keys, &20, &NaturalOrder), (1, true));
        assert_eq!(kind.locate(&keys, &25, &NaturalOrder), (2, false));
        assert_eq!(kind.locate(&keys, &5, &NaturalOrder), (0, false));
        assert_eq!(kind.locate(&keys, &40, &NaturalOrder), (3, true));
        assert_eq!(kind.locate(&keys, &41, &NaturalOrder), (4, false));
        assert_eq!(kind.locate(&[], &1, &NaturalOrder), (0, false));
    }

    #[test]
    fn linear_semantics() {
        check(SearchKind::Linear);
    }

    #[test]
    fn binary_semantics() {
        check(SearchKind::Binary);
    }

    #[test]
    fn strategies_agree_on_every_position() {
        let keys: Vec<i32> = (0..32).map(|i| i * 2).collect();

        for target in -1..66 {
            assert_eq!(
                SearchKind::Linear.locate(&keys, &target, &NaturalOrder),
                SearchKind::Binary.locate(&keys, &target, &NaturalOrder),
                "strategies disagree for target {target}"
            );
        }
    }
}
