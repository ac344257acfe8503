//! Error type for structural self-checks.
//!
//! Map operations themselves never fail: absence is reported in-band
//! (`Option`) and precondition violations panic. The error type exists
//! for [`TreeMap::validate`](crate::TreeMap::validate), which reports
//! which structural invariant broke and where.

use std::fmt;

/// A violated structural invariant, as reported by
/// [`TreeMap::validate`](crate::TreeMap::validate).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// A node's key array is not strictly ascending.
    UnsortedKeys(String),
    /// A routing key does not equal the maximum of its child's subtree.
    RoutingKeyMismatch(String),
    /// A node's entry count is outside its allowed bounds.
    CapacityViolation(String),
    /// Not all leaves sit at the same depth.
    UnevenLeafDepth(String),
    /// The leaf chain skips, repeats, or disagrees with the tree.
    BrokenLeafChain(String),
    /// The stored element count disagrees with the leaves.
    LengthMismatch(String),
    /// Arena bookkeeping disagrees with the reachable tree.
    ArenaMismatch(String),
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TreeError::UnsortedKeys(msg) => write!(f, "unsorted keys: {msg}"),
            TreeError::RoutingKeyMismatch(msg) => write!(f, "routing key mismatch: {msg}"),
            TreeError::CapacityViolation(msg) => write!(f, "capacity violation: {msg}"),
            TreeError::UnevenLeafDepth(msg) => write!(f, "uneven leaf depth: {msg}"),
            TreeError::BrokenLeafChain(msg) => write!(f, "broken leaf chain: {msg}"),
            TreeError::LengthMismatch(msg) => write!(f, "length mismatch: {msg}"),
            TreeError::ArenaMismatch(msg) => write!(f, "arena mismatch: {msg}"),
        }
    }
}

impl std::error::Error for TreeError {}

/// Result alias for structural self-checks.
pub type TreeResult<T> = Result<T, TreeError>;
