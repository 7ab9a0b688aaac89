//! Element capabilities and the error type for indexed heaps
//!
//! An [`IndexedHeap`](crate::IndexedHeap) needs two things from its elements:
//!
//! - an ordering, expressed through [`PartialOrd`] (only `<` is ever evaluated)
//! - a key, extracted through a [`KeyOf`] strategy chosen when the heap type is
//!   instantiated
//!
//! Two strategies are provided:
//!
//! - [`SelfKey`]: the element is its own key (the default)
//! - [`ByKey`]: the key comes from the element's [`Keyed`] implementation
//!
//! Keys must be unique among the elements currently stored in a heap.

use std::fmt;
use std::hash::Hash;

/// Error type for indexed heap operations
///
/// Every operation checks its preconditions before touching the heap, so a
/// returned error always means the heap is unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// An element with the same key is already stored in the heap
    DuplicateKey,
    /// The operation needs at least one element
    EmptyHeap,
    /// No element with the given key is stored in the heap
    KeyNotFound,
    /// The heap order or the key index is broken (reported by `check` only)
    InvariantViolation(Violation),
}

/// Describes which invariant `check` found broken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The element at `child` is smaller than its parent at `parent`
    HeapProperty { parent: usize, child: usize },
    /// The sequence and the key index hold a different number of entries
    SizeMismatch { heap: usize, index: usize },
    /// The index maps a key to `position`, but the element there has another key
    /// (or `position` is out of bounds)
    IndexMismatch { position: usize },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::DuplicateKey => write!(f, "an element with this key is already in the heap"),
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::KeyNotFound => write!(f, "no element with this key is in the heap"),
            HeapError::InvariantViolation(violation) => {
                write!(f, "heap invariant violated: {}", violation)
            }
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::HeapProperty { parent, child } => {
                write!(f, "element at {} is smaller than its parent at {}", child, parent)
            }
            Violation::SizeMismatch { heap, index } => {
                write!(f, "heap holds {} elements but index holds {} keys", heap, index)
            }
            Violation::IndexMismatch { position } => {
                write!(f, "index entry for position {} does not match the element there", position)
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// An element that carries its own unique key
///
/// The key must not change while the element is stored in a heap.
///
/// # Example
///
/// ```rust
/// use indexed_heap::Keyed;
///
/// struct Job {
///     id: u32,
///     deadline: u64,
/// }
///
/// impl Keyed for Job {
///     type Key = u32;
///
///     fn key(&self) -> &u32 {
///         &self.id
///     }
/// }
/// ```
pub trait Keyed {
    /// The key type used for index lookups
    type Key: Hash + Eq + Clone;

    /// Returns the key identifying this element
    fn key(&self) -> &Self::Key;
}

/// Strategy for extracting the key of an element of type `T`
///
/// This is a type-level choice made when the heap type is named, e.g.
/// `IndexedHeap<Job, ByKey>`; it never inspects the element at runtime to decide.
pub trait KeyOf<T> {
    /// The key type used for index lookups
    type Key: Hash + Eq + Clone;

    /// Returns the key of `item`
    fn key_of(item: &T) -> &Self::Key;
}

/// The element is its own key
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfKey;

impl<T: Hash + Eq + Clone> KeyOf<T> for SelfKey {
    type Key = T;

    #[inline]
    fn key_of(item: &T) -> &T {
        item
    }
}

/// The key is taken from the element's [`Keyed`] implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct ByKey;

impl<T: Keyed> KeyOf<T> for ByKey {
    type Key = T::Key;

    #[inline]
    fn key_of(item: &T) -> &T::Key {
        item.key()
    }
}
