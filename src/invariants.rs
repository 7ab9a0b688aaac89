//! Invariant checking for [`IndexedHeap`]
//!
//! [`IndexedHeap::check`] walks the whole structure and reports the first
//! broken invariant it finds. It is a diagnostic for tests and assertions; no
//! heap operation calls it.

use crate::indexed_binary::IndexedHeap;
use crate::traits::{HeapError, KeyOf, Violation};
use std::hash::BuildHasher;

impl<T: PartialOrd, K: KeyOf<T>, S: BuildHasher> IndexedHeap<T, K, S> {
    /// Verifies heap order and the key index
    ///
    /// Checks, in this order:
    /// 1. no element is smaller than its parent
    /// 2. the sequence and the index have the same size
    /// 3. every index entry points at an element carrying that key
    ///
    /// Together, 2 and 3 make the index a bijection onto the positions.
    ///
    /// # Errors
    /// Returns [`HeapError::InvariantViolation`] describing the first breach found.
    pub fn check(&self) -> Result<(), HeapError> {
        for child in 1..self.data.len() {
            let parent = (child - 1) / 2;
            if self.data[child] < self.data[parent] {
                return Err(HeapError::InvariantViolation(Violation::HeapProperty {
                    parent,
                    child,
                }));
            }
        }

        if self.data.len() != self.index.len() {
            return Err(HeapError::InvariantViolation(Violation::SizeMismatch {
                heap: self.data.len(),
                index: self.index.len(),
            }));
        }

        for (key, &position) in &self.index {
            match self.data.get(position) {
                Some(item) if K::key_of(item) == key => {}
                _ => {
                    return Err(HeapError::InvariantViolation(Violation::IndexMismatch {
                        position,
                    }))
                }
            }
        }

        Ok(())
    }
}
