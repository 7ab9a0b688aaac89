//! Indexed binary min-heap
//!
//! An array-backed binary min-heap paired with a key index that records the
//! current position of every element. The index turns the usual push/pop heap
//! into one that can also remove, replace, or reprioritize *any* element in
//! O(log n), given its key.
//!
//! The two structures are owned together by [`IndexedHeap`] and only change
//! through its methods. Positions are rewritten in exactly two places, the
//! `sift_up` and `sift_down` primitives, so every element move is paired with
//! its index update.
//!
//! # Time Complexity
//!
//! | Operation              | Complexity |
//! |------------------------|------------|
//! | `push`                 | O(log n)   |
//! | `pop`                  | O(log n)   |
//! | `peek`, `peek_by_key`  | O(1)       |
//! | `remove`               | O(log n)   |
//! | `replace`              | O(log n)   |
//! | `priority_increased`   | O(log n)   |
//! | `priority_decreased`   | O(log n)   |
//! | `update`               | O(log n)   |
//! | `from_vec`             | O(n)       |
//! | `prune`                | O(k * n) for k discarded elements |
//! | `check`                | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::IndexedHeap;
//!
//! let mut heap: IndexedHeap<i32> = IndexedHeap::new();
//! for value in [1, 3, 5, 7, 9, 2, 4, 6, 8, 0] {
//!     heap.push(value).unwrap();
//! }
//!
//! assert_eq!(heap.remove(&9), Ok(9));
//! assert_eq!(heap.remove(&7), Ok(7));
//! assert_eq!(heap.into_sorted_vec(), vec![0, 1, 2, 3, 4, 5, 6, 8]);
//! ```

use crate::traits::{HeapError, KeyOf, SelfKey};
use rustc_hash::FxBuildHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;
use std::marker::PhantomData;

/// A binary min-heap whose elements can be addressed by key
///
/// `T` is ordered through [`PartialOrd`]; only `<` is ever evaluated, and the
/// smallest element sits at the root. `K` picks how keys are extracted from
/// elements ([`SelfKey`] by default, see [`ByKey`](crate::ByKey)), and `S` is
/// the hasher of the key index.
///
/// Keys are unique: inserting an element whose key is already present fails
/// with [`HeapError::DuplicateKey`] and leaves the heap untouched.
pub struct IndexedHeap<T, K: KeyOf<T> = SelfKey, S = FxBuildHasher> {
    /// Elements in heap order: `data[k] <= data[2k+1]` and `data[k] <= data[2k+2]`
    pub(crate) data: Vec<T>,
    /// Key of every element mapped to its position in `data`
    pub(crate) index: HashMap<K::Key, usize, S>,
    _strategy: PhantomData<fn() -> K>,
}

impl<T, K: KeyOf<T>> IndexedHeap<T, K> {
    /// Creates an empty heap using the default Fx hasher
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty heap with room for `capacity` elements
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, FxBuildHasher::default())
    }
}

impl<T, K: KeyOf<T>, S> IndexedHeap<T, K, S> {
    /// Creates an empty heap with room for `capacity` elements, hashing keys with `hasher`
    pub fn with_capacity_and_hasher(capacity: usize, hasher: S) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            index: HashMap::with_capacity_and_hasher(capacity, hasher),
            _strategy: PhantomData,
        }
    }

    /// Returns the number of elements in the heap
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the heap is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the minimum element without removing it
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Iterates over the elements in heap (array) order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.data.iter()
    }

    /// Removes every element
    pub fn clear(&mut self) {
        self.data.clear();
        self.index.clear();
    }

    /// Consumes the heap, returning its elements in heap (array) order
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }
}

impl<T: PartialOrd, K: KeyOf<T>, S: BuildHasher> IndexedHeap<T, K, S> {
    /// Builds a heap from `items` in O(n)
    ///
    /// The key index is built in a single scan, then every internal node is
    /// sifted down, from the last one up to the root.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateKey`] if two items share a key.
    pub fn from_vec(items: Vec<T>) -> Result<Self, HeapError>
    where
        S: Default,
    {
        let mut index = HashMap::with_capacity_and_hasher(items.len(), S::default());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(K::key_of(item).clone(), pos).is_some() {
                return Err(HeapError::DuplicateKey);
            }
        }

        let mut heap = Self {
            data: items,
            index,
            _strategy: PhantomData,
        };
        let n = heap.data.len();
        for pos in (0..n / 2).rev() {
            heap.sift_down(pos);
        }
        log::debug!("heapified {} elements", n);
        heap.debug_check_sizes();
        Ok(heap)
    }

    /// Returns true if an element with `key` is in the heap
    pub fn contains_key(&self, key: &K::Key) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the element with `key`, or `None` if there is none
    pub fn peek_by_key(&self, key: &K::Key) -> Option<&T> {
        let pos = *self.index.get(key)?;
        self.data.get(pos)
    }

    /// Returns mutable access to the element with `key`
    ///
    /// This is the first half of the mutate-then-notify contract: after changing
    /// the ordering of the element, the caller **must** call
    /// [`priority_decreased`](Self::priority_decreased) if it became smaller or
    /// [`priority_increased`](Self::priority_increased) if it became larger.
    /// Calling neither, or the wrong one, leaves the heap order unspecified.
    ///
    /// The key of the element must not be changed; doing so corrupts the index.
    /// [`update`](Self::update) is the checked alternative.
    pub fn peek_by_key_mut(&mut self, key: &K::Key) -> Option<&mut T> {
        let pos = *self.index.get(key)?;
        self.data.get_mut(pos)
    }

    /// Inserts `item`
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateKey`] if an element with the same key is present.
    pub fn push(&mut self, item: T) -> Result<(), HeapError> {
        let key = K::key_of(&item).clone();
        if self.index.contains_key(&key) {
            return Err(HeapError::DuplicateKey);
        }

        let pos = self.data.len();
        self.index.insert(key, pos);
        self.data.push(item);
        self.sift_up(0, pos);
        self.debug_check_sizes();
        Ok(())
    }

    /// Removes and returns the minimum element
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if there is nothing to pop.
    pub fn pop(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        Ok(self.remove_at(0))
    }

    /// Removes and returns the element with `key`
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty, or
    /// [`HeapError::KeyNotFound`] if no element has `key`.
    pub fn remove(&mut self, key: &K::Key) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        let pos = *self.index.get(key).ok_or(HeapError::KeyNotFound)?;
        log::trace!("removing element at position {} of {}", pos, self.data.len());
        Ok(self.remove_at(pos))
    }

    /// Removes and returns the element with `key` if there is one
    pub fn remove_if_present(&mut self, key: &K::Key) -> Option<T> {
        let pos = *self.index.get(key)?;
        Some(self.remove_at(pos))
    }

    /// Replaces the element with `old_key` by `new_item`, returning the old element
    ///
    /// The new item may carry a different key. Only one restore pass runs: if the
    /// old element was smaller the new one can only sink, otherwise it can only rise.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateKey`] if `new_item` has a different key that is
    /// already present, or [`HeapError::KeyNotFound`] if `old_key` is absent.
    pub fn replace(&mut self, old_key: &K::Key, new_item: T) -> Result<T, HeapError> {
        let new_key = K::key_of(&new_item);
        let rekeyed = new_key != old_key;
        if rekeyed && self.index.contains_key(new_key) {
            return Err(HeapError::DuplicateKey);
        }
        let pos = *self.index.get(old_key).ok_or(HeapError::KeyNotFound)?;
        let new_key = if rekeyed { Some(new_key.clone()) } else { None };

        let old = std::mem::replace(&mut self.data[pos], new_item);
        if let Some(new_key) = new_key {
            log::trace!("rekeying element at position {}", pos);
            self.index.remove(old_key);
            self.index.insert(new_key, pos);
        }

        if old < self.data[pos] {
            self.sift_down(pos);
        } else {
            self.sift_up(0, pos);
        }
        self.debug_check_sizes();
        Ok(old)
    }

    /// Restores heap order after the element with `key` was made smaller in place
    ///
    /// See [`peek_by_key_mut`](Self::peek_by_key_mut) for the contract.
    ///
    /// # Errors
    /// Returns [`HeapError::KeyNotFound`] if no element has `key`.
    pub fn priority_decreased(&mut self, key: &K::Key) -> Result<(), HeapError> {
        let pos = *self.index.get(key).ok_or(HeapError::KeyNotFound)?;
        self.sift_up(0, pos);
        Ok(())
    }

    /// Restores heap order after the element with `key` was made larger in place
    ///
    /// See [`peek_by_key_mut`](Self::peek_by_key_mut) for the contract.
    ///
    /// # Errors
    /// Returns [`HeapError::KeyNotFound`] if no element has `key`.
    pub fn priority_increased(&mut self, key: &K::Key) -> Result<(), HeapError> {
        let pos = *self.index.get(key).ok_or(HeapError::KeyNotFound)?;
        self.sift_down(pos);
        Ok(())
    }

    /// Applies `f` to the element with `key` and restores heap order
    ///
    /// Unlike the `priority_*` notifications this does not need to know which way
    /// the ordering moved: the element is sifted up, and if it stays put, sifted
    /// down. `f` must not change the element's key.
    ///
    /// # Errors
    /// Returns [`HeapError::KeyNotFound`] if no element has `key`.
    pub fn update<F>(&mut self, key: &K::Key, f: F) -> Result<(), HeapError>
    where
        F: FnOnce(&mut T),
    {
        let pos = *self.index.get(key).ok_or(HeapError::KeyNotFound)?;
        f(&mut self.data[pos]);
        debug_assert!(
            K::key_of(&self.data[pos]) == key,
            "update closure changed the element's key"
        );
        self.restore_both_ways(pos);
        Ok(())
    }

    /// Pops the minimum, then inserts `item`; returns the popped element
    ///
    /// Cheaper than `pop` followed by `push`. The returned element may be larger
    /// than `item`.
    ///
    /// # Errors
    /// Returns [`HeapError::EmptyHeap`] if the heap is empty, or
    /// [`HeapError::DuplicateKey`] if `item`'s key belongs to an element other
    /// than the minimum.
    pub fn pop_push(&mut self, item: T) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::EmptyHeap);
        }
        self.replace_root(item)
    }

    /// Inserts `item`, then pops the minimum; returns the popped element
    ///
    /// If `item` is not larger than the current minimum it is handed straight
    /// back and the heap is left untouched.
    ///
    /// # Errors
    /// Returns [`HeapError::DuplicateKey`] if `item` would be inserted and its key
    /// belongs to an element other than the minimum.
    pub fn push_pop(&mut self, item: T) -> Result<T, HeapError> {
        match self.data.first() {
            Some(root) if *root < item => self.replace_root(item),
            _ => Ok(item),
        }
    }

    /// Discards the largest elements until at most `max_len` remain
    ///
    /// Returns the discarded elements, largest first. Each one is found among the
    /// leaves and removed the same way [`remove`](Self::remove) does, so heap
    /// order and the index hold afterwards.
    pub fn prune(&mut self, max_len: usize) -> Vec<T> {
        let mut discarded = Vec::with_capacity(self.data.len().saturating_sub(max_len));
        while self.data.len() > max_len {
            let pos = self.worst_position();
            discarded.push(self.remove_at(pos));
        }
        if !discarded.is_empty() {
            log::debug!("pruned {} elements down to {}", discarded.len(), max_len);
        }
        discarded
    }

    /// Consumes the heap, returning its elements in ascending order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.data.len());
        while let Ok(item) = self.pop() {
            sorted.push(item);
        }
        sorted
    }

    /// Removes the element at `pos`, which must be in bounds
    ///
    /// The last element fills the hole. It can be out of order in either
    /// direction, so it is sifted up and, if that left it in place, sifted down.
    fn remove_at(&mut self, pos: usize) -> T {
        let item = self.data.swap_remove(pos);
        if pos < self.data.len() {
            self.set_position(pos);
            if pos == 0 {
                self.sift_down(0);
            } else {
                self.restore_both_ways(pos);
            }
        }
        self.index.remove(K::key_of(&item));
        self.debug_check_sizes();
        item
    }

    /// Puts `item` at the root in place of the current minimum and returns the latter
    ///
    /// The heap must be non-empty.
    fn replace_root(&mut self, item: T) -> Result<T, HeapError> {
        let key = K::key_of(&item).clone();
        if let Some(&pos) = self.index.get(&key) {
            if pos != 0 {
                return Err(HeapError::DuplicateKey);
            }
        }

        let top = std::mem::replace(&mut self.data[0], item);
        self.index.remove(K::key_of(&top));
        self.index.insert(key, 0);
        self.sift_down(0);
        self.debug_check_sizes();
        Ok(top)
    }

    /// Sifts the element at `pos` up, then down if it did not move
    fn restore_both_ways(&mut self, pos: usize) {
        if self.sift_up(0, pos) == pos {
            self.sift_down(pos);
        }
    }

    /// Position of a largest element; only leaves need to be looked at
    fn worst_position(&self) -> usize {
        let mut worst = self.data.len() / 2;
        for pos in worst + 1..self.data.len() {
            if self.less(worst, pos) {
                worst = pos;
            }
        }
        worst
    }

    #[inline]
    fn less(&self, a: usize, b: usize) -> bool {
        self.data[a] < self.data[b]
    }

    /// Records `pos` as the position of the element currently stored there
    #[inline]
    fn set_position(&mut self, pos: usize) {
        let key = K::key_of(&self.data[pos]);
        if let Some(slot) = self.index.get_mut(key) {
            *slot = pos;
        }
    }

    /// Moves the element at `pos` toward the root while it is smaller than its
    /// parent, never rising above `floor`. Returns its final position.
    fn sift_up(&mut self, floor: usize, mut pos: usize) -> usize {
        while pos > floor {
            let parent = (pos - 1) / 2;
            if self.less(pos, parent) {
                self.data.swap(pos, parent);
                self.set_position(pos);
                pos = parent;
            } else {
                break;
            }
        }
        self.set_position(pos);
        pos
    }

    /// Moves the element at `start` toward the leaves. Both child subtrees must
    /// already be heaps. Returns its final position.
    ///
    /// The smaller child is promoted all the way down to a leaf without comparing
    /// against the moving element; the element is then sifted back up from that
    /// leaf, stopping at `start`. Elements sifted in this way (usually a former
    /// last leaf) tend to belong near the bottom, so this takes fewer comparisons
    /// than stopping early.
    fn sift_down(&mut self, start: usize) -> usize {
        let end = self.data.len();
        let mut pos = start;
        let mut child = 2 * pos + 1;
        while child < end {
            let right = child + 1;
            // Ties go to the left child
            if right < end && !self.less(child, right) {
                child = right;
            }
            self.data.swap(pos, child);
            self.set_position(pos);
            pos = child;
            child = 2 * pos + 1;
        }
        self.sift_up(start, pos)
    }

    #[inline]
    fn debug_check_sizes(&self) {
        debug_assert_eq!(
            self.data.len(),
            self.index.len(),
            "heap and index sizes diverged"
        );
    }
}

impl<T: PartialOrd, K: KeyOf<T>, S: BuildHasher + Default> TryFrom<Vec<T>> for IndexedHeap<T, K, S> {
    type Error = HeapError;

    fn try_from(items: Vec<T>) -> Result<Self, HeapError> {
        Self::from_vec(items)
    }
}

impl<T, K: KeyOf<T>, S: Default> Default for IndexedHeap<T, K, S> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            index: HashMap::default(),
            _strategy: PhantomData,
        }
    }
}

impl<T: Clone, K: KeyOf<T>, S: Clone> Clone for IndexedHeap<T, K, S> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            index: self.index.clone(),
            _strategy: PhantomData,
        }
    }
}

impl<T: fmt::Debug, K: KeyOf<T>, S> fmt::Debug for IndexedHeap<T, K, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.data.iter()).finish()
    }
}

impl<'a, T, K: KeyOf<T>, S> IntoIterator for &'a IndexedHeap<T, K, S> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}
