//! Indexed Binary Heap for Rust
//!
//! This crate provides a binary min-heap that, besides push and pop-minimum,
//! can remove, replace, or reprioritize an *arbitrary* element in O(log n).
//! Elements are addressed by a unique key; a key index kept in lockstep with
//! the heap array maps every key to its current position.
//!
//! This makes it a fit for event schedulers and shortest-path solvers, which
//! need to move or cancel entries that are already queued.
//!
//! # Features
//!
//! - **Arbitrary removal**: `remove(&key)` in O(log n)
//! - **Replacement**: `replace(&key, item)`, optionally under a new key
//! - **Priority updates**: in-place mutation followed by `priority_decreased` /
//!   `priority_increased`, or the direction-agnostic `update`
//! - **Linear-time construction**: `from_vec` heapifies in O(n)
//! - **Invariant checking**: `check` verifies heap order and the key index
//!
//! # Example
//!
//! ```rust
//! use indexed_heap::{ByKey, IndexedHeap, Keyed};
//!
//! #[derive(Debug, PartialEq)]
//! struct Event {
//!     id: u32,
//!     time: u64,
//! }
//!
//! impl PartialOrd for Event {
//!     fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
//!         self.time.partial_cmp(&other.time)
//!     }
//! }
//!
//! impl Keyed for Event {
//!     type Key = u32;
//!
//!     fn key(&self) -> &u32 {
//!         &self.id
//!     }
//! }
//!
//! let mut queue: IndexedHeap<Event, ByKey> = IndexedHeap::new();
//! queue.push(Event { id: 1, time: 30 }).unwrap();
//! queue.push(Event { id: 2, time: 10 }).unwrap();
//! queue.push(Event { id: 3, time: 20 }).unwrap();
//!
//! // Postpone event 2
//! queue.peek_by_key_mut(&2).unwrap().time = 40;
//! queue.priority_increased(&2).unwrap();
//!
//! // Cancel event 1
//! queue.remove(&1).unwrap();
//!
//! assert_eq!(queue.pop().map(|e| e.id), Ok(3));
//! assert_eq!(queue.pop().map(|e| e.id), Ok(2));
//! assert!(queue.check().is_ok());
//! ```

pub mod indexed_binary;
mod invariants;
pub mod traits;

pub use indexed_binary::IndexedHeap;
pub use traits::{ByKey, HeapError, KeyOf, Keyed, SelfKey, Violation};
