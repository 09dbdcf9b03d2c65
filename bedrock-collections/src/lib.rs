//! Sequence primitives with interchangeable storage strategies.
//!
//! This crate provides one capability contract, [`Sequence`], and two
//! implementations with different storage layouts:
//!
//! | Type | Storage | `push` | `get(i)` | `clear` |
//! |------|---------|--------|----------|---------|
//! | [`ArraySeq`] | one contiguous buffer | amortized O(1) | O(1) | O(n) |
//! | [`LinkedSeq`] | per-element heap nodes | O(1) | O(i) | O(n) |
//!
//! Callers that must stay agnostic to the storage strategy hold a
//! `dyn Sequence<T>`; callers that care about layout use the concrete type.
//! Both views observe identical values.
//!
//! # Quick Start
//!
//! ```
//! use bedrock_collections::{ArraySeq, LinkedSeq, Sequence};
//!
//! let mut array: ArraySeq<i32> = ArraySeq::with_capacity(5);
//! array.push(35);
//! assert_eq!(array[0], 35);
//! assert_eq!(array.capacity(), 5);
//!
//! let mut linked: LinkedSeq<i32> = LinkedSeq::new();
//! linked.push(40);
//! assert_eq!(linked[0], 40);
//!
//! // Storage-agnostic access through the trait.
//! fn total(seq: &dyn Sequence<i32>) -> i32 {
//!     (0..seq.len()).map(|i| *seq.get(i)).sum()
//! }
//! assert_eq!(total(&array), 35);
//! assert_eq!(total(&linked), 40);
//! ```
//!
//! # Growth Policy
//!
//! [`ArraySeq`] grows by a fixed increment of [`GROWTH_INCREMENT`] slots
//! (1000), not by doubling. This favors infrequent large reallocations and
//! makes capacity deterministic: a sequence at capacity 5 reaches exactly
//! 1005 on the sixth insert.
//!
//! # Error Handling
//!
//! Out-of-range access and other contract violations panic; they are
//! programmer errors, never silently masked by sentinel values. Heap
//! exhaustion is an environment condition and is reported through
//! `try_push` as [`AllocFailed`], returning the rejected value to the
//! caller with the sequence left untouched. The infallible `push` aborts
//! via `handle_alloc_error` instead.
//!
//! # Concurrency
//!
//! Every type here is single-owner and single-threaded by design; there is
//! no locking and concurrent use is unsupported.

#![warn(missing_docs)]

pub mod array;
pub mod linked;
pub mod sequence;

pub use array::{ArraySeq, GROWTH_INCREMENT};
pub use linked::LinkedSeq;
pub use sequence::{AllocFailed, Sequence};
