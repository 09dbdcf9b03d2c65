//! The [`Sequence`] capability contract and its allocation-failure error.
//!
//! Both storage strategies in this crate implement [`Sequence`], and the
//! contracts below hold identically for every implementer. Code that should
//! not depend on a particular storage layout takes `&dyn Sequence<T>` or
//! `&mut dyn Sequence<T>` and must not assume a complexity profile for
//! positional access; each implementer documents its own costs.

use std::fmt;

/// Error returned when the heap cannot satisfy an insertion.
///
/// Carries the value that could not be inserted, allowing recovery. The
/// sequence that reported it is unchanged. Distinct from contract
/// violations, which panic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocFailed<T>(
    /// The value that could not be inserted.
    pub T,
);

impl<T> AllocFailed<T> {
    /// Returns the value that could not be inserted.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Display for AllocFailed<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "allocation failed")
    }
}

impl<T: fmt::Debug> std::error::Error for AllocFailed<T> {}

/// Uniform sequence capability set.
///
/// Object safe: hold a `Box<dyn Sequence<T>>` (or an `OwnPtr` over one) to
/// use a sequence without knowing its storage strategy.
///
/// # Contract
///
/// - `push` appends as the new last element and grows the length by one.
/// - Elements occupy positions `0..len()`; `get`/`get_mut` outside that
///   range panic.
/// - `clear` releases every element; a subsequent `push` behaves as on a
///   freshly constructed sequence.
/// - Every mutating operation either fully succeeds or leaves the sequence
///   in its prior, still-valid state.
pub trait Sequence<T> {
    /// Returns the current element count.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value` as the new last element.
    ///
    /// Aborts the process if the heap is exhausted; use
    /// [`try_push`](Sequence::try_push) to handle that case.
    fn push(&mut self, value: T);

    /// Appends `value`, reporting heap exhaustion instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns `Err(AllocFailed(value))` if backing storage could not be
    /// allocated. The sequence is unchanged.
    fn try_push(&mut self, value: T) -> Result<(), AllocFailed<T>>;

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn get(&self, index: usize) -> &T;

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    fn get_mut(&mut self, index: usize) -> &mut T;

    /// Removes all elements, releasing their backing resources.
    fn clear(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_failed_returns_the_value() {
        let err = AllocFailed(42);
        assert_eq!(err.into_inner(), 42);
    }

    #[test]
    fn alloc_failed_display() {
        let err = AllocFailed("word");
        assert_eq!(err.to_string(), "allocation failed");
    }
}
