//! Contiguous growable sequence with a fixed-increment growth policy.

use crate::{AllocFailed, Sequence};

use std::alloc::{Layout, alloc, dealloc, handle_alloc_error, realloc};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};
use std::slice;

/// Number of slots added whenever an [`ArraySeq`] must grow.
///
/// Growth is `capacity + GROWTH_INCREMENT`, not doubling: a sequence at
/// capacity 5 reaches exactly 1005 on the sixth insert, and a zero-capacity
/// sequence reaches 1000 on the first. The constant is part of the observable
/// contract and is held fixed.
pub const GROWTH_INCREMENT: usize = 1000;

/// Sequence backed by one contiguous, reallocating buffer.
///
/// Elements occupy the index range `[0, len)` of the buffer; `capacity - len`
/// trailing slots are uninitialized. Positional access is O(1), append is
/// amortized O(1), `clear` is O(n).
///
/// Zero-sized element types are not supported.
///
/// # Example
///
/// ```
/// use bedrock_collections::ArraySeq;
///
/// let mut seq: ArraySeq<i32> = ArraySeq::with_capacity(5);
/// seq.push(35);
/// assert_eq!(seq[0], 35);
/// assert_eq!(seq.len(), 1);
/// assert_eq!(seq.capacity(), 5);
/// ```
pub struct ArraySeq<T> {
    ptr: NonNull<T>,
    cap: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> ArraySeq<T> {
    /// Creates an empty sequence with no backing storage.
    ///
    /// The first insert allocates [`GROWTH_INCREMENT`] slots.
    #[inline]
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Creates an empty sequence with storage for `capacity` elements.
    ///
    /// A capacity of 0 allocates nothing.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized or the requested layout overflows.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(size_of::<T>() != 0, "zero-sized element types are not supported");
        if capacity == 0 {
            return Self::new();
        }

        let layout = Layout::array::<T>(capacity).expect("capacity overflow");
        let raw = unsafe { alloc(layout) };
        let Some(ptr) = NonNull::new(raw as *mut T) else {
            handle_alloc_error(layout);
        };

        Self {
            ptr,
            cap: capacity,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of live elements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.cap
    }

    /// Appends `value` as the new last element.
    ///
    /// Grows the buffer by [`GROWTH_INCREMENT`] slots when full.
    ///
    /// # Panics
    ///
    /// Panics if `T` is zero-sized or the grown layout overflows; aborts via
    /// `handle_alloc_error` if the heap is exhausted.
    #[inline]
    pub fn push(&mut self, value: T) {
        if self.len == self.cap {
            self.grow();
        }
        // Safety: len < cap after growth; the slot at len is uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Appends `value`, reporting heap exhaustion instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns `Err(AllocFailed(value))` if the buffer needed to grow and the
    /// allocator refused (or the grown layout would overflow). The sequence
    /// keeps its prior length, capacity, and contents.
    #[inline]
    pub fn try_push(&mut self, value: T) -> Result<(), AllocFailed<T>> {
        if self.len == self.cap && !self.try_grow() {
            return Err(AllocFailed(value));
        }
        // Safety: len < cap after growth; the slot at len is uninitialized.
        unsafe { self.ptr.as_ptr().add(self.len).write(value) };
        self.len += 1;
        Ok(())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn get(&self, index: usize) -> &T {
        assert!(
            index < self.len,
            "index out of bounds: the len is {} but the index is {}",
            self.len,
            index
        );
        // Safety: index < len, so the slot is initialized.
        unsafe { &*self.ptr.as_ptr().add(index) }
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.len,
            "index out of bounds: the len is {} but the index is {}",
            self.len,
            index
        );
        // Safety: index < len, so the slot is initialized.
        unsafe { &mut *self.ptr.as_ptr().add(index) }
    }

    /// Drops all elements. Capacity is retained.
    pub fn clear(&mut self) {
        let len = self.len;
        self.len = 0;
        // Safety: the first `len` slots are initialized and will not be
        // observed again (len is already 0).
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.ptr.as_ptr(), len));
        }
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: the first `len` slots are initialized; the dangling pointer
        // of an unallocated sequence is valid for a zero-length slice.
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: as for as_slice, with exclusive access through &mut self.
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Grows the buffer or diverges.
    fn grow(&mut self) {
        if !self.try_grow() {
            match Layout::array::<T>(self.cap + GROWTH_INCREMENT) {
                Ok(layout) => handle_alloc_error(layout),
                Err(_) => panic!("capacity overflow"),
            }
        }
    }

    /// Extends capacity by [`GROWTH_INCREMENT`], relocating the elements.
    ///
    /// Returns `false` if the allocator refused or the layout overflowed; the
    /// existing buffer and contents remain valid either way.
    fn try_grow(&mut self) -> bool {
        assert!(size_of::<T>() != 0, "zero-sized element types are not supported");

        let new_cap = self.cap + GROWTH_INCREMENT;
        let Ok(new_layout) = Layout::array::<T>(new_cap) else {
            return false;
        };

        let raw = if self.cap == 0 {
            unsafe { alloc(new_layout) }
        } else {
            let old_layout = Layout::array::<T>(self.cap).unwrap();
            // Safety: ptr was allocated with old_layout; realloc leaves the
            // old buffer valid on failure.
            unsafe { realloc(self.ptr.as_ptr() as *mut u8, old_layout, new_layout.size()) }
        };

        match NonNull::new(raw as *mut T) {
            Some(ptr) => {
                self.ptr = ptr;
                self.cap = new_cap;
                true
            }
            None => false,
        }
    }
}

impl<T> Sequence<T> for ArraySeq<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn push(&mut self, value: T) {
        ArraySeq::push(self, value);
    }

    #[inline]
    fn try_push(&mut self, value: T) -> Result<(), AllocFailed<T>> {
        ArraySeq::try_push(self, value)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        ArraySeq::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> &mut T {
        ArraySeq::get_mut(self, index)
    }

    #[inline]
    fn clear(&mut self) {
        ArraySeq::clear(self);
    }
}

impl<T> Drop for ArraySeq<T> {
    fn drop(&mut self) {
        self.clear();
        if self.cap > 0 {
            let layout = Layout::array::<T>(self.cap).unwrap();
            // Safety: ptr was allocated with this layout and cap > 0.
            unsafe { dealloc(self.ptr.as_ptr() as *mut u8, layout) };
        }
    }
}

impl<T> Default for ArraySeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for ArraySeq<T> {
    /// Deep copy: the clone gets its own buffer, never shared storage.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.cap);
        for item in self.as_slice() {
            out.push(item.clone());
        }
        out
    }
}

impl<T: PartialEq> PartialEq for ArraySeq<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ArraySeq<T> {}

impl<T: fmt::Debug> fmt::Debug for ArraySeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl<T> Index<usize> for ArraySeq<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for ArraySeq<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    #[test]
    fn new_is_empty() {
        let seq: ArraySeq<i32> = ArraySeq::new();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 0);
        assert_eq!(seq.as_slice(), &[]);
    }

    #[test]
    fn push_and_index() {
        let mut seq = ArraySeq::with_capacity(5);
        assert_eq!(seq.len(), 0);

        seq.push(35);
        assert_eq!(seq[0], 35);
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.capacity(), 5);
    }

    #[test]
    fn growth_adds_the_fixed_increment() {
        let mut seq = ArraySeq::with_capacity(5);
        seq.push(35);
        for _ in 0..4 {
            seq.push(7);
        }
        assert_eq!(seq.len(), 5);
        assert_eq!(seq.capacity(), 5);

        // Sixth insert exhausts the buffer: capacity + 1000, not doubling.
        seq.push(1);
        assert_eq!(seq.len(), 6);
        assert_eq!(seq.capacity(), 1005);
        assert_eq!(seq.as_slice(), &[35, 7, 7, 7, 7, 1]);
    }

    #[test]
    fn zero_capacity_grows_to_the_increment() {
        let mut seq = ArraySeq::new();
        seq.push(1);
        assert_eq!(seq.capacity(), GROWTH_INCREMENT);
    }

    #[test]
    fn elements_survive_relocation() {
        let mut seq = ArraySeq::with_capacity(2);
        for i in 0..2000 {
            seq.push(i);
        }
        assert_eq!(seq.len(), 2000);
        // 2 -> 1002 on the 3rd insert, 1002 -> 2002 on the 1003rd.
        assert_eq!(seq.capacity(), 2002);
        for i in 0..2000 {
            assert_eq!(seq[i], i);
        }
    }

    #[test]
    fn clear_keeps_capacity_and_push_starts_fresh() {
        let mut seq = ArraySeq::with_capacity(5);
        seq.push(1);
        seq.push(2);

        seq.clear();
        assert_eq!(seq.len(), 0);
        assert_eq!(seq.capacity(), 5);

        seq.push(9);
        assert_eq!(seq[0], 9);
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn clear_drops_each_element() {
        struct Tracked<'a>(&'a Cell<u32>);

        impl Drop for Tracked<'_> {
            fn drop(&mut self) {
                self.0.set(self.0.get() + 1);
            }
        }

        let drops = Cell::new(0);
        let mut seq = ArraySeq::with_capacity(4);
        for _ in 0..3 {
            seq.push(Tracked(&drops));
        }

        seq.clear();
        assert_eq!(drops.get(), 3);

        seq.push(Tracked(&drops));
        drop(seq);
        assert_eq!(drops.get(), 4);
    }

    #[test]
    fn get_mut_writes_through() {
        let mut seq = ArraySeq::with_capacity(2);
        seq.push(10);
        *seq.get_mut(0) = 20;
        assert_eq!(seq[0], 20);

        seq[0] = 30;
        assert_eq!(seq[0], 30);
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let mut seq = ArraySeq::with_capacity(3);
        seq.push(1);
        seq.push(2);

        let mut copy = seq.clone();
        assert_eq!(seq, copy);
        assert_eq!(copy.capacity(), 3);

        copy.push(3);
        *copy.get_mut(0) = 99;
        assert_eq!(seq.as_slice(), &[1, 2]);
        assert_eq!(copy.as_slice(), &[99, 2, 3]);
    }

    #[test]
    fn equal_contents_compare_equal() {
        let mut a = ArraySeq::with_capacity(2);
        let mut b = ArraySeq::with_capacity(100);
        a.push(1);
        b.push(1);
        assert_eq!(a, b);

        b.push(2);
        assert_ne!(a, b);
    }

    #[test]
    fn debug_lists_elements() {
        let mut seq = ArraySeq::with_capacity(2);
        seq.push(1);
        seq.push(2);
        assert_eq!(format!("{seq:?}"), "[1, 2]");
    }

    #[test]
    fn works_with_owning_element_types() {
        let mut seq = ArraySeq::new();
        seq.push(String::from("a"));
        seq.push(String::from("b"));
        assert_eq!(seq[1], "b");
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn out_of_range_get_panics() {
        let mut seq = ArraySeq::with_capacity(2);
        seq.push(1);
        let _ = seq.get(1);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn empty_index_panics() {
        let seq: ArraySeq<i32> = ArraySeq::new();
        let _ = seq[0];
    }
}
