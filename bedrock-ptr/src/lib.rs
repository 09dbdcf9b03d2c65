//! Exclusive-ownership handle to a heap object with a pluggable destruction
//! policy.
//!
//! [`OwnPtr<T, D>`] owns at most one heap-allocated `T` and releases it
//! through a [`Deleter`] when the handle is dropped or reset. The deleter is
//! a type parameter, not a runtime-polymorphic field, so a zero-sized deleter
//! costs no storage: `OwnPtr<T>` is exactly one pointer wide.
//!
//! # Example
//!
//! ```
//! use bedrock_ptr::OwnPtr;
//!
//! let mut ptr: OwnPtr<u64> = OwnPtr::empty();
//! assert!(ptr.is_none());
//!
//! ptr.set(100);
//! assert_eq!(*ptr, 100);
//!
//! // Dropping the handle releases the heap object exactly once.
//! ```
//!
//! # Custom Deleters
//!
//! A deleter is any type implementing [`Deleter`]. Plain function pointers
//! qualify; they cost one extra word of storage. Stateful deleters carry
//! whatever state they declare.
//!
//! ```
//! use std::ptr::NonNull;
//! use bedrock_ptr::OwnPtr;
//!
//! fn release(raw: NonNull<String>) {
//!     // Safety: OwnPtr allocated this via Box.
//!     drop(unsafe { Box::from_raw(raw.as_ptr()) });
//! }
//!
//! let ptr: OwnPtr<String, fn(NonNull<String>)> =
//!     OwnPtr::with_deleter("word".to_string(), release);
//! assert_eq!(*ptr, "word");
//! ```
//!
//! # Trait Objects
//!
//! `T` may be unsized, so a handle can own a boxed trait object:
//!
//! ```
//! use bedrock_ptr::OwnPtr;
//!
//! let ptr: OwnPtr<dyn std::fmt::Display> = OwnPtr::from_box(Box::new(42));
//! assert_eq!(ptr.to_string(), "42");
//! ```
//!
//! # Ownership Rules
//!
//! - The type is neither `Copy` nor `Clone`; duplicating a handle is a
//!   compile-time rejection. Transfer happens by move.
//! - [`release`](OwnPtr::release) hands the raw pointer to the caller without
//!   running the deleter; the handle becomes empty and its drop is a no-op.
//! - Dereferencing an empty handle is a contract violation and panics.
//!
//! # Concurrency
//!
//! Single-owner, single-threaded by design. The handle holds a raw pointer
//! and is neither `Send` nor `Sync`; concurrent use is unsupported.

#![warn(missing_docs)]

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::ptr::NonNull;

// =============================================================================
// Deleter
// =============================================================================

/// Destruction policy invoked when an [`OwnPtr`] disposes of its object.
///
/// Implementations release the storage behind `ptr`. The handle guarantees
/// `delete` runs at most once per owned object.
pub trait Deleter<T: ?Sized> {
    /// Releases the object at `ptr`.
    ///
    /// # Safety
    ///
    /// `ptr` must point to a live object this deleter knows how to release,
    /// and no other code may use the pointer afterwards.
    unsafe fn delete(&mut self, ptr: NonNull<T>);
}

/// Default deleter: releases through the global allocator.
///
/// Zero-sized, so `OwnPtr<T, HeapDeleter>` carries no storage beyond the
/// pointer itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeapDeleter;

impl<T: ?Sized> Deleter<T> for HeapDeleter {
    #[inline]
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        // Safety: per the OwnPtr contract, the pointer originated from
        // Box::into_raw with the global allocator.
        drop(unsafe { Box::from_raw(ptr.as_ptr()) });
    }
}

impl<T: ?Sized> Deleter<T> for fn(NonNull<T>) {
    #[inline]
    unsafe fn delete(&mut self, ptr: NonNull<T>) {
        (*self)(ptr)
    }
}

// =============================================================================
// OwnPtr
// =============================================================================

/// Exclusive-ownership handle to a single heap object.
///
/// Holds either nothing or the address of exactly one heap-allocated `T`,
/// released through the deleter `D` on drop or [`reset`](OwnPtr::reset).
/// See the [crate docs](crate) for the ownership rules.
pub struct OwnPtr<T: ?Sized, D: Deleter<T> = HeapDeleter> {
    ptr: Option<NonNull<T>>,
    deleter: D,
}

impl<T: ?Sized, D: Deleter<T>> OwnPtr<T, D> {
    /// Adopts a raw pointer with the given deleter.
    ///
    /// A null `ptr` produces an empty handle.
    ///
    /// # Safety
    ///
    /// If non-null, `ptr` must point to a live object that `deleter` can
    /// release, and no other owner may release it.
    #[inline]
    pub unsafe fn from_raw_with(ptr: *mut T, deleter: D) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            deleter,
        }
    }

    /// Returns `true` if the handle owns an object.
    #[inline]
    pub fn is_some(&self) -> bool {
        self.ptr.is_some()
    }

    /// Returns `true` if the handle is empty.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.ptr.is_none()
    }

    /// Returns a reference to the owned object, if any.
    #[inline]
    pub fn as_ref(&self) -> Option<&T> {
        // Safety: an owned pointer is live until the deleter runs.
        self.ptr.map(|p| unsafe { &*p.as_ptr() })
    }

    /// Returns a mutable reference to the owned object, if any.
    #[inline]
    pub fn as_mut(&mut self) -> Option<&mut T> {
        // Safety: exclusive access through &mut self.
        self.ptr.map(|p| unsafe { &mut *p.as_ptr() })
    }

    /// Disposes of the owned object, leaving the handle empty.
    ///
    /// Invokes the deleter exactly once if the handle was non-empty;
    /// otherwise does nothing.
    #[inline]
    pub fn reset(&mut self) {
        if let Some(ptr) = self.ptr.take() {
            // Safety: ptr was owned by this handle and is released once.
            unsafe { self.deleter.delete(ptr) };
        }
    }

    /// Disposes of the owned object, then adopts `ptr`.
    ///
    /// The deleter is never invoked on the new pointer during this call.
    ///
    /// # Safety
    ///
    /// Same contract as [`from_raw_with`](OwnPtr::from_raw_with).
    #[inline]
    pub unsafe fn reset_raw(&mut self, ptr: *mut T) {
        self.reset();
        self.ptr = NonNull::new(ptr);
    }

    /// Releases ownership without running the deleter.
    ///
    /// The caller becomes responsible for the object; the handle is empty
    /// afterwards and its drop is a no-op.
    #[inline]
    pub fn release(&mut self) -> Option<NonNull<T>> {
        self.ptr.take()
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> OwnPtr<T, D> {
    /// Creates an empty handle. Its destructor is a no-op.
    #[inline]
    pub fn empty() -> Self {
        Self {
            ptr: None,
            deleter: D::default(),
        }
    }
}

impl<T: ?Sized> OwnPtr<T, HeapDeleter> {
    /// Adopts a boxed object, including unsized ones such as boxed trait
    /// objects.
    #[inline]
    pub fn from_box(boxed: Box<T>) -> Self {
        Self {
            ptr: Some(NonNull::from(Box::leak(boxed))),
            deleter: HeapDeleter,
        }
    }

    /// Adopts a raw pointer, using the default deleter.
    ///
    /// A null `ptr` produces an empty handle.
    ///
    /// # Safety
    ///
    /// If non-null, `ptr` must have come from `Box::into_raw` (global
    /// allocator) and must not be owned elsewhere.
    #[inline]
    pub unsafe fn from_raw(ptr: *mut T) -> Self {
        Self {
            ptr: NonNull::new(ptr),
            deleter: HeapDeleter,
        }
    }
}

impl<T> OwnPtr<T, HeapDeleter> {
    /// Allocates `value` on the heap and binds to it.
    #[inline]
    pub fn new(value: T) -> Self {
        Self::from_box(Box::new(value))
    }

    /// Disposes of the current object, then binds to a fresh allocation of
    /// `value`.
    #[inline]
    pub fn set(&mut self, value: T) {
        self.reset();
        self.ptr = Some(NonNull::from(Box::leak(Box::new(value))));
    }

    /// Moves the owned value out, leaving the handle empty.
    #[inline]
    pub fn take(&mut self) -> Option<T> {
        // Safety: the pointer came from Box::into_raw (HeapDeleter contract).
        self.ptr.take().map(|p| *unsafe { Box::from_raw(p.as_ptr()) })
    }

    /// Consumes the handle, returning the raw pointer without running the
    /// deleter. Returns null if the handle was empty.
    #[inline]
    pub fn into_raw(mut self) -> *mut T {
        match self.release() {
            Some(p) => p.as_ptr(),
            None => std::ptr::null_mut(),
        }
    }
}

impl<T, D: Deleter<T>> OwnPtr<T, D> {
    /// Allocates `value` on the heap and binds to it with a custom deleter.
    ///
    /// The deleter must be able to release a pointer obtained from
    /// `Box::into_raw` with the global allocator.
    #[inline]
    pub fn with_deleter(value: T, deleter: D) -> Self {
        Self {
            ptr: Some(NonNull::from(Box::leak(Box::new(value)))),
            deleter,
        }
    }
}

impl<T: ?Sized, D: Deleter<T>> Drop for OwnPtr<T, D> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<T: ?Sized, D: Deleter<T> + Default> Default for OwnPtr<T, D> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: ?Sized, D: Deleter<T>> Deref for OwnPtr<T, D> {
    type Target = T;

    /// # Panics
    ///
    /// Panics if the handle is empty. Dereferencing an empty handle is a
    /// contract violation, not a recoverable condition.
    #[inline]
    fn deref(&self) -> &T {
        self.as_ref().expect("dereferenced an empty OwnPtr")
    }
}

impl<T: ?Sized, D: Deleter<T>> DerefMut for OwnPtr<T, D> {
    /// # Panics
    ///
    /// Panics if the handle is empty.
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        self.as_mut().expect("dereferenced an empty OwnPtr")
    }
}

impl<T: ?Sized, D: Deleter<T>> fmt::Debug for OwnPtr<T, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ptr {
            Some(p) => write!(f, "OwnPtr({p:p})"),
            None => write!(f, "OwnPtr(empty)"),
        }
    }
}
