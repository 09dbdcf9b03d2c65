//! Linked sequence with individually allocated, singly linked nodes.

use crate::{AllocFailed, Sequence};

use std::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use std::fmt;
use std::marker::PhantomData;
use std::ops::{Index, IndexMut};
use std::ptr::{self, NonNull};

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// Sequence backed by a chain of individually heap-allocated nodes.
///
/// The sequence owns the whole chain transitively: head first, each node
/// owning its successor, with a tail pointer for O(1) append. Positional
/// access walks the chain from the head and is O(index) — the documented
/// cost asymmetry versus [`ArraySeq`](crate::ArraySeq)'s O(1) access, not a
/// bug. `clear` is O(n).
///
/// Teardown (both `clear` and drop) releases nodes in a loop; the chain is
/// never freed through recursive drop glue, so long sequences cannot
/// overflow the call stack.
///
/// # Example
///
/// ```
/// use bedrock_collections::LinkedSeq;
///
/// let mut seq: LinkedSeq<i32> = LinkedSeq::new();
/// seq.push(40);
/// assert_eq!(seq[0], 40);
///
/// seq.clear();
/// assert_eq!(seq.len(), 0);
/// ```
pub struct LinkedSeq<T> {
    head: Link<T>,
    tail: Link<T>,
    len: usize,
    _marker: PhantomData<Box<Node<T>>>,
}

impl<T> LinkedSeq<T> {
    /// Creates an empty sequence. Nodes are allocated on demand.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the chain.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` in a freshly allocated node after the tail. O(1).
    ///
    /// Aborts via `handle_alloc_error` if the heap is exhausted.
    #[inline]
    pub fn push(&mut self, value: T) {
        if self.try_push(value).is_err() {
            handle_alloc_error(Layout::new::<Node<T>>());
        }
    }

    /// Appends `value`, reporting heap exhaustion instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns `Err(AllocFailed(value))` if the node could not be allocated.
    /// The chain is unchanged.
    pub fn try_push(&mut self, value: T) -> Result<(), AllocFailed<T>> {
        let node = alloc_node(value)?;

        match self.tail {
            // Safety: tail is a live node of this chain.
            Some(tail) => unsafe { (*tail.as_ptr()).next = Some(node) },
            None => self.head = Some(node),
        }
        self.tail = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Returns a reference to the element at `index`.
    ///
    /// Walks the chain from the head: O(index).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get(&self, index: usize) -> &T {
        assert!(
            index < self.len,
            "index out of bounds: the len is {} but the index is {}",
            self.len,
            index
        );
        // Safety: index < len, so the chain extends at least `index` nodes
        // past the head and every link on the way is live.
        unsafe {
            let mut node = self.head.unwrap_unchecked();
            for _ in 0..index {
                node = node.as_ref().next.unwrap_unchecked();
            }
            &node.as_ref().value
        }
    }

    /// Returns a mutable reference to the element at `index`. O(index).
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn get_mut(&mut self, index: usize) -> &mut T {
        assert!(
            index < self.len,
            "index out of bounds: the len is {} but the index is {}",
            self.len,
            index
        );
        // Safety: as for get, with exclusive access through &mut self.
        unsafe {
            let mut node = self.head.unwrap_unchecked();
            for _ in 0..index {
                node = node.as_ref().next.unwrap_unchecked();
            }
            &mut node.as_mut().value
        }
    }

    /// Releases every node, resetting the sequence to empty.
    ///
    /// Walks the chain iteratively; no recursion, regardless of length.
    pub fn clear(&mut self) {
        let mut cursor = self.head.take();
        self.tail = None;
        self.len = 0;

        while let Some(node) = cursor {
            // Safety: node was allocated by alloc_node, is exclusively owned
            // by this chain, and is released exactly once.
            unsafe {
                cursor = (*node.as_ptr()).next;
                ptr::drop_in_place(node.as_ptr());
                dealloc(node.as_ptr() as *mut u8, Layout::new::<Node<T>>());
            }
        }
    }
}

/// Allocates a single unlinked node holding `value`.
///
/// Goes through the raw allocator so exhaustion is reportable; `Box::new`
/// aborts instead.
fn alloc_node<T>(value: T) -> Result<NonNull<Node<T>>, AllocFailed<T>> {
    // Node<T> always carries a link, so the layout is never zero-sized.
    let layout = Layout::new::<Node<T>>();
    let raw = unsafe { alloc(layout) } as *mut Node<T>;
    match NonNull::new(raw) {
        Some(node) => {
            // Safety: raw is non-null and sized/aligned for Node<T>.
            unsafe { node.as_ptr().write(Node { value, next: None }) };
            Ok(node)
        }
        None => Err(AllocFailed(value)),
    }
}

impl<T> Sequence<T> for LinkedSeq<T> {
    #[inline]
    fn len(&self) -> usize {
        self.len
    }

    #[inline]
    fn push(&mut self, value: T) {
        LinkedSeq::push(self, value);
    }

    #[inline]
    fn try_push(&mut self, value: T) -> Result<(), AllocFailed<T>> {
        LinkedSeq::try_push(self, value)
    }

    #[inline]
    fn get(&self, index: usize) -> &T {
        LinkedSeq::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> &mut T {
        LinkedSeq::get_mut(self, index)
    }

    #[inline]
    fn clear(&mut self) {
        LinkedSeq::clear(self);
    }
}

impl<T> Drop for LinkedSeq<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for LinkedSeq<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for LinkedSeq<T> {
    /// Deep copy: the clone allocates its own chain.
    fn clone(&self) -> Self {
        let mut out = Self::new();
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // Safety: cursor came from chain traversal, so the node is live.
            let node = unsafe { node.as_ref() };
            out.push(node.value.clone());
            cursor = node.next;
        }
        out
    }
}

impl<T: PartialEq> PartialEq for LinkedSeq<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        let (mut a, mut b) = (self.head, other.head);
        while let (Some(x), Some(y)) = (a, b) {
            // Safety: both cursors came from chain traversal.
            let (x, y) = unsafe { (x.as_ref(), y.as_ref()) };
            if x.value != y.value {
                return false;
            }
            a = x.next;
            b = y.next;
        }
        true
    }
}

impl<T: Eq> Eq for LinkedSeq<T> {}

impl<T: fmt::Debug> fmt::Debug for LinkedSeq<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_list();
        let mut cursor = self.head;
        while let Some(node) = cursor {
            // Safety: cursor came from chain traversal.
            let node = unsafe { node.as_ref() };
            list.entry(&node.value);
            cursor = node.next;
        }
        list.finish()
    }
}

impl<T> Index<usize> for LinkedSeq<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        self.get(index)
    }
}

impl<T> IndexMut<usize> for LinkedSeq<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        self.get_mut(index)
    }
}
