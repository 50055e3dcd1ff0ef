//! Array-backed binary min-heaps.
//!
//! [`Heap`] owns a growable backing vector; [`FixedHeap`] borrows a
//! caller-supplied buffer and reports `Err` when full. Ordering follows
//! `T: Ord` with the smallest value at the top; wrap keys in
//! [`core::cmp::Reverse`] for max-heap behavior.

use alloc::vec::Vec;
use core::mem::MaybeUninit;
use core::ptr;

fn parent(index: usize) -> usize {
    (index - 1) / 2
}

fn left_child(index: usize) -> usize {
    index * 2 + 1
}

/// Restores the heap property for an element that may be smaller than its
/// ancestors, moving it up from `index`.
fn sift_up<T: Ord>(data: &mut [T], mut index: usize) {
    while index > 0 && data[index] < data[parent(index)] {
        data.swap(index, parent(index));
        index = parent(index);
    }
}

/// Restores the heap property for an element that may be larger than its
/// descendants, moving it down from `index`.
fn sift_down<T: Ord>(data: &mut [T], mut index: usize) {
    loop {
        let left = left_child(index);
        if left >= data.len() {
            return;
        }
        let right = left + 1;
        let smallest = if right < data.len() && data[right] < data[left] {
            right
        } else {
            left
        };
        if data[index] <= data[smallest] {
            return;
        }
        data.swap(index, smallest);
        index = smallest;
    }
}

/// A growable binary min-heap.
///
/// ```rust
/// use flatbelt::Heap;
///
/// let mut heap = Heap::new();
/// heap.push(3);
/// heap.push(1);
/// heap.push(2);
///
/// assert_eq!(heap.pop(), Some(1));
/// assert_eq!(heap.pop(), Some(2));
/// assert_eq!(heap.pop(), Some(3));
/// ```
#[derive(Clone)]
pub struct Heap<T> {
    data: Vec<T>,
}

impl<T: Ord> Heap<T> {
    /// Creates an empty heap.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Creates an empty heap with room for `capacity` elements before the
    /// first growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the heap contains no elements.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the number of elements the backing vector can hold.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Pushes a value onto the heap, growing the backing vector as needed.
    pub fn push(&mut self, value: T) {
        self.data.push(value);
        let last = self.data.len() - 1;
        sift_up(&mut self.data, last);
    }

    /// Returns a reference to the smallest value without removing it.
    pub fn peek(&self) -> Option<&T> {
        self.data.first()
    }

    /// Removes and returns the smallest value, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.data.is_empty() {
            return None;
        }
        let last = self.data.len() - 1;
        self.data.swap(0, last);
        let value = self.data.pop();
        sift_down(&mut self.data, 0);
        value
    }

    /// Removes every element, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl<T: Ord> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> From<Vec<T>> for Heap<T> {
    /// Builds a heap from arbitrary-order elements in O(n), faster than
    /// pushing one at a time.
    fn from(mut data: Vec<T>) -> Self {
        for index in (0..data.len() / 2).rev() {
            sift_down(&mut data, index);
        }
        Self { data }
    }
}

/// A binary min-heap over a caller-supplied buffer.
///
/// The heap borrows the buffer for its lifetime and never allocates or
/// grows; pushes into a full heap hand the element back as `Err`.
pub struct FixedHeap<'a, T> {
    buffer: &'a mut [MaybeUninit<T>],
    len: usize,
}

impl<'a, T: Ord> FixedHeap<'a, T> {
    /// Creates an empty heap over `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    pub fn new(buffer: &'a mut [MaybeUninit<T>]) -> Self {
        assert!(!buffer.is_empty(), "fixed heap capacity must be positive");
        Self { buffer, len: 0 }
    }

    /// Returns the number of elements in the heap.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the heap contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the borrowed buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// The initialized prefix of the buffer, as ordinary elements.
    fn data(&mut self) -> &mut [T] {
        // SAFETY: positions 0..len are initialized, and MaybeUninit<T> has
        // the same layout as T.
        unsafe { core::slice::from_raw_parts_mut(self.buffer.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Pushes a value onto the heap, or hands it back as `Err` if the heap
    /// is full.
    pub fn try_push(&mut self, value: T) -> Result<(), T> {
        if self.len == self.capacity() {
            return Err(value);
        }
        self.buffer[self.len].write(value);
        self.len += 1;
        let last = self.len - 1;
        sift_up(self.data(), last);
        Ok(())
    }

    /// Returns a reference to the smallest value without removing it.
    pub fn peek(&self) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: position 0 is initialized when len > 0.
        Some(unsafe { self.buffer[0].assume_init_ref() })
    }

    /// Removes and returns the smallest value, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let last = self.len - 1;
        self.data().swap(0, last);
        // SAFETY: the old root now sits at the last initialized position;
        // shrinking len first keeps it out of every later data() view.
        self.len = last;
        let value = unsafe { self.buffer[last].assume_init_read() };
        sift_down(self.data(), 0);
        Some(value)
    }

    /// Removes every element. The buffer stays borrowed.
    pub fn clear(&mut self) {
        // SAFETY: positions 0..len are initialized and dropped once.
        unsafe { ptr::drop_in_place(self.data() as *mut [T]) };
        self.len = 0;
    }

    /// Replaces this heap's contents with a copy of `src`'s. Fails with
    /// `false`, leaving `self` untouched, if `src` holds more elements than
    /// this buffer can hold.
    pub fn copy_from(&mut self, src: &FixedHeap<'_, T>) -> bool
    where
        T: Clone,
    {
        if src.len > self.capacity() {
            return false;
        }
        self.clear();
        for index in 0..src.len {
            // SAFETY: src positions 0..len are initialized.
            let value = unsafe { src.buffer[index].assume_init_ref() };
            self.buffer[index].write(value.clone());
        }
        self.len = src.len;
        true
    }
}

impl<T> Drop for FixedHeap<'_, T> {
    fn drop(&mut self) {
        let initialized = ptr::slice_from_raw_parts_mut(
            self.buffer.as_mut_ptr().cast::<T>(),
            self.len,
        );
        // SAFETY: positions 0..len are initialized and dropped once.
        unsafe { ptr::drop_in_place(initialized) };
    }
}
