//! Ring-buffer double-ended queues.
//!
//! [`Deque`] owns its storage and doubles it when full; [`FixedDeque`]
//! borrows a caller-supplied buffer and reports `Err` instead of growing.
//! Both keep their elements in a contiguous block that wraps around the end
//! of the buffer, so every operation except growth is O(1).

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem::MaybeUninit;
use core::ptr;

const MIN_GROW_CAPACITY: usize = 8;

fn uninit_buffer<T>(capacity: usize) -> Box<[MaybeUninit<T>]> {
    let mut buffer = Vec::with_capacity(capacity);
    // SAFETY: MaybeUninit starts uninitialized, and capacity was reserved.
    unsafe { buffer.set_len(capacity) };
    buffer.into_boxed_slice()
}

/// Maps a logical position (0 = front) to a physical buffer index.
fn wrap(head: usize, offset: usize, capacity: usize) -> usize {
    let index = head + offset;
    if index >= capacity { index - capacity } else { index }
}

/// A growable double-ended queue backed by a ring buffer.
///
/// ```rust
/// use flatbelt::Deque;
///
/// let mut deque = Deque::new();
/// deque.push_back(2);
/// deque.push_back(3);
/// deque.push_front(1);
///
/// assert_eq!(deque.pop_front(), Some(1));
/// assert_eq!(deque.pop_back(), Some(3));
/// ```
pub struct Deque<T> {
    buffer: Box<[MaybeUninit<T>]>,
    head: usize,
    len: usize,
}

impl<T> Deque<T> {
    /// Creates an empty deque with no backing storage.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty deque with room for `capacity` elements before the
    /// first growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: uninit_buffer(capacity),
            head: 0,
            len: 0,
        }
    }

    /// Returns the number of elements in the deque.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the buffer can hold.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Appends an element at the back, growing the buffer if it is full.
    pub fn push_back(&mut self, value: T) {
        self.ensure_capacity();
        let index = wrap(self.head, self.len, self.capacity());
        self.buffer[index].write(value);
        self.len += 1;
    }

    /// Prepends an element at the front, growing the buffer if it is full.
    pub fn push_front(&mut self, value: T) {
        self.ensure_capacity();
        let capacity = self.capacity();
        self.head = if self.head == 0 { capacity - 1 } else { self.head - 1 };
        self.buffer[self.head].write(value);
        self.len += 1;
    }

    /// Removes and returns the front element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: head indexes the initialized front element.
        let value = unsafe { self.buffer[self.head].assume_init_read() };
        self.head = wrap(self.head, 1, self.capacity());
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the back element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = wrap(self.head, self.len - 1, self.capacity());
        self.len -= 1;
        // SAFETY: index was the initialized back element.
        Some(unsafe { self.buffer[index].assume_init_read() })
    }

    /// Returns a reference to the front element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the back element.
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 { None } else { self.get(self.len - 1) }
    }

    /// Returns a reference to the element at logical position `index`,
    /// where 0 is the front.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let physical = wrap(self.head, index, self.capacity());
        // SAFETY: positions 0..len are initialized.
        Some(unsafe { self.buffer[physical].assume_init_ref() })
    }

    /// Returns a mutable reference to the element at logical position
    /// `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let physical = wrap(self.head, index, self.capacity());
        // SAFETY: positions 0..len are initialized.
        Some(unsafe { self.buffer[physical].assume_init_mut() })
    }

    /// Removes every element, keeping the allocated buffer.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: &self.buffer,
            head: self.head,
            len: self.len,
            index: 0,
        }
    }

    fn ensure_capacity(&mut self) {
        if self.len < self.capacity() {
            return;
        }
        let new_capacity = (self.capacity() * 2).max(MIN_GROW_CAPACITY);
        let mut new_buffer = uninit_buffer(new_capacity);
        // Linearize while moving so the new buffer starts at index 0.
        for offset in 0..self.len {
            let physical = wrap(self.head, offset, self.buffer.len());
            // SAFETY: the old slot is initialized and read exactly once;
            // the old buffer is discarded without dropping its elements.
            let value = unsafe { self.buffer[physical].assume_init_read() };
            new_buffer[offset].write(value);
        }
        self.buffer = new_buffer;
        self.head = 0;
    }
}

impl<T> Default for Deque<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Deque<T> {
    fn drop(&mut self) {
        for offset in 0..self.len {
            let physical = wrap(self.head, offset, self.buffer.len());
            // SAFETY: positions 0..len are initialized and dropped once.
            unsafe { ptr::drop_in_place(self.buffer[physical].as_mut_ptr()) };
        }
    }
}

impl<T: Clone> Clone for Deque<T> {
    fn clone(&self) -> Self {
        let mut clone = Self::with_capacity(self.capacity());
        for value in self.iter() {
            clone.push_back(value.clone());
        }
        clone
    }
}

/// A double-ended queue over a caller-supplied buffer.
///
/// The deque borrows the buffer for its lifetime and never allocates or
/// grows; pushes into a full deque hand the element back as `Err`.
pub struct FixedDeque<'a, T> {
    buffer: &'a mut [MaybeUninit<T>],
    head: usize,
    len: usize,
}

impl<'a, T> FixedDeque<'a, T> {
    /// Creates an empty deque over `buffer`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    pub fn new(buffer: &'a mut [MaybeUninit<T>]) -> Self {
        assert!(!buffer.is_empty(), "fixed deque capacity must be positive");
        Self {
            buffer,
            head: 0,
            len: 0,
        }
    }

    /// Returns the number of elements in the deque.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the deque contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the borrowed buffer.
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Appends an element at the back, or hands it back as `Err` if the
    /// deque is full.
    pub fn try_push_back(&mut self, value: T) -> Result<(), T> {
        if self.len == self.capacity() {
            return Err(value);
        }
        let index = wrap(self.head, self.len, self.capacity());
        self.buffer[index].write(value);
        self.len += 1;
        Ok(())
    }

    /// Prepends an element at the front, or hands it back as `Err` if the
    /// deque is full.
    pub fn try_push_front(&mut self, value: T) -> Result<(), T> {
        if self.len == self.capacity() {
            return Err(value);
        }
        let capacity = self.capacity();
        self.head = if self.head == 0 { capacity - 1 } else { self.head - 1 };
        self.buffer[self.head].write(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the front element, or `None` if empty.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        // SAFETY: head indexes the initialized front element.
        let value = unsafe { self.buffer[self.head].assume_init_read() };
        self.head = wrap(self.head, 1, self.capacity());
        self.len -= 1;
        Some(value)
    }

    /// Removes and returns the back element, or `None` if empty.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let index = wrap(self.head, self.len - 1, self.capacity());
        self.len -= 1;
        // SAFETY: index was the initialized back element.
        Some(unsafe { self.buffer[index].assume_init_read() })
    }

    /// Returns a reference to the front element.
    pub fn front(&self) -> Option<&T> {
        self.get(0)
    }

    /// Returns a reference to the back element.
    pub fn back(&self) -> Option<&T> {
        if self.len == 0 { None } else { self.get(self.len - 1) }
    }

    /// Returns a reference to the element at logical position `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        let physical = wrap(self.head, index, self.capacity());
        // SAFETY: positions 0..len are initialized.
        Some(unsafe { self.buffer[physical].assume_init_ref() })
    }

    /// Returns a mutable reference to the element at logical position
    /// `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        if index >= self.len {
            return None;
        }
        let physical = wrap(self.head, index, self.capacity());
        // SAFETY: positions 0..len are initialized.
        Some(unsafe { self.buffer[physical].assume_init_mut() })
    }

    /// Removes every element. The buffer stays borrowed.
    pub fn clear(&mut self) {
        while self.pop_front().is_some() {}
        self.head = 0;
    }

    /// Replaces this deque's contents with a copy of `src`'s, front to
    /// back, linearized to start at index 0. Fails with `false`, leaving
    /// `self` untouched, if `src` holds more elements than this buffer can
    /// hold.
    pub fn copy_from(&mut self, src: &FixedDeque<'_, T>) -> bool
    where
        T: Clone,
    {
        if src.len > self.capacity() {
            return false;
        }
        self.clear();
        for (offset, value) in src.iter().enumerate() {
            self.buffer[offset].write(value.clone());
        }
        self.len = src.len;
        true
    }

    /// Returns an iterator from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            buffer: &*self.buffer,
            head: self.head,
            len: self.len,
            index: 0,
        }
    }
}

impl<T> Drop for FixedDeque<'_, T> {
    fn drop(&mut self) {
        for offset in 0..self.len {
            let physical = wrap(self.head, offset, self.buffer.len());
            // SAFETY: positions 0..len are initialized and dropped once.
            unsafe { ptr::drop_in_place(self.buffer[physical].as_mut_ptr()) };
        }
    }
}

/// An iterator over a deque, front to back.
#[derive(Clone)]
pub struct Iter<'a, T> {
    buffer: &'a [MaybeUninit<T>],
    head: usize,
    len: usize,
    index: usize,
}

impl<T> Iter<'_, T> {
    /// Rewinds the iterator to the front.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.len {
            return None;
        }
        let physical = wrap(self.head, self.index, self.buffer.len());
        self.index += 1;
        // SAFETY: positions 0..len are initialized.
        Some(unsafe { self.buffer[physical].assume_init_ref() })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.len - self.index;
        (remaining, Some(remaining))
    }
}
