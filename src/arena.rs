//! A bump allocator over a single fixed block of memory.
//!
//! [`Arena`] hands out references carved from one up-front allocation by
//! advancing an offset. Individual values are never freed; the whole arena
//! is recycled at once with [`reset`](Arena::reset) and the block itself is
//! released when the arena is dropped. Allocation is a pointer bump plus an
//! alignment adjustment, which makes the arena a good fit for batches of
//! short-lived values with a common lifetime.
//!
//! Values placed in the arena are **not** dropped when the arena is reset or
//! dropped. Only allocate types whose `Drop` is a no-op (or whose cleanup
//! you do not need).

use alloc::alloc::handle_alloc_error;
use core::alloc::Layout;
use core::cell::Cell;
use core::ptr;
use core::ptr::NonNull;

/// The alignment of the arena's backing block. Allocations with stricter
/// alignment requirements are not supported.
pub const ARENA_ALIGN: usize = 8;

/// A fixed-capacity bump allocator.
///
/// ```rust
/// use flatbelt::Arena;
///
/// let arena = Arena::with_capacity(1024);
/// let a = arena.alloc(41u64).unwrap();
/// *a += 1;
/// assert_eq!(*a, 42);
/// ```
pub struct Arena {
    memory: NonNull<u8>,
    layout: Layout,
    current: Cell<usize>,
}

impl Arena {
    /// Allocates an arena with `capacity` bytes of backing memory.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Aborts via [`handle_alloc_error`] if
    /// the backing allocation fails.
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "arena capacity must be positive");

        let layout = match Layout::from_size_align(capacity, ARENA_ALIGN) {
            Ok(layout) => layout,
            Err(_) => panic!("arena capacity overflows the address space"),
        };
        // SAFETY: layout has non-zero size.
        let raw = unsafe { alloc::alloc::alloc(layout) };
        let Some(memory) = NonNull::new(raw) else {
            handle_alloc_error(layout);
        };

        Self {
            memory,
            layout,
            current: Cell::new(0),
        }
    }

    /// Returns the total size of the backing block in bytes.
    pub fn capacity(&self) -> usize {
        self.layout.size()
    }

    /// Returns the number of bytes consumed so far, including alignment
    /// padding.
    pub fn used(&self) -> usize {
        self.current.get()
    }

    /// Moves `value` into the arena and returns a reference to it, or
    /// `None` if the arena does not have room.
    pub fn alloc<T>(&self, value: T) -> Option<&mut T> {
        let base = self.bump::<T>(1)?;
        // SAFETY: bump returned an aligned, in-bounds, unaliased range for
        // one T.
        unsafe {
            ptr::write(base, value);
            Some(&mut *base)
        }
    }

    /// Allocates a slice of `len` values, initializing each element with
    /// `init(index)`. Returns `None` if the arena does not have room.
    ///
    /// A zero-length request always succeeds and consumes no memory.
    pub fn alloc_slice_with<T>(
        &self,
        len: usize,
        mut init: impl FnMut(usize) -> T,
    ) -> Option<&mut [T]> {
        let base = self.bump::<T>(len)?;
        // SAFETY: bump returned an aligned, in-bounds, unaliased range for
        // len values of T (or a dangling pointer valid for len == 0).
        unsafe {
            for i in 0..len {
                ptr::write(base.add(i), init(i));
            }
            Some(core::slice::from_raw_parts_mut(base, len))
        }
    }

    /// Reserves space for `len` values of `T` and returns the base pointer,
    /// or `None` if the request does not fit. The returned range is aligned
    /// for `T`, lies inside the backing block, and is never handed out
    /// twice before a reset.
    fn bump<T>(&self, len: usize) -> Option<*mut T> {
        let align = core::mem::align_of::<T>();
        if align > ARENA_ALIGN {
            return None;
        }

        let size = core::mem::size_of::<T>().checked_mul(len)?;
        if size == 0 {
            // ZSTs and empty slices need no backing bytes.
            return Some(NonNull::<T>::dangling().as_ptr());
        }

        let start = match self.current.get() % align {
            0 => self.current.get(),
            rem => self.current.get().checked_add(align - rem)?,
        };
        let end = start.checked_add(size)?;
        if end > self.layout.size() {
            return None;
        }
        self.current.set(end);

        // SAFETY: start is in bounds of the backing block.
        Some(unsafe { self.memory.as_ptr().add(start) }.cast::<T>())
    }

    /// Discards every allocation at once, making the full block available
    /// again. Values in the arena are not dropped.
    ///
    /// Takes `&mut self`, so outstanding references into the arena must be
    /// gone before the memory can be reused.
    pub fn reset(&mut self) {
        self.current.set(0);
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        // SAFETY: memory was allocated with exactly this layout.
        unsafe { alloc::alloc::dealloc(self.memory.as_ptr(), self.layout) };
    }
}

// SAFETY: the arena owns its block; &Arena only permits allocation, which is
// not synchronized, so Sync is deliberately *not* implemented.
unsafe impl Send for Arena {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_and_mutate() {
        let arena = Arena::with_capacity(64);

        let a = arena.alloc(1u32).unwrap();
        let b = arena.alloc(2u32).unwrap();
        *a += 10;
        *b += 20;

        assert_eq!(*a, 11);
        assert_eq!(*b, 22);
    }

    #[test]
    fn exhaustion_returns_none() {
        let arena = Arena::with_capacity(16);

        assert!(arena.alloc(0u64).is_some());
        assert!(arena.alloc(0u64).is_some());
        assert!(arena.alloc(0u64).is_none());
        assert_eq!(arena.used(), 16);
    }

    #[test]
    fn alignment_padding_is_counted() {
        let arena = Arena::with_capacity(32);

        assert!(arena.alloc(1u8).is_some());
        assert_eq!(arena.used(), 1);

        // The u64 must start at offset 8, not 1.
        assert!(arena.alloc(2u64).is_some());
        assert_eq!(arena.used(), 16);
    }

    #[test]
    fn slice_alloc_initializes_every_element() {
        let arena = Arena::with_capacity(256);

        let slice = arena.alloc_slice_with(10, |i| i as u32 * 3).unwrap();
        assert_eq!(slice.len(), 10);
        for (i, v) in slice.iter().enumerate() {
            assert_eq!(*v, i as u32 * 3);
        }
    }

    #[test]
    fn zero_length_slice_consumes_nothing() {
        let arena = Arena::with_capacity(8);

        let slice = arena.alloc_slice_with(0, |_| 0u64).unwrap();
        assert!(slice.is_empty());
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn reset_recycles_the_block() {
        let mut arena = Arena::with_capacity(16);

        assert!(arena.alloc([0u8; 16]).is_some());
        assert!(arena.alloc(0u8).is_none());

        arena.reset();
        assert_eq!(arena.used(), 0);
        assert!(arena.alloc([0u8; 16]).is_some());
    }

    #[test]
    fn overaligned_requests_are_refused() {
        #[repr(align(16))]
        struct Wide([u8; 16]);

        let arena = Arena::with_capacity(64);
        assert!(arena.alloc(Wide([0; 16])).is_none());
    }

    #[test]
    #[should_panic(expected = "arena capacity must be positive")]
    fn zero_capacity_is_rejected() {
        let _ = Arena::with_capacity(0);
    }
}
