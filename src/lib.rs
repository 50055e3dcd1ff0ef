#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[cfg(test)]
extern crate std;

/// A key-value map over the open-addressing hash table.
///
/// This module provides `HashMap` and `FixedHashMap`, which wrap the table
/// engine with hashing of keys and a standard map interface.
pub mod hash_map;

pub mod hash_table;

/// A set over the open-addressing hash table.
///
/// This module provides `HashSet` and `FixedHashSet`, which wrap the table
/// engine with hashing of values and a standard set interface.
pub mod hash_set;

pub mod arena;
pub mod deque;
pub mod heap;

pub use arena::Arena;
pub use deque::Deque;
pub use deque::FixedDeque;
pub use hash_map::FixedHashMap;
pub use hash_map::HashMap;
pub use hash_set::FixedHashSet;
pub use hash_set::HashSet;
pub use hash_table::FixedHashTable;
pub use hash_table::HashTable;
pub use heap::FixedHeap;
pub use heap::Heap;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used by [`HashMap::new`] and [`HashSet::new`].
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used by [`HashMap::new`] and [`HashSet::new`].
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    }
}
