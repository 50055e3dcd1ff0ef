use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::FixedHashTable;
use crate::hash_table::HashTable;
use crate::hash_table::Slot;

/// A hash set over the open-addressing [`HashTable`] in growable mode.
///
/// A set is the key-only configuration of the table: same probing, same
/// tombstones, same load-factor policy, no value surface. As with
/// [`HashMap`](crate::HashMap), inserting a value that is already present is
/// a caller error the set does not detect; check with
/// [`contains`](HashSet::contains) first when values may repeat.
#[derive(Clone)]
pub struct HashSet<T, S> {
    table: HashTable<T>,
    hash_builder: S,
}

impl<T, S> Debug for HashSet<T, S>
where
    T: Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty set with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a set with the given slot capacity and hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates a set with the given slot capacity, maximum load factor, and
    /// hasher builder.
    ///
    /// # Panics
    ///
    /// Panics if `max_load_factor` does not lie in the open interval (0, 1).
    pub fn with_load_factor_and_hasher(
        capacity: usize,
        max_load_factor: f32,
        hash_builder: S,
    ) -> Self {
        Self {
            table: HashTable::with_capacity_and_load_factor(capacity, max_load_factor),
            hash_builder,
        }
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the total slot count of the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all values, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a value, hashing it once.
    ///
    /// The value must not already be present; duplicate inserts are not
    /// detected (see the type-level docs).
    pub fn insert(&mut self, value: T) {
        let hash = self.hash_builder.hash_one(&value);
        self.insert_hashed(value, hash);
    }

    /// Inserts a value under a precomputed hash.
    pub fn insert_hashed(&mut self, value: T, hash: u64) {
        self.table.insert(hash, value);
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.contains_hashed(value, hash)
    }

    /// Returns `true` if the set contains `value`, using a precomputed hash.
    pub fn contains_hashed(&self, value: &T, hash: u64) -> bool {
        self.table.contains(hash, |v| v == value)
    }

    /// Removes `value` from the set. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.remove_hashed(value, hash)
    }

    /// Removes `value` from the set, using a precomputed hash.
    pub fn remove_hashed(&mut self, value: &T, hash: u64) -> bool {
        self.table.remove(hash, |v| v == value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Replaces this set's contents with a copy of `src`'s. Fails with
    /// `false`, leaving `self` untouched, if `src`'s values do not fit under
    /// this set's load-factor threshold.
    pub fn copy_from(&mut self, src: &Self) -> bool
    where
        T: Clone,
    {
        self.table.copy_from(&src.table)
    }

    /// Returns an iterator over the values of the set, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

impl<T, S> HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty set using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a set with the given slot capacity using the default hasher
    /// builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<T, S> Default for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S> PartialEq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|v| other.contains(v))
    }
}

impl<T, S> Eq for HashSet<T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
}

/// A hash set over a caller-supplied slot buffer ([`FixedHashTable`]).
///
/// The buffer stays owned by the caller; the set borrows it for its lifetime
/// and never allocates, frees, or grows.
///
/// ```rust
/// # #[cfg(any(feature = "foldhash", feature = "std"))]
/// # {
/// use flatbelt::DefaultHashBuilder;
/// use flatbelt::FixedHashSet;
/// use flatbelt::hash_table::Slot;
///
/// let mut buffer = [const { Slot::Empty }; 8];
/// let mut set = FixedHashSet::new(&mut buffer, DefaultHashBuilder::default());
///
/// assert!(set.try_insert(3u8).is_ok());
/// assert!(set.contains(&3));
/// # }
/// ```
pub struct FixedHashSet<'a, T, S> {
    table: FixedHashTable<'a, T>,
    hash_builder: S,
}

impl<T, S> Debug for FixedHashSet<'_, T, S>
where
    T: Debug + Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T, S> FixedHashSet<'a, T, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a set over `buffer` with the default maximum load factor of
    /// 0.70. The buffer's slots are reset to `Empty`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    pub fn new(buffer: &'a mut [Slot<T>], hash_builder: S) -> Self {
        Self {
            table: FixedHashTable::new(buffer),
            hash_builder,
        }
    }

    /// Creates a set over `buffer` with an explicit maximum load factor.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty or `max_load_factor` does not lie in the
    /// open interval (0, 1).
    pub fn with_load_factor(
        buffer: &'a mut [Slot<T>],
        max_load_factor: f32,
        hash_builder: S,
    ) -> Self {
        Self {
            table: FixedHashTable::with_load_factor(buffer, max_load_factor),
            hash_builder,
        }
    }

    /// Returns a reference to the set's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of values in the set.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the set contains no values.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the slot count of the borrowed buffer.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all values. The buffer stays borrowed.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a value, or hands it back as `Err` if the insert would push
    /// the set past its load-factor threshold. Nothing is mutated on
    /// failure.
    ///
    /// The value must not already be present; duplicate inserts are not
    /// detected.
    pub fn try_insert(&mut self, value: T) -> Result<(), T> {
        let hash = self.hash_builder.hash_one(&value);
        self.try_insert_hashed(value, hash)
    }

    /// Inserts a value under a precomputed hash.
    pub fn try_insert_hashed(&mut self, value: T, hash: u64) -> Result<(), T> {
        self.table.try_insert(hash, value)
    }

    /// Returns `true` if the set contains `value`.
    pub fn contains(&self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.contains_hashed(value, hash)
    }

    /// Returns `true` if the set contains `value`, using a precomputed hash.
    pub fn contains_hashed(&self, value: &T, hash: u64) -> bool {
        self.table.contains(hash, |v| v == value)
    }

    /// Removes `value` from the set. Returns `true` if it was present.
    pub fn remove(&mut self, value: &T) -> bool {
        let hash = self.hash_builder.hash_one(value);
        self.remove_hashed(value, hash)
    }

    /// Removes `value` from the set, using a precomputed hash.
    pub fn remove_hashed(&mut self, value: &T, hash: u64) -> bool {
        self.table.remove(hash, |v| v == value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let hash = self.hash_builder.hash_one(value);
        self.table.remove(hash, |v| v == value)
    }

    /// Replaces this set's contents with a copy of `src`'s. Fails with
    /// `false`, leaving `self` untouched, if `src`'s values do not fit under
    /// this set's load-factor threshold.
    pub fn copy_from(&mut self, src: &FixedHashSet<'_, T, S>) -> bool
    where
        T: Clone,
    {
        self.table.copy_from(&src.table)
    }

    /// Returns an iterator over the values of the set, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.table.iter(),
        }
    }
}

/// An iterator over the values of a set.
#[derive(Clone)]
pub struct Iter<'a, T> {
    inner: crate::hash_table::Iter<'a, T>,
}

impl<T> Iter<'_, T> {
    /// Rewinds the iterator to the first slot.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }
}
