use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;

use crate::hash_table::FixedHashTable;
use crate::hash_table::HashTable;
use crate::hash_table::Slot;

/// A hash map over the open-addressing [`HashTable`] in growable mode.
///
/// `HashMap<K, V, S>` stores key-value pairs where keys implement
/// `Hash + Eq` and uses a configurable hasher builder `S` to hash keys. The
/// table owns its storage and doubles it whenever the configured maximum
/// load factor would be exceeded, so [`insert`](HashMap::insert) always
/// succeeds.
///
/// Inserting a key that is already present is a caller error the map does
/// not detect: both pairs end up live and lookups return whichever comes
/// first on the probe sequence. Check with
/// [`contains_key`](HashMap::contains_key) first when the key may repeat.
///
/// Every keyed operation has a `*_hashed` twin taking a precomputed hash, so
/// callers doing several operations on one key can pay for hashing once:
///
/// ```rust
/// # #[cfg(any(feature = "foldhash", feature = "std"))]
/// # {
/// use core::hash::BuildHasher;
///
/// use flatbelt::DefaultHashBuilder;
/// use flatbelt::HashMap;
///
/// let mut map: HashMap<u32, &str, DefaultHashBuilder> = HashMap::new();
/// let hash = map.hasher().hash_one(&7u32);
///
/// map.insert_hashed(7, "seven", hash);
/// assert_eq!(map.get_hashed(&7, hash), Some(&"seven"));
/// assert_eq!(map.remove_hashed(&7, hash), Some("seven"));
/// # }
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S> {
    table: HashTable<(K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for HashMap<K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty map with the given hasher builder. The first insert
    /// allocates.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(0, hash_builder)
    }

    /// Creates a map with the given slot capacity and hasher builder.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            hash_builder,
        }
    }

    /// Creates a map with the given slot capacity, maximum load factor, and
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

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no pairs.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the total slot count of the backing table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all pairs, keeping the allocated capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a key-value pair, hashing the key once.
    ///
    /// The key must not already be present; duplicate-key inserts are not
    /// detected (see the type-level docs).
    pub fn insert(&mut self, key: K, value: V) {
        let hash = self.hash_builder.hash_one(&key);
        self.insert_hashed(key, value, hash);
    }

    /// Inserts a key-value pair under a precomputed hash of the key.
    pub fn insert_hashed(&mut self, key: K, value: V, hash: u64) {
        self.table.insert(hash, (key, value));
    }

    /// Returns a reference to the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.get_hashed(key, hash)
    }

    /// Returns a reference to the value for `key`, using a precomputed hash.
    pub fn get_hashed(&self, key: &K, hash: u64) -> Option<&V> {
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.get_mut_hashed(key, hash)
    }

    /// Returns a mutable reference to the value for `key`, using a
    /// precomputed hash.
    pub fn get_mut_hashed(&mut self, key: &K, hash: u64) -> Option<&mut V> {
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.contains_key_hashed(key, hash)
    }

    /// Returns `true` if the map contains `key`, using a precomputed hash.
    pub fn contains_key_hashed(&self, key: &K, hash: u64) -> bool {
        self.table.contains(hash, |(k, _)| k == key)
    }

    /// Removes `key` from the map, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.remove_hashed(key, hash)
    }

    /// Removes `key` from the map, returning its value, using a precomputed
    /// hash.
    pub fn remove_hashed(&mut self, key: &K, hash: u64) -> Option<V> {
        self.table.remove(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key)
    }

    /// Replaces this map's contents with a copy of `src`'s.
    ///
    /// Fails with `false`, leaving `self` untouched, if `src`'s pairs do not
    /// fit under this map's load-factor threshold. Equal capacities copy the
    /// slot array verbatim (iteration order included); unequal capacities
    /// re-probe pair by pair.
    pub fn copy_from(&mut self, src: &Self) -> bool
    where
        K: Clone,
        V: Clone,
    {
        self.table.copy_from(&src.table)
    }

    /// Returns an iterator over `(&K, &V)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Creates an empty map using the default hasher builder.
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates a map with the given slot capacity using the default hasher
    /// builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }
}

impl<K, V, S> Default for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

/// A hash map over a caller-supplied slot buffer ([`FixedHashTable`]).
///
/// The buffer stays owned by the caller (stack storage, an
/// [`Arena`](crate::arena::Arena) block, a `Vec` kept elsewhere); the map
/// borrows it for its lifetime and never allocates, frees, or grows.
/// [`try_insert`](FixedHashMap::try_insert) hands the pair back once the
/// load-factor threshold is reached.
///
/// ```rust
/// # #[cfg(any(feature = "foldhash", feature = "std"))]
/// # {
/// use flatbelt::DefaultHashBuilder;
/// use flatbelt::FixedHashMap;
/// use flatbelt::hash_table::Slot;
///
/// let mut buffer = [const { Slot::Empty }; 16];
/// let mut map = FixedHashMap::new(&mut buffer, DefaultHashBuilder::default());
///
/// assert!(map.try_insert(1u32, "one").is_ok());
/// assert_eq!(map.get(&1), Some(&"one"));
/// # }
/// ```
pub struct FixedHashMap<'a, K, V, S> {
    table: FixedHashTable<'a, (K, V)>,
    hash_builder: S,
}

impl<K, V, S> Debug for FixedHashMap<'_, K, V, S>
where
    K: Debug + Hash + Eq,
    V: Debug,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for (k, v) in self.iter() {
            map.entry(k, v);
        }
        map.finish()
    }
}

impl<'a, K, V, S> FixedHashMap<'a, K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates a map over `buffer` with the default maximum load factor of
    /// 0.70. The buffer's slots are reset to `Empty`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    pub fn new(buffer: &'a mut [Slot<(K, V)>], hash_builder: S) -> Self {
        Self {
            table: FixedHashTable::new(buffer),
            hash_builder,
        }
    }

    /// Creates a map over `buffer` with an explicit maximum load factor.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty or `max_load_factor` does not lie in the
    /// open interval (0, 1).
    pub fn with_load_factor(
        buffer: &'a mut [Slot<(K, V)>],
        max_load_factor: f32,
        hash_builder: S,
    ) -> Self {
        Self {
            table: FixedHashTable::with_load_factor(buffer, max_load_factor),
            hash_builder,
        }
    }

    /// Returns a reference to the map's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the number of key-value pairs in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no pairs.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the slot count of the borrowed buffer.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Removes all pairs. The buffer stays borrowed.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Inserts a key-value pair, or hands it back as `Err` if the insert
    /// would push the map past its load-factor threshold. Nothing is mutated
    /// on failure.
    ///
    /// The key must not already be present; duplicate-key inserts are not
    /// detected.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(), (K, V)> {
        let hash = self.hash_builder.hash_one(&key);
        self.try_insert_hashed(key, value, hash)
    }

    /// Inserts a key-value pair under a precomputed hash of the key.
    pub fn try_insert_hashed(&mut self, key: K, value: V, hash: u64) -> Result<(), (K, V)> {
        self.table.try_insert(hash, (key, value))
    }

    /// Returns a reference to the value for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let hash = self.hash_builder.hash_one(key);
        self.get_hashed(key, hash)
    }

    /// Returns a reference to the value for `key`, using a precomputed hash.
    pub fn get_hashed(&self, key: &K, hash: u64) -> Option<&V> {
        self.table.find(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let hash = self.hash_builder.hash_one(key);
        self.get_mut_hashed(key, hash)
    }

    /// Returns a mutable reference to the value for `key`, using a
    /// precomputed hash.
    pub fn get_mut_hashed(&mut self, key: &K, hash: u64) -> Option<&mut V> {
        self.table.find_mut(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        let hash = self.hash_builder.hash_one(key);
        self.contains_key_hashed(key, hash)
    }

    /// Returns `true` if the map contains `key`, using a precomputed hash.
    pub fn contains_key_hashed(&self, key: &K, hash: u64) -> bool {
        self.table.contains(hash, |(k, _)| k == key)
    }

    /// Removes `key` from the map, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let hash = self.hash_builder.hash_one(key);
        self.remove_hashed(key, hash)
    }

    /// Removes `key` from the map, returning its value, using a precomputed
    /// hash.
    pub fn remove_hashed(&mut self, key: &K, hash: u64) -> Option<V> {
        self.table.remove(hash, |(k, _)| k == key).map(|(_, v)| v)
    }

    /// Removes `key` from the map, returning the stored key and value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(K, V)> {
        let hash = self.hash_builder.hash_one(key);
        self.table.remove(hash, |(k, _)| k == key)
    }

    /// Replaces this map's contents with a copy of `src`'s. Fails with
    /// `false`, leaving `self` untouched, if `src`'s pairs do not fit under
    /// this map's load-factor threshold.
    pub fn copy_from(&mut self, src: &FixedHashMap<'_, K, V, S>) -> bool
    where
        K: Clone,
        V: Clone,
    {
        self.table.copy_from(&src.table)
    }

    /// Returns an iterator over `(&K, &V)` pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the keys of the map.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }
}

/// An iterator over the key-value pairs of a map.
#[derive(Clone)]
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<K, V> Iter<'_, K, V> {
    /// Rewinds the iterator to the first slot.
    pub fn reset(&mut self) {
        self.inner.reset();
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }
}

/// An iterator over the keys of a map.
#[derive(Clone)]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// An iterator over the values of a map.
#[derive(Clone)]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::string::ToString;
    use alloc::vec::Vec;
    use core::hash::BuildHasher;

    use rand::TryRngCore;
    use rand::rngs::OsRng;
    use siphasher::sip::SipHasher;

    use super::*;

    #[derive(Clone)]
    struct SipHashBuilder {
        k1: u64,
        k2: u64,
    }

    impl BuildHasher for SipHashBuilder {
        type Hasher = SipHasher;

        fn build_hasher(&self) -> Self::Hasher {
            SipHasher::new_with_keys(self.k1, self.k2)
        }
    }

    impl Default for SipHashBuilder {
        fn default() -> Self {
            let mut rng = OsRng;
            Self {
                k1: rng.try_next_u64().unwrap_or(0),
                k2: rng.try_next_u64().unwrap_or(0),
            }
        }
    }

    #[test]
    fn test_new_and_with_hasher() {
        let map: HashMap<i32, String, SipHashBuilder> = HashMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);

        let map2 = HashMap::<i32, String, _>::with_hasher(SipHashBuilder::default());
        assert!(map2.is_empty());
    }

    #[test]
    fn test_insert_and_get() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        map.insert(1, "hello".to_string());
        assert_eq!(map.len(), 1);
        assert!(!map.is_empty());

        assert_eq!(map.get(&1), Some(&"hello".to_string()));
        assert_eq!(map.get(&2), None);
    }

    #[test]
    fn test_get_mut() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());

        if let Some(value) = map.get_mut(&1) {
            value.push_str(" world");
        }

        assert_eq!(map.get(&1), Some(&"hello world".to_string()));
        assert_eq!(map.get_mut(&2), None);
    }

    #[test]
    fn test_contains_key() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        assert!(!map.contains_key(&1));

        map.insert(1, "value".to_string());
        assert!(map.contains_key(&1));
        assert!(!map.contains_key(&2));
    }

    #[test]
    fn test_remove_and_reinsert() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());
        map.insert(2, "world".to_string());

        assert_eq!(map.remove(&1), Some("hello".to_string()));
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&1));
        assert!(map.contains_key(&2));

        assert_eq!(map.remove(&1), None);
        assert_eq!(map.remove(&3), None);

        // Insert-remove-insert round-trip: the new value wins.
        map.insert(1, "again".to_string());
        assert_eq!(map.get(&1), Some(&"again".to_string()));
    }

    #[test]
    fn test_remove_entry() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());

        assert_eq!(map.remove_entry(&1), Some((1, "hello".to_string())));
        assert_eq!(map.len(), 0);
        assert_eq!(map.remove_entry(&1), None);
    }

    #[test]
    fn test_hashed_variants_match_default_ones() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        let hash = map.hasher().hash_one(&42);

        map.insert_hashed(42, "answer", hash);
        assert!(map.contains_key_hashed(&42, hash));
        assert!(map.contains_key(&42));
        assert_eq!(map.get_hashed(&42, hash), Some(&"answer"));
        assert_eq!(map.get(&42), Some(&"answer"));

        if let Some(v) = map.get_mut_hashed(&42, hash) {
            *v = "changed";
        }
        assert_eq!(map.remove_hashed(&42, hash), Some("changed"));
        assert!(!map.contains_key(&42));
    }

    #[test]
    fn test_duplicate_insert_is_caller_responsibility() {
        // Inserting an existing key is documented as a precondition
        // violation; the observable outcome is two live pairs, not an
        // overwrite.
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "first");
        map.insert(1, "second");

        assert_eq!(map.len(), 2);
        assert_eq!(map.keys().filter(|k| **k == 1).count(), 2);
    }

    #[test]
    fn test_clear() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "hello".to_string());
        map.insert(2, "world".to_string());

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert!(!map.contains_key(&1));

        map.clear();
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn test_growth_preserves_entries() {
        let mut map = HashMap::with_capacity_and_hasher(16, SipHashBuilder::default());

        for i in 0..1000 {
            map.insert(i, i * 2);
        }
        assert_eq!(map.len(), 1000);

        for i in 0..1000 {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }

        for i in (0..1000).step_by(2) {
            assert_eq!(map.remove(&i), Some(i * 2));
        }
        assert_eq!(map.len(), 500);

        for i in (1..1000).step_by(2) {
            assert_eq!(map.get(&i), Some(&(i * 2)));
        }
    }

    #[test]
    fn test_copy_from() {
        let mut src = HashMap::with_capacity_and_hasher(32, SipHashBuilder::default());
        for i in 0..10 {
            src.insert(i, i * 10);
        }

        let mut same = HashMap::with_capacity_and_hasher(32, SipHashBuilder::default());
        assert!(same.copy_from(&src));
        let src_pairs: Vec<(i32, i32)> = src.iter().map(|(k, v)| (*k, *v)).collect();
        let same_pairs: Vec<(i32, i32)> = same.iter().map(|(k, v)| (*k, *v)).collect();
        assert_eq!(src_pairs, same_pairs);

        let mut bigger = HashMap::with_capacity_and_hasher(64, SipHashBuilder::default());
        assert!(bigger.copy_from(&src));
        assert_eq!(bigger.len(), 10);
        for i in 0..10 {
            assert_eq!(bigger.get(&i), Some(&(i * 10)));
        }

        let mut tiny =
            HashMap::with_load_factor_and_hasher(8, 0.5, SipHashBuilder::default());
        assert!(!tiny.copy_from(&src));
        assert!(tiny.is_empty());
    }

    #[test]
    fn test_iterators() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());
        map.insert(1, "one".to_string());
        map.insert(2, "two".to_string());
        map.insert(3, "three".to_string());

        let pairs: std::collections::HashMap<i32, String> =
            map.iter().map(|(k, v)| (*k, v.clone())).collect();
        assert_eq!(pairs.len(), 3);
        assert_eq!(pairs.get(&1), Some(&"one".to_string()));
        assert_eq!(pairs.get(&3), Some(&"three".to_string()));

        let keys: std::collections::HashSet<i32> = map.keys().copied().collect();
        assert_eq!(keys.len(), 3);

        let values: std::collections::HashSet<String> = map.values().cloned().collect();
        assert!(values.contains("two"));

        let mut iter = map.iter();
        assert_eq!(iter.by_ref().count(), 3);
        iter.reset();
        assert_eq!(iter.count(), 3);
    }

    #[test]
    fn test_string_keys() {
        let mut map = HashMap::with_hasher(SipHashBuilder::default());

        map.insert("hello".to_string(), 1);
        map.insert("world".to_string(), 2);

        assert_eq!(map.get(&"hello".to_string()), Some(&1));
        assert_eq!(map.get(&"world".to_string()), Some(&2));
        assert_eq!(map.get(&"missing".to_string()), None);
    }

    #[test]
    fn fixed_map_basics() {
        let mut buffer: Vec<Slot<(i32, String)>> = (0..16).map(|_| Slot::Empty).collect();
        let mut map = FixedHashMap::new(&mut buffer, SipHashBuilder::default());

        assert!(map.try_insert(1, "one".to_string()).is_ok());
        assert!(map.try_insert(2, "two".to_string()).is_ok());
        assert_eq!(map.len(), 2);
        assert_eq!(map.capacity(), 16);

        assert_eq!(map.get(&1), Some(&"one".to_string()));
        if let Some(v) = map.get_mut(&2) {
            v.push_str("!");
        }
        assert_eq!(map.get(&2), Some(&"two!".to_string()));

        assert_eq!(map.remove(&1), Some("one".to_string()));
        assert!(!map.contains_key(&1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn fixed_map_rejects_past_load_factor() {
        // Capacity 16 at load factor 0.5: the 9th distinct key must bounce.
        let mut buffer: Vec<Slot<(u32, u32)>> = (0..16).map(|_| Slot::Empty).collect();
        let mut map = FixedHashMap::with_load_factor(&mut buffer, 0.5, SipHashBuilder::default());

        for k in 0..8u32 {
            assert!(map.try_insert(k, k).is_ok());
        }
        assert_eq!(map.try_insert(8, 8), Err((8, 8)));
        assert_eq!(map.len(), 8);

        // Freeing a slot makes room again.
        assert_eq!(map.remove(&0), Some(0));
        assert!(map.try_insert(8, 8).is_ok());
        assert_eq!(map.get(&8), Some(&8));
    }

    #[test]
    fn fixed_map_hashed_variants() {
        let mut buffer: Vec<Slot<(u64, u64)>> = (0..32).map(|_| Slot::Empty).collect();
        let mut map = FixedHashMap::new(&mut buffer, SipHashBuilder::default());
        let hash = map.hasher().hash_one(&5u64);

        assert!(map.try_insert_hashed(5, 50, hash).is_ok());
        assert!(map.contains_key_hashed(&5, hash));
        assert_eq!(map.get_hashed(&5, hash), Some(&50));
        if let Some(v) = map.get_mut_hashed(&5, hash) {
            *v = 55;
        }
        assert_eq!(map.remove_hashed(&5, hash), Some(55));
        assert!(map.is_empty());
    }

    #[test]
    fn fixed_map_copy_from() {
        let hasher = SipHashBuilder::default();
        let mut src_buffer: Vec<Slot<(u32, u32)>> = (0..16).map(|_| Slot::Empty).collect();
        let mut src = FixedHashMap::new(&mut src_buffer, hasher.clone());
        for k in 0..6u32 {
            src.try_insert(k, k * 100).unwrap();
        }

        let mut dest_buffer: Vec<Slot<(u32, u32)>> = (0..32).map(|_| Slot::Empty).collect();
        let mut dest = FixedHashMap::new(&mut dest_buffer, hasher.clone());
        assert!(dest.copy_from(&src));
        assert_eq!(dest.len(), 6);
        for k in 0..6u32 {
            assert_eq!(dest.get(&k), Some(&(k * 100)));
        }

        let mut tiny_buffer: Vec<Slot<(u32, u32)>> = (0..4).map(|_| Slot::Empty).collect();
        let mut tiny = FixedHashMap::new(&mut tiny_buffer, hasher);
        assert!(!tiny.copy_from(&src));
    }

    #[test]
    fn test_default_trait() {
        let map: HashMap<i32, String, SipHashBuilder> = HashMap::default();
        assert!(map.is_empty());
    }
}
