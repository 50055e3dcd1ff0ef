use alloc::boxed::Box;
use core::fmt::Debug;
use core::mem;

/// Default maximum load factor used by all constructors that do not take an
/// explicit one.
pub const DEFAULT_MAX_LOAD_FACTOR: f32 = 0.70;

/// Capacity of the first allocation when a table created with capacity 0
/// receives its first insert.
const MIN_GROW_CAPACITY: usize = 8;

/// A single slot of the backing array.
///
/// Each slot is in exactly one of three states. `Deleted` is a tombstone: a
/// slot that used to hold an entry and must stay visible to probe sequences,
/// because entries inserted while it was still occupied may live past it.
/// A tombstone only becomes `Empty` again through [`HashTable::clear`] /
/// [`FixedHashTable::clear`] or a capacity rebuild.
///
/// The enum is public so that callers of the fixed-capacity tables can supply
/// their own slot buffers:
///
/// ```rust
/// use flatbelt::hash_table::{FixedHashTable, Slot};
///
/// let mut buffer = [const { Slot::Empty }; 16];
/// let mut table: FixedHashTable<'_, u64> = FixedHashTable::new(&mut buffer);
/// assert_eq!(table.capacity(), 16);
/// ```
#[derive(Clone, Debug)]
pub enum Slot<T> {
    /// The slot has never held an entry since the last clear or rebuild.
    /// Probe sequences terminate here.
    Empty,
    /// The slot holds a live entry together with the full hash it was
    /// inserted under. Caching the hash lets growth and copying rebuild the
    /// table without re-invoking the caller's hash function.
    Occupied {
        /// Hash the entry was inserted under.
        hash: u64,
        /// The entry itself.
        entry: T,
    },
    /// Tombstone left behind by a removal. Probe sequences skip it;
    /// insertions may reuse it.
    Deleted,
}

impl<T> Slot<T> {
    /// Returns `true` if the slot holds a live entry.
    #[inline(always)]
    pub fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }
}

#[inline(always)]
fn probe_start(hash: u64, capacity: usize) -> usize {
    if capacity.is_power_of_two() {
        // Masking instead of modulo. Growth doubles, so a table that starts
        // at a power-of-two capacity stays on this path for its lifetime.
        hash as usize & (capacity - 1)
    } else {
        (hash % capacity as u64) as usize
    }
}

#[inline(always)]
fn probe_next(i: usize, capacity: usize) -> usize {
    if i + 1 == capacity { 0 } else { i + 1 }
}

/// Walks the probe sequence for `hash` looking for a live entry matching
/// `eq`. Stops at the first `Empty` slot, or after a full cycle back to the
/// start (the slots may be entirely occupied slots and tombstones).
fn find_entry<T>(slots: &[Slot<T>], hash: u64, eq: impl Fn(&T) -> bool) -> Option<usize> {
    let capacity = slots.len();
    let start = probe_start(hash, capacity);
    let mut i = start;
    loop {
        match &slots[i] {
            Slot::Empty => return None,
            Slot::Occupied { entry, .. } if eq(entry) => return Some(i),
            _ => {
                // Occupied by someone else, or a tombstone. A tombstone does
                // not end the search: the entry may have been inserted past
                // this slot before it was deleted.
                i = probe_next(i, capacity);
                if i == start {
                    return None;
                }
            }
        }
    }
}

/// Returns the first `Empty` or `Deleted` slot on the probe sequence for
/// `hash`. Callers must hold the live count strictly below the load-factor
/// threshold, which guarantees at least one such slot exists and the loop
/// terminates without a cycle check.
fn find_insert_slot<T>(slots: &[Slot<T>], hash: u64) -> usize {
    let capacity = slots.len();
    let mut i = probe_start(hash, capacity);
    loop {
        match slots[i] {
            Slot::Occupied { .. } => i = probe_next(i, capacity),
            _ => return i,
        }
    }
}

#[inline(always)]
fn over_threshold(len: usize, capacity: usize, max_load_factor: f32) -> bool {
    len as f32 > capacity as f32 * max_load_factor
}

#[inline(always)]
fn assert_load_factor(max_load_factor: f32) {
    assert!(
        max_load_factor > 0.0 && max_load_factor < 1.0,
        "max load factor must lie in the open interval (0, 1), got {max_load_factor}"
    );
}

fn empty_slots<T>(capacity: usize) -> Box<[Slot<T>]> {
    (0..capacity).map(|_| Slot::Empty).collect()
}

/// An open-addressing hash table that owns and grows its backing storage.
///
/// `HashTable<T>` stores entries of type `T` and resolves collisions by
/// linear probing over a single flat slot array, with tombstone-based
/// deletion. Like the table in `hashbrown`, it does not hash entries itself:
/// every operation takes the entry's hash plus an equality predicate, which
/// is what lets one table type serve maps, sets, and anything in between.
///
/// Insertion never fails. When one more entry would push the live count past
/// `capacity * max_load_factor`, the table doubles its capacity and rehashes
/// every live entry, discarding accumulated tombstones. Capacity never
/// shrinks.
///
/// The table never checks whether an equal entry is already present.
/// Inserting a duplicate leaves two live entries; callers that need
/// upsert semantics must probe with [`find`](HashTable::find) or
/// [`contains`](HashTable::contains) first.
///
/// # Example
///
/// ```rust
/// use flatbelt::hash_table::HashTable;
///
/// let mut table: HashTable<(u64, &str)> = HashTable::with_capacity(16);
/// table.insert(7, (7, "seven"));
/// table.insert(9, (9, "nine"));
///
/// assert_eq!(table.find(7, |(k, _)| *k == 7), Some(&(7, "seven")));
/// assert_eq!(table.remove(9, |(k, _)| *k == 9), Some((9, "nine")));
/// assert_eq!(table.len(), 1);
/// ```
#[derive(Clone)]
pub struct HashTable<T> {
    slots: Box<[Slot<T>]>,
    len: usize,
    max_load_factor: f32,
}

impl<T: Debug> Debug for HashTable<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> HashTable<T> {
    /// Creates a table with the given initial capacity and the default
    /// maximum load factor of 0.70.
    ///
    /// A capacity of 0 allocates nothing; the first insert grows the table.
    /// Power-of-two capacities probe with a bitmask instead of a modulo and
    /// stay power-of-two across growth.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Creates a table with the given initial capacity and maximum load
    /// factor.
    ///
    /// # Panics
    ///
    /// Panics if `max_load_factor` does not lie in the open interval (0, 1).
    pub fn with_capacity_and_load_factor(capacity: usize, max_load_factor: f32) -> Self {
        assert_load_factor(max_load_factor);
        Self {
            slots: empty_slots(capacity),
            len: 0,
            max_load_factor,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the total slot count. The table grows once the live count
    /// would exceed `capacity() * max_load_factor()`.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the configured maximum load factor.
    #[inline]
    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Returns a reference to the entry with the given hash matching `eq`.
    pub fn find(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let i = find_entry(&self.slots, hash, eq)?;
        match &self.slots[i] {
            Slot::Occupied { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Returns a mutable reference to the entry with the given hash matching
    /// `eq`.
    ///
    /// The parts of the entry that determine its hash and equality must not
    /// be modified through the returned reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        let i = find_entry(&self.slots, hash, eq)?;
        match &mut self.slots[i] {
            Slot::Occupied { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Returns `true` if an entry with the given hash matches `eq`.
    pub fn contains(&self, hash: u64, eq: impl Fn(&T) -> bool) -> bool {
        self.len != 0 && find_entry(&self.slots, hash, eq).is_some()
    }

    /// Inserts an entry under the given hash, growing the table first if the
    /// insert would exceed the load-factor threshold.
    ///
    /// The table must not already contain an entry equal to this one;
    /// duplicate inserts are not detected and leave both entries live.
    pub fn insert(&mut self, hash: u64, entry: T) {
        self.ensure_capacity();
        let i = find_insert_slot(&self.slots, hash);
        self.slots[i] = Slot::Occupied { hash, entry };
        self.len += 1;
    }

    /// Removes and returns the entry with the given hash matching `eq`,
    /// leaving a tombstone in its slot.
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let i = find_entry(&self.slots, hash, eq)?;
        match mem::replace(&mut self.slots[i], Slot::Deleted) {
            Slot::Occupied { entry, .. } => {
                self.len -= 1;
                Some(entry)
            }
            _ => None,
        }
    }

    /// Resets every slot to `Empty` (tombstones included) and the live count
    /// to 0, in O(capacity). The backing storage is kept.
    pub fn clear(&mut self) {
        self.len = 0;
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
    }

    /// Replaces this table's contents with a copy of `src`'s.
    ///
    /// Fails with `false`, leaving `self` untouched, if `src`'s live count
    /// does not fit under this table's load-factor threshold. When the two
    /// capacities are equal the slot array is cloned verbatim, tombstones
    /// and iteration order included; otherwise the entries are re-probed
    /// into this table's geometry one by one, compacting tombstones away.
    pub fn copy_from(&mut self, src: &HashTable<T>) -> bool
    where
        T: Clone,
    {
        if self.capacity() as f32 * self.max_load_factor <= src.len as f32 {
            return false;
        }

        if self.capacity() == src.capacity() {
            self.slots = src.slots.clone();
        } else {
            self.clear();
            for slot in src.slots.iter() {
                if let Slot::Occupied { hash, entry } = slot {
                    let i = find_insert_slot(&self.slots, *hash);
                    self.slots[i] = Slot::Occupied {
                        hash: *hash,
                        entry: entry.clone(),
                    };
                }
            }
        }
        self.len = src.len;
        true
    }

    /// Returns a cursor over the live entries, in slot order.
    ///
    /// The cursor walks the full slot range and skips everything that is not
    /// occupied; no per-entry chain of live indices is maintained, since
    /// inserts are assumed more frequent than full traversals.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            index: 0,
        }
    }

    fn ensure_capacity(&mut self) {
        if over_threshold(self.len + 1, self.capacity(), self.max_load_factor) {
            let new_capacity = if self.capacity() == 0 {
                MIN_GROW_CAPACITY
            } else {
                self.capacity() * 2
            };
            self.adjust_capacity(new_capacity);
        }
    }

    /// Rebuilds the table at `new_capacity`, re-probing every live entry
    /// with its cached hash. Tombstones are discarded; this is the only
    /// point at which tombstone debt is paid off.
    fn adjust_capacity(&mut self, new_capacity: usize) {
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity));
        for slot in old.into_vec() {
            if let Slot::Occupied { hash, entry } = slot {
                let i = find_insert_slot(&self.slots, hash);
                self.slots[i] = Slot::Occupied { hash, entry };
            }
        }
    }
}

impl<'a, T> IntoIterator for &'a HashTable<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An open-addressing hash table over a caller-supplied slot buffer.
///
/// `FixedHashTable<'a, T>` borrows its backing storage for its lifetime and
/// never allocates or frees: the buffer stays owned by the caller and can
/// come from the stack, an [`Arena`](crate::arena::Arena), or anywhere else.
/// The capacity is the buffer's length and never changes; once the live
/// count reaches `capacity * max_load_factor`,
/// [`try_insert`](FixedHashTable::try_insert) hands the entry back instead
/// of inserting.
///
/// Probing, tombstones, and the duplicate-insert precondition are identical
/// to [`HashTable`].
///
/// # Example
///
/// ```rust
/// use flatbelt::hash_table::{FixedHashTable, Slot};
///
/// let mut buffer = [const { Slot::Empty }; 8];
/// let mut table = FixedHashTable::new(&mut buffer);
///
/// assert!(table.try_insert(3, 30u32).is_ok());
/// assert_eq!(table.find(3, |v| *v == 30), Some(&30));
/// ```
pub struct FixedHashTable<'a, T> {
    slots: &'a mut [Slot<T>],
    len: usize,
    max_load_factor: f32,
}

impl<T: Debug> Debug for FixedHashTable<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<'a, T> FixedHashTable<'a, T> {
    /// Creates a table over `buffer` with the default maximum load factor of
    /// 0.70. Every slot in the buffer is reset to `Empty`.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty.
    pub fn new(buffer: &'a mut [Slot<T>]) -> Self {
        Self::with_load_factor(buffer, DEFAULT_MAX_LOAD_FACTOR)
    }

    /// Creates a table over `buffer` with an explicit maximum load factor.
    ///
    /// # Panics
    ///
    /// Panics if `buffer` is empty or `max_load_factor` does not lie in the
    /// open interval (0, 1).
    pub fn with_load_factor(buffer: &'a mut [Slot<T>], max_load_factor: f32) -> Self {
        assert!(!buffer.is_empty(), "fixed table capacity must be positive");
        assert_load_factor(max_load_factor);
        for slot in buffer.iter_mut() {
            *slot = Slot::Empty;
        }
        Self {
            slots: buffer,
            len: 0,
            max_load_factor,
        }
    }

    /// Returns the number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no live entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the slot count of the borrowed buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the configured maximum load factor.
    #[inline]
    pub fn max_load_factor(&self) -> f32 {
        self.max_load_factor
    }

    /// Returns a reference to the entry with the given hash matching `eq`.
    pub fn find(&self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&T> {
        if self.len == 0 {
            return None;
        }
        let i = find_entry(&*self.slots, hash, eq)?;
        match &self.slots[i] {
            Slot::Occupied { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Returns a mutable reference to the entry with the given hash matching
    /// `eq`.
    ///
    /// The parts of the entry that determine its hash and equality must not
    /// be modified through the returned reference.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<&mut T> {
        if self.len == 0 {
            return None;
        }
        let i = find_entry(&*self.slots, hash, eq)?;
        match &mut self.slots[i] {
            Slot::Occupied { entry, .. } => Some(entry),
            _ => None,
        }
    }

    /// Returns `true` if an entry with the given hash matches `eq`.
    pub fn contains(&self, hash: u64, eq: impl Fn(&T) -> bool) -> bool {
        self.len != 0 && find_entry(&*self.slots, hash, eq).is_some()
    }

    /// Inserts an entry under the given hash, or hands it back as `Err` if
    /// the insert would push the live count past the load-factor threshold.
    /// Nothing is mutated on failure.
    ///
    /// The table must not already contain an entry equal to this one;
    /// duplicate inserts are not detected and leave both entries live.
    pub fn try_insert(&mut self, hash: u64, entry: T) -> Result<(), T> {
        if over_threshold(self.len + 1, self.slots.len(), self.max_load_factor) {
            return Err(entry);
        }
        let i = find_insert_slot(&*self.slots, hash);
        self.slots[i] = Slot::Occupied { hash, entry };
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the entry with the given hash matching `eq`,
    /// leaving a tombstone in its slot.
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&T) -> bool) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        let i = find_entry(&*self.slots, hash, eq)?;
        match mem::replace(&mut self.slots[i], Slot::Deleted) {
            Slot::Occupied { entry, .. } => {
                self.len -= 1;
                Some(entry)
            }
            _ => None,
        }
    }

    /// Resets every slot to `Empty` (tombstones included) and the live count
    /// to 0, in O(capacity).
    pub fn clear(&mut self) {
        self.len = 0;
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
    }

    /// Replaces this table's contents with a copy of `src`'s.
    ///
    /// Fails with `false`, leaving `self` untouched, if `src`'s live count
    /// does not fit under this table's load-factor threshold. Equal
    /// capacities are copied slot for slot, tombstones included; unequal
    /// ones are cleared and re-probed entry by entry.
    pub fn copy_from(&mut self, src: &FixedHashTable<'_, T>) -> bool
    where
        T: Clone,
    {
        if self.capacity() as f32 * self.max_load_factor <= src.len as f32 {
            return false;
        }

        if self.capacity() == src.capacity() {
            self.slots.clone_from_slice(&*src.slots);
        } else {
            self.clear();
            for slot in src.slots.iter() {
                if let Slot::Occupied { hash, entry } = slot {
                    let i = find_insert_slot(&*self.slots, *hash);
                    self.slots[i] = Slot::Occupied {
                        hash: *hash,
                        entry: entry.clone(),
                    };
                }
            }
        }
        self.len = src.len;
        true
    }

    /// Returns a cursor over the live entries, in slot order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &*self.slots,
            index: 0,
        }
    }
}

impl<'a, 'b, T> IntoIterator for &'b FixedHashTable<'a, T> {
    type Item = &'b T;
    type IntoIter = Iter<'b, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A cursor over the live entries of a table.
///
/// Walks the full slot range, yielding occupied entries in slot order. The
/// cursor can be rewound with [`reset`](Iter::reset); dropping and
/// re-creating it is equivalent. Structural mutation of the table while the
/// cursor is alive is rejected by the borrow checker.
#[derive(Clone)]
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    index: usize,
}

impl<T> Iter<'_, T> {
    /// Rewinds the cursor to the first slot.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.slots.len() {
            let i = self.index;
            self.index += 1;
            if let Slot::Occupied { entry, .. } = &self.slots[i] {
                return Some(entry);
            }
        }
        None
    }
}
