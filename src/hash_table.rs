use alloc::borrow::ToOwned;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cell::OnceCell;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::hash::Hash;
use core::iter::FusedIterator;
use core::ops::Index;
use core::ops::IndexMut;

use crate::DefaultHashBuilder;
use crate::cursor::Cursor;
use crate::error::Error;

/// A collision chain: every entry whose key hashed to the same bucket index,
/// in storage order.
pub(crate) type Bucket<K, V> = Vec<(K, V)>;

/// Number of buckets in a table created by [`HashTable::new`].
pub const INITIAL_CAPACITY: usize = 16;

/// `len / capacity > 3/4`
#[inline(always)]
fn above_upper_load(len: usize, capacity: usize) -> bool {
    len as u128 * 4 > capacity as u128 * 3
}

/// `len / capacity < 1/4`
#[inline(always)]
fn below_lower_load(len: usize, capacity: usize) -> bool {
    (len as u128 * 4) < capacity as u128
}

/// Halves `capacity` until the load factor is back to at least 1/4, stopping
/// at a single bucket.
fn shrink_target(len: usize, capacity: usize) -> usize {
    let mut capacity = capacity;
    while capacity > 1 && below_lower_load(len, capacity) {
        capacity /= 2;
    }
    capacity
}

fn empty_buckets<K, V>(capacity: usize) -> Vec<Bucket<K, V>> {
    let mut buckets = Vec::with_capacity(capacity);
    buckets.resize_with(capacity, Vec::new);
    buckets
}

/// A hash table that resolves collisions by chaining.
///
/// `HashTable<K, V, S>` owns an array of buckets whose length (the
/// *capacity*) is always a power of two. A key lives in bucket
/// `hash(key) & (capacity - 1)`, appended after the keys that were already
/// there. The table keeps its load factor (`len / capacity`) between 1/4 and
/// 3/4:
///
/// - an insert that pushes the load factor above 3/4 doubles the capacity,
/// - an erase that drops it below 1/4 halves the capacity until the load
///   factor is at least 1/4 again, or the table is down to one bucket.
///
/// Each resize rebuilds the bucket array in one pass, visiting the old
/// buckets in index order. Entries that end up sharing a bucket are stored in
/// the order of that pass, so the order within a bucket is only insertion
/// order since the last resize.
///
/// Unlike `std::collections::HashMap`, [`insert`](Self::insert) never
/// overwrites an existing value.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table = HashTable::new();
/// assert!(table.insert("a", 1));
/// assert!(table.insert("b", 2));
/// assert!(!table.insert("a", 10));
///
/// assert_eq!(table.at(&"a"), Ok(&1));
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.capacity(), 16);
/// assert_eq!(table.load_factor(), 0.125);
/// ```
pub struct HashTable<K, V, S = DefaultHashBuilder> {
    buckets: Vec<Bucket<K, V>>,
    len: usize,
    hash_builder: S,
    /// Value handed out by [`HashTable::get_or_default`] for absent keys.
    fallback: OnceCell<V>,
}

impl<K, V, S> Debug for HashTable<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S> Clone for HashTable<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            buckets: self.buckets.clone(),
            len: self.len,
            hash_builder: self.hash_builder.clone(),
            fallback: OnceCell::new(),
        }
    }
}

impl<K, V, S> PartialEq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        if self.len != other.len {
            return false;
        }
        other.iter().all(|(k, v)| self.get(k) == Some(v))
    }
}

impl<K, V, S> Eq for HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K, V, S> HashTable<K, V, S> {
    /// Returns the number of entries in the table.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of buckets. Always a power of two, at least 1.
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns `len / capacity`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("a", 1);
    /// table.insert("b", 2);
    /// table.insert("c", 3);
    /// assert_eq!(table.load_factor(), 0.1875);
    /// ```
    pub fn load_factor(&self) -> f64 {
        self.len as f64 / self.capacity() as f64
    }

    /// Returns a reference to the table's hasher builder.
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Removes every entry. The capacity is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::with_capacity(64);
    /// table.insert(1, "one");
    /// table.clear();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 64);
    /// ```
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }

    /// Returns a cursor at the first entry, or the end cursor if the table is
    /// empty.
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor::begin(&self.buckets)
    }

    /// Returns the end cursor.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor::end(&self.buckets)
    }

    /// Returns an iterator over `(&K, &V)` pairs in bucket order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, "a");
    /// table.insert(2, "b");
    ///
    /// let mut keys: Vec<i32> = table.iter().map(|(k, _)| *k).collect();
    /// keys.sort();
    /// assert_eq!(keys, [1, 2]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            cursor: self.begin(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over `(&K, &mut V)` pairs in bucket order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            buckets: self.buckets.iter_mut(),
            slots: Default::default(),
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys in bucket order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in bucket order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values in bucket
    /// order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Creates an empty table with [`INITIAL_CAPACITY`] buckets and the given
    /// hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(INITIAL_CAPACITY, hash_builder)
    }

    /// Creates an empty table with at least `capacity` buckets.
    ///
    /// The bucket count is rounded up to a power of two, with a minimum of 1.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        let capacity = capacity.max(1).next_power_of_two();
        Self {
            buckets: empty_buckets(capacity),
            len: 0,
            hash_builder,
            fallback: OnceCell::new(),
        }
    }

    /// Builds a table by pairing up `keys` and `values` position by position.
    ///
    /// When a key occurs more than once, the first occurrence wins and later
    /// ones are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the two sequences have different
    /// lengths. Nothing is inserted in that case.
    pub fn from_keys_values_with_hasher<KI, VI>(
        keys: KI,
        values: VI,
        hash_builder: S,
    ) -> Result<Self, Error>
    where
        KI: IntoIterator<Item = K>,
        KI::IntoIter: ExactSizeIterator,
        VI: IntoIterator<Item = V>,
        VI::IntoIter: ExactSizeIterator,
    {
        let keys = keys.into_iter();
        let values = values.into_iter();
        if keys.len() != values.len() {
            return Err(Error::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }

        let mut table = Self::with_hasher(hash_builder);
        let mut skipped = 0usize;
        for (key, value) in keys.zip(values) {
            if !table.insert(key, value) {
                skipped += 1;
            }
        }
        if skipped > 0 {
            log::trace!("skipped {skipped} duplicate keys while zipping keys and values");
        }

        Ok(table)
    }

    /// Inserts `value` under `key` if the key is absent.
    ///
    /// Returns `false` and leaves the table untouched if the key is already
    /// present. Returns `true` otherwise; the insert may double the capacity.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// assert!(table.insert(37, "a"));
    /// assert!(!table.insert(37, "b"));
    /// assert_eq!(table.get(&37), Some(&"a"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let index = self.home(&key);
        if self.buckets[index].iter().any(|(k, _)| *k == key) {
            return false;
        }
        self.push_new(index, key, value);
        true
    }

    /// Returns `true` if the table holds `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key).is_some()
    }

    /// Returns a reference to the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key)
            .map(|(bucket, slot)| &self.buckets[bucket][slot].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key)
            .map(|(bucket, slot)| &mut self.buckets[bucket][slot].1)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn at<Q>(&self, key: &Q) -> Result<&V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key).ok_or(Error::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Error;
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("hits", 1);
    /// *table.at_mut(&"hits")? += 1;
    /// assert_eq!(table.at(&"hits"), Ok(&2));
    /// assert_eq!(table.at_mut(&"misses"), Err(Error::KeyNotFound));
    /// # Ok::<(), Error>(())
    /// ```
    pub fn at_mut<Q>(&mut self, key: &Q) -> Result<&mut V, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get_mut(key).ok_or(Error::KeyNotFound)
    }

    /// Removes `key` and returns its value.
    ///
    /// Removing an entry may shrink the capacity.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key` and returns the stored key and value.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let (bucket, slot) = self.locate(key)?;
        let entry = self.buckets[bucket].remove(slot);
        self.len -= 1;

        if below_lower_load(self.len, self.capacity()) {
            let target = shrink_target(self.len, self.capacity());
            if target != self.capacity() {
                self.resize(target, None);
            }
        }

        Some(entry)
    }

    /// Removes `key`, returning `true` if it was present.
    ///
    /// Returns `false` and leaves the table untouched if it was not.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert("a", 1);
    /// table.insert("b", 2);
    /// table.insert("c", 3);
    ///
    /// assert!(table.erase(&"a"));
    /// assert!(table.erase(&"b"));
    /// assert!(!table.erase(&"b"));
    ///
    /// assert_eq!(table.capacity(), 4);
    /// assert_eq!(table.at(&"c"), Ok(&3));
    /// ```
    pub fn erase<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).is_some()
    }

    /// Returns the index of the bucket holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn bucket_index<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.locate(key)
            .map(|(bucket, _)| bucket)
            .ok_or(Error::KeyNotFound)
    }

    /// Returns the number of entries sharing a bucket with `key`, `key`
    /// included.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn bucket_size<Q>(&self, key: &Q) -> Result<usize, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(key)?;
        Ok(self.buckets[bucket].len())
    }

    #[inline(always)]
    fn home<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        self.hash_builder.hash_one(key) as usize & (self.capacity() - 1)
    }

    fn locate<Q>(&self, key: &Q) -> Option<(usize, usize)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.home(key);
        self.buckets[bucket]
            .iter()
            .position(|(k, _)| k.borrow() == key)
            .map(|slot| (bucket, slot))
    }

    /// Appends a key known to be absent to bucket `index` and grows the table
    /// if needed. Returns where the entry ended up.
    fn push_new(&mut self, index: usize, key: K, value: V) -> (usize, usize) {
        self.buckets[index].push((key, value));
        self.len += 1;

        let position = (index, self.buckets[index].len() - 1);
        if above_upper_load(self.len, self.capacity()) {
            self.resize(self.capacity() * 2, Some(position))
                .unwrap_or(position)
        } else {
            position
        }
    }

    /// Rebuilds the bucket array with `new_capacity` buckets.
    ///
    /// If `tracked` names an entry of the old layout, its position in the new
    /// layout is returned.
    fn resize(
        &mut self,
        new_capacity: usize,
        tracked: Option<(usize, usize)>,
    ) -> Option<(usize, usize)> {
        debug_assert!(new_capacity.is_power_of_two());
        log::trace!(
            "resizing hash table from {} to {} buckets ({} entries)",
            self.capacity(),
            new_capacity,
            self.len
        );

        let old = core::mem::replace(&mut self.buckets, empty_buckets(new_capacity));
        let mut relocated = None;
        for (old_bucket, entries) in old.into_iter().enumerate() {
            for (old_slot, (key, value)) in entries.into_iter().enumerate() {
                let index = self.home(&key);
                if tracked == Some((old_bucket, old_slot)) {
                    relocated = Some((index, self.buckets[index].len()));
                }
                self.buckets[index].push((key, value));
            }
        }

        relocated
    }
}

impl<K, V, S> HashTable<K, V, S>
where
    K: Hash + Eq,
    V: Default,
    S: BuildHasher,
{
    /// Returns a mutable reference to the value under `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// The insert may grow the table, exactly like [`insert`](Self::insert).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut counts: HashTable<&str, u32> = HashTable::new();
    /// for word in ["a", "b", "a"] {
    ///     *counts.get_or_insert_default(word) += 1;
    /// }
    /// assert_eq!(counts.at(&"a"), Ok(&2));
    /// assert_eq!(counts.at(&"b"), Ok(&1));
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V {
        let index = self.home(&key);
        let (bucket, slot) = match self.buckets[index].iter().position(|(k, _)| *k == key) {
            Some(slot) => (index, slot),
            None => self.push_new(index, key, V::default()),
        };
        &mut self.buckets[bucket][slot].1
    }

    /// Returns a reference to the value under `key`, or to a shared default
    /// value if the key is absent.
    ///
    /// This never inserts: the length and capacity are unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<&str, u32> = HashTable::new();
    /// assert_eq!(table.get_or_default(&"missing"), &0);
    /// assert!(table.is_empty());
    /// ```
    pub fn get_or_default<Q>(&self, key: &Q) -> &V
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.get(key)
            .unwrap_or_else(|| self.fallback.get_or_init(V::default))
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl<K, V> HashTable<K, V, DefaultHashBuilder>
where
    K: Hash + Eq,
{
    /// Creates an empty table with [`INITIAL_CAPACITY`] buckets using
    /// [`DefaultHashBuilder`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<i32, String> = HashTable::new();
    /// assert!(table.is_empty());
    /// assert_eq!(table.capacity(), 16);
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty table with at least `capacity` buckets using the
    /// default hasher builder.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Builds a table by pairing up `keys` and `values` using the default
    /// hasher builder. The first occurrence of a duplicated key wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the two sequences have different
    /// lengths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Error;
    /// use chain_hash::HashTable;
    ///
    /// let table: HashTable<&str, i32> = HashTable::from_keys_values(["x", "x", "y"], [1, 2, 3])?;
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.at(&"x"), Ok(&1));
    ///
    /// let mismatch = HashTable::<&str, i32>::from_keys_values(["x"], [1, 2]);
    /// assert_eq!(mismatch.unwrap_err(), Error::LengthMismatch { keys: 1, values: 2 });
    /// # Ok::<(), Error>(())
    /// ```
    pub fn from_keys_values<KI, VI>(keys: KI, values: VI) -> Result<Self, Error>
    where
        KI: IntoIterator<Item = K>,
        KI::IntoIter: ExactSizeIterator,
        VI: IntoIterator<Item = V>,
        VI::IntoIter: ExactSizeIterator,
    {
        Self::from_keys_values_with_hasher(keys, values, DefaultHashBuilder::default())
    }
}

impl<K, V, S> Default for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashTable<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    /// Collects pairs into a table. The first occurrence of a duplicated key
    /// wins.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::with_hasher(S::default());
        for (key, value) in iter {
            table.insert(key, value);
        }
        table
    }
}

impl<K, Q, V, S> Index<&Q> for HashTable<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: ?Sized + Hash + Eq,
    V: Default,
    S: BuildHasher,
{
    type Output = V;

    /// Same as [`HashTable::get_or_default`]: never inserts.
    fn index(&self, key: &Q) -> &V {
        self.get_or_default(key)
    }
}

impl<K, Q, V, S> IndexMut<&Q> for HashTable<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: ?Sized + Hash + Eq + ToOwned<Owned = K>,
    V: Default,
    S: BuildHasher,
{
    /// Same as [`HashTable::get_or_insert_default`]: inserts `V::default()`
    /// for an absent key.
    fn index_mut(&mut self, key: &Q) -> &mut V {
        self.get_or_insert_default(key.to_owned())
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashTable<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashTable<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashTable<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            buckets: self.buckets.into_iter(),
            slots: Vec::new().into_iter(),
            remaining: self.len,
        }
    }
}

/// Bucket-chain statistics of a [`HashTable`].
#[cfg(feature = "stats")]
#[derive(Debug, Clone, PartialEq)]
pub struct TableStats {
    /// Number of entries.
    pub len: usize,
    /// Number of buckets.
    pub capacity: usize,
    /// `len / capacity`.
    pub load_factor: f64,
    /// Number of buckets holding no entry.
    pub empty_buckets: usize,
    /// Length of the longest bucket chain.
    pub longest_chain: usize,
    /// `chain_histogram[n]` is the number of buckets holding exactly `n`
    /// entries.
    pub chain_histogram: Vec<usize>,
}

#[cfg(feature = "stats")]
impl core::fmt::Display for TableStats {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        const BAR_WIDTH: usize = 40;

        writeln!(
            f,
            "{} entries in {} buckets (load factor {:.4}, {} empty, longest chain {})",
            self.len,
            self.capacity,
            self.load_factor,
            self.empty_buckets,
            self.longest_chain
        )?;

        let max = self.chain_histogram.iter().copied().max().unwrap_or(0);
        for (chain, &count) in self.chain_histogram.iter().enumerate() {
            let width = if max == 0 {
                0
            } else {
                (count * BAR_WIDTH).div_ceil(max)
            };
            writeln!(f, "{chain:>3} | {} ({count})", "█".repeat(width))?;
        }
        Ok(())
    }
}

#[cfg(feature = "stats")]
impl<K, V, S> HashTable<K, V, S> {
    /// Returns bucket-chain statistics for the current layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.insert(1, 1);
    /// let stats = table.stats();
    /// assert_eq!(stats.empty_buckets, 15);
    /// assert_eq!(stats.chain_histogram, [15, 1]);
    /// ```
    pub fn stats(&self) -> TableStats {
        let longest_chain = self.buckets.iter().map(Vec::len).max().unwrap_or(0);
        let mut chain_histogram = alloc::vec![0usize; longest_chain + 1];
        for bucket in &self.buckets {
            chain_histogram[bucket.len()] += 1;
        }

        TableStats {
            len: self.len,
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            empty_buckets: chain_histogram[0],
            longest_chain,
            chain_histogram,
        }
    }
}

/// An iterator over the entries of a [`HashTable`], driven by a [`Cursor`].
///
/// This struct is created by [`HashTable::iter`].
pub struct Iter<'a, K, V> {
    cursor: Cursor<'a, K, V>,
    remaining: usize,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.cursor.get()?;
        self.cursor.advance();
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the entries of a [`HashTable`].
///
/// This struct is created by [`HashTable::iter_mut`].
pub struct IterMut<'a, K, V> {
    buckets: core::slice::IterMut<'a, Bucket<K, V>>,
    slots: core::slice::IterMut<'a, (K, V)>,
    remaining: usize,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((k, v)) = self.slots.next() {
                self.remaining -= 1;
                return Some((&*k, v));
            }
            self.slots = self.buckets.next()?.iter_mut();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An owning iterator over the entries of a [`HashTable`].
pub struct IntoIter<K, V> {
    buckets: alloc::vec::IntoIter<Bucket<K, V>>,
    slots: alloc::vec::IntoIter<(K, V)>,
    remaining: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.slots.next() {
                self.remaining -= 1;
                return Some(entry);
            }
            self.slots = self.buckets.next()?.into_iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// An iterator over the keys of a [`HashTable`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashTable`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashTable`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}
