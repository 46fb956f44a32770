use alloc::borrow::ToOwned;
use alloc::string::String;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::ops::Index;
use core::ops::IndexMut;

use crate::DefaultHashBuilder;
use crate::cursor::Cursor;
use crate::error::Error;
use crate::hash_table::HashTable;
use crate::hash_table::Iter;
use crate::hash_table::Keys;
use crate::hash_table::Values;

/// A string-to-string map backed by a [`HashTable`].
///
/// `Dictionary` behaves like `HashTable<String, String, S>` with two
/// differences:
///
/// - [`erase`](Self::erase) reports an absent key as [`Error::InvalidKey`]
///   instead of returning `false`,
/// - [`update`](Self::update) upserts a whole sequence of pairs, overwriting
///   the values of keys that are already present.
///
/// # Examples
///
/// ```rust
/// use chain_hash::Dictionary;
/// use chain_hash::Error;
///
/// let mut dict = Dictionary::new();
/// dict.insert("k1", "v1");
///
/// dict.update([("k1", "v2"), ("k2", "v3")]);
/// assert_eq!(dict.at("k1").map(String::as_str), Ok("v2"));
/// assert_eq!(dict.at("k2").map(String::as_str), Ok("v3"));
///
/// assert_eq!(
///     dict.erase("missing"),
///     Err(Error::InvalidKey { key: "missing".to_string() })
/// );
/// assert_eq!(dict.erase("k1"), Ok(true));
/// ```
#[derive(Clone)]
pub struct Dictionary<S = DefaultHashBuilder> {
    table: HashTable<String, String, S>,
}

impl<S> Debug for Dictionary<S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.table.iter()).finish()
    }
}

impl<S> PartialEq for Dictionary<S>
where
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.table == other.table
    }
}

impl<S> Eq for Dictionary<S> where S: BuildHasher {}

impl<S> Dictionary<S> {
    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the dictionary holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of buckets of the underlying table.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `len / capacity`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Removes every entry, keeping the capacity.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns a cursor at the first entry.
    pub fn begin(&self) -> Cursor<'_, String, String> {
        self.table.begin()
    }

    /// Returns the end cursor.
    pub fn end(&self) -> Cursor<'_, String, String> {
        self.table.end()
    }

    /// Returns an iterator over the entries in bucket order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.table.iter()
    }

    /// Returns an iterator over the keys in bucket order.
    pub fn keys(&self) -> Keys<'_, String, String> {
        self.table.keys()
    }

    /// Returns an iterator over the values in bucket order.
    pub fn values(&self) -> Values<'_, String, String> {
        self.table.values()
    }

    /// Returns the underlying table.
    pub fn as_table(&self) -> &HashTable<String, String, S> {
        &self.table
    }

    /// Consumes the dictionary, returning the underlying table.
    pub fn into_inner(self) -> HashTable<String, String, S> {
        self.table
    }
}

impl<S> Dictionary<S>
where
    S: BuildHasher,
{
    /// Creates an empty dictionary with the given hasher builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self {
            table: HashTable::with_hasher(hash_builder),
        }
    }

    /// Creates an empty dictionary with at least `capacity` buckets.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        Self {
            table: HashTable::with_capacity_and_hasher(capacity, hash_builder),
        }
    }

    /// Builds a dictionary by pairing up `keys` and `values`. The first
    /// occurrence of a duplicated key wins.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the two sequences have different
    /// lengths.
    pub fn from_keys_values_with_hasher<KI, VI>(
        keys: KI,
        values: VI,
        hash_builder: S,
    ) -> Result<Self, Error>
    where
        KI: IntoIterator<Item = String>,
        KI::IntoIter: ExactSizeIterator,
        VI: IntoIterator<Item = String>,
        VI::IntoIter: ExactSizeIterator,
    {
        HashTable::from_keys_values_with_hasher(keys, values, hash_builder).map(Self::from)
    }

    /// Inserts `value` under `key` if the key is absent. Returns `false`
    /// without overwriting if the key is present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.table.insert(key.into(), value.into())
    }

    /// Returns `true` if the dictionary holds `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.table.contains_key(key)
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&String> {
        self.table.get(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    pub fn get_mut(&mut self, key: &str) -> Option<&mut String> {
        self.table.get_mut(key)
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn at(&self, key: &str) -> Result<&String, Error> {
        self.table.at(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn at_mut(&mut self, key: &str) -> Result<&mut String, Error> {
        self.table.at_mut(key)
    }

    /// Returns the value under `key`, inserting an empty string first if the
    /// key is absent.
    pub fn get_or_insert_default(&mut self, key: impl Into<String>) -> &mut String {
        self.table.get_or_insert_default(key.into())
    }

    /// Returns the value under `key`, or an empty string if the key is
    /// absent. Never inserts.
    pub fn get_or_default(&self, key: &str) -> &String {
        self.table.get_or_default(key)
    }

    /// Removes `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if the key is absent; the dictionary is
    /// left untouched.
    pub fn erase(&mut self, key: &str) -> Result<bool, Error> {
        if self.table.erase(key) {
            Ok(true)
        } else {
            Err(Error::InvalidKey {
                key: key.to_owned(),
            })
        }
    }

    /// Removes `key` and returns its value, or `None` if it was absent.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.table.remove(key)
    }

    /// Returns the index of the bucket holding `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn bucket_index(&self, key: &str) -> Result<usize, Error> {
        self.table.bucket_index(key)
    }

    /// Returns the number of entries sharing a bucket with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if the key is absent.
    pub fn bucket_size(&self, key: &str) -> Result<usize, Error> {
        self.table.bucket_size(key)
    }

    /// Upserts every `(key, value)` pair of `pairs`, in order.
    ///
    /// Present keys get their value overwritten, absent keys are inserted.
    /// When a key repeats within `pairs`, its last value wins. Any sequence
    /// of string-like pairs works, including another table's
    /// [`iter`](HashTable::iter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chain_hash::Dictionary;
    /// use chain_hash::HashTable;
    ///
    /// let mut source: HashTable<String, String> = HashTable::new();
    /// source.insert("lang".to_string(), "rust".to_string());
    ///
    /// let mut dict = Dictionary::new();
    /// dict.insert("lang", "c++");
    /// dict.update(source.iter());
    /// assert_eq!(dict.get("lang").map(String::as_str), Some("rust"));
    /// ```
    pub fn update<I, Key, Value>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (Key, Value)>,
        Key: Into<String>,
        Value: Into<String>,
    {
        for (key, value) in pairs {
            *self.table.get_or_insert_default(key.into()) = value.into();
        }
    }
}

#[cfg(any(feature = "foldhash", feature = "std"))]
impl Dictionary<DefaultHashBuilder> {
    /// Creates an empty dictionary using [`DefaultHashBuilder`].
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty dictionary with at least `capacity` buckets using
    /// [`DefaultHashBuilder`].
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, DefaultHashBuilder::default())
    }

    /// Builds a dictionary by pairing up `keys` and `values` using
    /// [`DefaultHashBuilder`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if the two sequences have different
    /// lengths.
    pub fn from_keys_values<KI, VI>(keys: KI, values: VI) -> Result<Self, Error>
    where
        KI: IntoIterator<Item = String>,
        KI::IntoIter: ExactSizeIterator,
        VI: IntoIterator<Item = String>,
        VI::IntoIter: ExactSizeIterator,
    {
        Self::from_keys_values_with_hasher(keys, values, DefaultHashBuilder::default())
    }
}

impl<S> Default for Dictionary<S>
where
    S: BuildHasher + Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<S> From<HashTable<String, String, S>> for Dictionary<S> {
    fn from(table: HashTable<String, String, S>) -> Self {
        Self { table }
    }
}

impl<S, Key, Value> Extend<(Key, Value)> for Dictionary<S>
where
    S: BuildHasher,
    Key: Into<String>,
    Value: Into<String>,
{
    /// Same as [`Dictionary::update`].
    fn extend<I: IntoIterator<Item = (Key, Value)>>(&mut self, iter: I) {
        self.update(iter);
    }
}

impl<S, Key, Value> FromIterator<(Key, Value)> for Dictionary<S>
where
    S: BuildHasher + Default,
    Key: Into<String>,
    Value: Into<String>,
{
    /// Upserts every pair into an empty dictionary; the last value of a
    /// repeated key wins.
    fn from_iter<I: IntoIterator<Item = (Key, Value)>>(iter: I) -> Self {
        let mut dict = Self::default();
        dict.update(iter);
        dict
    }
}

impl<S> Index<&str> for Dictionary<S>
where
    S: BuildHasher,
{
    type Output = String;

    fn index(&self, key: &str) -> &String {
        self.get_or_default(key)
    }
}

impl<S> IndexMut<&str> for Dictionary<S>
where
    S: BuildHasher,
{
    fn index_mut(&mut self, key: &str) -> &mut String {
        self.get_or_insert_default(key)
    }
}

impl<'a, S> IntoIterator for &'a Dictionary<S> {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
