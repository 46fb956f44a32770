use core::fmt::Debug;

use crate::hash_table::Bucket;

/// Bucket and slot index of the end position.
const END: usize = usize::MAX;

/// A forward-only cursor over the entries of a [`HashTable`].
///
/// Cursors are created by [`HashTable::begin`] and [`HashTable::end`]. A
/// cursor walks the bucket array in ascending index order and each bucket in
/// storage order. It holds a shared borrow of its table, so the table cannot
/// be mutated (and the cursor cannot be invalidated) while the cursor is
/// alive.
///
/// Two cursors compare equal when they point into the same table at the same
/// `(bucket, slot)` position. The end cursor sits at a position past every
/// bucket.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashTable;
///
/// let mut table: HashTable<&str, i32> = HashTable::new();
/// table.insert("a", 1);
/// table.insert("b", 2);
///
/// let mut cursor = table.begin();
/// let mut seen = 0;
/// while cursor != table.end() {
///     let (_key, value) = cursor.get().unwrap();
///     seen += *value;
///     cursor.advance();
/// }
/// assert_eq!(seen, 3);
/// ```
///
/// [`HashTable`]: crate::HashTable
/// [`HashTable::begin`]: crate::HashTable::begin
/// [`HashTable::end`]: crate::HashTable::end
pub struct Cursor<'a, K, V> {
    buckets: &'a [Bucket<K, V>],
    bucket: usize,
    slot: usize,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(crate) fn begin(buckets: &'a [Bucket<K, V>]) -> Self {
        let mut cursor = Self {
            buckets,
            bucket: 0,
            slot: 0,
        };
        cursor.seek_occupied();
        cursor
    }

    pub(crate) fn end(buckets: &'a [Bucket<K, V>]) -> Self {
        Self {
            buckets,
            bucket: END,
            slot: END,
        }
    }

    /// Moves to the first slot of the first non-empty bucket at or after
    /// `self.bucket`, or to the end position if there is none.
    fn seek_occupied(&mut self) {
        match self.buckets[self.bucket..]
            .iter()
            .position(|bucket| !bucket.is_empty())
        {
            Some(offset) => {
                self.bucket += offset;
                self.slot = 0;
            }
            None => {
                self.bucket = END;
                self.slot = END;
            }
        }
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.bucket == END
    }

    /// Returns the entry under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        let buckets = self.buckets;
        buckets
            .get(self.bucket)
            .and_then(|bucket| bucket.get(self.slot))
            .map(|(k, v)| (k, v))
    }

    /// Returns the key under the cursor, or `None` at the end position.
    pub fn key(&self) -> Option<&'a K> {
        self.get().map(|(k, _)| k)
    }

    /// Returns the value under the cursor, or `None` at the end position.
    pub fn value(&self) -> Option<&'a V> {
        self.get().map(|(_, v)| v)
    }

    /// Returns the `(bucket, slot)` position of the cursor, or `None` at the
    /// end position.
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.is_end() {
            None
        } else {
            Some((self.bucket, self.slot))
        }
    }

    /// Moves the cursor to the next entry.
    ///
    /// Advancing past the last entry moves the cursor to the end position.
    /// Advancing the end cursor leaves it where it is.
    pub fn advance(&mut self) {
        if self.is_end() {
            return;
        }

        if self.slot + 1 < self.buckets[self.bucket].len() {
            self.slot += 1;
        } else {
            self.bucket += 1;
            self.seek_occupied();
        }
    }
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.buckets, other.buckets)
            && self.bucket == other.bucket
            && self.slot == other.slot
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K, V> Debug for Cursor<'_, K, V>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.position())
            .field("entry", &self.get())
            .finish()
    }
}
