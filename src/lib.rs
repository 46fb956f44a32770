#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A forward-only cursor over the buckets of a `HashTable`.
pub mod cursor;

/// A string-to-string dictionary built on top of `HashTable`.
///
/// This module provides a `Dictionary` that forwards to a
/// `HashTable<String, String>` but reports erasing an absent key as an error
/// and supports bulk upserts.
pub mod dictionary;

mod error;

/// The chained `HashTable` and its iterators.
pub mod hash_table;

pub use cursor::Cursor;
pub use dictionary::Dictionary;
pub use error::Error;
pub use hash_table::HashTable;
#[cfg(feature = "stats")]
pub use hash_table::TableStats;

cfg_if::cfg_if! {
    if #[cfg(feature = "foldhash")] {
        /// The hasher builder used when none is given explicitly.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "std")] {
        /// The hasher builder used when none is given explicitly.
        pub type DefaultHashBuilder = std::hash::RandomState;
    } else {
        /// Placeholder hasher builder when neither `foldhash` nor `std` is
        /// enabled. It cannot be constructed: pass a hasher builder to
        /// [`HashTable::with_hasher`] instead.
        #[derive(Clone, Copy, Debug)]
        pub enum DefaultHashBuilder {}
    }
}
