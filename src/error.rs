use alloc::string::String;
use core::fmt;

/// Errors reported by [`HashTable`](crate::HashTable) and
/// [`Dictionary`](crate::Dictionary).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not stored in the table.
    KeyNotFound,
    /// The key and value sequences handed to a zipping constructor have
    /// different lengths.
    LengthMismatch {
        /// Number of keys supplied.
        keys: usize,
        /// Number of values supplied.
        values: usize,
    },
    /// [`Dictionary::erase`](crate::Dictionary::erase) was asked to remove a
    /// key it does not hold.
    InvalidKey {
        /// The key that was not found.
        key: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::KeyNotFound => f.write_str("key is not found"),
            Error::LengthMismatch { keys, values } => write!(
                f,
                "keys and values are not the same length ({keys} keys, {values} values)"
            ),
            Error::InvalidKey { key } => {
                write!(f, "invalid key, `{key}` does not exist in the dictionary")
            }
        }
    }
}

impl core::error::Error for Error {}
