use thiserror::Error;

/// The error returned by [`insert`](crate::OSAvlMap::insert) when an equal key
/// is already present in the map.
///
/// The rejected key and value are handed back so the caller keeps ownership of
/// them; the map itself is left untouched.
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlMap;
///
/// let mut map = OSAvlMap::new();
/// assert!(map.insert(1, "a").is_ok());
///
/// let err = map.insert(1, "b").unwrap_err();
/// assert_eq!((err.key, err.value), (1, "b"));
/// assert_eq!(map.get(&1), Some(&"a"));
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("an equal key is already present in the map")]
pub struct DuplicateKeyError<K, V> {
    /// The key that was rejected.
    pub key: K,
    /// The value that was rejected.
    pub value: V,
}

/// The error returned by [`remove`](crate::OSAvlMap::remove) when no equal key
/// is present in the map.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Error)]
#[error("the key was not found in the map")]
pub struct KeyNotFoundError;

/// The error returned by [`get_max`](crate::OSAvlMap::get_max) when the map
/// contains no entries.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Error)]
#[error("the map contains no entries")]
pub struct EmptyTreeError;

/// The error returned by [`range_between`](crate::OSAvlMap::range_between) when
/// the requested rank window is not a valid `start..=end` slice of the map.
///
/// A window is valid when `start <= end` and `end < len`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
#[error("invalid rank window {start}..={end} for a map of length {len}")]
pub struct RangeError {
    /// The requested first rank, inclusive.
    pub start: usize,
    /// The requested last rank, inclusive.
    pub end: usize,
    /// The length of the map at the time of the call.
    pub len: usize,
}
