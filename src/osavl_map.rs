use core::borrow::Borrow;
use core::fmt;

use crate::error::{DuplicateKeyError, KeyNotFoundError};
use crate::raw::RawOSAvlMap;

mod order_statistic;

pub use crate::Rank;

/// An ordered map based on an order-statistic [AVL tree].
///
/// Given a key type with a [total order], an ordered map stores its entries in
/// key order. That means that keys must be of a type that implements the
/// [`Ord`] trait, such that two keys can always be compared to determine their
/// [`Ordering`]. Examples of keys with a total order are strings with
/// lexicographical order, and numbers with their natural order.
///
/// Keys are unique: inserting a key that is already present is rejected with a
/// [`DuplicateKeyError`] carrying the rejected pair, and the map is left
/// exactly as it was. Every mutation is atomic in that sense - it either fully
/// completes, including rebalancing, or it is rejected before any structural
/// change begins.
///
/// It is a logic error for a key to be modified in such a way that the key's
/// ordering relative to any other key, as determined by the [`Ord`] trait,
/// changes while it is in the map. This is normally only possible through
/// [`Cell`], [`RefCell`], global state, I/O, or unsafe code. The behavior
/// resulting from such a logic error is not specified, but will be
/// encapsulated to the `OSAvlMap` that observed the logic error and not result
/// in undefined behavior.
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlMap;
///
/// // type inference lets us omit an explicit type signature (which
/// // would be `OSAvlMap<&str, &str>` in this example).
/// let mut movie_reviews = OSAvlMap::new();
///
/// // review some movies.
/// movie_reviews.insert("Office Space",       "Deals with real issues in the workplace.").unwrap();
/// movie_reviews.insert("Pulp Fiction",       "Masterpiece.").unwrap();
/// movie_reviews.insert("The Godfather",      "Very enjoyable.").unwrap();
/// movie_reviews.insert("The Blues Brothers", "Eye lyked it a lot.").unwrap();
///
/// // check for a specific one.
/// if !movie_reviews.contains_key("Les Miserables") {
///     println!("We've got {} reviews, but Les Miserables ain't one.",
///              movie_reviews.len());
/// }
///
/// // oops, this review has a lot of spelling mistakes, let's delete it.
/// movie_reviews.remove("The Blues Brothers").unwrap();
///
/// // look up the values associated with some keys.
/// let to_find = ["Up!", "Office Space"];
/// for movie in &to_find {
///     match movie_reviews.get(movie) {
///        Some(review) => println!("{movie}: {review}"),
///        None => println!("{movie} is unreviewed.")
///     }
/// }
///
/// // the review whose title sorts last.
/// let (title, review) = movie_reviews.get_max().unwrap();
/// println!("{title}: \"{review}\"");
/// ```
///
/// # Background
///
/// The map is an AVL tree: a binary search tree that keeps the heights of the
/// two subtrees of every node within one of each other by applying at most one
/// single or one double rotation per ancestor level after each mutation. On
/// top of the height each node caches the size of its subtree, which is what
/// makes the rank-based operations ([`range_between`](OSAvlMap::range_between),
/// [`get_by_rank`](OSAvlMap::get_by_rank), [`rank_of`](OSAvlMap::rank_of))
/// possible in O(log n) without storing ranks anywhere: a rank is always
/// derived on the fly from the subtree sizes along one root-to-node path.
///
/// The tree is single-threaded and fully synchronous; wrap it in a lock if a
/// host system needs concurrent access.
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
/// [total order]: https://en.wikipedia.org/wiki/Total_order
/// [`Ordering`]: core::cmp::Ordering
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
#[derive(Clone)]
pub struct OSAvlMap<K, V> {
    raw: RawOSAvlMap<K, V>,
}

impl<K, V> OSAvlMap<K, V> {
    /// Makes a new, empty `OSAvlMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    ///
    /// // entries can now be inserted into the empty map
    /// map.insert(1, "a").unwrap();
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self { raw: RawOSAvlMap::new() }
    }

    /// Returns the number of entries in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut a = OSAvlMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a").unwrap();
    /// assert_eq!(a.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut a = OSAvlMap::new();
    /// assert!(a.is_empty());
    /// a.insert(1, "a").unwrap();
    /// assert!(!a.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the height of the underlying tree: 0 when empty, 1 for a
    /// single entry, and never more than ~1.44·log2(n) + 1 thereafter.
    ///
    /// Exposed for diagnostics; the balance bound is what keeps every other
    /// operation logarithmic.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// assert_eq!(map.height(), 0);
    /// for key in 0..7 {
    ///     map.insert(key, ()).unwrap();
    /// }
    /// assert_eq!(map.height(), 3); // 7 entries balance into a perfect tree
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) - the height is cached on the root.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.raw.height()
    }

    /// Clears the map, removing all entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut a = OSAvlMap::new();
    /// a.insert(1, "a").unwrap();
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<K: Ord, V> OSAvlMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The supplied key may be any borrowed form of the map's key type, but
    /// the ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// The supplied key may be any borrowed form of the map's key type, but
    /// the ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(1, "a").unwrap();
    /// if let Some(x) = map.get_mut(&1) {
    ///     *x = "b";
    /// }
    /// assert_eq!(map.get(&1), Some(&"b"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns `true` if the map contains a value for the specified key.
    ///
    /// The supplied key may be any borrowed form of the map's key type, but
    /// the ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert!(map.contains_key(&1));
    /// assert!(!map.contains_key(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).is_some()
    }

    /// Inserts a new key-value pair into the map.
    ///
    /// Unlike `BTreeMap::insert`, an existing key is never updated: keys are
    /// unique, and inserting a present key is a failure the caller must
    /// handle.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateKeyError`] carrying the rejected `key` and `value`
    /// if an equal key is already present. The map is left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// assert!(map.insert(37, "a").is_ok());
    /// assert_eq!(map.len(), 1);
    ///
    /// let err = map.insert(37, "b").unwrap_err();
    /// assert_eq!((err.key, err.value), (37, "b"));
    /// assert_eq!(map.get(&37), Some(&"a"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: K, value: V) -> Result<(), DuplicateKeyError<K, V>> {
        self.raw.insert(key, value).map_err(|(key, value)| DuplicateKeyError { key, value })
    }

    /// Removes a key from the map, returning the value that was stored at the
    /// key.
    ///
    /// The supplied key may be any borrowed form of the map's key type, but
    /// the ordering on the borrowed form *must* match the ordering on the key
    /// type.
    ///
    /// # Errors
    ///
    /// Returns [`KeyNotFoundError`] if no equal key is present. The map is
    /// left untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::{KeyNotFoundError, OSAvlMap};
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(1, "a").unwrap();
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(KeyNotFoundError));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V, KeyNotFoundError>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(key).ok_or(KeyNotFoundError)
    }
}

impl<K, V> Default for OSAvlMap<K, V> {
    /// Creates an empty `OSAvlMap`.
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OSAvlMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = f.debug_map();
        self.raw.for_each(|key, value| {
            entries.entry(key, value);
        });
        entries.finish()
    }
}

impl<K: Ord, V: PartialEq> PartialEq for OSAvlMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        (0..self.len()).all(|rank| self.raw.select(rank) == other.raw.select(rank))
    }
}

impl<K: Ord, V: Eq> Eq for OSAvlMap<K, V> {}
