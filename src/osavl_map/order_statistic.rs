use core::borrow::Borrow;
use core::ops::{Index, IndexMut};

use alloc::vec::Vec;

use super::OSAvlMap;
use crate::Rank;
use crate::error::{EmptyTreeError, RangeError};

impl<K: Ord, V> OSAvlMap<K, V> {
    /// Returns the values at ranks `start..=end` in ascending key order.
    ///
    /// Ranks are zero-based positions in the sorted key order, so
    /// `range_between(0, len() - 1)` returns every value in the map. The
    /// returned vector is a snapshot: a fresh call recomputes the window
    /// against the current contents.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError`] if `start > end` or `end >= len()`. The bounds
    /// are checked before any traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(30, "c").unwrap();
    /// map.insert(10, "a").unwrap();
    /// map.insert(20, "b").unwrap();
    /// map.insert(40, "d").unwrap();
    ///
    /// assert_eq!(map.range_between(1, 2)?, [&"b", &"c"]);
    /// assert_eq!(map.range_between(0, 3)?, [&"a", &"b", &"c", &"d"]);
    /// assert!(map.range_between(2, 4).is_err());
    /// # Ok::<(), osavl_tree::RangeError>(())
    /// ```
    ///
    /// # Complexity
    ///
    /// O((end − start) + log n): a logarithmic descent to the window
    /// boundaries plus the emitted window itself.
    pub fn range_between(&self, start: usize, end: usize) -> Result<Vec<&V>, RangeError> {
        if start > end || end >= self.len() {
            return Err(RangeError { start, end, len: self.len() });
        }
        Ok(self.raw.range_between(start, end))
    }

    /// Returns the entry with the greatest key in the map.
    ///
    /// # Errors
    ///
    /// Returns [`EmptyTreeError`] if the map contains no entries.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::{EmptyTreeError, OSAvlMap};
    ///
    /// let mut map = OSAvlMap::new();
    /// assert_eq!(map.get_max(), Err(EmptyTreeError));
    ///
    /// map.insert(1, "b").unwrap();
    /// map.insert(2, "a").unwrap();
    /// assert_eq!(map.get_max(), Ok((&2, &"a")));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) - a rightmost descent of the tree.
    pub fn get_max(&self) -> Result<(&K, &V), EmptyTreeError> {
        self.raw.get_max().ok_or(EmptyTreeError)
    }

    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert("a", 10).unwrap();
    /// map.insert("c", 30).unwrap();
    /// map.insert("b", 20).unwrap();
    ///
    /// let (key, value) = map.get_by_rank(1).unwrap();
    /// assert_eq!((key, value), (&"b", &20));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        self.raw.select(rank)
    }

    /// Returns the key and a mutable reference to the value at position
    /// `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(10, "a").unwrap();
    /// map.insert(5, "b").unwrap();
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    ///
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        self.raw.select_mut(rank)
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMap;
    ///
    /// let mut map = OSAvlMap::new();
    /// map.insert(10, "a").unwrap();
    /// map.insert(20, "b").unwrap();
    ///
    /// assert_eq!(map.rank_of(&10), Some(0));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.rank_of(key)
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlMap, Rank};
///
/// let mut map = OSAvlMap::new();
/// map.insert("a", 1).unwrap();
/// map.insert("b", 2).unwrap();
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K: Ord, V> Index<Rank> for OSAvlMap<K, V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlMap, Rank};
///
/// let mut map = OSAvlMap::new();
/// map.insert("a", 1).unwrap();
/// map.insert("b", 2).unwrap();
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K: Ord, V> IndexMut<Rank> for OSAvlMap<K, V> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("rank out of bounds")
    }
}
