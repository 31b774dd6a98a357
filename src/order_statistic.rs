/// A zero-based rank into the sorted order of a map.
///
/// A key's rank is its position in ascending key order among all keys
/// currently in the map.
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlMap, Rank};
///
/// let mut map = OSAvlMap::new();
/// map.insert("a", 10).unwrap();
/// map.insert("b", 20).unwrap();
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
