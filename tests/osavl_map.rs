use std::collections::BTreeMap;

use proptest::prelude::*;

use osavl_tree::{DuplicateKeyError, EmptyTreeError, KeyNotFoundError, OSAvlMap, Rank, RangeError};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 2_000;

/// Generates keys in a range small enough to force collisions.
fn key_strategy() -> impl Strategy<Value = i64> {
    -1_000i64..1_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    Remove(i64),
    Get(i64),
    ContainsKey(i64),
    RankOf(i64),
    GetByRank(usize),
    GetMax,
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        2 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
        1 => key_strategy().prop_map(MapOp::RankOf),
        1 => (0..2_500usize).prop_map(MapOp::GetByRank),
        1 => Just(MapOp::GetMax),
    ]
}

// ─── Randomized model tests against BTreeMap ─────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both OSAvlMap and BTreeMap
    /// and asserts identical results at every step. Insertion differs from
    /// BTreeMap by design (duplicates are rejected, not updated), so the
    /// model only inserts when the key is absent.
    #[test]
    fn map_ops_match_btreemap(ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut os_map: OSAvlMap<i64, i64> = OSAvlMap::new();
        let mut bt_map: BTreeMap<i64, i64> = BTreeMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    let os_result = os_map.insert(*k, *v);
                    if bt_map.contains_key(k) {
                        prop_assert_eq!(os_result, Err(DuplicateKeyError { key: *k, value: *v }));
                    } else {
                        prop_assert_eq!(os_result, Ok(()), "insert({}, {})", k, v);
                        bt_map.insert(*k, *v);
                    }
                }
                MapOp::Remove(k) => {
                    let os_result = os_map.remove(k);
                    let bt_result = bt_map.remove(k);
                    prop_assert_eq!(os_result.ok(), bt_result, "remove({})", k);
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(os_map.get(k), bt_map.get(k), "get({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(os_map.contains_key(k), bt_map.contains_key(k), "contains_key({})", k);
                }
                MapOp::RankOf(k) => {
                    let expected = bt_map.contains_key(k).then(|| bt_map.range(..*k).count());
                    prop_assert_eq!(os_map.rank_of(k), expected, "rank_of({})", k);
                }
                MapOp::GetByRank(rank) => {
                    let expected = bt_map.iter().nth(*rank);
                    prop_assert_eq!(os_map.get_by_rank(*rank), expected, "get_by_rank({})", rank);
                }
                MapOp::GetMax => {
                    prop_assert_eq!(os_map.get_max().ok(), bt_map.last_key_value(), "get_max");
                }
            }
            prop_assert_eq!(os_map.len(), bt_map.len(), "len mismatch after {:?}", op);
            prop_assert_eq!(os_map.is_empty(), bt_map.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// range_between must equal the matching slice of the sorted value list
    /// for random windows over a randomly built map.
    #[test]
    fn range_between_matches_sorted_values(
        entries in proptest::collection::btree_map(key_strategy(), value_strategy(), 1..500),
        windows in proptest::collection::vec((0..500usize, 0..500usize), 50),
    ) {
        let mut os_map: OSAvlMap<i64, i64> = OSAvlMap::new();
        for (&k, &v) in &entries {
            os_map.insert(k, v).unwrap();
        }

        let sorted_values: Vec<i64> = entries.values().copied().collect();
        let len = sorted_values.len();

        for &(a, b) in &windows {
            let (start, end) = (a.min(b) % len, a.max(b) % len);
            let (start, end) = (start.min(end), start.max(end));
            let window: Vec<i64> = os_map.range_between(start, end).unwrap().into_iter().copied().collect();
            prop_assert_eq!(&window, &sorted_values[start..=end], "window {}..={}", start, end);
        }
    }

    /// The tree height must stay within the AVL bound of ~1.44·log2(n) + 1.
    #[test]
    fn height_stays_logarithmic(entries in proptest::collection::btree_set(any::<i64>(), 1..2_000)) {
        let mut os_map: OSAvlMap<i64, ()> = OSAvlMap::new();
        for &k in &entries {
            os_map.insert(k, ()).unwrap();
        }

        let n = os_map.len() as f64;
        let bound = 1.45 * n.log2() + 2.0;
        prop_assert!(f64::from(os_map.height()) <= bound, "height {} exceeds {}", os_map.height(), bound);
    }

    /// For all inserted keys, get returns the inserted value until the key is
    /// removed; afterwards contains_key is false and remove fails.
    #[test]
    fn round_trip_insert_then_remove(entries in proptest::collection::btree_map(key_strategy(), value_strategy(), 1..500)) {
        let mut os_map: OSAvlMap<i64, i64> = OSAvlMap::new();
        for (&k, &v) in &entries {
            os_map.insert(k, v).unwrap();
        }

        for (&k, &v) in &entries {
            assert_eq!(os_map.get(&k), Some(&v));
            assert_eq!(os_map.remove(&k), Ok(v));
            assert!(!os_map.contains_key(&k));
            assert_eq!(os_map.remove(&k), Err(KeyNotFoundError));
        }
        prop_assert!(os_map.is_empty());
    }
}

// ─── Deterministic behavior tests ────────────────────────────────────────────

fn sample_map() -> OSAvlMap<i32, &'static str> {
    let mut map = OSAvlMap::new();
    for (key, value) in [(20, "t"), (10, "j"), (30, "d"), (5, "e"), (15, "o")] {
        map.insert(key, value).unwrap();
    }
    map
}

#[test]
fn len_counts_inserts_minus_removes() {
    let mut map = OSAvlMap::new();
    for key in 0..100 {
        map.insert(key, key).unwrap();
    }
    for key in (0..100).step_by(2) {
        map.remove(&key).unwrap();
    }
    assert_eq!(map.len(), 50);
}

#[test]
fn duplicate_insert_leaves_map_unchanged() {
    let mut map = sample_map();
    let snapshot = map.clone();

    let err = map.insert(10, "x").unwrap_err();
    assert_eq!(err, DuplicateKeyError { key: 10, value: "x" });
    assert_eq!(map, snapshot);
}

#[test]
fn missing_remove_leaves_map_unchanged() {
    let mut map = sample_map();
    let snapshot = map.clone();

    assert_eq!(map.remove(&99), Err(KeyNotFoundError));
    assert_eq!(map, snapshot);
}

#[test]
fn range_between_bounds_are_checked_first() {
    let map = sample_map();

    assert_eq!(map.range_between(3, 2), Err(RangeError { start: 3, end: 2, len: 5 }));
    assert_eq!(map.range_between(0, 5), Err(RangeError { start: 0, end: 5, len: 5 }));

    let empty: OSAvlMap<i32, i32> = OSAvlMap::new();
    assert_eq!(empty.range_between(0, 0), Err(RangeError { start: 0, end: 0, len: 0 }));
}

#[test]
fn range_between_returns_values_in_key_order() {
    let map = sample_map();

    assert_eq!(map.range_between(0, 4).unwrap(), [&"e", &"j", &"o", &"t", &"d"]);
    assert_eq!(map.range_between(1, 3).unwrap(), [&"j", &"o", &"t"]);
    assert_eq!(map.range_between(2, 2).unwrap(), [&"o"]);
}

#[test]
fn get_max_requires_a_non_empty_map() {
    let mut map = OSAvlMap::new();
    assert_eq!(map.get_max(), Err(EmptyTreeError));

    map.insert(3, "c").unwrap();
    map.insert(1, "a").unwrap();
    assert_eq!(map.get_max(), Ok((&3, &"c")));

    map.remove(&3).unwrap();
    assert_eq!(map.get_max(), Ok((&1, &"a")));
}

#[test]
fn rank_indexing_reads_and_writes() {
    let mut map = sample_map();

    assert_eq!(map[Rank(0)], "e");
    assert_eq!(map[Rank(4)], "d");

    map[Rank(2)] = "replaced";
    assert_eq!(map.get(&15), Some(&"replaced"));
}

#[test]
#[should_panic(expected = "rank out of bounds")]
fn rank_indexing_out_of_bounds_panics() {
    let map = sample_map();
    let _ = map[Rank(5)];
}

#[test]
fn get_by_rank_mut_updates_in_place() {
    let mut map = sample_map();

    let (key, value) = map.get_by_rank_mut(3).unwrap();
    assert_eq!(*key, 20);
    *value = "updated";

    assert_eq!(map.get(&20), Some(&"updated"));
    assert_eq!(map.get_by_rank(3), Some((&20, &"updated")));
}

#[test]
fn clear_empties_the_map() {
    let mut map = sample_map();
    map.clear();

    assert!(map.is_empty());
    assert_eq!(map.height(), 0);
    assert_eq!(map.get_max(), Err(EmptyTreeError));

    // The cleared map is fully usable again.
    map.insert(1, "a").unwrap();
    assert_eq!(map.len(), 1);
}

#[test]
fn clone_is_independent_of_the_original() {
    let mut map = sample_map();
    let mut copy = map.clone();

    map.remove(&20).unwrap();
    copy.insert(40, "extra").unwrap();

    assert_eq!(map.len(), 4);
    assert_eq!(copy.len(), 6);
    assert_eq!(copy.get(&20), Some(&"t"));
}

#[test]
fn debug_formats_as_a_map_in_key_order() {
    let map = sample_map();
    let formatted = format!("{map:?}");
    assert_eq!(formatted, r#"{5: "e", 10: "j", 15: "o", 20: "t", 30: "d"}"#);
}

#[test]
fn errors_render_their_context() {
    let err = RangeError { start: 2, end: 7, len: 5 };
    assert_eq!(err.to_string(), "invalid rank window 2..=7 for a map of length 5");

    assert_eq!(KeyNotFoundError.to_string(), "the key was not found in the map");
    assert_eq!(EmptyTreeError.to_string(), "the map contains no entries");
}
