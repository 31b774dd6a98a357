//! Order-statistic AVL tree map for Rust.
//!
//! This crate provides [`OSAvlMap`], an ordered key→value container backed by a
//! height-balanced (AVL) binary search tree augmented with subtree sizes. On top
//! of the usual lookup/insert/remove operations it offers O(log n)
//! order-statistic queries:
//!
//! - [`range_between`](OSAvlMap::range_between) - All values in a window of sorted ranks
//! - [`get_by_rank`](OSAvlMap::get_by_rank) - Get the element at a given sorted position
//! - [`rank_of`](OSAvlMap::rank_of) - Get the sorted position of a key
//! - [`get_max`](OSAvlMap::get_max) - Get the entry with the greatest key
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first element
//!
//! # Example
//!
//! ```
//! use osavl_tree::{OSAvlMap, Rank};
//!
//! let mut scores = OSAvlMap::new();
//! scores.insert("Alice", 100)?;
//! scores.insert("Bob", 85)?;
//! scores.insert("Carol", 92)?;
//!
//! // Standard map operations work as expected
//! assert_eq!(scores.get(&"Bob"), Some(&85));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! // Get the median (rank 1 = second element in sorted order)
//! let (name, score) = scores.get_by_rank(1).unwrap();
//! assert_eq!(*name, "Bob"); // Keys are sorted alphabetically
//! assert_eq!(*score, 85);
//!
//! // Values at a window of ranks, in ascending key order
//! assert_eq!(scores.range_between(1, 2)?, [&85, &92]);
//!
//! // Find the rank of a key
//! assert_eq!(scores.rank_of(&"Carol"), Some(2)); // Carol is third alphabetically
//!
//! // Index by rank
//! assert_eq!(scores[Rank(0)], 100); // Alice's score (first alphabetically)
//! # Ok::<(), Box<dyn core::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Keys are unique** - Inserting a duplicate key is rejected with
//!   [`DuplicateKeyError`] and leaves the map untouched
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree
//!   size augmentation; ranks are derived from the sizes, never stored
//! - **Strict error surface** - The failure cases ([`DuplicateKeyError`],
//!   [`KeyNotFoundError`], [`RangeError`], [`EmptyTreeError`]) are explicit
//!   `Result` types, so callers are forced to handle them
//!
//! # Implementation
//!
//! The map is a classic AVL tree with owned child links: every node caches its
//! height and its subtree size, both recomputed bottom-up on the unwind of each
//! mutating recursion, with at most one single or double rotation per ancestor
//! level. Rank queries read the cached subtree sizes and therefore never touch
//! more of the tree than the descent to the query window plus the window itself.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]

extern crate alloc;

mod error;
mod order_statistic;
mod raw;

pub mod osavl_map;

pub use error::{DuplicateKeyError, EmptyTreeError, KeyNotFoundError, RangeError};
pub use order_statistic::Rank;
pub use osavl_map::OSAvlMap;
