use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use alloc::boxed::Box;
use alloc::vec::Vec;

use super::node::{Link, Node};

/// The core AVL tree implementation backing `OSAvlMap`.
///
/// Every mutation recurses from the root to the edit point and, on the unwind,
/// refreshes the cached height/size of each ancestor and rebalances it. There
/// is no separate repair pass and no deferred work: when a public operation
/// returns, every node satisfies the BST ordering, the AVL balance bound, and
/// the height/size bookkeeping.
#[derive(Clone)]
pub(crate) struct RawOSAvlMap<K, V> {
    /// The root node, if the tree is non-empty.
    root: Link<K, V>,
    /// Total number of key-value pairs in the tree. Mirrors the root's
    /// subtree size whenever a root is present.
    len: usize,
}

impl<K, V> RawOSAvlMap<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the height of the tree (0 when empty).
    pub(crate) fn height(&self) -> u32 {
        Node::height_of(self.root.as_deref())
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Returns the entry with the greatest key, if any.
    pub(crate) fn get_max(&self) -> Option<(&K, &V)> {
        let mut current = self.root.as_deref()?;
        while let Some(right) = current.right.as_deref() {
            current = right;
        }
        Some((&current.key, &current.value))
    }

    /// Returns the entry at position `rank` in sorted order, if in bounds.
    pub(crate) fn select(&self, mut rank: usize) -> Option<(&K, &V)> {
        let mut current = self.root.as_deref()?;
        loop {
            let left_size = Node::size_of(current.left.as_deref());
            match rank.cmp(&left_size) {
                Ordering::Less => current = current.left.as_deref()?,
                Ordering::Equal => return Some((&current.key, &current.value)),
                Ordering::Greater => {
                    rank -= left_size + 1;
                    current = current.right.as_deref()?;
                }
            }
        }
    }

    /// Returns the entry at position `rank` with a mutable value reference.
    pub(crate) fn select_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        Self::select_node_mut(self.root.as_deref_mut()?, rank)
    }

    fn select_node_mut(node: &mut Node<K, V>, rank: usize) -> Option<(&K, &mut V)> {
        let left_size = Node::size_of(node.left.as_deref());
        match rank.cmp(&left_size) {
            Ordering::Less => Self::select_node_mut(node.left.as_deref_mut()?, rank),
            Ordering::Equal => Some((&node.key, &mut node.value)),
            Ordering::Greater => Self::select_node_mut(node.right.as_deref_mut()?, rank - left_size - 1),
        }
    }

    /// Collects the values at ranks `start..=end` in ascending key order.
    ///
    /// The caller is responsible for validating `start <= end < len`.
    pub(crate) fn range_between(&self, start: usize, end: usize) -> Vec<&V> {
        let mut values = Vec::with_capacity(end - start + 1);
        if let Some(root) = self.root.as_deref() {
            Self::collect_range(root, start, end, self.len - 1, &mut values);
        }
        values
    }

    /// The recursive worker for `range_between`. `max_index` is the greatest
    /// rank any node in this subtree can hold; it starts at `len - 1` and is
    /// never cached across calls, so the derivation below always reads the
    /// current subtree sizes.
    fn collect_range<'a>(node: &'a Node<K, V>, start: usize, end: usize, max_index: usize, out: &mut Vec<&'a V>) {
        // This node's rank: max_index itself when nothing hangs to its right,
        // otherwise max_index less the nodes to its right.
        let current_index = match node.right.as_deref() {
            Some(right) => max_index - right.size,
            None => max_index,
        };

        // Everything left of this node occupies ranks below current_index.
        if current_index > start {
            if let Some(left) = node.left.as_deref() {
                Self::collect_range(left, start, end, current_index - 1, out);
            }
        }

        if (start..=end).contains(&current_index) {
            out.push(&node.value);
        }

        if current_index < end {
            if let Some(right) = node.right.as_deref() {
                Self::collect_range(right, start, end, max_index, out);
            }
        }
    }

    /// Visits every entry in ascending key order.
    pub(crate) fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&K, &V),
    {
        Self::visit_in_order(self.root.as_deref(), &mut f);
    }

    fn visit_in_order<F>(node: Option<&Node<K, V>>, f: &mut F)
    where
        F: FnMut(&K, &V),
    {
        if let Some(node) = node {
            Self::visit_in_order(node.left.as_deref(), f);
            f(&node.key, &node.value);
            Self::visit_in_order(node.right.as_deref(), f);
        }
    }
}

impl<K: Ord, V> RawOSAvlMap<K, V> {
    /// Returns a reference to the value for `key`, if present.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(&node.value),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    /// Returns a mutable reference to the value for `key`, if present.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
                Ordering::Greater => current = node.right.as_deref_mut(),
            }
        }
        None
    }

    /// Returns the zero-based rank of `key` in sorted order, if present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut rank = 0;
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match key.cmp(node.key.borrow()) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Equal => return Some(rank + Node::size_of(node.left.as_deref())),
                Ordering::Greater => {
                    rank += Node::size_of(node.left.as_deref()) + 1;
                    current = node.right.as_deref();
                }
            }
        }
        None
    }

    /// Inserts a new key, or hands the pair back untouched if an equal key is
    /// already present. On the duplicate path no node is modified.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Result<(), (K, V)> {
        Self::insert_at(&mut self.root, key, value)?;
        self.len += 1;
        Ok(())
    }

    fn insert_at(link: &mut Link<K, V>, key: K, value: V) -> Result<(), (K, V)> {
        if let Some(node) = link.as_deref_mut() {
            match key.cmp(&node.key) {
                Ordering::Less => Self::insert_at(&mut node.left, key, value)?,
                Ordering::Greater => Self::insert_at(&mut node.right, key, value)?,
                Ordering::Equal => return Err((key, value)),
            }
            node.refresh();
        } else {
            *link = Some(Box::new(Node::new(key, value)));
            return Ok(());
        }
        Self::rebalance(link);
        Ok(())
    }

    /// Removes the node with `key` and returns its value, or `None` if the
    /// key is absent (in which case no node is modified).
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let value = Self::remove_at(&mut self.root, key)?;
        self.len -= 1;
        Some(value)
    }

    fn remove_at<Q>(link: &mut Link<K, V>, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let ordering = key.cmp(link.as_deref()?.key.borrow());
        if ordering == Ordering::Equal {
            let node = link.take()?;
            return Some(Self::excise(node, link));
        }

        let node = link.as_deref_mut()?;
        let child = match ordering {
            Ordering::Less => &mut node.left,
            _ => &mut node.right,
        };
        let value = Self::remove_at(child, key)?;
        node.refresh();
        Self::rebalance(link);
        Some(value)
    }

    /// Removes the match node, reattaching whatever must take its place in
    /// `slot`. With two children the node is kept and overwritten with its
    /// in-order successor's key and value, and the successor's original node
    /// is detached from the right subtree instead.
    fn excise(mut node: Box<Node<K, V>>, slot: &mut Link<K, V>) -> V {
        if node.left.is_some() && node.right.is_some() {
            let (successor_key, successor_value) = Self::detach_min(&mut node.right);
            node.key = successor_key;
            let removed = mem::replace(&mut node.value, successor_value);
            node.refresh();
            *slot = Some(node);
            Self::rebalance(slot);
            removed
        } else {
            // Zero or one child: promote whichever child exists.
            *slot = node.left.take().or_else(|| node.right.take());
            let Node { value, .. } = *node;
            value
        }
    }

    /// Detaches the leftmost node of a non-empty subtree and returns its
    /// entry, rebalancing the descent path on the unwind. The detached node
    /// has no left child, so its right child (if any) is promoted in place.
    fn detach_min(link: &mut Link<K, V>) -> (K, V) {
        let has_left = link.as_deref().is_some_and(|node| node.left.is_some());
        if has_left {
            let node = link.as_deref_mut().expect("detach_min requires a non-empty subtree");
            let entry = Self::detach_min(&mut node.left);
            node.refresh();
            Self::rebalance(link);
            entry
        } else {
            let node = link.take().expect("detach_min requires a non-empty subtree");
            let Node { key, value, right, .. } = *node;
            *link = right;
            (key, value)
        }
    }

    /// Restores the AVL balance bound at this link after a structural change
    /// beneath it. At most one single or one double rotation is applied.
    fn rebalance(link: &mut Link<K, V>) {
        let Some(node) = link.as_mut() else { return };
        let balance = node.balance_factor();
        if balance >= 2 {
            let right = node.right.as_mut().expect("a right-heavy node has a right child");
            // Right child leaning left (RL case): straighten it first.
            if Node::height_of(right.left.as_deref()) > Node::height_of(right.right.as_deref()) {
                Self::rotate_right(right);
            }
            Self::rotate_left(node);
        } else if balance <= -2 {
            let left = node.left.as_mut().expect("a left-heavy node has a left child");
            // Left child leaning right (LR case): straighten it first.
            if Node::height_of(left.right.as_deref()) > Node::height_of(left.left.as_deref()) {
                Self::rotate_left(left);
            }
            Self::rotate_right(node);
        }
    }

    /// Rotates the subtree left: the right child becomes the new subtree
    /// root, its left subtree moves under the old root, and the old root
    /// becomes the pivot's left child.
    ///
    /// Refresh order matters: the old root first, the pivot second, since the
    /// pivot's height and size depend on the already-updated old root.
    fn rotate_left(node: &mut Box<Node<K, V>>) {
        let mut pivot = node.right.take().expect("left rotation requires a right child");
        node.right = pivot.left.take();
        node.refresh();
        mem::swap(node, &mut pivot);
        // `node` is now the pivot; `pivot` holds the old subtree root.
        node.left = Some(pivot);
        node.refresh();
    }

    /// Rotates the subtree right; the mirror image of `rotate_left`.
    fn rotate_right(node: &mut Box<Node<K, V>>) {
        let mut pivot = node.left.take().expect("right rotation requires a left child");
        node.left = pivot.right.take();
        node.refresh();
        mem::swap(node, &mut pivot);
        // `node` is now the pivot; `pivot` holds the old subtree root.
        node.right = Some(pivot);
        node.refresh();
    }
}

#[cfg(test)]
impl<K: Ord, V> RawOSAvlMap<K, V> {
    /// Checks the BST ordering, the AVL balance bound, the cached
    /// height/size bookkeeping, and the length accounting for the whole tree.
    pub(crate) fn assert_invariants(&self) {
        assert_eq!(self.len, Node::size_of(self.root.as_deref()), "len must mirror the root's subtree size");
        Self::check_node(self.root.as_deref(), None, None);
    }

    fn check_node(node: Option<&Node<K, V>>, lower: Option<&K>, upper: Option<&K>) -> (u32, usize) {
        let Some(node) = node else { return (0, 0) };

        if let Some(lower) = lower {
            assert!(*lower < node.key, "BST ordering violated on a left bound");
        }
        if let Some(upper) = upper {
            assert!(node.key < *upper, "BST ordering violated on a right bound");
        }

        let (left_height, left_size) = Self::check_node(node.left.as_deref(), lower, Some(&node.key));
        let (right_height, right_size) = Self::check_node(node.right.as_deref(), Some(&node.key), upper);

        let height = 1 + left_height.max(right_height);
        let size = 1 + left_size + right_size;
        assert_eq!(node.height, height, "cached height is stale");
        assert_eq!(node.size, size, "cached subtree size is stale");
        assert!(
            (i64::from(right_height) - i64::from(left_height)).abs() <= 1,
            "AVL balance bound violated"
        );

        (height, size)
    }

    fn root(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
}
