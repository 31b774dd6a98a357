use alloc::boxed::Box;

/// An owned, possibly absent subtree.
pub(crate) type Link<K, V> = Option<Box<Node<K, V>>>;

/// A single tree node: one key-value pair, owned child links, and the two
/// cached augmentations (height and subtree size) the balancing and rank
/// machinery runs on.
#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) left: Link<K, V>,
    pub(crate) right: Link<K, V>,
    // 1 + max(child heights); an absent subtree has height 0.
    pub(crate) height: u32,
    // 1 + sum(child sizes); an absent subtree has size 0.
    pub(crate) size: usize,
}

impl<K, V> Node<K, V> {
    /// Creates the leaf materialized at an insertion point.
    pub(crate) fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
            size: 1,
        }
    }

    /// Returns the height of a possibly absent subtree.
    #[inline]
    pub(crate) fn height_of(link: Option<&Self>) -> u32 {
        link.map_or(0, |node| node.height)
    }

    /// Returns the size of a possibly absent subtree.
    #[inline]
    pub(crate) fn size_of(link: Option<&Self>) -> usize {
        link.map_or(0, |node| node.size)
    }

    /// Recomputes the cached height and subtree size from the current
    /// children. Must be called on every node whose subtree composition
    /// changed, children before parents.
    #[inline]
    pub(crate) fn refresh(&mut self) {
        let left_height = Self::height_of(self.left.as_deref());
        let right_height = Self::height_of(self.right.as_deref());
        self.height = 1 + left_height.max(right_height);
        self.size = 1 + Self::size_of(self.left.as_deref()) + Self::size_of(self.right.as_deref());
    }

    /// Returns `height(right) - height(left)`.
    ///
    /// The AVL discipline keeps this in `-1..=1` for every node between public
    /// operations; `refresh` can momentarily observe `-2` or `2` on the unwind
    /// of a mutation, which is what triggers a rotation.
    #[inline]
    pub(crate) fn balance_factor(&self) -> i64 {
        i64::from(Self::height_of(self.right.as_deref())) - i64::from(Self::height_of(self.left.as_deref()))
    }
}
