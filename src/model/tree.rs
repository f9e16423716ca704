//! Provides the generic ordered tree representation.
//!
//! Provides the core data structure of the word index:
//! * [`OrderedTree<E>`] - Unbalanced binary search tree using the arena
//!   pattern, generic over any totally ordered element type.
//! * [InOrderIter], [PreOrderIter] and [PostOrderIter] as its traversals.

use crate::model::node::{NodeIndex, TreeNode};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::iter::FusedIterator;

// =$========================================================================$=
// TREE
// =$========================================================================$=
/// An unbalanced binary search tree represented using the arena pattern
/// on [TreeNode].
///
/// Nodes are stored in a vector of slots and referenced by [NodeIndex].
/// Slots freed by removals are recycled by later insertions, so indices are
/// stable for as long as the element stays in the tree.
///
/// # Structure
/// - Each element is unique under its [Ord] implementation; inserting an
///   element comparing equal to a stored one is rejected, never overwritten.
/// - Left subtrees hold strictly smaller, right subtrees strictly greater elements.
/// - `len` equals the number of nodes reachable from the root, and the root
///   is `None` exactly when `len == 0`.
/// - No rebalancing takes place. Inserting sorted input degrades the tree to
///   a list of depth `len`, which is accepted.
///
/// Each tree owns its nodes exclusively; two trees never share state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderedTree<E> {
    /// Node slots (arena pattern); `None` marks a freed slot
    nodes: Vec<Option<TreeNode<E>>>,

    /// Indices of freed slots, reused on insertion
    free: Vec<NodeIndex>,

    /// Index of the root, `None` if the tree is empty
    root: Option<NodeIndex>,

    /// Number of elements stored
    len: usize,
}

impl<E> Default for OrderedTree<E> {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl<E> OrderedTree<E> {
    /// Creates a new, empty tree.
    pub fn new() -> Self {
        OrderedTree {
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new, empty tree with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedTree {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of elements in this tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if this tree holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the index of the root, or `None` if the tree is empty.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Returns a reference to the root node, or `None` if the tree is empty.
    pub fn root(&self) -> Option<&TreeNode<E>> {
        self.root.and_then(|index| self.node(index))
    }

    /// Returns a reference to the node at the given index.
    ///
    /// # Returns
    /// `None` if `index` is out of bounds or its slot has been freed.
    pub fn node(&self, index: NodeIndex) -> Option<&TreeNode<E>> {
        self.nodes.get(index).and_then(Option::as_ref)
    }

    /// Returns the height of this tree, that is, the number of nodes on the
    /// longest root-to-leaf path.
    ///
    /// An empty tree has height 0 and a single node has height 1.
    /// Computed iteratively, as degenerate trees may be as deep as they are large.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeIndex, usize)> = Vec::new();
        if let Some(root) = self.root {
            stack.push((root, 1));
        }

        while let Some((index, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self[index];
            if let Some(left) = node.left() {
                stack.push((left, depth + 1));
            }
            if let Some(right) = node.right() {
                stack.push((right, depth + 1));
            }
        }

        height
    }

    /// Removes all elements, releasing all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the smallest element, or `None` if the tree is empty.
    pub fn min(&self) -> Option<&E> {
        self.leftmost().map(|(index, _)| self[index].element())
    }

    /// Returns the greatest element, or `None` if the tree is empty.
    pub fn max(&self) -> Option<&E> {
        self.rightmost().map(|(index, _)| self[index].element())
    }

    /// Removes and returns the smallest element.
    ///
    /// The right subtree of the removed node (if any) takes its place.
    ///
    /// # Returns
    /// `None` if the tree is empty, in which case it is left unchanged.
    pub fn remove_min(&mut self) -> Option<E> {
        let (index, parent) = self.leftmost()?;
        let replacement = self[index].right();
        match parent {
            None => self.root = replacement,
            Some(parent) => self[parent].set_left(replacement),
        }
        Some(self.release(index))
    }

    /// Removes and returns the greatest element.
    ///
    /// The left subtree of the removed node (if any) takes its place.
    ///
    /// # Returns
    /// `None` if the tree is empty, in which case it is left unchanged.
    pub fn remove_max(&mut self) -> Option<E> {
        let (index, parent) = self.rightmost()?;
        let replacement = self[index].left();
        match parent {
            None => self.root = replacement,
            Some(parent) => self[parent].set_right(replacement),
        }
        Some(self.release(index))
    }
}

// ============================================================================
// Search & insertion (pub, ordered elements)
// ============================================================================
impl<E: Ord> OrderedTree<E> {
    /// Searches the tree for the node holding an element equal to `key`.
    ///
    /// `key` may be any borrowed form of the element type, as long as its
    /// ordering agrees with the element's ordering (see [Borrow]).
    ///
    /// # Returns
    /// `Some(&TreeNode)` if found, `None` otherwise. Runs in `O(height)`.
    pub fn search<Q>(&self, key: &Q) -> Option<&TreeNode<E>>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Location::Found(index) => Some(&self[index]),
            Location::Vacant(_) => None,
        }
    }

    /// Returns `true` if an element equal to `key` is stored.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).is_some()
    }

    /// Returns a reference to the element equal to `key`, if any.
    pub fn get<Q>(&self, key: &Q) -> Option<&E>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.search(key).map(TreeNode::element)
    }

    /// Returns a mutable reference to the element equal to `key`, if any.
    ///
    /// The returned element must keep comparing equal to `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut E>
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        match self.locate(key) {
            Location::Found(index) => Some(self[index].element_mut()),
            Location::Vacant(_) => None,
        }
    }

    /// Inserts `element` as a new leaf.
    ///
    /// # Returns
    /// `true` if inserted; `false` if an equal element already exists, in
    /// which case the tree is left unchanged and `element` is dropped.
    pub fn insert(&mut self, element: E) -> bool {
        match self.locate(&element) {
            Location::Found(_) => false,
            Location::Vacant(slot) => {
                self.attach(slot, element);
                true
            }
        }
    }

    /// Returns the element equal to `element`, inserting `element` first if
    /// no such element exists.
    ///
    /// Single traversal; the returned reference is the stored element itself.
    pub fn get_or_insert(&mut self, element: E) -> &mut E {
        let index = match self.locate(&element) {
            Location::Found(index) => index,
            Location::Vacant(slot) => self.attach(slot, element),
        };
        self[index].element_mut()
    }

    /// Returns the element equal to `key`, creating it with `make` if
    /// no such element exists.
    ///
    /// `make` is only called when `key` is absent, and must return an element
    /// comparing equal to `key`.
    pub fn get_or_insert_with<Q, F>(&mut self, key: &Q, make: F) -> &mut E
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
        F: FnOnce() -> E,
    {
        let index = match self.locate(key) {
            Location::Found(index) => index,
            Location::Vacant(slot) => {
                let element = make();
                debug_assert!(<E as Borrow<Q>>::borrow(&element).cmp(key) == Ordering::Equal);
                self.attach(slot, element)
            }
        };
        self[index].element_mut()
    }

    /// Validates the tree structure and all index references.
    ///
    /// Checks:
    /// - Root is `None` exactly when the tree is empty
    /// - All child indices are in bounds and point to occupied slots
    /// - No node is reachable twice
    /// - Number of reachable nodes, occupied slots and `len` agree
    /// - Freed slots are vacant and not listed twice
    /// - In-order sequence is strictly ascending (search order holds)
    ///
    /// Never panics, so it can be used on untrusted (e.g. deserialized) trees.
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        if self.root.is_none() != (self.len == 0) {
            return false;
        }

        let occupied = self.nodes.iter().filter(|slot| slot.is_some()).count();
        if occupied != self.len || self.free.len() != self.nodes.len() - occupied {
            return false;
        }

        let mut freed = vec![false; self.nodes.len()];
        for &index in &self.free {
            if index >= self.nodes.len() || self.nodes[index].is_some() || freed[index] {
                return false;
            }
            freed[index] = true;
        }

        // In-order walk on raw slots, checking each index before following it
        let mut visited = vec![false; self.nodes.len()];
        let mut stack: Vec<NodeIndex> = Vec::new();
        let mut current = self.root;
        let mut previous: Option<&E> = None;
        let mut reached = 0;
        loop {
            while let Some(index) = current {
                let Some(node) = self.node(index) else {
                    return false;
                };
                if visited[index] {
                    return false;
                }
                visited[index] = true;
                stack.push(index);
                current = node.left();
            }

            let Some(index) = stack.pop() else {
                break;
            };
            let node = &self[index];
            if previous.is_some_and(|prev| prev >= node.element()) {
                return false;
            }
            previous = Some(node.element());
            reached += 1;
            current = node.right();
        }

        reached == self.len
    }

    /// Finds the node equal to `key`, or the vacant child slot it belongs in.
    fn locate<Q>(&self, key: &Q) -> Location
    where
        E: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;
        let mut slot = Slot::Root;
        while let Some(index) = current {
            let node = &self[index];
            match key.cmp(node.element().borrow()) {
                Ordering::Equal => return Location::Found(index),
                Ordering::Less => {
                    slot = Slot::Left(index);
                    current = node.left();
                }
                Ordering::Greater => {
                    slot = Slot::Right(index);
                    current = node.right();
                }
            }
        }
        Location::Vacant(slot)
    }
}

// ============================================================================
// Internal helpers (private)
// ============================================================================
/// Result of a search: either the matching node or where it would be attached.
enum Location {
    Found(NodeIndex),
    Vacant(Slot),
}

/// Vacant child slot for a new leaf.
enum Slot {
    Root,
    Left(NodeIndex),
    Right(NodeIndex),
}

impl<E> OrderedTree<E> {
    /// Stores `element` in a new leaf hung into `slot`, returning its index.
    fn attach(&mut self, slot: Slot, element: E) -> NodeIndex {
        let node = TreeNode::new(element);
        let index = match self.free.pop() {
            Some(index) => {
                self.nodes[index] = Some(node);
                index
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };

        match slot {
            Slot::Root => self.root = Some(index),
            Slot::Left(parent) => self[parent].set_left(Some(index)),
            Slot::Right(parent) => self[parent].set_right(Some(index)),
        }
        self.len += 1;

        index
    }

    /// Frees the slot at `index` (already unlinked) and returns its element.
    fn release(&mut self, index: NodeIndex) -> E {
        let node = self.nodes[index]
            .take()
            .unwrap_or_else(|| panic!("Node {index} released twice"));
        self.free.push(index);
        self.len -= 1;
        if self.len == 0 {
            // Nothing reachable anymore, so drop the arena entirely
            self.nodes.clear();
            self.free.clear();
        }
        node.into_element()
    }

    /// Returns `(index, parent)` of the leftmost node.
    fn leftmost(&self) -> Option<(NodeIndex, Option<NodeIndex>)> {
        let mut index = self.root?;
        let mut parent = None;
        while let Some(left) = self[index].left() {
            parent = Some(index);
            index = left;
        }
        Some((index, parent))
    }

    /// Returns `(index, parent)` of the rightmost node.
    fn rightmost(&self) -> Option<(NodeIndex, Option<NodeIndex>)> {
        let mut index = self.root?;
        let mut parent = None;
        while let Some(right) = self[index].right() {
            parent = Some(index);
            index = right;
        }
        Some((index, parent))
    }
}

impl<E> std::ops::Index<NodeIndex> for OrderedTree<E> {
    type Output = TreeNode<E>;

    /// # Panics
    /// Panics if `index` is out of bounds or its slot has been freed.
    fn index(&self, index: NodeIndex) -> &Self::Output {
        match self.nodes.get(index) {
            Some(Some(node)) => node,
            _ => panic!("No node at index {index}"),
        }
    }
}

impl<E> std::ops::IndexMut<NodeIndex> for OrderedTree<E> {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Self::Output {
        match self.nodes.get_mut(index) {
            Some(Some(node)) => node,
            _ => panic!("No node at index {index}"),
        }
    }
}

impl<E: Ord> FromIterator<E> for OrderedTree<E> {
    /// Builds a tree by inserting in iteration order; duplicates are skipped.
    fn from_iter<I: IntoIterator<Item = E>>(iter: I) -> Self {
        let mut tree = OrderedTree::new();
        tree.extend(iter);
        tree
    }
}

impl<E: Ord> Extend<E> for OrderedTree<E> {
    fn extend<I: IntoIterator<Item = E>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

// =$========================================================================$=
// ITERATORS
// =$========================================================================$=
// All iterators borrow the tree, so the tree cannot be mutated while one is
// alive; each sequence reflects the tree as of its creation.
impl<E> OrderedTree<E> {
    /// Returns an iterator over the elements in ascending order
    /// (left subtree, node, right subtree).
    ///
    /// # Example
    /// ```
    /// use wordtracker::model::OrderedTree;
    ///
    /// let tree: OrderedTree<u32> = [5, 2, 8, 1].into_iter().collect();
    /// let sorted: Vec<_> = tree.in_order_iter().copied().collect();
    /// assert_eq!(sorted, vec![1, 2, 5, 8]);
    /// ```
    pub fn in_order_iter(&self) -> InOrderIter<'_, E> {
        InOrderIter::new(self)
    }

    /// Returns an iterator over the tree in pre-order (parents before children).
    ///
    /// # Example
    /// ```
    /// use wordtracker::model::OrderedTree;
    ///
    /// let tree: OrderedTree<u32> = [5, 2, 8, 1].into_iter().collect();
    /// let order: Vec<_> = tree.pre_order_iter().copied().collect();
    /// assert_eq!(order, vec![5, 2, 1, 8]);
    /// ```
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, E> {
        PreOrderIter::new(self)
    }

    /// Returns an iterator over the tree in post-order (children before parents).
    ///
    /// # Example
    /// ```
    /// use wordtracker::model::OrderedTree;
    ///
    /// let tree: OrderedTree<u32> = [5, 2, 8, 1].into_iter().collect();
    /// let order: Vec<_> = tree.post_order_iter().copied().collect();
    /// assert_eq!(order, vec![1, 2, 8, 5]);
    /// ```
    pub fn post_order_iter(&self) -> PostOrderIter<'_, E> {
        PostOrderIter::new(self)
    }

    /// Shorthand for [`in_order_iter`](OrderedTree::in_order_iter).
    pub fn iter(&self) -> InOrderIter<'_, E> {
        self.in_order_iter()
    }
}

impl<'a, E> IntoIterator for &'a OrderedTree<E> {
    type Item = &'a E;
    type IntoIter = InOrderIter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order_iter()
    }
}

/// Iterator for in-order traversal (ascending element order).
///
/// Stack-based; holds at most `height` indices.
pub struct InOrderIter<'a, E> {
    tree: &'a OrderedTree<E>,
    stack: Vec<NodeIndex>,
    remaining: usize,
}

impl<'a, E> InOrderIter<'a, E> {
    fn new(tree: &'a OrderedTree<E>) -> Self {
        let mut iter = InOrderIter {
            tree,
            stack: Vec::new(),
            remaining: tree.len,
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<NodeIndex>) {
        while let Some(index) = current {
            self.stack.push(index);
            current = self.tree[index].left();
        }
    }
}

impl<'a, E> Iterator for InOrderIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for InOrderIter<'_, E> {}
impl<E> FusedIterator for InOrderIter<'_, E> {}

/// Iterator for pre-order traversal (parents before children).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited before any of its descendants.
pub struct PreOrderIter<'a, E> {
    tree: &'a OrderedTree<E>,
    stack: Vec<NodeIndex>,
    remaining: usize,
}

impl<'a, E> PreOrderIter<'a, E> {
    fn new(tree: &'a OrderedTree<E>) -> Self {
        PreOrderIter {
            tree,
            stack: tree.root.into_iter().collect(),
            remaining: tree.len,
        }
    }
}

impl<'a, E> Iterator for PreOrderIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree[index];

        // Push children onto stack (right first, so left is processed first)
        if let Some(right) = node.right() {
            self.stack.push(right);
        }
        if let Some(left) = node.left() {
            self.stack.push(left);
        }

        self.remaining -= 1;
        Some(node.element())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for PreOrderIter<'_, E> {}
impl<E> FusedIterator for PreOrderIter<'_, E> {}

/// Iterator for post-order traversal (children before parents).
///
/// This iterator uses a stack-based approach to traverse the tree without recursion.
/// Each node is visited after all its descendants have been visited.
pub struct PostOrderIter<'a, E> {
    tree: &'a OrderedTree<E>,
    stack: Vec<(NodeIndex, bool)>, // (index, children_visited)
    remaining: usize,
}

impl<'a, E> PostOrderIter<'a, E> {
    fn new(tree: &'a OrderedTree<E>) -> Self {
        PostOrderIter {
            tree,
            stack: tree.root.map(|root| (root, false)).into_iter().collect(),
            remaining: tree.len,
        }
    }
}

impl<'a, E> Iterator for PostOrderIter<'a, E> {
    type Item = &'a E;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree[index];

            if children_visited || node.is_leaf() {
                self.remaining -= 1;
                return Some(node.element());
            }

            self.stack.push((index, true));

            // Push children (right first, so left is processed first)
            if let Some(right) = node.right() {
                self.stack.push((right, false));
            }
            if let Some(left) = node.left() {
                self.stack.push((left, false));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<E> ExactSizeIterator for PostOrderIter<'_, E> {}
impl<E> FusedIterator for PostOrderIter<'_, E> {}
