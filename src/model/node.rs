//! Node module for the ordered tree representation.

use serde::{Deserialize, Serialize};

/// Index of a node in a tree (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// TREE NODE
// =#========================================================================#=
/// Represents a node of an [OrderedTree](crate::model::OrderedTree).
///
/// A node holds exactly one element and up to two children, which are
/// referenced by their [NodeIndex] in the owning tree's arena. An absent
/// child is `None`, never a sentinel index.
///
/// # Invariants
/// - All elements in the `left` subtree compare strictly less than `element`
/// - All elements in the `right` subtree compare strictly greater than `element`
/// - No node is referenced as a child by more than one node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeNode<E> {
    /// Element stored in this node
    element: E,
    /// Index of the left child (smaller elements)
    left: Option<NodeIndex>,
    /// Index of the right child (greater elements)
    right: Option<NodeIndex>,
}

impl<E> TreeNode<E> {
    /// Creates a new leaf node holding `element`.
    pub fn new(element: E) -> Self {
        TreeNode {
            element,
            left: None,
            right: None,
        }
    }

    /// Returns a reference to the element of this node.
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Returns a mutable reference to the element of this node.
    ///
    /// Callers must not change the element's ordering key, since that would
    /// break the search order of the tree.
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    /// Consumes the node and returns its element.
    pub fn into_element(self) -> E {
        self.element
    }

    /// Returns the index of the left child, if any.
    pub fn left(&self) -> Option<NodeIndex> {
        self.left
    }

    /// Returns the index of the right child, if any.
    pub fn right(&self) -> Option<NodeIndex> {
        self.right
    }

    /// Returns both children as tuple `(left, right)`.
    pub fn children(&self) -> (Option<NodeIndex>, Option<NodeIndex>) {
        (self.left, self.right)
    }

    /// Returns `true` if this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub(crate) fn set_left(&mut self, left: Option<NodeIndex>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<NodeIndex>) {
        self.right = right;
    }
}
