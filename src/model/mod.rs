//! Data model of the word index.
//!
//! # Tree representation
//! The index is an [OrderedTree], an unbalanced binary search tree that uses
//! the arena pattern to store [TreeNode]s, referenced by [NodeIndex].
//! It is generic over any element type with a total order ([Ord]) and keeps
//! elements unique: an insert of an element comparing equal to a stored one
//! is rejected.
//!
//! | Operation | Result |
//! |-----------|--------|
//! | [`OrderedTree::search`] | `Option<&TreeNode>` |
//! | [`OrderedTree::insert`] | `bool` (inserted or rejected) |
//! | [`OrderedTree::get_or_insert_with`] | `&mut E` (find-or-insert) |
//! | [`OrderedTree::remove_min`] / [`OrderedTree::remove_max`] | `Option<E>` |
//! | [`OrderedTree::in_order_iter`] etc. | borrowed one-shot iterators |
//!
//! # Word records
//! A [WordRecord] holds one word and the lines it occurs on per file.
//! Records are ordered by word only, so `OrderedTree<WordRecord>` forms the
//! complete index (see [WordIndex](crate::index::WordIndex)).

pub mod node;
pub mod tree;
pub mod word_record;

// Tree (generic)
pub use node::NodeIndex;
pub use node::TreeNode;
pub use tree::OrderedTree;
pub use tree::{InOrderIter, PostOrderIter, PreOrderIter};
// Word records
pub use word_record::LineNumber;
pub use word_record::WordRecord;
