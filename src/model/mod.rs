//! Data model for binary trees with parent back-references.
//!
//! # Tree representation
//! Trees are represented by [BinaryTree], which uses the arena pattern to store
//! [Node]s, referenced by [NodeId]. Each node owns up to two children ([Side::Left]
//! and [Side::Right]) and knows its parent.
//!
//! # Building trees
//! - [BinaryTree::new] creates a tree with a single root
//! - [attach_left](BinaryTree::attach_left) / [attach_right](BinaryTree::attach_right)
//!   add new leaves
//! - [create_detached](BinaryTree::create_detached) and
//!   [attach_existing_left](BinaryTree::attach_existing_left) build fragments first and
//!   link them later
//! - [graft_left](BinaryTree::graft_left) / [graft_right](BinaryTree::graft_right)
//!   move a whole other tree below a node, consuming it
//!
//! # Payload handling
//! Payloads are a type parameter. Conversion to and from text for the braced
//! format goes through a [PayloadCodec]; writing alone only needs a
//! [PayloadRenderer].

pub mod node;
pub mod payload_codec;
pub mod tree;
pub mod tree_error;

pub use node::{Node, Side};
pub use payload_codec::{FnCodec, PayloadCodec, PayloadRenderer, TextCodec};
pub use tree::{BinaryTree, NodeId, PostOrderIter, PreOrderIter};
pub use tree_error::{TreeError, TreeResult};
