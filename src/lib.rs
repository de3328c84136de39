//! Bracetree is a library for binary trees with parent back-references and
//! their lossless brace-delimited text form.
//!
//! Core functionality provided:
//! - Tree model: [BinaryTree] stores its nodes in an arena and hands out
//!   [NodeId] handles; every node knows its parent and its left and right child.
//!   - Navigation: payload, children, parent and side of any node
//!   - Mutation: attach new leaves, graft whole trees (consuming them),
//!     detach and re-attach fragments, delete subtrees
//!   - Stale and foreign handles are detected and rejected.
//!   - See [crate::model] for more details.
//! - Braced format: encode a tree as `{ "1" { "2" } $ ... }` style text and
//!   decode it back, preserving which side each child is on.
//!   - See [crate::braced] for the grammar.
//! - Payloads: a [PayloadCodec] converts payloads to and from text; any type
//!   implementing `Display` and `FromStr` works out of the box via [TextCodec].
//!   Writing only needs a [PayloadRenderer], so `Display` alone suffices.
//! - DOT export: write a tree as a Graphviz graph, see [crate::dot].
//!
//! Limitations:
//! - Payload text must not contain `"`, `{`, `}` or `$`; there is no escaping
//! - Trees are binary and never empty
//!
//! # Usage patterns
//! 1. Several functions provide quick access with default settings for
//!    payloads implementing `Display` and `FromStr`.
//!    See [crate::braced] documentation.
//! 2. Configure a [BracedParser] with your own [PayloadCodec] and settings
//!    such as the maximum nesting depth.
//!
//! ## Example Default Configuration
//!
//! Build a tree and encode it:
//! ```
//! use bracetree::{BinaryTree, to_braced_string};
//!
//! let mut tree = BinaryTree::new(1);
//! let root = tree.root();
//! tree.attach_left(root, 2)?;
//! let three = tree.attach_right(root, 3)?;
//! tree.attach_right(three, 6)?;
//!
//! assert_eq!(to_braced_string(&tree)?, "{ \"1\" { \"2\" } { \"3\" $ { \"6\" } } }");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Decode it again:
//! ```
//! use bracetree::{BinaryTree, parse_braced_str};
//!
//! let tree: BinaryTree<u32> = parse_braced_str("{ \"1\" { \"2\" } { \"3\" $ { \"6\" } } }")?;
//! assert_eq!(tree.size(), 4);
//! # Ok::<(), bracetree::parser::ParsingError>(())
//! ```
//!
//! ## Example Parser Configuration
//!
//! ```
//! use bracetree::braced::BracedParser;
//! use bracetree::model::FnCodec;
//!
//! let codec = FnCodec::new(
//!     |word: &String| word.to_uppercase(),
//!     |text: &str| Ok(text.to_lowercase()),
//! );
//! let parser = BracedParser::new(codec).with_max_depth(64);
//!
//! let tree = parser.parse_str("{ \"KIWI\" $ { \"TUI\" } }")?;
//! assert_eq!(tree.payload(tree.root())?, "kiwi");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod braced;
pub mod dot;
pub mod model;
pub mod parser;

pub use crate::braced::{BracedParser, WriteError};
pub use crate::model::{BinaryTree, NodeId, PayloadCodec, PayloadRenderer, Side, TextCodec, TreeError};
pub use crate::parser::ParsingError;

use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// Quick Braced API
// ============================================================================
/// Parse a braced string using default settings, returning a [BinaryTree].
///
/// See [`braced::parse_str`] for full documentation of this convenience function.
pub fn parse_braced_str<T, S>(braced: S) -> Result<BinaryTree<T>, ParsingError>
where
    T: Display + FromStr,
    T::Err: Display,
    S: AsRef<str>,
{
    braced::parse_str(braced)
}

/// Parse a file holding one braced tree using default settings, returning a [BinaryTree].
///
/// See [`braced::parse_file`] for full documentation of this convenience function.
pub fn parse_braced_file<T, P>(path: P) -> Result<BinaryTree<T>, ParsingError>
where
    T: Display + FromStr,
    T::Err: Display,
    P: AsRef<Path>,
{
    braced::parse_file(path)
}

/// Encode a tree in braced format, rendering payloads with `Display`.
///
/// See [`braced::to_braced`] for full documentation.
pub fn to_braced_string<T: Display>(tree: &BinaryTree<T>) -> Result<String, WriteError> {
    braced::to_string(tree)
}

/// Write a tree in braced format to a file, rendering payloads with `Display`.
///
/// See [`braced::write_braced_file`] for full documentation.
pub fn write_braced_file<T: Display, P: AsRef<Path>>(path: P, tree: &BinaryTree<T>) -> Result<(), WriteError> {
    braced::write_file(path, tree)
}
