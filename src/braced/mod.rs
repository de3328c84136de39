//! Braced format parser and writer for binary trees.
//!
//! This module provides [BracedParser] to parse braced text into a
//! [BinaryTree], and [to_braced] and friends to write one.
//!
//! # Quick API
//! For payloads implementing [Display] (writing) and [FromStr] (parsing):
//! * [`parse_str`] - parses a single string
//! * [`parse_file`] - parses a file
//! * [`to_string`] - writes a tree to a string
//! * [`write_file`] - writes a tree to a file
//!
//! # Full API
//! For other payloads, provide a [PayloadCodec](crate::model::PayloadCodec), or
//! just a [PayloadRenderer](crate::model::PayloadRenderer) for writing:
//! * [`BracedParser::parse_str`] / [`BracedParser::parse_file`]
//! * [`to_braced`], [`write_braced`], [`write_braced_file`]
//!
//! # Format
//! The braced format has the following simple grammar:
//! * `tree ::= '{' node '}'`
//! * `node ::= payload [left_part] [right_part]`
//! * `left_part ::= '{' node '}' | '$'`
//! * `right_part ::= '{' node '}'`
//! * `payload ::= '"' text '"'`
//!
//! Furthermore:
//! * The marker `$` stands in for a missing left child and is only written
//!   when a right child follows; a node with just one block thus has a left child
//! * Payload text must not contain `"`, `{`, `}` or `$`; the writer rejects it
//! * The writer separates tokens with a single space; the parser accepts any
//!   whitespace between tokens
//!
//! For example, a root `1` with a left leaf `2` and a right child `3`, which
//! itself has only a right leaf `4`:
//! ```text
//! { "1" { "2" } { "3" $ { "4" } } }
//! ```

mod defs;
pub mod parser;
pub mod writer;

pub use parser::BracedParser;
pub use writer::{WriteError, to_braced, write_braced, write_braced_file};

use crate::model::{BinaryTree, TextCodec};
use crate::parser::ParsingError;
use std::fmt::Display;
use std::path::Path;
use std::str::FromStr;

// ============================================================================
// QUICK API (pub)
// ============================================================================
/// Parses a braced string into a [BinaryTree], parsing payloads with [FromStr].
///
/// This is a convenience function using default settings and thus not
/// requiring configuration of a parser.
///
/// # Arguments
/// * `braced` - The braced format string to parse
///
/// # Returns
/// * [BinaryTree] - Tree parsed from the string
/// * [ParsingError] - If the string is not valid braced format or a payload is rejected
///
/// # Example
/// ```
/// use bracetree::braced::parse_str;
/// use bracetree::model::BinaryTree;
///
/// let tree: BinaryTree<i32> = parse_str("{ \"1\" { \"2\" } { \"3\" } }")?;
/// assert_eq!(tree.size(), 3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_str<T, S>(braced: S) -> Result<BinaryTree<T>, ParsingError>
where
    T: Display + FromStr,
    T::Err: Display,
    S: AsRef<str>,
{
    BracedParser::new(TextCodec::new()).parse_str(braced)
}

/// Parses a file holding one braced tree, parsing payloads with [FromStr].
///
/// # Arguments
/// * `path` - Path to the file (accepting `&str`, `String`, `Path`, or `PathBuf`)
///
/// # Returns
/// * [BinaryTree] - Tree parsed from the file
/// * [ParsingError] - If file reading fails or the content is not valid braced format
pub fn parse_file<T, P>(path: P) -> Result<BinaryTree<T>, ParsingError>
where
    T: Display + FromStr,
    T::Err: Display,
    P: AsRef<Path>,
{
    BracedParser::new(TextCodec::new()).parse_file(path)
}

/// Returns the braced representation of a tree, rendering payloads with [Display].
///
/// See [to_braced] for details.
pub fn to_string<T: Display>(tree: &BinaryTree<T>) -> Result<String, WriteError> {
    to_braced(tree, &TextCodec::new())
}

/// Writes the braced representation of a tree to a file, rendering payloads with [Display].
///
/// See [write_braced_file] for details.
pub fn write_file<T: Display, P: AsRef<Path>>(path: P, tree: &BinaryTree<T>) -> Result<(), WriteError> {
    write_braced_file(path, tree, &TextCodec::new())
}
