//! Braced format writing.

use crate::braced::defs::{CLOSE, NO_LEFT_MARKER, OPEN, QUOTE, RESERVED, SEPARATOR};
use crate::model::{BinaryTree, NodeId, PayloadRenderer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, instrument};

/// Estimated characters per node: quotes, braces, separators and a short payload
const NODE_CHARS: usize = 12;

/// Errors that can occur while writing a tree in braced format.
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("payload {payload:?} contains reserved character '{character}'")]
    ReservedCharacter { payload: String, character: char },

    #[error("failed to write braced tree: {0}")]
    Io(#[from] io::Error),
}

/// Tokens still to be written, kept on an explicit stack
enum Token {
    Open,
    Close,
    Marker,
    Node(NodeId),
}

/// Returns the braced representation of a tree.
///
/// Each node is written as its quoted payload, followed by its left child in
/// braces (or the marker `$` if it has only a right child), followed by its
/// right child in braces. Tokens are separated by a single space and the whole
/// tree is enclosed in braces.
///
/// # Arguments
/// * `tree` - The tree to write
/// * `codec` - Renders each payload; called once per node
///
/// # Errors
/// [WriteError::ReservedCharacter] if a rendered payload contains `"`, `{`, `}` or `$`.
///
/// # Example
/// ```
/// use bracetree::braced::to_braced;
/// use bracetree::model::{BinaryTree, TextCodec};
///
/// let mut tree = BinaryTree::new(1);
/// let root = tree.root();
/// tree.attach_right(root, 3)?;
///
/// let braced = to_braced(&tree, &TextCodec::new())?;
/// assert_eq!(braced, "{ \"1\" $ { \"3\" } }");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[instrument(level = "debug", skip_all, fields(size = tree.size()))]
pub fn to_braced<C: PayloadRenderer>(tree: &BinaryTree<C::Payload>, codec: &C) -> Result<String, WriteError> {
    let mut braced = String::with_capacity(tree.size() * NODE_CHARS);

    // Tokens are popped, so everything gets pushed in reverse
    let mut pending = vec![Token::Close, Token::Node(tree.root()), Token::Open];
    while let Some(token) = pending.pop() {
        if !braced.is_empty() {
            braced.push(SEPARATOR);
        }

        match token {
            Token::Open => braced.push(OPEN as char),
            Token::Close => braced.push(CLOSE as char),
            Token::Marker => braced.push(NO_LEFT_MARKER as char),
            Token::Node(id) => {
                let node = &tree[id];
                push_payload(&mut braced, codec.render(node.payload()))?;

                if let Some(right) = node.right() {
                    pending.extend([Token::Close, Token::Node(right), Token::Open]);
                }
                match node.left() {
                    Some(left) => pending.extend([Token::Close, Token::Node(left), Token::Open]),
                    None if node.right().is_some() => pending.push(Token::Marker),
                    None => {}
                }
            }
        }
    }

    debug!(len = braced.len(), "wrote braced tree");
    Ok(braced)
}

/// Writes the braced representation of a tree to the given writer.
///
/// The text is built completely before anything is written, so a rejected
/// payload leaves the writer untouched.
///
/// # Errors
/// [WriteError::ReservedCharacter] for rejected payloads, [WriteError::Io] if writing fails.
pub fn write_braced<W: Write, C: PayloadRenderer>(writer: W, tree: &BinaryTree<C::Payload>, codec: &C) -> Result<(), WriteError> {
    let braced = to_braced(tree, codec)?;

    let mut writer = BufWriter::new(writer);
    writer.write_all(braced.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Writes the braced representation of a tree to a file, replacing its content.
///
/// The file is only created once the text was built successfully.
///
/// # Example
/// ```no_run
/// use bracetree::braced::write_braced_file;
/// use bracetree::model::{BinaryTree, TextCodec};
///
/// let tree = BinaryTree::new("lonely root".to_string());
/// write_braced_file("tree.txt", &tree, &TextCodec::new())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn write_braced_file<P: AsRef<Path>, C: PayloadRenderer>(path: P, tree: &BinaryTree<C::Payload>, codec: &C) -> Result<(), WriteError> {
    let braced = to_braced(tree, codec)?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(braced.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Appends a quoted payload, rejecting text that would break the format.
fn push_payload(braced: &mut String, rendered: String) -> Result<(), WriteError> {
    if let Some(character) = rendered.chars().find(|c| RESERVED.contains(c)) {
        return Err(WriteError::ReservedCharacter { payload: rendered, character });
    }

    braced.push(QUOTE as char);
    braced.push_str(&rendered);
    braced.push(QUOTE as char);
    Ok(())
}
