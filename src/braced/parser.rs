//! Braced format parsing.

use crate::braced::defs::{CLOSE, DEFAULT_MAX_DEPTH, NO_LEFT_MARKER, OPEN, QUOTE};
use crate::model::{BinaryTree, NodeId, PayloadCodec, Side};
use crate::parser::parsing_error::{ParsingError, ParsingErrorType};
use crate::parser::scan::{find_byte, skip_whitespace};
use std::fs;
use std::path::Path;
use tracing::{debug, instrument, trace};

/// Parser (configuration) for trees in braced format.
///
/// Uses a [PayloadCodec] to turn the quoted text of each node into a payload.
///
/// # Configuration
/// * `with_max_depth(max_depth)` - Maximum nesting depth accepted, the root being
///   at depth 1 (default: no limit).
///
/// # Procedure
/// The text is read once from front to back. Nodes whose closing brace has not
/// been seen yet are kept on a stack (on the heap), so nesting depth is bounded
/// by memory only. After its payload, a node accepts:
/// 1. `}` - the node is a leaf
/// 2. `$` - no left child; exactly one block must follow, which is the right child
/// 3. `{` - the block is the left child; it may be followed by one more block,
///    the right child
///
/// Anything else within a node's braces is [ParsingErrorType::UnexpectedContent],
/// and anything but whitespace after the root's closing brace is
/// [ParsingErrorType::TrailingContent]. Nodes are added to the tree as they are
/// read; on error the tree is dropped, so no partial tree is ever handed out.
///
/// # Example
/// ```
/// use bracetree::braced::BracedParser;
/// use bracetree::model::TextCodec;
///
/// let parser = BracedParser::new(TextCodec::<u8>::new()).with_max_depth(16);
/// let tree = parser.parse_str("{ \"1\" $ { \"3\" } }")?;
///
/// let root = tree.root();
/// assert_eq!(tree.left(root)?, None);
/// let right = tree.right(root)?.unwrap();
/// assert_eq!(tree.payload(right)?, &3);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct BracedParser<C: PayloadCodec> {
    codec: C,
    max_depth: usize,
}

/// What a node accepts next, after its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    /// `$`, a left block, or `}`
    Children,
    /// The right block announced by the `$` at `marker`
    RightAfterMarker { marker: usize },
    /// A right block or `}`
    RightOrClose,
    /// `}` only
    Close,
}

/// A node whose closing brace has not been read yet
struct OpenNode {
    id: NodeId,
    /// Position of its `{`
    open: usize,
    expect: Expect,
}

impl<C: PayloadCodec> BracedParser<C> {
    /// Creates a new `BracedParser` with default settings.
    pub fn new(codec: C) -> Self {
        Self {
            codec,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Sets the maximum nesting depth; the root is at depth 1.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the configured maximum nesting depth.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Consumes the parser and returns the underlying [PayloadCodec].
    pub fn into_codec(self) -> C {
        self.codec
    }

    /// Parses a tree from a string.
    ///
    /// # Errors
    /// A [ParsingError] describing the first problem found, with its position.
    pub fn parse_str<S: AsRef<str>>(&self, braced: S) -> Result<BinaryTree<C::Payload>, ParsingError> {
        self.parse_bytes(braced.as_ref().as_bytes())
    }

    /// Parses a tree from a file, reading it completely before parsing.
    ///
    /// # Errors
    /// [ParsingErrorType::IoError] if the file cannot be read, otherwise as [BracedParser::parse_str].
    pub fn parse_file<P: AsRef<Path>>(&self, path: P) -> Result<BinaryTree<C::Payload>, ParsingError> {
        let bytes = fs::read(path)?;
        self.parse_bytes(&bytes)
    }

    /// Parses a tree from bytes holding UTF-8 text.
    #[instrument(level = "debug", skip_all, fields(len = text.len()))]
    pub fn parse_bytes(&self, text: &[u8]) -> Result<BinaryTree<C::Payload>, ParsingError> {
        let end = text.len();

        // Root: `{` and its payload
        let open = skip_whitespace(text, 0, end);
        if text.get(open) != Some(&OPEN) {
            return Err(ParsingError::at(ParsingErrorType::MissingOpeningBrace, text, open));
        }
        self.check_depth(1, text, open)?;
        let (payload, mut pos) = self.parse_payload(text, open + 1)?;

        let mut tree = BinaryTree::new(payload);
        let mut open_nodes = vec![OpenNode { id: tree.root(), open, expect: Expect::Children }];

        loop {
            let depth = open_nodes.len();
            let Some(current) = open_nodes.last_mut() else {
                break;
            };

            pos = skip_whitespace(text, pos, end);
            let Some(&byte) = text.get(pos) else {
                return Err(ParsingError::unbalanced_braces(text, current.open));
            };

            match (byte, current.expect) {
                (CLOSE, Expect::RightAfterMarker { marker }) => {
                    return Err(ParsingError::at(ParsingErrorType::DanglingMarker, text, marker));
                }
                (CLOSE, _) => {
                    open_nodes.pop();
                    pos += 1;
                }
                (NO_LEFT_MARKER, Expect::Children) => {
                    current.expect = Expect::RightAfterMarker { marker: pos };
                    pos += 1;
                }
                (OPEN, Expect::Children | Expect::RightAfterMarker { .. } | Expect::RightOrClose) => {
                    let (side, next) = match current.expect {
                        Expect::Children => (Side::Left, Expect::RightOrClose),
                        _ => (Side::Right, Expect::Close),
                    };
                    current.expect = next;
                    let parent = current.id;

                    self.check_depth(depth + 1, text, pos)?;
                    let (payload, after_payload) = self.parse_payload(text, pos + 1)?;
                    trace!(depth = depth + 1, position = pos, %side, "parsed node");

                    let id = tree.grow(parent, side, payload);
                    open_nodes.push(OpenNode { id, open: pos, expect: Expect::Children });
                    pos = after_payload;
                }
                _ => {
                    return Err(ParsingError::at(ParsingErrorType::UnexpectedContent, text, pos));
                }
            }
        }

        let trailing = skip_whitespace(text, pos, end);
        if trailing < end {
            return Err(ParsingError::at(ParsingErrorType::TrailingContent, text, trailing));
        }

        debug!(size = tree.size(), "parsed braced tree");
        Ok(tree)
    }

    fn check_depth(&self, depth: usize, text: &[u8], open: usize) -> Result<(), ParsingError> {
        if depth > self.max_depth {
            return Err(ParsingError::at(ParsingErrorType::NestingTooDeep(self.max_depth), text, open));
        }
        Ok(())
    }

    /// Parses the quoted payload at `start` (after whitespace).
    ///
    /// # Returns
    /// The payload and the position just after its closing quote.
    fn parse_payload(&self, text: &[u8], start: usize) -> Result<(C::Payload, usize), ParsingError> {
        let end = text.len();
        let quote = skip_whitespace(text, start, end);
        if quote >= end || text[quote] != QUOTE {
            return Err(ParsingError::at(ParsingErrorType::ExpectedPayload, text, quote));
        }

        let Some(closing) = find_byte(text, quote + 1, end, QUOTE) else {
            return Err(ParsingError::at(ParsingErrorType::UnterminatedQuote, text, quote));
        };

        let raw = std::str::from_utf8(&text[quote + 1..closing])
            .map_err(|err| ParsingError::payload_rejected(text, quote + 1, err.to_string()))?;
        let payload = self.codec.parse(raw)
            .map_err(|msg| ParsingError::payload_rejected(text, quote + 1, msg))?;

        Ok((payload, closing + 1))
    }
}
