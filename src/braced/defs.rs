/// Opens a tree or a child block
pub(crate) const OPEN: u8 = b'{';

/// Closes a tree or a child block
pub(crate) const CLOSE: u8 = b'}';

/// Encloses a payload
pub(crate) const QUOTE: u8 = b'"';

/// Stands in for an absent left child when a right child follows
pub(crate) const NO_LEFT_MARKER: u8 = b'$';

/// Separates tokens when writing
pub(crate) const SEPARATOR: char = ' ';

/// Characters a rendered payload must not contain
pub(crate) const RESERVED: [char; 4] = ['"', '{', '}', '$'];

/// Default maximum nesting depth accepted by the parser (no limit)
pub(crate) const DEFAULT_MAX_DEPTH: usize = usize::MAX;
