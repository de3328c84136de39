//! Graphviz DOT export of binary trees for visual inspection.
//!
//! Nodes are drawn as records listing their own identity, their parent, the
//! optionally rendered payload, and their children. The root is filled
//! turquoise, left children red and right children green.
//!
//! Render the written file with `dot -Tsvg tree.dot -o tree.svg`.

pub mod writer;

pub use writer::{RenderFn, Role, to_dot, write_dot, write_dot_file};
