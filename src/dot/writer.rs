//! Graphviz DOT writing for binary trees.

use crate::model::{BinaryTree, NodeId, Side};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::instrument;

/// Extra buffer per node in DOT length/capacity estimate
const NODE_CHARS: usize = 160;

/// Renders a payload for display in a node record.
pub type RenderFn<'a, T> = &'a dyn Fn(&T) -> String;

/// Position of a node in its tree, used to colour it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Root,
    LeftChild,
    RightChild,
}

impl Role {
    /// Returns the Graphviz fill colour for this role.
    pub fn fill_color(&self) -> &'static str {
        match self {
            Role::Root => "mediumturquoise",
            Role::LeftChild => "indianred",
            Role::RightChild => "springgreen",
        }
    }

    fn port(&self) -> Option<&'static str> {
        match self {
            Role::Root => None,
            Role::LeftChild => Some("left"),
            Role::RightChild => Some("right"),
        }
    }
}

/// Returns a Graphviz `digraph` describing the tree.
///
/// Each node becomes a record showing its identity, its parent, the optional
/// rendered payload, and its left and right children. Edges lead from the
/// parent's `left`/`right` port to the child and back to the parent port.
/// Node names are derived from node identity (`node<slot>_<generation>`).
///
/// # Arguments
/// * `tree` - The tree to describe; only read
/// * `render` - Optional payload renderer; without it, payloads are left out
///
/// # Example
/// ```
/// use bracetree::dot::to_dot;
/// use bracetree::model::BinaryTree;
///
/// let mut tree = BinaryTree::new(1);
/// let root = tree.root();
/// tree.attach_left(root, 2)?;
///
/// let dot = to_dot(&tree, Some(&|value: &i32| value.to_string()));
/// assert!(dot.starts_with("digraph {\nconcentrate=true\n"));
/// assert!(dot.contains("fillcolor=indianred"));
/// # Ok::<(), bracetree::model::TreeError>(())
/// ```
#[instrument(level = "debug", skip_all, fields(size = tree.size()))]
pub fn to_dot<T>(tree: &BinaryTree<T>, render: Option<RenderFn<'_, T>>) -> String {
    let mut dot = String::with_capacity(tree.size() * NODE_CHARS);
    dot.push_str("digraph {\nconcentrate=true\n");

    for (id, node) in tree.pre_order_iter() {
        let role = match tree.side_of(id) {
            Ok(Some(Side::Left)) => Role::LeftChild,
            Ok(Some(Side::Right)) => Role::RightChild,
            _ => Role::Root,
        };

        // - "node<id>[shape=record, label="{...}", style=filled, fillcolor=...];"
        dot.push_str(&format!("{}[shape=record, label=\"{{{} | {{PARENT|{}}}", node_name(id), id, display_id(node.parent())));
        if let Some(render) = render {
            dot.push_str(" | ");
            dot.push_str(&escape_record(&render(node.payload())));
        }
        dot.push_str(&format!(
            " | {{{{LEFT |<left> {}}} | {{RIGHT |<right> {}}}}}}}\", style=filled, fillcolor={}];\n",
            display_id(node.left()),
            display_id(node.right()),
            role.fill_color(),
        ));

        // - "<child> -> <parent>:<port>;" and "<parent>:<port> -> <child>;"
        if let (Some(parent), Some(port)) = (node.parent(), role.port()) {
            let (child, parent) = (node_name(id), node_name(parent));
            dot.push_str(&format!("{child} -> {parent}:{port};\n{parent}:{port} -> {child};\n"));
        }
    }

    dot.push_str("}\n");
    dot
}

/// Writes the DOT description of a tree to the given writer.
///
/// # Errors
/// Returns an I/O error if writing fails.
pub fn write_dot<W: Write, T>(writer: W, tree: &BinaryTree<T>, render: Option<RenderFn<'_, T>>) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writer.write_all(to_dot(tree, render).as_bytes())?;
    writer.flush()
}

/// Writes the DOT description of a tree to a file, replacing its content.
///
/// # Example
/// ```no_run
/// use bracetree::dot::write_dot_file;
/// use bracetree::model::BinaryTree;
///
/// let tree = BinaryTree::new("root");
/// write_dot_file("tree.dot", &tree, None)?;
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn write_dot_file<P: AsRef<Path>, T>(path: P, tree: &BinaryTree<T>, render: Option<RenderFn<'_, T>>) -> io::Result<()> {
    write_dot(File::create(path)?, tree, render)
}

fn node_name(id: NodeId) -> String {
    let (slot, generation) = id.raw_parts();
    format!("node{slot}_{generation}")
}

fn display_id(id: Option<NodeId>) -> String {
    id.map_or_else(|| "nil".to_string(), |id| id.to_string())
}

/// Escapes characters with special meaning in record labels.
fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '|' | '<' | '>' | '"' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
