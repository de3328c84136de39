//! Node module for the binary tree representation.

use crate::model::tree::NodeId;
use std::fmt;

// =#========================================================================#=
// SIDE
// =#========================================================================#=
/// Which child slot of a node is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Returns the other side.
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A node of a [BinaryTree](crate::model::BinaryTree), stored in the tree's arena.
///
/// # Invariants
/// - `left` and `right` are owning references: each node is the child of at most one node
/// - `parent` is a back-reference only; it is set iff this node is the left or right child
///   of exactly that parent
/// - The root and roots of detached fragments have no parent
#[derive(Debug, Clone, PartialEq)]
pub struct Node<T> {
    /// Caller-owned data of this node
    payload: T,
    /// Left child, if any
    left: Option<NodeId>,
    /// Right child, if any
    right: Option<NodeId>,
    /// Node owning this one as a child, if any
    parent: Option<NodeId>,
}

impl<T> Node<T> {
    /// Creates a childless node without parent.
    pub(crate) fn new(payload: T) -> Self {
        Node {
            payload,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// Creates a childless node below `parent`.
    pub(crate) fn with_parent(payload: T, parent: NodeId) -> Self {
        Node {
            parent: Some(parent),
            ..Node::new(payload)
        }
    }

    /// Returns a reference to the payload.
    pub fn payload(&self) -> &T {
        &self.payload
    }

    /// Returns a mutable reference to the payload.
    pub fn payload_mut(&mut self) -> &mut T {
        &mut self.payload
    }

    /// Consumes the node and returns its payload.
    pub(crate) fn into_payload(self) -> T {
        self.payload
    }

    /// Returns the left child, if any.
    pub fn left(&self) -> Option<NodeId> {
        self.left
    }

    /// Returns the right child, if any.
    pub fn right(&self) -> Option<NodeId> {
        self.right
    }

    /// Returns the child on the given side, if any.
    pub fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Returns the parent, or `None` for a root (of the tree or of a fragment).
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Returns `true` if this node has a parent.
    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    /// Returns `true` if this node has neither a left nor a right child.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// Returns the side on which `child` hangs below this node, if it does.
    pub fn side_of(&self, child: NodeId) -> Option<Side> {
        if self.left == Some(child) {
            Some(Side::Left)
        } else if self.right == Some(child) {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Iterates over the present children, left before right.
    pub fn children(&self) -> impl Iterator<Item = NodeId> {
        self.left.into_iter().chain(self.right)
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<NodeId>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeId>) {
        self.parent = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_node_is_leaf_without_parent() {
        let node = Node::new("Kea");
        assert!(node.is_leaf());
        assert!(!node.has_parent());
        assert_eq!(node.payload(), &"Kea");
        assert_eq!(node.children().count(), 0);
    }

    #[test]
    fn test_side_display_and_opposite() {
        assert_eq!(Side::Left.to_string(), "left");
        assert_eq!(Side::Right.to_string(), "right");
        assert_eq!(Side::Left.opposite(), Side::Right);
        assert_eq!(Side::Right.opposite(), Side::Left);
    }
}
