//! Tree module for the binary tree representation.
//!
//! This module provides the core data structures:
//! - [BinaryTree]: The tree, storing its [Node]s in a generational arena.
//! - [NodeId]: Stable handle of a node, used for all navigation and mutation.
//! - [PreOrderIter] and [PostOrderIter]: Stack-based traversals.

use crate::model::node::{Node, Side};
use crate::model::tree_error::{TreeError, TreeResult};
use generational_arena::{Arena, Index};
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{instrument, trace};

/// Source of unique tree identities, so that handles of one tree are rejected by another.
static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of a [BinaryTree] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct TreeId(u64);

impl TreeId {
    fn fresh() -> Self {
        TreeId(NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

// =#========================================================================#=
// NODE ID
// =#========================================================================#=
/// Handle of a node in a [BinaryTree].
///
/// A handle stays valid as long as its node lives in the tree that created it.
/// Handles of released nodes (stale arena generation) and handles of other
/// trees are rejected with [TreeError::InvalidNode].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: TreeId,
    index: Index,
}

impl NodeId {
    /// Returns the arena slot and generation of this handle.
    ///
    /// The pair is unique among the live nodes of one tree and is used as
    /// node identity in exports.
    pub fn raw_parts(&self) -> (usize, u64) {
        self.index.into_raw_parts()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (slot, generation) = self.raw_parts();
        write!(f, "{slot}:{generation}")
    }
}

// =#========================================================================#=
// BINARY TREE
// =#========================================================================#=
/// A rooted binary tree with parent back-references, using the arena pattern on [Node].
///
/// Nodes are owned by the tree's arena and referenced by [NodeId]. Child links
/// are owning, parent links are back-references only.
///
/// # Structure
/// - There is always exactly one root; it has no parent
/// - `size` counts the nodes reachable from the root, root included
/// - Detached fragments (see [BinaryTree::create_detached]) may live in the arena
///   without being counted, until they are attached
/// - Grafting takes the donor tree by value; its nodes move into this arena
///
/// # Example
/// ```
/// use bracetree::model::BinaryTree;
///
/// let mut tree = BinaryTree::new("+");
/// let root = tree.root();
/// let left = tree.attach_left(root, "1")?;
/// tree.attach_right(root, "2")?;
///
/// assert_eq!(tree.size(), 3);
/// assert_eq!(tree.parent(left)?, Some(root));
/// assert!(tree.is_valid());
/// # Ok::<(), bracetree::model::TreeError>(())
/// ```
#[derive(Debug)]
pub struct BinaryTree<T> {
    /// Identity of this tree, stamped into each [NodeId]
    id: TreeId,

    /// Nodes of this tree (arena pattern)
    arena: Arena<Node<T>>,

    /// Arena slot of the root
    root: Index,

    /// Number of nodes reachable from the root
    size: usize,
}

// ============================================================================
// New, Getters / Accessors, etc. (pub)
// ============================================================================
impl<T> BinaryTree<T> {
    /// Creates a tree consisting of a single root holding `payload`.
    pub fn new(payload: T) -> Self {
        let mut arena = Arena::new();
        let root = arena.insert(Node::new(payload));
        BinaryTree {
            id: TreeId::fresh(),
            arena,
            root,
            size: 1,
        }
    }

    /// Returns the handle of the root.
    pub fn root(&self) -> NodeId {
        self.id_of(self.root)
    }

    /// Returns the number of nodes reachable from the root, including the root.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns `true` if `node` is a live node of this tree (reachable or in a fragment).
    pub fn contains(&self, node: NodeId) -> bool {
        self.index_of(node).is_ok()
    }

    /// Returns a reference to the node behind the given handle.
    pub fn node(&self, node: NodeId) -> TreeResult<&Node<T>> {
        let index = self.index_of(node)?;
        Ok(&self.arena[index])
    }

    /// Returns a reference to the payload of `node`.
    pub fn payload(&self, node: NodeId) -> TreeResult<&T> {
        self.node(node).map(Node::payload)
    }

    /// Returns a mutable reference to the payload of `node`.
    pub fn payload_mut(&mut self, node: NodeId) -> TreeResult<&mut T> {
        let index = self.index_of(node)?;
        Ok(self.arena[index].payload_mut())
    }

    /// Returns the left child of `node`, if any.
    pub fn left(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.node(node).map(Node::left)
    }

    /// Returns the right child of `node`, if any.
    pub fn right(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.node(node).map(Node::right)
    }

    /// Returns the parent of `node`, or `None` for the root and fragment roots.
    pub fn parent(&self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.node(node).map(Node::parent)
    }

    /// Returns on which side of its parent `node` hangs, or `None` if it has no parent.
    pub fn side_of(&self, node: NodeId) -> TreeResult<Option<Side>> {
        let Some(parent) = self.parent(node)? else {
            return Ok(None);
        };
        Ok(self.node(parent)?.side_of(node))
    }

    /// Returns the number of nodes in the subtree rooted at `node`, `node` included.
    pub fn subtree_size(&self, node: NodeId) -> TreeResult<usize> {
        let index = self.index_of(node)?;
        Ok(self.count_from(index))
    }

    /// Returns the number of reachable nodes without children.
    pub fn num_leaves(&self) -> usize {
        self.pre_order_iter().filter(|(_, node)| node.is_leaf()).count()
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self.root, 1)];
        while let Some((index, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            for child in self.arena[index].children() {
                stack.push((child.index, depth + 1));
            }
        }
        deepest
    }

    /// Returns `true` if `node` is reachable from the root.
    pub fn is_reachable(&self, node: NodeId) -> TreeResult<bool> {
        let index = self.index_of(node)?;
        Ok(self.reaches_root(index))
    }

    /// Returns an iterator over the reachable nodes in pre-order (parents before children).
    pub fn pre_order_iter(&self) -> PreOrderIter<'_, T> {
        PreOrderIter::new(self, self.root)
    }

    /// Returns an iterator over the reachable nodes in post-order (children before parents).
    ///
    /// This is the order in which a subtree is released.
    pub fn post_order_iter(&self) -> PostOrderIter<'_, T> {
        PostOrderIter::new(self, self.root)
    }
}

impl<T> std::ops::Index<NodeId> for BinaryTree<T> {
    type Output = Node<T>;

    /// # Panics
    /// Panics if `node` is not a live node of this tree.
    fn index(&self, node: NodeId) -> &Self::Output {
        match self.index_of(node) {
            Ok(index) => &self.arena[index],
            Err(err) => panic!("{err}"),
        }
    }
}

// ============================================================================
// Mutation (pub)
// ============================================================================
impl<T> BinaryTree<T> {
    /// Adds a new childless node holding `payload` as left child of `node`.
    ///
    /// # Returns
    /// The handle of the new node.
    ///
    /// # Errors
    /// * [TreeError::InvalidNode] - if `node` is not a live node of this tree
    /// * [TreeError::Occupied] - if `node` already has a left child;
    ///   detach or delete it first
    pub fn attach_left(&mut self, node: NodeId, payload: T) -> TreeResult<NodeId> {
        self.attach(node, Side::Left, payload)
    }

    /// Adds a new childless node holding `payload` as right child of `node`.
    ///
    /// See [BinaryTree::attach_left] for errors.
    pub fn attach_right(&mut self, node: NodeId, payload: T) -> TreeResult<NodeId> {
        self.attach(node, Side::Right, payload)
    }

    /// Adds a new childless node holding `payload` on the given side of `node`.
    #[instrument(level = "trace", skip(self, payload))]
    pub fn attach(&mut self, node: NodeId, side: Side, payload: T) -> TreeResult<NodeId> {
        let index = self.index_of(node)?;
        self.ensure_vacant(index, side)?;

        let child = self.arena.insert(Node::with_parent(payload, node));
        let child = self.id_of(child);
        self.arena[index].set_child(side, Some(child));
        if self.reaches_root(index) {
            self.size += 1;
        }

        Ok(child)
    }

    /// Appends a new childless node below `parent` without any checks.
    ///
    /// `parent` must be a live, reachable node of this tree with a vacant `side`.
    /// Used by parsers, which mint every parent themselves and fill each side once.
    pub(crate) fn grow(&mut self, parent: NodeId, side: Side, payload: T) -> NodeId {
        debug_assert!(self.arena[parent.index].child(side).is_none());

        let child = self.arena.insert(Node::with_parent(payload, parent));
        let child = self.id_of(child);
        self.arena[parent.index].set_child(side, Some(child));
        self.size += 1;
        child
    }

    /// Creates a node holding `payload` that is not linked to anything yet.
    ///
    /// The node forms a detached fragment: it can be extended with the attach
    /// operations and later linked with [BinaryTree::attach_existing_left] or
    /// [BinaryTree::attach_existing_right]. Fragments do not count towards
    /// [BinaryTree::size] until they are linked below a reachable node.
    pub fn create_detached(&mut self, payload: T) -> NodeId {
        let index = self.arena.insert(Node::new(payload));
        self.id_of(index)
    }

    /// Links the fragment rooted at `existing` as left child of `node`.
    ///
    /// If `node` is reachable, [BinaryTree::size] grows by the fragment's node count.
    ///
    /// # Errors
    /// * [TreeError::InvalidNode] - if either handle is not a live node of this tree
    /// * [TreeError::NotDetached] - if `existing` has a parent or is the tree root
    /// * [TreeError::WouldCreateCycle] - if `node` lies within the fragment of `existing`
    /// * [TreeError::Occupied] - if `node` already has a left child
    pub fn attach_existing_left(&mut self, node: NodeId, existing: NodeId) -> TreeResult<()> {
        self.attach_existing(node, Side::Left, existing)
    }

    /// Links the fragment rooted at `existing` as right child of `node`.
    ///
    /// See [BinaryTree::attach_existing_left] for errors.
    pub fn attach_existing_right(&mut self, node: NodeId, existing: NodeId) -> TreeResult<()> {
        self.attach_existing(node, Side::Right, existing)
    }

    /// Links the fragment rooted at `existing` on the given side of `node`.
    #[instrument(level = "trace", skip(self))]
    pub fn attach_existing(&mut self, node: NodeId, side: Side, existing: NodeId) -> TreeResult<()> {
        let index = self.index_of(node)?;
        let existing_index = self.index_of(existing)?;

        if existing_index == self.root || self.arena[existing_index].has_parent() {
            return Err(TreeError::NotDetached(existing));
        }
        if self.ancestors_or_self(index).any(|ancestor| ancestor == existing_index) {
            return Err(TreeError::WouldCreateCycle { node, existing });
        }
        self.ensure_vacant(index, side)?;

        self.arena[index].set_child(side, Some(existing));
        self.arena[existing_index].set_parent(Some(node));
        if self.reaches_root(index) {
            self.size += self.count_from(existing_index);
        }

        Ok(())
    }

    /// Unlinks the left child of `node`, turning its subtree into a detached fragment.
    ///
    /// # Returns
    /// The handle of the former left child, or `None` if there was none.
    pub fn detach_left(&mut self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.detach(node, Side::Left)
    }

    /// Unlinks the right child of `node`, turning its subtree into a detached fragment.
    pub fn detach_right(&mut self, node: NodeId) -> TreeResult<Option<NodeId>> {
        self.detach(node, Side::Right)
    }

    /// Unlinks the child on the given side of `node`, turning its subtree into a detached fragment.
    #[instrument(level = "trace", skip(self))]
    pub fn detach(&mut self, node: NodeId, side: Side) -> TreeResult<Option<NodeId>> {
        let index = self.index_of(node)?;
        let Some(child) = self.arena[index].child(side) else {
            return Ok(None);
        };

        if self.reaches_root(index) {
            self.size -= self.count_from(child.index);
        }
        self.arena[index].set_child(side, None);
        self.arena[child.index].set_parent(None);

        Ok(Some(child))
    }

    /// Moves all nodes of `subtree` into this tree, linking its root as left child of `node`.
    ///
    /// The donor is consumed; handles obtained from it are rejected by this tree.
    ///
    /// # Returns
    /// The handle of the grafted root within this tree.
    ///
    /// # Errors
    /// * [TreeError::InvalidNode] - if `node` is not a live node of this tree
    /// * [TreeError::Occupied] - if `node` already has a left child
    ///
    /// On error, the donor is dropped and this tree is unchanged.
    pub fn graft_left(&mut self, node: NodeId, subtree: BinaryTree<T>) -> TreeResult<NodeId> {
        self.graft(node, Side::Left, subtree)
    }

    /// Moves all nodes of `subtree` into this tree, linking its root as right child of `node`.
    ///
    /// See [BinaryTree::graft_left] for details.
    pub fn graft_right(&mut self, node: NodeId, subtree: BinaryTree<T>) -> TreeResult<NodeId> {
        self.graft(node, Side::Right, subtree)
    }

    /// Moves all nodes of `subtree` into this tree, linking its root on the given side of `node`.
    #[instrument(level = "debug", skip(self, subtree), fields(donor_size = subtree.size))]
    pub fn graft(&mut self, node: NodeId, side: Side, subtree: BinaryTree<T>) -> TreeResult<NodeId> {
        let index = self.index_of(node)?;
        self.ensure_vacant(index, side)?;

        let BinaryTree { arena: mut donor, root: donor_root, size: donor_size, .. } = subtree;

        // Move reachable donor nodes top-down, so each parent exists before its children.
        // Donor fragments are not reachable and get dropped with the donor arena.
        let mut pending = vec![(donor_root, node, side)];
        let mut grafted_root = None;
        let mut moved = 0;
        while let Some((donor_index, parent, side)) = pending.pop() {
            let Some(donor_node) = donor.remove(donor_index) else {
                continue;
            };
            let (left, right) = (donor_node.left(), donor_node.right());

            let new_index = self.arena.insert(Node::with_parent(donor_node.into_payload(), parent));
            let new_id = self.id_of(new_index);
            self.arena[parent.index].set_child(side, Some(new_id));
            grafted_root.get_or_insert(new_id);
            moved += 1;

            if let Some(right) = right {
                pending.push((right.index, new_id, Side::Right));
            }
            if let Some(left) = left {
                pending.push((left.index, new_id, Side::Left));
            }
        }
        debug_assert_eq!(moved, donor_size);

        if self.reaches_root(index) {
            self.size += moved;
        }
        trace!(moved, size = self.size, "grafted subtree");

        // The donor root always exists, so the first iteration sets it
        grafted_root.ok_or(TreeError::InvalidNode(node))
    }

    /// Releases `node` and all its descendants (children before parents).
    ///
    /// The node is unlinked from its parent first. Handles of released nodes
    /// become invalid.
    ///
    /// # Returns
    /// The number of released nodes.
    ///
    /// # Errors
    /// * [TreeError::InvalidNode] - if `node` is not a live node of this tree
    /// * [TreeError::RootRemoval] - if `node` is the root; drop the tree instead
    #[instrument(level = "trace", skip(self))]
    pub fn delete_subtree(&mut self, node: NodeId) -> TreeResult<usize> {
        let index = self.index_of(node)?;
        if index == self.root {
            return Err(TreeError::RootRemoval);
        }

        let reachable = self.reaches_root(index);
        if let Some(parent) = self.arena[index].parent() {
            let parent_node = &mut self.arena[parent.index];
            if let Some(side) = parent_node.side_of(node) {
                parent_node.set_child(side, None);
            }
        }

        let mut released = 0;
        let mut stack = vec![(index, false)];
        while let Some((index, children_visited)) = stack.pop() {
            if children_visited {
                self.arena.remove(index);
                released += 1;
            } else {
                stack.push((index, true));
                for child in self.arena[index].children() {
                    stack.push((child.index, false));
                }
            }
        }

        if reachable {
            self.size -= released;
        }

        Ok(released)
    }
}

// ============================================================================
// Validation (pub)
// ============================================================================
impl<T> BinaryTree<T> {
    /// Validates the tree structure and all handle references.
    ///
    /// Checks:
    /// - Root is live and has no parent
    /// - Every node reachable from the root is visited exactly once
    /// - `size` equals the number of reachable nodes
    /// - Every child link is matched by the child's parent link, and vice versa,
    ///   for reachable nodes and fragments alike
    /// - All handles belong to this tree
    ///
    /// # Returns
    /// `true` if tree is valid, `false` otherwise
    pub fn is_valid(&self) -> bool {
        // Check root
        let Some(root) = self.arena.get(self.root) else {
            return false;
        };
        if root.has_parent() {
            return false;
        }

        // Check reachable part is a tree of the recorded size
        let mut visited = HashSet::new();
        let mut stack = vec![self.root];
        while let Some(index) = stack.pop() {
            if !visited.insert(index) {
                return false;
            }
            for child in self.arena[index].children() {
                if child.tree != self.id || !self.arena.contains(child.index) {
                    return false;
                }
                stack.push(child.index);
            }
        }
        if visited.len() != self.size {
            return false;
        }

        // Check links of every node agree
        for (index, node) in self.arena.iter() {
            let id = self.id_of(index);

            for child in node.children() {
                match self.arena.get(child.index) {
                    Some(child_node) if child.tree == self.id => {
                        if child_node.parent() != Some(id) {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }

            if let Some(parent) = node.parent() {
                match self.arena.get(parent.index) {
                    Some(parent_node) if parent.tree == self.id => {
                        if parent_node.side_of(id).is_none() {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
        }

        true
    }
}

// ============================================================================
// Helpers (private)
// ============================================================================
impl<T> BinaryTree<T> {
    fn id_of(&self, index: Index) -> NodeId {
        NodeId { tree: self.id, index }
    }

    fn index_of(&self, node: NodeId) -> TreeResult<Index> {
        if node.tree == self.id && self.arena.contains(node.index) {
            Ok(node.index)
        } else {
            Err(TreeError::InvalidNode(node))
        }
    }

    fn ensure_vacant(&self, index: Index, side: Side) -> TreeResult<()> {
        if self.arena[index].child(side).is_some() {
            return Err(TreeError::Occupied { node: self.id_of(index), side });
        }
        Ok(())
    }

    /// Walks from `index` up to its topmost ancestor, `index` first.
    fn ancestors_or_self(&self, index: Index) -> impl Iterator<Item = Index> + '_ {
        std::iter::successors(Some(index), |&current| {
            self.arena[current].parent().map(|parent| parent.index)
        })
    }

    fn reaches_root(&self, index: Index) -> bool {
        self.ancestors_or_self(index).last() == Some(self.root)
    }

    fn count_from(&self, index: Index) -> usize {
        PreOrderIter::new(self, index).count()
    }
}

// =#========================================================================#=
// ITERATORS
// =#========================================================================#=
/// Iterator for pre-order traversal (parents before children, left before right).
///
/// Uses a stack, so deep trees do not exhaust the call stack.
pub struct PreOrderIter<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<Index>,
}

impl<'a, T> PreOrderIter<'a, T> {
    fn new(tree: &'a BinaryTree<T>, start: Index) -> Self {
        PreOrderIter { tree, stack: vec![start] }
    }
}

impl<'a, T> Iterator for PreOrderIter<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.stack.pop()?;
        let node = &self.tree.arena[index];

        // Push right first, so left is processed first
        if let Some(right) = node.right() {
            self.stack.push(right.index);
        }
        if let Some(left) = node.left() {
            self.stack.push(left.index);
        }

        Some((self.tree.id_of(index), node))
    }
}

/// Iterator for post-order traversal (children before parents, left before right).
pub struct PostOrderIter<'a, T> {
    tree: &'a BinaryTree<T>,
    stack: Vec<(Index, bool)>, // (index, children_visited)
}

impl<'a, T> PostOrderIter<'a, T> {
    fn new(tree: &'a BinaryTree<T>, start: Index) -> Self {
        PostOrderIter { tree, stack: vec![(start, false)] }
    }
}

impl<'a, T> Iterator for PostOrderIter<'a, T> {
    type Item = (NodeId, &'a Node<T>);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, children_visited)) = self.stack.pop() {
            let node = &self.tree.arena[index];

            if children_visited || node.is_leaf() {
                return Some((self.tree.id_of(index), node));
            }

            self.stack.push((index, true));
            if let Some(right) = node.right() {
                self.stack.push((right.index, false));
            }
            if let Some(left) = node.left() {
                self.stack.push((left.index, false));
            }
        }
        None
    }
}
