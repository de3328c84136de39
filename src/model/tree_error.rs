//! Error type for tree mutation and navigation.

use crate::model::node::Side;
use crate::model::tree::NodeId;
use thiserror::Error;

/// Errors raised by [BinaryTree](crate::model::BinaryTree) operations.
///
/// A failing operation never leaves a partial change behind.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {0} does not belong to this tree or has been released")]
    InvalidNode(NodeId),

    #[error("{side} child of node {node} is already set")]
    Occupied { node: NodeId, side: Side },

    #[error("node {0} is not the root of a detached fragment")]
    NotDetached(NodeId),

    #[error("attaching node {existing} below node {node} would create a cycle")]
    WouldCreateCycle { node: NodeId, existing: NodeId },

    #[error("the root cannot be removed from its tree")]
    RootRemoval,
}

pub type TreeResult<T> = Result<T, TreeError>;
