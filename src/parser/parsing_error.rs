//! Error types for the braced tree parser.
//!
//! This module provides [ParsingError] and [ParsingErrorType] for representing
//! and reporting errors that occur while parsing braced tree text.

use crate::parser::scan::context_at;
use std::fmt;
use thiserror::Error;

/// Default length of context provided by error from parser
const DEFAULT_CONTEXT_LENGTH: usize = 50;


// =#========================================================================#=
// PARSING ERROR TYPE
// =#========================================================================#=
/// Error types that can occur while parsing braced tree text.
#[derive(Error, PartialEq, Debug, Clone)]
pub enum ParsingErrorType {
    #[error("IO error - {0}")]
    IoError(String),

    #[error("Expected '{{' opening the tree")]
    MissingOpeningBrace,

    #[error("Unbalanced braces - '{{' without matching '}}'")]
    UnbalancedBraces,

    #[error("Expected '\"' opening a payload")]
    ExpectedPayload,

    #[error("Unterminated quoted payload")]
    UnterminatedQuote,

    #[error("Payload rejected - {0}")]
    PayloadRejected(String),

    #[error("Marker '$' without a following right child")]
    DanglingMarker,

    #[error("Unexpected content after closing brace of tree")]
    TrailingContent,

    #[error("Unexpected content within a node")]
    UnexpectedContent,

    #[error("Nesting deeper than configured maximum of {0}")]
    NestingTooDeep(usize),
}


// =#========================================================================#=
// PARSING ERROR
// =#========================================================================#=
/// Parsing error with contextual information (position and following bytes).
#[derive(Debug)]
pub struct ParsingError {
    kind: ParsingErrorType,
    position: usize,
    context: String,
}

impl ParsingError {
    /// Create a ParsingError from an error type and a position in the parsed text
    pub fn at(kind: ParsingErrorType, text: &[u8], position: usize) -> Self {
        Self {
            kind,
            position,
            context: context_at(text, position, DEFAULT_CONTEXT_LENGTH),
        }
    }

    /// Convenience constructor for UnbalancedBraces
    pub fn unbalanced_braces(text: &[u8], position: usize) -> Self {
        Self::at(ParsingErrorType::UnbalancedBraces, text, position)
    }

    /// Convenience constructor for PayloadRejected
    pub fn payload_rejected(text: &[u8], position: usize, msg: String) -> Self {
        Self::at(ParsingErrorType::PayloadRejected(msg), text, position)
    }

    /// Create a ParsingError without parser context
    pub fn without_context(kind: ParsingErrorType) -> Self {
        Self { kind, position: 0, context: String::new() }
    }

    /// Get the error kind
    pub fn kind(&self) -> &ParsingErrorType {
        &self.kind
    }

    /// Get the position where the error occurred
    pub fn position(&self) -> usize {
        self.position
    }

    /// Get the text following the error position
    pub fn context(&self) -> &str {
        &self.context
    }
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Main error message
        write!(f, "{}", self.kind)?;

        // Additional position information
        write!(f, " at position {}", self.position)?;

        // Additional context if available
        if !self.context.is_empty() {
            write!(f, "\n  Context (next {} bytes): {}", self.context.len(), self.context)?;
        }

        Ok(())
    }
}

impl std::error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

impl From<std::io::Error> for ParsingError {
    fn from(err: std::io::Error) -> Self {
        ParsingError::without_context(ParsingErrorType::IoError(err.to_string()))
    }
}
