//! Parsing infrastructure shared by the text formats.
//!
//! This module provides position-based scanning primitives (including
//! balanced-delimiter matching) and the error type reported by parsers.

pub mod parsing_error;
pub mod scan;

pub use parsing_error::{ParsingError, ParsingErrorType};
pub use scan::match_balanced;
