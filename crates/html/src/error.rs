//! Conversion error types

use std::fmt;
use thiserror::Error;

/// Conversion result type
pub type ParseResult<T> = Result<T, ParseError>;

/// Position in the input, as tracked by the reader
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLocation {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (0-indexed, reset on each newline)
    pub column: usize,
    /// Characters consumed from the source so far
    pub offset: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self { line, column, offset }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Fatal conditions that abort a whole conversion.
///
/// Errors, recoveries and warnings raised while scanning are handled where
/// they are detected and only show up in the diagnostics counters; these two
/// are the only conditions that unwind to the caller.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Too many errors ({errors} errors, {recoveries} recoveries) at {location}")]
    TooManyErrors {
        errors: usize,
        recoveries: usize,
        location: SourceLocation,
    },

    #[error("Unsupported entity name '{name}' at {location}")]
    UnmappedEntity {
        name: String,
        location: SourceLocation,
    },
}

impl ParseError {
    /// Get the source location of this error
    pub fn location(&self) -> SourceLocation {
        match self {
            Self::TooManyErrors { location, .. } => *location,
            Self::UnmappedEntity { location, .. } => *location,
        }
    }
}

/// Tag construction and attribute validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TagError {
    #[error("Empty name")]
    EmptyName,

    #[error("Invalid character '{character}' in name '{name}'")]
    InvalidName { name: String, character: char },

    #[error("End-tag cannot be made into an empty element: {0}")]
    NotAStartTag(String),

    #[error("Start-tag cannot stand in for a missing start-tag: {0}")]
    NotAnEndTag(String),
}
