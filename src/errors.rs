use crate::data::Position;
use std::error::Error as StdError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The input does not match the grammar at the reported position. This includes
    /// running into the end of the buffer before the document is complete.
    UnexpectedCharacter,
    /// A container could not grow its storage.
    AllocationFailure,
    /// Objects and arrays are nested deeper than [crate::ParseOptions::max_depth].
    DepthLimitExceeded,
    /// The input is longer than [crate::ParseOptions::max_input_len].
    InputTooLarge,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub msg: String,
    pub line: usize,
    pub column: usize,
    pub offset: usize,
}

impl ParseError {
    pub fn new(kind: ErrorKind, msg: String, pos: Position) -> Self {
        Self {
            kind,
            msg,
            line: pos.line,
            column: pos.column,
            offset: pos.offset,
        }
    }

    pub fn position(&self) -> Position {
        Position {
            line: self.line,
            column: self.column,
            offset: self.offset,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::UnexpectedCharacter => f.write_str("unexpected character"),
            ErrorKind::AllocationFailure => f.write_str("allocation failure"),
            ErrorKind::DepthLimitExceeded => f.write_str("depth limit exceeded"),
            ErrorKind::InputTooLarge => f.write_str("input too large"),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}: {}",
            self.kind, self.line, self.column, self.msg
        )
    }
}

impl StdError for ParseError {}

/// Returned by the containers when their backing storage cannot be grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError;

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("memory allocation failed")
    }
}

impl StdError for AllocError {}

impl From<std::collections::TryReserveError> for AllocError {
    fn from(_: std::collections::TryReserveError) -> Self {
        AllocError
    }
}
