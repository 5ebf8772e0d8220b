use thiserror::Error;

use crate::token::TokenKind;

/// A serialized [`ScannerState`](crate::ScannerState) that cannot be read
/// back.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub enum StateError {
    #[error("serialized scanner state is {found} bytes, expected 0, 3 or at least {expected}")]
    Truncated { expected: usize, found: usize },
    #[error("invalid string delimiter byte {0:#04x}")]
    InvalidDelimiter(u8),
    #[error("invalid multiline flag {0:#04x}")]
    InvalidFlag(u8),
}

/// An error reported by [`Driver`](crate::Driver), positioned at the start of
/// the offending token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{source} at {line}:{column}")]
pub struct DriveError {
    pub(crate) source: ErrorSource,
    pub(crate) line: usize,
    pub(crate) column: usize,
}

impl DriveError {
    /// What went wrong.
    pub fn source_kind(&self) -> &ErrorSource {
        &self.source
    }

    /// 1-based line.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column, in characters.
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Why a [`DriveError`] was raised.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorSource {
    /// A short string hit a newline or the end of input.
    #[error("unfinished string, expected {expected}")]
    UnfinishedString {
        /// The kind the grammar was waiting for.
        expected: TokenKind,
    },
    /// A long string never found its closer.
    #[error("unfinished long string")]
    UnfinishedLongString,
    /// The scanner could not be restored from its own serialization.
    #[error("scanner state lost across suspension: {0}")]
    State(#[from] StateError),
}
