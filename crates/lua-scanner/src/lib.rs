//! External scanner for the parts of Lua's lexical grammar a context-free
//! grammar cannot express: quoted short-string bodies and level-delimited
//! long brackets (`[==[ ... ]==]`) used by long strings and long comments.
//!
//! A host parser calls [`Scanner::scan`] whenever one of the
//! [`TokenKind`]s is legal at the current position, handing it a [`Lexer`]
//! that exposes one character of lookahead. Between calls the host may
//! suspend scanning; everything the scanner needs to continue lives in a
//! [`ScannerState`] that round-trips through a small byte buffer.
//!
//! [`Cursor`] implements [`Lexer`] over an in-memory `&str`, and [`Driver`]
//! plays the grammar's role on top of it:
//!
//! ```rust
//! use lua_scanner::{Driver, Lexeme, TokenKind};
//!
//! let kinds: Vec<_> = Driver::new("x = [[hi]] -- done")
//!     .filter_map(|lexeme| match lexeme.unwrap() {
//!         Lexeme::Token(token) => Some((token.kind, token.text)),
//!         Lexeme::Text { .. } => None,
//!     })
//!     .collect();
//! assert_eq!(
//!     kinds,
//!     [
//!         (TokenKind::StringStart, "[["),
//!         (TokenKind::StringContent, "hi"),
//!         (TokenKind::StringEnd, "]]"),
//!         (TokenKind::Comment, "-- done"),
//!     ]
//! );
//! ```

#![no_std]

#[cfg(test)]
extern crate std;

mod cursor;
mod driver;
mod error;
mod lexer;
mod options;
mod scanner;
mod state;
mod token;

#[cfg(test)]
mod tests;

pub use cursor::{CharInfo, Cursor, Position, Token};
pub use driver::{Driver, Lexeme};
pub use error::{DriveError, ErrorSource, StateError};
pub use lexer::Lexer;
pub use options::ScannerOptions;
pub use scanner::Scanner;
pub use state::{OpenLiteral, Quote, ScannerState};
pub use token::{TokenKind, ValidTokens};

/// Capacity of the serialization buffer a tree-sitter host hands to
/// `serialize`.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;
