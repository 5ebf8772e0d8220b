//! Cursor: an in-memory host lexer over a `&str`.
//!
//! What it does
//! - Decodes the source one scalar at a time (`bstr::decode_utf8`) behind
//!   the [`Lexer`] primitives, maintaining `byte/char/line/column`.
//! - Anchors the token start lazily: `skip()` before the first `consume()`
//!   moves the start forward, so leading whitespace never lands in a token.
//! - Honours `mark_end()`: a token ends at the last mark, or where reading
//!   stopped when nothing was marked.
//! - After each [`Cursor::scan`] it repositions itself the way a
//!   tree-sitter host does: at the token end on a match, back at the scan
//!   start on no match.
//!
//! Invariants
//! - Every `Position` the cursor hands out lies on a UTF-8 boundary of the
//!   source, so token text is always a borrowed slice.
//! - Reading past a mark never changes the reported span.
//!
//! Example
//! ```rust
//! use lua_scanner::{Cursor, Scanner, TokenKind, ValidTokens};
//!
//! let mut scanner = Scanner::default();
//! let mut cursor = Cursor::new("  'ok'");
//! let start = cursor.scan(&mut scanner, ValidTokens::STRING_START).unwrap();
//! assert_eq!((start.kind, start.text, start.span), (TokenKind::StringStart, "'", 2..3));
//! let body = cursor.scan(&mut scanner, ValidTokens::STRING_CONTENT | ValidTokens::STRING_END);
//! assert_eq!(body.unwrap().text, "ok");
//! ```

use core::ops::Range;

use crate::{
    lexer::Lexer,
    scanner::Scanner,
    token::{TokenKind, ValidTokens},
};

/// A location in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Byte offset.
    pub byte: usize,
    /// Offset in Unicode scalars.
    pub char: usize,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in Unicode scalars.
    pub column: usize,
}

impl Default for Position {
    fn default() -> Self {
        Self {
            byte: 0,
            char: 0,
            line: 1,
            column: 1,
        }
    }
}

impl Position {
    #[inline]
    fn bump(&mut self, ch: char, len: usize) {
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.byte += len;
        self.char += 1;
    }
}

/// One decoded scalar and its UTF-8 length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharInfo {
    /// The scalar. Invalid input decodes to U+FFFD.
    pub ch: char,
    /// Bytes it occupies in the source (1-4).
    pub ch_len: u8,
}

/// A token recognized by the scanner, borrowed from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    /// What was recognized.
    pub kind: TokenKind,
    /// Byte range in the source.
    pub span: Range<usize>,
    /// The source text of `span`.
    pub text: &'src str,
    /// Where the token starts.
    pub start: Position,
    /// Where the token ends (exclusive).
    pub end: Position,
}

/// Token-local bookkeeping for one `scan` call.
#[derive(Debug, Clone, Copy)]
struct Anchor {
    start: Position,
    consumed: bool,
    marked: Option<Position>,
}

/// Forward-only reader over an in-memory source.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    src: &'src str,
    pos: Position,
    anchor: Option<Anchor>,
}

impl<'src> Cursor<'src> {
    /// Starts at the beginning of `src`.
    pub fn new(src: &'src str) -> Self {
        Self::resume(src, Position::default())
    }

    /// Starts at `pos`, which must come from a cursor over the same source.
    ///
    /// This is how a host picks scanning back up after a suspension: a
    /// fresh cursor at the last token boundary plus a restored
    /// [`ScannerState`](crate::ScannerState).
    pub fn resume(src: &'src str, pos: Position) -> Self {
        debug_assert!(src.is_char_boundary(pos.byte), "resume position off a char boundary");
        Self {
            src,
            pos,
            anchor: None,
        }
    }

    /// The source.
    #[inline]
    pub fn source(&self) -> &'src str {
        self.src
    }

    /// The read position.
    #[inline]
    pub fn position(&self) -> Position {
        self.pos
    }

    /// Whether the whole source has been read.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos.byte >= self.src.len()
    }

    /// Decodes but does not advance past the next scalar.
    pub fn peek(&self) -> Option<CharInfo> {
        let (ch, len) = Self::decode_from(self.src, self.pos.byte)?;
        Some(CharInfo {
            ch,
            ch_len: u8::try_from(len).unwrap_or(4),
        })
    }

    /// Advances past the next scalar outside of any token. Hosts use this
    /// for input their own tokenizer handles.
    pub fn bump(&mut self) -> Option<CharInfo> {
        let info = self.peek()?;
        self.pos.bump(info.ch, usize::from(info.ch_len));
        Some(info)
    }

    /// Runs one scanner call at the current position.
    ///
    /// On a match the cursor moves to the end of the returned token. On no
    /// match it moves back to where the call started.
    pub fn scan(&mut self, scanner: &mut Scanner, valid: ValidTokens) -> Option<Token<'src>> {
        let before = self.pos;
        self.anchor = Some(Anchor {
            start: before,
            consumed: false,
            marked: None,
        });

        let kind = scanner.scan(self, valid);
        let anchor = self.anchor.take();

        match (kind, anchor) {
            (Some(kind), Some(anchor)) => {
                #[cfg(any(test, feature = "fuzzing"))]
                assert!(valid.accepts(kind), "Internal error: scanner reported unoffered {kind}");
                let end = anchor.marked.unwrap_or(self.pos);
                self.pos = end;
                let start = anchor.start;
                Some(Token {
                    kind,
                    span: start.byte..end.byte,
                    text: &self.src[start.byte..end.byte],
                    start,
                    end,
                })
            }
            _ => {
                self.pos = before;
                None
            }
        }
    }

    fn step_input(&mut self) -> Option<CharInfo> {
        self.bump()
    }

    // Decode first UTF-8 scalar from `s` starting at `offset`
    fn decode_from(s: &str, offset: usize) -> Option<(char, usize)> {
        if offset >= s.len() {
            return None;
        }
        let (ch, len) = bstr::decode_utf8(&s.as_bytes()[offset..]);
        if len == 0 {
            return None;
        }
        let ch = ch.unwrap_or('\u{FFFD}'); // replace invalid
        Some((ch, len))
    }
}

impl Lexer for Cursor<'_> {
    #[inline]
    fn lookahead(&self) -> Option<char> {
        self.peek().map(|info| info.ch)
    }

    fn consume(&mut self) {
        if self.step_input().is_some() {
            if let Some(anchor) = &mut self.anchor {
                anchor.consumed = true;
            }
        }
    }

    fn skip(&mut self) {
        if self.step_input().is_some() {
            if let Some(anchor) = &mut self.anchor {
                if !anchor.consumed {
                    anchor.start = self.pos;
                }
            }
        }
    }

    fn mark_end(&mut self) {
        if let Some(anchor) = &mut self.anchor {
            anchor.marked = Some(self.pos);
        }
    }
}

#[cfg(test)]
mod tests;
