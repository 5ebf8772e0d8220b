//! Long brackets: `[` `=`×L `[` body `]` `=`×L `]`.
//!
//! Matching a closer against the opener's level is the one thing here a
//! regular grammar cannot do. Both halves are written as explicit automata
//! over a forward-only lexer.
//!
//! Closing is speculative. Every `]` in the body might start the closer, so
//! the end is marked just before it and the `=` run that follows is counted
//! down from the required level. If the count does not land exactly on a
//! second `]`, the `]` and the counted `=` signs are body text after all.
//! They have already been consumed and stay consumed; only their
//! classification changes, and scanning resumes at the first character that
//! broke the match.

use crate::{
    lexer::Lexer,
    token::{TokenKind, ValidTokens},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Opening {
    /// Expecting the first `[`.
    Start,
    /// After `[`, tallying `=`.
    CountingLevel { level: u32 },
    /// The `=` run ended; a second `[` completes the opener.
    ExpectSecondBracket { level: u32 },
    /// The input does not open a long bracket.
    NotOpened,
}

/// Consumes a long-bracket opener and returns its level.
///
/// On `None` some of `[=*` may have been consumed already.
pub(crate) fn scan_open<L: Lexer + ?Sized>(lexer: &mut L) -> Option<u32> {
    let mut step = Opening::Start;
    loop {
        step = match step {
            Opening::Start if lexer.consume_if('[') => Opening::CountingLevel { level: 0 },
            Opening::Start => Opening::NotOpened,
            Opening::CountingLevel { level } if lexer.consume_if('=') => Opening::CountingLevel {
                level: level.saturating_add(1),
            },
            Opening::CountingLevel { level } => Opening::ExpectSecondBracket { level },
            Opening::ExpectSecondBracket { level } if lexer.consume_if('[') => return Some(level),
            Opening::ExpectSecondBracket { .. } => Opening::NotOpened,
            Opening::NotOpened => return None,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Body {
    InContent,
    /// After a `]`, waiting for `remaining` more `=` and then `]`.
    CountingCloseLevel { remaining: u32 },
    Closed,
}

/// How a body scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Close {
    /// The closer was consumed. The last mark sits just before it.
    Closed { has_content: bool },
    /// Input ended first.
    Unterminated,
}

/// Consumes body text up to and including the closer for `level`.
pub(crate) fn scan_to_close<L: Lexer + ?Sized>(lexer: &mut L, level: u32) -> Close {
    let mut step = Body::InContent;
    let mut has_content = false;
    loop {
        step = match step {
            Body::InContent => match lexer.lookahead() {
                None => return Close::Unterminated,
                Some(']') => {
                    lexer.mark_end();
                    lexer.consume();
                    Body::CountingCloseLevel { remaining: level }
                }
                Some(_) => {
                    lexer.consume();
                    has_content = true;
                    Body::InContent
                }
            },
            Body::CountingCloseLevel { remaining } => match lexer.lookahead() {
                Some('=') if remaining > 0 => {
                    lexer.consume();
                    Body::CountingCloseLevel {
                        remaining: remaining - 1,
                    }
                }
                Some(']') if remaining == 0 => {
                    lexer.consume();
                    Body::Closed
                }
                _ => {
                    tracing::trace!(level, remaining, "abandoned speculative close");
                    has_content = true;
                    Body::InContent
                }
            },
            Body::Closed => return Close::Closed { has_content },
        };
    }
}

/// Continues an open long string.
///
/// Non-empty body text becomes `StringContent`, ending just before the
/// closer. With nothing before the closer the closer itself is reported as
/// `StringEnd`. A body that never closes yields no token.
pub(crate) fn scan_body<L: Lexer + ?Sized>(
    lexer: &mut L,
    level: u32,
    valid: ValidTokens,
) -> Option<TokenKind> {
    match scan_to_close(lexer, level) {
        Close::Closed { has_content: true } => {
            valid.accepts(TokenKind::StringContent).then_some(TokenKind::StringContent)
        }
        Close::Closed { has_content: false } if valid.accepts(TokenKind::StringEnd) => {
            lexer.mark_end();
            Some(TokenKind::StringEnd)
        }
        Close::Closed { has_content: false } => None,
        Close::Unterminated => {
            tracing::debug!(level, "unterminated long string");
            None
        }
    }
}
