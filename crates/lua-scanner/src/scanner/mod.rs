//! Scanner: dispatch between the literal recognizers.
//!
//! A host calls [`Scanner::scan`] with the set of kinds the grammar accepts
//! at the current position. Three routines can answer:
//!
//! - the short-string recognizer, continuing a quoted string,
//! - the long-bracket automaton, opening or continuing `[=*[ ... ]=*]`,
//! - the comment recognizer, which reuses the long-bracket automaton for
//!   `--[[ ... ]]` and otherwise stops at the end of the line.
//!
//! Strings are split into `StringStart`, optional `StringContent` and
//! `StringEnd`, so a literal spans several calls. The open literal lives in
//! [`ScannerState`], which the host may serialize at any token boundary and
//! restore into a fresh scanner; no other memory is carried between calls.
//!
//! Invariants
//! - A kind is reported only if the caller offered it.
//! - On `None` the scanner may have read ahead; the host discards that.
//! - The open literal is replaced whenever a new string opens and cleared
//!   once its `StringEnd` is reported.

mod comment;
mod long_bracket;
mod short_string;

use crate::{
    error::StateError,
    lexer::Lexer,
    options::ScannerOptions,
    state::{OpenLiteral, Quote, ScannerState},
    token::{TokenKind, ValidTokens},
};

/// Stateful recognizer for Lua comments and string literals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scanner {
    state: ScannerState,
    options: ScannerOptions,
}

impl Scanner {
    /// Creates a scanner with nothing open.
    pub fn new(options: ScannerOptions) -> Self {
        Self {
            state: ScannerState::default(),
            options,
        }
    }

    /// Creates a scanner resuming from `state`.
    pub fn with_state(options: ScannerOptions, state: ScannerState) -> Self {
        Self { state, options }
    }

    /// The state that would be persisted now.
    #[inline]
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// The options this scanner was built with.
    #[inline]
    pub fn options(&self) -> &ScannerOptions {
        &self.options
    }

    /// Forgets any open literal.
    pub fn reset(&mut self) {
        self.state = ScannerState::default();
    }

    /// Persists the state into `buffer`; see [`ScannerState::serialize`].
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        self.state.serialize(buffer)
    }

    /// Restores the state from `buffer`. An empty buffer resets the
    /// scanner. On error the scanner is reset as well.
    pub fn deserialize(&mut self, buffer: &[u8]) -> Result<(), StateError> {
        match ScannerState::deserialize(buffer) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => {
                self.reset();
                Err(err)
            }
        }
    }

    /// Tries to recognize one token of a kind in `valid` at the lexer's
    /// position.
    ///
    /// Continuing an open literal takes precedence over starting a new one,
    /// except while the host is recovering from an error, when the open
    /// literal is stale.
    pub fn scan<L: Lexer + ?Sized>(&mut self, lexer: &mut L, valid: ValidTokens) -> Option<TokenKind> {
        if valid.continues_literal() && !valid.is_error_recovery() {
            if let Some(open) = self.state.open() {
                tracing::trace!(?open, ?valid, "continuing literal");
                let kind = match open {
                    OpenLiteral::Short(quote) => short_string::scan_body(lexer, quote, valid),
                    OpenLiteral::Long { level } => long_bracket::scan_body(lexer, level, valid),
                };
                if kind == Some(TokenKind::StringEnd) {
                    self.state.close();
                }
                return kind;
            }
        }

        if valid.opens_literal() {
            return self.scan_opening(lexer, valid);
        }
        None
    }

    fn scan_opening<L: Lexer + ?Sized>(&mut self, lexer: &mut L, valid: ValidTokens) -> Option<TokenKind> {
        while lexer.lookahead().is_some_and(|ch| self.options.is_space(ch)) {
            lexer.skip();
        }

        let kind = match lexer.lookahead()? {
            ch @ ('\'' | '"') if valid.accepts(TokenKind::StringStart) => {
                let quote = Quote::from_char(ch)?;
                lexer.consume();
                self.state.open_short(quote);
                Some(TokenKind::StringStart)
            }
            '-' if valid.accepts(TokenKind::Comment) => comment::scan(lexer, &self.options),
            '[' if valid.accepts(TokenKind::StringStart) => {
                let level = long_bracket::scan_open(lexer)?;
                self.state.open_long(level);
                Some(TokenKind::StringStart)
            }
            _ => None,
        };
        tracing::trace!(?kind, ?valid, state = ?self.state, "scanned opening");
        kind
    }
}
