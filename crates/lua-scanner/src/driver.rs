//! Driver: offers the scanner the candidate kinds Lua's grammar would.
//!
//! Outside a literal the grammar accepts a comment or the start of a
//! string. After `StringStart` it wants `optional(content)` then the end,
//! so `StringContent | StringEnd` is offered, and after `StringContent`
//! only `StringEnd`. Input the scanner declines is handed to "the rest of
//! the grammar", which here just collects it into [`Lexeme::Text`].
//!
//! Lexemes tile the input: concatenating every lexeme's text gives back the
//! source, up to the point where an error ends iteration.
//!
//! With `suspend_between_tokens` the driver throws the scanner away before
//! every call and rebuilds it from its serialized state, the way an
//! incremental host does when it resumes from a token boundary. Output is
//! identical either way; that is the property the flag exists to check.

use crate::{
    SERIALIZATION_BUFFER_SIZE,
    cursor::{Cursor, Position, Token},
    error::{DriveError, ErrorSource},
    options::ScannerOptions,
    scanner::Scanner,
    state::{OpenLiteral, ScannerState},
    token::{TokenKind, ValidTokens},
};

/// One piece of the driven input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme<'src> {
    /// A token recognized by the scanner.
    Token(Token<'src>),
    /// A run of input the scanner declined.
    Text {
        /// The declined source text.
        text: &'src str,
        /// Where it starts.
        start: Position,
    },
}

impl<'src> Lexeme<'src> {
    /// Source text of the lexeme.
    pub fn text(&self) -> &'src str {
        match self {
            Lexeme::Token(token) => token.text,
            Lexeme::Text { text, .. } => text,
        }
    }
}

/// What the grammar accepts next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Expect {
    Opening,
    ContentOrEnd,
    End,
}

impl Expect {
    fn valid(self) -> ValidTokens {
        match self {
            Expect::Opening => ValidTokens::COMMENT | ValidTokens::STRING_START,
            Expect::ContentOrEnd => ValidTokens::STRING_CONTENT | ValidTokens::STRING_END,
            Expect::End => ValidTokens::STRING_END,
        }
    }

    fn after(kind: TokenKind) -> Self {
        match kind {
            TokenKind::StringStart => Expect::ContentOrEnd,
            TokenKind::StringContent => Expect::End,
            TokenKind::Comment | TokenKind::StringEnd => Expect::Opening,
        }
    }
}

/// Iterator over the lexemes of a Lua source.
#[derive(Debug, Clone)]
pub struct Driver<'src> {
    cursor: Cursor<'src>,
    scanner: Scanner,
    expect: Expect,
    suspend_between_tokens: bool,
    /// Byte offset up to which lexemes have been yielded.
    emitted: usize,
    emitted_pos: Position,
    pending: Option<Token<'src>>,
    done: bool,
}

impl<'src> Driver<'src> {
    /// Drives `src` with default options.
    pub fn new(src: &'src str) -> Self {
        Self::with_options(src, ScannerOptions::default())
    }

    /// Drives `src` with `options`.
    pub fn with_options(src: &'src str, options: ScannerOptions) -> Self {
        Self {
            cursor: Cursor::new(src),
            scanner: Scanner::new(options),
            expect: Expect::Opening,
            suspend_between_tokens: false,
            emitted: 0,
            emitted_pos: Position::default(),
            pending: None,
            done: false,
        }
    }

    /// Rebuilds the scanner from its serialized state before every call.
    #[must_use]
    pub fn suspend_between_tokens(mut self, yes: bool) -> Self {
        self.suspend_between_tokens = yes;
        self
    }

    /// The scanner's current state.
    pub fn state(&self) -> &ScannerState {
        self.scanner.state()
    }

    fn scan(&mut self, valid: ValidTokens) -> Result<Option<Token<'src>>, DriveError> {
        if self.suspend_between_tokens {
            let mut buffer = [0u8; SERIALIZATION_BUFFER_SIZE];
            let len = self.scanner.serialize(&mut buffer);
            let mut resumed = Scanner::new(*self.scanner.options());
            resumed
                .deserialize(&buffer[..len])
                .map_err(|err| self.error(ErrorSource::State(err)))?;
            self.scanner = resumed;
        }
        Ok(self.cursor.scan(&mut self.scanner, valid))
    }

    fn error(&self, source: ErrorSource) -> DriveError {
        let pos = self.cursor.position();
        DriveError {
            source,
            line: pos.line,
            column: pos.column,
        }
    }

    fn unfinished(&self) -> ErrorSource {
        match self.scanner.state().open() {
            Some(OpenLiteral::Long { .. }) => ErrorSource::UnfinishedLongString,
            _ => ErrorSource::UnfinishedString {
                expected: match self.expect {
                    Expect::End => TokenKind::StringEnd,
                    _ => TokenKind::StringContent,
                },
            },
        }
    }

    /// Yields the text between the last lexeme and `token`, holding the
    /// token back for the next call, or the token itself.
    fn emit(&mut self, token: Token<'src>) -> Lexeme<'src> {
        #[cfg(any(test, feature = "fuzzing"))]
        assert!(
            token.span.start >= self.emitted && !token.span.is_empty(),
            "Internal error: token {:?} overlaps emitted input",
            token.span
        );
        if token.span.start > self.emitted {
            let gap = self.text_until(token.start);
            self.pending = Some(token);
            return gap;
        }
        self.expect = Expect::after(token.kind);
        self.emitted = token.span.end;
        self.emitted_pos = token.end;
        Lexeme::Token(token)
    }

    fn text_until(&mut self, end: Position) -> Lexeme<'src> {
        let src = self.cursor.source();
        let lexeme = Lexeme::Text {
            text: &src[self.emitted..end.byte],
            start: self.emitted_pos,
        };
        self.emitted = end.byte;
        self.emitted_pos = end;
        lexeme
    }

    fn next_lexeme(&mut self) -> Result<Option<Lexeme<'src>>, DriveError> {
        if let Some(token) = self.pending.take() {
            return Ok(Some(self.emit(token)));
        }

        if self.expect != Expect::Opening {
            return match self.scan(self.expect.valid())? {
                Some(token) => Ok(Some(self.emit(token))),
                None => Err(self.error(self.unfinished())),
            };
        }

        if self.cursor.is_eof() {
            return Ok(None);
        }

        // Hand declined characters to the "rest of the grammar" one at a
        // time until the scanner recognizes something or input runs out.
        loop {
            if let Some(token) = self.scan(Expect::Opening.valid())? {
                return Ok(Some(self.emit(token)));
            }
            if self.cursor.bump().is_none() {
                let end = self.cursor.position();
                return Ok((end.byte > self.emitted).then(|| self.text_until(end)));
            }
        }
    }
}

impl<'src> Iterator for Driver<'src> {
    type Item = Result<Lexeme<'src>, DriveError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_lexeme().transpose();
        if matches!(item, None | Some(Err(_))) {
            self.done = true;
        }
        item
    }
}
