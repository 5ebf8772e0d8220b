/// Input primitives a host exposes to the scanner.
///
/// The host owns the input and the token boundaries; the scanner only sees
/// one character of lookahead at a time and moves strictly forward.
///
/// - `consume()` advances past the lookahead and includes it in the token.
/// - `skip()` advances past the lookahead without including it. Hosts use
///   this for whitespace ahead of a token.
/// - `mark_end()` freezes the token end at the current read position. The
///   scanner may keep reading past a mark; the reported token still ends at
///   the last mark. Without any mark the token ends where reading stopped.
///
/// When the scanner reports no match the host discards everything read
/// during the call.
pub trait Lexer {
    /// The next character, or `None` at end of input.
    fn lookahead(&self) -> Option<char>;

    /// Advances past the lookahead, including it in the token.
    fn consume(&mut self);

    /// Advances past the lookahead, excluding it from the token.
    fn skip(&mut self);

    /// Ends the token at the current read position.
    fn mark_end(&mut self);

    /// Whether the lookahead is `ch`.
    #[inline]
    fn at(&self, ch: char) -> bool {
        self.lookahead() == Some(ch)
    }

    /// Whether the input is exhausted.
    #[inline]
    fn at_eof(&self) -> bool {
        self.lookahead().is_none()
    }

    /// True at a raw newline or at end of input.
    #[inline]
    fn at_line_end(&self) -> bool {
        matches!(self.lookahead(), None | Some('\n'))
    }

    /// Consumes the lookahead if it is `ch`.
    #[inline]
    fn consume_if(&mut self, ch: char) -> bool {
        if self.at(ch) {
            self.consume();
            true
        } else {
            false
        }
    }
}

impl<L: Lexer + ?Sized> Lexer for &mut L {
    #[inline]
    fn lookahead(&self) -> Option<char> {
        (**self).lookahead()
    }

    #[inline]
    fn consume(&mut self) {
        (**self).consume();
    }

    #[inline]
    fn skip(&mut self) {
        (**self).skip();
    }

    #[inline]
    fn mark_end(&mut self) {
        (**self).mark_end();
    }
}
