use crate::{
    lexer::Lexer,
    state::Quote,
    token::{TokenKind, ValidTokens},
};

/// Continues an open short string delimited by `quote`.
///
/// Body text up to the next unescaped `quote` is `StringContent`; the
/// quote itself is left for the following `StringEnd`. When the quote is
/// the very next character it is reported as `StringEnd` directly, so an
/// empty body never produces a zero-width token.
///
/// A backslash always takes the following character with it unless that
/// character is a newline or the end of input. A raw newline ends the
/// body unterminated; whatever was read so far is still `StringContent`.
pub(crate) fn scan_body<L: Lexer + ?Sized>(
    lexer: &mut L,
    quote: Quote,
    valid: ValidTokens,
) -> Option<TokenKind> {
    let delimiter = quote.as_char();
    let mut has_content = false;

    loop {
        match lexer.lookahead() {
            None | Some('\n') => break,
            Some(ch) if ch == delimiter => {
                if has_content {
                    lexer.mark_end();
                    return valid
                        .accepts(TokenKind::StringContent)
                        .then_some(TokenKind::StringContent);
                }
                if !valid.accepts(TokenKind::StringEnd) {
                    return None;
                }
                lexer.consume();
                lexer.mark_end();
                return Some(TokenKind::StringEnd);
            }
            Some('\\') => {
                lexer.consume();
                has_content = true;
                if lexer.at_line_end() {
                    break;
                }
                lexer.consume();
            }
            Some(_) => {
                lexer.consume();
                has_content = true;
            }
        }
    }

    tracing::debug!(%delimiter, has_content, "unterminated short string");
    if has_content && valid.accepts(TokenKind::StringContent) {
        lexer.mark_end();
        Some(TokenKind::StringContent)
    } else {
        None
    }
}
