use super::long_bracket::{self, Close};
use crate::{
    lexer::Lexer,
    options::{ScannerOptions, is_lua_space},
    token::TokenKind,
};

/// Scans a whole comment starting at `--`.
///
/// A long-bracket opener right after the dashes makes a long comment that
/// runs through its closer, or to the end of input if it never closes. Any
/// other comment, including one whose opener is malformed such as `--[=x`,
/// runs to the end of the line without taking the newline.
pub(crate) fn scan<L: Lexer + ?Sized>(lexer: &mut L, options: &ScannerOptions) -> Option<TokenKind> {
    if !(lexer.consume_if('-') && lexer.consume_if('-')) {
        return None;
    }

    if options.long_comment_after_whitespace {
        while lexer
            .lookahead()
            .is_some_and(|ch| ch != '\n' && is_lua_space(ch))
        {
            lexer.consume();
        }
    }

    if lexer.at('[') {
        if let Some(level) = long_bracket::scan_open(lexer) {
            if long_bracket::scan_to_close(lexer, level) == Close::Unterminated {
                tracing::debug!(level, "unterminated long comment");
            }
            lexer.mark_end();
            return Some(TokenKind::Comment);
        }
    }

    while !lexer.at_line_end() {
        lexer.consume();
    }
    lexer.mark_end();
    Some(TokenKind::Comment)
}
