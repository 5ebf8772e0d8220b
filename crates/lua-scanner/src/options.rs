/// Configuration options for the external scanner.
///
/// The defaults follow the Lua reference lexer. Each flag opts into a
/// looser reading that some editors and older grammars rely on.
///
/// # Examples
///
/// ```rust
/// use lua_scanner::{Scanner, ScannerOptions};
///
/// let scanner = Scanner::new(ScannerOptions {
///     long_comment_after_whitespace: true,
///     ..Default::default()
/// });
/// # let _ = scanner;
/// ```
///
/// # Default
///
/// All options default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerOptions {
    /// Whether any Unicode whitespace may be skipped ahead of a comment or
    /// string.
    ///
    /// By default only the characters Lua itself treats as space are
    /// skipped: space, horizontal tab, line feed, carriage return, vertical
    /// tab and form feed.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_unicode_whitespace: bool,

    /// Whether spaces and tabs may separate `--` from a long-bracket opener.
    ///
    /// Lua only opens a long comment when the bracket immediately follows
    /// `--`; `-- [[x]]` is a line comment. With this flag set the second
    /// form is scanned as a long comment too, which is how the first
    /// tree-sitter grammars for Lua behaved.
    ///
    /// # Examples
    ///
    /// ```lua
    /// -- [[ spans
    /// several lines ]]
    /// ```
    ///
    /// # Default
    ///
    /// `false`
    pub long_comment_after_whitespace: bool,
}

impl ScannerOptions {
    /// Whether `ch` is skipped ahead of a token.
    #[inline]
    pub(crate) fn is_space(&self, ch: char) -> bool {
        if self.allow_unicode_whitespace {
            ch.is_whitespace()
        } else {
            is_lua_space(ch)
        }
    }
}

/// Lua's `lisspace` in the C locale.
#[inline]
pub(crate) const fn is_lua_space(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}
