use core::fmt;

use bitflags::bitflags;

/// External token kinds, in the order the grammar declares them.
///
/// The discriminant is the symbol index a tree-sitter host uses for
/// `valid_symbols` and `result_symbol`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum TokenKind {
    /// A whole comment, line or long-bracket form, including the `--`.
    Comment = 0,
    /// The opening quote of a short string or the `[=*[` of a long string.
    StringStart = 1,
    /// The body of a string, without delimiters.
    StringContent = 2,
    /// The closing quote or `]=*]`.
    StringEnd = 3,
}

impl TokenKind {
    /// Every kind, indexed by symbol.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Comment,
        TokenKind::StringStart,
        TokenKind::StringContent,
        TokenKind::StringEnd,
    ];

    /// Symbol index of this kind.
    #[inline]
    pub const fn symbol(self) -> u16 {
        self as u16
    }

    /// Looks up a kind by its symbol index.
    pub fn from_symbol(symbol: u16) -> Option<Self> {
        Self::ALL.get(usize::from(symbol)).copied()
    }

    /// The single-kind candidate set.
    #[inline]
    pub const fn flag(self) -> ValidTokens {
        match self {
            TokenKind::Comment => ValidTokens::COMMENT,
            TokenKind::StringStart => ValidTokens::STRING_START,
            TokenKind::StringContent => ValidTokens::STRING_CONTENT,
            TokenKind::StringEnd => ValidTokens::STRING_END,
        }
    }

    /// Grammar name of the kind.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::StringStart => "string_start",
            TokenKind::StringContent => "string_content",
            TokenKind::StringEnd => "string_end",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// The token kinds the grammar accepts at the current position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ValidTokens: u8 {
        /// A comment may start here.
        const COMMENT = 1 << 0;
        /// A string may start here.
        const STRING_START = 1 << 1;
        /// The body of the open string is expected.
        const STRING_CONTENT = 1 << 2;
        /// The closing delimiter of the open string is expected.
        const STRING_END = 1 << 3;
    }
}

impl ValidTokens {
    /// Builds the set from a host's per-symbol flags. Missing trailing
    /// entries count as `false`; entries past the last kind are ignored.
    pub fn from_flags(valid: &[bool]) -> Self {
        TokenKind::ALL
            .iter()
            .zip(valid)
            .filter(|(_, offered)| **offered)
            .fold(Self::empty(), |set, (kind, _)| set | kind.flag())
    }

    /// Whether `kind` may be reported.
    #[inline]
    pub const fn accepts(self, kind: TokenKind) -> bool {
        self.contains(kind.flag())
    }

    /// Whether a new comment or string may start here.
    #[inline]
    pub const fn opens_literal(self) -> bool {
        self.intersects(Self::COMMENT.union(Self::STRING_START))
    }

    /// Whether the grammar is waiting for the rest of an open string.
    #[inline]
    pub const fn continues_literal(self) -> bool {
        self.intersects(Self::STRING_CONTENT.union(Self::STRING_END))
    }

    /// Hosts offer every kind at once only while recovering from a syntax
    /// error; no open literal can be trusted then.
    #[inline]
    pub const fn is_error_recovery(self) -> bool {
        self.is_all()
    }
}
