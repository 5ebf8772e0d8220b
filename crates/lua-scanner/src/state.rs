//! Scanner state persisted across suspension points.
//!
//! Lua has no nested string literals, so at most one literal is open at a
//! time. The state records which one, if any, and nothing else.
//!
//! Layout (6 bytes)
//! - `[0]` delimiter: `'` or `"` for short strings, `0` for long brackets
//! - `[1]` multiline flag: `1` for long brackets, `0` otherwise
//! - `[2..6]` bracket level, `u32` little endian
//!
//! The default state serializes to zero bytes. A 3-byte buffer is read as
//! the legacy layout, which kept the level in a single byte and therefore
//! cannot describe levels above 255.

use crate::error::StateError;

/// Quote character of a short string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Quote {
    /// `'`
    Single,
    /// `"`
    Double,
}

impl Quote {
    /// The quote character.
    #[inline]
    pub const fn as_char(self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    /// The quote for `ch`, if it is one.
    #[inline]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '\'' => Some(Quote::Single),
            '"' => Some(Quote::Double),
            _ => None,
        }
    }

    #[inline]
    const fn as_byte(self) -> u8 {
        match self {
            Quote::Single => b'\'',
            Quote::Double => b'"',
        }
    }
}

/// The literal whose body the grammar is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OpenLiteral {
    /// A single-line string opened by a quote.
    Short(Quote),
    /// A long string opened by `[`, `level` `=` signs, `[`.
    Long {
        /// Number of `=` in the opener; the closer must repeat it exactly.
        level: u32,
    },
}

/// Everything a [`Scanner`](crate::Scanner) remembers between calls.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScannerState {
    open: Option<OpenLiteral>,
}

impl ScannerState {
    /// Bytes written by [`serialize`](Self::serialize) for a non-default
    /// state.
    pub const SERIALIZED_LEN: usize = 6;

    const LEGACY_LEN: usize = 3;

    /// State with `literal` open.
    pub const fn with_open(literal: OpenLiteral) -> Self {
        Self {
            open: Some(literal),
        }
    }

    /// The open literal, if any.
    #[inline]
    pub const fn open(&self) -> Option<OpenLiteral> {
        self.open
    }

    /// Quote character of the open short string.
    pub const fn delimiter(&self) -> Option<char> {
        match self.open {
            Some(OpenLiteral::Short(quote)) => Some(quote.as_char()),
            _ => None,
        }
    }

    /// Whether the open literal is a long bracket.
    pub const fn is_multiline(&self) -> bool {
        matches!(self.open, Some(OpenLiteral::Long { .. }))
    }

    /// Level of the open long bracket; `0` when none is open.
    pub const fn delimiter_level(&self) -> u32 {
        match self.open {
            Some(OpenLiteral::Long { level }) => level,
            _ => 0,
        }
    }

    #[inline]
    pub(crate) fn open_short(&mut self, quote: Quote) {
        self.open = Some(OpenLiteral::Short(quote));
    }

    #[inline]
    pub(crate) fn open_long(&mut self, level: u32) {
        self.open = Some(OpenLiteral::Long { level });
    }

    #[inline]
    pub(crate) fn close(&mut self) {
        self.open = None;
    }

    /// Writes the state into `buffer` and returns the number of bytes used.
    ///
    /// Returns `0` for the default state, and when `buffer` is too small to
    /// hold the layout, in which case the open literal is lost.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        let Some(open) = self.open else {
            return 0;
        };
        let Some(out) = buffer.get_mut(..Self::SERIALIZED_LEN) else {
            tracing::warn!(
                capacity = buffer.len(),
                needed = Self::SERIALIZED_LEN,
                "serialization buffer too small, dropping scanner state"
            );
            return 0;
        };
        let (delimiter, multiline, level) = match open {
            OpenLiteral::Short(quote) => (quote.as_byte(), 0, 0u32),
            OpenLiteral::Long { level } => (0, 1, level),
        };
        out[0] = delimiter;
        out[1] = multiline;
        out[2..].copy_from_slice(&level.to_le_bytes());
        Self::SERIALIZED_LEN
    }

    /// Reads a state written by [`serialize`](Self::serialize).
    ///
    /// An empty buffer is the default state. Bytes past the layout are
    /// ignored.
    pub fn deserialize(buffer: &[u8]) -> Result<Self, StateError> {
        let (header, level) = match buffer.len() {
            0 => return Ok(Self::default()),
            Self::LEGACY_LEN => (&buffer[..2], u32::from(buffer[2])),
            n if n >= Self::SERIALIZED_LEN => {
                let mut level = [0u8; 4];
                level.copy_from_slice(&buffer[2..Self::SERIALIZED_LEN]);
                (&buffer[..2], u32::from_le_bytes(level))
            }
            found => {
                return Err(StateError::Truncated {
                    expected: Self::SERIALIZED_LEN,
                    found,
                });
            }
        };

        let open = match header[1] {
            0 => match header[0] {
                // legacy writers used a zeroed header for "nothing open"
                0 => None,
                b'\'' => Some(OpenLiteral::Short(Quote::Single)),
                b'"' => Some(OpenLiteral::Short(Quote::Double)),
                other => return Err(StateError::InvalidDelimiter(other)),
            },
            1 => Some(OpenLiteral::Long { level }),
            flag => return Err(StateError::InvalidFlag(flag)),
        };
        Ok(Self { open })
    }
}
