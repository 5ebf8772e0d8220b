//! C ABI hooks that let a tree-sitter parser load [`lua_scanner`] as the
//! external scanner of a Lua grammar.
//!
//! The host calls `create` once per parser, `scan` whenever an external
//! token is valid, and `serialize`/`deserialize` around every token it may
//! later resume from. All five hooks take the opaque payload returned by
//! `create`.

use core::{ffi::c_char, ffi::c_uint, ffi::c_void, ptr::NonNull, slice};

use lua_scanner::{Lexer, SERIALIZATION_BUFFER_SIZE, Scanner, TokenKind, ValidTokens};

/// Lexer handed to external scanners, laid out as tree-sitter's `TSLexer`.
#[repr(C)]
pub struct TSLexer {
    /// Current character as a code point, `0` at end of input.
    pub lookahead: i32,
    /// Symbol of the recognized token, set before returning `true`.
    pub result_symbol: u16,
    /// Advances past the lookahead; `true` skips it as whitespace.
    pub advance: unsafe extern "C" fn(*mut TSLexer, bool),
    /// Ends the token at the current position.
    pub mark_end: unsafe extern "C" fn(*mut TSLexer),
    /// Column of the current position.
    pub get_column: unsafe extern "C" fn(*mut TSLexer) -> u32,
    /// Whether the position starts an included range.
    pub is_at_included_range_start: unsafe extern "C" fn(*const TSLexer) -> bool,
    /// Whether input is exhausted.
    pub eof: unsafe extern "C" fn(*const TSLexer) -> bool,
}

/// [`Lexer`] over a host-owned `TSLexer`, valid for one `scan` call.
struct HostLexer {
    raw: NonNull<TSLexer>,
}

impl Lexer for HostLexer {
    fn lookahead(&self) -> Option<char> {
        let raw = self.raw.as_ptr();
        // SAFETY: the host keeps the lexer alive and unaliased for the
        // duration of the scan call this value is confined to.
        let (at_eof, code) = unsafe { (((*raw).eof)(raw), (*raw).lookahead) };
        if at_eof {
            return None;
        }
        Some(
            u32::try_from(code)
                .ok()
                .and_then(char::from_u32)
                .unwrap_or(char::REPLACEMENT_CHARACTER),
        )
    }

    fn consume(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: see `lookahead`.
        unsafe { ((*raw).advance)(raw, false) }
    }

    fn skip(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: see `lookahead`.
        unsafe { ((*raw).advance)(raw, true) }
    }

    fn mark_end(&mut self) {
        let raw = self.raw.as_ptr();
        // SAFETY: see `lookahead`.
        unsafe { ((*raw).mark_end)(raw) }
    }
}

/// Allocates a scanner with nothing open.
#[unsafe(no_mangle)]
pub extern "C" fn tree_sitter_lua_external_scanner_create() -> *mut c_void {
    Box::into_raw(Box::new(Scanner::default())).cast()
}

/// Frees a scanner returned by `create`.
///
/// # Safety
///
/// `payload` must come from `create` and must not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tree_sitter_lua_external_scanner_destroy(payload: *mut c_void) {
    if !payload.is_null() {
        // SAFETY: produced by `Box::into_raw` in `create`.
        drop(unsafe { Box::from_raw(payload.cast::<Scanner>()) });
    }
}

/// Recognizes one external token and reports it through `result_symbol`.
///
/// # Safety
///
/// `payload` must come from `create`, `lexer` must be a live `TSLexer`, and
/// `valid_symbols` must point to one `bool` per external token.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tree_sitter_lua_external_scanner_scan(
    payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    let (Some(scanner), Some(raw)) = (NonNull::new(payload.cast::<Scanner>()), NonNull::new(lexer))
    else {
        return false;
    };
    if valid_symbols.is_null() {
        return false;
    }
    // SAFETY: guaranteed by the caller.
    let (scanner, flags) = unsafe {
        (
            &mut *scanner.as_ptr(),
            slice::from_raw_parts(valid_symbols, TokenKind::ALL.len()),
        )
    };

    let mut host = HostLexer { raw };
    match scanner.scan(&mut host, ValidTokens::from_flags(flags)) {
        Some(kind) => {
            // SAFETY: the host lexer is live for this call.
            unsafe { (*raw.as_ptr()).result_symbol = kind.symbol() };
            true
        }
        None => false,
    }
}

/// Writes the scanner state into the host's buffer and returns its length.
///
/// # Safety
///
/// `payload` must come from `create` and `buffer` must hold
/// `TREE_SITTER_SERIALIZATION_BUFFER_SIZE` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tree_sitter_lua_external_scanner_serialize(
    payload: *mut c_void,
    buffer: *mut c_char,
) -> c_uint {
    if payload.is_null() || buffer.is_null() {
        return 0;
    }
    // SAFETY: guaranteed by the caller.
    let (scanner, out) = unsafe {
        (
            &*payload.cast::<Scanner>(),
            slice::from_raw_parts_mut(buffer.cast::<u8>(), SERIALIZATION_BUFFER_SIZE),
        )
    };
    c_uint::try_from(scanner.serialize(out)).unwrap_or(0)
}

/// Restores the scanner state from `length` bytes of `buffer`. A zero
/// length resets the scanner, and so does unreadable state.
///
/// # Safety
///
/// `payload` must come from `create` and `buffer` must hold `length` bytes
/// when `length` is non-zero.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn tree_sitter_lua_external_scanner_deserialize(
    payload: *mut c_void,
    buffer: *const c_char,
    length: c_uint,
) {
    let Some(scanner) = NonNull::new(payload.cast::<Scanner>()) else {
        return;
    };
    // SAFETY: guaranteed by the caller.
    let scanner = unsafe { &mut *scanner.as_ptr() };
    let len = usize::try_from(length).unwrap_or(0);
    if len == 0 || buffer.is_null() {
        scanner.reset();
        return;
    }
    // SAFETY: guaranteed by the caller.
    let bytes = unsafe { slice::from_raw_parts(buffer.cast::<u8>(), len) };
    if let Err(err) = scanner.deserialize(bytes) {
        tracing::warn!(%err, len, "discarding unreadable scanner state");
    }
}
