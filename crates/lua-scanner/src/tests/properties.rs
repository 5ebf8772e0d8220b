use std::{
    format,
    string::{String, ToString},
    vec::Vec,
};

use quickcheck::{QuickCheck, TestResult};

use super::arbitrary::LuaSource;
use crate::{
    Driver, Lexeme, SERIALIZATION_BUFFER_SIZE, ScannerState, TokenKind, error::DriveError,
};

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

fn tokens(src: &str) -> Option<Vec<(TokenKind, String)>> {
    let mut out = Vec::new();
    for lexeme in Driver::new(src) {
        if let Lexeme::Token(token) = lexeme.ok()? {
            out.push((token.kind, token.text.to_string()));
        }
    }
    Some(out)
}

fn expected_string(open: &str, body: &str, close: &str) -> Vec<(TokenKind, String)> {
    let mut out = Vec::new();
    out.push((TokenKind::StringStart, open.to_string()));
    if !body.is_empty() {
        out.push((TokenKind::StringContent, body.to_string()));
    }
    out.push((TokenKind::StringEnd, close.to_string()));
    out
}

/// Property: a quoted body free of the quote, backslashes and newlines
/// comes back verbatim as the content of a three-token string.
#[test]
fn short_string_roundtrip() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(body: String, double: bool) -> TestResult {
        let quote = if double { "\"" } else { "'" };
        if body.contains(['\'', '"', '\\', '\n']) {
            return TestResult::discard();
        }
        let src = format!("{quote}{body}{quote}");
        TestResult::from_bool(tokens(&src) == Some(expected_string(quote, &body, quote)))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(String, bool) -> TestResult);
}

/// Property: a long-bracket body ends at the first occurrence of the
/// closer for its level, whatever near-miss closers it contains.
#[test]
fn long_bracket_roundtrip() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(body: LuaSource, level: u8) -> TestResult {
        let level = [0, 1, 3][usize::from(level % 3)];
        let eq = "=".repeat(level);
        let open = format!("[{eq}[");
        let close = format!("]{eq}]");
        let body = body.0;
        if format!("{body}{close}").find(&close) != Some(body.len()) {
            return TestResult::discard();
        }
        let src = format!("{open}{body}{close}");
        TestResult::from_bool(tokens(&src) == Some(expected_string(&open, &body, &close)))
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(LuaSource, u8) -> TestResult);
}

/// Property: restoring a serialized state gives back the same state, and
/// serializing it again writes the same bytes.
#[test]
fn state_serialization_is_stable() {
    fn prop(state: ScannerState) -> bool {
        let mut first = [0u8; SERIALIZATION_BUFFER_SIZE];
        let len = state.serialize(&mut first);
        let Ok(restored) = ScannerState::deserialize(&first[..len]) else {
            return false;
        };
        let mut second = [0u8; SERIALIZATION_BUFFER_SIZE];
        let again = restored.serialize(&mut second);
        restored == state && first[..len] == second[..again]
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(ScannerState) -> bool);
}

/// Property: throwing the scanner away between tokens and rebuilding it
/// from its serialized state changes nothing.
#[test]
fn suspension_is_transparent() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: LuaSource) -> bool {
        let straight: Vec<Result<Lexeme<'_>, DriveError>> = Driver::new(&src.0).collect();
        let suspended: Vec<_> = Driver::new(&src.0).suspend_between_tokens(true).collect();
        straight == suspended
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(LuaSource) -> bool);
}

/// Property: lexemes tile the input up to the first error, and cover all
/// of it when there is none.
#[test]
fn lexemes_tile_the_input() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(src: LuaSource) -> bool {
        let mut text = String::new();
        let mut failed = false;
        for lexeme in Driver::new(&src.0) {
            match lexeme {
                Ok(lexeme) => text.push_str(lexeme.text()),
                Err(_) => failed = true,
            }
        }
        if failed {
            src.0.starts_with(&text)
        } else {
            text == src.0
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(LuaSource) -> bool);
}
