use std::{string::ToString, vec::Vec};

use rstest::rstest;

use crate::{Driver, ErrorSource, Lexeme, ScannerOptions, ScannerState, TokenKind};

fn lexemes(src: &str) -> Vec<(Option<TokenKind>, &str)> {
    Driver::new(src)
        .map(|lexeme| match lexeme.unwrap() {
            Lexeme::Token(token) => (Some(token.kind), token.text),
            Lexeme::Text { text, .. } => (None, text),
        })
        .collect()
}

#[test]
fn statement_with_string_and_comment() {
    assert_eq!(
        lexemes("local s = \"a\" -- c\n"),
        [
            (None, "local s = "),
            (Some(TokenKind::StringStart), "\""),
            (Some(TokenKind::StringContent), "a"),
            (Some(TokenKind::StringEnd), "\""),
            (None, " "),
            (Some(TokenKind::Comment), "-- c"),
            (None, "\n"),
        ]
    );
}

#[test]
fn declined_dashes_and_brackets_are_text() {
    assert_eq!(lexemes("a - b[1]"), [(None, "a - b[1]")]);
}

#[test]
fn text_positions_follow_lines() {
    let starts: Vec<_> = Driver::new("x\n  [[y]]")
        .map(|lexeme| match lexeme.unwrap() {
            Lexeme::Token(token) => (token.start.line, token.start.column),
            Lexeme::Text { start, .. } => (start.line, start.column),
        })
        .collect();
    assert_eq!(starts, [(1, 1), (2, 3), (2, 5), (2, 6)]);
}

#[rstest]
#[case::short_at_eof("x = 'abc", ErrorSource::UnfinishedString { expected: TokenKind::StringEnd }, 1, 9)]
#[case::short_at_newline("s = 'ab\nc'", ErrorSource::UnfinishedString { expected: TokenKind::StringEnd }, 1, 8)]
#[case::lone_quote("'", ErrorSource::UnfinishedString { expected: TokenKind::StringContent }, 1, 2)]
#[case::long_never_closed("a\n[==[x]=]", ErrorSource::UnfinishedLongString, 2, 5)]
fn unfinished_strings_are_errors(
    #[case] src: &str,
    #[case] source: ErrorSource,
    #[case] line: usize,
    #[case] column: usize,
) {
    let err = Driver::new(src)
        .find_map(Result::err)
        .expect("driver should fail");
    assert_eq!(err.source_kind(), &source);
    assert_eq!((err.line(), err.column()), (line, column));
}

#[test]
fn error_message_names_the_position() {
    let err = Driver::new("a\n[==[x]=]").find_map(Result::err).unwrap();
    assert_eq!(err.to_string(), "unfinished long string at 2:5");
}

#[test]
fn iteration_stops_after_an_error() {
    let mut driver = Driver::new("'");
    assert!(matches!(driver.next(), Some(Ok(Lexeme::Token(_)))));
    assert!(matches!(driver.next(), Some(Err(_))));
    assert!(driver.next().is_none());
    assert!(driver.next().is_none());
}

#[test]
fn unterminated_long_comment_is_not_an_error() {
    assert_eq!(
        lexemes("--[[ never\nclosed"),
        [(Some(TokenKind::Comment), "--[[ never\nclosed")]
    );
}

#[test]
fn state_is_clear_after_a_complete_string() {
    let mut driver = Driver::new("[=[ a ]=]").suspend_between_tokens(true);
    assert!(driver.by_ref().all(|lexeme| lexeme.is_ok()));
    assert_eq!(driver.state(), &ScannerState::default());
}

#[rstest]
#[case::lua(false, &[(Some(TokenKind::Comment), "-- [[x"), (None, "\ny]]")])]
#[case::loose(true, &[(Some(TokenKind::Comment), "-- [[x\ny]]")])]
fn long_comment_after_whitespace(#[case] enabled: bool, #[case] expected: &[(Option<TokenKind>, &str)]) {
    let options = ScannerOptions {
        long_comment_after_whitespace: enabled,
        ..Default::default()
    };
    let got: Vec<_> = Driver::with_options("-- [[x\ny]]", options)
        .map(|lexeme| match lexeme.unwrap() {
            Lexeme::Token(token) => (Some(token.kind), token.text),
            Lexeme::Text { text, .. } => (None, text),
        })
        .collect();
    assert_eq!(got, expected);
}
