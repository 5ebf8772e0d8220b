use super::*;

/// A scanner stand-in that replays a fixed list of lexer calls, so the
/// cursor's bookkeeping can be checked without the real recognizers.
#[derive(Clone, Copy)]
enum Call {
    Consume,
    Skip,
    Mark,
}

fn replay<'s>(cursor: &mut Cursor<'s>, calls: &[Call], report: bool) -> Option<Token<'s>> {
    let before = cursor.position();
    cursor.anchor = Some(Anchor {
        start: before,
        consumed: false,
        marked: None,
    });
    for call in calls {
        match call {
            Call::Consume => cursor.consume(),
            Call::Skip => cursor.skip(),
            Call::Mark => cursor.mark_end(),
        }
    }
    let anchor = cursor.anchor.take().unwrap();
    if report {
        let end = anchor.marked.unwrap_or(cursor.pos);
        cursor.pos = end;
        Some(Token {
            kind: TokenKind::Comment,
            span: anchor.start.byte..end.byte,
            text: &cursor.src[anchor.start.byte..end.byte],
            start: anchor.start,
            end,
        })
    } else {
        cursor.pos = before;
        None
    }
}

#[test]
fn skip_before_consume_moves_token_start() {
    let mut c = Cursor::new("  ab");
    let t = replay(&mut c, &[Call::Skip, Call::Skip, Call::Consume, Call::Consume], true).unwrap();
    assert_eq!(t.span, 2..4);
    assert_eq!(t.text, "ab");
    assert_eq!(t.start.column, 3);
}

#[test]
fn skip_after_consume_stays_inside_token() {
    let mut c = Cursor::new("a b");
    let t = replay(&mut c, &[Call::Consume, Call::Skip, Call::Consume], true).unwrap();
    assert_eq!(t.text, "a b");
}

#[test]
fn mark_end_bounds_the_span_and_repositions() {
    let mut c = Cursor::new("ab]]cd");
    let t = replay(
        &mut c,
        &[Call::Consume, Call::Consume, Call::Mark, Call::Consume, Call::Consume],
        true,
    )
    .unwrap();
    assert_eq!(t.text, "ab");
    assert_eq!(c.position().byte, 2, "read-ahead past the mark is given back");
    assert_eq!(c.peek().unwrap().ch, ']');
}

#[test]
fn last_mark_wins() {
    let mut c = Cursor::new("abc");
    let t = replay(
        &mut c,
        &[Call::Consume, Call::Mark, Call::Consume, Call::Mark, Call::Consume],
        true,
    )
    .unwrap();
    assert_eq!(t.text, "ab");
}

#[test]
fn no_match_rewinds_position_and_line() {
    let mut c = Cursor::new("x\n\ny");
    c.bump();
    let before = c.position();
    assert!(replay(&mut c, &[Call::Consume, Call::Consume, Call::Consume], false).is_none());
    assert_eq!(c.position(), before);
    assert_eq!(c.position().line, 1);
}

#[test]
fn tracks_lines_and_columns() {
    let mut c = Cursor::new("ab\ncd");
    while c.bump().is_some() {}
    let p = c.position();
    assert_eq!((p.byte, p.char, p.line, p.column), (5, 5, 2, 3));
}

#[test]
fn multibyte_scalars_advance_by_their_length() {
    let mut c = Cursor::new("åβ€𝄞!");
    let lens: std::vec::Vec<u8> = core::iter::from_fn(|| c.bump().map(|i| i.ch_len)).collect();
    assert_eq!(lens, [2, 2, 3, 4, 1]);
    let p = c.position();
    assert_eq!((p.byte, p.char, p.column), (12, 5, 6));
    assert!(c.is_eof());
}

#[test]
fn scan_reports_token_positions() {
    let mut scanner = Scanner::default();
    let mut c = Cursor::new("x\n  --[[a\nb]]");
    c.bump();
    c.bump();
    let t = c.scan(&mut scanner, ValidTokens::COMMENT).unwrap();
    assert_eq!(t.text, "--[[a\nb]]");
    assert_eq!((t.start.line, t.start.column), (2, 3));
    assert_eq!((t.end.line, t.end.column), (3, 4));
    assert!(c.is_eof());
}

#[test]
fn scan_without_match_leaves_cursor() {
    let mut scanner = Scanner::default();
    let mut c = Cursor::new("   -x");
    assert!(c.scan(&mut scanner, ValidTokens::all()).is_none());
    assert_eq!(c.position(), Position::default());
}

#[test]
fn resume_continues_from_a_boundary() {
    let src = "a = 'é' .. \"z\"";
    let mut scanner = Scanner::default();
    let mut c = Cursor::new(src);
    for _ in 0..4 {
        c.bump();
    }
    let start = c.scan(&mut scanner, ValidTokens::STRING_START).unwrap();
    assert_eq!(start.span, 4..5);

    let mut resumed = Cursor::resume(src, start.end);
    let body = resumed
        .scan(&mut scanner, ValidTokens::STRING_CONTENT | ValidTokens::STRING_END)
        .unwrap();
    assert_eq!(body.text, "é");
    assert_eq!(body.end.column, 7);
}

#[test]
fn lookahead_is_none_at_end() {
    let mut c = Cursor::new("");
    assert_eq!(c.lookahead(), None);
    assert!(c.at_eof() && c.at_line_end());
    c.consume();
    assert_eq!(c.position(), Position::default());
}
