//! Driver-loop behavior: line continuations, bracket transparency, and the
//! terminal `ENDMARKER` contract, exercised end-to-end against the public
//! [`Scanner`] surface rather than any single recognizer.

use pylex_scanner::{Scanner, TokenKind};

fn kinds(source: &str) -> Vec<TokenKind> { Scanner::new(source).map(|tok| tok.kind).collect() }

#[test]
fn empty_source_yields_endmarker_with_no_preceding_newline() {
    assert_eq!(kinds(""), vec![TokenKind::EndMarker]);
}

#[test]
fn next_token_keeps_returning_endmarker_after_the_first_one() {
    let mut scanner = Scanner::new("a\n");
    loop {
        if scanner.next_token().kind == TokenKind::EndMarker {
            break;
        }
    }
    assert_eq!(scanner.next_token().kind, TokenKind::EndMarker);
    assert_eq!(scanner.next_token().kind, TokenKind::EndMarker);
}

#[test]
fn line_continuation_inside_a_statement_suppresses_the_newline_and_indent() {
    assert_eq!(
        kinds("if a \\\n    and b:\n    c\n"),
        vec![
            TokenKind::If,
            TokenKind::Name,
            TokenKind::And,
            TokenKind::Name,
            TokenKind::Colon,
            TokenKind::Newline,
            TokenKind::Indent,
            TokenKind::Name,
            TokenKind::Newline,
            TokenKind::Dedent,
            TokenKind::EndMarker,
        ]
    );
}

#[test]
fn a_continued_line_does_not_trigger_indentation_classification() {
    // Despite the second physical line being indented four columns, no
    // INDENT is emitted: the continuation joins it into the first line.
    assert_eq!(
        kinds("a \\\n    + b\n"),
        vec![TokenKind::Name, TokenKind::Plus, TokenKind::Name, TokenKind::Newline, TokenKind::EndMarker]
    );
}

#[test]
fn bracket_transparency_same_tokens_with_or_without_interior_newlines() {
    let inline = kinds("f(a, b)\n");
    let multiline = kinds("f(\n    a,\n    b\n)\n");
    assert_eq!(inline, multiline);
}

#[test]
fn newline_is_never_emitted_while_brackets_are_open() {
    let tokens = kinds("[\n\n\n1\n]\n");
    let opens = tokens.iter().filter(|k| **k == TokenKind::LSqb).count();
    let closes = tokens.iter().filter(|k| **k == TokenKind::RSqb).count();
    assert_eq!(opens, closes);
    // Exactly one NEWLINE: the one after the closing bracket.
    assert_eq!(tokens.iter().filter(|k| **k == TokenKind::Newline).count(), 1);
}

#[test]
fn nested_brackets_of_different_kinds_compose() {
    assert_eq!(
        kinds("f([{1}])\n"),
        vec![
            TokenKind::Name,
            TokenKind::LPar,
            TokenKind::LSqb,
            TokenKind::LBrace,
            TokenKind::Number,
            TokenKind::RBrace,
            TokenKind::RSqb,
            TokenKind::RPar,
            TokenKind::Newline,
            TokenKind::EndMarker,
        ]
    );
}

#[test]
fn unbalanced_open_bracket_reports_once_then_resumes_at_endmarker() {
    let mut scanner = Scanner::new("a = (\n");
    let collected: Vec<_> = scanner.by_ref().map(|tok| tok.kind).collect();
    assert_eq!(collected, vec![TokenKind::Name, TokenKind::Equal, TokenKind::LPar, TokenKind::Error, TokenKind::EndMarker]);
    // The iterator is exhausted, but the scanner itself keeps yielding
    // ENDMARKER to direct `next_token` callers, and the error is not
    // repeated on subsequent pulls.
    assert_eq!(scanner.next_token().kind, TokenKind::EndMarker);
    assert_eq!(scanner.next_token().kind, TokenKind::EndMarker);
}

#[test]
fn stray_closing_bracket_is_a_normal_token_but_leaves_level_unbalanced() {
    // A lone `)` with no opener is tokenized normally, but it drives `level`
    // negative - which end-of-input treats the same as a never-closed
    // opener, reporting it once before settling into ENDMARKER.
    assert_eq!(kinds(")\n"), vec![TokenKind::RPar, TokenKind::Error, TokenKind::EndMarker]);
}
