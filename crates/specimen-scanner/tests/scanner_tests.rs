use super::*;

fn scan_all(source: &str) -> Vec<SyntaxKind> {
    let mut scanner = ScannerState::new(source);
    let mut kinds = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        kinds.push(kind);
    }
    kinds
}

#[test]
fn test_nested_type_arguments_close_one_token_at_a_time() {
    assert_eq!(
        scan_all("A<B<C>>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::LessThanToken,
            SyntaxKind::Identifier,
            SyntaxKind::GreaterThanToken,
            SyntaxKind::GreaterThanToken,
        ]
    );
}

#[test]
fn test_arrow_and_spread_tokens() {
    assert_eq!(
        scan_all("(...a) => b"),
        vec![
            SyntaxKind::OpenParenToken,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::CloseParenToken,
            SyntaxKind::EqualsGreaterThanToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn test_comments_are_skipped() {
    let kinds = scan_all("// leading\n/* block */ interface /** doc */ A");
    assert_eq!(kinds, vec![SyntaxKind::Identifier, SyntaxKind::Identifier]);
}

#[test]
fn test_string_literal_value_is_unquoted() {
    let mut scanner = ScannerState::new(r#"'red' "a\"b" `tpl`"#);
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "red");
    assert_eq!(scanner.token_text(), "'red'");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "a\"b");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.token_value(), "tpl");
}

#[test]
fn test_numeric_literals() {
    let mut scanner = ScannerState::new("42 3.5 1e-3 0x1F");
    for expected in ["42", "3.5", "1e-3", "0x1F"] {
        assert_eq!(scanner.scan(), SyntaxKind::NumericLiteral);
        assert_eq!(scanner.token_value(), expected);
    }
}

#[test]
fn test_preceding_line_break_tracking() {
    let mut scanner = ScannerState::new("a = 1\nb");
    scanner.scan();
    assert!(!scanner.has_preceding_line_break());
    scanner.scan();
    scanner.scan();
    assert!(!scanner.has_preceding_line_break());
    scanner.scan();
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.token_text(), "b");
}

#[test]
fn test_save_and_restore_state() {
    let mut scanner = ScannerState::new("get name(): string");
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.token(), SyntaxKind::OpenParenToken);
    scanner.restore_state(snapshot);
    assert_eq!(scanner.token_text(), "get");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_text(), "name");
}

#[test]
fn test_unterminated_string_reports_error() {
    let mut scanner = ScannerState::new("'abc");
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.errors().len(), 1);
    assert_eq!(
        scanner.errors()[0].code,
        diagnostic_codes::UNTERMINATED_STRING_LITERAL
    );
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn test_unterminated_comment_reports_error() {
    let mut scanner = ScannerState::new("a /* open");
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
    assert_eq!(scanner.errors()[0].code, diagnostic_codes::UNTERMINATED_COMMENT);
}

#[test]
fn test_token_spans_are_byte_offsets() {
    let mut scanner = ScannerState::new("  foo: é");
    scanner.scan();
    assert_eq!(scanner.token_span(), Span::new(2, 5));
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.token(), SyntaxKind::Identifier);
    assert_eq!(scanner.token_span(), Span::new(7, 9));
}
