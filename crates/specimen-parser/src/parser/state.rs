//! Parser state - core token handling, diagnostics and lookahead.

use specimen_common::diagnostics::diagnostic_codes;
use specimen_common::{Diagnostic, Span};
use specimen_scanner::{ScannerState, SyntaxKind};
use tracing::trace;

/// Recursive-descent parser over one source text.
///
/// Never aborts: malformed input produces diagnostics and the parser resumes
/// at the next member or statement boundary.
pub struct ParserState {
    pub(crate) scanner: ScannerState,
    pub(crate) file_name: String,
    pub(crate) current_token: SyntaxKind,
    pub(crate) parse_diagnostics: Vec<Diagnostic>,
    /// Position of the last diagnostic, to avoid cascades at one location.
    last_error_pos: Option<u32>,
}

impl ParserState {
    pub fn new(file_name: String, source_text: String) -> Self {
        ParserState {
            scanner: ScannerState::new(source_text),
            file_name,
            current_token: SyntaxKind::Unknown,
            parse_diagnostics: Vec::new(),
            last_error_pos: None,
        }
    }

    pub fn get_diagnostics(&self) -> &[Diagnostic] {
        &self.parse_diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.parse_diagnostics
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    // =========================================================================
    // Token Access
    // =========================================================================

    #[inline]
    pub(crate) fn next_token(&mut self) -> SyntaxKind {
        self.current_token = self.scanner.scan();
        self.current_token
    }

    #[inline]
    pub(crate) fn token(&self) -> SyntaxKind {
        self.current_token
    }

    #[inline]
    pub(crate) fn is_token(&self, kind: SyntaxKind) -> bool {
        self.current_token == kind
    }

    /// Whether the current token is the identifier `text` (contextual keyword check).
    pub(crate) fn is_identifier_text(&self, text: &str) -> bool {
        self.is_token(SyntaxKind::Identifier) && self.scanner.token_value() == text
    }

    pub(crate) fn token_value(&self) -> String {
        self.scanner.token_value().to_string()
    }

    pub(crate) fn token_pos(&self) -> u32 {
        self.scanner.token_pos()
    }

    pub(crate) fn has_preceding_line_break(&self) -> bool {
        self.scanner.has_preceding_line_break()
    }

    /// Consume the current token when it is `kind`.
    pub(crate) fn parse_optional(&mut self, kind: SyntaxKind) -> bool {
        if self.is_token(kind) {
            self.next_token();
            true
        } else {
            false
        }
    }

    /// Consume `kind` or report "'x' expected." without consuming anything.
    pub(crate) fn parse_expected(&mut self, kind: SyntaxKind) -> bool {
        if self.parse_optional(kind) {
            return true;
        }
        self.error_at_current(diagnostic_codes::TOKEN_EXPECTED, &[kind.punctuation_text()]);
        false
    }

    /// Parse a member/declaration name; reports 1003 when absent.
    pub(crate) fn parse_identifier(&mut self) -> Option<String> {
        if self.is_token(SyntaxKind::Identifier) {
            let name = self.token_value();
            self.next_token();
            Some(name)
        } else {
            self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
            None
        }
    }

    // =========================================================================
    // Diagnostics
    // =========================================================================

    pub(crate) fn error_at_current(&mut self, code: u32, args: &[&str]) {
        let span = self.scanner.token_span();
        self.error_at(span, code, args);
    }

    pub(crate) fn error_at(&mut self, span: Span, code: u32, args: &[&str]) {
        if self.last_error_pos == Some(span.start) {
            return;
        }
        self.last_error_pos = Some(span.start);
        trace!(code, pos = span.start, "parse error");
        self.parse_diagnostics
            .push(Diagnostic::from_code(&self.file_name, span, code, args));
    }

    /// Move lexical errors recorded by the scanner into the parse diagnostics.
    pub(crate) fn collect_scanner_errors(&mut self) {
        for error in self.scanner.errors().to_vec() {
            self.parse_diagnostics.push(Diagnostic::from_code(
                &self.file_name,
                error.span,
                error.code,
                &[],
            ));
        }
        self.parse_diagnostics.sort_by_key(|d| d.start);
    }

    // =========================================================================
    // Lookahead and Skipping
    // =========================================================================

    /// Run `f` speculatively and rewind the scanner afterwards.
    pub(crate) fn look_ahead<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> T {
        let snapshot = self.scanner.save_state();
        let current = self.current_token;
        let diagnostic_count = self.parse_diagnostics.len();
        let last_error_pos = self.last_error_pos;
        let result = f(self);
        self.scanner.restore_state(snapshot);
        self.current_token = current;
        self.parse_diagnostics.truncate(diagnostic_count);
        self.last_error_pos = last_error_pos;
        result
    }

    /// Kind of the token after the current one.
    pub(crate) fn peek_token(&mut self) -> SyntaxKind {
        self.look_ahead(|p| p.next_token())
    }

    /// Skip from an opening token through its matching close.
    ///
    /// The current token must be `open`. Stops at end of file.
    pub(crate) fn skip_balanced(&mut self, open: SyntaxKind, close: SyntaxKind) {
        debug_assert!(self.is_token(open));
        let mut depth = 0usize;
        loop {
            let kind = self.token();
            if kind == SyntaxKind::EndOfFileToken {
                self.parse_expected(close);
                return;
            }
            self.next_token();
            if kind == open {
                depth += 1;
            } else if kind == close {
                depth -= 1;
                if depth == 0 {
                    return;
                }
            }
        }
    }

    /// Skip an expression (initializer) up to a `;`, a closing `}` or a line
    /// break that ends the statement.
    pub(crate) fn skip_initializer(&mut self) {
        let mut depth = 0usize;
        let mut previous = SyntaxKind::EqualsToken;
        loop {
            let kind = self.token();
            match kind {
                SyntaxKind::EndOfFileToken => return,
                SyntaxKind::SemicolonToken | SyntaxKind::CommaToken if depth == 0 => return,
                SyntaxKind::CloseBraceToken | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken
                    if depth == 0 =>
                {
                    return;
                }
                _ if depth == 0 && self.has_preceding_line_break() && !continues_expression(previous) => {
                    return;
                }
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                SyntaxKind::CloseBraceToken
                | SyntaxKind::CloseParenToken
                | SyntaxKind::CloseBracketToken => depth -= 1,
                _ => {}
            }
            previous = kind;
            self.next_token();
        }
    }
}

/// Tokens after which a line break does not terminate an expression.
fn continues_expression(previous: SyntaxKind) -> bool {
    matches!(
        previous,
        SyntaxKind::EqualsToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::CommaToken
            | SyntaxKind::DotToken
            | SyntaxKind::QuestionToken
            | SyntaxKind::ColonToken
            | SyntaxKind::MinusToken
            | SyntaxKind::LessThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::Unknown
    )
}
