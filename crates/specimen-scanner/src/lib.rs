//! TypeScript declaration scanner/tokenizer.
//!
//! This crate provides the lexical analysis phase:
//! - `SyntaxKind` - Token types
//! - `ScannerState` - Tokenizer state machine with save/restore for lookahead
//!
//! Keywords are scanned as `Identifier`; the parser decides by token text
//! whether an identifier acts as a keyword in its position.

use specimen_common::Span;
use specimen_common::diagnostics::diagnostic_codes;

/// Token kinds produced by [`ScannerState::scan`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Unknown,
    EndOfFileToken,
    Identifier,
    StringLiteral,
    NumericLiteral,
    OpenBraceToken,
    CloseBraceToken,
    OpenParenToken,
    CloseParenToken,
    OpenBracketToken,
    CloseBracketToken,
    LessThanToken,
    /// Always a single `>`; nested type argument lists close one token at a time.
    GreaterThanToken,
    CommaToken,
    SemicolonToken,
    ColonToken,
    QuestionToken,
    EqualsToken,
    EqualsGreaterThanToken,
    BarToken,
    AmpersandToken,
    DotToken,
    DotDotDotToken,
    ExclamationToken,
    MinusToken,
    AtToken,
}

impl SyntaxKind {
    /// Source text of punctuation tokens, used in "'x' expected." messages.
    pub const fn punctuation_text(self) -> &'static str {
        match self {
            SyntaxKind::OpenBraceToken => "{",
            SyntaxKind::CloseBraceToken => "}",
            SyntaxKind::OpenParenToken => "(",
            SyntaxKind::CloseParenToken => ")",
            SyntaxKind::OpenBracketToken => "[",
            SyntaxKind::CloseBracketToken => "]",
            SyntaxKind::LessThanToken => "<",
            SyntaxKind::GreaterThanToken => ">",
            SyntaxKind::CommaToken => ",",
            SyntaxKind::SemicolonToken => ";",
            SyntaxKind::ColonToken => ":",
            SyntaxKind::QuestionToken => "?",
            SyntaxKind::EqualsToken => "=",
            SyntaxKind::EqualsGreaterThanToken => "=>",
            SyntaxKind::BarToken => "|",
            SyntaxKind::AmpersandToken => "&",
            SyntaxKind::DotToken => ".",
            SyntaxKind::DotDotDotToken => "...",
            SyntaxKind::ExclamationToken => "!",
            SyntaxKind::MinusToken => "-",
            SyntaxKind::AtToken => "@",
            SyntaxKind::Identifier => "identifier",
            SyntaxKind::StringLiteral => "string literal",
            SyntaxKind::NumericLiteral => "numeric literal",
            SyntaxKind::EndOfFileToken => "end of file",
            SyntaxKind::Unknown => "token",
        }
    }
}

/// A lexical error found while scanning.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ScanError {
    pub code: u32,
    pub span: Span,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    error_count: usize,
}

/// Tokenizer over a single source text.
#[derive(Clone, Debug)]
pub struct ScannerState {
    text: String,
    pos: usize,
    token: SyntaxKind,
    token_start: usize,
    token_value: String,
    preceding_line_break: bool,
    errors: Vec<ScanError>,
}

impl ScannerState {
    pub fn new(text: impl Into<String>) -> Self {
        ScannerState {
            text: text.into(),
            pos: 0,
            token: SyntaxKind::Unknown,
            token_start: 0,
            token_value: String::new(),
            preceding_line_break: false,
            errors: Vec::new(),
        }
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn token(&self) -> SyntaxKind {
        self.token
    }

    pub fn token_span(&self) -> Span {
        Span::new(self.token_start as u32, self.pos as u32)
    }

    pub fn token_pos(&self) -> u32 {
        self.token_start as u32
    }

    pub fn token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Raw source text of the current token.
    pub fn token_text(&self) -> &str {
        &self.text[self.token_start..self.pos]
    }

    /// Cooked value: unquoted/unescaped for string literals, raw text otherwise.
    pub fn token_value(&self) -> &str {
        &self.token_value
    }

    /// Whether a line terminator appeared between the previous token and this one.
    pub fn has_preceding_line_break(&self) -> bool {
        self.preceding_line_break
    }

    pub fn errors(&self) -> &[ScanError] {
        &self.errors
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            token: self.token,
            token_start: self.token_start,
            token_value: self.token_value.clone(),
            preceding_line_break: self.preceding_line_break,
            error_count: self.errors.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.token = snapshot.token;
        self.token_start = snapshot.token_start;
        self.token_value = snapshot.token_value;
        self.preceding_line_break = snapshot.preceding_line_break;
        self.errors.truncate(snapshot.error_count);
    }

    fn peek_char(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.text[self.pos..].chars().nth(offset)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn error(&mut self, code: u32, start: usize) {
        self.errors.push(ScanError {
            code,
            span: Span::new(start as u32, self.pos as u32),
        });
    }

    /// Skip whitespace and comments, recording whether a line break was crossed.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                '\n' | '\r' | '\u{2028}' | '\u{2029}' => {
                    self.preceding_line_break = true;
                    self.bump();
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '/' if self.peek_char_at(1) == Some('/') => {
                    while let Some(c) = self.peek_char() {
                        if c == '\n' || c == '\r' {
                            break;
                        }
                        self.bump();
                    }
                }
                '/' if self.peek_char_at(1) == Some('*') => {
                    let start = self.pos;
                    self.pos += 2;
                    loop {
                        match self.bump() {
                            Some('*') if self.peek_char() == Some('/') => {
                                self.bump();
                                break;
                            }
                            Some('\n') | Some('\r') => self.preceding_line_break = true,
                            Some(_) => {}
                            None => {
                                self.error(diagnostic_codes::UNTERMINATED_COMMENT, start);
                                break;
                            }
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Advance to the next token and return its kind.
    pub fn scan(&mut self) -> SyntaxKind {
        self.preceding_line_break = false;
        self.skip_trivia();
        self.token_start = self.pos;
        self.token_value.clear();

        let Some(ch) = self.bump() else {
            self.token = SyntaxKind::EndOfFileToken;
            return self.token;
        };

        self.token = match ch {
            '{' => SyntaxKind::OpenBraceToken,
            '}' => SyntaxKind::CloseBraceToken,
            '(' => SyntaxKind::OpenParenToken,
            ')' => SyntaxKind::CloseParenToken,
            '[' => SyntaxKind::OpenBracketToken,
            ']' => SyntaxKind::CloseBracketToken,
            '<' => SyntaxKind::LessThanToken,
            '>' => SyntaxKind::GreaterThanToken,
            ',' => SyntaxKind::CommaToken,
            ';' => SyntaxKind::SemicolonToken,
            ':' => SyntaxKind::ColonToken,
            '?' => SyntaxKind::QuestionToken,
            '|' => SyntaxKind::BarToken,
            '&' => SyntaxKind::AmpersandToken,
            '!' => SyntaxKind::ExclamationToken,
            '-' => SyntaxKind::MinusToken,
            '@' => SyntaxKind::AtToken,
            '=' => {
                if self.peek_char() == Some('>') {
                    self.bump();
                    SyntaxKind::EqualsGreaterThanToken
                } else {
                    SyntaxKind::EqualsToken
                }
            }
            '.' => {
                if self.peek_char() == Some('.') && self.peek_char_at(1) == Some('.') {
                    self.pos += 2;
                    SyntaxKind::DotDotDotToken
                } else if self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number_tail();
                    SyntaxKind::NumericLiteral
                } else {
                    SyntaxKind::DotToken
                }
            }
            '\'' | '"' | '`' => self.scan_string(ch),
            c if c.is_ascii_digit() => {
                self.scan_number_tail();
                SyntaxKind::NumericLiteral
            }
            c if is_identifier_start(c) => {
                while self.peek_char().is_some_and(is_identifier_part) {
                    self.bump();
                }
                SyntaxKind::Identifier
            }
            _ => SyntaxKind::Unknown,
        };

        if self.token != SyntaxKind::StringLiteral {
            self.token_value.push_str(&self.text[self.token_start..self.pos]);
        }
        self.token
    }

    fn scan_number_tail(&mut self) {
        while let Some(c) = self.peek_char() {
            let exponent_sign = matches!(c, '+' | '-')
                && matches!(self.text[..self.pos].chars().last(), Some('e' | 'E'));
            if c.is_ascii_alphanumeric() || c == '.' || c == '_' || exponent_sign {
                self.bump();
            } else {
                break;
            }
        }
    }

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        let start = self.token_start;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => break,
                Some('\\') => match self.bump() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('0') => value.push('\0'),
                    Some(other) => value.push(other),
                    None => {
                        self.error(diagnostic_codes::UNTERMINATED_STRING_LITERAL, start);
                        break;
                    }
                },
                Some('\n') if quote != '`' => {
                    self.error(diagnostic_codes::UNTERMINATED_STRING_LITERAL, start);
                    break;
                }
                Some(c) => value.push(c),
                None => {
                    self.error(diagnostic_codes::UNTERMINATED_STRING_LITERAL, start);
                    break;
                }
            }
        }
        self.token_value = value;
        SyntaxKind::StringLiteral
    }
}

fn is_identifier_start(c: char) -> bool {
    c == '_' || c == '$' || c == '#' || c.is_alphabetic()
}

fn is_identifier_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
