//! Recursive-descent parser for TypeScript declarations.
//!
//! Split across files by concern:
//! - `state` - token handling, diagnostics, lookahead
//! - `state_statements` - source file, declarations, members
//! - `state_types` - type nodes

mod state;
mod state_statements;
mod state_types;

pub use state::ParserState;

use crate::ast::{SourceFile, TypeNode};
use specimen_common::Diagnostic;
use specimen_common::diagnostics::diagnostic_codes;
use specimen_scanner::SyntaxKind;

/// Parse a whole file, returning the AST and every parse diagnostic.
pub fn parse_source(file_name: &str, source: &str) -> (SourceFile, Vec<Diagnostic>) {
    let mut parser = ParserState::new(file_name.to_string(), source.to_string());
    let file = parser.parse_source_file();
    (file, parser.into_diagnostics())
}

/// Parse a standalone type such as `A<string, number[]>`.
pub fn parse_type_text(text: &str) -> (TypeNode, Vec<Diagnostic>) {
    let mut parser = ParserState::new("<type>".to_string(), text.to_string());
    parser.next_token();
    let ty = parser.parse_type();
    parser.parse_optional(SyntaxKind::SemicolonToken);
    if !parser.is_token(SyntaxKind::EndOfFileToken) {
        parser.error_at_current(diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
    }
    parser.collect_scanner_errors();
    (ty, parser.into_diagnostics())
}

#[cfg(test)]
#[path = "../../tests/state_statement_tests.rs"]
mod state_statement_tests;

#[cfg(test)]
#[path = "../../tests/state_type_tests.rs"]
mod state_type_tests;
