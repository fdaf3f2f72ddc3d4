//! Parser state - type parsing

use super::state::ParserState;
use crate::ast::{KeywordType, TupleElement, TypeNode};
use specimen_common::LiteralValue;
use specimen_common::diagnostics::diagnostic_codes;
use specimen_scanner::SyntaxKind;

impl ParserState {
    // =========================================================================
    // Parse Methods - Types
    // =========================================================================

    /// Parse a type (unions, intersections, functions, conditionals).
    pub(crate) fn parse_type(&mut self) -> TypeNode {
        if self.is_function_type_start() {
            return self.parse_function_type();
        }

        let check = self.parse_union_type();

        // `A extends B ? C : D`
        if self.is_identifier_text("extends") && !self.has_preceding_line_break() {
            self.next_token();
            self.parse_union_type();
            if self.parse_expected(SyntaxKind::QuestionToken) {
                self.parse_type();
                if self.parse_expected(SyntaxKind::ColonToken) {
                    self.parse_type();
                }
            }
            return TypeNode::Unsupported;
        }
        check
    }

    fn is_function_type_start(&mut self) -> bool {
        if self.is_token(SyntaxKind::LessThanToken) {
            return true;
        }
        if self.is_identifier_text("new") {
            return true;
        }
        if self.is_identifier_text("abstract") {
            return self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_text("new")
            });
        }
        if !self.is_token(SyntaxKind::OpenParenToken) {
            return false;
        }
        self.look_ahead(|p| {
            p.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
            p.is_token(SyntaxKind::EqualsGreaterThanToken)
        })
    }

    /// `<T>(a: A) => R`, `new (a: A) => R`; parameters are skipped.
    fn parse_function_type(&mut self) -> TypeNode {
        if self.is_identifier_text("abstract") {
            self.next_token();
        }
        if self.is_identifier_text("new") {
            self.next_token();
        }
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        } else {
            self.parse_expected(SyntaxKind::OpenParenToken);
        }
        self.parse_expected(SyntaxKind::EqualsGreaterThanToken);
        let return_type = self.parse_return_type();
        TypeNode::Function {
            return_type: Box::new(return_type),
        }
    }

    /// Return type position; accepts `x is T` and `asserts x` predicates.
    pub(crate) fn parse_return_type(&mut self) -> TypeNode {
        if self.is_identifier_text("asserts") {
            let is_predicate = self.look_ahead(|p| {
                p.next_token();
                p.is_token(SyntaxKind::Identifier) && !p.has_preceding_line_break()
            });
            if is_predicate {
                self.next_token();
                self.next_token();
                if self.is_identifier_text("is") {
                    self.next_token();
                    self.parse_type();
                }
                return TypeNode::Keyword(KeywordType::Void);
            }
        }
        if self.is_token(SyntaxKind::Identifier) {
            let is_predicate = self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_text("is") && !p.has_preceding_line_break()
            });
            if is_predicate {
                self.next_token();
                self.next_token();
                self.parse_type();
                return TypeNode::Keyword(KeywordType::Boolean);
            }
        }
        self.parse_type()
    }

    fn parse_union_type(&mut self) -> TypeNode {
        self.parse_optional(SyntaxKind::BarToken);
        let first = self.parse_intersection_type();
        if !self.is_token(SyntaxKind::BarToken) {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::BarToken) {
            types.push(self.parse_intersection_type());
        }
        TypeNode::Union(types)
    }

    fn parse_intersection_type(&mut self) -> TypeNode {
        self.parse_optional(SyntaxKind::AmpersandToken);
        let first = self.parse_type_operator();
        if !self.is_token(SyntaxKind::AmpersandToken) {
            return first;
        }
        let mut types = vec![first];
        while self.parse_optional(SyntaxKind::AmpersandToken) {
            types.push(self.parse_type_operator());
        }
        TypeNode::Intersection(types)
    }

    /// `keyof T`, `unique symbol`, `readonly T[]`, `infer U`
    fn parse_type_operator(&mut self) -> TypeNode {
        if self.is_token(SyntaxKind::Identifier) {
            let operator = self.token_value();
            if matches!(operator.as_str(), "keyof" | "unique" | "readonly" | "infer") {
                let has_operand = self.look_ahead(|p| {
                    p.next_token();
                    !matches!(
                        p.token(),
                        SyntaxKind::CommaToken
                            | SyntaxKind::SemicolonToken
                            | SyntaxKind::CloseBraceToken
                            | SyntaxKind::CloseParenToken
                            | SyntaxKind::CloseBracketToken
                            | SyntaxKind::GreaterThanToken
                            | SyntaxKind::BarToken
                            | SyntaxKind::AmpersandToken
                            | SyntaxKind::EqualsToken
                            | SyntaxKind::EndOfFileToken
                    )
                });
                if has_operand {
                    self.next_token();
                    if operator == "infer" {
                        self.parse_identifier();
                        return TypeNode::Unsupported;
                    }
                    let operand = self.parse_type_operator();
                    return match operator.as_str() {
                        "readonly" => operand,
                        _ => TypeNode::Unsupported,
                    };
                }
            }
        }
        self.parse_postfix_type()
    }

    /// `T[]`, `T[][]`, `T[K]`
    fn parse_postfix_type(&mut self) -> TypeNode {
        let mut ty = self.parse_primary_type();
        while !self.has_preceding_line_break() {
            if self.is_token(SyntaxKind::ExclamationToken) {
                self.next_token();
                continue;
            }
            if !self.is_token(SyntaxKind::OpenBracketToken) {
                break;
            }
            self.next_token();
            if self.parse_optional(SyntaxKind::CloseBracketToken) {
                ty = TypeNode::Array(Box::new(ty));
            } else {
                self.parse_type();
                self.parse_expected(SyntaxKind::CloseBracketToken);
                ty = TypeNode::Unsupported;
            }
        }
        ty
    }

    fn parse_primary_type(&mut self) -> TypeNode {
        match self.token() {
            SyntaxKind::Identifier => self.parse_identifier_type(),
            SyntaxKind::StringLiteral => {
                let value = self.token_value();
                self.next_token();
                TypeNode::Literal(LiteralValue::String(value))
            }
            SyntaxKind::NumericLiteral => {
                let value = parse_numeric_literal(self.scanner.token_text());
                self.next_token();
                TypeNode::Literal(LiteralValue::number(value))
            }
            SyntaxKind::MinusToken => {
                self.next_token();
                if self.is_token(SyntaxKind::NumericLiteral) {
                    let value = parse_numeric_literal(self.scanner.token_text());
                    self.next_token();
                    TypeNode::Literal(LiteralValue::number(-value))
                } else {
                    self.error_at_current(diagnostic_codes::TYPE_EXPECTED, &[]);
                    TypeNode::Unsupported
                }
            }
            SyntaxKind::OpenBraceToken => {
                if self.is_mapped_type_start() {
                    self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                    TypeNode::Unsupported
                } else {
                    TypeNode::TypeLiteral(self.parse_type_members())
                }
            }
            SyntaxKind::OpenBracketToken => self.parse_tuple_type(),
            SyntaxKind::OpenParenToken => {
                self.next_token();
                let inner = self.parse_type();
                self.parse_expected(SyntaxKind::CloseParenToken);
                TypeNode::Parenthesized(Box::new(inner))
            }
            _ => {
                self.error_at_current(diagnostic_codes::TYPE_EXPECTED, &[]);
                TypeNode::Unsupported
            }
        }
    }

    fn parse_identifier_type(&mut self) -> TypeNode {
        let text = self.token_value();
        if let Some(keyword) = KeywordType::from_text(&text) {
            self.next_token();
            return TypeNode::Keyword(keyword);
        }
        match text.as_str() {
            "true" | "false" => {
                self.next_token();
                TypeNode::Literal(LiteralValue::Boolean(text == "true"))
            }
            "this" => {
                self.next_token();
                TypeNode::Unsupported
            }
            "typeof" => {
                self.next_token();
                self.parse_entity_name();
                self.parse_type_arguments_opt();
                TypeNode::Unsupported
            }
            _ => {
                let name = self.parse_entity_name();
                let args = self.parse_type_arguments_opt();
                TypeNode::Reference { name, args }
            }
        }
    }

    /// `a.b.c`
    fn parse_entity_name(&mut self) -> Vec<String> {
        let mut name = Vec::new();
        name.extend(self.parse_identifier());
        while self.parse_optional(SyntaxKind::DotToken) {
            name.extend(self.parse_identifier());
        }
        name
    }

    /// `<A, B>` following a type name on the same line.
    fn parse_type_arguments_opt(&mut self) -> Vec<TypeNode> {
        if !self.is_token(SyntaxKind::LessThanToken) || self.has_preceding_line_break() {
            return Vec::new();
        }
        self.next_token();
        let mut args = Vec::new();
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            args.push(self.parse_type());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == before {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        args
    }

    fn is_mapped_type_start(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            if p.is_token(SyntaxKind::MinusToken) || p.is_identifier_text("readonly") {
                p.next_token();
                if p.is_identifier_text("readonly") {
                    p.next_token();
                }
            } else if p.is_token(SyntaxKind::Unknown) && p.scanner.token_text() == "+" {
                p.next_token();
                p.next_token();
            }
            if !p.is_token(SyntaxKind::OpenBracketToken) {
                return false;
            }
            p.next_token();
            if !p.is_token(SyntaxKind::Identifier) {
                return false;
            }
            p.next_token();
            p.is_identifier_text("in")
        })
    }

    /// `[A, b?: B, ...C[]]`
    fn parse_tuple_type(&mut self) -> TypeNode {
        self.next_token();
        let mut elements = Vec::new();
        while !self.is_token(SyntaxKind::CloseBracketToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            elements.push(self.parse_tuple_element());
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
            if self.token_pos() == before {
                break;
            }
        }
        self.parse_expected(SyntaxKind::CloseBracketToken);
        TypeNode::Tuple(elements)
    }

    fn parse_tuple_element(&mut self) -> TupleElement {
        let rest = self.parse_optional(SyntaxKind::DotDotDotToken);
        let is_named = self.is_token(SyntaxKind::Identifier)
            && self.look_ahead(|p| {
                p.next_token();
                if p.is_token(SyntaxKind::QuestionToken) {
                    p.next_token();
                }
                p.is_token(SyntaxKind::ColonToken)
            });

        let mut name = None;
        let mut optional = false;
        if is_named {
            name = Some(self.token_value());
            self.next_token();
            optional = self.parse_optional(SyntaxKind::QuestionToken);
            self.parse_expected(SyntaxKind::ColonToken);
        }
        let ty = self.parse_type();
        if self.parse_optional(SyntaxKind::QuestionToken) {
            optional = true;
        }
        TupleElement {
            name,
            optional,
            rest,
            ty,
        }
    }
}

/// Numeric literal text to its value; non-decimal radixes and separators included.
pub(crate) fn parse_numeric_literal(text: &str) -> f64 {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let radix = match lower.get(..2) {
        Some("0x") => 16,
        Some("0o") => 8,
        Some("0b") => 2,
        _ => return lower.trim_end_matches('n').parse().unwrap_or(f64::NAN),
    };
    u64::from_str_radix(lower[2..].trim_end_matches('n'), radix)
        .map(|v| v as f64)
        .unwrap_or(f64::NAN)
}
