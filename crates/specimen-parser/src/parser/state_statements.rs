//! Parser state - statement, declaration and member parsing methods

use super::state::ParserState;
use super::state_types::parse_numeric_literal;
use crate::ast::{
    Declaration, DeclarationKind, EnumMember, Member, MemberKind, SourceFile, TypeParameter,
};
use specimen_common::diagnostics::diagnostic_codes;
use specimen_common::{LiteralValue, Span};
use specimen_scanner::SyntaxKind;
use tracing::debug;

/// Modifiers that may prefix a top-level declaration.
const DECLARATION_MODIFIERS: &[&str] = &["export", "declare", "default", "abstract"];

/// Modifiers that may prefix a class or interface member.
const MEMBER_MODIFIERS: &[&str] = &[
    "public",
    "private",
    "protected",
    "readonly",
    "static",
    "abstract",
    "override",
    "declare",
    "async",
    "accessor",
];

impl ParserState {
    // =========================================================================
    // Parse Methods - Source File and Statements
    // =========================================================================

    /// Parse a source file
    pub fn parse_source_file(&mut self) -> SourceFile {
        self.next_token();
        let mut declarations = Vec::new();
        while !self.is_token(SyntaxKind::EndOfFileToken) {
            let before = self.token_pos();
            self.parse_statement(&mut declarations);
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }
        self.collect_scanner_errors();
        debug!(
            file = %self.file_name,
            declarations = declarations.len(),
            diagnostics = self.parse_diagnostics.len(),
            "parsed source file"
        );
        SourceFile {
            file_name: self.file_name.clone(),
            declarations,
        }
    }

    fn parse_statement(&mut self, out: &mut Vec<Declaration>) {
        let start = self.token_pos();
        match self.token() {
            SyntaxKind::SemicolonToken => {
                self.next_token();
                return;
            }
            SyntaxKind::AtToken => {
                self.skip_decorator();
                return;
            }
            SyntaxKind::Identifier => {}
            SyntaxKind::OpenBraceToken => {
                self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
                return;
            }
            SyntaxKind::CloseBraceToken
            | SyntaxKind::CloseParenToken
            | SyntaxKind::CloseBracketToken
            | SyntaxKind::CommaToken
            | SyntaxKind::ColonToken
            | SyntaxKind::EqualsToken
            | SyntaxKind::EqualsGreaterThanToken
            | SyntaxKind::GreaterThanToken
            | SyntaxKind::BarToken
            | SyntaxKind::AmpersandToken
            | SyntaxKind::DotToken
            | SyntaxKind::DotDotDotToken
            | SyntaxKind::QuestionToken => {
                self.error_at_current(diagnostic_codes::DECLARATION_OR_STATEMENT_EXPECTED, &[]);
                self.next_token();
                return;
            }
            _ => {
                self.skip_statement();
                return;
            }
        }

        while self.is_declaration_modifier() {
            self.next_token();
        }

        let keyword = self.token_value();
        match keyword.as_str() {
            "interface" if self.next_is_identifier() => {
                self.next_token();
                out.extend(self.parse_interface_declaration(start));
            }
            "class" => {
                self.next_token();
                out.extend(self.parse_class_declaration(start));
            }
            "type" if self.next_is_identifier() => {
                self.next_token();
                out.extend(self.parse_type_alias_declaration(start));
            }
            "enum" => {
                self.next_token();
                out.extend(self.parse_enum_declaration(start));
            }
            "const" if self.look_ahead(|p| {
                p.next_token();
                p.is_identifier_text("enum")
            }) =>
            {
                self.next_token();
                self.next_token();
                out.extend(self.parse_enum_declaration(start));
            }
            "namespace" | "module" if self.next_starts_module_body() => {
                self.parse_module_declaration(out);
            }
            "global" if self.peek_token() == SyntaxKind::OpenBraceToken => {
                self.next_token();
                self.parse_module_block(out);
            }
            _ => self.skip_statement(),
        }
    }

    fn is_declaration_modifier(&mut self) -> bool {
        if !self.is_token(SyntaxKind::Identifier) {
            return false;
        }
        let text = self.token_value();
        if !DECLARATION_MODIFIERS.contains(&text.as_str()) {
            return false;
        }
        // `export =`, `export {`, `export *` are statements, not modifiers.
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::Identifier) && !p.has_preceding_line_break()
        })
    }

    fn next_is_identifier(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            p.is_token(SyntaxKind::Identifier)
        })
    }

    fn next_starts_module_body(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            matches!(p.token(), SyntaxKind::Identifier | SyntaxKind::StringLiteral)
        })
    }

    /// `namespace A.B { ... }` / `declare module "m" { ... }`; nested declarations
    /// are flattened into the enclosing file.
    fn parse_module_declaration(&mut self, out: &mut Vec<Declaration>) {
        self.next_token();
        if self.is_token(SyntaxKind::StringLiteral) {
            self.next_token();
        } else {
            self.parse_identifier();
            while self.parse_optional(SyntaxKind::DotToken) {
                self.parse_identifier();
            }
        }
        if self.is_token(SyntaxKind::OpenBraceToken) {
            self.parse_module_block(out);
        } else {
            self.parse_optional(SyntaxKind::SemicolonToken);
        }
    }

    fn parse_module_block(&mut self, out: &mut Vec<Declaration>) {
        self.parse_expected(SyntaxKind::OpenBraceToken);
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            self.parse_statement(out);
            if self.token_pos() == before && !self.is_token(SyntaxKind::EndOfFileToken) {
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
    }

    /// Skip a statement this front-end does not model (imports, variables,
    /// functions, expressions).
    fn skip_statement(&mut self) {
        let mut depth = 0usize;
        let mut first = true;
        loop {
            let kind = self.token();
            if kind == SyntaxKind::EndOfFileToken {
                return;
            }
            let is_close = matches!(
                kind,
                SyntaxKind::CloseBraceToken
                    | SyntaxKind::CloseParenToken
                    | SyntaxKind::CloseBracketToken
            );
            if depth == 0 && !first {
                // A stray close belongs to the enclosing block.
                if is_close || (self.has_preceding_line_break() && self.starts_declaration()) {
                    return;
                }
            }
            first = false;
            self.next_token();
            match kind {
                SyntaxKind::SemicolonToken if depth == 0 => return,
                SyntaxKind::OpenBraceToken
                | SyntaxKind::OpenParenToken
                | SyntaxKind::OpenBracketToken => depth += 1,
                _ if is_close => {
                    if depth == 0 {
                        return;
                    }
                    depth -= 1;
                    if depth == 0 && kind == SyntaxKind::CloseBraceToken {
                        self.parse_optional(SyntaxKind::SemicolonToken);
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn starts_declaration(&self) -> bool {
        self.is_token(SyntaxKind::Identifier)
            && matches!(
                self.scanner.token_value(),
                "interface"
                    | "class"
                    | "type"
                    | "enum"
                    | "export"
                    | "declare"
                    | "namespace"
                    | "abstract"
                    | "import"
                    | "function"
                    | "const"
                    | "let"
                    | "var"
            )
    }

    fn skip_decorator(&mut self) {
        self.next_token();
        self.parse_identifier();
        while self.parse_optional(SyntaxKind::DotToken) {
            self.parse_identifier();
        }
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        }
    }

    // =========================================================================
    // Parse Methods - Declarations
    // =========================================================================

    fn parse_interface_declaration(&mut self, start: u32) -> Option<Declaration> {
        let name = self.parse_identifier()?;
        let mut decl = Declaration::new(DeclarationKind::Interface, name, Span::at(start));
        decl.type_params = self.parse_type_parameters();
        self.skip_heritage_clauses();
        decl.members = self.parse_type_members();
        decl.span = Span::new(start, self.token_pos());
        Some(decl)
    }

    fn parse_class_declaration(&mut self, start: u32) -> Option<Declaration> {
        let name = if self.is_token(SyntaxKind::Identifier)
            && !self.is_identifier_text("extends")
            && !self.is_identifier_text("implements")
        {
            let name = self.token_value();
            self.next_token();
            name
        } else {
            "default".to_string()
        };
        let mut decl = Declaration::new(DeclarationKind::Class, name, Span::at(start));
        decl.type_params = self.parse_type_parameters();
        self.skip_heritage_clauses();
        decl.members = self.parse_class_members();
        decl.span = Span::new(start, self.token_pos());
        Some(decl)
    }

    fn parse_type_alias_declaration(&mut self, start: u32) -> Option<Declaration> {
        let name = self.parse_identifier()?;
        let mut decl = Declaration::new(DeclarationKind::TypeAlias, name, Span::at(start));
        decl.type_params = self.parse_type_parameters();
        self.parse_expected(SyntaxKind::EqualsToken);
        decl.alias = Some(self.parse_type());
        self.parse_optional(SyntaxKind::SemicolonToken);
        decl.span = Span::new(start, self.token_pos());
        Some(decl)
    }

    /// Enum members without an initializer take the previous numeric value plus
    /// one, starting at 0. String members leave the counter unchanged.
    fn parse_enum_declaration(&mut self, start: u32) -> Option<Declaration> {
        let name = self.parse_identifier()?;
        let mut decl = Declaration::new(DeclarationKind::Enum, name, Span::at(start));
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return Some(decl);
        }

        let mut next_value = 0.0_f64;
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let member_name = match self.token() {
                SyntaxKind::Identifier | SyntaxKind::StringLiteral => {
                    let name = self.token_value();
                    self.next_token();
                    name
                }
                _ => {
                    self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                    self.next_token();
                    continue;
                }
            };

            let mut value = LiteralValue::number(next_value);
            if self.parse_optional(SyntaxKind::EqualsToken) {
                value = match self.parse_enum_initializer() {
                    Some(literal) => literal,
                    None => LiteralValue::number(next_value),
                };
            }
            if let LiteralValue::Number(n) = &value {
                next_value = n.0 + 1.0;
            }
            decl.enum_members.push(EnumMember {
                name: member_name,
                value,
            });

            if !self.parse_optional(SyntaxKind::CommaToken)
                && !self.is_token(SyntaxKind::CloseBraceToken)
            {
                self.parse_expected(SyntaxKind::CommaToken);
                self.skip_initializer();
                self.parse_optional(SyntaxKind::CommaToken);
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        decl.span = Span::new(start, self.token_pos());
        Some(decl)
    }

    /// A literal initializer; computed initializers are skipped and yield `None`.
    fn parse_enum_initializer(&mut self) -> Option<LiteralValue> {
        let negative = self.parse_optional(SyntaxKind::MinusToken);
        let literal = match self.token() {
            SyntaxKind::StringLiteral if !negative => {
                Some(LiteralValue::String(self.token_value()))
            }
            SyntaxKind::NumericLiteral => {
                let value = parse_numeric_literal(self.scanner.token_text());
                Some(LiteralValue::number(if negative { -value } else { value }))
            }
            _ => None,
        };
        let is_simple = literal.is_some()
            && self.look_ahead(|p| {
                p.next_token();
                matches!(
                    p.token(),
                    SyntaxKind::CommaToken | SyntaxKind::CloseBraceToken
                )
            });
        if is_simple {
            self.next_token();
            literal
        } else {
            self.skip_initializer();
            None
        }
    }

    /// `<T, U extends X = Y>`
    pub(crate) fn parse_type_parameters(&mut self) -> Vec<TypeParameter> {
        let mut params = Vec::new();
        if !self.parse_optional(SyntaxKind::LessThanToken) {
            return params;
        }
        while !self.is_token(SyntaxKind::GreaterThanToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            // `const T`, `in T`, `out T`
            while (self.is_identifier_text("const")
                || self.is_identifier_text("in")
                || self.is_identifier_text("out"))
                && self.next_is_identifier()
            {
                self.next_token();
            }
            let Some(name) = self.parse_identifier() else {
                break;
            };
            let constraint = if self.is_identifier_text("extends") {
                self.next_token();
                Some(self.parse_type())
            } else {
                None
            };
            let default = if self.parse_optional(SyntaxKind::EqualsToken) {
                Some(self.parse_type())
            } else {
                None
            };
            params.push(TypeParameter {
                name,
                constraint,
                default,
            });
            if !self.parse_optional(SyntaxKind::CommaToken) {
                break;
            }
        }
        self.parse_expected(SyntaxKind::GreaterThanToken);
        params
    }

    /// `extends A<B>, C implements D` - parsed for syntax, not modeled.
    fn skip_heritage_clauses(&mut self) {
        while self.is_identifier_text("extends") || self.is_identifier_text("implements") {
            self.next_token();
            loop {
                let before = self.token_pos();
                self.parse_type();
                if self.token_pos() == before || !self.parse_optional(SyntaxKind::CommaToken) {
                    break;
                }
            }
        }
    }

    // =========================================================================
    // Parse Methods - Members
    // =========================================================================

    /// `{ a: T; b?(): U; [k: string]: V }` for interfaces and type literals.
    pub(crate) fn parse_type_members(&mut self) -> Vec<Member> {
        let mut members = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            if let Some(member) = self.parse_member(false) {
                members.push(member);
            }
            while self.parse_optional(SyntaxKind::SemicolonToken)
                || self.parse_optional(SyntaxKind::CommaToken)
            {}
            if self.token_pos() == before {
                self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    fn parse_class_members(&mut self) -> Vec<Member> {
        let mut members = Vec::new();
        if !self.parse_expected(SyntaxKind::OpenBraceToken) {
            return members;
        }
        while !self.is_token(SyntaxKind::CloseBraceToken)
            && !self.is_token(SyntaxKind::EndOfFileToken)
        {
            let before = self.token_pos();
            if let Some(member) = self.parse_member(true) {
                members.push(member);
            }
            while self.parse_optional(SyntaxKind::SemicolonToken) {}
            if self.token_pos() == before {
                self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                self.next_token();
            }
        }
        self.parse_expected(SyntaxKind::CloseBraceToken);
        members
    }

    /// Parse one member. Returns `None` for members the shape model drops:
    /// call/construct/index signatures, constructors, setters, static and
    /// `#private` members, computed names.
    fn parse_member(&mut self, in_class: bool) -> Option<Member> {
        let start = self.token_pos();
        while self.is_token(SyntaxKind::AtToken) {
            self.skip_decorator();
        }

        let mut is_static = false;
        while self.is_member_modifier() {
            is_static |= self.is_identifier_text("static");
            self.next_token();
        }
        // generator methods: `*items()`
        if self.is_token(SyntaxKind::Unknown) && self.scanner.token_text() == "*" {
            self.next_token();
        }
        if is_static && self.is_token(SyntaxKind::OpenBraceToken) {
            // static initialization block
            self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
            return None;
        }

        // Call and construct signatures: `(x): R`, `<T>(x): R`, `new (x): R`
        if self.is_token(SyntaxKind::OpenParenToken) || self.is_token(SyntaxKind::LessThanToken) {
            self.skip_signature_tail(in_class);
            return None;
        }
        if self.is_identifier_text("new")
            && matches!(
                self.peek_token(),
                SyntaxKind::OpenParenToken | SyntaxKind::LessThanToken
            )
        {
            self.next_token();
            self.skip_signature_tail(in_class);
            return None;
        }

        let accessor = if (self.is_identifier_text("get") || self.is_identifier_text("set"))
            && self.next_is_member_name()
        {
            let kind = self.token_value();
            self.next_token();
            Some(kind)
        } else {
            None
        };

        let name = match self.token() {
            SyntaxKind::Identifier | SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral => {
                let name = self.token_value();
                self.next_token();
                Some(name)
            }
            SyntaxKind::OpenBracketToken => {
                // Index signature or computed property name.
                self.skip_balanced(SyntaxKind::OpenBracketToken, SyntaxKind::CloseBracketToken);
                None
            }
            _ => {
                self.error_at_current(diagnostic_codes::IDENTIFIER_EXPECTED, &[]);
                return None;
            }
        };

        let optional = self.parse_optional(SyntaxKind::QuestionToken);
        self.parse_optional(SyntaxKind::ExclamationToken);

        let is_constructor = in_class && name.as_deref() == Some("constructor");
        let is_method = self.is_token(SyntaxKind::OpenParenToken)
            || self.is_token(SyntaxKind::LessThanToken);

        let (kind, type_node) = if is_method {
            if self.is_token(SyntaxKind::LessThanToken) {
                self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
            }
            let return_type = self.parse_signature_tail(in_class);
            match accessor.as_deref() {
                Some("get") => (MemberKind::Property, return_type),
                _ => (MemberKind::Method, return_type),
            }
        } else {
            let type_node = if self.parse_optional(SyntaxKind::ColonToken) {
                Some(self.parse_type())
            } else {
                None
            };
            if self.parse_optional(SyntaxKind::EqualsToken) {
                self.skip_initializer();
            }
            (MemberKind::Property, type_node)
        };

        let name = name?;
        if is_static || is_constructor || accessor.as_deref() == Some("set") || name.starts_with('#')
        {
            return None;
        }
        Some(Member {
            kind,
            name,
            optional,
            type_node,
            span: Span::new(start, self.token_pos()),
        })
    }

    fn is_member_modifier(&mut self) -> bool {
        if !self.is_token(SyntaxKind::Identifier) {
            return false;
        }
        let text = self.token_value();
        if !MEMBER_MODIFIERS.contains(&text.as_str()) {
            return false;
        }
        self.next_is_member_name()
    }

    /// Whether the next token can begin a member name (and so the current
    /// identifier is a modifier or accessor keyword, not the name itself).
    fn next_is_member_name(&mut self) -> bool {
        self.look_ahead(|p| {
            p.next_token();
            !p.has_preceding_line_break()
                && matches!(
                    p.token(),
                    SyntaxKind::Identifier
                        | SyntaxKind::StringLiteral
                        | SyntaxKind::NumericLiteral
                        | SyntaxKind::OpenBracketToken
                )
                || (p.is_token(SyntaxKind::OpenBraceToken) && !p.has_preceding_line_break())
        })
    }

    /// `(params): R` followed by an optional body in classes.
    fn parse_signature_tail(&mut self, in_class: bool) -> Option<crate::ast::TypeNode> {
        if self.is_token(SyntaxKind::OpenParenToken) {
            self.skip_balanced(SyntaxKind::OpenParenToken, SyntaxKind::CloseParenToken);
        } else {
            self.parse_expected(SyntaxKind::OpenParenToken);
        }
        let return_type = if self.parse_optional(SyntaxKind::ColonToken) {
            Some(self.parse_return_type())
        } else {
            None
        };
        if in_class && self.is_token(SyntaxKind::OpenBraceToken) {
            self.skip_balanced(SyntaxKind::OpenBraceToken, SyntaxKind::CloseBraceToken);
        }
        return_type
    }

    fn skip_signature_tail(&mut self, in_class: bool) {
        if self.is_token(SyntaxKind::LessThanToken) {
            self.skip_balanced(SyntaxKind::LessThanToken, SyntaxKind::GreaterThanToken);
        }
        self.parse_signature_tail(in_class);
    }
}
