//! Declaration and type-node AST.
//!
//! The tree keeps only what shape resolution reads: declaration names and
//! type parameters, member names with their declared type nodes, alias
//! bodies and enum member values. Bodies, initializers, parameters and
//! heritage clauses are consumed by the parser and dropped.

use specimen_common::{LiteralValue, Span};

/// A parsed source file: its top-level (and namespace-nested) declarations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SourceFile {
    pub file_name: String,
    pub declarations: Vec<Declaration>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    Interface,
    Class,
    TypeAlias,
    Enum,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub name: String,
    pub span: Span,
    pub type_params: Vec<TypeParameter>,
    /// Interface/class members in source order.
    pub members: Vec<Member>,
    /// Right-hand side of a type alias.
    pub alias: Option<TypeNode>,
    pub enum_members: Vec<EnumMember>,
}

impl Declaration {
    pub fn new(kind: DeclarationKind, name: impl Into<String>, span: Span) -> Self {
        Declaration {
            kind,
            name: name.into(),
            span,
            type_params: Vec::new(),
            members: Vec::new(),
            alias: None,
            enum_members: Vec::new(),
        }
    }
}

/// `T extends C = D`
#[derive(Clone, Debug, PartialEq)]
pub struct TypeParameter {
    pub name: String,
    pub constraint: Option<TypeNode>,
    pub default: Option<TypeNode>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Property,
    Method,
}

/// A property or method of an interface, class or type literal.
#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub kind: MemberKind,
    pub name: String,
    pub optional: bool,
    /// Declared type for properties, declared return type for methods.
    pub type_node: Option<TypeNode>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EnumMember {
    pub name: String,
    pub value: LiteralValue,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeywordType {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Object,
    Null,
    Undefined,
    Void,
    Any,
    Unknown,
    Never,
}

impl KeywordType {
    pub fn from_text(text: &str) -> Option<Self> {
        Some(match text {
            "string" => KeywordType::String,
            "number" => KeywordType::Number,
            "boolean" => KeywordType::Boolean,
            "bigint" => KeywordType::BigInt,
            "symbol" => KeywordType::Symbol,
            "object" => KeywordType::Object,
            "null" => KeywordType::Null,
            "undefined" => KeywordType::Undefined,
            "void" => KeywordType::Void,
            "any" => KeywordType::Any,
            "unknown" => KeywordType::Unknown,
            "never" => KeywordType::Never,
            _ => return None,
        })
    }
}

/// One position of a tuple type: `name?: T`, `...rest: T[]`, `T`.
#[derive(Clone, Debug, PartialEq)]
pub struct TupleElement {
    pub name: Option<String>,
    pub optional: bool,
    pub rest: bool,
    pub ty: TypeNode,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TypeNode {
    Keyword(KeywordType),
    /// `A`, `ns.A`, `A<B, C>`
    Reference {
        name: Vec<String>,
        args: Vec<TypeNode>,
    },
    Array(Box<TypeNode>),
    Tuple(Vec<TupleElement>),
    TypeLiteral(Vec<Member>),
    Literal(LiteralValue),
    Union(Vec<TypeNode>),
    Intersection(Vec<TypeNode>),
    /// Function or constructor type; only the return type is kept.
    Function {
        return_type: Box<TypeNode>,
    },
    Parenthesized(Box<TypeNode>),
    /// Syntax the shape model does not represent (`keyof`, `typeof`, indexed
    /// access, conditional and mapped types) or a type that failed to parse.
    Unsupported,
}

impl TypeNode {
    pub fn reference(name: impl Into<String>, args: Vec<TypeNode>) -> Self {
        TypeNode::Reference {
            name: vec![name.into()],
            args,
        }
    }

    /// Strip any number of parentheses.
    pub fn skip_parens(&self) -> &TypeNode {
        let mut node = self;
        while let TypeNode::Parenthesized(inner) = node {
            node = inner;
        }
        node
    }
}
