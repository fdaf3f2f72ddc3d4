//! TypeScript declaration parser for the specimen pipeline.
//!
//! This crate provides:
//! - `ast` - Declarations, members and type nodes
//! - `parser` - `ParserState` and the `parse_source`/`parse_type_text` entry points

pub mod ast;
pub mod parser;

pub use ast::{
    Declaration, DeclarationKind, EnumMember, KeywordType, Member, MemberKind, SourceFile,
    TupleElement, TypeNode, TypeParameter,
};
pub use parser::{ParserState, parse_source, parse_type_text};
