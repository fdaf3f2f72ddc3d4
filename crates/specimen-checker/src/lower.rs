//! Type-node lowering.
//!
//! Converts parser `TypeNode`s into interned solver types. Names resolve in
//! this order: type parameters in scope, declarations bound in the file,
//! `Array`/`ReadonlyArray`, then a global of that name (which classifies as
//! a wrapper primitive or `Unknown`).
//!
//! Shapes outside the description model are folded here:
//!
//! | Source | Lowered |
//! |--------|---------|
//! | `enum E`, `'a' \| 'b'` | `LiteralUnion` |
//! | `E.A` | `Literal` of the member |
//! | `T \| null \| undefined` | `T` |
//! | `type L<T> = T[]` at `L<string>` | `string[]` (substituted) |
//! | `A & B`, `keyof T`, `T[K]` | `Unresolved` |

use crate::binder::{AliasBody, Binder};
use specimen_common::LiteralValue;
use specimen_parser::{
    Declaration, DeclarationKind, KeywordType, Member, MemberKind as SyntaxMemberKind, TypeNode,
};
use specimen_solver::{
    DefId, DefKind, MemberInfo, MemberKind, TypeData, TypeId, TypeInterner, TypeParamId,
    TypeSubstitution, instantiate_type,
};
use tracing::{debug, trace};

type Scope = Vec<(String, TypeId)>;

pub(crate) struct TypeLowering<'a> {
    interner: &'a mut TypeInterner,
    binder: &'a mut Binder,
    declarations: &'a [Declaration],
    /// Type parameters visible to the node being lowered, innermost last.
    scope: Scope,
}

impl<'a> TypeLowering<'a> {
    pub(crate) fn new(
        interner: &'a mut TypeInterner,
        binder: &'a mut Binder,
        declarations: &'a [Declaration],
    ) -> Self {
        TypeLowering {
            interner,
            binder,
            declarations,
            scope: Vec::new(),
        }
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    /// Lower every bound declaration.
    ///
    /// Enum value sets come first (nothing they contain refers to other
    /// types), then type-parameter defaults, then member lists and alias
    /// bodies.
    pub(crate) fn lower_declarations(&mut self) {
        let declarations = self.declarations;
        for (index, declaration) in declarations.iter().enumerate() {
            if declaration.kind == DeclarationKind::Enum && self.binder.is_bound(index, declaration)
            {
                self.lower_enum(&declaration.name);
            }
        }

        for (index, declaration) in declarations.iter().enumerate() {
            if let Some(def) = self.bound_def(index, declaration) {
                self.lower_defaults(def, declaration);
            }
        }

        for (index, declaration) in declarations.iter().enumerate() {
            let Some(def) = self.bound_def(index, declaration) else {
                continue;
            };
            match declaration.kind {
                DeclarationKind::Interface | DeclarationKind::Class => {
                    let saved = self.enter_declaration(def, declaration);
                    let members = self.lower_members(&declaration.members);
                    self.interner.extend_members(def, members);
                    self.scope = saved;
                }
                DeclarationKind::TypeAlias => {
                    self.alias_body(def, &declaration.name);
                }
                DeclarationKind::Enum => {}
            }
        }
    }

    fn bound_def(&self, index: usize, declaration: &Declaration) -> Option<DefId> {
        if !self.binder.is_bound(index, declaration) {
            return None;
        }
        self.binder.def_of(&declaration.name)
    }

    fn lower_enum(&mut self, name: &str) {
        let declarations = self.declarations;
        let Some(symbol) = self.binder.symbol(name) else {
            return;
        };
        if self.binder.enum_types.contains_key(&symbol.def) {
            return;
        }
        let def = symbol.def;
        let values: Vec<LiteralValue> = symbol
            .declarations
            .iter()
            .filter_map(|&index| declarations.get(index))
            .flat_map(|declaration| declaration.enum_members.iter())
            .map(|member| member.value.clone())
            .collect();
        trace!(name, values = values.len(), "lowered enum");
        let ty = self.interner.literal_union(values);
        self.binder.enum_types.insert(def, ty);
    }

    fn lower_defaults(&mut self, def: DefId, declaration: &Declaration) {
        if declaration.type_params.iter().all(|p| p.default.is_none()) {
            return;
        }
        let saved = self.enter_declaration(def, declaration);
        let params = self.declaration_params(def);
        for (param, id) in declaration.type_params.iter().zip(params) {
            if let Some(default) = &param.default {
                let ty = self.lower_type(default);
                self.interner.set_type_param_default(id, ty);
            }
        }
        self.scope = saved;
    }

    fn declaration_params(&self, def: DefId) -> Vec<TypeParamId> {
        self.interner
            .def(def)
            .map(|info| info.type_params.clone())
            .unwrap_or_default()
    }

    /// Bring `declaration`'s type parameters into scope, returning the
    /// previous scope. Merged declarations may name their parameters
    /// differently; positions line up.
    fn enter_declaration(&mut self, def: DefId, declaration: &Declaration) -> Scope {
        let params = self.declaration_params(def);
        let scope = declaration
            .type_params
            .iter()
            .zip(params)
            .map(|(param, id)| (param.name.clone(), self.interner.param(id)))
            .collect();
        std::mem::replace(&mut self.scope, scope)
    }

    /// Lower (once) and return the body of a type alias.
    fn alias_body(&mut self, def: DefId, name: &str) -> Option<AliasBody> {
        if let Some(&body) = self.binder.alias_bodies.get(&def) {
            if body == AliasBody::Lowering {
                debug!(alias = name, "circular type alias");
                return None;
            }
            return Some(body);
        }

        let declarations = self.declarations;
        let index = *self.binder.symbol(name)?.declarations.first()?;
        let declaration = declarations.get(index)?;
        let body = declaration.alias.as_ref()?;

        let saved = self.enter_declaration(def, declaration);
        let result = if let TypeNode::TypeLiteral(members) = body.skip_parens() {
            // Registered up front so members may refer back to the alias.
            self.binder.alias_bodies.insert(def, AliasBody::Object);
            let members = self.lower_members(members);
            self.interner.extend_members(def, members);
            AliasBody::Object
        } else {
            self.binder.alias_bodies.insert(def, AliasBody::Lowering);
            AliasBody::Expanded(self.lower_type(body))
        };
        self.scope = saved;
        self.binder.alias_bodies.insert(def, result);
        Some(result)
    }

    // =========================================================================
    // Members
    // =========================================================================

    fn lower_members(&mut self, members: &[Member]) -> Vec<MemberInfo> {
        members
            .iter()
            .map(|member| self.lower_member(member))
            .collect()
    }

    fn lower_member(&mut self, member: &Member) -> MemberInfo {
        let declared = member.type_node.as_ref().map(|node| self.lower_type(node));
        let kind = match member.kind {
            SyntaxMemberKind::Property => MemberKind::Property,
            SyntaxMemberKind::Method => MemberKind::Method,
        };
        MemberInfo {
            name: member.name.clone(),
            kind,
            declared,
        }
    }

    // =========================================================================
    // Type Nodes
    // =========================================================================

    pub(crate) fn lower_type(&mut self, node: &TypeNode) -> TypeId {
        match node {
            TypeNode::Keyword(keyword) => keyword_type(*keyword),
            TypeNode::Reference { name, args } => self.lower_reference(name, args),
            TypeNode::Array(element) => {
                let element = self.lower_type(element);
                self.interner.array(element)
            }
            TypeNode::Tuple(elements) => {
                let elements: Vec<TypeId> = elements
                    .iter()
                    .map(|element| self.lower_type(&element.ty))
                    .collect();
                self.interner.tuple(elements)
            }
            TypeNode::TypeLiteral(members) => {
                let members = self.lower_members(members);
                self.interner.object(members)
            }
            TypeNode::Literal(value) => self.interner.literal(value.clone()),
            TypeNode::Union(members) => self.lower_union(members),
            TypeNode::Function { return_type } => {
                let return_type = self.lower_type(return_type);
                self.interner.function(return_type)
            }
            TypeNode::Parenthesized(inner) => self.lower_type(inner),
            TypeNode::Intersection(_) | TypeNode::Unsupported => self.interner.unresolved(),
        }
    }

    fn lower_reference(&mut self, name: &[String], args: &[TypeNode]) -> TypeId {
        let Some(last) = name.last() else {
            return self.interner.unresolved();
        };
        if let [first, _, ..] = name
            && let Some(ty) = self.enum_member_type(first, last)
        {
            return ty;
        }

        let name = last.as_str();
        if let Some(&(_, param)) = self.scope.iter().rev().find(|(n, _)| n == name) {
            return param;
        }
        if let Some(symbol) = self.binder.symbol(name) {
            let (def, kind) = (symbol.def, symbol.kind);
            return self.lower_declared_reference(def, kind, name, args);
        }
        match name {
            "Array" | "ReadonlyArray" => {
                let element = args
                    .first()
                    .map_or(TypeId::UNKNOWN, |arg| self.lower_type(arg));
                self.interner.array(element)
            }
            _ => {
                trace!(name, "global type reference");
                self.interner.global(name)
            }
        }
    }

    /// `E.A` where `E` is an enum: the member's literal.
    fn enum_member_type(&mut self, enum_name: &str, member: &str) -> Option<TypeId> {
        let symbol = self.binder.symbol(enum_name)?;
        if symbol.kind != DefKind::Enum {
            return None;
        }
        let declarations = self.declarations;
        let value = symbol
            .declarations
            .iter()
            .filter_map(|&index| declarations.get(index))
            .flat_map(|declaration| declaration.enum_members.iter())
            .find(|m| m.name == member)
            .map(|m| m.value.clone());
        Some(match value {
            Some(value) => self.interner.literal(value),
            None => {
                debug!(enum_name, member, "unknown enum member");
                self.interner.unresolved()
            }
        })
    }

    fn lower_declared_reference(
        &mut self,
        def: DefId,
        kind: DefKind,
        name: &str,
        args: &[TypeNode],
    ) -> TypeId {
        match kind {
            DefKind::Enum => self
                .binder
                .enum_types
                .get(&def)
                .copied()
                .unwrap_or(TypeId::UNKNOWN),
            DefKind::TypeAlias => match self.alias_body(def, name) {
                Some(AliasBody::Expanded(body)) => self.expand_alias(def, body, args),
                Some(AliasBody::Object) => self.lower_def_reference(def, args),
                Some(AliasBody::Lowering) | None => self.interner.unresolved(),
            },
            DefKind::Interface | DefKind::Class => self.lower_def_reference(def, args),
        }
    }

    fn lower_def_reference(&mut self, def: DefId, args: &[TypeNode]) -> TypeId {
        let args: Vec<TypeId> = args.iter().map(|arg| self.lower_type(arg)).collect();
        self.interner.reference(def, args)
    }

    /// Substitute the alias's parameters in its body. Omitted arguments take
    /// the parameter default (which may name an earlier parameter), else
    /// `unknown`.
    fn expand_alias(&mut self, def: DefId, body: TypeId, args: &[TypeNode]) -> TypeId {
        let params = self.declaration_params(def);
        if params.is_empty() {
            return body;
        }
        let args: Vec<TypeId> = args.iter().map(|arg| self.lower_type(arg)).collect();
        let mut substitution = TypeSubstitution::default();
        for (index, param) in params.into_iter().enumerate() {
            let arg = match args.get(index) {
                Some(&arg) => arg,
                None => match self.interner.type_param_info(param).and_then(|p| p.default) {
                    Some(default) => instantiate_type(self.interner, default, &substitution),
                    None => TypeId::UNKNOWN,
                },
            };
            substitution.insert(param, arg);
        }
        instantiate_type(self.interner, body, &substitution)
    }

    fn lower_union(&mut self, members: &[TypeNode]) -> TypeId {
        let mut kept: Vec<TypeId> = Vec::new();
        let mut nullish = None;
        for member in members {
            let ty = self.lower_type(member);
            if ty.is_nullish() {
                nullish.get_or_insert(ty);
                continue;
            }
            let flattened = match self.interner.lookup(ty) {
                Some(TypeData::Union(inner)) => inner.to_vec(),
                _ => vec![ty],
            };
            for ty in flattened {
                if !kept.contains(&ty) {
                    kept.push(ty);
                }
            }
        }

        match kept.as_slice() {
            [] => nullish.unwrap_or(TypeId::NEVER),
            [single] => *single,
            _ => match self.literal_values(&kept) {
                Some(values) => self.interner.literal_union(values),
                None => self.interner.union(kept),
            },
        }
    }

    /// The combined literal set when every type is a literal or literal union.
    fn literal_values(&self, types: &[TypeId]) -> Option<Vec<LiteralValue>> {
        let mut values: Vec<LiteralValue> = Vec::new();
        for &ty in types {
            let found: &[LiteralValue] = match self.interner.lookup(ty)? {
                TypeData::Literal(value) => std::slice::from_ref(value),
                TypeData::LiteralUnion(inner) => inner,
                _ => return None,
            };
            for value in found {
                if !values.contains(value) {
                    values.push(value.clone());
                }
            }
        }
        Some(values)
    }
}

fn keyword_type(keyword: KeywordType) -> TypeId {
    match keyword {
        KeywordType::String => TypeId::STRING,
        KeywordType::Number => TypeId::NUMBER,
        KeywordType::Boolean => TypeId::BOOLEAN,
        KeywordType::BigInt => TypeId::BIGINT,
        KeywordType::Symbol => TypeId::SYMBOL,
        KeywordType::Object => TypeId::OBJECT,
        KeywordType::Null => TypeId::NULL,
        KeywordType::Undefined => TypeId::UNDEFINED,
        KeywordType::Void => TypeId::VOID,
        KeywordType::Any => TypeId::ANY,
        KeywordType::Unknown => TypeId::UNKNOWN,
        KeywordType::Never => TypeId::NEVER,
    }
}

#[cfg(test)]
#[path = "../tests/lower_tests.rs"]
mod tests;
