//! Declaration binding.
//!
//! Every named declaration becomes a `DefId` in the interner and every type
//! parameter a `TypeParamId` owned by it. Declarations that share a name merge
//! into one symbol when their kinds are compatible (interface with interface
//! or class, enum with enum); later type-parameter lists line up with the
//! first by position. An incompatible redeclaration is ignored.

use rustc_hash::FxHashMap;
use specimen_parser::{Declaration, DeclarationKind, SourceFile};
use specimen_solver::{DefId, DefKind, TypeId, TypeInterner};
use tracing::debug;

/// A bound declaration name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Symbol {
    pub def: DefId,
    pub kind: DefKind,
    /// Indices into the file's declarations, in source order.
    pub declarations: Vec<usize>,
}

/// Lowering state of a type alias.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum AliasBody {
    /// Body is being lowered; a reference seen now is circular.
    Lowering,
    /// Object-literal body: members live on the def, uses are references.
    Object,
    /// Any other body; generic uses are expanded by substitution.
    Expanded(TypeId),
}

#[derive(Debug, Default)]
pub struct Binder {
    symbols: FxHashMap<String, Symbol>,
    pub(crate) alias_bodies: FxHashMap<DefId, AliasBody>,
    pub(crate) enum_types: FxHashMap<DefId, TypeId>,
}

pub(crate) fn def_kind(kind: DeclarationKind) -> DefKind {
    match kind {
        DeclarationKind::Interface => DefKind::Interface,
        DeclarationKind::Class => DefKind::Class,
        DeclarationKind::TypeAlias => DefKind::TypeAlias,
        DeclarationKind::Enum => DefKind::Enum,
    }
}

fn merges_with(existing: DefKind, incoming: DefKind) -> bool {
    matches!(
        (existing, incoming),
        (DefKind::Interface | DefKind::Class, DefKind::Interface)
            | (DefKind::Interface, DefKind::Class)
            | (DefKind::Enum, DefKind::Enum)
    )
}

impl Binder {
    /// Bind every declaration of `file`, registering defs and type parameters.
    pub fn bind(interner: &mut TypeInterner, file: &SourceFile) -> Self {
        let mut binder = Binder::default();
        for (index, declaration) in file.declarations.iter().enumerate() {
            binder.bind_declaration(interner, index, declaration);
        }
        debug!(
            file = %file.file_name,
            symbols = binder.symbols.len(),
            "bound declarations"
        );
        binder
    }

    fn bind_declaration(
        &mut self,
        interner: &mut TypeInterner,
        index: usize,
        declaration: &Declaration,
    ) {
        let kind = def_kind(declaration.kind);
        if let Some(symbol) = self.symbols.get_mut(&declaration.name) {
            if !merges_with(symbol.kind, kind) {
                debug!(
                    name = %declaration.name,
                    existing = ?symbol.kind,
                    incoming = ?kind,
                    "ignoring incompatible redeclaration"
                );
                return;
            }
            symbol.declarations.push(index);
            let known = interner
                .def(symbol.def)
                .map_or(0, |info| info.type_params.len());
            for param in declaration.type_params.iter().skip(known) {
                interner.add_type_param(symbol.def, &param.name);
            }
            return;
        }

        let def = interner.define(&declaration.name, kind);
        for param in &declaration.type_params {
            interner.add_type_param(def, &param.name);
        }
        self.symbols.insert(
            declaration.name.clone(),
            Symbol {
                def,
                kind,
                declarations: vec![index],
            },
        );
    }

    pub fn symbol(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn def_of(&self, name: &str) -> Option<DefId> {
        self.symbols.get(name).map(|symbol| symbol.def)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Whether the declaration at `index` is part of its name's symbol.
    pub(crate) fn is_bound(&self, index: usize, declaration: &Declaration) -> bool {
        self.symbols
            .get(&declaration.name)
            .is_some_and(|symbol| symbol.declarations.contains(&index))
    }
}

#[cfg(test)]
#[path = "../tests/binder_tests.rs"]
mod tests;
