//! Type interning.
//!
//! `TypeInterner` owns every `TypeData` and the declaration, type-parameter
//! and object-shape side tables. Interning deduplicates structurally equal
//! types; object shapes are allocated per type literal and never merged.

use crate::types::{
    DefId, DefInfo, DefKind, IntrinsicKind, MemberInfo, ObjectShapeId, TypeData, TypeId,
    TypeList, TypeParamId, TypeParamInfo,
};
use rustc_hash::FxHashMap;
use specimen_common::LiteralValue;
use tracing::trace;

#[derive(Debug)]
pub struct TypeInterner {
    types: Vec<TypeData>,
    map: FxHashMap<TypeData, TypeId>,
    defs: Vec<DefInfo>,
    params: Vec<TypeParamInfo>,
    shapes: Vec<Vec<MemberInfo>>,
}

impl Default for TypeInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeInterner {
    /// Create an interner with all intrinsics pre-registered at their fixed ids.
    pub fn new() -> Self {
        let mut interner = TypeInterner {
            types: Vec::with_capacity(64),
            map: FxHashMap::default(),
            defs: Vec::new(),
            params: Vec::new(),
            shapes: Vec::new(),
        };
        for kind in IntrinsicKind::ALL {
            interner.intern(TypeData::Intrinsic(kind));
        }
        debug_assert_eq!(interner.types.len() as u32, TypeId::FIRST_USER);
        interner
    }

    // =========================================================================
    // Interning
    // =========================================================================

    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        trace!(id = id.0, ?data, "intern");
        self.types.push(data.clone());
        self.map.insert(data, id);
        id
    }

    #[inline]
    pub fn lookup(&self, id: TypeId) -> Option<&TypeData> {
        self.types.get(id.0 as usize)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeData::Array(element))
    }

    pub fn tuple(&mut self, elements: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.intern(TypeData::Tuple(elements.into_iter().collect()))
    }

    pub fn reference(&mut self, def: DefId, args: impl IntoIterator<Item = TypeId>) -> TypeId {
        self.intern(TypeData::Reference {
            def,
            args: args.into_iter().collect(),
        })
    }

    pub fn param(&mut self, param: TypeParamId) -> TypeId {
        self.intern(TypeData::Param(param))
    }

    pub fn literal(&mut self, value: LiteralValue) -> TypeId {
        self.intern(TypeData::Literal(value))
    }

    pub fn literal_string(&mut self, value: &str) -> TypeId {
        self.literal(LiteralValue::string(value))
    }

    pub fn literal_number(&mut self, value: f64) -> TypeId {
        self.literal(LiteralValue::number(value))
    }

    pub fn literal_union(&mut self, values: Vec<LiteralValue>) -> TypeId {
        self.intern(TypeData::LiteralUnion(values))
    }

    pub fn union(&mut self, members: impl IntoIterator<Item = TypeId>) -> TypeId {
        let members: TypeList = members.into_iter().collect();
        match members.len() {
            0 => TypeId::NEVER,
            1 => members[0],
            _ => self.intern(TypeData::Union(members)),
        }
    }

    pub fn function(&mut self, return_type: TypeId) -> TypeId {
        self.intern(TypeData::Function { return_type })
    }

    pub fn global(&mut self, name: &str) -> TypeId {
        self.intern(TypeData::Global(name.to_string()))
    }

    pub fn unresolved(&mut self) -> TypeId {
        self.intern(TypeData::Unresolved)
    }

    /// Allocate a fresh anonymous object type with `members`.
    pub fn object(&mut self, members: Vec<MemberInfo>) -> TypeId {
        let shape = ObjectShapeId(self.shapes.len() as u32);
        self.shapes.push(members);
        self.intern(TypeData::Object(shape))
    }

    // =========================================================================
    // Declarations and Type Parameters
    // =========================================================================

    pub fn define(&mut self, name: &str, kind: DefKind) -> DefId {
        let def = DefId(self.defs.len() as u32);
        self.defs.push(DefInfo {
            name: name.to_string(),
            kind,
            type_params: Vec::new(),
            members: Vec::new(),
        });
        def
    }

    /// Register the next type parameter of `owner`.
    pub fn add_type_param(&mut self, owner: DefId, name: &str) -> TypeParamId {
        let id = TypeParamId(self.params.len() as u32);
        self.params.push(TypeParamInfo {
            name: name.to_string(),
            owner,
            default: None,
        });
        if let Some(def) = self.defs.get_mut(owner.0 as usize) {
            def.type_params.push(id);
        }
        id
    }

    pub fn set_type_param_default(&mut self, param: TypeParamId, default: TypeId) {
        if let Some(info) = self.params.get_mut(param.0 as usize) {
            info.default = Some(default);
        }
    }

    /// Append members to a declaration (same-name interfaces merge).
    pub fn extend_members(&mut self, def: DefId, members: impl IntoIterator<Item = MemberInfo>) {
        if let Some(info) = self.defs.get_mut(def.0 as usize) {
            info.members.extend(members);
        }
    }

    pub fn def(&self, def: DefId) -> Option<&DefInfo> {
        self.defs.get(def.0 as usize)
    }

    pub fn type_param_info(&self, param: TypeParamId) -> Option<&TypeParamInfo> {
        self.params.get(param.0 as usize)
    }

    pub fn shape_members(&self, shape: ObjectShapeId) -> Option<&[MemberInfo]> {
        self.shapes.get(shape.0 as usize).map(Vec::as_slice)
    }
}

#[cfg(test)]
#[path = "../tests/intern_tests.rs"]
mod tests;
