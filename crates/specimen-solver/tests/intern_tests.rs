use super::*;
use crate::db::ShapeDatabase;
use crate::types::MemberKind;

#[test]
fn test_interner_intrinsics() {
    let interner = TypeInterner::new();

    // Intrinsics should be pre-registered
    assert_eq!(
        interner.lookup(TypeId::STRING),
        Some(&TypeData::Intrinsic(IntrinsicKind::String))
    );
    assert_eq!(
        interner.lookup(TypeId::NEVER),
        Some(&TypeData::Intrinsic(IntrinsicKind::Never))
    );
    assert_eq!(interner.len(), TypeId::FIRST_USER as usize);
}

#[test]
fn test_interner_deduplication() {
    let mut interner = TypeInterner::new();

    let id1 = interner.literal_string("hello");
    let id2 = interner.literal_string("hello");
    let id3 = interner.literal_string("world");
    assert_eq!(id1, id2);
    assert_ne!(id1, id3);

    let a = interner.array(TypeId::NUMBER);
    let b = interner.array(TypeId::NUMBER);
    assert_eq!(a, b);
}

#[test]
fn test_interner_object_shapes_are_distinct() {
    let mut interner = TypeInterner::new();
    let members = vec![MemberInfo::property("x", TypeId::NUMBER)];

    let first = interner.object(members.clone());
    let second = interner.object(members);
    assert_ne!(first, second);
    assert_eq!(interner.members_of(first).map(<[_]>::len), Some(1));
}

#[test]
fn test_interner_union_collapses_trivial_cases() {
    let mut interner = TypeInterner::new();
    assert_eq!(interner.union([]), TypeId::NEVER);
    assert_eq!(interner.union([TypeId::STRING]), TypeId::STRING);
    let union = interner.union([TypeId::STRING, TypeId::NUMBER]);
    assert!(matches!(interner.lookup(union), Some(TypeData::Union(m)) if m.len() == 2));
}

#[test]
fn test_type_params_are_scoped_to_their_declaration() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let b = interner.define("B", DefKind::Interface);
    let a_t = interner.add_type_param(a, "T");
    let b_t = interner.add_type_param(b, "T");
    assert_ne!(a_t, b_t);

    interner.set_type_param_default(b_t, TypeId::STRING);
    assert_eq!(interner.type_params_of(a), &[a_t]);
    assert_eq!(interner.type_param(b_t).and_then(|p| p.default), Some(TypeId::STRING));
    assert_eq!(interner.type_param(a_t).map(|p| p.owner), Some(a));
}

#[test]
fn test_extend_members_appends_in_order() {
    let mut interner = TypeInterner::new();
    let def = interner.define("Merged", DefKind::Interface);
    interner.extend_members(def, [MemberInfo::property("a", TypeId::STRING)]);
    interner.extend_members(def, [MemberInfo::method("b", None)]);

    let reference = interner.reference(def, []);
    let members = interner.members_of(reference).unwrap();
    assert_eq!(members[0].name, "a");
    assert_eq!(members[1].kind, MemberKind::Method);
    assert_eq!(interner.def_name(def), Some("Merged"));
}
