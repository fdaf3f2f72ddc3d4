use super::*;
use crate::intern::TypeInterner;
use crate::types::DefKind;
use specimen_common::{DescriptionFlag, LiteralValue, Primitive};

fn keyed(key: &str, description: TypeDescription) -> DescriptionEntry {
    DescriptionEntry::Property(PropertyDescriptor::new(description).with_key(key))
}

/// interface A<T> { t: C<T> }
/// interface C<D> { d: number; k: D }
fn nested_generic(interner: &mut TypeInterner) -> TypeId {
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let c = interner.define("C", DefKind::Interface);
    let d = interner.add_type_param(c, "D");

    let t_ref = interner.param(t);
    let d_ref = interner.param(d);
    let c_of_t = interner.reference(c, [t_ref]);
    interner.extend_members(a, [MemberInfo::property("t", c_of_t)]);
    interner.extend_members(
        c,
        [
            MemberInfo::property("d", TypeId::NUMBER),
            MemberInfo::property("k", d_ref),
        ],
    );
    interner.reference(a, [TypeId::STRING])
}

#[test]
fn test_nested_generic_argument_reaches_inner_member() {
    let mut interner = TypeInterner::new();
    let root = nested_generic(&mut interner);

    let description = describe_type(&interner, root);
    let expected = TypeDescription::members([keyed(
        "t",
        TypeDescription::members([
            keyed("d", Primitive::Number.into()),
            keyed("k", Primitive::String.into()),
        ]),
    )]);
    assert_eq!(description, expected);
}

#[test]
fn test_deep_array_of_type_parameter() {
    // interface A<T> { f: T[][] } as A<boolean>
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let t_ref = interner.param(t);
    let inner = interner.array(t_ref);
    let outer = interner.array(inner);
    interner.extend_members(a, [MemberInfo::property("f", outer)]);
    let root = interner.reference(a, [TypeId::BOOLEAN]);

    let description = describe_type(&interner, root);
    let field = description.member("f").unwrap();
    assert_eq!(field.flag, Some(DescriptionFlag::Array));
    assert_eq!(
        field.description,
        TypeDescription::array(Primitive::Boolean.into())
    );
}

#[test]
fn test_array_argument_to_array_parameter_nests_every_level() {
    // interface W<F> { v: F[][] } as W<object[][]>
    let mut interner = TypeInterner::new();
    let w = interner.define("W", DefKind::Interface);
    let f = interner.add_type_param(w, "F");
    let f_ref = interner.param(f);
    let f_arr = interner.array(f_ref);
    let f_arr_arr = interner.array(f_arr);
    interner.extend_members(w, [MemberInfo::property("v", f_arr_arr)]);
    let object_arr = interner.array(TypeId::OBJECT);
    let object_arr_arr = interner.array(object_arr);
    let root = interner.reference(w, [object_arr_arr]);

    let description = describe_type(&interner, root);
    let mut node = &description.member("v").unwrap().description;
    let mut levels = 1;
    while let Some(descriptor) = node.as_property() {
        assert_eq!(descriptor.flag, Some(DescriptionFlag::Array));
        levels += 1;
        node = &descriptor.description;
    }
    assert_eq!(levels, 4);
    assert_eq!(node.as_primitive(), Some(Primitive::Object));
}

#[test]
fn test_array_root_describes_element_shape() {
    let mut interner = TypeInterner::new();
    let root = nested_generic(&mut interner);
    let list = interner.array(root);

    let description = describe_type(&interner, list);
    let element = &description.as_property().unwrap().description;
    assert_eq!(element, &describe_type(&interner, root));
}

#[test]
fn test_tuple_member_positions() {
    let mut interner = TypeInterner::new();
    let pair = interner.tuple([TypeId::STRING, TypeId::NUMBER]);
    let holder = interner.object(vec![MemberInfo::property("pair", pair)]);

    let description = describe_type(&interner, holder);
    let pair = description.member("pair").unwrap();
    assert_eq!(pair.flag, Some(DescriptionFlag::Tuple));
    let slots = pair.description.as_members().unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(
        slots[0],
        DescriptionEntry::Property(PropertyDescriptor::new(Primitive::String.into()))
    );
}

#[test]
fn test_literal_union_and_method_members() {
    let mut interner = TypeInterner::new();
    let color = interner.literal_union(vec![
        LiteralValue::string("red"),
        LiteralValue::string("blue"),
    ]);
    let members = vec![
        MemberInfo::property("color", color),
        MemberInfo::method("label", Some(TypeId::STRING)),
        MemberInfo::method("run", None),
    ];
    let root = interner.object(members);

    let description = describe_type(&interner, root);
    let color = description.member("color").unwrap();
    assert_eq!(color.flag, Some(DescriptionFlag::Enum));
    assert_eq!(color.possible_values.as_ref().map(Vec::len), Some(2));

    let label = description.member("label").unwrap();
    assert_eq!(label.flag, Some(DescriptionFlag::Method));
    assert_eq!(label.description, Primitive::String.into());

    let run = description.member("run").unwrap();
    assert_eq!(run.description, TypeDescription::UNKNOWN);
}

#[test]
fn test_unresolved_parameter_degrades_to_unknown() {
    // A<T> used without arguments: `T` has nothing to resolve to.
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let t_ref = interner.param(t);
    interner.extend_members(
        a,
        [
            MemberInfo::property("value", t_ref),
            MemberInfo::property("count", TypeId::NUMBER),
        ],
    );
    let root = interner.reference(a, []);

    let description = describe_type(&interner, root);
    assert_eq!(
        description.member("value").unwrap().description,
        TypeDescription::UNKNOWN
    );
    assert_eq!(
        description.member("count").unwrap().description,
        Primitive::Number.into()
    );
}

#[test]
fn test_plain_root_is_unknown() {
    let mut interner = TypeInterner::new();
    let unresolved = interner.unresolved();
    assert_eq!(describe_type(&interner, unresolved), TypeDescription::UNKNOWN);
}

#[test]
fn test_empty_object_describes_as_empty_members() {
    let mut interner = TypeInterner::new();
    let empty = interner.object(Vec::new());
    assert_eq!(describe_type(&interner, empty), TypeDescription::members([]));
}

#[test]
fn test_empty_literal_union_is_unknown() {
    // enum E {}  interface S { e: E }
    let mut interner = TypeInterner::new();
    let empty = interner.literal_union(Vec::new());
    let s = interner.define("S", DefKind::Interface);
    interner.extend_members(s, [MemberInfo::property("e", empty)]);
    let root = interner.reference(s, []);

    let description = describe_type(&interner, root);
    assert_eq!(
        description,
        TypeDescription::members([keyed("e", TypeDescription::UNKNOWN)])
    );
    assert_eq!(describe_type(&interner, empty), TypeDescription::UNKNOWN);
}

#[test]
fn test_depth_guard_bounds_cyclic_shape() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    // interface Node { next: Node }
    let mut interner = TypeInterner::new();
    let node = interner.define("Node", DefKind::Interface);
    let node_ref = interner.reference(node, []);
    interner.extend_members(node, [MemberInfo::property("next", node_ref)]);

    let mut describer = Describer::with_options(&interner, DescribeOptions::bounded(12));
    let description = describer.describe_root(node_ref);
    assert!(describer.depth_exceeded());
    assert!(description.member("next").is_some());

    let mut innermost = &description;
    while let Some(next) = innermost.member("next") {
        innermost = &next.description;
    }
    assert_eq!(innermost, &TypeDescription::UNKNOWN);
}

#[test]
fn test_default_bound_cuts_cycle_at_default_depth() {
    let mut interner = TypeInterner::new();
    let node = interner.define("Node", DefKind::Interface);
    let node_ref = interner.reference(node, []);
    interner.extend_members(node, [MemberInfo::property("next", node_ref)]);

    let options = DescribeOptions::bounded_default();
    assert_eq!(options.max_depth, Some(DEFAULT_DESCRIBE_DEPTH));
    let mut describer = Describer::with_options(&interner, options);
    let description = describer.describe_root(node_ref);
    assert!(describer.depth_exceeded());
    assert!(description.member("next").is_some());
}

#[test]
fn test_unbounded_describer_reports_no_overflow() {
    let mut interner = TypeInterner::new();
    let root = nested_generic(&mut interner);
    let mut describer = Describer::new(&interner);
    describer.describe_root(root);
    assert!(!describer.depth_exceeded());
}

#[test]
fn test_description_is_idempotent() {
    let mut interner = TypeInterner::new();
    let root = nested_generic(&mut interner);
    let first = describe_type(&interner, root);
    let second = describe_type(&interner, root);
    assert_eq!(first, second);
    assert_eq!(first.to_literal(), second.to_literal());
}
