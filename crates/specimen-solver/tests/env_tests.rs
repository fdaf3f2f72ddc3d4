use super::*;
use crate::intern::TypeInterner;
use crate::types::DefKind;

fn plain(concrete: TypeId) -> Substitution {
    Substitution {
        concrete,
        is_array: false,
    }
}

fn array_of(concrete: TypeId) -> Substitution {
    Substitution {
        concrete,
        is_array: true,
    }
}

#[test]
fn test_from_type_args_zips_params_with_args() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let u = interner.add_type_param(a, "U");
    let number_array = interner.array(TypeId::NUMBER);
    let reference = interner.reference(a, [TypeId::STRING, number_array]);

    let env = TypeParamEnv::from_type_args(&interner, reference);
    assert_eq!(env.len(), 2);
    assert_eq!(env.get(t), Some(plain(TypeId::STRING)));
    assert_eq!(env.get(u), Some(array_of(TypeId::NUMBER)));
}

#[test]
fn test_from_type_args_looks_through_arrays_and_uses_defaults() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let u = interner.add_type_param(a, "U");
    let t_ref = interner.param(t);
    interner.set_type_param_default(u, t_ref);

    let reference = interner.reference(a, [TypeId::BOOLEAN]);
    let array = interner.array(reference);
    let env = TypeParamEnv::from_type_args(&interner, array);
    assert_eq!(env.get(t), Some(plain(TypeId::BOOLEAN)));
    // `U = T` resolves through the earlier argument.
    assert_eq!(env.get(u), Some(plain(TypeId::BOOLEAN)));
}

#[test]
fn test_from_type_args_skips_missing_arguments() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    interner.add_type_param(a, "T");
    let reference = interner.reference(a, []);
    assert!(TypeParamEnv::from_type_args(&interner, reference).is_empty());
    assert!(TypeParamEnv::from_type_args(&interner, TypeId::STRING).is_empty());
}

#[test]
fn test_merge_child_params_resolve_through_caller() {
    // interface A<T> { t: C<T> }; the member's C<T> maps D => T, and the
    // caller has T => string.
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let c = interner.define("C", DefKind::Interface);
    let d = interner.add_type_param(c, "D");
    let t_ref = interner.param(t);

    let child = TypeParamEnv::new().with(d, plain(t_ref));
    let caller = TypeParamEnv::new().with(t, plain(TypeId::STRING));
    let merged = TypeParamEnv::merge(&interner, &child, &caller, &caller);
    assert_eq!(merged.get(d), Some(plain(TypeId::STRING)));
    assert!(!merged.contains(t));
}

#[test]
fn test_merge_accumulates_arrayness() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let c = interner.define("C", DefKind::Interface);
    let d = interner.add_type_param(c, "D");
    let t_ref = interner.param(t);

    // C<T[]> inside A<number[]>
    let child = TypeParamEnv::new().with(d, array_of(t_ref));
    let caller = TypeParamEnv::new().with(t, array_of(TypeId::NUMBER));
    let merged = TypeParamEnv::merge(&interner, &child, &TypeParamEnv::new(), &caller);
    assert_eq!(merged.get(d), Some(array_of(TypeId::NUMBER)));
}

#[test]
fn test_merge_falls_back_to_declared_without_collision() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let other = interner.define("Other", DefKind::Interface);
    let o = interner.add_type_param(other, "O");

    let declared = TypeParamEnv::new().with(t, plain(TypeId::STRING));
    let caller = TypeParamEnv::new().with(o, plain(TypeId::NUMBER));
    let merged = TypeParamEnv::merge(&interner, &TypeParamEnv::new(), &declared, &caller);
    assert_eq!(merged.get(t), Some(plain(TypeId::STRING)));
    assert!(!merged.contains(o));

    // When the caller already resolves a declared key, the caller wins.
    let caller = TypeParamEnv::new().with(t, plain(TypeId::BOOLEAN));
    let merged = TypeParamEnv::merge(&interner, &TypeParamEnv::new(), &declared, &caller);
    assert_eq!(merged.get(t), Some(plain(TypeId::BOOLEAN)));
}

#[test]
fn test_merge_registers_indirect_params_one_level_deep() {
    // B<C<X>> where X is a caller parameter: X is registered alongside B's own.
    let mut interner = TypeInterner::new();
    let outer = interner.define("Outer", DefKind::Interface);
    let x = interner.add_type_param(outer, "X");
    let b = interner.define("B", DefKind::Interface);
    let p = interner.add_type_param(b, "P");
    let c = interner.define("C", DefKind::Interface);
    interner.add_type_param(c, "Q");
    let x_ref = interner.param(x);
    let c_of_x = interner.reference(c, [x_ref]);

    let child = TypeParamEnv::new().with(p, plain(c_of_x));
    let caller = TypeParamEnv::new().with(x, plain(TypeId::STRING));
    let merged = TypeParamEnv::merge(&interner, &child, &TypeParamEnv::new(), &caller);
    assert_eq!(merged.get(p), Some(plain(c_of_x)));
    assert_eq!(merged.get(x), Some(plain(TypeId::STRING)));
}

#[test]
fn test_merge_does_not_mutate_inputs() {
    let mut interner = TypeInterner::new();
    let a = interner.define("A", DefKind::Interface);
    let t = interner.add_type_param(a, "T");
    let caller = TypeParamEnv::new().with(t, plain(TypeId::STRING));
    let before = caller.clone();
    let _ = TypeParamEnv::merge(&interner, &TypeParamEnv::new(), &TypeParamEnv::new(), &caller);
    assert_eq!(caller, before);
}
