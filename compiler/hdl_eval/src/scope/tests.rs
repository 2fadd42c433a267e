use super::*;
use hdl_ir::SharedInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_bind_twice_fails() {
    let interner = SharedInterner::new();
    let i = interner.intern("i");
    let mut scope = Scope::new();
    assert!(scope.bind(i, ParamType::PInt));
    assert!(!scope.bind(i, ParamType::PInt));
    assert_eq!(scope.lookup(i), Some(ValueSlot::Unset(ParamType::PInt)));
    assert_eq!(scope.value(i), None);
}

#[test]
fn test_attached_slot_tracks_assignments() {
    let interner = SharedInterner::new();
    let i = interner.intern("i");
    let mut scope = Scope::new();
    scope.bind(i, ParamType::PInt);
    let slot = scope.alloc_int();
    assert!(scope.attach(i, slot));
    assert_eq!(scope.int_value(i), Some(0));
    assert!(scope.set_int(slot, 7));
    assert_eq!(scope.int_value(i), Some(7));
}

#[test]
fn test_attach_requires_int_binding() {
    let interner = SharedInterner::new();
    let b = interner.intern("b");
    let mut scope = Scope::new();
    let slot = scope.alloc_int();
    assert!(!scope.attach(b, slot));
    scope.bind(b, ParamType::PBool);
    assert!(!scope.attach(b, slot));
}

#[test]
fn test_free_slot_is_reused() {
    let mut scope = Scope::new();
    let a = scope.alloc_int();
    let b = scope.alloc_int();
    assert_eq!(scope.live_slots(), 2);
    scope.free_int(a);
    scope.free_int(a);
    assert!(!scope.set_int(a, 3));
    assert_eq!(scope.int_slot(a), None);
    let c = scope.alloc_int();
    assert_eq!(c, a);
    assert_ne!(c, b);
    assert_eq!(scope.live_slots(), 2);
}

#[test]
fn test_define_and_unbind() {
    let interner = SharedInterner::new();
    let n = interner.intern("N");
    let mut scope = Scope::new();
    scope.define(n, ConstValue::Int(4));
    assert_eq!(scope.int_value(n), Some(4));
    assert!(scope.is_bound(n));
    assert!(scope.unbind(n));
    assert!(!scope.unbind(n));
    assert!(!scope.is_bound(n));
}

#[test]
fn test_param_type_of() {
    assert_eq!(ParamType::of(ConstValue::Real(1.5)), ParamType::PReal);
    assert_eq!(ParamType::of(ConstValue::Bool(true)), ParamType::PBool);
}
