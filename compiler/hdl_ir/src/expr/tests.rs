use super::*;
use crate::SharedInterner;
use pretty_assertions::assert_eq;

#[test]
fn test_as_const() {
    assert_eq!(Expr::Int(3).as_const(), Some(ConstValue::Int(3)));
    assert_eq!(Expr::True.as_const(), Some(ConstValue::Bool(true)));
    assert_eq!(Expr::False.as_const(), Some(ConstValue::Bool(false)));
    assert!(Expr::binary(BinaryOp::Add, Expr::Int(1), Expr::Int(2))
        .as_const()
        .is_none());
}

#[test]
fn test_const_value_roundtrip_through_expr() {
    for value in [
        ConstValue::Int(-4),
        ConstValue::Real(2.5),
        ConstValue::Bool(true),
        ConstValue::Bool(false),
    ] {
        assert_eq!(Expr::from(value).as_const(), Some(value));
    }
}

#[test]
fn test_real_promotion() {
    assert_eq!(ConstValue::Int(2).as_real(), Some(2.0));
    assert_eq!(ConstValue::Bool(true).as_real(), None);
    assert_eq!(ConstValue::Real(1.5).type_name(), "preal");
}

#[test]
fn test_structural_equality() {
    let interner = SharedInterner::new();
    let n = Expr::var(Id::new(interner.intern("N")));
    let a = Expr::binary(BinaryOp::Sub, n.clone(), Expr::Int(1));
    let b = Expr::binary(BinaryOp::Sub, n.clone(), Expr::Int(1));
    let c = Expr::binary(BinaryOp::Add, n, Expr::Int(1));
    assert!(a.structurally_eq(&b));
    assert!(!a.structurally_eq(&c));
    assert!(Expr::Real(f64::NAN).structurally_eq(&Expr::Real(f64::NAN)));
}

#[test]
fn test_display_parenthesizes_nested_binary() {
    let interner = SharedInterner::new();
    let n = Expr::var(Id::new(interner.intern("N")));
    let e = Expr::binary(
        BinaryOp::Mul,
        Expr::binary(BinaryOp::Add, n, Expr::Int(1)),
        Expr::unary(UnaryOp::Neg, Expr::Int(2)),
    );
    assert_eq!(e.display(&interner).to_string(), "(N + 1) * -2");
}
