use super::*;
use crate::ParamType;
use hdl_ir::{ConcreteRange, DisplayWith, SharedInterner};
use pretty_assertions::assert_eq;

struct Fixture {
    interner: SharedInterner,
    ns: Namespace,
    scope: Scope,
}

/// `N = 4`, signals `x[4]` and `y`, loop variable `i = 2`.
fn fixture() -> Fixture {
    let interner = SharedInterner::new();
    let mut ns = Namespace::new(interner.clone());
    ns.define_const(interner.intern("N"), ConstValue::Int(4));
    ns.declare_signal(
        interner.intern("x"),
        Some(RangeSet::concrete(vec![ConcreteRange::new(0, 3)], false)),
    )
    .unwrap();
    ns.declare_signal(interner.intern("y"), None).unwrap();

    let mut scope = Scope::new();
    let i = interner.intern("i");
    scope.bind(i, ParamType::PInt);
    let slot = scope.alloc_int();
    scope.attach(i, slot);
    scope.set_int(slot, 2);

    Fixture {
        interner,
        ns,
        scope,
    }
}

impl Fixture {
    fn var(&self, name: &str) -> Expr {
        Expr::var(Id::new(self.interner.intern(name)))
    }

    fn elem(&self, name: &str, index: Expr) -> Id {
        Id::subscripted(self.interner.intern(name), RangeSet::index(index))
    }

    fn eval(&self, e: &Expr) -> Result<Evaluated, EvalError> {
        ConstEvaluator.evaluate(e, &self.ns, &self.scope)
    }
}

#[test]
fn test_folds_parameters_and_loop_variables() {
    let f = fixture();
    let e = Expr::binary(
        BinaryOp::Mul,
        Expr::binary(BinaryOp::Add, f.var("N"), f.var("i")),
        Expr::Int(3),
    );
    assert_eq!(f.eval(&e), Ok(Evaluated::Const(ConstValue::Int(18))));
}

#[test]
fn test_real_promotion_and_comparison() {
    let f = fixture();
    let e = Expr::binary(BinaryOp::Div, f.var("N"), Expr::Real(8.0));
    assert_eq!(f.eval(&e), Ok(Evaluated::Const(ConstValue::Real(0.5))));
    let c = Expr::binary(BinaryOp::Lt, f.var("i"), f.var("N"));
    assert_eq!(f.eval(&c), Ok(Evaluated::Const(ConstValue::Bool(true))));
}

#[test]
fn test_arithmetic_errors() {
    let f = fixture();
    let div = Expr::binary(BinaryOp::Div, Expr::Int(1), Expr::Int(0));
    assert_eq!(f.eval(&div), Err(EvalError::DivisionByZero));
    let ovf = Expr::binary(BinaryOp::Add, Expr::Int(i64::MAX), Expr::Int(1));
    assert_eq!(f.eval(&ovf), Err(EvalError::Overflow { op: "addition" }));
    let neg = Expr::unary(UnaryOp::Neg, Expr::Int(i64::MIN));
    assert_eq!(f.eval(&neg), Err(EvalError::Overflow { op: "negation" }));
    let mixed = Expr::binary(BinaryOp::Add, Expr::True, Expr::Int(1));
    assert_eq!(
        f.eval(&mixed),
        Err(EvalError::TypeMismatch {
            op: "+",
            left: "pbool",
            right: "pint"
        })
    );
}

#[test]
fn test_boolean_logic() {
    let f = fixture();
    let e = Expr::unary(
        UnaryOp::Not,
        Expr::binary(BinaryOp::And, Expr::True, Expr::False),
    );
    assert_eq!(f.eval(&e), Ok(Evaluated::Const(ConstValue::Bool(true))));
}

#[test]
fn test_signal_is_a_leaf_residual() {
    let f = fixture();
    let result = f.eval(&f.var("y")).unwrap();
    assert_eq!(result.as_leaf_var(), Some(&Id::new(f.interner.intern("y"))));
}

#[test]
fn test_residual_keeps_folded_operands() {
    let f = fixture();
    let e = Expr::binary(
        BinaryOp::And,
        f.var("y"),
        Expr::binary(BinaryOp::Add, Expr::Int(1), Expr::Int(1)),
    );
    let Evaluated::Residual(r) = f.eval(&e).unwrap() else {
        panic!("expected a residual");
    };
    assert_eq!(r.display(&f.interner).to_string(), "y & 2");
}

#[test]
fn test_subscript_is_expanded_against_scope() {
    let f = fixture();
    let id = f.elem("x", Expr::binary(BinaryOp::Add, f.var("i"), Expr::Int(1)));
    let resolved = ConstEvaluator.resolve_id(&id, &f.ns, &f.scope).unwrap();
    let leaf = resolved.as_leaf_var().unwrap();
    assert_eq!(
        leaf.subscript.as_ref().and_then(RangeSet::concrete_ranges),
        Some(&[ConcreteRange::single(3)][..])
    );
    assert_eq!(leaf.display(&f.interner).to_string(), "x[3]");
}

#[test]
fn test_subscript_out_of_bounds() {
    let f = fixture();
    let id = f.elem("x", f.var("N"));
    assert_eq!(
        ConstEvaluator.resolve_id(&id, &f.ns, &f.scope),
        Err(EvalError::OutOfBounds {
            id: "x[4]".to_owned(),
            name: "x".to_owned(),
            ty: "[4]".to_owned(),
        })
    );
}

#[test]
fn test_subscript_must_be_constant() {
    let f = fixture();
    let id = f.elem("x", f.var("y"));
    assert_eq!(
        ConstEvaluator.resolve_id(&id, &f.ns, &f.scope),
        Err(EvalError::NonConstantSubscript {
            id: "x[y]".to_owned(),
            found: "y".to_owned(),
        })
    );
}

#[test]
fn test_subscript_on_scalar() {
    let f = fixture();
    let id = f.elem("y", Expr::Int(0));
    assert_eq!(
        ConstEvaluator.resolve_id(&id, &f.ns, &f.scope),
        Err(EvalError::NotAnArray {
            name: "y".to_owned()
        })
    );
}

#[test]
fn test_undefined_and_unset_names() {
    let mut f = fixture();
    assert_eq!(
        f.eval(&f.var("z")),
        Err(EvalError::Undefined {
            name: "z".to_owned()
        })
    );
    let k = f.interner.intern("k");
    f.scope.bind(k, ParamType::PInt);
    assert_eq!(
        f.eval(&f.var("k")),
        Err(EvalError::Unset {
            name: "k".to_owned()
        })
    );
}

#[test]
fn test_scope_shadows_namespace() {
    let mut f = fixture();
    f.scope.define(f.interner.intern("N"), ConstValue::Int(9));
    assert_eq!(f.eval(&f.var("N")), Ok(Evaluated::Const(ConstValue::Int(9))));
}

#[test]
fn test_declare_requires_expanded_type() {
    let mut f = fixture();
    let err = f
        .ns
        .declare_signal(f.interner.intern("w"), Some(RangeSet::index(Expr::Int(2))))
        .unwrap_err();
    assert!(err.is_internal());
}
