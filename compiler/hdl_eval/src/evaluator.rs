//! Reduction of expressions to constants and of identifiers to leaf
//! variables.

use hdl_ir::{BinaryOp, ConstValue, Expr, Id, RangeSet, UnaryOp};

use crate::{EvalError, Namespace, Scope};

/// Outcome of evaluating an expression.
#[derive(Clone, PartialEq, Debug)]
pub enum Evaluated {
    Const(ConstValue),
    /// What is left after folding every constant sub-expression. A leaf
    /// variable reference is `Residual(Expr::Var(id))`.
    Residual(Expr),
}

impl Evaluated {
    #[inline]
    pub fn as_const(&self) -> Option<ConstValue> {
        match self {
            Evaluated::Const(v) => Some(*v),
            Evaluated::Residual(_) => None,
        }
    }

    #[inline]
    pub fn as_int(&self) -> Option<i64> {
        self.as_const().and_then(ConstValue::as_int)
    }

    /// The identifier, if this is a leaf variable reference.
    pub fn as_leaf_var(&self) -> Option<&Id> {
        match self {
            Evaluated::Residual(Expr::Var(id)) => Some(id),
            _ => None,
        }
    }

    pub fn into_expr(self) -> Expr {
        match self {
            Evaluated::Const(v) => Expr::from(v),
            Evaluated::Residual(e) => e,
        }
    }
}

/// Expression evaluation and identifier resolution.
pub trait Evaluator {
    fn evaluate(&self, expr: &Expr, ns: &Namespace, scope: &Scope) -> Result<Evaluated, EvalError>;

    /// Resolve an identifier. Signals resolve to `Residual(Expr::Var(id))`
    /// with every subscript expanded; parameters resolve to their value.
    fn resolve_id(&self, id: &Id, ns: &Namespace, scope: &Scope) -> Result<Evaluated, EvalError>;
}

/// Folds integer, real and boolean arithmetic over parameters, constants
/// and loop variables.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConstEvaluator;

impl Evaluator for ConstEvaluator {
    fn evaluate(&self, expr: &Expr, ns: &Namespace, scope: &Scope) -> Result<Evaluated, EvalError> {
        match expr {
            Expr::Int(v) => Ok(Evaluated::Const(ConstValue::Int(*v))),
            Expr::Real(v) => Ok(Evaluated::Const(ConstValue::Real(*v))),
            Expr::True => Ok(Evaluated::Const(ConstValue::Bool(true))),
            Expr::False => Ok(Evaluated::Const(ConstValue::Bool(false))),
            Expr::Var(id) => self.resolve_id(id, ns, scope),
            Expr::Unary { op, operand } => match self.evaluate(operand, ns, scope)? {
                Evaluated::Const(v) => eval_unary(*op, v).map(Evaluated::Const),
                Evaluated::Residual(e) => Ok(Evaluated::Residual(Expr::unary(*op, e))),
            },
            Expr::Binary { op, left, right } => {
                let l = self.evaluate(left, ns, scope)?;
                let r = self.evaluate(right, ns, scope)?;
                match (l, r) {
                    (Evaluated::Const(a), Evaluated::Const(b)) => {
                        eval_binary(*op, a, b).map(Evaluated::Const)
                    }
                    (l, r) => Ok(Evaluated::Residual(Expr::binary(
                        *op,
                        l.into_expr(),
                        r.into_expr(),
                    ))),
                }
            }
        }
    }

    fn resolve_id(&self, id: &Id, ns: &Namespace, scope: &Scope) -> Result<Evaluated, EvalError> {
        let plain = id.subscript.is_none() && id.next.is_none();
        if scope.is_bound(id.name) {
            if !plain {
                return Err(EvalError::NotAnArray {
                    name: ns.interner().lookup(id.name).to_owned(),
                });
            }
            return scope
                .value(id.name)
                .map(Evaluated::Const)
                .ok_or_else(|| EvalError::Unset {
                    name: ns.interner().lookup(id.name).to_owned(),
                });
        }
        if let Some(v) = ns.constant(id.name) {
            if !plain {
                return Err(EvalError::NotAnArray {
                    name: ns.interner().lookup(id.name).to_owned(),
                });
            }
            return Ok(Evaluated::Const(v));
        }
        let Some(signal) = ns.signal(id.name) else {
            return Err(EvalError::Undefined {
                name: ns.interner().lookup(id.name).to_owned(),
            });
        };

        let resolved = self.expand_segments(id, ns, scope)?;
        if let Some(sub) = &resolved.subscript {
            let Some(ty) = &signal.ty else {
                return Err(EvalError::NotAnArray {
                    name: ns.interner().lookup(id.name).to_owned(),
                });
            };
            if sub.n_dims() != ty.n_dims() {
                return Err(EvalError::SubscriptDims {
                    id: ns.render(id),
                    name: ns.interner().lookup(id.name).to_owned(),
                    expected: ty.n_dims(),
                    found: sub.n_dims(),
                });
            }
            if ty.offset(sub)?.is_none() {
                return Err(EvalError::OutOfBounds {
                    id: ns.render(&resolved),
                    name: ns.interner().lookup(id.name).to_owned(),
                    ty: ns.render(ty),
                });
            }
        }
        tracing::trace!(id = %ns.render(&resolved), "resolved signal");
        Ok(Evaluated::Residual(Expr::var(resolved)))
    }
}

impl ConstEvaluator {
    /// Rebuild `id` with every segment's subscript expanded in reference
    /// context.
    fn expand_segments(&self, id: &Id, ns: &Namespace, scope: &Scope) -> Result<Id, EvalError> {
        let subscript = match &id.subscript {
            Some(sub) => Some(self.expand_subscript(id, sub, ns, scope)?),
            None => None,
        };
        let next = match &id.next {
            Some(next) => Some(Box::new(self.expand_segments(next, ns, scope)?)),
            None => None,
        };
        Ok(Id {
            name: id.name,
            subscript,
            next,
        })
    }

    fn expand_subscript(
        &self,
        id: &Id,
        sub: &RangeSet,
        ns: &Namespace,
        scope: &Scope,
    ) -> Result<RangeSet, EvalError> {
        sub.expand_with(true, &mut |e: &Expr| -> Result<i64, EvalError> {
            match self.evaluate(e, ns, scope)? {
                Evaluated::Const(ConstValue::Int(v)) => Ok(v),
                other => Err(EvalError::NonConstantSubscript {
                    id: ns.render(id),
                    found: ns.render(&other.into_expr()),
                }),
            }
        })
    }
}

fn eval_unary(op: UnaryOp, v: ConstValue) -> Result<ConstValue, EvalError> {
    match (op, v) {
        (UnaryOp::Neg, ConstValue::Int(a)) => a
            .checked_neg()
            .map(ConstValue::Int)
            .ok_or(EvalError::Overflow { op: "negation" }),
        (UnaryOp::Neg, ConstValue::Real(a)) => Ok(ConstValue::Real(-a)),
        (UnaryOp::Not, ConstValue::Bool(b)) => Ok(ConstValue::Bool(!b)),
        (UnaryOp::Not, ConstValue::Int(a)) => Ok(ConstValue::Int(!a)),
        (op, v) => Err(EvalError::InvalidOperand {
            op: op.as_symbol(),
            ty: v.type_name(),
        }),
    }
}

/// Checked arithmetic result, overflow reported under `op_name`.
#[inline]
fn checked_arith(result: Option<i64>, op_name: &'static str) -> Result<ConstValue, EvalError> {
    result
        .map(ConstValue::Int)
        .ok_or(EvalError::Overflow { op: op_name })
}

fn eval_binary(op: BinaryOp, a: ConstValue, b: ConstValue) -> Result<ConstValue, EvalError> {
    match (a, b) {
        (ConstValue::Int(x), ConstValue::Int(y)) => eval_int_binary(op, x, y),
        (ConstValue::Bool(x), ConstValue::Bool(y)) => eval_bool_binary(op, x, y),
        (ConstValue::Real(_), ConstValue::Int(_) | ConstValue::Real(_))
        | (ConstValue::Int(_), ConstValue::Real(_)) => match (a.as_real(), b.as_real()) {
            (Some(x), Some(y)) => eval_real_binary(op, x, y),
            _ => Err(mismatch(op, a, b)),
        },
        _ => Err(mismatch(op, a, b)),
    }
}

fn mismatch(op: BinaryOp, a: ConstValue, b: ConstValue) -> EvalError {
    EvalError::TypeMismatch {
        op: op.as_symbol(),
        left: a.type_name(),
        right: b.type_name(),
    }
}

fn eval_int_binary(op: BinaryOp, a: i64, b: i64) -> Result<ConstValue, EvalError> {
    let shift = || u32::try_from(b).map_err(|_| EvalError::Overflow { op: "shift" });
    match op {
        BinaryOp::Add => checked_arith(a.checked_add(b), "addition"),
        BinaryOp::Sub => checked_arith(a.checked_sub(b), "subtraction"),
        BinaryOp::Mul => checked_arith(a.checked_mul(b), "multiplication"),
        BinaryOp::Div if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => checked_arith(a.checked_div(b), "division"),
        BinaryOp::Mod if b == 0 => Err(EvalError::DivisionByZero),
        BinaryOp::Mod => checked_arith(a.checked_rem(b), "remainder"),
        BinaryOp::Shl => checked_arith(a.checked_shl(shift()?), "shift"),
        BinaryOp::Shr => checked_arith(a.checked_shr(shift()?), "shift"),
        BinaryOp::And => Ok(ConstValue::Int(a & b)),
        BinaryOp::Or => Ok(ConstValue::Int(a | b)),
        BinaryOp::Xor => Ok(ConstValue::Int(a ^ b)),
        BinaryOp::Eq => Ok(ConstValue::Bool(a == b)),
        BinaryOp::NotEq => Ok(ConstValue::Bool(a != b)),
        BinaryOp::Lt => Ok(ConstValue::Bool(a < b)),
        BinaryOp::LtEq => Ok(ConstValue::Bool(a <= b)),
        BinaryOp::Gt => Ok(ConstValue::Bool(a > b)),
        BinaryOp::GtEq => Ok(ConstValue::Bool(a >= b)),
    }
}

#[expect(clippy::float_cmp, reason = "parameter comparison is exact")]
fn eval_real_binary(op: BinaryOp, a: f64, b: f64) -> Result<ConstValue, EvalError> {
    match op {
        BinaryOp::Add => Ok(ConstValue::Real(a + b)),
        BinaryOp::Sub => Ok(ConstValue::Real(a - b)),
        BinaryOp::Mul => Ok(ConstValue::Real(a * b)),
        BinaryOp::Div if b == 0.0 => Err(EvalError::DivisionByZero),
        BinaryOp::Div => Ok(ConstValue::Real(a / b)),
        BinaryOp::Eq => Ok(ConstValue::Bool(a == b)),
        BinaryOp::NotEq => Ok(ConstValue::Bool(a != b)),
        BinaryOp::Lt => Ok(ConstValue::Bool(a < b)),
        BinaryOp::LtEq => Ok(ConstValue::Bool(a <= b)),
        BinaryOp::Gt => Ok(ConstValue::Bool(a > b)),
        BinaryOp::GtEq => Ok(ConstValue::Bool(a >= b)),
        BinaryOp::Mod
        | BinaryOp::Shl
        | BinaryOp::Shr
        | BinaryOp::And
        | BinaryOp::Or
        | BinaryOp::Xor => Err(EvalError::InvalidOperand {
            op: op.as_symbol(),
            ty: "preal",
        }),
    }
}

fn eval_bool_binary(op: BinaryOp, a: bool, b: bool) -> Result<ConstValue, EvalError> {
    match op {
        BinaryOp::And => Ok(ConstValue::Bool(a && b)),
        BinaryOp::Or => Ok(ConstValue::Bool(a || b)),
        BinaryOp::Xor | BinaryOp::NotEq => Ok(ConstValue::Bool(a != b)),
        BinaryOp::Eq => Ok(ConstValue::Bool(a == b)),
        _ => Err(EvalError::InvalidOperand {
            op: op.as_symbol(),
            ty: "pbool",
        }),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
