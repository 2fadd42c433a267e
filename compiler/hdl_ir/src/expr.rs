//! Symbolic expressions.
//!
//! Array bounds, loop bounds, attribute values and transistor sizes are all
//! written as expressions over parameters. Elaboration insists that each of
//! them reduces to a [`ConstValue`].

use std::fmt;

use crate::display::DisplayWith;
use crate::{Id, StringInterner};

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum UnaryOp {
    /// Arithmetic negation (`-x`).
    Neg,
    /// Logical or bitwise complement (`~x`).
    Not,
}

impl UnaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "~",
        }
    }
}

/// Binary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Shl,
    Shr,
    And,
    Or,
    Xor,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

impl BinaryOp {
    pub fn as_symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Eq => "=",
            BinaryOp::NotEq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::LtEq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::GtEq => ">=",
        }
    }
}

/// A compile-time constant.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ConstValue {
    Int(i64),
    Real(f64),
    Bool(bool),
}

impl ConstValue {
    #[inline]
    pub fn as_int(self) -> Option<i64> {
        match self {
            ConstValue::Int(v) => Some(v),
            _ => None,
        }
    }

    /// Numeric value, promoting integers to reals.
    #[expect(clippy::cast_precision_loss, reason = "int to real promotion")]
    pub fn as_real(self) -> Option<f64> {
        match self {
            ConstValue::Int(v) => Some(v as f64),
            ConstValue::Real(v) => Some(v),
            ConstValue::Bool(_) => None,
        }
    }

    #[inline]
    pub fn as_bool(self) -> Option<bool> {
        match self {
            ConstValue::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// Parameter type name of this value.
    pub fn type_name(self) -> &'static str {
        match self {
            ConstValue::Int(_) => "pint",
            ConstValue::Real(_) => "preal",
            ConstValue::Bool(_) => "pbool",
        }
    }
}

impl From<ConstValue> for Expr {
    fn from(value: ConstValue) -> Self {
        match value {
            ConstValue::Int(v) => Expr::Int(v),
            ConstValue::Real(v) => Expr::Real(v),
            ConstValue::Bool(true) => Expr::True,
            ConstValue::Bool(false) => Expr::False,
        }
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstValue::Int(v) => write!(f, "{v}"),
            ConstValue::Real(v) => write!(f, "{v:?}"),
            ConstValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

/// Expression tree.
#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Int(i64),
    Real(f64),
    True,
    False,
    /// Identifier reference, possibly subscripted.
    Var(Box<Id>),
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn var(id: Id) -> Self {
        Expr::Var(Box::new(id))
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// The constant this node denotes, if it is a literal.
    pub fn as_const(&self) -> Option<ConstValue> {
        match self {
            Expr::Int(v) => Some(ConstValue::Int(*v)),
            Expr::Real(v) => Some(ConstValue::Real(*v)),
            Expr::True => Some(ConstValue::Bool(true)),
            Expr::False => Some(ConstValue::Bool(false)),
            _ => None,
        }
    }

    /// Structural equality. Reals compare by bit pattern so that a NaN
    /// bound is equal to itself.
    pub fn structurally_eq(&self, other: &Expr) -> bool {
        match (self, other) {
            (Expr::Int(a), Expr::Int(b)) => a == b,
            (Expr::Real(a), Expr::Real(b)) => a.to_bits() == b.to_bits(),
            (Expr::True, Expr::True) | (Expr::False, Expr::False) => true,
            (Expr::Var(a), Expr::Var(b)) => a == b,
            (Expr::Unary { op: o1, operand: a }, Expr::Unary { op: o2, operand: b }) => {
                o1 == o2 && a.structurally_eq(b)
            }
            (
                Expr::Binary {
                    op: o1,
                    left: l1,
                    right: r1,
                },
                Expr::Binary {
                    op: o2,
                    left: l2,
                    right: r2,
                },
            ) => o1 == o2 && l1.structurally_eq(l2) && r1.structurally_eq(r2),
            _ => false,
        }
    }
}

impl DisplayWith for Expr {
    fn fmt_with(&self, interner: &StringInterner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Int(v) => write!(f, "{v}"),
            Expr::Real(v) => write!(f, "{v:?}"),
            Expr::True => f.write_str("true"),
            Expr::False => f.write_str("false"),
            Expr::Var(id) => id.fmt_with(interner, f),
            Expr::Unary { op, operand } => {
                f.write_str(op.as_symbol())?;
                fmt_operand(operand, interner, f)
            }
            Expr::Binary { op, left, right } => {
                fmt_operand(left, interner, f)?;
                write!(f, " {} ", op.as_symbol())?;
                fmt_operand(right, interner, f)
            }
        }
    }
}

fn fmt_operand(expr: &Expr, interner: &StringInterner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if let Expr::Binary { .. } = expr {
        f.write_str("(")?;
        expr.fmt_with(interner, f)?;
        f.write_str(")")
    } else {
        expr.fmt_with(interner, f)
    }
}

#[cfg(test)]
mod tests;
