//! Evaluation failures.
//!
//! Messages are rendered when the error is built, while the interner is at
//! hand, so errors can outlive the namespace that produced them.

use hdl_ir::ArrayError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    #[error("`{name}` is not defined")]
    Undefined { name: String },
    #[error("`{name}` is declared but has no value yet")]
    Unset { name: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("integer overflow in {op}")]
    Overflow { op: &'static str },
    #[error("operator `{op}` cannot be applied to {ty}")]
    InvalidOperand { op: &'static str, ty: &'static str },
    #[error("mismatched operand types for `{op}`: {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },
    #[error("subscript of `{id}` is not an integer constant: `{found}`")]
    NonConstantSubscript { id: String, found: String },
    #[error("`{id}` is out of bounds for `{name}{ty}`")]
    OutOfBounds {
        id: String,
        name: String,
        ty: String,
    },
    #[error("`{id}` uses {found} subscript dimensions but `{name}` has {expected}")]
    SubscriptDims {
        id: String,
        name: String,
        expected: usize,
        found: usize,
    },
    #[error("`{name}` is not an array")]
    NotAnArray { name: String },
    #[error("type of `{name}` must be expanded before it is declared")]
    UnexpandedType { name: String },
    #[error(transparent)]
    Array(#[from] ArrayError),
}

impl EvalError {
    /// Errors caused by a bug in an earlier phase rather than by the source.
    pub fn is_internal(&self) -> bool {
        matches!(self, EvalError::Array(_) | EvalError::UnexpandedType { .. })
    }
}
