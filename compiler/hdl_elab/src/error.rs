//! Elaboration errors.
//!
//! Two classes, kept apart all the way to the driver:
//! - user errors: the source asks for something that is not a constant
//! - internal errors: an earlier phase broke an invariant
//!
//! Neither is recovered inside the elaborator. Every expansion either
//! returns a complete subtree or the first error.

use hdl_diagnostic::{Diagnostic, ErrorCode};
use hdl_eval::EvalError;
use hdl_ir::{ArrayError, Span};

/// Who is at fault for an [`ElabError`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorKind {
    User,
    Internal,
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ElabError {
    #[error("array range value is non-integer/non-constant: `{expr}`")]
    ArrayBound { expr: String, span: Span },

    #[error("bound of loop over `{var}` is non-integer/non-constant: `{expr}`")]
    LoopBound {
        var: String,
        expr: String,
        span: Span,
    },

    #[error("attribute `{name}` is not a constant: `{expr}`")]
    AttrNotConst {
        name: String,
        expr: String,
        span: Span,
    },

    #[error("size `{expr}` is not a numeric constant")]
    SizeNotConst { expr: String, span: Span },

    #[error("`{id}` does not denote a scalar variable")]
    NotAVariable { id: String, span: Span },

    #[error("tree fan-in `{expr}` is not an integer constant")]
    TreeFanin { expr: String, span: Span },

    #[error("loop over `{var}` has {count} iterations, more than the unroll limit of {limit}")]
    UnrollLimit {
        var: String,
        count: i128,
        limit: u64,
        span: Span,
    },

    #[error("{source}")]
    Eval {
        #[source]
        source: EvalError,
        span: Span,
    },

    #[error("internal error: {source}")]
    Array {
        #[source]
        source: ArrayError,
        span: Span,
    },

    #[error("internal error: loop variable `{var}` is already bound")]
    ScopeConflict { var: String, span: Span },
}

impl ElabError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElabError::Array { .. } | ElabError::ScopeConflict { .. } => ErrorKind::Internal,
            ElabError::Eval { source, .. } if source.is_internal() => ErrorKind::Internal,
            _ => ErrorKind::User,
        }
    }

    pub fn is_internal(&self) -> bool {
        self.kind() == ErrorKind::Internal
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ElabError::ArrayBound { .. } => ErrorCode::E1001,
            ElabError::LoopBound { .. } => ErrorCode::E1002,
            ElabError::AttrNotConst { .. } => ErrorCode::E1003,
            ElabError::SizeNotConst { .. } => ErrorCode::E1004,
            ElabError::NotAVariable { .. } => ErrorCode::E1005,
            ElabError::TreeFanin { .. } => ErrorCode::E1006,
            ElabError::UnrollLimit { .. } => ErrorCode::E1007,
            ElabError::Eval { source, .. } => match source {
                EvalError::Array(_) => ErrorCode::E9001,
                e if e.is_internal() => ErrorCode::E9003,
                _ => ErrorCode::E1008,
            },
            ElabError::Array { .. } => ErrorCode::E9001,
            ElabError::ScopeConflict { .. } => ErrorCode::E9002,
        }
    }

    /// Source context of the error.
    pub fn span(&self) -> Span {
        match self {
            ElabError::ArrayBound { span, .. }
            | ElabError::LoopBound { span, .. }
            | ElabError::AttrNotConst { span, .. }
            | ElabError::SizeNotConst { span, .. }
            | ElabError::NotAVariable { span, .. }
            | ElabError::TreeFanin { span, .. }
            | ElabError::UnrollLimit { span, .. }
            | ElabError::Eval { span, .. }
            | ElabError::Array { span, .. }
            | ElabError::ScopeConflict { span, .. } => *span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        let diag = if self.span().is_dummy() {
            diag
        } else {
            diag.with_label(self.span(), "while elaborating this")
        };
        if self.is_internal() {
            diag.with_note("this is a compiler bug, not a problem with the source")
        } else {
            diag
        }
    }
}

/// Shorthand used by the elaborator.
pub type ElabResult<T> = Result<T, ElabError>;

#[cfg(test)]
mod tests;
