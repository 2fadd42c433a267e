use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_user_error_diagnostic() {
    let err = ElabError::AttrNotConst {
        name: "weak".to_owned(),
        expr: "x".to_owned(),
        span: Span::new(10, 14),
    };
    assert_eq!(err.kind(), ErrorKind::User);
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E1003);
    assert_eq!(diag.message, "attribute `weak` is not a constant: `x`");
    assert_eq!(diag.primary_span(), Some(Span::new(10, 14)));
    assert!(diag.notes.is_empty());
}

#[test]
fn test_internal_errors_are_flagged() {
    let err = ElabError::Array {
        source: ArrayError::NotExpanded { op: "size" },
        span: Span::DUMMY,
    };
    assert!(err.is_internal());
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E9001);
    assert_eq!(diag.primary_span(), None);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn test_eval_error_classification() {
    let user = ElabError::Eval {
        source: EvalError::DivisionByZero,
        span: Span::DUMMY,
    };
    assert_eq!(user.code(), ErrorCode::E1008);
    assert_eq!(user.to_string(), "division by zero");

    let internal = ElabError::Eval {
        source: EvalError::Array(ArrayError::NotDeref),
        span: Span::DUMMY,
    };
    assert_eq!(internal.kind(), ErrorKind::Internal);
    assert_eq!(internal.code(), ErrorCode::E9001);
}
