use super::*;
use hdl_ir::{Id, Name, PrechargeKind};
use pretty_assertions::assert_eq;

fn x() -> PrsExpr {
    PrsExpr::var(Id::new(Name::from_raw(1)))
}

fn y() -> PrsExpr {
    PrsExpr::var(Id::new(Name::from_raw(2)))
}

fn pre() -> Option<Precharge> {
    Some(Precharge {
        kind: PrechargeKind::Up,
        expr: Box::new(y()),
    })
}

#[test]
fn test_and_fold_table() {
    let and = Connective::And;
    assert_eq!(and.fold(PrsExpr::True, x(), pre()), x());
    assert_eq!(and.fold(PrsExpr::False, x(), pre()), PrsExpr::False);
    assert_eq!(and.fold(x(), PrsExpr::True, pre()), x());
    assert_eq!(and.fold(x(), PrsExpr::False, pre()), PrsExpr::False);
}

#[test]
fn test_or_fold_table() {
    let or = Connective::Or;
    assert_eq!(or.fold(PrsExpr::True, x(), pre()), PrsExpr::True);
    assert_eq!(or.fold(PrsExpr::False, x(), pre()), x());
    assert_eq!(or.fold(x(), PrsExpr::True, pre()), PrsExpr::True);
    assert_eq!(or.fold(x(), PrsExpr::False, pre()), x());
}

#[test]
fn test_left_rule_wins() {
    assert_eq!(
        Connective::And.fold(PrsExpr::True, PrsExpr::False, None),
        PrsExpr::False
    );
    assert_eq!(
        Connective::And.fold(PrsExpr::False, PrsExpr::True, None),
        PrsExpr::False
    );
    assert_eq!(
        Connective::Or.fold(PrsExpr::False, PrsExpr::True, None),
        PrsExpr::True
    );
}

#[test]
fn test_kept_node_keeps_precharge() {
    let folded = Connective::Or.fold(x(), y(), pre());
    assert_eq!(
        folded,
        PrsExpr::Or {
            left: Box::new(x()),
            right: Box::new(y()),
            precharge: pre(),
        }
    );
}

#[test]
fn test_identity_and_absorbing() {
    assert!(Connective::And.identity());
    assert!(!Connective::And.absorbing());
    assert!(!Connective::Or.identity());
    assert!(Connective::Or.absorbing());
}
