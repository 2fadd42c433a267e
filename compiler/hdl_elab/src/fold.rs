//! Constant folding of `&` and `|`.
//!
//! Both connectives fold the same way, mirrored: one operand that is the
//! identity element disappears, one that is the absorbing element wins.
//! Rules are tried in a fixed order: left identity/absorbing first, then
//! right. Precharges only survive on nodes that are kept.

use hdl_ir::{Precharge, PrsExpr};

/// `&` or `|`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Connective {
    And,
    Or,
}

impl Connective {
    /// Value that leaves the other operand unchanged; the result of an
    /// empty loop.
    pub fn identity(self) -> bool {
        self == Connective::And
    }

    /// Value that decides the result regardless of the other operand.
    pub fn absorbing(self) -> bool {
        !self.identity()
    }

    /// Combine two expanded operands.
    pub fn fold(self, left: PrsExpr, right: PrsExpr, precharge: Option<Precharge>) -> PrsExpr {
        let absorbing = self.absorbing();
        match (left.as_bool(), right.as_bool()) {
            (Some(l), _) if l == absorbing => PrsExpr::constant(absorbing),
            (Some(_), _) => right,
            (None, Some(r)) if r == absorbing => PrsExpr::constant(absorbing),
            (None, Some(_)) => left,
            (None, None) => self.node(left, right, precharge),
        }
    }

    fn node(self, left: PrsExpr, right: PrsExpr, precharge: Option<Precharge>) -> PrsExpr {
        let (left, right) = (Box::new(left), Box::new(right));
        match self {
            Connective::And => PrsExpr::And {
                left,
                right,
                precharge,
            },
            Connective::Or => PrsExpr::Or {
                left,
                right,
                precharge,
            },
        }
    }
}

#[cfg(test)]
mod tests;
