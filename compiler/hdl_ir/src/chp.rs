//! Communicating-hardware-process bodies.
//!
//! Elaboration passes these through unchanged, so the tree only needs
//! enough structure to be carried alongside the production rules.

use crate::{Expr, Id};

#[derive(Clone, PartialEq, Debug)]
pub enum ChpStmt {
    Skip,
    /// `x := e`
    Assign { target: Id, value: Expr },
    /// `C!e`
    Send { chan: Id, value: Option<Expr> },
    /// `C?x`
    Recv { chan: Id, target: Option<Id> },
    /// `s1; s2; ...`
    Seq(Vec<ChpStmt>),
    /// `s1, s2, ...`
    Par(Vec<ChpStmt>),
}

#[derive(Clone, PartialEq, Debug, Default)]
pub struct Chp {
    pub stmts: Vec<ChpStmt>,
}

impl Chp {
    pub fn is_empty(&self) -> bool {
        self.stmts.is_empty()
    }
}
