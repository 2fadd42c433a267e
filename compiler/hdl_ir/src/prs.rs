//! Production-rule trees.
//!
//! The same types describe both the symbolic input (loops, parameterised
//! bounds, symbolic sizes) and the elaborated output. After elaboration no
//! `AndLoop`, `OrLoop`, [`PrsItem::Loop`] remains, and every size,
//! attribute and subscript is a constant.

use crate::{Expr, Id, Name, Span};

/// Polarity of a precharge.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PrechargeKind {
    /// `{+ e}`
    Up,
    /// `{- e}`
    Down,
}

/// Precharge annotation attached to an `&` or `|`.
#[derive(Clone, PartialEq, Debug)]
pub struct Precharge {
    pub kind: PrechargeKind,
    pub expr: Box<PrsExpr>,
}

/// Transistor size annotation `<w, l, flavor:sub>`.
#[derive(Clone, PartialEq, Debug)]
pub struct SizeSpec {
    pub width: Option<Expr>,
    pub length: Option<Expr>,
    pub flavor: Option<Name>,
    pub subflavor: Option<i64>,
}

/// `(var : lo .. hi : body)` inside a boolean expression.
#[derive(Clone, PartialEq, Debug)]
pub struct LoopExpr {
    pub var: Name,
    pub lo: Option<Expr>,
    pub hi: Expr,
    pub body: Box<PrsExpr>,
}

/// Guard expressions.
#[derive(Clone, PartialEq, Debug)]
pub enum PrsExpr {
    And {
        left: Box<PrsExpr>,
        right: Box<PrsExpr>,
        precharge: Option<Precharge>,
    },
    Or {
        left: Box<PrsExpr>,
        right: Box<PrsExpr>,
        precharge: Option<Precharge>,
    },
    Not(Box<PrsExpr>),
    Var {
        id: Id,
        size: Option<SizeSpec>,
    },
    /// Reference to a labelled rule.
    Label(Name),
    True,
    False,
    AndLoop(LoopExpr),
    OrLoop(LoopExpr),
}

impl PrsExpr {
    pub fn and(left: PrsExpr, right: PrsExpr) -> Self {
        PrsExpr::And {
            left: Box::new(left),
            right: Box::new(right),
            precharge: None,
        }
    }

    pub fn or(left: PrsExpr, right: PrsExpr) -> Self {
        PrsExpr::Or {
            left: Box::new(left),
            right: Box::new(right),
            precharge: None,
        }
    }

    pub fn not(inner: PrsExpr) -> Self {
        PrsExpr::Not(Box::new(inner))
    }

    pub fn var(id: Id) -> Self {
        PrsExpr::Var { id, size: None }
    }

    /// `true`/`false` literal for `value`.
    pub fn constant(value: bool) -> Self {
        if value {
            PrsExpr::True
        } else {
            PrsExpr::False
        }
    }

    /// The boolean value of a `True`/`False` node.
    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PrsExpr::True => Some(true),
            PrsExpr::False => Some(false),
            _ => None,
        }
    }
}

/// `name = value` annotation on a rule or gate.
#[derive(Clone, PartialEq, Debug)]
pub struct Attr {
    pub name: Name,
    pub value: Expr,
}

/// Rule arrow.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Arrow {
    /// `->`
    Normal,
    /// `=>`, the rule and its complement.
    Combinational,
    /// `#>`, a C-element.
    CElement,
}

impl Arrow {
    pub fn as_symbol(self) -> &'static str {
        match self {
            Arrow::Normal => "->",
            Arrow::Combinational => "=>",
            Arrow::CElement => "#>",
        }
    }
}

/// Transition driven by a rule.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Dir {
    Up,
    Down,
}

/// Right-hand side of a rule.
#[derive(Clone, PartialEq, Debug)]
pub enum RuleTarget {
    Signal(Id),
    /// `e -> @name`: defines a label instead of driving a signal.
    Label(Name),
}

#[derive(Clone, PartialEq, Debug)]
pub struct Rule {
    pub attrs: Vec<Attr>,
    pub guard: PrsExpr,
    pub arrow: Arrow,
    pub target: RuleTarget,
    pub dir: Dir,
    pub span: Span,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum GateKind {
    N,
    P,
    /// Pass gate with both an n and a p control.
    Transmission,
}

/// Explicit transistor instantiation.
#[derive(Clone, PartialEq, Debug)]
pub struct Gate {
    pub attrs: Vec<Attr>,
    pub kind: GateKind,
    pub source: Id,
    pub drain: Id,
    pub gate: Option<Id>,
    /// Second control of a transmission gate.
    pub back_gate: Option<Id>,
    pub size: Option<SizeSpec>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub struct PrsLoop {
    pub var: Name,
    pub lo: Option<Expr>,
    pub hi: Expr,
    pub body: Vec<PrsItem>,
    pub span: Span,
}

/// `tree<fanin> { ... }`
#[derive(Clone, PartialEq, Debug)]
pub struct PrsTree {
    pub fanin: Expr,
    pub body: Vec<PrsItem>,
    pub span: Span,
}

/// `subckt<"name"> { ... }`
#[derive(Clone, PartialEq, Debug)]
pub struct Subckt {
    pub name: Option<Name>,
    pub body: Vec<PrsItem>,
    pub span: Span,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PrsItem {
    Rule(Rule),
    Gate(Gate),
    Loop(PrsLoop),
    Tree(PrsTree),
    Subckt(Subckt),
}

impl PrsItem {
    pub fn span(&self) -> Span {
        match self {
            PrsItem::Rule(r) => r.span,
            PrsItem::Gate(g) => g.span,
            PrsItem::Loop(l) => l.span,
            PrsItem::Tree(t) => t.span,
            PrsItem::Subckt(s) => s.span,
        }
    }
}

/// A `prs <vdd, gnd | psc, nsc> { ... }` body.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct PrsBlock {
    pub vdd: Option<Id>,
    pub gnd: Option<Id>,
    pub psc: Option<Id>,
    pub nsc: Option<Id>,
    pub body: Vec<PrsItem>,
}
