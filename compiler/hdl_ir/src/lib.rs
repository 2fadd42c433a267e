//! HDL IR - Intermediate Representation Types
//!
//! Data structures shared by every phase of the elaborator:
//! - Names for interned identifiers, spans for source locations
//! - Symbolic expressions and compile-time constants
//! - Hierarchical identifiers with array subscripts
//! - The array type model (`RangeSet`) and its index iterator
//! - Array expressions, production-rule trees and CHP bodies
//!
//! Nothing in this crate evaluates expressions. Operations that need
//! constant values (array expansion) take the evaluation step as a closure.

pub mod aexpr;
pub mod array;
pub mod chp;
mod display;
mod expr;
mod id;
mod interner;
mod name;
pub mod prs;
mod span;

pub use aexpr::{AExprLeaf, ArrayExpr};
pub use array::{
    ArrayError, ConcreteRange, Coordinate, Equality, IndexIterator, RangeSet, StepMode,
    SymbolicRange,
};
pub use chp::{Chp, ChpStmt};
pub use display::{DisplayWith, Displayed};
pub use expr::{BinaryOp, ConstValue, Expr, UnaryOp};
pub use id::Id;
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use prs::{
    Arrow, Attr, Dir, Gate, GateKind, LoopExpr, Precharge, PrechargeKind, PrsBlock, PrsExpr,
    PrsItem, PrsLoop, PrsTree, Rule, RuleTarget, SizeSpec, Subckt,
};
pub use span::Span;
