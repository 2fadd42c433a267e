//! Evaluation collaborators of the elaborator.
//!
//! The elaborator never interprets expressions itself. It talks to:
//! - a [`Scope`] holding parameters and loop variables, mutated only by
//!   strictly nested bind/unbind pairs
//! - a [`Namespace`] of global constants and declared signals
//! - an [`Evaluator`] that reduces expressions to constants and resolves
//!   identifiers to leaf variables
//!
//! [`ConstEvaluator`] is the evaluator used by the driver.

mod error;
mod evaluator;
mod namespace;
mod scope;

pub use error::EvalError;
pub use evaluator::{ConstEvaluator, Evaluated, Evaluator};
pub use namespace::{Namespace, Signal};
pub use scope::{IntSlot, ParamType, Scope, ValueSlot};
