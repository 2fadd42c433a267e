//! The elaboration context.

use hdl_eval::{ConstEvaluator, EvalError, Evaluated, Evaluator, Namespace, Scope};
use hdl_ir::{DisplayWith, Expr, Id, Name, Span};

use crate::{ElabError, ElabOptions, ElabResult};

/// Walks symbolic trees and rebuilds them fully expanded.
///
/// Borrows the unit's namespace and the caller's scope. The scope is only
/// mutated by loop-variable guards, so it is returned to its original
/// bindings whenever an expansion returns, successfully or not.
pub struct Elaborator<'a, E: Evaluator + ?Sized = ConstEvaluator> {
    pub(crate) ns: &'a Namespace,
    pub(crate) scope: &'a mut Scope,
    pub(crate) eval: &'a E,
    pub(crate) options: ElabOptions,
    /// Source context for errors: the rule, gate or loop being expanded.
    pub(crate) span: Span,
}

impl<'a, E: Evaluator + ?Sized> Elaborator<'a, E> {
    pub fn new(ns: &'a Namespace, scope: &'a mut Scope, eval: &'a E) -> Self {
        Elaborator {
            ns,
            scope,
            eval,
            options: ElabOptions::default(),
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: ElabOptions) -> Self {
        self.options = options;
        self
    }

    #[inline]
    pub fn scope(&self) -> &Scope {
        &*self.scope
    }

    pub(crate) fn render<T: DisplayWith + ?Sized>(&self, value: &T) -> String {
        self.ns.render(value)
    }

    pub(crate) fn name_str(&self, name: Name) -> String {
        self.ns.interner().lookup(name).to_owned()
    }

    pub(crate) fn eval_error(&self, source: EvalError) -> ElabError {
        ElabError::Eval {
            source,
            span: self.span,
        }
    }

    /// Evaluate an expression that must reduce to a constant.
    ///
    /// A failure caused by the source, such as an undefined name, yields
    /// `Ok(None)` so the caller can report what was not constant. Internal
    /// failures are returned as errors.
    pub(crate) fn evaluate(&self, expr: &Expr) -> ElabResult<Option<Evaluated>> {
        match self.eval.evaluate(expr, self.ns, &*self.scope) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_internal() => Err(self.eval_error(e)),
            Err(e) => {
                tracing::debug!(expr = %self.render(expr), error = %e, "not a constant");
                Ok(None)
            }
        }
    }

    /// Evaluate `expr` to an integer. `Ok(None)` if it evaluated to
    /// anything else.
    pub(crate) fn evaluate_int(&self, expr: &Expr) -> ElabResult<Option<i64>> {
        Ok(self.evaluate(expr)?.and_then(|v| v.as_int()))
    }

    /// Resolve an identifier that must denote a scalar variable.
    pub fn resolve_var(&self, id: &Id) -> ElabResult<Id> {
        let resolved = self
            .eval
            .resolve_id(id, self.ns, &*self.scope)
            .map_err(|e| self.eval_error(e))?;
        match resolved {
            Evaluated::Residual(Expr::Var(leaf)) => Ok(*leaf),
            _ => Err(ElabError::NotAVariable {
                id: self.render(id),
                span: self.span,
            }),
        }
    }

    /// Evaluate `expr` to any constant, rebuilt as a literal.
    pub(crate) fn const_literal(&self, expr: &Expr) -> ElabResult<Option<Expr>> {
        Ok(self
            .evaluate(expr)?
            .and_then(|v| v.as_const())
            .map(Expr::from))
    }
}
