//! Expansion of array types.

use hdl_eval::Evaluator;
use hdl_ir::{Expr, RangeSet};

use crate::{ElabError, ElabResult, Elaborator};

impl<E: Evaluator + ?Sized> Elaborator<'_, E> {
    /// Expand a symbolic array type into its concrete form.
    ///
    /// Every bound must evaluate to an integer constant. With `is_ref` a
    /// single-index dimension `[n]` selects element `n`; otherwise it
    /// declares `n` elements `[0..n-1]`. Expanding an array twice is a
    /// caller bug: it is logged and the array is returned unchanged.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn expand_array(&self, array: &RangeSet, is_ref: bool) -> ElabResult<RangeSet> {
        if array.is_expanded() {
            tracing::warn!(
                array = %self.render(array),
                "array type expanded twice"
            );
            return Ok(array.clone());
        }
        array.expand_with(is_ref, &mut |bound: &Expr| -> ElabResult<i64> {
            self.evaluate_int(bound)?
                .ok_or_else(|| ElabError::ArrayBound {
                    expr: self.render(bound),
                    span: self.span,
                })
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests {
    use super::*;
    use hdl_eval::{ConstEvaluator, Namespace, Scope};
    use hdl_ir::{BinaryOp, ConcreteRange, ConstValue, Id, SharedInterner};
    use pretty_assertions::assert_eq;

    fn setup() -> (SharedInterner, Namespace) {
        let interner = SharedInterner::new();
        let mut ns = Namespace::new(interner.clone());
        ns.define_const(interner.intern("N"), ConstValue::Int(4));
        ns.declare_signal(interner.intern("y"), None).unwrap();
        (interner, ns)
    }

    #[test]
    fn test_declaration_and_reference_context() {
        let (interner, ns) = setup();
        let mut scope = Scope::new();
        let elab = Elaborator::new(&ns, &mut scope, &ConstEvaluator);
        let n = Expr::var(Id::new(interner.intern("N")));
        let mut ty = RangeSet::index(n.clone());
        ty.concat(&RangeSet::range(
            Expr::Int(1),
            Expr::binary(BinaryOp::Sub, n, Expr::Int(1)),
        ))
        .unwrap();

        let decl = elab.expand_array(&ty, false).unwrap();
        assert_eq!(
            decl.concrete_ranges(),
            Some(&[ConcreteRange::new(0, 3), ConcreteRange::new(1, 3)][..])
        );
        assert_eq!(decl.size(), Ok(12));

        let reference = elab.expand_array(&ty, true).unwrap();
        assert_eq!(
            reference.concrete_ranges(),
            Some(&[ConcreteRange::single(4), ConcreteRange::new(1, 3)][..])
        );
    }

    #[test]
    fn test_non_constant_bound() {
        let (interner, ns) = setup();
        let mut scope = Scope::new();
        let elab = Elaborator::new(&ns, &mut scope, &ConstEvaluator);
        let ty = RangeSet::index(Expr::var(Id::new(interner.intern("y"))));
        assert_eq!(
            elab.expand_array(&ty, false),
            Err(ElabError::ArrayBound {
                expr: "y".to_owned(),
                span: hdl_ir::Span::DUMMY,
            })
        );
        let real = RangeSet::index(Expr::Real(2.5));
        assert!(matches!(
            elab.expand_array(&real, false),
            Err(ElabError::ArrayBound { .. })
        ));
    }

    #[test]
    fn test_double_expansion_is_identity() {
        let (_, ns) = setup();
        let mut scope = Scope::new();
        let elab = Elaborator::new(&ns, &mut scope, &ConstEvaluator);
        let ty = RangeSet::concrete(vec![ConcreteRange::new(2, 5)], false);
        assert_eq!(elab.expand_array(&ty, false), Ok(ty));
    }
}
