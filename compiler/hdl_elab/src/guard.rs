//! Scoped loop-variable bindings.
//!
//! A loop binds its variable before its bounds are evaluated, so a bound
//! that names the variable sees it unset. The first iteration backs the
//! name with a fresh integer slot, which each later iteration reassigns.
//! [`LoopScope`] frees the slot and unbinds the name when dropped, so the
//! binding never outlives the loop, whether the loop finishes, stops early
//! on an absorbing value or fails.

use std::ops::{Deref, DerefMut};

use hdl_eval::{Evaluator, IntSlot, ParamType};
use hdl_ir::Name;

use crate::{ElabError, ElabResult, Elaborator};

/// RAII guard over an [`Elaborator`] with one loop variable bound.
///
/// Derefs to the elaborator so the loop body is expanded through the guard.
pub struct LoopScope<'g, 'a, E: Evaluator + ?Sized> {
    elab: &'g mut Elaborator<'a, E>,
    var: Name,
    slot: Option<IntSlot>,
}

impl<E: Evaluator + ?Sized> LoopScope<'_, '_, E> {
    /// Give the loop variable the value of the next iteration.
    pub fn set(&mut self, value: i64) {
        let slot = match self.slot {
            Some(slot) => slot,
            None => {
                let slot = self.elab.scope.alloc_int();
                self.elab.scope.attach(self.var, slot);
                self.slot = Some(slot);
                slot
            }
        };
        self.elab.scope.set_int(slot, value);
    }

    #[inline]
    pub fn var(&self) -> Name {
        self.var
    }
}

impl<E: Evaluator + ?Sized> Drop for LoopScope<'_, '_, E> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot {
            self.elab.scope.free_int(slot);
        }
        self.elab.scope.unbind(self.var);
    }
}

impl<'a, E: Evaluator + ?Sized> Deref for LoopScope<'_, 'a, E> {
    type Target = Elaborator<'a, E>;

    fn deref(&self) -> &Self::Target {
        self.elab
    }
}

impl<E: Evaluator + ?Sized> DerefMut for LoopScope<'_, '_, E> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.elab
    }
}

impl<'a, E: Evaluator + ?Sized> Elaborator<'a, E> {
    /// Bind `var` as an integer loop variable until the guard is dropped.
    /// The variable has no value until the first [`LoopScope::set`].
    ///
    /// A name that is already bound is an internal error: loops over the
    /// same variable must not nest.
    pub fn loop_scope(&mut self, var: Name) -> ElabResult<LoopScope<'_, 'a, E>> {
        if !self.scope.bind(var, ParamType::PInt) {
            return Err(ElabError::ScopeConflict {
                var: self.name_str(var),
                span: self.span,
            });
        }
        Ok(LoopScope {
            elab: self,
            var,
            slot: None,
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
    use hdl_eval::{ConstEvaluator, Namespace, Scope, ValueSlot};
    use hdl_ir::SharedInterner;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_binding_released_on_drop() {
        let interner = SharedInterner::new();
        let i = interner.intern("i");
        let ns = Namespace::new(interner);
        let mut scope = Scope::new();
        {
            let mut elab = Elaborator::new(&ns, &mut scope, &ConstEvaluator);
            let mut lv = elab.loop_scope(i).unwrap();
            lv.set(5);
            assert_eq!(lv.scope().int_value(i), Some(5));
            assert_eq!(lv.var(), i);
        }
        assert!(!scope.is_bound(i));
        assert_eq!(scope.live_slots(), 0);
    }

    #[test]
    fn test_variable_unset_until_first_iteration() {
        let interner = SharedInterner::new();
        let i = interner.intern("i");
        let ns = Namespace::new(interner);
        let mut scope = Scope::new();
        {
            let mut elab = Elaborator::new(&ns, &mut scope, &ConstEvaluator);
            let mut lv = elab.loop_scope(i).unwrap();
            assert_eq!(lv.scope().lookup(i), Some(ValueSlot::Unset(ParamType::PInt)));
            assert_eq!(lv.scope().live_slots(), 0);
            lv.set(0);
            lv.set(1);
            assert_eq!(lv.scope().int_value(i), Some(1));
            assert_eq!(lv.scope().live_slots(), 1);
        }
        assert!(!scope.is_bound(i));
        assert_eq!(scope.live_slots(), 0);
    }

    #[test]
    fn test_nested_same_variable_is_internal_error() {
        let interner = SharedInterner::new();
        let i = interner.intern("i");
        let ns = Namespace::new(interner);
        let mut scope = Scope::new();
        let mut elab = Elaborator::new(&ns, &mut scope, &ConstEvaluator);
        let mut outer = elab.loop_scope(i).unwrap();
        let err = outer.loop_scope(i).err().unwrap();
        assert!(err.is_internal());
        assert!(outer.scope().is_bound(i));
    }
}
