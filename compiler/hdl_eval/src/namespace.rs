//! Global constants and declared signals of one elaboration unit.

use rustc_hash::FxHashMap;

use hdl_ir::{ConstValue, DisplayWith, Name, RangeSet, SharedInterner};

use crate::EvalError;

/// A declared signal. `ty` is its expanded array type, `None` for a scalar.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    pub name: Name,
    pub ty: Option<RangeSet>,
}

#[derive(Clone, Debug)]
pub struct Namespace {
    interner: SharedInterner,
    consts: FxHashMap<Name, ConstValue>,
    signals: FxHashMap<Name, Signal>,
}

impl Namespace {
    pub fn new(interner: SharedInterner) -> Self {
        Namespace {
            interner,
            consts: FxHashMap::default(),
            signals: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn define_const(&mut self, name: Name, value: ConstValue) {
        self.consts.insert(name, value);
    }

    /// Declare a signal. Array types must already be expanded.
    pub fn declare_signal(&mut self, name: Name, ty: Option<RangeSet>) -> Result<(), EvalError> {
        if ty.as_ref().is_some_and(|t| !t.is_expanded()) {
            return Err(EvalError::UnexpandedType {
                name: self.interner.lookup(name).to_owned(),
            });
        }
        self.signals.insert(name, Signal { name, ty });
        Ok(())
    }

    #[inline]
    pub fn constant(&self, name: Name) -> Option<ConstValue> {
        self.consts.get(&name).copied()
    }

    #[inline]
    pub fn signal(&self, name: Name) -> Option<&Signal> {
        self.signals.get(&name)
    }

    /// Render a printable value with this namespace's interner.
    pub fn render<T: DisplayWith + ?Sized>(&self, value: &T) -> String {
        value.display(&self.interner).to_string()
    }
}
