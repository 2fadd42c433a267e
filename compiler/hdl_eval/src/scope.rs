//! Parameter and loop-variable bindings.
//!
//! Names are bound with a type and start out without a value. A loop
//! variable gets its value from an integer slot allocated separately and
//! attached to the name; the slot is assigned once per iteration and freed
//! when the loop ends.

use rustc_hash::FxHashMap;

use hdl_ir::{ConstValue, Name};

/// Type of a parameter.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamType {
    PInt,
    PReal,
    PBool,
}

impl ParamType {
    pub fn of(value: ConstValue) -> Self {
        match value {
            ConstValue::Int(_) => ParamType::PInt,
            ConstValue::Real(_) => ParamType::PReal,
            ConstValue::Bool(_) => ParamType::PBool,
        }
    }
}

/// Handle to an integer storage slot.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct IntSlot(u32);

/// Where the value of a bound name lives.
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum ValueSlot {
    /// Bound, no value yet.
    Unset(ParamType),
    /// Backed by an integer slot.
    Int(IntSlot),
    /// Defined directly.
    Value(ConstValue),
}

#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<Name, ValueSlot>,
    /// Integer slot storage; `None` marks a free slot.
    ints: Vec<Option<i64>>,
    free: Vec<IntSlot>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` with no value. Returns `false` if it is already bound.
    pub fn bind(&mut self, name: Name, ty: ParamType) -> bool {
        if self.bindings.contains_key(&name) {
            return false;
        }
        self.bindings.insert(name, ValueSlot::Unset(ty));
        true
    }

    /// Define `name` with a value, replacing any previous binding.
    pub fn define(&mut self, name: Name, value: ConstValue) {
        self.bindings.insert(name, ValueSlot::Value(value));
    }

    /// Back a bound integer name with `slot`. Returns `false` if `name` is
    /// not bound as an integer.
    pub fn attach(&mut self, name: Name, slot: IntSlot) -> bool {
        let Some(entry) = self.bindings.get_mut(&name) else {
            return false;
        };
        if !matches!(entry, ValueSlot::Unset(ParamType::PInt) | ValueSlot::Int(_)) {
            return false;
        }
        *entry = ValueSlot::Int(slot);
        true
    }

    #[inline]
    pub fn lookup(&self, name: Name) -> Option<ValueSlot> {
        self.bindings.get(&name).copied()
    }

    /// Remove the binding of `name`. Returns `false` if it was not bound.
    pub fn unbind(&mut self, name: Name) -> bool {
        self.bindings.remove(&name).is_some()
    }

    #[inline]
    pub fn is_bound(&self, name: Name) -> bool {
        self.bindings.contains_key(&name)
    }

    /// Current value of a bound name, `None` if unbound or unset.
    pub fn value(&self, name: Name) -> Option<ConstValue> {
        match self.lookup(name)? {
            ValueSlot::Unset(_) => None,
            ValueSlot::Int(slot) => self.int_slot(slot).map(ConstValue::Int),
            ValueSlot::Value(v) => Some(v),
        }
    }

    pub fn int_value(&self, name: Name) -> Option<i64> {
        self.value(name).and_then(ConstValue::as_int)
    }

    /// Allocate an integer slot, initialised to 0.
    pub fn alloc_int(&mut self) -> IntSlot {
        if let Some(slot) = self.free.pop() {
            self.ints[slot.0 as usize] = Some(0);
            return slot;
        }
        let index = u32::try_from(self.ints.len()).unwrap_or(u32::MAX);
        self.ints.push(Some(0));
        IntSlot(index)
    }

    /// Assign a live slot. Returns `false` if the slot has been freed.
    pub fn set_int(&mut self, slot: IntSlot, value: i64) -> bool {
        match self.ints.get_mut(slot.0 as usize) {
            Some(Some(v)) => {
                *v = value;
                true
            }
            _ => false,
        }
    }

    pub fn int_slot(&self, slot: IntSlot) -> Option<i64> {
        self.ints.get(slot.0 as usize).copied().flatten()
    }

    /// Release a slot for reuse. Freeing a slot twice is a no-op.
    pub fn free_int(&mut self, slot: IntSlot) {
        let Some(v) = self.ints.get_mut(slot.0 as usize) else {
            return;
        };
        if v.take().is_some() {
            self.free.push(slot);
        }
    }

    /// Number of slots currently allocated.
    pub fn live_slots(&self) -> usize {
        self.ints.iter().filter(|s| s.is_some()).count()
    }
}

#[cfg(test)]
mod tests;
