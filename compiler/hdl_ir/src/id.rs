//! Hierarchical identifiers such as `x`, `a[3]`, `bus[0..7]` or `u.out[2]`.

use std::fmt;

use crate::display::DisplayWith;
use crate::{Name, RangeSet, StringInterner};

/// One identifier path, each segment optionally subscripted.
#[derive(Clone, PartialEq, Debug)]
pub struct Id {
    pub name: Name,
    /// Subscript of this segment. Single-index dimensions are dereferences,
    /// `lo..hi` dimensions select a slice.
    pub subscript: Option<RangeSet>,
    /// Next segment after a `.`.
    pub next: Option<Box<Id>>,
}

impl Id {
    pub fn new(name: Name) -> Self {
        Id {
            name,
            subscript: None,
            next: None,
        }
    }

    pub fn subscripted(name: Name, subscript: RangeSet) -> Self {
        Id {
            name,
            subscript: Some(subscript),
            next: None,
        }
    }

    /// Append `next` as the last segment of this path.
    #[must_use]
    pub fn dot(mut self, next: Id) -> Self {
        let mut tail = &mut self;
        while let Some(ref mut n) = tail.next {
            tail = n;
        }
        tail.next = Some(Box::new(next));
        self
    }

    /// Returns `true` if the first segment selects exactly one element.
    pub fn is_deref(&self) -> bool {
        self.subscript.as_ref().is_some_and(RangeSet::is_deref)
    }

    /// Iterate over the path segments, first to last.
    pub fn segments(&self) -> impl Iterator<Item = &Id> {
        std::iter::successors(Some(self), |id| id.next.as_deref())
    }
}

impl DisplayWith for Id {
    fn fmt_with(&self, interner: &StringInterner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, seg) in self.segments().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(interner.lookup(seg.name))?;
            if let Some(sub) = &seg.subscript {
                sub.fmt_with(interner, f)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ConcreteRange, Expr, SharedInterner};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dotted_display() {
        let interner = SharedInterner::new();
        let id = Id::subscripted(interner.intern("u"), RangeSet::index(Expr::Int(2)))
            .dot(Id::new(interner.intern("out")));
        assert_eq!(id.display(&interner).to_string(), "u[2].out");
        assert_eq!(id.segments().count(), 2);
    }

    #[test]
    fn test_is_deref() {
        let interner = SharedInterner::new();
        let a = interner.intern("a");
        assert!(!Id::new(a).is_deref());
        assert!(Id::subscripted(a, RangeSet::index(Expr::Int(1))).is_deref());
        let slice = RangeSet::concrete(vec![ConcreteRange::new(0, 3)], false);
        assert!(!Id::subscripted(a, slice).is_deref());
    }
}
