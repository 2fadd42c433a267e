//! Interner-aware rendering.
//!
//! Tree types hold [`Name`](crate::Name)s, so printing them needs the
//! interner. Types implement [`DisplayWith`] and callers write
//! `expr.display(&interner)` wherever a `Display` value is expected.

use std::fmt;

use crate::StringInterner;

/// Formatting that resolves names through an interner.
pub trait DisplayWith {
    fn fmt_with(&self, interner: &StringInterner, f: &mut fmt::Formatter<'_>) -> fmt::Result;

    /// Pair `self` with an interner to get a `Display` value.
    fn display<'a>(&'a self, interner: &'a StringInterner) -> Displayed<'a, Self> {
        Displayed {
            value: self,
            interner,
        }
    }
}

/// A value paired with the interner needed to print it.
pub struct Displayed<'a, T: ?Sized> {
    value: &'a T,
    interner: &'a StringInterner,
}

impl<T: DisplayWith + ?Sized> fmt::Display for Displayed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.value.fmt_with(self.interner, f)
    }
}
