//! Cursor over the concrete index space of an expanded [`RangeSet`].

use smallvec::SmallVec;

use super::{ConcreteRange, RangeSet};

/// One index per dimension.
pub type Coordinate = SmallVec<[i64; 4]>;

/// Start-of-iteration protocol of an [`IndexIterator`].
///
/// Both modes enumerate the same coordinates in the same order, starting at
/// the low bounds of the first non-empty block.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum StepMode {
    /// Read, then step: the cursor is on the first element as soon as the
    /// iterator is built.
    Subrange,
    /// Step, then read: the cursor starts before the first element and the
    /// first [`IndexIterator::step`] lands on it.
    Primed,
}

/// Mixed-radix counter over every coordinate of an array chain.
///
/// Borrows the chain; owns only its cursor. Also usable as an [`Iterator`]
/// yielding owned coordinates.
#[derive(Clone, Debug)]
pub struct IndexIterator<'a> {
    /// Current block, `None` once the chain is exhausted.
    block: Option<&'a RangeSet>,
    ranges: &'a [ConcreteRange],
    coord: Coordinate,
    /// Steps taken since the first element; `None` before it and after the end.
    ordinal: Option<usize>,
    /// Waiting for the first `step()` (`StepMode::Primed`).
    before_first: bool,
    /// `Iterator::next` has produced at least one element.
    yielded: bool,
}

impl<'a> IndexIterator<'a> {
    pub(super) fn new(array: &'a RangeSet, mode: StepMode) -> Self {
        let before_first = mode == StepMode::Primed;
        let mut iter = IndexIterator {
            block: None,
            ranges: &[],
            coord: Coordinate::new(),
            ordinal: if before_first { None } else { Some(0) },
            before_first,
            yielded: false,
        };
        iter.enter(Some(array));
        iter
    }

    /// Move the cursor to the low corner of the first non-empty block at or
    /// after `block`.
    fn enter(&mut self, mut block: Option<&'a RangeSet>) {
        while let Some(b) = block {
            let ranges = b.concrete_ranges().unwrap_or(&[]);
            if !ranges.is_empty() && ranges.iter().all(|r| !r.is_empty()) {
                self.block = Some(b);
                self.ranges = ranges;
                self.coord = ranges.iter().map(|r| r.lo).collect();
                return;
            }
            block = b.next_block();
        }
        self.block = None;
        self.ranges = &[];
        self.coord.clear();
        self.ordinal = None;
    }

    /// Advance to the next coordinate: increment the last dimension and
    /// carry into earlier ones; overflowing the first dimension moves to the
    /// next block of the chain.
    pub fn step(&mut self) {
        if self.block.is_none() {
            return;
        }
        if self.before_first {
            self.before_first = false;
            self.ordinal = Some(0);
            return;
        }
        for i in (0..self.ranges.len()).rev() {
            let range = self.ranges[i];
            match self.coord[i].checked_add(1) {
                Some(v) if v <= range.hi => {
                    self.coord[i] = v;
                    self.ordinal = self.ordinal.map(|n| n + 1);
                    return;
                }
                _ => self.coord[i] = range.lo,
            }
        }
        let ordinal = self.ordinal;
        self.enter(self.block.and_then(RangeSet::next_block));
        if self.block.is_some() {
            self.ordinal = ordinal.map(|n| n + 1);
        }
    }

    /// Returns `true` once the whole chain has been stepped through.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.block.is_none()
    }

    /// Current coordinate, or `None` before the first step of a primed
    /// iterator or after the end.
    pub fn current(&self) -> Option<&[i64]> {
        if self.before_first || self.block.is_none() {
            None
        } else {
            Some(&self.coord)
        }
    }

    /// Current coordinate as a single-element subscript.
    pub fn current_deref(&self) -> Option<RangeSet> {
        self.current().map(RangeSet::deref_at)
    }

    /// Position of the current coordinate in enumeration order.
    #[inline]
    pub fn ordinal(&self) -> Option<usize> {
        self.ordinal
    }
}

impl Iterator for IndexIterator<'_> {
    type Item = Coordinate;

    /// Yields the element under the cursor on the first call (stepping
    /// first if primed), then steps before every later read.
    fn next(&mut self) -> Option<Coordinate> {
        if self.before_first || self.yielded {
            self.step();
        }
        self.yielded = true;
        self.current().map(Coordinate::from_slice)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
mod tests;
