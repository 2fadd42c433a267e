//! Array types and index ranges.
//!
//! A [`RangeSet`] describes one declared array type (or one subscript of an
//! identifier). It starts out *symbolic*, with bounds written as
//! expressions over parameters, and is expanded exactly once into a
//! *concrete* form whose bounds are integers.
//!
//! # Sparse arrays
//!
//! A sparse array is a chain of dense blocks linked through `next`. Its
//! logical index space is the concatenation of the blocks' index spaces in
//! chain order, so the linear offset of an element in block `k` is the sum
//! of the sizes of blocks `0..k` plus its row-major offset inside block `k`.
//!
//! # Row-major order
//!
//! Within a block the **last** dimension varies fastest. Enumeration by
//! [`IndexIterator`] and [`RangeSet::offset`] agree on this order: the k-th
//! coordinate produced by the iterator has offset `k`.

use std::cell::Cell;
use std::fmt;

use crate::display::DisplayWith;
use crate::{Expr, StringInterner};

mod stepper;

pub use stepper::{Coordinate, IndexIterator, StepMode};

/// Violation of an array-model invariant.
///
/// These indicate a bug in an earlier phase (types were supposed to be
/// checked compatible, or an operation ran in the wrong phase), never a
/// problem with the user's source.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ArrayError {
    #[error("`{op}` is only valid on expanded arrays")]
    NotExpanded { op: &'static str },
    #[error("`{op}` is not applicable to expanded arrays")]
    AlreadyExpanded { op: &'static str },
    #[error("`{op}` is only valid on dense arrays")]
    Sparse { op: &'static str },
    #[error("arrays must have the same expanded state")]
    ExpandednessMismatch,
    #[error("dimensions don't match: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("expected a single-element dereference")]
    NotDeref,
    #[error("invalid dimension {dim} for a {dims}-dimensional array")]
    DimensionOutOfRange { dim: usize, dims: usize },
}

/// One symbolic dimension. `lo == None` means the dimension was written
/// with a single expression `[hi]`.
#[derive(Clone, PartialEq, Debug)]
pub struct SymbolicRange {
    pub lo: Option<Expr>,
    pub hi: Expr,
}

/// One concrete dimension, both bounds inclusive.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ConcreteRange {
    pub lo: i64,
    pub hi: i64,
}

impl ConcreteRange {
    #[inline]
    pub const fn new(lo: i64, hi: i64) -> Self {
        ConcreteRange { lo, hi }
    }

    /// The range `[v, v]`.
    #[inline]
    pub const fn single(v: i64) -> Self {
        ConcreteRange { lo: v, hi: v }
    }

    /// `hi - lo`, compared by loose equality.
    #[inline]
    pub fn span(self) -> i128 {
        i128::from(self.hi) - i128::from(self.lo)
    }

    /// Number of indices in the range; 0 when inverted.
    pub fn len(self) -> usize {
        if self.hi < self.lo {
            0
        } else {
            usize::try_from(self.span() + 1).unwrap_or(usize::MAX)
        }
    }

    pub fn is_empty(self) -> bool {
        self.hi < self.lo
    }

    #[inline]
    pub fn contains(self, v: i64) -> bool {
        self.lo <= v && v <= self.hi
    }
}

/// How strictly [`RangeSet::is_equal`] compares expanded bounds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Equality {
    /// Every dimension must have the same span.
    Loose,
    /// Every dimension must have identical bounds.
    Strict,
    /// Same span in every dimension except the first, which is ignored.
    StrictExceptFirst,
}

#[derive(Clone, PartialEq, Debug)]
enum Ranges {
    Symbolic(Vec<SymbolicRange>),
    Concrete(Vec<ConcreteRange>),
}

impl Ranges {
    fn len(&self) -> usize {
        match self {
            Ranges::Symbolic(r) => r.len(),
            Ranges::Concrete(r) => r.len(),
        }
    }
}

/// A declared array type: one dense block of dimensions, optionally
/// chained to further blocks to form a sparse array.
#[derive(Clone, Debug)]
pub struct RangeSet {
    ranges: Ranges,
    /// `true` when this denotes a single element rather than a slice.
    deref: bool,
    next: Option<Box<RangeSet>>,
    /// Element count of this block alone; cleared whenever a bound changes.
    cached_size: Cell<Option<usize>>,
}

impl RangeSet {
    fn from_ranges(ranges: Ranges, deref: bool) -> Self {
        RangeSet {
            ranges,
            deref,
            next: None,
            cached_size: Cell::new(None),
        }
    }

    /// A one-dimensional symbolic array. Without `lo` the dimension is a
    /// single index and the array is a dereference.
    pub fn new(lo: Option<Expr>, hi: Expr) -> Self {
        let deref = lo.is_none();
        Self::from_ranges(Ranges::Symbolic(vec![SymbolicRange { lo, hi }]), deref)
    }

    /// `[lo..hi]`.
    pub fn range(lo: Expr, hi: Expr) -> Self {
        Self::new(Some(lo), hi)
    }

    /// `[hi]`: a size in a declaration, a single index in a reference.
    pub fn index(hi: Expr) -> Self {
        Self::new(None, hi)
    }

    /// An already expanded dense block.
    pub fn concrete(ranges: Vec<ConcreteRange>, deref: bool) -> Self {
        Self::from_ranges(Ranges::Concrete(ranges), deref)
    }

    /// An expanded dereference of exactly one coordinate.
    pub fn deref_at(coord: &[i64]) -> Self {
        Self::concrete(
            coord.iter().map(|&v| ConcreteRange::single(v)).collect(),
            true,
        )
    }

    /// Chain `block` after the last block of this array, making it sparse.
    pub fn with_block(mut self, block: RangeSet) -> Result<Self, ArrayError> {
        if block.is_expanded() != self.is_expanded() {
            return Err(ArrayError::ExpandednessMismatch);
        }
        let mut tail = &mut self;
        while let Some(ref mut next) = tail.next {
            tail = next;
        }
        tail.next = Some(Box::new(block));
        Ok(self)
    }

    #[inline]
    pub fn n_dims(&self) -> usize {
        self.ranges.len()
    }

    #[inline]
    pub fn is_deref(&self) -> bool {
        self.deref
    }

    #[inline]
    pub fn is_expanded(&self) -> bool {
        matches!(self.ranges, Ranges::Concrete(_))
    }

    #[inline]
    pub fn is_sparse(&self) -> bool {
        self.next.is_some()
    }

    #[inline]
    pub fn next_block(&self) -> Option<&RangeSet> {
        self.next.as_deref()
    }

    /// This block followed by every chained block.
    pub fn blocks(&self) -> impl Iterator<Item = &RangeSet> {
        std::iter::successors(Some(self), |b| b.next_block())
    }

    pub fn symbolic_ranges(&self) -> Option<&[SymbolicRange]> {
        match &self.ranges {
            Ranges::Symbolic(r) => Some(r),
            Ranges::Concrete(_) => None,
        }
    }

    pub fn concrete_ranges(&self) -> Option<&[ConcreteRange]> {
        match &self.ranges {
            Ranges::Concrete(r) => Some(r),
            Ranges::Symbolic(_) => None,
        }
    }

    fn expanded_ranges(&self, op: &'static str) -> Result<&[ConcreteRange], ArrayError> {
        self.concrete_ranges()
            .ok_or(ArrayError::NotExpanded { op })
    }

    /// Same dimension count, dereference flag and sparseness.
    pub fn is_dim_compatible(&self, other: &RangeSet) -> bool {
        self.n_dims() == other.n_dims()
            && self.deref == other.deref
            && self.is_sparse() == other.is_sparse()
    }

    /// Compare two array types block by block.
    ///
    /// Symbolic arrays compare bound expressions structurally regardless of
    /// `mode`. Expanded arrays compare bounds (`Strict`) or spans (`Loose`,
    /// `StrictExceptFirst`). Arrays in different phases are never equal.
    pub fn is_equal(&self, other: &RangeSet, mode: Equality) -> bool {
        if !self.is_dim_compatible(other) {
            return false;
        }
        let same_block = match (&self.ranges, &other.ranges) {
            (Ranges::Symbolic(a), Ranges::Symbolic(b)) => a.iter().zip(b).all(|(x, y)| {
                let lo_eq = match (&x.lo, &y.lo) {
                    (None, None) => true,
                    (Some(l1), Some(l2)) => l1.structurally_eq(l2),
                    _ => false,
                };
                lo_eq && x.hi.structurally_eq(&y.hi)
            }),
            (Ranges::Concrete(a), Ranges::Concrete(b)) => {
                let skip = usize::from(mode == Equality::StrictExceptFirst);
                a.iter().zip(b).skip(skip).all(|(x, y)| match mode {
                    Equality::Strict => x == y,
                    Equality::Loose | Equality::StrictExceptFirst => x.span() == y.span(),
                })
            }
            _ => false,
        };
        if !same_block {
            return false;
        }
        match (&self.next, &other.next) {
            (Some(a), Some(b)) => a.is_equal(b, mode),
            (None, None) => true,
            _ => false,
        }
    }

    /// Append `other`'s dimensions to this block, merging two dense array
    /// types into one multi-dimensional type.
    pub fn concat(&mut self, other: &RangeSet) -> Result<(), ArrayError> {
        if self.is_sparse() || other.is_sparse() {
            return Err(ArrayError::Sparse { op: "concat" });
        }
        match (&mut self.ranges, &other.ranges) {
            (Ranges::Symbolic(a), Ranges::Symbolic(b)) => a.extend(b.iter().cloned()),
            (Ranges::Concrete(a), Ranges::Concrete(b)) => a.extend_from_slice(b),
            _ => return Err(ArrayError::ExpandednessMismatch),
        }
        // Any sliced part makes the whole a slice.
        if !other.deref {
            self.deref = false;
        }
        self.cached_size.set(None);
        Ok(())
    }

    /// Element count of this block alone.
    fn block_size(&self, ranges: &[ConcreteRange]) -> usize {
        if let Some(size) = self.cached_size.get() {
            return size;
        }
        let size = ranges
            .iter()
            .try_fold(1usize, |acc, r| acc.checked_mul(r.len()))
            .unwrap_or(usize::MAX);
        self.cached_size.set(Some(size));
        size
    }

    /// Number of elements across the whole chain.
    pub fn size(&self) -> Result<usize, ArrayError> {
        self.blocks().try_fold(0usize, |total, block| {
            let ranges = block.expanded_ranges("size")?;
            Ok(total.saturating_add(block.block_size(ranges)))
        })
    }

    /// Number of indices in dimension `dim` of a dense expanded array.
    pub fn range_size(&self, dim: usize) -> Result<usize, ArrayError> {
        let ranges = self.dense_ranges("range_size", dim)?;
        Ok(ranges[dim].len())
    }

    /// Overwrite the bounds of dimension `dim` of a dense expanded array.
    pub fn update_range(&mut self, dim: usize, lo: i64, hi: i64) -> Result<(), ArrayError> {
        self.dense_ranges("update_range", dim)?;
        if let Ranges::Concrete(ranges) = &mut self.ranges {
            ranges[dim] = ConcreteRange::new(lo, hi);
        }
        self.cached_size.set(None);
        Ok(())
    }

    fn dense_ranges(&self, op: &'static str, dim: usize) -> Result<&[ConcreteRange], ArrayError> {
        let ranges = self.expanded_ranges(op)?;
        if self.is_sparse() {
            return Err(ArrayError::Sparse { op });
        }
        if dim >= ranges.len() {
            return Err(ArrayError::DimensionOutOfRange {
                dim,
                dims: ranges.len(),
            });
        }
        Ok(ranges)
    }

    /// Row-major offset of `coord` within this block only, or `None` if any
    /// coordinate falls outside the block.
    fn in_range(&self, ranges: &[ConcreteRange], coord: &[ConcreteRange]) -> Option<usize> {
        let mut offset = 0usize;
        for (i, (r, c)) in ranges.iter().zip(coord).enumerate() {
            if !r.contains(c.lo) || !r.contains(c.hi) {
                return None;
            }
            let stride = ranges[i + 1..]
                .iter()
                .try_fold(1usize, |acc, later| acc.checked_mul(later.len()))?;
            let index = usize::try_from(i128::from(c.lo) - i128::from(r.lo)).ok()?;
            offset = offset.checked_add(index.checked_mul(stride)?)?;
        }
        Some(offset)
    }

    /// Linear offset of the single coordinate `candidate` within the whole
    /// chain, or `Ok(None)` if no block contains it.
    pub fn offset(&self, candidate: &RangeSet) -> Result<Option<usize>, ArrayError> {
        let coord = candidate.expanded_ranges("offset")?;
        let mut base = 0usize;
        for block in self.blocks() {
            let ranges = block.expanded_ranges("offset")?;
            if ranges.len() != coord.len() {
                return Err(ArrayError::DimensionMismatch {
                    expected: ranges.len(),
                    found: coord.len(),
                });
            }
            if let Some(offset) = block.in_range(ranges, coord) {
                return Ok(Some(base + offset));
            }
            base = base.saturating_add(block.block_size(ranges));
        }
        Ok(None)
    }

    /// Check whether the successor of the dereference `candidate` (every
    /// dimension's index plus one) lies inside some block of the chain.
    pub fn validate(&self, candidate: &RangeSet) -> Result<bool, ArrayError> {
        let coord = candidate.expanded_ranges("validate")?;
        if !candidate.is_deref() {
            return Err(ArrayError::NotDeref);
        }
        for block in self.blocks() {
            let ranges = block.expanded_ranges("validate")?;
            if ranges.len() != coord.len() {
                return Err(ArrayError::DimensionMismatch {
                    expected: ranges.len(),
                    found: coord.len(),
                });
            }
            let inside = ranges
                .iter()
                .zip(coord)
                .all(|(r, c)| c.hi.checked_add(1).is_some_and(|succ| r.contains(succ)));
            if inside {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Number of dimensions written as `lo..hi` rather than a single
    /// expression. Sparse arrays count every dimension.
    pub fn eff_dims(&self) -> Result<usize, ArrayError> {
        let Some(ranges) = self.symbolic_ranges() else {
            return Err(ArrayError::AlreadyExpanded { op: "eff_dims" });
        };
        if self.is_sparse() {
            return Ok(self.n_dims());
        }
        Ok(ranges.iter().filter(|r| r.lo.is_some()).count())
    }

    /// Produce the concrete form of this array, evaluating bounds with
    /// `eval`.
    ///
    /// For each dimension the high bound is evaluated first, then the low
    /// bound if present. A dimension written as `[n]` becomes `[n, n]` when
    /// `is_ref` is set (a subscript selecting element `n`) and `[0, n-1]`
    /// otherwise (a declaration of `n` elements). An already expanded array
    /// is returned unchanged.
    pub fn expand_with<E, F>(&self, is_ref: bool, eval: &mut F) -> Result<RangeSet, E>
    where
        F: FnMut(&Expr) -> Result<i64, E>,
    {
        let Ranges::Symbolic(ranges) = &self.ranges else {
            return Ok(self.clone());
        };
        let mut concrete = Vec::with_capacity(ranges.len());
        for r in ranges {
            let hi = eval(&r.hi)?;
            let range = match &r.lo {
                Some(lo) => ConcreteRange::new(eval(lo)?, hi),
                None if is_ref => ConcreteRange::single(hi),
                None => ConcreteRange::new(0, hi.saturating_sub(1)),
            };
            concrete.push(range);
        }
        let mut expanded = Self::concrete(concrete, self.deref);
        if let Some(next) = &self.next {
            expanded.next = Some(Box::new(next.expand_with(is_ref, eval)?));
        }
        Ok(expanded)
    }

    /// Cursor over the index space of this expanded array.
    pub fn stepper(&self, mode: StepMode) -> Result<IndexIterator<'_>, ArrayError> {
        if !self.is_expanded() {
            return Err(ArrayError::NotExpanded { op: "stepper" });
        }
        Ok(IndexIterator::new(self, mode))
    }
}

impl PartialEq for RangeSet {
    fn eq(&self, other: &Self) -> bool {
        self.ranges == other.ranges && self.deref == other.deref && self.next == other.next
    }
}

impl DisplayWith for RangeSet {
    fn fmt_with(&self, interner: &StringInterner, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_sparse() {
            f.write_str("[ ")?;
        }
        for (i, block) in self.blocks().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str("[")?;
            for d in 0..block.n_dims() {
                if d > 0 {
                    f.write_str(",")?;
                }
                match &block.ranges {
                    Ranges::Symbolic(r) => match &r[d].lo {
                        None => r[d].hi.fmt_with(interner, f)?,
                        Some(lo) => {
                            lo.fmt_with(interner, f)?;
                            f.write_str("..")?;
                            r[d].hi.fmt_with(interner, f)?;
                        }
                    },
                    Ranges::Concrete(r) => {
                        let ConcreteRange { lo, hi } = r[d];
                        if block.deref && lo == hi {
                            write!(f, "{lo}")?;
                        } else if lo == 0 {
                            write!(f, "{}", i128::from(hi) + 1)?;
                        } else {
                            write!(f, "{lo}..{hi}")?;
                        }
                    }
                }
            }
            f.write_str("]")?;
        }
        if self.is_sparse() {
            f.write_str(" ]")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
