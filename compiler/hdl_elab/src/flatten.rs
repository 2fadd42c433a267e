//! Element-by-element traversal of array expressions.
//!
//! [`ExprFlattener`] walks an [`ArrayExpr`] left to right with an explicit
//! stack and yields one [`FlatItem`] per scalar: constants and scalar
//! variables once, sliced variables once per selected element, and whole
//! array values once per offset.

use hdl_ir::{
    AExprLeaf, ArrayError, ArrayExpr, ConstValue, Id, IndexIterator, Name, RangeSet, StepMode,
};

use crate::{ElabError, ElabResult};

/// One scalar of a flattened array expression.
#[derive(Clone, PartialEq, Debug)]
pub enum FlatItem {
    Const(ConstValue),
    /// A variable leaf that names a single scalar.
    Scalar(Id),
    /// One element of a sliced variable leaf, subscripted with its
    /// coordinate.
    Element(Id),
    /// One element of a whole-array value.
    Offset { name: Name, offset: usize },
}

/// What the traversal is positioned on.
#[derive(Debug)]
enum State<'a> {
    /// Between leaves.
    Idle,
    /// Enumerating the elements selected by a sliced variable.
    Slice {
        id: &'a Id,
        iter: IndexIterator<'a>,
    },
    /// Counting through the offsets `0..size` of a whole array.
    Offsets { name: Name, next: usize, size: usize },
}

/// Lazy, finite sequence of the scalars of an array expression.
///
/// Not restartable; build a new one to traverse again.
#[derive(Debug)]
pub struct ExprFlattener<'a> {
    stack: Vec<&'a ArrayExpr>,
    state: State<'a>,
    /// The item the next call to `next` returns.
    pending: Option<FlatItem>,
}

impl<'a> ExprFlattener<'a> {
    /// Prepare a traversal of `expr`. Every subscript and array type in it
    /// must already be expanded.
    pub fn new(expr: &'a ArrayExpr) -> ElabResult<Self> {
        for leaf in expr.leaves() {
            let expanded = match leaf {
                AExprLeaf::Const(_) => true,
                AExprLeaf::Var(id) => id
                    .segments()
                    .all(|seg| seg.subscript.as_ref().is_none_or(RangeSet::is_expanded)),
                AExprLeaf::Array { ty, .. } => ty.is_expanded(),
            };
            if !expanded {
                return Err(ElabError::Array {
                    source: ArrayError::NotExpanded { op: "flatten" },
                    span: hdl_ir::Span::DUMMY,
                });
            }
        }
        let mut flattener = ExprFlattener {
            stack: vec![expr],
            state: State::Idle,
            pending: None,
        };
        flattener.pending = flattener.advance();
        Ok(flattener)
    }

    /// Returns `true` once every scalar has been produced.
    #[inline]
    pub fn is_end(&self) -> bool {
        self.pending.is_none()
    }

    fn advance(&mut self) -> Option<FlatItem> {
        match &mut self.state {
            State::Idle => {}
            State::Slice { id, iter } => {
                if let Some(coord) = iter.next() {
                    return Some(FlatItem::Element(element(id, &coord)));
                }
            }
            State::Offsets { name, next, size } => {
                if *next < *size {
                    let offset = *next;
                    *next += 1;
                    return Some(FlatItem::Offset {
                        name: *name,
                        offset,
                    });
                }
            }
        }
        self.state = State::Idle;

        while let Some(node) = self.stack.pop() {
            let leaf = match node {
                ArrayExpr::Concat(left, right) | ArrayExpr::Comma(left, right) => {
                    self.stack.push(right);
                    self.stack.push(left);
                    continue;
                }
                ArrayExpr::Leaf(leaf) => leaf,
            };
            match leaf {
                AExprLeaf::Const(v) => return Some(FlatItem::Const(*v)),
                AExprLeaf::Var(id) => match &id.subscript {
                    Some(sub) if !sub.is_deref() => {
                        // Expandedness was checked in `new`.
                        let Ok(mut iter) = sub.stepper(StepMode::Subrange) else {
                            continue;
                        };
                        if let Some(coord) = iter.next() {
                            let item = FlatItem::Element(element(id, &coord));
                            self.state = State::Slice { id, iter };
                            return Some(item);
                        }
                    }
                    _ => return Some(FlatItem::Scalar(id.clone())),
                },
                AExprLeaf::Array { name, ty } => {
                    let size = ty.size().unwrap_or(0);
                    if size > 0 {
                        self.state = State::Offsets {
                            name: *name,
                            next: 1,
                            size,
                        };
                        return Some(FlatItem::Offset {
                            name: *name,
                            offset: 0,
                        });
                    }
                }
            }
        }
        None
    }
}

/// `id` with its first subscript replaced by the single element `coord`.
fn element(id: &Id, coord: &[i64]) -> Id {
    Id {
        name: id.name,
        subscript: Some(RangeSet::deref_at(coord)),
        next: id.next.clone(),
    }
}

impl Iterator for ExprFlattener<'_> {
    type Item = FlatItem;

    fn next(&mut self) -> Option<FlatItem> {
        let item = self.pending.take()?;
        self.pending = self.advance();
        Some(item)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
