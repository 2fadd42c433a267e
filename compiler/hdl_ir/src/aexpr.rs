//! Array-valued expressions: concatenations and comma groups of scalars,
//! variables and whole arrays.

use crate::{ConstValue, Id, Name, RangeSet};

/// A leaf of an [`ArrayExpr`].
#[derive(Clone, PartialEq, Debug)]
pub enum AExprLeaf {
    /// A scalar constant.
    Const(ConstValue),
    /// A variable reference. If its subscript is a slice, the leaf stands
    /// for every element of the slice.
    Var(Id),
    /// An already flattened whole-array value, addressed by offset.
    Array { name: Name, ty: RangeSet },
}

/// Binary composition tree of array leaves.
#[derive(Clone, PartialEq, Debug)]
pub enum ArrayExpr {
    Leaf(AExprLeaf),
    /// `left # right`
    Concat(Box<ArrayExpr>, Box<ArrayExpr>),
    /// `{left, right}`
    Comma(Box<ArrayExpr>, Box<ArrayExpr>),
}

impl ArrayExpr {
    pub fn leaf(leaf: AExprLeaf) -> Self {
        ArrayExpr::Leaf(leaf)
    }

    pub fn concat(left: ArrayExpr, right: ArrayExpr) -> Self {
        ArrayExpr::Concat(Box::new(left), Box::new(right))
    }

    pub fn comma(left: ArrayExpr, right: ArrayExpr) -> Self {
        ArrayExpr::Comma(Box::new(left), Box::new(right))
    }

    /// Leaves in left-to-right order.
    pub fn leaves(&self) -> Vec<&AExprLeaf> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            match node {
                ArrayExpr::Leaf(leaf) => out.push(leaf),
                ArrayExpr::Concat(l, r) | ArrayExpr::Comma(l, r) => {
                    stack.push(r);
                    stack.push(l);
                }
            }
        }
        out
    }
}
