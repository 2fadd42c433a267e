//! Production-rule expansion.
//!
//! Rule trees are rebuilt bottom-up. Guards are constant-folded as they
//! are rebuilt and loops are unrolled with their variable bound in scope.
//! After expansion every identifier is a leaf variable and every
//! attribute, size and fan-in is a literal.

use hdl_eval::Evaluator;
use hdl_ir::{
    Attr, Expr, Gate, Id, LoopExpr, Name, Precharge, PrsBlock, PrsExpr, PrsItem, PrsLoop, PrsTree,
    Rule, RuleTarget, SizeSpec, Subckt,
};

use crate::fold::Connective;
use crate::stack::ensure_sufficient_stack;
use crate::{ElabError, ElabResult, Elaborator};

impl<E: Evaluator + ?Sized> Elaborator<'_, E> {
    /// Expand a `prs` block: supply and substrate nodes, then the body.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn expand_prs_block(&mut self, block: &PrsBlock) -> ElabResult<PrsBlock> {
        Ok(PrsBlock {
            vdd: self.resolve_opt(block.vdd.as_ref())?,
            gnd: self.resolve_opt(block.gnd.as_ref())?,
            psc: self.resolve_opt(block.psc.as_ref())?,
            nsc: self.resolve_opt(block.nsc.as_ref())?,
            body: self.expand_prs(&block.body)?,
        })
    }

    /// Expand a rule sequence. Loops are replaced by the concatenation of
    /// their iterations.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn expand_prs(&mut self, items: &[PrsItem]) -> ElabResult<Vec<PrsItem>> {
        let mut out = Vec::with_capacity(items.len());
        self.expand_items_into(items, &mut out)?;
        Ok(out)
    }

    fn expand_items_into(&mut self, items: &[PrsItem], out: &mut Vec<PrsItem>) -> ElabResult<()> {
        for item in items {
            let outer = self.span;
            self.span = item.span();
            let result = ensure_sufficient_stack(|| self.expand_item_into(item, out));
            self.span = outer;
            result?;
        }
        Ok(())
    }

    fn expand_item_into(&mut self, item: &PrsItem, out: &mut Vec<PrsItem>) -> ElabResult<()> {
        match item {
            PrsItem::Rule(rule) => out.push(PrsItem::Rule(self.expand_rule(rule)?)),
            PrsItem::Gate(gate) => out.push(PrsItem::Gate(self.expand_gate(gate)?)),
            PrsItem::Loop(l) => self.expand_rule_loop(l, out)?,
            PrsItem::Tree(tree) => out.push(PrsItem::Tree(self.expand_tree(tree)?)),
            PrsItem::Subckt(sub) => out.push(PrsItem::Subckt(Subckt {
                name: sub.name,
                body: self.expand_prs(&sub.body)?,
                span: sub.span,
            })),
        }
        Ok(())
    }

    fn expand_rule(&mut self, rule: &Rule) -> ElabResult<Rule> {
        let attrs = self.expand_attrs(&rule.attrs)?;
        let guard = self.expand_prs_expr(&rule.guard)?;
        let target = match &rule.target {
            RuleTarget::Signal(id) => RuleTarget::Signal(self.resolve_var(id)?),
            RuleTarget::Label(name) => RuleTarget::Label(*name),
        };
        Ok(Rule {
            attrs,
            guard,
            arrow: rule.arrow,
            target,
            dir: rule.dir,
            span: rule.span,
        })
    }

    fn expand_gate(&mut self, gate: &Gate) -> ElabResult<Gate> {
        Ok(Gate {
            attrs: self.expand_attrs(&gate.attrs)?,
            kind: gate.kind,
            source: self.resolve_var(&gate.source)?,
            drain: self.resolve_var(&gate.drain)?,
            gate: self.resolve_opt(gate.gate.as_ref())?,
            back_gate: self.resolve_opt(gate.back_gate.as_ref())?,
            size: gate.size.as_ref().map(|s| self.expand_size(s)).transpose()?,
            span: gate.span,
        })
    }

    fn resolve_opt(&self, id: Option<&Id>) -> ElabResult<Option<Id>> {
        id.map(|id| self.resolve_var(id)).transpose()
    }

    fn expand_rule_loop(&mut self, l: &PrsLoop, out: &mut Vec<PrsItem>) -> ElabResult<()> {
        let mut lv = self.loop_scope(l.var)?;
        let Some((lo, hi)) = lv.loop_range(l.var, l.lo.as_ref(), &l.hi)? else {
            return Ok(());
        };
        for value in lo..=hi {
            lv.set(value);
            tracing::trace!(var = %lv.name_str(l.var), value, "unrolling");
            lv.expand_items_into(&l.body, out)?;
        }
        Ok(())
    }

    fn expand_tree(&mut self, tree: &PrsTree) -> ElabResult<PrsTree> {
        let fanin = match &tree.fanin {
            Expr::Int(v) => Expr::Int(*v),
            other => match self.evaluate_int(other)? {
                Some(v) => Expr::Int(v),
                None => {
                    return Err(ElabError::TreeFanin {
                        expr: self.render(other),
                        span: self.span,
                    })
                }
            },
        };
        Ok(PrsTree {
            fanin,
            body: self.expand_prs(&tree.body)?,
            span: tree.span,
        })
    }

    /// Expand a guard expression.
    pub fn expand_prs_expr(&mut self, expr: &PrsExpr) -> ElabResult<PrsExpr> {
        ensure_sufficient_stack(|| self.expand_prs_expr_inner(expr))
    }

    fn expand_prs_expr_inner(&mut self, expr: &PrsExpr) -> ElabResult<PrsExpr> {
        match expr {
            PrsExpr::And {
                left,
                right,
                precharge,
            } => self.expand_connective(Connective::And, left, right, precharge.as_ref()),
            PrsExpr::Or {
                left,
                right,
                precharge,
            } => self.expand_connective(Connective::Or, left, right, precharge.as_ref()),
            PrsExpr::Not(inner) => {
                let inner = self.expand_prs_expr(inner)?;
                Ok(match inner.as_bool() {
                    Some(b) => PrsExpr::constant(!b),
                    None => PrsExpr::Not(Box::new(inner)),
                })
            }
            PrsExpr::Var { id, size } => {
                let size = size.as_ref().map(|s| self.expand_size(s)).transpose()?;
                Ok(PrsExpr::Var {
                    id: self.resolve_var(id)?,
                    size,
                })
            }
            PrsExpr::Label(name) => Ok(PrsExpr::Label(*name)),
            PrsExpr::True => Ok(PrsExpr::True),
            PrsExpr::False => Ok(PrsExpr::False),
            PrsExpr::AndLoop(l) => self.expand_expr_loop(Connective::And, l),
            PrsExpr::OrLoop(l) => self.expand_expr_loop(Connective::Or, l),
        }
    }

    fn expand_connective(
        &mut self,
        conn: Connective,
        left: &PrsExpr,
        right: &PrsExpr,
        precharge: Option<&Precharge>,
    ) -> ElabResult<PrsExpr> {
        let left = self.expand_prs_expr(left)?;
        let right = self.expand_prs_expr(right)?;
        let precharge = match precharge {
            Some(p) => Some(Precharge {
                kind: p.kind,
                expr: Box::new(self.expand_prs_expr(&p.expr)?),
            }),
            None => None,
        };
        Ok(conn.fold(left, right, precharge))
    }

    /// Unroll `(&i:lo..hi: body)` or `(|i:lo..hi: body)` into a fold of its
    /// iterations, stopping at the first absorbing value.
    fn expand_expr_loop(&mut self, conn: Connective, l: &LoopExpr) -> ElabResult<PrsExpr> {
        let mut lv = self.loop_scope(l.var)?;
        let Some((lo, hi)) = lv.loop_range(l.var, l.lo.as_ref(), &l.hi)? else {
            return Ok(PrsExpr::constant(conn.identity()));
        };
        let mut acc: Option<PrsExpr> = None;
        for value in lo..=hi {
            lv.set(value);
            let body = lv.expand_prs_expr(&l.body)?;
            let next = match acc.take() {
                Some(prev) => conn.fold(prev, body, None),
                None => body,
            };
            if next.as_bool() == Some(conn.absorbing()) {
                tracing::trace!(var = %lv.name_str(l.var), value, "loop folded early");
                return Ok(next);
            }
            acc = Some(next);
        }
        Ok(acc.unwrap_or_else(|| PrsExpr::constant(conn.identity())))
    }

    /// Evaluate the bounds of a loop over `var`. Returns `None` for an empty
    /// range.
    ///
    /// With an explicit low bound the range is `lo..=hi`; without one it is
    /// `0..hi`.
    pub(crate) fn loop_range(
        &self,
        var: Name,
        lo: Option<&Expr>,
        hi: &Expr,
    ) -> ElabResult<Option<(i64, i64)>> {
        let bound = |e: &Expr| -> ElabResult<i64> {
            self.evaluate_int(e)?.ok_or_else(|| ElabError::LoopBound {
                var: self.name_str(var),
                expr: self.render(e),
                span: self.span,
            })
        };
        let (lo, hi) = match lo {
            Some(lo) => (bound(lo)?, bound(hi)?),
            None => (0, bound(hi)?.saturating_sub(1)),
        };
        if hi < lo {
            return Ok(None);
        }
        let count = i128::from(hi) - i128::from(lo) + 1;
        if count > i128::from(self.options.unroll_limit) {
            return Err(ElabError::UnrollLimit {
                var: self.name_str(var),
                count,
                limit: self.options.unroll_limit,
                span: self.span,
            });
        }
        Ok(Some((lo, hi)))
    }

    /// Reduce every attribute value to a literal.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn expand_attrs(&self, attrs: &[Attr]) -> ElabResult<Vec<Attr>> {
        attrs
            .iter()
            .map(|attr| match self.const_literal(&attr.value)? {
                Some(value) => Ok(Attr {
                    name: attr.name,
                    value,
                }),
                None => Err(ElabError::AttrNotConst {
                    name: self.name_str(attr.name),
                    expr: self.render(&attr.value),
                    span: self.span,
                }),
            })
            .collect()
    }

    /// Reduce width and length to numeric literals.
    pub fn expand_size(&self, size: &SizeSpec) -> ElabResult<SizeSpec> {
        let numeric = |e: &Expr| -> ElabResult<Expr> {
            match self.const_literal(e)? {
                Some(lit @ (Expr::Int(_) | Expr::Real(_))) => Ok(lit),
                _ => Err(ElabError::SizeNotConst {
                    expr: self.render(e),
                    span: self.span,
                }),
            }
        };
        Ok(SizeSpec {
            width: size.width.as_ref().map(&numeric).transpose()?,
            length: size.length.as_ref().map(&numeric).transpose()?,
            flavor: size.flavor,
            subflavor: size.subflavor,
        })
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
