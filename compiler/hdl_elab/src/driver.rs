//! Batch elaboration.
//!
//! Units are elaborated in order. The first error aborts the rest of the
//! batch and comes back as a [`Diagnostic`]; the caller stays alive to
//! report it.

use hdl_diagnostic::Diagnostic;
use hdl_eval::{Evaluator, Namespace, Scope};
use hdl_ir::{Chp, Name, PrsBlock, RangeSet};

use crate::{ElabError, ElabOptions, ElabResult, Elaborator};

/// One compilation unit: a process with its parameters, signals and
/// bodies.
#[derive(Clone, Debug)]
pub struct Unit {
    pub name: String,
    pub ns: Namespace,
    /// Instance parameters.
    pub scope: Scope,
    /// Signal declarations with their symbolic array types.
    pub signals: Vec<(Name, Option<RangeSet>)>,
    pub prs: PrsBlock,
    pub chp: Chp,
}

/// A fully elaborated unit. Its namespace holds the expanded signal types.
#[derive(Clone, Debug)]
pub struct ElaboratedUnit {
    pub name: String,
    pub ns: Namespace,
    pub prs: PrsBlock,
    pub chp: Chp,
}

/// Elaborate `units` in order, stopping at the first error.
#[tracing::instrument(level = "debug", skip_all, fields(units = units.len()))]
pub fn elaborate_batch<E: Evaluator + ?Sized>(
    units: Vec<Unit>,
    eval: &E,
    options: ElabOptions,
) -> Result<Vec<ElaboratedUnit>, Diagnostic> {
    let mut done = Vec::with_capacity(units.len());
    for unit in units {
        let name = unit.name.clone();
        match elaborate_unit(unit, eval, options) {
            Ok(elaborated) => done.push(elaborated),
            Err(err) => {
                if err.is_internal() {
                    tracing::error!(unit = %name, error = %err, "internal compiler error");
                } else {
                    tracing::error!(unit = %name, error = %err, "elaboration failed");
                }
                return Err(err
                    .to_diagnostic()
                    .with_note(format!("in unit `{name}`")));
            }
        }
    }
    Ok(done)
}

/// Expand a unit's signal types, then its production rules, then pass its
/// CHP body through.
pub fn elaborate_unit<E: Evaluator + ?Sized>(
    unit: Unit,
    eval: &E,
    options: ElabOptions,
) -> ElabResult<ElaboratedUnit> {
    let Unit {
        name,
        mut ns,
        mut scope,
        signals,
        prs,
        chp,
    } = unit;
    tracing::debug!(unit = %name, "elaborating");

    for (signal, ty) in signals {
        let expanded = match ty {
            Some(ty) => Some(
                Elaborator::new(&ns, &mut scope, eval)
                    .with_options(options)
                    .expand_array(&ty, false)?,
            ),
            None => None,
        };
        ns.declare_signal(signal, expanded)
            .map_err(|source| ElabError::Eval {
                source,
                span: hdl_ir::Span::DUMMY,
            })?;
    }

    let mut elab = Elaborator::new(&ns, &mut scope, eval).with_options(options);
    let prs = elab.expand_prs_block(&prs)?;
    let chp = elab.expand_chp(&chp);

    Ok(ElaboratedUnit { name, ns, prs, chp })
}
