use hdl_eval::Evaluator;
use hdl_ir::Chp;

use crate::Elaborator;

impl<E: Evaluator + ?Sized> Elaborator<'_, E> {
    /// CHP bodies are carried through elaboration unchanged.
    pub fn expand_chp(&self, chp: &Chp) -> Chp {
        tracing::debug!(stmts = chp.stmts.len(), "passing CHP body through");
        chp.clone()
    }
}
