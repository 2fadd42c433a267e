//! HDL elaboration core.
//!
//! Turns parameterised, symbolic declarations into concrete ones:
//! - array types with expression bounds become integer ranges
//! - production-rule trees are unrolled and constant-folded, with every
//!   identifier resolved and every annotation reduced to a literal
//! - array expressions can be walked element by element
//!
//! Expression evaluation, scopes and namespaces come from `hdl_eval`.

mod array;
mod chp;
pub mod driver;
mod elaborator;
mod error;
mod flatten;
mod fold;
mod guard;
mod options;
mod prs;
mod stack;

pub use driver::{elaborate_batch, elaborate_unit, ElaboratedUnit, Unit};
pub use elaborator::Elaborator;
pub use error::{ElabError, ElabResult, ErrorKind};
pub use flatten::{ExprFlattener, FlatItem};
pub use fold::Connective;
pub use guard::LoopScope;
pub use options::{ElabOptions, UNROLL_LIMIT_VAR};
pub use stack::ensure_sufficient_stack;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing unless `RUST_LOG` is set, and only runs once per process.
/// Enable with `RUST_LOG=hdl_elab=debug` or `RUST_LOG=hdl_elab=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}
