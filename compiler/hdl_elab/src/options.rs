//! Elaboration settings.

/// Environment variable overriding [`ElabOptions::unroll_limit`].
pub const UNROLL_LIMIT_VAR: &str = "HDL_UNROLL_LIMIT";

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct ElabOptions {
    /// Most iterations a single loop may unroll to.
    pub unroll_limit: u64,
}

impl ElabOptions {
    pub const DEFAULT_UNROLL_LIMIT: u64 = 1 << 20;

    /// Defaults, overridden by `HDL_UNROLL_LIMIT` when it is set.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(UNROLL_LIMIT_VAR).ok().as_deref())
    }

    pub(crate) fn from_env_value(value: Option<&str>) -> Self {
        let mut options = Self::default();
        if let Some(raw) = value {
            match raw.trim().parse::<u64>() {
                Ok(limit) => options.unroll_limit = limit,
                Err(_) => tracing::warn!(
                    value = raw,
                    default = options.unroll_limit,
                    "ignoring unparseable {UNROLL_LIMIT_VAR}"
                ),
            }
        }
        options
    }

    #[must_use]
    pub fn with_unroll_limit(mut self, limit: u64) -> Self {
        self.unroll_limit = limit;
        self
    }
}

impl Default for ElabOptions {
    fn default() -> Self {
        ElabOptions {
            unroll_limit: Self::DEFAULT_UNROLL_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests;
