// ABOUTME: Resolves optional migration flags against their declared defaults
// ABOUTME: Total over the flag schema; one bad integer aborts the whole resolution

use crate::context::CommandContext;
use crate::error::Result;
use crate::schema::{FlagId, FlagValue, FLAG_COUNT, FLAG_SCHEMA};

/// Typed value for every declared flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFlags {
    values: [FlagValue; FLAG_COUNT],
}

impl ResolvedFlags {
    /// Every flag at its declared default.
    pub fn defaults() -> Self {
        Self {
            values: std::array::from_fn(|idx| FLAG_SCHEMA[idx].default),
        }
    }

    pub fn get(&self, id: FlagId) -> FlagValue {
        self.values[id as usize]
    }

    pub fn bool(&self, id: FlagId) -> bool {
        matches!(self.get(id), FlagValue::Bool(true))
    }

    pub fn int(&self, id: FlagId) -> i64 {
        match self.get(id) {
            FlagValue::Int(value) => value,
            FlagValue::Bool(_) => 0,
        }
    }
}

/// Resolve every declared flag from the context.
///
/// Flags the user did not set keep their default. Integer values are passed
/// through verbatim, negative ones included; the executor owns range checks.
pub fn resolve(ctx: &dyn CommandContext) -> Result<ResolvedFlags> {
    let mut resolved = ResolvedFlags::defaults();

    for spec in FLAG_SCHEMA.iter() {
        if !ctx.is_flag_set(spec.name) {
            continue;
        }
        let value = if spec.default.is_bool() {
            FlagValue::Bool(ctx.bool_flag(spec.name))
        } else {
            FlagValue::Int(ctx.int_flag(spec.name)?)
        };
        tracing::debug!("Flag {} set to {}", spec.name, value);
        resolved.values[spec.id as usize] = value;
    }

    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::InMemoryContext;
    use crate::error::MigrationError;

    fn ctx() -> InMemoryContext {
        InMemoryContext::new(["http://localhost:8081", "token"])
    }

    #[test]
    fn test_nothing_set_yields_defaults() {
        let resolved = resolve(&ctx()).unwrap();
        assert_eq!(resolved, ResolvedFlags::defaults());
        assert_eq!(resolved.int(FlagId::BatchSize), 250);
        assert_eq!(resolved.int(FlagId::HttpSocketTimeoutMs), 1_800_000);
        assert!(!resolved.bool(FlagId::Force));
    }

    #[test]
    fn test_explicit_values_win() {
        let ctx = ctx()
            .with_switch("force")
            .with_switch("http-verbose-mode")
            .with_flag("batch-size", "1000")
            .with_flag("executor-threads", "8");
        let resolved = resolve(&ctx).unwrap();
        assert!(resolved.bool(FlagId::Force));
        assert!(resolved.bool(FlagId::HttpVerboseMode));
        assert!(!resolved.bool(FlagId::Parallel));
        assert_eq!(resolved.int(FlagId::BatchSize), 1000);
        assert_eq!(resolved.int(FlagId::ExecutorThreads), 8);
        assert_eq!(resolved.int(FlagId::HttpRetryCount), 5);
    }

    #[test]
    fn test_negative_values_pass_through() {
        let resolved = resolve(&ctx().with_flag("batch-size", "-3")).unwrap();
        assert_eq!(resolved.int(FlagId::BatchSize), -3);
    }

    #[test]
    fn test_bad_integer_aborts() {
        let ctx = ctx()
            .with_flag("batch-size", "100")
            .with_flag("http-retry-count", "five");
        let err = resolve(&ctx).unwrap_err();
        match err {
            MigrationError::InvalidFlagValue { flag, .. } => assert_eq!(flag, "http-retry-count"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
