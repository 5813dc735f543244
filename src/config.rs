// ABOUTME: Immutable migration configuration built from validated input and resolved flags
// ABOUTME: Also owns plan derivation and token masking for log output

use std::fmt;

use crate::context::CommandContext;
use crate::error::Result;
use crate::flags::{self, ResolvedFlags};
use crate::schema::{FlagId, FlagValue, FLAG_SCHEMA};
use crate::validate;

/// Rendered in place of tokens too short to partially reveal.
pub const TOKEN_MASK: &str = "****";

/// Migration direction handed to the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    RtToRtfs,
    RtfsToRt,
}

impl Plan {
    pub fn from_direction(migrate_to_rtfs: bool) -> Self {
        if migrate_to_rtfs {
            Plan::RtToRtfs
        } else {
            Plan::RtfsToRt
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Plan::RtToRtfs => "RT_TO_RTFS",
            Plan::RtfsToRt => "RTFS_TO_RT",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the executor needs for one run. Read-only once built.
#[derive(Clone, PartialEq, Eq)]
pub struct MigrationConfiguration {
    url: String,
    token: String,
    plan: Plan,
    flags: ResolvedFlags,
}

impl MigrationConfiguration {
    /// Validate the positionals, derive the plan and resolve flags, in that
    /// order, stopping at the first failure.
    pub fn build(ctx: &dyn CommandContext, migrate_to_rtfs: bool) -> Result<Self> {
        let url = validate::normalize_url(ctx.positional_argument(0).unwrap_or_default())?;
        let token = validate::validate_token(ctx.positional_argument(1).unwrap_or_default())?;
        let plan = Plan::from_direction(migrate_to_rtfs);
        let flags = flags::resolve(ctx)?;

        let config = Self {
            url,
            token,
            plan,
            flags,
        };
        config.log_summary();
        Ok(config)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn plan(&self) -> Plan {
        self.plan
    }

    pub fn flag(&self, id: FlagId) -> FlagValue {
        self.flags.get(id)
    }

    pub fn force(&self) -> bool {
        self.flags.bool(FlagId::Force)
    }

    pub fn parallel_mode(&self) -> bool {
        self.flags.bool(FlagId::Parallel)
    }

    pub fn stateful_run(&self) -> bool {
        self.flags.bool(FlagId::StatefulRun)
    }

    pub fn rtfs_legacy_context_path_mode(&self) -> bool {
        self.flags.bool(FlagId::RtfsLegacyContextPath)
    }

    pub fn verbose_mode(&self) -> bool {
        self.flags.bool(FlagId::HttpVerboseMode)
    }

    pub fn import_batches_size(&self) -> i64 {
        self.flags.int(FlagId::BatchSize)
    }

    pub fn socket_timeout_ms(&self) -> i64 {
        self.flags.int(FlagId::HttpSocketTimeoutMs)
    }

    pub fn max_total_connections(&self) -> i64 {
        self.flags.int(FlagId::HttpMaxTotalConnections)
    }

    pub fn max_connections_per_route(&self) -> i64 {
        self.flags.int(FlagId::HttpMaxConnectionsPerRoute)
    }

    pub fn connection_pool_ttl_sec(&self) -> i64 {
        self.flags.int(FlagId::HttpConnectionPoolTtlSec)
    }

    pub fn retry_count(&self) -> i64 {
        self.flags.int(FlagId::HttpRetryCount)
    }

    pub fn executor_timeout_min(&self) -> i64 {
        self.flags.int(FlagId::ExecutorTimeoutMin)
    }

    pub fn executor_threads(&self) -> i64 {
        self.flags.int(FlagId::ExecutorThreads)
    }

    pub fn masked_token(&self) -> String {
        mask_token(&self.token)
    }

    fn log_summary(&self) {
        tracing::info!("Using plan: {}", self.plan);
        tracing::info!("URL: {}", self.url);
        tracing::info!("Token: {}", self.masked_token());

        tracing::info!("=== Configuration Values ===");
        for spec in FLAG_SCHEMA.iter() {
            tracing::info!("{}: {}", spec.field, self.flag(spec.id));
        }
        tracing::info!("==========================");
    }
}

impl fmt::Debug for MigrationConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MigrationConfiguration")
            .field("url", &self.url)
            .field("token", &self.masked_token())
            .field("plan", &self.plan)
            .field("flags", &self.flags)
            .finish()
    }
}

/// Mask an access token for display.
///
/// Tokens of at most 8 characters are fully hidden; longer ones keep their
/// first and last four characters.
///
/// # Examples
///
/// ```
/// # use federation_migrator::config::mask_token;
/// assert_eq!(mask_token("abcd"), "****");
/// assert_eq!(mask_token("abcdefghijklmnopqrst"), "abcd...qrst");
/// ```
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 8 {
        return TOKEN_MASK.to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
