// ABOUTME: Declared migration flags: name, kind, default and executor short code
// ABOUTME: Single table consulted by the CLI, the flag resolver and the command serializer

use std::fmt;

/// Identifies one declared flag.
///
/// Discriminants are the flag's position in [`FLAG_SCHEMA`], which is also
/// the order the flags are rendered on the executor command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FlagId {
    Force = 0,
    Parallel = 1,
    BatchSize = 2,
    HttpSocketTimeoutMs = 3,
    HttpMaxTotalConnections = 4,
    HttpMaxConnectionsPerRoute = 5,
    HttpConnectionPoolTtlSec = 6,
    HttpRetryCount = 7,
    ExecutorTimeoutMin = 8,
    ExecutorThreads = 9,
    StatefulRun = 10,
    RtfsLegacyContextPath = 11,
    HttpVerboseMode = 12,
}

impl FlagId {
    pub fn spec(self) -> &'static FlagSpec {
        &FLAG_SCHEMA[self as usize]
    }
}

/// A typed flag value. The variant doubles as the flag's kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Int(i64),
}

impl FlagValue {
    pub fn is_bool(&self) -> bool {
        matches!(self, FlagValue::Bool(_))
    }
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(value) => write!(f, "{value}"),
            FlagValue::Int(value) => write!(f, "{value}"),
        }
    }
}

#[derive(Debug)]
pub struct FlagSpec {
    pub id: FlagId,
    /// Long option name on the command line.
    pub name: &'static str,
    /// Configuration field name, used in the logged summary.
    pub field: &'static str,
    pub default: FlagValue,
    /// Short code understood by the executor.
    pub code: &'static str,
    pub help: &'static str,
}

/// Number of declared flags.
pub const FLAG_COUNT: usize = 13;

pub static FLAG_SCHEMA: [FlagSpec; FLAG_COUNT] = [
    FlagSpec {
        id: FlagId::Force,
        name: "force",
        field: "force",
        default: FlagValue::Bool(false),
        code: "-f",
        help: "Force a migration without properly processing all events from queues",
    },
    FlagSpec {
        id: FlagId::Parallel,
        name: "parallel",
        field: "parallel_mode",
        default: FlagValue::Bool(false),
        code: "-p",
        help: "Enable parallel mode for faster queue migration",
    },
    FlagSpec {
        id: FlagId::BatchSize,
        name: "batch-size",
        field: "import_batches_size",
        default: FlagValue::Int(250),
        code: "-bs",
        help: "Batch size for RTFS import operations, larger sizes may cause performance issues",
    },
    FlagSpec {
        id: FlagId::HttpSocketTimeoutMs,
        name: "http-socket-timeout-ms",
        field: "socket_timeout_ms",
        // 30 minutes
        default: FlagValue::Int(30 * 60 * 1000),
        code: "-hst",
        help: "Socket timeout in milliseconds",
    },
    FlagSpec {
        id: FlagId::HttpMaxTotalConnections,
        name: "http-max-total-connections",
        field: "max_total_connections",
        default: FlagValue::Int(200),
        code: "-htc",
        help: "Maximum total HTTP client connections",
    },
    FlagSpec {
        id: FlagId::HttpMaxConnectionsPerRoute,
        name: "http-max-connections-per-route",
        field: "max_connections_per_route",
        default: FlagValue::Int(200),
        code: "-hcr",
        help: "Maximum HTTP client connections per route",
    },
    FlagSpec {
        id: FlagId::HttpConnectionPoolTtlSec,
        name: "http-connection-pool-ttl-sec",
        field: "connection_pool_ttl_sec",
        default: FlagValue::Int(60),
        code: "-hpt",
        help: "HTTP client connection pool TTL in seconds",
    },
    FlagSpec {
        id: FlagId::HttpRetryCount,
        name: "http-retry-count",
        field: "retry_count",
        default: FlagValue::Int(5),
        code: "-hrc",
        help: "HTTP client retry count",
    },
    FlagSpec {
        id: FlagId::ExecutorTimeoutMin,
        name: "executor-timeout-min",
        field: "executor_timeout_min",
        default: FlagValue::Int(120),
        code: "-etm",
        help: "Executor timeout in minutes",
    },
    FlagSpec {
        id: FlagId::ExecutorThreads,
        name: "executor-threads",
        field: "executor_threads",
        default: FlagValue::Int(200),
        code: "-et",
        help: "Number of executor threads",
    },
    FlagSpec {
        id: FlagId::StatefulRun,
        name: "stateful-run",
        field: "stateful_run",
        default: FlagValue::Bool(false),
        code: "-sr",
        help: "Enable stateful run that will migrate members that were not migrated in the previous run",
    },
    FlagSpec {
        id: FlagId::RtfsLegacyContextPath,
        name: "rtfs-legacy-context-path",
        field: "rtfs_legacy_context_path_mode",
        default: FlagValue::Bool(false),
        code: "-rlcp",
        help: "Use the legacy context path for RTFS, including the '/artifactory/service' prefix",
    },
    FlagSpec {
        id: FlagId::HttpVerboseMode,
        name: "http-verbose-mode",
        field: "verbose_mode",
        default: FlagValue::Bool(false),
        code: "-hvm",
        help: "Enable verbose HTTP client mode",
    },
];

/// Look up a declared flag by its long option name.
pub fn lookup(name: &str) -> Option<&'static FlagSpec> {
    FLAG_SCHEMA.iter().find(|spec| spec.name == name)
}
