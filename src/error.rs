// ABOUTME: Error taxonomy for the migration pipeline
// ABOUTME: Every variant is terminal for the invocation that produced it

use std::num::ParseIntError;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

pub type Result<T, E = MigrationError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Need to provide two arguments while provided {count}")]
    MissingArgumentCount { count: usize },

    #[error("need to provide url")]
    EmptyUrl,

    #[error("no token provided")]
    EmptyToken,

    #[error("invalid {flag} value: {value:?} ({source})")]
    InvalidFlagValue {
        flag: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The plugin resource resolver could not produce a directory at all.
    #[error("Failed to resolve resources directory for plugin {plugin}: {reason}")]
    ResourceDirUnresolved { plugin: String, reason: String },

    #[error("Failed to check if dir {} exists: {source}", dir.display())]
    ResourceDirAccessError {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dir {} doesn't exist", dir.display())]
    ResourceDirNotFound { dir: PathBuf },

    #[error("No executor artifact matching {expected} found in {}", dir.display())]
    ArtifactNotFound { dir: PathBuf, expected: String },

    #[error(
        "Found {count} executor artifacts in {}, expected exactly one",
        dir.display()
    )]
    AmbiguousArtifact { count: usize, dir: PathBuf },

    #[error("Executor artifact path {} is not valid UTF-8", path.display())]
    ArtifactPathNotUtf8 { path: PathBuf },

    #[error("Failed to launch {program}: {source}")]
    ExecutorLaunchFailure {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// `output` is the combined output captured before the exit.
    #[error("{program} exited with {status}")]
    ExecutorNonZeroExit {
        program: String,
        status: ExitStatus,
        output: String,
    },
}
