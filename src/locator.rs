// ABOUTME: Locates the executor artifact inside the plugin resources directory
// ABOUTME: Supports an exact-filename lookup and a recursive prefix/suffix scan

use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{MigrationError, Result};

/// Plugin name the resources directory is keyed by.
pub const PLUGIN_NAME: &str = "federation-migrator";

/// Artifact shipped with the plugin.
pub const ARTIFACT_FILE_NAME: &str = "on-prem-2.0-jar-with-dependencies.jar";

pub const ARTIFACT_PREFIX: &str = "on-prem";
pub const ARTIFACT_SUFFIX: &str = "jar";

/// Overrides `~/.jfrog` as the CLI home directory.
pub const CLI_HOME_ENV: &str = "JFROG_CLI_HOME_DIR";

/// Supplies the directory that plugin-bundled artifacts live in.
pub trait ResourceDirProvider {
    fn resources_dir(&self, plugin: &str) -> Result<PathBuf>;
}

/// Resolves `<cli home>/plugins/<plugin>/resources`, where the CLI home is
/// `$JFROG_CLI_HOME_DIR` or `~/.jfrog`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PluginResources;

impl PluginResources {
    fn cli_home(plugin: &str) -> Result<PathBuf> {
        if let Some(home) = env::var_os(CLI_HOME_ENV).filter(|value| !value.is_empty()) {
            return Ok(PathBuf::from(home));
        }
        let home = dirs::home_dir().ok_or_else(|| MigrationError::ResourceDirUnresolved {
            plugin: plugin.to_string(),
            reason: "could not determine home directory".to_string(),
        })?;
        Ok(home.join(".jfrog"))
    }
}

impl ResourceDirProvider for PluginResources {
    fn resources_dir(&self, plugin: &str) -> Result<PathBuf> {
        Ok(Self::cli_home(plugin)?
            .join("plugins")
            .join(plugin)
            .join("resources"))
    }
}

/// A directory given explicitly, for example on the command line.
#[derive(Debug, Clone)]
pub struct FixedResourceDir(pub PathBuf);

impl ResourceDirProvider for FixedResourceDir {
    fn resources_dir(&self, _plugin: &str) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// How the artifact is recognised inside the resources directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactMatcher {
    /// `<dir>/<name>` must exist. Cannot be ambiguous.
    Exact(String),
    /// Any file below `<dir>` whose name has this prefix and suffix.
    /// Zero or several matches are both errors.
    PrefixSuffix { prefix: String, suffix: String },
}

impl ArtifactMatcher {
    pub fn bundled() -> Self {
        ArtifactMatcher::Exact(ARTIFACT_FILE_NAME.to_string())
    }

    pub fn scan() -> Self {
        ArtifactMatcher::PrefixSuffix {
            prefix: ARTIFACT_PREFIX.to_string(),
            suffix: ARTIFACT_SUFFIX.to_string(),
        }
    }

    fn matches(&self, file_name: &str) -> bool {
        match self {
            ArtifactMatcher::Exact(name) => file_name == name,
            ArtifactMatcher::PrefixSuffix { prefix, suffix } => {
                file_name.starts_with(prefix.as_str()) && file_name.ends_with(suffix.as_str())
            }
        }
    }
}

impl Default for ArtifactMatcher {
    fn default() -> Self {
        Self::bundled()
    }
}

/// Absolute path of the located artifact.
///
/// Always valid UTF-8, so the executor receives exactly the file that was
/// found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutorArtifact(String);

impl ExecutorArtifact {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl TryFrom<PathBuf> for ExecutorArtifact {
    type Error = MigrationError;

    fn try_from(path: PathBuf) -> Result<Self> {
        path.into_os_string()
            .into_string()
            .map(ExecutorArtifact)
            .map_err(|raw| MigrationError::ArtifactPathNotUtf8 {
                path: PathBuf::from(raw),
            })
    }
}

impl fmt::Display for ExecutorArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for ArtifactMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactMatcher::Exact(name) => write!(f, "{name}"),
            ArtifactMatcher::PrefixSuffix { prefix, suffix } => write!(f, "{prefix}*{suffix}"),
        }
    }
}

/// Find the single executor artifact for `plugin`.
///
/// # Errors
///
/// - `ResourceDirUnresolved` if the provider cannot produce a directory
/// - `ResourceDirAccessError` if the directory cannot be inspected or is
///   not a directory
/// - `ResourceDirNotFound` if it does not exist
/// - `ArtifactNotFound` / `AmbiguousArtifact` if zero or, when scanning,
///   several files match
/// - `ArtifactPathNotUtf8` if the match cannot be passed on unchanged
pub fn locate(
    provider: &dyn ResourceDirProvider,
    plugin: &str,
    matcher: &ArtifactMatcher,
) -> Result<ExecutorArtifact> {
    let dir = provider.resources_dir(plugin)?;

    match dir.try_exists() {
        Ok(true) => {}
        Ok(false) => return Err(MigrationError::ResourceDirNotFound { dir }),
        Err(source) => return Err(MigrationError::ResourceDirAccessError { dir, source }),
    }
    if !dir.is_dir() {
        return Err(MigrationError::ResourceDirAccessError {
            dir,
            source: io::Error::from(io::ErrorKind::NotADirectory),
        });
    }

    let artifact = match matcher {
        ArtifactMatcher::Exact(name) => find_exact(&dir, name)?,
        ArtifactMatcher::PrefixSuffix { .. } => find_by_scan(&dir, matcher)?,
    };

    let artifact = std::path::absolute(&artifact)
        .map_err(|source| MigrationError::ResourceDirAccessError { dir, source })?;
    ExecutorArtifact::try_from(artifact)
}

fn find_exact(dir: &Path, name: &str) -> Result<PathBuf> {
    let path = dir.join(name);
    match fs::metadata(&path) {
        Ok(meta) if meta.is_file() => Ok(path),
        Ok(_) => Err(not_found(dir, name)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Err(not_found(dir, name)),
        Err(source) => Err(MigrationError::ResourceDirAccessError { dir: path, source }),
    }
}

fn find_by_scan(dir: &Path, matcher: &ArtifactMatcher) -> Result<PathBuf> {
    let mut found = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|err| MigrationError::ResourceDirAccessError {
            dir: err
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf()),
            source: err.into(),
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(|name| matcher.matches(name)) {
            found.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} artifact candidate(s) in {}", found.len(), dir.display());

    match found.len() {
        0 => Err(not_found(dir, matcher)),
        1 => Ok(found.remove(0)),
        count => {
            for path in &found {
                tracing::error!("Candidate artifact: {}", path.display());
            }
            Err(MigrationError::AmbiguousArtifact {
                count,
                dir: dir.to_path_buf(),
            })
        }
    }
}

fn not_found(dir: &Path, expected: impl fmt::Display) -> MigrationError {
    MigrationError::ArtifactNotFound {
        dir: dir.to_path_buf(),
        expected: expected.to_string(),
    }
}
