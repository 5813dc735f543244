// ABOUTME: The migrate_rtfs / migrate_rt pipeline: validate, configure, locate, serialize, run
// ABOUTME: Strictly sequential; fails fast before touching the filesystem or spawning anything

use std::path::PathBuf;

use crate::config::MigrationConfiguration;
use crate::context::CommandContext;
use crate::error::Result;
use crate::locator::{
    self, ArtifactMatcher, ExecutorArtifact, FixedResourceDir, PluginResources, PLUGIN_NAME,
};
use crate::runner;
use crate::serialize;
use crate::validate;

/// Program that runs the executor artifact.
pub const DEFAULT_LAUNCHER: &str = "java";

/// Where the executor comes from and how it is launched.
#[derive(Debug, Clone)]
pub struct ExecutorSettings {
    pub launcher: String,
    /// Explicit resources directory; the plugin resources directory otherwise.
    pub resources_dir: Option<PathBuf>,
    pub matcher: ArtifactMatcher,
}

impl Default for ExecutorSettings {
    fn default() -> Self {
        Self {
            launcher: DEFAULT_LAUNCHER.to_string(),
            resources_dir: None,
            matcher: ArtifactMatcher::default(),
        }
    }
}

impl ExecutorSettings {
    fn locate_artifact(&self) -> Result<ExecutorArtifact> {
        match &self.resources_dir {
            Some(dir) => locator::locate(&FixedResourceDir(dir.clone()), PLUGIN_NAME, &self.matcher),
            None => locator::locate(&PluginResources, PLUGIN_NAME, &self.matcher),
        }
    }
}

/// Migrate the legacy federation to RTFS.
pub async fn migrate_to_rtfs(ctx: &dyn CommandContext, settings: &ExecutorSettings) -> Result<String> {
    migrate(ctx, true, settings).await
}

/// Roll back from RTFS to the legacy federation.
pub async fn migrate_to_rt(ctx: &dyn CommandContext, settings: &ExecutorSettings) -> Result<String> {
    migrate(ctx, false, settings).await
}

/// Run one migration and return the executor's combined output.
///
/// The output is logged whether or not the executor succeeded; on a
/// non-zero exit it is also carried by the returned error.
pub async fn migrate(
    ctx: &dyn CommandContext,
    migrate_to_rtfs: bool,
    settings: &ExecutorSettings,
) -> Result<String> {
    validate::check_argument_count(ctx)?;

    let config = MigrationConfiguration::build(ctx, migrate_to_rtfs).inspect_err(|err| {
        tracing::error!("Failed to prepare configuration: {}", err);
    })?;

    let artifact = settings.locate_artifact().inspect_err(|err| {
        tracing::error!("Failed to get migration JAR file: {}", err);
    })?;
    tracing::info!("Using JAR file: {}", artifact);

    let args = serialize::executor_args(&artifact, &config);
    tracing::info!(
        "Executing command: {}",
        serialize::display_command(&settings.launcher, &args, &config)
    );

    let outcome = runner::run(&settings.launcher, &args).await;
    tracing::info!("Command output:\n{}", outcome.output);

    match &outcome.result {
        Ok(()) => tracing::info!("Command executed successfully"),
        Err(err) => tracing::error!("Command execution failed: {}", err),
    }
    outcome.into_result()
}
