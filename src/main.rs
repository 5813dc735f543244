// ABOUTME: CLI entry point for federation-migrator
// ABOUTME: Parses commands, sets up logging and routes to the migration pipeline

use clap::FromArgMatches;
use federation_migrator::cli::{self, GlobalArgs, MIGRATE_RT, MIGRATE_RTFS};
use federation_migrator::commands;
use federation_migrator::context::MatchesContext;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = cli::new().get_matches();
    let Some((name, sub_matches)) = matches.subcommand() else {
        anyhow::bail!("No command given");
    };
    let globals = GlobalArgs::from_arg_matches(sub_matches).unwrap_or_else(|err| err.exit());

    // Initialize logging
    // 1. RUST_LOG environment variable has highest precedence
    // 2. --log flag (or FEDERATION_MIGRATOR_LOG) is used if RUST_LOG is not set
    // 3. Default to "info" if neither are provided
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&globals.log));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let settings = globals.executor_settings();
    let ctx = MatchesContext::new(sub_matches);

    match name {
        MIGRATE_RTFS => commands::migrate_to_rtfs(&ctx, &settings).await?,
        MIGRATE_RT => commands::migrate_to_rt(&ctx, &settings).await?,
        other => anyhow::bail!("Unknown command: {}", other),
    };
    Ok(())
}
