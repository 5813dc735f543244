// ABOUTME: clap command definitions for the migration commands
// ABOUTME: Migration flags are generated from the flag schema so help and serializer agree

use std::path::PathBuf;

use clap::{Arg, ArgAction, Args, Command};

use crate::commands::migrate::{ExecutorSettings, DEFAULT_LAUNCHER};
use crate::context::POSITIONAL_ARGS;
use crate::locator::ArtifactMatcher;
use crate::schema::{FlagSpec, FlagValue, FLAG_SCHEMA};

pub const MIGRATE_RTFS: &str = "migrate_rtfs";
pub const MIGRATE_RT: &str = "migrate_rt";

/// Options shared by every migration command.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Set the log level (error, warn, info, debug, trace)
    #[arg(
        long,
        global = true,
        env = "FEDERATION_MIGRATOR_LOG",
        default_value = "info",
        value_name = "FILTER"
    )]
    pub log: String,
    /// Program used to run the migration JAR
    #[arg(
        long,
        global = true,
        env = "FEDERATION_MIGRATOR_JAVA",
        default_value = DEFAULT_LAUNCHER,
        value_name = "PROGRAM"
    )]
    pub java: String,
    /// Directory holding the migration JAR (defaults to the plugin resources directory)
    #[arg(
        long = "resources-dir",
        global = true,
        env = "FEDERATION_MIGRATOR_RESOURCES_DIR",
        value_name = "DIR"
    )]
    pub resources_dir: Option<PathBuf>,
    /// Search the resources directory recursively for a single on-prem*jar file
    #[arg(long = "artifact-scan", global = true)]
    pub artifact_scan: bool,
}

impl GlobalArgs {
    pub fn executor_settings(&self) -> ExecutorSettings {
        let matcher = if self.artifact_scan {
            ArtifactMatcher::scan()
        } else {
            ArtifactMatcher::bundled()
        };

        ExecutorSettings {
            launcher: self.java.clone(),
            resources_dir: self.resources_dir.clone(),
            matcher,
        }
    }
}

pub fn new() -> Command {
    let command = Command::new(env!("CARGO_PKG_NAME"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true);

    GlobalArgs::augment_args(command)
        .subcommand(migration_command(
            MIGRATE_RTFS,
            "mi_rtfs",
            "Migrate Legacy federation to rtfs",
        ))
        .subcommand(migration_command(
            MIGRATE_RT,
            "mi_rt",
            "Migrate rtfs to legacy federation",
        ))
}

/// Tokens starting with `-` are taken as options; pass them after `--`.
fn migration_command(name: &'static str, alias: &'static str, about: &'static str) -> Command {
    let command = Command::new(name).visible_alias(alias).about(about).arg(
        Arg::new(POSITIONAL_ARGS)
            .value_name("URL TOKEN")
            .num_args(1..)
            .help("The base url without /artifactory, then the access token to use"),
    );

    FLAG_SCHEMA
        .iter()
        .fold(command, |command, spec| command.arg(flag_arg(spec)))
}

fn flag_arg(spec: &'static FlagSpec) -> Arg {
    let arg = Arg::new(spec.name).long(spec.name).help(spec.help);
    match spec.default {
        FlagValue::Bool(_) => arg.action(ArgAction::SetTrue),
        // kept as raw strings; the flag resolver does the parsing
        FlagValue::Int(default) => arg
            .value_name("N")
            .default_value(default.to_string())
            .allow_negative_numbers(true),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{ArgMatches, FromArgMatches};
    use crate::config::{MigrationConfiguration, Plan};
    use crate::context::{CommandContext, MatchesContext};
    use crate::error::MigrationError;

    fn sub_matches(argv: &[&str]) -> ArgMatches {
        let matches = new().try_get_matches_from(argv).unwrap();
        let (_, sub) = matches.subcommand().unwrap();
        sub.clone()
    }

    #[test]
    fn test_command_is_valid() {
        new().debug_assert();
    }

    #[test]
    fn test_positionals_and_defaults() {
        let sub = sub_matches(&["federation-migrator", "migrate_rtfs", "http://h/artifactory", "tok"]);
        let ctx = MatchesContext::new(&sub);
        assert_eq!(ctx.argument_count(), 2);
        assert!(!ctx.is_flag_set("batch-size"));
        assert!(!ctx.is_flag_set("force"));

        let config = MigrationConfiguration::build(&ctx, true).unwrap();
        assert_eq!(config.url(), "http://h");
        assert_eq!(config.plan(), Plan::RtToRtfs);
        assert_eq!(config.import_batches_size(), 250);
    }

    #[test]
    fn test_flags_after_positionals() {
        let sub = sub_matches(&[
            "federation-migrator",
            "mi_rt",
            "http://h",
            "tok",
            "--force",
            "--batch-size",
            "1000",
            "--executor-threads=-4",
        ]);
        let ctx = MatchesContext::new(&sub);
        assert!(ctx.is_flag_set("force"));
        assert!(ctx.is_flag_set("batch-size"));

        let config = MigrationConfiguration::build(&ctx, false).unwrap();
        assert!(config.force());
        assert_eq!(config.import_batches_size(), 1000);
        assert_eq!(config.executor_threads(), -4);
    }

    #[test]
    fn test_bad_integer_reaches_resolver() {
        let sub = sub_matches(&["federation-migrator", "migrate_rt", "http://h", "tok", "--http-retry-count", "many"]);
        let ctx = MatchesContext::new(&sub);
        let err = MigrationConfiguration::build(&ctx, false).unwrap_err();
        assert!(matches!(err, MigrationError::InvalidFlagValue { .. }));
    }

    #[test]
    fn test_argument_count_left_to_pipeline() {
        let sub = sub_matches(&["federation-migrator", "migrate_rt", "http://h"]);
        assert_eq!(MatchesContext::new(&sub).argument_count(), 1);
    }

    #[test]
    fn test_executor_settings() {
        let sub = sub_matches(&[
            "federation-migrator",
            "migrate_rtfs",
            "--java",
            "/usr/lib/jvm/bin/java",
            "--resources-dir",
            "/tmp/res",
            "--artifact-scan",
            "http://h",
            "tok",
        ]);
        let settings = GlobalArgs::from_arg_matches(&sub).unwrap().executor_settings();
        assert_eq!(settings.launcher, "/usr/lib/jvm/bin/java");
        assert_eq!(settings.resources_dir, Some(PathBuf::from("/tmp/res")));
        assert_eq!(settings.matcher, ArtifactMatcher::scan());
    }

    #[test]
    fn test_global_defaults() {
        let sub = sub_matches(&["federation-migrator", "migrate_rt", "http://h", "tok"]);
        let globals = GlobalArgs::from_arg_matches(&sub).unwrap();
        assert_eq!(globals.log, "info");
        assert_eq!(globals.java, DEFAULT_LAUNCHER);
        assert_eq!(globals.resources_dir, None);
        assert!(!globals.artifact_scan);
        assert_eq!(globals.executor_settings().matcher, ArtifactMatcher::bundled());
    }

    #[test]
    fn test_global_log_before_subcommand() {
        let sub = sub_matches(&["federation-migrator", "--log", "debug", "migrate_rt", "http://h", "tok"]);
        assert_eq!(GlobalArgs::from_arg_matches(&sub).unwrap().log, "debug");
    }

    #[test]
    fn test_hyphen_token_needs_separator() {
        let argv = ["federation-migrator", "migrate_rtfs", "http://h", "-tok"];
        assert!(new().try_get_matches_from(argv).is_err());

        let sub = sub_matches(&["federation-migrator", "migrate_rtfs", "--force", "--", "http://h", "-tok"]);
        let ctx = MatchesContext::new(&sub);
        assert_eq!(ctx.positional_argument(1), Some("-tok"));
        assert!(ctx.is_flag_set("force"));
    }
}
