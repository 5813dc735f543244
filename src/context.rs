// ABOUTME: Capability interface over the raw positionals and flags of one invocation
// ABOUTME: Implemented for clap matches and for an in-memory context used by tests

use std::collections::HashMap;

use clap::parser::ValueSource;
use clap::ArgMatches;

use crate::error::{MigrationError, Result};
use crate::schema::{self, FlagValue};

/// Id of the positional argument list in the clap command definition.
pub const POSITIONAL_ARGS: &str = "args";

/// Raw user input for one migration command.
///
/// The pipeline only talks to this trait, so it can run without any
/// command-line parser behind it.
pub trait CommandContext {
    fn argument_count(&self) -> usize;

    fn positional_argument(&self, index: usize) -> Option<&str>;

    /// True when the user supplied the flag explicitly (command line or
    /// environment), false when it would fall back to its default.
    fn is_flag_set(&self, name: &str) -> bool;

    fn bool_flag(&self, name: &str) -> bool;

    /// Raw string value of a valued flag, if any.
    fn flag_value(&self, name: &str) -> Option<String>;

    /// Parse an integer flag. An absent value yields the declared default.
    fn int_flag(&self, name: &str) -> Result<i64> {
        match self.flag_value(name) {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|source| MigrationError::InvalidFlagValue {
                    flag: name.to_string(),
                    value: raw,
                    source,
                }),
            None => match schema::lookup(name).map(|spec| spec.default) {
                Some(FlagValue::Int(default)) => Ok(default),
                _ => Ok(0),
            },
        }
    }
}

/// [`CommandContext`] backed by the matches of one migration subcommand.
pub struct MatchesContext<'a> {
    matches: &'a ArgMatches,
    args: Vec<String>,
}

impl<'a> MatchesContext<'a> {
    pub fn new(matches: &'a ArgMatches) -> Self {
        let args = matches
            .try_get_many::<String>(POSITIONAL_ARGS)
            .ok()
            .flatten()
            .map(|values| values.cloned().collect())
            .unwrap_or_default();
        Self { matches, args }
    }
}

impl CommandContext for MatchesContext<'_> {
    fn argument_count(&self) -> usize {
        self.args.len()
    }

    fn positional_argument(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    fn is_flag_set(&self, name: &str) -> bool {
        // value_source panics on ids the command never declared
        if schema::lookup(name).is_none() {
            return false;
        }
        matches!(
            self.matches.value_source(name),
            Some(ValueSource::CommandLine | ValueSource::EnvVariable)
        )
    }

    fn bool_flag(&self, name: &str) -> bool {
        self.matches
            .try_get_one::<bool>(name)
            .ok()
            .flatten()
            .copied()
            .unwrap_or(false)
    }

    fn flag_value(&self, name: &str) -> Option<String> {
        self.matches.try_get_one::<String>(name).ok().flatten().cloned()
    }
}

/// In-memory [`CommandContext`], for driving the pipeline without clap.
#[derive(Debug, Clone, Default)]
pub struct InMemoryContext {
    args: Vec<String>,
    flags: HashMap<String, String>,
}

impl InMemoryContext {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            flags: HashMap::new(),
        }
    }

    /// Set a valued flag.
    pub fn with_flag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.flags.insert(name.into(), value.into());
        self
    }

    /// Turn on a boolean flag.
    pub fn with_switch(self, name: impl Into<String>) -> Self {
        self.with_flag(name, "true")
    }
}

impl CommandContext for InMemoryContext {
    fn argument_count(&self) -> usize {
        self.args.len()
    }

    fn positional_argument(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(String::as_str)
    }

    fn is_flag_set(&self, name: &str) -> bool {
        self.flags.contains_key(name)
    }

    fn bool_flag(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .map(|value| value != "false")
            .unwrap_or(false)
    }

    fn flag_value(&self, name: &str) -> Option<String> {
        self.flags.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_positionals() {
        let ctx = InMemoryContext::new(["http://host", "secret"]);
        assert_eq!(ctx.argument_count(), 2);
        assert_eq!(ctx.positional_argument(0), Some("http://host"));
        assert_eq!(ctx.positional_argument(1), Some("secret"));
        assert_eq!(ctx.positional_argument(2), None);
    }

    #[test]
    fn test_int_flag_parses_and_defaults() {
        let ctx = InMemoryContext::new(Vec::<String>::new()).with_flag("batch-size", "500");
        assert_eq!(ctx.int_flag("batch-size").unwrap(), 500);
        assert_eq!(ctx.int_flag("http-retry-count").unwrap(), 5);
    }

    #[test]
    fn test_int_flag_rejects_garbage() {
        let ctx = InMemoryContext::new(Vec::<String>::new()).with_flag("executor-threads", "lots");
        let err = ctx.int_flag("executor-threads").unwrap_err();
        match err {
            MigrationError::InvalidFlagValue { flag, value, .. } => {
                assert_eq!(flag, "executor-threads");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_switches() {
        let ctx = InMemoryContext::new(Vec::<String>::new())
            .with_switch("force")
            .with_flag("parallel", "false");
        assert!(ctx.is_flag_set("force"));
        assert!(ctx.bool_flag("force"));
        assert!(ctx.is_flag_set("parallel"));
        assert!(!ctx.bool_flag("parallel"));
        assert!(!ctx.is_flag_set("stateful-run"));
        assert!(!ctx.bool_flag("stateful-run"));
    }
}
