// ABOUTME: Library root for federation-migrator
// ABOUTME: Configuration resolution and executor invocation for the RT <-> RTFS migration

pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod flags;
pub mod locator;
pub mod runner;
pub mod schema;
pub mod serialize;
pub mod validate;

pub use config::{MigrationConfiguration, Plan};
pub use context::{CommandContext, InMemoryContext, MatchesContext};
pub use error::MigrationError;
