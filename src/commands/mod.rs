// ABOUTME: Command implementations
// ABOUTME: Exports the two migration directions and the shared pipeline

pub mod migrate;

pub use migrate::{migrate, migrate_to_rt, migrate_to_rtfs, ExecutorSettings};
