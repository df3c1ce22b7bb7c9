//! Pezzottify Schema Library
//!
//! Convergent schema evolution for the music server database, plus the
//! startup glue the `schema-sync` binary is built from.

pub mod bootstrap;
pub mod config;
pub mod evolution;
pub mod schema_catalog;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use evolution::{Catalog, MigrationRunner, MigrationStep, RunReport, RunState, StepOutcome};
pub use schema_catalog::{schema_catalog, CatalogSettings};
