//! Error taxonomy of the schema evolution engine.
//!
//! Only [`IntrospectionError`] is unsafe to ignore: a failed check is never
//! read as "absent". The runner still records it per step instead of
//! aborting the run.

use thiserror::Error;

/// The live schema state could not be determined.
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Failed to check table '{table}': {source}")]
    Table {
        table: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to check column '{table}.{column}': {source}")]
    Column {
        table: String,
        column: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to evaluate '{predicate}' on {relation}: {source}")]
    Predicate {
        relation: String,
        predicate: String,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Failed to read schema snapshot: {0}")]
    Snapshot(#[source] rusqlite::Error),
}

/// A statement of a step action failed.
#[derive(Debug, Error)]
#[error("Statement failed: {source} [{sql}]")]
pub struct StepExecutionError {
    pub sql: String,
    #[source]
    pub source: rusqlite::Error,
}

impl StepExecutionError {
    pub fn new(sql: impl Into<String>, source: rusqlite::Error) -> Self {
        Self {
            sql: sql.into(),
            source,
        }
    }
}

/// A bundled asset payload could not be provided.
#[derive(Debug, Error)]
pub enum AssetLoadError {
    #[error("Asset '{name}' not found in {location}")]
    Missing { name: String, location: String },

    #[error("Failed to read asset '{name}': {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset '{name}' is {actual}, expected {expected}")]
    MimeMismatch {
        name: String,
        expected: String,
        actual: String,
    },
}

/// Anything that can make a single step fail.
#[derive(Debug, Error)]
pub enum StepError {
    #[error("Introspection error: {0}")]
    Introspection(#[from] IntrospectionError),

    #[error("Execution error: {0}")]
    Execution(#[from] StepExecutionError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetLoadError),
}

/// The catalog itself is malformed. Raised at construction, never during a run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Duplicate step id: {0}")]
    DuplicateStepId(String),

    #[error("Unknown step id: {0}")]
    UnknownStepId(String),

    #[error("Step {0} has no statements")]
    EmptyStep(String),
}
