//! Convergent schema evolution.
//!
//! There is no schema version. Every step carries a guard that inspects the
//! live database and tells whether the step's effect is already there, so the
//! whole catalog can run on every startup and any historical schema converges
//! to the same end state.

mod asset;
mod errors;
mod executor;
mod introspector;
mod runner;
mod step;

pub use asset::{
    AssetSeed, AssetSource, DirectoryAssetSource, EmbeddedAssetSource, MemoryAssetSource,
};
pub use errors::{AssetLoadError, CatalogError, IntrospectionError, StepError, StepExecutionError};
pub use executor::Executor;
pub use introspector::{SchemaIntrospector, SchemaObject, SchemaSnapshot};
pub use runner::{Catalog, MigrationRunner, RunReport, RunState, StepReport};
pub use step::{Guard, MigrationStep, Procedure, SchemaStep, Statement, StepContext, StepOutcome};
