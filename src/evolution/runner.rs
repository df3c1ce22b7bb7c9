//! Ordered catalog of steps and the runner that drives it.
//!
//! The runner walks the catalog in declared order on the calling thread. A
//! failing step is recorded and logged, then the next step runs. [`MigrationRunner::apply`]
//! never returns an error: the caller always gets a [`RunReport`].

use super::asset::AssetSource;
use super::errors::CatalogError;
use super::step::{MigrationStep, StepContext, StepOutcome};
use rusqlite::Connection;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Immutable, ordered list of steps with unique ids.
#[derive(Debug, Clone)]
pub struct Catalog {
    steps: Vec<MigrationStep>,
}

impl Catalog {
    pub fn new(steps: Vec<MigrationStep>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(steps.len());
        for step in &steps {
            if let MigrationStep::Schema(schema) = step {
                if schema.action.is_empty() {
                    return Err(CatalogError::EmptyStep(step.id().to_string()));
                }
            }
            if !seen.insert(step.id().to_string()) {
                return Err(CatalogError::DuplicateStepId(step.id().to_string()));
            }
        }
        Ok(Self { steps })
    }

    /// The prefix of this catalog that ends with step `id`, inclusive.
    pub fn up_to(self, id: &str) -> Result<Self, CatalogError> {
        let position = self
            .steps
            .iter()
            .position(|step| step.id() == id)
            .ok_or_else(|| CatalogError::UnknownStepId(id.to_string()))?;
        let mut steps = self.steps;
        steps.truncate(position + 1);
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[MigrationStep] {
        &self.steps
    }

    pub fn iter(&self) -> impl Iterator<Item = &MigrationStep> {
        self.steps.iter()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    Pending,
    Running,
    Completed,
    PartiallyFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepReport {
    pub id: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub state: RunState,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    fn new(capacity: usize) -> Self {
        Self {
            state: RunState::Pending,
            steps: Vec::with_capacity(capacity),
        }
    }

    fn count(&self, predicate: impl Fn(&StepOutcome) -> bool) -> usize {
        self.steps.iter().filter(|s| predicate(&s.outcome)).count()
    }

    pub fn applied(&self) -> usize {
        self.count(|o| *o == StepOutcome::Applied)
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| *o == StepOutcome::Skipped)
    }

    pub fn pending(&self) -> usize {
        self.count(|o| *o == StepOutcome::Pending)
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, StepOutcome::Failed(_)))
    }

    pub fn outcome_of(&self, id: &str) -> Option<&StepOutcome> {
        self.steps.iter().find(|s| s.id == id).map(|s| &s.outcome)
    }

    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|s| matches!(s.outcome, StepOutcome::Failed(_)))
    }

    fn finish(&mut self) {
        self.state = if self.failed() > 0 {
            RunState::PartiallyFailed
        } else {
            RunState::Completed
        };
    }
}

pub struct MigrationRunner {
    assets: Arc<dyn AssetSource>,
}

impl MigrationRunner {
    pub fn new(assets: Arc<dyn AssetSource>) -> Self {
        Self { assets }
    }

    pub fn apply(&self, catalog: &Catalog, conn: &Connection) -> RunReport {
        let ctx = StepContext {
            conn,
            assets: self.assets.as_ref(),
        };
        let mut report = RunReport::new(catalog.len());
        report.state = RunState::Running;
        info!("Applying {} schema steps", catalog.len());

        for step in catalog.iter() {
            let outcome = match step.apply(&ctx) {
                Ok(StepOutcome::Applied) => {
                    info!("Applied {}", step.id());
                    StepOutcome::Applied
                }
                Ok(outcome) => {
                    info!("Skipped {}, already present", step.id());
                    outcome
                }
                Err(err) => {
                    error!("Step {} failed: {}", step.id(), err);
                    StepOutcome::Failed(err.to_string())
                }
            };
            report.steps.push(StepReport {
                id: step.id().to_string(),
                outcome,
            });
        }

        report.finish();
        if report.state == RunState::PartiallyFailed {
            warn!(
                "Schema partially updated: {} applied, {} skipped, {} failed",
                report.applied(),
                report.skipped(),
                report.failed()
            );
        } else {
            info!(
                "Schema up to date: {} applied, {} skipped",
                report.applied(),
                report.skipped()
            );
        }
        report
    }

    /// Evaluates every guard without running any action. Guards of later steps
    /// see the schema as it is now, so a step depending on an earlier pending
    /// one shows up as pending too.
    pub fn plan(&self, catalog: &Catalog, conn: &Connection) -> RunReport {
        let ctx = StepContext {
            conn,
            assets: self.assets.as_ref(),
        };
        let mut report = RunReport::new(catalog.len());
        report.state = RunState::Running;

        for step in catalog.iter() {
            let outcome = match step.is_applied(&ctx) {
                Ok(true) => StepOutcome::Skipped,
                Ok(false) => StepOutcome::Pending,
                Err(err) => {
                    warn!("Cannot evaluate guard of {}: {}", step.id(), err);
                    StepOutcome::Failed(err.to_string())
                }
            };
            report.steps.push(StepReport {
                id: step.id().to_string(),
                outcome,
            });
        }

        report.finish();
        info!(
            "Plan: {} pending, {} up to date, {} undetermined",
            report.pending(),
            report.skipped(),
            report.failed()
        );
        report
    }
}
