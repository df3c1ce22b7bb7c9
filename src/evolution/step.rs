//! Migration steps: a guard over the live schema paired with an action.

use super::asset::{AssetSeed, AssetSource};
use super::errors::{IntrospectionError, StepError, StepExecutionError};
use super::executor::Executor;
use super::introspector::SchemaIntrospector;
use crate::sqlite_persistence::{Column, Table};
use rusqlite::types::Value;
use rusqlite::Connection;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// Answers "has this step's effect already been applied?".
#[derive(Debug, Clone)]
pub enum Guard {
    TableExists(&'static str),
    ColumnExists {
        table: &'static str,
        column: &'static str,
    },
    /// Applied when at least one row of `relation` matches `predicate`.
    RowExists {
        relation: &'static str,
        predicate: &'static str,
        params: Vec<Value>,
    },
    /// Applied when no row of `relation` matches `predicate`.
    RowAbsent {
        relation: &'static str,
        predicate: &'static str,
        params: Vec<Value>,
    },
}

impl Guard {
    pub fn is_satisfied(
        &self,
        introspector: &SchemaIntrospector<'_>,
    ) -> Result<bool, IntrospectionError> {
        match self {
            Guard::TableExists(table) => introspector.table_exists(table),
            Guard::ColumnExists { table, column } => introspector.column_exists(table, column),
            Guard::RowExists {
                relation,
                predicate,
                params,
            } => introspector.row_exists(predicate, relation, params),
            Guard::RowAbsent {
                relation,
                predicate,
                params,
            } => Ok(!introspector.row_exists(predicate, relation, params)?),
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Guard::TableExists(table) => write!(f, "table '{}' exists", table),
            Guard::ColumnExists { table, column } => {
                write!(f, "column '{}.{}' exists", table, column)
            }
            Guard::RowExists {
                relation,
                predicate,
                ..
            } => write!(f, "row in {} where {}", relation, predicate),
            Guard::RowAbsent {
                relation,
                predicate,
                ..
            } => write!(f, "no row in {} where {}", relation, predicate),
        }
    }
}

pub type Procedure = Arc<dyn Fn(&Executor<'_>) -> Result<(), StepExecutionError> + Send + Sync>;

/// One element of a step action. Statements of an action run in order.
#[derive(Clone)]
pub enum Statement {
    Execute(Cow<'static, str>),
    Update {
        sql: Cow<'static, str>,
        params: Vec<Value>,
    },
    CreateTable(&'static Table),
    AddColumn {
        table: &'static str,
        column: &'static Column,
    },
    /// Hand-written sequence, for actions that need a query result (a
    /// generated id, a count) before their next statement.
    Procedure(Procedure),
}

impl Statement {
    pub fn execute(sql: impl Into<Cow<'static, str>>) -> Self {
        Statement::Execute(sql.into())
    }

    pub fn update(sql: impl Into<Cow<'static, str>>, params: Vec<Value>) -> Self {
        Statement::Update {
            sql: sql.into(),
            params,
        }
    }

    pub fn procedure<F>(procedure: F) -> Self
    where
        F: Fn(&Executor<'_>) -> Result<(), StepExecutionError> + Send + Sync + 'static,
    {
        Statement::Procedure(Arc::new(procedure))
    }
}

impl fmt::Debug for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Execute(sql) => f.debug_tuple("Execute").field(sql).finish(),
            Statement::Update { sql, params } => f
                .debug_struct("Update")
                .field("sql", sql)
                .field("params", &params.len())
                .finish(),
            Statement::CreateTable(table) => f.debug_tuple("CreateTable").field(&table.name).finish(),
            Statement::AddColumn { table, column } => f
                .debug_struct("AddColumn")
                .field("table", table)
                .field("column", &column.name)
                .finish(),
            Statement::Procedure(_) => f.write_str("Procedure"),
        }
    }
}

/// A guarded list of statements.
#[derive(Debug, Clone)]
pub struct SchemaStep {
    pub id: Cow<'static, str>,
    pub guard: Guard,
    pub action: Vec<Statement>,
}

#[derive(Debug, Clone)]
pub enum MigrationStep {
    Schema(SchemaStep),
    Asset(AssetSeed),
}

/// What the engine needs to apply a step.
pub struct StepContext<'a> {
    pub conn: &'a Connection,
    pub assets: &'a dyn AssetSource,
}

impl<'a> StepContext<'a> {
    pub fn introspector(&self) -> SchemaIntrospector<'a> {
        SchemaIntrospector::new(self.conn)
    }

    pub fn executor(&self) -> Executor<'a> {
        Executor::new(self.conn)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Guard reported drift and the action ran to the end.
    Applied,
    /// Guard reported the effect already present.
    Skipped,
    /// Guard reported drift; only produced when planning.
    Pending,
    Failed(String),
}

impl MigrationStep {
    pub fn schema(id: impl Into<Cow<'static, str>>, guard: Guard, action: Vec<Statement>) -> Self {
        MigrationStep::Schema(SchemaStep {
            id: id.into(),
            guard,
            action,
        })
    }

    /// Creates `table` with its indices, then runs `followup` (seed rows,
    /// data copied from older tables).
    pub fn create_table(table: &'static Table, followup: Vec<Statement>) -> Self {
        let mut action = vec![Statement::CreateTable(table)];
        action.extend(followup);
        Self::schema(
            format!("table:{}", table.name),
            Guard::TableExists(table.name),
            action,
        )
    }

    /// Adds `columns` to `table`; the first column doubles as the guard.
    pub fn add_columns(table: &'static str, columns: &'static [Column]) -> Self {
        let guard_column = columns.first().map(|c| c.name).unwrap_or_default();
        Self::schema(
            format!("column:{}.{}", table, guard_column),
            Guard::ColumnExists {
                table,
                column: guard_column,
            },
            columns
                .iter()
                .map(|column| Statement::AddColumn { table, column })
                .collect(),
        )
    }

    pub fn id(&self) -> &str {
        match self {
            MigrationStep::Schema(step) => &step.id,
            MigrationStep::Asset(seed) => seed.id(),
        }
    }

    /// Evaluates the guard only.
    pub fn is_applied(&self, ctx: &StepContext<'_>) -> Result<bool, IntrospectionError> {
        match self {
            MigrationStep::Schema(step) => step.guard.is_satisfied(&ctx.introspector()),
            MigrationStep::Asset(seed) => seed.is_seeded(&ctx.introspector()),
        }
    }

    pub fn apply(&self, ctx: &StepContext<'_>) -> Result<StepOutcome, StepError> {
        if self.is_applied(ctx)? {
            return Ok(StepOutcome::Skipped);
        }
        match self {
            MigrationStep::Schema(step) => {
                let executor = ctx.executor();
                for statement in &step.action {
                    executor.run(statement)?;
                }
            }
            MigrationStep::Asset(seed) => seed.seed(ctx)?,
        }
        Ok(StepOutcome::Applied)
    }
}
