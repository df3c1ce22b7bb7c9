//! Runs step statements against the live connection.
//!
//! There is no implicit transaction: every statement commits on its own, so
//! when the second statement of an action fails the first one's effect stays.
//! Re-running is safe because the step guard suppresses it next time.

use super::errors::StepExecutionError;
use super::step::Statement;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use tracing::debug;

pub struct Executor<'c> {
    conn: &'c Connection,
}

impl<'c> Executor<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Schema definition or data manipulation without parameters. The text may
    /// hold several `;` separated statements.
    pub fn execute(&self, sql: &str) -> Result<(), StepExecutionError> {
        debug!("execute: {}", sql);
        self.conn
            .execute_batch(sql)
            .map_err(|e| StepExecutionError::new(sql, e))
    }

    /// Parameterized mutation, returns the number of affected rows.
    pub fn update(&self, sql: &str, params: &[Value]) -> Result<usize, StepExecutionError> {
        debug!("update: {} ({} params)", sql, params.len());
        self.conn
            .execute(sql, params_from_iter(params.iter()))
            .map_err(|e| StepExecutionError::new(sql, e))
    }

    /// First column of the first row.
    pub fn query_scalar(&self, sql: &str, params: &[Value]) -> Result<Value, StepExecutionError> {
        self.conn
            .query_row(sql, params_from_iter(params.iter()), |row| row.get(0))
            .map_err(|e| StepExecutionError::new(sql, e))
    }

    pub fn query_rows(
        &self,
        sql: &str,
        params: &[Value],
    ) -> Result<Vec<Vec<Value>>, StepExecutionError> {
        let mut stmt = self
            .conn
            .prepare(sql)
            .map_err(|e| StepExecutionError::new(sql, e))?;
        let column_count = stmt.column_count();
        let rows = stmt
            .query_map(params_from_iter(params.iter()), |row| {
                (0..column_count)
                    .map(|i| row.get::<_, Value>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })
            .map_err(|e| StepExecutionError::new(sql, e))?
            .collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| StepExecutionError::new(sql, e))?;
        Ok(rows)
    }

    pub fn run(&self, statement: &Statement) -> Result<(), StepExecutionError> {
        match statement {
            Statement::Execute(sql) => self.execute(sql),
            Statement::Update { sql, params } => self.update(sql, params).map(|_| ()),
            Statement::CreateTable(table) => {
                for sql in table.create_statements() {
                    self.execute(&sql)?;
                }
                Ok(())
            }
            Statement::AddColumn { table, column } => self.execute(&column.add_column_sql(table)),
            Statement::Procedure(procedure) => procedure(self),
        }
    }
}
