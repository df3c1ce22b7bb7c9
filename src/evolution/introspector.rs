//! Read-only questions about the live schema.

use super::errors::IntrospectionError;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection};
use serde::Serialize;
use std::collections::BTreeMap;

/// One entry of `sqlite_master`, as captured by [`SchemaIntrospector::snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaObject {
    pub kind: String,
    pub name: String,
    pub table: String,
    pub sql: Option<String>,
}

/// Structural picture of the database: every table and index definition plus
/// the number of rows in each table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub objects: Vec<SchemaObject>,
    pub row_counts: BTreeMap<String, i64>,
}

impl SchemaSnapshot {
    pub fn has_table(&self, name: &str) -> bool {
        self.objects
            .iter()
            .any(|o| o.kind == "table" && o.name.eq_ignore_ascii_case(name))
    }
}

pub struct SchemaIntrospector<'c> {
    conn: &'c Connection,
}

impl<'c> SchemaIntrospector<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Case-insensitive. A missing table is an answer, not an error.
    pub fn table_exists(&self, table: &str) -> Result<bool, IntrospectionError> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                params![table],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .map_err(|source| IntrospectionError::Table {
                table: table.to_string(),
                source,
            })
    }

    /// Case-insensitive on both names. When the table does not exist the
    /// column does not either.
    pub fn column_exists(&self, table: &str, column: &str) -> Result<bool, IntrospectionError> {
        // pragma_table_info yields no rows for an unknown table
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2 COLLATE NOCASE",
                params![table, column],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .map_err(|source| IntrospectionError::Column {
                table: table.to_string(),
                column: column.to_string(),
                source,
            })
    }

    pub fn index_exists(&self, table: &str, index: &str) -> Result<bool, IntrospectionError> {
        self.conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND tbl_name = ?1 COLLATE NOCASE AND name = ?2 COLLATE NOCASE",
                params![table, index],
                |row| row.get::<_, i64>(0),
            )
            .map(|count| count > 0)
            .map_err(|source| IntrospectionError::Predicate {
                relation: "sqlite_master".to_string(),
                predicate: format!("index {} on {}", index, table),
                source,
            })
    }

    /// Counts the rows of `relation` matching `predicate`. Both are authored
    /// catalog text; every runtime value goes through `params`.
    pub fn row_count(
        &self,
        predicate: &str,
        relation: &str,
        params: &[Value],
    ) -> Result<i64, IntrospectionError> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE {}", relation, predicate);
        self.conn
            .query_row(&sql, params_from_iter(params.iter()), |row| row.get(0))
            .map_err(|source| IntrospectionError::Predicate {
                relation: relation.to_string(),
                predicate: predicate.to_string(),
                source,
            })
    }

    pub fn row_exists(
        &self,
        predicate: &str,
        relation: &str,
        params: &[Value],
    ) -> Result<bool, IntrospectionError> {
        Ok(self.row_count(predicate, relation, params)? > 0)
    }

    pub fn snapshot(&self) -> Result<SchemaSnapshot, IntrospectionError> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT type, name, tbl_name, sql FROM sqlite_master
                 WHERE type IN ('table', 'index') AND name NOT LIKE 'sqlite_%'
                 ORDER BY type, name",
            )
            .map_err(IntrospectionError::Snapshot)?;
        let objects = stmt
            .query_map([], |row| {
                Ok(SchemaObject {
                    kind: row.get(0)?,
                    name: row.get(1)?,
                    table: row.get(2)?,
                    sql: row.get(3)?,
                })
            })
            .map_err(IntrospectionError::Snapshot)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(IntrospectionError::Snapshot)?;

        let mut row_counts = BTreeMap::new();
        for object in objects.iter().filter(|o| o.kind == "table") {
            let count: i64 = self
                .conn
                .query_row(
                    &format!("SELECT COUNT(*) FROM {}", quote_identifier(&object.name)),
                    [],
                    |row| row.get(0),
                )
                .map_err(IntrospectionError::Snapshot)?;
            row_counts.insert(object.name.clone(), count);
        }

        Ok(SchemaSnapshot {
            objects,
            row_counts,
        })
    }
}

fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
