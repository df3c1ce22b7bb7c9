//! Declarative SQLite table descriptions.
//!
//! Tables and columns are authored as `const` data and rendered into the DDL
//! statements that the schema catalog executes. Nothing here talks to the
//! database except [`Table::create`], which is a convenience for tests.

use rusqlite::Connection;

#[macro_export]
macro_rules! sqlite_column {
    ($name:expr, $sql_type:expr $(, $field:ident = $value:expr)*) => {
        {
            // Only mutated when optional field assignments are passed
            #[allow(unused_mut)]
            let mut column = $crate::sqlite_persistence::Column {
                name: $name,
                sql_type: $sql_type,
                is_primary_key: false,
                non_null: false,
                is_unique: false,
                default_value: None,
                foreign_key: None,
            };
            $(
                column.$field = $value;
            )*
            column
        }
    };
}

#[derive(Debug, PartialEq, Eq)]
pub enum SqlType {
    Text,
    Integer,
    Real,
    Blob,
}

impl SqlType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::Integer => "INTEGER",
            SqlType::Real => "REAL",
            SqlType::Blob => "BLOB",
        }
    }
}

#[allow(unused)]
#[derive(Debug)]
pub enum ForeignKeyOnChange {
    NoAction,
    Restrict,
    SetNull,
    SetDefault,
    Cascade,
}

impl ForeignKeyOnChange {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ForeignKeyOnChange::NoAction => "NO ACTION",
            ForeignKeyOnChange::Restrict => "RESTRICT",
            ForeignKeyOnChange::SetNull => "SET NULL",
            ForeignKeyOnChange::SetDefault => "SET DEFAULT",
            ForeignKeyOnChange::Cascade => "CASCADE",
        }
    }
}

#[derive(Debug)]
pub struct ForeignKey {
    pub foreign_table: &'static str,
    pub foreign_column: &'static str,
    pub on_delete: ForeignKeyOnChange,
}

#[derive(Debug)]
pub struct Column {
    pub name: &'static str,
    pub sql_type: &'static SqlType,
    pub is_primary_key: bool,
    pub non_null: bool,
    pub is_unique: bool,
    /// Raw SQL expression. Must be a compile-time literal, SQLite does not
    /// accept bound parameters inside DDL.
    pub default_value: Option<&'static str>,
    pub foreign_key: Option<&'static ForeignKey>,
}

impl Column {
    /// Column definition as it appears in `CREATE TABLE` or `ADD COLUMN`.
    pub fn definition(&self) -> String {
        let mut sql = format!("{} {}", self.name, self.sql_type.as_sql());
        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.non_null {
            sql.push_str(" NOT NULL");
        }
        if self.is_unique {
            sql.push_str(" UNIQUE");
        }
        if let Some(default_value) = self.default_value {
            sql.push_str(&format!(" DEFAULT {}", default_value));
        }
        if let Some(foreign_key) = self.foreign_key {
            sql.push_str(&format!(
                " REFERENCES {}({}) ON DELETE {}",
                foreign_key.foreign_table,
                foreign_key.foreign_column,
                foreign_key.on_delete.as_sql()
            ));
        }
        sql
    }

    pub fn add_column_sql(&self, table: &str) -> String {
        format!("ALTER TABLE {} ADD COLUMN {}", table, self.definition())
    }
}

#[derive(Debug)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    /// Composite primary key. Leave empty when a column carries `is_primary_key`.
    pub primary_key: &'static [&'static str],
    pub indices: &'static [(&'static str, &'static str)],
    pub unique_constraints: &'static [&'static [&'static str]],
}

impl Table {
    pub fn create_table_sql(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(Column::definition)
            .collect::<Vec<_>>()
            .join(", ");
        let mut create_sql = format!("CREATE TABLE {} ({}", self.name, columns);
        if !self.primary_key.is_empty() {
            create_sql.push_str(&format!(", PRIMARY KEY ({})", self.primary_key.join(", ")));
        }
        for unique_constraint in self.unique_constraints {
            create_sql.push_str(&format!(", UNIQUE ({})", unique_constraint.join(", ")));
        }
        create_sql.push(')');
        create_sql
    }

    pub fn create_index_sql(&self) -> Vec<String> {
        self.indices
            .iter()
            .map(|(index_name, columns)| {
                format!("CREATE INDEX {} ON {}({})", index_name, self.name, columns)
            })
            .collect()
    }

    /// Table creation followed by its indices, in execution order.
    pub fn create_statements(&self) -> Vec<String> {
        let mut statements = vec![self.create_table_sql()];
        statements.extend(self.create_index_sql());
        statements
    }

    pub fn create(&self, conn: &Connection) -> rusqlite::Result<()> {
        for sql in self.create_statements() {
            conn.execute(&sql, [])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARENT_FK: ForeignKey = ForeignKey {
        foreign_table: "parent",
        foreign_column: "id",
        on_delete: ForeignKeyOnChange::Cascade,
    };

    const CHILD_TABLE: Table = Table {
        name: "child",
        columns: &[
            sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
            sqlite_column!(
                "parent_id",
                &SqlType::Integer,
                non_null = true,
                foreign_key = Some(&PARENT_FK)
            ),
            sqlite_column!("label", &SqlType::Text, default_value = Some("'none'")),
        ],
        primary_key: &[],
        indices: &[("idx_child_parent_id", "parent_id")],
        unique_constraints: &[&["parent_id", "label"]],
    };

    const LINK_TABLE: Table = Table {
        name: "link",
        columns: &[
            sqlite_column!("left_id", &SqlType::Integer, non_null = true),
            sqlite_column!("right_id", &SqlType::Integer, non_null = true),
        ],
        primary_key: &["left_id", "right_id"],
        indices: &[],
        unique_constraints: &[],
    };

    #[test]
    fn test_column_definition_renders_all_attributes() {
        let column = sqlite_column!(
            "parent_id",
            &SqlType::Integer,
            non_null = true,
            is_unique = true,
            default_value = Some("0"),
            foreign_key = Some(&PARENT_FK)
        );
        assert_eq!(
            column.definition(),
            "parent_id INTEGER NOT NULL UNIQUE DEFAULT 0 REFERENCES parent(id) ON DELETE CASCADE"
        );
    }

    #[test]
    fn test_add_column_sql() {
        let column = sqlite_column!(
            "enabled",
            &SqlType::Integer,
            non_null = true,
            default_value = Some("1")
        );
        assert_eq!(
            column.add_column_sql("music_folder"),
            "ALTER TABLE music_folder ADD COLUMN enabled INTEGER NOT NULL DEFAULT 1"
        );
    }

    #[test]
    fn test_create_table_sql_with_composite_primary_key() {
        assert_eq!(
            LINK_TABLE.create_table_sql(),
            "CREATE TABLE link (left_id INTEGER NOT NULL, right_id INTEGER NOT NULL, PRIMARY KEY (left_id, right_id))"
        );
    }

    #[test]
    fn test_create_builds_table_and_indices() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute("CREATE TABLE parent (id INTEGER PRIMARY KEY)", [])
            .unwrap();
        CHILD_TABLE.create(&conn).unwrap();

        let index_count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='index' AND name='idx_child_parent_id' AND tbl_name='child'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(index_count, 1);

        let on_delete: String = conn
            .query_row(
                "SELECT on_delete FROM pragma_foreign_key_list('child') WHERE \"from\" = 'parent_id'",
                [],
                |r| r.get(0),
            )
            .unwrap();
        assert_eq!(on_delete, "CASCADE");

        conn.execute("INSERT INTO parent (id) VALUES (1)", []).unwrap();
        conn.execute("INSERT INTO child (parent_id) VALUES (1)", [])
            .unwrap();
        let label: String = conn
            .query_row("SELECT label FROM child", [], |r| r.get(0))
            .unwrap();
        assert_eq!(label, "none");

        // UNIQUE (parent_id, label)
        assert!(conn
            .execute("INSERT INTO child (parent_id) VALUES (1)", [])
            .is_err());
    }
}
