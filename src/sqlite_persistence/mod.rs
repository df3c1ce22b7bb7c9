mod table;

pub use table::{Column, ForeignKey, ForeignKeyOnChange, SqlType, Table};
