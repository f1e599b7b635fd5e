//! Defines the AST for a CREATE TABLE statement.

use model::schema::index::IndexKind;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTable {
    pub table: String,
    pub if_not_exists: bool,
    pub columns: Vec<ColumnDef>,
    pub constraints: Vec<TableConstraint>,
    /// Options after the closing parenthesis (MySQL only).
    pub options: Vec<TableOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDef {
    pub name: String,
    /// Physical type, already mapped for the target dialect.
    pub data_type: String,
    pub is_nullable: bool,
    /// Default expression, already quoted where needed.
    pub default_value: Option<String>,
    pub options: Vec<ColumnOption>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnOption {
    /// MySQL `AUTO_INCREMENT`.
    AutoIncrement,
    /// SQLite `PRIMARY KEY AUTOINCREMENT`.
    PrimaryKeyAutoIncrement,
    OnUpdate(String),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraint {
    PrimaryKey {
        columns: Vec<String>,
    },
    /// MySQL index clause: `[UNIQUE|FULLTEXT|SPATIAL] KEY name (cols)`.
    Key {
        kind: IndexKind,
        name: String,
        columns: Vec<String>,
    },
    /// Standard `[CONSTRAINT name] UNIQUE (cols)`.
    Unique {
        name: Option<String>,
        columns: Vec<String>,
    },
    ForeignKey {
        name: String,
        columns: Vec<String>,
        referenced_table: String,
        referenced_columns: Vec<String>,
        on_delete: Option<String>,
        on_update: Option<String>,
    },
    Check {
        name: Option<String>,
        expression: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum TableOption {
    Engine(String),
    AutoIncrement(u64),
    Charset(String),
    Collate(String),
    RowFormat(String),
    TableSpace(String),
    Comment(String),
}
