//! Defines the AST for ALTER TABLE statements.

use crate::ast::create_table::ColumnDef;

/// An ALTER TABLE with one or more operations, rendered as one statement
/// per operation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlterTable {
    pub table: String,
    pub operations: Vec<AlterTableOperation>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableOperation {
    AddColumn(ColumnDef),
    /// MySQL `MODIFY COLUMN`, restating the whole definition.
    ModifyColumn(ColumnDef),
    DropColumn(String),
    /// PostgreSQL `ALTER COLUMN c TYPE t`.
    SetType { column: String, data_type: String },
    SetNotNull { column: String, not_null: bool },
    SetDefault { column: String, value: Option<String> },
}
