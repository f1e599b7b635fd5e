use crate::lexer::error::LexerError;
use model::errors::SchemaError;
use thiserror::Error;

/// Why a `CREATE TABLE` statement could not be turned into a table.
///
/// Positions are 1-based and relative to the text handed to the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("No `CREATE TABLE <name> (` header found")]
    MissingTableName,

    #[error("Cannot parse column list item '{fragment}' at line {line}, column {column}")]
    UnparseableColumnItem {
        fragment: String,
        line: usize,
        column: usize,
    },

    #[error("Index '{index}' references unknown column '{column}'")]
    UnknownIndexColumn { index: String, column: String },

    #[error("Duplicate index name '{name}'")]
    DuplicateIndexName { name: String },

    #[error("Duplicate column '{name}'")]
    DuplicateColumn { name: String },

    #[error("Column list opened at line {line}, column {column} is never closed")]
    UnterminatedColumnList { line: usize, column: usize },

    #[error("Foreign key '{constraint}' references unknown column '{column}'")]
    UnknownForeignKeyColumn { constraint: String, column: String },

    #[error("No valid table definitions found")]
    EmptyBatchResult,

    #[error(transparent)]
    Lexer(#[from] LexerError),
}

impl From<SchemaError> for ParseError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::DuplicateField { name } => ParseError::DuplicateColumn { name },
            SchemaError::UnknownIndexColumn { index, column } => {
                ParseError::UnknownIndexColumn { index, column }
            }
            SchemaError::DuplicateIndexName { name } => ParseError::DuplicateIndexName { name },
            SchemaError::UnknownForeignKeyColumn { constraint, column } => {
                ParseError::UnknownForeignKeyColumn { constraint, column }
            }
        }
    }
}
