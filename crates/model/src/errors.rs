use thiserror::Error;

/// Violations of the structural invariants of a [`Table`](crate::schema::table::Table).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Duplicate column '{name}'")]
    DuplicateField { name: String },

    #[error("Index '{index}' references unknown column '{column}'")]
    UnknownIndexColumn { index: String, column: String },

    #[error("Duplicate index name '{name}'")]
    DuplicateIndexName { name: String },

    #[error("Foreign key '{constraint}' references unknown column '{column}'")]
    UnknownForeignKeyColumn { constraint: String, column: String },
}
