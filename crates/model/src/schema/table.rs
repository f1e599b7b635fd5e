use crate::{
    errors::SchemaError,
    schema::{
        constraint::{CheckConstraint, ForeignKey},
        field::Field,
        index::Index,
    },
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A table definition: the unit produced by parsing one `CREATE TABLE`
/// statement and consumed by generation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Storage engine (MySQL only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment_start: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_space: Option<String>,

    /// Columns in declaration order.
    #[serde(default)]
    pub fields: Vec<Field>,

    #[serde(default)]
    pub indexes: Vec<Index>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foreign_keys: Vec<ForeignKey>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<CheckConstraint>,
}

impl Table {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_index(mut self, index: Index) -> Self {
        self.indexes.push(index);
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn field_mut(&mut self, name: &str) -> Option<&mut Field> {
        self.fields.iter_mut().find(|f| f.name == name)
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    pub fn primary_key_fields(&self) -> impl Iterator<Item = &Field> + '_ {
        self.fields.iter().filter(|f| f.is_primary_key)
    }

    /// The primary key column when the key consists of exactly one column.
    pub fn sole_primary_key(&self) -> Option<&Field> {
        let mut keys = self.primary_key_fields();
        match (keys.next(), keys.next()) {
            (Some(field), None) => Some(field),
            _ => None,
        }
    }

    /// Checks the structural invariants every table must satisfy before it
    /// can be rendered: unique column names, unique index names, and indexes
    /// and foreign keys that only reference existing columns.
    pub fn validate(&self) -> Result<(), SchemaError> {
        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }

        let mut index_names = HashSet::new();
        for index in &self.indexes {
            if !index_names.insert(index.name.as_str()) {
                return Err(SchemaError::DuplicateIndexName {
                    name: index.name.clone(),
                });
            }
            for column in &index.fields {
                if !seen.contains(column.as_str()) {
                    return Err(SchemaError::UnknownIndexColumn {
                        index: index.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        for fk in &self.foreign_keys {
            for column in &fk.fields {
                if !seen.contains(column.as_str()) {
                    return Err(SchemaError::UnknownForeignKeyColumn {
                        constraint: fk.name.clone(),
                        column: column.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}
