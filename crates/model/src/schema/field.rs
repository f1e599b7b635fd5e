use crate::core::data_type::DataType;
use serde::{Deserialize, Serialize};

/// A single column of a [`Table`](super::table::Table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub name: String,

    #[serde(rename = "type")]
    pub data_type: DataType,

    /// Character length or numeric display width.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u32>,

    /// Total digits for `DECIMAL`/`NUMERIC`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<u32>,

    #[serde(default = "default_nullable")]
    pub nullable: bool,

    /// Raw default as written, with surrounding quotes removed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default)]
    pub is_primary_key: bool,

    #[serde(default)]
    pub is_auto_increment: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub index: bool,

    #[serde(default)]
    pub unsigned: bool,

    #[serde(default)]
    pub zerofill: bool,

    /// Member list of an `ENUM(...)` or `SET(...)` column.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,

    /// MySQL `ON UPDATE` expression, e.g. `CURRENT_TIMESTAMP`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            length: None,
            precision: None,
            scale: None,
            nullable: true,
            default_value: None,
            comment: None,
            is_primary_key: false,
            is_auto_increment: false,
            unique: false,
            index: false,
            unsigned: false,
            zerofill: false,
            enum_values: Vec::new(),
            on_update: None,
        }
    }

    pub fn with_length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    pub fn with_precision(mut self, precision: u32, scale: Option<u32>) -> Self {
        self.precision = Some(precision);
        self.scale = scale;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.is_auto_increment = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Precision for fixed-point types. A bare `length` is accepted as the
    /// precision when no explicit one was recorded.
    pub fn effective_precision(&self) -> Option<u32> {
        self.precision.or(self.length)
    }
}
