use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignKey {
    pub name: String,
    pub fields: Vec<String>,
    pub referenced_table: String,
    pub referenced_fields: Vec<String>,

    /// Referential action such as `CASCADE` or `SET NULL`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_delete: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub on_update: Option<String>,
}

/// A `CHECK` constraint. The expression is kept as source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckConstraint {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub expression: String,
}
