use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IndexKind {
    Normal,
    Unique,
    Fulltext,
    Spatial,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Normal => write!(f, "NORMAL"),
            IndexKind::Unique => write!(f, "UNIQUE"),
            IndexKind::Fulltext => write!(f, "FULLTEXT"),
            IndexKind::Spatial => write!(f, "SPATIAL"),
        }
    }
}

/// A named, possibly composite, index. Column order is significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub fields: Vec<String>,
    pub kind: IndexKind,
}

impl Index {
    pub fn new(name: impl Into<String>, kind: IndexKind, fields: Vec<String>) -> Self {
        Self {
            name: name.into(),
            fields,
            kind,
        }
    }

    /// De-duplication key used when the same index is declared twice.
    pub fn key(&self) -> (IndexKind, &str) {
        (self.kind, self.name.as_str())
    }
}
