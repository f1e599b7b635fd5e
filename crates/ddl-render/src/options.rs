use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OptionsError {
    #[error("Unknown dialect '{0}', expected mysql, postgresql or sqlite")]
    UnknownDialect(String),

    #[error("Invalid generation options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Target SQL dialect of generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DialectKind {
    #[default]
    MySql,
    #[serde(alias = "postgres", alias = "pg")]
    PostgreSql,
    Sqlite,
}

impl FromStr for DialectKind {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(DialectKind::MySql),
            "postgresql" | "postgres" | "pg" => Ok(DialectKind::PostgreSql),
            "sqlite" => Ok(DialectKind::Sqlite),
            _ => Err(OptionsError::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for DialectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DialectKind::MySql => write!(f, "mysql"),
            DialectKind::PostgreSql => write!(f, "postgresql"),
            DialectKind::Sqlite => write!(f, "sqlite"),
        }
    }
}

/// Settings of one generation call. Field names serialize in camelCase and
/// any missing field takes its default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationOptions {
    pub dialect: DialectKind,
    /// Server version, e.g. `8.0` or `5.6`.
    pub version: String,
    pub include_drop_table: bool,
    pub include_if_not_exists: bool,
    pub include_comments: bool,
    pub include_auto_increment: bool,
    pub include_charset: bool,
    pub charset: String,
    pub collation: String,

    /// Storage engine for MySQL tables that do not name one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,

    /// Timestamp printed in the batch header. Never read from the clock.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            dialect: DialectKind::MySql,
            version: "8.0".to_string(),
            include_drop_table: true,
            include_if_not_exists: true,
            include_comments: true,
            include_auto_increment: true,
            include_charset: true,
            charset: "utf8mb4".to_string(),
            collation: "utf8mb4_unicode_ci".to_string(),
            engine: None,
            generated_at: None,
        }
    }
}

impl GenerationOptions {
    pub fn for_dialect(dialect: DialectKind) -> Self {
        Self {
            dialect,
            ..Default::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// `major.minor` of [`version`](Self::version). Missing parts read as
    /// zero; `None` when the version does not start with a number.
    pub fn version_number(&self) -> Option<(u32, u32)> {
        let mut parts = self
            .version
            .trim()
            .trim_start_matches(|c: char| c == 'v' || c == 'V')
            .split('.')
            .map(|part| {
                part.chars()
                    .take_while(char::is_ascii_digit)
                    .collect::<String>()
            });

        let major = parts.next()?.parse().ok()?;
        let minor = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
        Some((major, minor))
    }
}
