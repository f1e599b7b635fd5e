//! Turns schema tables into statement trees for one dialect.

use crate::{
    ast::create_table::ColumnDef,
    dialect::Dialect,
    options::{DialectKind, GenerationOptions},
};
use model::{
    core::data_type::DataType,
    schema::{field::Field, table::Table},
};
use std::borrow::Cow;
use tracing::warn;

pub mod alter_table;
pub mod create_table;

/// Defaults that are expressions rather than literals.
const DEFAULT_KEYWORDS: [&str; 5] = [
    "CURRENT_TIMESTAMP",
    "CURRENT_DATE",
    "CURRENT_TIME",
    "LOCALTIME",
    "LOCALTIMESTAMP",
];

pub(crate) fn column_def(
    table: &Table,
    field: &Field,
    dialect: &dyn Dialect,
    options: &GenerationOptions,
) -> ColumnDef {
    let field = effective_field(table, field, options);

    ColumnDef {
        name: field.name.clone(),
        data_type: dialect.render_data_type(&field),
        is_nullable: field.nullable,
        default_value: field
            .default_value
            .as_deref()
            .map(|value| format_default(&field, value, dialect)),
        options: dialect.column_options(table, &field, options),
    }
}

/// Auto-increment survives only on primary key columns, and only while
/// `include_auto_increment` is set.
fn effective_field<'f>(table: &Table, field: &'f Field, options: &GenerationOptions) -> Cow<'f, Field> {
    if !field.is_auto_increment || (field.is_primary_key && options.include_auto_increment) {
        return Cow::Borrowed(field);
    }

    if !field.is_primary_key {
        warn!(
            "Ignoring auto-increment on '{}.{}', which is not a primary key column",
            table.name, field.name
        );
    }

    let mut field = field.clone();
    field.is_auto_increment = false;
    Cow::Owned(field)
}

/// Default expression as it appears after `DEFAULT`.
///
/// `NULL`, parenthesised expressions, prefixed literals such as `b'0'`,
/// numbers on numeric columns, boolean literals and temporal keywords or
/// function calls are emitted as they are. Everything else becomes a string
/// literal.
pub fn format_default(field: &Field, value: &str, dialect: &dyn Dialect) -> String {
    let trimmed = value.trim();
    if trimmed.eq_ignore_ascii_case("NULL") || (trimmed.starts_with('(') && trimmed.ends_with(')'))
    {
        return trimmed.to_string();
    }

    if let Some(literal) = prefixed_literal(trimmed, dialect.kind()) {
        return literal;
    }

    let data_type = &field.data_type;
    let is_string = data_type.is_character()
        || data_type.is_text()
        || data_type.is_binary()
        || matches!(data_type, DataType::Enum | DataType::Set | DataType::Json);
    if is_string {
        return dialect.quote_string(value);
    }

    let verbatim = match data_type {
        DataType::Boolean => {
            ["TRUE", "FALSE", "0", "1"]
                .iter()
                .any(|b| trimmed.eq_ignore_ascii_case(b))
                || is_expression(trimmed)
        }
        DataType::Custom(_) => is_number(trimmed) || is_expression(trimmed),
        dt if dt.is_numeric() => is_number(trimmed) || is_expression(trimmed),
        _ => is_expression(trimmed),
    };

    if verbatim {
        trimmed.to_string()
    } else {
        dialect.quote_string(value)
    }
}

/// `b'0'`, `X'FF'`, `_utf8mb4'abc'` and similar, rewritten where the
/// target has no such syntax.
fn prefixed_literal(value: &str, dialect: DialectKind) -> Option<String> {
    let quote = value.find('\'')?;
    let (prefix, literal) = value.split_at(quote);
    let known_prefix = ["b", "x", "n", "e"]
        .iter()
        .any(|p| prefix.eq_ignore_ascii_case(p))
        || (prefix.len() > 1
            && prefix.starts_with('_')
            && prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if !known_prefix || literal.len() < 2 || !literal.ends_with('\'') {
        return None;
    }

    let body = &literal[1..literal.len() - 1];
    if body.replace("''", "").contains('\'') {
        return None;
    }

    let rewritten = match dialect {
        DialectKind::MySql => value.to_string(),
        // Character set introducers
        _ if prefix.starts_with('_') => literal.to_string(),
        DialectKind::Sqlite if prefix.eq_ignore_ascii_case("b") => {
            u64::from_str_radix(body, 2).ok()?.to_string()
        }
        DialectKind::PostgreSql if prefix.eq_ignore_ascii_case("x") => {
            format!("'\\x{}'", body)
        }
        _ => value.to_string(),
    };
    Some(rewritten)
}

fn is_number(value: &str) -> bool {
    value.parse::<f64>().is_ok()
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
}

/// A temporal keyword or a call such as `uuid()` or `CURRENT_TIMESTAMP(3)`.
fn is_expression(value: &str) -> bool {
    if DEFAULT_KEYWORDS
        .iter()
        .any(|kw| value.eq_ignore_ascii_case(kw))
    {
        return true;
    }

    match value.find('(') {
        Some(open) if open > 0 && value.ends_with(')') => {
            let name = &value[..open];
            name.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_')
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::create_table::ColumnOption,
        dialect::{MySql, Postgres, Sqlite},
    };
    use tracing_test::traced_test;

    fn default_of(field: Field, value: &str) -> String {
        format_default(&field, value, &Postgres)
    }

    #[test]
    fn test_string_defaults_are_quoted() {
        assert_eq!(default_of(Field::new("s", DataType::VarChar), "it's"), "'it''s'");
        assert_eq!(default_of(Field::new("s", DataType::VarChar), "0"), "'0'");
        assert_eq!(default_of(Field::new("s", DataType::Enum), "active"), "'active'");
        assert_eq!(default_of(Field::new("d", DataType::Date), "2024-01-01"), "'2024-01-01'");
    }

    #[test]
    fn test_verbatim_defaults() {
        assert_eq!(default_of(Field::new("s", DataType::VarChar), "NULL"), "NULL");
        assert_eq!(default_of(Field::new("n", DataType::Int), "-1"), "-1");
        assert_eq!(default_of(Field::new("n", DataType::Decimal), "0.00"), "0.00");
        assert_eq!(default_of(Field::new("b", DataType::Boolean), "true"), "true");
        assert_eq!(
            default_of(Field::new("t", DataType::Timestamp), "CURRENT_TIMESTAMP"),
            "CURRENT_TIMESTAMP"
        );
        assert_eq!(
            default_of(Field::new("t", DataType::DateTime), "CURRENT_TIMESTAMP(3)"),
            "CURRENT_TIMESTAMP(3)"
        );
        assert_eq!(default_of(Field::new("j", DataType::Json), "(JSON_ARRAY())"), "(JSON_ARRAY())");
    }

    #[test]
    fn test_prefixed_literal_defaults() {
        let bit = Field::new("flag", DataType::Bit).with_length(1);
        let binary = Field::new("h", DataType::Binary).with_length(1);
        let text = Field::new("s", DataType::VarChar);

        let mysql = MySql::default();
        assert_eq!(format_default(&bit, "b'0'", &mysql), "b'0'");
        assert_eq!(format_default(&binary, "x'00'", &mysql), "x'00'");
        assert_eq!(format_default(&text, "_utf8mb4'abc'", &mysql), "_utf8mb4'abc'");

        assert_eq!(format_default(&bit, "b'0'", &Postgres), "b'0'");
        assert_eq!(format_default(&binary, "x'00'", &Postgres), "'\\x00'");
        assert_eq!(format_default(&text, "_utf8mb4'abc'", &Postgres), "'abc'");

        assert_eq!(format_default(&bit, "b'101'", &Sqlite), "5");
        assert_eq!(format_default(&binary, "X'FF'", &Sqlite), "X'FF'");
    }

    #[test]
    fn test_quoted_text_is_not_a_prefixed_literal() {
        let text = Field::new("s", DataType::VarChar);
        assert_eq!(default_of(text.clone(), "don't 'x'"), "'don''t ''x'''");
        assert_eq!(default_of(text, "it's'"), "'it''s'''");
    }

    #[test]
    fn test_non_numeric_value_on_numeric_column_is_quoted() {
        assert_eq!(default_of(Field::new("n", DataType::Int), "abc"), "'abc'");
    }

    #[test]
    fn test_column_def_keeps_auto_increment_on_primary_key() {
        let table = Table::new("t");
        let field = Field::new("id", DataType::Int).primary_key().auto_increment();
        let column = column_def(&table, &field, &MySql::default(), &GenerationOptions::default());

        assert_eq!(column.options, vec![ColumnOption::AutoIncrement]);
    }

    #[test]
    fn test_column_def_without_auto_increment_option() {
        let table = Table::new("t");
        let field = Field::new("id", DataType::Int).primary_key().auto_increment();
        let options = GenerationOptions {
            include_auto_increment: false,
            ..Default::default()
        };

        let column = column_def(&table, &field, &Postgres, &options);
        assert_eq!(column.data_type, "INTEGER");
        assert!(column.options.is_empty());
    }

    #[traced_test]
    #[test]
    fn test_auto_increment_on_non_key_column_is_dropped() {
        let table = Table::new("events");
        let field = Field::new("seq", DataType::BigInt).auto_increment();
        let column = column_def(&table, &field, &MySql::default(), &GenerationOptions::default());

        assert!(column.options.is_empty());
        assert!(logs_contain("Ignoring auto-increment on 'events.seq'"));
    }
}
