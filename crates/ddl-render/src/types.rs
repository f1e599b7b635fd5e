//! Logical to physical column type mapping.

use crate::options::DialectKind;
use model::{core::data_type::DataType, schema::field::Field};

const DEFAULT_VARCHAR_LENGTH: u32 = 255;
const DEFAULT_DECIMAL: (u32, u32) = (10, 2);

/// Physical type of `field` in `dialect`, assuming the newest server
/// version. Unrecognised logical types pass through unchanged.
pub fn map_type(field: &Field, dialect: DialectKind) -> String {
    match dialect {
        DialectKind::MySql => mysql_type(field, true),
        DialectKind::PostgreSql => postgres_type(field),
        DialectKind::Sqlite => sqlite_type(field).to_string(),
    }
}

/// MySQL keeps the logical name and its parameters. Servers older than 5.7
/// have no JSON type and get LONGTEXT instead.
pub fn mysql_type(field: &Field, native_json: bool) -> String {
    let data_type = &field.data_type;

    let mut physical = match data_type {
        DataType::VarChar => format!(
            "VARCHAR({})",
            field.length.unwrap_or(DEFAULT_VARCHAR_LENGTH)
        ),
        DataType::Json if !native_json => "LONGTEXT".to_string(),
        DataType::Enum | DataType::Set => {
            let members = field
                .enum_values
                .iter()
                .map(|v| format!("'{}'", v.replace('\'', "''")))
                .collect::<Vec<_>>()
                .join(",");
            format!("{}({})", data_type.name(), members)
        }
        _ => with_params(&data_type.name(), field),
    };

    if data_type.accepts_sign() {
        if field.unsigned {
            physical.push_str(" UNSIGNED");
        }
        if field.zerofill {
            physical.push_str(" ZEROFILL");
        }
    }

    physical
}

/// PostgreSQL models auto-increment structurally through the serial types.
pub fn postgres_type(field: &Field) -> String {
    let serial = field.is_auto_increment;

    match &field.data_type {
        DataType::TinyInt | DataType::SmallInt if serial => "SMALLSERIAL".to_string(),
        DataType::TinyInt | DataType::SmallInt => "SMALLINT".to_string(),
        DataType::MediumInt | DataType::Int if serial => "SERIAL".to_string(),
        DataType::MediumInt | DataType::Int => "INTEGER".to_string(),
        DataType::BigInt if serial => "BIGSERIAL".to_string(),
        DataType::BigInt => "BIGINT".to_string(),
        DataType::Float => "REAL".to_string(),
        DataType::Double => "DOUBLE PRECISION".to_string(),
        DataType::Decimal | DataType::Numeric => {
            let name = field.data_type.name();
            match (field.effective_precision(), field.scale) {
                (None, _) => format!("{}({},{})", name, DEFAULT_DECIMAL.0, DEFAULT_DECIMAL.1),
                (Some(p), Some(s)) => format!("{}({},{})", name, p, s),
                (Some(p), None) => format!("{}({})", name, p),
            }
        }
        DataType::Boolean => "BOOLEAN".to_string(),
        DataType::Bit => with_length("BIT", field.length),
        DataType::Char => with_length("CHAR", field.length),
        DataType::VarChar => format!(
            "VARCHAR({})",
            field.length.unwrap_or(DEFAULT_VARCHAR_LENGTH)
        ),
        DataType::TinyText | DataType::Text | DataType::MediumText | DataType::LongText => {
            "TEXT".to_string()
        }
        DataType::Binary
        | DataType::VarBinary
        | DataType::TinyBlob
        | DataType::Blob
        | DataType::MediumBlob
        | DataType::LongBlob => "BYTEA".to_string(),
        DataType::Date => "DATE".to_string(),
        DataType::Time => "TIME".to_string(),
        DataType::DateTime | DataType::Timestamp => "TIMESTAMP".to_string(),
        DataType::Year => "INTEGER".to_string(),
        DataType::Json => "JSONB".to_string(),
        DataType::Enum | DataType::Set => "TEXT".to_string(),
        DataType::Custom(name) => with_params(name, field),
    }
}

/// SQLite type affinities. Lengths and precisions are dropped.
pub fn sqlite_type(field: &Field) -> &str {
    match &field.data_type {
        DataType::TinyInt
        | DataType::SmallInt
        | DataType::MediumInt
        | DataType::Int
        | DataType::BigInt
        | DataType::Boolean
        | DataType::Bit
        | DataType::Year => "INTEGER",
        DataType::Float | DataType::Double | DataType::Decimal | DataType::Numeric => "REAL",
        DataType::Char
        | DataType::VarChar
        | DataType::TinyText
        | DataType::Text
        | DataType::MediumText
        | DataType::LongText
        | DataType::Json
        | DataType::Enum
        | DataType::Set => "TEXT",
        DataType::Binary
        | DataType::VarBinary
        | DataType::TinyBlob
        | DataType::Blob
        | DataType::MediumBlob
        | DataType::LongBlob => "BLOB",
        DataType::Date => "DATE",
        DataType::Time => "TIME",
        DataType::DateTime => "DATETIME",
        DataType::Timestamp => "TIMESTAMP",
        DataType::Custom(name) => name,
    }
}

/// `NAME`, `NAME(n)` or `NAME(n,s)`. Fixed-point types read their first
/// parameter from the precision.
fn with_params(name: &str, field: &Field) -> String {
    let first = if field.data_type.is_decimal() {
        field.effective_precision()
    } else {
        field.length
    };

    match (first, field.scale) {
        (Some(n), Some(s)) => format!("{}({},{})", name, n, s),
        (Some(n), None) => format!("{}({})", name, n),
        (None, _) => name.to_string(),
    }
}

fn with_length(name: &str, length: Option<u32>) -> String {
    match length {
        Some(n) => format!("{}({})", name, n),
        None => name.to_string(),
    }
}
