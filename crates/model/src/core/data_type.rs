use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::{borrow::Cow, collections::HashMap, fmt};

/// Engine-neutral column type tag stored on a [`Field`](crate::schema::field::Field).
///
/// Names that are not recognised are kept verbatim in [`DataType::Custom`] so
/// they can be passed through to any dialect unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    TinyInt,
    SmallInt,
    MediumInt,
    Int,
    BigInt,
    Float,
    Double,
    Decimal,
    Numeric,
    Boolean,
    Bit,
    Char,
    VarChar,
    TinyText,
    Text,
    MediumText,
    LongText,
    Binary,
    VarBinary,
    TinyBlob,
    Blob,
    MediumBlob,
    LongBlob,
    Date,
    Time,
    DateTime,
    Timestamp,
    Year,
    Json,
    Enum,
    Set,
    Custom(String),
}

lazy_static! {
    static ref TYPE_NAME_MAP: HashMap<&'static str, DataType> = build_type_name_map();
}

impl DataType {
    /// Resolves a type keyword as written in DDL. Lookup is case-insensitive
    /// and accepts the common MySQL, PostgreSQL and SQLite spellings.
    pub fn from_name(type_name: &str) -> Self {
        let normalized = Self::normalize_type_name(type_name);
        TYPE_NAME_MAP
            .get(normalized.as_str())
            .cloned()
            .unwrap_or(DataType::Custom(normalized))
    }

    /// Canonical logical name, e.g. `VARCHAR` or `DATETIME`.
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            DataType::TinyInt => Cow::Borrowed("TINYINT"),
            DataType::SmallInt => Cow::Borrowed("SMALLINT"),
            DataType::MediumInt => Cow::Borrowed("MEDIUMINT"),
            DataType::Int => Cow::Borrowed("INT"),
            DataType::BigInt => Cow::Borrowed("BIGINT"),
            DataType::Float => Cow::Borrowed("FLOAT"),
            DataType::Double => Cow::Borrowed("DOUBLE"),
            DataType::Decimal => Cow::Borrowed("DECIMAL"),
            DataType::Numeric => Cow::Borrowed("NUMERIC"),
            DataType::Boolean => Cow::Borrowed("BOOLEAN"),
            DataType::Bit => Cow::Borrowed("BIT"),
            DataType::Char => Cow::Borrowed("CHAR"),
            DataType::VarChar => Cow::Borrowed("VARCHAR"),
            DataType::TinyText => Cow::Borrowed("TINYTEXT"),
            DataType::Text => Cow::Borrowed("TEXT"),
            DataType::MediumText => Cow::Borrowed("MEDIUMTEXT"),
            DataType::LongText => Cow::Borrowed("LONGTEXT"),
            DataType::Binary => Cow::Borrowed("BINARY"),
            DataType::VarBinary => Cow::Borrowed("VARBINARY"),
            DataType::TinyBlob => Cow::Borrowed("TINYBLOB"),
            DataType::Blob => Cow::Borrowed("BLOB"),
            DataType::MediumBlob => Cow::Borrowed("MEDIUMBLOB"),
            DataType::LongBlob => Cow::Borrowed("LONGBLOB"),
            DataType::Date => Cow::Borrowed("DATE"),
            DataType::Time => Cow::Borrowed("TIME"),
            DataType::DateTime => Cow::Borrowed("DATETIME"),
            DataType::Timestamp => Cow::Borrowed("TIMESTAMP"),
            DataType::Year => Cow::Borrowed("YEAR"),
            DataType::Json => Cow::Borrowed("JSON"),
            DataType::Enum => Cow::Borrowed("ENUM"),
            DataType::Set => Cow::Borrowed("SET"),
            DataType::Custom(name) => Cow::Borrowed(name),
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(
            self,
            DataType::TinyInt
                | DataType::SmallInt
                | DataType::MediumInt
                | DataType::Int
                | DataType::BigInt
        )
    }

    pub fn is_decimal(&self) -> bool {
        matches!(self, DataType::Decimal | DataType::Numeric)
    }

    /// Integer, fixed-point and floating-point types.
    pub fn is_numeric(&self) -> bool {
        self.is_integer()
            || self.is_decimal()
            || matches!(self, DataType::Float | DataType::Double | DataType::Bit)
    }

    pub fn is_character(&self) -> bool {
        matches!(self, DataType::Char | DataType::VarChar)
    }

    pub fn is_text(&self) -> bool {
        matches!(
            self,
            DataType::TinyText | DataType::Text | DataType::MediumText | DataType::LongText
        )
    }

    pub fn is_binary(&self) -> bool {
        matches!(
            self,
            DataType::Binary
                | DataType::VarBinary
                | DataType::TinyBlob
                | DataType::Blob
                | DataType::MediumBlob
                | DataType::LongBlob
        )
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            DataType::Date | DataType::Time | DataType::DateTime | DataType::Timestamp
        )
    }

    /// Whether `UNSIGNED` / `ZEROFILL` are meaningful for this type.
    pub fn accepts_sign(&self) -> bool {
        self.is_integer() || self.is_decimal() || matches!(self, DataType::Float | DataType::Double)
    }

    fn normalize_type_name(type_name: &str) -> String {
        type_name
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_uppercase()
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        DataType::from_name(&value)
    }
}

impl From<&str> for DataType {
    fn from(value: &str) -> Self {
        DataType::from_name(value)
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        value.name().into_owned()
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn build_type_name_map() -> HashMap<&'static str, DataType> {
    use DataType::*;

    let entries = [
        ("TINYINT", TinyInt),
        ("SMALLINT", SmallInt),
        ("INT2", SmallInt),
        ("MEDIUMINT", MediumInt),
        ("INT", Int),
        ("INTEGER", Int),
        ("INT4", Int),
        ("BIGINT", BigInt),
        ("INT8", BigInt),
        ("FLOAT", Float),
        ("FLOAT4", Float),
        ("REAL", Float),
        ("DOUBLE", Double),
        ("DOUBLE PRECISION", Double),
        ("FLOAT8", Double),
        ("DECIMAL", Decimal),
        ("DEC", Decimal),
        ("FIXED", Decimal),
        ("NUMERIC", Numeric),
        ("BOOLEAN", Boolean),
        ("BOOL", Boolean),
        ("BIT", Bit),
        ("CHAR", Char),
        ("CHARACTER", Char),
        ("BPCHAR", Char),
        ("VARCHAR", VarChar),
        ("CHARACTER VARYING", VarChar),
        ("TINYTEXT", TinyText),
        ("TEXT", Text),
        ("MEDIUMTEXT", MediumText),
        ("LONGTEXT", LongText),
        ("BINARY", Binary),
        ("VARBINARY", VarBinary),
        ("TINYBLOB", TinyBlob),
        ("BLOB", Blob),
        ("BYTEA", Blob),
        ("MEDIUMBLOB", MediumBlob),
        ("LONGBLOB", LongBlob),
        ("DATE", Date),
        ("TIME", Time),
        ("TIME WITHOUT TIME ZONE", Time),
        ("TIME WITH TIME ZONE", Time),
        ("TIMETZ", Time),
        ("DATETIME", DateTime),
        ("TIMESTAMP", Timestamp),
        ("TIMESTAMP WITHOUT TIME ZONE", Timestamp),
        ("TIMESTAMP WITH TIME ZONE", Timestamp),
        ("TIMESTAMPTZ", Timestamp),
        ("YEAR", Year),
        ("JSON", Json),
        ("JSONB", Json),
        ("ENUM", Enum),
        ("SET", Set),
    ];

    let mut map = HashMap::new();
    for (name, data_type) in entries {
        map.insert(name, data_type);
    }
    map
}
