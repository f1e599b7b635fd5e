use ddl_render::OptionsError;
use ddl_syntax::error::ParseError;
use model::errors::SchemaError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read or write a file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the DDL: {0}")]
    Parse(#[from] ParseError),

    #[error("Failed to load the generation options: {0}")]
    Options(#[from] OptionsError),

    #[error("Failed to deserialize the table model JSON: {0}")]
    ModelDeserialize(#[from] serde_json::Error),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(serde_json::Error),

    #[error("Invalid table: {0}")]
    Schema(#[from] SchemaError),
}
