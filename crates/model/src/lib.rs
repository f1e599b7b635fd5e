//! Schema model shared by the DDL parser and the SQL generator.

pub mod core;
pub mod errors;
pub mod schema;
