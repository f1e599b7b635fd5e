//! The public generation calls. Every call picks its dialect strategy once,
//! builds statement trees and renders them; nothing is read from the
//! environment, so equal inputs always give equal output.

use crate::{
    ast::Statement,
    build::{alter_table::alter_statements, create_table::table_statements},
    dialect::{Dialect, dialect_for},
    options::{DialectKind, GenerationOptions},
    renderer::render_script,
};
use model::{errors::SchemaError, schema::table::Table};
use tracing::debug;

/// SQL script that (re)creates `table`.
///
/// # Panics
///
/// When `table` violates the schema invariants checked by
/// [`Table::validate`]. Use [`try_generate_single`] for tables of unknown
/// origin.
pub fn generate_single(table: &Table, options: &GenerationOptions) -> String {
    match try_generate_single(table, options) {
        Ok(sql) => sql,
        Err(err) => panic!("Cannot generate SQL for table '{}': {}", table.name, err),
    }
}

pub fn try_generate_single(table: &Table, options: &GenerationOptions) -> Result<String, SchemaError> {
    table.validate()?;
    let dialect = dialect_for(options);
    Ok(single(table, dialect.as_ref(), options))
}

/// One script for all `tables`: a header comment, then each table
/// separated by a blank line. MySQL scripts disable foreign key checks
/// around the tables.
///
/// # Panics
///
/// When any table is invalid, see [`generate_single`].
pub fn generate_batch(tables: &[Table], options: &GenerationOptions) -> String {
    match try_generate_batch(tables, options) {
        Ok(sql) => sql,
        Err(err) => panic!("Cannot generate SQL batch: {}", err),
    }
}

pub fn try_generate_batch(tables: &[Table], options: &GenerationOptions) -> Result<String, SchemaError> {
    for table in tables {
        table.validate()?;
    }

    let dialect = dialect_for(options);
    let dialect = dialect.as_ref();
    let mut sections = vec![render_script(&batch_header(tables, dialect, options), dialect)];

    let mysql = options.dialect == DialectKind::MySql;
    if mysql {
        let mut prologue = Vec::new();
        if options.include_charset {
            prologue.push(Statement::SetNames {
                charset: options.charset.clone(),
                collation: options.collation.clone(),
            });
        }
        prologue.push(foreign_key_checks(false));
        sections.push(render_script(&prologue, dialect));
    }

    for table in tables {
        debug!("Generating {} DDL for table '{}'", dialect.name(), table.name);
        sections.push(single(table, dialect, options));
    }

    if mysql {
        sections.push(render_script(&[foreign_key_checks(true)], dialect));
    }

    Ok(sections.join("\n\n"))
}

/// `ALTER TABLE` statements that turn `old` into `new`. Empty when the two
/// tables have the same fields.
pub fn generate_alter_table(old: &Table, new: &Table, options: &GenerationOptions) -> String {
    let dialect = dialect_for(options);
    let statements = alter_statements(old, new, dialect.as_ref(), options);
    render_script(&statements, dialect.as_ref())
}

fn single(table: &Table, dialect: &dyn Dialect, options: &GenerationOptions) -> String {
    render_script(&table_statements(table, dialect, options), dialect)
}

fn batch_header(tables: &[Table], dialect: &dyn Dialect, options: &GenerationOptions) -> Vec<Statement> {
    let rule = || Statement::Note("----------------------------".to_string());

    let mut header = vec![
        rule(),
        Statement::Note(format!("Target: {} {}", dialect.name(), options.version)),
        Statement::Note(format!("Tables: {}", tables.len())),
    ];
    if let Some(generated_at) = &options.generated_at {
        header.push(Statement::Note(format!("Generated at: {generated_at}")));
    }
    header.push(rule());
    header
}

fn foreign_key_checks(enabled: bool) -> Statement {
    Statement::SetVariable {
        name: "FOREIGN_KEY_CHECKS".to_string(),
        value: if enabled { "1" } else { "0" }.to_string(),
    }
}
