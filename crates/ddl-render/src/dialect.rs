//! Defines the `Dialect` trait for database-specific SQL syntax.
//!
//! Each target database is one strategy object, selected once per
//! generation call by [`dialect_for`]. Everything that differs between the
//! targets (quoting, physical types, where indexes go, table options and
//! comments) is answered here so the statement builders stay uniform.

use crate::{
    ast::{
        Statement,
        comment::{CommentOn, CommentTarget},
        create_index::CreateIndex,
        create_table::{ColumnOption, TableConstraint, TableOption},
    },
    options::{DialectKind, GenerationOptions},
    types::{mysql_type, postgres_type, sqlite_type},
};
use model::schema::{
    field::Field,
    index::{Index, IndexKind},
    table::Table,
};
use std::collections::HashSet;
use tracing::warn;

const DEFAULT_ENGINE: &str = "InnoDB";

/// Index clauses of one table, split by where they are emitted.
#[derive(Debug, Default, PartialEq)]
pub struct IndexPlan {
    /// Lines inside the `CREATE TABLE` body.
    pub constraints: Vec<TableConstraint>,
    /// Statements after the `CREATE TABLE`.
    pub statements: Vec<Statement>,
}

pub trait Dialect: Send + Sync {
    fn kind(&self) -> DialectKind;

    /// Returns the display name of the dialect (e.g. "PostgreSQL").
    fn name(&self) -> String;

    /// Wraps an identifier in the dialect's quotation marks.
    ///
    /// - MySQL uses backticks: `` `my_column` ``
    /// - PostgreSQL uses double quotes: `"my_column"`
    /// - SQLite output is left bare: `my_column`
    fn quote_identifier(&self, ident: &str) -> String;

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Physical type of a column, see [`crate::types`].
    fn render_data_type(&self, field: &Field) -> String;

    /// Clauses after the type and default of `field`.
    fn column_options(
        &self,
        _table: &Table,
        _field: &Field,
        _options: &GenerationOptions,
    ) -> Vec<ColumnOption> {
        Vec::new()
    }

    /// True when the primary key is declared on its column and the separate
    /// `PRIMARY KEY (...)` clause is left out.
    fn inlines_primary_key(&self, _table: &Table, _options: &GenerationOptions) -> bool {
        false
    }

    fn emit_indexes(&self, table: &Table, options: &GenerationOptions) -> IndexPlan;

    /// Options after the closing parenthesis of `CREATE TABLE`.
    fn emit_table_options(&self, _table: &Table, _options: &GenerationOptions) -> Vec<TableOption> {
        Vec::new()
    }

    /// Comment statements for dialects without inline comment syntax.
    fn emit_comments(&self, _table: &Table, _options: &GenerationOptions) -> Vec<Statement> {
        Vec::new()
    }
}

/// Picks the strategy for `options.dialect`.
pub fn dialect_for(options: &GenerationOptions) -> Box<dyn Dialect> {
    match options.dialect {
        DialectKind::MySql => Box::new(MySql {
            version: options.version_number(),
        }),
        DialectKind::PostgreSql => Box::new(Postgres),
        DialectKind::Sqlite => Box::new(Sqlite),
    }
}

#[derive(Debug, Clone, Default)]
pub struct MySql {
    /// `major.minor` of the target server, newest when unknown.
    pub version: Option<(u32, u32)>,
}

impl MySql {
    fn native_json(&self) -> bool {
        self.version.is_none_or(|version| version >= (5, 7))
    }
}

impl Dialect for MySql {
    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn name(&self) -> String {
        "MySQL".into()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!("`{}`", ident.replace('`', "``"))
    }

    fn quote_string(&self, value: &str) -> String {
        format!("'{}'", value.replace('\\', "\\\\").replace('\'', "''"))
    }

    fn render_data_type(&self, field: &Field) -> String {
        mysql_type(field, self.native_json())
    }

    fn column_options(
        &self,
        _table: &Table,
        field: &Field,
        options: &GenerationOptions,
    ) -> Vec<ColumnOption> {
        let mut column_options = Vec::new();
        if field.is_auto_increment {
            column_options.push(ColumnOption::AutoIncrement);
        }
        if let Some(on_update) = &field.on_update {
            column_options.push(ColumnOption::OnUpdate(on_update.clone()));
        }
        if options.include_comments {
            if let Some(comment) = &field.comment {
                column_options.push(ColumnOption::Comment(comment.clone()));
            }
        }
        column_options
    }

    fn emit_indexes(&self, table: &Table, _options: &GenerationOptions) -> IndexPlan {
        let mut plan = IndexPlan::default();
        let mut names: HashSet<String> = table.indexes.iter().map(|i| i.name.clone()).collect();

        for field in table.fields.iter().filter(|f| f.unique && !f.is_primary_key) {
            if !declares_key(table, IndexKind::Unique, &field.name) {
                plan.constraints.push(TableConstraint::Key {
                    kind: IndexKind::Unique,
                    name: fresh_name(&mut names, format!("uk_{}", field.name)),
                    columns: vec![field.name.clone()],
                });
            }
        }

        for index in &table.indexes {
            plan.constraints.push(TableConstraint::Key {
                kind: index.kind,
                name: index.name.clone(),
                columns: index.fields.clone(),
            });
        }

        for field in table.fields.iter().filter(|f| f.index) {
            if !declares_key(table, IndexKind::Normal, &field.name) {
                plan.constraints.push(TableConstraint::Key {
                    kind: IndexKind::Normal,
                    name: fresh_name(&mut names, format!("idx_{}", field.name)),
                    columns: vec![field.name.clone()],
                });
            }
        }

        plan
    }

    fn emit_table_options(&self, table: &Table, options: &GenerationOptions) -> Vec<TableOption> {
        let mut table_options = Vec::new();

        let engine = table
            .engine
            .clone()
            .or_else(|| options.engine.clone())
            .unwrap_or_else(|| DEFAULT_ENGINE.to_string());
        table_options.push(TableOption::Engine(engine));

        if options.include_auto_increment {
            if let Some(start) = table.auto_increment_start {
                table_options.push(TableOption::AutoIncrement(start));
            }
        }

        if options.include_charset {
            let charset = table.charset.as_ref().unwrap_or(&options.charset);
            let collation = table.collation.as_ref().unwrap_or(&options.collation);
            table_options.push(TableOption::Charset(charset.clone()));
            table_options.push(TableOption::Collate(collation.clone()));
        }

        if let Some(row_format) = &table.row_format {
            table_options.push(TableOption::RowFormat(row_format.clone()));
        }
        if let Some(table_space) = &table.table_space {
            table_options.push(TableOption::TableSpace(table_space.clone()));
        }

        if options.include_comments {
            if let Some(comment) = &table.comment {
                table_options.push(TableOption::Comment(comment.clone()));
            }
        }

        table_options
    }
}

#[derive(Debug, Clone)]
pub struct Postgres;

impl Dialect for Postgres {
    fn kind(&self) -> DialectKind {
        DialectKind::PostgreSql
    }

    fn name(&self) -> String {
        "PostgreSQL".into()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        format!(r#""{}""#, ident.replace('"', r#""""#))
    }

    fn render_data_type(&self, field: &Field) -> String {
        postgres_type(field)
    }

    fn emit_indexes(&self, table: &Table, options: &GenerationOptions) -> IndexPlan {
        standalone_indexes(self, table, options, Some("GIST"))
    }

    fn emit_comments(&self, table: &Table, options: &GenerationOptions) -> Vec<Statement> {
        if !options.include_comments {
            return Vec::new();
        }

        let table_comment = table.comment.iter().map(|text| {
            Statement::Comment(CommentOn {
                target: CommentTarget::Table(table.name.clone()),
                text: text.clone(),
            })
        });

        let column_comments = table.fields.iter().filter_map(|field| {
            field.comment.as_ref().map(|text| {
                Statement::Comment(CommentOn {
                    target: CommentTarget::Column {
                        table: table.name.clone(),
                        column: field.name.clone(),
                    },
                    text: text.clone(),
                })
            })
        });

        table_comment.chain(column_comments).collect()
    }
}

#[derive(Debug, Clone)]
pub struct Sqlite;

impl Dialect for Sqlite {
    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn name(&self) -> String {
        "SQLite".into()
    }

    fn quote_identifier(&self, ident: &str) -> String {
        ident.to_string()
    }

    fn render_data_type(&self, field: &Field) -> String {
        sqlite_type(field).to_string()
    }

    fn column_options(
        &self,
        table: &Table,
        field: &Field,
        options: &GenerationOptions,
    ) -> Vec<ColumnOption> {
        if field.is_auto_increment && self.inlines_primary_key(table, options) {
            vec![ColumnOption::PrimaryKeyAutoIncrement]
        } else {
            Vec::new()
        }
    }

    /// `AUTOINCREMENT` is only legal on an `INTEGER PRIMARY KEY` column.
    fn inlines_primary_key(&self, table: &Table, options: &GenerationOptions) -> bool {
        options.include_auto_increment
            && table
                .sole_primary_key()
                .is_some_and(|f| f.is_auto_increment && f.data_type.is_integer())
    }

    fn emit_indexes(&self, table: &Table, options: &GenerationOptions) -> IndexPlan {
        standalone_indexes(self, table, options, None)
    }
}

/// Index plan for dialects that only allow `UNIQUE` inside the table body.
/// Every other index becomes a trailing `CREATE INDEX "<table>_<cols>"`.
fn standalone_indexes(
    dialect: &dyn Dialect,
    table: &Table,
    options: &GenerationOptions,
    spatial_method: Option<&str>,
) -> IndexPlan {
    let mut plan = IndexPlan::default();
    let mut names = HashSet::new();

    for field in table.fields.iter().filter(|f| f.unique && !f.is_primary_key) {
        plan.constraints.push(TableConstraint::Unique {
            name: None,
            columns: vec![field.name.clone()],
        });
    }

    let mut create_index = |columns: &[String], using: Option<&str>| {
        let name = format!("{}_{}", table.name, columns.join("_"));
        if names.insert(name.clone()) {
            plan.statements.push(Statement::CreateIndex(CreateIndex {
                name,
                table: table.name.clone(),
                columns: columns.to_vec(),
                if_not_exists: options.include_if_not_exists,
                using: using.map(str::to_string),
            }));
        }
    };

    for index in &table.indexes {
        match index.kind {
            IndexKind::Unique => plan.constraints.push(TableConstraint::Unique {
                name: Some(index.name.clone()),
                columns: index.fields.clone(),
            }),
            IndexKind::Normal => create_index(&index.fields, None),
            IndexKind::Fulltext => {
                downgrade(dialect, index);
                create_index(&index.fields, None);
            }
            IndexKind::Spatial => match spatial_method {
                Some(method) => create_index(&index.fields, Some(method)),
                None => {
                    downgrade(dialect, index);
                    create_index(&index.fields, None);
                }
            },
        }
    }

    for field in table.fields.iter().filter(|f| f.index) {
        create_index(std::slice::from_ref(&field.name), None);
    }

    plan
}

/// Whether `table` already lists a `kind` key on exactly `column`.
fn declares_key(table: &Table, kind: IndexKind, column: &str) -> bool {
    table
        .indexes
        .iter()
        .any(|index| index.kind == kind && index.fields == [column])
}

/// `base`, or the first free `base_2`, `base_3`, ...
fn fresh_name(names: &mut HashSet<String>, base: String) -> String {
    if names.insert(base.clone()) {
        return base;
    }

    let mut suffix = 2;
    loop {
        let name = format!("{}_{}", base, suffix);
        if names.insert(name.clone()) {
            return name;
        }
        suffix += 1;
    }
}

fn downgrade(dialect: &dyn Dialect, index: &Index) {
    warn!(
        "{} has no {} index, emitting '{}' as a plain index",
        dialect.name(),
        index.kind,
        index.name
    );
}
