use crate::{
    ast::{
        Statement,
        create_table::{CreateTable, TableConstraint},
        drop_table::DropTable,
    },
    build::column_def,
    dialect::Dialect,
    options::GenerationOptions,
};
use model::schema::table::Table;

/// Every statement needed to (re)create `table`, in output order.
pub fn table_statements(
    table: &Table,
    dialect: &dyn Dialect,
    options: &GenerationOptions,
) -> Vec<Statement> {
    let mut statements = Vec::new();

    if options.include_comments {
        statements.push(Statement::Note("----------------------------".to_string()));
        statements.push(Statement::Note(format!("{} 表结构", table.name)));
        statements.push(Statement::Note("----------------------------".to_string()));
    }

    if options.include_drop_table {
        statements.push(Statement::DropTable(DropTable {
            table: table.name.clone(),
            if_exists: true,
        }));
    }

    let plan = dialect.emit_indexes(table, options);
    statements.push(Statement::CreateTable(CreateTable {
        table: table.name.clone(),
        if_not_exists: options.include_if_not_exists,
        columns: table
            .fields
            .iter()
            .map(|field| column_def(table, field, dialect, options))
            .collect(),
        constraints: constraints(table, dialect, options, plan.constraints),
        options: dialect.emit_table_options(table, options),
    }));

    statements.extend(plan.statements);
    statements.extend(dialect.emit_comments(table, options));
    statements
}

fn constraints(
    table: &Table,
    dialect: &dyn Dialect,
    options: &GenerationOptions,
    index_constraints: Vec<TableConstraint>,
) -> Vec<TableConstraint> {
    let mut constraints = Vec::new();

    let primary_key: Vec<String> = table
        .primary_key_fields()
        .map(|field| field.name.clone())
        .collect();
    if !primary_key.is_empty() && !dialect.inlines_primary_key(table, options) {
        constraints.push(TableConstraint::PrimaryKey {
            columns: primary_key,
        });
    }

    constraints.extend(index_constraints);

    constraints.extend(table.foreign_keys.iter().map(|fk| TableConstraint::ForeignKey {
        name: fk.name.clone(),
        columns: fk.fields.clone(),
        referenced_table: fk.referenced_table.clone(),
        referenced_columns: fk.referenced_fields.clone(),
        on_delete: fk.on_delete.clone(),
        on_update: fk.on_update.clone(),
    }));

    constraints.extend(table.checks.iter().map(|check| TableConstraint::Check {
        name: check.name.clone(),
        expression: check.expression.clone(),
    }));

    constraints
}
