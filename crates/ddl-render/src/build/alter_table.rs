use crate::{
    ast::{
        Statement,
        alter_table::{AlterTable, AlterTableOperation},
        comment::{CommentOn, CommentTarget},
    },
    build::column_def,
    dialect::Dialect,
    options::{DialectKind, GenerationOptions},
};
use model::schema::{field::Field, table::Table};

/// Statements that migrate `old` to `new`, comparing fields by name.
/// Empty when the field lists match.
pub fn alter_statements(
    old: &Table,
    new: &Table,
    dialect: &dyn Dialect,
    options: &GenerationOptions,
) -> Vec<Statement> {
    let mut migration = Migration::default();

    for field in &new.fields {
        match old.field(&field.name) {
            None => migration
                .operations
                .push(AlterTableOperation::AddColumn(column_def(
                    new, field, dialect, options,
                ))),
            Some(previous) if previous != field => {
                migration.change(old, new, previous, field, dialect, options)
            }
            Some(_) => {}
        }
    }

    for field in old.fields.iter().filter(|f| !new.has_field(&f.name)) {
        migration
            .operations
            .push(AlterTableOperation::DropColumn(field.name.clone()));
    }

    migration.into_statements(&new.name)
}

#[derive(Default)]
struct Migration {
    operations: Vec<AlterTableOperation>,
    /// Statements after the ALTER TABLE.
    extra: Vec<Statement>,
}

impl Migration {
    fn change(
        &mut self,
        old: &Table,
        new: &Table,
        previous: &Field,
        field: &Field,
        dialect: &dyn Dialect,
        options: &GenerationOptions,
    ) {
        match dialect.kind() {
            DialectKind::MySql => {
                self.operations
                    .push(AlterTableOperation::ModifyColumn(column_def(
                        new, field, dialect, options,
                    )));
            }
            DialectKind::PostgreSql => {
                let before = column_def(old, previous, dialect, options);
                let after = column_def(new, field, dialect, options);
                let column = field.name.clone();

                if before.data_type != after.data_type {
                    self.operations.push(AlterTableOperation::SetType {
                        column: column.clone(),
                        data_type: after.data_type,
                    });
                }
                if before.is_nullable != after.is_nullable {
                    self.operations.push(AlterTableOperation::SetNotNull {
                        column: column.clone(),
                        not_null: !after.is_nullable,
                    });
                }
                if before.default_value != after.default_value {
                    self.operations.push(AlterTableOperation::SetDefault {
                        column: column.clone(),
                        value: after.default_value,
                    });
                }
                if options.include_comments && previous.comment != field.comment {
                    self.extra.push(Statement::Comment(CommentOn {
                        target: CommentTarget::Column {
                            table: new.name.clone(),
                            column,
                        },
                        text: field.comment.clone().unwrap_or_default(),
                    }));
                }
            }
            DialectKind::Sqlite => {
                self.extra.push(Statement::Note(format!(
                    "SQLite cannot modify column '{}' in place, rebuild table '{}' to apply the change",
                    field.name, new.name
                )));
            }
        }
    }

    fn into_statements(self, table: &str) -> Vec<Statement> {
        let mut statements = Vec::new();
        if !self.operations.is_empty() {
            statements.push(Statement::AlterTable(AlterTable {
                table: table.to_string(),
                operations: self.operations,
            }));
        }
        statements.extend(self.extra);
        statements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        dialect::{MySql, Postgres, Sqlite},
        renderer::render_script,
    };
    use model::core::data_type::DataType;

    fn before() -> Table {
        Table::new("users")
            .with_field(Field::new("id", DataType::Int).not_null().primary_key())
            .with_field(Field::new("name", DataType::VarChar).with_length(50))
            .with_field(Field::new("fax", DataType::VarChar).with_length(20))
    }

    fn after() -> Table {
        Table::new("users")
            .with_field(Field::new("id", DataType::Int).not_null().primary_key())
            .with_field(
                Field::new("name", DataType::VarChar)
                    .with_length(100)
                    .not_null()
                    .with_comment("display name"),
            )
            .with_field(Field::new("age", DataType::Int).with_default("0"))
    }

    fn diff(dialect: &dyn Dialect, options: &GenerationOptions) -> String {
        render_script(&alter_statements(&before(), &after(), dialect, options), dialect)
    }

    #[test]
    fn test_identical_tables_produce_nothing() {
        let options = GenerationOptions::default();
        assert!(alter_statements(&before(), &before(), &MySql::default(), &options).is_empty());
    }

    #[test]
    fn test_mysql_diff() {
        let sql = diff(&MySql::default(), &GenerationOptions::default());

        let expected_sql = "ALTER TABLE `users` MODIFY COLUMN `name` VARCHAR(100) NOT NULL COMMENT 'display name';
ALTER TABLE `users` ADD COLUMN `age` INT DEFAULT 0;
ALTER TABLE `users` DROP COLUMN `fax`;";
        assert_eq!(sql, expected_sql);
    }

    #[test]
    fn test_postgres_diff() {
        let options = GenerationOptions::for_dialect(DialectKind::PostgreSql);
        let sql = diff(&Postgres, &options);

        let expected_sql = r#"ALTER TABLE "users" ALTER COLUMN "name" TYPE VARCHAR(100);
ALTER TABLE "users" ALTER COLUMN "name" SET NOT NULL;
ALTER TABLE "users" ADD COLUMN "age" INTEGER DEFAULT 0;
ALTER TABLE "users" DROP COLUMN "fax";
COMMENT ON COLUMN "users"."name" IS 'display name';"#;
        assert_eq!(sql, expected_sql);
    }

    #[test]
    fn test_sqlite_diff_notes_modified_columns() {
        let options = GenerationOptions::for_dialect(DialectKind::Sqlite);
        let sql = diff(&Sqlite, &options);

        assert!(sql.contains("ALTER TABLE users ADD COLUMN age INTEGER DEFAULT 0;"));
        assert!(sql.contains("ALTER TABLE users DROP COLUMN fax;"));
        assert!(sql.contains("-- SQLite cannot modify column 'name' in place"));
        assert!(!sql.contains("MODIFY"));
    }
}
