use crate::{
    ast::alter_table::{AlterTable, AlterTableOperation},
    renderer::{Render, Renderer},
};

impl Render for AlterTable {
    fn render(&self, r: &mut Renderer) {
        // One ALTER TABLE per operation; SQLite rejects multi-clause forms
        for (i, op) in self.operations.iter().enumerate() {
            if i > 0 {
                r.sql.push('\n');
            }
            r.sql.push_str("ALTER TABLE ");
            r.push_identifier(&self.table);
            r.sql.push(' ');
            op.render(r);
            r.sql.push(';');
        }
    }
}

impl Render for AlterTableOperation {
    fn render(&self, r: &mut Renderer) {
        match self {
            AlterTableOperation::AddColumn(col) => {
                r.sql.push_str("ADD COLUMN ");
                col.render(r);
            }
            AlterTableOperation::ModifyColumn(col) => {
                r.sql.push_str("MODIFY COLUMN ");
                col.render(r);
            }
            AlterTableOperation::DropColumn(column) => {
                r.sql.push_str("DROP COLUMN ");
                r.push_identifier(column);
            }
            AlterTableOperation::SetType { column, data_type } => {
                r.sql.push_str("ALTER COLUMN ");
                r.push_identifier(column);
                r.sql.push_str(" TYPE ");
                r.sql.push_str(data_type);
            }
            AlterTableOperation::SetNotNull { column, not_null } => {
                r.sql.push_str("ALTER COLUMN ");
                r.push_identifier(column);
                r.sql
                    .push_str(if *not_null { " SET NOT NULL" } else { " DROP NOT NULL" });
            }
            AlterTableOperation::SetDefault { column, value } => {
                r.sql.push_str("ALTER COLUMN ");
                r.push_identifier(column);
                match value {
                    Some(value) => {
                        r.sql.push_str(" SET DEFAULT ");
                        r.sql.push_str(value);
                    }
                    None => r.sql.push_str(" DROP DEFAULT"),
                }
            }
        }
    }
}
