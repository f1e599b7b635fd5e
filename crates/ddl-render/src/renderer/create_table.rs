use crate::{
    ast::create_table::{ColumnDef, ColumnOption, CreateTable, TableConstraint, TableOption},
    renderer::{Render, Renderer},
};
use model::schema::index::IndexKind;

impl Render for CreateTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE TABLE ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.push_identifier(&self.table);
        r.sql.push_str(" (");

        let num_cols = self.columns.len();
        for (i, col) in self.columns.iter().enumerate() {
            r.sql.push_str("\n\t");
            col.render(r);
            if i + 1 < num_cols || !self.constraints.is_empty() {
                r.sql.push(',');
            }
        }

        for (i, constraint) in self.constraints.iter().enumerate() {
            r.sql.push_str("\n\t");
            constraint.render(r);
            if i + 1 < self.constraints.len() {
                r.sql.push(',');
            }
        }

        r.sql.push_str("\n)");
        for option in &self.options {
            r.sql.push(' ');
            option.render(r);
        }
        r.sql.push(';');
    }
}

impl Render for ColumnDef {
    fn render(&self, r: &mut Renderer) {
        r.push_identifier(&self.name);
        r.sql.push(' ');
        r.sql.push_str(&self.data_type);

        if !self.is_nullable {
            r.sql.push_str(" NOT NULL");
        }
        if let Some(default) = &self.default_value {
            r.sql.push_str(" DEFAULT ");
            r.sql.push_str(default);
        }

        for option in &self.options {
            r.sql.push(' ');
            option.render(r);
        }
    }
}

impl Render for ColumnOption {
    fn render(&self, r: &mut Renderer) {
        match self {
            ColumnOption::AutoIncrement => r.sql.push_str("AUTO_INCREMENT"),
            ColumnOption::PrimaryKeyAutoIncrement => r.sql.push_str("PRIMARY KEY AUTOINCREMENT"),
            ColumnOption::OnUpdate(expr) => {
                r.sql.push_str("ON UPDATE ");
                r.sql.push_str(expr);
            }
            ColumnOption::Comment(comment) => {
                r.sql.push_str("COMMENT ");
                r.push_string(comment);
            }
        }
    }
}

impl Render for TableConstraint {
    fn render(&self, r: &mut Renderer) {
        match self {
            TableConstraint::PrimaryKey { columns } => {
                r.sql.push_str("PRIMARY KEY ");
                r.push_column_list(columns);
            }
            TableConstraint::Key {
                kind,
                name,
                columns,
            } => {
                r.sql.push_str(match kind {
                    IndexKind::Normal => "KEY ",
                    IndexKind::Unique => "UNIQUE KEY ",
                    IndexKind::Fulltext => "FULLTEXT KEY ",
                    IndexKind::Spatial => "SPATIAL KEY ",
                });
                r.push_identifier(name);
                r.sql.push(' ');
                r.push_column_list(columns);
            }
            TableConstraint::Unique { name, columns } => {
                if let Some(name) = name {
                    r.sql.push_str("CONSTRAINT ");
                    r.push_identifier(name);
                    r.sql.push(' ');
                }
                r.sql.push_str("UNIQUE ");
                r.push_column_list(columns);
            }
            TableConstraint::ForeignKey {
                name,
                columns,
                referenced_table,
                referenced_columns,
                on_delete,
                on_update,
            } => {
                r.sql.push_str("CONSTRAINT ");
                r.push_identifier(name);
                r.sql.push_str(" FOREIGN KEY ");
                r.push_column_list(columns);

                r.sql.push_str(" REFERENCES ");
                r.push_identifier(referenced_table);
                // Without columns the referenced table's primary key is used
                if !referenced_columns.is_empty() {
                    r.sql.push(' ');
                    r.push_column_list(referenced_columns);
                }

                if let Some(action) = on_delete {
                    r.sql.push_str(" ON DELETE ");
                    r.sql.push_str(action);
                }
                if let Some(action) = on_update {
                    r.sql.push_str(" ON UPDATE ");
                    r.sql.push_str(action);
                }
            }
            TableConstraint::Check { name, expression } => {
                if let Some(name) = name {
                    r.sql.push_str("CONSTRAINT ");
                    r.push_identifier(name);
                    r.sql.push(' ');
                }
                r.sql.push_str("CHECK (");
                r.sql.push_str(expression);
                r.sql.push(')');
            }
        }
    }
}

impl Render for TableOption {
    fn render(&self, r: &mut Renderer) {
        match self {
            TableOption::Engine(engine) => r.sql.push_str(&format!("ENGINE = {engine}")),
            TableOption::AutoIncrement(start) => {
                r.sql.push_str(&format!("AUTO_INCREMENT = {start}"))
            }
            TableOption::Charset(charset) => {
                r.sql.push_str(&format!("DEFAULT CHARSET = {charset}"))
            }
            TableOption::Collate(collation) => r.sql.push_str(&format!("COLLATE = {collation}")),
            TableOption::RowFormat(format) => r.sql.push_str(&format!("ROW_FORMAT = {format}")),
            TableOption::TableSpace(space) => r.sql.push_str(&format!("TABLESPACE {space}")),
            TableOption::Comment(comment) => {
                r.sql.push_str("COMMENT = ");
                r.push_string(comment);
            }
        }
    }
}
