//! Defines the core rendering trait and context for converting AST to SQL.

use crate::{ast::Statement, dialect::Dialect};

pub mod alter_table;
pub mod comment;
pub mod create_index;
pub mod create_table;
pub mod drop_table;

/// A trait for any AST node that can be rendered into a SQL string.
pub trait Render {
    fn render(&self, renderer: &mut Renderer);
}

/// Accumulates the SQL text and gives access to the dialect for
/// syntax-specific details.
pub struct Renderer<'a> {
    pub sql: String,
    pub dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    pub fn new(dialect: &'a dyn Dialect) -> Self {
        Self {
            sql: String::new(),
            dialect,
        }
    }

    /// Consumes the renderer and returns the final SQL string.
    pub fn finish(self) -> String {
        self.sql
    }

    pub fn push_identifier(&mut self, ident: &str) {
        let quoted = self.dialect.quote_identifier(ident);
        self.sql.push_str(&quoted);
    }

    pub fn push_string(&mut self, value: &str) {
        let quoted = self.dialect.quote_string(value);
        self.sql.push_str(&quoted);
    }

    /// `(a, b, c)` with every name quoted.
    pub fn push_column_list(&mut self, columns: &[String]) {
        let quoted: Vec<String> = columns
            .iter()
            .map(|c| self.dialect.quote_identifier(c))
            .collect();
        self.sql.push('(');
        self.sql.push_str(&quoted.join(", "));
        self.sql.push(')');
    }
}

impl Render for Statement {
    fn render(&self, r: &mut Renderer) {
        match self {
            Statement::Note(text) => {
                r.sql.push_str("-- ");
                r.sql.push_str(text);
            }
            Statement::DropTable(drop) => drop.render(r),
            Statement::CreateTable(create) => create.render(r),
            Statement::CreateIndex(index) => index.render(r),
            Statement::Comment(comment) => comment.render(r),
            Statement::AlterTable(alter) => alter.render(r),
            Statement::SetNames { charset, collation } => {
                r.sql
                    .push_str(&format!("SET NAMES {charset} COLLATE {collation};"));
            }
            Statement::SetVariable { name, value } => {
                r.sql.push_str(&format!("SET {name} = {value};"));
            }
        }
    }
}

/// Renders `statements` one per line.
pub fn render_script(statements: &[Statement], dialect: &dyn Dialect) -> String {
    let mut renderer = Renderer::new(dialect);
    for (i, statement) in statements.iter().enumerate() {
        if i > 0 {
            renderer.sql.push('\n');
        }
        statement.render(&mut renderer);
    }
    renderer.finish()
}
