use crate::{
    ast::create_index::CreateIndex,
    renderer::{Render, Renderer},
};

impl Render for CreateIndex {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("CREATE INDEX ");
        if self.if_not_exists {
            r.sql.push_str("IF NOT EXISTS ");
        }
        r.push_identifier(&self.name);
        r.sql.push_str(" ON ");
        r.push_identifier(&self.table);
        r.sql.push(' ');
        if let Some(method) = &self.using {
            r.sql.push_str("USING ");
            r.sql.push_str(method);
            r.sql.push(' ');
        }
        r.push_column_list(&self.columns);
        r.sql.push(';');
    }
}
