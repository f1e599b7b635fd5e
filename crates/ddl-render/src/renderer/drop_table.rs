use crate::{
    ast::drop_table::DropTable,
    renderer::{Render, Renderer},
};

impl Render for DropTable {
    fn render(&self, r: &mut Renderer) {
        r.sql.push_str("DROP TABLE ");
        if self.if_exists {
            r.sql.push_str("IF EXISTS ");
        }
        r.push_identifier(&self.table);
        r.sql.push(';');
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::drop_table::DropTable,
        dialect::{MySql, Postgres, Sqlite},
        renderer::{Render, Renderer},
    };

    #[test]
    fn test_render_drop_table() {
        let ast = DropTable {
            table: "users".to_string(),
            if_exists: true,
        };

        let mysql = MySql::default();
        let mut renderer = Renderer::new(&mysql);
        ast.render(&mut renderer);
        assert_eq!(renderer.finish(), "DROP TABLE IF EXISTS `users`;");

        let mut renderer = Renderer::new(&Postgres);
        ast.render(&mut renderer);
        assert_eq!(renderer.finish(), r#"DROP TABLE IF EXISTS "users";"#);

        let mut renderer = Renderer::new(&Sqlite);
        ast.render(&mut renderer);
        assert_eq!(renderer.finish(), "DROP TABLE IF EXISTS users;");
    }
}
