use crate::{
    ast::comment::{CommentOn, CommentTarget},
    renderer::{Render, Renderer},
};

impl Render for CommentOn {
    fn render(&self, r: &mut Renderer) {
        match &self.target {
            CommentTarget::Table(table) => {
                r.sql.push_str("COMMENT ON TABLE ");
                r.push_identifier(table);
            }
            CommentTarget::Column { table, column } => {
                r.sql.push_str("COMMENT ON COLUMN ");
                r.push_identifier(table);
                r.sql.push('.');
                r.push_identifier(column);
            }
        }
        r.sql.push_str(" IS ");
        r.push_string(&self.text);
        r.sql.push(';');
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        ast::comment::{CommentOn, CommentTarget},
        dialect::Postgres,
        renderer::{Render, Renderer},
    };

    #[test]
    fn test_render_comments() {
        let table = CommentOn {
            target: CommentTarget::Table("users".to_string()),
            text: "用户表".to_string(),
        };
        let column = CommentOn {
            target: CommentTarget::Column {
                table: "users".to_string(),
                column: "name".to_string(),
            },
            text: "user's name".to_string(),
        };

        let mut renderer = Renderer::new(&Postgres);
        table.render(&mut renderer);
        renderer.sql.push('\n');
        column.render(&mut renderer);

        assert_eq!(
            renderer.finish(),
            "COMMENT ON TABLE \"users\" IS '用户表';\nCOMMENT ON COLUMN \"users\".\"name\" IS 'user''s name';"
        );
    }
}
