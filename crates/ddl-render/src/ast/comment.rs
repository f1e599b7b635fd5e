/// PostgreSQL `COMMENT ON ... IS '...'`.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentOn {
    pub target: CommentTarget,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentTarget {
    Table(String),
    Column { table: String, column: String },
}
