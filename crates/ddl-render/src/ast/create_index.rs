/// A standalone `CREATE INDEX`, used by dialects without inline key clauses.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateIndex {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    pub if_not_exists: bool,
    /// Access method, e.g. `GIST`.
    pub using: Option<String>,
}
