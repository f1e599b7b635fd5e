#[derive(Debug, Clone, PartialEq)]
pub struct DropTable {
    pub table: String,
    pub if_exists: bool,
}
