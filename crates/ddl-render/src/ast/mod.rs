//! Statement trees produced from a [`Table`](model::schema::table::Table)
//! and turned into text by the [`renderer`](crate::renderer).

pub mod alter_table;
pub mod comment;
pub mod create_index;
pub mod create_table;
pub mod drop_table;

use alter_table::AlterTable;
use comment::CommentOn;
use create_index::CreateIndex;
use create_table::CreateTable;
use drop_table::DropTable;

/// One entry of a generated script.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// A `-- ...` line.
    Note(String),
    DropTable(DropTable),
    CreateTable(CreateTable),
    CreateIndex(CreateIndex),
    Comment(CommentOn),
    AlterTable(AlterTable),
    /// `SET NAMES <charset> COLLATE <collation>;`
    SetNames { charset: String, collation: String },
    /// `SET <name> = <value>;`
    SetVariable { name: String, value: String },
}
