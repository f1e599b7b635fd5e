//! SQL generation for [`model`] tables in the MySQL, PostgreSQL and SQLite
//! dialects.
//!
//! A [`Table`](model::schema::table::Table) is turned into statement trees
//! ([`ast`]) by [`build`], with every dialect difference answered by a
//! [`dialect::Dialect`] strategy, and the trees are rendered to text by
//! [`renderer`].

pub mod ast;
pub mod build;
pub mod dialect;
pub mod generator;
pub mod options;
pub mod renderer;
pub mod types;

pub use generator::{
    generate_alter_table, generate_batch, generate_single, try_generate_batch, try_generate_single,
};
pub use options::{DialectKind, GenerationOptions, OptionsError};
pub use types::map_type;
