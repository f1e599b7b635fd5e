pub mod constraint;
pub mod field;
pub mod index;
pub mod table;
