//! Statement builders

pub mod ansi;
pub mod common;
pub mod db2;
mod insert;
mod integrity;
mod sequence;

// Re-export types from submodules
pub use ansi::AnsiBuilder;
pub use common::{IntoInsertData, Row, SortDirection, StatementBuilder};
pub use db2::Db2QueryBuilder;
