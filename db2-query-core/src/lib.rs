//! DB2 statement builder
//!
//! Translates relational operations that have no portable SQL form into the
//! DB2 dialect: `TRUNCATE ... IMMEDIATE`, identity restarts, `SET INTEGRITY`,
//! `SET DATA TYPE` column changes, composite membership tests through
//! `SYSIBM.SYSDUMMY1` and schema-aware inserts. Literal values are never
//! inlined; they are bound to named placeholders collected in a
//! [`ParamCollector`] owned by the caller.

pub mod builder;
pub mod config;
pub mod error;
pub mod executor;
pub mod operator;
pub mod params;
pub mod quote;
pub mod schema;
pub mod types;
pub mod value;

// Re-export main types
pub use builder::{
    AnsiBuilder, Db2QueryBuilder, IntoInsertData, Row, SortDirection, StatementBuilder,
};
pub use config::BuilderConfig;
pub use error::{Error, Result};
pub use executor::any::AnyConnectionPool;
pub use executor::ConnectionPool;
pub use operator::{op, IntoOperator, Operator};
pub use params::ParamCollector;
pub use quote::{Quoter, StandardQuoter};
pub use schema::{ColumnKind, ColumnSchema, TableName, TableSchema};
pub use types::TypeMap;
pub use value::{expr, ColumnValue, Expression, Value};

/// Create a DB2 statement builder backed by the given pool
pub fn db2<P>(pool: P) -> Db2QueryBuilder<P> {
    Db2QueryBuilder::new(pool)
}
