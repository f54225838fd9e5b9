//! Identity column restarts

use tracing::debug;

use super::common::StatementBuilder;
use super::db2::Db2QueryBuilder;
use crate::{ConnectionPool, Error, ParamCollector, Result, Value};

impl<P> Db2QueryBuilder<P>
where
    P: ConnectionPool,
{
    /// Build `ALTER TABLE ... ALTER COLUMN ... RESTART WITH n` for the
    /// table's identity column.
    ///
    /// Without an explicit `value` the restart point is one past the current
    /// `MAX` of the identity column, read from the database; an empty table
    /// restarts at 1. The restart value is inlined since DB2 does not accept
    /// a bind variable in this position.
    ///
    /// Fails with [`Error::InvalidArgument`] when the table does not exist
    /// or has no identity column.
    pub async fn reset_sequence(&self, table: &str, value: Option<i64>) -> Result<String> {
        let schema = self
            .pool
            .table_schema(table)
            .await?
            .ok_or_else(|| Error::table_not_found(table))?;
        let sequence = schema
            .sequence_column()
            .ok_or_else(|| Error::no_sequence(table))?;

        let quoted_table = self.quote_table_name(table);
        let quoted_column = self.quote_column_name(&sequence.name);

        let value = match value {
            Some(value) => value,
            None => {
                let sql = format!("SELECT MAX({}) FROM {}", quoted_column, quoted_table);
                debug!(sql = %sql, "reading current identity maximum");
                let max = self.pool.fetch_scalar(&sql, &ParamCollector::new()).await?;
                next_value(table, max)?
            }
        };

        Ok(format!(
            "ALTER TABLE {} ALTER COLUMN {} RESTART WITH {}",
            quoted_table, quoted_column, value
        ))
    }
}

/// One past the current maximum, treating NULL (an empty table) as 0
fn next_value(table: &str, max: Option<Value>) -> Result<i64> {
    let current = match max {
        None | Some(Value::Null) => 0,
        Some(value) => value.as_i64().ok_or_else(|| {
            Error::invalid_argument(format!(
                "MAX of the identity column of '{}' is not an integer: {:?}",
                table, value
            ))
        })?,
    };

    current.checked_add(1).ok_or_else(|| {
        Error::invalid_argument(format!("identity column of '{}' is exhausted", table))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::mock::MockPool;
    use crate::{ColumnSchema, TableSchema};

    fn orders() -> TableSchema {
        TableSchema::new("APP.ORDERS")
            .column(ColumnSchema::new("id", "INTEGER").primary_key().auto_increment())
            .column(ColumnSchema::new("total", "DECIMAL(19,4)"))
            .sequence("id")
    }

    #[tokio::test]
    async fn test_explicit_value_skips_query() {
        let pool = MockPool::new().with_schema(orders());
        let builder = Db2QueryBuilder::new(&pool);

        let sql = builder.reset_sequence("APP.ORDERS", Some(100)).await.unwrap();
        assert_eq!(
            sql,
            "ALTER TABLE \"APP\".\"ORDERS\" ALTER COLUMN \"id\" RESTART WITH 100"
        );
        assert!(pool.queries().is_empty());
    }

    #[tokio::test]
    async fn test_restarts_after_current_max() {
        let pool = MockPool::new().with_schema(orders()).with_scalar(41i64);
        let builder = Db2QueryBuilder::new(&pool);

        let sql = builder.reset_sequence("APP.ORDERS", None).await.unwrap();
        assert_eq!(
            sql,
            "ALTER TABLE \"APP\".\"ORDERS\" ALTER COLUMN \"id\" RESTART WITH 42"
        );

        let queries = pool.queries();
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].0, "SELECT MAX(\"id\") FROM \"APP\".\"ORDERS\"");
        assert!(queries[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_empty_table_restarts_at_one() {
        let pool = MockPool::new().with_schema(orders());
        let builder = Db2QueryBuilder::new(&pool);

        let sql = builder.reset_sequence("APP.ORDERS", None).await.unwrap();
        assert!(sql.ends_with("RESTART WITH 1"));
    }

    #[tokio::test]
    async fn test_decimal_string_maximum() {
        let pool = MockPool::new().with_schema(orders()).with_scalar("9");
        let builder = Db2QueryBuilder::new(&pool);

        let sql = builder.reset_sequence("APP.ORDERS", None).await.unwrap();
        assert!(sql.ends_with("RESTART WITH 10"));
    }

    #[tokio::test]
    async fn test_unknown_table_is_invalid_argument() {
        let pool = MockPool::new();
        let builder = Db2QueryBuilder::new(&pool);

        for value in [None, Some(5)] {
            let err = builder.reset_sequence("missing", value).await.unwrap_err();
            assert!(err.is_invalid_argument());
            assert!(err.to_string().contains("Table not found: missing"));
        }
        assert!(pool.queries().is_empty());
    }

    #[tokio::test]
    async fn test_table_without_sequence() {
        let pool = MockPool::new().with_schema(
            TableSchema::new("audit_log").column(ColumnSchema::new("message", "CLOB")),
        );
        let builder = Db2QueryBuilder::new(&pool);

        let err = builder.reset_sequence("audit_log", Some(1)).await.unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("no sequence associated"));
    }

    #[tokio::test]
    async fn test_sequence_name_not_among_columns() {
        let pool = MockPool::new().with_schema(
            TableSchema::new("t")
                .column(ColumnSchema::new("id", "INTEGER"))
                .sequence("gone"),
        );
        let builder = Db2QueryBuilder::new(&pool);

        let err = builder.reset_sequence("t", None).await.unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[tokio::test]
    async fn test_query_failure_propagates() {
        let pool = MockPool::new()
            .with_schema(orders())
            .failing_queries("SQL0551N  not authorized");
        let builder = Db2QueryBuilder::new(&pool);

        let err = builder.reset_sequence("APP.ORDERS", None).await.unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }

    #[tokio::test]
    async fn test_introspection_failure_propagates() {
        let pool = MockPool::new().failing_introspection("connection reset");
        let builder = Db2QueryBuilder::new(&pool);

        let err = builder.reset_sequence("APP.ORDERS", Some(1)).await.unwrap_err();
        assert!(matches!(err, Error::Execution { .. }));
    }

    #[test]
    fn test_next_value() {
        assert_eq!(next_value("t", None).unwrap(), 1);
        assert_eq!(next_value("t", Some(Value::Null)).unwrap(), 1);
        assert_eq!(next_value("t", Some(Value::I32(7))).unwrap(), 8);
        assert!(next_value("t", Some(Value::String("abc".into())))
            .unwrap_err()
            .is_invalid_argument());
        assert!(next_value("t", Some(Value::I64(i64::MAX))).is_err());
    }
}
