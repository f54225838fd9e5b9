//! Schema-aware INSERT

use tracing::{debug, trace};

use super::common::{IntoInsertData, StatementBuilder};
use super::db2::Db2QueryBuilder;
use crate::{ConnectionPool, ParamCollector, Result};

impl<P> Db2QueryBuilder<P>
where
    P: ConnectionPool,
{
    /// Build an INSERT for one row, binding literals into `params`.
    ///
    /// The table's snapshot is looked up first so literal values can be
    /// typecast for their columns. A table the schema collaborator does not
    /// know is not an error here: values are bound as given.
    ///
    /// # Examples
    /// ```
    /// # use db2_query_core::{Db2QueryBuilder, ConnectionPool, ParamCollector, Result, TableSchema, Value};
    /// # struct NoSchema;
    /// # impl ConnectionPool for NoSchema {
    /// #     async fn table_schema(&self, _: &str) -> Result<Option<TableSchema>> { Ok(None) }
    /// #     async fn fetch_scalar(&self, _: &str, _: &ParamCollector) -> Result<Option<Value>> { Ok(None) }
    /// #     async fn fetch_column(&self, _: &str, _: &ParamCollector) -> Result<Vec<String>> { Ok(Vec::new()) }
    /// # }
    /// let builder = Db2QueryBuilder::new(NoSchema);
    /// let mut params = builder.params();
    /// let sql = tokio_test::block_on(builder.insert("T", [("a", 1)], &mut params)).unwrap();
    /// assert_eq!(sql, "INSERT INTO \"T\" (\"a\") VALUES (:qp0)");
    /// ```
    pub async fn insert<D>(&self, table: &str, data: D, params: &mut ParamCollector) -> Result<String>
    where
        D: IntoInsertData,
    {
        let schema = self.pool.table_schema(table).await?;
        if schema.is_none() {
            debug!(table, "no schema snapshot, binding values without typecast");
        }

        let sql = self.build_insert(table, data.into_insert_data(), schema.as_ref(), params);
        trace!(sql = %sql, params = params.len(), "built insert");
        Ok(sql)
    }
}
