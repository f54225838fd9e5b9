//! Execution and introspection collaborators

use std::future::Future;

use crate::{ParamCollector, Result, TableSchema, Value};

/// The database access the builders need.
///
/// Implementations own connections, cancellation and timeouts; the
/// builders only await these calls and propagate their errors unchanged.
pub trait ConnectionPool: Send + Sync {
    /// Look up the metadata snapshot of a possibly schema-qualified table.
    /// `Ok(None)` means the table does not exist.
    fn table_schema(&self, name: &str)
        -> impl Future<Output = Result<Option<TableSchema>>> + Send;

    /// Execute a query returning a single value; `None` for SQL NULL or no row
    fn fetch_scalar(
        &self,
        sql: &str,
        params: &ParamCollector,
    ) -> impl Future<Output = Result<Option<Value>>> + Send;

    /// Execute a query and return the first column of every row
    fn fetch_column(
        &self,
        sql: &str,
        params: &ParamCollector,
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

impl<P> ConnectionPool for &P
where
    P: ConnectionPool,
{
    fn table_schema(&self, name: &str)
        -> impl Future<Output = Result<Option<TableSchema>>> + Send {
        (**self).table_schema(name)
    }

    fn fetch_scalar(
        &self,
        sql: &str,
        params: &ParamCollector,
    ) -> impl Future<Output = Result<Option<Value>>> + Send {
        (**self).fetch_scalar(sql, params)
    }

    fn fetch_column(
        &self,
        sql: &str,
        params: &ParamCollector,
    ) -> impl Future<Output = Result<Vec<String>>> + Send {
        (**self).fetch_column(sql, params)
    }
}

/// SQLx `AnyPool` wrapper
///
/// sqlx drivers bind positionally, so named placeholders are rewritten with
/// [`to_positional`](crate::params::to_positional) before execution. Table
/// metadata is not introspected; register snapshots with
/// [`AnyConnectionPool::with_schema`].
pub mod any {
    use std::collections::HashMap;

    use futures::TryStreamExt;
    use sqlx::any::AnyArguments;
    use sqlx::query::Query;
    use sqlx::{Any, AnyPool, Row, ValueRef};
    use tracing::debug;

    use super::*;
    use crate::params::to_positional;
    use crate::{Error, TableName};

    #[derive(Clone)]
    pub struct AnyConnectionPool {
        inner: AnyPool,
        schemas: HashMap<String, TableSchema>,
    }

    impl AnyConnectionPool {
        /// Connect using any installed sqlx driver
        pub async fn new(database_url: &str) -> Result<Self> {
            sqlx::any::install_default_drivers();
            let pool = AnyPool::connect(database_url).await?;
            Ok(Self::from_pool(pool))
        }

        /// Create from an existing AnyPool
        pub fn from_pool(pool: AnyPool) -> Self {
            Self {
                inner: pool,
                schemas: HashMap::new(),
            }
        }

        /// Register a table snapshot, keyed by its qualified name
        pub fn with_schema(mut self, schema: TableSchema) -> Self {
            self.schemas.insert(schema.name.to_string(), schema);
            self
        }

        pub fn inner(&self) -> &AnyPool {
            &self.inner
        }
    }

    impl ConnectionPool for AnyConnectionPool {
        async fn table_schema(&self, name: &str) -> Result<Option<TableSchema>> {
            Ok(self.schemas.get(&TableName::parse(name).to_string()).cloned())
        }

        async fn fetch_scalar(&self, sql: &str, params: &ParamCollector) -> Result<Option<Value>> {
            let (sql, values) = to_positional(sql, params);
            debug!(sql = %sql, params = values.len(), "fetching scalar");

            let query = bind_values_to_query(sqlx::query(&sql), &values);
            match query.fetch_optional(&self.inner).await? {
                Some(row) => decode_scalar(&row),
                None => Ok(None),
            }
        }

        async fn fetch_column(&self, sql: &str, params: &ParamCollector) -> Result<Vec<String>> {
            let (sql, values) = to_positional(sql, params);
            debug!(sql = %sql, params = values.len(), "fetching column");

            let query = bind_values_to_query(sqlx::query(&sql), &values);
            let mut rows = query.fetch(&self.inner);
            let mut column = Vec::new();
            while let Some(row) = rows.try_next().await? {
                column.push(row.try_get::<String, _>(0)?);
            }
            Ok(column)
        }
    }

    /// Bind values to a SQLx query in order
    fn bind_values_to_query<'q>(
        mut query: Query<'q, Any, AnyArguments<'q>>,
        params: &'q [Value],
    ) -> Query<'q, Any, AnyArguments<'q>> {
        for param in params {
            query = match param {
                Value::Null => query.bind(None::<i32>),
                Value::Bool(b) => query.bind(*b),
                Value::I32(i) => query.bind(*i),
                Value::I64(i) => query.bind(*i),
                Value::F64(f) => query.bind(*f),
                Value::String(s) => query.bind(s.clone()),
                Value::Bytes(b) => query.bind(b.clone()),
                Value::Json(j) => query.bind(j.to_string()),
                Value::Array(_) => query.bind(param.to_json().to_string()),
            };
        }
        query
    }

    fn decode_scalar(row: &sqlx::any::AnyRow) -> Result<Option<Value>> {
        // typed decoding of a NULL fails under the Any driver
        if row.try_get_raw(0)?.is_null() {
            return Ok(None);
        }
        if let Ok(v) = row.try_get::<Option<i64>, _>(0) {
            return Ok(v.map(Value::I64));
        }
        if let Ok(v) = row.try_get::<Option<f64>, _>(0) {
            return Ok(v.map(Value::F64));
        }
        if let Ok(v) = row.try_get::<Option<String>, _>(0) {
            return Ok(v.map(Value::String));
        }
        Err(Error::execution("scalar column has an unsupported type"))
    }

}

#[cfg(test)]
pub(crate) mod mock {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;
    use crate::{Error, TableName};

    /// In-memory collaborator recording every query it is asked to run
    #[derive(Default)]
    pub(crate) struct MockPool {
        schemas: HashMap<String, TableSchema>,
        scalar: Option<Value>,
        column: Vec<String>,
        query_failure: Option<String>,
        schema_failure: Option<String>,
        queries: Mutex<Vec<(String, Vec<(String, Value)>)>>,
    }

    impl MockPool {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn with_schema(mut self, schema: TableSchema) -> Self {
            self.schemas.insert(schema.name.to_string(), schema);
            self
        }

        pub(crate) fn with_scalar(mut self, value: impl Into<Value>) -> Self {
            self.scalar = Some(value.into());
            self
        }

        pub(crate) fn with_column(mut self, values: &[&str]) -> Self {
            self.column = values.iter().map(|v| v.to_string()).collect();
            self
        }

        pub(crate) fn failing_queries(mut self, message: &str) -> Self {
            self.query_failure = Some(message.to_string());
            self
        }

        pub(crate) fn failing_introspection(mut self, message: &str) -> Self {
            self.schema_failure = Some(message.to_string());
            self
        }

        pub(crate) fn queries(&self) -> Vec<(String, Vec<(String, Value)>)> {
            self.queries.lock().unwrap().clone()
        }

        fn record(&self, sql: &str, params: &ParamCollector) -> Result<()> {
            self.queries
                .lock()
                .unwrap()
                .push((sql.to_string(), params.clone().into_vec()));
            match &self.query_failure {
                Some(message) => Err(Error::execution(message.clone())),
                None => Ok(()),
            }
        }
    }

    impl ConnectionPool for MockPool {
        async fn table_schema(&self, name: &str) -> Result<Option<TableSchema>> {
            if let Some(message) = &self.schema_failure {
                return Err(Error::execution(message.clone()));
            }
            Ok(self.schemas.get(&TableName::parse(name).to_string()).cloned())
        }

        async fn fetch_scalar(&self, sql: &str, params: &ParamCollector) -> Result<Option<Value>> {
            self.record(sql, params)?;
            Ok(self.scalar.clone())
        }

        async fn fetch_column(&self, sql: &str, params: &ParamCollector) -> Result<Vec<String>> {
            self.record(sql, params)?;
            Ok(self.column.clone())
        }
    }
}
