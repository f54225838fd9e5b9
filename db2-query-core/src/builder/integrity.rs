//! SET INTEGRITY statements

use tracing::debug;

use super::common::StatementBuilder;
use super::db2::Db2QueryBuilder;
use crate::{ConnectionPool, ParamCollector, Result};

const USER_TABLES: &str =
    "SELECT t.tabname FROM syscat.tables AS t WHERE t.type in ('T') AND t.ownertype != 'S'";

impl<P> Db2QueryBuilder<P>
where
    P: ConnectionPool,
{
    /// Build a `SET INTEGRITY` statement turning constraint checking on or off.
    ///
    /// With a `table`, only that table is affected. Otherwise the user tables
    /// are read from the catalog, optionally restricted to `schema`; when
    /// enabling checks only tables in check-pending state are selected.
    /// Disabling cascades to dependent tables through `ALL`.
    ///
    /// Returns an empty string when there are no tables to act on; callers
    /// treat that as nothing to execute.
    pub async fn check_integrity(
        &self,
        check: bool,
        schema: Option<&str>,
        table: Option<&str>,
    ) -> Result<String> {
        let schema = schema.filter(|s| !s.is_empty());
        let table_names = match table.filter(|t| !t.is_empty()) {
            Some(table) => vec![table.to_string()],
            None => {
                let mut sql = USER_TABLES.to_string();
                let mut params = ParamCollector::new();
                // check pending
                if check {
                    sql.push_str(" AND t.status = 'C'");
                }
                if let Some(schema) = schema {
                    sql.push_str(" AND t.tabschema = :schema");
                    params.merge(":schema", schema);
                }
                debug!(sql = %sql, "listing tables for SET INTEGRITY");
                self.pool.fetch_column(&sql, &params).await?
            }
        };

        if table_names.is_empty() {
            return Ok(String::new());
        }

        let suffix = if check { "" } else { " ALL" };
        let quoted: Vec<String> = table_names
            .iter()
            .map(|name| format!("{}{}", self.quote_table_name(name), suffix))
            .collect();
        let mode = if check { "CHECKED" } else { "UNCHECKED" };

        Ok(format!(
            "SET INTEGRITY FOR {} IMMEDIATE {};",
            quoted.join(", "),
            mode
        ))
    }
}
