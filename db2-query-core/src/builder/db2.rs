//! DB2 statement builder

use super::common::{
    bind_insert_columns, bind_row, empty_membership, membership_operator,
    quote_composite_columns, Row, SortDirection, StatementBuilder,
};
use crate::{
    BuilderConfig, ColumnValue, IntoOperator, ParamCollector, Quoter, Result, StandardQuoter,
    TableSchema, TypeMap,
};

/// Statement builder for IBM DB2.
///
/// The pure statements come from its [`StatementBuilder`] implementation.
/// Statements that depend on the database (sequence resets, integrity
/// toggling, schema-aware inserts) are inherent async methods that consult
/// the builder's [`ConnectionPool`](crate::ConnectionPool).
#[derive(Clone)]
pub struct Db2QueryBuilder<P> {
    pub(crate) pool: P,
    quoter: StandardQuoter,
    type_map: TypeMap,
    config: BuilderConfig,
}

impl<P> Db2QueryBuilder<P> {
    pub fn new(pool: P) -> Self {
        Self::with_config(pool, BuilderConfig::default())
    }

    pub fn with_config(pool: P, config: BuilderConfig) -> Self {
        let type_map = TypeMap::db2().with_overrides(&config.type_overrides);
        Self {
            pool,
            quoter: StandardQuoter,
            type_map,
            config,
        }
    }

    pub fn pool(&self) -> &P {
        &self.pool
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// A fresh collector using the configured placeholder prefix
    pub fn params(&self) -> ParamCollector {
        ParamCollector::with_prefix(self.config.param_prefix.clone())
    }
}

impl<P> StatementBuilder for Db2QueryBuilder<P> {
    fn quoter(&self) -> &dyn Quoter {
        &self.quoter
    }

    fn type_map(&self) -> &TypeMap {
        &self.type_map
    }

    fn truncate_table(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {} IMMEDIATE", self.quote_table_name(table))
    }

    fn alter_column(&self, table: &str, column: &str, column_type: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} SET DATA TYPE {}",
            self.quote_table_name(table),
            self.quote_column_name(column),
            self.column_type(column_type)
        )
    }

    /// Build the membership test as a UNION of single-row selects from the
    /// dummy table: `("a", "b") IN (select :qp0, :qp1 from SYSIBM.SYSDUMMY1
    /// UNION select :qp2, NULL from SYSIBM.SYSDUMMY1)`.
    ///
    /// `NULL` slots are left untyped; DB2 infers their type from the other
    /// branches of the union.
    fn build_composite_in_condition<O, C>(
        &self,
        operator: O,
        columns: &[C],
        rows: &[Row],
        params: &mut ParamCollector,
    ) -> Result<String>
    where
        O: IntoOperator,
        C: AsRef<str>,
    {
        let operator = membership_operator(operator)?;
        if rows.is_empty() {
            return Ok(empty_membership(&operator).to_string());
        }

        let selects: Vec<String> = rows
            .iter()
            .map(|row| {
                format!(
                    "select {} from {}",
                    bind_row(columns, row, params).join(", "),
                    self.config.dummy_table
                )
            })
            .collect();

        Ok(format!(
            "({}) {} ({})",
            quote_composite_columns(self, columns).join(", "),
            operator,
            selects.join(" UNION ")
        ))
    }

    /// DB2 has no `DEFAULT VALUES`; a default row lists one `DEFAULT` per
    /// column of the table snapshot. Without a snapshot, or with one that
    /// lists no columns, a single `DEFAULT` is emitted rather than an empty
    /// `VALUES ()`.
    fn build_insert(
        &self,
        table: &str,
        columns: Vec<(String, ColumnValue)>,
        schema: Option<&TableSchema>,
        params: &mut ParamCollector,
    ) -> String {
        let (names, mut placeholders) = bind_insert_columns(self, columns, schema, params);
        if placeholders.is_empty() {
            let count = schema.map_or(0, |s| s.columns.len()).max(1);
            placeholders = vec!["DEFAULT".to_string(); count];
        }

        let mut sql = format!("INSERT INTO {}", self.quote_table_name(table));
        if !names.is_empty() {
            sql.push_str(&format!(" ({})", names.join(", ")));
        }
        sql.push_str(&format!(" VALUES ({})", placeholders.join(", ")));
        sql
    }

    /// Row limiting through `ROW_NUMBER()`, for servers without
    /// `LIMIT`/`OFFSET` support.
    fn build_order_by_and_limit(
        &self,
        sql: &str,
        order_by: &[(String, SortDirection)],
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> String {
        let order = self.build_order_by(order_by);
        if limit.is_none() && offset.is_none() {
            return if order.is_empty() {
                sql.to_string()
            } else {
                format!("{} {}", sql, order)
            };
        }

        let offset = offset.unwrap_or(0);
        let mut filter = format!("t.RN_ > {}", offset);
        if let Some(limit) = limit {
            filter.push_str(&format!(" AND t.RN_ <= {}", limit.saturating_add(offset)));
        }

        format!(
            "SELECT * FROM (SELECT SUBQUERY_.*, ROW_NUMBER() OVER({}) AS RN_ FROM ( {} ) AS SUBQUERY_) as t WHERE {}",
            order, sql, filter
        )
    }
}
