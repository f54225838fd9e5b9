//! The statement-builder capability shared by all dialects

use std::collections::{BTreeMap, HashMap};
use std::fmt::{self, Display};

use crate::{
    ColumnValue, Error, IntoOperator, Operator, ParamCollector, Quoter, Result, TableSchema,
    TypeMap, Value,
};

/// Sort direction for ORDER BY clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "ASC"),
            SortDirection::Desc => write!(f, "DESC"),
        }
    }
}

/// One row of a composite membership test, keyed by column name.
/// Missing or null entries compare as `NULL`.
pub type Row = HashMap<String, Value>;

/// Dialect-specific statement construction.
///
/// The provided methods emit standard SQL; a dialect overrides the ones its
/// engine spells differently. None of them performs I/O: operations that
/// must consult the database live on the dialect builders themselves.
pub trait StatementBuilder {
    /// The identifier quoting collaborator
    fn quoter(&self) -> &dyn Quoter;

    /// The abstract-to-native column type mapping
    fn type_map(&self) -> &TypeMap;

    fn quote_table_name(&self, name: &str) -> String {
        self.quoter().quote_table_name(name)
    }

    fn quote_column_name(&self, name: &str) -> String {
        self.quoter().quote_column_name(name)
    }

    /// Translate an abstract column type, see [`TypeMap::column_type`]
    fn column_type(&self, token: &str) -> String {
        self.type_map().column_type(token)
    }

    fn truncate_table(&self, table: &str) -> String {
        format!("TRUNCATE TABLE {}", self.quote_table_name(table))
    }

    fn alter_column(&self, table: &str, column: &str, column_type: &str) -> String {
        format!(
            "ALTER TABLE {} ALTER COLUMN {} TYPE {}",
            self.quote_table_name(table),
            self.quote_column_name(column),
            self.column_type(column_type)
        )
    }

    /// Build `(a, b) IN ((:qp0, :qp1), (:qp2, NULL))`.
    ///
    /// With no rows the predicate degenerates to a constant: `0=1` for `IN`
    /// and `1=1` for `NOT IN`.
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

        let tuples: Vec<String> = rows
            .iter()
            .map(|row| format!("({})", bind_row(columns, row, params).join(", ")))
            .collect();

        Ok(format!(
            "({}) {} ({})",
            quote_composite_columns(self, columns).join(", "),
            operator,
            tuples.join(", ")
        ))
    }

    /// Build an INSERT for one row.
    ///
    /// `schema` is the table's snapshot when known; it drives storage
    /// typecasting of literal values. Without columns a default row is
    /// inserted.
    fn build_insert(
        &self,
        table: &str,
        columns: Vec<(String, ColumnValue)>,
        schema: Option<&TableSchema>,
        params: &mut ParamCollector,
    ) -> String {
        let (names, placeholders) = bind_insert_columns(self, columns, schema, params);
        if names.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES", self.quote_table_name(table));
        }

        format!(
            "INSERT INTO {} ({}) VALUES ({})",
            self.quote_table_name(table),
            names.join(", "),
            placeholders.join(", ")
        )
    }

    /// Build the ORDER BY clause, empty when there is nothing to sort by
    fn build_order_by(&self, order_by: &[(String, SortDirection)]) -> String {
        if order_by.is_empty() {
            return String::new();
        }

        let parts: Vec<String> = order_by
            .iter()
            .map(|(column, direction)| {
                let column = self.quote_column_name(column);
                match direction {
                    SortDirection::Asc => column,
                    SortDirection::Desc => format!("{} {}", column, direction),
                }
            })
            .collect();
        format!("ORDER BY {}", parts.join(", "))
    }

    /// Append ordering and row limiting to a SELECT
    fn build_order_by_and_limit(
        &self,
        sql: &str,
        order_by: &[(String, SortDirection)],
        limit: Option<u64>,
        offset: Option<u64>,
    ) -> String {
        let mut sql = sql.to_string();

        let order = self.build_order_by(order_by);
        if !order.is_empty() {
            sql.push(' ');
            sql.push_str(&order);
        }

        // LIMIT clause
        if let Some(limit) = limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        // OFFSET clause
        if let Some(offset) = offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }
}

/// Accept only `IN` and `NOT IN`
pub(crate) fn membership_operator<O: IntoOperator>(operator: O) -> Result<Operator> {
    let operator = operator.into_operator();
    if operator.is_membership() {
        Ok(operator)
    } else {
        Err(Error::invalid_argument(format!(
            "composite membership requires IN or NOT IN, got '{}'",
            operator
        )))
    }
}

/// The constant a membership test over zero rows reduces to
pub(crate) fn empty_membership(operator: &Operator) -> &'static str {
    if *operator == Operator::NOT_IN {
        "1=1"
    } else {
        "0=1"
    }
}

/// Bind a row's values in column order; absent or null values become `NULL`
pub(crate) fn bind_row<C: AsRef<str>>(
    columns: &[C],
    row: &Row,
    params: &mut ParamCollector,
) -> Vec<String> {
    columns
        .iter()
        .map(|column| match row.get(column.as_ref()) {
            Some(value) if !value.is_null() => params.bind(value.clone()),
            _ => "NULL".to_string(),
        })
        .collect()
}

/// Quote plain column names; computed expressions pass through
pub(crate) fn quote_composite_columns<B, C>(builder: &B, columns: &[C]) -> Vec<String>
where
    B: StatementBuilder + ?Sized,
    C: AsRef<str>,
{
    columns
        .iter()
        .map(|column| {
            let column = column.as_ref();
            if column.contains('(') {
                column.to_string()
            } else {
                builder.quote_column_name(column)
            }
        })
        .collect()
}

/// Quote INSERT column names and produce their placeholders.
///
/// Expressions are spliced and their bindings merged; literals get a fresh
/// placeholder and, unless they are arrays, the known column's typecast.
pub(crate) fn bind_insert_columns<B>(
    builder: &B,
    columns: Vec<(String, ColumnValue)>,
    schema: Option<&TableSchema>,
    params: &mut ParamCollector,
) -> (Vec<String>, Vec<String>)
where
    B: StatementBuilder + ?Sized,
{
    let mut names = Vec::with_capacity(columns.len());
    let mut placeholders = Vec::with_capacity(columns.len());

    for (name, value) in columns {
        names.push(builder.quote_column_name(&name));
        match value {
            ColumnValue::Expression(expression) => {
                placeholders.push(expression.sql);
                for (param, bound) in expression.params {
                    params.merge(param, bound);
                }
            }
            ColumnValue::Literal(value) => {
                let column = schema.and_then(|s| s.get_column(&name));
                let value = match column {
                    Some(column) if !value.is_array() => column.db_typecast(&value),
                    _ => value,
                };
                placeholders.push(params.bind(value));
            }
        }
    }

    (names, placeholders)
}

/// Types that can be converted to the ordered column list of an INSERT
pub trait IntoInsertData {
    fn into_insert_data(self) -> Vec<(String, ColumnValue)>;
}

impl<K, V> IntoInsertData for Vec<(K, V)>
where
    K: Into<String>,
    V: Into<ColumnValue>,
{
    fn into_insert_data(self) -> Vec<(String, ColumnValue)> {
        self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

impl<K, V, const N: usize> IntoInsertData for [(K, V); N]
where
    K: Into<String>,
    V: Into<ColumnValue>,
{
    fn into_insert_data(self) -> Vec<(String, ColumnValue)> {
        self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

/// Columns in key order
impl<K, V> IntoInsertData for BTreeMap<K, V>
where
    K: Into<String>,
    V: Into<ColumnValue>,
{
    fn into_insert_data(self) -> Vec<(String, ColumnValue)> {
        self.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr;

    #[test]
    fn test_sort_direction_display() {
        assert_eq!(SortDirection::Asc.to_string(), "ASC");
        assert_eq!(SortDirection::Desc.to_string(), "DESC");
    }

    #[test]
    fn test_membership_operator() {
        assert_eq!(membership_operator("in").unwrap(), Operator::IN);
        assert_eq!(membership_operator(Operator::NOT_IN).unwrap(), Operator::NOT_IN);

        let err = membership_operator("=").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("got '='"));
    }

    #[test]
    fn test_bind_row_skips_missing_and_null() {
        let mut params = ParamCollector::new();
        let row: Row = [
            ("a".to_string(), Value::I32(1)),
            ("c".to_string(), Value::Null),
        ]
        .into_iter()
        .collect();

        let slots = bind_row(&["a", "b", "c"], &row, &mut params);
        assert_eq!(slots, vec![":qp0", "NULL", "NULL"]);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_into_insert_data_keeps_order() {
        let data = vec![("b", ColumnValue::from(1)), ("a", ColumnValue::from("x"))];
        let columns: Vec<String> = data.into_insert_data().into_iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["b", "a"]);

        let from_array = [("when", ColumnValue::from(expr("CURRENT TIMESTAMP")))].into_insert_data();
        assert!(matches!(from_array[0].1, ColumnValue::Expression(_)));

        let mut map = BTreeMap::new();
        map.insert("z".to_string(), 1);
        map.insert("y".to_string(), 2);
        let columns: Vec<String> = map.into_insert_data().into_iter().map(|(c, _)| c).collect();
        assert_eq!(columns, vec!["y", "z"]);
    }
}
