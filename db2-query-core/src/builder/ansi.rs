//! Standard SQL statement builder

use super::common::StatementBuilder;
use crate::{Quoter, StandardQuoter, TypeMap};

/// Builder that uses every standard default of [`StatementBuilder`]
#[derive(Debug, Clone)]
pub struct AnsiBuilder {
    quoter: StandardQuoter,
    type_map: TypeMap,
}

impl Default for AnsiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnsiBuilder {
    pub fn new() -> Self {
        Self {
            quoter: StandardQuoter,
            type_map: TypeMap::ansi(),
        }
    }
}

impl StatementBuilder for AnsiBuilder {
    fn quoter(&self) -> &dyn Quoter {
        &self.quoter
    }

    fn type_map(&self) -> &TypeMap {
        &self.type_map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::common::{Row, SortDirection};
    use crate::{op, ParamCollector, Value};

    #[test]
    fn test_truncate_and_alter() {
        let builder = AnsiBuilder::new();
        assert_eq!(builder.truncate_table("orders"), "TRUNCATE TABLE \"orders\"");
        assert_eq!(
            builder.alter_column("orders", "note", "string(64)"),
            "ALTER TABLE \"orders\" ALTER COLUMN \"note\" TYPE varchar(64)"
        );
    }

    #[test]
    fn test_row_value_membership() {
        let builder = AnsiBuilder::new();
        let mut params = ParamCollector::new();
        let rows: Vec<Row> = vec![
            [("a".to_string(), Value::I32(1)), ("b".to_string(), Value::I32(2))]
                .into_iter()
                .collect(),
            [("a".to_string(), Value::I32(3))].into_iter().collect(),
        ];

        let sql = builder
            .build_composite_in_condition(op::IN, &["a", "b"], &rows, &mut params)
            .unwrap();
        assert_eq!(sql, "(\"a\", \"b\") IN ((:qp0, :qp1), (:qp2, NULL))");
        assert_eq!(params.len(), 3);
    }

    #[test]
    fn test_insert_default_values() {
        let builder = AnsiBuilder::new();
        let mut params = ParamCollector::new();
        let sql = builder.build_insert("orders", Vec::new(), None, &mut params);
        assert_eq!(sql, "INSERT INTO \"orders\" DEFAULT VALUES");
        assert!(params.is_empty());
    }

    #[test]
    fn test_limit_offset() {
        let builder = AnsiBuilder::new();
        let sql = builder.build_order_by_and_limit(
            "SELECT * FROM \"orders\"",
            &[("id".to_string(), SortDirection::Desc)],
            Some(10),
            Some(20),
        );
        assert_eq!(
            sql,
            "SELECT * FROM \"orders\" ORDER BY \"id\" DESC LIMIT 10 OFFSET 20"
        );
    }
}
