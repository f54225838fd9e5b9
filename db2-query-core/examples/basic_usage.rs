use std::collections::HashMap;

use db2_query_core::{
    db2, expr, op, ColumnSchema, ColumnValue, ConnectionPool, ParamCollector, Result, Row,
    SortDirection, StatementBuilder, TableSchema, Value,
};

// In-memory stand-in for a DB2 connection
struct DemoPool {
    schemas: HashMap<String, TableSchema>,
}

impl ConnectionPool for DemoPool {
    async fn table_schema(&self, name: &str) -> Result<Option<TableSchema>> {
        Ok(self.schemas.get(name).cloned())
    }

    async fn fetch_scalar(&self, sql: &str, _params: &ParamCollector) -> Result<Option<Value>> {
        println!("SCALAR: {}", sql);
        Ok(Some(Value::I64(1041)))
    }

    async fn fetch_column(&self, sql: &str, params: &ParamCollector) -> Result<Vec<String>> {
        println!("COLUMN: {} {:?}", sql, params.iter().collect::<Vec<_>>());
        Ok(vec!["ORDERS".to_string(), "ORDER_LINES".to_string()])
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let orders = TableSchema::new("ORDERS")
        .column(ColumnSchema::new("id", "INTEGER").primary_key().auto_increment())
        .column(ColumnSchema::new("customer_id", "INTEGER").not_null())
        .column(ColumnSchema::new("total", "DECIMAL(19,4)"))
        .column(ColumnSchema::new("created_at", "TIMESTAMP"))
        .sequence("id");

    let pool = DemoPool {
        schemas: HashMap::from([("ORDERS".to_string(), orders)]),
    };
    let builder = db2(pool);

    println!("TRUNCATE: {}", builder.truncate_table("ORDERS"));
    println!("ALTER: {}", builder.alter_column("ORDERS", "total", "money"));
    println!("RESET: {}", builder.reset_sequence("ORDERS", None).await?);

    // Disable checks on every user table of the schema, then enable them again
    println!("INTEGRITY OFF: {}", builder.check_integrity(false, Some("APP"), None).await?);
    println!("INTEGRITY ON: {}", builder.check_integrity(true, None, Some("ORDERS")).await?);

    // INSERT with a typecast literal and a raw expression
    let mut params = builder.params();
    let insert = builder
        .insert(
            "ORDERS",
            vec![
                ("customer_id", ColumnValue::from("17")),
                ("total", ColumnValue::from(99.5)),
                ("created_at", expr("CURRENT TIMESTAMP").into()),
            ],
            &mut params,
        )
        .await?;
    println!("INSERT: {}", insert);
    println!("PARAMS: {:?}", params.iter().collect::<Vec<_>>());

    // Composite membership test
    let mut params = builder.params();
    let rows: Vec<Row> = vec![
        Row::from([("customer_id".to_string(), Value::I32(17)), ("id".to_string(), Value::I32(1))]),
        Row::from([("customer_id".to_string(), Value::I32(18))]),
    ];
    let condition =
        builder.build_composite_in_condition(op::IN, &["customer_id", "id"], &rows, &mut params)?;
    println!("WHERE: {}", condition);

    // Paging
    let page = builder.build_order_by_and_limit(
        "SELECT * FROM \"ORDERS\"",
        &[("created_at".to_string(), SortDirection::Desc)],
        Some(20),
        Some(40),
    );
    println!("PAGE: {}", page);

    Ok(())
}
