//! Bound values and column values for INSERT and membership predicates

use serde::{Deserialize, Serialize};

/// A SQL value that can be bound to a named placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Null value
    Null,
    /// Boolean value
    Bool(bool),
    /// 32-bit integer
    I32(i32),
    /// 64-bit integer
    I64(i64),
    /// 64-bit float
    F64(f64),
    /// String value
    String(String),
    /// Bytes value
    Bytes(Vec<u8>),
    /// JSON value
    Json(serde_json::Value),
    /// Array of values, bound as a whole and never typecast
    Array(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Interpret a scalar as an integer.
    ///
    /// Drivers report `MAX(...)` of an identity column as whatever numeric
    /// type they please, sometimes as a decimal string.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(b) => Some(i64::from(*b)),
            Value::I32(i) => Some(i64::from(*i)),
            Value::I64(i) => Some(*i),
            Value::F64(f) if f.is_finite() && f.fract() == 0.0 => Some(*f as i64),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>().ok().or_else(|| {
                    s.parse::<f64>()
                        .ok()
                        .filter(|f| f.is_finite() && f.fract() == 0.0)
                        .map(|f| f as i64)
                })
            }
            Value::Json(serde_json::Value::Number(n)) => n.as_i64(),
            _ => None,
        }
    }

    /// Convert to JSON, used when a driver cannot bind the value natively
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::I32(i) => serde_json::Value::from(*i),
            Value::I64(i) => serde_json::Value::from(*i),
            Value::F64(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Bytes(b) => serde_json::Value::Array(
                b.iter().map(|byte| serde_json::Value::from(*byte)).collect(),
            ),
            Value::Json(j) => j.clone(),
            Value::Array(arr) => serde_json::Value::Array(arr.iter().map(Value::to_json).collect()),
        }
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(val: bool) -> Self {
        Value::Bool(val)
    }
}

impl From<i32> for Value {
    fn from(val: i32) -> Self {
        Value::I32(val)
    }
}

impl From<i64> for Value {
    fn from(val: i64) -> Self {
        Value::I64(val)
    }
}

impl From<f64> for Value {
    fn from(val: f64) -> Self {
        Value::F64(val)
    }
}

impl From<String> for Value {
    fn from(val: String) -> Self {
        Value::String(val)
    }
}

impl From<&str> for Value {
    fn from(val: &str) -> Self {
        Value::String(val.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(val: Vec<u8>) -> Self {
        Value::Bytes(val)
    }
}

impl From<serde_json::Value> for Value {
    fn from(val: serde_json::Value) -> Self {
        Value::Json(val)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

impl<T> From<&[T]> for Value
where
    T: Clone + Into<Value>,
{
    fn from(vals: &[T]) -> Self {
        Value::Array(vals.iter().cloned().map(|v| v.into()).collect())
    }
}

// DB2 has no native UUID; CHAR(36) is the usual column type.
#[cfg(feature = "uuid-support")]
impl From<uuid::Uuid> for Value {
    fn from(val: uuid::Uuid) -> Self {
        Value::String(val.hyphenated().to_string())
    }
}

#[cfg(feature = "datetime-support")]
impl From<chrono::NaiveDateTime> for Value {
    fn from(val: chrono::NaiveDateTime) -> Self {
        Value::String(val.format("%Y-%m-%d-%H.%M.%S%.6f").to_string())
    }
}

#[cfg(feature = "datetime-support")]
impl From<chrono::NaiveDate> for Value {
    fn from(val: chrono::NaiveDate) -> Self {
        Value::String(val.format("%Y-%m-%d").to_string())
    }
}

// Bound as text so DECIMAL(19,4) money columns keep their precision.
#[cfg(feature = "decimal-support")]
impl From<rust_decimal::Decimal> for Value {
    fn from(val: rust_decimal::Decimal) -> Self {
        Value::String(val.to_string())
    }
}

/// A raw SQL fragment with its own pre-named bindings.
///
/// The fragment is spliced verbatim; its bindings are merged into the
/// statement's [`ParamCollector`](crate::ParamCollector) under their own names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expression {
    pub sql: String,
    pub params: Vec<(String, Value)>,
}

impl Expression {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Attach a named binding used by the fragment
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }
}

/// Create a raw SQL expression
///
/// # Examples
/// ```
/// use db2_query_core::expr;
///
/// let now = expr("CURRENT TIMESTAMP");
/// let shifted = expr("CURRENT DATE + :days DAYS").bind(":days", 7);
/// assert_eq!(shifted.params.len(), 1);
/// # let _ = now;
/// ```
pub fn expr(sql: impl Into<String>) -> Expression {
    Expression::new(sql)
}

/// The value assigned to a column in an INSERT
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Bound through a generated placeholder
    Literal(Value),
    /// Spliced verbatim
    Expression(Expression),
}

impl From<Value> for ColumnValue {
    fn from(val: Value) -> Self {
        ColumnValue::Literal(val)
    }
}

impl From<Expression> for ColumnValue {
    fn from(val: Expression) -> Self {
        ColumnValue::Expression(val)
    }
}

macro_rules! literal_column_value {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for ColumnValue {
                fn from(val: $ty) -> Self {
                    ColumnValue::Literal(val.into())
                }
            }
        )*
    };
}

literal_column_value!(
    (),
    bool,
    i32,
    i64,
    f64,
    String,
    &str,
    Vec<u8>,
    serde_json::Value,
);

impl<T> From<Option<T>> for ColumnValue
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        ColumnValue::Literal(opt.into())
    }
}
