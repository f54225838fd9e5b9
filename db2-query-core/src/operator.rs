//! SQL operator types and conversions

use std::borrow::Cow;
use std::fmt::{self, Display};

/// SQL operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator(Cow<'static, str>);

impl Operator {
    pub const IN: Self = Operator(Cow::Borrowed("IN"));
    pub const NOT_IN: Self = Operator(Cow::Borrowed("NOT IN"));

    /// Create a custom operator
    ///
    /// # Examples
    /// ```
    /// use db2_query_core::Operator;
    ///
    /// let overlaps = Operator::custom("OVERLAPS");
    /// assert_eq!(overlaps.as_str(), "OVERLAPS");
    /// ```
    pub const fn custom(op: &'static str) -> Self {
        Operator(Cow::Borrowed(op))
    }

    /// Get the string representation of the operator
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is `IN` or `NOT IN`
    pub fn is_membership(&self) -> bool {
        *self == Self::IN || *self == Self::NOT_IN
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trait for types that can be converted to SQL operators
pub trait IntoOperator {
    fn into_operator(self) -> Operator;
}

impl IntoOperator for Operator {
    fn into_operator(self) -> Operator {
        self
    }
}

/// Membership operators are recognised in any case and spacing; anything
/// else becomes a custom operator and is left for the builder to reject.
impl IntoOperator for &str {
    fn into_operator(self) -> Operator {
        let normalized = self.split_whitespace().collect::<Vec<_>>().join(" ");
        match normalized.to_ascii_uppercase().as_str() {
            "IN" => Operator::IN,
            "NOT IN" => Operator::NOT_IN,
            _ => Operator(Cow::Owned(normalized)),
        }
    }
}

/// Convenience module for operator constants
pub mod op {
    use super::Operator;

    pub const IN: Operator = Operator::IN;
    pub const NOT_IN: Operator = Operator::NOT_IN;
}
