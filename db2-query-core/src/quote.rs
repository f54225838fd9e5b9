//! Identifier quoting

/// Quotes table and column names for a dialect.
///
/// Every method has a default suitable for engines that follow the SQL
/// standard's double-quoted delimited identifiers, DB2 included.
pub trait Quoter {
    /// Returns the identifier quote character
    fn quote_char(&self) -> char {
        '"'
    }

    /// Quotes a single, unqualified table name
    fn quote_simple_table_name(&self, name: &str) -> String {
        let q = self.quote_char();
        if name.starts_with(q) {
            return name.to_string();
        }
        let doubled = format!("{q}{q}");
        format!("{q}{}{q}", name.replace(q, &doubled))
    }

    /// Quotes a single, unqualified column name
    fn quote_simple_column_name(&self, name: &str) -> String {
        if name == "*" {
            return name.to_string();
        }
        self.quote_simple_table_name(name)
    }

    /// Quotes a possibly schema-qualified table name.
    ///
    /// Names containing `(` or `{{` are expressions and are returned unchanged.
    fn quote_table_name(&self, name: &str) -> String {
        if is_expression(name) {
            return name.to_string();
        }
        name.split('.')
            .map(|part| self.quote_simple_table_name(part))
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Quotes a possibly table-qualified column name
    fn quote_column_name(&self, name: &str) -> String {
        if is_expression(name) || name.contains("[[") {
            return name.to_string();
        }
        match name.rsplit_once('.') {
            Some((table, column)) => format!(
                "{}.{}",
                self.quote_table_name(table),
                self.quote_simple_column_name(column)
            ),
            None => self.quote_simple_column_name(name),
        }
    }
}

fn is_expression(name: &str) -> bool {
    name.contains('(') || name.contains("{{")
}

/// Standard double-quote identifier quoting
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StandardQuoter;

impl Quoter for StandardQuoter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_simple_names() {
        let q = StandardQuoter;
        assert_eq!(q.quote_table_name("customer"), "\"customer\"");
        assert_eq!(q.quote_column_name("id"), "\"id\"");
        assert_eq!(q.quote_column_name("*"), "*");
    }

    #[test]
    fn test_quote_qualified_names() {
        let q = StandardQuoter;
        assert_eq!(q.quote_table_name("APP.ORDERS"), "\"APP\".\"ORDERS\"");
        assert_eq!(q.quote_column_name("o.total"), "\"o\".\"total\"");
        assert_eq!(
            q.quote_column_name("APP.ORDERS.total"),
            "\"APP\".\"ORDERS\".\"total\""
        );
    }

    #[test]
    fn test_already_quoted_and_expressions_untouched() {
        let q = StandardQuoter;
        assert_eq!(q.quote_table_name("\"Mixed\""), "\"Mixed\"");
        assert_eq!(q.quote_column_name("UPPER(name)"), "UPPER(name)");
        assert_eq!(q.quote_table_name("{{%user}}"), "{{%user}}");
        assert_eq!(q.quote_column_name("[[id]]"), "[[id]]");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let q = StandardQuoter;
        assert_eq!(q.quote_column_name("we\"ird"), "\"we\"\"ird\"");
    }
}
