//! Abstract column types and their native translations

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

/// Abstract column-type tokens understood by [`TypeMap::column_type`]
pub mod column {
    pub const PK: &str = "pk";
    pub const BIGPK: &str = "bigpk";
    pub const STRING: &str = "string";
    pub const TEXT: &str = "text";
    pub const SMALLINT: &str = "smallint";
    pub const INTEGER: &str = "integer";
    pub const BIGINT: &str = "bigint";
    pub const FLOAT: &str = "float";
    pub const DOUBLE: &str = "double";
    pub const DECIMAL: &str = "decimal";
    pub const DATETIME: &str = "datetime";
    pub const TIMESTAMP: &str = "timestamp";
    pub const TIME: &str = "time";
    pub const DATE: &str = "date";
    pub const BINARY: &str = "binary";
    pub const BOOLEAN: &str = "boolean";
    pub const MONEY: &str = "money";
}

const DB2_TYPES: &[(&str, &str)] = &[
    (
        column::PK,
        "integer NOT NULL GENERATED BY DEFAULT AS IDENTITY (START WITH 1, INCREMENT BY 1)",
    ),
    (
        column::BIGPK,
        "bigint NOT NULL GENERATED BY DEFAULT AS IDENTITY (START WITH 1, INCREMENT BY 1)",
    ),
    (column::STRING, "varchar(255)"),
    (column::TEXT, "clob"),
    (column::SMALLINT, "smallint"),
    (column::INTEGER, "integer"),
    (column::BIGINT, "bigint"),
    (column::FLOAT, "float"),
    (column::DOUBLE, "double"),
    (column::DECIMAL, "decimal(10,0)"),
    (column::DATETIME, "timestamp"),
    (column::TIMESTAMP, "timestamp"),
    (column::TIME, "time"),
    (column::DATE, "date"),
    (column::BINARY, "blob"),
    (column::BOOLEAN, "smallint"),
    (column::MONEY, "decimal(19,4)"),
];

const ANSI_TYPES: &[(&str, &str)] = &[
    (column::PK, "integer NOT NULL PRIMARY KEY"),
    (column::BIGPK, "bigint NOT NULL PRIMARY KEY"),
    (column::STRING, "varchar(255)"),
    (column::TEXT, "text"),
    (column::SMALLINT, "smallint"),
    (column::INTEGER, "integer"),
    (column::BIGINT, "bigint"),
    (column::FLOAT, "real"),
    (column::DOUBLE, "double precision"),
    (column::DECIMAL, "decimal(10,0)"),
    (column::DATETIME, "timestamp"),
    (column::TIMESTAMP, "timestamp"),
    (column::TIME, "time"),
    (column::DATE, "date"),
    (column::BINARY, "blob"),
    (column::BOOLEAN, "boolean"),
    (column::MONEY, "decimal(19,4)"),
];

/// Mapping from abstract column-type tokens to native type syntax
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMap {
    entries: BTreeMap<String, String>,
}

impl TypeMap {
    fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// The DB2 translations
    pub fn db2() -> Self {
        Self::from_pairs(DB2_TYPES)
    }

    /// Standard SQL translations
    pub fn ansi() -> Self {
        Self::from_pairs(ANSI_TYPES)
    }

    /// Replace or add entries
    pub fn with_overrides<'a, I>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        for (token, native) in overrides {
            self.entries.insert(token.clone(), native.clone());
        }
        self
    }

    pub fn get(&self, token: &str) -> Option<&str> {
        self.entries.get(token).map(String::as_str)
    }

    /// Translate an abstract type into native syntax.
    ///
    /// Besides bare tokens (`string`), a token may carry a length or
    /// precision (`string(64)`, `decimal(12,2)`) which replaces the native
    /// type's own, and trailing constraints (`integer NOT NULL`) which are
    /// kept. Anything not starting with a known token passes through as-is.
    ///
    /// # Examples
    /// ```
    /// use db2_query_core::TypeMap;
    ///
    /// let types = TypeMap::db2();
    /// assert_eq!(types.column_type("string(64) NOT NULL"), "varchar(64) NOT NULL");
    /// assert_eq!(types.column_type("money"), "decimal(19,4)");
    /// ```
    pub fn column_type(&self, token: &str) -> String {
        if let Some(native) = self.get(token) {
            return native.to_string();
        }

        if let Some(caps) = sized_token().captures(token) {
            if let Some(native) = self.get(&caps[1]) {
                let args = format!("({})", &caps[2]);
                let resized = parens().replace(native, NoExpand(&args));
                return format!("{}{}", resized, &caps[3]);
            }
        } else if let Some(caps) = leading_token().captures(token) {
            if let Some(native) = self.get(&caps[1]) {
                return format!("{}{}", native, &token[caps[1].len()..]);
            }
        }

        token.to_string()
    }
}

fn sized_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\((.+?)\)(.*)$").expect("valid regex"))
}

fn leading_token() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\w+)\s+").expect("valid regex"))
}

fn parens() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\(.+\)").expect("valid regex"))
}
