//! Builder options

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::params::PARAM_PREFIX;
use crate::Result;

/// Single-row table used to produce literal rows in membership predicates
pub const DUMMY_TABLE: &str = "SYSIBM.SYSDUMMY1";

/// Options for [`Db2QueryBuilder`](crate::Db2QueryBuilder)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuilderConfig {
    /// Prefix of generated placeholder names
    pub param_prefix: String,
    /// Table selected from when a literal row is needed
    pub dummy_table: String,
    /// Entries merged over the DB2 type map
    pub type_overrides: BTreeMap<String, String>,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            param_prefix: PARAM_PREFIX.to_string(),
            dummy_table: DUMMY_TABLE.to_string(),
            type_overrides: BTreeMap::new(),
        }
    }
}

impl BuilderConfig {
    /// Load options from JSON; missing fields keep their defaults
    ///
    /// # Examples
    /// ```
    /// use db2_query_core::BuilderConfig;
    ///
    /// let config = BuilderConfig::from_json(r#"{"type_overrides": {"text": "clob(2M)"}}"#).unwrap();
    /// assert_eq!(config.param_prefix, ":qp");
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn test_defaults() {
        let config = BuilderConfig::default();
        assert_eq!(config.param_prefix, ":qp");
        assert_eq!(config.dummy_table, "SYSIBM.SYSDUMMY1");
        assert!(config.type_overrides.is_empty());
    }

    #[test]
    fn test_partial_json() {
        let config = BuilderConfig::from_json(
            r#"{"param_prefix": ":p", "type_overrides": {"string": "varchar(100)"}}"#,
        )
        .unwrap();
        assert_eq!(config.param_prefix, ":p");
        assert_eq!(config.dummy_table, DUMMY_TABLE);
        assert_eq!(
            config.type_overrides.get("string").map(String::as_str),
            Some("varchar(100)")
        );
    }

    #[test]
    fn test_invalid_json() {
        let result = BuilderConfig::from_json("{not json");
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_round_trip_through_json_value() {
        let config = BuilderConfig::default();
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["dummy_table"], "SYSIBM.SYSDUMMY1");
    }
}
