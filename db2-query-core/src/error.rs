//! Error types for the DB2 statement builder

use thiserror::Error;

/// The main error type for statement building
#[derive(Error, Debug)]
pub enum Error {
    /// Database connection or execution error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Failure reported by a non-sqlx execution or introspection collaborator
    #[error("Execution error: {message}")]
    Execution { message: String },

    /// An argument could not be resolved against the database
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience Result type for statement building
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new invalid argument error
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a new execution error
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
        }
    }

    /// The table could not be resolved by the schema collaborator
    pub fn table_not_found(table: impl AsRef<str>) -> Self {
        Self::invalid_argument(format!("Table not found: {}", table.as_ref()))
    }

    /// The table exists but declares no identity column
    pub fn no_sequence(table: impl AsRef<str>) -> Self {
        Self::invalid_argument(format!(
            "There is no sequence associated with table '{}'.",
            table.as_ref()
        ))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_error() {
        let err = Error::invalid_argument("bad operator");
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "Invalid argument: bad operator");
    }

    #[test]
    fn test_table_not_found_is_invalid_argument() {
        let err = Error::table_not_found("customer");
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(err.to_string(), "Invalid argument: Table not found: customer");
    }

    #[test]
    fn test_no_sequence_error() {
        let err = Error::no_sequence("audit_log");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Invalid argument: There is no sequence associated with table 'audit_log'."
        );
    }

    #[test]
    fn test_execution_error() {
        let err = Error::execution("SQL0204N  \"DB2INST1.MISSING\" is an undefined name.");
        assert!(matches!(err, Error::Execution { .. }));
        assert!(!err.is_invalid_argument());
        assert!(err.to_string().starts_with("Execution error: SQL0204N"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Serialization(_)));
    }
}
