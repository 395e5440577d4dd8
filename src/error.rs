//! Request-facing error types
//!
//! Not-found conditions are never errors: operations report them as
//! absent/false/-2/0. Everything here is returned to the caller and never
//! terminates the process.

use thiserror::Error;

/// Errors returned by engine operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The key holds a value of a different type than the operation expects
    #[error("WRONGTYPE key '{key}' holds a {found}, not a {expected}")]
    WrongType {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Argument count outside the operation's accepted range
    #[error("ERR wrong number of arguments for '{0}' command")]
    WrongArity(String),

    /// An argument could not be interpreted (bad integer, NaN score, ...)
    #[error("ERR {0}")]
    InvalidArgument(String),

    /// The operation name is not part of the engine surface
    #[error("ERR unsupported operation '{0}'")]
    UnsupportedOperation(String),
}

impl EngineError {
    /// Build a type-mismatch error
    pub fn wrong_type(key: &str, expected: &'static str, found: &'static str) -> Self {
        EngineError::WrongType {
            key: key.to_string(),
            expected,
            found,
        }
    }

    /// Build an invalid-argument error
    pub fn invalid(msg: impl Into<String>) -> Self {
        EngineError::InvalidArgument(msg.into())
    }

    /// Stable machine-readable kind, used by the transport
    pub fn kind(&self) -> &'static str {
        match self {
            EngineError::WrongType { .. } => "wrong_type",
            EngineError::WrongArity(_) => "wrong_arity",
            EngineError::InvalidArgument(_) => "invalid_argument",
            EngineError::UnsupportedOperation(_) => "unsupported_operation",
        }
    }
}

/// Result alias for engine operations
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrong_type_message() {
        let err = EngineError::wrong_type("k", "list", "string");
        assert_eq!(err.to_string(), "WRONGTYPE key 'k' holds a string, not a list");
        assert_eq!(err.kind(), "wrong_type");
    }

    #[test]
    fn test_unsupported_kind() {
        let err = EngineError::UnsupportedOperation("FROB".into());
        assert_eq!(err.kind(), "unsupported_operation");
        assert!(err.to_string().contains("FROB"));
    }
}
