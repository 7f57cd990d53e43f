use std::error::Error as StdError;
use std::path::PathBuf;

use thiserror::Error;

/// Failure returned by an example's own logic. The runner wraps it into
/// [`CatalogError::ExecutionError`] together with the descriptor name.
pub type ExampleFailure = Box<dyn StdError + Send + Sync + 'static>;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("a pattern named '{name}' is already registered")]
    RegistrationConflict { name: String },

    #[error("no pattern named '{name}' in the catalog")]
    NotFound { name: String },

    #[error("cannot {operation} while the builder is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("example '{name}' failed: {source}")]
    ExecutionError {
        name: String,
        #[source]
        source: ExampleFailure,
    },

    #[error("unknown category '{0}' (expected creational, structural or behavioral)")]
    UnknownCategory(String),

    #[error("invalid input for '{name}': {reason}")]
    InvalidInput { name: String, reason: String },

    #[error("failed to load config {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

impl CatalogError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn conflict(name: impl Into<String>) -> Self {
        Self::RegistrationConflict { name: name.into() }
    }

    pub fn invalid_input(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn execution(name: impl Into<String>, source: ExampleFailure) -> Self {
        Self::ExecutionError {
            name: name.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_pattern() {
        let err = CatalogError::conflict("Builder");
        assert_eq!(err.to_string(), "a pattern named 'Builder' is already registered");

        let err = CatalogError::not_found("Visitor");
        assert!(err.to_string().contains("Visitor"));
    }

    #[test]
    fn test_execution_error_keeps_source() {
        let inner = CatalogError::invalid_input("Builder", "patties must be a number");
        let err = CatalogError::execution("Builder", Box::new(inner));

        let source = err.source().expect("source is preserved");
        assert!(source.to_string().contains("patties must be a number"));
        assert!(err.to_string().starts_with("example 'Builder' failed"));
    }
}
