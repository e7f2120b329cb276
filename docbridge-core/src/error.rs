//! Error types and result types for model store operations.
//!
//! This module provides comprehensive error handling for the whole model layer.
//! Use [`ModelStoreResult<T>`] as the return type for fallible operations.

use bson::error::Error as BsonError;
use serde_json::Error as SerdeJsonError;
use thiserror::Error;

/// Represents all possible errors that can occur in the model layer.
///
/// This enum covers configuration and serialization failures, lookup misses,
/// document lifecycle conflicts, validation results, and backend-specific errors.
#[derive(Error, Debug)]
pub enum ModelStoreError {
    /// Serialization/deserialization error when converting between model and document formats (BSON, JSON).
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Error during store initialization or connection setup.
    #[error("Initialization error: {0}")]
    Initialization(String),
    /// A model type is declared without a required piece of configuration,
    /// such as one of its two collection names.
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// A document with the given ID already exists in the collection.
    /// The first argument is the document ID, the second is the collection name.
    #[error("Document {0} already exists in collection {1}")]
    DocumentAlreadyExists(String, String),
    /// A `get` scanned the full result set without finding a match.
    #[error("{model} matching the given lookup does not exist")]
    DoesNotExist {
        /// Name of the model type that was queried.
        model: &'static str,
    },
    /// A lookup referenced an attribute the model does not declare.
    #[error("Unknown attribute {attribute} on model {model}")]
    UnknownAttribute {
        /// Name of the model type that was queried.
        model: &'static str,
        /// The attribute name that failed to resolve.
        attribute: String,
    },
    /// Indexing into a materialized result set beyond its bounds.
    #[error("Index {index} out of range for result set of length {len}")]
    IndexOutOfRange {
        /// The requested index.
        index: usize,
        /// The length of the materialized result set.
        len: usize,
    },
    /// One or more uniqueness constraints were violated.
    #[error("{0}")]
    Validation(ValidationErrors),
    /// An error occurred in the underlying storage backend.
    #[error("Backend error: {0}")]
    Backend(String),
}

/// A specialized `Result` type for model store operations.
///
/// This type alias is used throughout the crate to indicate operations that may fail
/// with a [`ModelStoreError`].
pub type ModelStoreResult<T> = Result<T, ModelStoreError>;

impl From<BsonError> for ModelStoreError {
    fn from(err: BsonError) -> Self {
        ModelStoreError::Serialization(err.to_string())
    }
}

impl From<SerdeJsonError> for ModelStoreError {
    fn from(err: SerdeJsonError) -> Self {
        ModelStoreError::Serialization(err.to_string())
    }
}

/// A single uniqueness-constraint violation.
///
/// `constraint` names the violated constraint (the joined field list),
/// `message` is the human-readable description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstraintViolation {
    pub constraint: String,
    pub message: String,
}

/// The aggregate result of a uniqueness validation pass.
///
/// Violations are collected across every declared constraint before being
/// reported, in declaration order. A validation pass never stops at the
/// first failed constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    violations: Vec<ConstraintViolation>,
}

impl ValidationErrors {
    /// Creates an empty set of violations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a violation for `constraint`.
    pub fn push(&mut self, constraint: impl Into<String>, message: impl Into<String>) {
        self.violations.push(ConstraintViolation {
            constraint: constraint.into(),
            message: message.into(),
        });
    }

    /// Returns `true` when no constraint was violated.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of recorded violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// The recorded violations, in constraint declaration order.
    pub fn violations(&self) -> &[ConstraintViolation] {
        &self.violations
    }

    /// Consumes the set, returning `Ok(())` when empty and the aggregate
    /// error otherwise.
    pub fn into_result(self) -> ModelStoreResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ModelStoreError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation failed for {} constraint(s):", self.violations.len())?;
        for violation in &self.violations {
            write!(f, " [{}] {};", violation.constraint, violation.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_accumulate_in_order() {
        let mut errors = ValidationErrors::new();
        errors.push("name", "Teacher with this name already exists.");
        errors.push("name, teacher", "Student with this name, teacher already exists.");

        assert_eq!(errors.len(), 2);
        assert_eq!(errors.violations()[0].constraint, "name");
        assert_eq!(errors.violations()[1].constraint, "name, teacher");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn empty_validation_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }
}
