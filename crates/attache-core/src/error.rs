//! Error types for Attache.
//!
//! This module defines the error hierarchy used throughout the query
//! result cache. All errors implement the standard `std::error::Error`
//! trait via `thiserror`.
//!
//! # Error Handling Philosophy
//!
//! The cache is an optimization, never a correctness dependency:
//! - Cache store misses and outages are not errors at all
//! - Errors only surface when the underlying query itself fails, when
//!   request parameters cannot be encoded, or when settings are invalid
//! - Functions that can fail return `Result<T, AttacheError>`
//!
//! # Example
//!
//! ```
//! use attache_core::{AttacheError, Result};
//!
//! fn run_listing(post_type: &str) -> Result<Vec<u64>> {
//!     if post_type.is_empty() {
//!         return Err(AttacheError::invalid_request("post_type cannot be empty"));
//!     }
//!     Ok(vec![5, 9, 12])
//! }
//!
//! assert!(run_listing("attachment").is_ok());
//! assert!(run_listing("").unwrap_err().is_invalid_request());
//! ```

use thiserror::Error;

/// Main error type for Attache operations.
#[derive(Debug, Error)]
pub enum AttacheError {
    /// Request parameters could not be serialized into a canonical form.
    #[error("Failed to serialize {context}: {message}")]
    Serialization {
        /// What was being serialized (e.g. "query parameters")
        context: String,
        /// Description of the failure
        message: String,
        /// Underlying error, if any
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A request could not be built from the given input.
    #[error("Invalid query request: {reason}")]
    InvalidRequest {
        /// Why the request is invalid
        reason: String,
    },

    /// The underlying query executor failed.
    #[error("Query executor '{executor}' failed: {message}")]
    Executor {
        /// Name of the executor that failed
        executor: String,
        /// Description of what went wrong
        message: String,
        /// Underlying error
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Cache settings could not be loaded or failed validation.
    #[error("Invalid configuration for '{field}': {message}")]
    Configuration {
        /// Setting that failed
        field: String,
        /// Description of the failure
        message: String,
        /// Underlying error
        #[source]
        cause: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generic internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AttacheError {
    // ============================================
    // Convenience constructors
    // ============================================

    /// Creates a Serialization error wrapping its cause.
    pub fn serialization<E>(context: impl Into<String>, cause: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Serialization {
            context: context.into(),
            message: cause.to_string(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an InvalidRequest error.
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Creates an Executor error without a cause.
    ///
    /// # Example
    ///
    /// ```
    /// use attache_core::AttacheError;
    ///
    /// let error = AttacheError::executor("wp-query", "database went away");
    /// assert!(error.is_executor_error());
    /// assert!(error.to_string().contains("wp-query"));
    /// ```
    pub fn executor(executor: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Executor {
            executor: executor.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates an Executor error with a cause.
    pub fn executor_with_cause<E>(
        executor: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Executor {
            executor: executor.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates a Configuration error without a cause.
    pub fn configuration(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
            cause: None,
        }
    }

    /// Creates a Configuration error with a cause.
    pub fn configuration_with_cause<E>(
        field: impl Into<String>,
        message: impl Into<String>,
        cause: E,
    ) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Configuration {
            field: field.into(),
            message: message.into(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Creates an Internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================
    // Query methods
    // ============================================

    /// Returns true if this is a serialization error.
    pub fn is_serialization_error(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Returns true if this is an invalid request error.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, Self::InvalidRequest { .. })
    }

    /// Returns true if the underlying query failed.
    pub fn is_executor_error(&self) -> bool {
        matches!(self, Self::Executor { .. })
    }

    /// Returns true if this is a configuration error.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

/// Type alias for Results with AttacheError.
pub type Result<T> = std::result::Result<T, AttacheError>;
