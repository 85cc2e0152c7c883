//! Error types for the Vitrine content engine.

use serde::Serialize;
use thiserror::Error;

/// A shared error type for the entire Vitrine workspace.
///
/// This provides typed, structured error variants so the error channel
/// always carries a kind plus a message, never a raw exception object.
#[derive(Error, Debug, Clone, Serialize)]
pub enum VitrineError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Content does not match the declared section type
    #[error("Shape error: {0}")]
    Shape(String),

    /// Gateway failure (network, non-2xx status, or non-JSON body)
    #[error("Gateway unavailable: {message}")]
    Gateway {
        /// HTTP status code when the gateway answered at all
        status: Option<u16>,
        message: String,
    },

    /// A required field is missing or empty at the accessor boundary
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "JSON", etc.
        message: String,
    },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl VitrineError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Shape error
    pub fn shape(message: impl Into<String>) -> Self {
        Self::Shape(message.into())
    }

    /// Creates a Gateway error without an HTTP status
    pub fn gateway(message: impl Into<String>) -> Self {
        Self::Gateway {
            status: None,
            message: message.into(),
        }
    }

    /// Creates a Gateway error carrying the HTTP status the service answered with
    pub fn gateway_status(status: u16, message: impl Into<String>) -> Self {
        Self::Gateway {
            status: Some(status),
            message: message.into(),
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a Shape error
    pub fn is_shape(&self) -> bool {
        matches!(self, Self::Shape(_))
    }

    /// Check if this is a Gateway error
    pub fn is_gateway(&self) -> bool {
        matches!(self, Self::Gateway { .. })
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<serde_json::Error> for VitrineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, VitrineError>`.
pub type Result<T> = std::result::Result<T, VitrineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_predicate() {
        let err = VitrineError::not_found("Section", "about");
        assert!(err.is_not_found());
        assert!(!err.is_gateway());
        assert_eq!(err.to_string(), "Entity not found: Section 'about'");
    }

    #[test]
    fn test_gateway_status() {
        let err = VitrineError::gateway_status(503, "service unavailable");
        match err {
            VitrineError::Gateway { status, .. } => assert_eq!(status, Some(503)),
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_from_serde_json() {
        let parse_err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let err: VitrineError = parse_err.into();
        assert!(matches!(err, VitrineError::Serialization { .. }));
    }
}
