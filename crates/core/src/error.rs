//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every engine failure is terminal and deterministic: the caller must change
/// the request (or the world) before retrying. `Storage` is the only variant
/// raised by a port rather than by a business rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed, missing or out-of-range request data.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A referenced entity (e.g. a location) cannot be resolved.
    #[error("invalid reference: {0}")]
    InvalidReference(String),

    /// A referenced store/product/warehouse does not exist or is not active.
    #[error("not found: {0}")]
    NotFound(String),

    /// The operation would violate a uniqueness or capacity/cardinality invariant.
    #[error("conflict: {0}")]
    Conflict(String),

    /// A backing store rejected or failed a read/write.
    #[error("storage failure: {0}")]
    Storage(String),
}

/// Discriminant of [`DomainError`], for callers that branch on the failure class.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInput,
    InvalidReference,
    NotFound,
    Conflict,
    Storage,
}

impl ErrorKind {
    /// `InvalidReference` is a subtype of invalid input.
    pub fn is_invalid_input(self) -> bool {
        matches!(self, ErrorKind::InvalidInput | ErrorKind::InvalidReference)
    }
}

impl DomainError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn invalid_reference(msg: impl Into<String>) -> Self {
        Self::InvalidReference(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidInput(_) => ErrorKind::InvalidInput,
            DomainError::InvalidReference(_) => ErrorKind::InvalidReference,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::Conflict(_) => ErrorKind::Conflict,
            DomainError::Storage(_) => ErrorKind::Storage,
        }
    }

    /// Human-readable detail without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            DomainError::InvalidInput(msg)
            | DomainError::InvalidReference(msg)
            | DomainError::NotFound(msg)
            | DomainError::Conflict(msg)
            | DomainError::Storage(msg) => msg,
        }
    }

    /// Status code a resource layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidInput | ErrorKind::InvalidReference => 422,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Storage => 500,
        }
    }
}
