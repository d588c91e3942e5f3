use thiserror::Error;

/// Errors produced while parsing identifiers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// The string has no `:` separating the type from the rest.
    #[error("malformed identifier: {raw:?}")]
    Malformed { raw: String },
}

impl IdentifierError {
    /// Returns true if this error indicates a missing type separator.
    pub fn is_malformed(&self) -> bool {
        matches!(self, IdentifierError::Malformed { .. })
    }
}

/// Convenience type alias for identifier operations.
pub type Result<T> = std::result::Result<T, IdentifierError>;
