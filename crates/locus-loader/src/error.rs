//! Error types for loader operations.

use locus_ident::IdentifierError;
use thiserror::Error;

/// Errors that can occur while configuring a loader or resolving objects.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// An identifier or sequence candidate could not be parsed.
    #[error(transparent)]
    Identifier(#[from] IdentifierError),

    /// The resolution sequence is not a non-empty list of templates.
    #[error("invalid sequence: {0}")]
    InvalidSequence(String),

    /// No sequence entry produced an object.
    #[error("identifier \"{identifier}\" is not a correct resource identifier")]
    Unresolved { identifier: String },

    /// A candidate named a type with no registered locator.
    #[error("no locator registered for type: {kind}")]
    UnregisteredLocator { kind: String },

    /// The locator declares a type but provides no `locate` implementation.
    #[error("locator for type '{kind}' does not implement locate")]
    LocateUnimplemented { kind: String },

    /// A locator failed for a reason other than "not found".
    #[error("locator error in '{kind}': {message}")]
    Locator { kind: String, message: String },

    /// The loader configuration could not be read or applied.
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O error while reading a configuration file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoaderError {
    /// Create a locator error with a type and message.
    pub fn locator(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Locator {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Returns true if nothing in the sequence resolved the identifier.
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }

    /// Returns true if the error came from sequence validation.
    pub fn is_invalid_sequence(&self) -> bool {
        matches!(self, Self::InvalidSequence(_))
    }
}

/// Convenience type alias for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;
