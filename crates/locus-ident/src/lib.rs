//! Structured object identifiers for locus.
//!
//! An identifier names a loadable object by type, an optional application
//! namespace, a package, zero or more path segments, and a name:
//!
//! ```text
//! type://application/package.path.name
//! core:database.table.default
//! ```
//!
//! The name is always stored in its singular form, so `core:database.tables`
//! and `core:database.table` refer to the same object.
//!
//! # Key Types
//!
//! - [`Identifier`] — Parsed identifier with chainable setters
//! - [`Singularize`] — Inflection seam used while parsing names
//! - [`English`] — Default English singularization rules
//! - [`IdentifierError`] — Parse failures

pub mod error;
pub mod identifier;
pub mod inflect;

pub use error::{IdentifierError, Result};
pub use identifier::Identifier;
pub use inflect::{singularize, English, Singularize};
