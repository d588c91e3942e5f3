//! The [`Locator`] trait defining how a candidate identifier becomes an object.
//!
//! A loader holds one locator per identifier type. Locators may look objects
//! up anywhere (a filesystem, a registry, a plugin table); the loader only
//! cares whether they found something.

use locus_ident::Identifier;

use crate::error::{LoaderError, Result};

/// Resolution strategy for one identifier type.
///
/// Implementations must be thread-safe (`Send + Sync`) and must report a
/// miss as `Ok(None)`, never as an error: the loader relies on misses to
/// move on to the next sequence entry. `Err` is reserved for failures that
/// should abort resolution altogether.
pub trait Locator<T>: Send + Sync {
    /// The identifier type this locator serves (the part before `:`).
    fn kind(&self) -> &str;

    /// Locate the object named by `identifier`.
    ///
    /// The provided implementation fails with
    /// [`LoaderError::LocateUnimplemented`]; every concrete locator is
    /// expected to override it.
    fn locate(&self, identifier: &Identifier) -> Result<Option<T>> {
        let _ = identifier;
        Err(LoaderError::LocateUnimplemented {
            kind: self.kind().to_string(),
        })
    }
}

/// Conversion into an [`Identifier`], parsing strings as needed.
///
/// Lets [`Loader::require`](crate::Loader::require) accept either raw
/// identifier strings or already-parsed identifiers.
pub trait IntoIdentifier {
    fn into_identifier(self) -> Result<Identifier>;
}

impl IntoIdentifier for Identifier {
    fn into_identifier(self) -> Result<Identifier> {
        Ok(self)
    }
}

impl IntoIdentifier for &Identifier {
    fn into_identifier(self) -> Result<Identifier> {
        Ok(self.clone())
    }
}

impl IntoIdentifier for &str {
    fn into_identifier(self) -> Result<Identifier> {
        Ok(Identifier::parse(self)?)
    }
}

impl IntoIdentifier for String {
    fn into_identifier(self) -> Result<Identifier> {
        Ok(Identifier::parse(&self)?)
    }
}

impl IntoIdentifier for &String {
    fn into_identifier(self) -> Result<Identifier> {
        Ok(Identifier::parse(self)?)
    }
}
