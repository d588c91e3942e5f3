//! In-memory locator for tests and hosts that register objects up front.
//!
//! [`RegistryLocator`] stores objects in a `HashMap` protected by a
//! `RwLock`. Entries are keyed either by a full identifier string or by a
//! bare name; lookups try the full string first.

use std::collections::HashMap;
use std::sync::RwLock;

use locus_ident::Identifier;

use crate::error::{LoaderError, Result};
use crate::locator::Locator;

/// A [`Locator`] backed by an in-memory map.
///
/// Objects are cloned out on every successful lookup, so `T` is typically
/// cheap to clone (an `Arc`, a handle, or a small value).
#[derive(Debug)]
pub struct RegistryLocator<T> {
    kind: String,
    entries: RwLock<HashMap<String, T>>,
}

impl<T> RegistryLocator<T> {
    /// Create an empty registry serving identifiers of type `kind`.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    fn poisoned(&self, e: impl std::fmt::Display) -> LoaderError {
        LoaderError::locator(&self.kind, format!("lock poisoned: {e}"))
    }

    /// Register `object` under `key`, replacing any previous entry.
    ///
    /// `key` is either a full identifier string (`view://admin/blog.post`)
    /// or a bare name (`post`) that matches any identifier with that name.
    pub fn insert(&self, key: impl Into<String>, object: T) -> Result<()> {
        let mut entries = self.entries.write().map_err(|e| self.poisoned(e))?;
        entries.insert(key.into(), object);
        Ok(())
    }

    /// Remove the entry under `key`. Returns `true` if it existed.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.write().map_err(|e| self.poisoned(e))?;
        Ok(entries.remove(key).is_some())
    }

    /// Number of registered entries.
    pub fn len(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(|e| self.poisoned(e))?;
        Ok(entries.len())
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl<T: Clone + Send + Sync> Locator<T> for RegistryLocator<T> {
    fn kind(&self) -> &str {
        &self.kind
    }

    fn locate(&self, identifier: &Identifier) -> Result<Option<T>> {
        let entries = self.entries.read().map_err(|e| self.poisoned(e))?;
        let found = entries
            .get(&identifier.to_string())
            .or_else(|| entries.get(identifier.name()));
        Ok(found.cloned())
    }
}
