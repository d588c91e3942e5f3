use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};

/// The sequence used when none is configured: try the identifier exactly as
/// requested.
pub const DEFAULT_SEQUENCE: &str = "<Type>://<App>/<Package>.<Path>.<Name>";

/// What the loader does when a candidate names a type with no locator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnregisteredPolicy {
    /// Abort resolution with [`LoaderError::UnregisteredLocator`].
    #[default]
    Fail,
    /// Treat the candidate as a miss and try the next sequence entry.
    Skip,
}

/// Configuration for a [`Loader`](crate::Loader).
///
/// ```toml
/// sequence = [
///     "<Type>://<App>/<Package>.<Path>.<Name>",
///     "<Type>://framework/<Package>.<Path>.<Name>",
/// ]
/// caching = true
/// on_unregistered = "skip"
///
/// [aliases]
/// "view:blog.post" = "view://admin/blog.article"
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Templates tried in order during resolution.
    pub sequence: Vec<String>,
    /// Whether resolved objects are stored in the cache.
    pub caching: bool,
    /// Behavior for candidates whose type has no locator.
    pub on_unregistered: UnregisteredPolicy,
    /// Identifier aliases, alias → target.
    pub aliases: BTreeMap<String, String>,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            sequence: vec![DEFAULT_SEQUENCE.to_string()],
            caching: true,
            on_unregistered: UnregisteredPolicy::Fail,
            aliases: BTreeMap::new(),
        }
    }
}

impl LoaderConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| LoaderError::Config(e.to_string()))
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Serialize the configuration back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| LoaderError::Config(e.to_string()))
    }
}
