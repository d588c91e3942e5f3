//! The resolution context: sequence, locators, aliases, and cache.
//!
//! A host creates one [`Loader`] at startup, registers its locators, and
//! passes the loader to whatever needs to resolve identifiers. Mutating
//! operations take `&mut self`; hosts that share a loader across threads
//! wrap it in their own lock.

use std::collections::HashMap;
use std::fmt;

use locus_ident::Identifier;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::config::{LoaderConfig, UnregisteredPolicy, DEFAULT_SEQUENCE};
use crate::error::{LoaderError, Result};
use crate::locator::{IntoIdentifier, Locator};
use crate::template::Template;

/// Decides whether resolved objects are stored in the cache.
pub enum CachePolicy<T> {
    /// Never store resolved objects. Entries added with
    /// [`Loader::add_cache`] are still served.
    Disabled,
    /// Store every resolved object.
    Enabled,
    /// Run the hook right before storing; `false` skips the store.
    Filter(Box<dyn Fn(&Identifier, &T) -> bool + Send + Sync>),
}

impl<T> CachePolicy<T> {
    /// Returns `true` unless caching is disabled outright.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Self::Disabled)
    }

    fn allows(&self, identifier: &Identifier, object: &T) -> bool {
        match self {
            Self::Disabled => false,
            Self::Enabled => true,
            Self::Filter(hook) => hook(identifier, object),
        }
    }
}

impl<T> fmt::Debug for CachePolicy<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("Disabled"),
            Self::Enabled => f.write_str("Enabled"),
            Self::Filter(_) => f.write_str("Filter(..)"),
        }
    }
}

/// Resolves identifiers to objects of type `T`.
///
/// Resolution expands the requested identifier through each template of the
/// sequence in order and asks the locator registered for the candidate's
/// type. The first candidate a locator finds wins; later templates are not
/// tried.
pub struct Loader<T> {
    sequence: Vec<Template>,
    locators: HashMap<String, Box<dyn Locator<T>>>,
    aliases: HashMap<String, Identifier>,
    cache: HashMap<String, T>,
    caching: CachePolicy<T>,
    on_unregistered: UnregisteredPolicy,
}

impl<T: Clone> Loader<T> {
    /// Create a loader with the default sequence, caching enabled, and no
    /// locators.
    pub fn new() -> Self {
        Self {
            sequence: vec![Template::parse(DEFAULT_SEQUENCE)],
            locators: HashMap::new(),
            aliases: HashMap::new(),
            cache: HashMap::new(),
            caching: CachePolicy::Enabled,
            on_unregistered: UnregisteredPolicy::default(),
        }
    }

    /// Create a loader from a configuration. Locators are registered
    /// separately.
    pub fn from_config(config: &LoaderConfig) -> Result<Self> {
        let mut loader = Self::new();
        loader.set_sequence(&config.sequence)?;
        loader.set_caching(config.caching);
        loader.set_unregistered_policy(config.on_unregistered);
        for (alias, target) in &config.aliases {
            loader.register_alias(alias.as_str(), target.as_str())?;
        }
        Ok(loader)
    }

    // ---- Sequence ----

    /// The current sequence.
    pub fn sequence(&self) -> &[Template] {
        &self.sequence
    }

    /// Replace the sequence. Fails without touching the current sequence if
    /// `sequence` is empty.
    pub fn set_sequence<I, S>(&mut self, sequence: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let templates: Vec<Template> = sequence
            .into_iter()
            .map(|s| Template::parse(s.as_ref()))
            .collect();
        if templates.is_empty() {
            return Err(LoaderError::InvalidSequence(
                "the sequence needs at least one entry".into(),
            ));
        }
        debug!(entries = templates.len(), "sequence replaced");
        self.sequence = templates;
        Ok(self)
    }

    /// Replace the sequence from untyped input, such as a value read from a
    /// host's own configuration. The value must be a non-empty array of
    /// strings.
    pub fn set_sequence_value(&mut self, value: &Value) -> Result<&mut Self> {
        let Value::Array(items) = value else {
            return Err(LoaderError::InvalidSequence(format!(
                "the loader sequence must be a list ({} given)",
                json_type(value)
            )));
        };

        let mut entries = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::String(s) => entries.push(s.as_str()),
                other => {
                    return Err(LoaderError::InvalidSequence(format!(
                        "sequence entries must be strings ({} given)",
                        json_type(other)
                    )))
                }
            }
        }
        self.set_sequence(entries)
    }

    // ---- Locators ----

    /// Register a locator under its declared type.
    ///
    /// The first locator registered for a type wins; later registrations
    /// for the same type are ignored and `false` is returned.
    pub fn add_locator(&mut self, locator: Box<dyn Locator<T>>) -> bool {
        let kind = locator.kind().to_string();
        if self.locators.contains_key(&kind) {
            warn!(kind = %kind, "locator already registered; ignoring");
            return false;
        }
        debug!(kind = %kind, "locator registered");
        self.locators.insert(kind, locator);
        true
    }

    /// Returns `true` if a locator serves identifiers of type `kind`.
    pub fn has_locator(&self, kind: &str) -> bool {
        self.locators.contains_key(kind)
    }

    /// The current unregistered-type policy.
    pub fn unregistered_policy(&self) -> UnregisteredPolicy {
        self.on_unregistered
    }

    pub fn set_unregistered_policy(&mut self, policy: UnregisteredPolicy) -> &mut Self {
        self.on_unregistered = policy;
        self
    }

    // ---- Aliases ----

    /// Make requests for `alias` resolve `target` instead. The cache entry
    /// is still keyed by the alias.
    pub fn register_alias(
        &mut self,
        alias: impl IntoIdentifier,
        target: impl IntoIdentifier,
    ) -> Result<&mut Self> {
        let alias = alias.into_identifier()?.to_string();
        let target = target.into_identifier()?;
        debug!(alias = %alias, target = %target, "alias registered");
        self.aliases.insert(alias, target);
        Ok(self)
    }

    /// Remove an alias. Returns `true` if it existed.
    pub fn remove_alias(&mut self, alias: impl IntoIdentifier) -> Result<bool> {
        let alias = alias.into_identifier()?.to_string();
        Ok(self.aliases.remove(&alias).is_some())
    }

    // ---- Cache ----

    /// Enable caching of resolved objects.
    pub fn enable_caching(&mut self) -> &mut Self {
        self.set_caching(true)
    }

    /// Enable or disable caching of resolved objects.
    pub fn set_caching(&mut self, enabled: bool) -> &mut Self {
        self.caching = if enabled {
            CachePolicy::Enabled
        } else {
            CachePolicy::Disabled
        };
        self
    }

    /// Enable caching, gated by `filter`. The filter sees the identifier
    /// that was resolved and the object found for it.
    pub fn set_cache_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Fn(&Identifier, &T) -> bool + Send + Sync + 'static,
    {
        self.caching = CachePolicy::Filter(Box::new(filter));
        self
    }

    /// The current cache policy.
    pub fn cache_policy(&self) -> &CachePolicy<T> {
        &self.caching
    }

    pub fn caching_enabled(&self) -> bool {
        self.caching.is_enabled()
    }

    /// Store `object` under `key`, replacing any previous entry.
    pub fn add_cache(&mut self, key: impl Into<String>, object: T) -> &mut Self {
        self.cache.insert(key.into(), object);
        self
    }

    /// The cached object under `key`, if any.
    pub fn get_cache(&self, key: &str) -> Option<&T> {
        self.cache.get(key)
    }

    /// Remove and return the cached object under `key`. Missing keys are
    /// not an error.
    pub fn remove_cache(&mut self, key: &str) -> Option<T> {
        self.cache.remove(key)
    }

    /// Number of cached objects.
    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop every cached object.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    // ---- Resolution ----

    /// Resolve an identifier, failing with [`LoaderError::Unresolved`] if
    /// no sequence entry finds an object.
    pub fn require(&mut self, identifier: impl IntoIdentifier) -> Result<T> {
        let requested = identifier.into_identifier()?;
        let key = requested.to_string();
        match self.fetch(&requested, key)? {
            Some(object) => Ok(object),
            None => Err(LoaderError::Unresolved {
                identifier: requested.to_string(),
            }),
        }
    }

    /// Resolve an identifier, returning `Ok(None)` if no sequence entry
    /// finds an object. Other errors still propagate.
    pub fn require_soft(&mut self, identifier: impl IntoIdentifier) -> Result<Option<T>> {
        let requested = identifier.into_identifier()?;
        let key = requested.to_string();
        self.fetch(&requested, key)
    }

    /// [`require`](Self::require) or [`require_soft`](Self::require_soft),
    /// chosen at runtime.
    pub fn require_with(
        &mut self,
        identifier: impl IntoIdentifier,
        soft_fail: bool,
    ) -> Result<Option<T>> {
        if soft_fail {
            self.require_soft(identifier)
        } else {
            self.require(identifier).map(Some)
        }
    }

    /// Resolve an identifier for a particular configuration.
    ///
    /// Objects are cached per identifier and per configuration: the cache
    /// key is the identifier followed by the JSON form of the
    /// configuration's truthy entries, so `{"debug": false}` and `{}` share
    /// an entry.
    pub fn load(
        &mut self,
        identifier: impl IntoIdentifier,
        config: &Map<String, Value>,
    ) -> Result<T> {
        let requested = identifier.into_identifier()?;
        let key = format!("{requested}_{}", config_key(config));
        match self.fetch(&requested, key)? {
            Some(object) => Ok(object),
            None => Err(LoaderError::Unresolved {
                identifier: requested.to_string(),
            }),
        }
    }

    fn fetch(&mut self, requested: &Identifier, key: String) -> Result<Option<T>> {
        if let Some(hit) = self.cache.get(&key) {
            debug!(key = %key, "cache hit");
            return Ok(Some(hit.clone()));
        }
        debug!(key = %key, "cache miss");

        let target = match self.aliases.get(&requested.to_string()) {
            Some(target) => {
                debug!(alias = %requested, target = %target, "alias applied");
                target.clone()
            }
            None => requested.clone(),
        };

        let Some(object) = self.resolve(&target)? else {
            return Ok(None);
        };

        if self.caching.allows(&target, &object) {
            debug!(key = %key, "cached");
            self.cache.insert(key, object.clone());
        }
        Ok(Some(object))
    }

    /// Walk the sequence for `identifier`, returning the first object found.
    pub fn resolve(&self, identifier: &Identifier) -> Result<Option<T>> {
        for template in &self.sequence {
            let candidate = template.expand(identifier)?;
            debug!(template = %template, candidate = %candidate, "trying candidate");
            if let Some(object) = self.receive(&candidate)? {
                return Ok(Some(object));
            }
        }
        debug!(identifier = %identifier, "sequence exhausted");
        Ok(None)
    }

    /// Expand a single template for `identifier`.
    pub fn parse_sequence(
        &self,
        template: &str,
        identifier: impl IntoIdentifier,
    ) -> Result<Identifier> {
        let identifier = identifier.into_identifier()?;
        Ok(Template::parse(template).expand(&identifier)?)
    }

    /// Hand a candidate to the locator registered for its type.
    pub fn receive(&self, candidate: &Identifier) -> Result<Option<T>> {
        match self.locators.get(candidate.kind()) {
            Some(locator) => locator.locate(candidate),
            None => match self.on_unregistered {
                UnregisteredPolicy::Fail => Err(LoaderError::UnregisteredLocator {
                    kind: candidate.kind().to_string(),
                }),
                UnregisteredPolicy::Skip => {
                    let kind = candidate.kind();
                    warn!(kind = %kind, "no locator for type; skipping candidate");
                    Ok(None)
                }
            },
        }
    }
}

impl<T: Clone> Default for Loader<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Loader<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.locators.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("Loader")
            .field("sequence", &self.sequence)
            .field("locators", &kinds)
            .field("aliases", &self.aliases.len())
            .field("cached", &self.cache.len())
            .field("caching", &self.caching)
            .field("on_unregistered", &self.on_unregistered)
            .finish()
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn config_key(config: &Map<String, Value>) -> String {
    let truthy: Map<String, Value> = config
        .iter()
        .filter(|(_, value)| is_truthy(value))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    Value::Object(truthy).to_string()
}
