//! Object resolution for locus.
//!
//! A [`Loader`] turns an [`Identifier`] into an object. It expands the
//! identifier through an ordered sequence of [`Template`]s, hands each
//! candidate to the [`Locator`] registered for the candidate's type, and
//! caches the first object found.
//!
//! # Quick Start
//!
//! ```rust
//! use locus_loader::{Loader, RegistryLocator};
//!
//! let views = RegistryLocator::new("view");
//! views.insert("item", "item view".to_string()).unwrap();
//!
//! let mut loader: Loader<String> = Loader::new();
//! loader.add_locator(Box::new(views));
//!
//! let view = loader.require("view://admin/blog.posts.items").unwrap();
//! assert_eq!(view, "item view");
//! ```
//!
//! # Modules
//!
//! - [`error`] — Error types for loader operations
//! - [`template`] — Sequence templates and placeholder substitution
//! - [`locator`] — The [`Locator`] trait and identifier coercion
//! - [`registry`] — In-memory [`RegistryLocator`]
//! - [`config`] — TOML-backed [`LoaderConfig`]
//! - [`loader`] — The [`Loader`] itself

pub mod config;
pub mod error;
pub mod loader;
pub mod locator;
pub mod registry;
pub mod template;

pub use config::{LoaderConfig, UnregisteredPolicy, DEFAULT_SEQUENCE};
pub use error::{LoaderError, Result};
pub use loader::{CachePolicy, Loader};
pub use locator::{IntoIdentifier, Locator};
pub use locus_ident::Identifier;
pub use registry::RegistryLocator;
pub use template::{Placeholder, Template};
