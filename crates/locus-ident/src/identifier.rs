use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{IdentifierError, Result};
use crate::inflect::{English, Singularize};

/// A structured reference to a loadable object.
///
/// The string form is `type://application/package.path.name`, where the
/// application and path are optional:
///
/// ```
/// use locus_ident::Identifier;
///
/// let id: Identifier = "view://admin/blog.posts.items".parse().unwrap();
/// assert_eq!(id.kind(), "view");
/// assert_eq!(id.application(), "admin");
/// assert_eq!(id.package(), "blog");
/// assert_eq!(id.path(), ["posts"]);
/// assert_eq!(id.name(), "item");
/// assert_eq!(id.to_string(), "view://admin/blog.posts.item");
/// ```
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Identifier {
    kind: String,
    application: String,
    package: String,
    path: Vec<String>,
    name: String,
}

impl Identifier {
    /// Parse an identifier, singularizing its name with the [`English`] rules.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::parse_with(raw, &English)
    }

    /// Parse an identifier using a caller-supplied inflector for the name.
    pub fn parse_with<S: Singularize + ?Sized>(raw: &str, inflector: &S) -> Result<Self> {
        let Some((kind, remainder)) = raw.split_once(':') else {
            return Err(IdentifierError::Malformed {
                raw: raw.to_string(),
            });
        };

        let remainder = remainder.strip_prefix("//").unwrap_or(remainder);

        // Segments after the second are ignored.
        let mut segments = remainder.split('/');
        let first = segments.next().unwrap_or_default();
        let (application, dotted) = match segments.next() {
            Some(second) => (first, second),
            None => ("", first),
        };

        let mut parts = dotted.split('.');
        let package = parts.next().unwrap_or_default().to_string();
        let mut path: Vec<String> = parts.map(str::to_string).collect();
        let name = path
            .pop()
            .map(|last| inflector.singularize(&last))
            .unwrap_or_default();

        Ok(Self {
            kind: kind.to_string(),
            application: application.to_string(),
            package,
            path,
            name,
        })
    }

    /// Serialize and parse again, normalizing any field set to a plural or
    /// dotted value through the setters.
    pub fn reparse(&self) -> Self {
        // The string form always carries the `:` separator.
        Self::parse(&self.to_string()).unwrap_or_else(|_| self.clone())
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn application(&self) -> &str {
        &self.application
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn path(&self) -> &[String] {
        &self.path
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if the identifier carries an application namespace.
    pub fn has_application(&self) -> bool {
        !self.application.is_empty()
    }

    pub fn set_kind(&mut self, kind: impl Into<String>) -> &mut Self {
        self.kind = kind.into();
        self
    }

    pub fn set_application(&mut self, application: impl Into<String>) -> &mut Self {
        self.application = application.into();
        self
    }

    pub fn set_package(&mut self, package: impl Into<String>) -> &mut Self {
        self.package = package.into();
        self
    }

    pub fn set_path<I, S>(&mut self, path: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.path = path.into_iter().map(Into::into).collect();
        self
    }

    /// Set the name verbatim. No singularization is applied.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.kind)?;
        if self.has_application() {
            write!(f, "://{}/", self.application)?;
        } else {
            f.write_str(":")?;
        }

        let package = Some(self.package.as_str()).filter(|p| !p.is_empty());
        let name = Some(self.name.as_str()).filter(|n| !n.is_empty());
        let components = package
            .into_iter()
            .chain(self.path.iter().map(String::as_str))
            .chain(name);

        for (i, component) in components.enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(component)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identifier({self})")
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<&str> for Identifier {
    type Error = IdentifierError;

    fn try_from(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Identifier {
    type Error = IdentifierError;

    fn try_from(s: String) -> Result<Self> {
        Self::parse(&s)
    }
}

impl Serialize for Identifier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inflect::singularize;
    use proptest::prelude::*;

    fn full() -> Identifier {
        Identifier::parse("type://application/package.path.name").unwrap()
    }

    fn core() -> Identifier {
        Identifier::parse("core:database.table.default").unwrap()
    }

    #[test]
    fn reject_missing_separator() {
        let err = Identifier::parse("incorrect.identifier").unwrap_err();
        assert!(err.is_malformed());
        assert_eq!(
            err,
            IdentifierError::Malformed {
                raw: "incorrect.identifier".into()
            }
        );
    }

    #[test]
    fn full_identifier_fields() {
        let id = full();
        assert_eq!(id.kind(), "type");
        assert_eq!(id.application(), "application");
        assert_eq!(id.package(), "package");
        assert_eq!(id.path(), ["path"]);
        assert_eq!(id.name(), "name");
        assert_eq!(id.to_string(), "type://application/package.path.name");
    }

    #[test]
    fn core_identifier_fields() {
        let id = core();
        assert_eq!(id.kind(), "core");
        assert_eq!(id.application(), "");
        assert!(!id.has_application());
        assert_eq!(id.package(), "database");
        assert_eq!(id.path(), ["table"]);
        assert_eq!(id.name(), "default");
        assert_eq!(id.to_string(), "core:database.table.default");
    }

    #[test]
    fn clone_preserves_string_form() {
        assert_eq!(full().clone().to_string(), "type://application/package.path.name");
        assert_eq!(core().clone().to_string(), "core:database.table.default");
        assert_eq!(core().reparse(), core());
    }

    #[test]
    fn name_is_singularized() {
        let id = Identifier::parse("model://shop/catalog.products.categories").unwrap();
        assert_eq!(id.name(), "category");
        assert_eq!(id.to_string(), "model://shop/catalog.products.category");
    }

    #[test]
    fn path_is_empty_without_middle_segments() {
        let id = Identifier::parse("core:database.user").unwrap();
        assert_eq!(id.package(), "database");
        assert!(id.path().is_empty());
        assert_eq!(id.name(), "user");
        assert_eq!(id.to_string(), "core:database.user");
    }

    #[test]
    fn package_only_has_no_stray_separator() {
        let id = Identifier::parse("core:database").unwrap();
        assert_eq!(id.package(), "database");
        assert_eq!(id.name(), "");
        assert_eq!(id.to_string(), "core:database");
    }

    #[test]
    fn leading_slashes_without_application() {
        let id = Identifier::parse("core://database.table.default").unwrap();
        assert_eq!(id.application(), "");
        assert_eq!(id.package(), "database");
        assert_eq!(id.to_string(), "core:database.table.default");
    }

    #[test]
    fn extra_slash_segments_are_ignored() {
        let id = Identifier::parse("type://app/pkg.name/trailing").unwrap();
        assert_eq!(id.application(), "app");
        assert_eq!(id.package(), "pkg");
        assert_eq!(id.name(), "name");
    }

    #[test]
    fn setters_chain() {
        let mut id = full();
        id.set_kind("test")
            .set_application("testapp")
            .set_package("testpackage")
            .set_path(["new", "path"])
            .set_name("testname");

        assert_eq!(id.kind(), "test");
        assert_eq!(id.application(), "testapp");
        assert_eq!(id.package(), "testpackage");
        assert_eq!(id.path(), ["new", "path"]);
        assert_eq!(id.name(), "testname");
        assert_eq!(id.to_string(), "test://testapp/testpackage.new.path.testname");
    }

    #[test]
    fn clearing_application_drops_slashes() {
        let mut id = full();
        id.set_application("");
        assert_eq!(id.to_string(), "type:package.path.name");
    }

    #[test]
    fn reparse_singularizes_set_name() {
        let mut id = core();
        id.set_name("defaults");
        assert_eq!(id.name(), "defaults");
        assert_eq!(id.reparse().name(), "default");
    }

    #[test]
    fn debug_shows_string_form() {
        assert_eq!(format!("{:?}", core()), "Identifier(core:database.table.default)");
    }

    #[test]
    fn serde_roundtrip() {
        let id = full();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"type://application/package.path.name\"");
        let parsed: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn serde_rejects_malformed() {
        let result: std::result::Result<Identifier, _> = serde_json::from_str("\"no-separator\"");
        assert!(result.is_err());
    }

    #[test]
    fn custom_inflector() {
        struct Verbatim;
        impl Singularize for Verbatim {
            fn singularize(&self, word: &str) -> String {
                word.to_string()
            }
        }
        let id = Identifier::parse_with("core:database.tables", &Verbatim).unwrap();
        assert_eq!(id.name(), "tables");
    }

    proptest! {
        #[test]
        fn simple_identifier_roundtrip(
            kind in "[a-z]{1,8}",
            package in "[a-z]{1,8}",
            word in "[a-z]{1,8}",
        ) {
            let name = singularize(&word);
            let raw = format!("{kind}:{package}.{name}");
            prop_assert_eq!(Identifier::parse(&raw).unwrap().to_string(), raw);
        }

        #[test]
        fn application_identifier_fields(
            kind in "[a-z]{1,8}",
            app in "[a-z]{1,8}",
            package in "[a-z]{1,8}",
            p1 in "[a-z]{1,8}",
            p2 in "[a-z]{1,8}",
            name in "[a-z]{1,8}",
        ) {
            let id = Identifier::parse(&format!("{kind}://{app}/{package}.{p1}.{p2}.{name}")).unwrap();
            prop_assert_eq!(id.application(), app.as_str());
            prop_assert_eq!(id.package(), package.as_str());
            let expected = [p1, p2];
            prop_assert_eq!(id.path(), expected.as_slice());
            prop_assert_eq!(id.name(), singularize(&name));
        }

        #[test]
        fn clone_is_idempotent(raw in "[a-z]{1,6}:(//[a-z]{1,6}/)?[a-z]{1,6}(\\.[a-z]{1,6}){0,3}") {
            let id = Identifier::parse(&raw).unwrap();
            prop_assert_eq!(id.clone().to_string(), id.to_string());
            prop_assert_eq!(id.reparse().to_string(), id.to_string());
        }
    }
}
