//! Sequence templates.
//!
//! A template is a string such as `<Type>://<App>/<Package>.<Path>.<Name>`.
//! It is tokenized once into literal text and [`Placeholder`]s, and rendered
//! against an identifier in a single pass, so field values that happen to
//! contain placeholder text are never substituted a second time.

use std::fmt;

use locus_ident::{Identifier, IdentifierError};

/// A field of an identifier that a template can refer to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `<Type>`
    Type,
    /// `<App>` or `<Application>`
    App,
    /// `<Package>`
    Package,
    /// `<Path>`, the path segments joined with `.`
    Path,
    /// `<Name>`
    Name,
}

/// Recognized placeholder tokens.
const TOKENS: &[(&str, Placeholder)] = &[
    ("<Type>", Placeholder::Type),
    ("<App>", Placeholder::App),
    ("<Application>", Placeholder::App),
    ("<Package>", Placeholder::Package),
    ("<Path>", Placeholder::Path),
    ("<Name>", Placeholder::Name),
];

impl Placeholder {
    /// The canonical token for this placeholder.
    pub fn token(self) -> &'static str {
        match self {
            Self::Type => "<Type>",
            Self::App => "<App>",
            Self::Package => "<Package>",
            Self::Path => "<Path>",
            Self::Name => "<Name>",
        }
    }

    /// Match a placeholder token at the start of `input`, returning it and
    /// the token length.
    fn match_prefix(input: &str) -> Option<(Self, usize)> {
        TOKENS
            .iter()
            .find(|(token, _)| input.starts_with(token))
            .map(|(token, placeholder)| (*placeholder, token.len()))
    }

    fn write_value(self, identifier: &Identifier, out: &mut String) {
        match self {
            Self::Type => out.push_str(identifier.kind()),
            Self::App => out.push_str(identifier.application()),
            Self::Package => out.push_str(identifier.package()),
            Self::Path => out.push_str(&identifier.path().join(".")),
            Self::Name => out.push_str(identifier.name()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A tokenized sequence template.
#[derive(Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Tokenize a template. Any `<...>` text that is not a known placeholder
    /// is kept as a literal.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(start) = rest.find('<') {
            literal.push_str(&rest[..start]);
            rest = &rest[start..];

            match Placeholder::match_prefix(rest) {
                Some((placeholder, len)) => {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(placeholder));
                    rest = &rest[len..];
                }
                None => {
                    literal.push('<');
                    rest = &rest[1..];
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self {
            source: source.to_string(),
            segments,
        }
    }

    /// The template text as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholders in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = Placeholder> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(p) => Some(*p),
            Segment::Literal(_) => None,
        })
    }

    /// Substitute the identifier's fields into the template.
    ///
    /// An empty `<Path>` takes one adjoining `.` with it, so `pkg.<Path>.name`
    /// renders as `pkg.name` rather than `pkg..name`.
    pub fn render(&self, identifier: &Identifier) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut skip_dot = false;
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => {
                    let text = text.as_str();
                    if std::mem::take(&mut skip_dot) {
                        out.push_str(text.strip_prefix('.').unwrap_or(text));
                    } else {
                        out.push_str(text);
                    }
                }
                Segment::Placeholder(Placeholder::Path) if identifier.path().is_empty() => {
                    if out.ends_with('.') {
                        out.pop();
                    } else {
                        skip_dot = true;
                    }
                }
                Segment::Placeholder(p) => {
                    skip_dot = false;
                    p.write_value(identifier, &mut out);
                }
            }
        }
        out
    }

    /// Render the template and parse the result as a candidate identifier.
    pub fn expand(&self, identifier: &Identifier) -> Result<Identifier, IdentifierError> {
        Identifier::parse(&self.render(identifier))
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Template({:?})", self.source)
    }
}

impl From<&str> for Template {
    fn from(source: &str) -> Self {
        Self::parse(source)
    }
}

impl From<String> for Template {
    fn from(source: String) -> Self {
        Self::parse(&source)
    }
}
