//! Name inflection used when parsing identifiers.
//!
//! Identifier names are stored in singular form. The [`Singularize`] trait is
//! the seam for plugging in a full inflection library; [`English`] is a small
//! deterministic rule set that covers the regular English plurals plus a table
//! of irregular and uncountable nouns.

/// Converts a plural noun into its singular form.
///
/// Implementations must be deterministic and idempotent: singularizing a
/// word that is already singular returns it unchanged.
pub trait Singularize: Send + Sync {
    fn singularize(&self, word: &str) -> String;
}

/// Nouns whose singular and plural forms are identical.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "equipment",
    "information",
    "metadata",
    "money",
    "news",
    "rice",
    "series",
    "sheep",
    "species",
];

/// Plural → singular pairs that no suffix rule handles.
const IRREGULAR: &[(&str, &str)] = &[
    ("buses", "bus"),
    ("campuses", "campus"),
    ("children", "child"),
    ("feet", "foot"),
    ("geese", "goose"),
    ("men", "man"),
    ("mice", "mouse"),
    ("people", "person"),
    ("statuses", "status"),
    ("teeth", "tooth"),
    ("women", "woman"),
];

/// Plural endings where the whole `es` is dropped.
const ES_SUFFIXES: &[&str] = &["sses", "shes", "ches", "xes", "zzes"];

/// Default English singularization rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct English;

impl Singularize for English {
    fn singularize(&self, word: &str) -> String {
        if word.is_empty() {
            return String::new();
        }

        let lower = word.to_ascii_lowercase();
        if UNCOUNTABLE.contains(&lower.as_str()) {
            return word.to_string();
        }
        if let Some(singular) = irregular(&lower) {
            return match_case(word, singular);
        }

        let stem = strip_plural_suffix(word, &lower);

        // Dropping an `s` can expose an irregular plural ("mens" -> "men").
        match irregular(&stem.to_ascii_lowercase()) {
            Some(singular) => match_case(word, singular),
            None => stem,
        }
    }
}

/// Singularize `word` with the default [`English`] rules.
pub fn singularize(word: &str) -> String {
    English.singularize(word)
}

fn irregular(lower: &str) -> Option<&'static str> {
    IRREGULAR
        .iter()
        .find(|(plural, _)| *plural == lower)
        .map(|(_, singular)| *singular)
}

/// Apply the regular suffix rules. `lower` is the ASCII-lowercased `word`,
/// so byte offsets are shared between the two.
fn strip_plural_suffix(word: &str, lower: &str) -> String {
    if lower.ends_with("ss") || lower.ends_with("us") || lower.ends_with("is") {
        return word.to_string();
    }

    if lower.len() > 4 && lower.ends_with("ies") {
        let cut = word.len() - 3;
        let y = if word[cut..].starts_with('I') { 'Y' } else { 'y' };
        return format!("{}{y}", &word[..cut]);
    }

    if ES_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)) {
        return word[..word.len() - 2].to_string();
    }

    if lower.len() > 1 && lower.ends_with('s') {
        return word[..word.len() - 1].to_string();
    }

    word.to_string()
}

/// Carry the capitalization of `original` over to `singular`: all-caps words
/// stay all-caps, otherwise only the first letter is matched.
fn match_case(original: &str, singular: &str) -> String {
    let letters: Vec<char> = original.chars().filter(|c| c.is_alphabetic()).collect();
    let shouting = letters.len() > 1 && letters.iter().all(|c| c.is_uppercase());
    if shouting {
        return singular.to_uppercase();
    }

    let capitalized = original.chars().next().is_some_and(|c| c.is_uppercase());
    if !capitalized {
        return singular.to_string();
    }
    let mut chars = singular.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn regular_plurals() {
        assert_eq!(singularize("tables"), "table");
        assert_eq!(singularize("users"), "user");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("classes"), "class");
        assert_eq!(singularize("branches"), "branch");
        assert_eq!(singularize("dishes"), "dish");
    }

    #[test]
    fn singular_words_are_unchanged() {
        for word in ["name", "default", "test", "test2", "class", "status", "axis", "box"] {
            assert_eq!(singularize(word), word);
        }
    }

    #[test]
    fn irregular_plurals() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("mice"), "mouse");
        assert_eq!(singularize("statuses"), "status");
    }

    #[test]
    fn uncountable_nouns() {
        assert_eq!(singularize("data"), "data");
        assert_eq!(singularize("series"), "series");
        assert_eq!(singularize("news"), "news");
    }

    #[test]
    fn capitalization_is_preserved() {
        assert_eq!(singularize("Tables"), "Table");
        assert_eq!(singularize("People"), "Person");
        assert_eq!(singularize("CATEGORIES"), "CATEGORY");
    }

    #[test]
    fn all_caps_irregulars_stay_all_caps() {
        assert_eq!(singularize("MEN"), "MAN");
        assert_eq!(singularize("PEOPLE"), "PERSON");
        assert_eq!(singularize("MENS"), "MAN");
        assert_eq!(singularize("Men"), "Man");
    }

    #[test]
    fn short_words() {
        assert_eq!(singularize(""), "");
        assert_eq!(singularize("s"), "s");
        assert_eq!(singularize("pies"), "pie");
    }

    #[test]
    fn exposed_irregular_after_suffix() {
        assert_eq!(singularize("mens"), "man");
        assert_eq!(singularize("mans"), "man");
    }

    proptest! {
        #[test]
        fn singularize_is_idempotent(word in "[a-zA-Z]{0,12}") {
            let once = singularize(&word);
            prop_assert_eq!(singularize(&once), once);
        }
    }
}
