//! Identifier derivation for declaration names and property keys.
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static NOT_WORD_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w ]").unwrap());
static SPACE_THEN_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r" (\w)").unwrap());
static LEADING_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\w").unwrap());
static PLAIN_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap());

/// Turn a free-text title into a type identifier.
///
/// - drops anything that is not a letter, digit, space or underscore
/// - underscores become word breaks
/// - every break followed by a word character is removed and the character uppercased
/// - the first character is uppercased
///
/// An all-punctuation title comes back empty; callers treat that as anonymous.
pub fn tsify_string(title: &str) -> String {
    let kept = NOT_WORD_OR_SPACE.replace_all(title, "");
    let spaced = kept.replace('_', " ");
    let joined = SPACE_THEN_WORD.replace_all(&spaced, |caps: &Captures| caps[1].to_uppercase());
    LEADING_WORD
        .replace(&joined, |caps: &Captures| caps[0].to_uppercase())
        .into_owned()
}

/// Render a property name as an object-type key, quoting it when it is not a bare identifier.
pub fn property_key(name: &str) -> String {
    if PLAIN_KEY.is_match(name) {
        name.to_string()
    } else {
        serde_json::to_string(name).unwrap_or_else(|_| format!("\"{name}\""))
    }
}
