use serde_json::Value;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can abort a compile run. No variant is recoverable: the
/// registry bails on the first one and emits nothing.
#[derive(Debug, Error)]
pub enum Error {
    /// The fragment matched none of the classification rules.
    #[error("unsupported schema fragment: {fragment}")]
    SchemaUnsupported { fragment: String },

    /// A root or referenced schema that must be named has no title and nothing to inherit one from.
    #[error("schema needs a title to be declared: {fragment}")]
    SchemaMissingIdentifier { fragment: String },

    #[error("could not load `{reference}`: {reason}")]
    SourceUnavailable { reference: String, reason: String },

    /// A `#/...` fragment that does not resolve inside its document.
    #[error("JSON pointer in `{reference}` does not resolve")]
    InvalidPointer { reference: String },

    /// A reference cycle running only through inline-only nodes has no finite rendering.
    #[error("{name} refers back to itself through anonymous types")]
    UnnamedCycle { name: String },
}

impl Error {
    pub fn unsupported(fragment: &Value) -> Self {
        Self::SchemaUnsupported { fragment: compact(fragment) }
    }

    pub fn missing_identifier(fragment: &Value) -> Self {
        Self::SchemaMissingIdentifier { fragment: compact(fragment) }
    }

    pub fn source_unavailable(reference: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            reference: reference.into(),
            reason: reason.to_string(),
        }
    }
}

// Long fragments are cut so a whole document doesn't end up in one log line.
const MAX_FRAGMENT_CHARS: usize = 240;

fn compact(fragment: &Value) -> String {
    let src = serde_json::to_string(fragment).unwrap_or_else(|_| String::from("<unprintable>"));
    if src.chars().count() <= MAX_FRAGMENT_CHARS {
        return src;
    }
    let mut cut: String = src.chars().take(MAX_FRAGMENT_CHARS).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unsupported_carries_the_fragment() {
        let err = Error::unsupported(&json!({"format": "date"}));
        assert_eq!(err.to_string(), r#"unsupported schema fragment: {"format":"date"}"#);
    }

    #[test]
    fn long_fragments_are_truncated_on_char_boundaries() {
        let big = json!({ "description": "é".repeat(1000) });
        let Error::SchemaUnsupported { fragment } = Error::unsupported(&big) else {
            panic!("wrong variant");
        };
        assert_eq!(fragment.chars().count(), MAX_FRAGMENT_CHARS + 1);
        assert!(fragment.ends_with('…'));
    }
}
