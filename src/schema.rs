//! Read-only view over a schema document.
//!
//! Documents stay plain `serde_json::Value`s (the `preserve_order` feature keeps
//! `properties` in document order); this module only knows which keywords the
//! compiler looks at.
use std::collections::BTreeSet;
use serde_json::{Map, Value};

/// A parsed schema document as handed over by a loader.
pub type SchemaDocument = Value;

/// The `type` keyword, which JSON Schema allows to be a single name or a list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKeyword<'a> {
    Single(&'a str),
    List(Vec<&'a str>),
}

/// Composite keywords in the order their augmentation groups are recorded.
pub const COMPOSITE_KEYWORDS: [&str; 3] = ["allOf", "anyOf", "oneOf"];

#[derive(Debug, Clone, Copy)]
pub struct Schema<'a>(pub &'a Value);

impl<'a> Schema<'a> {
    pub fn new(value: &'a Value) -> Self { Self(value) }

    pub fn value(&self) -> &'a Value { self.0 }

    fn str_field(&self, key: &str) -> Option<&'a str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Own `title`, if present and non-empty.
    pub fn title(&self) -> Option<&'a str> {
        self.str_field("title").filter(|t| !t.is_empty())
    }

    /// `id`, falling back to the newer `$id` spelling.
    pub fn id(&self) -> Option<&'a str> {
        self.str_field("id")
            .or_else(|| self.str_field("$id"))
            .filter(|id| !id.is_empty())
    }

    pub fn reference(&self) -> Option<&'a str> {
        self.str_field("$ref")
    }

    pub fn type_keyword(&self) -> Option<TypeKeyword<'a>> {
        match self.0.get("type")? {
            Value::String(s) => Some(TypeKeyword::Single(s)),
            Value::Array(xs) => Some(TypeKeyword::List(
                xs.iter().filter_map(Value::as_str).collect(),
            )),
            _ => None,
        }
    }

    pub fn has_type(&self, name: &str) -> bool {
        matches!(self.type_keyword(), Some(TypeKeyword::Single(t)) if t == name)
    }

    pub fn items(&self) -> Option<&'a Value> {
        self.0.get("items")
    }

    /// `properties` in document order. A non-object `properties` reads as empty.
    pub fn properties(&self) -> Option<PropertyIter<'a>> {
        let props = self.0.get("properties")?;
        Some(PropertyIter(props.as_object().map(Map::iter)))
    }

    pub fn required(&self) -> BTreeSet<&'a str> {
        self.0
            .get("required")
            .and_then(Value::as_array)
            .map(|xs| xs.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Members of one composite keyword, if the schema carries it as an array.
    pub fn composite(&self, keyword: &str) -> Option<&'a [Value]> {
        self.0.get(keyword).and_then(Value::as_array).map(Vec::as_slice)
    }

    pub fn has_composite(&self) -> bool {
        COMPOSITE_KEYWORDS.iter().any(|k| self.composite(k).is_some())
    }
}

pub struct PropertyIter<'a>(Option<serde_json::map::Iter<'a>>);

impl<'a> Iterator for PropertyIter<'a> {
    type Item = (&'a String, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next()
    }
}

/// Split a `$ref` into its location and its JSON-pointer fragment (without the `#`).
pub fn split_reference(reference: &str) -> (&str, Option<&str>) {
    match reference.split_once('#') {
        Some((location, fragment)) => (location, Some(fragment)),
        None => (reference, None),
    }
}

/// Last non-empty segment of a JSON pointer, unescaped (`~1` → `/`, `~0` → `~`).
pub fn pointer_leaf(pointer: &str) -> Option<String> {
    pointer
        .rsplit('/')
        .find(|s| !s.is_empty())
        .map(|s| s.replace("~1", "/").replace("~0", "~"))
}
