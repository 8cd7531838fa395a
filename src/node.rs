// Compiled type graph. Nodes live in the registry's arena and point at each
// other by `NodeId`, which is what lets references form cycles.

use crate::ident::property_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Inline,                  // only ever embedded in a parent expression
    Block,                   // owns a standalone declaration
}

/// How augmentation members are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    Intersection,            // allOf
    Union,                   // anyOf / oneOf
}

impl Combinator {
    pub fn for_keyword(keyword: &str) -> Self {
        if keyword == "allOf" { Combinator::Intersection } else { Combinator::Union }
    }

    pub fn operator(self) -> &'static str {
        match self {
            Combinator::Intersection => " & ",
            Combinator::Union => " | ",
        }
    }
}

/// One composite keyword's members.
#[derive(Debug, Clone)]
pub struct Augmentation {
    pub combinator: Combinator,
    pub members: Vec<NodeId>,
}

#[derive(Debug, Clone)]
pub struct Field {
    pub name: String,
    pub ty: NodeId,
    pub required: bool,
}

#[derive(Debug, Clone)]
pub enum Kind {
    Number,
    Str,
    Bool,
    Null,
    Array { items: NodeId },
    TypeList { alternatives: Vec<NodeId> },
    Object { fields: Vec<Field> },   // document order
    Composite,                       // bare allOf/anyOf/oneOf, members live in `augmentations`
    Reference { target: NodeId, reference: String },
}

impl Kind {
    /// Literal for the primitive variants. `Null` is empty: it contributes nothing to a union.
    pub fn literal(&self) -> Option<&'static str> {
        match self {
            Kind::Number => Some("number"),
            Kind::Str => Some("string"),
            Kind::Bool => Some("boolean"),
            Kind::Null => Some(""),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeNode {
    pub display_name: String,        // empty when anonymous
    pub render_mode: RenderMode,
    pub kind: Kind,
    pub augmentations: Vec<Augmentation>,
    pub inline: Option<String>,      // valid once `converted`
    pub block: Option<String>,       // Block nodes only
    pub converted: bool,
}

impl TypeNode {
    pub fn new(display_name: String, kind: Kind) -> Self {
        Self {
            display_name,
            render_mode: RenderMode::Inline,
            kind,
            augmentations: Vec::new(),
            inline: None,
            block: None,
            converted: false,
        }
    }

    pub fn is_block(&self) -> bool {
        self.render_mode == RenderMode::Block
    }

    /// Inline text as used inside another type; `Null` reads as `null` here.
    pub fn inline_or_null(&self) -> &str {
        match self.inline.as_deref() {
            Some("") | None => "null",
            Some(text) => text,
        }
    }
}

/// Join non-empty member texts with the combinator's operator.
pub fn combine<'a>(combinator: Combinator, parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(combinator.operator())
}

/// `T[]`, parenthesizing `T` when it has whitespace outside any bracket pair.
pub fn array_of(item: &str) -> String {
    if spaced_at_top_level(item) {
        format!("({item})[]")
    } else {
        format!("{item}[]")
    }
}

fn spaced_at_top_level(text: &str) -> bool {
    let mut depth = 0usize;
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        match c {
            // quoted property keys may hold brackets
            '"' => {
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => {
                            chars.next();
                        }
                        '"' => break,
                        _ => {}
                    }
                }
            }
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => depth = depth.saturating_sub(1),
            c if c.is_whitespace() && depth == 0 => return true,
            _ => {}
        }
    }
    false
}

/// Structural object body: `{\n  name?: Type;\n}`.
pub fn object_body<'a>(fields: impl IntoIterator<Item = (&'a str, &'a str, bool)>) -> String {
    let mut out = String::from("{\n");
    for (name, ty, required) in fields {
        let marker = if required { "" } else { "?" };
        out.push_str(&format!("  {}{marker}: {ty};\n", property_key(name)));
    }
    out.push('}');
    out
}
