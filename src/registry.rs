//! Schema → declaration compiler.
//!
//! One `Registry` per compile run. It goes through three stages:
//!
//! 1. construction: classify every queued root into a graph of [`TypeNode`]s,
//!    registering identified schemas as soon as their node exists so that
//!    references (including cyclic ones) find them mid-construction;
//! 2. conversion: fill in inline/block text depth-first, memoized on the
//!    node's `converted` flag, which is also what stops cycles;
//! 3. render: concatenate the block declarations in emission order.
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use indexmap::{IndexMap, IndexSet};
use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::ident::tsify_string;
use crate::loader::SchemaLoader;
use crate::node::{
    array_of, combine, object_body, Augmentation, Combinator, Field, Kind, NodeId, RenderMode,
    TypeNode,
};
use crate::schema::{
    pointer_leaf, split_reference, Schema, SchemaDocument, TypeKeyword, COMPOSITE_KEYWORDS,
};

// ————————————————————————————————————————————————————————————————————————————
// TYPES
// ————————————————————————————————————————————————————————————————————————————

pub struct Registry<'l> {
    loader: &'l dyn SchemaLoader,
    root_dir: Option<PathBuf>,
    pending: VecDeque<Rc<SchemaDocument>>,
    nodes: Vec<TypeNode>,
    resolved_by_id: HashMap<String, NodeId>,
    resolved_by_ref: HashMap<String, NodeId>,
    /// Queued roots carrying an `id`, buildable on demand from a `$ref` in another root.
    pending_by_id: HashMap<String, Scope>,
    /// First Block node seen per declared name, in traversal order.
    emission_order: IndexMap<String, NodeId>,
    roots_seen: usize,
}

/// The document a fragment was found in; local `#/...` references resolve against it.
#[derive(Clone)]
struct Scope {
    document: Rc<SchemaDocument>,
    location: String,
}

// ————————————————————————————————————————————————————————————————————————————
// FRONT API
// ————————————————————————————————————————————————————————————————————————————

impl<'l> Registry<'l> {
    pub fn new(loader: &'l dyn SchemaLoader) -> Self {
        Self {
            loader,
            root_dir: None,
            pending: VecDeque::new(),
            nodes: Vec::new(),
            resolved_by_id: HashMap::new(),
            resolved_by_ref: HashMap::new(),
            pending_by_id: HashMap::new(),
            emission_order: IndexMap::new(),
            roots_seen: 0,
        }
    }

    /// Prefix every `$ref` location with `root_dir` before it reaches the loader.
    pub fn with_root_dir(mut self, root_dir: impl Into<PathBuf>) -> Self {
        self.root_dir = Some(root_dir.into());
        self
    }

    pub fn add_schema(&mut self, document: SchemaDocument) {
        self.pending.push_back(Rc::new(document));
    }

    /// Queue a root under an explicit name, which replaces its `title`.
    pub fn add_named_schema(&mut self, mut document: SchemaDocument, name: &str) {
        if let Value::Object(map) = &mut document {
            map.insert("title".into(), Value::from(name));
        }
        self.add_schema(document);
    }

    /// Run all three stages over everything queued so far.
    pub fn parse(mut self) -> Result<String> {
        let roots = self.construct_pending()?;
        for root in roots {
            self.convert(root)?;
        }
        Ok(self.render())
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONSTRUCTION
// ————————————————————————————————————————————————————————————————————————————

impl<'l> Registry<'l> {
    fn construct_pending(&mut self) -> Result<Vec<NodeId>> {
        let mut scopes = Vec::with_capacity(self.pending.len());
        while let Some(document) = self.pending.pop_front() {
            self.roots_seen += 1;
            scopes.push(Scope {
                document,
                location: format!("<root {}>", self.roots_seen),
            });
        }
        for scope in &scopes {
            if let Some(id) = Schema::new(&scope.document).id() {
                self.pending_by_id.entry(id.to_string()).or_insert_with(|| scope.clone());
            }
        }

        let mut roots = Vec::with_capacity(scopes.len());
        for scope in scopes {
            // already built if an earlier root referenced its id
            let root = self.parse_schema(&scope.document, None, &scope)?;
            let node = &self.nodes[root.0];
            if node.display_name.is_empty() && !matches!(node.kind, Kind::Reference { .. }) {
                return Err(Error::missing_identifier(&scope.document));
            }
            roots.push(root);
        }
        self.pending_by_id.clear();
        Ok(roots)
    }

    fn parse_schema(&mut self, value: &Value, inherited: Option<&str>, scope: &Scope) -> Result<NodeId> {
        self.parse_node(value, inherited, scope, None)
    }

    /// Classify one fragment. `alias` is a reference key to register for the new
    /// node before its children are built.
    fn parse_node(
        &mut self,
        value: &Value,
        inherited: Option<&str>,
        scope: &Scope,
        alias: Option<String>,
    ) -> Result<NodeId> {
        let schema = Schema::new(value);
        if let Some(cached) = schema.id().and_then(|id| self.resolved_by_id.get(id)) {
            trace!(id = ?schema.id(), "schema already resolved");
            return Ok(*cached);
        }

        let display_name = schema
            .title()
            .or(inherited)
            .map(tsify_string)
            .unwrap_or_default();
        let id = self.reserve(display_name);
        if let Some(schema_id) = schema.id() {
            self.resolved_by_id.insert(schema_id.to_string(), id);
        }
        if let Some(alias) = alias {
            self.resolved_by_ref.insert(alias, id);
        }

        let kind = match schema.reference() {
            Some(reference) => {
                let target = self.resolve_reference(reference, inherited, scope)?;
                Kind::Reference { target, reference: reference.to_string() }
            }
            None => self.classify(schema, inherited, scope)?,
        };
        let augmentations = self.parse_augmentations(schema, scope)?;

        let node = &mut self.nodes[id.0];
        let named = !node.display_name.is_empty();
        let titled = named && schema.title().is_some();
        node.render_mode = match kind {
            Kind::Reference { .. } if titled && !augmentations.is_empty() => RenderMode::Block,
            Kind::Reference { .. } => RenderMode::Inline,
            Kind::Object { .. } if named => RenderMode::Block,
            _ if titled => RenderMode::Block,
            _ => RenderMode::Inline,
        };
        node.kind = kind;
        node.augmentations = augmentations;
        debug!(node = id.0, name = %node.display_name, mode = ?node.render_mode, "classified schema");
        Ok(id)
    }

    fn reserve(&mut self, display_name: String) -> NodeId {
        let id = NodeId(self.nodes.len());
        // placeholder kind until classification finishes
        self.nodes.push(TypeNode::new(display_name, Kind::Null));
        id
    }

    fn classify(&mut self, schema: Schema<'_>, inherited: Option<&str>, scope: &Scope) -> Result<Kind> {
        let single = match schema.type_keyword() {
            Some(TypeKeyword::List(entries)) => {
                let mut alternatives = Vec::with_capacity(entries.len());
                for entry in entries {
                    let bare = json!({ "type": entry });
                    alternatives.push(self.parse_schema(&bare, None, scope)?);
                }
                return Ok(Kind::TypeList { alternatives });
            }
            Some(TypeKeyword::Single(ty)) => Some(ty),
            None => None,
        };

        match single {
            Some("string") => return Ok(Kind::Str),
            Some("number" | "integer") => return Ok(Kind::Number),
            Some("boolean") => return Ok(Kind::Bool),
            Some("null") => return Ok(Kind::Null),
            _ => {}
        }

        if schema.has_type("array") || schema.items().is_some() {
            let items = schema.items().ok_or_else(|| Error::unsupported(schema.value()))?;
            let items = self.parse_schema(items, inherited, scope)?;
            return Ok(Kind::Array { items });
        }

        if schema.has_type("object") || schema.properties().is_some() {
            let required = schema.required();
            let mut fields = Vec::new();
            for (name, property) in schema.properties().into_iter().flatten() {
                let ty = self.parse_schema(property, Some(name), scope)?;
                fields.push(Field {
                    name: name.clone(),
                    ty,
                    required: required.contains(name.as_str()),
                });
            }
            return Ok(Kind::Object { fields });
        }

        if schema.has_composite() {
            return Ok(Kind::Composite);
        }

        Err(Error::unsupported(schema.value()))
    }

    fn parse_augmentations(&mut self, schema: Schema<'_>, scope: &Scope) -> Result<Vec<Augmentation>> {
        let mut out = Vec::new();
        for keyword in COMPOSITE_KEYWORDS {
            let Some(members) = schema.composite(keyword) else { continue };
            let members = members
                .iter()
                .map(|member| self.parse_schema(member, None, scope))
                .collect::<Result<Vec<_>>>()?;
            out.push(Augmentation {
                combinator: Combinator::for_keyword(keyword),
                members,
            });
        }
        Ok(out)
    }

    /// Find or build the node a `$ref` points at. Never converts anything.
    fn resolve_reference(&mut self, reference: &str, inherited: Option<&str>, scope: &Scope) -> Result<NodeId> {
        let (location, fragment) = split_reference(reference);
        let fragment = fragment.filter(|pointer| !pointer.is_empty());
        if fragment.is_none() {
            if let Some(node) = self.resolved_by_id.get(location) {
                return Ok(*node);
            }
            if let Some(root) = self.pending_by_id.get(location).cloned() {
                debug!(reference, "building queued root ahead of its turn");
                return self.parse_schema(&root.document, inherited, &root);
            }
        }

        let located = if location.is_empty() {
            scope.location.clone()
        } else {
            self.locate(location)
        };
        let key = match fragment {
            Some(pointer) => format!("{located}#{pointer}"),
            None => located.clone(),
        };
        if let Some(node) = self.resolved_by_ref.get(&key) {
            return Ok(*node);
        }

        let target_scope = if location.is_empty() {
            scope.clone()
        } else {
            debug!(reference, path = %located, "loading referenced schema");
            Scope {
                document: Rc::new(self.loader.load(&located)?),
                location: located,
            }
        };
        let target_value = target_scope
            .document
            .pointer(fragment.unwrap_or(""))
            .ok_or_else(|| Error::InvalidPointer { reference: reference.to_string() })?;

        let name = fragment.and_then(pointer_leaf).or_else(|| inherited.map(str::to_string));
        let target = self.parse_node(target_value, name.as_deref(), &target_scope, Some(key.clone()))?;
        // a cached id hit skips the alias registration inside `parse_node`
        self.resolved_by_ref.entry(key).or_insert(target);

        let node = &self.nodes[target.0];
        if node.display_name.is_empty() && !matches!(node.kind, Kind::Reference { .. }) {
            return Err(Error::missing_identifier(target_value));
        }
        Ok(target)
    }

    fn locate(&self, location: &str) -> String {
        match &self.root_dir {
            Some(root) => root.join(Path::new(location)).to_string_lossy().into_owned(),
            None => location.to_string(),
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CONVERSION
// ————————————————————————————————————————————————————————————————————————————

impl<'l> Registry<'l> {
    fn convert(&mut self, id: NodeId) -> Result<()> {
        let node = &mut self.nodes[id.0];
        if node.converted {
            return Ok(());
        }
        node.converted = true;
        trace!(node = id.0, name = %node.display_name, "converting");

        // Block nodes are referenced by name, which is known before their
        // structure is; publishing it first is what lets cycles close.
        if node.is_block() {
            node.inline = Some(node.display_name.clone());
            if !self.emission_order.contains_key(&node.display_name) {
                debug!(name = %node.display_name, "emitting declaration");
                self.emission_order.insert(node.display_name.clone(), id);
            }
        }

        let kind = node.kind.clone();
        let augmentations = node.augmentations.clone();
        let augmentation = self.convert_augmentations(&augmentations)?;
        let structure = self.convert_kind(&kind)?;

        let node = &mut self.nodes[id.0];
        if node.is_block() {
            let block = render_block(node, &structure, augmentation.as_deref());
            node.block = Some(block);
        } else {
            let inline = match (&node.kind, augmentation) {
                (Kind::Composite, augmentation) => augmentation.unwrap_or_default(),
                (_, None) => structure,
                (_, Some(augmentation)) if structure.is_empty() => augmentation,
                (_, Some(augmentation)) => format!("{structure} & ({augmentation})"),
            };
            node.inline = Some(inline);
        }
        Ok(())
    }

    fn convert_kind(&mut self, kind: &Kind) -> Result<String> {
        Ok(match kind {
            Kind::Number | Kind::Str | Kind::Bool | Kind::Null => {
                kind.literal().unwrap_or_default().to_string()
            }
            Kind::Array { items } => {
                self.convert(*items)?;
                array_of(self.embedded(*items)?)
            }
            Kind::TypeList { alternatives } => {
                for alternative in alternatives {
                    self.convert(*alternative)?;
                }
                let mut literals = IndexSet::new();
                for alternative in alternatives {
                    literals.insert(self.inline_of(*alternative)?);
                }
                combine(Combinator::Union, literals)
            }
            Kind::Object { fields } => {
                for field in fields {
                    self.convert(field.ty)?;
                }
                let mut rows = Vec::with_capacity(fields.len());
                for field in fields {
                    rows.push((field.name.as_str(), self.embedded(field.ty)?, field.required));
                }
                object_body(rows)
            }
            Kind::Reference { target, .. } => {
                self.convert(*target)?;
                self.inline_of(*target)?.to_string()
            }
            Kind::Composite => String::new(),
        })
    }

    /// Combine each augmentation group; several groups are intersected.
    fn convert_augmentations(&mut self, augmentations: &[Augmentation]) -> Result<Option<String>> {
        let mut groups = Vec::new();
        for augmentation in augmentations {
            for member in &augmentation.members {
                self.convert(*member)?;
            }
            let parts = augmentation
                .members
                .iter()
                .map(|member| self.inline_of(*member))
                .collect::<Result<Vec<_>>>()?;
            let text = combine(augmentation.combinator, parts);
            if !text.is_empty() {
                groups.push(text);
            }
        }
        Ok(match groups.len() {
            0 => None,
            1 => groups.pop(),
            _ => Some(
                groups
                    .iter()
                    .map(|g| format!("({g})"))
                    .collect::<Vec<_>>()
                    .join(" & "),
            ),
        })
    }

    /// Inline text of a converted node. Missing text means we came back around
    /// to a node that is still being converted and has no name to stand in for it.
    fn inline_of(&self, id: NodeId) -> Result<&str> {
        let node = &self.nodes[id.0];
        node.inline.as_deref().ok_or_else(|| Error::UnnamedCycle {
            name: if node.display_name.is_empty() {
                String::from("anonymous schema")
            } else {
                node.display_name.clone()
            },
        })
    }

    /// Inline text for use outside a union, where `null` must be spelled out.
    fn embedded(&self, id: NodeId) -> Result<&str> {
        self.inline_of(id)?;
        Ok(self.nodes[id.0].inline_or_null())
    }
}

fn render_block(node: &TypeNode, structure: &str, augmentation: Option<&str>) -> String {
    let name = &node.display_name;
    match (&node.kind, augmentation) {
        (Kind::Object { .. }, None) => format!("interface {name} {structure}"),
        (Kind::Object { .. }, Some(augmentation)) => {
            format!("interface _{name} {structure}\ntype {name} = _{name} & ({augmentation});")
        }
        (Kind::Composite, augmentation) => {
            format!("type {name} = {};", augmentation.unwrap_or("null"))
        }
        (_, augmentation) => {
            let base = if structure.is_empty() { "null" } else { structure };
            match augmentation {
                Some(augmentation) => format!("type {name} = {base} & ({augmentation});"),
                None => format!("type {name} = {base};"),
            }
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// RENDER
// ————————————————————————————————————————————————————————————————————————————

impl<'l> Registry<'l> {
    fn render(&self) -> String {
        self.emission_order
            .values()
            .filter_map(|id| self.nodes[id.0].block.as_deref())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

// ————————————————————————————————————————————————————————————————————————————
// TESTS
// ————————————————————————————————————————————————————————————————————————————

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{MemoryLoader, NoLoader};

    fn compile_one(schema: Value) -> Result<String> {
        let mut registry = Registry::new(&NoLoader);
        registry.add_schema(schema);
        registry.parse()
    }

    /// Inline text of a root fragment, the way a parent would embed it.
    fn inline(schema: Value) -> String {
        let mut registry = Registry::new(&NoLoader);
        registry.add_schema(schema);
        let scope = Scope {
            document: registry.pending.pop_front().unwrap(),
            location: "<test>".into(),
        };
        let id = registry.parse_schema(&scope.document, None, &scope).unwrap();
        registry.convert(id).unwrap();
        registry.nodes[id.0].inline.clone().unwrap()
    }

    #[test]
    fn required_and_optional_fields() {
        let required = json!({
            "title": "Foo", "type": "object",
            "properties": { "bar": { "type": "integer" } },
            "required": ["bar"]
        });
        assert_eq!(compile_one(required).unwrap(), "interface Foo {\n  bar: number;\n}");

        let optional = json!({
            "title": "Foo", "type": "object",
            "properties": { "bar": { "type": "integer" } }
        });
        assert_eq!(compile_one(optional).unwrap(), "interface Foo {\n  bar?: number;\n}");
    }

    #[test]
    fn classification_precedence() {
        assert_eq!(inline(json!({"type": "string", "items": {"type": "number"}})), "string");
        assert_eq!(inline(json!({"items": {"type": "boolean"}})), "boolean[]");
        assert_eq!(inline(json!({"properties": {}})), "{\n}");
        assert_eq!(inline(json!({"type": "integer"})), "number");
        assert_eq!(inline(json!({"type": "null"})), "");
    }

    #[test]
    fn array_of_union_is_parenthesized() {
        let schema = json!({"type": "array", "items": {"type": ["string", "number"]}});
        assert_eq!(inline(schema), "(string | number)[]");
    }

    #[test]
    fn type_list_drops_null_and_repeats() {
        assert_eq!(inline(json!({"type": ["integer", "number", "null"]})), "number");
        assert_eq!(inline(json!({"type": ["string", "boolean"]})), "string | boolean");
    }

    #[test]
    fn nested_objects_become_named_interfaces() {
        let schema = json!({
            "title": "User",
            "properties": {
                "home_address": {
                    "type": "object",
                    "properties": { "city": { "type": "string" } },
                    "required": ["city"]
                },
                "tags": { "type": "array", "items": { "type": "string" } }
            },
            "required": ["home_address"]
        });
        assert_eq!(
            compile_one(schema).unwrap(),
            "interface User {\n  home_address: HomeAddress;\n  tags?: string[];\n}\n\n\
             interface HomeAddress {\n  city: string;\n}"
        );
    }

    #[test]
    fn array_items_inherit_the_property_name() {
        let schema = json!({
            "title": "Order",
            "properties": {
                "line_items": {
                    "type": "array",
                    "items": { "properties": { "sku": { "type": "string" } } }
                }
            }
        });
        assert_eq!(
            compile_one(schema).unwrap(),
            "interface Order {\n  line_items?: LineItems[];\n}\n\n\
             interface LineItems {\n  sku?: string;\n}"
        );
    }

    #[test]
    fn titled_primitive_is_an_alias() {
        let schema = json!({
            "title": "Wrapper",
            "properties": { "code": { "title": "Status Code", "type": "integer" } }
        });
        assert_eq!(
            compile_one(schema).unwrap(),
            "interface Wrapper {\n  code?: StatusCode;\n}\n\ntype StatusCode = number;"
        );
    }

    #[test]
    fn null_members_vanish_from_unions() {
        let schema = json!({
            "title": "Maybe Name",
            "anyOf": [{ "type": "string" }, { "type": "null" }]
        });
        assert_eq!(compile_one(schema).unwrap(), "type MaybeName = string;");
    }

    #[test]
    fn object_with_all_of_splits_into_interface_and_alias() {
        let schema = json!({
            "title": "Name",
            "type": "object",
            "properties": { "first": { "type": "string" } },
            "required": ["first"],
            "allOf": [{ "title": "Other", "type": "object", "properties": {} }]
        });
        assert_eq!(
            compile_one(schema).unwrap(),
            "interface _Name {\n  first: string;\n}\ntype Name = _Name & (Other);\n\n\
             interface Other {\n}"
        );
    }

    #[test]
    fn several_composite_keywords_intersect() {
        let schema = json!({
            "title": "Mixed",
            "allOf": [{ "title": "A", "type": "string" }, { "title": "B", "type": "string" }],
            "oneOf": [{ "type": "number" }, { "type": "boolean" }]
        });
        let out = compile_one(schema).unwrap();
        assert!(out.starts_with("type Mixed = (A & B) & (number | boolean);"), "{out}");
    }

    #[test]
    fn unsupported_fragment_is_fatal() {
        assert!(matches!(compile_one(json!({})), Err(Error::SchemaUnsupported { .. })));
        let nested = json!({"title": "T", "properties": {"x": {"format": "date"}}});
        assert!(matches!(compile_one(nested), Err(Error::SchemaUnsupported { ref fragment }) if fragment.contains("date")));
        let itemless = json!({"title": "T", "type": "array"});
        assert!(matches!(compile_one(itemless), Err(Error::SchemaUnsupported { .. })));
    }

    #[test]
    fn untitled_root_needs_a_name() {
        let err = compile_one(json!({"type": "object", "properties": {}})).unwrap_err();
        assert!(matches!(err, Error::SchemaMissingIdentifier { .. }));

        let mut registry = Registry::new(&NoLoader);
        registry.add_named_schema(json!({"type": "object", "properties": {}}), "given name");
        assert_eq!(registry.parse().unwrap(), "interface GivenName {\n}");
    }

    #[test]
    fn duplicate_titles_keep_the_first_declaration() {
        let mut registry = Registry::new(&NoLoader);
        registry.add_schema(json!({"title": "Foo", "properties": {"a": {"type": "string"}}}));
        registry.add_schema(json!({"title": "Foo", "properties": {"b": {"type": "number"}}}));
        assert_eq!(registry.parse().unwrap(), "interface Foo {\n  a?: string;\n}");
    }

    #[test]
    fn circular_references_by_id() {
        let loader = MemoryLoader::new()
            .with("a.json", json!({
                "id": "A", "title": "A",
                "properties": { "b": { "$ref": "b.json" } }
            }))
            .with("b.json", json!({
                "id": "B", "title": "B",
                "properties": { "a": { "$ref": "A" } }
            }));
        let mut registry = Registry::new(&loader);
        registry.add_schema(loader.load("a.json").unwrap());
        assert_eq!(
            registry.parse().unwrap(),
            "interface A {\n  b?: B;\n}\n\ninterface B {\n  a?: A;\n}"
        );
    }

    #[test]
    fn id_less_self_reference_terminates() {
        let loader = MemoryLoader::new().with("node.json", json!({
            "title": "Tree Node",
            "properties": { "children": { "type": "array", "items": { "$ref": "node.json" } } }
        }));
        let mut registry = Registry::new(&loader);
        registry.add_schema(json!({ "$ref": "node.json" }));
        assert_eq!(
            registry.parse().unwrap(),
            "interface TreeNode {\n  children?: TreeNode[];\n}"
        );
    }

    #[test]
    fn local_pointer_references_take_the_definition_name() {
        let schema = json!({
            "title": "Customer",
            "properties": {
                "billing": { "$ref": "#/definitions/address" },
                "shipping": { "$ref": "#/definitions/address" }
            },
            "definitions": {
                "address": { "type": "object", "properties": { "zip": { "type": "string" } } }
            }
        });
        assert_eq!(
            compile_one(schema).unwrap(),
            "interface Customer {\n  billing?: Address;\n  shipping?: Address;\n}\n\n\
             interface Address {\n  zip?: string;\n}"
        );
    }

    #[test]
    fn broken_references() {
        let missing = json!({"title": "T", "properties": {"x": {"$ref": "gone.json"}}});
        assert!(matches!(compile_one(missing), Err(Error::SourceUnavailable { .. })));

        let bad_pointer = json!({"title": "T", "properties": {"x": {"$ref": "#/definitions/nope"}}});
        assert!(matches!(compile_one(bad_pointer), Err(Error::InvalidPointer { .. })));
    }

    #[test]
    fn referenced_schema_needs_some_name() {
        let loader = MemoryLoader::new().with("anon.json", json!({"type": "object", "properties": {}}));
        let mut registry = Registry::new(&loader);
        registry.add_schema(json!({"title": "T", "allOf": [{"$ref": "anon.json"}]}));
        assert!(matches!(registry.parse(), Err(Error::SchemaMissingIdentifier { .. })));

        // the referencing property lends its name instead
        let mut registry = Registry::new(&loader);
        registry.add_schema(json!({"title": "T", "properties": {"meta_data": {"$ref": "anon.json"}}}));
        assert_eq!(
            registry.parse().unwrap(),
            "interface T {\n  meta_data?: MetaData;\n}\n\ninterface MetaData {\n}"
        );
    }

    #[test]
    fn anonymous_reference_cycles_are_reported() {
        let loader = MemoryLoader::new().with("list.json", json!({
            "type": "array", "items": { "$ref": "list.json" }
        }));
        let mut registry = Registry::new(&loader);
        registry.add_schema(json!({
            "title": "Holder",
            "properties": { "nested": { "$ref": "list.json" } }
        }));
        assert!(matches!(registry.parse(), Err(Error::UnnamedCycle { .. })));
    }

    #[test]
    fn root_dir_prefixes_locations() {
        let seen = std::cell::RefCell::new(Vec::new());
        let loader = |reference: &str| -> Result<SchemaDocument> {
            seen.borrow_mut().push(reference.to_string());
            Ok(json!({ "title": "Leaf", "type": "string" }))
        };
        let mut registry = Registry::new(&loader).with_root_dir("schemas");
        registry.add_schema(json!({ "title": "Root", "properties": { "leaf": { "$ref": "leaf.json" } } }));
        assert_eq!(
            registry.parse().unwrap(),
            "interface Root {\n  leaf?: Leaf;\n}\n\ntype Leaf = string;"
        );
        assert_eq!(*seen.borrow(), [Path::new("schemas").join("leaf.json").to_string_lossy().into_owned()]);
    }

    #[test]
    fn output_is_deterministic() {
        let schema = json!({
            "title": "Config",
            "properties": {
                "name": { "type": "string" },
                "retries": { "type": "integer" },
                "limits": { "properties": { "cpu": { "type": "number" }, "mem": { "type": "number" } } },
                "flags": { "type": "array", "items": { "type": "boolean" } }
            },
            "required": ["name"]
        });
        let first = compile_one(schema.clone()).unwrap();
        let second = compile_one(schema).unwrap();
        assert_eq!(first, second);
    }
}
