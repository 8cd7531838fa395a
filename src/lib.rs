//! Compile JSON Schema documents into TypeScript declarations.
//!
//! ```
//! use serde_json::json;
//!
//! let schema = json!({
//!     "title": "Foo",
//!     "type": "object",
//!     "properties": { "bar": { "type": "integer" } },
//!     "required": ["bar"]
//! });
//! let out = schema_tsd::compile(schema, None).unwrap();
//! assert_eq!(out, "interface Foo {\n  bar: number;\n}");
//! ```
//!
//! Several documents can share one output through [`Registry`]:
//! queue them with [`Registry::add_schema`], then call [`Registry::parse`] once.
pub mod cli;
pub mod config;
pub mod error;
pub mod ident;
pub mod jq_exec;
pub mod loader;
pub mod node;
pub mod path_de;
pub mod registry;
pub mod schema;

use std::path::Path;

pub use error::{Error, Result};
pub use ident::tsify_string;
pub use loader::{FsLoader, MemoryLoader, NoLoader, SchemaLoader};
pub use registry::Registry;
pub use schema::SchemaDocument;

/// Compile one root schema, loading `$ref`s from the file system.
pub fn compile(root: SchemaDocument, root_dir: Option<&Path>) -> Result<String> {
    compile_with_loader(root, root_dir, &FsLoader)
}

pub fn compile_with_loader(
    root: SchemaDocument,
    root_dir: Option<&Path>,
    loader: &dyn SchemaLoader,
) -> Result<String> {
    let mut registry = Registry::new(loader);
    if let Some(root_dir) = root_dir {
        registry = registry.with_root_dir(root_dir);
    }
    registry.add_schema(root);
    registry.parse()
}
