//! Schema sources. The compiler only ever calls [`SchemaLoader::load`]; where
//! the bytes come from is the loader's business.
use std::path::PathBuf;
use indexmap::IndexMap;
use crate::error::{Error, Result};
use crate::schema::SchemaDocument;

pub trait SchemaLoader {
    /// Fetch and parse the document behind `reference`.
    /// Failures must surface as [`Error::SourceUnavailable`].
    fn load(&self, reference: &str) -> Result<SchemaDocument>;
}

impl<F> SchemaLoader for F
where
    F: Fn(&str) -> Result<SchemaDocument>,
{
    fn load(&self, reference: &str) -> Result<SchemaDocument> {
        self(reference)
    }
}

/// Reads references as file paths.
#[derive(Debug, Clone, Default)]
pub struct FsLoader;

impl SchemaLoader for FsLoader {
    fn load(&self, reference: &str) -> Result<SchemaDocument> {
        let path = PathBuf::from(reference);
        let source = std::fs::read_to_string(&path)
            .map_err(|error| Error::source_unavailable(reference, error))?;
        serde_json::from_str::<SchemaDocument>(&source)
            .map_err(|error| Error::source_unavailable(reference, format!("invalid JSON: {error}")))
    }
}

/// Serves documents from memory, keyed by the exact reference string.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    documents: IndexMap<String, SchemaDocument>,
}

impl MemoryLoader {
    pub fn new() -> Self { Self::default() }

    pub fn with(mut self, reference: impl Into<String>, document: SchemaDocument) -> Self {
        self.insert(reference, document);
        self
    }

    pub fn insert(&mut self, reference: impl Into<String>, document: SchemaDocument) {
        self.documents.insert(reference.into(), document);
    }
}

impl SchemaLoader for MemoryLoader {
    fn load(&self, reference: &str) -> Result<SchemaDocument> {
        self.documents
            .get(reference)
            .cloned()
            .ok_or_else(|| Error::source_unavailable(reference, "no such document"))
    }
}

/// Loader for callers that have no references to resolve.
#[derive(Debug, Clone, Default)]
pub struct NoLoader;

impl SchemaLoader for NoLoader {
    fn load(&self, reference: &str) -> Result<SchemaDocument> {
        Err(Error::source_unavailable(reference, "no schema loader configured"))
    }
}
