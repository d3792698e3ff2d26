//! Book data sources.
//!
//! A [`BookSource`] supplies the ordered component ids, the raw content of
//! each component, the table of contents, and metadata lookups. Fetching and
//! decoding happen before the navigator asks for anything.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{PagerError, Result};
use crate::navigation::NavPoint;

/// Read-only view of a book's structure and content.
pub trait BookSource {
    /// Component ids in reading order. Ids are unique.
    fn component_ids(&self) -> &[String];

    /// Raw content for component `id`.
    fn component_content(&self, id: &str) -> Result<String>;

    /// Hierarchical table of contents.
    fn contents(&self) -> &[NavPoint];

    /// Metadata value for `key`, if any.
    fn metadata(&self, key: &str) -> Option<String>;

    /// Number of components in the book.
    fn component_count(&self) -> usize {
        self.component_ids().len()
    }

    /// Ordinal of component `id`.
    fn component_index(&self, id: &str) -> Option<usize> {
        self.component_ids().iter().position(|candidate| candidate == id)
    }
}

/// Component entry in a book manifest.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ManifestComponent {
    pub id: String,
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Deserialize)]
struct Manifest {
    components: Vec<ManifestComponent>,
    #[serde(default)]
    contents: Vec<NavPoint>,
    #[serde(default)]
    metadata: BTreeMap<String, String>,
}

/// Book held entirely in memory.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemorySource {
    ids: Vec<String>,
    content: BTreeMap<String, String>,
    toc: Vec<NavPoint>,
    metadata: BTreeMap<String, String>,
}

impl MemorySource {
    /// Create an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component. A repeated id replaces the earlier content and
    /// keeps its original position.
    pub fn with_component(mut self, id: impl Into<String>, content: impl Into<String>) -> Self {
        let id = id.into();
        if !self.content.contains_key(&id) {
            self.ids.push(id.clone());
        }
        self.content.insert(id, content.into());
        self
    }

    /// Replace the table of contents.
    pub fn with_contents(mut self, toc: Vec<NavPoint>) -> Self {
        self.toc = toc;
        self
    }

    /// Set one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Load a JSON manifest of the form
    /// `{"components": [{"id", "content"}], "contents": [...], "metadata": {...}}`.
    ///
    /// Table-of-contents entries accept either `label`/`href` or `title`/`src`.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json)?;
        let mut source = Self::new().with_contents(manifest.contents);
        for component in manifest.components {
            source = source.with_component(component.id, component.content);
        }
        source.metadata = manifest.metadata;
        Ok(source)
    }
}

impl BookSource for MemorySource {
    fn component_ids(&self) -> &[String] {
        &self.ids
    }

    fn component_content(&self, id: &str) -> Result<String> {
        self.content
            .get(id)
            .cloned()
            .ok_or_else(|| PagerError::MissingContent { id: id.to_owned() })
    }

    fn contents(&self) -> &[NavPoint] {
        &self.toc
    }

    fn metadata(&self, key: &str) -> Option<String> {
        self.metadata.get(key).cloned()
    }
}

/// Id given to the only component of a [`SingleDocumentSource`].
pub const SINGLE_DOCUMENT_ID: &str = "anonymous";

/// A flat document treated as a one-component book with no chapters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleDocumentSource {
    ids: [String; 1],
    html: String,
}

impl SingleDocumentSource {
    /// Wrap an HTML document.
    pub fn from_html(html: impl Into<String>) -> Self {
        Self {
            ids: [SINGLE_DOCUMENT_ID.to_owned()],
            html: html.into(),
        }
    }
}

impl BookSource for SingleDocumentSource {
    fn component_ids(&self) -> &[String] {
        &self.ids
    }

    fn component_content(&self, _id: &str) -> Result<String> {
        Ok(self.html.clone())
    }

    fn contents(&self) -> &[NavPoint] {
        &[]
    }

    fn metadata(&self, _key: &str) -> Option<String> {
        None
    }
}
