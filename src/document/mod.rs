//! Documents - the JSON shapes exchanged with a document store.

mod path;
mod value;

use serde_json::{Map, Value};

pub use path::DocumentPath;
pub(crate) use path::validate_segment;
pub(crate) use value::kind_of;
pub use value::{apply_delta, merge_into, Delta};

/// A stored document: a JSON object keyed by field name.
pub type Document = Map<String, Value>;

/// Result of reading a single path.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentSnapshot {
    path: DocumentPath,
    data: Option<Document>,
    version: u64,
}

impl DocumentSnapshot {
    /// Snapshot of a document that exists at `path`.
    pub fn found(path: DocumentPath, data: Document, version: u64) -> Self {
        Self {
            path,
            data: Some(data),
            version,
        }
    }

    /// Snapshot of an empty path.
    pub fn missing(path: DocumentPath) -> Self {
        Self {
            path,
            data: None,
            version: 0,
        }
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.data.is_some()
    }

    pub fn data(&self) -> Option<&Document> {
        self.data.as_ref()
    }

    pub fn into_data(self) -> Option<Document> {
        self.data
    }

    /// Write version of the document, `None` when it does not exist.
    pub fn version(&self) -> Option<u64> {
        self.data.as_ref().map(|_| self.version)
    }
}

/// Options for a full-document write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SetOptions {
    /// Merge supplied fields into an existing document instead of replacing it.
    pub merge: bool,
}

impl SetOptions {
    pub fn merge(merge: bool) -> Self {
        Self { merge }
    }
}

/// A single field transform applied by `DocumentStore::update`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldUpdate {
    /// Replace the field.
    Set(Value),
    /// Atomically add to a numeric field.
    Increment(Delta),
}

/// Ordered field transforms for one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldUpdates {
    updates: Vec<(String, FieldUpdate)>,
}

impl FieldUpdates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: Value) -> Self {
        self.updates.push((field.into(), FieldUpdate::Set(value)));
        self
    }

    pub fn increment(mut self, field: impl Into<String>, delta: impl Into<Delta>) -> Self {
        self.updates
            .push((field.into(), FieldUpdate::Increment(delta.into())));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.updates.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, FieldUpdate)> {
        self.updates.iter()
    }
}

impl IntoIterator for FieldUpdates {
    type Item = (String, FieldUpdate);
    type IntoIter = std::vec::IntoIter<(String, FieldUpdate)>;

    fn into_iter(self) -> Self::IntoIter {
        self.updates.into_iter()
    }
}

/// Acknowledgement of a successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteResult {
    /// Version of the document after the write.
    pub version: u64,
}
