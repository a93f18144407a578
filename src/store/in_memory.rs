//! InMemoryDocumentStore - HashMap-backed document store, the default client.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use log::info;
use serde_json::Value;

use super::{DocumentStore, StoreError};
use crate::document::{
    apply_delta, merge_into, Document, DocumentPath, DocumentSnapshot, FieldUpdate, FieldUpdates,
    SetOptions, WriteResult,
};

/// Internal stored representation of a document.
struct StoredDocument {
    document: Document,
    version: u64,
}

/// In-memory document store backed by a HashMap.
///
/// Storage key is the rendered `"collection/id"` path. Clone-friendly via
/// Arc: clones share storage and the terminated flag.
#[derive(Clone)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, StoredDocument>>>,
    terminated: Arc<AtomicBool>,
}

impl Default for InMemoryDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            terminated: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), StoreError> {
        if self.is_terminated() {
            return Err(StoreError::Terminated);
        }
        Ok(())
    }

    fn write_document(
        &self,
        key: String,
        document: Document,
        merge: bool,
    ) -> Result<WriteResult, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let version = match storage.get_mut(&key) {
            Some(stored) => {
                if merge {
                    merge_into(&mut stored.document, document);
                } else {
                    stored.document = document;
                }
                stored.version += 1;
                stored.version
            }
            None => {
                storage.insert(
                    key,
                    StoredDocument {
                        document,
                        version: 1,
                    },
                );
                1
            }
        };

        Ok(WriteResult { version })
    }
}

/// Apply `updates` to a copy of `document` so a failing transform leaves the
/// stored document untouched.
fn apply_updates(document: &Document, updates: FieldUpdates) -> Result<Document, StoreError> {
    let mut next = document.clone();
    for (field, update) in updates {
        let value = match update {
            FieldUpdate::Set(value) => value,
            FieldUpdate::Increment(delta) => {
                let number = match next.get(&field) {
                    Some(Value::Number(current)) => apply_delta(current, delta),
                    _ => delta.to_number(),
                };
                let number = number.ok_or_else(|| {
                    StoreError::InvalidArgument(format!(
                        "increment of `{}` is not a finite number",
                        field
                    ))
                })?;
                Value::Number(number)
            }
        };
        next.insert(field, value);
    }
    Ok(next)
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, path: &DocumentPath) -> Result<DocumentSnapshot, StoreError> {
        self.ensure_open()?;
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        match storage.get(&path.to_string()) {
            Some(stored) => Ok(DocumentSnapshot::found(
                path.clone(),
                stored.document.clone(),
                stored.version,
            )),
            None => Ok(DocumentSnapshot::missing(path.clone())),
        }
    }

    async fn create(
        &self,
        path: &DocumentPath,
        document: Document,
    ) -> Result<WriteResult, StoreError> {
        self.ensure_open()?;
        let key = path.to_string();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        if storage.contains_key(&key) {
            return Err(StoreError::AlreadyExists { path: key });
        }

        storage.insert(
            key,
            StoredDocument {
                document,
                version: 1,
            },
        );

        Ok(WriteResult { version: 1 })
    }

    async fn set(
        &self,
        path: &DocumentPath,
        document: Document,
        options: SetOptions,
    ) -> Result<WriteResult, StoreError> {
        self.ensure_open()?;
        self.write_document(path.to_string(), document, options.merge)
    }

    async fn update(
        &self,
        path: &DocumentPath,
        updates: FieldUpdates,
    ) -> Result<WriteResult, StoreError> {
        self.ensure_open()?;
        let key = path.to_string();
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        let stored = storage
            .get_mut(&key)
            .ok_or_else(|| StoreError::NotFound { path: key.clone() })?;

        stored.document = apply_updates(&stored.document, updates)?;
        stored.version += 1;

        Ok(WriteResult {
            version: stored.version,
        })
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        self.ensure_open()?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::Storage("lock poisoned".into()))?;

        Ok(storage.remove(&path.to_string()).is_some())
    }

    async fn terminate(&self) -> Result<(), StoreError> {
        if !self.terminated.swap(true, Ordering::AcqRel) {
            info!("in-memory document store terminated");
        }
        Ok(())
    }
}
