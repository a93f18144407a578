use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use firetype::{
    Document, DocumentPath, DocumentSnapshot, DocumentStore, FieldUpdates, InMemoryDocumentStore,
    SetOptions, StoreError, WriteResult,
};

#[derive(Default)]
struct Calls {
    get: AtomicUsize,
    create: AtomicUsize,
    set: AtomicUsize,
    update: AtomicUsize,
    delete: AtomicUsize,
}

/// Store client that counts every call before delegating to an in-memory store.
#[derive(Clone, Default)]
pub struct RecordingStore {
    inner: InMemoryDocumentStore,
    calls: Arc<Calls>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gets(&self) -> usize {
        self.calls.get.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.calls.set.load(Ordering::SeqCst)
    }

    pub fn updates(&self) -> usize {
        self.calls.update.load(Ordering::SeqCst)
    }

    pub fn deletes(&self) -> usize {
        self.calls.delete.load(Ordering::SeqCst)
    }

    pub fn total(&self) -> usize {
        self.gets()
            + self.calls.create.load(Ordering::SeqCst)
            + self.sets()
            + self.updates()
            + self.deletes()
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn get(&self, path: &DocumentPath) -> Result<DocumentSnapshot, StoreError> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(path).await
    }

    async fn create(
        &self,
        path: &DocumentPath,
        document: Document,
    ) -> Result<WriteResult, StoreError> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.inner.create(path, document).await
    }

    async fn set(
        &self,
        path: &DocumentPath,
        document: Document,
        options: SetOptions,
    ) -> Result<WriteResult, StoreError> {
        self.calls.set.fetch_add(1, Ordering::SeqCst);
        self.inner.set(path, document, options).await
    }

    async fn update(
        &self,
        path: &DocumentPath,
        updates: FieldUpdates,
    ) -> Result<WriteResult, StoreError> {
        self.calls.update.fetch_add(1, Ordering::SeqCst);
        self.inner.update(path, updates).await
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        self.calls.delete.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(path).await
    }

    async fn terminate(&self) -> Result<(), StoreError> {
        self.inner.terminate().await
    }
}
