//! DocumentStore - the client a repository talks to.
//!
//! A store addresses documents by `collection/id` and exposes single-document
//! primitives. Each call is atomic for the one document it touches; nothing
//! spans documents.

mod error;
mod in_memory;

use std::sync::Arc;

use async_trait::async_trait;

use crate::document::{Document, DocumentPath, DocumentSnapshot, FieldUpdates, SetOptions, WriteResult};

pub use error::StoreError;
pub use in_memory::InMemoryDocumentStore;

/// Single-document read/write primitives of a document database client.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read the document at `path`. A missing document is not an error.
    async fn get(&self, path: &DocumentPath) -> Result<DocumentSnapshot, StoreError>;

    /// Write a new document. Fails with `AlreadyExists` if one is present.
    async fn create(&self, path: &DocumentPath, document: Document)
        -> Result<WriteResult, StoreError>;

    /// Write a full document, replacing or (with `merge`) merging into the
    /// current one. Creates the document if it does not exist.
    async fn set(
        &self,
        path: &DocumentPath,
        document: Document,
        options: SetOptions,
    ) -> Result<WriteResult, StoreError>;

    /// Apply field transforms to an existing document. Fails with `NotFound`
    /// if there is no document at `path`.
    async fn update(&self, path: &DocumentPath, updates: FieldUpdates)
        -> Result<WriteResult, StoreError>;

    /// Delete the document at `path`. Returns true if it existed.
    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError>;

    /// Release the client. Later calls fail with `Terminated`.
    async fn terminate(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S: DocumentStore + ?Sized> DocumentStore for Arc<S> {
    async fn get(&self, path: &DocumentPath) -> Result<DocumentSnapshot, StoreError> {
        (**self).get(path).await
    }

    async fn create(
        &self,
        path: &DocumentPath,
        document: Document,
    ) -> Result<WriteResult, StoreError> {
        (**self).create(path, document).await
    }

    async fn set(
        &self,
        path: &DocumentPath,
        document: Document,
        options: SetOptions,
    ) -> Result<WriteResult, StoreError> {
        (**self).set(path, document, options).await
    }

    async fn update(
        &self,
        path: &DocumentPath,
        updates: FieldUpdates,
    ) -> Result<WriteResult, StoreError> {
        (**self).update(path, updates).await
    }

    async fn delete(&self, path: &DocumentPath) -> Result<bool, StoreError> {
        (**self).delete(path).await
    }

    async fn terminate(&self) -> Result<(), StoreError> {
        (**self).terminate().await
    }
}
