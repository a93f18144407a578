//! Repository - typed accessor for one collection of a document store.

use std::fmt;
use std::marker::PhantomData;

use log::{debug, warn};
use serde_json::Value;
use uuid::Uuid;

use super::error::RepositoryError;
use super::options::{RepositoryConfig, RepositoryOptions};
use crate::document::{
    apply_delta, kind_of, validate_segment, Delta, Document, DocumentPath, FieldUpdates,
    SetOptions,
};
use crate::entity::Entity;
use crate::store::{DocumentStore, InMemoryDocumentStore, StoreError};

/// Typed repository over the documents of a single collection.
///
/// Every record of type `T` lives at `collection/<record id>`. The repository
/// keeps no state between calls; the store is the only source of truth.
/// Calls are not coordinated with each other: concurrent writers to the same
/// id race at the store.
pub struct Repository<T, S = InMemoryDocumentStore> {
    collection: String,
    store: S,
    _marker: PhantomData<T>,
}

impl<T: Entity, S: DocumentStore> Repository<T, S> {
    /// Bind a repository to `collection` on an existing store client.
    pub fn new(collection: impl Into<String>, store: S) -> Result<Self, RepositoryError> {
        let collection = collection.into();
        validate_segment(&collection)?;
        Ok(Self {
            collection,
            store,
            _marker: PhantomData,
        })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn path(&self, id: &str) -> Result<DocumentPath, RepositoryError> {
        Ok(DocumentPath::new(self.collection.as_str(), id)?)
    }

    /// Serialize `record` into a document, checking the identifier field
    /// agrees with `record.id()`.
    fn to_document(&self, record: &T) -> Result<Document, RepositoryError> {
        let document = match serde_json::to_value(record)? {
            Value::Object(document) => document,
            other => {
                return Err(StoreError::Serde(format!(
                    "records must serialize to an object, got {}",
                    kind_of(Some(&other))
                ))
                .into())
            }
        };

        match document.get(T::ID_FIELD) {
            None => {}
            Some(Value::String(stored)) if stored == record.id() => {}
            Some(stored) => {
                return Err(RepositoryError::IdentifierMismatch {
                    id: record.id().to_string(),
                    stored: stored.to_string(),
                })
            }
        }

        Ok(document)
    }

    /// Get a record by id. A missing document is `Ok(None)`.
    pub async fn find(&self, id: &str) -> Result<Option<T>, RepositoryError> {
        let path = self.path(id)?;
        let snapshot = self.store.get(&path).await?;

        match snapshot.into_data() {
            Some(document) => {
                debug!("find {}: found", path);
                Ok(Some(serde_json::from_value(Value::Object(document))?))
            }
            None => {
                debug!("find {}: not found", path);
                Ok(None)
            }
        }
    }

    /// Create a new document or merge into an existing one.
    ///
    /// A record with an empty id is assigned a fresh random UUID first. The
    /// record is written whole, merged when a document already exists at its
    /// path, and echoed back (with the assigned id) without re-reading.
    pub async fn create_or_update(&self, mut record: T) -> Result<T, RepositoryError> {
        if record.id().is_empty() {
            record.set_id(Uuid::new_v4().to_string());
        }

        let path = self.path(record.id())?;
        let document = self.to_document(&record)?;

        let exists = self.store.get(&path).await?.exists();
        let written = self
            .store
            .set(&path, document, SetOptions::merge(exists))
            .await?;

        debug!(
            "create_or_update {}: merge={} version={}",
            path, exists, written.version
        );
        Ok(record)
    }

    /// Atomically add 1 to a numeric field. See [`increment_value_by`](Self::increment_value_by).
    pub async fn increment_value(&self, record: &T, property: &str) -> Result<T, RepositoryError> {
        self.increment_value_by(record, property, Delta::default())
            .await
    }

    /// Atomically add `delta` to the numeric field `property` of `record`.
    ///
    /// Fails with `InvalidOperand` before touching the store when the field on
    /// `record` is not a number. The returned record is `record` with the
    /// field set to its value plus `delta`; it is computed from the supplied
    /// copy, not re-read, so a stale `record` yields a stale result even
    /// though the store-side increment is applied correctly.
    pub async fn increment_value_by(
        &self,
        record: &T,
        property: &str,
        delta: impl Into<Delta>,
    ) -> Result<T, RepositoryError> {
        let delta = delta.into();
        let path = self.path(record.id())?;
        let mut document = self.to_document(record)?;

        let next = match document.get(property) {
            Some(Value::Number(current)) => apply_delta(current, delta),
            other => {
                let found = kind_of(other);
                warn!("increment {} rejected: `{}` is {}", path, property, found);
                return Err(RepositoryError::InvalidOperand {
                    field: property.to_string(),
                    found: found.to_string(),
                });
            }
        };
        let next = next.ok_or_else(|| RepositoryError::InvalidOperand {
            field: property.to_string(),
            found: "a non-finite result".to_string(),
        })?;

        document.insert(property.to_string(), Value::Number(next));
        let updated: T = serde_json::from_value(Value::Object(document))?;

        let written = self
            .store
            .update(&path, FieldUpdates::new().increment(property, delta))
            .await?;

        debug!(
            "increment {}: `{}` by {:?} version={}",
            path, property, delta, written.version
        );
        Ok(updated)
    }

    /// Delete a record by id. Deleting a missing record is not an error.
    pub async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let path = self.path(id)?;
        let existed = self.store.delete(&path).await?;
        debug!("delete {}: existed={}", path, existed);
        Ok(())
    }
}

impl<T: Entity, S: DocumentStore + Default> Repository<T, S> {
    /// Build a repository from options, constructing a default store client
    /// when none is supplied.
    pub fn with_options(options: RepositoryOptions<S>) -> Result<Self, RepositoryError> {
        let store = options.store.unwrap_or_default();
        Self::new(options.collection, store)
    }

    pub fn from_config(config: RepositoryConfig, store: Option<S>) -> Result<Self, RepositoryError> {
        let mut options = RepositoryOptions::from(config);
        options.store = store;
        Self::with_options(options)
    }
}

impl<T, S: Clone> Clone for Repository<T, S> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T, S> fmt::Debug for Repository<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Counter {
        id: String,
        count: u32,
        label: String,
    }

    impl Entity for Counter {
        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Keyed {
        #[serde(rename = "key")]
        id: String,
        value: i64,
    }

    impl Entity for Keyed {
        const ID_FIELD: &'static str = "key";

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: String) {
            self.id = id;
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct Aliased {
        id: String,
        slug: String,
    }

    impl Entity for Aliased {
        fn id(&self) -> &str {
            &self.slug
        }

        fn set_id(&mut self, id: String) {
            self.slug = id;
        }
    }

    fn counter(id: &str, count: u32) -> Counter {
        Counter {
            id: id.into(),
            count,
            label: "x".into(),
        }
    }

    #[test]
    fn rejects_invalid_collection() {
        let err = Repository::<Counter>::new("a/b", InMemoryDocumentStore::new()).unwrap_err();
        assert!(matches!(err, RepositoryError::Store(StoreError::InvalidPath(_))));
    }

    #[test]
    fn with_options_builds_default_store() {
        let repo = Repository::<Counter>::with_options(RepositoryOptions::new("counters")).unwrap();
        assert_eq!(repo.collection(), "counters");
        assert!(!repo.store().is_terminated());
    }

    #[tokio::test]
    async fn custom_identifier_field_is_checked() {
        let repo = Repository::<Keyed>::new("keyed", InMemoryDocumentStore::new()).unwrap();
        let saved = repo
            .create_or_update(Keyed {
                id: "k1".into(),
                value: 7,
            })
            .await
            .unwrap();
        assert_eq!(saved.id, "k1");

        let path = DocumentPath::new("keyed", "k1").unwrap();
        let snapshot = repo.store().get(&path).await.unwrap();
        assert_eq!(snapshot.data().unwrap()["key"], Value::from("k1"));
    }

    #[tokio::test]
    async fn diverging_identifier_is_rejected_before_write() {
        let store = InMemoryDocumentStore::new();
        let repo = Repository::<Aliased>::new("aliased", store.clone()).unwrap();
        let err = repo
            .create_or_update(Aliased {
                id: "a".into(),
                slug: "b".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(
            err,
            RepositoryError::IdentifierMismatch {
                id: "b".into(),
                stored: "\"a\"".into(),
            }
        );

        let path = DocumentPath::new("aliased", "b").unwrap();
        assert!(!store.get(&path).await.unwrap().exists());
    }

    #[tokio::test]
    async fn increment_result_fails_conversion_before_store_call() {
        let store = InMemoryDocumentStore::new();
        let repo = Repository::<Counter>::new("counters", store.clone()).unwrap();
        repo.create_or_update(counter("c1", 0)).await.unwrap();

        // u32 cannot hold -1
        let err = repo
            .increment_value_by(&counter("c1", 0), "count", -1)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Store(StoreError::Serde(_))));

        let found = repo.find("c1").await.unwrap().unwrap();
        assert_eq!(found.count, 0);
    }

    #[tokio::test]
    async fn increment_with_non_finite_delta_is_invalid_operand() {
        let repo = Repository::<Counter>::new("counters", InMemoryDocumentStore::new()).unwrap();
        let err = repo
            .increment_value_by(&counter("c1", 0), "count", f64::NAN)
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::InvalidOperand { .. }));
    }

    #[tokio::test]
    async fn increment_defaults_to_one() {
        let repo = Repository::<Counter>::new("counters", InMemoryDocumentStore::new()).unwrap();
        let record = repo.create_or_update(counter("c1", 4)).await.unwrap();
        let updated = repo.increment_value(&record, "count").await.unwrap();
        assert_eq!(updated.count, 5);
        assert_eq!(repo.find("c1").await.unwrap().unwrap().count, 5);
    }

    #[tokio::test]
    async fn find_with_invalid_id_is_store_error() {
        let repo = Repository::<Counter>::new("counters", InMemoryDocumentStore::new()).unwrap();
        let err = repo.find("a/b").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Store(StoreError::InvalidPath(_))));
    }

    #[test]
    fn store_errors_are_sources() {
        use std::error::Error;

        let err = RepositoryError::from(StoreError::Terminated);
        assert_eq!(err.to_string(), "store client has been terminated");
        assert!(err.source().is_some());

        let err = RepositoryError::InvalidOperand {
            field: "stringKey".into(),
            found: "string".into(),
        };
        assert!(err.source().is_none());
        assert!(err.to_string().contains("stringKey"));
    }
}
