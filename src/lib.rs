//! Typed repositories over a document store.
//!
//! A [`Repository<T>`] is bound to one collection and stores records of type
//! `T` at `collection/<id>` paths. It offers four operations: `find`,
//! `create_or_update` (merge upsert), `increment_value` (atomic field
//! increment), and `delete`. The store client sits behind the
//! [`DocumentStore`] trait; [`InMemoryDocumentStore`] is the default client.
//!
//! ## Example
//!
//! ```ignore
//! use firetype::{Entity, Repository, RepositoryOptions};
//!
//! #[derive(Serialize, Deserialize, Clone)]
//! struct Visit {
//!     id: String,
//!     count: u64,
//! }
//!
//! impl Entity for Visit {
//!     fn id(&self) -> &str { &self.id }
//!     fn set_id(&mut self, id: String) { self.id = id; }
//! }
//!
//! let visits = Repository::<Visit>::with_options(RepositoryOptions::new("visits"))?;
//! let visit = visits.create_or_update(Visit { id: String::new(), count: 0 }).await?;
//! let visit = visits.increment_value(&visit, "count").await?;
//! assert_eq!(visits.find(&visit.id).await?.map(|v| v.count), Some(1));
//! ```

mod document;
mod entity;
mod repository;
mod store;

pub use document::{
    Delta, Document, DocumentPath, DocumentSnapshot, FieldUpdate, FieldUpdates, SetOptions,
    WriteResult,
};
pub use entity::Entity;
pub use repository::{
    Repository, RepositoryConfig, RepositoryError, RepositoryExt, RepositoryOptions,
};
pub use store::{DocumentStore, InMemoryDocumentStore, StoreError};
