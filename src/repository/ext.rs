use super::error::RepositoryError;
use super::repository::Repository;
use crate::entity::Entity;
use crate::store::DocumentStore;

/// Extension trait for typed repository access on any cloneable store handle.
pub trait RepositoryExt: DocumentStore + Clone + Sized {
    /// Get a typed repository bound to `collection` on this store.
    fn repository<T: Entity>(
        &self,
        collection: impl Into<String>,
    ) -> Result<Repository<T, Self>, RepositoryError> {
        Repository::new(collection, self.clone())
    }
}

impl<S: DocumentStore + Clone> RepositoryExt for S {}
