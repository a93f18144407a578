use serde::{de::DeserializeOwned, Serialize};

/// Trait for record types stored through a [`Repository`](crate::Repository).
///
/// The one structural requirement is a string identifier. The record must
/// serialize to a JSON object; when that object carries the identifier under
/// [`ID_FIELD`](Entity::ID_FIELD), its value has to equal [`id`](Entity::id).
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// Name of the serialized field holding the identifier.
    const ID_FIELD: &'static str = "id";

    /// Returns the unique identifier for this record. Empty means "not yet
    /// assigned".
    fn id(&self) -> &str;

    /// Assign the identifier. Called by `create_or_update` when `id()` is empty.
    fn set_id(&mut self, id: String);
}
