//! Construction options for a repository.

use serde::{Deserialize, Serialize};

/// Serializable repository binding, e.g. loaded from a JSON config file.
///
/// ```ignore
/// let config: RepositoryConfig = serde_json::from_str(r#"{ "collection": "users" }"#)?;
/// let users = Repository::<User>::from_config(config, None)?;
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RepositoryConfig {
    pub collection: String,
}

/// Options accepted by `Repository::with_options`.
///
/// When `store` is `None` a default store client is constructed.
#[derive(Debug, Clone)]
pub struct RepositoryOptions<S> {
    pub collection: String,
    pub store: Option<S>,
}

impl<S> RepositoryOptions<S> {
    pub fn new(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            store: None,
        }
    }

    /// Use a pre-built store client instead of a default one.
    pub fn with_store(mut self, store: S) -> Self {
        self.store = Some(store);
        self
    }
}

impl<S> From<RepositoryConfig> for RepositoryOptions<S> {
    fn from(config: RepositoryConfig) -> Self {
        Self::new(config.collection)
    }
}
