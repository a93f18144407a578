use std::fmt;

/// Failure reported by a document store client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A collection or id is not a valid path segment.
    InvalidPath(String),
    /// A field transform could not be applied.
    InvalidArgument(String),
    /// Update of a document that does not exist.
    NotFound { path: String },
    /// Create of a document that already exists.
    AlreadyExists { path: String },
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
    /// The client was terminated and no longer accepts calls.
    Terminated,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::InvalidPath(msg) => write!(f, "invalid document path: {}", msg),
            StoreError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            StoreError::NotFound { path } => write!(f, "no document to update at {}", path),
            StoreError::AlreadyExists { path } => write!(f, "document already exists at {}", path),
            StoreError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            StoreError::Storage(msg) => write!(f, "document storage error: {}", msg),
            StoreError::Terminated => write!(f, "store client has been terminated"),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serde(err.to_string())
    }
}
