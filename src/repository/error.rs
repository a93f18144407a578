use std::fmt;

use crate::store::StoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Increment target on the supplied record is not a number.
    InvalidOperand {
        field: String,
        found: String,
    },
    /// Serialized identifier field disagrees with `Entity::id`.
    IdentifierMismatch {
        id: String,
        stored: String,
    },
    /// Failure surfaced unchanged from the store client.
    Store(StoreError),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::InvalidOperand { field, found } => write!(
                f,
                "cannot increment `{}`: expected a number, found {}",
                field, found
            ),
            RepositoryError::IdentifierMismatch { id, stored } => write!(
                f,
                "record id {} does not match its serialized identifier {}",
                id, stored
            ),
            RepositoryError::Store(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for RepositoryError {
    fn from(err: StoreError) -> Self {
        RepositoryError::Store(err)
    }
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::Store(err.into())
    }
}
