//! DocumentPath - `collection/id` addressing for documents.

use std::fmt;
use std::str::FromStr;

use crate::store::StoreError;

/// Address of a single document: one collection segment and one id segment.
///
/// Both segments are validated on construction, so a `DocumentPath` always
/// renders as exactly `"<collection>/<id>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentPath {
    collection: String,
    id: String,
}

impl DocumentPath {
    /// Build a path from a collection name and a document id.
    pub fn new(collection: impl Into<String>, id: impl Into<String>) -> Result<Self, StoreError> {
        let collection = collection.into();
        let id = id.into();
        validate_segment(&collection)?;
        validate_segment(&id)?;
        Ok(Self { collection, id })
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection, self.id)
    }
}

impl FromStr for DocumentPath {
    type Err = StoreError;

    fn from_str(path: &str) -> Result<Self, Self::Err> {
        match path.split_once('/') {
            Some((collection, id)) => Self::new(collection, id),
            None => Err(StoreError::InvalidPath(format!(
                "`{}` is not a collection/id path",
                path
            ))),
        }
    }
}

/// Check that `segment` can be used as one component of a document path.
pub(crate) fn validate_segment(segment: &str) -> Result<(), StoreError> {
    if segment.is_empty() {
        return Err(StoreError::InvalidPath("path segment cannot be empty".into()));
    }
    if segment.contains('/') {
        return Err(StoreError::InvalidPath(format!(
            "path segment `{}` cannot contain `/`",
            segment
        )));
    }
    if segment == "." || segment == ".." {
        return Err(StoreError::InvalidPath(format!(
            "path segment `{}` is reserved",
            segment
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_collection_slash_id() {
        let path = DocumentPath::new("users", "abc").unwrap();
        assert_eq!(path.to_string(), "users/abc");
        assert_eq!(path.collection(), "users");
        assert_eq!(path.id(), "abc");
    }

    #[test]
    fn parses_from_string() {
        let path: DocumentPath = "TEST_collection/1234".parse().unwrap();
        assert_eq!(path, DocumentPath::new("TEST_collection", "1234").unwrap());
    }

    #[test]
    fn rejects_nested_paths() {
        let err = "a/b/c".parse::<DocumentPath>().unwrap_err();
        assert!(matches!(err, StoreError::InvalidPath(_)));
        assert!("no-slash".parse::<DocumentPath>().is_err());
    }

    #[test]
    fn rejects_invalid_segments() {
        assert!(DocumentPath::new("", "id").is_err());
        assert!(DocumentPath::new("users", "").is_err());
        assert!(DocumentPath::new("users", "a/b").is_err());
        assert!(DocumentPath::new("users", "..").is_err());
        assert!(DocumentPath::new(".", "id").is_err());
    }
}
