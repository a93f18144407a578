//! Shared fixtures for repository integration tests.

mod my_document;
mod recording_store;

pub use my_document::{my_document, MyDocument, COLLECTION};
pub use recording_store::RecordingStore;
