mod error;
mod ext;
mod options;
mod repository;

pub use error::RepositoryError;
pub use ext::RepositoryExt;
pub use options::{RepositoryConfig, RepositoryOptions};
pub use repository::Repository;
