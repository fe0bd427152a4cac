pub mod applications;
pub mod jobs;
pub mod repository;

pub use repository::RepositoryError;
