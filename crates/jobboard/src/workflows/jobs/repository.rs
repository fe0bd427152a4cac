use crate::query::QuerySpec;
use crate::workflows::repository::RepositoryError;

use super::domain::{JobId, JobPosting};

/// Storage abstraction for job postings.
pub trait JobRepository: Send + Sync {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError>;
    fn update(&self, job: JobPosting) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError>;
    /// Execute a listing query, returning one page and the unpaginated match count.
    fn query(&self, spec: &QuerySpec) -> Result<(Vec<JobPosting>, u64), RepositoryError>;
}
