use crate::query::QuerySpec;
use crate::workflows::repository::RepositoryError;

use super::domain::{ApplicationId, ApplicationRecord};
use super::status::ApplicationStatus;

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations own the write guarantees: `insert` must reject a second
/// record for the same job and job seeker with [`RepositoryError::Conflict`],
/// and `update` must only succeed while the stored status still equals
/// `expected`.
pub trait ApplicationRepository: Send + Sync {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError>;
    fn update(
        &self,
        record: ApplicationRecord,
        expected: ApplicationStatus,
    ) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError>;
    fn query(&self, spec: &QuerySpec)
        -> Result<(Vec<ApplicationRecord>, u64), RepositoryError>;
}

/// True when `existing` is the same application slot as `candidate`.
pub fn same_applicant(existing: &ApplicationRecord, candidate: &ApplicationRecord) -> bool {
    existing.job.id == candidate.job.id && existing.job_seeker.id == candidate.job_seeker.id
}
