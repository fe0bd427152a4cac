use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::moderation::{ForbiddenWords, ModerationError};
use crate::query::{
    field, ListParams, ListParamsError, Paginated, Predicate, QueryComposer, SortDirection,
};
use crate::workflows::repository::RepositoryError;

use super::domain::{EmployerId, JobDraft, JobId, JobPosting};
use super::repository::JobRepository;

/// Service owning job posting creation and listing.
pub struct JobService<J> {
    repository: Arc<J>,
    moderation: Arc<ForbiddenWords>,
    listing: QueryComposer,
}

static JOB_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_job_id() -> JobId {
    let id = JOB_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    JobId(format!("job-{id:06}"))
}

impl<J> JobService<J>
where
    J: JobRepository + 'static,
{
    pub fn new(repository: Arc<J>, moderation: Arc<ForbiddenWords>) -> Self {
        Self {
            repository,
            moderation,
            listing: QueryComposer::new(&["title", "description"])
                .order_by("created_at", SortDirection::Desc),
        }
    }

    /// Publish a new posting; it is active until the employer closes it.
    pub fn create(
        &self,
        employer_id: EmployerId,
        draft: JobDraft,
    ) -> Result<JobPosting, JobServiceError> {
        self.moderation.screen(&draft.title)?;
        self.moderation.screen(&draft.description)?;

        let job = JobPosting {
            id: next_job_id(),
            employer_id,
            title: draft.title,
            description: draft.description,
            is_active: true,
            created_at: Utc::now(),
        };

        let stored = self.repository.insert(job)?;
        info!(job_id = %stored.id, employer_id = %stored.employer_id, "job posted");
        Ok(stored)
    }

    pub fn get(&self, job_id: &JobId) -> Result<JobPosting, JobServiceError> {
        let job = self
            .repository
            .fetch(job_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(job)
    }

    /// Stop accepting applications. Only the owning employer may close a posting.
    pub fn close(
        &self,
        job_id: &JobId,
        actor: &EmployerId,
    ) -> Result<JobPosting, JobServiceError> {
        let mut job = self.get(job_id)?;
        if job.employer_id != *actor {
            return Err(JobServiceError::NotOwner {
                job_id: job_id.clone(),
            });
        }

        job.is_active = false;
        self.repository.update(job.clone())?;
        info!(job_id = %job.id, "job closed");
        Ok(job)
    }

    /// Active postings, newest first, searchable by title and description.
    pub fn list_active(
        &self,
        params: &ListParams,
    ) -> Result<Paginated<JobPosting>, JobServiceError> {
        self.list(params, field("is_active").equals(true))
    }

    /// Every posting of one employer, including closed ones.
    pub fn list_for_employer(
        &self,
        employer_id: &EmployerId,
        params: &ListParams,
    ) -> Result<Paginated<JobPosting>, JobServiceError> {
        self.list(params, field("employer_id").equals(employer_id.0.as_str()))
    }

    fn list(
        &self,
        params: &ListParams,
        scope: Predicate,
    ) -> Result<Paginated<JobPosting>, JobServiceError> {
        params.validate()?;
        let spec = self.listing.build(params, Some(scope));
        let (items, total) = self.repository.query(&spec)?;
        Ok(Paginated::from_query(items, total, &spec))
    }
}

/// Error raised by the job service.
#[derive(Debug, thiserror::Error)]
pub enum JobServiceError {
    #[error(transparent)]
    Moderation(#[from] ModerationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    InvalidParams(#[from] ListParamsError),
    #[error("job {job_id} belongs to another employer")]
    NotOwner { job_id: JobId },
}
