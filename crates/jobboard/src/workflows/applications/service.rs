use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::moderation::{ForbiddenWords, ModerationError};
use crate::query::{
    field, ListParams, ListParamsError, Paginated, Predicate, QueryComposer, QuerySpec,
    SortDirection,
};
use crate::workflows::jobs::{EmployerId, JobId, JobRepository};
use crate::workflows::repository::RepositoryError;

use super::domain::{
    ApplicationId, ApplicationRecord, ApplicationSubmission, JobSeekerId, JobSummary,
};
use super::repository::ApplicationRepository;
use super::status::{ApplicationStatus, InvalidTransition};

/// Service composing the application store, the job store and moderation.
pub struct ApplicationService<R, J> {
    repository: Arc<R>,
    jobs: Arc<J>,
    moderation: Arc<ForbiddenWords>,
    employer_listing: QueryComposer,
    job_seeker_listing: QueryComposer,
}

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

impl<R, J> ApplicationService<R, J>
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    pub fn new(repository: Arc<R>, jobs: Arc<J>, moderation: Arc<ForbiddenWords>) -> Self {
        Self {
            repository,
            jobs,
            moderation,
            employer_listing: QueryComposer::new(&[
                "job.title",
                "job_seeker.user.full_name",
                "cover_letter",
            ])
            .order_by("applied_at", SortDirection::Desc),
            job_seeker_listing: QueryComposer::new(&["job.title"])
                .order_by("applied_at", SortDirection::Desc),
        }
    }

    /// Submit a new application in the pending state.
    pub fn submit(
        &self,
        submission: ApplicationSubmission,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let job = self
            .jobs
            .fetch(&submission.job_id)?
            .ok_or_else(|| ApplicationServiceError::JobNotFound(submission.job_id.clone()))?;
        if !job.is_active {
            return Err(ApplicationServiceError::JobClosed(job.id));
        }

        self.moderation.screen(&submission.cover_letter)?;

        let existing = QuerySpec::filtered(
            field("job.id")
                .equals(job.id.0.as_str())
                .and(field("job_seeker.id").equals(submission.job_seeker.id.0.as_str())),
            1,
        );
        let (_, count) = self.repository.query(&existing)?;
        if count > 0 {
            return Err(ApplicationServiceError::AlreadyApplied {
                job_id: job.id,
                job_seeker_id: submission.job_seeker.id,
            });
        }

        let job_seeker_id = submission.job_seeker.id.clone();
        let record = ApplicationRecord::new(
            next_application_id(),
            JobSummary::from(&job),
            submission.job_seeker,
            submission.cover_letter,
            Utc::now(),
        );

        let stored = match self.repository.insert(record) {
            Ok(stored) => stored,
            Err(RepositoryError::Conflict) => {
                return Err(ApplicationServiceError::AlreadyApplied {
                    job_id: job.id,
                    job_seeker_id,
                })
            }
            Err(err) => return Err(err.into()),
        };
        info!(
            application_id = %stored.id,
            job_id = %stored.job.id,
            job_seeker_id = %stored.job_seeker.id,
            "application submitted"
        );
        Ok(stored)
    }

    /// Move an application to `requested` on behalf of the employer owning the job.
    ///
    /// Nothing is persisted unless the transition is allowed. A concurrent
    /// change between the read and the write surfaces as a repository conflict.
    pub fn update_status(
        &self,
        application_id: &ApplicationId,
        actor: &EmployerId,
        requested: ApplicationStatus,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let mut record = self.get(application_id)?;
        if record.job.employer_id != *actor {
            return Err(ApplicationServiceError::NotOwner {
                application_id: application_id.clone(),
            });
        }

        let previous = record.status();
        if let Err(err) = record.advance(requested) {
            warn!(%application_id, from = %err.from, to = %err.to, "status transition rejected");
            return Err(err.into());
        }

        self.repository.update(record.clone(), previous)?;
        info!(%application_id, from = %previous, to = %requested, "application status updated");
        Ok(record)
    }

    /// Fetch an application and current status for API responses.
    pub fn get(
        &self,
        application_id: &ApplicationId,
    ) -> Result<ApplicationRecord, ApplicationServiceError> {
        let record = self
            .repository
            .fetch(application_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Applications received on any job of `employer_id`, newest first.
    ///
    /// The search term spans the job title, applicant name and cover letter.
    pub fn list_for_employer(
        &self,
        employer_id: &EmployerId,
        params: &ListParams,
    ) -> Result<Paginated<ApplicationRecord>, ApplicationServiceError> {
        let scope = field("job.employer_id").equals(employer_id.0.as_str());
        self.list(&self.employer_listing, params, scope)
    }

    /// Applications sent by one job seeker, searchable by job title.
    pub fn list_for_job_seeker(
        &self,
        job_seeker_id: &JobSeekerId,
        params: &ListParams,
    ) -> Result<Paginated<ApplicationRecord>, ApplicationServiceError> {
        let scope = field("job_seeker.id").equals(job_seeker_id.0.as_str());
        self.list(&self.job_seeker_listing, params, scope)
    }

    fn list(
        &self,
        composer: &QueryComposer,
        params: &ListParams,
        scope: Predicate,
    ) -> Result<Paginated<ApplicationRecord>, ApplicationServiceError> {
        params.validate()?;
        let spec = composer.build(params, Some(scope));
        let (items, total) = self.repository.query(&spec)?;
        Ok(Paginated::from_query(items, total, &spec))
    }
}

/// Error raised by the application service.
#[derive(Debug, thiserror::Error)]
pub enum ApplicationServiceError {
    #[error(transparent)]
    Transition(#[from] InvalidTransition),
    #[error(transparent)]
    InvalidParams(#[from] ListParamsError),
    #[error(transparent)]
    Moderation(#[from] ModerationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("job {0} not found")]
    JobNotFound(JobId),
    #[error("job {0} is no longer accepting applications")]
    JobClosed(JobId),
    #[error("job seeker {job_seeker_id} already applied to job {job_id}")]
    AlreadyApplied {
        job_id: JobId,
        job_seeker_id: JobSeekerId,
    },
    #[error("application {application_id} belongs to another employer")]
    NotOwner { application_id: ApplicationId },
}
