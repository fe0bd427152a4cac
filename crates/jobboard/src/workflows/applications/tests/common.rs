use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;

use crate::moderation::{ForbiddenWords, StaticWordSource};
use crate::query::{memory, QuerySpec};
use crate::workflows::applications::domain::{
    ApplicationId, ApplicationRecord, ApplicationSubmission, JobSeekerId, JobSeekerProfile,
    UserAccount,
};
use crate::workflows::applications::repository::{same_applicant, ApplicationRepository};
use crate::workflows::applications::{application_router, ApplicationService, ApplicationStatus};
use crate::workflows::jobs::{EmployerId, JobId, JobPosting, JobRepository};
use crate::workflows::repository::RepositoryError;

pub(super) fn employer() -> EmployerId {
    EmployerId("emp-acme".to_string())
}

pub(super) fn other_employer() -> EmployerId {
    EmployerId("emp-globex".to_string())
}

pub(super) fn job(id: &str, title: &str, employer_id: EmployerId, is_active: bool) -> JobPosting {
    JobPosting {
        id: JobId(id.to_string()),
        employer_id,
        title: title.to_string(),
        description: format!("{title} wanted"),
        is_active,
        created_at: Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap(),
    }
}

pub(super) fn job_seeker(id: &str, full_name: &str) -> JobSeekerProfile {
    JobSeekerProfile {
        id: JobSeekerId(id.to_string()),
        user: UserAccount {
            full_name: full_name.to_string(),
            email: format!("{id}@example.com"),
        },
    }
}

pub(super) fn submission(job_id: &str, seeker: JobSeekerProfile) -> ApplicationSubmission {
    ApplicationSubmission {
        job_id: JobId(job_id.to_string()),
        job_seeker: seeker,
        cover_letter: "I have shipped production software for five years.".to_string(),
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryJobs {
    pub(super) jobs: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

impl MemoryJobs {
    pub(super) fn with(jobs: Vec<JobPosting>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.jobs.lock().expect("jobs mutex poisoned");
            for job in jobs {
                guard.insert(job.id.clone(), job);
            }
        }
        store
    }
}

impl JobRepository for MemoryJobs {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.jobs.lock().expect("jobs mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("jobs mutex poisoned");
        guard.insert(job.id.clone(), job);
        Ok(())
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn query(&self, spec: &QuerySpec) -> Result<(Vec<JobPosting>, u64), RepositoryError> {
        let guard = self.jobs.lock().expect("jobs mutex poisoned");
        Ok(memory::execute(guard.values().cloned(), spec))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
    pub(super) updates: Arc<Mutex<usize>>,
}

impl MemoryApplications {
    pub(super) fn update_count(&self) -> usize {
        *self.updates.lock().expect("updates mutex poisoned")
    }

    /// Shift `applied_at` so listings have a deterministic order.
    pub(super) fn backdate(&self, id: &ApplicationId, minutes: i64) {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if let Some(record) = guard.get_mut(id) {
            record.applied_at -= Duration::minutes(minutes);
        }
    }
}

impl ApplicationRepository for MemoryApplications {
    fn insert(&self, record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id)
            || guard.values().any(|existing| same_applicant(existing, &record))
        {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(
        &self,
        record: ApplicationRecord,
        expected: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        let current = guard
            .get(&record.id)
            .map(ApplicationRecord::status)
            .ok_or(RepositoryError::NotFound)?;
        if current != expected {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record);
        *self.updates.lock().expect("updates mutex poisoned") += 1;
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn query(
        &self,
        spec: &QuerySpec,
    ) -> Result<(Vec<ApplicationRecord>, u64), RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(memory::execute(guard.values().cloned(), spec))
    }
}

pub(super) struct UnavailableRepository;

impl ApplicationRepository for UnavailableRepository {
    fn insert(&self, _record: ApplicationRecord) -> Result<ApplicationRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(
        &self,
        _record: ApplicationRecord,
        _expected: ApplicationStatus,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<ApplicationRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn query(
        &self,
        _spec: &QuerySpec,
    ) -> Result<(Vec<ApplicationRecord>, u64), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn moderation() -> Arc<ForbiddenWords> {
    Arc::new(
        ForbiddenWords::load(StaticWordSource::new(["scam"])).expect("static word list loads"),
    )
}

pub(super) fn default_jobs() -> Vec<JobPosting> {
    vec![
        job("job-rust", "Rust Engineer", employer(), true),
        job("job-go", "Go Developer", employer(), true),
        job("job-ops", "Site Reliability Engineer", other_employer(), true),
        job("job-closed", "Archived Role", employer(), false),
    ]
}

pub(super) fn build_service() -> (
    ApplicationService<MemoryApplications, MemoryJobs>,
    Arc<MemoryApplications>,
    Arc<MemoryJobs>,
) {
    let repository = Arc::new(MemoryApplications::default());
    let jobs = Arc::new(MemoryJobs::with(default_jobs()));
    let service = ApplicationService::new(repository.clone(), jobs.clone(), moderation());
    (service, repository, jobs)
}

/// Submit and walk an application to `path`'s last status.
pub(super) fn submitted_through(
    service: &ApplicationService<MemoryApplications, MemoryJobs>,
    seeker: JobSeekerProfile,
    path: &[ApplicationStatus],
) -> ApplicationRecord {
    let mut record = service
        .submit(submission("job-rust", seeker))
        .expect("submission succeeds");
    for status in path {
        record = service
            .update_status(&record.id, &employer(), *status)
            .expect("transition along the allowed path");
    }
    record
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn application_router_with_service(
    service: ApplicationService<MemoryApplications, MemoryJobs>,
) -> axum::Router {
    application_router(Arc::new(service))
}
