use jobboard::query::{memory, QuerySpec};
use jobboard::workflows::applications::{
    same_applicant, ApplicationId, ApplicationRecord, ApplicationRepository, ApplicationStatus,
};
use jobboard::workflows::jobs::{JobId, JobPosting, JobRepository};
use jobboard::workflows::RepositoryError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryJobRepository {
    jobs: Arc<Mutex<HashMap<JobId, JobPosting>>>,
}

impl JobRepository for InMemoryJobRepository {
    fn insert(&self, job: JobPosting) -> Result<JobPosting, RepositoryError> {
        let mut guard = self.jobs.lock().expect("job repository mutex poisoned");
        if guard.contains_key(&job.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(job.id.clone(), job.clone());
        Ok(job)
    }

    fn update(&self, job: JobPosting) -> Result<(), RepositoryError> {
        let mut guard = self.jobs.lock().expect("job repository mutex poisoned");
        if guard.contains_key(&job.id) {
            guard.insert(job.id.clone(), job);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &JobId) -> Result<Option<JobPosting>, RepositoryError> {
        let guard = self.jobs.lock().expect("job repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn query(&self, spec: &QuerySpec) -> Result<(Vec<JobPosting>, u64), RepositoryError> {
        let guard = self.jobs.lock().expect("job repository mutex poisoned");
        Ok(memory::execute(guard.values().cloned(), spec))
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, ApplicationRecord>>>,
}

impl ApplicationRepository for InMemoryApplicationRepository {
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
