use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::query::{FieldValue, Queryable};
use crate::workflows::jobs::{EmployerId, JobId, JobPosting};

use super::status::{ApplicationStatus, InvalidTransition, StatusWorkflow};

/// Identifier wrapper for submitted applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobSeekerId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for JobSeekerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub full_name: String,
    pub email: String,
}

/// Applicant identity as resolved by the authentication layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSeekerProfile {
    pub id: JobSeekerId,
    pub user: UserAccount,
}

/// Slice of the job posting copied onto each application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSummary {
    pub id: JobId,
    pub title: String,
    pub employer_id: EmployerId,
}

impl From<&JobPosting> for JobSummary {
    fn from(job: &JobPosting) -> Self {
        Self {
            id: job.id.clone(),
            title: job.title.clone(),
            employer_id: job.employer_id.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationSubmission {
    pub job_id: JobId,
    pub job_seeker: JobSeekerProfile,
    pub cover_letter: String,
}

/// Stored application. The status only moves through [`ApplicationRecord::advance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationRecord {
    pub id: ApplicationId,
    pub cover_letter: String,
    pub applied_at: DateTime<Utc>,
    status: ApplicationStatus,
    pub job: JobSummary,
    pub job_seeker: JobSeekerProfile,
}

impl ApplicationRecord {
    /// New applications always start out pending.
    pub fn new(
        id: ApplicationId,
        job: JobSummary,
        job_seeker: JobSeekerProfile,
        cover_letter: String,
        applied_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            cover_letter,
            applied_at,
            status: ApplicationStatus::Pending,
            job,
            job_seeker,
        }
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn advance(&mut self, requested: ApplicationStatus) -> Result<(), InvalidTransition> {
        StatusWorkflow::apply(&mut self.status, requested)
    }
}

impl Queryable for ApplicationRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.0.as_str().into()),
            "cover_letter" => Some(self.cover_letter.as_str().into()),
            "applied_at" => Some(self.applied_at.into()),
            "status" => Some(self.status.label().into()),
            _ => None,
        }
    }

    fn related(&self, relation: &str) -> Option<&dyn Queryable> {
        match relation {
            "job" => Some(&self.job),
            "job_seeker" => Some(&self.job_seeker),
            _ => None,
        }
    }
}

impl Queryable for JobSummary {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.0.as_str().into()),
            "title" => Some(self.title.as_str().into()),
            "employer_id" => Some(self.employer_id.0.as_str().into()),
            _ => None,
        }
    }
}

impl Queryable for JobSeekerProfile {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(self.id.0.as_str().into()),
            _ => None,
        }
    }

    fn related(&self, relation: &str) -> Option<&dyn Queryable> {
        match relation {
            "user" => Some(&self.user),
            _ => None,
        }
    }
}

impl Queryable for UserAccount {
    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "full_name" => Some(self.full_name.as_str().into()),
            "email" => Some(self.email.as_str().into()),
            _ => None,
        }
    }
}
