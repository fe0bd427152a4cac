//! Job applications: submission, the status workflow and the employer and
//! job seeker listings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;

#[cfg(test)]
mod tests;

pub use domain::{
    ApplicationId, ApplicationRecord, ApplicationSubmission, JobSeekerId, JobSeekerProfile,
    JobSummary, UserAccount,
};
pub use repository::{same_applicant, ApplicationRepository};
pub use router::{application_router, StatusUpdateRequest};
pub use service::{ApplicationService, ApplicationServiceError};
pub use status::{ApplicationStatus, InvalidTransition, StatusWorkflow};
