//! Job postings: creation, closing and the active/employer listings.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{EmployerId, JobDraft, JobId, JobPosting};
pub use repository::JobRepository;
pub use router::{job_router, EMPLOYER_HEADER};
pub use service::{JobService, JobServiceError};
