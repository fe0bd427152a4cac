use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};
use serde::Deserialize;

use crate::error::AppError;
use crate::query::{ListParams, Paginated};
use crate::workflows::jobs::router::employer_from_headers;
use crate::workflows::jobs::{EmployerId, JobRepository};

use super::domain::{ApplicationId, ApplicationRecord, ApplicationSubmission, JobSeekerId};
use super::repository::ApplicationRepository;
use super::service::ApplicationService;
use super::status::ApplicationStatus;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: ApplicationStatus,
}

/// Router builder exposing HTTP endpoints for submission, review and listings.
pub fn application_router<R, J>(service: Arc<ApplicationService<R, J>>) -> Router
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    Router::new()
        .route("/api/v1/applications", post(submit_handler::<R, J>))
        .route(
            "/api/v1/applications/:application_id",
            get(get_handler::<R, J>),
        )
        .route(
            "/api/v1/applications/:application_id/status",
            patch(status_handler::<R, J>),
        )
        .route(
            "/api/v1/employers/:employer_id/applications",
            get(employer_list_handler::<R, J>),
        )
        .route(
            "/api/v1/job-seekers/:job_seeker_id/applications",
            get(job_seeker_list_handler::<R, J>),
        )
        .with_state(service)
}

pub(crate) async fn submit_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Json(submission): Json<ApplicationSubmission>,
) -> Result<impl IntoResponse, AppError>
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let record = service.submit(submission)?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub(crate) async fn get_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Path(application_id): Path<String>,
) -> Result<Json<ApplicationRecord>, AppError>
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    Ok(Json(service.get(&ApplicationId(application_id))?))
}

pub(crate) async fn status_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    headers: HeaderMap,
    Path(application_id): Path<String>,
    Json(request): Json<StatusUpdateRequest>,
) -> Result<Json<ApplicationRecord>, AppError>
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let actor = employer_from_headers(&headers)?;
    let record =
        service.update_status(&ApplicationId(application_id), &actor, request.status)?;
    Ok(Json(record))
}

pub(crate) async fn employer_list_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Path(employer_id): Path<String>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<ApplicationRecord>>, AppError>
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let Query(params) = query?;
    Ok(Json(
        service.list_for_employer(&EmployerId(employer_id), &params)?,
    ))
}

pub(crate) async fn job_seeker_list_handler<R, J>(
    State(service): State<Arc<ApplicationService<R, J>>>,
    Path(job_seeker_id): Path<String>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<ApplicationRecord>>, AppError>
where
    R: ApplicationRepository + 'static,
    J: JobRepository + 'static,
{
    let Query(params) = query?;
    Ok(Json(
        service.list_for_job_seeker(&JobSeekerId(job_seeker_id), &params)?,
    ))
}
