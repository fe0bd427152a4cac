use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::error::AppError;
use crate::query::{ListParams, Paginated};

use super::domain::{EmployerId, JobDraft, JobId, JobPosting};
use super::repository::JobRepository;
use super::service::JobService;

/// Header carrying the employer id resolved by the upstream auth layer.
pub const EMPLOYER_HEADER: &str = "x-employer-id";

pub(crate) fn employer_from_headers(headers: &HeaderMap) -> Result<EmployerId, AppError> {
    headers
        .get(EMPLOYER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| EmployerId(value.to_string()))
        .ok_or(AppError::MissingActor)
}

/// Router builder exposing job posting endpoints.
pub fn job_router<J>(service: Arc<JobService<J>>) -> Router
where
    J: JobRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/jobs",
            post(create_handler::<J>).get(list_handler::<J>),
        )
        .route("/api/v1/jobs/:job_id", get(get_handler::<J>))
        .route("/api/v1/jobs/:job_id/close", post(close_handler::<J>))
        .route(
            "/api/v1/employers/:employer_id/jobs",
            get(employer_jobs_handler::<J>),
        )
        .with_state(service)
}

pub(crate) async fn create_handler<J>(
    State(service): State<Arc<JobService<J>>>,
    headers: HeaderMap,
    Json(draft): Json<JobDraft>,
) -> Result<impl IntoResponse, AppError>
where
    J: JobRepository + 'static,
{
    let employer = employer_from_headers(&headers)?;
    let job = service.create(employer, draft)?;
    Ok((StatusCode::CREATED, Json(job)))
}

pub(crate) async fn list_handler<J>(
    State(service): State<Arc<JobService<J>>>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<JobPosting>>, AppError>
where
    J: JobRepository + 'static,
{
    let Query(params) = query?;
    Ok(Json(service.list_active(&params)?))
}

pub(crate) async fn get_handler<J>(
    State(service): State<Arc<JobService<J>>>,
    Path(job_id): Path<String>,
) -> Result<Json<JobPosting>, AppError>
where
    J: JobRepository + 'static,
{
    Ok(Json(service.get(&JobId(job_id))?))
}

pub(crate) async fn close_handler<J>(
    State(service): State<Arc<JobService<J>>>,
    headers: HeaderMap,
    Path(job_id): Path<String>,
) -> Result<Json<JobPosting>, AppError>
where
    J: JobRepository + 'static,
{
    let employer = employer_from_headers(&headers)?;
    Ok(Json(service.close(&JobId(job_id), &employer)?))
}

pub(crate) async fn employer_jobs_handler<J>(
    State(service): State<Arc<JobService<J>>>,
    Path(employer_id): Path<String>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<Paginated<JobPosting>>, AppError>
where
    J: JobRepository + 'static,
{
    let Query(params) = query?;
    Ok(Json(
        service.list_for_employer(&EmployerId(employer_id), &params)?,
    ))
}
