use crate::config::ConfigError;
use crate::moderation::ModerationError;
use crate::telemetry::TelemetryError;
use crate::workflows::applications::ApplicationServiceError;
use crate::workflows::jobs::JobServiceError;
use crate::workflows::RepositoryError;
use axum::extract::rejection::QueryRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Moderation(ModerationError),
    Io(std::io::Error),
    Server(axum::Error),
    Jobs(JobServiceError),
    Applications(ApplicationServiceError),
    InvalidQuery(QueryRejection),
    MissingActor,
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Moderation(err) => write!(f, "moderation error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Jobs(err) => write!(f, "{}", err),
            AppError::Applications(err) => write!(f, "{}", err),
            AppError::InvalidQuery(err) => write!(f, "invalid query string: {}", err.body_text()),
            AppError::MissingActor => write!(f, "missing authenticated employer"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Moderation(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Jobs(err) => Some(err),
            AppError::Applications(err) => Some(err),
            AppError::InvalidQuery(err) => Some(err),
            AppError::MissingActor => None,
        }
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Jobs(err) => match err {
                JobServiceError::InvalidParams(_) => StatusCode::BAD_REQUEST,
                JobServiceError::NotOwner { .. } => StatusCode::FORBIDDEN,
                JobServiceError::Moderation(ModerationError::ForbiddenWord(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                JobServiceError::Repository(err) => repository_status(err),
                JobServiceError::Moderation(ModerationError::Source(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::Applications(err) => match err {
                ApplicationServiceError::Transition(_)
                | ApplicationServiceError::InvalidParams(_) => StatusCode::BAD_REQUEST,
                ApplicationServiceError::NotOwner { .. } => StatusCode::FORBIDDEN,
                ApplicationServiceError::JobNotFound(_) => StatusCode::NOT_FOUND,
                ApplicationServiceError::AlreadyApplied { .. }
                | ApplicationServiceError::JobClosed(_) => StatusCode::CONFLICT,
                ApplicationServiceError::Moderation(ModerationError::ForbiddenWord(_)) => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ApplicationServiceError::Repository(err) => repository_status(err),
                ApplicationServiceError::Moderation(ModerationError::Source(_)) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AppError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            AppError::MissingActor => StatusCode::UNAUTHORIZED,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Moderation(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn repository_status(err: &RepositoryError) -> StatusCode {
    match err {
        RepositoryError::NotFound => StatusCode::NOT_FOUND,
        RepositoryError::Conflict => StatusCode::CONFLICT,
        RepositoryError::Unavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<ModerationError> for AppError {
    fn from(value: ModerationError) -> Self {
        Self::Moderation(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<JobServiceError> for AppError {
    fn from(value: JobServiceError) -> Self {
        Self::Jobs(value)
    }
}

impl From<ApplicationServiceError> for AppError {
    fn from(value: ApplicationServiceError) -> Self {
        Self::Applications(value)
    }
}

impl From<QueryRejection> for AppError {
    fn from(value: QueryRejection) -> Self {
        Self::InvalidQuery(value)
    }
}
