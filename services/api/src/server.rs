use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryApplicationRepository, InMemoryJobRepository};
use crate::routes::app_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use jobboard::config::AppConfig;
use jobboard::error::AppError;
use jobboard::moderation::{ForbiddenWords, StaticWordSource};
use jobboard::telemetry;
use jobboard::workflows::applications::ApplicationService;
use jobboard::workflows::jobs::JobService;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let moderation = Arc::new(ForbiddenWords::load(StaticWordSource::new(
        config.moderation.forbidden_words.clone(),
    ))?);
    let jobs = Arc::new(InMemoryJobRepository::default());
    let job_service = Arc::new(JobService::new(jobs.clone(), moderation.clone()));
    let application_service = Arc::new(ApplicationService::new(
        Arc::new(InMemoryApplicationRepository::default()),
        jobs,
        moderation,
    ));

    let app = app_routes(job_service, application_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "job board api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
