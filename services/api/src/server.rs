use crate::cli::ServeArgs;
use crate::infra::{build_session, AppState};
use crate::routes::planning_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use church_companion::config::AppConfig;
use church_companion::error::AppError;
use church_companion::telemetry;
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
    let session = build_session(&config.census, config.features)?;
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        session: Arc::new(session),
    };

    let app = planning_routes()
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        zip_footprint = config.features.zip_footprint,
        "church companion planner ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
