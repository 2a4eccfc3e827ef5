use crate::infra::{deserialize_optional_date, AppState};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use church_companion::error::AppError;
use church_companion::planning::export::{exporter_for, rsvp_csv_template, ExportFormat};
use church_companion::planning::funnel::{self, FunnelHealthScore};
use church_companion::planning::{FunnelCounts, PlanRequest, PlanningOutcome};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct PlanEndpointRequest {
    #[serde(flatten)]
    pub(crate) request: PlanRequest,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DocumentExportRequest {
    pub(crate) church_name: String,
    pub(crate) plan_text: String,
    #[serde(default = "default_export_format")]
    pub(crate) format: ExportFormat,
}

fn default_export_format() -> ExportFormat {
    ExportFormat::Docx
}

pub(crate) fn planning_routes() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/plan", post(plan_endpoint))
        .route("/api/v1/funnel/score", post(funnel_score_endpoint))
        .route("/api/v1/export/rsvp-template", get(rsvp_template_endpoint))
        .route("/api/v1/export/document", post(document_export_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn plan_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<PlanEndpointRequest>,
) -> Result<Json<PlanningOutcome>, AppError> {
    let PlanEndpointRequest { request, today } = payload;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = state.session.generate(request, today).await?;
    Ok(Json(outcome))
}

/// Recomputed on every panel edit, independent of plan generation.
pub(crate) async fn funnel_score_endpoint(
    Json(counts): Json<FunnelCounts>,
) -> Json<FunnelHealthScore> {
    Json(funnel::score(&counts))
}

pub(crate) async fn rsvp_template_endpoint() -> Result<Response, AppError> {
    let template = rsvp_csv_template()?;
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"rsvp_checkin_template.csv\"",
            ),
        ],
        template,
    )
        .into_response())
}

pub(crate) async fn document_export_endpoint(
    Json(payload): Json<DocumentExportRequest>,
) -> Result<Response, AppError> {
    let DocumentExportRequest {
        church_name,
        plan_text,
        format,
    } = payload;

    let document = exporter_for(format).export(&plan_text, &church_name)?;
    let guessed = mime_guess::from_path(&document.file_name).first_or_octet_stream();
    let content_type = if guessed.essence_str() == document.content_type.essence_str() {
        document.content_type.to_string()
    } else {
        guessed.to_string()
    };
    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        document.file_name.replace('"', "")
    ))
    .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    let mut response = (StatusCode::OK, document.bytes).into_response();
    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&content_type) {
        headers.insert(header::CONTENT_TYPE, value);
    }
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    Ok(response)
}
