use crate::api::api_error::APIError;
use crate::api::model::{ChallengeRequest, ChallengeResult, Discovery};
use crate::api::server::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_extra::extract::WithRejection;
use serde_json::json;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub(super) fn new(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(health_check))
        .route("/", get(discovery))
        .route("/present", post(present))
        .route("/cleanup", post(cleanup))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(state.config.api_timeout))
        .with_state(state)
}

#[allow(clippy::unused_async)]
async fn health_check() -> impl IntoResponse {
    Json(json!({"ok":"healthy"}))
}

#[allow(clippy::unused_async)]
async fn discovery(State(state): State<AppState>) -> impl IntoResponse {
    Json(Discovery {
        group: state.group_name.clone(),
        solvers: vec![state.solver.name().to_string()],
    })
}

async fn present(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ChallengeRequest>, APIError>,
) -> Result<Json<ChallengeResult>, APIError> {
    tracing::info!(
        "present for \"{}\" in zone \"{}\"",
        payload.resolved_fqdn,
        payload.resolved_zone
    );
    state.solver.present(&payload).await?;
    Ok(Json(ChallengeResult {
        solver: state.solver.name().to_string(),
    }))
}

async fn cleanup(
    State(state): State<AppState>,
    WithRejection(Json(payload), _): WithRejection<Json<ChallengeRequest>, APIError>,
) -> Result<Json<ChallengeResult>, APIError> {
    tracing::info!(
        "cleanup for \"{}\" in zone \"{}\"",
        payload.resolved_fqdn,
        payload.resolved_zone
    );
    state.solver.cleanup(&payload).await?;
    Ok(Json(ChallengeResult {
        solver: state.solver.name().to_string(),
    }))
}
