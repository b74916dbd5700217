//! Readiness endpoint

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use axum_helpers::{HealthCheckFuture, run_health_checks};
use serde_json::Value;

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(readiness_check))
        .with_state(state)
}

/// 200 when MongoDB answers, 503 otherwise
async fn readiness_check(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)> {
    let client = state.mongo_client.clone();
    let probe: HealthCheckFuture = Box::pin(async move {
        if database::mongodb::check_health(&client).await {
            Ok(())
        } else {
            Err("MongoDB did not answer".to_string())
        }
    });

    run_health_checks(vec![("mongodb", probe)]).await
}
