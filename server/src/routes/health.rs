use axum::Json;
use axum::extract::State;

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> Json<serde_json::Value> {
    let observability = state.observability.snapshot();
    Json(serde_json::json!({
        "status": "ok",
        "upstream_configured": state.air_upstream.is_some(),
        "air_requests_total": observability.air_requests_total,
        "air_rejected_total": observability.air_rejected_total,
        "air_upstream_errors_total": observability.air_upstream_errors_total,
    }))
}
