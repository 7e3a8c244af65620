use axum::{extract::State, http::StatusCode};

use super::AppState;

pub async fn health() -> &'static str {
    "OK"
}

pub async fn ready(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").execute(&state.db).await {
        Ok(_) => StatusCode::OK,
        Err(error) => {
            tracing::error!("readiness check failed: {error}");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
