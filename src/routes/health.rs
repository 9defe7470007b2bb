use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::{database, error::{AppError, Result}, AppState};

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "ok" })))
}

pub async fn readiness_check(State(state): State<AppState>) -> Result<impl IntoResponse> {
    database::check_health(&state.db).await?;

    if !tokio::fs::try_exists(state.images.root()).await? {
        return Err(AppError::InternalError(format!(
            "Image directory {} is missing",
            state.images.root().display()
        )));
    }

    Ok((
        StatusCode::OK,
        Json(json!({
            "status": "ready",
            "database": "connected",
            "images": "present"
        })),
    ))
}
