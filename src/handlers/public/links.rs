use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Link;
use crate::state::AppState;

/// GET /api/links - link directory, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Link>> {
    let links = state.links().list().await?;
    Ok(ApiResponse::success(links))
}
