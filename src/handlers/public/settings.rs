use axum::extract::State;

use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Settings;
use crate::state::AppState;

/// GET /api/settings - year and theme banner
pub async fn get(State(state): State<AppState>) -> ApiResult<Settings> {
    let settings = state.store.get_settings().await?;
    Ok(ApiResponse::success(settings))
}
