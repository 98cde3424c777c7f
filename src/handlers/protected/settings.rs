use axum::extract::{rejection::JsonRejection, State};
use axum::Json;

use crate::error::ApiError;
use crate::handlers::body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Settings;
use crate::state::AppState;

/// PUT /api/admin/settings - replace the banner year and theme
pub async fn put(
    State(state): State<AppState>,
    payload: Result<Json<Settings>, JsonRejection>,
) -> ApiResult<Settings> {
    let settings = body(payload)?;
    settings.validate().map_err(ApiError::invalid_fields)?;

    let saved = state.store.save_settings(settings).await?;
    tracing::info!("Settings updated: {} '{}'", saved.year, saved.theme);
    Ok(ApiResponse::success(saved))
}
