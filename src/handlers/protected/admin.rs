use axum::extract::State;
use axum::Extension;
use serde_json::{json, Value};

use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/admin/whoami
pub async fn whoami(Extension(admin): Extension<AdminUser>) -> ApiResult<AdminUser> {
    Ok(ApiResponse::success(admin))
}

/// POST /api/admin/init-db - create missing tables and the settings row
pub async fn init_db(
    State(state): State<AppState>,
    Extension(admin): Extension<AdminUser>,
) -> ApiResult<Value> {
    state.store.initialize().await?;
    tracing::info!("Storage initialized by {}", admin.username);
    Ok(ApiResponse::success(json!({ "initialized": true })))
}
