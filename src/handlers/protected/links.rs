use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::handlers::{body, Deleted};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Link, LinkPatch, NewLink};
use crate::state::AppState;

/// POST /api/admin/links
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<NewLink>, JsonRejection>,
) -> ApiResult<Link> {
    let link = state.links().create(body(payload)?).await?;
    Ok(ApiResponse::created(link))
}

/// PUT /api/admin/links/:id - fields left out keep their value
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<LinkPatch>, JsonRejection>,
) -> ApiResult<Link> {
    let link = state.links().update(&id, body(payload)?).await?;
    Ok(ApiResponse::success(link))
}

/// DELETE /api/admin/links/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    state.links().delete(&id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
