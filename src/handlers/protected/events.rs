use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;

use crate::handlers::{body, Deleted};
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::{Gathering, GatheringPatch, NewGathering};
use crate::state::AppState;

/// POST /api/admin/events
///
/// ```json
/// { "title": "...", "date": "2026-05-01", "time": "19:00", "deadlineDate": "" }
/// ```
pub async fn post(
    State(state): State<AppState>,
    payload: Result<Json<NewGathering>, JsonRejection>,
) -> ApiResult<Gathering> {
    let gathering = state.gatherings().create(body(payload)?).await?;
    Ok(ApiResponse::created(gathering))
}

/// PUT /api/admin/events/:id
///
/// `deadlineDate: null` (or `""`) clears the deadline; leaving it out keeps it.
pub async fn put(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<GatheringPatch>, JsonRejection>,
) -> ApiResult<Gathering> {
    let gathering = state.gatherings().update(&id, body(payload)?).await?;
    Ok(ApiResponse::success(gathering))
}

/// POST /api/admin/events/:id/toggle-status
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Gathering> {
    let gathering = state.gatherings().toggle_status(&id).await?;
    Ok(ApiResponse::success(gathering))
}

/// DELETE /api/admin/events/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Deleted> {
    state.gatherings().delete(&id).await?;
    Ok(ApiResponse::success(Deleted::new(id)))
}
