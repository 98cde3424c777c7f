use axum::extract::{Path, State};

use crate::calendar::CalendarMonth;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /api/calendar/:year/:month - Sunday-first month grid with events
pub async fn get(
    State(state): State<AppState>,
    Path((year, month)): Path<(String, String)>,
) -> ApiResult<CalendarMonth> {
    let year: i32 = year
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid year '{}'", year)))?;
    let month: u32 = month
        .parse()
        .map_err(|_| ApiError::bad_request(format!("invalid month '{}'", month)))?;

    let calendar = state.gatherings().calendar(year, month).await?;
    Ok(ApiResponse::success(calendar))
}
