use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::models::Gathering;
use crate::services::StatusFilter;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
}

impl ListQuery {
    fn filter(&self) -> Result<Option<StatusFilter>, ApiError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => raw
                .parse::<StatusFilter>()
                .map(Some)
                .map_err(|e| ApiError::bad_request(e.to_string())),
        }
    }
}

/// GET /api/events?status=active|past
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Gathering>> {
    let filter = query.filter()?;
    let gatherings = state.gatherings().list(filter).await?;
    Ok(ApiResponse::success(gatherings))
}

/// GET /api/events/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Gathering> {
    let gathering = state.gatherings().get(&id).await?;
    Ok(ApiResponse::success(gathering))
}

/// POST /api/events/:id/attend - count one RSVP
pub async fn attend(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Gathering> {
    let gathering = state.gatherings().attend(&id).await?;
    tracing::info!("RSVP for gathering {} ({} attending)", id, gathering.attendees);
    Ok(ApiResponse::success(gathering))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(status: Option<&str>) -> ListQuery {
        ListQuery { status: status.map(String::from) }
    }

    #[test]
    fn blank_or_all_means_unfiltered() {
        assert_eq!(query(None).filter().unwrap(), None);
        assert_eq!(query(Some("")).filter().unwrap(), None);
        assert_eq!(query(Some("all")).filter().unwrap(), None);
    }

    #[test]
    fn known_statuses_filter() {
        assert_eq!(query(Some("past")).filter().unwrap(), Some(StatusFilter::Past));
        assert_eq!(query(Some("active")).filter().unwrap(), Some(StatusFilter::Active));
    }

    #[test]
    fn unknown_status_is_bad_request() {
        let err = query(Some("upcoming")).filter().unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }
}
