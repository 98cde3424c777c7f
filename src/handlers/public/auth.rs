use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::auth::{check_credentials, generate_jwt, Claims};
use crate::error::ApiError;
use crate::handlers::body;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    /// Seconds until the token expires
    pub expires_in: u64,
}

/// POST /auth/login - exchange the admin credentials for a JWT
///
/// ```json
/// { "username": "UbertAngel", "password": "..." }
/// ```
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let request = body(payload)?;
    let security = &state.security;

    if !check_credentials(security, &request.username, &request.password) {
        tracing::warn!("Failed admin login for '{}'", request.username);
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let claims = Claims::admin(&request.username, security.jwt_expiry_hours);
    let token = generate_jwt(&claims, &security.jwt_secret).map_err(|e| {
        tracing::error!("Could not issue admin token: {}", e);
        ApiError::internal_server_error("Could not issue token")
    })?;

    tracing::info!("Admin '{}' logged in", request.username);

    Ok(ApiResponse::success(LoginResponse {
        token,
        expires_in: claims.lifetime_secs(),
        username: request.username,
    }))
}
