use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use serde::Serialize;

use crate::auth::{validate_jwt, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated admin extracted from the bearer token
#[derive(Clone, Debug, Serialize)]
pub struct AdminUser {
    pub username: String,
    pub role: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: i64,
}

impl From<Claims> for AdminUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            role: claims.role,
            expires_at: claims.exp,
        }
    }
}

/// Rejects the request unless it carries a valid admin JWT
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let claims = validate_jwt(&token, &state.security.jwt_secret).map_err(|e| {
        tracing::debug!("Rejected admin token: {}", e);
        ApiError::unauthorized(e.to_string())
    })?;

    if !claims.is_admin() {
        return Err(ApiError::unauthorized("Admin role required"));
    }

    request.extensions_mut().insert(AdminUser::from(claims));

    Ok(next.run(request).await)
}

fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.trim().to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_jwt_from_headers(&headers("Bearer abc")).unwrap(), "abc");
    }

    #[test]
    fn other_schemes_are_rejected() {
        assert!(extract_jwt_from_headers(&headers("Basic abc")).is_err());
        assert!(extract_jwt_from_headers(&headers("Bearer  ")).is_err());
        assert!(extract_jwt_from_headers(&HeaderMap::new()).is_err());
    }
}
