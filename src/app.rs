use axum::{
    extract::State,
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full router: public site, admin dashboard, CORS and request tracing
pub fn app(state: AppState) -> Router {
    let cors = cors_layer(&state.security);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(public_routes())
        .merge(admin_routes(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(public::auth_login))
        .route("/api/links", get(public::links_list))
        .route("/api/events", get(public::events_list))
        .route("/api/events/:id", get(public::event_get))
        .route("/api/events/:id/attend", post(public::event_attend))
        .route("/api/calendar/:year/:month", get(public::calendar_get))
        .route("/api/settings", get(public::settings_get))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/admin/whoami", get(protected::admin_whoami))
        .route("/api/admin/init-db", post(protected::admin_init_db))
        .route("/api/admin/links", post(protected::link_post))
        .route(
            "/api/admin/links/:id",
            put(protected::link_put).delete(protected::link_delete),
        )
        .route("/api/admin/events", post(protected::event_post))
        .route(
            "/api/admin/events/:id",
            put(protected::event_put).delete(protected::event_delete),
        )
        .route(
            "/api/admin/events/:id/toggle-status",
            post(protected::event_toggle_status),
        )
        .route("/api/admin/settings", put(protected::settings_put))
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Expolink API",
            "version": version,
            "description": "Links, gatherings and calendar for the embassy website",
            "endpoints": {
                "home": "/ (public)",
                "health": "/health (public)",
                "auth": "/auth/login (public - token acquisition)",
                "links": "/api/links (public)",
                "events": "/api/events[/:id][/attend] (public)",
                "calendar": "/api/calendar/:year/:month (public)",
                "settings": "/api/settings (public)",
                "admin": "/api/admin/* (protected - admin JWT)",
            }
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "store": "ok"
                }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "store unavailable",
                    "code": "SERVICE_UNAVAILABLE",
                    "data": {
                        "status": "degraded",
                        "timestamp": now,
                        "store_error": e.to_string()
                    }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::store::MemoryStore;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{Datelike, NaiveDate};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn security(jwt_expiry_hours: u64) -> SecurityConfig {
        SecurityConfig {
            cors_origins: vec!["*".to_string()],
            admin_username: "admin".to_string(),
            admin_password: "secret".to_string(),
            jwt_secret: "router-test".to_string(),
            jwt_expiry_hours,
        }
    }

    fn test_app_with(security: SecurityConfig) -> Router {
        let state = AppState::new(
            Arc::new(MemoryStore::with_demo_data()),
            Arc::new(FixedClock(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap())),
            security,
        );
        app(state)
    }

    fn test_app() -> Router {
        test_app_with(security(1))
    }

    fn login_request() -> Request<Body> {
        Request::post("/auth/login")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"username":"admin","password":"secret"}"#))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn public_events_are_derived() {
        let response = test_app()
            .oneshot(Request::get("/api/events?status=active").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        let events = body["data"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["id"], "1");
        assert_eq!(events[0]["status"], "active");
    }

    #[tokio::test]
    async fn admin_routes_require_a_token() {
        let response = test_app()
            .oneshot(
                Request::post("/api/admin/events/1/toggle-status")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(json_body(response).await["code"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn login_then_whoami() {
        let app = test_app();
        let login = app.clone().oneshot(login_request()).await.unwrap();
        assert_eq!(login.status(), StatusCode::OK);
        let token = json_body(login).await["data"]["token"].as_str().unwrap().to_string();

        let whoami = app
            .oneshot(
                Request::get("/api/admin/whoami")
                    .header("authorization", format!("Bearer {}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(whoami.status(), StatusCode::OK);
        assert_eq!(json_body(whoami).await["data"]["username"], "admin");
    }

    #[tokio::test]
    async fn bad_calendar_month_is_400() {
        let response = test_app()
            .oneshot(Request::get("/api/calendar/2026/13").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn oversized_token_lifetime_is_capped() {
        let response = test_app_with(security(u64::MAX)).oneshot(login_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(
            body["data"]["expiresIn"],
            crate::auth::MAX_TOKEN_HOURS * 3600
        );
    }

    #[tokio::test]
    async fn last_representable_month_renders() {
        let uri = format!("/api/calendar/{}/12", NaiveDate::MAX.year());
        let response = test_app()
            .oneshot(Request::get(uri.as_str()).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert!(body["data"]["next"].is_null());
        assert_eq!(body["data"]["previous"]["month"], 11);
    }
}
