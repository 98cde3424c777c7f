mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{json_of, TestServer, ADMIN_PASSWORD, ADMIN_USERNAME};

#[tokio::test]
async fn login_returns_a_token() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = json_of(
        server
            .post("/auth/login")
            .json(&json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["username"], ADMIN_USERNAME);
    assert_eq!(body["data"]["expiresIn"], 3600);
    assert!(body["data"]["token"].as_str().map(|t| t.split('.').count() == 3).unwrap_or(false));
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = json_of(
        server
            .post("/auth/login")
            .json(&json!({ "username": ADMIN_USERNAME, "password": "guess" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn whoami_echoes_the_admin() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.admin_token().await?;

    let (status, body) = json_of(
        server
            .get("/api/admin/whoami")
            .bearer_auth(&token)
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], ADMIN_USERNAME);
    assert_eq!(body["data"]["role"], "admin");
    Ok(())
}

#[tokio::test]
async fn admin_routes_reject_missing_or_forged_tokens() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, _) = json_of(
        server
            .post("/api/admin/links")
            .json(&json!({ "name": "x", "redirectUrl": "https://x.example" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = json_of(
        server
            .delete("/api/admin/events/1")
            .bearer_auth("not.a.token")
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // nothing was deleted
    let (status, _) = json_of(server.get("/api/events/1").send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}
