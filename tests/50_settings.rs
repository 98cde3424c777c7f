mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{json_of, TestServer};

#[tokio::test]
async fn defaults_until_saved() -> Result<()> {
    let server = TestServer::start().await?;

    let (status, body) = json_of(server.get("/api/settings").send().await?).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["year"], 2026);
    assert_eq!(body["data"]["theme"], "Year of the Spirit");
    Ok(())
}

#[tokio::test]
async fn admin_replaces_settings() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.admin_token().await?;

    let (status, saved) = json_of(
        server
            .put("/api/admin/settings")
            .bearer_auth(&token)
            .json(&json!({ "year": 2027, "theme": "Year of Glory" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(saved["data"]["theme"], "Year of Glory");

    let (_, body) = json_of(server.get("/api/settings").send().await?).await?;
    assert_eq!(body["data"]["year"], 2027);
    assert_eq!(body["data"]["theme"], "Year of Glory");
    Ok(())
}

#[tokio::test]
async fn blank_theme_is_rejected() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.admin_token().await?;

    let (status, body) = json_of(
        server
            .put("/api/admin/settings")
            .bearer_auth(&token)
            .json(&json!({ "year": 2027, "theme": "" }))
            .send()
            .await?,
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["field_errors"]["theme"].is_string());
    Ok(())
}

#[tokio::test]
async fn init_db_is_idempotent() -> Result<()> {
    let server = TestServer::start().await?;
    let token = server.admin_token().await?;

    for _ in 0..2 {
        let (status, body) = json_of(
            server
                .post("/api/admin/init-db")
                .bearer_auth(&token)
                .send()
                .await?,
        )
        .await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["initialized"], true);
    }

    let (_, body) = json_of(server.get("/api/settings").send().await?).await?;
    assert_eq!(body["data"]["theme"], "Year of the Spirit");
    Ok(())
}
