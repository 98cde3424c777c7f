use sqlx::PgPool;
use tracing::info;

use crate::models::Settings;
use crate::store::StoreResult;

const CREATE_LINKS: &str = r#"
    CREATE TABLE IF NOT EXISTS links (
        id VARCHAR(255) PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        description TEXT,
        icon_url TEXT,
        redirect_url VARCHAR(500),
        created_at BIGINT NOT NULL
    )
"#;

const CREATE_EVENTS: &str = r#"
    CREATE TABLE IF NOT EXISTS events (
        id VARCHAR(255) PRIMARY KEY,
        title VARCHAR(255) NOT NULL,
        description TEXT,
        banner_url TEXT,
        event_date DATE NOT NULL,
        event_time TIME NOT NULL,
        deadline_date DATE,
        status VARCHAR(20) NOT NULL,
        attendees INTEGER DEFAULT 0,
        created_at BIGINT NOT NULL
    )
"#;

const CREATE_SETTINGS: &str = r#"
    CREATE TABLE IF NOT EXISTS settings (
        id SERIAL PRIMARY KEY,
        year INTEGER NOT NULL,
        theme VARCHAR(255) NOT NULL
    )
"#;

/// Idempotent: safe to run on every start
pub async fn initialize(pool: &PgPool) -> StoreResult<()> {
    for ddl in [CREATE_LINKS, CREATE_EVENTS, CREATE_SETTINGS] {
        sqlx::query(ddl).execute(pool).await?;
    }

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM settings")
        .fetch_one(pool)
        .await?;
    if count == 0 {
        let defaults = Settings::default();
        sqlx::query("INSERT INTO settings (id, year, theme) VALUES (1, $1, $2) ON CONFLICT (id) DO NOTHING")
            .bind(defaults.year)
            .bind(&defaults.theme)
            .execute(pool)
            .await?;
    }

    info!("Database tables initialized");
    Ok(())
}
