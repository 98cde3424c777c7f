use sqlx::PgPool;

use crate::models::Settings;
use crate::store::StoreResult;

pub async fn get(pool: &PgPool) -> StoreResult<Settings> {
    let row: Option<(i32, String)> = sqlx::query_as("SELECT year, theme FROM settings ORDER BY id LIMIT 1")
        .fetch_optional(pool)
        .await?;

    Ok(row
        .map(|(year, theme)| Settings { year, theme })
        .unwrap_or_default())
}

/// Settings is a single row; id 1 is written whether or not it exists yet
pub async fn save(pool: &PgPool, settings: Settings) -> StoreResult<Settings> {
    sqlx::query(
        "INSERT INTO settings (id, year, theme) VALUES (1, $1, $2) \
         ON CONFLICT (id) DO UPDATE SET year = EXCLUDED.year, theme = EXCLUDED.theme",
    )
    .bind(settings.year)
    .bind(&settings.theme)
    .execute(pool)
    .await?;
    Ok(settings)
}
