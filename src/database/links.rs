use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{Link, LinkPatch, NewLink};
use crate::store::{new_id, now_millis, StoreError, StoreResult};

const COLUMNS: &str = "id, name, description, icon_url, redirect_url, created_at";

#[derive(Debug, FromRow)]
struct LinkRow {
    id: String,
    name: String,
    description: Option<String>,
    icon_url: Option<String>,
    redirect_url: Option<String>,
    created_at: i64,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link {
            id: row.id,
            name: row.name,
            description: row.description.unwrap_or_default(),
            icon_url: row.icon_url.unwrap_or_default(),
            redirect_url: row.redirect_url.unwrap_or_default(),
            created_at: row.created_at,
        }
    }
}

pub async fn list(pool: &PgPool) -> StoreResult<Vec<Link>> {
    let sql = format!("SELECT {} FROM links ORDER BY created_at DESC", COLUMNS);
    let rows = sqlx::query_as::<_, LinkRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Link::from).collect())
}

async fn find(pool: &PgPool, id: &str) -> StoreResult<Option<Link>> {
    let sql = format!("SELECT {} FROM links WHERE id = $1", COLUMNS);
    let row = sqlx::query_as::<_, LinkRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Link::from))
}

pub async fn create(pool: &PgPool, link: NewLink) -> StoreResult<Link> {
    let link = link.into_link(new_id(), now_millis());
    sqlx::query(
        "INSERT INTO links (id, name, description, icon_url, redirect_url, created_at) VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&link.id)
    .bind(&link.name)
    .bind(&link.description)
    .bind(&link.icon_url)
    .bind(&link.redirect_url)
    .bind(link.created_at)
    .execute(pool)
    .await?;
    Ok(link)
}

fn update_query(id: &str, patch: LinkPatch) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE links SET ");
    {
        let mut set = qb.separated(", ");
        if let Some(v) = patch.name {
            set.push("name = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.description {
            set.push("description = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.icon_url {
            set.push("icon_url = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.redirect_url {
            set.push("redirect_url = ").push_bind_unseparated(v);
        }
    }
    qb.push(" WHERE id = ")
        .push_bind(id.to_string())
        .push(" RETURNING ")
        .push(COLUMNS);
    Some(qb)
}

pub async fn update(pool: &PgPool, id: &str, patch: LinkPatch) -> StoreResult<Link> {
    let Some(mut qb) = update_query(id, patch) else {
        return find(pool, id).await?.ok_or_else(|| StoreError::link_not_found(id));
    };

    let row = qb.build_query_as::<LinkRow>().fetch_optional(pool).await?;
    row.map(Link::from).ok_or_else(|| StoreError::link_not_found(id))
}

pub async fn delete(pool: &PgPool, id: &str) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM links WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::link_not_found(id));
    }
    Ok(())
}
