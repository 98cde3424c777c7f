use chrono::{NaiveDate, NaiveTime};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

use crate::models::{Gathering, GatheringPatch, NewGathering};
use crate::status::EventStatus;
use crate::store::{new_id, now_millis, StoreError, StoreResult};

const COLUMNS: &str =
    "id, title, description, banner_url, event_date, event_time, deadline_date, status, attendees, created_at";

#[derive(Debug, FromRow)]
struct GatheringRow {
    id: String,
    title: String,
    description: Option<String>,
    banner_url: Option<String>,
    event_date: NaiveDate,
    event_time: NaiveTime,
    deadline_date: Option<NaiveDate>,
    status: String,
    attendees: Option<i32>,
    created_at: i64,
}

impl TryFrom<GatheringRow> for Gathering {
    type Error = StoreError;

    fn try_from(row: GatheringRow) -> Result<Self, Self::Error> {
        let status: EventStatus = row
            .status
            .parse()
            .map_err(|e| StoreError::CorruptRecord(format!("event {}: {}", row.id, e)))?;

        Ok(Gathering {
            id: row.id,
            title: row.title,
            description: row.description.unwrap_or_default(),
            banner_url: row.banner_url.unwrap_or_default(),
            date: row.event_date,
            time: row.event_time,
            deadline_date: row.deadline_date,
            status,
            attendees: row.attendees.unwrap_or(0),
            created_at: row.created_at,
        })
    }
}

pub async fn list(pool: &PgPool) -> StoreResult<Vec<Gathering>> {
    let sql = format!(
        "SELECT {} FROM events ORDER BY event_date DESC, event_time DESC",
        COLUMNS
    );
    sqlx::query_as::<_, GatheringRow>(&sql)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(Gathering::try_from)
        .collect()
}

pub async fn get(pool: &PgPool, id: &str) -> StoreResult<Option<Gathering>> {
    let sql = format!("SELECT {} FROM events WHERE id = $1", COLUMNS);
    sqlx::query_as::<_, GatheringRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Gathering::try_from)
        .transpose()
}

pub async fn create(pool: &PgPool, gathering: NewGathering) -> StoreResult<Gathering> {
    let g = gathering.into_gathering(new_id(), now_millis());
    sqlx::query(
        "INSERT INTO events (id, title, description, banner_url, event_date, event_time, deadline_date, status, attendees, created_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
    )
    .bind(&g.id)
    .bind(&g.title)
    .bind(&g.description)
    .bind(&g.banner_url)
    .bind(g.date)
    .bind(g.time)
    .bind(g.deadline_date)
    .bind(g.status.as_str())
    .bind(g.attendees)
    .bind(g.created_at)
    .execute(pool)
    .await?;
    Ok(g)
}

/// `None` when the patch sets nothing
fn update_query(id: &str, patch: GatheringPatch) -> Option<QueryBuilder<'static, Postgres>> {
    if patch.is_empty() {
        return None;
    }

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("UPDATE events SET ");
    {
        let mut set = qb.separated(", ");
        if let Some(v) = patch.title {
            set.push("title = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.description {
            set.push("description = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.banner_url {
            set.push("banner_url = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.date {
            set.push("event_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.time {
            set.push("event_time = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.deadline_date {
            set.push("deadline_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.status {
            set.push("status = ").push_bind_unseparated(v.as_str());
        }
        if let Some(v) = patch.attendees {
            set.push("attendees = ").push_bind_unseparated(v);
        }
    }
    qb.push(" WHERE id = ")
        .push_bind(id.to_string())
        .push(" RETURNING ")
        .push(COLUMNS);
    Some(qb)
}

pub async fn update(pool: &PgPool, id: &str, patch: GatheringPatch) -> StoreResult<Gathering> {
    let Some(mut qb) = update_query(id, patch) else {
        return get(pool, id).await?.ok_or_else(|| StoreError::gathering_not_found(id));
    };

    qb.build_query_as::<GatheringRow>()
        .fetch_optional(pool)
        .await?
        .map(Gathering::try_from)
        .transpose()?
        .ok_or_else(|| StoreError::gathering_not_found(id))
}

pub async fn delete(pool: &PgPool, id: &str) -> StoreResult<()> {
    let result = sqlx::query("DELETE FROM events WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(StoreError::gathering_not_found(id));
    }
    Ok(())
}

/// Single statement, so concurrent RSVPs never lose a count
pub async fn increment_attendees(pool: &PgPool, id: &str) -> StoreResult<Gathering> {
    let sql = format!(
        "UPDATE events SET attendees = COALESCE(attendees, 0) + 1 WHERE id = $1 RETURNING {}",
        COLUMNS
    );
    sqlx::query_as::<_, GatheringRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(Gathering::try_from)
        .transpose()?
        .ok_or_else(|| StoreError::gathering_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> GatheringRow {
        GatheringRow {
            id: "e1".into(),
            title: "Service".into(),
            description: None,
            banner_url: None,
            event_date: NaiveDate::from_ymd_opt(2026, 1, 4).unwrap(),
            event_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
            deadline_date: None,
            status: status.into(),
            attendees: None,
            created_at: 1,
        }
    }

    #[test]
    fn nullable_columns_fall_back_to_empty_values() {
        let g = Gathering::try_from(row("active")).unwrap();
        assert_eq!(g.description, "");
        assert_eq!(g.banner_url, "");
        assert_eq!(g.attendees, 0);
        assert_eq!(g.status, EventStatus::Active);
    }

    #[test]
    fn unknown_status_is_reported_as_corrupt() {
        let err = Gathering::try_from(row("cancelled")).unwrap_err();
        assert!(matches!(err, StoreError::CorruptRecord(msg) if msg.contains("e1")));
    }

    #[test]
    fn update_sets_only_provided_fields() {
        let patch = GatheringPatch {
            time: NaiveTime::from_hms_opt(18, 30, 0),
            deadline_date: Some(None),
            ..Default::default()
        };
        let qb = update_query("e1", patch).unwrap();
        assert_eq!(
            qb.sql(),
            format!(
                "UPDATE events SET event_time = $1, deadline_date = $2 WHERE id = $3 RETURNING {}",
                COLUMNS
            )
        );
    }

    #[test]
    fn status_update_binds_the_wire_value() {
        let qb = update_query("e1", GatheringPatch::status(EventStatus::Past)).unwrap();
        assert!(qb.sql().starts_with("UPDATE events SET status = $1 WHERE id = $2 RETURNING "));
    }

    #[test]
    fn full_patch_keeps_column_order() {
        let patch = GatheringPatch {
            title: Some("Retreat".into()),
            description: Some(String::new()),
            banner_url: Some("https://cdn.example.org/b.png".into()),
            date: NaiveDate::from_ymd_opt(2026, 2, 1),
            time: NaiveTime::from_hms_opt(9, 0, 0),
            deadline_date: Some(NaiveDate::from_ymd_opt(2026, 1, 20)),
            status: Some(EventStatus::Active),
            attendees: Some(3),
        };
        let qb = update_query("e1", patch).unwrap();
        assert!(qb.sql().starts_with(
            "UPDATE events SET title = $1, description = $2, banner_url = $3, event_date = $4, \
             event_time = $5, deadline_date = $6, status = $7, attendees = $8 WHERE id = $9"
        ));
    }

    #[test]
    fn empty_patch_builds_no_statement() {
        assert!(update_query("e1", GatheringPatch::default()).is_none());
    }
}
