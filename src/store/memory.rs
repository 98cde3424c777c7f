use async_trait::async_trait;
use std::cmp::Reverse;
use tokio::sync::RwLock;
use tracing::debug;

use super::{new_id, now_millis, Store, StoreError, StoreResult};
use crate::models::{Gathering, GatheringPatch, Link, LinkPatch, NewGathering, NewLink, Settings};
use crate::seed;

#[derive(Debug, Default)]
struct Tables {
    links: Vec<Link>,
    gatherings: Vec<Gathering>,
    settings: Option<Settings>,
}

/// Process-local store. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-filled with the demo links and gatherings
    pub fn with_demo_data() -> Self {
        let created_at = now_millis();
        Self {
            tables: RwLock::new(Tables {
                links: seed::demo_links(created_at),
                gatherings: seed::demo_gatherings(created_at),
                settings: None,
            }),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn initialize(&self) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        if tables.settings.is_none() {
            tables.settings = Some(Settings::default());
        }
        Ok(())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_links(&self) -> StoreResult<Vec<Link>> {
        let mut links = self.tables.read().await.links.clone();
        // later inserts win ties within the same millisecond
        links.reverse();
        links.sort_by_key(|l| Reverse(l.created_at));
        Ok(links)
    }

    async fn create_link(&self, link: NewLink) -> StoreResult<Link> {
        let link = link.into_link(new_id(), now_millis());
        self.tables.write().await.links.push(link.clone());
        debug!("Created link {}", link.id);
        Ok(link)
    }

    async fn update_link(&self, id: &str, patch: LinkPatch) -> StoreResult<Link> {
        let mut tables = self.tables.write().await;
        let link = tables
            .links
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or_else(|| StoreError::link_not_found(id))?;
        patch.apply(link);
        Ok(link.clone())
    }

    async fn delete_link(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.links.len();
        tables.links.retain(|l| l.id != id);
        if tables.links.len() == before {
            return Err(StoreError::link_not_found(id));
        }
        Ok(())
    }

    async fn list_gatherings(&self) -> StoreResult<Vec<Gathering>> {
        let mut gatherings = self.tables.read().await.gatherings.clone();
        gatherings.sort_by_key(|g| Reverse((g.date, g.time)));
        Ok(gatherings)
    }

    async fn get_gathering(&self, id: &str) -> StoreResult<Option<Gathering>> {
        let tables = self.tables.read().await;
        Ok(tables.gatherings.iter().find(|g| g.id == id).cloned())
    }

    async fn create_gathering(&self, gathering: NewGathering) -> StoreResult<Gathering> {
        let gathering = gathering.into_gathering(new_id(), now_millis());
        self.tables.write().await.gatherings.push(gathering.clone());
        debug!("Created gathering {}", gathering.id);
        Ok(gathering)
    }

    async fn update_gathering(&self, id: &str, patch: GatheringPatch) -> StoreResult<Gathering> {
        let mut tables = self.tables.write().await;
        let gathering = tables
            .gatherings
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::gathering_not_found(id))?;
        patch.apply(gathering);
        Ok(gathering.clone())
    }

    async fn delete_gathering(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.tables.write().await;
        let before = tables.gatherings.len();
        tables.gatherings.retain(|g| g.id != id);
        if tables.gatherings.len() == before {
            return Err(StoreError::gathering_not_found(id));
        }
        Ok(())
    }

    async fn increment_attendees(&self, id: &str) -> StoreResult<Gathering> {
        let mut tables = self.tables.write().await;
        let gathering = tables
            .gatherings
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or_else(|| StoreError::gathering_not_found(id))?;
        gathering.attendees = gathering.attendees.saturating_add(1);
        Ok(gathering.clone())
    }

    async fn get_settings(&self) -> StoreResult<Settings> {
        Ok(self.tables.read().await.settings.clone().unwrap_or_default())
    }

    async fn save_settings(&self, settings: Settings) -> StoreResult<Settings> {
        self.tables.write().await.settings = Some(settings.clone());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::EventStatus;
    use chrono::{NaiveDate, NaiveTime};

    fn new_gathering(title: &str, date: (i32, u32, u32), time: (u32, u32)) -> NewGathering {
        NewGathering {
            title: title.to_string(),
            description: String::new(),
            banner_url: String::new(),
            date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            time: NaiveTime::from_hms_opt(time.0, time.1, 0).unwrap(),
            deadline_date: None,
        }
    }

    #[tokio::test]
    async fn gatherings_list_latest_first() {
        let store = MemoryStore::new();
        store.create_gathering(new_gathering("early", (2026, 5, 1), (9, 0))).await.unwrap();
        store.create_gathering(new_gathering("late", (2026, 5, 1), (18, 0))).await.unwrap();
        store.create_gathering(new_gathering("next", (2026, 6, 1), (9, 0))).await.unwrap();

        let titles: Vec<String> = store
            .list_gatherings()
            .await
            .unwrap()
            .into_iter()
            .map(|g| g.title)
            .collect();
        assert_eq!(titles, vec!["next", "late", "early"]);
    }

    #[tokio::test]
    async fn attendee_counter_increments() {
        let store = MemoryStore::new();
        let g = store.create_gathering(new_gathering("rsvp", (2026, 5, 1), (9, 0))).await.unwrap();
        store.increment_attendees(&g.id).await.unwrap();
        let g = store.increment_attendees(&g.id).await.unwrap();
        assert_eq!(g.attendees, 2);
        assert_eq!(g.status, EventStatus::Active);
    }

    #[tokio::test]
    async fn missing_records_are_not_found() {
        let store = MemoryStore::new();
        assert!(matches!(store.delete_link("nope").await, Err(StoreError::NotFound(_))));
        assert!(matches!(
            store.update_gathering("nope", GatheringPatch::default()).await,
            Err(StoreError::NotFound(_))
        ));
        assert!(store.get_gathering("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn settings_default_until_saved() {
        let store = MemoryStore::new();
        assert_eq!(store.get_settings().await.unwrap(), Settings::default());

        let saved = Settings { year: 2027, theme: "Year of Glory".into() };
        store.save_settings(saved.clone()).await.unwrap();
        assert_eq!(store.get_settings().await.unwrap(), saved);
    }

    #[tokio::test]
    async fn link_update_and_delete() {
        let store = MemoryStore::new();
        let link = store
            .create_link(NewLink {
                name: "GoodNews World".into(),
                description: String::new(),
                icon_url: String::new(),
                redirect_url: "https://goodnewsworld.com".into(),
            })
            .await
            .unwrap();

        let patch = LinkPatch { description: Some("Messages".into()), ..Default::default() };
        let updated = store.update_link(&link.id, patch).await.unwrap();
        assert_eq!(updated.description, "Messages");
        assert_eq!(updated.created_at, link.created_at);

        store.delete_link(&link.id).await.unwrap();
        assert!(store.list_links().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn demo_data_is_loaded() {
        let store = MemoryStore::with_demo_data();
        assert_eq!(store.list_links().await.unwrap().len(), 2);
        assert_eq!(store.list_gatherings().await.unwrap().len(), 2);
    }
}
