//! Demo content and the one-shot copy of it into an empty store.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use tracing::info;

use crate::models::{Gathering, Link, NewGathering, NewLink, Settings};
use crate::status::EventStatus;
use crate::store::{Store, StoreResult};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap_or_default()
}

pub fn demo_new_links() -> Vec<NewLink> {
    vec![
        NewLink {
            name: "AtomGram".to_string(),
            description: "The social network for the Spirit-filled believer.".to_string(),
            icon_url: "https://picsum.photos/seed/atom/200".to_string(),
            redirect_url: "https://atomgram.com".to_string(),
        },
        NewLink {
            name: "GoodNews World".to_string(),
            description: "Access the latest messages and prophetic words.".to_string(),
            icon_url: "https://picsum.photos/seed/gnw/200".to_string(),
            redirect_url: "https://goodnewsworld.com".to_string(),
        },
    ]
}

pub fn demo_new_gatherings() -> Vec<NewGathering> {
    vec![
        NewGathering {
            title: "New Year Eve Global Service".to_string(),
            description: "Join the Prophet of God for a night of power and transition.".to_string(),
            banner_url: "https://picsum.photos/seed/nye/1200/600".to_string(),
            date: date(2025, 12, 31),
            time: time(20, 0),
            deadline_date: Some(date(2025, 12, 30)),
        },
        NewGathering {
            title: "Night of Bliss 2024".to_string(),
            description: "A powerful encounter that transformed thousands of lives globally.".to_string(),
            banner_url: "https://picsum.photos/seed/bliss/1200/600".to_string(),
            date: date(2024, 6, 15),
            time: time(18, 0),
            deadline_date: None,
        },
    ]
}

pub fn demo_links(created_at: i64) -> Vec<Link> {
    demo_new_links()
        .into_iter()
        .zip(["1", "2"])
        .map(|(link, id)| link.into_link(id.to_string(), created_at))
        .collect()
}

/// Demo gatherings with their showcase counters
pub fn demo_gatherings(created_at: i64) -> Vec<Gathering> {
    let mut gatherings: Vec<Gathering> = demo_new_gatherings()
        .into_iter()
        .zip(["1", "past-1"])
        .map(|(g, id)| g.into_gathering(id.to_string(), created_at))
        .collect();

    gatherings[0].attendees = 15420;
    gatherings[1].attendees = 8500;
    gatherings[1].status = EventStatus::Past;
    gatherings[1].created_at = created_at - 1_000_000;
    gatherings
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub links_inserted: usize,
    pub gatherings_inserted: usize,
    pub settings_saved: bool,
}

/// Fill an empty store with the demo content.
///
/// Each table is only touched while it is still empty (settings: while still
/// at their defaults), so running this twice changes nothing.
pub async fn seed(store: &dyn Store, settings: &Settings) -> StoreResult<SeedReport> {
    let mut report = SeedReport::default();

    if store.list_links().await?.is_empty() {
        for link in demo_new_links() {
            store.create_link(link).await?;
            report.links_inserted += 1;
        }
        info!("Seeded {} links", report.links_inserted);
    } else {
        info!("Links already present, skipping");
    }

    if store.list_gatherings().await?.is_empty() {
        for gathering in demo_new_gatherings() {
            store.create_gathering(gathering).await?;
            report.gatherings_inserted += 1;
        }
        info!("Seeded {} gatherings", report.gatherings_inserted);
    } else {
        info!("Gatherings already present, skipping");
    }

    if store.get_settings().await?.is_default() && !settings.is_default() {
        store.save_settings(settings.clone()).await?;
        report.settings_saved = true;
        info!("Seeded settings for {}", settings.year);
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn seeding_twice_is_a_no_op() {
        let store = MemoryStore::new();
        let settings = Settings { year: 2027, theme: "Year of Glory".into() };

        let first = seed(&store, &settings).await.unwrap();
        assert_eq!(first.links_inserted, 2);
        assert_eq!(first.gatherings_inserted, 2);
        assert!(first.settings_saved);

        let second = seed(&store, &settings).await.unwrap();
        assert_eq!(second, SeedReport::default());
        assert_eq!(store.list_links().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn seeded_gatherings_go_through_the_create_path() {
        let store = MemoryStore::new();
        seed(&store, &Settings::default()).await.unwrap();
        for g in store.list_gatherings().await.unwrap() {
            assert_eq!(g.status, EventStatus::Active);
            assert_eq!(g.attendees, 0);
        }
    }

    #[test]
    fn demo_gatherings_carry_showcase_state() {
        let gatherings = demo_gatherings(10_000_000);
        assert_eq!(gatherings[0].id, "1");
        assert_eq!(gatherings[1].status, EventStatus::Past);
        assert_eq!(gatherings[1].attendees, 8500);
    }
}
