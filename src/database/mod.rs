pub mod gatherings;
pub mod links;
pub mod manager;
pub mod schema;
pub mod settings;

use async_trait::async_trait;

use crate::config::DatabaseConfig;
use crate::models::{Gathering, GatheringPatch, Link, LinkPatch, NewGathering, NewLink, Settings};
use crate::store::{Store, StoreResult};

pub use manager::DatabaseManager;

/// PostgreSQL backend
#[derive(Clone)]
pub struct PgStore {
    db: DatabaseManager,
}

impl PgStore {
    pub async fn connect(config: &DatabaseConfig) -> StoreResult<Self> {
        Ok(Self {
            db: DatabaseManager::connect(config).await?,
        })
    }

    pub fn new(db: DatabaseManager) -> Self {
        Self { db }
    }

    pub fn manager(&self) -> &DatabaseManager {
        &self.db
    }
}

#[async_trait]
impl Store for PgStore {
    async fn initialize(&self) -> StoreResult<()> {
        schema::initialize(self.db.pool()).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        self.db.health_check().await
    }

    async fn list_links(&self) -> StoreResult<Vec<Link>> {
        links::list(self.db.pool()).await
    }

    async fn create_link(&self, link: NewLink) -> StoreResult<Link> {
        links::create(self.db.pool(), link).await
    }

    async fn update_link(&self, id: &str, patch: LinkPatch) -> StoreResult<Link> {
        links::update(self.db.pool(), id, patch).await
    }

    async fn delete_link(&self, id: &str) -> StoreResult<()> {
        links::delete(self.db.pool(), id).await
    }

    async fn list_gatherings(&self) -> StoreResult<Vec<Gathering>> {
        gatherings::list(self.db.pool()).await
    }

    async fn get_gathering(&self, id: &str) -> StoreResult<Option<Gathering>> {
        gatherings::get(self.db.pool(), id).await
    }

    async fn create_gathering(&self, gathering: NewGathering) -> StoreResult<Gathering> {
        gatherings::create(self.db.pool(), gathering).await
    }

    async fn update_gathering(&self, id: &str, patch: GatheringPatch) -> StoreResult<Gathering> {
        gatherings::update(self.db.pool(), id, patch).await
    }

    async fn delete_gathering(&self, id: &str) -> StoreResult<()> {
        gatherings::delete(self.db.pool(), id).await
    }

    async fn increment_attendees(&self, id: &str) -> StoreResult<Gathering> {
        gatherings::increment_attendees(self.db.pool(), id).await
    }

    async fn get_settings(&self) -> StoreResult<Settings> {
        settings::get(self.db.pool()).await
    }

    async fn save_settings(&self, settings: Settings) -> StoreResult<Settings> {
        settings::save(self.db.pool(), settings).await
    }
}
