//! Persistence seam shared by the Postgres and in-memory backends.

pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::{AppConfig, StoreBackend};
use crate::models::{Gathering, GatheringPatch, Link, LinkPatch, NewGathering, NewLink, Settings};

pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl StoreError {
    pub fn link_not_found(id: &str) -> Self {
        StoreError::NotFound(format!("link {} not found", id))
    }

    pub fn gathering_not_found(id: &str) -> Self {
        StoreError::NotFound(format!("gathering {} not found", id))
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// CRUD over links, gatherings and the settings singleton.
///
/// Gatherings come back with their *stored* status. Readers that present
/// them go through [`GatheringService`](crate::services::GatheringService).
#[async_trait]
pub trait Store: Send + Sync {
    /// Create missing tables and the default settings row
    async fn initialize(&self) -> StoreResult<()>;

    async fn health_check(&self) -> StoreResult<()>;

    /// Newest first
    async fn list_links(&self) -> StoreResult<Vec<Link>>;
    async fn create_link(&self, link: NewLink) -> StoreResult<Link>;
    async fn update_link(&self, id: &str, patch: LinkPatch) -> StoreResult<Link>;
    async fn delete_link(&self, id: &str) -> StoreResult<()>;

    /// Ordered by date then time, latest first
    async fn list_gatherings(&self) -> StoreResult<Vec<Gathering>>;
    async fn get_gathering(&self, id: &str) -> StoreResult<Option<Gathering>>;
    async fn create_gathering(&self, gathering: NewGathering) -> StoreResult<Gathering>;
    async fn update_gathering(&self, id: &str, patch: GatheringPatch) -> StoreResult<Gathering>;
    async fn delete_gathering(&self, id: &str) -> StoreResult<()>;
    async fn increment_attendees(&self, id: &str) -> StoreResult<Gathering>;

    /// Stored settings, or the defaults when none were saved
    async fn get_settings(&self) -> StoreResult<Settings>;
    async fn save_settings(&self, settings: Settings) -> StoreResult<Settings>;
}

pub type SharedStore = Arc<dyn Store>;

/// Build the backend selected by configuration
pub async fn connect(config: &AppConfig) -> StoreResult<SharedStore> {
    match config.store.backend {
        StoreBackend::Postgres => {
            let store = crate::database::PgStore::connect(&config.database).await?;
            if config.database.auto_migrate {
                store.initialize().await?;
            }
            Ok(Arc::new(store))
        }
        StoreBackend::Memory => {
            let store = if config.store.seed_demo_data {
                MemoryStore::with_demo_data()
            } else {
                MemoryStore::new()
            };
            Ok(Arc::new(store))
        }
    }
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

pub(crate) fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
