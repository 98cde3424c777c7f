use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::{AppConfig, SecurityConfig};
use crate::services::{GatheringService, LinkService};
use crate::store::SharedStore;

/// Shared by every handler through axum `State`
#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub clock: Arc<dyn Clock>,
    pub security: Arc<SecurityConfig>,
}

impl AppState {
    pub fn new(store: SharedStore, clock: Arc<dyn Clock>, security: SecurityConfig) -> Self {
        Self {
            store,
            clock,
            security: Arc::new(security),
        }
    }

    pub fn from_config(store: SharedStore, config: &AppConfig) -> Self {
        Self::new(
            store,
            Arc::new(SystemClock::new(config.calendar.timezone)),
            config.security.clone(),
        )
    }

    pub fn gatherings(&self) -> GatheringService<'_> {
        GatheringService::new(self.store.as_ref(), self.clock.as_ref())
    }

    pub fn links(&self) -> LinkService<'_> {
        LinkService::new(self.store.as_ref())
    }
}
