//! Every reader of gathering data goes through here, so list, detail,
//! calendar and RSVP all present the same derived status.

use chrono::NaiveDate;
use serde::Deserialize;
use std::str::FromStr;
use tracing::info;

use super::{ServiceError, ServiceResult};
use crate::calendar::{CalendarMonth, MonthGrid};
use crate::clock::Clock;
use crate::models::{Gathering, GatheringPatch, NewGathering};
use crate::status::{EventStatus, ParseStatusError};
use crate::store::{Store, StoreError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    Active,
    Past,
}

impl From<StatusFilter> for EventStatus {
    fn from(filter: StatusFilter) -> Self {
        match filter {
            StatusFilter::Active => EventStatus::Active,
            StatusFilter::Past => EventStatus::Past,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<EventStatus>()? {
            EventStatus::Active => StatusFilter::Active,
            EventStatus::Past => StatusFilter::Past,
        })
    }
}

pub struct GatheringService<'a> {
    store: &'a dyn Store,
    clock: &'a dyn Clock,
}

impl<'a> GatheringService<'a> {
    pub fn new(store: &'a dyn Store, clock: &'a dyn Clock) -> Self {
        Self { store, clock }
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// All gatherings as readers see them.
    ///
    /// Unfiltered results keep store order (latest first). Upcoming
    /// gatherings read soonest first; past ones most recent first.
    pub async fn list(&self, filter: Option<StatusFilter>) -> ServiceResult<Vec<Gathering>> {
        let today = self.today();
        let all = self
            .store
            .list_gatherings()
            .await?
            .into_iter()
            .map(|g| g.with_derived_status(today));

        let Some(filter) = filter else {
            return Ok(all.collect());
        };

        let wanted = EventStatus::from(filter);
        let mut selected: Vec<Gathering> = all.filter(|g| g.status == wanted).collect();
        match filter {
            StatusFilter::Active => selected.sort_by_key(|g| (g.date, g.time)),
            StatusFilter::Past => selected.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        Ok(selected)
    }

    pub async fn get(&self, id: &str) -> ServiceResult<Gathering> {
        let gathering = self
            .store
            .get_gathering(id)
            .await?
            .ok_or_else(|| StoreError::gathering_not_found(id))?;
        Ok(gathering.with_derived_status(self.today()))
    }

    pub async fn create(&self, gathering: NewGathering) -> ServiceResult<Gathering> {
        gathering.validate().map_err(ServiceError::Invalid)?;
        let created = self.store.create_gathering(gathering).await?;
        info!("Scheduled gathering '{}' on {} ({})", created.title, created.date, created.id);
        Ok(created.with_derived_status(self.today()))
    }

    pub async fn update(&self, id: &str, patch: GatheringPatch) -> ServiceResult<Gathering> {
        patch.validate().map_err(ServiceError::Invalid)?;
        let updated = self.store.update_gathering(id, patch).await?;
        Ok(updated.with_derived_status(self.today()))
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        self.store.delete_gathering(id).await?;
        info!("Deleted gathering {}", id);
        Ok(())
    }

    /// Count one RSVP. Only open (active) gatherings take registrations.
    pub async fn attend(&self, id: &str) -> ServiceResult<Gathering> {
        let current = self.get(id).await?;
        if !current.status.is_active() {
            return Err(ServiceError::Conflict(format!(
                "gathering {} is closed for registration",
                id
            )));
        }
        let updated = self.store.increment_attendees(id).await?;
        Ok(updated.with_derived_status(self.today()))
    }

    /// Store the opposite of the status readers currently see.
    pub async fn toggle_status(&self, id: &str) -> ServiceResult<Gathering> {
        let current = self.get(id).await?;
        let next = current.status.toggled();
        let updated = self
            .store
            .update_gathering(id, GatheringPatch::status(next))
            .await?;
        info!("Gathering {} moved from {} to {}", id, current.status, next);
        Ok(updated.with_derived_status(self.today()))
    }

    pub async fn calendar(&self, year: i32, month: u32) -> ServiceResult<CalendarMonth> {
        let grid = MonthGrid::new(year, month)?;
        let today = self.today();
        let in_month: Vec<Gathering> = self
            .store
            .list_gatherings()
            .await?
            .into_iter()
            .filter(|g| grid.contains(g.date))
            .map(|g| g.with_derived_status(today))
            .collect();
        Ok(CalendarMonth::build(&grid, &in_month, today))
    }
}
