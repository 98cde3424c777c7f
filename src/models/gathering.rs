use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::link::require;
use super::serde_helpers::{blank_date, hour_minute, patch_blank_date};
use crate::status::{derive_status, EventStatus};

/// A scheduled gathering with its RSVP counter.
///
/// `status` holds whatever the record carries: the stored value when it comes
/// out of a [`Store`](crate::store::Store), the derived value once it has
/// passed through [`Gathering::with_derived_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gathering {
    pub id: String,
    pub title: String,
    pub description: String,
    pub banner_url: String,
    pub date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
    pub status: EventStatus,
    pub attendees: i32,
    pub created_at: i64,
}

impl Gathering {
    pub fn derived_status(&self, today: NaiveDate) -> EventStatus {
        derive_status(self.date, self.deadline_date, self.status, today)
    }

    pub fn with_derived_status(mut self, today: NaiveDate) -> Self {
        self.status = self.derived_status(today);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGathering {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub banner_url: String,
    pub date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub time: NaiveTime,
    #[serde(default, deserialize_with = "blank_date", skip_serializing_if = "Option::is_none")]
    pub deadline_date: Option<NaiveDate>,
}

impl NewGathering {
    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        require("title", &self.title, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Every new gathering opens as active with nobody enrolled
    pub fn into_gathering(self, id: String, created_at: i64) -> Gathering {
        Gathering {
            id,
            title: self.title,
            description: self.description,
            banner_url: self.banner_url,
            date: self.date,
            time: self.time,
            deadline_date: self.deadline_date,
            status: EventStatus::Active,
            attendees: 0,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatheringPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub banner_url: Option<String>,
    pub date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "hour_minute::option::deserialize")]
    pub time: Option<NaiveTime>,
    /// `Some(None)` clears the deadline
    #[serde(default, deserialize_with = "patch_blank_date")]
    pub deadline_date: Option<Option<NaiveDate>>,
    pub status: Option<EventStatus>,
    pub attendees: Option<i32>,
}

impl GatheringPatch {
    pub fn status(status: EventStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn validate(&self) -> Result<(), HashMap<String, String>> {
        let mut errors = HashMap::new();
        if let Some(title) = &self.title {
            require("title", title, &mut errors);
        }
        if matches!(self.attendees, Some(n) if n < 0) {
            errors.insert("attendees".to_string(), "Must not be negative".to_string());
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    pub fn apply(self, gathering: &mut Gathering) {
        if let Some(v) = self.title {
            gathering.title = v;
        }
        if let Some(v) = self.description {
            gathering.description = v;
        }
        if let Some(v) = self.banner_url {
            gathering.banner_url = v;
        }
        if let Some(v) = self.date {
            gathering.date = v;
        }
        if let Some(v) = self.time {
            gathering.time = v;
        }
        if let Some(v) = self.deadline_date {
            gathering.deadline_date = v;
        }
        if let Some(v) = self.status {
            gathering.status = v;
        }
        if let Some(v) = self.attendees {
            gathering.attendees = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Gathering {
        serde_json::from_value::<NewGathering>(json!({
            "title": "New Year Eve Global Service",
            "date": "2025-12-31",
            "time": "20:00",
            "deadlineDate": "2025-12-30"
        }))
        .unwrap()
        .into_gathering("nye".into(), 0)
    }

    #[test]
    fn new_gathering_starts_active_and_empty() {
        let g = sample();
        assert_eq!(g.status, EventStatus::Active);
        assert_eq!(g.attendees, 0);
        assert_eq!(g.deadline_date, NaiveDate::from_ymd_opt(2025, 12, 30));
    }

    #[test]
    fn serializes_time_as_hour_minute_and_omits_missing_deadline() {
        let mut g = sample();
        g.deadline_date = None;
        let value = serde_json::to_value(&g).unwrap();
        assert_eq!(value["time"], "20:00");
        assert_eq!(value["date"], "2025-12-31");
        assert_eq!(value["bannerUrl"], "");
        assert!(value.get("deadlineDate").is_none());
    }

    #[test]
    fn empty_deadline_string_means_none() {
        let g: NewGathering = serde_json::from_value(json!({
            "title": "Service",
            "date": "2026-01-04",
            "time": "09:00:00",
            "deadlineDate": ""
        }))
        .unwrap();
        assert_eq!(g.deadline_date, None);
        assert_eq!(g.time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
    }

    #[test]
    fn patch_distinguishes_missing_from_cleared_deadline() {
        let untouched: GatheringPatch = serde_json::from_value(json!({ "title": "x" })).unwrap();
        assert_eq!(untouched.deadline_date, None);

        let cleared: GatheringPatch = serde_json::from_value(json!({ "deadlineDate": null })).unwrap();
        assert_eq!(cleared.deadline_date, Some(None));

        let mut g = sample();
        cleared.apply(&mut g);
        assert_eq!(g.deadline_date, None);
    }

    #[test]
    fn patch_rejects_negative_attendees_and_blank_title() {
        let patch: GatheringPatch = serde_json::from_value(json!({ "attendees": -1, "title": "" })).unwrap();
        let errors = patch.validate().unwrap_err();
        assert!(errors.contains_key("attendees"));
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn derived_view_does_not_change_other_fields() {
        let g = sample();
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let derived = g.clone().with_derived_status(today);
        assert_eq!(derived.status, EventStatus::Past);
        assert_eq!(derived.title, g.title);
        assert_eq!(g.status, EventStatus::Active);
    }
}
