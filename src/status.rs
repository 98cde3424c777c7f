//! Read-time lifecycle status of a gathering.
//!
//! The stored status is what an admin last set. What readers see is derived
//! from it: once the event day or the registration deadline lies before
//! today, the gathering is `past` whatever was stored. Derivation never
//! writes back.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Past,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Past => "past",
        }
    }

    /// The status an admin flip would store
    pub fn toggled(self) -> Self {
        match self {
            EventStatus::Active => EventStatus::Past,
            EventStatus::Past => EventStatus::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, EventStatus::Active)
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown event status '{0}' (expected 'active' or 'past')")]
pub struct ParseStatusError(pub String);

impl FromStr for EventStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "active" => Ok(EventStatus::Active),
            "past" => Ok(EventStatus::Past),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Status a reader should present for an event on `today`.
///
/// Pure in all four inputs; calling it again on its own output is a no-op.
pub fn derive_status(
    date: NaiveDate,
    deadline: Option<NaiveDate>,
    stored: EventStatus,
    today: NaiveDate,
) -> EventStatus {
    let deadline_passed = deadline.is_some_and(|d| d < today);
    if date < today || deadline_passed {
        EventStatus::Past
    } else {
        stored
    }
}
