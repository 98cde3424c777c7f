use chrono::{Local, NaiveDate, Utc};

use crate::config::TimeZoneSetting;

/// Source of "today" for status derivation and the calendar
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the configured zone
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: TimeZoneSetting,
}

impl SystemClock {
    pub fn new(zone: TimeZoneSetting) -> Self {
        Self { zone }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        match self.zone {
            TimeZoneSetting::Local => Local::now().date_naive(),
            TimeZoneSetting::Utc => Utc::now().date_naive(),
        }
    }
}

/// Frozen date, for tests and reproducible CLI output
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
