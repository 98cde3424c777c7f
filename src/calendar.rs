//! Month grid layout for the gatherings calendar.
//!
//! Weeks run Sunday to Saturday. Cells before the first and after the last
//! day of the month are empty so every week has exactly seven cells.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use thiserror::Error;

use crate::models::Gathering;
use crate::status::EventStatus;

pub const DAYS_PER_WEEK: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalendarError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),

    #[error("year {0} is out of range")]
    InvalidYear(i32),
}

/// One week row; `None` marks a padding cell
pub type Week = [Option<u32>; DAYS_PER_WEEK];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub days_in_month: u32,
    /// Weekday of day 1, Sunday = 0
    pub first_weekday: u32,
    pub weeks: Vec<Week>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        let first = first_of_month(year, month)?;
        let days_in_month = days_in_month(year, month)?;
        let first_weekday = first.weekday().num_days_from_sunday();

        let mut weeks = Vec::with_capacity(6);
        let mut week: Vec<Option<u32>> = vec![None; first_weekday as usize];

        for day in 1..=days_in_month {
            week.push(Some(day));
            if week.len() == DAYS_PER_WEEK {
                weeks.push(to_week(&week));
                week.clear();
            }
        }
        if !week.is_empty() {
            week.resize(DAYS_PER_WEEK, None);
            weeks.push(to_week(&week));
        }

        Ok(Self {
            year,
            month,
            days_in_month,
            first_weekday,
            weeks,
        })
    }

    /// Calendar date of a day number in this month
    pub fn date_of(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

fn to_week(cells: &[Option<u32>]) -> Week {
    let mut week = [None; DAYS_PER_WEEK];
    week.copy_from_slice(cells);
    week
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    if !(1..=12).contains(&month) {
        return Err(CalendarError::InvalidMonth(month));
    }
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidYear(year))
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    first_of_month(year, month)?;
    // counted from the end so the last month chrono can represent still works
    (28..=31)
        .rev()
        .find(|&day| NaiveDate::from_ymd_opt(year, month, day).is_some())
        .ok_or(CalendarError::InvalidYear(year))
}

/// Move `offset` whole months from (year, month), crossing year boundaries.
pub fn shift_month(year: i32, month: u32, offset: i32) -> Result<(i32, u32), CalendarError> {
    let first = first_of_month(year, month)?;
    let shifted = if offset >= 0 {
        first.checked_add_months(Months::new(offset.unsigned_abs()))
    } else {
        first.checked_sub_months(Months::new(offset.unsigned_abs()))
    }
    .ok_or(CalendarError::InvalidYear(year))?;
    Ok((shifted.year(), shifted.month()))
}

/// Gathering as listed inside a calendar cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellEvent {
    pub id: String,
    pub title: String,
    pub time: String,
    pub status: EventStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub day: Option<u32>,
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    pub has_active: bool,
    pub all_past: bool,
    pub events: Vec<CellEvent>,
}

impl CalendarCell {
    fn empty() -> Self {
        Self {
            day: None,
            date: None,
            is_today: false,
            has_active: false,
            all_past: false,
            events: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    /// `None` at the edges of the representable date range
    pub previous: Option<MonthRef>,
    pub next: Option<MonthRef>,
    pub weeks: Vec<Vec<CalendarCell>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthRef {
    pub year: i32,
    pub month: u32,
}

impl CalendarMonth {
    /// Lay `gatherings` onto the grid. Statuses are taken as given, so
    /// callers pass gatherings that already carry their derived status.
    pub fn build(grid: &MonthGrid, gatherings: &[Gathering], today: NaiveDate) -> Self {
        let neighbour = |offset| {
            shift_month(grid.year, grid.month, offset)
                .ok()
                .map(|(year, month)| MonthRef { year, month })
        };

        let weeks = grid
            .weeks
            .iter()
            .map(|week| {
                week.iter()
                    .map(|cell| match cell.and_then(|day| grid.date_of(day).map(|d| (day, d))) {
                        Some((day, date)) => fill_cell(day, date, gatherings, today),
                        None => CalendarCell::empty(),
                    })
                    .collect()
            })
            .collect();

        Self {
            year: grid.year,
            month: grid.month,
            previous: neighbour(-1),
            next: neighbour(1),
            weeks,
        }
    }

    pub fn cell(&self, day: u32) -> Option<&CalendarCell> {
        self.weeks.iter().flatten().find(|c| c.day == Some(day))
    }
}

fn fill_cell(day: u32, date: NaiveDate, gatherings: &[Gathering], today: NaiveDate) -> CalendarCell {
    let events: Vec<CellEvent> = events_on(gatherings, date)
        .map(|g| CellEvent {
            id: g.id.clone(),
            title: g.title.clone(),
            time: g.time.format("%H:%M").to_string(),
            status: g.status,
        })
        .collect();

    let has_active = events.iter().any(|e| e.status.is_active());
    let all_past = !events.is_empty() && events.iter().all(|e| e.status == EventStatus::Past);

    CalendarCell {
        day: Some(day),
        date: Some(date),
        is_today: date == today,
        has_active,
        all_past,
        events,
    }
}

/// Gatherings held on exactly `date`
pub fn events_on(gatherings: &[Gathering], date: NaiveDate) -> impl Iterator<Item = &Gathering> {
    gatherings.iter().filter(move |g| g.date == date)
}

/// Plain text month view for the CLI
pub fn render_text(month: &CalendarMonth) -> String {
    let mut out = String::new();
    let title = NaiveDate::from_ymd_opt(month.year, month.month, 1)
        .map(|d| d.format("%B %Y").to_string())
        .unwrap_or_default();
    out.push_str(&format!("{:^35}\n", title));
    out.push_str("  Sun  Mon  Tue  Wed  Thu  Fri  Sat\n");
    for week in &month.weeks {
        for cell in week {
            let marker = if cell.has_active {
                '*'
            } else if cell.all_past {
                '.'
            } else {
                ' '
            };
            match cell.day {
                Some(day) => out.push_str(&format!("  {:>2}{}", day, marker)),
                None => out.push_str("     "),
            }
        }
        out.push('\n');
    }
    out
}
