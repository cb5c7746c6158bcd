//! Calendar query views: "on this day", by-month and by-year listings.
//!
//! # Responsibility
//! - Resolve date-indexed queries into render-ready data structures.
//! - Apply the not-found policy for explicit month/year lookups.
//!
//! # Invariants
//! - The home view matches by day-of-month and never fails on empty.
//! - Explicit month/year lookups with no matches yield `NoMatches`.
//! - `today` is always injected by the caller; core never reads the clock.

use crate::model::event::Event;
use crate::repo::event_repo::{EventRepository, RepoError};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Failure for calendar view handlers.
#[derive(Debug)]
pub enum ViewError {
    /// Month path parameter outside `1..=12`.
    MonthOutOfRange { month: u32 },
    /// Explicit lookup matched nothing; callers render this as a 404.
    NoMatches,
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for ViewError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MonthOutOfRange { month } => {
                write!(f, "month {month} is out of range (expected 1..=12)")
            }
            Self::NoMatches => write!(f, "no events matched the query"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ViewError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ViewError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// One home-page entry in the "on this day across history" framing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayEntry {
    /// `【<original_year>】<event text>`.
    pub title: String,
    /// Event month/day remapped into the display year, as `YYYY-MM-DD`.
    pub start: String,
}

impl TodayEntry {
    fn from_event(event: &Event, display_year: i32) -> Self {
        let display_date = remap_to_year(event.date, display_year);
        Self {
            title: format!("【{}】{}", event.date.year(), event.text),
            start: display_date.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Home view: every event whose date falls on today's day-of-month.
///
/// An empty result is an empty list — the home page renders fine with
/// nothing on it.
pub fn today_view<R: EventRepository>(
    repo: &R,
    today: NaiveDate,
) -> Result<Vec<TodayEntry>, ViewError> {
    let events = repo.events_on_day(today.day())?;
    Ok(events
        .iter()
        .map(|event| TodayEntry::from_event(event, today.year()))
        .collect())
}

/// Month listing: every event in `month` across all years.
///
/// Empty matches are a `NoMatches` error here; an explicit lookup for a
/// month nobody recorded reads as a missing page, not a blank one.
pub fn month_view<R: EventRepository>(repo: &R, month: u32) -> Result<Vec<Event>, ViewError> {
    if !(1..=12).contains(&month) {
        return Err(ViewError::MonthOutOfRange { month });
    }

    let events = repo.events_in_month(month)?;
    if events.is_empty() {
        return Err(ViewError::NoMatches);
    }
    Ok(events)
}

/// Year listing: every event in calendar year `year`.
///
/// Same not-found policy as [`month_view`].
pub fn year_view<R: EventRepository>(repo: &R, year: i32) -> Result<Vec<Event>, ViewError> {
    let events = repo.events_in_year(year)?;
    if events.is_empty() {
        return Err(ViewError::NoMatches);
    }
    Ok(events)
}

/// Months shown by the home page navigation strip.
pub fn month_index() -> Vec<u32> {
    (1..=12).collect()
}

/// Moves a date into `target_year`, keeping month and day.
///
/// Feb 29 has no counterpart in non-leap years; those entries display on
/// Feb 28 instead of disappearing from the page.
fn remap_to_year(date: NaiveDate, target_year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(target_year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(target_year, date.month(), 28))
        .unwrap_or(date)
}
