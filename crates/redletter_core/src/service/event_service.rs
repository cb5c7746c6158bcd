//! Event submission and query use-cases.
//!
//! # Responsibility
//! - Run the submit flow: empty check, text validation, date parsing,
//!   persistence, read-back of the stored row.
//! - Map every failure to a user-facing message at this boundary.
//!
//! # Invariants
//! - Validation order is stable: empty input, then text, then date.
//! - Storage failures surface a generic message; internal detail stays in
//!   logs and error sources, never in `user_message()`.
//! - No error escapes this layer as a panic.

use crate::model::event::{Event, EventValidationError, MAX_EVENT_TEXT_CHARS};
use crate::parse::date_text::{parse_date_text, DateTextError};
use crate::repo::event_repo::{EventRepository, RepoError, RepoResult};
use chrono::{Datelike, NaiveDate};
use log::{error, info};

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Submit-flow failure, ordered by the stage that produced it.
#[derive(Debug)]
pub enum SubmitError {
    /// Date text or event text was empty (checked before anything else).
    EmptyInput,
    /// Event text violates model invariants.
    InvalidText(EventValidationError),
    /// Date text matched no accepted format.
    InvalidDate(DateTextError),
    /// Persistence failed; detail is kept out of user messaging.
    Storage(RepoError),
    /// Stored row could not be read back after a successful insert.
    InconsistentState(&'static str),
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput => write!(f, "date text and event text must not be empty"),
            Self::InvalidText(err) => write!(f, "{err}"),
            Self::InvalidDate(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent event state: {details}")
            }
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidText(err) => Some(err),
            Self::InvalidDate(err) => Some(err),
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Validation(err) => Self::InvalidText(err),
            other => Self::Storage(other),
        }
    }
}

impl SubmitError {
    /// Renders the message shown to the submitting user.
    ///
    /// Storage and consistency failures deliberately collapse to one
    /// generic line so no internal detail leaks to the caller.
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyInput => "date and event text must not be empty".to_string(),
            Self::InvalidText(EventValidationError::TextTooLong { .. }) => {
                format!("event text is too long (limit {MAX_EVENT_TEXT_CHARS} characters)")
            }
            Self::InvalidText(_) => "event text is not valid".to_string(),
            Self::InvalidDate(_) => "could not parse the date text".to_string(),
            Self::Storage(_) | Self::InconsistentState(_) => {
                "saving the event failed, please try again".to_string()
            }
        }
    }
}

/// Success payload for a submitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    /// The stored event, read back from the repository.
    pub event: Event,
}

impl SubmitReceipt {
    /// Renders the `YYYY-MM-DD <text>` echo line shown on success.
    pub fn echo_line(&self) -> String {
        format!("{} {}", self.event.date_string(), self.event.text)
    }
}

/// Use-case service for event submission and date-indexed queries.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Submits one event from raw user input.
    ///
    /// # Contract
    /// - Empty input is rejected before any other validation.
    /// - Text is validated before the date is parsed, so the caller always
    ///   sees the first failure in submission order.
    /// - On success the receipt carries the row as stored, not the input.
    pub fn submit(&self, date_text: &str, content_text: &str) -> Result<SubmitReceipt, SubmitError> {
        if date_text.trim().is_empty() || content_text.trim().is_empty() {
            return Err(SubmitError::EmptyInput);
        }

        validate_content_text(content_text).map_err(SubmitError::InvalidText)?;

        let date = parse_date_text(date_text).map_err(SubmitError::InvalidDate)?;

        let event = Event::new(date, content_text);
        let id = match self.repo.create_event(&event) {
            Ok(id) => id,
            Err(err) => {
                error!("event=event_submit module=service status=error error={err}");
                return Err(err.into());
            }
        };

        let stored = self
            .repo
            .get_event(id)?
            .ok_or(SubmitError::InconsistentState(
                "created event not found in read-back",
            ))?;

        info!(
            "event=event_submit module=service status=ok event_date={}",
            stored.date_string()
        );
        Ok(SubmitReceipt { event: stored })
    }

    /// All events on this day-of-month, across all years.
    pub fn events_on_day(&self, day: u32) -> RepoResult<Vec<Event>> {
        self.repo.events_on_day(day)
    }

    /// All events in this month, across all years.
    pub fn events_in_month(&self, month: u32) -> RepoResult<Vec<Event>> {
        self.repo.events_in_month(month)
    }

    /// All events in this calendar year.
    pub fn events_in_year(&self, year: i32) -> RepoResult<Vec<Event>> {
        self.repo.events_in_year(year)
    }

    /// Convenience query: events in the month `today` falls in.
    pub fn current_month_events(&self, today: NaiveDate) -> RepoResult<Vec<Event>> {
        self.repo.events_in_month(today.month())
    }
}

/// Validates submitted event text against model invariants.
///
/// Runs on the raw input so the submit flow can report text problems
/// before date parsing, matching the submission order users see.
pub fn validate_content_text(content_text: &str) -> Result<(), EventValidationError> {
    if content_text.trim().is_empty() {
        return Err(EventValidationError::EmptyText);
    }
    let chars = content_text.chars().count();
    if chars > MAX_EVENT_TEXT_CHARS {
        return Err(EventValidationError::TextTooLong { chars });
    }
    Ok(())
}
