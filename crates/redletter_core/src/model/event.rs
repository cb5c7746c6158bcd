//! Event domain model.
//!
//! # Responsibility
//! - Define the canonical record for one historical calendar event.
//! - Validate event invariants close to the data.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another event.
//! - `text` is non-empty and holds at most [`MAX_EVENT_TEXT_CHARS`]
//!   characters (characters, not bytes — CJK text is first-class input).
//! - `date` is a valid calendar date by construction (`NaiveDate`).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a stored event.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EventId = Uuid;

/// Maximum event text length, counted in characters.
pub const MAX_EVENT_TEXT_CHARS: usize = 200;

/// Validation failure for event records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// Nil UUIDs are reserved and never valid identities.
    NilUuid,
    /// Event text is empty after trimming.
    EmptyText,
    /// Event text exceeds [`MAX_EVENT_TEXT_CHARS`] characters.
    TextTooLong { chars: usize },
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilUuid => write!(f, "event uuid must not be nil"),
            Self::EmptyText => write!(f, "event text must not be empty"),
            Self::TextTooLong { chars } => write!(
                f,
                "event text is {chars} characters, limit is {MAX_EVENT_TEXT_CHARS}"
            ),
        }
    }
}

impl Error for EventValidationError {}

/// Canonical record for one historical event.
///
/// Deserialization goes through [`Event::validate`], so invalid wire or
/// persisted data is rejected instead of silently accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventPayload")]
pub struct Event {
    /// Stable global ID used for lookups and audit trails.
    pub uuid: EventId,
    /// User-submitted event description.
    pub text: String,
    /// Canonical calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

/// Raw wire shape used to run validation during deserialization.
#[derive(Deserialize)]
struct EventPayload {
    uuid: EventId,
    text: String,
    date: NaiveDate,
}

impl TryFrom<EventPayload> for Event {
    type Error = EventValidationError;

    fn try_from(payload: EventPayload) -> Result<Self, Self::Error> {
        let event = Event {
            uuid: payload.uuid,
            text: payload.text,
            date: payload.date,
        };
        event.validate()?;
        Ok(event)
    }
}

impl Event {
    /// Creates a new event with a generated stable ID.
    ///
    /// The text is not validated here; validation runs on every write path
    /// before persistence.
    pub fn new(date: NaiveDate, text: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            text: text.into(),
            date,
        }
    }

    /// Creates an event with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    /// Rejects nil IDs immediately since they can never be persisted.
    pub fn with_id(
        uuid: EventId,
        date: NaiveDate,
        text: impl Into<String>,
    ) -> Result<Self, EventValidationError> {
        if uuid.is_nil() {
            return Err(EventValidationError::NilUuid);
        }
        Ok(Self {
            uuid,
            text: text.into(),
            date,
        })
    }

    /// Checks all event invariants.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.uuid.is_nil() {
            return Err(EventValidationError::NilUuid);
        }
        if self.text.trim().is_empty() {
            return Err(EventValidationError::EmptyText);
        }
        let chars = self.text.chars().count();
        if chars > MAX_EVENT_TEXT_CHARS {
            return Err(EventValidationError::TextTooLong { chars });
        }
        Ok(())
    }

    /// Renders the canonical `YYYY-MM-DD` form of the event date.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}
