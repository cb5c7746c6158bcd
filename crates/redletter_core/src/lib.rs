//! Core domain logic for Redletter, an "on this day" calendar of
//! historical events.
//! This crate is the single source of truth for business invariants;
//! transports (CLI today, HTTP tomorrow) stay thin adapters on top.

pub mod db;
pub mod logging;
pub mod model;
pub mod parse;
pub mod repo;
pub mod service;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, EventValidationError, MAX_EVENT_TEXT_CHARS};
pub use parse::date_text::{parse_date_text, DateTextError, DateTextResult};
pub use repo::event_repo::{EventRepository, RepoError, RepoResult, SqliteEventRepository};
pub use service::event_service::{
    validate_content_text, EventService, SubmitError, SubmitReceipt,
};
pub use view::calendar::{
    month_index, month_view, today_view, year_view, TodayEntry, ViewError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
