//! Event repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable create/query APIs over canonical `events` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Event::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Query results are ordered by `event_date ASC, uuid ASC`.

use crate::db::DbError;
use crate::model::event::{Event, EventId, EventValidationError};
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_SELECT_SQL: &str = "SELECT
    uuid,
    event_text,
    event_date
FROM events";

const EVENT_ORDER_SQL: &str = "ORDER BY event_date ASC, uuid ASC";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for event persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EventValidationError),
    Db(DbError),
    InvalidData(String),
    /// Connection has not gone through `open_db` migration bootstrap.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; open it via db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EventValidationError> for RepoError {
    fn from(value: EventValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for event storage and date-indexed queries.
///
/// Absence of matches is not an error: every query method returns a
/// possibly-empty `Vec`.
pub trait EventRepository {
    fn create_event(&self, event: &Event) -> RepoResult<EventId>;
    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>>;
    /// All events whose date falls on this day-of-month, any month/year.
    fn events_on_day(&self, day: u32) -> RepoResult<Vec<Event>>;
    /// All events whose date falls in this month, any year.
    fn events_in_month(&self, month: u32) -> RepoResult<Vec<Event>>;
    /// All events whose date falls in this calendar year.
    fn events_in_year(&self, year: i32) -> RepoResult<Vec<Event>>;
}

/// SQLite-backed event repository.
pub struct SqliteEventRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEventRepository<'conn> {
    /// Wraps a bootstrapped connection, verifying schema readiness first.
    ///
    /// Rejecting a stale or uninitialized connection here keeps later
    /// queries from failing with opaque SQL errors mid-request.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EventRepository for SqliteEventRepository<'_> {
    fn create_event(&self, event: &Event) -> RepoResult<EventId> {
        event.validate()?;

        self.conn.execute(
            "INSERT INTO events (uuid, event_text, event_date)
             VALUES (?1, ?2, ?3);",
            params![
                event.uuid.to_string(),
                event.text.as_str(),
                event.date_string(),
            ],
        )?;

        Ok(event.uuid)
    }

    fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn events_on_day(&self, day: u32) -> RepoResult<Vec<Event>> {
        self.query_by_date_part("%d", i64::from(day))
    }

    fn events_in_month(&self, month: u32) -> RepoResult<Vec<Event>> {
        self.query_by_date_part("%m", i64::from(month))
    }

    fn events_in_year(&self, year: i32) -> RepoResult<Vec<Event>> {
        self.query_by_date_part("%Y", i64::from(year))
    }
}

impl SqliteEventRepository<'_> {
    /// Matches one `strftime` component of `event_date` against `value`.
    ///
    /// `part` must be a literal format code (`%d`, `%m`, `%Y`), never user
    /// input.
    fn query_by_date_part(&self, part: &'static str, value: i64) -> RepoResult<Vec<Event>> {
        let mut stmt = self.conn.prepare(&format!(
            "{EVENT_SELECT_SQL}
             WHERE CAST(strftime('{part}', event_date) AS INTEGER) = ?1
             {EVENT_ORDER_SQL};"
        ))?;

        let mut rows = stmt.query(params![value])?;
        let mut events = Vec::new();
        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }
}

fn parse_event_row(row: &Row<'_>) -> RepoResult<Event> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in events.uuid"))
    })?;

    let date_text: String = row.get("event_date")?;
    let date = NaiveDate::parse_from_str(&date_text, "%Y-%m-%d").map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid date value `{date_text}` in events.event_date"
        ))
    })?;

    let event = Event {
        uuid,
        text: row.get("event_text")?,
        date,
    };
    event.validate()?;
    Ok(event)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "events")? {
        return Err(RepoError::MissingRequiredTable("events"));
    }

    for column in ["uuid", "event_text", "event_date"] {
        if !table_has_column(conn, "events", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "events",
                column,
            });
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &'static str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
