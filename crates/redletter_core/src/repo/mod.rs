//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for events.
//! - Isolate SQLite query details from service/view orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Event::validate()` before persistence.
//! - An empty match set is an empty `Vec`, never an error; the not-found
//!   framing for explicit lookups lives in the view layer.

pub mod event_repo;
