//! Transport-independent view handlers.
//!
//! # Responsibility
//! - Shape query results into the payloads a page or API would render.
//! - Keep the not-found policy for explicit lookups in one place.
//!
//! # Invariants
//! - Handlers take parsed parameters and an injected repository; no
//!   framework types appear in any signature.

pub mod calendar;
