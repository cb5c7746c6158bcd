//! Strict date-text parsing.
//!
//! # Responsibility
//! - Normalize user date input and resolve it to one canonical date.
//! - Reject anything that does not match an accepted format exactly.
//!
//! # Invariants
//! - The format list is ordered; the first exact match wins.
//! - No fuzzy or partial inference — `"january-ish 2020"` never parses.

use chrono::NaiveDate;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Accepted date renderings, tried in order.
///
/// All three resolve to the same canonical date for the same day, e.g.
/// `2020-01-21`, `2020年01月21日` and `2020/01/21`.
const ACCEPTED_FORMATS: &[&str] = &["%Y-%m-%d", "%Y年%m月%d日", "%Y/%m/%d"];

pub type DateTextResult = Result<NaiveDate, DateTextError>;

/// Failure to resolve user date text to a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateTextError {
    /// Nothing left after whitespace stripping.
    Empty,
    /// Input matched no accepted format, or named an impossible date.
    Unparseable { input: String },
}

impl Display for DateTextError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "date text is empty"),
            Self::Unparseable { input } => {
                write!(f, "date text `{input}` matches no accepted format")
            }
        }
    }
}

impl Error for DateTextError {}

/// Parses free-form date text into a canonical calendar date.
///
/// All whitespace is stripped first, including ideographic spaces — CJK
/// input such as `2020年 01月 21日` is expected here. The compacted text is
/// then matched against [`ACCEPTED_FORMATS`] in order. Impossible dates
/// (`2020-13-01`) fall through every format and report as unparseable.
pub fn parse_date_text(input: &str) -> DateTextResult {
    let compact: String = input.chars().filter(|ch| !ch.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(DateTextError::Empty);
    }

    for format in ACCEPTED_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&compact, format) {
            return Ok(date);
        }
    }

    Err(DateTextError::Unparseable { input: compact })
}
