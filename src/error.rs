// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types.
//!
//! Every [`DayError`] is scoped to a single day: the day is dropped from the
//! daily output and the yearly counters, and the run carries on. Callers
//! collect them as [`Diagnostic`]s.

use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::events::Body;

/// Identifier of an observing location (e.g. `"Varanasi"`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationId(String);

impl LocationId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LocationId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Reasons a day is excluded from the statistics.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DayError {
    /// A rise event comes after the set event of the same pair.
    #[error("{body} rise after set in pair {pair}")]
    MalformedEventOrder { body: Body, pair: usize },

    /// The two moon intervals of a day are not disjoint and ordered.
    #[error("moon intervals overlap or are out of order")]
    OverlappingMoonIntervals,

    /// More rise/set pairs than a lunar day can produce.
    #[error("{0} moon rise/set pairs in one day (at most 2)")]
    TooManyMoonIntervals(usize),

    /// The event provider had no record for this day.
    #[error("no event data for {location} on {date}")]
    MissingProviderData { location: LocationId, date: NaiveDate },

    /// A daily record was offered to the accumulator of another year.
    #[error("{date} does not belong to year {year}")]
    OutsideYear { date: NaiveDate, year: i32 },
}

/// A per-day error together with where and when it happened.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub location: LocationId,
    pub date: NaiveDate,
    pub error: DayError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.location, self.date, self.error)
    }
}

/// Errors from writing CSV reports.
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
