// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Daily Sun/Moon Visibility
//!
//! This crate turns per-day rise/set events of the Sun and the Moon into
//! visibility intervals, derives their overlap and the dark remainder of the
//! day, and folds the results into yearly whole-day counts per location.
//!
//! # Core types
//!
//! - [`DayTime`] — seconds since local midnight, in `[00:00, 24:00]`.
//! - [`Interval<T>`] — a generic interval over any [`TimeInstant`].
//! - [`DayInterval`] — type alias for `Interval<DayTime>`.
//! - [`DailyEvents`] — raw rise/set events and phase angle of one day.
//! - [`DailyStats`] — derived intervals and durations of one day.
//! - [`YearlyAccumulator`] / [`YearlyTotals`] — whole-day counters of a year.
//!
//! # Pipeline
//!
//! | Step | Entry point |
//! |------|-------------|
//! | events → intervals | [`build`] |
//! | interval algebra | [`intersect`], [`union`], [`complement_within`] |
//! | phase gate | [`PhaseGate`] |
//! | per-day stats | [`classify_day`] |
//! | yearly counts | [`YearlyAccumulator`] |
//! | provider-driven runs | [`run_year`], [`run_range`] |
//! | CSV output | [`report`] |
//!
//! # Derived quantities
//!
//! - **Surya** — sun time not shared with a crescent-phase moon.
//! - **Chandra** — total moon time.
//! - **Agni** — time with neither body up.
//!
//! ```
//! use skyday::{classify_day, DailyEvents, DayTime, PhaseGate, RiseSet};
//! use chrono::NaiveDate;
//! use qtty::{Degrees, Seconds};
//!
//! let date = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
//! let events = DailyEvents::new("Cairo", date, Degrees::new(180.0))
//!     .with_sun(RiseSet::both(DayTime::from_hms(6, 0, 0), DayTime::from_hms(18, 0, 0)))
//!     .with_moon(RiseSet::both(DayTime::from_hms(20, 0, 0), DayTime::from_hms(23, 0, 0)));
//!
//! let stats = classify_day(&events, &PhaseGate::default()).unwrap();
//! assert_eq!(stats.agni, Seconds::new(11.0 * 3600.0));
//! ```

mod classify;
mod error;
mod events;
mod instant;
mod period;
mod phase;
mod provider;
pub mod report;
mod yearly;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use classify::{classify_day, DailyStats, IntervalClass, SpanPolicy};
pub use error::{DayError, Diagnostic, LocationId, ReportError};
pub use events::{
    build, build_moon, build_sun, Body, DailyEvents, DayIntervals, RiseSet, MAX_MOON_INTERVALS,
};
pub use instant::{DayTime, TimeInstant, SECONDS_PER_DAY};
pub use period::{
    complement_within, day_duration, intersect, total_duration, union, DayInterval, Interval,
};
pub use phase::{MoonPhase, PhaseGate};
pub use provider::{
    dates_of_year, run_range, run_year, EventProvider, InMemoryProvider, RunOptions, YearRun,
};
pub use yearly::{DayCounter, DayCounts, YearlyAccumulator, YearlyTotals};
