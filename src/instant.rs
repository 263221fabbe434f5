// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Wall-clock instants within one calendar day.
//!
//! [`DayTime`] is the time point used by every daily computation in this
//! crate. It stores a [`Seconds`] quantity measured from local midnight, so
//! it is layout-identical to a single `f64`. The valid range is
//! `[0, 86 400]`: the upper bound is the exclusive end-of-day marker and only
//! ever appears as the end of an interval.
//!
//! [`TimeInstant`] abstracts over instants that can bound an
//! [`Interval`](crate::Interval); the interval algebra is written against it
//! and does not care whether the instant is a [`DayTime`] or a full
//! `chrono::NaiveDateTime`.

use chrono::{NaiveDateTime, NaiveTime, Timelike};
use qtty::Seconds;
use std::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of one civil day in seconds.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

// ═══════════════════════════════════════════════════════════════════════════
// DayTime
// ═══════════════════════════════════════════════════════════════════════════

/// A time point within one calendar day, in seconds since local midnight.
///
/// Values are already localized by whoever produced them; no time-zone logic
/// lives here.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct DayTime {
    seconds: Seconds,
}

impl DayTime {
    /// Local midnight, the start of the day window.
    pub const MIDNIGHT: Self = Self::new(0.0);

    /// Midnight of the following day, the end of the day window.
    pub const END_OF_DAY: Self = Self::new(SECONDS_PER_DAY);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw number of seconds since midnight.
    #[inline]
    pub const fn new(seconds: f64) -> Self {
        Self {
            seconds: Seconds::new(seconds),
        }
    }

    /// Create from a [`Seconds`] quantity.
    #[inline]
    pub const fn from_seconds(seconds: Seconds) -> Self {
        Self { seconds }
    }

    /// Create from hours, minutes and seconds.
    ///
    /// `from_hms(24, 0, 0)` is [`DayTime::END_OF_DAY`]. No range check is
    /// performed; out-of-day values are clamped by the interval builder.
    ///
    /// ```
    /// use skyday::DayTime;
    ///
    /// assert_eq!(DayTime::from_hms(6, 30, 0).value(), 23_400.0);
    /// ```
    pub fn from_hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self::new(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + f64::from(seconds))
    }

    /// Create from a `chrono::NaiveTime`, keeping sub-second precision.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        let whole = f64::from(time.num_seconds_from_midnight());
        let fraction = f64::from(time.nanosecond()) / 1e9;
        Self::new(whole + fraction)
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity.
    #[inline]
    pub const fn quantity(&self) -> Seconds {
        self.seconds
    }

    /// The underlying scalar value in seconds.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.seconds.value()
    }

    /// `true` for the end-of-day marker (or anything past it).
    #[inline]
    pub fn is_end_of_day(&self) -> bool {
        self.value() >= SECONDS_PER_DAY
    }

    /// Clamp into the day window `[0, 86 400]`. `NaN` maps to midnight.
    #[inline]
    pub fn clamp_to_day(self) -> Self {
        Self::new(self.value().max(0.0).min(SECONDS_PER_DAY))
    }

    /// Whole seconds since midnight, rounded to the nearest second.
    #[inline]
    pub fn rounded_seconds(&self) -> u64 {
        self.value().max(0.0).round() as u64
    }

    /// Convert to a `chrono::NaiveTime`.
    ///
    /// Returns `None` for the end-of-day marker, which has no representation
    /// as a time of day.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        if self.is_end_of_day() || self.value() < 0.0 {
            return None;
        }
        let secs = self.value().floor();
        let nanos = ((self.value() - secs) * 1e9) as u32;
        NaiveTime::from_num_seconds_from_midnight_opt(secs as u32, nanos)
    }

    // ── min / max ─────────────────────────────────────────────────────

    /// Element-wise minimum.
    #[inline]
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    /// Element-wise maximum.
    #[inline]
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other
        } else {
            self
        }
    }
}

/// Split a whole number of seconds into `(hours, minutes, seconds)`.
#[inline]
pub(crate) fn split_hms(total: u64) -> (u64, u64, u64) {
    (total / 3600, (total % 3600) / 60, total % 60)
}

// ── Display ───────────────────────────────────────────────────────────────

/// Renders as a `HH:MM:SS` clock string; the end-of-day marker is
/// `24:00:00`.
impl fmt::Display for DayTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, m, s) = split_hms(self.rounded_seconds());
        write!(f, "{h:02}:{m:02}:{s:02}")
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for DayTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for DayTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for DayTime {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.seconds + rhs)
    }
}

impl Sub<Seconds> for DayTime {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        Self::from_seconds(self.seconds - rhs)
    }
}

impl Sub for DayTime {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.seconds - rhs.seconds
    }
}

impl From<DayTime> for Seconds {
    #[inline]
    fn from(time: DayTime) -> Self {
        time.seconds
    }
}

impl From<NaiveTime> for DayTime {
    #[inline]
    fn from(time: NaiveTime) -> Self {
        Self::from_naive_time(time)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeInstant trait
// ═══════════════════════════════════════════════════════════════════════════

/// Trait for types that represent a point in time.
///
/// This trait allows [`Interval`](crate::Interval) and the interval set
/// operations to work with any instant that has an additive duration type.
pub trait TimeInstant: Copy + Clone + PartialEq + PartialOrd + Sized {
    /// The duration type used for arithmetic operations.
    type Duration: Copy + PartialOrd + Add<Output = Self::Duration> + Sub<Output = Self::Duration>;

    /// The empty duration, used as the sum of no intervals.
    fn zero_duration() -> Self::Duration;

    /// Compute the difference between two time instants.
    fn difference(&self, other: &Self) -> Self::Duration;

    /// Add a duration to this time instant.
    fn add_duration(&self, duration: Self::Duration) -> Self;

    /// Subtract a duration from this time instant.
    fn sub_duration(&self, duration: Self::Duration) -> Self;
}

impl TimeInstant for DayTime {
    type Duration = Seconds;

    #[inline]
    fn zero_duration() -> Self::Duration {
        Seconds::new(0.0)
    }

    #[inline]
    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }

    #[inline]
    fn add_duration(&self, duration: Self::Duration) -> Self {
        *self + duration
    }

    #[inline]
    fn sub_duration(&self, duration: Self::Duration) -> Self {
        *self - duration
    }
}

impl TimeInstant for NaiveDateTime {
    type Duration = chrono::Duration;

    fn zero_duration() -> Self::Duration {
        chrono::Duration::zero()
    }

    fn difference(&self, other: &Self) -> Self::Duration {
        *self - *other
    }

    fn add_duration(&self, duration: Self::Duration) -> Self {
        *self + duration
    }

    fn sub_duration(&self, duration: Self::Duration) -> Self {
        *self - duration
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
