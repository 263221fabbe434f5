// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Yearly aggregation of daily statistics.
//!
//! One [`YearlyAccumulator`] exists per (location, year). Every processed day
//! whose duration for a given [`DayCounter`] is strictly positive adds one
//! whole day to that counter, however short the visibility was. Missing or
//! rejected days simply do not count; nothing is extrapolated.

use chrono::Datelike;
use qtty::Seconds;

use crate::classify::DailyStats;
use crate::error::{DayError, LocationId};
use crate::instant::SECONDS_PER_DAY;

/// The seven whole-day counters of a year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCounter {
    Sun,
    Moon,
    Overlap,
    NoSunNoMoon,
    Surya,
    Chandra,
    Agni,
}

impl DayCounter {
    pub const ALL: [DayCounter; 7] = [
        Self::Sun,
        Self::Moon,
        Self::Overlap,
        Self::NoSunNoMoon,
        Self::Surya,
        Self::Chandra,
        Self::Agni,
    ];

    /// Column label used in reports.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sun => "Total-Sun-Days",
            Self::Moon => "Total-Moon-Days",
            Self::Overlap => "Total-Overlap-Days",
            Self::NoSunNoMoon => "Total-No-Sun-No-Moon-Days",
            Self::Surya => "Surya-Days",
            Self::Chandra => "Chandra-Days",
            Self::Agni => "Agni-Days",
        }
    }

    /// The daily duration this counter looks at.
    pub fn duration(self, stats: &DailyStats) -> Seconds {
        match self {
            Self::Sun => stats.total_sun,
            Self::Moon => stats.total_moon,
            Self::Overlap => stats.total_overlap,
            Self::NoSunNoMoon => stats.total_darkness,
            Self::Surya => stats.surya,
            Self::Chandra => stats.chandra,
            Self::Agni => stats.agni,
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Whole-day counters with named fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DayCounts {
    pub sun_days: u32,
    pub moon_days: u32,
    pub overlap_days: u32,
    pub no_sun_no_moon_days: u32,
    pub surya_days: u32,
    pub chandra_days: u32,
    pub agni_days: u32,
}

/// Mutable per-(location, year) state.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyAccumulator {
    location: LocationId,
    year: i32,
    days_processed: u32,
    counts: [u32; 7],
    sums: [Seconds; 7],
}

impl YearlyAccumulator {
    /// A fresh accumulator with all counters at zero.
    pub fn new(location: impl Into<LocationId>, year: i32) -> Self {
        Self {
            location: location.into(),
            year,
            days_processed: 0,
            counts: [0; 7],
            sums: [Seconds::new(0.0); 7],
        }
    }

    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn days_processed(&self) -> u32 {
        self.days_processed
    }

    /// Fold one day into the counters.
    ///
    /// A day from another calendar year is rejected and the state is left
    /// untouched.
    pub fn accumulate(&mut self, stats: &DailyStats) -> Result<(), DayError> {
        if stats.date.year() != self.year {
            return Err(DayError::OutsideYear {
                date: stats.date,
                year: self.year,
            });
        }

        self.days_processed += 1;
        for counter in DayCounter::ALL {
            let duration = counter.duration(stats);
            let i = counter.index();
            if duration.value() > 0.0 {
                self.counts[i] += 1;
            }
            self.sums[i] = self.sums[i] + duration;
        }
        Ok(())
    }

    /// Close the year. The returned totals are read-only.
    pub fn finalize(self) -> YearlyTotals {
        log::info!(
            "{} {}: {} days processed",
            self.location,
            self.year,
            self.days_processed
        );
        YearlyTotals {
            location: self.location,
            year: self.year,
            days_processed: self.days_processed,
            counts: self.counts,
            sums: self.sums,
        }
    }
}

/// Finalized totals of one location and year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearlyTotals {
    location: LocationId,
    year: i32,
    days_processed: u32,
    counts: [u32; 7],
    sums: [Seconds; 7],
}

impl YearlyTotals {
    pub fn location(&self) -> &LocationId {
        &self.location
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Number of days folded in (at most 366).
    pub fn days_processed(&self) -> u32 {
        self.days_processed
    }

    /// Days on which `counter`'s duration was positive.
    pub fn count(&self, counter: DayCounter) -> u32 {
        self.counts[counter.index()]
    }

    /// Summed duration behind `counter` over the year.
    pub fn sum(&self, counter: DayCounter) -> Seconds {
        self.sums[counter.index()]
    }

    pub fn counts(&self) -> DayCounts {
        DayCounts {
            sun_days: self.count(DayCounter::Sun),
            moon_days: self.count(DayCounter::Moon),
            overlap_days: self.count(DayCounter::Overlap),
            no_sun_no_moon_days: self.count(DayCounter::NoSunNoMoon),
            surya_days: self.count(DayCounter::Surya),
            chandra_days: self.count(DayCounter::Chandra),
            agni_days: self.count(DayCounter::Agni),
        }
    }

    /// A summed duration expressed as a rounded number of 24-hour days.
    ///
    /// Ties round to even.
    pub fn whole_days(duration: Seconds) -> i64 {
        (duration.value() / SECONDS_PER_DAY).round_ties_even() as i64
    }
}
