// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Daily classifier.
//!
//! [`classify_day`] runs the interval builder, the interval algebra and the
//! phase gate over one [`DailyEvents`] record and produces a [`DailyStats`]:
//!
//! ```text
//! Overlap          = Sun ∩ Moon
//! Darkness         = [00:00, 24:00) \ (Sun ∪ Moon)
//! CrescentVisible  = Moon            if the phase is crescent, else ∅
//! Surya            = |Sun| − |Sun ∩ CrescentVisible|
//! Chandra          = |Moon|
//! Agni             = |Darkness|
//! ```

use chrono::NaiveDate;
use qtty::Seconds;

use crate::error::{DayError, LocationId};
use crate::events::{self, DailyEvents};
use crate::period::{complement_within, day_duration, intersect, union, DayInterval, Interval};
use crate::phase::{MoonPhase, PhaseGate};

/// The interval lists carried by a [`DailyStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalClass {
    Sun,
    Moon,
    Overlap,
    Darkness,
    CrescentVisible,
}

/// How a multi-segment interval list maps onto a single start/end pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpanPolicy {
    /// Bounds of the earliest-starting segment.
    #[default]
    EarliestSegment,
    /// First start and last end across all segments.
    Envelope,
}

impl SpanPolicy {
    /// The surfaced start/end pair, or `None` for an empty list.
    pub fn surface(self, intervals: &[DayInterval]) -> Option<DayInterval> {
        let earliest = intervals
            .iter()
            .copied()
            .reduce(|a, b| if b.start < a.start { b } else { a })?;
        match self {
            Self::EarliestSegment => Some(earliest),
            Self::Envelope => {
                let end = intervals
                    .iter()
                    .map(|p| p.end)
                    .fold(earliest.end, |acc, e| acc.max(e));
                Some(Interval::new(earliest.start, end))
            }
        }
    }
}

/// Derived intervals and durations for one location and day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyStats {
    pub location: LocationId,
    pub date: NaiveDate,
    pub phase: MoonPhase,

    pub sun: Vec<DayInterval>,
    pub moon: Vec<DayInterval>,
    pub overlap: Vec<DayInterval>,
    pub darkness: Vec<DayInterval>,
    pub crescent_visible: Vec<DayInterval>,

    /// Total-Sun-Time.
    pub total_sun: Seconds,
    /// Total-Moon-Time.
    pub total_moon: Seconds,
    /// Total-Overlap-Time.
    pub total_overlap: Seconds,
    /// Total-No-Moon-No-Sun-Time.
    pub total_darkness: Seconds,
    /// Total-Moon-Visible-Time within the crescent window.
    pub total_crescent_moon: Seconds,
    pub surya: Seconds,
    pub chandra: Seconds,
    pub agni: Seconds,
}

impl DailyStats {
    pub fn intervals(&self, class: IntervalClass) -> &[DayInterval] {
        match class {
            IntervalClass::Sun => &self.sun,
            IntervalClass::Moon => &self.moon,
            IntervalClass::Overlap => &self.overlap,
            IntervalClass::Darkness => &self.darkness,
            IntervalClass::CrescentVisible => &self.crescent_visible,
        }
    }

    /// The start/end pair reported for `class` under `policy`.
    pub fn span(&self, class: IntervalClass, policy: SpanPolicy) -> Option<DayInterval> {
        policy.surface(self.intervals(class))
    }
}

fn non_negative(value: Seconds) -> Seconds {
    Seconds::new(value.value().max(0.0))
}

/// Classify one day.
///
/// Fails only when the raw events are malformed; see [`events::build`].
/// The result depends on nothing but the inputs, so classifying the same
/// record twice yields identical stats.
pub fn classify_day(record: &DailyEvents, gate: &PhaseGate) -> Result<DailyStats, DayError> {
    let built = events::build(record)?;
    let sun = built.sun;
    let moon = built.moon;

    let overlap = intersect(&sun, &moon);

    let mut visible = sun.clone();
    visible.extend_from_slice(&moon);
    let darkness = complement_within(Interval::day(), &union(&visible));

    let phase = gate.classify(record.phase);
    let crescent_visible = gate.crescent_visible(record.phase, &moon);

    let total_sun = day_duration(&sun);
    let total_moon = day_duration(&moon);
    let total_darkness = day_duration(&darkness);
    let surya = non_negative(total_sun - day_duration(&intersect(&sun, &crescent_visible)));

    let stats = DailyStats {
        location: record.location.clone(),
        date: record.date,
        phase,
        total_overlap: day_duration(&overlap),
        total_crescent_moon: day_duration(&crescent_visible),
        total_sun,
        total_moon,
        total_darkness,
        surya,
        chandra: total_moon,
        agni: total_darkness,
        sun,
        moon,
        overlap,
        darkness,
        crescent_visible,
    };

    log::debug!(
        "{} {}: sun {:.0}s, moon {:.0}s, overlap {:.0}s, dark {:.0}s, {:?}",
        stats.location,
        stats.date,
        stats.total_sun.value(),
        stats.total_moon.value(),
        stats.total_overlap.value(),
        stats.total_darkness.value(),
        stats.phase,
    );
    Ok(stats)
}
