// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time interval implementation and interval-list algebra.
//!
//! This module provides:
//! - [`Interval<T>`]: generic interval over any [`TimeInstant`]
//! - [`DayInterval`]: alias for `Interval<DayTime>`, the daily visibility span
//! - [`intersect`], [`union`], [`complement_within`], [`total_duration`]:
//!   pure set operations over interval lists
//!
//! Intervals are half-open ranges `[start, end)`. Every operation is total
//! for well-formed input (`start <= end`); lists are small (a handful of
//! intervals per day), so the focus is on edge cases rather than speed.

use super::instant::{DayTime, TimeInstant};
use qtty::Seconds;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

/// Represents an interval between two instants.
///
/// # Examples
///
/// ```
/// use skyday::{DayTime, Interval};
/// use qtty::Seconds;
///
/// let sun = Interval::new(DayTime::from_hms(6, 0, 0), DayTime::from_hms(18, 0, 0));
/// assert_eq!(sun.duration(), Seconds::new(43_200.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval<T: TimeInstant> {
    pub start: T,
    pub end: T,
}

/// Interval within one calendar day.
pub type DayInterval = Interval<DayTime>;

impl<T: TimeInstant> Interval<T> {
    /// Creates a new interval between two time instants.
    pub fn new(start: T, end: T) -> Self {
        Interval { start, end }
    }

    /// Returns the duration of the interval as the difference between end and start.
    pub fn duration(&self) -> T::Duration {
        self.end.difference(&self.start)
    }

    /// `true` when the interval covers no time (`start >= end`).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.start < self.end)
    }

    /// `true` when `instant` lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, instant: T) -> bool {
        self.start <= instant && instant < self.end
    }

    /// Returns the overlapping sub-interval between `self` and `other`.
    ///
    /// If one interval ends exactly when the other starts, the intersection
    /// is empty and `None` is returned.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let start = if self.start >= other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end <= other.end {
            self.end
        } else {
            other.end
        };

        if start < end {
            Some(Self::new(start, end))
        } else {
            None
        }
    }
}

// Display implementation
impl<T: TimeInstant + fmt::Display> fmt::Display for Interval<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

// Specific implementation for daily intervals
impl Interval<DayTime> {
    /// The whole day window `[00:00, 24:00)`.
    pub const fn day() -> Self {
        Interval {
            start: DayTime::MIDNIGHT,
            end: DayTime::END_OF_DAY,
        }
    }

    /// Returns the duration in seconds as a floating-point value.
    pub fn duration_seconds(&self) -> f64 {
        self.duration().value()
    }

    /// Clip both ends into the day window.
    pub fn clamp_to_day(&self) -> Self {
        Self::new(self.start.clamp_to_day(), self.end.clamp_to_day())
    }
}

// Serde support for daily intervals
//
// Endpoints are written as seconds since local midnight.
#[cfg(feature = "serde")]
impl Serialize for Interval<DayTime> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Interval", 2)?;
        s.serialize_field("start_s", &self.start.value())?;
        s.serialize_field("end_s", &self.end.value())?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Interval<DayTime> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            start_s: f64,
            end_s: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Ok(Interval::new(DayTime::new(raw.start_s), DayTime::new(raw.end_s)))
    }
}

fn by_start<T: TimeInstant>(a: &Interval<T>, b: &Interval<T>) -> Ordering {
    a.start.partial_cmp(&b.start).unwrap_or(Ordering::Equal)
}

/// Returns the pairwise intersection of two interval lists.
///
/// Every interval of `a` is intersected with every interval of `b`; empty
/// results (including touching edges) are dropped. Neither input needs to be
/// sorted; the output is ordered by start.
pub fn intersect<T: TimeInstant>(a: &[Interval<T>], b: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut result: Vec<Interval<T>> = a
        .iter()
        .flat_map(|x| b.iter().filter_map(move |y| x.intersection(y)))
        .collect();
    result.sort_by(by_start);
    result
}

/// Merges overlapping or adjacent intervals into a minimal disjoint cover.
///
/// The result is sorted by start. Empty intervals contribute nothing.
pub fn union<T: TimeInstant>(intervals: &[Interval<T>]) -> Vec<Interval<T>> {
    let mut sorted: Vec<Interval<T>> = intervals.iter().copied().filter(|p| !p.is_empty()).collect();
    sorted.sort_by(by_start);

    let mut merged: Vec<Interval<T>> = Vec::with_capacity(sorted.len());
    for p in sorted {
        match merged.last_mut() {
            Some(last) if p.start <= last.end => {
                if p.end > last.end {
                    last.end = p.end;
                }
            }
            _ => merged.push(p),
        }
    }
    merged
}

/// Returns the gaps (complement) of `periods` within the bounding `outer` interval.
///
/// `periods` may be unsorted and overlapping; they are merged with [`union`]
/// first, and anything outside `outer` is ignored. The function runs in a
/// single pass over the merged list.
///
/// # Returns
/// The complement intervals (gaps) in chronological order.
pub fn complement_within<T: TimeInstant>(
    outer: Interval<T>,
    periods: &[Interval<T>],
) -> Vec<Interval<T>> {
    let mut gaps = Vec::new();
    let mut cursor = outer.start;
    for p in union(periods) {
        if p.start >= outer.end {
            break;
        }
        if p.start > cursor {
            gaps.push(Interval::new(cursor, p.start));
        }
        if p.end > cursor {
            cursor = p.end;
        }
    }
    if cursor < outer.end {
        gaps.push(Interval::new(cursor, outer.end));
    }
    gaps
}

/// Sum of the durations of all intervals; zero for an empty list.
pub fn total_duration<T: TimeInstant>(intervals: &[Interval<T>]) -> T::Duration {
    intervals
        .iter()
        .fold(T::zero_duration(), |acc, p| acc + p.duration())
}

/// Duration covered by a daily interval list, in seconds.
#[inline]
pub fn day_duration(intervals: &[DayInterval]) -> Seconds {
    total_duration(intervals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate};
    use proptest::prelude::*;

    fn hm(h: u32, m: u32) -> DayTime {
        DayTime::from_hms(h, m, 0)
    }

    fn span(a: u32, b: u32) -> DayInterval {
        Interval::new(hm(a, 0), hm(b, 0))
    }

    #[test]
    fn test_interval_creation() {
        let p = span(6, 18);
        assert_eq!(p.start, hm(6, 0));
        assert_eq!(p.end, hm(18, 0));
        assert_eq!(p.duration_seconds(), 43_200.0);
    }

    #[test]
    fn test_interval_display() {
        let display = format!("{}", span(6, 18));
        assert_eq!(display, "06:00:00 to 18:00:00");
    }

    #[test]
    fn test_interval_is_empty_and_contains() {
        assert!(Interval::new(hm(5, 0), hm(5, 0)).is_empty());
        let p = span(6, 18);
        assert!(!p.is_empty());
        assert!(p.contains(hm(6, 0)));
        assert!(p.contains(hm(17, 59)));
        assert!(!p.contains(hm(18, 0)));
    }

    #[test]
    fn test_interval_intersection_overlap() {
        let overlap = span(6, 18).intersection(&span(17, 19)).expect("expected overlap");
        assert_eq!(overlap, span(17, 18));
    }

    #[test]
    fn test_interval_intersection_touching_edges() {
        assert_eq!(span(6, 18).intersection(&span(18, 20)), None);
    }

    #[test]
    fn test_day_window_and_clamp() {
        assert_eq!(Interval::day().duration_seconds(), 86_400.0);
        let wild = Interval::new(DayTime::new(-100.0), DayTime::new(90_000.0));
        assert_eq!(wild.clamp_to_day(), Interval::day());
    }

    #[test]
    fn test_intersect_pairwise_unsorted() {
        let moon = vec![span(20, 23), span(0, 7)];
        let sun = vec![span(6, 18)];
        assert_eq!(intersect(&sun, &moon), vec![span(6, 7)]);
        assert_eq!(intersect(&moon, &sun), vec![span(6, 7)]);
    }

    #[test]
    fn test_intersect_sorted_output() {
        let a = vec![span(0, 24)];
        let b = vec![span(20, 23), span(1, 3)];
        assert_eq!(intersect(&a, &b), vec![span(1, 3), span(20, 23)]);
    }

    #[test]
    fn test_intersect_empty_inputs() {
        assert!(intersect::<DayTime>(&[], &[span(1, 2)]).is_empty());
        assert!(intersect(&[span(1, 2)], &[]).is_empty());
    }

    #[test]
    fn test_union_merges_overlapping_and_adjacent() {
        let merged = union(&[span(17, 19), span(6, 18), span(19, 20), span(22, 23)]);
        assert_eq!(merged, vec![span(6, 20), span(22, 23)]);
    }

    #[test]
    fn test_union_drops_empty_and_nested() {
        let merged = union(&[span(3, 3), span(1, 10), span(2, 4)]);
        assert_eq!(merged, vec![span(1, 10)]);
    }

    #[test]
    fn test_complement_within_gaps() {
        let gaps = complement_within(Interval::day(), &[span(6, 18), span(20, 23)]);
        assert_eq!(gaps, vec![span(0, 6), span(18, 20), span(23, 24)]);
    }

    #[test]
    fn test_complement_within_empty() {
        assert_eq!(complement_within(Interval::day(), &[]), vec![Interval::day()]);
    }

    #[test]
    fn test_complement_within_full() {
        assert!(complement_within(Interval::day(), &[span(0, 24)]).is_empty());
    }

    #[test]
    fn test_complement_within_unsorted_overlapping() {
        let gaps = complement_within(Interval::day(), &[span(17, 19), span(6, 18)]);
        assert_eq!(gaps, vec![span(0, 6), span(19, 24)]);
    }

    #[test]
    fn test_complement_within_ignores_outside() {
        let outer = span(6, 18);
        let gaps = complement_within(outer, &[span(0, 7), span(20, 23)]);
        assert_eq!(gaps, vec![span(7, 18)]);
    }

    #[test]
    fn test_total_duration() {
        assert_eq!(day_duration(&[]), Seconds::new(0.0));
        assert_eq!(day_duration(&[span(18, 20), span(23, 24), span(0, 6)]), Seconds::new(39_600.0));
    }

    #[test]
    fn test_complement_intersect_roundtrip() {
        // above(min) ∩ complement(above(max)) = between(min, max)
        let above_min = vec![span(1, 3), span(5, 9)];
        let above_max = vec![span(2, 4), span(7, 8)];
        let below_max = complement_within(span(0, 10), &above_max);
        let between = intersect(&above_min, &below_max);
        assert_eq!(between, vec![span(1, 2), span(5, 7), span(8, 9)]);
    }

    #[test]
    fn test_algebra_over_naive_date_time() {
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let at = |d: u32, h: u32| day.with_day(d).unwrap().and_hms_opt(h, 0, 0).unwrap();
        // Moon up across midnight, sun up the next morning.
        let moon = vec![Interval::new(at(1, 20), at(2, 9))];
        let sun = vec![Interval::new(at(2, 6), at(2, 18))];
        let overlap = intersect(&sun, &moon);
        assert_eq!(overlap, vec![Interval::new(at(2, 6), at(2, 9))]);
        assert_eq!(total_duration(&overlap), chrono::Duration::hours(3));
    }

    fn arb_interval() -> impl Strategy<Value = DayInterval> {
        (0u32..=86_400, 0u32..=86_400).prop_map(|(a, b)| {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            Interval::new(DayTime::new(f64::from(lo)), DayTime::new(f64::from(hi)))
        })
    }

    proptest! {
        #[test]
        fn prop_complement_partitions_day(list in prop::collection::vec(arb_interval(), 0..5)) {
            let covered = day_duration(&union(&list));
            let gaps = day_duration(&complement_within(Interval::day(), &list));
            prop_assert_eq!((covered + gaps).value(), 86_400.0);
        }

        #[test]
        fn prop_union_is_disjoint_and_sorted(list in prop::collection::vec(arb_interval(), 0..5)) {
            let merged = union(&list);
            for pair in merged.windows(2) {
                prop_assert!(pair[0].end < pair[1].start);
            }
        }

        #[test]
        fn prop_intersection_bounded_by_inputs(a in arb_interval(), b in arb_interval()) {
            let both = day_duration(&intersect(&[a], &[b]));
            prop_assert!(both <= a.duration());
            prop_assert!(both <= b.duration());
        }
    }
}
