// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Raw daily rise/set events and the interval builder.
//!
//! The event provider reports, per location and calendar day, at most one
//! sun rise/set pair and up to two moon rise/set pairs (the lunar day is
//! about 24h50m, so the moon can set in the morning and rise again in the
//! evening). [`build`] turns those events into clipped visibility intervals:
//!
//! | rise | set | interval |
//! |------|-----|----------|
//! | `r` | `s` | `[r, s]` (error if `r > s`) |
//! | `r` | — | `[r, 24:00]` |
//! | — | `s` | `[00:00, s]` |
//! | — | — | none |

use chrono::NaiveDate;
use qtty::Degrees;
use std::fmt;

use crate::error::{DayError, LocationId};
use crate::instant::DayTime;
use crate::period::{DayInterval, Interval};

/// Upper bound on moon intervals within one calendar day.
pub const MAX_MOON_INTERVALS: usize = 2;

/// The two bodies tracked per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Body {
    Sun,
    Moon,
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sun => f.write_str("sun"),
            Self::Moon => f.write_str("moon"),
        }
    }
}

/// One rise/set pair; either event may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RiseSet {
    pub rise: Option<DayTime>,
    pub set: Option<DayTime>,
}

impl RiseSet {
    pub fn new(rise: Option<DayTime>, set: Option<DayTime>) -> Self {
        Self { rise, set }
    }

    /// Both events happen within the day.
    pub fn both(rise: DayTime, set: DayTime) -> Self {
        Self::new(Some(rise), Some(set))
    }

    /// The body rises and stays up past midnight.
    pub fn rise_only(rise: DayTime) -> Self {
        Self::new(Some(rise), None)
    }

    /// The body was already up at midnight and sets during the day.
    pub fn set_only(set: DayTime) -> Self {
        Self::new(None, Some(set))
    }

    /// Expand a provider's single moonrise/moonset reading into pairs.
    ///
    /// Ephemeris libraries usually return one moonrise and one moonset per
    /// day. When the set comes first (or both readings coincide), the moon
    /// was up at midnight, set and rose again later, which is two separate
    /// pairs.
    ///
    /// ```
    /// use skyday::{DayTime, RiseSet};
    ///
    /// let pairs = RiseSet::split_moon(
    ///     Some(DayTime::from_hms(20, 0, 0)),
    ///     Some(DayTime::from_hms(7, 0, 0)),
    /// );
    /// assert_eq!(pairs, vec![
    ///     RiseSet::set_only(DayTime::from_hms(7, 0, 0)),
    ///     RiseSet::rise_only(DayTime::from_hms(20, 0, 0)),
    /// ]);
    /// ```
    pub fn split_moon(rise: Option<DayTime>, set: Option<DayTime>) -> Vec<RiseSet> {
        match (rise, set) {
            (None, None) => Vec::new(),
            (Some(r), Some(s)) if r >= s => vec![Self::set_only(s), Self::rise_only(r)],
            _ => vec![Self::new(rise, set)],
        }
    }

    /// The visibility interval implied by this pair, clipped to the day.
    ///
    /// `pair` is the 1-based index used in error reports. Returns `Ok(None)`
    /// when there is no event or the clipped interval is empty.
    pub fn to_interval(&self, body: Body, pair: usize) -> Result<Option<DayInterval>, DayError> {
        let (start, end) = match (self.rise, self.set) {
            (None, None) => return Ok(None),
            (Some(rise), None) => (rise, DayTime::END_OF_DAY),
            (None, Some(set)) => (DayTime::MIDNIGHT, set),
            (Some(rise), Some(set)) => {
                if rise > set {
                    return Err(DayError::MalformedEventOrder { body, pair });
                }
                (rise, set)
            }
        };

        let interval = Interval::new(start, end).clamp_to_day();
        Ok((!interval.is_empty()).then_some(interval))
    }
}

/// Everything the provider reports for one location and calendar day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyEvents {
    pub location: LocationId,
    pub date: NaiveDate,
    pub sun: Option<RiseSet>,
    pub moon: Vec<RiseSet>,
    /// Moon phase angle, sampled once for the day.
    pub phase: Degrees,
}

impl DailyEvents {
    /// A record with no rise/set events (both bodies down all day).
    pub fn new(location: impl Into<LocationId>, date: NaiveDate, phase: Degrees) -> Self {
        Self {
            location: location.into(),
            date,
            sun: None,
            moon: Vec::new(),
            phase,
        }
    }

    pub fn with_sun(mut self, sun: RiseSet) -> Self {
        self.sun = Some(sun);
        self
    }

    pub fn with_moon(mut self, moon: RiseSet) -> Self {
        self.moon.push(moon);
        self
    }
}

/// Sun and moon visibility intervals for one day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayIntervals {
    /// At most one interval.
    pub sun: Vec<DayInterval>,
    /// At most [`MAX_MOON_INTERVALS`] disjoint intervals, ordered.
    pub moon: Vec<DayInterval>,
}

/// Build the sun interval list (0 or 1 entries).
pub fn build_sun(sun: Option<&RiseSet>) -> Result<Vec<DayInterval>, DayError> {
    match sun {
        Some(pair) => Ok(pair.to_interval(Body::Sun, 1)?.into_iter().collect()),
        None => Ok(Vec::new()),
    }
}

/// Build the moon interval list (0, 1 or 2 entries).
pub fn build_moon(pairs: &[RiseSet]) -> Result<Vec<DayInterval>, DayError> {
    if pairs.len() > MAX_MOON_INTERVALS {
        return Err(DayError::TooManyMoonIntervals(pairs.len()));
    }

    let mut intervals = Vec::with_capacity(pairs.len());
    for (i, pair) in pairs.iter().enumerate() {
        if let Some(interval) = pair.to_interval(Body::Moon, i + 1)? {
            intervals.push(interval);
        }
    }

    if let [first, second] = intervals.as_slice() {
        if second.start < first.end {
            return Err(DayError::OverlappingMoonIntervals);
        }
    }
    Ok(intervals)
}

/// Build both bodies' intervals for one day.
pub fn build(events: &DailyEvents) -> Result<DayIntervals, DayError> {
    Ok(DayIntervals {
        sun: build_sun(events.sun.as_ref())?,
        moon: build_moon(&events.moon)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> DayTime {
        DayTime::from_hms(h, m, 0)
    }

    fn span(a: u32, b: u32) -> DayInterval {
        Interval::new(hm(a, 0), hm(b, 0))
    }

    #[test]
    fn test_sun_full_pair() {
        let sun = build_sun(Some(&RiseSet::both(hm(6, 0), hm(18, 0)))).unwrap();
        assert_eq!(sun, vec![span(6, 18)]);
    }

    #[test]
    fn test_no_events_no_interval() {
        assert!(build_sun(None).unwrap().is_empty());
        assert!(build_sun(Some(&RiseSet::default())).unwrap().is_empty());
        assert!(build_moon(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_rise_without_set_runs_to_end_of_day() {
        let moon = build_moon(&[RiseSet::rise_only(hm(21, 30))]).unwrap();
        assert_eq!(moon, vec![Interval::new(hm(21, 30), DayTime::END_OF_DAY)]);
    }

    #[test]
    fn test_set_without_rise_starts_at_midnight() {
        let moon = build_moon(&[RiseSet::set_only(hm(7, 15))]).unwrap();
        assert_eq!(moon, vec![Interval::new(DayTime::MIDNIGHT, hm(7, 15))]);
    }

    #[test]
    fn test_rise_after_set_is_malformed() {
        let err = build_sun(Some(&RiseSet::both(hm(18, 0), hm(6, 0)))).unwrap_err();
        assert_eq!(
            err,
            DayError::MalformedEventOrder {
                body: Body::Sun,
                pair: 1
            }
        );

        let err = build_moon(&[
            RiseSet::set_only(hm(5, 0)),
            RiseSet::both(hm(22, 0), hm(21, 0)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            DayError::MalformedEventOrder {
                body: Body::Moon,
                pair: 2
            }
        );
    }

    #[test]
    fn test_two_moon_intervals() {
        let moon = build_moon(&[RiseSet::set_only(hm(7, 0)), RiseSet::rise_only(hm(20, 0))]).unwrap();
        assert_eq!(
            moon,
            vec![
                Interval::new(DayTime::MIDNIGHT, hm(7, 0)),
                Interval::new(hm(20, 0), DayTime::END_OF_DAY),
            ]
        );
    }

    #[test]
    fn test_touching_moon_intervals_accepted() {
        let moon = build_moon(&[RiseSet::both(hm(1, 0), hm(3, 0)), RiseSet::both(hm(3, 0), hm(5, 0))]);
        assert_eq!(moon.unwrap().len(), 2);
    }

    #[test]
    fn test_overlapping_moon_intervals_rejected() {
        let err = build_moon(&[RiseSet::both(hm(1, 0), hm(4, 0)), RiseSet::both(hm(3, 0), hm(5, 0))]);
        assert_eq!(err, Err(DayError::OverlappingMoonIntervals));
    }

    #[test]
    fn test_out_of_order_moon_intervals_rejected() {
        let err = build_moon(&[RiseSet::rise_only(hm(20, 0)), RiseSet::set_only(hm(7, 0))]);
        assert_eq!(err, Err(DayError::OverlappingMoonIntervals));
    }

    #[test]
    fn test_too_many_moon_pairs() {
        let pairs = [RiseSet::default(); 3];
        assert_eq!(build_moon(&pairs), Err(DayError::TooManyMoonIntervals(3)));
    }

    #[test]
    fn test_events_clipped_to_day() {
        let moon = build_moon(&[RiseSet::both(DayTime::new(-600.0), hm(2, 0))]).unwrap();
        assert_eq!(moon, vec![Interval::new(DayTime::MIDNIGHT, hm(2, 0))]);

        let sun = build_sun(Some(&RiseSet::rise_only(DayTime::new(90_000.0)))).unwrap();
        assert!(sun.is_empty());
    }

    #[test]
    fn test_zero_length_pair_dropped() {
        let sun = build_sun(Some(&RiseSet::both(hm(12, 0), hm(12, 0)))).unwrap();
        assert!(sun.is_empty());
    }

    #[test]
    fn test_split_moon() {
        assert!(RiseSet::split_moon(None, None).is_empty());
        assert_eq!(
            RiseSet::split_moon(Some(hm(8, 0)), Some(hm(19, 0))),
            vec![RiseSet::both(hm(8, 0), hm(19, 0))]
        );
        assert_eq!(
            RiseSet::split_moon(None, Some(hm(9, 0))),
            vec![RiseSet::set_only(hm(9, 0))]
        );
    }

    #[test]
    fn test_split_moon_equal_readings_cover_whole_day() {
        let pairs = RiseSet::split_moon(Some(hm(12, 0)), Some(hm(12, 0)));
        assert_eq!(
            pairs,
            vec![RiseSet::set_only(hm(12, 0)), RiseSet::rise_only(hm(12, 0))]
        );

        let moon = build_moon(&pairs).unwrap();
        assert_eq!(
            moon,
            vec![
                Interval::new(DayTime::MIDNIGHT, hm(12, 0)),
                Interval::new(hm(12, 0), DayTime::END_OF_DAY),
            ]
        );
        let total: f64 = moon.iter().map(|p| p.duration_seconds()).sum();
        assert_eq!(total, 86_400.0);
    }

    #[test]
    fn test_build_daily_events() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let events = DailyEvents::new("London", date, Degrees::new(90.0))
            .with_sun(RiseSet::both(hm(8, 6), hm(16, 2)))
            .with_moon(RiseSet::set_only(hm(11, 0)))
            .with_moon(RiseSet::rise_only(hm(23, 0)));
        let built = build(&events).unwrap();
        assert_eq!(built.sun, vec![Interval::new(hm(8, 6), hm(16, 2))]);
        assert_eq!(built.moon.len(), 2);
    }
}
