// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Event provider seam and the per-(location, year) runner.
//!
//! The runner walks every calendar date of a year in increasing order, asks
//! the provider for that day's events, classifies them and folds the result
//! into the year's accumulator. Per-day failures become [`Diagnostic`]s and
//! never stop the run.
//!
//! Partitions share no state. A provider that is `Sync` can be handed to
//! [`run_year`] from several threads at once, one (location, year) each.

use chrono::{Datelike, NaiveDate};
use std::collections::HashMap;
use std::ops::RangeInclusive;

use crate::classify::{classify_day, DailyStats, SpanPolicy};
use crate::error::{DayError, Diagnostic, LocationId};
use crate::events::DailyEvents;
use crate::phase::PhaseGate;
use crate::yearly::{YearlyAccumulator, YearlyTotals};

/// Source of raw daily rise/set events (an ephemeris, a table, a file).
pub trait EventProvider {
    /// Events for `location` on `date`, or `None` when no data exists.
    fn daily_events(&self, location: &LocationId, date: NaiveDate) -> Option<DailyEvents>;
}

/// Provider backed by a map of precomputed records.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProvider {
    records: HashMap<(LocationId, NaiveDate), DailyEvents>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing any previous one for the same key.
    pub fn insert(&mut self, events: DailyEvents) -> Option<DailyEvents> {
        self.records
            .insert((events.location.clone(), events.date), events)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl FromIterator<DailyEvents> for InMemoryProvider {
    fn from_iter<I: IntoIterator<Item = DailyEvents>>(iter: I) -> Self {
        let mut provider = Self::new();
        for events in iter {
            provider.insert(events);
        }
        provider
    }
}

impl EventProvider for InMemoryProvider {
    fn daily_events(&self, location: &LocationId, date: NaiveDate) -> Option<DailyEvents> {
        self.records.get(&(location.clone(), date)).cloned()
    }
}

/// Knobs of a run.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunOptions {
    pub gate: PhaseGate,
    /// Copied onto every [`YearRun`]; reports surface start/end columns with it.
    pub span_policy: SpanPolicy,
}

/// Outcome of one (location, year) partition.
#[derive(Debug, Clone, PartialEq)]
pub struct YearRun {
    /// Classified days in date order.
    pub days: Vec<DailyStats>,
    pub totals: YearlyTotals,
    /// Days left out, with the reason.
    pub diagnostics: Vec<Diagnostic>,
    pub span_policy: SpanPolicy,
}

/// Every calendar date of `year` (365 or 366 entries).
pub fn dates_of_year(year: i32) -> impl Iterator<Item = NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .into_iter()
        .flat_map(|first| first.iter_days())
        .take_while(move |d| d.year() == year)
}

/// Process one location for one year.
pub fn run_year<P>(provider: &P, location: &LocationId, year: i32, options: &RunOptions) -> YearRun
where
    P: EventProvider + ?Sized,
{
    let mut acc = YearlyAccumulator::new(location.clone(), year);
    let mut days = Vec::new();
    let mut diagnostics = Vec::new();

    for date in dates_of_year(year) {
        let outcome = provider
            .daily_events(location, date)
            .ok_or_else(|| DayError::MissingProviderData {
                location: location.clone(),
                date,
            })
            .and_then(|events| classify_day(&events, &options.gate))
            .and_then(|stats| acc.accumulate(&stats).map(|()| stats));

        match outcome {
            Ok(stats) => days.push(stats),
            Err(error) => {
                log::warn!("skipping {location} {date}: {error}");
                diagnostics.push(Diagnostic {
                    location: location.clone(),
                    date,
                    error,
                });
            }
        }
    }

    YearRun {
        days,
        totals: acc.finalize(),
        diagnostics,
        span_policy: options.span_policy,
    }
}

/// Process every location for every year of `years`.
///
/// Results come back grouped by location, then by increasing year.
pub fn run_range<P>(
    provider: &P,
    locations: &[LocationId],
    years: RangeInclusive<i32>,
    options: &RunOptions,
) -> Vec<YearRun>
where
    P: EventProvider + ?Sized,
{
    locations
        .iter()
        .flat_map(|location| {
            years
                .clone()
                .map(move |year| run_year(provider, location, year, options))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RiseSet;
    use crate::instant::DayTime;
    use crate::yearly::DayCounter;
    use qtty::Degrees;

    fn hm(h: u32, m: u32) -> DayTime {
        DayTime::from_hms(h, m, 0)
    }

    fn normal_day(location: &str, date: NaiveDate) -> DailyEvents {
        DailyEvents::new(location, date, Degrees::new(120.0))
            .with_sun(RiseSet::both(hm(6, 0), hm(18, 0)))
            .with_moon(RiseSet::both(hm(14, 0), hm(22, 0)))
    }

    #[test]
    fn test_dates_of_year() {
        assert_eq!(dates_of_year(2023).count(), 365);
        assert_eq!(dates_of_year(2000).count(), 366);
        assert_eq!(dates_of_year(1900).count(), 365);
        assert_eq!(
            dates_of_year(2024).last(),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
    }

    #[test]
    fn test_missing_days_become_diagnostics() {
        let provider: InMemoryProvider = dates_of_year(2023)
            .filter(|d| d.month() != 2)
            .map(|d| normal_day("Tokyo", d))
            .collect();
        let run = run_year(&provider, &"Tokyo".into(), 2023, &RunOptions::default());

        assert_eq!(run.days.len(), 365 - 28);
        assert_eq!(run.span_policy, SpanPolicy::EarliestSegment);
        assert_eq!(run.diagnostics.len(), 28);
        assert!(run
            .diagnostics
            .iter()
            .all(|d| matches!(d.error, DayError::MissingProviderData { .. })));
        assert_eq!(run.totals.count(DayCounter::Overlap), 365 - 28);
        assert_eq!(run.totals.days_processed(), 365 - 28);
    }

    #[test]
    fn test_malformed_day_is_excluded_not_fatal() {
        let bad_date = NaiveDate::from_ymd_opt(2023, 3, 3).unwrap();
        let mut provider: InMemoryProvider =
            dates_of_year(2023).map(|d| normal_day("Cairo", d)).collect();
        provider.insert(
            DailyEvents::new("Cairo", bad_date, Degrees::new(120.0))
                .with_sun(RiseSet::both(hm(18, 0), hm(6, 0))),
        );

        let run = run_year(&provider, &"Cairo".into(), 2023, &RunOptions::default());
        assert_eq!(run.days.len(), 364);
        assert_eq!(run.diagnostics.len(), 1);
        assert_eq!(run.diagnostics[0].date, bad_date);
        assert_eq!(run.totals.count(DayCounter::Sun), 364);
        assert!(run.days.iter().all(|s| s.date != bad_date));
    }

    #[test]
    fn test_days_in_increasing_order() {
        let provider: InMemoryProvider =
            dates_of_year(2021).map(|d| normal_day("London", d)).collect();
        let run = run_year(&provider, &"London".into(), 2021, &RunOptions::default());
        assert!(run.days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_run_range_partitions() {
        let provider: InMemoryProvider = dates_of_year(2020)
            .chain(dates_of_year(2021))
            .flat_map(|d| [normal_day("Tokyo", d), normal_day("Cairo", d)])
            .collect();
        let locations = vec![LocationId::from("Tokyo"), LocationId::from("Cairo")];
        let runs = run_range(&provider, &locations, 2020..=2022, &RunOptions::default());

        let keys: Vec<_> = runs
            .iter()
            .map(|r| (r.totals.location().as_str().to_owned(), r.totals.year()))
            .collect();
        assert_eq!(keys.len(), 6);
        assert_eq!(keys[0], ("Tokyo".to_owned(), 2020));
        assert_eq!(keys[5], ("Cairo".to_owned(), 2022));

        assert_eq!(runs[0].totals.count(DayCounter::Sun), 366);
        assert_eq!(runs[1].totals.count(DayCounter::Sun), 365);
        // No data at all for 2022.
        assert_eq!(runs[2].totals.days_processed(), 0);
        assert_eq!(runs[2].diagnostics.len(), 365);
    }

    #[test]
    fn test_run_keeps_span_policy() {
        let provider = InMemoryProvider::new();
        let options = RunOptions {
            span_policy: SpanPolicy::Envelope,
            ..RunOptions::default()
        };
        let runs = run_range(&provider, &[LocationId::from("Lima")], 2020..=2021, &options);
        assert!(runs.iter().all(|r| r.span_policy == SpanPolicy::Envelope));
    }

    #[test]
    fn test_partitions_run_on_threads() {
        let provider: InMemoryProvider =
            dates_of_year(2022).map(|d| normal_day("Varanasi", d)).collect();
        let location = LocationId::from("Varanasi");
        let options = RunOptions::default();

        let runs: Vec<YearRun> = std::thread::scope(|scope| {
            let handles: Vec<_> = [2021, 2022]
                .into_iter()
                .map(|year| {
                    let (provider, location, options) = (&provider, &location, &options);
                    scope.spawn(move || run_year(provider, location, year, options))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(runs[0].totals.days_processed(), 0);
        assert_eq!(runs[1].totals.days_processed(), 365);
    }
}
