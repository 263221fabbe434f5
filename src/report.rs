// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Clock-string formatting and CSV rows.
//!
//! Durations render as `H:MM:SS` with unbounded hours (yearly sums such as
//! `4383:12:00` stay readable), time points as `HH:MM:SS`. Both round to the
//! nearest second. Writers take any `io::Write`; opening files is left to
//! the caller.

use qtty::Seconds;
use std::io;

use crate::classify::{DailyStats, IntervalClass, SpanPolicy};
use crate::error::ReportError;
use crate::instant::{split_hms, DayTime, SECONDS_PER_DAY};
use crate::provider::YearRun;
use crate::yearly::{DayCounter, YearlyTotals};

/// Header of the per-day CSV.
pub const DAILY_HEADER: [&str; 26] = [
    "Date",
    "Sun-Rise-Time",
    "Sun-Set-Time",
    "Total-Sun-Time",
    "Moon-Rise-1-Time",
    "Moon-Set-1-Time",
    "Moon-Rise-2-Time",
    "Moon-Set-2-Time",
    "Total-Moon-Time",
    "Overlap-Sun-Moon-Start-Time",
    "Overlap-Sun-Moon-End-Time",
    "Total-Overlap-Time",
    "No-Moon-No-Sun-Start-Time",
    "No-Moon-No-Sun-End-Time",
    "Total-No-Moon-No-Sun-Time",
    "Total-Moon-Visible-Time",
    "Surya-Time",
    "Chandra-Time",
    "Agni-Time",
    "Total-Sun-Days",
    "Total-Moon-Days",
    "Total-Overlap-Days",
    "Total-No-Sun-No-Moon-Days",
    "Surya-Days",
    "Chandra-Days",
    "Agni-Days",
];

/// Header of the multi-location summary CSV.
pub const SUMMARY_HEADER: [&str; 9] = [
    "Location",
    "Year",
    "Sun-Days",
    "Moon-Days",
    "Overlap-Days",
    "No-Sun-No-Moon-Days",
    "Surya-Days",
    "Chandra-Days",
    "Agni-Days",
];

/// Label of the yearly totals row.
pub const YEAR_TOTAL_LABEL: &str = "Year Total";

/// Format a duration as `H:MM:SS`. Zero or negative durations give `0:00:00`.
///
/// ```
/// use skyday::report::format_duration;
/// use qtty::Seconds;
///
/// assert_eq!(format_duration(Seconds::new(39_600.0)), "11:00:00");
/// assert_eq!(format_duration(Seconds::new(3_600.0)), "1:00:00");
/// ```
pub fn format_duration(duration: Seconds) -> String {
    let secs = duration.value();
    if secs.is_nan() || secs <= 0.0 {
        return "0:00:00".to_owned();
    }
    let (h, m, s) = split_hms(secs.round() as u64);
    format!("{h}:{m:02}:{s:02}")
}

/// Format an optional time point; absent points are blank.
pub fn format_time(time: Option<DayTime>) -> String {
    time.map(|t| t.to_string()).unwrap_or_default()
}

/// Moon rise/set columns: `(rise1, set1, rise2, set2)`.
///
/// A rise is blank when the moon was already up at midnight and a set is
/// blank when the moon is still up after 23:59:59.
fn moon_columns(moon: &[crate::period::DayInterval]) -> [Option<DayTime>; 4] {
    let last_second = SECONDS_PER_DAY - 1.0;
    let sets_today = |t: &DayTime| t.value() <= last_second;
    let first = moon.first();
    let second = moon.get(1);
    [
        first.map(|p| p.start).filter(|t| *t > DayTime::MIDNIGHT),
        first.map(|p| p.end).filter(sets_today),
        second.map(|p| p.start),
        second.map(|p| p.end).filter(sets_today),
    ]
}

/// One CSV record for a classified day.
pub fn daily_record(stats: &DailyStats, policy: SpanPolicy) -> Vec<String> {
    let sun = policy.surface(&stats.sun);
    let overlap = stats.span(IntervalClass::Overlap, policy);
    let darkness = stats.span(IntervalClass::Darkness, policy);
    let [rise1, set1, rise2, set2] = moon_columns(&stats.moon);

    let mut record = vec![
        stats.date.to_string(),
        format_time(sun.map(|p| p.start)),
        format_time(sun.map(|p| p.end)),
        format_duration(stats.total_sun),
        format_time(rise1),
        format_time(set1),
        format_time(rise2),
        format_time(set2),
        format_duration(stats.total_moon),
        format_time(overlap.map(|p| p.start)),
        format_time(overlap.map(|p| p.end)),
        format_duration(stats.total_overlap),
        format_time(darkness.map(|p| p.start)),
        format_time(darkness.map(|p| p.end)),
        format_duration(stats.total_darkness),
        format_duration(stats.total_crescent_moon),
        format_duration(stats.surya),
        format_duration(stats.chandra),
        format_duration(stats.agni),
    ];
    // Day counts only appear on the totals row.
    record.resize(DAILY_HEADER.len(), String::new());
    record
}

/// The "Year Total" record: summed durations and whole-day counters.
pub fn year_total_record(totals: &YearlyTotals) -> Vec<String> {
    let blank = String::new;
    let sum = |c| format_duration(totals.sum(c));

    let mut record = vec![
        YEAR_TOTAL_LABEL.to_owned(),
        blank(),
        blank(),
        sum(DayCounter::Sun),
        blank(),
        blank(),
        blank(),
        blank(),
        sum(DayCounter::Moon),
        blank(),
        blank(),
        sum(DayCounter::Overlap),
        blank(),
        blank(),
        sum(DayCounter::NoSunNoMoon),
        blank(),
        sum(DayCounter::Surya),
        sum(DayCounter::Chandra),
        sum(DayCounter::Agni),
    ];
    record.extend(DayCounter::ALL.iter().map(|c| totals.count(*c).to_string()));
    record
}

/// Write one (location, year) run: header, one row per day, totals row.
///
/// Start/end columns follow the run's [`SpanPolicy`].
pub fn write_year_csv<W: io::Write>(writer: W, run: &YearRun) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DAILY_HEADER)?;
    for stats in &run.days {
        wtr.write_record(daily_record(stats, run.span_policy))?;
    }
    wtr.write_record(year_total_record(&run.totals))?;
    wtr.flush()?;
    Ok(())
}

/// Write the whole-day counters of many runs, one row per (location, year).
pub fn write_summary_csv<W: io::Write>(writer: W, runs: &[YearRun]) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(SUMMARY_HEADER)?;
    for run in runs {
        let totals = &run.totals;
        let mut record = vec![totals.location().to_string(), totals.year().to_string()];
        record.extend(DayCounter::ALL.iter().map(|c| totals.count(*c).to_string()));
        wtr.write_record(record)?;
    }
    wtr.flush()?;
    Ok(())
}
