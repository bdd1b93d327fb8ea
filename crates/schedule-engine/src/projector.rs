//! Occurrence projection -- expands recurring routines into dated schedule items.
//!
//! Each routine is rendered as an RFC 5545 RRULE and expanded with the `rrule`
//! crate across the requested window. Dates that already have a materialized
//! `RoutineInstance` are suppressed via a `(routine id, date)` index built once
//! per call.

use std::collections::{BTreeSet, HashSet};

use chrono::{Datelike, Days, NaiveDate, Utc};
use log::{debug, warn};
use rrule::RRuleSet;

use crate::error::{Result, ScheduleError};
use crate::model::{Frequency, ItemType, Routine, RoutineInstance, ScheduleItem, Status};
use crate::parse::{parse_date, parse_optional_time};

const BYDAY_CODES: [&str; 7] = ["SU", "MO", "TU", "WE", "TH", "FR", "SA"];

/// Project every routine into concrete occurrences within `[window_start, window_end]`.
///
/// Output is ordered day by day, and within a day by routine order. Routines
/// whose time is malformed or whose rule cannot be expanded are skipped.
/// Instances referring to unknown routines are ignored.
pub fn project(
    routines: &[Routine],
    instances: &[RoutineInstance],
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Vec<ScheduleItem> {
    if window_start > window_end || routines.is_empty() {
        return Vec::new();
    }

    let materialized = index_instances(instances);

    // (routine, parsed time, occurrence dates) for every usable routine.
    let mut expanded = Vec::with_capacity(routines.len());
    for routine in routines {
        let time = match parse_optional_time(routine.time.as_deref()) {
            Ok(t) => t,
            Err(e) => {
                debug!("skipping routine {}: {}", routine.id, e);
                continue;
            }
        };
        match occurrence_dates(routine, window_start, window_end) {
            Ok(dates) => expanded.push((routine, time, dates)),
            Err(e) => warn!("skipping routine {}: {}", routine.id, e),
        }
    }

    let mut items = Vec::new();
    for day in window_start.iter_days().take_while(|d| *d <= window_end) {
        for (routine, time, dates) in &expanded {
            if !dates.contains(&day) {
                continue;
            }
            if materialized.contains(&(routine.id.as_str(), day)) {
                debug!("routine {} already materialized on {}", routine.id, day);
                continue;
            }
            items.push(ScheduleItem {
                id: format!("routine-proj-{}-{}", routine.id, day.format("%Y-%m-%d")),
                item_type: ItemType::Routine,
                title: routine.title.clone(),
                date: day,
                time: *time,
                duration: routine.duration,
                status: Status::Future,
                entity_id: routine.id.clone(),
                area_id: routine.area_id.clone(),
                details: None,
                is_focus: None,
                color: None,
            });
        }
    }

    items
}

/// Whether `routine` is eligible to occur on `date`, ignoring materialization.
pub fn occurs_on(routine: &Routine, date: NaiveDate) -> bool {
    match &routine.frequency {
        Frequency::Daily => true,
        Frequency::Weekly => {
            let index = date.weekday().num_days_from_sunday() as u8;
            routine
                .days_of_week
                .as_ref()
                .is_some_and(|days| days.contains(&index))
        }
        Frequency::Unsupported(_) => false,
    }
}

/// Render a routine's recurrence as an RRULE body (without DTSTART/UNTIL).
///
/// Returns `None` when the routine can never occur: a weekly routine with no
/// valid weekday, or an unsupported frequency.
pub fn rrule_for(routine: &Routine) -> Option<String> {
    match &routine.frequency {
        Frequency::Daily => Some("FREQ=DAILY".to_string()),
        Frequency::Weekly => {
            let days: BTreeSet<u8> = routine
                .days_of_week
                .iter()
                .flatten()
                .copied()
                .filter(|d| (*d as usize) < BYDAY_CODES.len())
                .collect();
            if days.is_empty() {
                return None;
            }
            let byday: Vec<&str> = days.iter().map(|d| BYDAY_CODES[*d as usize]).collect();
            Some(format!("FREQ=WEEKLY;BYDAY={}", byday.join(",")))
        }
        Frequency::Unsupported(_) => None,
    }
}

/// Expand one routine into the set of dates it occurs on within the window.
///
/// `rrule` caps a single expansion at `u16::MAX` occurrences, so longer
/// windows are expanded in consecutive chunks of at most that many days.
fn occurrence_dates(
    routine: &Routine,
    window_start: NaiveDate,
    window_end: NaiveDate,
) -> Result<BTreeSet<NaiveDate>> {
    let Some(rule) = rrule_for(routine) else {
        debug!("routine {} has no occurrences ({:?})", routine.id, routine.frequency);
        return Ok(BTreeSet::new());
    };

    let mut dates = BTreeSet::new();
    let mut chunk_start = window_start;
    loop {
        let chunk_end = chunk_start
            .checked_add_days(Days::new(u64::from(MAX_CHUNK_DAYS) - 1))
            .map_or(window_end, |d| d.min(window_end));
        dates.extend(
            expand_chunk(&rule, chunk_start, chunk_end)?
                .into_iter()
                .filter(|d| occurs_on(routine, *d)),
        );
        match chunk_end.succ_opt() {
            Some(next) if chunk_end < window_end => chunk_start = next,
            _ => break,
        }
    }
    Ok(dates)
}

/// Largest number of days expanded by one `rrule` call.
const MAX_CHUNK_DAYS: u16 = u16::MAX;

/// Expand an RRULE body between two dates, inclusive. Holds at most
/// `MAX_CHUNK_DAYS` days so a daily rule cannot exceed the expansion limit.
fn expand_chunk(rule: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<NaiveDate>> {
    // Anchor at midnight UTC and run until the last second of the chunk;
    // only the calendar date of each instance is used.
    let rrule_text = format!(
        "DTSTART;TZID=UTC:{}\nRRULE:{};UNTIL={}Z",
        start.format("%Y%m%dT000000"),
        rule,
        end.format("%Y%m%dT235959"),
    );

    let rrule_set: RRuleSet = rrule_text
        .parse()
        .map_err(|e| ScheduleError::InvalidRule(format!("{}", e)))?;

    let span_days = (end - start).num_days() + 1;
    let limit = u16::try_from(span_days).unwrap_or(MAX_CHUNK_DAYS);

    // The expansion is re-checked against eligibility by the caller so that
    // DTSTART never leaks in as an occurrence on a day outside BYDAY.
    Ok(rrule_set
        .all(limit)
        .dates
        .into_iter()
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .filter(|d| *d >= start && *d <= end)
        .collect())
}

/// Index materialized instances by `(routine id, date)`.
fn index_instances(instances: &[RoutineInstance]) -> HashSet<(&str, NaiveDate)> {
    instances
        .iter()
        .filter_map(|inst| match parse_date(&inst.date) {
            Ok(date) => Some((inst.from_routine_id.as_str(), date)),
            Err(e) => {
                debug!("ignoring routine instance {}: {}", inst.id, e);
                None
            }
        })
        .collect()
}
