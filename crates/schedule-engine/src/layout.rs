//! Time-grid layout -- packs overlapping timed items into side-by-side columns.
//!
//! Items are clipped to the visible hour window, positioned in minutes from
//! the top of the window, then assigned columns with greedy interval
//! partitioning (sorted by start, longer spans first). The number of columns
//! in an overlap cluster equals the largest number of items overlapping at any
//! instant within it.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Timelike};
use log::trace;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::model::ScheduleItem;

/// Floor applied to every rendered span so short items stay readable.
pub const MINIMUM_RENDER_MINUTES: u32 = 30;

/// Span used for timed items without a duration.
pub const DEFAULT_DURATION_MINUTES: u32 = 60;

pub const DEFAULT_VISIBLE_START_HOUR: u32 = 6;
pub const DEFAULT_VISIBLE_END_HOUR: u32 = 22;

/// Visible window and sizing rules for the time grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// First visible hour (inclusive).
    pub visible_start_hour: u32,
    /// Last visible hour (inclusive).
    pub visible_end_hour: u32,
    pub minimum_render_minutes: u32,
    pub default_duration_minutes: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            visible_start_hour: DEFAULT_VISIBLE_START_HOUR,
            visible_end_hour: DEFAULT_VISIBLE_END_HOUR,
            minimum_render_minutes: MINIMUM_RENDER_MINUTES,
            default_duration_minutes: DEFAULT_DURATION_MINUTES,
        }
    }
}

impl LayoutConfig {
    /// Default sizing with a custom visible window.
    pub fn with_hours(visible_start_hour: u32, visible_end_hour: u32) -> Self {
        Self {
            visible_start_hour,
            visible_end_hour,
            ..Self::default()
        }
    }

    /// Reject windows outside `0..=23`, inverted windows and a zero minimum span.
    pub fn validate(&self) -> Result<()> {
        if self.visible_end_hour > 23 {
            return Err(ScheduleError::InvalidHours(format!(
                "end hour {} is past 23",
                self.visible_end_hour
            )));
        }
        if self.visible_start_hour > self.visible_end_hour {
            return Err(ScheduleError::InvalidHours(format!(
                "start hour {} is after end hour {}",
                self.visible_start_hour, self.visible_end_hour
            )));
        }
        if self.minimum_render_minutes == 0 {
            return Err(ScheduleError::InvalidHours(
                "minimum render span must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Whether an hour of the day falls inside the visible window.
    pub fn shows_hour(&self, hour: u32) -> bool {
        hour >= self.visible_start_hour && hour <= self.visible_end_hour
    }

    /// Height of the visible window; the last hour is shown in full.
    pub fn visible_minutes(&self) -> u32 {
        (self.visible_end_hour.saturating_sub(self.visible_start_hour) + 1) * 60
    }

    /// Minutes from the top of the window for a time of day, if visible.
    pub fn offset_of<T: Timelike>(&self, time: &T) -> Option<u32> {
        let hour = time.hour();
        self.shows_hour(hour)
            .then(|| (hour - self.visible_start_hour) * 60 + time.minute())
    }
}

/// A timed item with its position in the grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRecord {
    pub item: ScheduleItem,
    pub column_index: usize,
    /// Columns in this item's overlap cluster; each renders at `1 / total_columns` width.
    pub total_columns: usize,
    pub top_offset_minutes: u32,
    pub span_minutes: u32,
}

impl LayoutRecord {
    pub fn end_offset_minutes(&self) -> u32 {
        self.top_offset_minutes.saturating_add(self.span_minutes)
    }

    /// Whether the half-open intervals of two records intersect.
    pub fn overlaps(&self, other: &LayoutRecord) -> bool {
        self.top_offset_minutes < other.end_offset_minutes()
            && other.top_offset_minutes < self.end_offset_minutes()
    }

    pub fn top_fraction(&self, config: &LayoutConfig) -> f64 {
        f64::from(self.top_offset_minutes) / f64::from(config.visible_minutes())
    }

    pub fn height_fraction(&self, config: &LayoutConfig) -> f64 {
        f64::from(self.span_minutes) / f64::from(config.visible_minutes())
    }

    pub fn left_fraction(&self) -> f64 {
        self.column_index as f64 / self.total_columns.max(1) as f64
    }

    pub fn width_fraction(&self) -> f64 {
        1.0 / self.total_columns.max(1) as f64
    }
}

/// Lay out one day's timed items in the `[visible_start_hour, visible_end_hour]` window.
///
/// Uses [`MINIMUM_RENDER_MINUTES`] and [`DEFAULT_DURATION_MINUTES`] for sizing.
pub fn layout_day(
    items: &[ScheduleItem],
    visible_start_hour: u32,
    visible_end_hour: u32,
) -> Vec<LayoutRecord> {
    layout_day_with(
        items,
        &LayoutConfig::with_hours(visible_start_hour, visible_end_hour),
    )
}

/// Lay out one day's timed items with explicit sizing rules.
///
/// All-day items and items starting in an hour outside the window are
/// dropped. Records come back in packing order: by top offset, longer spans
/// first on ties, otherwise input order.
pub fn layout_day_with(items: &[ScheduleItem], config: &LayoutConfig) -> Vec<LayoutRecord> {
    let mut candidates: Vec<(&ScheduleItem, u32, u32)> = items
        .iter()
        .filter_map(|item| {
            let top = config.offset_of(&item.time?)?;
            let span = item
                .duration
                .unwrap_or(config.default_duration_minutes)
                .max(config.minimum_render_minutes);
            Some((item, top, span))
        })
        .collect();

    // Stable: equal (top, span) pairs keep input order.
    candidates.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| b.2.cmp(&a.2)));

    let mut records: Vec<LayoutRecord> = Vec::with_capacity(candidates.len());
    // End offset of the last item placed in each column of the open cluster.
    let mut column_ends: Vec<u32> = Vec::new();
    let mut cluster_start = 0;
    let mut cluster_end = 0;

    for (item, top, span) in candidates {
        if !column_ends.is_empty() && top >= cluster_end {
            close_cluster(&mut records[cluster_start..], column_ends.len());
            column_ends.clear();
            cluster_start = records.len();
            cluster_end = 0;
        }

        let end = top.saturating_add(span);
        // Members of a column are disjoint and placed by start, so the last
        // member has the latest end.
        let column_index = match column_ends.iter().position(|&e| e <= top) {
            Some(i) => {
                column_ends[i] = end;
                i
            }
            None => {
                column_ends.push(end);
                column_ends.len() - 1
            }
        };
        cluster_end = cluster_end.max(end);

        records.push(LayoutRecord {
            item: item.clone(),
            column_index,
            total_columns: 0,
            top_offset_minutes: top,
            span_minutes: span,
        });
    }

    if !column_ends.is_empty() {
        close_cluster(&mut records[cluster_start..], column_ends.len());
    }

    records
}

fn close_cluster(cluster: &mut [LayoutRecord], total_columns: usize) {
    trace!(
        "closing cluster of {} items across {} columns",
        cluster.len(),
        total_columns
    );
    for record in cluster {
        record.total_columns = total_columns;
    }
}

/// Group items by date and lay out each day separately (week view columns).
///
/// Days without any visible timed item are omitted.
pub fn layout_by_day(
    items: &[ScheduleItem],
    config: &LayoutConfig,
) -> BTreeMap<NaiveDate, Vec<LayoutRecord>> {
    let mut by_day: BTreeMap<NaiveDate, Vec<ScheduleItem>> = BTreeMap::new();
    for item in items.iter().filter(|i| !i.is_all_day()) {
        by_day.entry(item.date).or_default().push(item.clone());
    }

    by_day
        .into_iter()
        .map(|(date, day_items)| (date, layout_day_with(&day_items, config)))
        .filter(|(_, records)| !records.is_empty())
        .collect()
}

/// Split items into all-day banner items and timed grid items, keeping order.
pub fn split_all_day(items: &[ScheduleItem]) -> (Vec<&ScheduleItem>, Vec<&ScheduleItem>) {
    items.iter().partition(|item| item.is_all_day())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(LayoutConfig::default().validate().is_ok());
    }

    #[test]
    fn inverted_or_out_of_range_hours_rejected() {
        assert!(LayoutConfig::with_hours(10, 8).validate().is_err());
        assert!(LayoutConfig::with_hours(0, 24).validate().is_err());
        let zero_floor = LayoutConfig {
            minimum_render_minutes: 0,
            ..LayoutConfig::default()
        };
        assert!(zero_floor.validate().is_err());
    }

    #[test]
    fn visible_minutes_includes_last_hour() {
        assert_eq!(LayoutConfig::with_hours(6, 22).visible_minutes(), 17 * 60);
        assert_eq!(LayoutConfig::with_hours(9, 9).visible_minutes(), 60);
    }
}
