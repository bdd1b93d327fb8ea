//! Date windows covered by each zoom level.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;
use crate::model::Zoom;

/// First day of a week-zoom window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }
}

impl FromStr for WeekStart {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(ScheduleError::InvalidWeekStart(other.to_string())),
        }
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WeekStart::Monday => "monday",
            WeekStart::Sunday => "sunday",
        })
    }
}

/// The inclusive `(start, end)` window a zoom level shows around `anchor`.
///
/// - day: the anchor itself
/// - week: the seven days starting on the most recent `week_start`
/// - month: the anchor's calendar month
/// - year: the anchor's calendar year
pub fn window_for(anchor: NaiveDate, zoom: Zoom, week_start: WeekStart) -> (NaiveDate, NaiveDate) {
    match zoom {
        Zoom::Day => (anchor, anchor),
        Zoom::Week => {
            let back = (7 + anchor.weekday().num_days_from_monday()
                - week_start.weekday().num_days_from_monday())
                % 7;
            let start = anchor - Days::new(u64::from(back));
            (start, start + Days::new(6))
        }
        Zoom::Month => {
            let start = anchor.with_day(1).unwrap_or(anchor);
            let end = start
                .checked_add_months(chrono::Months::new(1))
                .and_then(|next| next.pred_opt())
                .unwrap_or(anchor);
            (start, end)
        }
        Zoom::Year => {
            let start = NaiveDate::from_ymd_opt(anchor.year(), 1, 1).unwrap_or(anchor);
            let end = NaiveDate::from_ymd_opt(anchor.year(), 12, 31).unwrap_or(anchor);
            (start, end)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn week_respects_start_day() {
        // 2024-01-10 is a Wednesday.
        let anchor = date(2024, 1, 10);
        assert_eq!(
            window_for(anchor, Zoom::Week, WeekStart::Monday),
            (date(2024, 1, 8), date(2024, 1, 14))
        );
        assert_eq!(
            window_for(anchor, Zoom::Week, WeekStart::Sunday),
            (date(2024, 1, 7), date(2024, 1, 13))
        );
    }

    #[test]
    fn week_anchor_on_start_day_starts_there() {
        let monday = date(2024, 1, 8);
        assert_eq!(window_for(monday, Zoom::Week, WeekStart::Monday).0, monday);
    }

    #[test]
    fn month_handles_leap_february() {
        assert_eq!(
            window_for(date(2024, 2, 14), Zoom::Month, WeekStart::Monday),
            (date(2024, 2, 1), date(2024, 2, 29))
        );
        assert_eq!(
            window_for(date(2023, 12, 31), Zoom::Month, WeekStart::Monday),
            (date(2023, 12, 1), date(2023, 12, 31))
        );
    }

    #[test]
    fn year_spans_calendar_year() {
        assert_eq!(
            window_for(date(2024, 6, 1), Zoom::Year, WeekStart::Monday),
            (date(2024, 1, 1), date(2024, 12, 31))
        );
    }
}
